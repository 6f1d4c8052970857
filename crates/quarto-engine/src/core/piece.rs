use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the four binary properties distinguishing the pieces.
///
/// The discriminant is the bit position of the attribute in
/// [`GamePiece::attribute_mask`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Attribute {
    /// Hollow (`true`) or solid (`false`).
    Hollow = 0,
    /// Round (`true`) or square (`false`).
    Round = 1,
    /// Light (`true`) or dark (`false`).
    Light = 2,
    /// Tall (`true`) or short (`false`).
    Tall = 3,
}

impl Attribute {
    /// Number of attributes (4).
    pub const LEN: usize = 4;

    pub const ALL: [Self; Self::LEN] = [
        Attribute::Hollow,
        Attribute::Round,
        Attribute::Light,
        Attribute::Tall,
    ];

    #[must_use]
    pub const fn bit(self) -> u8 {
        1 << self as u8
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Character used in the short code when the attribute is `true`.
    const fn as_char(self) -> char {
        match self {
            Attribute::Hollow => 'h',
            Attribute::Round => 'c',
            Attribute::Light => 'w',
            Attribute::Tall => 't',
        }
    }
}

/// A Quarto piece.
///
/// There are exactly 16 pieces, one for every combination of the four
/// [`Attribute`]s. A piece is identified by its id in `0..16`; the attributes
/// are looked up from a table built at compile time.
///
/// # Catalog Order
///
/// Ids enumerate `hollow × tall × light × round`, each iterated with `true`
/// first, so a clear bit in the id means the attribute holds:
///
/// ```text
/// id bit 3 clear: hollow
/// id bit 2 clear: tall
/// id bit 1 clear: light
/// id bit 0 clear: round
/// ```
///
/// # Example
///
/// ```
/// use quarto_engine::{Attribute, GamePiece};
///
/// let piece = GamePiece::from_id(0).unwrap();
/// assert!(piece.attribute(Attribute::Hollow));
/// assert!(piece.attribute(Attribute::Tall));
/// assert_eq!(piece.to_string(), "hcwt");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct GamePiece(u8);

impl GamePiece {
    /// Number of pieces in the catalog (16).
    pub const LEN: usize = 16;

    /// Mask with every attribute bit set.
    pub const FULL_MASK: u8 = 0b1111;

    #[must_use]
    pub const fn from_id(id: u8) -> Option<Self> {
        if (id as usize) < Self::LEN {
            Some(Self(id))
        } else {
            None
        }
    }

    /// Iterates over all 16 pieces in id order.
    pub fn all() -> impl Iterator<Item = Self> {
        CATALOG.iter().copied()
    }

    #[must_use]
    pub const fn id(self) -> u8 {
        self.0
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Returns the attribute vector as a 4-bit mask, one bit per [`Attribute`].
    #[must_use]
    pub const fn attribute_mask(self) -> u8 {
        ATTRIBUTE_MASKS[self.0 as usize]
    }

    #[must_use]
    pub const fn attribute(self, attribute: Attribute) -> bool {
        self.attribute_mask() & attribute.bit() != 0
    }

    #[must_use]
    pub fn attributes(self) -> [bool; Attribute::LEN] {
        Attribute::ALL.map(|attr| self.attribute(attr))
    }

    /// Returns `true` if both pieces agree on at least one attribute.
    #[must_use]
    pub const fn shares_attribute_with(self, other: Self) -> bool {
        (self.attribute_mask() ^ other.attribute_mask()) != Self::FULL_MASK
    }

    /// Squared Euclidean distance between the 0/1 attribute vectors.
    ///
    /// Each attribute contributes 0 or 1, so this is the number of attributes
    /// on which the pieces differ.
    #[must_use]
    pub const fn distance_squared(self, other: Self) -> u32 {
        (self.attribute_mask() ^ other.attribute_mask()).count_ones()
    }
}

impl From<GamePiece> for u8 {
    fn from(piece: GamePiece) -> Self {
        piece.0
    }
}

impl TryFrom<u8> for GamePiece {
    type Error = InvalidPieceIdError;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        Self::from_id(id).ok_or(InvalidPieceIdError(id))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("piece id {_0} is outside the catalog (expected 0..16)")]
pub struct InvalidPieceIdError(#[error(not(source))] pub u8);

impl fmt::Display for GamePiece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for attr in Attribute::ALL {
            let c = if self.attribute(attr) {
                attr.as_char()
            } else {
                '_'
            };
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

#[expect(clippy::cast_possible_truncation)]
const ATTRIBUTE_MASKS: [u8; GamePiece::LEN] = {
    const fn mask(id: u8) -> u8 {
        let mut mask = 0;
        if id & 0b1000 == 0 {
            mask |= Attribute::Hollow.bit();
        }
        if id & 0b0100 == 0 {
            mask |= Attribute::Tall.bit();
        }
        if id & 0b0010 == 0 {
            mask |= Attribute::Light.bit();
        }
        if id & 0b0001 == 0 {
            mask |= Attribute::Round.bit();
        }
        mask
    }

    let mut masks = [0; GamePiece::LEN];
    let mut i = 0;
    while i < GamePiece::LEN {
        masks[i] = mask(i as u8);
        i += 1;
    }
    masks
};

#[expect(clippy::cast_possible_truncation)]
const CATALOG: [GamePiece; GamePiece::LEN] = {
    let mut pieces = [GamePiece(0); GamePiece::LEN];
    let mut i = 0;
    while i < GamePiece::LEN {
        pieces[i] = GamePiece(i as u8);
        i += 1;
    }
    pieces
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_has_sixteen_distinct_pieces() {
        let masks: Vec<u8> = GamePiece::all().map(GamePiece::attribute_mask).collect();
        assert_eq!(masks.len(), GamePiece::LEN);
        for (i, a) in masks.iter().enumerate() {
            for b in &masks[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_catalog_order_is_stable() {
        let ids: Vec<u8> = GamePiece::all().map(GamePiece::id).collect();
        assert_eq!(ids, (0..16).collect::<Vec<_>>());
    }

    #[test]
    fn test_canonical_attribute_mapping() {
        let first = GamePiece::from_id(0).unwrap();
        assert_eq!(first.attributes(), [true; 4]);

        let last = GamePiece::from_id(15).unwrap();
        assert_eq!(last.attributes(), [false; 4]);

        // Hollow is the slowest-varying attribute.
        for piece in GamePiece::all() {
            assert_eq!(piece.attribute(Attribute::Hollow), piece.id() < 8);
        }
        // Round is the fastest-varying attribute.
        for piece in GamePiece::all() {
            assert_eq!(piece.attribute(Attribute::Round), piece.id() % 2 == 0);
        }
    }

    #[test]
    fn test_from_id_out_of_range() {
        assert_eq!(GamePiece::from_id(16), None);
        assert_eq!(GamePiece::from_id(u8::MAX), None);
        assert!(GamePiece::try_from(16).is_err());
    }

    #[test]
    fn test_shares_attribute_with() {
        let all_true = GamePiece::from_id(0).unwrap();
        let all_false = GamePiece::from_id(15).unwrap();
        assert!(!all_true.shares_attribute_with(all_false));
        assert!(all_true.shares_attribute_with(all_true));

        let solid = GamePiece::from_id(8).unwrap();
        assert!(all_true.shares_attribute_with(solid));
        assert!(all_false.shares_attribute_with(solid));
    }

    #[test]
    fn test_distance_squared() {
        let a = GamePiece::from_id(0).unwrap();
        let b = GamePiece::from_id(15).unwrap();
        assert_eq!(a.distance_squared(a), 0);
        assert_eq!(a.distance_squared(b), 4);
        assert_eq!(a.distance_squared(GamePiece::from_id(1).unwrap()), 1);
    }

    #[test]
    fn test_display_short_code() {
        assert_eq!(GamePiece::from_id(0).unwrap().to_string(), "hcwt");
        assert_eq!(GamePiece::from_id(15).unwrap().to_string(), "____");
        assert_eq!(GamePiece::from_id(8).unwrap().to_string(), "_cwt");
    }

    #[test]
    fn test_piece_serialization() {
        let piece = GamePiece::from_id(11).unwrap();
        let serialized = serde_json::to_string(&piece).unwrap();
        assert_eq!(serialized, "11");

        let deserialized: GamePiece = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, piece);

        assert!(serde_json::from_str::<GamePiece>("16").is_err());
    }
}
