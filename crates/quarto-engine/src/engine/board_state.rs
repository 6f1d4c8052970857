use std::fmt;

use arrayvec::ArrayVec;
use rand::{Rng, seq::IndexedRandom as _};
use serde::{Deserialize, Serialize};

use crate::{
    PlaceError,
    core::{Cell, GamePiece, LineId, LineKind, LineTally},
};

/// A single placement: which piece went where.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Placement {
    pub cell: Cell,
    pub piece: GamePiece,
}

/// Record of the first line completed with a shared attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WinState {
    /// Orientation of the winning line.
    pub kind: LineKind,
    /// Cell of the placement that completed it.
    pub cell: Cell,
}

/// Complete state of a Quarto game.
///
/// Holds the 4×4 grid, the piece waiting to be placed, the last placement
/// and the win record. Win detection is incremental: every line keeps a
/// [`LineTally`] that is updated on each placement, so checking for a win
/// only inspects the lines through the placed cell.
///
/// # Invariants
///
/// - A piece is on the board at most once, and the pending piece is never
///   on the board
/// - Once a win is recorded it is never overwritten; later placements are
///   rejected with [`PlaceError::GameOver`]
/// - The tally of every line matches the pieces currently on it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardState {
    grid: [Option<GamePiece>; Cell::COUNT],
    tallies: [LineTally; LineId::COUNT],
    /// Bit `i` is set when the piece with index `i` is on the board.
    placed: u16,
    pending: Option<GamePiece>,
    last_move: Option<Placement>,
    win_state: Option<WinState>,
}

impl Default for BoardState {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardState {
    /// Creates an empty board with no pending piece.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            grid: [None; Cell::COUNT],
            tallies: [LineTally::EMPTY; LineId::COUNT],
            placed: 0,
            pending: None,
            last_move: None,
            win_state: None,
        }
    }

    /// Returns the piece at `cell`, or `None` if the cell is empty or off the board.
    #[must_use]
    pub fn get(&self, cell: Cell) -> Option<GamePiece> {
        cell.index().and_then(|i| self.grid[i])
    }

    #[must_use]
    pub const fn pending_piece(&self) -> Option<GamePiece> {
        self.pending
    }

    #[must_use]
    pub const fn last_move(&self) -> Option<Placement> {
        self.last_move
    }

    #[must_use]
    pub const fn win_state(&self) -> Option<WinState> {
        self.win_state
    }

    #[must_use]
    pub const fn is_won(&self) -> bool {
        self.win_state.is_some()
    }

    #[must_use]
    pub const fn placed_count(&self) -> usize {
        self.placed.count_ones() as usize
    }

    #[must_use]
    pub const fn is_full(&self) -> bool {
        self.placed_count() == Cell::COUNT
    }

    /// Returns `true` if `piece` is already on the board.
    #[must_use]
    pub const fn is_placed(&self, piece: GamePiece) -> bool {
        self.placed & (1 << piece.index()) != 0
    }

    /// Returns `true` if `piece` may still be handed over or placed.
    #[must_use]
    pub fn is_available(&self, piece: GamePiece) -> bool {
        !self.is_placed(piece) && self.pending != Some(piece)
    }

    /// Running tally of the pieces on `line`.
    #[must_use]
    pub fn line_tally(&self, line: LineId) -> LineTally {
        self.tallies[line.index()]
    }

    /// Pieces currently on `line`, in line order.
    pub fn line_pieces(&self, line: LineId) -> impl Iterator<Item = GamePiece> + '_ {
        line.cells().into_iter().filter_map(|cell| self.get(cell))
    }

    /// Empty cells in row-major order.
    pub fn open_spots(&self) -> impl Iterator<Item = Cell> + '_ {
        Cell::all().filter(|&cell| self.get(cell).is_none())
    }

    /// Open cells of `line`, in line order.
    pub fn open_spots_on(&self, line: LineId) -> impl Iterator<Item = Cell> + '_ {
        line.cells()
            .into_iter()
            .filter(|&cell| self.get(cell).is_none())
    }

    /// Pieces that are neither on the board nor pending, in catalog order.
    pub fn unused_pieces(&self) -> impl Iterator<Item = GamePiece> + '_ {
        GamePiece::all().filter(|&piece| self.is_available(piece))
    }

    /// Returns `true` if placing `piece` at `cell` would complete a winning line.
    ///
    /// Does not modify the board. `cell` must be open.
    #[must_use]
    pub fn wins_with(&self, cell: Cell, piece: GamePiece) -> bool {
        debug_assert!(self.get(cell).is_none());
        LineId::containing(cell)
            .into_iter()
            .any(|line| self.line_tally(line).with(piece).is_winning())
    }

    /// Places `piece` at `cell` and updates the win state.
    ///
    /// Clears the pending piece if it was `piece`. If the placement completes
    /// one or more winning lines and no win was recorded before, the first of
    /// them is recorded (column, then row, then diagonal).
    pub fn place(&mut self, cell: Cell, piece: GamePiece) -> Result<(), PlaceError> {
        let Some(index) = cell.index() else {
            return Err(PlaceError::InvalidCoordinate(cell));
        };
        if self.grid[index].is_some() {
            return Err(PlaceError::CellOccupied(cell));
        }
        if self.is_placed(piece) {
            return Err(PlaceError::PieceInUse(piece));
        }
        if self.is_won() {
            return Err(PlaceError::GameOver);
        }

        self.grid[index] = Some(piece);
        self.placed |= 1 << piece.index();
        if self.pending == Some(piece) {
            self.pending = None;
        }
        self.last_move = Some(Placement { cell, piece });

        for line in LineId::containing(cell) {
            let tally = &mut self.tallies[line.index()];
            tally.add(piece);
            if self.win_state.is_none() && tally.is_winning() {
                self.win_state = Some(WinState {
                    kind: line.kind(),
                    cell,
                });
            }
        }
        if let Some(win) = self.win_state {
            log::trace!("{} win completed at {}", win.kind, win.cell);
        }
        Ok(())
    }

    /// Places the pending piece at `cell`.
    pub fn place_pending(&mut self, cell: Cell) -> Result<(), PlaceError> {
        let piece = self.pending.ok_or(PlaceError::MissingPiece)?;
        self.place(cell, piece)
    }

    /// Sets the piece the next mover must place.
    ///
    /// `None` clears it. A piece already on the board is rejected.
    pub fn set_pending(&mut self, piece: Option<GamePiece>) -> Result<(), PlaceError> {
        if let Some(piece) = piece
            && self.is_placed(piece)
        {
            return Err(PlaceError::PieceInUse(piece));
        }
        self.pending = piece;
        Ok(())
    }

    /// Picks a uniformly random open cell, or `None` if the board is full.
    pub fn random_open_spot<R>(&self, rng: &mut R) -> Option<Cell>
    where
        R: Rng + ?Sized,
    {
        let spots: ArrayVec<Cell, { Cell::COUNT }> = self.open_spots().collect();
        spots.choose(rng).copied()
    }

    /// Picks a uniformly random unused piece, or `None` if none remain.
    pub fn random_unused_piece<R>(&self, rng: &mut R) -> Option<GamePiece>
    where
        R: Rng + ?Sized,
    {
        let pieces: ArrayVec<GamePiece, { GamePiece::LEN }> = self.unused_pieces().collect();
        pieces.choose(rng).copied()
    }

    /// Plays a full random turn.
    ///
    /// Places the pending piece on a random open cell if there is one, then
    /// hands over a random unused piece unless the board is full. With no
    /// pending piece (the opening move) only the hand-over happens.
    pub fn assign_pending_randomly<R>(&mut self, rng: &mut R) -> Result<(), PlaceError>
    where
        R: Rng + ?Sized,
    {
        if self.pending.is_some()
            && let Some(cell) = self.random_open_spot(rng)
        {
            self.place_pending(cell)?;
        }
        if !self.is_full() {
            self.pending = self.random_unused_piece(rng);
        }
        Ok(())
    }
}

impl fmt::Display for BoardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.win_state {
            Some(win) => writeln!(f, "win: {} at {}", win.kind, win.cell)?,
            None => writeln!(f, "win: none")?,
        }
        match self.pending {
            Some(piece) => writeln!(f, "pending: {piece}")?,
            None => writeln!(f, "pending: none")?,
        }
        for row in 0..Cell::SIZE {
            for col in 0..Cell::SIZE {
                if col > 0 {
                    f.write_str(" | ")?;
                }
                match self.get(Cell::new(row, col)) {
                    Some(piece) => write!(f, "{piece}")?,
                    None => f.write_str("    ")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
