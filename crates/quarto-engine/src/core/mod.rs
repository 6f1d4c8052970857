pub use self::{cell::*, line::*, piece::*};

pub(crate) mod cell;
pub(crate) mod line;
pub(crate) mod piece;
