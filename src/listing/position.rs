use std::{
    fmt::{Display, Formatter},
    ops::Add,
};

/// A position in a listing, indicated by a zero-based line index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position(pub usize);

impl Position {
    /// The one-based ordinal under which this position is printed.
    pub fn ordinal(self) -> usize {
        self.0 + 1
    }
}

impl Add<usize> for Position {
    type Output = Self;

    fn add(self, rhs: usize) -> Self::Output {
        Self(self.0 + rhs)
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
