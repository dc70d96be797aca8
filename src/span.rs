//! Contains the [`Bytes`] and [`Span`] types, which describe positions in the expression text.
use std::{
    fmt::{self, Debug, Display},
    ops::AddAssign,
};

#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd)]
pub struct Bytes(usize);
impl Bytes {
    pub fn new(pos: usize) -> Self {
        Self(pos)
    }
}
impl Display for Bytes {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl From<Bytes> for usize {
    fn from(bytes: Bytes) -> Self {
        bytes.0
    }
}
impl AddAssign<usize> for Bytes {
    fn add_assign(&mut self, rhs: usize) {
        *self = Self(self.0 + rhs)
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Span {
    start: Bytes,
    end: Bytes,
}
impl Span {
    pub fn new(start: Bytes, end: Bytes) -> Self {
        Self { start, end }
    }

    /// A zero-width span, used to point at the end of the input.
    pub fn empty(at: Bytes) -> Self {
        Self::new(at, at)
    }

    pub fn start(&self) -> Bytes {
        self.start
    }

    pub fn lookup<'t>(&self, target: &'t str) -> &'t str {
        &target[self.start.into()..self.end.into()]
    }
}

impl Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}
