use std::{
    fmt::{self, Display, Formatter},
    slice::Iter,
};

use super::position::*;

#[derive(Debug, Clone, PartialEq)]
pub struct Listing<T> {
    lines: Vec<T>,
}

impl<T> Listing<T> {
    pub fn new() -> Self {
        Self { lines: vec![] }
    }

    pub fn push(&mut self, line: T) {
        self.lines.push(line);
    }

    pub fn get(&self, position: Position) -> Option<&T> {
        self.lines.get(position.0)
    }

    pub fn iter_lines(&self) -> LinesIter<T> {
        LinesIter {
            inner: self.lines.iter(),
            position: Position(0),
        }
    }

    pub fn iter_instructions(&self) -> Iter<T> {
        self.lines.iter()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
impl<T> Default for Listing<T> {
    fn default() -> Self {
        Self::new()
    }
}
impl<T> FromIterator<T> for Listing<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            lines: iter.into_iter().collect(),
        }
    }
}

/// Renders one line per instruction, each prefixed with its one-based ordinal.
impl<T: Display> Display for Listing<T> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        for (position, line) in self.iter_lines() {
            writeln!(f, "{} {}", position.ordinal(), line)?;
        }
        Ok(())
    }
}

pub struct LinesIter<'item, T> {
    inner: Iter<'item, T>,
    position: Position,
}

impl<'item, T> Iterator for LinesIter<'item, T> {
    type Item = (Position, &'item T);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|v| {
            let current = self.position;
            self.position = current + 1;
            (current, v)
        })
    }
}
