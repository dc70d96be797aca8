//! Structural checks on a triad listing.
use std::collections::HashSet;

use thiserror::Error;

use super::{Temp, TriadListing};
use crate::listing::Position;

/// A listing that breaks the numbering rules the parser guarantees. Always a defect in
/// the compiler itself, never in the expression being compiled.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvariantViolation {
    #[error("triad {position} has line number {found}, expected {expected}")]
    LineNumber {
        position: Position,
        expected: usize,
        found: usize,
    },
    #[error("triad on line {line} references {temp} before it is produced")]
    ForwardReference { line: usize, temp: Temp },
    #[error("triad on line {line} references {temp}, which no triad produces")]
    UnknownTemporary { line: usize, temp: Temp },
    #[error("triad on line {line} produces {temp} a second time")]
    DuplicateResult { line: usize, temp: Temp },
}

/// Verifies that line numbers run `1..=N` and that every temporary is produced exactly
/// once, by a triad that precedes all triads reading it.
pub fn verify(listing: &TriadListing) -> Result<(), InvariantViolation> {
    let producers: HashSet<Temp> = listing
        .iter_instructions()
        .filter_map(|triad| triad.result)
        .collect();

    let mut produced = HashSet::new();
    for (position, triad) in listing.iter_lines() {
        let expected = position.ordinal();
        if triad.line != expected {
            return Err(InvariantViolation::LineNumber {
                position,
                expected,
                found: triad.line,
            });
        }

        for temp in triad.reads() {
            if !producers.contains(&temp) {
                return Err(InvariantViolation::UnknownTemporary {
                    line: triad.line,
                    temp,
                });
            }
            if !produced.contains(&temp) {
                return Err(InvariantViolation::ForwardReference {
                    line: triad.line,
                    temp,
                });
            }
        }

        if let Some(temp) = triad.result {
            if !produced.insert(temp) {
                return Err(InvariantViolation::DuplicateResult {
                    line: triad.line,
                    temp,
                });
            }
        }
    }

    Ok(())
}
