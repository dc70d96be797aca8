//! Rewriting passes over a triad listing.
//!
//! Every pass works in two phases. It first marks the triads it wants to remove without
//! touching the listing, then hands the marks to [`compact`], which builds a new listing
//! out of the surviving triads and renumbers their temporaries so they stay dense.
mod constants;
mod duplicates;

use std::{
    collections::HashMap,
    fmt::{self, Display, Formatter},
};

use log::{debug, trace, warn};
use thiserror::Error;

use super::{Operand, Temp, Triad, TriadListing};
use crate::listing::Position;

pub use constants::eliminate_constants;
pub use duplicates::eliminate_duplicates;

/// What to do with a triad that reads a temporary whose producer was removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum DanglingPolicy {
    /// Keep the triad, turn its reference into an [`Operand::Dangling`] and report an anomaly.
    Keep,
    /// Remove the triad, along with everything that depends on it.
    Drop,
    /// Abort the pass.
    Fail,
}

/// The outcome of a pass: the rewritten listing and any anomalies found while building it.
#[derive(Debug)]
pub struct Rewrite {
    pub listing: TriadListing,
    pub anomalies: Vec<Anomaly>,
}

/// A reference left without a producer by a pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Anomaly {
    /// The triad on `line` was kept, but read `temp`, which no longer exists. The read was
    /// rewritten to [`Operand::Dangling`].
    DanglingTemporary { line: usize, temp: Temp },
    /// The triad on `line` was removed because it reads `temp`, which no longer exists.
    DroppedConsumer { line: usize, temp: Temp },
}
impl Display for Anomaly {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Anomaly::DanglingTemporary { line, temp } => {
                write!(f, "triad on line {} reads {}, whose producer was removed", line, temp)
            }
            Anomaly::DroppedConsumer { line, temp } => write!(
                f,
                "triad on line {} was dropped, because the producer of {} was removed",
                line, temp
            ),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RewriteError {
    #[error("triad on line {line} references {temp}, whose producer was removed")]
    DanglingTemporary { line: usize, temp: Temp },
}

/// Why a triad is removed from the listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Removal {
    /// Both operands are literal constants.
    ConstantPair,
    /// Recomputes the operands of an earlier triad. Readers of this triad's temporary are
    /// redirected to `of`.
    Duplicate { of: Option<Temp> },
    /// Immediately follows a duplicate.
    Neighbour,
    /// Reads a temporary whose producer was removed.
    Dangling,
}
impl Display for Removal {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Removal::ConstantPair => f.write_str("constant pair"),
            Removal::Duplicate { of: Some(of) } => write!(f, "duplicate of {}", of),
            Removal::Duplicate { of: None } => f.write_str("duplicate"),
            Removal::Neighbour => f.write_str("neighbour of a duplicate"),
            Removal::Dangling => f.write_str("dangling reference"),
        }
    }
}

/// Removal marks for a listing, one slot per position.
type Marks = Vec<Option<Removal>>;

/// Build a new listing from the triads of `listing` that have no removal mark.
fn compact(
    listing: &TriadListing,
    marks: Marks,
    policy: DanglingPolicy,
) -> Result<Rewrite, RewriteError> {
    let mut compactor = Compactor::new(listing, marks);
    let mut anomalies = compactor.apply_policy(policy)?;
    let translation = compactor.translation();
    debug!(
        "Removing {} of {} triads",
        compactor.removed_count(),
        listing.len()
    );

    let mut rewritten = TriadListing::new();
    for (position, triad) in listing.iter_lines() {
        if compactor.is_removed(position) {
            continue;
        }

        let mut rename = |temp: Temp| {
            let renamed = compactor
                .resolve(temp)
                .and_then(|surviving| translation.get(&surviving).copied());
            match renamed {
                Some(renamed) => Operand::Temp(renamed),
                None => {
                    let anomaly = Anomaly::DanglingTemporary {
                        line: triad.line,
                        temp,
                    };
                    warn!("{}", anomaly);
                    anomalies.push(anomaly);
                    Operand::Dangling(temp)
                }
            }
        };

        let left = triad.left.map_temps(&mut rename);
        let right = triad.right.map_temps(&mut rename);
        let result = triad
            .result
            .map(|temp| translation.get(&temp).copied().unwrap_or(temp));

        rewritten.push(Triad::new(triad.line, triad.op, left, right, result));
    }

    Ok(Rewrite {
        listing: rewritten,
        anomalies,
    })
}

struct Compactor<'a> {
    listing: &'a TriadListing,
    marks: Marks,
    producers: HashMap<Temp, Position>,
}
impl<'a> Compactor<'a> {
    fn new(listing: &'a TriadListing, marks: Marks) -> Self {
        let producers = listing
            .iter_lines()
            .filter_map(|(position, triad)| triad.result.map(|temp| (temp, position)))
            .collect();

        Self {
            listing,
            marks,
            producers,
        }
    }

    fn is_removed(&self, position: Position) -> bool {
        matches!(self.marks.get(position.0), Some(Some(_)))
    }

    /// Follows duplicate redirections from `temp` until reaching a temporary whose producer
    /// survives. Returns [`None`] if the chain ends in a removed or missing producer.
    fn resolve(&self, mut temp: Temp) -> Option<Temp> {
        loop {
            let position = *self.producers.get(&temp)?;
            match self.marks.get(position.0).copied().flatten() {
                None => return Some(temp),
                Some(Removal::Duplicate { of: Some(of) }) => temp = of,
                Some(_) => return None,
            }
        }
    }

    /// The first temporary read by `triad` that cannot be resolved.
    fn first_dangling(&self, triad: &Triad) -> Option<Temp> {
        triad
            .reads()
            .into_iter()
            .find(|&temp| self.resolve(temp).is_none())
    }

    /// Applies the dangling-reference policy to the surviving triads. Only [`DanglingPolicy::Drop`]
    /// changes the marks; [`DanglingPolicy::Keep`] defers reporting to the rewrite itself.
    fn apply_policy(&mut self, policy: DanglingPolicy) -> Result<Vec<Anomaly>, RewriteError> {
        let mut anomalies = vec![];
        if policy == DanglingPolicy::Keep {
            return Ok(anomalies);
        }

        // Producers precede their readers, so a single forward sweep also catches triads
        // that only become dangling because an earlier one was dropped.
        let listing = self.listing;
        for (position, triad) in listing.iter_lines() {
            if self.is_removed(position) {
                continue;
            }
            let temp = match self.first_dangling(triad) {
                Some(temp) => temp,
                None => continue,
            };

            if policy == DanglingPolicy::Fail {
                return Err(RewriteError::DanglingTemporary {
                    line: triad.line,
                    temp,
                });
            }

            let anomaly = Anomaly::DroppedConsumer {
                line: triad.line,
                temp,
            };
            warn!("{}", anomaly);
            anomalies.push(anomaly);
            self.marks[position.0] = Some(Removal::Dangling);
        }

        Ok(anomalies)
    }

    /// Maps the temporary of every surviving producer to its dense, renumbered replacement.
    fn translation(&self) -> HashMap<Temp, Temp> {
        let surviving = self
            .listing
            .iter_lines()
            .filter(|(position, _)| !self.is_removed(*position))
            .filter_map(|(_, triad)| triad.result);

        surviving
            .zip(1..)
            .map(|(old, index)| {
                let new = Temp(index);
                trace!("Renumber {} -> {}", old, new);
                (old, new)
            })
            .collect()
    }

    fn removed_count(&self) -> usize {
        self.marks.iter().filter(|mark| mark.is_some()).count()
    }
}
