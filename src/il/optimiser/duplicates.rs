use std::collections::HashMap;

use log::{debug, info};

use super::{compact, DanglingPolicy, Marks, Removal, Rewrite, RewriteError};
use crate::il::{Operand, Temp, Triad, TriadListing};

/// Remove every triad that recomputes the operands of an earlier triad, together with the
/// triad immediately following it. Readers of a removed duplicate are pointed at the
/// earlier triad instead.
///
/// Only the operands are compared, not the operator: `+ (a b)` and `- (a b)` count as
/// the same computation.
/// ```text
/// 1 + (a b)
/// 2 + (a b)
/// 3 * (^2 c)
/// 4 * (^1 c)
/// 5 := (x ^4)
/// ```
/// Becomes:
/// ```text
/// 1 + (a b)
/// 2 * (^1 c)
/// 3 := (x ^2)
/// ```
pub fn eliminate_duplicates(
    listing: &TriadListing,
    policy: DanglingPolicy,
) -> Result<Rewrite, RewriteError> {
    let marks = mark_duplicates(listing);

    let rewrite = compact(listing, marks, policy)?;
    info!(
        "Duplicate elimination kept {} of {} triads",
        rewrite.listing.len(),
        listing.len()
    );
    Ok(rewrite)
}

/// Scans the listing in order, comparing each triad against every earlier surviving
/// triad. Operands are compared after redirecting reads of earlier duplicates to the
/// triad they duplicate, so `+ (^2 c)` matches `+ (^1 c)` once `^2` is known to repeat `^1`.
fn mark_duplicates(listing: &TriadListing) -> Marks {
    let mut marks: Marks = vec![None; listing.len()];
    let mut redirects: HashMap<Temp, Temp> = HashMap::new();
    let mut seen: Vec<Triad> = vec![];

    for (position, triad) in listing.iter_lines() {
        if marks[position.0].is_some() {
            continue;
        }

        let canonical = Triad {
            left: redirect(&triad.left, &redirects),
            right: redirect(&triad.right, &redirects),
            ..triad.clone()
        };

        let of = match seen.iter().find(|earlier| earlier.same_operands(&canonical)) {
            Some(earlier) => earlier.result,
            None => {
                seen.push(canonical);
                continue;
            }
        };

        if let (Some(temp), Some(of)) = (triad.result, of) {
            redirects.insert(temp, of);
        }

        let removal = Removal::Duplicate { of };
        debug!("Mark {} ({})", triad.describe(), removal);
        marks[position.0] = Some(removal);

        let next = position + 1;
        if let Some(slot) = marks.get_mut(next.0) {
            if slot.is_none() {
                *slot = Some(Removal::Neighbour);
                if let Some(neighbour) = listing.get(next) {
                    debug!("Mark {} ({})", neighbour.describe(), Removal::Neighbour);
                }
            }
        }
    }

    marks
}

/// Points reads of removed duplicates at the triad they repeat.
fn redirect(operand: &Operand, redirects: &HashMap<Temp, Temp>) -> Operand {
    operand.map_temps(&mut |temp| redirects.get(&temp).copied().unwrap_or(temp).into())
}
