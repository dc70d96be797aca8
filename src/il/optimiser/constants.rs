use log::{debug, info};

use super::{compact, DanglingPolicy, Marks, Removal, Rewrite, RewriteError};
use crate::il::TriadListing;

/// Remove every triad whose operands are both literal constants.
///
/// The folded value is not substituted into the triads that read the removed temporary;
/// what happens to those readers is decided by `policy`.
/// ```text
/// 1 + (1 1)
/// 2 + (^1 b)
/// 3 := (a ^2)
/// ```
/// Becomes, under [`DanglingPolicy::Keep`]:
/// ```text
/// 1 + (?^1 b)
/// 2 := (a ^1)
/// ```
/// where the read of the removed `^1` is reported as an anomaly.
pub fn eliminate_constants(
    listing: &TriadListing,
    policy: DanglingPolicy,
) -> Result<Rewrite, RewriteError> {
    let marks: Marks = listing
        .iter_instructions()
        .map(|triad| {
            triad.has_constant_operands().then(|| {
                let removal = Removal::ConstantPair;
                debug!("Mark {} ({})", triad.describe(), removal);
                removal
            })
        })
        .collect();

    let rewrite = compact(listing, marks, policy)?;
    info!(
        "Constant elimination kept {} of {} triads",
        rewrite.listing.len(),
        listing.len()
    );
    Ok(rewrite)
}

#[cfg(test)]
mod tests {
    use crate::{
        il::{optimiser::Anomaly, Temp},
        parser::parse,
    };

    use super::*;

    macro_rules! assert_eliminates {
        ($source:expr, $policy:expr, $expected:expr) => {{
            let listing = parse($source).unwrap();
            let rewrite = eliminate_constants(&listing, $policy).unwrap();
            let triads = rewrite
                .listing
                .iter_instructions()
                .map(ToString::to_string)
                .collect::<Vec<_>>();

            assert_eq!(
                &$expected[..],
                triads,
                "\n\nWhen eliminating constants in:\n    {}\n",
                $source
            );
            rewrite
        }};
    }

    #[test]
    fn listing_without_constant_pairs_is_unchanged() {
        let rewrite =
            assert_eliminates!("a:=b+c;", DanglingPolicy::Fail, ["+ (b c)", ":= (a ^1)"]);

        assert!(rewrite.anomalies.is_empty());
    }

    #[test]
    fn constant_pair_leaves_dangling_reference() {
        let rewrite = assert_eliminates!("a:=1+1;", DanglingPolicy::Keep, [":= (a ?^1)"]);

        assert_eq!(
            vec![Anomaly::DanglingTemporary {
                line: 2,
                temp: Temp(1)
            }],
            rewrite.anomalies
        );
    }

    #[test]
    fn constant_pair_fails_under_fail_policy() {
        let listing = parse("a:=1+1;").unwrap();

        assert_eq!(
            RewriteError::DanglingTemporary {
                line: 2,
                temp: Temp(1)
            },
            eliminate_constants(&listing, DanglingPolicy::Fail).unwrap_err()
        );
    }

    #[test]
    fn constant_pair_drops_readers_under_drop_policy() {
        let rewrite = assert_eliminates!("a:=1+1;", DanglingPolicy::Drop, Vec::<String>::new());

        assert_eq!(
            vec![Anomaly::DroppedConsumer {
                line: 2,
                temp: Temp(1)
            }],
            rewrite.anomalies
        );
    }

    #[test]
    fn later_temporaries_are_renumbered() {
        assert_eliminates!(
            "a:=b*c+2*3+d;",
            DanglingPolicy::Keep,
            ["* (b c)", "+ (^1 ?^2)", "+ (^2 d)", ":= (a ^3)"]
        );
    }

    #[test]
    fn char_constants_count_as_constants() {
        assert_eliminates!(
            "a:=x+'A'*'T';",
            DanglingPolicy::Drop,
            Vec::<String>::new()
        );
    }

    #[test]
    fn negated_constants_are_not_literal_constants() {
        assert_eliminates!(
            "a:=-1*2;",
            DanglingPolicy::Fail,
            ["* (-1 2)", ":= (a ^1)"]
        );
    }

    #[test]
    fn constant_assignment_is_removed() {
        let rewrite = assert_eliminates!("a:=1;", DanglingPolicy::Fail, [":= (a 1)"]);
        assert!(rewrite.anomalies.is_empty());

        assert_eliminates!("1:=2;", DanglingPolicy::Fail, Vec::<String>::new());
    }

    #[test]
    fn original_listing_is_left_untouched() {
        let listing = parse("a:=2*3;").unwrap();
        let before = listing.clone();

        eliminate_constants(&listing, DanglingPolicy::Drop).unwrap();

        assert_eq!(before, listing);
    }
}
