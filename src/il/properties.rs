//! Property-based tests over randomly generated statements.
use std::collections::HashSet;

use proptest::prelude::*;

use super::{
    optimiser::{eliminate_constants, eliminate_duplicates, Anomaly, DanglingPolicy},
    verify, Operand, Temp, TriadListing,
};
use crate::parser::parse;

/// Variables are drawn from a small alphabet so that repeated subexpressions are common.
fn arb_operand() -> BoxedStrategy<String> {
    prop_oneof![
        4 => "[a-d][a-d0-9_]?",
        2 => (0u32..10).prop_map(|n| n.to_string()),
        1 => (0u32..5).prop_map(|n| format!("{}.5", n)),
        1 => "[A-C]".prop_map(|c| format!("'{}'", c)),
    ]
    .boxed()
}

fn arb_expression() -> BoxedStrategy<String> {
    arb_operand()
        .prop_recursive(4, 48, 2, |inner| {
            prop_oneof![
                4 => (inner.clone(), prop::sample::select(vec!['+', '-', '*', '/']), inner.clone())
                    .prop_map(|(lhs, op, rhs)| format!("{}{}{}", lhs, op, rhs)),
                1 => inner.clone().prop_map(|e| format!("({})", e)),
                1 => inner.prop_map(|e| format!("-{}", e)),
            ]
        })
        .boxed()
}

fn arb_statement() -> BoxedStrategy<String> {
    (arb_operand(), arb_expression())
        .prop_map(|(target, value)| format!("{}:={};", target, value))
        .boxed()
}

fn arb_policy() -> impl Strategy<Value = DanglingPolicy> {
    prop::sample::select(vec![DanglingPolicy::Keep, DanglingPolicy::Drop])
}

fn is_dangling(operand: &Operand) -> bool {
    match operand {
        Operand::Dangling(_) => true,
        Operand::UnaryMinus(inner) => is_dangling(inner),
        _ => false,
    }
}

/// Every temporary read is produced by an earlier triad.
fn references_resolve(listing: &TriadListing) -> bool {
    let mut produced = HashSet::new();
    listing.iter_instructions().all(|triad| {
        let resolved = triad.reads().iter().all(|temp| produced.contains(temp));
        produced.extend(triad.result);
        resolved
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Line numbers run 1..=N and temporaries are only read after they are produced.
    #[test]
    fn parsed_listings_are_well_formed(source in arb_statement()) {
        let listing = parse(&source).unwrap();

        prop_assert_eq!(Ok(()), verify(&listing), "When parsing {}", source);
        let temps: Vec<_> = listing.iter_instructions().filter_map(|t| t.result).collect();
        let expected: Vec<_> = (1..=temps.len()).map(Temp).collect();
        prop_assert_eq!(expected, temps);
    }

    /// Keeping dangling readers removes exactly the constant pairs.
    #[test]
    fn constant_elimination_removes_constant_pairs(source in arb_statement()) {
        let listing = parse(&source).unwrap();
        let pairs = listing
            .iter_instructions()
            .filter(|t| t.has_constant_operands())
            .count();

        let rewrite = eliminate_constants(&listing, DanglingPolicy::Keep).unwrap();

        prop_assert_eq!(listing.len() - pairs, rewrite.listing.len());
        prop_assert!(
            rewrite.listing.iter_instructions().all(|t| !t.has_constant_operands()),
            "constant pairs remain in\n{}",
            rewrite.listing
        );

        let dangling_reads = rewrite
            .listing
            .iter_instructions()
            .flat_map(|t| t.operands())
            .filter(|operand| is_dangling(operand))
            .count();
        prop_assert_eq!(dangling_reads, rewrite.anomalies.len());
        let kept = |anomaly: &Anomaly| matches!(anomaly, Anomaly::DanglingTemporary { .. });
        prop_assert!(
            rewrite.anomalies.iter().all(kept),
            "unexpected anomalies: {:?}",
            rewrite.anomalies
        );
    }

    /// Dropping dangling readers leaves a listing whose references all resolve.
    #[test]
    fn constant_elimination_with_drop_resolves_references(source in arb_statement()) {
        let listing = parse(&source).unwrap();

        let rewrite = eliminate_constants(&listing, DanglingPolicy::Drop).unwrap();

        prop_assert!(references_resolve(&rewrite.listing), "{}", rewrite.listing);
    }

    /// No two surviving triads compute over the same operands, whatever happens to dangling
    /// readers.
    #[test]
    fn duplicates_do_not_survive(source in arb_statement(), policy in arb_policy()) {
        let listing = parse(&source).unwrap();

        let rewrite = eliminate_duplicates(&listing, policy).unwrap();
        let triads: Vec<_> = rewrite.listing.iter_instructions().collect();

        for (i, first) in triads.iter().enumerate() {
            for second in &triads[i + 1..] {
                prop_assert!(
                    !first.same_operands(second),
                    "{} and {} remain in\n{}",
                    first,
                    second,
                    rewrite.listing
                );
            }
        }
        prop_assert!(references_resolve(&rewrite.listing), "{}", rewrite.listing);
    }

    #[test]
    fn duplicate_elimination_is_idempotent(source in arb_statement(), policy in arb_policy()) {
        let listing = parse(&source).unwrap();

        let once = eliminate_duplicates(&listing, policy).unwrap();
        let twice = eliminate_duplicates(&once.listing, policy).unwrap();

        prop_assert_eq!(&once.listing, &twice.listing);
        prop_assert!(twice.anomalies.is_empty(), "{:?}", twice.anomalies);
    }

    /// Neither pass touches the listing it is given.
    #[test]
    fn passes_leave_their_input_unchanged(source in arb_statement()) {
        let listing = parse(&source).unwrap();
        let before = listing.clone();

        eliminate_constants(&listing, DanglingPolicy::Keep).unwrap();
        eliminate_duplicates(&listing, DanglingPolicy::Keep).unwrap();

        prop_assert_eq!(before, listing);
    }
}
