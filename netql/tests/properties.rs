//! Property-based tests for the placement query parser.
//!
//! Rules are generated, written out as query text with randomized
//! whitespace and operator spelling, and parsed back.

use netql::{parse_query, Filter, Operation, PlacementRule, SFGroup, Select};
use proptest::prelude::*;

fn arb_ident() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9]{0,7}"
}

fn arb_operation() -> impl Strategy<Value = Operation> {
    prop::sample::select(Operation::ALL.to_vec())
}

fn arb_select() -> impl Strategy<Value = Select> {
    (arb_ident(), any::<u32>()).prop_map(|(key, count)| Select { key, count })
}

fn arb_filter() -> impl Strategy<Value = Filter> {
    let value = prop_oneof![arb_ident(), any::<u16>().prop_map(|n| n.to_string())];
    (arb_ident(), arb_operation(), value).prop_map(|(key, operation, value)| Filter {
        key,
        operation,
        value,
    })
}

fn arb_group() -> impl Strategy<Value = SFGroup> {
    (
        prop::collection::vec(arb_select(), 1..4),
        prop::collection::vec(arb_filter(), 0..4),
    )
        .prop_map(|(selectors, filters)| SFGroup { selectors, filters })
}

fn arb_rule() -> impl Strategy<Value = PlacementRule> {
    (any::<u32>(), prop::collection::vec(arb_group(), 1..4)).prop_map(
        |(replication_factor, groups)| PlacementRule {
            replication_factor,
            groups,
        },
    )
}

/// Separator runs; `required` ones are never empty.
fn arb_spacing() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(
        prop::sample::select(vec![" ", "  ", "\t", "\n", " \n\t ", "\r\n"]).prop_map(String::from),
        64,
    )
}

/// Writes `rule` as query text, cycling through `spacing` between tokens.
fn render(rule: &PlacementRule, spacing: &[String], symbolic: bool, explicit_rf: bool) -> String {
    let mut seps = spacing.iter().cycle();
    let mut sep = || seps.next().map(String::as_str).unwrap_or(" ").to_string();

    let mut out = String::new();
    if explicit_rf {
        out.push_str(&format!("RF{}{}{}", sep(), rule.replication_factor, sep()));
    }
    for (i, group) in rule.groups.iter().enumerate() {
        if i > 0 {
            out.push_str(&format!("{};{}", sep(), sep()));
        }
        out.push_str("SELECT");
        for s in &group.selectors {
            out.push_str(&format!("{}{}{}{}", sep(), s.count, sep(), s.key));
        }
        if !group.filters.is_empty() {
            out.push_str(&format!("{}FILTER", sep()));
            for f in &group.filters {
                let op = if symbolic { f.operation.symbol() } else { f.operation.mnemonic() };
                out.push_str(&format!("{}{}{}{}{}{}", sep(), f.key, sep(), op, sep(), f.value));
            }
        }
    }
    out
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Property: whitespace and operator spelling do not change the result.
    #[test]
    fn prop_rendered_rule_parses_back(
        rule in arb_rule(),
        spacing in arb_spacing(),
        symbolic in any::<bool>(),
    ) {
        let text = render(&rule, &spacing, symbolic, true);
        let parsed = parse_query(&text).map_err(|e| TestCaseError::fail(e.to_string()))?;
        prop_assert_eq!(parsed, rule);
    }

    /// Property: omitting RF yields the default replication factor.
    #[test]
    fn prop_default_replication_factor(rule in arb_rule(), spacing in arb_spacing()) {
        let text = render(&rule, &spacing, false, false);
        let parsed = parse_query(&text).map_err(|e| TestCaseError::fail(e.to_string()))?;
        prop_assert_eq!(parsed.replication_factor, PlacementRule::DEFAULT_REPLICATION_FACTOR);
        prop_assert_eq!(parsed.groups, rule.groups);
    }

    /// Property: surrounding whitespace is ignored, other leftovers are not.
    #[test]
    fn prop_entire_input_consumed(rule in arb_rule(), spacing in arb_spacing()) {
        let text = render(&rule, &spacing, false, true);

        let padded = format!(" \n{}\n\t ", text);
        prop_assert_eq!(parse_query(&padded).ok(), Some(rule));

        let trailing = format!("{} !", text);
        prop_assert!(parse_query(&trailing).is_err());
    }

    /// Property: parsing is deterministic and never panics.
    #[test]
    fn prop_deterministic(input in "\\PC{0,64}") {
        prop_assert_eq!(parse_query(&input), parse_query(&input));
    }

    /// Property: a failure in any group rejects the whole union.
    #[test]
    fn prop_bad_group_rejects_union(rule in arb_rule(), spacing in arb_spacing()) {
        let text = render(&rule, &spacing, false, true);
        let broken = format!("{} ; SELECT 3", text);
        prop_assert!(parse_query(&broken).is_err());
    }
}
