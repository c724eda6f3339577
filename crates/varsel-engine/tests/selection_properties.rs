//! Property tests over random catalogs and random interaction sequences.

use proptest::prelude::*;
use rust_decimal::Decimal;

use varsel_core::{SelectorConfig, VariantInput};
use varsel_engine::{resolve_availability, OptionModel, VariantSelector};

const VALUES: [&str; 3] = ["Alpha", "Beta", "Gamma"];
const GROUPS: [&str; 3] = ["Color", "Size", "Material"];

#[derive(Debug, Clone)]
enum Op {
    Select(usize, usize),
    Hover(usize, usize),
    Unhover(usize),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..3usize, 0..3usize).prop_map(|(g, v)| Op::Select(g, v)),
        (0..3usize, 0..3usize).prop_map(|(g, v)| Op::Hover(g, v)),
        (0..3usize).prop_map(Op::Unhover),
    ]
}

/// Rows of (value index per group, inventory, available).
fn rows_strategy() -> impl Strategy<Value = Vec<([usize; 3], i64, bool)>> {
    prop::collection::vec(
        (
            [0..3usize, 0..3usize, 0..3usize],
            0..4i64,
            any::<bool>(),
        ),
        1..16,
    )
}

fn build(
    groups: usize,
    rows: &[([usize; 3], i64, bool)],
    config: SelectorConfig,
) -> VariantSelector {
    let inputs = rows
        .iter()
        .enumerate()
        .map(|(i, (values, qty, available))| VariantInput {
            id: format!("v{i}"),
            option_values: values[..groups]
                .iter()
                .map(|&v| VALUES[v].to_string())
                .collect(),
            price: Decimal::new(1000, 2),
            compare_at_price: None,
            inventory_quantity: *qty,
            available: *available,
            image: None,
        });
    VariantSelector::from_variants(&GROUPS[..groups], inputs, config).unwrap()
}

/// Applies `op`; returns whether the selector accepted it. Values the catalog
/// never offered are rejected.
fn apply(selector: &mut VariantSelector, groups: usize, op: &Op) -> bool {
    let result = match *op {
        Op::Select(g, v) => selector.select(g % groups, VALUES[v]),
        Op::Hover(g, v) => selector.hover(g % groups, VALUES[v]),
        Op::Unhover(g) => selector.unhover(g % groups),
    };
    result.is_ok()
}

fn selections(options: &OptionModel) -> Vec<Option<String>> {
    options
        .groups()
        .iter()
        .map(|g| g.selected().map(str::to_string))
        .collect()
}

fn flags(options: &OptionModel) -> Vec<Vec<(String, bool, bool)>> {
    options
        .groups()
        .iter()
        .map(|g| {
            g.values()
                .map(|(k, s)| (k.to_string(), s.unavailable, s.sold_out))
                .collect()
        })
        .collect()
}

proptest! {
    #[test]
    fn at_most_one_selected_and_hovered_per_group(
        groups in 1..=3usize,
        rows in rows_strategy(),
        ops in prop::collection::vec(op_strategy(), 0..24),
    ) {
        let mut selector = build(groups, &rows, SelectorConfig::default());
        for op in &ops {
            let _ = apply(&mut selector, groups, op);
            for group in selector.options().groups() {
                let selected = group.values().filter(|(_, s)| s.selected).count();
                let hovered = group.values().filter(|(_, s)| s.hovered).count();
                prop_assert!(selected <= 1);
                prop_assert!(hovered <= 1);
            }
        }
    }

    #[test]
    fn hover_and_unhover_never_move_selection(
        groups in 1..=3usize,
        rows in rows_strategy(),
        ops in prop::collection::vec(op_strategy(), 0..24),
    ) {
        let mut selector = build(groups, &rows, SelectorConfig::default());
        for op in &ops {
            let before = selections(selector.options());
            let _ = apply(&mut selector, groups, op);
            if !matches!(op, Op::Select(..)) {
                prop_assert_eq!(before, selections(selector.options()));
            }
        }
    }

    #[test]
    fn resolution_is_idempotent(
        groups in 1..=3usize,
        rows in rows_strategy(),
        ops in prop::collection::vec(op_strategy(), 0..16),
        resolve_conflicts in any::<bool>(),
    ) {
        let mut selector = build(groups, &rows, SelectorConfig::default());
        for op in &ops {
            let _ = apply(&mut selector, groups, op);
        }

        let mut once = selector.options().clone();
        resolve_availability(selector.catalog(), &mut once, resolve_conflicts);
        let mut twice = once.clone();
        let report = resolve_availability(selector.catalog(), &mut twice, resolve_conflicts);

        prop_assert_eq!(flags(&once), flags(&twice));
        prop_assert_eq!(selections(&once), selections(&twice));
        prop_assert!(report.forced.is_empty());
    }

    #[test]
    fn candidate_sets_only_shrink(
        groups in 1..=3usize,
        rows in rows_strategy(),
        ops in prop::collection::vec(op_strategy(), 0..16),
    ) {
        let mut selector = build(groups, &rows, SelectorConfig::default());
        for op in &ops {
            let _ = apply(&mut selector, groups, op);
        }

        let mut options = selector.options().clone();
        let report = resolve_availability(selector.catalog(), &mut options, false);
        prop_assert_eq!(report.candidates.len(), groups);
        for pair in report.candidates.windows(2) {
            prop_assert!(pair[1].iter().all(|pos| pair[0].contains(pos)));
        }
    }

    #[test]
    fn selected_value_is_unavailable_only_without_alternatives(
        groups in 1..=3usize,
        rows in rows_strategy(),
        ops in prop::collection::vec(op_strategy(), 0..24),
    ) {
        let mut selector = build(groups, &rows, SelectorConfig::default());
        for op in &ops {
            let accepted = apply(&mut selector, groups, op);
            if !accepted || !matches!(op, Op::Select(..)) {
                continue;
            }
            for group in selector.options().groups() {
                let Some(selected) = group.selected() else { continue };
                let unavailable = group.value(selected).is_some_and(|s| s.unavailable);
                if unavailable {
                    prop_assert!(group.first_available().is_none());
                }
            }
        }
    }

    #[test]
    fn current_variant_matches_active_combination(
        groups in 1..=3usize,
        rows in rows_strategy(),
        ops in prop::collection::vec(op_strategy(), 0..24),
    ) {
        let mut selector = build(groups, &rows, SelectorConfig::default());
        for op in &ops {
            let _ = apply(&mut selector, groups, op);
        }

        let key = selector.options().current_key();
        let found = selector.current_variant();
        match (key, found.variant()) {
            (Some(key), Some(variant)) => {
                let expected = varsel_engine::variant_key(variant.option_values());
                prop_assert_eq!(key, expected);
            }
            (None, Some(_)) => prop_assert!(false, "variant found without a full key"),
            (_, None) => prop_assert!(found.is_undefined()),
        }
    }

    #[test]
    fn every_cataloged_key_looks_up_its_variant(
        groups in 1..=3usize,
        rows in rows_strategy(),
    ) {
        let selector = build(groups, &rows, SelectorConfig::default());
        for entry in selector.catalog().entries() {
            let found = selector.catalog().lookup(entry.key());
            prop_assert_eq!(found.id(), entry.variant().id());
        }
    }

    #[test]
    fn selecting_twice_matches_selecting_once(
        groups in 1..=3usize,
        rows in rows_strategy(),
        ops in prop::collection::vec(op_strategy(), 0..16),
        group in 0..3usize,
        value in 0..3usize,
    ) {
        let mut selector = build(groups, &rows, SelectorConfig::default());
        for op in &ops {
            let _ = apply(&mut selector, groups, op);
        }

        let group = group % groups;
        let Ok(first) = selector.select(group, VALUES[value]) else {
            return Ok(());
        };
        let flags_once = flags(selector.options());
        let selected_once = selections(selector.options());

        let second = selector.select(group, VALUES[value]).unwrap();
        prop_assert_eq!(first.variant_id(), second.variant_id());
        prop_assert_eq!(flags_once, flags(selector.options()));
        prop_assert_eq!(selected_once, selections(selector.options()));
    }
}
