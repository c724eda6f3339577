//! Availability resolution across option groups.
//!
//! Groups are walked in index order with a shrinking candidate set. Each group
//! starts pessimistic (every value unavailable and sold out) and is cleared by
//! the candidates that offer it; the candidates are then narrowed to the
//! group's active value before moving on. A selection in group `i` therefore
//! shapes the flags of groups after `i` and never those before it.
//!
//! With conflict resolution on, a selected value that comes out unavailable is
//! moved to the first sibling that is not, and the whole walk starts over.
//! Flags of group `i` depend only on groups before `i`, so after such a move
//! group `i` stays settled and the next move, if any, happens further right.
//! That bounds the loop at one restart per group.

use serde::Serialize;

use crate::catalog::VariantCatalog;
use crate::options::OptionModel;

/// A selection the resolver moved off an unavailable value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForcedSelection {
    pub group: usize,
    pub from: String,
    pub to: String,
}

/// Outcome of a [`resolve_availability`] run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolutionReport {
    /// Number of full walks over the groups.
    pub passes: usize,
    pub forced: Vec<ForcedSelection>,
    /// Catalog positions of the candidates entering each group on the final
    /// walk; entry `i + 1` is always a subset of entry `i`.
    pub candidates: Vec<Vec<usize>>,
}

/// Recomputes `unavailable`/`sold_out` on every option value and, when
/// `resolve_conflicts` is set, moves selections off unavailable values until a
/// fixpoint is reached.
pub fn resolve_availability(
    catalog: &VariantCatalog,
    options: &mut OptionModel,
    resolve_conflicts: bool,
) -> ResolutionReport {
    let mut report = ResolutionReport::default();
    let max_passes = options.len() + 1;
    let mut last_forced_group: Option<usize> = None;

    loop {
        report.passes += 1;
        let (candidates, conflict) = single_pass(catalog, options, resolve_conflicts);
        report.candidates = candidates;

        let Some(forced) = conflict else {
            break;
        };

        if last_forced_group.is_some_and(|g| forced.group <= g) || report.passes >= max_passes {
            tracing::warn!(
                group = forced.group,
                from = %forced.from,
                passes = report.passes,
                "availability resolution made no progress; leaving selection as is"
            );
            break;
        }

        tracing::debug!(
            group = forced.group,
            from = %forced.from,
            to = %forced.to,
            "selected value unavailable; moving selection"
        );

        // The sibling came from the group itself, so selecting it cannot fail.
        if options.select(forced.group, &forced.to).is_err() {
            break;
        }
        last_forced_group = Some(forced.group);
        report.forced.push(forced);
    }

    report
}

/// One walk over all groups. Returns the candidate sets and the first
/// conflict found, if conflict resolution is enabled.
fn single_pass(
    catalog: &VariantCatalog,
    options: &mut OptionModel,
    resolve_conflicts: bool,
) -> (Vec<Vec<usize>>, Option<ForcedSelection>) {
    let entries = catalog.entries();
    let mut possible: Vec<usize> = (0..entries.len()).collect();
    let mut candidates = Vec::with_capacity(options.len());

    for (index, group) in options.groups_mut().iter_mut().enumerate() {
        candidates.push(possible.clone());

        for state in group.values_mut() {
            state.unavailable = true;
            state.sold_out = true;
        }

        for &pos in &possible {
            let entry = &entries[pos];
            let variant = entry.variant();
            if let Some(state) = group.value_mut(entry.value(index)) {
                if variant.is_available() {
                    state.unavailable = false;
                }
                if !variant.is_sold_out() {
                    state.sold_out = false;
                }
            }
        }

        // A group without an active value does not constrain later groups.
        if let Some(active) = group.active() {
            possible.retain(|&pos| entries[pos].value(index) == active);
        }

        if !resolve_conflicts {
            continue;
        }

        let Some(selected) = group.selected() else {
            continue;
        };
        let selected_unavailable = group.value(selected).is_some_and(|s| s.unavailable);
        if !selected_unavailable {
            continue;
        }

        match group.first_available() {
            Some(sibling) => {
                let forced = ForcedSelection {
                    group: index,
                    from: selected.to_string(),
                    to: sibling.to_string(),
                };
                return (candidates, Some(forced));
            }
            None => {
                tracing::debug!(
                    group = index,
                    selected,
                    "every value in group is unavailable; keeping selection"
                );
            }
        }
    }

    (candidates, None)
}

#[cfg(test)]
#[path = "resolver_test.rs"]
mod tests;
