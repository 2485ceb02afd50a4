//! Variant-axis selection over a resolved graph.
//!
//! Some modules are mutually exclusive alternatives for the same concern
//! (e.g. which runtime executes the tests). Each such module is tagged with
//! a variant axis; the selector reduces every axis to exactly one winner
//! according to a per-axis priority order.

use std::collections::{BTreeMap, BTreeSet};

use bomline_common::error::{BomlineError, Result};
use bomline_common::types::ModuleId;

use crate::engine::ResolvedGraph;

/// Selects one module per variant axis.
///
/// For each axis, among the graph's modules tagged with that axis, the one
/// appearing earliest in the axis's priority list wins. Modules tagged with
/// an axis but absent from its priority list rank after every listed
/// candidate. An axis with no tagged module in the graph yields no entry.
///
/// # Errors
///
/// Returns an error if two candidates tie at the same priority position.
pub fn select(
    graph: &ResolvedGraph,
    priorities: &BTreeMap<String, Vec<ModuleId>>,
) -> Result<BTreeMap<String, ModuleId>> {
    tracing::info!(axes = priorities.len(), "selecting profile variants");

    let mut axes: BTreeSet<&str> = priorities.keys().map(String::as_str).collect();
    for module in graph.modules() {
        for axis in &module.axes {
            let _ = axes.insert(axis.as_str());
        }
    }

    let mut selections = BTreeMap::new();
    for axis in axes {
        let priority: &[ModuleId] = priorities.get(axis).map_or(&[], Vec::as_slice);
        if let Some(winner) = select_axis(graph, axis, priority)? {
            tracing::debug!(axis, module = %winner, "variant selected");
            let _ = selections.insert(axis.to_string(), winner);
        }
    }
    Ok(selections)
}

fn select_axis(
    graph: &ResolvedGraph,
    axis: &str,
    priority: &[ModuleId],
) -> Result<Option<ModuleId>> {
    let mut best: Option<(usize, &ModuleId)> = None;
    let mut tied: Option<&ModuleId> = None;

    for module in graph.modules().filter(|m| m.axes.contains(axis)) {
        let rank = priority
            .iter()
            .position(|candidate| *candidate == module.id)
            .unwrap_or(priority.len());
        match best {
            None => {
                best = Some((rank, &module.id));
                tied = None;
            }
            Some((best_rank, _)) if rank < best_rank => {
                best = Some((rank, &module.id));
                tied = None;
            }
            Some((best_rank, _)) if rank == best_rank => tied = Some(&module.id),
            Some(_) => {}
        }
    }

    if let (Some((_, winner)), Some(other)) = (best, tied) {
        return Err(BomlineError::AmbiguousProfile {
            axis: axis.to_string(),
            first: winner.to_string(),
            second: other.to_string(),
        });
    }
    Ok(best.map(|(_, id)| id.clone()))
}
