//! Dense ranking of automations by critical ratio.
//!
//! The rank is *dense*: automations with equal ratios share a rank, and the
//! next distinct (lower) ratio gets the previous rank plus one, no matter
//! how many records shared it. The highest ratio always ranks 1.
//!
//! The algorithm is a portable two-pass scan (sort, then sequential rank
//! assignment) so it carries no assumptions about storage-engine window
//! functions. Ratios are compared with [`f64::total_cmp`], which gives a
//! total order over the full float domain and makes tie detection exact.

use crate::automation::Automation;
use crate::id::AutomationId;

/// One `(id, criticality)` pair produced by [`dense_ranks`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankAssignment {
    pub id: AutomationId,
    pub criticality: u32,
}

/// Compute dense criticality ranks for the given automations.
///
/// Input order is irrelevant; the result is ordered by descending
/// `critical_ratio`. Calling this twice over the same records yields the
/// same assignments.
#[must_use]
pub fn dense_ranks(automations: &[Automation]) -> Vec<RankAssignment> {
    let mut ordered: Vec<(AutomationId, f64)> = automations
        .iter()
        .map(|automation| (automation.id, automation.critical_ratio))
        .collect();
    ordered.sort_by(|a, b| b.1.total_cmp(&a.1));

    let mut assignments = Vec::with_capacity(ordered.len());
    let mut criticality = 0u32;
    let mut last_ratio: Option<f64> = None;
    for (id, ratio) in ordered {
        if last_ratio.is_none_or(|last| last.total_cmp(&ratio).is_ne()) {
            criticality += 1;
            last_ratio = Some(ratio);
        }
        assignments.push(RankAssignment { id, criticality });
    }
    assignments
}
