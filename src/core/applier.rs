use crate::core::planner;
use crate::domain::model::{topology, AssignmentReport, AssignmentState, Participant};
use crate::utils::error::{AssignError, Result};
use rand::Rng;

#[derive(Debug, Clone)]
pub struct ApplyOutcome {
    pub records: Vec<Participant>,
    pub report: AssignmentReport,
}

/// Merge a fresh partition plan into the roster.
///
/// Already-assigned participants are never touched, so re-running an
/// assignment round is idempotent. Unassigned participants are paired with
/// planned cells positionally in roster order; whoever falls beyond the
/// capacity ceiling stays unassigned and is counted in the report.
///
/// A record with exactly one group field set is a data-integrity violation.
/// The applier refuses the whole roster rather than guess which field was
/// intended.
pub fn apply<R: Rng + ?Sized>(
    records: Vec<Participant>,
    capacity_per_cell: usize,
    rng: &mut R,
) -> Result<ApplyOutcome> {
    let corrupt: Vec<String> = records
        .iter()
        .filter(|p| p.assignment_state() == AssignmentState::Corrupt)
        .map(|p| p.code.clone())
        .collect();
    if !corrupt.is_empty() {
        return Err(AssignError::CorruptRecord { codes: corrupt });
    }

    let already_assigned = records.iter().filter(|p| p.is_assigned()).count();
    let unassigned_count = records.len() - already_assigned;

    let cells = topology();
    let outcome = planner::plan(unassigned_count, &cells, capacity_per_cell, rng)?;
    if outcome.overflow > 0 {
        tracing::warn!(
            overflow = outcome.overflow,
            ceiling = cells.len() * capacity_per_cell,
            "unassigned participants exceed total capacity; excess stay pending"
        );
    }

    let mut records = records;
    let mut planned = outcome.cells.into_iter();
    let mut newly_assigned = 0;
    for participant in records.iter_mut().filter(|p| !p.is_assigned()) {
        match planned.next() {
            Some(cell) => {
                participant.assign(cell);
                newly_assigned += 1;
            }
            None => break,
        }
    }

    let report = AssignmentReport {
        already_assigned,
        newly_assigned,
        left_unassigned: unassigned_count - newly_assigned,
        overflow: outcome.overflow,
    };
    tracing::debug!(?report, "assignment round applied");

    Ok(ApplyOutcome { records, report })
}

/// Administrative clear: the only transition path back to Unassigned.
pub fn clear_assignments(records: &mut [Participant]) {
    for participant in records.iter_mut() {
        participant.clear_assignment();
    }
}
