use crate::domain::model::Cell;
use crate::utils::error::{AssignError, Result};
use rand::seq::SliceRandom;
use rand::Rng;

/// One round of cell sizing. `cells` holds exactly
/// `min(unassigned_count, topology.len() * capacity_per_cell)` entries;
/// `overflow` is how many participants did not fit under the ceiling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanOutcome {
    pub cells: Vec<Cell>,
    pub overflow: usize,
}

impl PlanOutcome {
    fn empty() -> Self {
        Self {
            cells: Vec::new(),
            overflow: 0,
        }
    }
}

/// Compute a balanced, randomly shuffled cell sequence for `unassigned_count`
/// participants.
///
/// Sizing is a recentering loop: at cell *i* with `remaining` slots left and
/// `cells_left` cells to fill, the cell takes
/// `min(capacity_per_cell, ceil(remaining / cells_left))`. Recomputing the
/// quotient after every cell keeps the partition maximally even (max - min <= 1
/// below the ceiling) and pushes any remainder forced out by the per-cell
/// ceiling onto later cells instead of losing it.
///
/// The planner never sees participant identity; it is a pure sizing and
/// shuffling function over counts.
pub fn plan<R: Rng + ?Sized>(
    unassigned_count: usize,
    topology: &[Cell],
    capacity_per_cell: usize,
    rng: &mut R,
) -> Result<PlanOutcome> {
    if capacity_per_cell == 0 || topology.is_empty() {
        return Err(AssignError::InvalidTopology {
            capacity: capacity_per_cell,
        });
    }

    if unassigned_count == 0 {
        return Ok(PlanOutcome::empty());
    }

    let total_capacity = topology.len() * capacity_per_cell;
    let overflow = unassigned_count.saturating_sub(total_capacity);
    let effective_count = unassigned_count - overflow;

    let mut cells = Vec::with_capacity(effective_count);
    let mut remaining = effective_count;
    for (i, cell) in topology.iter().enumerate() {
        let cells_left = topology.len() - i;
        let take = remaining.div_ceil(cells_left).min(capacity_per_cell);
        cells.extend(std::iter::repeat(*cell).take(take));
        remaining -= take;
    }
    debug_assert_eq!(remaining, 0);

    // Randomize which participant lands in which cell while preserving the
    // per-cell counts computed above.
    cells.shuffle(rng);

    Ok(PlanOutcome { cells, overflow })
}
