use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const PRIMARY_GROUPS: [char; 5] = ['A', 'B', 'C', 'D', 'E'];
pub const SUBGROUPS: [u8; 5] = [1, 2, 3, 4, 5];
pub const CELL_COUNT: usize = PRIMARY_GROUPS.len() * SUBGROUPS.len();
pub const DEFAULT_CAPACITY_PER_CELL: usize = 8;

/// One (primary group, subgroup) pair, the unit of assignment capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub primary: char,
    pub subgroup: u8,
}

impl Cell {
    pub fn new(primary: char, subgroup: u8) -> Self {
        Self { primary, subgroup }
    }

    pub fn label(&self) -> String {
        format!("{}{}", self.primary, self.subgroup)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.primary, self.subgroup)
    }
}

/// The fixed ordered list of all 25 cells: A1, A2, ... A5, B1, ... E5.
/// Cells are statically enumerated and never created or destroyed at runtime.
pub fn topology() -> Vec<Cell> {
    PRIMARY_GROUPS
        .iter()
        .flat_map(|&p| SUBGROUPS.iter().map(move |&s| Cell::new(p, s)))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignmentState {
    Assigned(Cell),
    Unassigned,
    /// Exactly one of the two group fields is set. This never happens through
    /// the public API; it indicates externally tampered or truncated data.
    Corrupt,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Participant {
    pub code: String,
    pub display_name: String,
    #[serde(default)]
    pub primary_group: Option<char>,
    #[serde(default)]
    pub subgroup: Option<u8>,
    pub registered_at: DateTime<Utc>,
}

impl Participant {
    pub fn new(code: String, display_name: String) -> Self {
        Self {
            code,
            display_name,
            primary_group: None,
            subgroup: None,
            registered_at: Utc::now(),
        }
    }

    pub fn assignment_state(&self) -> AssignmentState {
        match (self.primary_group, self.subgroup) {
            (Some(p), Some(s)) => AssignmentState::Assigned(Cell::new(p, s)),
            (None, None) => AssignmentState::Unassigned,
            _ => AssignmentState::Corrupt,
        }
    }

    pub fn is_assigned(&self) -> bool {
        matches!(self.assignment_state(), AssignmentState::Assigned(_))
    }

    pub fn assign(&mut self, cell: Cell) {
        self.primary_group = Some(cell.primary);
        self.subgroup = Some(cell.subgroup);
    }

    pub fn clear_assignment(&mut self) {
        self.primary_group = None;
        self.subgroup = None;
    }
}

/// Outcome counts of one assignment round. Partial success (some placed, some
/// left pending) is always reported with exact counts, never a bare flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AssignmentReport {
    pub already_assigned: usize,
    pub newly_assigned: usize,
    pub left_unassigned: usize,
    pub overflow: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RosterStats {
    pub total: usize,
    pub assigned: usize,
    pub unassigned: usize,
    pub active_cells: usize,
}
