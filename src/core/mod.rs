pub mod applier;
pub mod engine;
pub mod planner;
pub mod report;

pub use crate::domain::model::{AssignmentReport, Cell, Participant, RosterStats};
pub use crate::domain::ports::{ConfigProvider, RosterStore, Storage};
pub use crate::utils::error::Result;
