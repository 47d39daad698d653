pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::CourseConfig;

pub use adapters::storage::LocalStorage;
pub use adapters::store::JsonRosterStore;
pub use core::engine::AssignmentEngine;
pub use domain::model::{AssignmentReport, Cell, Participant, RosterStats};
pub use utils::error::{AssignError, Result};
