use crate::domain::model::Participant;
use crate::domain::ports::{RosterStore, Storage};
use crate::utils::error::{AssignError, Result};
use async_trait::async_trait;

pub const DEFAULT_DATA_FILE: &str = "students_data.json";

/// Roster persistence as one pretty-printed JSON array. The whole file is
/// rewritten on every save, which is the all-or-nothing contract the core
/// expects from its store.
#[derive(Debug, Clone)]
pub struct JsonRosterStore<S: Storage> {
    storage: S,
    file_name: String,
}

impl<S: Storage> JsonRosterStore<S> {
    pub fn new(storage: S, file_name: String) -> Self {
        Self { storage, file_name }
    }
}

#[async_trait]
impl<S: Storage> RosterStore for JsonRosterStore<S> {
    async fn load(&self) -> Result<Vec<Participant>> {
        match self.storage.read_file(&self.file_name).await {
            Ok(bytes) => {
                let roster: Vec<Participant> = serde_json::from_slice(&bytes)?;
                Ok(roster)
            }
            // No data file yet means an empty roster, not a failure.
            Err(AssignError::IoError(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }

    async fn save(&self, roster: &[Participant]) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(roster)?;
        self.storage.write_file(&self.file_name, &bytes).await
    }
}
