use crate::core::applier;
use crate::domain::model::{AssignmentReport, AssignmentState, Participant, RosterStats};
use crate::domain::ports::{ConfigProvider, RosterStore};
use crate::utils::error::{AssignError, Result};
use crate::utils::validation::{validate_code, validate_non_empty_string};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;

/// Orchestrates load -> compute -> save around the roster store. The engine
/// holds no state between calls; every operation is one exclusive
/// load/mutate/save round, so the caller only has to serialize concurrent
/// mutations (single-writer discipline).
pub struct AssignmentEngine<R: RosterStore, C: ConfigProvider> {
    store: R,
    config: C,
}

impl<R: RosterStore, C: ConfigProvider> AssignmentEngine<R, C> {
    pub fn new(store: R, config: C) -> Self {
        Self { store, config }
    }

    /// Register a new participant, unassigned. Codes are trimmed and
    /// uppercased before validation so lookups are case-insensitive.
    pub async fn register(&self, display_name: &str, code: &str) -> Result<Participant> {
        validate_non_empty_string("display_name", display_name)?;
        let code = code.trim().to_uppercase();
        validate_code(
            "code",
            &code,
            self.config.code_prefix(),
            self.config.code_digits(),
        )?;

        let mut roster = self.store.load().await?;
        if roster.iter().any(|p| p.code == code) {
            return Err(AssignError::DuplicateCode { code });
        }

        let participant = Participant::new(code, display_name.trim().to_string());
        tracing::info!(code = %participant.code, "registered participant");
        roster.push(participant.clone());
        self.store.save(&roster).await?;
        Ok(participant)
    }

    pub async fn lookup(&self, code: &str) -> Result<Participant> {
        let code = code.trim().to_uppercase();
        let roster = self.store.load().await?;
        roster
            .into_iter()
            .find(|p| p.code == code)
            .ok_or(AssignError::UnknownCode { code })
    }

    /// Run one assignment round over everyone currently unassigned. Passing a
    /// seed makes the shuffle reproducible; otherwise one is drawn fresh.
    pub async fn assign(&self, seed: Option<u64>) -> Result<AssignmentReport> {
        let base_seed = seed.unwrap_or_else(|| rand::rng().random());
        let mut rng = StdRng::seed_from_u64(base_seed);
        tracing::debug!(seed = base_seed, "starting assignment round");

        let roster = self.store.load().await?;
        let outcome = applier::apply(roster, self.config.capacity_per_cell(), &mut rng)?;
        self.store.save(&outcome.records).await?;

        tracing::info!(
            newly_assigned = outcome.report.newly_assigned,
            left_unassigned = outcome.report.left_unassigned,
            "assignment round saved"
        );
        Ok(outcome.report)
    }

    /// Reset every participant to unassigned. This is the only path back from
    /// Assigned to Unassigned.
    pub async fn clear_assignments(&self) -> Result<usize> {
        let mut roster = self.store.load().await?;
        applier::clear_assignments(&mut roster);
        self.store.save(&roster).await?;
        tracing::info!(cleared = roster.len(), "all assignments cleared");
        Ok(roster.len())
    }

    pub async fn roster(&self) -> Result<Vec<Participant>> {
        self.store.load().await
    }

    pub async fn stats(&self) -> Result<RosterStats> {
        let roster = self.store.load().await?;
        let mut active_cells = HashSet::new();
        let mut assigned = 0;
        for p in &roster {
            if let AssignmentState::Assigned(cell) = p.assignment_state() {
                assigned += 1;
                active_cells.insert(cell);
            }
        }
        Ok(RosterStats {
            total: roster.len(),
            assigned,
            unassigned: roster.len() - assigned,
            active_cells: active_cells.len(),
        })
    }

    /// Replace the whole roster in one shot (backup restore). The CLI guards
    /// this behind an explicit confirmation; the engine only enforces code
    /// uniqueness.
    pub async fn replace_roster(&self, records: Vec<Participant>) -> Result<usize> {
        let mut seen = HashSet::new();
        for p in &records {
            if !seen.insert(p.code.as_str()) {
                return Err(AssignError::DuplicateCode {
                    code: p.code.clone(),
                });
            }
        }
        let count = records.len();
        self.store.save(&records).await?;
        tracing::warn!(count, "roster replaced from external data");
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::DEFAULT_CAPACITY_PER_CELL;
    use async_trait::async_trait;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone, Default)]
    struct MemoryStore {
        roster: Arc<Mutex<Vec<Participant>>>,
    }

    #[async_trait]
    impl RosterStore for MemoryStore {
        async fn load(&self) -> Result<Vec<Participant>> {
            Ok(self.roster.lock().await.clone())
        }

        async fn save(&self, roster: &[Participant]) -> Result<()> {
            *self.roster.lock().await = roster.to_vec();
            Ok(())
        }
    }

    struct TestConfig;

    impl ConfigProvider for TestConfig {
        fn capacity_per_cell(&self) -> usize {
            DEFAULT_CAPACITY_PER_CELL
        }
        fn code_prefix(&self) -> &str {
            "EE"
        }
        fn code_digits(&self) -> usize {
            7
        }
        fn course_title(&self) -> &str {
            "Renewable Energy Systems"
        }
        fn lecturer(&self) -> &str {
            "Test Lecturer"
        }
        fn department(&self) -> &str {
            "Test Department"
        }
    }

    fn engine() -> AssignmentEngine<MemoryStore, TestConfig> {
        AssignmentEngine::new(MemoryStore::default(), TestConfig)
    }

    #[tokio::test]
    async fn test_register_normalizes_and_persists() {
        let engine = engine();
        let p = engine.register("  Ama Mensah  ", " ee2021001 ").await.unwrap();
        assert_eq!(p.code, "EE2021001");
        assert_eq!(p.display_name, "Ama Mensah");
        assert!(!p.is_assigned());

        let found = engine.lookup("ee2021001").await.unwrap();
        assert_eq!(found.code, "EE2021001");
    }

    #[tokio::test]
    async fn test_register_rejects_duplicate_code() {
        let engine = engine();
        engine.register("Ama Mensah", "EE2021001").await.unwrap();
        let err = engine.register("Kofi Boateng", "ee2021001").await.unwrap_err();
        assert!(matches!(err, AssignError::DuplicateCode { .. }));
    }

    #[tokio::test]
    async fn test_register_rejects_bad_code_format() {
        let engine = engine();
        assert!(engine.register("Ama Mensah", "EE123").await.is_err());
        assert!(engine.register("Ama Mensah", "CS2021001").await.is_err());
        assert!(engine.register("", "EE2021001").await.is_err());
    }

    #[tokio::test]
    async fn test_lookup_unknown_code() {
        let engine = engine();
        let err = engine.lookup("EE2021999").await.unwrap_err();
        assert!(matches!(err, AssignError::UnknownCode { .. }));
    }

    #[tokio::test]
    async fn test_assign_then_stats_then_clear() {
        let engine = engine();
        for i in 0..30 {
            engine
                .register(&format!("Student {}", i), &format!("EE{:07}", 2021000 + i))
                .await
                .unwrap();
        }

        let report = engine.assign(Some(42)).await.unwrap();
        assert_eq!(report.newly_assigned, 30);
        assert_eq!(report.left_unassigned, 0);

        let stats = engine.stats().await.unwrap();
        assert_eq!(stats.total, 30);
        assert_eq!(stats.assigned, 30);
        assert_eq!(stats.unassigned, 0);
        assert_eq!(stats.active_cells, 25);

        let cleared = engine.clear_assignments().await.unwrap();
        assert_eq!(cleared, 30);
        let stats = engine.stats().await.unwrap();
        assert_eq!(stats.assigned, 0);
        assert_eq!(stats.active_cells, 0);
    }

    #[tokio::test]
    async fn test_assign_twice_is_idempotent() {
        let engine = engine();
        for i in 0..12 {
            engine
                .register(&format!("Student {}", i), &format!("EE{:07}", 2021000 + i))
                .await
                .unwrap();
        }

        let first = engine.assign(Some(1)).await.unwrap();
        assert_eq!(first.newly_assigned, 12);
        let second = engine.assign(Some(99)).await.unwrap();
        assert_eq!(second.newly_assigned, 0);
        assert_eq!(second.already_assigned, 12);
    }

    #[tokio::test]
    async fn test_replace_roster_rejects_duplicates() {
        let engine = engine();
        let dup = vec![
            Participant::new("EE2021001".to_string(), "Ama Mensah".to_string()),
            Participant::new("EE2021001".to_string(), "Kofi Boateng".to_string()),
        ];
        assert!(matches!(
            engine.replace_roster(dup).await,
            Err(AssignError::DuplicateCode { .. })
        ));

        let ok = vec![
            Participant::new("EE2021001".to_string(), "Ama Mensah".to_string()),
            Participant::new("EE2021002".to_string(), "Kofi Boateng".to_string()),
        ];
        assert_eq!(engine.replace_roster(ok).await.unwrap(), 2);
        assert_eq!(engine.stats().await.unwrap().total, 2);
    }
}
