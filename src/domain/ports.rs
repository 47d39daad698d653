use crate::domain::model::Participant;
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Durable roster collaborator. Both operations are treated as atomic,
/// all-or-nothing; partial writes are the store's concern, not the core's.
#[async_trait]
pub trait RosterStore: Send + Sync {
    async fn load(&self) -> Result<Vec<Participant>>;
    async fn save(&self, roster: &[Participant]) -> Result<()>;
}

pub trait ConfigProvider: Send + Sync {
    fn capacity_per_cell(&self) -> usize;
    fn code_prefix(&self) -> &str;
    fn code_digits(&self) -> usize;
    fn course_title(&self) -> &str;
    fn lecturer(&self) -> &str;
    fn department(&self) -> &str;
}
