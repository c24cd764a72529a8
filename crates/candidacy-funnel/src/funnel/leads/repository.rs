use super::domain::{LeadId, LeadRecord};

/// Storage abstraction so the capture service can be exercised in isolation.
pub trait LeadRepository: Send + Sync {
    fn insert(&self, record: LeadRecord) -> Result<LeadRecord, RepositoryError>;
    fn fetch(&self, id: &LeadId) -> Result<Option<LeadRecord>, RepositoryError>;
    fn recent(&self, limit: usize) -> Result<Vec<LeadRecord>, RepositoryError>;
}

/// Error enumeration for lead storage failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("lead already exists")]
    Conflict,
    #[error("lead not found")]
    NotFound,
    #[error("lead storage unavailable: {0}")]
    Unavailable(String),
}
