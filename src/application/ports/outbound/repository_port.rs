//! Repository ports - Interfaces for encounter persistence
//!
//! Adapters store whole documents. Writers sharing one `EncounterService`
//! are serialized per encounter by the service; adapters shared between
//! several processes need their own document-level locking.

use async_trait::async_trait;

use crate::domain::entities::Encounter;
use crate::domain::value_objects::EncounterId;

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<serde_json::Error> for RepositoryError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Repository port for Encounter aggregate operations
#[async_trait]
pub trait EncounterRepositoryPort: Send + Sync {
    /// Get an encounter by ID
    async fn get(&self, id: EncounterId) -> Result<Option<Encounter>, RepositoryError>;

    /// Insert or replace an encounter
    async fn save(&self, encounter: &Encounter) -> Result<(), RepositoryError>;

    /// Delete an encounter, returning whether it existed
    async fn delete(&self, id: EncounterId) -> Result<bool, RepositoryError>;

    /// List all encounters
    async fn list(&self) -> Result<Vec<Encounter>, RepositoryError>;
}
