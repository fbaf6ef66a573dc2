use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::application::ports::outbound::{EncounterRepositoryPort, RepositoryError};
use crate::domain::entities::Encounter;
use crate::domain::value_objects::EncounterId;

/// Encounter store that keeps each encounter as a serialized JSON document.
///
/// Every save and load goes through serde, so the stored shape is exactly
/// what a document database would receive.
pub struct InMemoryEncounterRepository {
    documents: RwLock<HashMap<EncounterId, String>>,
}

impl InMemoryEncounterRepository {
    pub fn new() -> Self {
        Self {
            documents: RwLock::new(HashMap::new()),
        }
    }

    /// Raw stored document, for inspection
    pub async fn document(&self, id: EncounterId) -> Option<String> {
        self.documents.read().await.get(&id).cloned()
    }
}

impl Default for InMemoryEncounterRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EncounterRepositoryPort for InMemoryEncounterRepository {
    async fn get(&self, id: EncounterId) -> Result<Option<Encounter>, RepositoryError> {
        let documents = self.documents.read().await;
        match documents.get(&id) {
            Some(document) => Ok(Some(serde_json::from_str(document)?)),
            None => Ok(None),
        }
    }

    async fn save(&self, encounter: &Encounter) -> Result<(), RepositoryError> {
        let document = serde_json::to_string(encounter)?;
        self.documents.write().await.insert(encounter.id, document);
        Ok(())
    }

    async fn delete(&self, id: EncounterId) -> Result<bool, RepositoryError> {
        Ok(self.documents.write().await.remove(&id).is_some())
    }

    async fn list(&self) -> Result<Vec<Encounter>, RepositoryError> {
        let documents = self.documents.read().await;
        let mut encounters = documents
            .values()
            .map(|document| serde_json::from_str::<Encounter>(document))
            .collect::<Result<Vec<_>, _>>()?;
        encounters.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.name.cmp(&b.name))
        });
        Ok(encounters)
    }
}
