// Service exports
pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::{PostgresClient, PostgresError};

use std::sync::Arc;
use thiserror::Error;

use crate::models::{NewPrediction, PredictionRecord};

/// Errors that can occur when reading or writing predictions
#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Postgres(#[from] PostgresError),

    #[error("in-memory store lock poisoned")]
    Poisoned,
}

/// Prediction log backend
#[derive(Clone)]
pub enum PredictionStore {
    Postgres(Arc<PostgresClient>),
    Memory(Arc<MemoryStore>),
}

impl PredictionStore {
    pub fn memory() -> Self {
        PredictionStore::Memory(Arc::new(MemoryStore::new()))
    }

    pub fn backend(&self) -> &'static str {
        match self {
            PredictionStore::Postgres(_) => "postgres",
            PredictionStore::Memory(_) => "memory",
        }
    }

    pub async fn insert(&self, prediction: NewPrediction) -> Result<PredictionRecord, StoreError> {
        match self {
            PredictionStore::Postgres(client) => Ok(client.insert_prediction(&prediction).await?),
            PredictionStore::Memory(store) => store.insert(prediction),
        }
    }

    /// Most recent predictions, newest first
    pub async fn recent(&self, limit: usize) -> Result<Vec<PredictionRecord>, StoreError> {
        match self {
            PredictionStore::Postgres(client) => Ok(client.recent_predictions(limit).await?),
            PredictionStore::Memory(store) => store.recent(limit),
        }
    }

    pub async fn health_check(&self) -> bool {
        match self {
            PredictionStore::Postgres(client) => client.health_check().await.unwrap_or(false),
            PredictionStore::Memory(_) => true,
        }
    }
}
