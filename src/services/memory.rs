use std::sync::Mutex;

use crate::models::{NewPrediction, PredictionRecord};
use crate::services::StoreError;

/// Process-local prediction log
///
/// Used by tests and when the service runs without a database. Records are
/// kept in insertion order, which is also creation order.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<Vec<PredictionRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, prediction: NewPrediction) -> Result<PredictionRecord, StoreError> {
        let mut records = self.records.lock().map_err(|_| StoreError::Poisoned)?;

        let record = PredictionRecord {
            id: records.len() as i64 + 1,
            request_id: prediction.request_id,
            attributes: prediction.attributes,
            prediction: prediction.prediction.as_str().to_string(),
            probability: prediction.probability,
            created_at: chrono::Utc::now(),
        };
        records.push(record.clone());

        Ok(record)
    }

    pub fn recent(&self, limit: usize) -> Result<Vec<PredictionRecord>, StoreError> {
        let records = self.records.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(records.iter().rev().take(limit).cloned().collect())
    }
}
