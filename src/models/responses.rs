use serde::{Deserialize, Serialize};
use crate::models::domain::{Decision, PredictionOutcome, PredictionRecord};

/// Response for the predict endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictResponse {
    pub prediction: Decision,
    pub probability: f64,
    pub threshold: f64,
}

impl From<&PredictionOutcome> for PredictResponse {
    fn from(outcome: &PredictionOutcome) -> Self {
        Self {
            prediction: outcome.decision,
            probability: outcome.probability,
            threshold: outcome.threshold,
        }
    }
}

/// Response for the history endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub history: Vec<PredictionRecord>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub model: String,
    pub store: String,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub detail: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            detail: detail.into(),
        }
    }
}
