// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    ApplicantRecord, Decision, FeatureVector, NewPrediction, PersistedAttributes, PredictionOutcome,
    PredictionRecord, ReconciledVector, FEATURE_COUNT, FEATURE_NAMES,
};
pub use requests::{HistoryQuery, MAX_HISTORY_LIMIT};
pub use responses::{ErrorResponse, HealthResponse, HistoryResponse, PredictResponse};
