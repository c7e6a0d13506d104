use std::sync::Arc;
use thiserror::Error;

use crate::core::{
    decision::{outcome, score_probability},
    encoder::{encode, EncodeError},
    reconciler::{discover_schema, reconcile, SchemaSource},
};
use crate::models::{ApplicantRecord, FeatureVector, PredictionOutcome};
use crate::scoring::{ModelError, ScoringModel};

/// Errors that fail a prediction request
#[derive(Debug, Error)]
pub enum PredictError {
    #[error("invalid applicant record: {0}")]
    Encoding(#[from] EncodeError),

    #[error("scoring failed: {0}")]
    Scoring(#[from] ModelError),
}

/// Everything produced while scoring one applicant
#[derive(Debug, Clone)]
pub struct PredictionReport {
    pub features: FeatureVector,
    pub schema_source: SchemaSource,
    pub outcome: PredictionOutcome,
}

/// Prediction pipeline orchestrator
///
/// # Pipeline Stages
/// 1. Encode the applicant into the training-time feature vector
/// 2. Discover the model's expected schema and reconcile the vector to it
/// 3. Score the reconciled vector
/// 4. Apply the decision threshold
///
/// The model and threshold are fixed when the predictor is built and never
/// change afterwards.
#[derive(Clone)]
pub struct Predictor {
    model: Arc<dyn ScoringModel>,
    threshold: f64,
}

impl Predictor {
    pub fn new(model: Arc<dyn ScoringModel>, threshold: f64) -> Self {
        Self { model, threshold }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn model_name(&self) -> &str {
        self.model.name()
    }

    /// Run the full pipeline for a single applicant
    pub fn predict(&self, record: &ApplicantRecord) -> Result<PredictionReport, PredictError> {
        let features = encode(record)?;

        let schema = discover_schema(self.model.as_ref(), &features);
        let reconciled = reconcile(&features, &schema.names);

        let probability = score_probability(self.model.as_ref(), &reconciled)?;

        Ok(PredictionReport {
            features,
            schema_source: schema.source,
            outcome: outcome(probability, self.threshold),
        })
    }
}

impl std::fmt::Debug for Predictor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Predictor")
            .field("model", &self.model.name())
            .field("threshold", &self.threshold)
            .finish()
    }
}
