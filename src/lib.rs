//! Loan Scorer - loan eligibility scoring service
//!
//! This library turns loose applicant attributes into the feature vector a
//! pre-trained classifier expects, aligns that vector to whatever schema the
//! loaded model declares, and applies a fixed decision threshold to the
//! resulting default probability.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod scoring;
pub mod services;

// Re-export commonly used types
pub use crate::core::{decide, discover_schema, encode, reconcile, EncodeError, PredictError, Predictor, SchemaSource};
pub use models::{ApplicantRecord, Decision, FeatureVector, PredictionOutcome, PredictionRecord, ReconciledVector};
pub use scoring::{load_model, ModelArtifact, ModelError, ScoringModel};
pub use services::PredictionStore;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        // Verify that the library exports work correctly
        assert_eq!(decide(0.5, 0.25), Decision::Rejected);
    }
}
