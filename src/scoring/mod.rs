//! Scoring models loaded from a serialized artifact at startup
//!
//! The rest of the service only sees [`ScoringModel`]: one required discrete
//! prediction plus a set of optional capabilities. A capability the model does
//! not offer reports `None`, so callers probe by calling rather than by
//! inspecting concrete types.

pub mod boosted;
pub mod logistic;

use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

pub use boosted::{BoostedTrees, Node, Tree};
pub use logistic::LogisticModel;

/// Errors raised by scoring models and artifact loading
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("failed to read model artifact {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse model artifact: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid model artifact: {0}")]
    InvalidArtifact(String),

    #[error("shape mismatch: model expects {expected} features, got {actual}")]
    Shape { expected: usize, actual: usize },

    #[error("model returned no output for the input")]
    EmptyOutput,

    #[error("probability output has {0} columns, expected a positive class column")]
    MissingPositiveClass(usize),

    #[error("model does not declare feature names")]
    NoFeatureNames,

    #[error("model returned {0}, which is not a probability")]
    InvalidProbability(f64),
}

/// Opaque scoring capability
///
/// Tables are row-major: one inner `Vec` per applicant, columns in the order
/// the model was trained on.
pub trait ScoringModel: Send + Sync {
    /// Short model family name used in logs and health output
    fn name(&self) -> &str;

    /// Discrete class prediction per row
    fn predict(&self, rows: &[Vec<f64>]) -> Result<Vec<f64>, ModelError>;

    /// Per-row class probabilities, `None` when unsupported
    fn predict_proba(&self, _rows: &[Vec<f64>]) -> Option<Result<Vec<Vec<f64>>, ModelError>> {
        None
    }

    /// Feature names declared on the underlying booster
    fn booster_feature_names(&self) -> Option<Result<Vec<String>, ModelError>> {
        None
    }

    /// Feature names seen while fitting
    fn feature_names_in(&self) -> Option<Vec<String>> {
        None
    }

    /// Feature names the model reports as its output schema
    fn feature_names_out(&self) -> Option<Result<Vec<String>, ModelError>> {
        None
    }
}

/// Serialized model artifact, tagged by model family
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelArtifact {
    Logistic(LogisticModel),
    GradientBoosting(BoostedTrees),
}

impl ModelArtifact {
    /// Parse and validate an artifact from JSON text
    pub fn from_json(text: &str) -> Result<Self, ModelError> {
        let artifact: ModelArtifact = serde_json::from_str(text)?;
        artifact.validate()?;
        Ok(artifact)
    }

    /// Read, parse and validate an artifact file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ModelError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ModelError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&text)
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        match self {
            ModelArtifact::Logistic(model) => model.validate(),
            ModelArtifact::GradientBoosting(model) => model.validate(),
        }
    }

    pub fn into_model(self) -> Arc<dyn ScoringModel> {
        match self {
            ModelArtifact::Logistic(model) => Arc::new(model),
            ModelArtifact::GradientBoosting(model) => Arc::new(model),
        }
    }
}

/// Load the scoring model used for the lifetime of the process
pub fn load_model<P: AsRef<Path>>(path: P) -> Result<Arc<dyn ScoringModel>, ModelError> {
    let artifact = ModelArtifact::load(&path)?;
    tracing::info!("Loaded model from {}", path.as_ref().display());
    Ok(artifact.into_model())
}

#[inline]
pub(crate) fn sigmoid(margin: f64) -> f64 {
    1.0 / (1.0 + (-margin).exp())
}

pub(crate) fn check_width(row: &[f64], expected: usize) -> Result<(), ModelError> {
    if row.len() == expected {
        Ok(())
    } else {
        Err(ModelError::Shape {
            expected,
            actual: row.len(),
        })
    }
}

pub(crate) fn check_feature_names(names: Option<&Vec<String>>, width: usize) -> Result<(), ModelError> {
    match names {
        Some(names) if names.len() != width => Err(ModelError::InvalidArtifact(format!(
            "{} feature names declared for {} features",
            names.len(),
            width
        ))),
        _ => Ok(()),
    }
}
