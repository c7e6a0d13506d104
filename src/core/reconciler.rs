use serde::Serialize;

use crate::models::{FeatureVector, ReconciledVector};
use crate::scoring::{ModelError, ScoringModel};

/// Where the expected feature schema was found
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemaSource {
    Booster,
    FeatureNamesIn,
    FeatureNamesOut,
    /// No model surface answered; the encoder's own order is used
    Encoder,
}

/// Ordered feature names a model expects
#[derive(Debug, Clone, PartialEq)]
pub struct ExpectedSchema {
    pub names: Vec<String>,
    pub source: SchemaSource,
}

type SchemaProbe = fn(&dyn ScoringModel) -> Option<Result<Vec<String>, ModelError>>;

fn probe_booster(model: &dyn ScoringModel) -> Option<Result<Vec<String>, ModelError>> {
    model.booster_feature_names()
}

fn probe_names_in(model: &dyn ScoringModel) -> Option<Result<Vec<String>, ModelError>> {
    model.feature_names_in().map(Ok)
}

fn probe_names_out(model: &dyn ScoringModel) -> Option<Result<Vec<String>, ModelError>> {
    model.feature_names_out()
}

/// Schema probes in priority order
const SCHEMA_PROBES: [(SchemaSource, SchemaProbe); 3] = [
    (SchemaSource::Booster, probe_booster),
    (SchemaSource::FeatureNamesIn, probe_names_in),
    (SchemaSource::FeatureNamesOut, probe_names_out),
];

/// Discover the feature schema a model expects
///
/// Probes run in priority order and the first non-empty answer wins. Probe
/// failures are swallowed; when nothing answers, the vector's own slot order is
/// returned, so discovery never fails.
pub fn discover_schema(model: &dyn ScoringModel, vector: &FeatureVector) -> ExpectedSchema {
    for (source, probe) in SCHEMA_PROBES {
        match probe(model) {
            Some(Ok(names)) if !names.is_empty() => return ExpectedSchema { names, source },
            Some(Ok(_)) => tracing::debug!("Model declared an empty schema via {:?}, skipping", source),
            Some(Err(e)) => tracing::debug!("Schema probe {:?} failed: {}", source, e),
            None => {}
        }
    }

    ExpectedSchema {
        names: vector.names().map(str::to_string).collect(),
        source: SchemaSource::Encoder,
    }
}

/// Align a feature vector to the expected schema
///
/// Names the vector lacks are filled with 0.0; slots the schema does not name
/// are dropped. The result follows the schema order exactly.
pub fn reconcile(vector: &FeatureVector, schema: &[String]) -> ReconciledVector {
    let mut padded = 0usize;
    let values = schema
        .iter()
        .map(|name| {
            vector.get(name).unwrap_or_else(|| {
                padded += 1;
                0.0
            })
        })
        .collect();

    if padded > 0 {
        tracing::debug!("Padded {} feature(s) missing from the encoded vector", padded);
    }

    ReconciledVector::new(schema.to_vec(), values)
}
