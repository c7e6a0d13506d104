// Core pipeline exports
pub mod coerce;
pub mod decision;
pub mod encoder;
pub mod predictor;
pub mod reconciler;

pub use decision::{decide, outcome, score_probability};
pub use encoder::{encode, EncodeError};
pub use predictor::{PredictError, PredictionReport, Predictor};
pub use reconciler::{discover_schema, reconcile, ExpectedSchema, SchemaSource};
