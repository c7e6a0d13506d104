use serde_json::Value;
use thiserror::Error;

use crate::core::coerce::{coerce_float, coerce_int};
use crate::models::{ApplicantRecord, FeatureVector, FEATURE_COUNT};

/// Errors raised while encoding an applicant
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EncodeError {
    #[error("missing required field '{0}'")]
    MissingField(&'static str),

    #[error("field '{field}' is not a valid {expected}: {value}")]
    InvalidNumber {
        field: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Where a feature slot takes its value from
#[derive(Debug, Clone, Copy)]
enum SlotSource {
    /// Required field coerced to a float
    Float(&'static str),
    /// Required field coerced to an integer
    Int(&'static str),
    /// 1 when the field equals the category exactly, otherwise 0
    OneHot {
        field: &'static str,
        category: &'static str,
    },
}

// Indexed in FEATURE_NAMES order.
const SLOT_SOURCES: [SlotSource; FEATURE_COUNT] = [
    SlotSource::Float("interest_rate"),
    SlotSource::Int("credit_score"),
    SlotSource::Float("dti_ratio"),
    SlotSource::OneHot { field: "employment_type", category: "Unemployed" },
    SlotSource::OneHot { field: "education", category: "High School" },
    SlotSource::OneHot { field: "education", category: "Master's" },
    SlotSource::OneHot { field: "education", category: "PhD" },
    SlotSource::OneHot { field: "has_mortgage", category: "Yes" },
    SlotSource::OneHot { field: "has_dependents", category: "Yes" },
    SlotSource::OneHot { field: "has_cosigner", category: "Yes" },
    SlotSource::Int("age"),
    SlotSource::Float("income"),
    SlotSource::Float("loan_amount"),
    SlotSource::Int("months_employed"),
    SlotSource::Int("num_credit_lines"),
    SlotSource::Int("loan_term"),
];

/// Encode an applicant into the model's training-time feature vector
///
/// Numeric fields are required and must coerce. Categorical fields are matched
/// case-sensitively against a closed category set; anything else, including a
/// missing field, encodes as the reference category (all slots zero).
pub fn encode(record: &ApplicantRecord) -> Result<FeatureVector, EncodeError> {
    let mut values = [0.0; FEATURE_COUNT];

    for (slot, source) in values.iter_mut().zip(SLOT_SOURCES.iter()) {
        *slot = match *source {
            SlotSource::Float(field) => required(record, field, "number", coerce_float)?,
            SlotSource::Int(field) => required(record, field, "integer", coerce_int)? as f64,
            SlotSource::OneHot { field, category } => one_hot(record.text(field), category),
        };
    }

    Ok(FeatureVector::from_values(values))
}

fn required<T>(
    record: &ApplicantRecord,
    field: &'static str,
    expected: &'static str,
    coerce: fn(&Value) -> Option<T>,
) -> Result<T, EncodeError> {
    match record.get(field) {
        None | Some(Value::Null) => Err(EncodeError::MissingField(field)),
        Some(value) => coerce(value).ok_or_else(|| EncodeError::InvalidNumber {
            field,
            expected,
            value: value.to_string(),
        }),
    }
}

#[inline]
fn one_hot(value: Option<&str>, category: &str) -> f64 {
    if value == Some(category) { 1.0 } else { 0.0 }
}
