use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use crate::core::coerce::{coerce_float, coerce_int, coerce_text};

/// Number of slots in the model's training-time feature vector
pub const FEATURE_COUNT: usize = 16;

/// Feature names in the exact order the model was trained on
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "InterestRate",
    "CreditScore",
    "DTIRatio",
    "EmploymentType_Unemployed",
    "Education_High School",
    "Education_Master's",
    "Education_PhD",
    "HasMortgage_Yes",
    "HasDependents_Yes",
    "HasCoSigner_Yes",
    "Age",
    "Income",
    "LoanAmount",
    "MonthsEmployed",
    "NumCreditLines",
    "LoanTerm",
];

/// Applicant attributes exactly as they arrived in the request body
///
/// The record is deliberately loose: values keep their JSON type and are only
/// coerced when the encoder or the persistence layer asks for them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicantRecord(Map<String, Value>);

impl ApplicantRecord {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// String value of a field, `None` for absent or non-string values
    pub fn text(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Map<String, Value>> for ApplicantRecord {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

/// Encoded applicant, one value per entry of [`FEATURE_NAMES`]
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    values: [f64; FEATURE_COUNT],
}

impl FeatureVector {
    pub fn from_values(values: [f64; FEATURE_COUNT]) -> Self {
        Self { values }
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> {
        FEATURE_NAMES.iter().copied()
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        FEATURE_NAMES.iter().copied().zip(self.values.iter().copied())
    }

    /// Look up a slot by its trained feature name
    pub fn get(&self, name: &str) -> Option<f64> {
        FEATURE_NAMES
            .iter()
            .position(|candidate| *candidate == name)
            .map(|idx| self.values[idx])
    }

    pub fn len(&self) -> usize {
        FEATURE_COUNT
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}

/// Feature vector re-keyed to the order a model declares
#[derive(Debug, Clone, PartialEq)]
pub struct ReconciledVector {
    names: Vec<String>,
    values: Vec<f64>,
}

impl ReconciledVector {
    pub fn new(names: Vec<String>, values: Vec<f64>) -> Self {
        debug_assert_eq!(names.len(), values.len());
        Self { names, values }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.names
            .iter()
            .position(|candidate| candidate == name)
            .map(|idx| self.values[idx])
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Single-row table handed to the scoring model
    pub fn to_table(&self) -> Vec<Vec<f64>> {
        vec![self.values.clone()]
    }
}

/// Binary verdict derived from the default probability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    Approved,
    Rejected,
}

impl Decision {
    pub fn as_str(&self) -> &'static str {
        match self {
            Decision::Approved => "Approved",
            Decision::Rejected => "Rejected",
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of scoring a single applicant
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PredictionOutcome {
    pub probability: f64,
    pub decision: Decision,
    pub threshold: f64,
}

/// Raw applicant attributes in their persisted form
///
/// Every field is coerced on its own; a value that cannot be coerced is stored
/// as null instead of failing the insert.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersistedAttributes {
    pub age: Option<i64>,
    pub income: Option<f64>,
    pub loan_amount: Option<f64>,
    pub credit_score: Option<i64>,
    pub months_employed: Option<i64>,
    pub num_credit_lines: Option<i64>,
    pub interest_rate: Option<f64>,
    pub loan_term: Option<i64>,
    pub dti_ratio: Option<f64>,
    pub education: Option<String>,
    pub employment_type: Option<String>,
    pub marital_status: Option<String>,
    pub has_mortgage: Option<String>,
    pub has_dependents: Option<String>,
    pub loan_purpose: Option<String>,
    pub has_cosigner: Option<String>,
}

impl PersistedAttributes {
    pub fn from_record(record: &ApplicantRecord) -> Self {
        let int = |key: &str| record.get(key).and_then(coerce_int);
        let float = |key: &str| record.get(key).and_then(coerce_float);
        let text = |key: &str| record.get(key).and_then(coerce_text);

        Self {
            age: int("age"),
            income: float("income"),
            loan_amount: float("loan_amount"),
            credit_score: int("credit_score"),
            months_employed: int("months_employed"),
            num_credit_lines: int("num_credit_lines"),
            interest_rate: float("interest_rate"),
            loan_term: int("loan_term"),
            dti_ratio: float("dti_ratio"),
            education: text("education"),
            employment_type: text("employment_type"),
            marital_status: text("marital_status"),
            has_mortgage: text("has_mortgage"),
            has_dependents: text("has_dependents"),
            loan_purpose: text("loan_purpose"),
            has_cosigner: text("has_cosigner"),
        }
    }
}

/// Prediction waiting to be written to the store
#[derive(Debug, Clone, PartialEq)]
pub struct NewPrediction {
    pub request_id: uuid::Uuid,
    pub attributes: PersistedAttributes,
    pub prediction: Decision,
    pub probability: f64,
}

impl NewPrediction {
    pub fn new(request_id: uuid::Uuid, record: &ApplicantRecord, outcome: &PredictionOutcome) -> Self {
        Self {
            request_id,
            attributes: PersistedAttributes::from_record(record),
            prediction: outcome.decision,
            probability: outcome.probability,
        }
    }
}

/// Stored prediction as served by the history endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRecord {
    pub id: i64,
    pub request_id: uuid::Uuid,
    #[serde(flatten)]
    pub attributes: PersistedAttributes,
    pub prediction: String,
    pub probability: f64,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
