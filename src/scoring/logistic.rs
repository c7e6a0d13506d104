use serde::{Deserialize, Serialize};

use crate::scoring::{check_feature_names, check_width, sigmoid, ModelError, ScoringModel};

/// Logistic regression over the raw feature vector
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticModel {
    #[serde(default)]
    pub feature_names: Option<Vec<String>>,
    pub coefficients: Vec<f64>,
    #[serde(default)]
    pub intercept: f64,
}

impl LogisticModel {
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.coefficients.is_empty() {
            return Err(ModelError::InvalidArtifact(
                "logistic model has no coefficients".to_string(),
            ));
        }
        check_feature_names(self.feature_names.as_ref(), self.coefficients.len())
    }

    fn margin(&self, row: &[f64]) -> Result<f64, ModelError> {
        check_width(row, self.coefficients.len())?;
        Ok(self.intercept
            + row
                .iter()
                .zip(&self.coefficients)
                .map(|(x, w)| x * w)
                .sum::<f64>())
    }

    /// Positive-class probability for a single row
    pub fn probability(&self, row: &[f64]) -> Result<f64, ModelError> {
        self.margin(row).map(sigmoid)
    }
}

impl ScoringModel for LogisticModel {
    fn name(&self) -> &str {
        "logistic"
    }

    fn predict(&self, rows: &[Vec<f64>]) -> Result<Vec<f64>, ModelError> {
        rows.iter()
            .map(|row| self.margin(row).map(|m| if m > 0.0 { 1.0 } else { 0.0 }))
            .collect()
    }

    fn predict_proba(&self, rows: &[Vec<f64>]) -> Option<Result<Vec<Vec<f64>>, ModelError>> {
        Some(
            rows.iter()
                .map(|row| self.probability(row).map(|p| vec![1.0 - p, p]))
                .collect(),
        )
    }

    fn feature_names_in(&self) -> Option<Vec<String>> {
        self.feature_names.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> LogisticModel {
        LogisticModel {
            feature_names: Some(vec!["a".to_string(), "b".to_string()]),
            coefficients: vec![1.0, -2.0],
            intercept: 0.5,
        }
    }

    #[test]
    fn test_probability_and_prediction_agree() {
        let model = model();
        let rows = vec![vec![1.0, 0.0], vec![0.0, 1.0]];

        let proba = model.predict_proba(&rows).unwrap().unwrap();
        let labels = model.predict(&rows).unwrap();

        assert!(proba[0][1] > 0.5);
        assert!(proba[1][1] < 0.5);
        assert!((proba[0][0] + proba[0][1] - 1.0).abs() < 1e-12);
        assert_eq!(labels, vec![1.0, 0.0]);
    }

    #[test]
    fn test_shape_mismatch() {
        let err = model().predict(&[vec![1.0]]).unwrap_err();
        assert!(matches!(err, ModelError::Shape { expected: 2, actual: 1 }));
    }

    #[test]
    fn test_feature_name_count_validated() {
        let mut model = model();
        model.feature_names = Some(vec!["a".to_string()]);
        assert!(model.validate().is_err());
    }

    #[test]
    fn test_exposes_fit_feature_names_only() {
        let model = model();
        assert_eq!(model.feature_names_in().unwrap().len(), 2);
        assert!(model.booster_feature_names().is_none());
        assert!(model.feature_names_out().is_none());
    }
}
