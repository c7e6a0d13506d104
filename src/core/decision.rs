use crate::models::{Decision, PredictionOutcome, ReconciledVector};
use crate::scoring::{ModelError, ScoringModel};

/// Index of the positive ("default") class in probability output
const POSITIVE_CLASS: usize = 1;

/// Reject only when the probability is strictly above the threshold
#[inline]
pub fn decide(probability: f64, threshold: f64) -> Decision {
    if probability > threshold {
        Decision::Rejected
    } else {
        Decision::Approved
    }
}

/// Score a reconciled vector and return the positive-class probability
///
/// Models without probability output fall back to their discrete prediction,
/// which is then read as the probability itself.
pub fn score_probability(
    model: &dyn ScoringModel,
    vector: &ReconciledVector,
) -> Result<f64, ModelError> {
    let table = vector.to_table();

    let probability = match model.predict_proba(&table) {
        Some(proba) => {
            let rows = proba?;
            let row = rows.first().ok_or(ModelError::EmptyOutput)?;
            row.get(POSITIVE_CLASS)
                .copied()
                .ok_or(ModelError::MissingPositiveClass(row.len()))?
        }
        None => {
            tracing::debug!("Model {} has no probability output, using discrete prediction", model.name());
            model.predict(&table)?
                .first()
                .copied()
                .ok_or(ModelError::EmptyOutput)?
        }
    };

    if !(0.0..=1.0).contains(&probability) {
        return Err(ModelError::InvalidProbability(probability));
    }
    Ok(probability)
}

/// Build the outcome for a probability and threshold
pub fn outcome(probability: f64, threshold: f64) -> PredictionOutcome {
    PredictionOutcome {
        probability,
        decision: decide(probability, threshold),
        threshold,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct LabelOnly(f64);

    impl ScoringModel for LabelOnly {
        fn name(&self) -> &str {
            "label_only"
        }

        fn predict(&self, rows: &[Vec<f64>]) -> Result<Vec<f64>, ModelError> {
            Ok(vec![self.0; rows.len()])
        }
    }

    struct SingleColumn;

    impl ScoringModel for SingleColumn {
        fn name(&self) -> &str {
            "single_column"
        }

        fn predict(&self, _rows: &[Vec<f64>]) -> Result<Vec<f64>, ModelError> {
            Ok(vec![0.0])
        }

        fn predict_proba(&self, _rows: &[Vec<f64>]) -> Option<Result<Vec<Vec<f64>>, ModelError>> {
            Some(Ok(vec![vec![0.3]]))
        }
    }

    fn vector() -> ReconciledVector {
        ReconciledVector::new(vec!["Age".to_string()], vec![35.0])
    }

    #[test]
    fn test_decide_boundary() {
        assert_eq!(decide(0.25, 0.25), Decision::Approved);
        assert_eq!(decide(0.25 + f64::EPSILON, 0.25), Decision::Rejected);
        assert_eq!(decide(0.0, 0.25), Decision::Approved);
        assert_eq!(decide(1.0, 0.25), Decision::Rejected);
    }

    #[test]
    fn test_falls_back_to_discrete_prediction() {
        let probability = score_probability(&LabelOnly(1.0), &vector()).unwrap();
        assert_eq!(probability, 1.0);
        assert_eq!(outcome(probability, 0.25).decision, Decision::Rejected);
    }

    #[test]
    fn test_missing_positive_class_column() {
        let err = score_probability(&SingleColumn, &vector()).unwrap_err();
        assert!(matches!(err, ModelError::MissingPositiveClass(1)));
    }

    #[test]
    fn test_rejects_scores_outside_unit_interval() {
        let err = score_probability(&LabelOnly(f64::NAN), &vector()).unwrap_err();
        assert!(matches!(err, ModelError::InvalidProbability(p) if p.is_nan()));

        let err = score_probability(&LabelOnly(2.0), &vector()).unwrap_err();
        assert!(matches!(err, ModelError::InvalidProbability(p) if p == 2.0));

        assert!(score_probability(&LabelOnly(f64::INFINITY), &vector()).is_err());
    }
}
