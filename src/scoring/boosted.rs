use serde::{Deserialize, Serialize};

use crate::scoring::{check_feature_names, check_width, sigmoid, ModelError, ScoringModel};

/// Gradient boosted binary classifier
///
/// Leaf values of every tree are summed onto `base_margin` and passed through
/// the logistic sigmoid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoostedTrees {
    /// Names recorded on the booster; boosters trained on bare arrays have none
    #[serde(default)]
    pub feature_names: Option<Vec<String>>,
    pub num_features: usize,
    #[serde(default)]
    pub base_margin: f64,
    pub trees: Vec<Tree>,
}

/// Single regression tree; node 0 is the root
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tree {
    pub nodes: Vec<Node>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Node {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
        /// Branch taken for NaN inputs
        #[serde(default)]
        default_left: bool,
    },
    Leaf {
        value: f64,
    },
}

impl Tree {
    /// Check that every split points forward to an existing node
    ///
    /// Forward-only children rule out cycles, so traversal always terminates.
    fn validate(&self, num_features: usize) -> Result<(), String> {
        if self.nodes.is_empty() {
            return Err("tree has no nodes".to_string());
        }
        for (idx, node) in self.nodes.iter().enumerate() {
            if let Node::Split { feature, left, right, .. } = *node {
                if feature >= num_features {
                    return Err(format!("node {} splits on feature {} of {}", idx, feature, num_features));
                }
                for child in [left, right] {
                    if child <= idx || child >= self.nodes.len() {
                        return Err(format!("node {} has invalid child {}", idx, child));
                    }
                }
            }
        }
        Ok(())
    }

    /// Walk from the root to a leaf for the given row
    pub fn leaf_value(&self, row: &[f64]) -> Result<f64, ModelError> {
        let mut idx = 0;
        // Bounded by node count even if the tree was built without validation.
        for _ in 0..self.nodes.len() {
            match self.nodes.get(idx) {
                Some(Node::Leaf { value }) => return Ok(*value),
                Some(Node::Split { feature, threshold, left, right, default_left }) => {
                    let x = row.get(*feature).copied().ok_or(ModelError::Shape {
                        expected: feature + 1,
                        actual: row.len(),
                    })?;
                    let go_left = if x.is_nan() { *default_left } else { x < *threshold };
                    idx = if go_left { *left } else { *right };
                }
                None => break,
            }
        }
        Err(ModelError::InvalidArtifact(format!("tree traversal escaped at node {}", idx)))
    }
}

impl BoostedTrees {
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.num_features == 0 {
            return Err(ModelError::InvalidArtifact("booster declares zero features".to_string()));
        }
        check_feature_names(self.feature_names.as_ref(), self.num_features)?;
        for (idx, tree) in self.trees.iter().enumerate() {
            tree.validate(self.num_features)
                .map_err(|reason| ModelError::InvalidArtifact(format!("tree {}: {}", idx, reason)))?;
        }
        Ok(())
    }

    fn margin(&self, row: &[f64]) -> Result<f64, ModelError> {
        check_width(row, self.num_features)?;
        self.trees
            .iter()
            .try_fold(self.base_margin, |acc, tree| Ok(acc + tree.leaf_value(row)?))
    }

    pub fn probability(&self, row: &[f64]) -> Result<f64, ModelError> {
        self.margin(row).map(sigmoid)
    }
}

impl ScoringModel for BoostedTrees {
    fn name(&self) -> &str {
        "gradient_boosting"
    }

    fn predict(&self, rows: &[Vec<f64>]) -> Result<Vec<f64>, ModelError> {
        rows.iter()
            .map(|row| self.probability(row).map(|p| if p > 0.5 { 1.0 } else { 0.0 }))
            .collect()
    }

    fn predict_proba(&self, rows: &[Vec<f64>]) -> Option<Result<Vec<Vec<f64>>, ModelError>> {
        Some(
            rows.iter()
                .map(|row| self.probability(row).map(|p| vec![1.0 - p, p]))
                .collect(),
        )
    }

    fn booster_feature_names(&self) -> Option<Result<Vec<String>, ModelError>> {
        Some(self.feature_names.clone().ok_or(ModelError::NoFeatureNames))
    }
}
