//! On-disk model format.
//!
//! A model is a JSON document naming its input features and an estimator.
//! Estimators are regression trees, alone or boosted:
//!
//! ```json
//! {
//!   "format": "visibot-model/v1",
//!   "target": "visibility_km",
//!   "features": ["T", "Po", "U"],
//!   "estimator": {
//!     "kind": "gradient_boosting",
//!     "init": 8.4,
//!     "learning_rate": 0.1,
//!     "trees": [{ "nodes": [
//!       { "feature": 2, "threshold": 90.0, "left": 1, "right": 2 },
//!       { "value": 1.5 },
//!       { "value": -4.0 }
//!     ]}]
//!   }
//! }
//! ```
//!
//! Node 0 is the root. A split sends a sample left when
//! `x[feature] <= threshold`, right otherwise.

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

pub const FORMAT_V1: &str = "visibot-model/v1";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artifact {
    pub format: String,
    /// Name of the predicted quantity (display only).
    #[serde(default)]
    pub target: Option<String>,
    /// Input column names, in the order the estimator indexes them.
    pub features: Vec<String>,
    pub estimator: Estimator,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Estimator {
    GradientBoosting {
        init: f64,
        learning_rate: f64,
        trees: Vec<Tree>,
    },
    DecisionTree {
        tree: Tree,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tree {
    pub nodes: Vec<Node>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Node {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: f64,
    },
}

impl Artifact {
    /// Structural checks that make evaluation total: every split points at a
    /// known feature and at children with a strictly larger index.
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.format != FORMAT_V1 {
            return Err(ModelError::Invalid(format!(
                "unsupported format '{}' (expected '{}')",
                self.format, FORMAT_V1
            )));
        }
        if self.features.is_empty() {
            return Err(ModelError::Invalid("feature list is empty".into()));
        }
        for (idx, name) in self.features.iter().enumerate() {
            if name.trim().is_empty() {
                return Err(ModelError::Invalid(format!("feature {} has a blank name", idx)));
            }
            if self.features[..idx].contains(name) {
                return Err(ModelError::Invalid(format!("duplicate feature '{}'", name)));
            }
        }

        match &self.estimator {
            Estimator::GradientBoosting { init, learning_rate, trees } => {
                if !init.is_finite() || !learning_rate.is_finite() {
                    return Err(ModelError::Invalid("init and learning_rate must be finite".into()));
                }
                if trees.is_empty() {
                    return Err(ModelError::Invalid("ensemble has no trees".into()));
                }
                for (t, tree) in trees.iter().enumerate() {
                    tree.validate(self.features.len())
                        .map_err(|msg| ModelError::Invalid(format!("tree {}: {}", t, msg)))?;
                }
            }
            Estimator::DecisionTree { tree } => {
                tree.validate(self.features.len()).map_err(ModelError::Invalid)?;
            }
        }
        Ok(())
    }

    pub fn tree_count(&self) -> usize {
        match &self.estimator {
            Estimator::GradientBoosting { trees, .. } => trees.len(),
            Estimator::DecisionTree { .. } => 1,
        }
    }
}

impl Estimator {
    /// Evaluate one sample. `x` is ordered like the artifact's feature list.
    pub(crate) fn evaluate(&self, x: &[f64]) -> f64 {
        match self {
            Estimator::GradientBoosting { init, learning_rate, trees } => {
                init + learning_rate * trees.iter().map(|t| t.evaluate(x)).sum::<f64>()
            }
            Estimator::DecisionTree { tree } => tree.evaluate(x),
        }
    }
}

impl Tree {
    fn validate(&self, n_features: usize) -> Result<(), String> {
        if self.nodes.is_empty() {
            return Err("tree has no nodes".into());
        }
        let n_nodes = self.nodes.len();
        for (idx, node) in self.nodes.iter().enumerate() {
            match *node {
                Node::Split { feature, threshold, left, right } => {
                    if feature >= n_features {
                        return Err(format!("node {idx}: feature {feature} out of range"));
                    }
                    if !threshold.is_finite() {
                        return Err(format!("node {idx}: threshold is not finite"));
                    }
                    for child in [left, right] {
                        if child <= idx || child >= n_nodes {
                            return Err(format!("node {idx}: bad child index {child}"));
                        }
                    }
                }
                Node::Leaf { value } => {
                    if !value.is_finite() {
                        return Err(format!("node {idx}: leaf value is not finite"));
                    }
                }
            }
        }
        Ok(())
    }

    // Terminates because validate() requires children to have larger indices.
    fn evaluate(&self, x: &[f64]) -> f64 {
        let mut idx = 0;
        loop {
            match self.nodes[idx] {
                Node::Split { feature, threshold, left, right } => {
                    idx = if x[feature] <= threshold { left } else { right };
                }
                Node::Leaf { value } => return value,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stump() -> Tree {
        Tree {
            nodes: vec![
                Node::Split { feature: 0, threshold: 0.5, left: 1, right: 2 },
                Node::Leaf { value: 10.0 },
                Node::Leaf { value: 2.0 },
            ],
        }
    }

    fn artifact(estimator: Estimator) -> Artifact {
        Artifact {
            format: FORMAT_V1.into(),
            target: None,
            features: vec!["fog".into()],
            estimator,
        }
    }

    #[test]
    fn test_node_json_shapes() {
        let json = r#"{"nodes":[{"feature":0,"threshold":0.5,"left":1,"right":2},{"value":10.0},{"value":2.0}]}"#;
        let tree: Tree = serde_json::from_str(json).unwrap();
        assert!(matches!(tree.nodes[0], Node::Split { feature: 0, left: 1, right: 2, .. }));
        assert!(matches!(tree.nodes[2], Node::Leaf { value } if value == 2.0));
    }

    #[test]
    fn test_split_goes_left_on_equal() {
        let tree = stump();
        assert_eq!(tree.evaluate(&[0.5]), 10.0);
        assert_eq!(tree.evaluate(&[0.0]), 10.0);
        assert_eq!(tree.evaluate(&[1.0]), 2.0);
    }

    #[test]
    fn test_boosted_sum() {
        let est = Estimator::GradientBoosting {
            init: 5.0,
            learning_rate: 0.5,
            trees: vec![stump(), stump()],
        };
        // 5 + 0.5 * (10 + 10)
        assert_eq!(est.evaluate(&[0.0]), 15.0);
        // 5 + 0.5 * (2 + 2)
        assert_eq!(est.evaluate(&[1.0]), 7.0);
    }

    #[test]
    fn test_validate_accepts_well_formed() {
        artifact(Estimator::DecisionTree { tree: stump() }).validate().unwrap();
    }

    #[test]
    fn test_validate_rejects_unknown_format() {
        let mut a = artifact(Estimator::DecisionTree { tree: stump() });
        a.format = "pickle".into();
        assert!(matches!(a.validate(), Err(ModelError::Invalid(_))));
    }

    #[test]
    fn test_validate_rejects_backward_child() {
        let tree = Tree {
            nodes: vec![
                Node::Split { feature: 0, threshold: 0.5, left: 0, right: 1 },
                Node::Leaf { value: 1.0 },
            ],
        };
        let err = artifact(Estimator::DecisionTree { tree }).validate().unwrap_err();
        assert!(err.to_string().contains("bad child index 0"), "{err}");
    }

    #[test]
    fn test_validate_rejects_feature_out_of_range() {
        let tree = Tree {
            nodes: vec![
                Node::Split { feature: 3, threshold: 0.5, left: 1, right: 2 },
                Node::Leaf { value: 1.0 },
                Node::Leaf { value: 2.0 },
            ],
        };
        let err = artifact(Estimator::DecisionTree { tree }).validate().unwrap_err();
        assert!(err.to_string().contains("feature 3 out of range"), "{err}");
    }

    #[test]
    fn test_validate_rejects_empty_ensemble() {
        let a = artifact(Estimator::GradientBoosting { init: 0.0, learning_rate: 0.1, trees: vec![] });
        assert!(a.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_duplicate_features() {
        let mut a = artifact(Estimator::DecisionTree { tree: stump() });
        a.features = vec!["fog".into(), "fog".into()];
        assert!(a.validate().unwrap_err().to_string().contains("duplicate feature"));
    }
}
