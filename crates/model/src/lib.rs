//! Pre-trained regression model: load once, predict many times.
//!
//! The model is immutable after loading and shared read-only by every
//! request handler, so `Model` is `Send + Sync` and predictions take `&self`.

pub mod artifact;
mod error;

use std::path::Path;

use visibot_io::{Table, Value};

pub use artifact::{Artifact, Estimator, Node, Tree, FORMAT_V1};
pub use error::{ModelError, PredictError};

/// Anything that maps a table to one number per row.
pub trait Regressor: Send + Sync {
    /// Input columns the regressor expects.
    fn features(&self) -> &[String];

    /// Predict one value per table row, in row order.
    fn predict(&self, table: &Table) -> Result<Vec<f64>, PredictError>;
}

/// A validated model artifact.
#[derive(Debug, Clone)]
pub struct Model {
    artifact: Artifact,
}

impl Model {
    /// Load and validate a model artifact from disk.
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        let contents = std::fs::read_to_string(path).map_err(|e| ModelError::Missing {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let model = Self::from_json(&contents)?;

        log::info!(
            "Loaded model from {} ({} features, {} tree(s))",
            path.display(),
            model.artifact.features.len(),
            model.artifact.tree_count()
        );
        Ok(model)
    }

    pub fn from_json(json: &str) -> Result<Self, ModelError> {
        let artifact: Artifact =
            serde_json::from_str(json).map_err(|e| ModelError::Parse(e.to_string()))?;
        Self::from_artifact(artifact)
    }

    pub fn from_artifact(artifact: Artifact) -> Result<Self, ModelError> {
        artifact.validate()?;
        Ok(Self { artifact })
    }

    /// Map each feature to its column in `table`, rejecting any difference
    /// between the two column sets. Column order does not matter.
    fn column_map(&self, table: &Table) -> Result<Vec<usize>, PredictError> {
        let features = &self.artifact.features;
        let mut map = Vec::with_capacity(features.len());
        let mut missing = Vec::new();
        for name in features {
            match table.column_index(name) {
                Some(col) => map.push(col),
                None => missing.push(name.clone()),
            }
        }
        let unexpected: Vec<String> = table
            .headers()
            .iter()
            .filter(|h| !features.contains(*h))
            .cloned()
            .collect();

        if !missing.is_empty() || !unexpected.is_empty() {
            return Err(PredictError::Columns { missing, unexpected });
        }
        Ok(map)
    }
}

impl Regressor for Model {
    fn features(&self) -> &[String] {
        &self.artifact.features
    }

    fn predict(&self, table: &Table) -> Result<Vec<f64>, PredictError> {
        let map = self.column_map(table)?;
        let mut x = vec![0.0; map.len()];
        let mut out = Vec::with_capacity(table.row_count());

        for (row_idx, row) in table.rows().iter().enumerate() {
            for (slot, &col) in x.iter_mut().zip(&map) {
                *slot = match &row[col] {
                    Value::Number(n) if n.is_finite() => *n,
                    other => {
                        return Err(PredictError::NotNumeric {
                            row: row_idx,
                            column: table.headers()[col].clone(),
                            value: other.to_string(),
                        })
                    }
                };
            }
            out.push(self.artifact.estimator.evaluate(&x));
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MODEL_JSON: &str = r#"{
        "format": "visibot-model/v1",
        "target": "visibility_km",
        "features": ["T", "fog"],
        "estimator": {
            "kind": "gradient_boosting",
            "init": 10.0,
            "learning_rate": 1.0,
            "trees": [{ "nodes": [
                { "feature": 1, "threshold": 0.5, "left": 1, "right": 2 },
                { "value": 0.0 },
                { "value": -9.5 }
            ]}]
        }
    }"#;

    fn table(csv: &str) -> Table {
        visibot_io::csv::parse(csv.as_bytes()).unwrap()
    }

    #[test]
    fn test_predict_one_value_per_row() {
        let model = Model::from_json(MODEL_JSON).unwrap();
        let out = model.predict(&table("T,fog\n5,0\n-2,1\n7,0\n")).unwrap();
        assert_eq!(out, vec![10.0, 0.5, 10.0]);
    }

    #[test]
    fn test_column_order_does_not_matter() {
        let model = Model::from_json(MODEL_JSON).unwrap();
        let out = model.predict(&table("fog,T\n1,5\n")).unwrap();
        assert_eq!(out, vec![0.5]);
    }

    #[test]
    fn test_missing_and_unexpected_columns() {
        let model = Model::from_json(MODEL_JSON).unwrap();
        let err = model.predict(&table("T,wind\n1,2\n")).unwrap_err();
        assert_eq!(
            err,
            PredictError::Columns { missing: vec!["fog".into()], unexpected: vec!["wind".into()] }
        );
    }

    #[test]
    fn test_text_cell_rejected() {
        let model = Model::from_json(MODEL_JSON).unwrap();
        let err = model.predict(&table("T,fog\n5,yes\n")).unwrap_err();
        assert_eq!(
            err,
            PredictError::NotNumeric { row: 0, column: "fog".into(), value: "yes".into() }
        );
    }

    #[test]
    fn test_empty_cell_rejected() {
        let model = Model::from_json(MODEL_JSON).unwrap();
        let err = model.predict(&table("T,fog\n,0\n")).unwrap_err();
        assert!(matches!(err, PredictError::NotNumeric { row: 0, .. }));
    }

    #[test]
    fn test_nan_cell_rejected() {
        let model = Model::from_json(MODEL_JSON).unwrap();
        assert!(model.predict(&table("T,fog\nNaN,0\n")).is_err());
    }

    #[test]
    fn test_bad_json_is_parse_error() {
        assert!(matches!(Model::from_json("{"), Err(ModelError::Parse(_))));
    }

    #[test]
    fn test_load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        std::fs::write(&path, MODEL_JSON).unwrap();

        let model = Model::load(&path).unwrap();
        assert_eq!(model.features(), ["T".to_string(), "fog".to_string()]);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Model::load(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, ModelError::Missing { .. }), "{err:?}");
    }

    #[test]
    fn test_model_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Model>();
    }
}
