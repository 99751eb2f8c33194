use std::path::Path;

use serde::{Deserialize, Serialize};
use xoso_data::{DataError, Result};

/// Solver settings for the logistic stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainConfig {
    /// Newton iteration cap.
    pub max_iter: usize,
    /// Inverse L2 strength; the intercept is never penalized.
    pub c: f64,
    /// Stop once every gradient component is within this bound.
    pub tol: f64,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            max_iter: 1000,
            c: 1.0,
            tol: 1e-4,
        }
    }
}

impl TrainConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| DataError::load(path, e))?;
        let config: TrainConfig = serde_json::from_str(&json).map_err(|e| DataError::load(path, e))?;
        if config.max_iter == 0 || !(config.c > 0.0) || !(config.tol > 0.0) {
            return Err(DataError::load(
                path,
                "max_iter, c and tol must all be positive",
            ));
        }
        Ok(config)
    }
}
