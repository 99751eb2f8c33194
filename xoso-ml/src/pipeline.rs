use ndarray::{Array1, Array2};
use xoso_data::Result;

use crate::config::TrainConfig;
use crate::logistic::{FitReport, LogisticRegression};
use crate::scaler::StandardScaler;

/// Standardize, then logistic regression.
#[derive(Debug, Clone)]
pub struct Pipeline {
    pub scaler: StandardScaler,
    pub model: LogisticRegression,
    pub report: FitReport,
}

impl Pipeline {
    pub fn fit(x: &Array2<f64>, y: &Array1<f64>, config: &TrainConfig) -> Result<Self> {
        let scaler = StandardScaler::fit(x)?;
        let x_std = scaler.transform(x);
        let (model, report) = LogisticRegression::fit(&x_std, y, config)?;
        Ok(Self { scaler, model, report })
    }

    pub fn predict_proba(&self, x: &Array2<f64>) -> Array1<f64> {
        self.model.predict_proba(&self.scaler.transform(x))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_pipeline_is_scale_invariant() {
        let y = array![1.0, 0.0, 1.0, 0.0, 0.0];
        let x = array![[1.0], [30.0], [4.0], [12.0], [999.0]];
        let x_scaled = x.mapv(|v| v * 10.0 + 3.0);

        let config = TrainConfig::default();
        let a = Pipeline::fit(&x, &y, &config).unwrap().predict_proba(&x);
        let b = Pipeline::fit(&x_scaled, &y, &config)
            .unwrap()
            .predict_proba(&x_scaled);
        for (pa, pb) in a.iter().zip(b.iter()) {
            assert!((pa - pb).abs() < 1e-9, "{pa} vs {pb}");
        }
    }

    #[test]
    fn test_recent_numbers_score_higher() {
        // short gaps are the positives
        let x = array![[1.0], [2.0], [3.0], [50.0], [80.0], [999.0], [2.0], [70.0]];
        let y = array![1.0, 1.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0];
        let pipe = Pipeline::fit(&x, &y, &TrainConfig::default()).unwrap();
        assert!(pipe.model.coef[0] < 0.0);
        let p = pipe.predict_proba(&array![[1.0], [999.0]]);
        assert!(p[0] > p[1]);
    }
}
