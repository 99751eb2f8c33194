use ndarray::{Array1, Array2, Axis};
use xoso_data::{DataError, Result};

/// Z-score standardization with population statistics of the training set.
#[derive(Debug, Clone)]
pub struct StandardScaler {
    pub means: Array1<f64>,
    pub scales: Array1<f64>,
}

impl StandardScaler {
    pub fn fit(x: &Array2<f64>) -> Result<Self> {
        let n_samples = x.nrows();
        let means = x
            .mean_axis(Axis(0))
            .ok_or_else(|| DataError::InsufficientData("cannot scale an empty matrix".to_string()))?;

        let vars: Array1<f64> = x
            .axis_iter(Axis(0))
            .fold(Array1::zeros(x.ncols()), |acc, row| {
                let diff = &row - &means;
                acc + &diff.mapv(|v| v * v)
            })
            / n_samples as f64;

        // constant columns are centred but left unscaled
        let scales = vars.mapv(|v| {
            let s = v.sqrt();
            if s > f64::EPSILON { s } else { 1.0 }
        });

        Ok(Self { means, scales })
    }

    pub fn transform(&self, x: &Array2<f64>) -> Array2<f64> {
        let mut out = x.clone();
        for mut row in out.rows_mut() {
            for j in 0..row.len() {
                row[j] = (row[j] - self.means[j]) / self.scales[j];
            }
        }
        out
    }
}
