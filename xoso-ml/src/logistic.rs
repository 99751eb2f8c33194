use ndarray::{Array1, Array2, Axis};
use xoso_data::{DataError, Result};

use crate::config::TrainConfig;
use crate::linalg::cholesky_solve;

/// Binary logistic regression with an L2 penalty on the coefficients.
///
/// Minimizes `0.5 * |w|^2 + C * sum(log_loss_i)` with Newton's method and a
/// backtracking line search. The solver starts from zero and uses no
/// randomness, so the same data always yields the same model.
#[derive(Debug, Clone)]
pub struct LogisticRegression {
    pub coef: Array1<f64>,
    pub intercept: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitReport {
    pub n_iter: usize,
    pub converged: bool,
}

impl LogisticRegression {
    pub fn fit(x: &Array2<f64>, y: &Array1<f64>, config: &TrainConfig) -> Result<(Self, FitReport)> {
        let (n_samples, n_features) = x.dim();
        if n_samples == 0 {
            return Err(DataError::InsufficientData("no samples to fit".to_string()));
        }
        if y.len() != n_samples {
            return Err(DataError::InsufficientData(format!(
                "{} samples but {} targets",
                n_samples,
                y.len()
            )));
        }
        let positives = y.iter().filter(|&&v| v > 0.5).count();
        if positives == 0 || positives == n_samples {
            return Err(DataError::InsufficientData(
                "target needs samples of both classes".to_string(),
            ));
        }

        // last column carries the intercept
        let dim = n_features + 1;
        let z = Array2::from_shape_fn((n_samples, dim), |(i, j)| {
            if j < n_features { x[[i, j]] } else { 1.0 }
        });
        let penalty = Array1::from_shape_fn(dim, |j| if j < n_features { 1.0 } else { 0.0 });

        let mut beta = Array1::<f64>::zeros(dim);
        let mut loss = objective(&z, y, &beta, &penalty, config.c);
        let mut report = FitReport { n_iter: 0, converged: false };

        for iter in 0..config.max_iter {
            let p = z.dot(&beta).mapv(sigmoid);
            let residual = &p - y;
            let grad = z.t().dot(&residual) * config.c + &penalty * &beta;

            let max_grad = grad.iter().fold(0.0f64, |m, g| m.max(g.abs()));
            if max_grad <= config.tol {
                report = FitReport { n_iter: iter, converged: true };
                break;
            }

            let s = p.mapv(|v| v * (1.0 - v)).insert_axis(Axis(1));
            let mut hessian = z.t().dot(&(&z * &s)) * config.c;
            for j in 0..dim {
                hessian[[j, j]] += penalty[j];
            }
            let step = cholesky_solve(&hessian, &grad)?;

            // halve the step until the objective stops increasing
            let mut t = 1.0;
            let mut candidate = &beta - &(&step * t);
            let mut candidate_loss = objective(&z, y, &candidate, &penalty, config.c);
            while candidate_loss > loss && t > 1e-10 {
                t *= 0.5;
                candidate = &beta - &(&step * t);
                candidate_loss = objective(&z, y, &candidate, &penalty, config.c);
            }

            beta = candidate;
            loss = candidate_loss;
            report.n_iter = iter + 1;
        }

        if !report.converged {
            log::warn!(
                "Logistic solver did not converge in {} iterations (objective {:.6})",
                config.max_iter,
                loss
            );
        }
        log::debug!("Logistic fit: {} iterations, objective {:.6}", report.n_iter, loss);

        let model = Self {
            coef: beta.slice(ndarray::s![..n_features]).to_owned(),
            intercept: beta[n_features],
        };
        Ok((model, report))
    }

    /// Probability of the positive class for each row.
    pub fn predict_proba(&self, x: &Array2<f64>) -> Array1<f64> {
        (x.dot(&self.coef) + self.intercept).mapv(sigmoid)
    }
}

pub fn sigmoid(x: f64) -> f64 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}

/// log(1 + e^x) without overflow.
fn softplus(x: f64) -> f64 {
    x.max(0.0) + (-x.abs()).exp().ln_1p()
}

fn objective(z: &Array2<f64>, y: &Array1<f64>, beta: &Array1<f64>, penalty: &Array1<f64>, c: f64) -> f64 {
    let logits = z.dot(beta);
    let data_loss: f64 = logits
        .iter()
        .zip(y.iter())
        .map(|(&l, &t)| softplus(l) - t * l)
        .sum();
    let reg: f64 = beta.iter().zip(penalty.iter()).map(|(b, p)| p * b * b).sum();
    c * data_loss + 0.5 * reg
}
