use ndarray::Array1;

/// Mean binary cross-entropy. Probabilities are clipped to avoid ln(0).
pub fn log_loss(y: &Array1<f64>, proba: &Array1<f64>) -> f64 {
    if y.is_empty() {
        return 0.0;
    }
    let eps = 1e-15;
    let total: f64 = y
        .iter()
        .zip(proba.iter())
        .map(|(&t, &p)| {
            let p = p.clamp(eps, 1.0 - eps);
            -(t * p.ln() + (1.0 - t) * (1.0 - p).ln())
        })
        .sum();
    total / y.len() as f64
}

/// Fraction of rows where `p >= 0.5` matches the label.
pub fn accuracy(y: &Array1<f64>, proba: &Array1<f64>) -> f64 {
    if y.is_empty() {
        return 0.0;
    }
    let hits = y
        .iter()
        .zip(proba.iter())
        .filter(|&(&t, &p)| (p >= 0.5) == (t > 0.5))
        .count();
    hits as f64 / y.len() as f64
}
