use std::collections::BTreeMap;
use std::path::Path;

use ndarray::{Array1, Array2};
use xoso_data::dataset::{filter_game, load_records};
use xoso_data::models::{Record, WeightTable, GAME_XSMB, WEIGHT_BOUND};
use xoso_data::{DataError, Result};

use crate::config::TrainConfig;
use crate::metrics::{accuracy, log_loss};
use crate::pipeline::Pipeline;

/// In-sample diagnostics of the single fit.
#[derive(Debug, Clone)]
pub struct FitSummary {
    pub rows: usize,
    pub positives: usize,
    pub n_iter: usize,
    pub converged: bool,
    pub coef: f64,
    pub intercept: f64,
    pub log_loss: f64,
    pub accuracy: f64,
}

#[derive(Debug, Clone)]
pub struct Export {
    pub weights: WeightTable,
    pub summary: FitSummary,
}

/// Map a positive-class probability to a small blend weight around zero.
pub fn blend_weight(p: f64) -> f64 {
    (p - 0.5).clamp(-WEIGHT_BOUND, WEIGHT_BOUND)
}

/// Single-column matrix of cleaned `last_seen_days` and the 0/1 target vector.
pub fn feature_matrix(records: &[Record]) -> (Array2<f64>, Array1<f64>) {
    let x = Array2::from_shape_fn((records.len(), 1), |(i, _)| records[i].clean_last_seen());
    let y = Array1::from_iter(records.iter().map(|r| f64::from(r.target)));
    (x, y)
}

/// Index of the most recent row for each number.
///
/// Most recent means greatest `date`, then latest position in the input.
/// Rows without a date count as older than any dated row.
pub fn latest_per_number(records: &[Record]) -> BTreeMap<&str, usize> {
    let mut latest: BTreeMap<&str, usize> = BTreeMap::new();
    for (i, record) in records.iter().enumerate() {
        latest
            .entry(record.number.as_str())
            .and_modify(|best| {
                if record.date >= records[*best].date {
                    *best = i;
                }
            })
            .or_insert(i);
    }
    latest
}

/// Fit the pipeline on already-filtered rows and derive one weight per number.
pub fn compute_weights(records: &[Record], config: &TrainConfig) -> Result<Export> {
    if records.is_empty() {
        return Err(DataError::InsufficientData(format!(
            "no rows for game '{GAME_XSMB}'"
        )));
    }

    let (x, y) = feature_matrix(records);
    let pipe = Pipeline::fit(&x, &y, config)?;
    let proba = pipe.predict_proba(&x);

    let weights: WeightTable = latest_per_number(records)
        .into_iter()
        .map(|(number, idx)| (number.to_string(), blend_weight(proba[idx])))
        .collect();

    let summary = FitSummary {
        rows: records.len(),
        positives: records.iter().filter(|r| r.target == 1).count(),
        n_iter: pipe.report.n_iter,
        converged: pipe.report.converged,
        coef: pipe.model.coef[0],
        intercept: pipe.model.intercept,
        log_loss: log_loss(&y, &proba),
        accuracy: accuracy(&y, &proba),
    };
    log::info!(
        "Fitted on {} rows ({} positives): coef={:.4}, intercept={:.4}, log_loss={:.4}, accuracy={:.4}",
        summary.rows,
        summary.positives,
        summary.coef,
        summary.intercept,
        summary.log_loss,
        summary.accuracy
    );

    Ok(Export { weights, summary })
}

/// Pretty JSON, replacing the file. The parent directory must exist.
pub fn write_weights(path: &Path, weights: &WeightTable) -> Result<()> {
    let json = serde_json::to_string_pretty(weights).map_err(|e| DataError::write(path, e))?;
    std::fs::write(path, json).map_err(|e| DataError::write(path, e))?;
    log::info!("Saved {} weights to {}", weights.len(), path.display());
    Ok(())
}

pub fn load_weights(path: &Path) -> Result<WeightTable> {
    let json = std::fs::read_to_string(path).map_err(|e| DataError::load(path, e))?;
    serde_json::from_str(&json).map_err(|e| DataError::load(path, e))
}

/// Load `input`, train on its XSMB rows and write the weight table to `output`.
pub fn run(input: &Path, output: &Path, config: &TrainConfig) -> Result<Export> {
    let records = filter_game(load_records(input)?, GAME_XSMB);
    let export = compute_weights(&records, config)?;
    write_weights(output, &export.weights)?;
    Ok(export)
}
