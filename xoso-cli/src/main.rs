mod display;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use xoso_data::dataset::write_records;
use xoso_data::history::{build_dataset, load_history};
use xoso_ml::config::TrainConfig;
use xoso_ml::export::{load_weights, run};

use crate::display::{display_fit_summary, display_weights};

const DEFAULT_DATASET: &str = "data/dataset_ml.csv";
const DEFAULT_WEIGHTS: &str = "data/ml_weights.json";
const DEFAULT_HISTORY: &str = "data/hist/xsmb.json";

#[derive(Parser)]
#[command(name = "xoso", about = "XSMB blend-weight trainer")]
struct Cli {
    /// Defaults to `train` with the standard data paths
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Fit the logistic model and export per-number blend weights
    Train {
        /// Long-format dataset
        #[arg(short, long, default_value = DEFAULT_DATASET)]
        input: PathBuf,

        /// Weight file to overwrite
        #[arg(short, long, default_value = DEFAULT_WEIGHTS)]
        output: PathBuf,

        /// Optional JSON solver configuration
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Build the training dataset from the XSMB draw history
    Dataset {
        /// Draw history JSON
        #[arg(long, default_value = DEFAULT_HISTORY)]
        history: PathBuf,

        /// Dataset CSV to overwrite
        #[arg(short, long, default_value = DEFAULT_DATASET)]
        output: PathBuf,
    },

    /// Show an exported weight file
    Weights {
        #[arg(short, long, default_value = DEFAULT_WEIGHTS)]
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        None => cmd_train(Path::new(DEFAULT_DATASET), Path::new(DEFAULT_WEIGHTS), None),
        Some(Command::Train { input, output, config }) => cmd_train(&input, &output, config.as_deref()),
        Some(Command::Dataset { history, output }) => cmd_dataset(&history, &output),
        Some(Command::Weights { file }) => cmd_weights(&file),
    }
}

fn cmd_train(input: &Path, output: &Path, config_path: Option<&Path>) -> Result<()> {
    let config = match config_path {
        Some(path) => TrainConfig::load(path)?,
        None => TrainConfig::default(),
    };
    log::debug!("Solver configuration: {:?}", config);

    let export = run(input, output, &config)
        .with_context(|| format!("Training on {} failed", input.display()))?;

    display_fit_summary(&export.summary);
    println!("Wrote {} with {} entries", output.display(), export.weights.len());
    Ok(())
}

fn cmd_dataset(history: &Path, output: &Path) -> Result<()> {
    let days = load_history(history)?;
    let rows = build_dataset(&days);
    write_records(output, &rows)
        .with_context(|| format!("Could not write dataset to {}", output.display()))?;
    println!("Wrote {} with {} rows", output.display(), rows.len());
    Ok(())
}

fn cmd_weights(file: &Path) -> Result<()> {
    let weights = load_weights(file)?;
    if weights.is_empty() {
        println!("No weights in {}", file.display());
        return Ok(());
    }
    display_weights(&weights);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_arguments_means_train() {
        let cli = Cli::try_parse_from(["xoso"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_train_defaults() {
        let cli = Cli::try_parse_from(["xoso", "train"]).unwrap();
        match cli.command {
            Some(Command::Train { input, output, config }) => {
                assert_eq!(input, PathBuf::from(DEFAULT_DATASET));
                assert_eq!(output, PathBuf::from(DEFAULT_WEIGHTS));
                assert!(config.is_none());
            }
            _ => panic!("expected train"),
        }
    }

    #[test]
    fn test_dataset_then_train() {
        let dir = tempfile::tempdir().unwrap();
        let history = dir.path().join("xsmb.json");
        let dataset = dir.path().join("dataset_ml.csv");
        let weights = dir.path().join("ml_weights.json");
        std::fs::write(
            &history,
            r#"[
                {"date": "2024-01-01", "twos": ["07", "42", "13"]},
                {"date": "2024-01-02", "twos": ["07", "55"]},
                {"date": "2024-01-03", "twos": ["42", "99", "00"]}
            ]"#,
        )
        .unwrap();

        cmd_dataset(&history, &dataset).unwrap();
        cmd_train(&dataset, &weights, None).unwrap();
        cmd_weights(&weights).unwrap();

        let table = load_weights(&weights).unwrap();
        assert_eq!(table.len(), 100);
    }

    #[test]
    fn test_train_bad_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("train.json");
        std::fs::write(&config, "not json").unwrap();
        let result = cmd_train(
            &dir.path().join("dataset_ml.csv"),
            &dir.path().join("ml_weights.json"),
            Some(config.as_path()),
        );
        assert!(result.is_err());
    }
}
