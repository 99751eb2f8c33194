use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};

use xoso_data::models::WeightTable;
use xoso_ml::export::FitSummary;

pub fn display_fit_summary(summary: &FitSummary) {
    println!("\n== Logistic fit (in-sample) ==\n");

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Metric", "Value"]);

    let converged = if summary.converged {
        Cell::new("yes").fg(Color::Green)
    } else {
        Cell::new("no").fg(Color::Red)
    };

    table.add_row(vec![Cell::new("Rows"), Cell::new(summary.rows)]);
    table.add_row(vec![Cell::new("Positives"), Cell::new(summary.positives)]);
    table.add_row(vec![Cell::new("Iterations"), Cell::new(summary.n_iter)]);
    table.add_row(vec![Cell::new("Converged"), converged]);
    table.add_row(vec![Cell::new("Coef (last_seen_days)"), Cell::new(format!("{:.4}", summary.coef))]);
    table.add_row(vec![Cell::new("Intercept"), Cell::new(format!("{:.4}", summary.intercept))]);
    table.add_row(vec![Cell::new("Log-loss"), Cell::new(format!("{:.4}", summary.log_loss))]);
    table.add_row(vec![Cell::new("Accuracy"), Cell::new(format!("{:.4}", summary.accuracy))]);

    println!("{table}\n");
}

pub fn display_weights(weights: &WeightTable) {
    println!("\n== Blend weights xsmb ({} numbers) ==\n", weights.len());

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["#", "Number", "Weight"]);

    for (i, (number, weight)) in weights.ranked().into_iter().enumerate() {
        let color = if weight > 0.0 {
            Color::Green
        } else if weight < 0.0 {
            Color::Red
        } else {
            Color::White
        };
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(number),
            Cell::new(format!("{:+.4}", weight)).fg(color),
        ]);
    }
    println!("{table}");
}
