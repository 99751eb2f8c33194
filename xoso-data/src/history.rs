use std::collections::{HashMap, HashSet};
use std::path::Path;

use chrono::NaiveDate;

use crate::error::{DataError, Result};
use crate::models::{normalize_number, DrawDay, Record, GAME_XSMB, XSMB_POOL_SIZE};

pub fn load_history(path: &Path) -> Result<Vec<DrawDay>> {
    let json = std::fs::read_to_string(path).map_err(|e| DataError::load(path, e))?;
    let days: Vec<DrawDay> = serde_json::from_str(&json).map_err(|e| DataError::load(path, e))?;
    log::info!("Loaded {} draw days from {}", days.len(), path.display());
    Ok(days)
}

/// Expand the draw history into one row per (day, number 00..99).
///
/// Days are deduplicated by date (first occurrence wins) and processed oldest
/// first. `last_seen_days` counts whole days since the number's previous
/// appearance, floored at 1, and is absent until the number has appeared once.
pub fn build_dataset(days: &[DrawDay]) -> Vec<Record> {
    let mut seen_dates = HashSet::new();
    let mut unique: Vec<&DrawDay> = days.iter().filter(|d| seen_dates.insert(d.date)).collect();
    unique.sort_by_key(|d| d.date);

    let mut last_seen: HashMap<String, NaiveDate> = HashMap::new();
    let mut rows = Vec::with_capacity(unique.len() * XSMB_POOL_SIZE);

    for day in unique {
        let drawn: HashSet<String> = day.twos.iter().map(|s| normalize_number(s)).collect();

        for n in 0..XSMB_POOL_SIZE {
            let number = format!("{:02}", n);
            let target = u8::from(drawn.contains(&number));
            let last_seen_days = last_seen
                .get(&number)
                .map(|&prev| ((day.date - prev).num_days() as f64).max(1.0));
            rows.push(Record {
                game: GAME_XSMB.to_string(),
                date: Some(day.date),
                number,
                target,
                last_seen_days,
            });
        }

        for number in drawn {
            last_seen.insert(number, day.date);
        }
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(date: &str, twos: &[&str]) -> DrawDay {
        DrawDay {
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            twos: twos.iter().map(|s| s.to_string()).collect(),
            source: None,
        }
    }

    fn row<'a>(rows: &'a [Record], date: &str, number: &str) -> &'a Record {
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap();
        rows.iter()
            .find(|r| r.date == Some(date) && r.number == number)
            .unwrap()
    }

    #[test]
    fn test_hundred_rows_per_day() {
        let rows = build_dataset(&[day("2024-01-01", &["07"]), day("2024-01-02", &["42"])]);
        assert_eq!(rows.len(), 200);
        assert!(rows.iter().all(|r| r.game == GAME_XSMB));
        assert_eq!(rows[0].number, "00");
        assert_eq!(rows[99].number, "99");
    }

    #[test]
    fn test_targets_and_last_seen() {
        let rows = build_dataset(&[
            day("2024-01-01", &["07", "42"]),
            day("2024-01-04", &["07"]),
            day("2024-01-05", &["13"]),
        ]);

        let first = row(&rows, "2024-01-01", "07");
        assert_eq!(first.target, 1);
        assert_eq!(first.last_seen_days, None);

        let second = row(&rows, "2024-01-04", "07");
        assert_eq!(second.target, 1);
        assert_eq!(second.last_seen_days, Some(3.0));

        assert_eq!(row(&rows, "2024-01-05", "07").last_seen_days, Some(1.0));
        assert_eq!(row(&rows, "2024-01-05", "42").last_seen_days, Some(4.0));
        assert_eq!(row(&rows, "2024-01-05", "42").target, 0);
        assert_eq!(row(&rows, "2024-01-05", "13").last_seen_days, None);
    }

    #[test]
    fn test_unsorted_and_duplicate_days() {
        let rows = build_dataset(&[
            day("2024-01-03", &["05"]),
            day("2024-01-01", &["05"]),
            day("2024-01-03", &["99"]),
        ]);
        assert_eq!(rows.len(), 200);
        assert_eq!(rows[0].date, NaiveDate::from_ymd_opt(2024, 1, 1));
        // the second 2024-01-03 entry is dropped
        assert_eq!(row(&rows, "2024-01-03", "99").target, 0);
        assert_eq!(row(&rows, "2024-01-03", "05").last_seen_days, Some(2.0));
    }

    #[test]
    fn test_load_history_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("xsmb.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(matches!(load_history(&path).unwrap_err(), DataError::DataLoad { .. }));
    }

    #[test]
    fn test_load_history() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("xsmb.json");
        std::fs::write(
            &path,
            r#"[{"date": "2024-01-01", "twos": ["07"], "source": "csv"}, {"date": "2024-01-02", "twos": []}]"#,
        )
        .unwrap();
        let days = load_history(&path).unwrap();
        assert_eq!(days.len(), 2);
        assert_eq!(days[0].source.as_deref(), Some("csv"));
    }
}
