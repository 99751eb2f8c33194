use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The only game the exporter trains on.
pub const GAME_XSMB: &str = "xsmb";

/// XSMB numbers are the two-digit endings 00..99.
pub const XSMB_POOL_SIZE: usize = 100;

/// Value used for a number that has never been seen.
pub const LAST_SEEN_FILL: f64 = 999.0;
pub const LAST_SEEN_MAX: f64 = 999.0;

/// Blend weights live in [-WEIGHT_BOUND, WEIGHT_BOUND].
pub const WEIGHT_BOUND: f64 = 0.2;

/// One row of the long-format training dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub game: String,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    pub number: String,
    pub target: u8,
    pub last_seen_days: Option<f64>,
}

impl Record {
    pub fn is_game(&self, game: &str) -> bool {
        self.game == game
    }

    /// `last_seen_days` with the fill value applied and clamped to [0, LAST_SEEN_MAX].
    pub fn clean_last_seen(&self) -> f64 {
        clean_last_seen(self.last_seen_days)
    }
}

pub fn clean_last_seen(raw: Option<f64>) -> f64 {
    let value = match raw {
        Some(v) if !v.is_nan() => v,
        _ => LAST_SEEN_FILL,
    };
    value.clamp(0.0, LAST_SEEN_MAX)
}

/// `7` and `07` name the same XSMB number. Non-numeric identifiers are kept as-is.
pub fn normalize_number(raw: &str) -> String {
    let s = raw.trim();
    if !s.is_empty() && s.len() < 2 && s.bytes().all(|b| b.is_ascii_digit()) {
        format!("{:0>2}", s)
    } else {
        s.to_string()
    }
}

/// One XSMB draw day as stored in the history file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawDay {
    pub date: NaiveDate,
    #[serde(default)]
    pub twos: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// Exported blend weights: `{"xsmb": {"<number>": weight}}`.
///
/// Keys are kept sorted so that two exports of the same data are byte-identical.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WeightTable {
    pub xsmb: BTreeMap<String, f64>,
}

impl WeightTable {
    pub fn len(&self) -> usize {
        self.xsmb.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xsmb.is_empty()
    }

    pub fn get(&self, number: &str) -> Option<f64> {
        self.xsmb.get(number).copied()
    }

    /// Entries sorted by weight, highest first.
    pub fn ranked(&self) -> Vec<(&str, f64)> {
        let mut entries: Vec<(&str, f64)> = self.xsmb.iter().map(|(k, &v)| (k.as_str(), v)).collect();
        entries.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        entries
    }
}

impl FromIterator<(String, f64)> for WeightTable {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self {
            xsmb: iter.into_iter().collect(),
        }
    }
}
