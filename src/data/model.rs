use std::fmt;

use log::warn;
use serde::{Deserialize, Serialize};

pub const SERIES_CODE: &str = "Series Code";
pub const COUNTRY_NAME: &str = "Country Name";

/// Cell texts that mean "no observation".  `..` is the World Bank DataBank
/// placeholder.
const MISSING_MARKERS: [&str; 3] = ["", "..", "nan"];

// ---------------------------------------------------------------------------
// WideRow – one (series, country) row of the source table
// ---------------------------------------------------------------------------

/// A single row of the wide table, projected to the columns we care about.
#[derive(Debug, Clone, PartialEq)]
pub struct WideRow {
    /// Zero-based data row number in the source file (for error messages).
    pub line: usize,
    pub series_code: String,
    pub country: String,
    /// Raw cell text per year column, aligned with [`WideTable::year_columns`].
    pub cells: Vec<String>,
}

// ---------------------------------------------------------------------------
// WideTable – the projected dataset
// ---------------------------------------------------------------------------

/// The wide-format dataset: countries as rows, years as columns.
#[derive(Debug, Clone, PartialEq)]
pub struct WideTable {
    /// Year column names in left-to-right order.
    pub year_columns: Vec<String>,
    pub rows: Vec<WideRow>,
}

impl WideTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Observation – one row of the tidy table
// ---------------------------------------------------------------------------

/// One country-year observation. `value` is `None` where the source cell
/// held no data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub country: String,
    pub year: i32,
    pub value: Option<f64>,
}

impl fmt::Display for Observation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value {
            Some(v) => write!(f, "{} {}: {v}", self.country, self.year),
            None => write!(f, "{} {}: <missing>", self.country, self.year),
        }
    }
}

/// Interpret a raw cell as a number.  Missing markers and anything that
/// does not parse become `None`; the latter is logged with its position.
pub fn parse_cell(raw: &str, line: usize, column: &str) -> Option<f64> {
    let s = raw.trim();
    if MISSING_MARKERS.iter().any(|m| s.eq_ignore_ascii_case(m)) {
        return None;
    }
    match s.parse::<f64>() {
        Ok(v) => Some(v),
        Err(_) => {
            warn!("row {line}, column '{column}': '{raw}' is not a number, treated as missing");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_parse() {
        assert_eq!(parse_cell("100", 0, "2005"), Some(100.0));
        assert_eq!(parse_cell(" 1.5e3 ", 0, "2005"), Some(1500.0));
    }

    #[test]
    fn missing_markers_become_none() {
        for raw in ["", "..", "NaN", "nan", "  "] {
            assert_eq!(parse_cell(raw, 0, "2005"), None, "{raw:?}");
        }
    }

    #[test]
    fn unparseable_cell_is_missing() {
        assert_eq!(parse_cell("n/a", 7, "2012"), None);
        assert_eq!(parse_cell("12,5", 7, "2012"), None);
    }

    #[test]
    fn observation_display() {
        let obs = Observation {
            country: "Canada".into(),
            year: 2005,
            value: None,
        };
        assert_eq!(obs.to_string(), "Canada 2005: <missing>");
    }
}
