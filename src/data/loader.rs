use std::path::Path;

use log::debug;
use serde_json::Value as JsonValue;

use super::model::{COUNTRY_NAME, SERIES_CODE, WideRow, WideTable};
use crate::error::{CleanError, Result};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a wide indicator table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`  – header row with `Series Code`, `Country Name` and one column per year
/// * `.json` – `[{ "Series Code": "...", "Country Name": "...", "2005": 1.0, ... }, ...]`
///
/// The table is projected to `Series Code`, `Country Name` and `year_columns`;
/// every other column is dropped.  Any of those columns being absent is a
/// [`CleanError::Schema`].
pub fn load_table(path: &Path, year_columns: &[String]) -> Result<WideTable> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let table = match ext.as_str() {
        "csv" => load_csv(path, year_columns)?,
        "json" => load_json(path, year_columns)?,
        other => return Err(CleanError::UnsupportedFormat(other.to_string())),
    };
    debug!("loaded {} rows from {}", table.len(), path.display());
    Ok(table)
}

fn required_columns(year_columns: &[String]) -> impl Iterator<Item = &str> {
    [SERIES_CODE, COUNTRY_NAME]
        .into_iter()
        .chain(year_columns.iter().map(String::as_str))
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Rows shorter than the header (DataBank exports end with a few footer
/// lines) are accepted; their absent cells read as empty.  Rows longer than
/// the header are rejected, since their cells no longer line up with it.
fn load_csv(path: &Path, year_columns: &[String]) -> Result<WideTable> {
    let csv_err = |source: csv::Error| CleanError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let file = std::fs::File::open(path).map_err(|source| CleanError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(file);

    let headers: Vec<String> = reader
        .headers()
        .map_err(csv_err)?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').to_string())
        .collect();

    let mut missing = Vec::new();
    let positions: Vec<usize> = required_columns(year_columns)
        .filter_map(|col| {
            let pos = headers.iter().position(|h| h == col);
            if pos.is_none() {
                missing.push(col.to_string());
            }
            pos
        })
        .collect();
    if !missing.is_empty() {
        return Err(CleanError::Schema {
            path: path.to_path_buf(),
            missing,
        });
    }

    let mut rows = Vec::new();
    for (line, result) in reader.records().enumerate() {
        let record = result.map_err(csv_err)?;
        if record.len() > headers.len() {
            return Err(CleanError::TooManyFields {
                path: path.to_path_buf(),
                row: line,
                expected: headers.len(),
                found: record.len(),
            });
        }
        let mut cells = positions
            .iter()
            .map(|&idx| record.get(idx).unwrap_or("").to_string());

        // positions is [series, country, years...], all present at this point
        let series_code = cells.next().unwrap_or_default();
        let country = cells.next().unwrap_or_default();
        rows.push(WideRow {
            line,
            series_code,
            country,
            cells: cells.collect(),
        });
    }

    Ok(WideTable {
        year_columns: year_columns.to_vec(),
        rows,
    })
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`).
/// Year cells may be numbers, numeric strings or `null`.
fn load_json(path: &Path, year_columns: &[String]) -> Result<WideTable> {
    let json_err = |source: serde_json::Error| CleanError::Json {
        path: path.to_path_buf(),
        source,
    };

    let text = std::fs::read_to_string(path).map_err(|source| CleanError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let records: Vec<serde_json::Map<String, JsonValue>> =
        serde_json::from_str(&text).map_err(json_err)?;

    // The schema is whatever the first record carries; an empty array has
    // no columns at all.
    let missing: Vec<String> = required_columns(year_columns)
        .filter(|col| records.first().map_or(true, |rec| !rec.contains_key(*col)))
        .map(str::to_string)
        .collect();
    if !missing.is_empty() {
        return Err(CleanError::Schema {
            path: path.to_path_buf(),
            missing,
        });
    }

    let rows = records
        .iter()
        .enumerate()
        .map(|(line, rec)| WideRow {
            line,
            series_code: json_to_text(rec.get(SERIES_CODE)),
            country: json_to_text(rec.get(COUNTRY_NAME)),
            cells: year_columns
                .iter()
                .map(|col| json_to_text(rec.get(col)))
                .collect(),
        })
        .collect();

    Ok(WideTable {
        year_columns: year_columns.to_vec(),
        rows,
    })
}

fn json_to_text(val: Option<&JsonValue>) -> String {
    match val {
        None | Some(JsonValue::Null) => String::new(),
        Some(JsonValue::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
