use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CleanError, Result};

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

pub const DEFAULT_DATASET_PATH: &str = "data/global_flights_data.csv";
pub const DEFAULT_FIRST_YEAR: i32 = 2005;
pub const DEFAULT_LAST_YEAR: i32 = 2019;

/// The ten largest economies the dashboard is restricted to.
pub const TOP_TEN_COUNTRIES: [&str; 10] = [
    "United States",
    "China",
    "Japan",
    "Germany",
    "United Kingdom",
    "India",
    "France",
    "Brazil",
    "Italy",
    "Canada",
];

/// Earliest and latest year accepted as a year column name.
pub const PLAUSIBLE_YEARS: std::ops::RangeInclusive<i32> = 1000..=9999;

// ---------------------------------------------------------------------------
// IndicatorSpec – one row of the chart table
// ---------------------------------------------------------------------------

/// An indicator to chart, with its fixed title and axis labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSpec {
    pub code: String,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    /// Read this indicator from another file instead of `Config::dataset_path`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dataset_path: Option<PathBuf>,
}

impl IndicatorSpec {
    pub fn new(code: &str, title: &str, x_label: &str, y_label: &str) -> Self {
        IndicatorSpec {
            code: code.to_string(),
            title: title.to_string(),
            x_label: x_label.to_string(),
            y_label: y_label.to_string(),
            dataset_path: None,
        }
    }
}

/// The three air transport indicators, in chart order.
pub fn default_indicators() -> Vec<IndicatorSpec> {
    vec![
        IndicatorSpec::new(
            "IS.AIR.DPRT",
            "Air transport, registered carrier departures worldwide",
            "Year",
            "Registered Carrier Departures Worldwide",
        ),
        IndicatorSpec::new(
            "IS.AIR.GOOD.MT.K1",
            "Air transport, freight (million ton-km)",
            "Year",
            "Freight (million ton-km)",
        ),
        IndicatorSpec::new(
            "IS.AIR.PSGR",
            "Air transport, passengers carried",
            "Year",
            "Passengers carried",
        ),
    ]
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// Everything the cleaner and the figure assembler need to know.
///
/// Every field has a default, so a JSON config file only has to name what it
/// overrides:
///
/// ```json
/// { "dataset_path": "other.csv", "first_year": 2010 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub dataset_path: PathBuf,
    pub first_year: i32,
    pub last_year: i32,
    pub countries: Vec<String>,
    pub indicators: Vec<IndicatorSpec>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            dataset_path: PathBuf::from(DEFAULT_DATASET_PATH),
            first_year: DEFAULT_FIRST_YEAR,
            last_year: DEFAULT_LAST_YEAR,
            countries: TOP_TEN_COUNTRIES.iter().map(|c| c.to_string()).collect(),
            indicators: default_indicators(),
        }
    }
}

impl Config {
    /// The file an indicator is read from.
    pub fn dataset_for<'a>(&'a self, indicator: &'a IndicatorSpec) -> &'a Path {
        indicator
            .dataset_path
            .as_deref()
            .unwrap_or(&self.dataset_path)
    }

    /// Read a config file (JSON) and validate it.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| CleanError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = serde_json::from_str(&text).map_err(|source| CleanError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !PLAUSIBLE_YEARS.contains(&self.first_year) || !PLAUSIBLE_YEARS.contains(&self.last_year)
        {
            return Err(CleanError::InvalidConfig(format!(
                "year range {}..={} is outside {}..={}",
                self.first_year,
                self.last_year,
                PLAUSIBLE_YEARS.start(),
                PLAUSIBLE_YEARS.end()
            )));
        }
        if self.first_year > self.last_year {
            return Err(CleanError::InvalidConfig(format!(
                "first_year {} is after last_year {}",
                self.first_year, self.last_year
            )));
        }
        if self.indicators.is_empty() {
            return Err(CleanError::InvalidConfig("no indicators configured".into()));
        }
        Ok(())
    }

    /// Year column names in left-to-right order, e.g. `"2005"`..`"2019"`.
    pub fn year_columns(&self) -> Vec<String> {
        (self.first_year..=self.last_year)
            .map(|y| y.to_string())
            .collect()
    }
}
