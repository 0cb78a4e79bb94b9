use std::path::Path;

use log::{debug, warn};

use super::filter::{CountryAllowlist, allowlist_from, by_country, by_series};
use super::loader::load_table;
use super::model::{Observation, WideRow, WideTable, parse_cell};
use crate::config::{Config, PLAUSIBLE_YEARS};
use crate::error::{CleanError, Result};

// ---------------------------------------------------------------------------
// Indicator cleaning: wide table → tidy observations
// ---------------------------------------------------------------------------

/// Clean one indicator using the default year range and country allowlist.
///
/// Keeps the rows of `indicator_code` for the top ten economies and reshapes
/// them into one observation per country and year.  An indicator that matches
/// nothing yields an empty vector.
pub fn clean(dataset_path: &Path, indicator_code: &str) -> Result<Vec<Observation>> {
    clean_with(&Config::default(), dataset_path, indicator_code)
}

/// Same as [`clean`], with year columns and allowlist taken from `config`.
pub fn clean_with(
    config: &Config,
    dataset_path: &Path,
    indicator_code: &str,
) -> Result<Vec<Observation>> {
    let table = load_table(dataset_path, &config.year_columns())?;
    let allowlist = allowlist_from(&config.countries);
    let observations = clean_table(&table, indicator_code, &allowlist)?;
    if observations.is_empty() {
        warn!("{indicator_code}: no rows for the configured countries");
    }
    Ok(observations)
}

/// Filter an already loaded table and melt what remains.
pub fn clean_table(
    table: &WideTable,
    indicator_code: &str,
    allowlist: &CountryAllowlist,
) -> Result<Vec<Observation>> {
    let series_rows = by_series(&table.rows, indicator_code);
    let matched = series_rows.len();
    let rows = by_country(series_rows, allowlist);
    debug!(
        "{indicator_code}: {matched} rows match the series, {} after country filter",
        rows.len()
    );
    melt(&rows, &table.year_columns)
}

/// Reshape wide rows into observations, row-major: every year of the first
/// row, then every year of the next.
pub fn melt(rows: &[&WideRow], year_columns: &[String]) -> Result<Vec<Observation>> {
    let years = year_columns
        .iter()
        .map(String::as_str)
        .map(parse_year)
        .collect::<Result<Vec<i32>>>()?;

    let mut observations = Vec::with_capacity(rows.len() * years.len());
    for row in rows {
        for ((col, &year), raw) in year_columns.iter().zip(&years).zip(&row.cells) {
            observations.push(Observation {
                country: row.country.clone(),
                year,
                value: parse_cell(raw, row.line, col),
            });
        }
    }
    Ok(observations)
}

/// Turn a year column name into a calendar year.
pub fn parse_year(column: &str) -> Result<i32> {
    column
        .trim()
        .parse::<i32>()
        .ok()
        .filter(|y| PLAUSIBLE_YEARS.contains(y))
        .ok_or_else(|| CleanError::InvalidYear(column.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TOP_TEN_COUNTRIES;
    use std::io::Write;
    use tempfile::{Builder, NamedTempFile};

    const HEADER: &str = "Country Name,Country Code,Series Name,Series Code,\
        2005,2006,2007,2008,2009,2010,2011,2012,2013,2014,2015,2016,2017,2018,2019";

    fn data_row(country: &str, code: &str, start: i32) -> String {
        let values: Vec<String> = (start..start + 15).map(|v| v.to_string()).collect();
        format!("{country},XXX,Some series,{code},{}", values.join(","))
    }

    fn dataset(rows: &[String]) -> NamedTempFile {
        let mut tmp = Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(tmp, "{HEADER}").unwrap();
        for r in rows {
            writeln!(tmp, "{r}").unwrap();
        }
        tmp
    }

    #[test]
    fn single_row_melts_into_fifteen_observations() {
        let tmp = dataset(&[data_row("Canada", "IS.AIR.PSGR", 100)]);

        let obs = clean(tmp.path(), "IS.AIR.PSGR").unwrap();
        assert_eq!(obs.len(), 15);
        for (i, o) in obs.iter().enumerate() {
            assert_eq!(o.country, "Canada");
            assert_eq!(o.year, 2005 + i as i32);
            assert_eq!(o.value, Some(100.0 + i as f64));
        }
    }

    #[test]
    fn only_allowlisted_countries_and_configured_years_survive() {
        let tmp = dataset(&[
            data_row("Mexico", "IS.AIR.PSGR", 1),
            data_row("China", "IS.AIR.PSGR", 2),
            data_row("World", "IS.AIR.PSGR", 3),
            data_row("Brazil", "IS.AIR.DPRT", 4),
            data_row("Brazil", "IS.AIR.PSGR", 5),
        ]);

        let obs = clean(tmp.path(), "IS.AIR.PSGR").unwrap();
        // two matching allowlisted rows × 15 years
        assert_eq!(obs.len(), 2 * 15);
        assert!(obs.iter().all(|o| TOP_TEN_COUNTRIES.contains(&o.country.as_str())));
        assert!(obs.iter().all(|o| (2005..=2019).contains(&o.year)));
        assert!(!obs.iter().any(|o| o.country == "Mexico"));
    }

    #[test]
    fn output_is_row_major_in_source_order() {
        let tmp = dataset(&[
            data_row("India", "IS.AIR.DPRT", 10),
            data_row("Japan", "IS.AIR.DPRT", 50),
        ]);

        let obs = clean(tmp.path(), "IS.AIR.DPRT").unwrap();
        assert!(obs[..15].iter().all(|o| o.country == "India"));
        assert!(obs[15..].iter().all(|o| o.country == "Japan"));
        assert_eq!(obs[15].year, 2005);
        assert_eq!(obs[15].value, Some(50.0));
    }

    #[test]
    fn unknown_indicator_is_empty_not_an_error() {
        let tmp = dataset(&[data_row("Canada", "IS.AIR.PSGR", 100)]);
        assert!(clean(tmp.path(), "NY.GDP.MKTP.CD").unwrap().is_empty());
    }

    #[test]
    fn cleaning_twice_gives_the_same_answer() {
        let tmp = dataset(&[
            data_row("Germany", "IS.AIR.PSGR", 7),
            data_row("France", "IS.AIR.PSGR", 9),
        ]);
        let first = clean(tmp.path(), "IS.AIR.PSGR").unwrap();
        let second = clean(tmp.path(), "IS.AIR.PSGR").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn missing_cells_stay_missing() {
        let mut tmp = Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(tmp, "{HEADER}").unwrap();
        writeln!(tmp, "Italy,ITA,x,IS.AIR.PSGR,..,,3,4,5,6,7,8,9,10,11,12,13,14,15").unwrap();

        let obs = clean(tmp.path(), "IS.AIR.PSGR").unwrap();
        assert_eq!(obs[0].value, None);
        assert_eq!(obs[1].value, None);
        assert_eq!(obs[2].value, Some(3.0));
    }

    #[test]
    fn unparseable_cell_in_kept_row_is_missing_not_fatal() {
        let mut tmp = Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(tmp, "{HEADER}").unwrap();
        writeln!(tmp, "Canada,CAN,x,IS.AIR.PSGR,1,2,3,4,5,6,7,8,9,10,11,12,13,14,n/a").unwrap();

        let obs = clean(tmp.path(), "IS.AIR.PSGR").unwrap();
        assert_eq!(obs.len(), 15);
        assert_eq!(obs[13].value, Some(14.0));
        assert_eq!(obs[14].year, 2019);
        assert_eq!(obs[14].value, None);
    }

    #[test]
    fn dataset_without_2019_fails_with_schema_error() {
        let mut tmp = Builder::new().suffix(".csv").tempfile().unwrap();
        let header = HEADER.trim_end_matches(",2019");
        writeln!(tmp, "{header}").unwrap();

        let err = clean(tmp.path(), "IS.AIR.PSGR").unwrap_err();
        assert!(matches!(err, CleanError::Schema { ref missing, .. } if missing == &["2019"]));
    }

    #[test]
    fn missing_dataset_fails_with_io_error() {
        let err = clean(Path::new("data/does_not_exist.csv"), "IS.AIR.PSGR").unwrap_err();
        assert!(matches!(err, CleanError::Io { .. }));
    }

    #[test]
    fn year_parsing() {
        assert_eq!(parse_year("2005").unwrap(), 2005);
        assert!(matches!(parse_year("2005 [YR2005]"), Err(CleanError::InvalidYear(_))));
        assert!(matches!(parse_year("99999"), Err(CleanError::InvalidYear(_))));
        assert!(matches!(parse_year("42"), Err(CleanError::InvalidYear(_))));
    }

    #[test]
    fn melt_with_no_rows_is_empty() {
        let years = vec!["2005".to_string()];
        assert!(melt(&[], &years).unwrap().is_empty());
    }
}
