use std::collections::BTreeSet;

use super::model::WideRow;

// ---------------------------------------------------------------------------
// Row predicates: which series and which countries survive
// ---------------------------------------------------------------------------

/// Country names a row must belong to. Membership only; iteration order of
/// the set never reaches the output.
pub type CountryAllowlist = BTreeSet<String>;

pub fn allowlist_from<S: AsRef<str>>(countries: &[S]) -> CountryAllowlist {
    countries.iter().map(|c| c.as_ref().to_string()).collect()
}

/// Rows whose `Series Code` equals `code`, in their original order.
pub fn by_series<'a>(rows: &'a [WideRow], code: &str) -> Vec<&'a WideRow> {
    rows.iter().filter(|row| row.series_code == code).collect()
}

/// Rows whose `Country Name` is in the allowlist, in their original order.
pub fn by_country<'a>(rows: Vec<&'a WideRow>, allowlist: &CountryAllowlist) -> Vec<&'a WideRow> {
    rows.into_iter()
        .filter(|row| allowlist.contains(&row.country))
        .collect()
}
