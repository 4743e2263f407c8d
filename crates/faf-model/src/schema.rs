//! Column names and year-column conventions of the raw FAF flow table.

use std::collections::BTreeSet;

use crate::error::{FlowError, Result};

/// Domestic origin region.
pub const DMS_ORIG: &str = "dms_orig";
/// Domestic destination region.
pub const DMS_DEST: &str = "dms_dest";
/// Foreign origin region (imports).
pub const FR_ORIG: &str = "fr_orig";
/// Foreign destination region (exports).
pub const FR_DEST: &str = "fr_dest";
/// Domestic transport mode code.
pub const DMS_MODE: &str = "dms_mode";
/// Inbound foreign transport mode code.
pub const FR_INMODE: &str = "fr_inmode";
/// Outbound foreign transport mode code.
pub const FR_OUTMODE: &str = "fr_outmode";
/// Trade type code.
pub const TRADE_TYPE: &str = "trade_type";
/// Two-digit SCTG commodity code.
pub const SCTG2: &str = "sctg2";

/// Year discriminator added by the pivot.
pub const YEAR: &str = "year";
/// Long-form dollar value column.
pub const VALUE: &str = "value";
/// Long-form tonnage column.
pub const TONS: &str = "tons";
/// Joined roadway distance in miles.
pub const DISTANCE: &str = "distance";

/// Key and code columns every raw flow table must carry, all with
/// integer semantics.
pub const REQUIRED_COLUMNS: [&str; 9] = [
    DMS_ORIG, DMS_DEST, FR_ORIG, FR_DEST, DMS_MODE, FR_INMODE, FR_OUTMODE, TRADE_TYPE, SCTG2,
];

/// Which of the paired year columns a wide column name carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Value,
    Tons,
}

impl Metric {
    pub fn as_str(self) -> &'static str {
        match self {
            Metric::Value => VALUE,
            Metric::Tons => TONS,
        }
    }
}

/// Split a `value<year>` / `tons<year>` column name into its metric and
/// year. Any other name, including a bare `value` or a non-numeric
/// suffix, is not a year column.
pub fn parse_metric_year(name: &str) -> Option<(Metric, i32)> {
    let (metric, suffix) = if let Some(rest) = name.strip_prefix(VALUE) {
        (Metric::Value, rest)
    } else if let Some(rest) = name.strip_prefix(TONS) {
        (Metric::Tons, rest)
    } else {
        return None;
    };
    if suffix.is_empty() || !suffix.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    suffix.parse().ok().map(|year| (metric, year))
}

/// Collect the year set from wide column names, requiring every year to
/// carry both its `value` and `tons` column.
pub fn year_columns<'a>(names: impl IntoIterator<Item = &'a str>) -> Result<Vec<i32>> {
    let mut value_years = BTreeSet::new();
    let mut tons_years = BTreeSet::new();
    for name in names {
        match parse_metric_year(name) {
            Some((Metric::Value, year)) => {
                value_years.insert(year);
            }
            Some((Metric::Tons, year)) => {
                tons_years.insert(year);
            }
            None => {}
        }
    }
    let unpaired: Vec<i32> = value_years
        .symmetric_difference(&tons_years)
        .copied()
        .collect();
    if !unpaired.is_empty() {
        let listed: Vec<String> = unpaired.iter().map(ToString::to_string).collect();
        return Err(FlowError::schema(format!(
            "year(s) {} are missing their value or tons column",
            listed.join(", ")
        )));
    }
    if value_years.is_empty() {
        return Err(FlowError::schema(
            "no value<year>/tons<year> columns found in source",
        ));
    }
    Ok(value_years.into_iter().collect())
}
