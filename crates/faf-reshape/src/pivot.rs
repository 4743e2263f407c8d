//! Wide-to-long year pivot.

use polars::prelude::{DataFrame, DataType, NamedFrom, Series};
use tracing::info;

use faf_model::schema::{self, TONS, VALUE, YEAR};
use faf_model::{FlowError, Result};

/// Melt the repeating `value<year>`/`tons<year>` blocks into one row
/// per record per year, pivoting the two metrics back out as `value`
/// and `tons` columns next to a `year` key.
///
/// Every non-metric column is treated as identifying and repeats for
/// each year, so the output height is always input height times the
/// number of years.
pub fn pivot_years(df: &DataFrame) -> Result<DataFrame> {
    let names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();
    let years = schema::year_columns(names.iter().map(String::as_str))?;
    let keys: Vec<&str> = names
        .iter()
        .filter(|name| schema::parse_metric_year(name).is_none())
        .map(String::as_str)
        .collect();

    let mut long: Option<DataFrame> = None;
    for year in &years {
        let value_col = format!("{VALUE}{year}");
        let tons_col = format!("{TONS}{year}");
        let mut selection: Vec<&str> = keys.clone();
        selection.push(&value_col);
        selection.push(&tons_col);
        let mut part = df.select(selection)?;
        part.rename(&value_col, VALUE.into())?;
        part.rename(&tons_col, TONS.into())?;
        // Metric dtypes can differ between years; align before stacking.
        let value = part.column(VALUE)?.cast(&DataType::Float64)?;
        part.with_column(value)?;
        let tons = part.column(TONS)?.cast(&DataType::Float64)?;
        part.with_column(tons)?;
        part.with_column(Series::new(YEAR.into(), vec![*year; part.height()]))?;
        let mut ordered: Vec<&str> = keys.clone();
        ordered.extend([YEAR, VALUE, TONS]);
        let part = part.select(ordered)?;
        match long.as_mut() {
            Some(acc) => {
                acc.vstack_mut(&part)?;
            }
            None => long = Some(part),
        }
    }
    // year_columns rejects an empty year set, so the accumulator is set.
    let long = long.ok_or_else(|| FlowError::schema("no year columns to pivot"))?;
    info!(
        rows = long.height(),
        years = years.len(),
        "pivoted flow table to long form"
    );
    Ok(long)
}
