//! Categorical recoding and unit rescaling.

use polars::prelude::{ChunkApply, DataFrame, DataType, IntoSeries, NamedFrom, Series};
use tracing::info;

use faf_model::schema::{DMS_MODE, FR_INMODE, FR_OUTMODE, TONS, TRADE_TYPE, VALUE};
use faf_model::{FlowError, FlowMode, Result, TradeType};

/// Dollars per source unit (source stores millions).
const VALUE_SCALE: f64 = 1_000_000.0;
/// Tons per source unit (source stores thousands).
const TONS_SCALE: f64 = 1_000.0;

/// Replace integer codes with labels and bring `value`/`tons` to whole
/// units.
///
/// Commodity codes (`sctg2`) keep their integer identity; only trade
/// type and the three mode columns are relabeled.
pub fn recode_and_rescale(df: &DataFrame) -> Result<DataFrame> {
    let mut out = df.clone();
    recode_codes(&mut out, TRADE_TYPE, TradeType::LABELS.len(), |code| {
        TradeType::from_code(code).map(TradeType::label)
    })?;
    for column in [DMS_MODE, FR_INMODE, FR_OUTMODE] {
        recode_codes(&mut out, column, FlowMode::LABELS.len(), |code| {
            FlowMode::from_code(code).map(FlowMode::label)
        })?;
    }
    rescale(&mut out, VALUE, VALUE_SCALE, 2)?;
    rescale(&mut out, TONS, TONS_SCALE, 1)?;
    info!(rows = out.height(), "recoded and rescaled flow table");
    Ok(out)
}

/// Replace a column of 1-indexed codes with its labels, failing closed
/// on codes outside the label list. Nulls (foreign legs of domestic
/// flows) stay null. A non-integer column means the table was already
/// recoded; labels are never re-mapped.
fn recode_codes(
    df: &mut DataFrame,
    column: &str,
    limit: usize,
    label: impl Fn(i64) -> Option<&'static str>,
) -> Result<()> {
    let codes = df.column(column)?.i64().map_err(|_| {
        FlowError::schema(format!(
            "column {column} is not an integer code column; refusing to re-map labeled data"
        ))
    })?;
    let mut labels: Vec<Option<&'static str>> = Vec::with_capacity(codes.len());
    for code in codes {
        match code {
            None => labels.push(None),
            Some(code) => match label(code) {
                Some(text) => labels.push(Some(text)),
                None => return Err(FlowError::code_out_of_range(column, code, limit)),
            },
        }
    }
    df.with_column(Series::new(column.into(), labels))?;
    Ok(())
}

/// Scale a metric column and round to a fixed number of decimals.
fn rescale(df: &mut DataFrame, column: &str, factor: f64, decimals: i32) -> Result<()> {
    let values = df.column(column)?.cast(&DataType::Float64)?;
    let precision = 10f64.powi(decimals);
    let scaled = values
        .f64()?
        .apply_values(|v| (v * factor * precision).round() / precision);
    df.with_column(scaled.into_series())?;
    Ok(())
}
