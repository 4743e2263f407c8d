//! Raw flow table loading and schema coercion.

use std::collections::BTreeSet;
use std::io::Cursor;

use polars::prelude::{CsvReadOptions, DataFrame, DataType, SerReader};
use tracing::info;

use faf_model::schema::{self, REQUIRED_COLUMNS};
use faf_model::{FlowError, Result};

use crate::source::FlowSource;

/// How many leading records the CSV reader samples when inferring dtypes.
const SCHEMA_INFER_ROWS: usize = 10_000;

/// Parse an in-memory delimited file into a DataFrame.
pub fn read_csv_bytes(bytes: Vec<u8>) -> Result<DataFrame> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(SCHEMA_INFER_ROWS))
        .into_reader_with_file_handle(Cursor::new(bytes))
        .finish()?;
    Ok(df)
}

/// Load a raw wide flow table and coerce its key columns.
///
/// Verifies the required column set before any transformation, forces
/// the nine key/code columns to `Int64` (tolerating float or string
/// source representations), and checks that every year carries a paired
/// `value<year>`/`tons<year>` block.
pub fn load_flows(source: &FlowSource) -> Result<DataFrame> {
    let bytes = source.read_bytes()?;
    let mut df = read_csv_bytes(bytes)?;
    ensure_required_columns(&df)?;
    for column in REQUIRED_COLUMNS {
        coerce_int_column(&mut df, column)?;
    }
    let names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();
    let years = schema::year_columns(names.iter().map(String::as_str))?;
    info!(rows = df.height(), years = years.len(), "loaded raw flow table");
    Ok(df)
}

/// Fail with a schema error when any required column is absent.
pub fn ensure_required_columns(df: &DataFrame) -> Result<()> {
    let present: BTreeSet<&str> = df
        .get_column_names()
        .iter()
        .map(|name| name.as_str())
        .collect();
    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|column| !present.contains(column))
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(FlowError::schema(format!(
            "missing required column(s): {}",
            missing.join(", ")
        )))
    }
}

/// Force a column to `Int64`, tolerating float and string sources.
///
/// Values that do not survive the cast (a new null appears) are a schema
/// error; nulls already present in the source pass through.
pub(crate) fn coerce_int_column(df: &mut DataFrame, name: &str) -> Result<()> {
    let column = df.column(name)?;
    if matches!(column.dtype(), DataType::Int64) {
        return Ok(());
    }
    let nulls_before = column.null_count();
    let coerced = match column.dtype() {
        DataType::Int8
        | DataType::Int16
        | DataType::Int32
        | DataType::UInt8
        | DataType::UInt16
        | DataType::UInt32
        | DataType::UInt64
        | DataType::Float32
        | DataType::Float64 => column.cast(&DataType::Int64)?,
        // String sources like "411.0" go through a float cast first.
        _ => column.cast(&DataType::Float64)?.cast(&DataType::Int64)?,
    };
    if coerced.null_count() > nulls_before {
        return Err(FlowError::schema(format!(
            "column {name} contains values that cannot be read as integers"
        )));
    }
    df.with_column(coerced)?;
    Ok(())
}
