//! Final CSV serialization.

use std::fs::File;
use std::path::Path;

use polars::prelude::{CsvWriter, DataFrame, SerWriter};
use tracing::info;

use faf_model::Result;

/// Serialize the finished table as delimited text.
pub fn write_csv(df: &mut DataFrame, path: &Path) -> Result<()> {
    let mut file = File::create(path)?;
    CsvWriter::new(&mut file).finish(df)?;
    info!(rows = df.height(), path = %path.display(), "wrote reshaped flow table");
    Ok(())
}
