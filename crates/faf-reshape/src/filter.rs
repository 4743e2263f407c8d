//! Region-of-interest filtering.

use polars::prelude::{BooleanChunked, DataFrame};
use tracing::info;

use faf_model::schema::{DMS_DEST, DMS_ORIG};
use faf_model::{RegionSelector, Result};

/// Keep rows touching an internal region plus halo-to-halo through
/// flows.
///
/// The union is evaluated per row in one pass, so a row matching both
/// the internal and the halo condition is retained exactly once. With
/// no internal set the table passes through unchanged.
pub fn filter_regions(df: &DataFrame, selector: &RegionSelector) -> Result<DataFrame> {
    let rows_read = df.height();
    if selector.is_unrestricted() {
        info!(rows_read, "no region selection; keeping all rows");
        return Ok(df.clone());
    }
    let orig = df.column(DMS_ORIG)?.i64()?;
    let dest = df.column(DMS_DEST)?.i64()?;
    let mask: BooleanChunked = orig
        .into_iter()
        .zip(dest.into_iter())
        .map(|pair| match pair {
            (Some(orig), Some(dest)) => Some(selector.retains(orig, dest)),
            // A row with an unknown endpoint cannot match a region set.
            _ => Some(false),
        })
        .collect();
    let filtered = df.filter(&mask)?;
    info!(
        rows_read,
        rows_retained = filtered.height(),
        "applied region filter"
    );
    Ok(filtered)
}
