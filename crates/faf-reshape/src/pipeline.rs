//! The flow reshaping pipeline.

use polars::prelude::DataFrame;

use faf_ingest::{DistanceTable, FlowSource, load_flows};
use faf_model::Result;

use crate::enrich::join_distances;
use crate::filter::filter_regions;
use crate::options::ReshapeOptions;
use crate::pivot::pivot_years;
use crate::recode::recode_and_rescale;
use crate::write::write_csv;

/// Reshape a wide multi-year flow table into normalized long form.
///
/// Stages run in order: load and filter, pivot, distance enrichment,
/// recode and rescale, optional write. The first failure aborts the
/// invocation; no partial table is returned or persisted.
pub fn reshape(source: &FlowSource, options: &ReshapeOptions) -> Result<DataFrame> {
    let raw = load_flows(source)?;
    let filtered = filter_regions(&raw, &options.regions)?;
    let long = pivot_years(&filtered)?;
    let distances = match options.distances.as_ref() {
        Some(table) => table,
        None => DistanceTable::bundled()?,
    };
    let enriched = join_distances(&long, distances)?;
    let mut finished = recode_and_rescale(&enriched)?;
    if let Some(path) = options.output_path.as_deref() {
        write_csv(&mut finished, path)?;
    }
    Ok(finished)
}
