//! Distance enrichment and completeness validation.

use std::collections::BTreeMap;

use polars::prelude::{DataFrame, DataFrameJoinOps};
use tracing::{error, info};

use faf_ingest::DistanceTable;
use faf_model::schema::{DISTANCE, DMS_DEST, DMS_ORIG};
use faf_model::{FlowError, Result};

/// Left-join pairwise distances and verify every retained row matched.
///
/// Any row left without a distance aborts the pipeline: the error
/// carries each unmatched (origin, destination) pair with its affected
/// row count, and nothing is returned or persisted.
pub fn join_distances(df: &DataFrame, distances: &DistanceTable) -> Result<DataFrame> {
    let joined = df.left_join(distances.frame(), [DMS_ORIG, DMS_DEST], [DMS_ORIG, DMS_DEST])?;
    let missing = joined.column(DISTANCE)?.null_count();
    if missing == 0 {
        info!(rows = joined.height(), "joined distances");
        return Ok(joined);
    }

    let orig = joined.column(DMS_ORIG)?.i64()?;
    let dest = joined.column(DMS_DEST)?.i64()?;
    let dist = joined.column(DISTANCE)?.f64()?;
    let mut pairs: BTreeMap<(i64, i64), u64> = BTreeMap::new();
    for ((orig, dest), dist) in orig.into_iter().zip(dest.into_iter()).zip(dist.into_iter()) {
        if dist.is_none()
            && let (Some(orig), Some(dest)) = (orig, dest)
        {
            *pairs.entry((orig, dest)).or_insert(0) += 1;
        }
    }
    error!(
        rows = missing,
        pairs = pairs.len(),
        "distance join left rows without a match"
    );
    Err(FlowError::MissingDistances { pairs })
}
