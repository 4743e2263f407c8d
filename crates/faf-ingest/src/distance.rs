//! Pairwise region distance tables.

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::LazyLock;

use csv::ReaderBuilder;
use polars::prelude::{DataFrame, NamedFrom, Series};
use tracing::debug;

use faf_model::schema::{DISTANCE, DMS_DEST, DMS_ORIG};
use faf_model::{FlowError, Result};

use crate::source::FlowSource;

/// Bundled FAF5 zone-to-zone highway mileage (western regions, 2022
/// network vintage). Immutable reference data shipped with the package.
const BUNDLED_CSV: &str = include_str!("../data/faf5_region_miles.csv");

static BUNDLED: LazyLock<std::result::Result<DistanceTable, String>> = LazyLock::new(|| {
    DistanceTable::from_csv_bytes(BUNDLED_CSV.as_bytes()).map_err(|err| err.to_string())
});

/// Roadway distances keyed by ordered (origin, destination) region pair.
#[derive(Debug, Clone)]
pub struct DistanceTable {
    frame: DataFrame,
}

impl DistanceTable {
    /// The bundled default, parsed once on first use.
    pub fn bundled() -> Result<&'static DistanceTable> {
        BUNDLED
            .as_ref()
            .map_err(|reason| FlowError::schema(format!("bundled distance table: {reason}")))
    }

    /// Load a distance table from a local or remote delimited file.
    pub fn from_source(source: &FlowSource) -> Result<Self> {
        Self::from_csv_bytes(&source.read_bytes()?)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        Self::from_source(&FlowSource::from(path))
    }

    fn from_csv_bytes(bytes: &[u8]) -> Result<Self> {
        let mut reader = ReaderBuilder::new().has_headers(true).from_reader(bytes);
        let headers = reader
            .headers()
            .map_err(|err| FlowError::schema(format!("distance table: {err}")))?
            .clone();
        let orig_idx = column_index(&headers, DMS_ORIG)?;
        let dest_idx = column_index(&headers, DMS_DEST)?;
        let dist_idx = column_index(&headers, DISTANCE)?;

        let mut origs: Vec<i64> = Vec::new();
        let mut dests: Vec<i64> = Vec::new();
        let mut miles: Vec<f64> = Vec::new();
        let mut seen = BTreeSet::new();
        let mut duplicates = BTreeSet::new();
        for record in reader.records() {
            let record = record
                .map_err(|err| FlowError::schema(format!("distance table: {err}")))?;
            let orig = parse_region(record.get(orig_idx), DMS_ORIG)?;
            let dest = parse_region(record.get(dest_idx), DMS_DEST)?;
            let distance = parse_distance(record.get(dist_idx))?;
            if !seen.insert((orig, dest)) {
                duplicates.insert((orig, dest));
            }
            origs.push(orig);
            dests.push(dest);
            miles.push(distance);
        }
        if !duplicates.is_empty() {
            let listed: Vec<String> = duplicates
                .iter()
                .map(|(orig, dest)| format!("{orig}->{dest}"))
                .collect();
            return Err(FlowError::schema(format!(
                "duplicate origin-destination pair(s) in distance table: {}",
                listed.join(", ")
            )));
        }

        let frame = DataFrame::new(vec![
            Series::new(DMS_ORIG.into(), origs).into(),
            Series::new(DMS_DEST.into(), dests).into(),
            Series::new(DISTANCE.into(), miles).into(),
        ])?;
        debug!(pairs = frame.height(), "loaded distance table");
        Ok(Self { frame })
    }

    /// The underlying (`dms_orig`, `dms_dest`, `distance`) frame.
    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    pub fn len(&self) -> usize {
        self.frame.height()
    }

    pub fn is_empty(&self) -> bool {
        self.frame.height() == 0
    }
}

fn column_index(headers: &csv::StringRecord, name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|header| header.trim() == name)
        .ok_or_else(|| {
            FlowError::schema(format!("distance table is missing required column {name}"))
        })
}

/// Region ids tolerate float-formatted sources, as in the flow table.
fn parse_region(cell: Option<&str>, column: &str) -> Result<i64> {
    let trimmed = cell.unwrap_or("").trim();
    if trimmed.is_empty() {
        return Err(FlowError::schema(format!(
            "distance table contains an empty {column}"
        )));
    }
    if let Ok(value) = trimmed.parse::<i64>() {
        return Ok(value);
    }
    trimmed
        .parse::<f64>()
        .map(|value| value as i64)
        .map_err(|_| {
            FlowError::schema(format!(
                "distance table {column} value {trimmed:?} is not an integer"
            ))
        })
}

fn parse_distance(cell: Option<&str>) -> Result<f64> {
    let trimmed = cell.unwrap_or("").trim();
    if trimmed.is_empty() {
        return Err(FlowError::schema(
            "distance table contains empty distance values",
        ));
    }
    trimmed.parse().map_err(|_| {
        FlowError::schema(format!(
            "distance table distance value {trimmed:?} is not numeric"
        ))
    })
}
