//! Reshape invocation options.

use std::path::PathBuf;

use faf_ingest::DistanceTable;
use faf_model::RegionSelector;

/// Options for one [`reshape`](crate::reshape) invocation.
///
/// The defaults reproduce the plain transform: bundled distances, no
/// region selection, no output file.
#[derive(Debug, Clone, Default)]
pub struct ReshapeOptions {
    /// Distance table to join; `None` uses the bundled default.
    pub distances: Option<DistanceTable>,
    /// Region-of-interest selection applied before the pivot.
    pub regions: RegionSelector,
    /// When set, the finished table is also written here as CSV.
    pub output_path: Option<PathBuf>,
}

impl ReshapeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a caller-supplied distance table instead of the bundled one.
    #[must_use]
    pub fn with_distances(mut self, distances: DistanceTable) -> Self {
        self.distances = Some(distances);
        self
    }

    /// Restrict output to a region of interest.
    #[must_use]
    pub fn with_regions(mut self, regions: RegionSelector) -> Self {
        self.regions = regions;
        self
    }

    /// Also write the finished table to this path.
    #[must_use]
    pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = Some(path.into());
        self
    }
}
