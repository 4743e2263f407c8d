//! Reshapes wide multi-year FAF freight flow tables into a normalized
//! long form suitable for time-series analysis: region-of-interest
//! filtering, year pivot, pairwise distance enrichment, and categorical
//! recoding with unit rescaling.

pub mod enrich;
pub mod filter;
pub mod options;
pub mod pipeline;
pub mod pivot;
pub mod recode;
pub mod write;

pub use enrich::join_distances;
pub use filter::filter_regions;
pub use options::ReshapeOptions;
pub use pipeline::reshape;
pub use pivot::pivot_years;
pub use recode::recode_and_rescale;
pub use write::write_csv;
