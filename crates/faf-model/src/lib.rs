pub mod codes;
pub mod error;
pub mod regions;
pub mod schema;

pub use codes::{FlowMode, TradeType};
pub use error::{FlowError, Result};
pub use regions::RegionSelector;
pub use schema::{Metric, parse_metric_year, year_columns};
