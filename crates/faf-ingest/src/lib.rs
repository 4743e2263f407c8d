pub mod distance;
pub mod flows;
pub mod source;

pub use distance::DistanceTable;
pub use flows::{ensure_required_columns, load_flows, read_csv_bytes};
pub use source::FlowSource;
