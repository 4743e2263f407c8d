use std::collections::BTreeMap;

use thiserror::Error;

/// How many missing origin-destination pairs to spell out before eliding.
const MISSING_PAIR_DISPLAY_LIMIT: usize = 20;

#[derive(Debug, Error)]
pub enum FlowError {
    /// A required input column is absent or cannot be read as its required type.
    #[error("schema error: {0}")]
    Schema(String),

    /// Retained rows whose (origin, destination) pair has no distance entry.
    /// The map counts affected rows per pair.
    #[error(
        "missing distances for {} origin-destination pair(s): {}",
        .pairs.len(),
        format_missing_pairs(.pairs)
    )]
    MissingDistances { pairs: BTreeMap<(i64, i64), u64> },

    /// A categorical code fell outside the 1..=limit domain of its label list.
    #[error("column {column}: code {code} outside expected range 1..={limit}")]
    CodeOutOfRange {
        column: String,
        code: i64,
        limit: usize,
    },

    /// A remote source could not be fetched. No retries are attempted.
    #[error("failed to fetch {url}: {reason}")]
    Fetch { url: String, reason: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Polars(#[from] polars::error::PolarsError),
}

impl FlowError {
    pub fn schema(message: impl Into<String>) -> Self {
        Self::Schema(message.into())
    }

    pub fn code_out_of_range(column: impl Into<String>, code: i64, limit: usize) -> Self {
        Self::CodeOutOfRange {
            column: column.into(),
            code,
            limit,
        }
    }
}

fn format_missing_pairs(pairs: &BTreeMap<(i64, i64), u64>) -> String {
    let mut rendered: Vec<String> = pairs
        .iter()
        .take(MISSING_PAIR_DISPLAY_LIMIT)
        .map(|((orig, dest), count)| format!("{orig}->{dest} ({count} row(s))"))
        .collect();
    if pairs.len() > MISSING_PAIR_DISPLAY_LIMIT {
        rendered.push(format!(
            "and {} more",
            pairs.len() - MISSING_PAIR_DISPLAY_LIMIT
        ));
    }
    rendered.join(", ")
}

pub type Result<T> = std::result::Result<T, FlowError>;
