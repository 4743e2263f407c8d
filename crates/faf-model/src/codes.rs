//! Categorical code enumerations for FAF flow records.
//!
//! The source data stores trade type and transport mode as 1-indexed
//! ordinal codes into fixed label lists. Both enumerations map codes to
//! labels through a total function that fails closed: a code outside the
//! list is `None`, never a silent index. The derived `Ord` follows code
//! order, so consumers get a stable category ordering independent of any
//! string comparison.

use serde::{Deserialize, Serialize};

/// Classification of a flow as domestic, import, or export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TradeType {
    Domestic,
    Import,
    Export,
}

impl TradeType {
    /// All trade types in code order (code 1 first).
    pub const ALL: [TradeType; 3] = [TradeType::Domestic, TradeType::Import, TradeType::Export];

    /// Labels in the same order as [`TradeType::ALL`].
    pub const LABELS: [&'static str; 3] = ["Domestic", "Import", "Export"];

    /// Map a 1-indexed source code to a trade type.
    pub fn from_code(code: i64) -> Option<Self> {
        let index = usize::try_from(code.checked_sub(1)?).ok()?;
        Self::ALL.get(index).copied()
    }

    /// The 1-indexed source code for this trade type.
    pub fn code(self) -> i64 {
        self as i64 + 1
    }

    pub fn label(self) -> &'static str {
        Self::LABELS[self as usize]
    }
}

/// Transport mode of a flow segment.
///
/// Applies to the domestic leg and, for imports/exports, to the inbound
/// and outbound foreign legs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FlowMode {
    Truck,
    Rail,
    Water,
    Air,
    Multi,
    Pipeline,
    Other,
    None,
}

impl FlowMode {
    /// All modes in code order (code 1 first).
    pub const ALL: [FlowMode; 8] = [
        FlowMode::Truck,
        FlowMode::Rail,
        FlowMode::Water,
        FlowMode::Air,
        FlowMode::Multi,
        FlowMode::Pipeline,
        FlowMode::Other,
        FlowMode::None,
    ];

    /// Labels in the same order as [`FlowMode::ALL`].
    pub const LABELS: [&'static str; 8] = [
        "Truck", "Rail", "Water", "Air", "Multi", "Pipeline", "Other", "None",
    ];

    /// Map a 1-indexed source code to a mode.
    pub fn from_code(code: i64) -> Option<Self> {
        let index = usize::try_from(code.checked_sub(1)?).ok()?;
        Self::ALL.get(index).copied()
    }

    /// The 1-indexed source code for this mode.
    pub fn code(self) -> i64 {
        self as i64 + 1
    }

    pub fn label(self) -> &'static str {
        Self::LABELS[self as usize]
    }
}
