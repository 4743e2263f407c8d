//! Region-of-interest selection for flow filtering.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Selects which origin-destination pairs to retain.
///
/// `internal` regions are the center of the analysis: any flow touching
/// one is kept. `halo` regions surround the internal area and stand in
/// for through-traffic: a flow is kept when both endpoints are halo
/// regions and differ (halo self-loops are local traffic, not through
/// traffic). A halo set without an internal set is inert.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionSelector {
    pub internal: Option<BTreeSet<i64>>,
    pub halo: Option<BTreeSet<i64>>,
}

impl RegionSelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the internal region set.
    #[must_use]
    pub fn with_internal(mut self, regions: impl IntoIterator<Item = i64>) -> Self {
        self.internal = Some(regions.into_iter().collect());
        self
    }

    /// Set the halo region set.
    #[must_use]
    pub fn with_halo(mut self, regions: impl IntoIterator<Item = i64>) -> Self {
        self.halo = Some(regions.into_iter().collect());
        self
    }

    /// True when no internal set is configured, in which case every row
    /// passes through unchanged and the halo set is ignored.
    pub fn is_unrestricted(&self) -> bool {
        self.internal.as_ref().is_none_or(BTreeSet::is_empty)
    }

    /// Row-wise retention predicate: internal union halo, evaluated in
    /// one pass so a row matching both conditions is counted once.
    pub fn retains(&self, orig: i64, dest: i64) -> bool {
        let Some(internal) = self.internal.as_ref().filter(|set| !set.is_empty()) else {
            return true;
        };
        if internal.contains(&orig) || internal.contains(&dest) {
            return true;
        }
        match &self.halo {
            Some(halo) => halo.contains(&orig) && halo.contains(&dest) && orig != dest,
            None => false,
        }
    }
}
