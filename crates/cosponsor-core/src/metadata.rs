use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CongressRange {
    pub start: u32,
    pub end: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DateRange {
    pub start: String,
    pub end: String,
}

/// Policy tallies precomputed by the dump pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PolicyStats {
    pub total: usize,
    /// Bill count per policy name, excluding uncategorized bills.
    pub counts: BTreeMap<String, u64>,
}

/// Dataset-level summary derived once when the dump is generated.
/// Read-only after load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Metadata {
    pub congress_range: CongressRange,
    pub date_range: DateRange,
    pub policies: PolicyStats,
    pub total_bills: usize,
    pub total_collaborations: usize,
    pub total_legislators: usize,
    /// Party-code → active legislator count.
    pub party_distribution: BTreeMap<String, u64>,
    pub date_generated: Option<String>,
}

impl Metadata {
    /// Policy names ordered by bill count, heaviest first. Used to order
    /// the policy selector.
    pub fn policies_by_weight(&self) -> Vec<(&str, u64)> {
        let mut entries: Vec<(&str, u64)> = self
            .policies
            .counts
            .iter()
            .map(|(name, count)| (name.as_str(), *count))
            .collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        entries
    }
}
