use serde::{Deserialize, Serialize};
use std::fmt;

pub mod dataset;
pub mod metadata;

pub use dataset::Dataset;
pub use metadata::{CongressRange, DateRange, Metadata, PolicyStats};

/// Bioguide identifier of a legislator, e.g. `"A000360"`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LegislatorId(pub String);

impl LegislatorId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LegislatorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Bill identifier, e.g. `"hr3076-117"`. Unique per bill, but the bills
/// table may carry several rows for one number (one per linked policy).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BillNumber(pub String);

impl BillNumber {
    pub fn new(number: impl Into<String>) -> Self {
        Self(number.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BillNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Party {
    Democrat,
    Republican,
    Independent,
    #[default]
    Other,
}

impl Party {
    /// Parse the party codes found in the congressional dump. The dump
    /// fills unknown affiliations with `"O"`; full names also appear in
    /// older exports.
    pub fn from_code(code: &str) -> Self {
        match code.trim() {
            "D" | "Democrat" | "Democratic" => Party::Democrat,
            "R" | "Republican" => Party::Republican,
            "I" | "ID" | "Independent" => Party::Independent,
            _ => Party::Other,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Party::Democrat => "D",
            Party::Republican => "R",
            Party::Independent => "I",
            Party::Other => "O",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Party::Democrat => "Democrat",
            Party::Republican => "Republican",
            Party::Independent => "Independent",
            Party::Other => "Other",
        }
    }
}

/// Sponsorship activity counters precomputed by the data pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct LegislatorMetrics {
    pub total_collaborations: u32,
    pub primary_count: u32,
    pub cosponsor_count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Legislator {
    pub id: LegislatorId,
    pub name: String,
    pub party: Party,
    /// Two-letter state code, the grouping key for layout.
    pub state: String,
    /// House district; senators and delegates-at-large have none.
    pub district: Option<i32>,
    pub metrics: LegislatorMetrics,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bill {
    pub bill_number: BillNumber,
    pub title: String,
    pub policy_id: Option<String>,
    pub policy_name: String,
    pub latest_action_date: Option<String>,
}

/// One co-sponsorship event. Several records may exist for the same
/// legislator pair across different bills; the pair's strength is the
/// count of such records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collaboration {
    pub source: LegislatorId,
    pub target: LegislatorId,
    pub bill_number: BillNumber,
}

impl Collaboration {
    pub fn pair_key(&self) -> PairKey {
        PairKey::new(self.source.clone(), self.target.clone())
    }

    /// The endpoint opposite `id`, if `id` is an endpoint at all.
    pub fn other_endpoint(&self, id: &LegislatorId) -> Option<&LegislatorId> {
        if &self.source == id {
            Some(&self.target)
        } else if &self.target == id {
            Some(&self.source)
        } else {
            None
        }
    }

    pub fn touches(&self, id: &LegislatorId) -> bool {
        &self.source == id || &self.target == id
    }
}

/// Canonical unordered legislator pair. `(A, B)` and `(B, A)` produce the
/// same key, so strength counts are order-independent.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PairKey {
    lo: LegislatorId,
    hi: LegislatorId,
}

impl PairKey {
    pub fn new(a: LegislatorId, b: LegislatorId) -> Self {
        if a <= b {
            Self { lo: a, hi: b }
        } else {
            Self { lo: b, hi: a }
        }
    }

    pub fn endpoints(&self) -> (&LegislatorId, &LegislatorId) {
        (&self.lo, &self.hi)
    }
}

impl fmt::Display for PairKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.lo, self.hi)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Policy {
    pub id: String,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pair_key_is_order_independent() {
        let a = LegislatorId::new("A000001");
        let b = LegislatorId::new("B000002");
        assert_eq!(
            PairKey::new(a.clone(), b.clone()),
            PairKey::new(b.clone(), a.clone())
        );
        assert_eq!(PairKey::new(a.clone(), b).endpoints().0, &a);
    }

    #[test]
    fn party_codes_parse_leniently() {
        assert_eq!(Party::from_code("D"), Party::Democrat);
        assert_eq!(Party::from_code("Republican"), Party::Republican);
        assert_eq!(Party::from_code("I"), Party::Independent);
        assert_eq!(Party::from_code(""), Party::Other);
        assert_eq!(Party::from_code("L"), Party::Other);
    }

    #[test]
    fn collaboration_other_endpoint() {
        let c = Collaboration {
            source: LegislatorId::new("A"),
            target: LegislatorId::new("B"),
            bill_number: BillNumber::new("hr1-117"),
        };
        assert_eq!(
            c.other_endpoint(&LegislatorId::new("A")),
            Some(&LegislatorId::new("B"))
        );
        assert_eq!(c.other_endpoint(&LegislatorId::new("C")), None);
        assert!(c.touches(&LegislatorId::new("B")));
    }
}
