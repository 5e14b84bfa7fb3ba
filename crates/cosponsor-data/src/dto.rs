//! Wire shapes for `/api/network-data`. Deliberately lenient: the dump
//! pipeline has produced numeric and string policy ids, `-1` districts,
//! and rows without metrics, and all of those must load.

use cosponsor_core::{
    Bill, BillNumber, Collaboration, CongressRange, Dataset, DateRange, Legislator,
    LegislatorId, LegislatorMetrics, Metadata, Party, Policy, PolicyStats,
};
use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Deserialize)]
pub struct NetworkDataDto {
    pub legislators: Vec<LegislatorDto>,
    pub bills: Vec<BillDto>,
    pub collaborations: Vec<CollaborationDto>,
    pub policies: Vec<PolicyDto>,
    pub metadata: MetadataDto,
}

impl NetworkDataDto {
    pub fn into_dataset(self) -> Dataset {
        Dataset::new(
            self.legislators.into_iter().map(LegislatorDto::into_domain).collect(),
            self.bills.into_iter().map(BillDto::into_domain).collect(),
            self.collaborations
                .into_iter()
                .map(CollaborationDto::into_domain)
                .collect(),
            self.policies.into_iter().map(PolicyDto::into_domain).collect(),
            self.metadata.into_domain(),
        )
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LegislatorDto {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub party: String,
    pub state: String,
    #[serde(default)]
    pub district: Option<i32>,
    #[serde(default)]
    pub metrics: MetricsDto,
}

impl LegislatorDto {
    fn into_domain(self) -> Legislator {
        Legislator {
            id: LegislatorId::new(self.id),
            name: self.name,
            party: Party::from_code(&self.party),
            state: self.state,
            // The dump encodes "no district" as -1.
            district: self.district.filter(|&d| d >= 0),
            metrics: self.metrics.into_domain(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct MetricsDto {
    #[serde(default)]
    pub total_collaborations: u32,
    #[serde(default)]
    pub primary_count: u32,
    #[serde(default)]
    pub cosponsor_count: u32,
}

impl MetricsDto {
    fn into_domain(self) -> LegislatorMetrics {
        LegislatorMetrics {
            total_collaborations: self.total_collaborations,
            primary_count: self.primary_count,
            cosponsor_count: self.cosponsor_count,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct BillDto {
    pub bill_number: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, deserialize_with = "id_like")]
    pub policy_id: Option<String>,
    #[serde(default = "uncategorized")]
    pub policy_name: String,
    #[serde(default)]
    pub latest_action_date: Option<String>,
}

fn uncategorized() -> String {
    "Uncategorized".to_string()
}

impl BillDto {
    fn into_domain(self) -> Bill {
        Bill {
            bill_number: BillNumber::new(self.bill_number),
            title: self.title,
            policy_id: self.policy_id,
            policy_name: self.policy_name,
            latest_action_date: self.latest_action_date,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CollaborationDto {
    pub source: String,
    pub target: String,
    pub bill_number: String,
}

impl CollaborationDto {
    fn into_domain(self) -> Collaboration {
        Collaboration {
            source: LegislatorId::new(self.source),
            target: LegislatorId::new(self.target),
            bill_number: BillNumber::new(self.bill_number),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PolicyDto {
    #[serde(deserialize_with = "id_like_required")]
    pub id: String,
    pub name: String,
}

impl PolicyDto {
    fn into_domain(self) -> Policy {
        Policy {
            id: self.id,
            name: self.name,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct MetadataDto {
    #[serde(default)]
    pub congress_range: CongressRange,
    #[serde(default)]
    pub date_range: DateRange,
    #[serde(default)]
    pub policies: PolicyStatsDto,
    #[serde(default)]
    pub total_bills: usize,
    #[serde(default)]
    pub total_collaborations: usize,
    #[serde(default)]
    pub total_legislators: usize,
    #[serde(default)]
    pub party_distribution: BTreeMap<String, u64>,
    #[serde(default)]
    pub date_generated: Option<String>,
}

impl MetadataDto {
    fn into_domain(self) -> Metadata {
        Metadata {
            congress_range: self.congress_range,
            date_range: self.date_range,
            policies: PolicyStats {
                total: self.policies.total,
                counts: self.policies.counts,
            },
            total_bills: self.total_bills,
            total_collaborations: self.total_collaborations,
            total_legislators: self.total_legislators,
            party_distribution: self.party_distribution,
            date_generated: self.date_generated,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct PolicyStatsDto {
    #[serde(default)]
    pub total: usize,
    #[serde(default)]
    pub counts: BTreeMap<String, u64>,
}

/// Accepts a JSON string, integer, or null and normalizes to an optional
/// string, so numeric and string policy ids compare equal downstream.
fn id_like<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum IdLike {
        Text(String),
        Number(i64),
        Float(f64),
    }

    Ok(match Option::<IdLike>::deserialize(deserializer)? {
        None => None,
        Some(IdLike::Text(s)) => Some(s),
        Some(IdLike::Number(n)) => Some(n.to_string()),
        // Pandas exports integral ids as floats ("21.0").
        Some(IdLike::Float(f)) if f.fract() == 0.0 => Some((f as i64).to_string()),
        Some(IdLike::Float(f)) => Some(f.to_string()),
    })
}

fn id_like_required<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    id_like(deserializer)?.ok_or_else(|| serde::de::Error::custom("policy id must not be null"))
}
