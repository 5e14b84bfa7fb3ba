use cosponsor_core::{BillNumber, Collaboration, Dataset, Legislator, LegislatorId, PairKey};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::{HashMap, HashSet};

/// Maximum number of edges handed to the renderer. Anything above this is
/// sampled down so a dense congress still draws at interactive rates.
pub const EDGE_SAMPLE_CAP: usize = 4000;

/// Slider bounds for the minimum pair strength.
pub const MIN_COLLABORATIONS_RANGE: std::ops::RangeInclusive<u32> = 1..=20;
pub const DEFAULT_MIN_COLLABORATIONS: u32 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PolicyFilter {
    #[default]
    All,
    Id(String),
}

impl PolicyFilter {
    /// Policy ids arrive as numbers in some dumps and strings in others,
    /// so matching is by string equality.
    pub fn matches(&self, policy_id: Option<&str>) -> bool {
        match self {
            PolicyFilter::All => true,
            PolicyFilter::Id(wanted) => policy_id.is_some_and(|id| id == wanted),
        }
    }
}

/// How to reduce the edge list once it exceeds [`EDGE_SAMPLE_CAP`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SamplingStrategy {
    /// Fisher–Yates shuffle, keep the prefix.
    #[default]
    Uniform,
    /// Keep the strongest pairs: stable sort descending by pair strength,
    /// keep the prefix.
    Weighted,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterParams {
    pub min_collaborations: u32,
    pub policy: PolicyFilter,
    pub sampling: SamplingStrategy,
    /// Seed for [`SamplingStrategy::Uniform`]; `None` draws from entropy.
    pub seed: Option<u64>,
}

impl Default for FilterParams {
    fn default() -> Self {
        Self {
            min_collaborations: DEFAULT_MIN_COLLABORATIONS,
            policy: PolicyFilter::All,
            sampling: SamplingStrategy::default(),
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SubgraphCounts {
    pub legislators: usize,
    /// Edge count before sampling; when `sampled` is set the rendered
    /// count is [`EDGE_SAMPLE_CAP`] and the UI shows "N of M".
    pub connections: usize,
    /// Distinct bills among the surviving edges.
    pub bills: usize,
    pub sampled: bool,
}

/// The filtered node/edge set for one threshold + policy combination.
/// Rebuilt whole on every parameter change, never patched in place.
#[derive(Debug, Clone, Default)]
pub struct Subgraph {
    nodes: Vec<Legislator>,
    edges: Vec<Collaboration>,
    counts: SubgraphCounts,
    node_index: HashMap<LegislatorId, usize>,
}

impl Subgraph {
    fn assemble(nodes: Vec<Legislator>, edges: Vec<Collaboration>, counts: SubgraphCounts) -> Self {
        let node_index = nodes
            .iter()
            .enumerate()
            .map(|(row, n)| (n.id.clone(), row))
            .collect();
        Self {
            nodes,
            edges,
            counts,
            node_index,
        }
    }

    pub fn nodes(&self) -> &[Legislator] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Collaboration] {
        &self.edges
    }

    pub fn counts(&self) -> SubgraphCounts {
        self.counts
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: &LegislatorId) -> Option<&Legislator> {
        self.node_index.get(id).map(|&row| &self.nodes[row])
    }

    pub fn state_of(&self, id: &LegislatorId) -> Option<&str> {
        self.node(id).map(|n| n.state.as_str())
    }

    pub fn edges_touching<'a>(
        &'a self,
        id: &'a LegislatorId,
    ) -> impl Iterator<Item = &'a Collaboration> {
        self.edges.iter().filter(move |e| e.touches(id))
    }

    /// Direct neighbors of `id` via the surviving edges, excluding `id`.
    pub fn neighbors(&self, id: &LegislatorId) -> HashSet<LegislatorId> {
        self.edges_touching(id)
            .filter_map(|e| e.other_endpoint(id))
            .filter(|other| *other != id)
            .cloned()
            .collect()
    }
}

/// Derive the bounded subgraph for the given parameters.
///
/// Pipeline: restrict bills by policy, restrict collaborations to those
/// bills, gate each edge on the strength of its canonical pair, drop
/// edges whose endpoints are missing from the legislator table, then
/// sample down to [`EDGE_SAMPLE_CAP`]. A combination that matches nothing
/// yields an empty subgraph with zero counts, not an error.
pub fn filter(dataset: &Dataset, params: &FilterParams) -> Subgraph {
    let valid_bills: HashSet<&BillNumber> = dataset
        .bills()
        .iter()
        .filter(|bill| params.policy.matches(bill.policy_id.as_deref()))
        .map(|bill| &bill.bill_number)
        .collect();

    let restricted: Vec<&Collaboration> = dataset
        .collaborations()
        .iter()
        .filter(|collab| valid_bills.contains(&collab.bill_number))
        .collect();

    let mut strength: HashMap<PairKey, u32> = HashMap::new();
    for collab in &restricted {
        *strength.entry(collab.pair_key()).or_default() += 1;
    }

    // The strength gate applies to the pair; every per-bill edge of a
    // surviving pair is kept individually.
    let mut dropped_missing = 0usize;
    let mut surviving: Vec<&Collaboration> = Vec::new();
    for collab in restricted {
        if strength
            .get(&collab.pair_key())
            .is_none_or(|&count| count < params.min_collaborations)
        {
            continue;
        }
        if dataset.legislator(&collab.source).is_none()
            || dataset.legislator(&collab.target).is_none()
        {
            dropped_missing += 1;
            continue;
        }
        surviving.push(collab);
    }
    if dropped_missing > 0 {
        tracing::warn!(
            dropped = dropped_missing,
            "dropping collaborations whose endpoints are missing from the legislator table"
        );
    }

    let connections = surviving.len();
    let bills = surviving
        .iter()
        .map(|collab| &collab.bill_number)
        .collect::<HashSet<_>>()
        .len();
    let sampled = connections > EDGE_SAMPLE_CAP;
    if sampled {
        surviving = sample_edges(surviving, EDGE_SAMPLE_CAP, params, &strength);
    }

    let mut seen: HashSet<&LegislatorId> = HashSet::new();
    let mut nodes: Vec<Legislator> = Vec::new();
    for collab in &surviving {
        for id in [&collab.source, &collab.target] {
            if seen.insert(id)
                && let Some(legislator) = dataset.legislator(id)
            {
                nodes.push(legislator.clone());
            }
        }
    }

    let counts = SubgraphCounts {
        legislators: nodes.len(),
        connections,
        bills,
        sampled,
    };
    Subgraph::assemble(nodes, surviving.into_iter().cloned().collect(), counts)
}

fn sample_edges<'a>(
    mut edges: Vec<&'a Collaboration>,
    cap: usize,
    params: &FilterParams,
    strength: &HashMap<PairKey, u32>,
) -> Vec<&'a Collaboration> {
    match params.sampling {
        SamplingStrategy::Uniform => {
            let mut rng = match params.seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            edges.shuffle(&mut rng);
        }
        SamplingStrategy::Weighted => {
            edges.sort_by_cached_key(|edge| {
                Reverse(strength.get(&edge.pair_key()).copied().unwrap_or(0))
            });
        }
    }
    edges.truncate(cap);
    edges
}
