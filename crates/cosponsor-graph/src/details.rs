//! Aggregation behind the detail panel: what a focused legislator works
//! on and with whom.

use crate::filter::Subgraph;
use cosponsor_core::{BillNumber, Dataset, Legislator, LegislatorId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Display cap for the bill list.
pub const BILL_LIST_CAP: usize = 25;
/// Titles longer than this are truncated...
pub const TITLE_TRUNCATE_THRESHOLD: usize = 100;
/// ...by cutting at this many characters. The window between the two
/// values passes through untouched; see the boundary tests.
pub const TITLE_TRUNCATE_CUT: usize = 120;
/// How many policy tallies the panel surfaces.
pub const TOP_POLICY_COUNT: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyTally {
    pub name: String,
    /// Distinct bills of the neighborhood touching this policy.
    pub bills: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillSummary {
    pub bill_number: BillNumber,
    pub title: String,
    pub latest_action_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeDetails {
    pub legislator: Legislator,
    /// Distinct collaborators via surviving edges, excluding the
    /// legislator itself.
    pub connected_legislators: usize,
    /// At most [`TOP_POLICY_COUNT`] tallies, ordered by frequency with
    /// ties kept in first-encountered order.
    pub top_policies: Vec<PolicyTally>,
    /// At most [`BILL_LIST_CAP`] entries, titles pre-truncated for
    /// display.
    pub bills: Vec<BillSummary>,
    /// Distinct bill count before the display cap.
    pub total_bills: usize,
}

/// Aggregate the neighborhood of `id` over the surviving edges. Returns
/// `None` when the node is not part of the current subgraph.
pub fn node_details(
    dataset: &Dataset,
    graph: &Subgraph,
    id: &LegislatorId,
) -> Option<NodeDetails> {
    let legislator = graph.node(id)?.clone();
    let neighbors = graph.neighbors(id);

    let mut seen_bills: HashSet<&BillNumber> = HashSet::new();
    let mut bill_order: Vec<&BillNumber> = Vec::new();
    for edge in graph.edges_touching(id) {
        if seen_bills.insert(&edge.bill_number) {
            bill_order.push(&edge.bill_number);
        }
    }

    // Tally policy names across the neighborhood's bills, one vote per
    // (bill, policy) even when a bill carries duplicate policy rows.
    // Insertion order is the tiebreaker, so the tally vector is built in
    // encounter order and stably sorted.
    let mut tallies: Vec<PolicyTally> = Vec::new();
    for number in &bill_order {
        let mut seen_policies: HashSet<&str> = HashSet::new();
        for bill in dataset.bill_rows(number) {
            if seen_policies.insert(bill.policy_name.as_str()) {
                match tallies.iter_mut().find(|t| t.name == bill.policy_name) {
                    Some(tally) => tally.bills += 1,
                    None => tallies.push(PolicyTally {
                        name: bill.policy_name.clone(),
                        bills: 1,
                    }),
                }
            }
        }
    }
    tallies.sort_by(|a, b| b.bills.cmp(&a.bills));
    tallies.truncate(TOP_POLICY_COUNT);

    let total_bills = bill_order.len();
    let bills = bill_order
        .iter()
        .take(BILL_LIST_CAP)
        .map(|number| {
            let (title, latest_action_date) = match dataset.bill(number) {
                Some(bill) => (
                    truncate_title(&bill.title),
                    bill.latest_action_date.clone(),
                ),
                None => ((*number).to_string(), None),
            };
            BillSummary {
                bill_number: (*number).clone(),
                title,
                latest_action_date,
            }
        })
        .collect();

    Some(NodeDetails {
        legislator,
        connected_legislators: neighbors.len(),
        top_policies: tallies,
        bills,
        total_bills,
    })
}

/// Truncate a display title. Only titles longer than
/// [`TITLE_TRUNCATE_THRESHOLD`] characters are touched, and those are cut
/// at [`TITLE_TRUNCATE_CUT`] characters.
pub fn truncate_title(title: &str) -> String {
    if title.chars().count() > TITLE_TRUNCATE_THRESHOLD {
        let mut cut: String = title.chars().take(TITLE_TRUNCATE_CUT).collect();
        cut.push_str("...");
        cut
    } else {
        title.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{FilterParams, filter};
    use cosponsor_core::{Bill, Collaboration, LegislatorMetrics, Metadata, Party};

    fn legislator(id: &str, state: &str) -> Legislator {
        Legislator {
            id: LegislatorId::new(id),
            name: format!("Member {id}"),
            party: Party::Democrat,
            state: state.to_string(),
            district: Some(3),
            metrics: LegislatorMetrics::default(),
        }
    }

    fn bill(number: &str, policy: &str) -> Bill {
        Bill {
            bill_number: BillNumber::new(number),
            title: format!("An act: {number}"),
            policy_id: Some("1".to_string()),
            policy_name: policy.to_string(),
            latest_action_date: Some("2022-06-01".to_string()),
        }
    }

    fn collab(source: &str, target: &str, bill: &str) -> Collaboration {
        Collaboration {
            source: LegislatorId::new(source),
            target: LegislatorId::new(target),
            bill_number: BillNumber::new(bill),
        }
    }

    fn graph_for(dataset: &Dataset) -> Subgraph {
        filter(
            dataset,
            &FilterParams {
                min_collaborations: 1,
                ..FilterParams::default()
            },
        )
    }

    #[test]
    fn aggregates_neighbors_and_policies() {
        let dataset = Dataset::new(
            vec![
                legislator("A", "CA"),
                legislator("B", "CA"),
                legislator("C", "NY"),
            ],
            vec![
                bill("1", "Health"),
                bill("2", "Health"),
                bill("3", "Taxation"),
            ],
            vec![
                collab("A", "B", "1"),
                collab("A", "B", "2"),
                collab("A", "C", "3"),
                // Second record on bill 1; must not double-count the bill.
                collab("B", "A", "1"),
            ],
            vec![],
            Metadata::default(),
        );
        let graph = graph_for(&dataset);

        let details = node_details(&dataset, &graph, &LegislatorId::new("A")).unwrap();

        assert_eq!(details.connected_legislators, 2);
        assert_eq!(details.total_bills, 3);
        assert_eq!(details.bills.len(), 3);
        assert_eq!(
            details.top_policies,
            vec![
                PolicyTally {
                    name: "Health".to_string(),
                    bills: 2
                },
                PolicyTally {
                    name: "Taxation".to_string(),
                    bills: 1
                },
            ]
        );
    }

    #[test]
    fn policy_ties_keep_first_encountered_order() {
        let dataset = Dataset::new(
            vec![legislator("A", "CA"), legislator("B", "CA")],
            vec![
                bill("1", "Agriculture"),
                bill("2", "Energy"),
                bill("3", "Defense"),
                bill("4", "Energy"),
                bill("5", "Agriculture"),
            ],
            vec![
                collab("A", "B", "1"),
                collab("A", "B", "2"),
                collab("A", "B", "3"),
                collab("A", "B", "4"),
                collab("A", "B", "5"),
            ],
            vec![],
            Metadata::default(),
        );
        let graph = graph_for(&dataset);

        let details = node_details(&dataset, &graph, &LegislatorId::new("A")).unwrap();
        let names: Vec<&str> = details
            .top_policies
            .iter()
            .map(|t| t.name.as_str())
            .collect();
        // Agriculture and Energy tie at 2; Agriculture was seen first.
        assert_eq!(names, vec!["Agriculture", "Energy", "Defense"]);
    }

    #[test]
    fn duplicate_policy_rows_count_once_per_bill() {
        let dataset = Dataset::new(
            vec![legislator("A", "CA"), legislator("B", "CA")],
            vec![
                bill("1", "Health"),
                bill("1", "Health"),
                bill("1", "Taxation"),
            ],
            vec![collab("A", "B", "1")],
            vec![],
            Metadata::default(),
        );
        let graph = graph_for(&dataset);

        let details = node_details(&dataset, &graph, &LegislatorId::new("A")).unwrap();
        assert_eq!(
            details.top_policies,
            vec![
                PolicyTally {
                    name: "Health".to_string(),
                    bills: 1
                },
                PolicyTally {
                    name: "Taxation".to_string(),
                    bills: 1
                },
            ]
        );
    }

    #[test]
    fn bill_list_is_capped_but_total_is_not() {
        let mut bills = Vec::new();
        let mut collaborations = Vec::new();
        for i in 0..30 {
            let number = format!("hr{i}");
            bills.push(bill(&number, "Health"));
            collaborations.push(collab("A", "B", &number));
        }
        let dataset = Dataset::new(
            vec![legislator("A", "CA"), legislator("B", "CA")],
            bills,
            collaborations,
            vec![],
            Metadata::default(),
        );
        let graph = graph_for(&dataset);

        let details = node_details(&dataset, &graph, &LegislatorId::new("A")).unwrap();
        assert_eq!(details.bills.len(), BILL_LIST_CAP);
        assert_eq!(details.total_bills, 30);
    }

    #[test]
    fn absent_nodes_have_no_details() {
        let dataset = Dataset::new(vec![], vec![], vec![], vec![], Metadata::default());
        let graph = graph_for(&dataset);
        assert!(node_details(&dataset, &graph, &LegislatorId::new("A")).is_none());
    }

    #[test]
    fn titles_at_or_below_the_threshold_pass_through() {
        let short = "a".repeat(100);
        assert_eq!(truncate_title(&short), short);
    }

    #[test]
    fn titles_between_threshold_and_cut_gain_only_the_ellipsis() {
        // 101..=120 chars trip the threshold but survive the cut whole,
        // so the output is longer than the input.
        let title = "b".repeat(110);
        let truncated = truncate_title(&title);
        assert_eq!(truncated, format!("{}...", "b".repeat(110)));
        assert!(truncated.len() > title.len());
    }

    #[test]
    fn long_titles_are_cut_at_the_cut_point() {
        let title = "c".repeat(200);
        assert_eq!(truncate_title(&title), format!("{}...", "c".repeat(120)));
    }
}
