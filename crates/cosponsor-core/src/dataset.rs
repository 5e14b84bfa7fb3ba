use crate::{Bill, BillNumber, Collaboration, Legislator, LegislatorId, Metadata, Policy};
use std::collections::HashMap;

/// The full network dataset, loaded once and owned by the application
/// root. Subgraphs, layouts, and view state are all rebuilt from it and
/// never feed back into it.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    legislators: Vec<Legislator>,
    bills: Vec<Bill>,
    collaborations: Vec<Collaboration>,
    policies: Vec<Policy>,
    metadata: Metadata,

    legislator_index: HashMap<LegislatorId, usize>,
    bill_index: HashMap<BillNumber, Vec<usize>>,
}

impl Dataset {
    /// Build the dataset and its lookup indexes. Duplicate legislator ids
    /// are collapsed first-seen-wins; duplicate bill rows are kept (one
    /// bill may carry several policy links) and reached through
    /// [`Dataset::bill_rows`].
    pub fn new(
        legislators: Vec<Legislator>,
        bills: Vec<Bill>,
        collaborations: Vec<Collaboration>,
        policies: Vec<Policy>,
        metadata: Metadata,
    ) -> Self {
        let mut deduped: Vec<Legislator> = Vec::with_capacity(legislators.len());
        let mut legislator_index = HashMap::with_capacity(legislators.len());
        for legislator in legislators {
            if !legislator_index.contains_key(&legislator.id) {
                legislator_index.insert(legislator.id.clone(), deduped.len());
                deduped.push(legislator);
            }
        }

        let mut bill_index: HashMap<BillNumber, Vec<usize>> = HashMap::new();
        for (row, bill) in bills.iter().enumerate() {
            bill_index
                .entry(bill.bill_number.clone())
                .or_default()
                .push(row);
        }

        Self {
            legislators: deduped,
            bills,
            collaborations,
            policies,
            metadata,
            legislator_index,
            bill_index,
        }
    }

    pub fn legislators(&self) -> &[Legislator] {
        &self.legislators
    }

    pub fn bills(&self) -> &[Bill] {
        &self.bills
    }

    pub fn collaborations(&self) -> &[Collaboration] {
        &self.collaborations
    }

    pub fn policies(&self) -> &[Policy] {
        &self.policies
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn legislator(&self, id: &LegislatorId) -> Option<&Legislator> {
        self.legislator_index
            .get(id)
            .map(|&row| &self.legislators[row])
    }

    /// All bill rows recorded under `number`. More than one row means the
    /// bill is linked to several policies.
    pub fn bill_rows(&self, number: &BillNumber) -> impl Iterator<Item = &Bill> {
        self.bill_index
            .get(number)
            .into_iter()
            .flatten()
            .map(|&row| &self.bills[row])
    }

    /// First recorded row for `number`, the canonical one for titles and
    /// action dates.
    pub fn bill(&self, number: &BillNumber) -> Option<&Bill> {
        self.bill_rows(number).next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LegislatorMetrics, Party};

    fn legislator(id: &str, state: &str) -> Legislator {
        Legislator {
            id: LegislatorId::new(id),
            name: format!("Member {id}"),
            party: Party::Democrat,
            state: state.to_string(),
            district: None,
            metrics: LegislatorMetrics::default(),
        }
    }

    fn bill(number: &str, policy: &str) -> Bill {
        Bill {
            bill_number: BillNumber::new(number),
            title: format!("An act: {number}"),
            policy_id: Some("1".to_string()),
            policy_name: policy.to_string(),
            latest_action_date: Some("2022-01-01".to_string()),
        }
    }

    #[test]
    fn duplicate_legislators_collapse_first_seen_wins() {
        let mut duplicate = legislator("A000001", "CA");
        duplicate.name = "Changed Later".to_string();

        let dataset = Dataset::new(
            vec![legislator("A000001", "CA"), duplicate],
            vec![],
            vec![],
            vec![],
            Metadata::default(),
        );

        assert_eq!(dataset.legislators().len(), 1);
        assert_eq!(
            dataset
                .legislator(&LegislatorId::new("A000001"))
                .unwrap()
                .name,
            "Member A000001"
        );
    }

    #[test]
    fn bill_rows_keeps_all_policy_links() {
        let dataset = Dataset::new(
            vec![],
            vec![bill("hr1-117", "Health"), bill("hr1-117", "Taxation")],
            vec![],
            vec![],
            Metadata::default(),
        );

        let number = BillNumber::new("hr1-117");
        assert_eq!(dataset.bill_rows(&number).count(), 2);
        assert_eq!(dataset.bill(&number).unwrap().policy_name, "Health");
        assert!(dataset.bill(&BillNumber::new("s9-117")).is_none());
    }
}
