//! Loading the network dataset: wire DTOs, shape validation, and the
//! async fetch against `/api/network-data`.

mod dto;
mod error;
mod fetch;

pub use dto::NetworkDataDto;
pub use error::DataError;
pub use fetch::{DEFAULT_DATA_URL, fetch_network_data};

use cosponsor_core::Dataset;

/// Required top-level sections of the payload. Anything missing is a
/// shape error, reported before deserialization so the message names the
/// sections instead of a serde path.
const REQUIRED_KEYS: [&str; 5] = [
    "legislators",
    "bills",
    "collaborations",
    "policies",
    "metadata",
];

/// Parse and validate a `/api/network-data` body into a [`Dataset`].
pub fn parse_network_data(body: &str) -> Result<Dataset, DataError> {
    let value: serde_json::Value = serde_json::from_str(body)?;

    let missing: Vec<&str> = REQUIRED_KEYS
        .iter()
        .copied()
        .filter(|key| value.get(key).is_none())
        .collect();
    if !missing.is_empty() {
        return Err(DataError::Shape(missing.join(", ")));
    }

    let dto: NetworkDataDto = serde_json::from_value(value)?;
    let dataset = dto.into_dataset();
    tracing::info!(
        legislators = dataset.legislators().len(),
        bills = dataset.bills().len(),
        collaborations = dataset.collaborations().len(),
        policies = dataset.policies().len(),
        "network dataset loaded"
    );
    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cosponsor_core::{LegislatorId, Party};

    fn sample_body() -> String {
        serde_json::json!({
            "legislators": [
                {
                    "id": "A000001",
                    "name": "Alex Adams",
                    "party": "D",
                    "state": "CA",
                    "district": 12,
                    "metrics": {"total_collaborations": 40, "primary_count": 3, "cosponsor_count": 37}
                },
                {
                    "id": "B000002",
                    "name": "Blake Burns",
                    "party": "R",
                    "state": "TX",
                    "district": -1
                },
                {
                    "id": "A000001",
                    "name": "Duplicate Row",
                    "party": "I",
                    "state": "NV"
                }
            ],
            "bills": [
                {
                    "bill_number": "hr1-117",
                    "title": "An act",
                    "policy_id": 21,
                    "policy_name": "Health",
                    "latest_action_date": "2022-03-01"
                },
                {
                    "bill_number": "hr2-117",
                    "title": "Another act",
                    "policy_id": null,
                    "policy_name": "Uncategorized",
                    "latest_action_date": null
                }
            ],
            "collaborations": [
                {"source": "A000001", "target": "B000002", "bill_number": "hr1-117"}
            ],
            "policies": [
                {"id": "21", "name": "Health"}
            ],
            "metadata": {
                "congress_range": {"start": 117, "end": 118},
                "date_range": {"start": "2021-01-03", "end": "2022-12-31"},
                "policies": {"total": 1, "counts": {"Health": 1}},
                "total_bills": 2,
                "total_collaborations": 1,
                "total_legislators": 2,
                "party_distribution": {"D": 1, "R": 1}
            }
        })
        .to_string()
    }

    #[test]
    fn parses_a_complete_payload() {
        let dataset = parse_network_data(&sample_body()).unwrap();

        assert_eq!(dataset.legislators().len(), 2);
        assert_eq!(dataset.bills().len(), 2);
        assert_eq!(dataset.collaborations().len(), 1);
        assert_eq!(dataset.metadata().congress_range.start, 117);
        assert_eq!(dataset.metadata().party_distribution.get("D"), Some(&1));
    }

    #[test]
    fn duplicate_legislators_keep_the_first_row() {
        let dataset = parse_network_data(&sample_body()).unwrap();
        let first = dataset.legislator(&LegislatorId::new("A000001")).unwrap();
        assert_eq!(first.name, "Alex Adams");
        assert_eq!(first.party, Party::Democrat);
    }

    #[test]
    fn numeric_policy_ids_become_strings() {
        let dataset = parse_network_data(&sample_body()).unwrap();
        assert_eq!(dataset.bills()[0].policy_id.as_deref(), Some("21"));
        assert_eq!(dataset.bills()[1].policy_id, None);
    }

    #[test]
    fn negative_district_means_none() {
        let dataset = parse_network_data(&sample_body()).unwrap();
        let senator = dataset.legislator(&LegislatorId::new("B000002")).unwrap();
        assert_eq!(senator.district, None);
    }

    #[test]
    fn absent_metrics_default_to_zero() {
        let dataset = parse_network_data(&sample_body()).unwrap();
        let senator = dataset.legislator(&LegislatorId::new("B000002")).unwrap();
        assert_eq!(senator.metrics.total_collaborations, 0);
    }

    #[test]
    fn missing_sections_are_a_shape_error() {
        let body = r#"{"legislators": [], "bills": []}"#;
        match parse_network_data(body) {
            Err(DataError::Shape(missing)) => {
                assert_eq!(missing, "collaborations, policies, metadata");
            }
            other => panic!("expected shape error, got {other:?}"),
        }
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(
            parse_network_data("{not json"),
            Err(DataError::Parse(_))
        ));
    }
}
