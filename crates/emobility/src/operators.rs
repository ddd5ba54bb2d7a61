//! Derives the canonical operator hierarchy from station identifiers.
//! An evse id embeds its operator's id as a prefix; when that prefix
//! disagrees with the operator the feed listed the station under, the
//! station belongs to an undeclared sub-operator.

use std::sync::LazyLock;

use model::{feed::EvseDataRecord, feed::FeedOperator, operator::Operator};
use regex::Regex;

use crate::{ImportError, ImportResult};

/// Operator-id prefix of an evse id: either a two-letter country code,
/// an optional separator and three alphanumerics, or a numeric country
/// code, a separator and three digits.
static OPERATOR_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([A-Za-z]{2}\*?[A-Za-z0-9]{3})|(\+?[0-9]{1,3}\*[0-9]{3})")
        .expect("operator id pattern must compile")
});

/// First operator-id prefix found in the evse id, if any. Pure, so the
/// pattern stays testable without any persistence around it.
pub fn candidate_operator_id(evse_id: &str) -> Option<&str> {
    OPERATOR_ID.find(evse_id).map(|m| m.as_str())
}

/// A station record with its nominal operator id already corrected.
#[derive(Debug, Clone)]
pub struct StationRecord {
    pub operator_id: String,
    pub evse: EvseDataRecord,
}

/// Output of the resolution pass over a whole feed.
#[derive(Debug, Clone, Default)]
pub struct Resolution {
    /// Operators as declared by the feed.
    pub top_level: Vec<Operator>,
    /// Sub-operators synthesized from evse ids. Stations sharing a
    /// sub-operator produce one row each; the primary-key upsert at
    /// persistence time collapses them.
    pub derived: Vec<Operator>,
    /// All stations of the batch, operator ids corrected.
    pub stations: Vec<StationRecord>,
}

pub fn resolve(feed: &[FeedOperator]) -> ImportResult<Resolution> {
    let mut resolution = Resolution::default();

    for feed_operator in feed {
        resolution.top_level.push(Operator::top_level(
            feed_operator.operator_id.clone(),
            feed_operator.operator_name.clone(),
        ));

        for evse in &feed_operator.evse_data_records {
            let candidate = candidate_operator_id(&evse.evse_id).ok_or_else(|| {
                ImportError::MalformedEvseId {
                    evse_id: evse.evse_id.clone(),
                }
            })?;

            let operator_id = if candidate == feed_operator.operator_id {
                feed_operator.operator_id.clone()
            } else {
                resolution
                    .derived
                    .push(Operator::derived(candidate, &*feed_operator.operator_id));
                candidate.to_owned()
            };

            resolution.stations.push(StationRecord {
                operator_id,
                evse: evse.clone(),
            });
        }
    }

    Ok(resolution)
}

#[cfg(test)]
mod tests {
    use model::id::Id;

    use super::*;

    fn feed_with(operator_id: &str, evse_ids: &[&str]) -> Vec<FeedOperator> {
        vec![FeedOperator {
            operator_id: operator_id.to_owned(),
            operator_name: Some("Testbetreiber".to_owned()),
            evse_data_records: evse_ids
                .iter()
                .map(|id| EvseDataRecord {
                    evse_id: (*id).to_owned(),
                    ..EvseDataRecord::default()
                })
                .collect(),
        }]
    }

    #[test]
    fn candidate_with_separator() {
        assert_eq!(candidate_operator_id("DE*TBA*E1234"), Some("DE*TBA"));
    }

    #[test]
    fn candidate_without_separator() {
        assert_eq!(candidate_operator_id("DETBAE45"), Some("DETBA"));
    }

    #[test]
    fn candidate_numeric() {
        assert_eq!(candidate_operator_id("+49*839*E123"), Some("+49*839"));
    }

    #[test]
    fn candidate_missing() {
        assert_eq!(candidate_operator_id("!?"), None);
        assert_eq!(candidate_operator_id(""), None);
    }

    #[test]
    fn matching_prefix_changes_nothing() {
        let resolution = resolve(&feed_with("DE*TBA", &["DE*TBA*E1234"])).unwrap();
        assert!(resolution.derived.is_empty());
        assert_eq!(resolution.stations[0].operator_id, "DE*TBA");
    }

    #[test]
    fn differing_prefix_derives_a_sub_operator() {
        let resolution = resolve(&feed_with("DE*TBA", &["DE*TBB*E5678"])).unwrap();
        assert_eq!(
            resolution.derived,
            vec![Operator {
                id: Id::new("DE*TBB".to_owned()),
                name: None,
                parent_id: Some(Id::new("DE*TBA".to_owned())),
            }]
        );
        assert_eq!(resolution.stations[0].operator_id, "DE*TBB");
    }

    #[test]
    fn duplicate_sub_operators_are_kept() {
        // collapsing is left to the primary-key upsert
        let resolution =
            resolve(&feed_with("DE*TBA", &["DE*TBB*E1", "DE*TBB*E2"])).unwrap();
        assert_eq!(resolution.derived.len(), 2);
    }

    #[test]
    fn malformed_evse_id_is_fatal() {
        let why = resolve(&feed_with("DE*TBA", &["???"])).unwrap_err();
        assert!(matches!(
            why,
            ImportError::MalformedEvseId { evse_id } if evse_id == "???"
        ));
    }
}
