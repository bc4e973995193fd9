//! Rider types: the validated [`Rider`] used by rosters and the raw
//! [`RiderRecord`] exactly as it arrives from the data feed.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::types::Points;

/// A selectable rider with a cost and a real-world team affiliation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rider {
    pub name: String,
    pub team_affiliation: String,
    pub points: Points,
}

impl Rider {
    pub fn new(name: impl Into<String>, team_affiliation: impl Into<String>, points: Points) -> Self {
        Self {
            name: name.into(),
            team_affiliation: team_affiliation.into(),
            points,
        }
    }
}

/// One record of the rider feed (`{"Renner", "Team", "Points"}`).
///
/// `Points` is mandatory and must be a non-negative integer; a record that
/// violates this makes the whole feed malformed. Name and team are kept
/// lenient: a missing or non-string value is stored as `None` so the record
/// still counts toward the points bounds but never shows up in filter results.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RiderRecord {
    #[serde(rename = "Renner", default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(rename = "Team", default, deserialize_with = "lenient_string")]
    pub team: Option<String>,
    #[serde(rename = "Points")]
    pub points: Points,
}

impl RiderRecord {
    /// Convert into a [`Rider`] if both name and team are well-formed strings.
    pub fn to_rider(&self) -> Option<Rider> {
        match (&self.name, &self.team) {
            (Some(name), Some(team)) => Some(Rider::new(name.clone(), team.clone(), self.points)),
            _ => None,
        }
    }
}

impl From<Rider> for RiderRecord {
    fn from(rider: Rider) -> Self {
        Self {
            name: Some(rider.name),
            team: Some(rider.team_affiliation),
            points: rider.points,
        }
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn record_parses_feed_field_names() {
        let record: RiderRecord =
            serde_json::from_value(json!({"Renner": "Wout van Aert", "Team": "Visma", "Points": 1500}))
                .unwrap();
        assert_eq!(
            record.to_rider(),
            Some(Rider::new("Wout van Aert", "Visma", 1500))
        );
    }

    #[test]
    fn non_string_name_is_kept_but_not_a_rider() {
        let record: RiderRecord =
            serde_json::from_value(json!({"Renner": 42, "Team": "Visma", "Points": 10})).unwrap();
        assert_eq!(record.name, None);
        assert_eq!(record.points, 10);
        assert!(record.to_rider().is_none());
    }

    #[test]
    fn missing_team_is_kept_but_not_a_rider() {
        let record: RiderRecord =
            serde_json::from_value(json!({"Renner": "Solo", "Points": 10})).unwrap();
        assert_eq!(record.team, None);
        assert!(record.to_rider().is_none());
    }

    #[test]
    fn negative_points_are_rejected() {
        let result: Result<RiderRecord, _> =
            serde_json::from_value(json!({"Renner": "A", "Team": "X", "Points": -5}));
        assert!(result.is_err());
    }

    #[test]
    fn missing_points_are_rejected() {
        let result: Result<RiderRecord, _> =
            serde_json::from_value(json!({"Renner": "A", "Team": "X"}));
        assert!(result.is_err());
    }
}
