//! Rider catalog: the read-only list of selectable riders for a session.
//!
//! The catalog is built once from the raw feed and never mutated. Filtering
//! is pure and preserves feed order.

use serde::{Deserialize, Serialize};

use crate::rider::{Rider, RiderRecord};
use crate::types::Points;

/// Errors raised while parsing a rider feed.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Malformed rider feed: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Lowest and highest points across the full loaded catalog.
///
/// Used by clients as slider bounds for the points filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PointsBounds {
    pub min: Points,
    pub max: Points,
}

/// Filter parameters. All predicates are ANDed; empty strings match everything.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RiderFilter {
    /// Case-insensitive substring of the rider name.
    #[serde(default)]
    pub name: String,
    /// Case-insensitive substring of the team affiliation.
    #[serde(default)]
    pub team: String,
    /// Inclusive upper bound on points. `None` means no cap.
    pub max_points: Option<Points>,
}

#[derive(Debug, Clone, Default)]
pub struct RiderCatalog {
    records: Vec<RiderRecord>,
    bounds: Option<PointsBounds>,
}

impl RiderCatalog {
    /// A catalog with no riders.
    pub fn empty() -> Self {
        Self::default()
    }

    fn from_records(records: Vec<RiderRecord>) -> Self {
        let bounds = records
            .iter()
            .map(|r| r.points)
            .fold(None, |acc: Option<PointsBounds>, p| {
                Some(match acc {
                    None => PointsBounds { min: p, max: p },
                    Some(b) => PointsBounds {
                        min: b.min.min(p),
                        max: b.max.max(p),
                    },
                })
            });
        Self { records, bounds }
    }

    /// Parse a raw JSON feed. Any malformed record rejects the whole feed.
    pub fn try_load(raw: &[u8]) -> Result<Self, CatalogError> {
        let records: Vec<RiderRecord> = serde_json::from_slice(raw)?;
        Ok(Self::from_records(records))
    }

    /// Parse a raw JSON feed, logging and falling back to an empty catalog
    /// on failure. No partial catalog is ever kept.
    pub fn load(raw: &[u8]) -> Self {
        match Self::try_load(raw) {
            Ok(catalog) => {
                tracing::info!(riders = catalog.len(), "Rider catalog loaded");
                catalog
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to load rider catalog, continuing with an empty one");
                Self::empty()
            }
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Points bounds over every loaded record, `None` for an empty catalog.
    pub fn bounds(&self) -> Option<PointsBounds> {
        self.bounds
    }

    /// Riders matching every predicate of `filter`, in catalog order.
    ///
    /// Records with a missing or non-string name or team never match.
    pub fn filter(&self, filter: &RiderFilter) -> Vec<Rider> {
        let name_needle = filter.name.to_lowercase();
        let team_needle = filter.team.to_lowercase();

        self.records
            .iter()
            .filter_map(RiderRecord::to_rider)
            .filter(|r| r.name.to_lowercase().contains(&name_needle))
            .filter(|r| r.team_affiliation.to_lowercase().contains(&team_needle))
            .filter(|r| filter.max_points.map_or(true, |max| r.points <= max))
            .collect()
    }

    /// Exact-name lookup. Returns the first well-formed record with that name.
    pub fn find(&self, name: &str) -> Option<Rider> {
        self.records
            .iter()
            .filter(|r| r.name.as_deref() == Some(name))
            .find_map(RiderRecord::to_rider)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEED: &str = r#"[
        {"Renner": "Tadej Pogacar", "Team": "UAE Team Emirates", "Points": 3000},
        {"Renner": "Jonas Vingegaard", "Team": "Visma", "Points": 2800},
        {"Renner": "Wout van Aert", "Team": "Visma", "Points": 1500},
        {"Renner": 17, "Team": "Ghost", "Points": 5},
        {"Renner": "Arnaud De Lie", "Team": "Lotto", "Points": 900},
        {"Renner": "Nameless Team", "Team": null, "Points": 200}
    ]"#;

    fn catalog() -> RiderCatalog {
        RiderCatalog::try_load(FEED.as_bytes()).expect("feed should parse")
    }

    fn names(riders: &[Rider]) -> Vec<&str> {
        riders.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn load_computes_bounds_over_all_records() {
        let catalog = catalog();
        assert_eq!(catalog.len(), 6);
        assert_eq!(catalog.bounds(), Some(PointsBounds { min: 5, max: 3000 }));
    }

    #[test]
    fn malformed_feed_yields_empty_catalog() {
        let catalog = RiderCatalog::load(br#"{"Renner": "not an array"}"#);
        assert!(catalog.is_empty());
        assert_eq!(catalog.bounds(), None);
    }

    #[test]
    fn one_bad_record_rejects_whole_feed() {
        let raw = br#"[{"Renner": "A", "Team": "X", "Points": 10}, {"Renner": "B", "Team": "X", "Points": "lots"}]"#;
        assert!(RiderCatalog::try_load(raw).is_err());
        assert!(RiderCatalog::load(raw).is_empty());
    }

    #[test]
    fn empty_filter_returns_well_formed_riders_in_order() {
        let riders = catalog().filter(&RiderFilter::default());
        assert_eq!(
            names(&riders),
            vec!["Tadej Pogacar", "Jonas Vingegaard", "Wout van Aert", "Arnaud De Lie"]
        );
    }

    #[test]
    fn name_filter_is_case_insensitive_and_composes_with_points() {
        let filter = RiderFilter {
            name: "A".into(),
            team: String::new(),
            max_points: Some(1000),
        };
        let riders = catalog().filter(&filter);
        assert_eq!(names(&riders), vec!["Arnaud De Lie"]);
    }

    #[test]
    fn team_filter_matches_substring() {
        let filter = RiderFilter {
            team: "visMA".into(),
            ..Default::default()
        };
        let riders = catalog().filter(&filter);
        assert_eq!(names(&riders), vec!["Jonas Vingegaard", "Wout van Aert"]);
    }

    #[test]
    fn max_points_is_inclusive() {
        let filter = RiderFilter {
            max_points: Some(1500),
            ..Default::default()
        };
        let riders = catalog().filter(&filter);
        assert_eq!(names(&riders), vec!["Wout van Aert", "Arnaud De Lie"]);
    }

    #[test]
    fn filter_does_not_consume_catalog() {
        let catalog = catalog();
        let narrow = RiderFilter {
            name: "pogacar".into(),
            ..Default::default()
        };
        assert_eq!(catalog.filter(&narrow).len(), 1);
        assert_eq!(catalog.filter(&RiderFilter::default()).len(), 4);
    }

    #[test]
    fn find_skips_malformed_records() {
        let catalog = catalog();
        assert_eq!(
            catalog.find("Wout van Aert"),
            Some(Rider::new("Wout van Aert", "Visma", 1500))
        );
        assert_eq!(catalog.find("Nameless Team"), None);
        assert_eq!(catalog.find("wout van aert"), None);
    }
}
