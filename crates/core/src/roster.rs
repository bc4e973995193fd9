//! Roster: the riders picked for one competition variant, and the rules
//! that decide whether a rider may join and whether the whole team is valid.
//!
//! Totals and per-affiliation counts are always recomputed from the entries,
//! so validity stays correct for rosters restored from storage as well as
//! for rosters built through [`Roster::add`].

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::rider::Rider;
use crate::ruleset::Ruleset;
use crate::types::Points;

/// Why a rider cannot be added. Checks run in declaration order and the
/// first failing one is reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum SelectionError {
    #[error("{name} is already in the team")]
    AlreadySelected { name: String },

    #[error("Team is already full ({max_riders} riders)")]
    RosterFull { max_riders: usize },

    #[error("Adding {name} ({cost} points) exceeds the budget of {budget_limit} points (current: {total_points})")]
    OverBudget {
        name: String,
        cost: Points,
        total_points: Points,
        budget_limit: Points,
    },

    #[error("Already {max_per_affiliation} riders from {affiliation}")]
    AffiliationFull {
        affiliation: String,
        max_per_affiliation: usize,
    },
}

/// A single reason a roster is not (yet) valid for submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RosterViolation {
    RiderCount { required: usize, actual: usize },
    OverBudget { budget_limit: Points, total_points: Points },
    AffiliationLimit {
        affiliation: String,
        max_per_affiliation: usize,
        count: usize,
    },
    MissingTeamName,
}

impl fmt::Display for RosterViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RosterViolation::RiderCount { required, actual } => {
                write!(f, "Select exactly {required} riders (now: {actual})")
            }
            RosterViolation::OverBudget {
                budget_limit,
                total_points,
            } => write!(
                f,
                "Budget of {budget_limit} points exceeded (now: {total_points})"
            ),
            RosterViolation::AffiliationLimit {
                affiliation,
                max_per_affiliation,
                count,
            } => write!(
                f,
                "At most {max_per_affiliation} riders per team allowed ({affiliation}: {count})"
            ),
            RosterViolation::MissingTeamName => f.write_str("Team name is required"),
        }
    }
}

/// Coarse lifecycle of a roster. Only [`RosterState::FullValid`] may be submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RosterState {
    Empty,
    Partial,
    FullInvalid,
    FullValid,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    #[serde(default)]
    team_name: String,
    #[serde(default)]
    entries: Vec<Rider>,
}

impl Roster {
    pub fn new(team_name: impl Into<String>) -> Self {
        Self {
            team_name: team_name.into(),
            entries: Vec::new(),
        }
    }

    /// Rebuild a roster from stored parts without running the add guard.
    ///
    /// Validity is still computed from scratch by [`Roster::is_valid`].
    pub fn restore(team_name: impl Into<String>, entries: Vec<Rider>) -> Self {
        Self {
            team_name: team_name.into(),
            entries,
        }
    }

    pub fn team_name(&self) -> &str {
        &self.team_name
    }

    pub fn set_team_name(&mut self, team_name: impl Into<String>) {
        self.team_name = team_name.into();
    }

    /// Riders in insertion order.
    pub fn entries(&self) -> &[Rider] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|r| r.name == name)
    }

    /// Sum of all entry costs, saturating at `Points::MAX` so an oversized
    /// roster can never wrap back under the budget.
    pub fn total_points(&self) -> Points {
        self.entries
            .iter()
            .fold(0, |total: Points, r| total.saturating_add(r.points))
    }

    /// Number of selected riders per team affiliation.
    pub fn per_affiliation_count(&self) -> BTreeMap<&str, usize> {
        let mut counts = BTreeMap::new();
        for rider in &self.entries {
            *counts.entry(rider.team_affiliation.as_str()).or_insert(0) += 1;
        }
        counts
    }

    /// Run the add guard and report the first failing check.
    pub fn check_add(&self, rider: &Rider, ruleset: &Ruleset) -> Result<(), SelectionError> {
        if self.contains(&rider.name) {
            return Err(SelectionError::AlreadySelected {
                name: rider.name.clone(),
            });
        }

        if self.len() >= ruleset.max_riders {
            return Err(SelectionError::RosterFull {
                max_riders: ruleset.max_riders,
            });
        }

        let total_points = self.total_points();
        if total_points.saturating_add(rider.points) > ruleset.budget_limit {
            return Err(SelectionError::OverBudget {
                name: rider.name.clone(),
                cost: rider.points,
                total_points,
                budget_limit: ruleset.budget_limit,
            });
        }

        let same_team = self
            .entries
            .iter()
            .filter(|r| r.team_affiliation == rider.team_affiliation)
            .count();
        if same_team >= ruleset.max_per_affiliation {
            return Err(SelectionError::AffiliationFull {
                affiliation: rider.team_affiliation.clone(),
                max_per_affiliation: ruleset.max_per_affiliation,
            });
        }

        Ok(())
    }

    /// Whether `rider` may be added right now. Has no side effects.
    pub fn can_add(&self, rider: &Rider, ruleset: &Ruleset) -> bool {
        self.check_add(rider, ruleset).is_ok()
    }

    /// Append `rider` after re-running the add guard.
    pub fn add(&mut self, rider: Rider, ruleset: &Ruleset) -> Result<(), SelectionError> {
        self.check_add(&rider, ruleset)?;
        self.entries.push(rider);
        Ok(())
    }

    /// Remove the rider named `name`. Returns `false` (and changes nothing)
    /// when no such rider is selected.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|r| r.name != name);
        self.entries.len() != before
    }

    /// Every condition that currently blocks submission.
    pub fn validation_report(&self, ruleset: &Ruleset) -> Vec<RosterViolation> {
        let mut violations = Vec::new();

        if self.len() != ruleset.max_riders {
            violations.push(RosterViolation::RiderCount {
                required: ruleset.max_riders,
                actual: self.len(),
            });
        }

        let total_points = self.total_points();
        if total_points > ruleset.budget_limit {
            violations.push(RosterViolation::OverBudget {
                budget_limit: ruleset.budget_limit,
                total_points,
            });
        }

        for (affiliation, count) in self.per_affiliation_count() {
            if count > ruleset.max_per_affiliation {
                violations.push(RosterViolation::AffiliationLimit {
                    affiliation: affiliation.to_string(),
                    max_per_affiliation: ruleset.max_per_affiliation,
                    count,
                });
            }
        }

        if self.team_name.trim().is_empty() {
            violations.push(RosterViolation::MissingTeamName);
        }

        violations
    }

    pub fn is_valid(&self, ruleset: &Ruleset) -> bool {
        self.validation_report(ruleset).is_empty()
    }

    pub fn state(&self, ruleset: &Ruleset) -> RosterState {
        if self.len() >= ruleset.max_riders {
            if self.is_valid(ruleset) {
                RosterState::FullValid
            } else {
                RosterState::FullInvalid
            }
        } else if self.is_empty() {
            RosterState::Empty
        } else {
            RosterState::Partial
        }
    }
}

/// A violation together with its human-readable message.
#[derive(Debug, Clone, Serialize)]
pub struct ReportedViolation {
    #[serde(flatten)]
    pub violation: RosterViolation,
    pub message: String,
}

impl From<RosterViolation> for ReportedViolation {
    fn from(violation: RosterViolation) -> Self {
        let message = violation.to_string();
        Self { violation, message }
    }
}

/// Everything a client needs to render a roster's standing without
/// recomputing anything.
#[derive(Debug, Clone, Serialize)]
pub struct RosterSummary {
    pub state: RosterState,
    pub is_valid: bool,
    pub rider_count: usize,
    pub total_points: Points,
    pub budget_remaining: i64,
    pub violations: Vec<ReportedViolation>,
}

impl RosterSummary {
    pub fn of(roster: &Roster, ruleset: &Ruleset) -> Self {
        let violations: Vec<ReportedViolation> = roster
            .validation_report(ruleset)
            .into_iter()
            .map(ReportedViolation::from)
            .collect();
        let total_points = roster.total_points();

        Self {
            state: roster.state(ruleset),
            is_valid: violations.is_empty(),
            rider_count: roster.len(),
            total_points,
            budget_remaining: i64::from(ruleset.budget_limit) - i64::from(total_points),
            violations,
        }
    }
}
