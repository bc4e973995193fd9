//! Competition variants and the numeric rules that govern each of them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::types::Points;

/// Default roster size for every variant.
pub const DEFAULT_MAX_RIDERS: usize = 15;
/// Default cap on riders sharing one team affiliation.
pub const DEFAULT_MAX_PER_AFFILIATION: usize = 4;
/// Default budget for the normal competition.
pub const DEFAULT_NORMAL_BUDGET: Points = 11_000;
/// Default budget for the pro competition.
pub const DEFAULT_PRO_BUDGET: Points = 5_500;

/// The parallel competitions a user keeps a roster for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompetitionVariant {
    Normal,
    Pro,
}

impl CompetitionVariant {
    pub const ALL: [CompetitionVariant; 2] = [CompetitionVariant::Normal, CompetitionVariant::Pro];

    /// Lowercase identifier used in URLs, storage and roster labels.
    pub fn as_str(&self) -> &'static str {
        match self {
            CompetitionVariant::Normal => "normal",
            CompetitionVariant::Pro => "pro",
        }
    }
}

impl fmt::Display for CompetitionVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown competition variant: {0}")]
pub struct UnknownVariant(pub String);

impl FromStr for CompetitionVariant {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "normal" => Ok(CompetitionVariant::Normal),
            "pro" => Ok(CompetitionVariant::Pro),
            _ => Err(UnknownVariant(s.to_string())),
        }
    }
}

/// Numeric constraints for one competition variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ruleset {
    pub max_riders: usize,
    pub max_per_affiliation: usize,
    pub budget_limit: Points,
}

impl Ruleset {
    pub fn new(max_riders: usize, max_per_affiliation: usize, budget_limit: Points) -> Self {
        Self {
            max_riders,
            max_per_affiliation,
            budget_limit,
        }
    }
}

/// The ruleset of every variant, supplied by configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rulesets {
    pub normal: Ruleset,
    pub pro: Ruleset,
}

impl Rulesets {
    pub fn new(normal: Ruleset, pro: Ruleset) -> Self {
        Self { normal, pro }
    }

    pub fn get(&self, variant: CompetitionVariant) -> &Ruleset {
        match variant {
            CompetitionVariant::Normal => &self.normal,
            CompetitionVariant::Pro => &self.pro,
        }
    }
}

impl Default for Rulesets {
    fn default() -> Self {
        Self {
            normal: Ruleset::new(
                DEFAULT_MAX_RIDERS,
                DEFAULT_MAX_PER_AFFILIATION,
                DEFAULT_NORMAL_BUDGET,
            ),
            pro: Ruleset::new(
                DEFAULT_MAX_RIDERS,
                DEFAULT_MAX_PER_AFFILIATION,
                DEFAULT_PRO_BUDGET,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variant_parses_case_insensitively() {
        assert_eq!("PRO".parse::<CompetitionVariant>(), Ok(CompetitionVariant::Pro));
        assert_eq!("normal".parse::<CompetitionVariant>(), Ok(CompetitionVariant::Normal));
        assert!("amateur".parse::<CompetitionVariant>().is_err());
    }

    #[test]
    fn variant_serializes_lowercase() {
        let json = serde_json::to_string(&CompetitionVariant::Normal).unwrap();
        assert_eq!(json, "\"normal\"");
    }

    #[test]
    fn defaults_differ_only_in_budget() {
        let rules = Rulesets::default();
        assert_eq!(rules.get(CompetitionVariant::Normal).budget_limit, 11_000);
        assert_eq!(rules.get(CompetitionVariant::Pro).budget_limit, 5_500);
        assert_eq!(
            rules.get(CompetitionVariant::Normal).max_riders,
            rules.get(CompetitionVariant::Pro).max_riders
        );
    }
}
