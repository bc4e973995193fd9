//! One roster per competition variant, addressed explicitly by variant.

use std::collections::BTreeMap;

use crate::rider::Rider;
use crate::roster::{Roster, RosterSummary, SelectionError};
use crate::ruleset::{CompetitionVariant, Rulesets};

/// Holds a user's rosters and applies the variant's ruleset to every change.
///
/// Rosters are independent: mutating one variant never touches another.
#[derive(Debug, Clone)]
pub struct TeamBuilder {
    rulesets: Rulesets,
    rosters: BTreeMap<CompetitionVariant, Roster>,
}

impl TeamBuilder {
    /// A builder with an empty roster for every variant.
    pub fn new(rulesets: Rulesets) -> Self {
        let rosters = CompetitionVariant::ALL
            .into_iter()
            .map(|v| (v, Roster::default()))
            .collect();
        Self { rulesets, rosters }
    }

    pub fn rulesets(&self) -> &Rulesets {
        &self.rulesets
    }

    /// Install a previously persisted roster as-is.
    pub fn restore(&mut self, variant: CompetitionVariant, roster: Roster) {
        self.rosters.insert(variant, roster);
    }

    pub fn roster(&self, variant: CompetitionVariant) -> &Roster {
        // Every variant is seeded in `new` and never removed.
        &self.rosters[&variant]
    }

    fn roster_mut(&mut self, variant: CompetitionVariant) -> &mut Roster {
        self.rosters.entry(variant).or_default()
    }

    pub fn can_add(&self, variant: CompetitionVariant, rider: &Rider) -> bool {
        self.roster(variant)
            .can_add(rider, self.rulesets.get(variant))
    }

    pub fn add(&mut self, variant: CompetitionVariant, rider: Rider) -> Result<(), SelectionError> {
        let ruleset = *self.rulesets.get(variant);
        self.roster_mut(variant).add(rider, &ruleset)
    }

    pub fn remove(&mut self, variant: CompetitionVariant, name: &str) -> bool {
        self.roster_mut(variant).remove(name)
    }

    pub fn set_team_name(&mut self, variant: CompetitionVariant, team_name: impl Into<String>) {
        self.roster_mut(variant).set_team_name(team_name);
    }

    pub fn is_valid(&self, variant: CompetitionVariant) -> bool {
        self.roster(variant).is_valid(self.rulesets.get(variant))
    }

    pub fn summary(&self, variant: CompetitionVariant) -> RosterSummary {
        RosterSummary::of(self.roster(variant), self.rulesets.get(variant))
    }

    /// Copy of the roster ready to hand to storage, or `None` while it is
    /// not valid for submission.
    pub fn submission(&self, variant: CompetitionVariant) -> Option<Roster> {
        self.is_valid(variant).then(|| self.roster(variant).clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ruleset::Ruleset;

    fn builder() -> TeamBuilder {
        TeamBuilder::new(Rulesets::new(
            Ruleset::new(2, 1, 6_000),
            Ruleset::new(2, 2, 3_000),
        ))
    }

    #[test]
    fn variants_keep_independent_rosters() {
        let mut builder = builder();
        builder
            .add(CompetitionVariant::Normal, Rider::new("A", "X", 3_000))
            .unwrap();

        assert_eq!(builder.roster(CompetitionVariant::Normal).len(), 1);
        assert!(builder.roster(CompetitionVariant::Pro).is_empty());
    }

    #[test]
    fn each_variant_uses_its_own_budget() {
        let mut builder = builder();
        let pricey = Rider::new("A", "X", 4_000);

        assert!(builder.can_add(CompetitionVariant::Normal, &pricey));
        assert!(!builder.can_add(CompetitionVariant::Pro, &pricey));
        assert!(builder.add(CompetitionVariant::Pro, pricey).is_err());
    }

    #[test]
    fn submission_only_for_valid_roster() {
        let mut builder = builder();
        let v = CompetitionVariant::Normal;
        builder.add(v, Rider::new("A", "TeamX", 3_000)).unwrap();
        builder.add(v, Rider::new("C", "TeamY", 3_000)).unwrap();
        assert!(builder.submission(v).is_none());

        builder.set_team_name(v, "Kopmannen");
        let submitted = builder.submission(v).expect("roster should be valid");
        assert_eq!(submitted.team_name(), "Kopmannen");

        // Submitting copies; the working roster stays editable.
        assert!(builder.remove(v, "A"));
        assert_eq!(submitted.len(), 2);
        assert!(!builder.is_valid(v));
    }

    #[test]
    fn restore_skips_the_add_guard() {
        let mut builder = builder();
        let roster = Roster::restore(
            "Overloaded",
            vec![
                Rider::new("A", "X", 5_000),
                Rider::new("B", "X", 5_000),
            ],
        );
        builder.restore(CompetitionVariant::Normal, roster);

        let summary = builder.summary(CompetitionVariant::Normal);
        assert!(!summary.is_valid);
        assert_eq!(summary.total_points, 10_000);
        assert_eq!(summary.violations.len(), 2);
    }
}
