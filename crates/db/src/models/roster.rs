//! Persisted roster model.

use pronostiek_core::rider::Rider;
use pronostiek_core::roster::Roster;
use pronostiek_core::ruleset::{CompetitionVariant, UnknownVariant};
use pronostiek_core::types::{DbId, Timestamp};
use sqlx::types::Json;
use sqlx::FromRow;

/// A row from the `rosters` table: one per user and competition variant.
#[derive(Debug, Clone, FromRow)]
pub struct RosterRow {
    pub id: DbId,
    pub user_id: DbId,
    pub competition: String,
    pub team_name: String,
    pub riders: Json<Vec<Rider>>,
    /// Label of the most recent submission, if any.
    pub label: Option<String>,
    pub submitted_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl RosterRow {
    pub fn variant(&self) -> Result<CompetitionVariant, UnknownVariant> {
        self.competition.parse()
    }

    /// Rebuild the domain roster. No selection rules are applied here.
    pub fn to_roster(&self) -> Roster {
        Roster::restore(self.team_name.clone(), self.riders.0.clone())
    }
}

/// What an edit made of the locked roster.
#[derive(Debug)]
pub enum RosterEdit {
    /// Nothing changed; the row is left as it is.
    Unchanged,
    /// Store the new working copy. Submission metadata is kept.
    Save(Roster),
    /// Store the roster as submitted under `label`, stamping `submitted_at`.
    Submit { roster: Roster, label: String },
}
