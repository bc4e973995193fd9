//! Repository for the `rosters` table.
//!
//! Rosters are keyed by `(user_id, competition)`. Reads go straight to the
//! pool; every change runs through [`RosterRepo::edit`], which holds the
//! row lock from read to write.

use pronostiek_core::roster::Roster;
use pronostiek_core::ruleset::CompetitionVariant;
use pronostiek_core::types::DbId;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::roster::{RosterEdit, RosterRow};

const COLUMNS: &str = "id, user_id, competition, team_name, riders, label, submitted_at, \
                       created_at, updated_at";

pub struct RosterRepo;

impl RosterRepo {
    /// All rosters belonging to a user, ordered by competition.
    pub async fn list_for_user(pool: &PgPool, user_id: DbId) -> Result<Vec<RosterRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM rosters WHERE user_id = $1 ORDER BY competition"
        );
        sqlx::query_as::<_, RosterRow>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// The user's roster for one competition, if it was ever edited.
    pub async fn find(
        pool: &PgPool,
        user_id: DbId,
        competition: CompetitionVariant,
    ) -> Result<Option<RosterRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM rosters WHERE user_id = $1 AND competition = $2"
        );
        sqlx::query_as::<_, RosterRow>(&query)
            .bind(user_id)
            .bind(competition.as_str())
            .fetch_optional(pool)
            .await
    }

    /// Apply `apply` to the user's roster for `competition` under a row lock.
    ///
    /// The row is created empty on first use, then locked with `FOR UPDATE`,
    /// so concurrent edits of the same roster run one after the other and
    /// each sees the previous one's result. When `apply` fails the
    /// transaction is rolled back and its error returned unchanged.
    pub async fn edit<F, E>(
        pool: &PgPool,
        user_id: DbId,
        competition: CompetitionVariant,
        apply: F,
    ) -> Result<RosterRow, E>
    where
        F: FnOnce(Roster) -> Result<RosterEdit, E>,
        E: From<sqlx::Error>,
    {
        let mut tx = pool.begin().await?;

        sqlx::query(
            "INSERT INTO rosters (user_id, competition) VALUES ($1, $2) \
             ON CONFLICT (user_id, competition) DO NOTHING",
        )
        .bind(user_id)
        .bind(competition.as_str())
        .execute(&mut *tx)
        .await?;

        let query = format!(
            "SELECT {COLUMNS} FROM rosters WHERE user_id = $1 AND competition = $2 FOR UPDATE"
        );
        let current = sqlx::query_as::<_, RosterRow>(&query)
            .bind(user_id)
            .bind(competition.as_str())
            .fetch_one(&mut *tx)
            .await?;

        let row = match apply(current.to_roster())? {
            RosterEdit::Unchanged => current,
            RosterEdit::Save(roster) => {
                let query = format!(
                    "UPDATE rosters SET team_name = $2, riders = $3 \
                     WHERE id = $1 RETURNING {COLUMNS}"
                );
                sqlx::query_as::<_, RosterRow>(&query)
                    .bind(current.id)
                    .bind(roster.team_name())
                    .bind(Json(roster.entries()))
                    .fetch_one(&mut *tx)
                    .await?
            }
            RosterEdit::Submit { roster, label } => {
                let query = format!(
                    "UPDATE rosters SET team_name = $2, riders = $3, label = $4, submitted_at = NOW() \
                     WHERE id = $1 RETURNING {COLUMNS}"
                );
                sqlx::query_as::<_, RosterRow>(&query)
                    .bind(current.id)
                    .bind(roster.team_name())
                    .bind(Json(roster.entries()))
                    .bind(&label)
                    .fetch_one(&mut *tx)
                    .await?
            }
        };

        tx.commit().await?;
        Ok(row)
    }
}
