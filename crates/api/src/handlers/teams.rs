//! Handlers for the `/teams` resource: the caller's per-competition rosters.
//!
//! Each change restores the stored roster into a [`TeamBuilder`] inside
//! [`RosterRepo::edit`], so the row stays locked until the result is written
//! back.

use std::collections::BTreeMap;

use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::Local;
use pronostiek_core::catalog::RiderFilter;
use pronostiek_core::error::CoreError;
use pronostiek_core::naming::roster_label;
use pronostiek_core::rider::Rider;
use pronostiek_core::roster::{Roster, RosterSummary, SelectionError};
use pronostiek_core::ruleset::{CompetitionVariant, Ruleset, Rulesets};
use pronostiek_core::team_builder::TeamBuilder;
use pronostiek_core::types::{DbId, Timestamp};
use pronostiek_db::models::roster::{RosterEdit, RosterRow};
use pronostiek_db::repositories::RosterRepo;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /teams/{variant}/riders`.
#[derive(Debug, Deserialize)]
pub struct AddRiderRequest {
    pub name: String,
}

/// Request body for `PUT /teams/{variant}/name`.
#[derive(Debug, Deserialize, Validate)]
pub struct SetTeamNameRequest {
    #[validate(length(max = 100, message = "Team name must be at most 100 characters"))]
    pub team_name: String,
}

/// Request body for `POST /teams/validate`.
#[derive(Debug, Deserialize)]
pub struct ValidateRosterRequest {
    pub competition: CompetitionVariant,
    pub roster: Roster,
}

/// A roster together with everything needed to render its standing.
#[derive(Debug, Serialize)]
pub struct RosterResponse {
    pub competition: CompetitionVariant,
    pub team_name: String,
    pub riders: Vec<Rider>,
    pub per_team: BTreeMap<String, usize>,
    pub ruleset: Ruleset,
    pub summary: RosterSummary,
    /// Label of the most recent submission.
    pub label: Option<String>,
    pub submitted_at: Option<Timestamp>,
}

impl RosterResponse {
    fn build(builder: &TeamBuilder, variant: CompetitionVariant, row: Option<&RosterRow>) -> Self {
        let roster = builder.roster(variant);
        Self {
            competition: variant,
            team_name: roster.team_name().to_string(),
            riders: roster.entries().to_vec(),
            per_team: roster
                .per_affiliation_count()
                .into_iter()
                .map(|(team, count)| (team.to_string(), count))
                .collect(),
            ruleset: *builder.rulesets().get(variant),
            summary: builder.summary(variant),
            label: row.and_then(|r| r.label.clone()),
            submitted_at: row.and_then(|r| r.submitted_at),
        }
    }

    fn from_row(rulesets: Rulesets, variant: CompetitionVariant, row: &RosterRow) -> Self {
        let builder = builder_with(rulesets, variant, row.to_roster());
        Self::build(&builder, variant, Some(row))
    }
}

/// A catalog rider annotated with whether it can join the caller's roster.
#[derive(Debug, Serialize)]
pub struct Candidate {
    #[serde(flatten)]
    pub rider: Rider,
    pub can_add: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blocked_by: Option<SelectionError>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/teams
///
/// The caller's roster for every competition variant.
pub async fn list_teams(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<RosterResponse>>>> {
    let rows = RosterRepo::list_for_user(&state.pool, auth_user.user_id).await?;

    let mut builder = TeamBuilder::new(state.config.rulesets);
    let mut by_variant = BTreeMap::new();
    for row in rows {
        match row.variant() {
            Ok(variant) => {
                builder.restore(variant, row.to_roster());
                by_variant.insert(variant, row);
            }
            Err(e) => {
                tracing::warn!(roster_id = row.id, error = %e, "Skipping stored roster");
            }
        }
    }

    let data = CompetitionVariant::ALL
        .into_iter()
        .map(|v| RosterResponse::build(&builder, v, by_variant.get(&v)))
        .collect();

    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/teams/{variant}
pub async fn get_team(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(variant): Path<String>,
) -> AppResult<Json<DataResponse<RosterResponse>>> {
    let variant = parse_variant(&variant)?;
    let (builder, row) = load_builder(&state, auth_user.user_id, variant).await?;

    Ok(Json(DataResponse {
        data: RosterResponse::build(&builder, variant, row.as_ref()),
    }))
}

/// GET /api/v1/teams/{variant}/candidates?name=&team=&max_points=
///
/// Filtered catalog with a per-rider add verdict for the caller's roster.
pub async fn list_candidates(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(variant): Path<String>,
    Query(filter): Query<RiderFilter>,
) -> AppResult<Json<DataResponse<Vec<Candidate>>>> {
    let variant = parse_variant(&variant)?;
    let (builder, _) = load_builder(&state, auth_user.user_id, variant).await?;
    let roster = builder.roster(variant);
    let ruleset = builder.rulesets().get(variant);

    let data = state
        .catalog
        .filter(&filter)
        .into_iter()
        .map(|rider| {
            let blocked_by = roster.check_add(&rider, ruleset).err();
            Candidate {
                rider,
                can_add: blocked_by.is_none(),
                blocked_by,
            }
        })
        .collect();

    Ok(Json(DataResponse { data }))
}

/// POST /api/v1/teams/{variant}/riders
///
/// Add a catalog rider by name. 404 for unknown riders, 422 when a selection
/// rule rejects the rider.
pub async fn add_rider(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(variant): Path<String>,
    Json(input): Json<AddRiderRequest>,
) -> AppResult<Json<DataResponse<RosterResponse>>> {
    let variant = parse_variant(&variant)?;
    let rider = state
        .catalog
        .find(&input.name)
        .ok_or_else(|| AppError::Core(CoreError::RiderNotFound(input.name.clone())))?;

    let rulesets = state.config.rulesets;
    let row = RosterRepo::edit(
        &state.pool,
        auth_user.user_id,
        variant,
        |stored| -> AppResult<RosterEdit> {
            let mut builder = builder_with(rulesets, variant, stored);
            builder.add(variant, rider).map_err(CoreError::from)?;
            Ok(RosterEdit::Save(builder.roster(variant).clone()))
        },
    )
    .await?;

    tracing::info!(
        user_id = auth_user.user_id,
        competition = %variant,
        rider = %input.name,
        "Rider added to roster"
    );

    Ok(Json(DataResponse {
        data: RosterResponse::from_row(rulesets, variant, &row),
    }))
}

/// DELETE /api/v1/teams/{variant}/riders/{name}
///
/// Removing a rider that is not selected is a no-op, not an error.
pub async fn remove_rider(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path((variant, name)): Path<(String, String)>,
) -> AppResult<Json<DataResponse<RosterResponse>>> {
    let variant = parse_variant(&variant)?;
    let rulesets = state.config.rulesets;

    let mut removed = false;
    let row = RosterRepo::edit(
        &state.pool,
        auth_user.user_id,
        variant,
        |stored| -> AppResult<RosterEdit> {
            let mut builder = builder_with(rulesets, variant, stored);
            removed = builder.remove(variant, &name);
            Ok(if removed {
                RosterEdit::Save(builder.roster(variant).clone())
            } else {
                RosterEdit::Unchanged
            })
        },
    )
    .await?;

    if removed {
        tracing::info!(
            user_id = auth_user.user_id,
            competition = %variant,
            rider = %name,
            "Rider removed from roster"
        );
    }

    Ok(Json(DataResponse {
        data: RosterResponse::from_row(rulesets, variant, &row),
    }))
}

/// PUT /api/v1/teams/{variant}/name
pub async fn set_team_name(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(variant): Path<String>,
    Json(input): Json<SetTeamNameRequest>,
) -> AppResult<Json<DataResponse<RosterResponse>>> {
    let variant = parse_variant(&variant)?;
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;

    let rulesets = state.config.rulesets;
    let row = RosterRepo::edit(
        &state.pool,
        auth_user.user_id,
        variant,
        |stored| -> AppResult<RosterEdit> {
            let mut builder = builder_with(rulesets, variant, stored);
            builder.set_team_name(variant, input.team_name);
            Ok(RosterEdit::Save(builder.roster(variant).clone()))
        },
    )
    .await?;

    Ok(Json(DataResponse {
        data: RosterResponse::from_row(rulesets, variant, &row),
    }))
}

/// POST /api/v1/teams/{variant}/submit
///
/// Store a labelled snapshot of a valid roster. 422 with the validation
/// summary when the roster is not valid.
pub async fn submit_team(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(variant): Path<String>,
) -> AppResult<Json<DataResponse<RosterResponse>>> {
    let variant = parse_variant(&variant)?;
    let rulesets = state.config.rulesets;

    let row = RosterRepo::edit(
        &state.pool,
        auth_user.user_id,
        variant,
        |stored| -> AppResult<RosterEdit> {
            let builder = builder_with(rulesets, variant, stored);
            let roster = builder
                .submission(variant)
                .ok_or_else(|| AppError::RosterInvalid(Box::new(builder.summary(variant))))?;
            let label = roster_label(roster.team_name(), variant, &Local::now());
            Ok(RosterEdit::Submit { roster, label })
        },
    )
    .await?;

    tracing::info!(
        user_id = auth_user.user_id,
        competition = %variant,
        label = row.label.as_deref().unwrap_or_default(),
        "Roster submitted"
    );

    Ok(Json(DataResponse {
        data: RosterResponse::from_row(rulesets, variant, &row),
    }))
}

/// POST /api/v1/teams/validate
///
/// Evaluate an arbitrary roster against a variant's ruleset without storing it.
pub async fn validate_roster(
    State(state): State<AppState>,
    Json(input): Json<ValidateRosterRequest>,
) -> Json<DataResponse<RosterSummary>> {
    let ruleset = state.config.rulesets.get(input.competition);
    Json(DataResponse {
        data: RosterSummary::of(&input.roster, ruleset),
    })
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn parse_variant(raw: &str) -> AppResult<CompetitionVariant> {
    raw.parse()
        .map_err(|e: pronostiek_core::ruleset::UnknownVariant| AppError::BadRequest(e.to_string()))
}

fn builder_with(rulesets: Rulesets, variant: CompetitionVariant, roster: Roster) -> TeamBuilder {
    let mut builder = TeamBuilder::new(rulesets);
    builder.restore(variant, roster);
    builder
}

/// Restore the caller's stored roster for `variant` into a fresh builder.
async fn load_builder(
    state: &AppState,
    user_id: DbId,
    variant: CompetitionVariant,
) -> AppResult<(TeamBuilder, Option<RosterRow>)> {
    let row = RosterRepo::find(&state.pool, user_id, variant).await?;
    let roster = row.as_ref().map(RosterRow::to_roster).unwrap_or_default();
    Ok((builder_with(state.config.rulesets, variant, roster), row))
}
