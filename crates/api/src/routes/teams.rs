//! Route definitions for the `/teams` resource.

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handlers::teams;
use crate::state::AppState;

/// Routes mounted at `/teams`.
///
/// ```text
/// GET    /                          -> list_teams
/// POST   /validate                  -> validate_roster
/// GET    /{variant}                 -> get_team
/// GET    /{variant}/candidates      -> list_candidates
/// PUT    /{variant}/name            -> set_team_name
/// POST   /{variant}/riders          -> add_rider
/// DELETE /{variant}/riders/{name}   -> remove_rider
/// POST   /{variant}/submit          -> submit_team
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(teams::list_teams))
        .route("/validate", post(teams::validate_roster))
        .route("/{variant}", get(teams::get_team))
        .route("/{variant}/candidates", get(teams::list_candidates))
        .route("/{variant}/name", put(teams::set_team_name))
        .route("/{variant}/riders", post(teams::add_rider))
        .route("/{variant}/riders/{name}", delete(teams::remove_rider))
        .route("/{variant}/submit", post(teams::submit_team))
}
