pub mod auth;
pub mod health;
pub mod riders;
pub mod teams;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                         register (public)
/// /auth/login                            login (public)
/// /auth/refresh                          refresh (public)
/// /auth/logout                           logout (requires auth)
/// /auth/me                               current identity (requires auth)
///
/// /riders                                filtered rider catalog (public)
/// /rulesets                              selection rules per variant (public)
///
/// /teams                                 caller's rosters (requires auth)
/// /teams/validate                        stateless roster check (public)
/// /teams/{variant}                       one roster
/// /teams/{variant}/candidates            catalog with add verdicts
/// /teams/{variant}/name                  set team name (PUT)
/// /teams/{variant}/riders                add rider (POST)
/// /teams/{variant}/riders/{name}         remove rider (DELETE)
/// /teams/{variant}/submit                submit a valid roster (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .merge(riders::router())
        .nest("/teams", teams::router())
}
