//! Route definitions for the rider catalog and rulesets.

use axum::routing::get;
use axum::Router;

use crate::handlers::riders;
use crate::state::AppState;

/// ```text
/// GET /riders    -> list_riders
/// GET /rulesets  -> list_rulesets
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/riders", get(riders::list_riders))
        .route("/rulesets", get(riders::list_rulesets))
}
