//! Handlers for the public rider catalog and rulesets.

use axum::extract::{Query, State};
use axum::Json;
use pronostiek_core::catalog::{PointsBounds, RiderFilter};
use pronostiek_core::rider::Rider;
use pronostiek_core::ruleset::Rulesets;
use serde::Serialize;

use crate::response::DataResponse;
use crate::state::AppState;

/// Filtered catalog view.
#[derive(Debug, Serialize)]
pub struct RiderListing {
    pub riders: Vec<Rider>,
    /// Number of riders matching the filter.
    pub count: usize,
    /// Number of records in the whole catalog, matching or not.
    pub catalog_size: usize,
    /// Points range over the whole catalog, for filter sliders.
    pub bounds: Option<PointsBounds>,
}

/// GET /api/v1/riders?name=&team=&max_points=
pub async fn list_riders(
    State(state): State<AppState>,
    Query(filter): Query<RiderFilter>,
) -> Json<DataResponse<RiderListing>> {
    let riders = state.catalog.filter(&filter);

    Json(DataResponse {
        data: RiderListing {
            count: riders.len(),
            riders,
            catalog_size: state.catalog.len(),
            bounds: state.catalog.bounds(),
        },
    })
}

/// GET /api/v1/rulesets
pub async fn list_rulesets(State(state): State<AppState>) -> Json<DataResponse<Rulesets>> {
    Json(DataResponse {
        data: state.config.rulesets,
    })
}
