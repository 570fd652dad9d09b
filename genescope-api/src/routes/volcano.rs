//! Volcano plot endpoint.

use std::convert::Infallible;
use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};

use genescope_plot::volcano_spec;

use crate::error::ApiResult;
use crate::state::AppState;
use crate::types::VolcanoResponse;

const VOLCANO_CACHE_KEY: &str = "volcano:data";

/// GET /api/volcano-data - the dataset-wide volcano plot.
#[utoipa::path(
    get,
    path = "/api/volcano-data",
    tag = "Plots",
    responses(
        (status = 200, description = "Volcano plot specification", body = VolcanoResponse),
    ),
)]
pub async fn volcano_data(State(state): State<AppState>) -> ApiResult<Json<VolcanoResponse>> {
    let dataset = Arc::clone(&state.dataset);
    let plot: Result<_, Infallible> = state
        .volcano_cache
        .get_or_compute(VOLCANO_CACHE_KEY, state.volcano_ttl, || async move {
            Ok(volcano_spec(dataset.records()))
        })
        .await;
    let plot = plot.unwrap_or_else(|never| match never {});

    Ok(Json(VolcanoResponse { plot }))
}

pub fn create_router() -> Router<AppState> {
    Router::new().route("/volcano-data", get(volcano_data))
}
