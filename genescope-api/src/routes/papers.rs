//! Paginated publications endpoint.

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};

use genescope_pubmed::PageOrder;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use crate::types::{PapersQuery, PapersResponse};

const MAX_PAGE_SIZE: u32 = 50;

/// GET /api/papers/{symbol} - one page of publications for a gene.
///
/// An unrecognized symbol is a well-formed empty page, not a 404: absence
/// from the literature index says nothing about the expression dataset.
#[utoipa::path(
    get,
    path = "/api/papers/{symbol}",
    tag = "Papers",
    params(
        ("symbol" = String, Path, description = "Gene symbol to look up"),
        PapersQuery,
    ),
    responses(
        (status = 200, description = "One page of publications", body = PapersResponse),
        (status = 400, description = "Invalid page, page size, or sort", body = ApiError),
        (status = 502, description = "Publication lookup failed", body = ApiError),
        (status = 504, description = "Publication lookup timed out", body = ApiError),
    ),
)]
pub async fn papers(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
    Query(query): Query<PapersQuery>,
) -> ApiResult<Json<PapersResponse>> {
    let page = query.page.unwrap_or(1);
    if page < 1 {
        return Err(ApiError::invalid_input("page must be at least 1"));
    }

    if let Some(size) = query.page_size {
        if size < 1 || size > MAX_PAGE_SIZE {
            return Err(ApiError::invalid_input(format!(
                "page_size must be between 1 and {MAX_PAGE_SIZE}"
            )));
        }
    }

    let order = match query.sort.as_deref() {
        None => PageOrder::Default,
        Some(value) => value
            .parse::<PageOrder>()
            .map_err(|e| ApiError::invalid_input(e.to_string()))?,
    };

    let result = state
        .publications
        .page(&symbol, page, query.page_size, order)
        .await?;

    Ok(Json(PapersResponse {
        papers: result.papers,
        page: result.page,
        page_size: result.page_size,
        total_papers: result.total,
        has_more: result.has_more,
    }))
}

pub fn create_router() -> Router<AppState> {
    Router::new().route("/papers/:symbol", get(papers))
}
