//! Gene detail endpoint: statistics, boxplot, and the first page of papers.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

use genescope_plot::boxplot_spec;
use genescope_pubmed::PageOrder;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use crate::types::{GeneDataResponse, GeneInfo, GeneView};

/// GET /api/gene/{symbol} - statistics, boxplot, and first page of papers.
///
/// The statistics/boxplot half is cached per symbol. A failed publication
/// lookup does not fail the endpoint: the response degrades to an empty
/// paper list with `papers_error` set.
#[utoipa::path(
    get,
    path = "/api/gene/{symbol}",
    tag = "Genes",
    params(
        ("symbol" = String, Path, description = "Gene symbol, exact match"),
    ),
    responses(
        (status = 200, description = "Gene details", body = GeneDataResponse),
        (status = 404, description = "Gene not in the dataset", body = ApiError),
    ),
)]
pub async fn gene_data(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
) -> ApiResult<Json<GeneDataResponse>> {
    let view = cached_gene_view(&state, &symbol).await?;

    // Publications degrade rather than fail the gene view.
    let (papers, has_more, total, papers_error) = match state
        .publications
        .page(&symbol, 1, None, PageOrder::Default)
        .await
    {
        Ok(page) => (page.papers, page.has_more, page.total, None),
        Err(error) => {
            tracing::warn!(symbol, %error, "Publication lookup failed for gene view");
            (Vec::new(), false, 0, Some(error.to_string()))
        }
    };

    Ok(Json(GeneDataResponse {
        gene_info: view.gene_info,
        boxplot: view.boxplot,
        papers,
        has_more_papers: has_more,
        total_papers: total,
        papers_error,
    }))
}

async fn cached_gene_view(state: &AppState, symbol: &str) -> ApiResult<GeneView> {
    let key = format!("gene:{symbol}");
    let dataset = Arc::clone(&state.dataset);
    let symbol = symbol.to_string();

    state
        .gene_cache
        .get_or_compute(&key, state.gene_ttl, || async move {
            let record = dataset
                .get(&symbol)
                .ok_or_else(|| ApiError::gene_not_found(format!("Gene {symbol} not found")))?;
            Ok(GeneView {
                gene_info: GeneInfo::from(record),
                boxplot: boxplot_spec(record),
            })
        })
        .await
}

pub fn create_router() -> Router<AppState> {
    Router::new().route("/gene/:symbol", get(gene_data))
}
