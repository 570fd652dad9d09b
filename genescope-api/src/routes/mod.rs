//! REST API routes.
//!
//! - `/api/volcano-data` - dataset-wide volcano plot
//! - `/api/gene/{symbol}` - per-gene statistics, boxplot, first page of papers
//! - `/api/papers/{symbol}` - paginated, sortable publications
//! - `/health/*` - Kubernetes-compatible probes
//! - `/openapi.json` - generated API document

pub mod gene;
pub mod health;
pub mod papers;
pub mod volcano;

use axum::{
    http::{HeaderValue, Method},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::config::ApiConfig;
use crate::error::{ApiError, ApiResult};
use crate::openapi::ApiDoc;
use crate::state::AppState;

/// Handler for /openapi.json endpoint.
async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}

/// Build the CORS layer from configured origins. An empty origin list means
/// allow-all (development mode).
fn cors_layer(config: &ApiConfig) -> ApiResult<CorsLayer> {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET])
        .allow_headers(Any);

    if config.cors_origins.is_empty() {
        return Ok(layer.allow_origin(Any));
    }

    let mut origins = Vec::with_capacity(config.cors_origins.len());
    for origin in &config.cors_origins {
        let value = origin.parse::<HeaderValue>().map_err(|_| {
            ApiError::invalid_input(format!("Invalid CORS origin: {origin}"))
        })?;
        origins.push(value);
    }
    Ok(layer.allow_origin(origins))
}

/// Assemble the complete application router.
pub fn create_api_router(state: AppState, config: &ApiConfig) -> ApiResult<Router> {
    let api = Router::new()
        .merge(volcano::create_router())
        .merge(gene::create_router())
        .merge(papers::create_router());

    let router = Router::new()
        .nest("/api", api)
        .nest("/health", health::create_router())
        .route("/openapi.json", get(openapi_json))
        .with_state(state)
        .layer(cors_layer(config)?)
        .layer(TraceLayer::new_for_http());

    Ok(router)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;
    use axum::extract::{Path, Query, State};

    use genescope_core::{
        PaginatedPublications, PublicationError, PublicationRecord, Regulation,
        SIGNIFICANCE_THRESHOLD,
    };
    use genescope_data::{Dataset, ExpressionRow};
    use genescope_pubmed::{pubmed_url, PublicationProvider, PublicationService};

    use crate::error::ErrorCode;
    use crate::types::PapersQuery;

    struct StaticProvider;

    #[async_trait]
    impl PublicationProvider for StaticProvider {
        async fn fetch_page(
            &self,
            _symbol: &str,
            page: u32,
            page_size: u32,
        ) -> Result<PaginatedPublications, PublicationError> {
            Ok(PaginatedPublications {
                papers: vec![
                    PublicationRecord {
                        pmid: "100".to_string(),
                        title: Some("Older paper".to_string()),
                        url: pubmed_url("100"),
                        date: "2019-03-01".to_string(),
                        citations: 3,
                    },
                    PublicationRecord {
                        pmid: "200".to_string(),
                        title: Some("Newer paper".to_string()),
                        url: pubmed_url("200"),
                        date: "2021-06-01".to_string(),
                        citations: 1,
                    },
                ],
                page,
                page_size,
                total: 12,
                has_more: (page as usize) * (page_size as usize) < 12,
            })
        }
    }

    struct FailingProvider(PublicationError);

    #[async_trait]
    impl PublicationProvider for FailingProvider {
        async fn fetch_page(
            &self,
            _symbol: &str,
            _page: u32,
            _page_size: u32,
        ) -> Result<PaginatedPublications, PublicationError> {
            Err(self.0.clone())
        }
    }

    fn sample(name: &str, value: f64) -> genescope_core::SampleValue {
        genescope_core::SampleValue {
            sample: name.to_string(),
            value,
        }
    }

    fn dataset() -> Arc<Dataset> {
        let rows = vec![
            ExpressionRow {
                symbol: "CDK2".to_string(),
                log_fc: 1.5,
                adj_p_value: 0.001,
                young: vec![sample("YD1", 1.0), sample("YD2", 2.0)],
                old: vec![sample("OD1", 4.0), sample("OD2", 5.0)],
            },
            ExpressionRow {
                symbol: "GDF15".to_string(),
                log_fc: -0.8,
                adj_p_value: 0.02,
                young: vec![],
                old: vec![],
            },
            ExpressionRow {
                symbol: "ALB".to_string(),
                log_fc: 0.3,
                adj_p_value: 0.5,
                young: vec![],
                old: vec![],
            },
        ];
        Arc::new(Dataset::from_rows(rows, 0, SIGNIFICANCE_THRESHOLD).unwrap())
    }

    fn app_state(provider: Arc<dyn PublicationProvider>) -> AppState {
        let publications = Arc::new(PublicationService::new(
            provider,
            Duration::from_secs(60),
            5,
        ));
        AppState::new(
            dataset(),
            publications,
            Duration::from_secs(60),
            Duration::from_secs(60),
        )
    }

    #[tokio::test]
    async fn test_volcano_data_groups_all_genes() {
        let state = app_state(Arc::new(StaticProvider));
        let response = volcano::volcano_data(State(state.clone()))
            .await
            .unwrap();

        let plot = &response.0.plot;
        assert_eq!(plot.data.len(), 3);
        assert_eq!(plot.data[0].name, "not significant");
        assert_eq!(plot.data[1].name, "up-regulated");
        assert_eq!(plot.data[2].name, "down-regulated");
    }

    #[tokio::test]
    async fn test_volcano_data_is_cached() {
        let state = app_state(Arc::new(StaticProvider));

        let first = volcano::volcano_data(State(state.clone())).await.unwrap();
        let second = volcano::volcano_data(State(state.clone())).await.unwrap();

        assert_eq!(first.0.plot, second.0.plot);
        assert_eq!(state.volcano_cache.misses(), 1);
        assert_eq!(state.volcano_cache.hits(), 1);
    }

    #[tokio::test]
    async fn test_gene_data_happy_path() {
        let state = app_state(Arc::new(StaticProvider));
        let response = gene::gene_data(State(state), Path("CDK2".to_string()))
            .await
            .unwrap();

        let body = response.0;
        assert_eq!(body.gene_info.symbol, "CDK2");
        assert_eq!(body.gene_info.regulation, Regulation::Up);
        assert_eq!(body.boxplot.data.len(), 2);
        assert_eq!(body.papers.len(), 2);
        assert_eq!(body.total_papers, 12);
        assert!(body.has_more_papers);
        assert!(body.papers_error.is_none());
    }

    #[tokio::test]
    async fn test_gene_data_unknown_symbol_is_404() {
        let state = app_state(Arc::new(StaticProvider));
        let err = gene::gene_data(State(state), Path("MISSING".to_string()))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::GeneNotFound);
        assert!(err.message.contains("MISSING"));
    }

    #[tokio::test]
    async fn test_gene_data_degrades_when_papers_fail() {
        let state = app_state(Arc::new(FailingProvider(PublicationError::transport(
            "connection refused",
        ))));
        let response = gene::gene_data(State(state), Path("CDK2".to_string()))
            .await
            .unwrap();

        let body = response.0;
        assert_eq!(body.gene_info.symbol, "CDK2");
        assert!(body.papers.is_empty());
        assert_eq!(body.total_papers, 0);
        assert!(!body.has_more_papers);
        assert!(body.papers_error.unwrap().contains("connection refused"));
    }

    #[tokio::test]
    async fn test_papers_rejects_page_zero() {
        let state = app_state(Arc::new(StaticProvider));
        let err = papers::papers(
            State(state),
            Path("CDK2".to_string()),
            Query(PapersQuery {
                page: Some(0),
                ..PapersQuery::default()
            }),
        )
        .await
        .unwrap_err();

        assert_eq!(err.code, ErrorCode::InvalidInput);
    }

    #[tokio::test]
    async fn test_papers_rejects_oversized_page() {
        let state = app_state(Arc::new(StaticProvider));
        let err = papers::papers(
            State(state),
            Path("CDK2".to_string()),
            Query(PapersQuery {
                page_size: Some(51),
                ..PapersQuery::default()
            }),
        )
        .await
        .unwrap_err();

        assert_eq!(err.code, ErrorCode::InvalidInput);
    }

    #[tokio::test]
    async fn test_papers_rejects_unknown_sort() {
        let state = app_state(Arc::new(StaticProvider));
        let err = papers::papers(
            State(state),
            Path("CDK2".to_string()),
            Query(PapersQuery {
                sort: Some("newest".to_string()),
                ..PapersQuery::default()
            }),
        )
        .await
        .unwrap_err();

        assert_eq!(err.code, ErrorCode::InvalidInput);
        assert!(err.message.contains("newest"));
    }

    #[tokio::test]
    async fn test_papers_sorts_within_page() {
        let state = app_state(Arc::new(StaticProvider));
        let response = papers::papers(
            State(state),
            Path("CDK2".to_string()),
            Query(PapersQuery {
                sort: Some("date-desc".to_string()),
                ..PapersQuery::default()
            }),
        )
        .await
        .unwrap();

        let body = response.0;
        assert_eq!(body.papers[0].pmid, "200");
        assert_eq!(body.papers[1].pmid, "100");
        assert_eq!(body.page, 1);
        assert_eq!(body.page_size, 5);
        assert_eq!(body.total_papers, 12);
    }

    #[tokio::test]
    async fn test_papers_timeout_maps_to_gateway_timeout() {
        let state = app_state(Arc::new(FailingProvider(PublicationError::Timeout {
            seconds: 100,
        })));
        let err = papers::papers(
            State(state),
            Path("CDK2".to_string()),
            Query(PapersQuery::default()),
        )
        .await
        .unwrap_err();

        assert_eq!(err.code, ErrorCode::UpstreamTimeout);
    }

    #[tokio::test]
    async fn test_papers_transport_failure_maps_to_bad_gateway() {
        let state = app_state(Arc::new(FailingProvider(PublicationError::transport(
            "dns failure",
        ))));
        let err = papers::papers(
            State(state),
            Path("CDK2".to_string()),
            Query(PapersQuery::default()),
        )
        .await
        .unwrap_err();

        assert_eq!(err.code, ErrorCode::PublicationUnavailable);
    }

    #[tokio::test]
    async fn test_readiness_reports_dataset() {
        use axum::response::IntoResponse;

        let state = app_state(Arc::new(StaticProvider));
        let response = health::readiness(State(state)).await.into_response();
        assert_eq!(response.status(), axum::http::StatusCode::OK);
    }
}
