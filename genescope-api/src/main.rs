//! Genescope API server entry point.
//!
//! Loads the expression sheet, builds the shared state, and starts the
//! Axum HTTP server. A failed dataset load aborts startup; everything
//! downstream (publication lookups) degrades at request time instead.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use genescope_api::telemetry::init_tracing;
use genescope_api::{create_api_router, ApiConfig, ApiError, ApiResult, AppState};
use genescope_core::SIGNIFICANCE_THRESHOLD;
use genescope_data::Dataset;
use genescope_pubmed::{MyGeneClient, PublicationService};

const CACHE_SWEEP_INTERVAL: Duration = Duration::from_secs(300);

#[tokio::main]
async fn main() -> ApiResult<()> {
    init_tracing();

    let config = ApiConfig::from_env();

    let dataset = Dataset::load(&config.data_file, SIGNIFICANCE_THRESHOLD).map_err(|e| {
        ApiError::dataset_unavailable(format!(
            "Failed to load expression sheet {}: {}",
            config.data_file.display(),
            e
        ))
    })?;
    let dataset = Arc::new(dataset);

    let client = MyGeneClient::new(config.publication_config())
        .map_err(|e| ApiError::internal_error(format!("Failed to build HTTP client: {e}")))?;
    let publications = Arc::new(PublicationService::new(
        Arc::new(client),
        config.publication_ttl,
        config.default_page_size,
    ));

    let state = AppState::new(
        dataset,
        publications,
        config.volcano_ttl,
        config.gene_ttl,
    );

    spawn_cache_sweeper(state.clone());

    let app = create_api_router(state, &config)?;

    let addr = resolve_bind_addr(&config)?;
    tracing::info!(%addr, sheet = %config.data_file.display(), "Starting Genescope API server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| ApiError::internal_error(format!("Failed to bind {addr}: {e}")))?;

    let server = axum::serve(listener, app);
    tokio::select! {
        result = server => {
            result.map_err(|e| ApiError::internal_error(format!("Server error: {e}")))?;
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}

fn spawn_cache_sweeper(state: AppState) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(CACHE_SWEEP_INTERVAL);
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let removed = state.sweep_caches().await;
            if removed > 0 {
                tracing::debug!(removed, "Swept expired cache entries");
            }
        }
    });
}

fn resolve_bind_addr(config: &ApiConfig) -> ApiResult<SocketAddr> {
    let addr = format!("{}:{}", config.bind_host, config.bind_port);
    addr.parse::<SocketAddr>()
        .map_err(|e| ApiError::invalid_input(format!("Invalid bind address {addr}: {e}")))
}
