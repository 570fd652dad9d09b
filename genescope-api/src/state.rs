//! Shared application state.

use std::sync::Arc;
use std::time::{Duration, Instant};

use genescope_cache::TtlCache;
use genescope_data::Dataset;
use genescope_plot::PlotSpec;
use genescope_pubmed::PublicationService;

use crate::types::GeneView;

/// State shared by every request handler.
///
/// The dataset is immutable after startup; the caches carry their own
/// synchronization, so the whole state is cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub dataset: Arc<Dataset>,
    pub volcano_cache: Arc<TtlCache<PlotSpec>>,
    pub gene_cache: Arc<TtlCache<GeneView>>,
    pub publications: Arc<PublicationService>,
    pub volcano_ttl: Duration,
    pub gene_ttl: Duration,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(
        dataset: Arc<Dataset>,
        publications: Arc<PublicationService>,
        volcano_ttl: Duration,
        gene_ttl: Duration,
    ) -> Self {
        Self {
            dataset,
            volcano_cache: Arc::new(TtlCache::new("volcano")),
            gene_cache: Arc::new(TtlCache::new("gene_views")),
            publications,
            volcano_ttl,
            gene_ttl,
            start_time: Instant::now(),
        }
    }

    /// Drop expired entries from every cache. Returns the total removed.
    pub async fn sweep_caches(&self) -> usize {
        self.volcano_cache.remove_expired().await
            + self.gene_cache.remove_expired().await
            + self.publications.sweep().await
    }
}
