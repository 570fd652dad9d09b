//! Genescope PubMed - publication lookups for genes.
//!
//! Resolves gene symbols through MyGene.info, collects GeneRIF PMIDs, and
//! enriches them with esummary/elink metadata. [`PublicationService`] layers
//! a TTL cache over the raw provider so repeat page requests never re-hit
//! the upstream services while fresh.

pub mod client;
pub mod order;
pub mod types;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use genescope_cache::TtlCache;
use genescope_core::{PaginatedPublications, PublicationError};

pub use client::{normalize_pubdate, pubmed_url, MyGeneClient, MyGeneConfig};
pub use order::{PageOrder, UnknownOrder};

/// Source of publication pages for a gene symbol.
///
/// An unrecognized symbol is not an error: providers return a well-formed
/// empty page for it. Errors mean the upstream lookup itself failed.
#[async_trait]
pub trait PublicationProvider: Send + Sync {
    /// Fetch one 1-based page of publications in upstream order.
    async fn fetch_page(
        &self,
        symbol: &str,
        page: u32,
        page_size: u32,
    ) -> Result<PaginatedPublications, PublicationError>;
}

/// Cached, sortable publication lookups.
///
/// Pages are cached in upstream order and sorted per request, so callers
/// asking for different orderings of the same page share one cache entry.
pub struct PublicationService {
    provider: Arc<dyn PublicationProvider>,
    cache: TtlCache<PaginatedPublications>,
    ttl: Duration,
    default_page_size: u32,
}

impl PublicationService {
    pub fn new(
        provider: Arc<dyn PublicationProvider>,
        ttl: Duration,
        default_page_size: u32,
    ) -> Self {
        Self {
            provider,
            cache: TtlCache::new("publications"),
            ttl,
            default_page_size,
        }
    }

    /// Default page size applied when the caller does not specify one.
    pub fn default_page_size(&self) -> u32 {
        self.default_page_size
    }

    /// Fetch one page of publications, sorted as requested.
    pub async fn page(
        &self,
        symbol: &str,
        page: u32,
        page_size: Option<u32>,
        order: PageOrder,
    ) -> Result<PaginatedPublications, PublicationError> {
        let size = page_size.unwrap_or(self.default_page_size);
        let key = format!("{symbol}:{page}:{size}");

        let mut result = self
            .cache
            .get_or_compute(&key, self.ttl, || {
                self.provider.fetch_page(symbol, page, size)
            })
            .await?;

        order::sort_page(&mut result.papers, order);
        Ok(result)
    }

    /// Drop expired cache entries. Returns the number removed.
    pub async fn sweep(&self) -> usize {
        self.cache.remove_expired().await
    }
}
