//! Request and response types for the Genescope REST API.
//!
//! Wire keys on `GeneInfo` (`EntrezGeneSymbol`, `logFC`, `adj.P.Val`) follow
//! the established front-end contract and mirror the sheet column names.

use genescope_core::{GeneRecord, PublicationRecord, Regulation};
use genescope_plot::PlotSpec;
use serde::{Deserialize, Serialize};

// ============================================================================
// VOLCANO
// ============================================================================

/// Response for `GET /api/volcano-data`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct VolcanoResponse {
    /// Complete volcano plot specification (traces + layout).
    pub plot: PlotSpec,
}

// ============================================================================
// GENE DETAIL
// ============================================================================

/// Differential-expression statistics for one gene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct GeneInfo {
    #[serde(rename = "EntrezGeneSymbol")]
    pub symbol: String,
    #[serde(rename = "logFC")]
    pub log_fc: f64,
    #[serde(rename = "adj.P.Val")]
    pub adj_p_value: f64,
    pub regulation: Regulation,
}

impl From<&GeneRecord> for GeneInfo {
    fn from(record: &GeneRecord) -> Self {
        Self {
            symbol: record.symbol.clone(),
            log_fc: record.log_fc,
            adj_p_value: record.adj_p_value,
            regulation: record.regulation,
        }
    }
}

/// The cacheable part of a gene detail response: statistics plus boxplot.
/// Publications are fetched per request and merged in afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct GeneView {
    pub gene_info: GeneInfo,
    pub boxplot: PlotSpec,
}

/// Response for `GET /api/gene/{symbol}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct GeneDataResponse {
    pub gene_info: GeneInfo,
    pub boxplot: PlotSpec,
    /// First page of publications, in upstream order.
    pub papers: Vec<PublicationRecord>,
    pub has_more_papers: bool,
    pub total_papers: usize,
    /// Set when the publication lookup failed; the rest of the response is
    /// still served.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub papers_error: Option<String>,
}

// ============================================================================
// PAPERS
// ============================================================================

/// Response for `GET /api/papers/{symbol}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct PapersResponse {
    pub papers: Vec<PublicationRecord>,
    pub page: u32,
    pub page_size: u32,
    pub total_papers: usize,
    pub has_more: bool,
}

/// Query parameters for `GET /api/papers/{symbol}`.
#[derive(Debug, Clone, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
pub struct PapersQuery {
    /// 1-based page number (default: 1).
    pub page: Option<u32>,
    /// Page size, 1 to 50 (default: server-configured).
    pub page_size: Option<u32>,
    /// In-page sort order: `default`, `date-asc`, `date-desc`,
    /// `citations-asc`, or `citations-desc`.
    pub sort: Option<String>,
}
