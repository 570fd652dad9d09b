//! OpenAPI document for the Genescope REST API.

use utoipa::OpenApi;

use crate::error::{ApiError, ErrorCode};
use crate::routes;
use crate::routes::health::{HealthDetails, HealthResponse, HealthStatus};
use crate::types::{GeneDataResponse, GeneInfo, GeneView, PapersResponse, VolcanoResponse};

use genescope_core::{PaginatedPublications, PublicationRecord, Regulation};
use genescope_plot::{
    Annotation, Axis, Font, Layout, Legend, LineStyle, Margin, Marker, PlotSpec, Shape, Trace,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Genescope API",
        description = "Differential gene-expression visualization backend: \
                       volcano plot, per-gene boxplots, and PubMed literature lookups.",
        version = env!("CARGO_PKG_VERSION"),
    ),
    paths(
        routes::volcano::volcano_data,
        routes::gene::gene_data,
        routes::papers::papers,
        routes::health::ping,
        routes::health::liveness,
        routes::health::readiness,
    ),
    components(schemas(
        ApiError,
        ErrorCode,
        VolcanoResponse,
        GeneDataResponse,
        GeneInfo,
        GeneView,
        PapersResponse,
        PublicationRecord,
        PaginatedPublications,
        Regulation,
        PlotSpec,
        Layout,
        Trace,
        Marker,
        Axis,
        Shape,
        LineStyle,
        Annotation,
        Font,
        Legend,
        Margin,
        HealthResponse,
        HealthStatus,
        HealthDetails,
    )),
    tags(
        (name = "Plots", description = "Dataset-wide plot data"),
        (name = "Genes", description = "Per-gene details"),
        (name = "Papers", description = "Publication lookups"),
        (name = "Health", description = "Service health probes"),
    ),
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_document_builds() {
        let doc = ApiDoc::openapi();
        let json = serde_json::to_string(&doc).unwrap();
        assert!(json.contains("/api/volcano-data"));
        assert!(json.contains("/api/gene/{symbol}"));
        assert!(json.contains("/api/papers/{symbol}"));
    }
}
