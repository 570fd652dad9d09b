//! Error types for Genescope operations

use thiserror::Error;

/// Dataset loading and integrity errors.
///
/// Row-level problems (non-numeric fold-change or p-value) are not errors at
/// this level: the loader excludes such rows and reports the count. Only
/// structural problems that make the whole dataset unusable surface here.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DataError {
    #[error("Required column missing from expression sheet: {column}")]
    MissingColumn { column: String },

    #[error("Failed to read expression sheet {path}: {reason}")]
    Read { path: String, reason: String },

    #[error("Expression sheet contains no usable rows")]
    EmptyDataset,
}

/// Lookup of a gene symbol that is not in the analyzed set.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Gene {symbol} not found")]
pub struct GeneNotFound {
    pub symbol: String,
}

impl GeneNotFound {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
        }
    }
}

/// Publication lookup errors.
///
/// These are distinct from a legitimately empty result: a gene with zero
/// known publications yields an empty page, never one of these.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PublicationError {
    #[error("Publication lookup timed out after {seconds}s")]
    Timeout { seconds: u64 },

    #[error("Publication lookup failed: {reason}")]
    Transport { reason: String },

    #[error("Invalid response from {service}: {reason}")]
    InvalidResponse { service: String, reason: String },
}

impl PublicationError {
    pub fn transport(reason: impl Into<String>) -> Self {
        Self::Transport {
            reason: reason.into(),
        }
    }

    pub fn invalid_response(service: &str, reason: impl Into<String>) -> Self {
        Self::InvalidResponse {
            service: service.to_string(),
            reason: reason.into(),
        }
    }
}

/// Master error type for all Genescope errors.
#[derive(Debug, Clone, Error)]
pub enum GenescopeError {
    #[error("Data error: {0}")]
    Data(#[from] DataError),

    #[error("{0}")]
    NotFound(#[from] GeneNotFound),

    #[error("Publication error: {0}")]
    Publication(#[from] PublicationError),
}

/// Result type alias for Genescope operations.
pub type GenescopeResult<T> = Result<T, GenescopeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_error_display_missing_column() {
        let err = DataError::MissingColumn {
            column: "logFC".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("Required column missing"));
        assert!(msg.contains("logFC"));
    }

    #[test]
    fn test_gene_not_found_display() {
        let err = GeneNotFound::new("CDK2");
        assert_eq!(format!("{}", err), "Gene CDK2 not found");
    }

    #[test]
    fn test_publication_error_display_timeout() {
        let err = PublicationError::Timeout { seconds: 100 };
        let msg = format!("{}", err);
        assert!(msg.contains("timed out"));
        assert!(msg.contains("100"));
    }

    #[test]
    fn test_publication_error_display_invalid_response() {
        let err = PublicationError::invalid_response("mygene", "missing hits field");
        let msg = format!("{}", err);
        assert!(msg.contains("mygene"));
        assert!(msg.contains("missing hits field"));
    }

    #[test]
    fn test_genescope_error_from_variants() {
        let data = GenescopeError::from(DataError::EmptyDataset);
        assert!(matches!(data, GenescopeError::Data(_)));

        let not_found = GenescopeError::from(GeneNotFound::new("TP53"));
        assert!(matches!(not_found, GenescopeError::NotFound(_)));

        let publication = GenescopeError::from(PublicationError::transport("connection refused"));
        assert!(matches!(publication, GenescopeError::Publication(_)));
    }
}
