//! Genescope Core - Entity Types
//!
//! Pure data structures shared by the analysis, plotting, publication, and
//! API crates. This crate contains the gene/publication data model and the
//! error taxonomy - no business logic beyond trivial derivations.

pub mod error;
pub mod gene;
pub mod publication;

pub use error::{
    DataError, GeneNotFound, GenescopeError, GenescopeResult, PublicationError,
};
pub use gene::{Cohort, GeneRecord, Regulation, SampleValue, SIGNIFICANCE_THRESHOLD};
pub use publication::{PaginatedPublications, PublicationRecord, UNKNOWN_DATE};
