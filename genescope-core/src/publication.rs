//! Publication data model for gene literature lookups.

use serde::{Deserialize, Serialize};

/// Sentinel publication date for records whose date the upstream service
/// did not report in a usable form. Sorts after every real date.
pub const UNKNOWN_DATE: &str = "Unknown";

/// One literature reference for a gene.
///
/// Wire keys follow the established front-end contract
/// (`pmid`/`title`/`url`/`date`/`citations`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct PublicationRecord {
    /// PubMed identifier (stable external id).
    pub pmid: String,
    /// Publication title, when the summary lookup returned one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Link to the PubMed entry.
    pub url: String,
    /// Publication date in `YYYY-MM-DD` form, or [`UNKNOWN_DATE`].
    pub date: String,
    /// Number of citing publications known to PubMed.
    pub citations: u32,
}

impl PublicationRecord {
    /// Whether the publication date is the [`UNKNOWN_DATE`] sentinel.
    pub fn date_is_unknown(&self) -> bool {
        self.date == UNKNOWN_DATE
    }
}

/// One page of publications for a gene.
///
/// Pages are independent snapshots: any caller-requested ordering applies
/// within a page only, never across the whole result set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct PaginatedPublications {
    /// Records for this page, in upstream (service) order.
    pub papers: Vec<PublicationRecord>,
    /// 1-based page number that was requested.
    pub page: u32,
    /// Page size that was applied, echoed back for client consistency.
    pub page_size: u32,
    /// Total number of matching publications across all pages.
    pub total: usize,
    /// Whether pages beyond this one exist.
    pub has_more: bool,
}

impl PaginatedPublications {
    /// A well-formed empty page, used when a gene resolves to zero
    /// publications or the requested page is past the end.
    pub fn empty(page: u32, page_size: u32, total: usize) -> Self {
        Self {
            papers: Vec::new(),
            page,
            page_size,
            total,
            has_more: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_publication_record_serialization() {
        let record = PublicationRecord {
            pmid: "12345".to_string(),
            title: Some("Plasma proteomic signatures of aging".to_string()),
            url: "https://pubmed.ncbi.nlm.nih.gov/12345".to_string(),
            date: "2020-01-01".to_string(),
            citations: 42,
        };

        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"pmid\":\"12345\""));
        assert!(json.contains("\"citations\":42"));
        assert!(json.contains("\"date\":\"2020-01-01\""));
    }

    #[test]
    fn test_title_omitted_when_absent() {
        let record = PublicationRecord {
            pmid: "1".to_string(),
            title: None,
            url: "https://pubmed.ncbi.nlm.nih.gov/1".to_string(),
            date: UNKNOWN_DATE.to_string(),
            citations: 0,
        };

        let json = serde_json::to_string(&record).unwrap();
        assert!(!json.contains("title"));
        assert!(record.date_is_unknown());
    }

    #[test]
    fn test_empty_page_is_well_formed() {
        let page = PaginatedPublications::empty(3, 5, 0);
        assert_eq!(page.page, 3);
        assert_eq!(page.page_size, 5);
        assert!(page.papers.is_empty());
        assert!(!page.has_more);
    }
}
