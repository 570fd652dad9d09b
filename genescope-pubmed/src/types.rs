//! Wire types for the MyGene.info and NCBI E-utilities JSON responses.
//!
//! Only the fields the client reads are modeled; everything else in the
//! upstream payloads is ignored during deserialization.

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

// ============================================================================
// MYGENE.INFO
// ============================================================================

/// `/v3/query` response: symbol-to-gene-id resolution.
#[derive(Debug, Deserialize)]
pub struct QueryResponse {
    #[serde(default)]
    pub hits: Vec<QueryHit>,
}

#[derive(Debug, Deserialize)]
pub struct QueryHit {
    #[serde(rename = "_id")]
    pub id: String,
}

/// `/v3/gene/{id}` response restricted to the publication-bearing fields.
#[derive(Debug, Deserialize)]
pub struct GeneResponse {
    #[serde(default)]
    pub generif: Vec<GeneRif>,
    #[serde(default)]
    pub reporter: Option<Reporter>,
}

/// One GeneRIF annotation. The `pubmed` field is a PMID that upstream
/// serializes inconsistently as a number or a string.
#[derive(Debug, Deserialize)]
pub struct GeneRif {
    pub pubmed: Option<Value>,
}

/// Reporter block; its `publications` list supplements the GeneRIF PMIDs.
#[derive(Debug, Deserialize)]
pub struct Reporter {
    #[serde(default)]
    pub publications: Vec<Value>,
}

// ============================================================================
// NCBI E-UTILITIES
// ============================================================================

/// `esummary.fcgi` response (`retmode=json`).
///
/// The `result` map carries one entry per PMID plus a `uids` index entry,
/// so values are kept loose and decoded per document.
#[derive(Debug, Deserialize)]
pub struct EsummaryResponse {
    #[serde(default)]
    pub result: HashMap<String, Value>,
}

/// The per-PMID document inside an esummary result.
#[derive(Debug, Deserialize)]
pub struct EsummaryDoc {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub pubdate: Option<String>,
}

/// `elink.fcgi` response (`retmode=json`).
#[derive(Debug, Deserialize)]
pub struct ElinkResponse {
    #[serde(default)]
    pub linksets: Vec<Linkset>,
}

#[derive(Debug, Deserialize)]
pub struct Linkset {
    #[serde(default)]
    pub linksetdbs: Vec<LinksetDb>,
}

#[derive(Debug, Deserialize)]
pub struct LinksetDb {
    #[serde(default)]
    pub linkname: String,
    #[serde(default)]
    pub links: Vec<Value>,
}

/// Extract a PMID from the loosely-typed `pubmed` field.
pub fn pmid_from_value(value: &Value) -> Option<String> {
    match value {
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_pmid_from_numeric_and_string_values() {
        assert_eq!(pmid_from_value(&json!(31253987)), Some("31253987".into()));
        assert_eq!(pmid_from_value(&json!("31253987")), Some("31253987".into()));
        assert_eq!(pmid_from_value(&json!("")), None);
        assert_eq!(pmid_from_value(&json!(null)), None);
        assert_eq!(pmid_from_value(&json!(["1", "2"])), None);
    }

    #[test]
    fn test_query_response_decodes_hits() {
        let response: QueryResponse =
            serde_json::from_str(r#"{"took": 2, "hits": [{"_id": "1017", "symbol": "CDK2"}]}"#)
                .unwrap();
        assert_eq!(response.hits[0].id, "1017");
    }

    #[test]
    fn test_gene_response_tolerates_missing_generif() {
        let response: GeneResponse = serde_json::from_str(r#"{"_id": "1017"}"#).unwrap();
        assert!(response.generif.is_empty());
        assert!(response.reporter.is_none());
    }

    #[test]
    fn test_gene_response_decodes_reporter_publications() {
        let response: GeneResponse = serde_json::from_str(
            r#"{"generif": [{"pubmed": 111}], "reporter": {"publications": ["222", 333]}}"#,
        )
        .unwrap();
        assert_eq!(response.generif.len(), 1);
        assert_eq!(response.reporter.unwrap().publications.len(), 2);
    }

    #[test]
    fn test_elink_citation_links_decode() {
        let response: ElinkResponse = serde_json::from_str(
            r#"{"linksets": [{"linksetdbs": [
                {"linkname": "pubmed_pubmed_citedin", "links": [1, 2, 3]}
            ]}]}"#,
        )
        .unwrap();
        assert_eq!(response.linksets[0].linksetdbs[0].links.len(), 3);
    }
}
