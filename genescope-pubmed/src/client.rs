//! HTTP client for MyGene.info and the NCBI E-utilities.
//!
//! One page of publications is assembled from three upstream calls: a
//! MyGene query resolves the symbol to a gene id, the gene's GeneRIF
//! annotations supply PMIDs, and esummary/elink fill in title, date, and
//! citation count for the PMIDs on the requested page only.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use genescope_core::{PaginatedPublications, PublicationError, PublicationRecord, UNKNOWN_DATE};
use serde::de::DeserializeOwned;

use crate::order;
use crate::types::{
    pmid_from_value, ElinkResponse, EsummaryDoc, EsummaryResponse, GeneResponse, QueryResponse,
};
use crate::PublicationProvider;

const CITED_IN_LINKNAME: &str = "pubmed_pubmed_citedin";

/// Configuration for the publication client.
#[derive(Debug, Clone)]
pub struct MyGeneConfig {
    pub mygene_base_url: String,
    pub eutils_base_url: String,
    /// Timeout applied to each individual HTTP request.
    pub request_timeout: Duration,
    /// Deadline for assembling one whole page, across all upstream calls.
    pub fetch_timeout: Duration,
    /// Cap on PMIDs considered per gene.
    pub max_papers: usize,
}

impl Default for MyGeneConfig {
    fn default() -> Self {
        Self {
            mygene_base_url: "https://mygene.info/v3".to_string(),
            eutils_base_url: "https://eutils.ncbi.nlm.nih.gov/entrez/eutils".to_string(),
            request_timeout: Duration::from_secs(15),
            fetch_timeout: Duration::from_secs(100),
            max_papers: 50,
        }
    }
}

/// Publication client backed by MyGene.info and NCBI E-utilities.
#[derive(Debug, Clone)]
pub struct MyGeneClient {
    http: reqwest::Client,
    config: MyGeneConfig,
}

impl MyGeneClient {
    pub fn new(config: MyGeneConfig) -> Result<Self, PublicationError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| PublicationError::transport(e.to_string()))?;
        Ok(Self { http, config })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        service: &str,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<T, PublicationError> {
        let response = self
            .http
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| PublicationError::transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PublicationError::invalid_response(
                service,
                format!("HTTP {status}"),
            ));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| PublicationError::invalid_response(service, e.to_string()))
    }

    /// Resolve a gene symbol to a MyGene gene id. An unrecognized symbol is
    /// not an error; it yields `None`.
    async fn resolve_symbol(&self, symbol: &str) -> Result<Option<String>, PublicationError> {
        let url = format!("{}/query", self.config.mygene_base_url);
        let q = format!("symbol:{symbol}");
        let response: QueryResponse = self
            .get_json("mygene", &url, &[("q", q.as_str()), ("species", "human"), ("size", "1")])
            .await?;
        Ok(response.hits.into_iter().next().map(|hit| hit.id))
    }

    /// Fetch the gene's PMIDs from its GeneRIF annotations plus the reporter
    /// publication list, deduplicated in first-seen order and capped at
    /// `max_papers`.
    async fn fetch_pmids(&self, gene_id: &str) -> Result<Vec<String>, PublicationError> {
        let url = format!("{}/gene/{}", self.config.mygene_base_url, gene_id);
        let response: GeneResponse = self
            .get_json(
                "mygene",
                &url,
                &[("fields", "generif.pubmed,reporter.publications")],
            )
            .await?;

        let rif_pmids = response
            .generif
            .iter()
            .filter_map(|rif| rif.pubmed.as_ref());
        let reporter_pmids = response
            .reporter
            .iter()
            .flat_map(|reporter| reporter.publications.iter());

        let mut pmids = Vec::new();
        for value in rif_pmids.chain(reporter_pmids) {
            let Some(pmid) = pmid_from_value(value) else {
                continue;
            };
            if !pmids.contains(&pmid) {
                pmids.push(pmid);
            }
            if pmids.len() >= self.config.max_papers {
                break;
            }
        }
        Ok(pmids)
    }

    /// Fetch title and normalized date for a batch of PMIDs. PMIDs the
    /// summary service does not know keep their fallback values.
    async fn fetch_summaries(
        &self,
        pmids: &[String],
    ) -> Result<HashMap<String, (Option<String>, String)>, PublicationError> {
        if pmids.is_empty() {
            return Ok(HashMap::new());
        }

        let url = format!("{}/esummary.fcgi", self.config.eutils_base_url);
        let ids = pmids.join(",");
        let response: EsummaryResponse = self
            .get_json(
                "eutils",
                &url,
                &[("db", "pubmed"), ("id", ids.as_str()), ("retmode", "json")],
            )
            .await?;

        let mut summaries = HashMap::with_capacity(pmids.len());
        for pmid in pmids {
            let Some(value) = response.result.get(pmid) else {
                continue;
            };
            let Ok(doc) = serde_json::from_value::<EsummaryDoc>(value.clone()) else {
                continue;
            };
            let date = doc
                .pubdate
                .as_deref()
                .map(normalize_pubdate)
                .unwrap_or_else(|| UNKNOWN_DATE.to_string());
            summaries.insert(pmid.clone(), (doc.title, date));
        }
        Ok(summaries)
    }

    /// Count publications citing `pmid`. Citation counts are decoration, so
    /// a failed lookup degrades to zero rather than failing the page.
    async fn fetch_citation_count(&self, pmid: &str) -> u32 {
        let url = format!("{}/elink.fcgi", self.config.eutils_base_url);
        let result: Result<ElinkResponse, PublicationError> = self
            .get_json(
                "eutils",
                &url,
                &[
                    ("dbfrom", "pubmed"),
                    ("linkname", CITED_IN_LINKNAME),
                    ("id", pmid),
                    ("retmode", "json"),
                ],
            )
            .await;

        match result {
            Ok(response) => response
                .linksets
                .iter()
                .flat_map(|set| &set.linksetdbs)
                .filter(|db| db.linkname == CITED_IN_LINKNAME)
                .map(|db| db.links.len() as u32)
                .sum(),
            Err(error) => {
                tracing::warn!(pmid, %error, "Citation count lookup failed, using 0");
                0
            }
        }
    }

    async fn fetch_page_inner(
        &self,
        symbol: &str,
        page: u32,
        page_size: u32,
    ) -> Result<PaginatedPublications, PublicationError> {
        let Some(gene_id) = self.resolve_symbol(symbol).await? else {
            tracing::info!(symbol, "Symbol did not resolve to a gene id");
            return Ok(PaginatedPublications::empty(page, page_size, 0));
        };

        let pmids = self.fetch_pmids(&gene_id).await?;
        let total = pmids.len();
        let Some((start, end)) = order::page_bounds(total, page, page_size) else {
            return Ok(PaginatedPublications::empty(page, page_size, total));
        };

        let page_pmids = &pmids[start..end];
        let summaries = self.fetch_summaries(page_pmids).await?;

        let mut papers = Vec::with_capacity(page_pmids.len());
        for pmid in page_pmids {
            let (title, date) = summaries
                .get(pmid)
                .cloned()
                .unwrap_or((None, UNKNOWN_DATE.to_string()));
            let citations = self.fetch_citation_count(pmid).await;
            papers.push(PublicationRecord {
                pmid: pmid.clone(),
                title,
                url: pubmed_url(pmid),
                date,
                citations,
            });
        }

        Ok(PaginatedPublications {
            papers,
            page,
            page_size,
            total,
            has_more: order::has_more(total, page, page_size),
        })
    }
}

#[async_trait]
impl PublicationProvider for MyGeneClient {
    async fn fetch_page(
        &self,
        symbol: &str,
        page: u32,
        page_size: u32,
    ) -> Result<PaginatedPublications, PublicationError> {
        let deadline = self.config.fetch_timeout;
        match tokio::time::timeout(deadline, self.fetch_page_inner(symbol, page, page_size)).await
        {
            Ok(result) => result,
            Err(_) => Err(PublicationError::Timeout {
                seconds: deadline.as_secs(),
            }),
        }
    }
}

/// Canonical PubMed entry URL for a PMID.
pub fn pubmed_url(pmid: &str) -> String {
    format!("https://pubmed.ncbi.nlm.nih.gov/{pmid}")
}

/// Normalize an esummary `pubdate` to `YYYY-MM-DD`.
///
/// Upstream dates arrive in several shapes (`2020 Jan 15`, `2020 Jan`,
/// `2020`, occasionally already ISO); missing parts default to the first
/// month or day. Anything unparseable becomes the [`UNKNOWN_DATE`] sentinel.
pub fn normalize_pubdate(pubdate: &str) -> String {
    let trimmed = pubdate.trim();
    let candidates = [
        trimmed.to_string(),
        format!("{trimmed} 1"),
        format!("{trimmed} Jan 1"),
    ];

    for candidate in &candidates {
        for format in ["%Y-%m-%d", "%Y %b %d"] {
            if let Ok(date) = NaiveDate::parse_from_str(candidate, format) {
                return date.format("%Y-%m-%d").to_string();
            }
        }
    }
    UNKNOWN_DATE.to_string()
}
