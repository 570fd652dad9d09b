//! Page ordering and pagination arithmetic.

use std::cmp::Ordering;
use std::str::FromStr;

use chrono::NaiveDate;
use genescope_core::PublicationRecord;
use thiserror::Error;

/// Requested ordering for a page of publications.
///
/// Ordering applies within the returned page only; it never reshuffles
/// records across pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageOrder {
    /// Upstream (GeneRIF) order, unchanged.
    #[default]
    Default,
    DateAsc,
    DateDesc,
    CitationsAsc,
    CitationsDesc,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Unknown sort order: {value}")]
pub struct UnknownOrder {
    pub value: String,
}

impl FromStr for PageOrder {
    type Err = UnknownOrder;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "default" => Ok(PageOrder::Default),
            "date-asc" => Ok(PageOrder::DateAsc),
            "date-desc" => Ok(PageOrder::DateDesc),
            "citations-asc" => Ok(PageOrder::CitationsAsc),
            "citations-desc" => Ok(PageOrder::CitationsDesc),
            other => Err(UnknownOrder {
                value: other.to_string(),
            }),
        }
    }
}

/// Sort one page of records in place.
///
/// The sort is stable, so records that compare equal keep their upstream
/// order. Records with an unknown date sort after every dated record in
/// both date directions.
pub fn sort_page(papers: &mut [PublicationRecord], order: PageOrder) {
    match order {
        PageOrder::Default => {}
        PageOrder::DateAsc => papers.sort_by(|a, b| compare_dates(a, b, false)),
        PageOrder::DateDesc => papers.sort_by(|a, b| compare_dates(a, b, true)),
        PageOrder::CitationsAsc => papers.sort_by(|a, b| a.citations.cmp(&b.citations)),
        PageOrder::CitationsDesc => papers.sort_by(|a, b| b.citations.cmp(&a.citations)),
    }
}

fn compare_dates(a: &PublicationRecord, b: &PublicationRecord, descending: bool) -> Ordering {
    match (parse_date(&a.date), parse_date(&b.date)) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => {
            if descending {
                b.cmp(&a)
            } else {
                a.cmp(&b)
            }
        }
    }
}

fn parse_date(date: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
}

// ============================================================================
// PAGINATION
// ============================================================================

/// Half-open index range `[start, end)` into the full result list for a
/// 1-based page, or `None` when the page starts past the end.
pub fn page_bounds(total: usize, page: u32, page_size: u32) -> Option<(usize, usize)> {
    let start = (page.checked_sub(1)? as usize) * page_size as usize;
    if start >= total {
        return None;
    }
    let end = (start + page_size as usize).min(total);
    Some((start, end))
}

/// Whether pages beyond `page` exist.
pub fn has_more(total: usize, page: u32, page_size: u32) -> bool {
    (page as usize) * (page_size as usize) < total
}
