//! Expression analyzer: regulation calls and the read-only dataset.

use std::collections::HashMap;
use std::path::Path;

use genescope_core::{DataError, GeneRecord, GenescopeResult, Regulation};

use crate::loader::{self, ExpressionRow};

/// Derive one [`GeneRecord`] per parsed row.
///
/// The regulation call is pure: Up iff `logFC > 0` and `adjP < threshold`,
/// Down iff `logFC < 0` and `adjP < threshold`, otherwise NotSignificant.
pub fn analyze(rows: Vec<ExpressionRow>, threshold: f64) -> Vec<GeneRecord> {
    rows.into_iter()
        .map(|row| GeneRecord {
            regulation: Regulation::classify(row.log_fc, row.adj_p_value, threshold),
            symbol: row.symbol,
            log_fc: row.log_fc,
            adj_p_value: row.adj_p_value,
            young: row.young,
            old: row.old,
        })
        .collect()
}

/// Analyzed expression dataset.
///
/// Built once at process start and shared read-only afterwards; no interior
/// mutability, so concurrent readers need no synchronization.
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Vec<GeneRecord>,
    by_symbol: HashMap<String, usize>,
    skipped_rows: usize,
}

impl Dataset {
    /// Load and analyze the expression sheet at `path`.
    ///
    /// This is the only fatal code path in the pipeline: a sheet that cannot
    /// be loaded (or contains no usable rows) aborts startup.
    pub fn load(path: &Path, threshold: f64) -> GenescopeResult<Self> {
        let sheet = loader::load_sheet(path)?;
        if sheet.skipped_rows > 0 {
            tracing::warn!(
                skipped = sheet.skipped_rows,
                "Excluded malformed rows from expression sheet"
            );
        }
        Self::from_rows(sheet.rows, sheet.skipped_rows, threshold)
    }

    /// Build a dataset from already-parsed rows.
    pub fn from_rows(
        rows: Vec<ExpressionRow>,
        skipped_rows: usize,
        threshold: f64,
    ) -> GenescopeResult<Self> {
        let records = analyze(rows, threshold);
        if records.is_empty() {
            return Err(DataError::EmptyDataset.into());
        }

        let mut by_symbol = HashMap::with_capacity(records.len());
        for (idx, record) in records.iter().enumerate() {
            // First occurrence wins for duplicated symbols.
            by_symbol.entry(record.symbol.clone()).or_insert(idx);
        }

        tracing::info!(
            genes = records.len(),
            skipped = skipped_rows,
            "Expression dataset analyzed"
        );

        Ok(Self {
            records,
            by_symbol,
            skipped_rows,
        })
    }

    /// Look up a gene by symbol (exact match).
    pub fn get(&self, symbol: &str) -> Option<&GeneRecord> {
        self.by_symbol.get(symbol).map(|idx| &self.records[*idx])
    }

    /// All analyzed records, in sheet order.
    pub fn records(&self) -> &[GeneRecord] {
        &self.records
    }

    /// Number of analyzed genes.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of sheet rows excluded during loading.
    pub fn skipped_rows(&self) -> usize {
        self.skipped_rows
    }
}
