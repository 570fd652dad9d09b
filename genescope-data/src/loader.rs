//! Expression sheet reader.
//!
//! Parses the tabulated differential-expression sheet (CSV or TSV) into
//! per-gene rows. Structural problems (missing required columns, unreadable
//! file) abort the load; malformed individual rows are excluded and counted
//! so the exclusion is visible, never silent.

use std::fs;
use std::io::{Cursor, Read};
use std::path::Path;

use genescope_core::{Cohort, DataError, GenescopeResult, SampleValue};

/// Column carrying the gene symbol.
pub const COLUMN_SYMBOL: &str = "EntrezGeneSymbol";
/// Column carrying the log2 fold-change.
pub const COLUMN_LOG_FC: &str = "logFC";
/// Column carrying the adjusted p-value.
pub const COLUMN_ADJ_P: &str = "adj.P.Val";

/// One successfully parsed sheet row.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionRow {
    pub symbol: String,
    pub log_fc: f64,
    pub adj_p_value: f64,
    pub young: Vec<SampleValue>,
    pub old: Vec<SampleValue>,
}

/// Loader output: usable rows plus the count of excluded ones.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedSheet {
    pub rows: Vec<ExpressionRow>,
    pub skipped_rows: usize,
}

/// Load the expression sheet from disk, detecting the delimiter from the
/// header line (tab wins over comma, matching how the sheet is exported).
pub fn load_sheet(path: &Path) -> GenescopeResult<ParsedSheet> {
    let contents = fs::read_to_string(path).map_err(|e| DataError::Read {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    let header_line = contents.lines().next().unwrap_or("");
    let delimiter = if header_line.contains('\t') { b'\t' } else { b',' };

    read_rows(Cursor::new(contents), delimiter)
}

/// Parse sheet rows from any reader with a known delimiter.
pub fn read_rows<R: Read>(reader: R, delimiter: u8) -> GenescopeResult<ParsedSheet> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|e| DataError::Read {
            path: "<reader>".to_string(),
            reason: e.to_string(),
        })?
        .clone();

    let symbol_idx = column_index(&headers, COLUMN_SYMBOL)?;
    let log_fc_idx = column_index(&headers, COLUMN_LOG_FC)?;
    let adj_p_idx = column_index(&headers, COLUMN_ADJ_P)?;

    // Donor columns are recognized by their YD/OD cohort markers.
    let sample_columns: Vec<(usize, String, Cohort)> = headers
        .iter()
        .enumerate()
        .filter_map(|(idx, name)| {
            Cohort::from_sample_name(name).map(|cohort| (idx, name.to_string(), cohort))
        })
        .collect();

    let mut rows = Vec::new();
    let mut skipped_rows = 0usize;

    for (line, record) in csv_reader.records().enumerate() {
        let record = match record {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(row = line + 2, error = %e, "Skipping unparsable sheet row");
                skipped_rows += 1;
                continue;
            }
        };

        let symbol = record.get(symbol_idx).unwrap_or("").trim();
        if symbol.is_empty() {
            tracing::warn!(row = line + 2, "Skipping row without a gene symbol");
            skipped_rows += 1;
            continue;
        }

        let log_fc = parse_statistic(&record, log_fc_idx);
        let adj_p_value = parse_statistic(&record, adj_p_idx);

        let (log_fc, adj_p_value) = match (log_fc, adj_p_value) {
            // A non-positive p-value cannot be placed on the -log10 axis.
            (Some(fc), Some(p)) if p > 0.0 => (fc, p),
            _ => {
                tracing::warn!(
                    row = line + 2,
                    symbol,
                    "Skipping row with non-numeric fold-change or p-value"
                );
                skipped_rows += 1;
                continue;
            }
        };

        let mut young = Vec::new();
        let mut old = Vec::new();
        for (idx, name, cohort) in &sample_columns {
            let raw = record.get(*idx).unwrap_or("").trim();
            match raw.parse::<f64>() {
                Ok(value) if value.is_finite() => {
                    let sample = SampleValue {
                        sample: name.clone(),
                        value,
                    };
                    match cohort {
                        Cohort::Young => young.push(sample),
                        Cohort::Old => old.push(sample),
                    }
                }
                _ => {
                    tracing::debug!(row = line + 2, symbol, sample = %name, "Dropping non-numeric sample value");
                }
            }
        }

        rows.push(ExpressionRow {
            symbol: symbol.to_string(),
            log_fc,
            adj_p_value,
            young,
            old,
        });
    }

    Ok(ParsedSheet { rows, skipped_rows })
}

fn column_index(headers: &csv::StringRecord, name: &str) -> Result<usize, DataError> {
    headers
        .iter()
        .position(|h| h.trim() == name)
        .ok_or_else(|| DataError::MissingColumn {
            column: name.to_string(),
        })
}

fn parse_statistic(record: &csv::StringRecord, idx: usize) -> Option<f64> {
    record
        .get(idx)
        .and_then(|raw| raw.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use genescope_core::GenescopeError;

    const SHEET: &str = "\
EntrezGeneSymbol,logFC,adj.P.Val,Set002.H4.YD1,Set002.H4.YD2,Set002.H4.OD1,Set002.H4.OD2
CDK2,1.5,0.001,0.8,1.2,1.8,2.2
GDF15,-0.8,0.02,2.1,2.0,1.1,0.9
FLAT,0.0,0.5,1.0,1.0,1.0,1.0
";

    #[test]
    fn test_read_rows_parses_all_columns() {
        let sheet = read_rows(Cursor::new(SHEET), b',').unwrap();
        assert_eq!(sheet.rows.len(), 3);
        assert_eq!(sheet.skipped_rows, 0);

        let cdk2 = &sheet.rows[0];
        assert_eq!(cdk2.symbol, "CDK2");
        assert_eq!(cdk2.log_fc, 1.5);
        assert_eq!(cdk2.adj_p_value, 0.001);
        assert_eq!(cdk2.young.len(), 2);
        assert_eq!(cdk2.old.len(), 2);
        assert_eq!(cdk2.young[0].sample, "Set002.H4.YD1");
        assert_eq!(cdk2.young[0].value, 0.8);
        assert_eq!(cdk2.old[1].value, 2.2);
    }

    #[test]
    fn test_read_rows_tab_delimited() {
        let tsv = SHEET.replace(',', "\t");
        let sheet = read_rows(Cursor::new(tsv), b'\t').unwrap();
        assert_eq!(sheet.rows.len(), 3);
    }

    #[test]
    fn test_missing_required_column_fails_load() {
        let sheet = "EntrezGeneSymbol,logFC,Set002.H4.YD1\nCDK2,1.5,0.8\n";
        let err = read_rows(Cursor::new(sheet), b',').unwrap_err();
        match err {
            GenescopeError::Data(DataError::MissingColumn { column }) => {
                assert_eq!(column, "adj.P.Val");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_malformed_rows_excluded_and_counted() {
        let sheet = "\
EntrezGeneSymbol,logFC,adj.P.Val,Set002.H4.YD1
CDK2,1.5,0.001,0.8
BAD,not-a-number,0.01,0.9
WORSE,0.4,,1.0
,1.0,0.01,1.1
OK,-0.2,0.3,1.2
";
        let parsed = read_rows(Cursor::new(sheet), b',').unwrap();
        assert_eq!(parsed.rows.len(), 2);
        assert_eq!(parsed.skipped_rows, 3);
        assert_eq!(parsed.rows[0].symbol, "CDK2");
        assert_eq!(parsed.rows[1].symbol, "OK");
    }

    #[test]
    fn test_zero_p_value_row_excluded() {
        let sheet = "\
EntrezGeneSymbol,logFC,adj.P.Val
CDK2,1.5,0.0
";
        let parsed = read_rows(Cursor::new(sheet), b',').unwrap();
        assert!(parsed.rows.is_empty());
        assert_eq!(parsed.skipped_rows, 1);
    }

    #[test]
    fn test_non_numeric_sample_value_dropped_without_losing_row() {
        let sheet = "\
EntrezGeneSymbol,logFC,adj.P.Val,Set002.H4.YD1,Set002.H4.OD1
CDK2,1.5,0.001,n/a,2.0
";
        let parsed = read_rows(Cursor::new(sheet), b',').unwrap();
        assert_eq!(parsed.rows.len(), 1);
        assert_eq!(parsed.skipped_rows, 0);
        assert!(parsed.rows[0].young.is_empty());
        assert_eq!(parsed.rows[0].old.len(), 1);
    }
}
