//! Gene-level data model: regulation calls, cohorts, and analyzed records.

use serde::{Deserialize, Serialize};

/// Adjusted p-value cutoff below which a gene is called differentially
/// expressed. 0.05 is the conventional level and the one the analysis has
/// always used.
pub const SIGNIFICANCE_THRESHOLD: f64 = 0.05;

// ============================================================================
// REGULATION
// ============================================================================

/// Regulation call for a gene, derived from fold-change direction and
/// adjusted p-value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum Regulation {
    /// logFC > 0 and adjusted p-value below the significance threshold.
    #[serde(rename = "up-regulated")]
    Up,
    /// logFC < 0 and adjusted p-value below the significance threshold.
    #[serde(rename = "down-regulated")]
    Down,
    /// Everything else, including genes exactly at the threshold.
    #[serde(rename = "not significant")]
    NotSignificant,
}

impl Regulation {
    /// Classify a gene from its log fold-change and adjusted p-value.
    ///
    /// A p-value exactly at the threshold is not significant, and a
    /// fold-change of exactly zero has no direction; both yield
    /// `NotSignificant`.
    pub fn classify(log_fc: f64, adj_p_value: f64, threshold: f64) -> Self {
        if adj_p_value < threshold && log_fc > 0.0 {
            Regulation::Up
        } else if adj_p_value < threshold && log_fc < 0.0 {
            Regulation::Down
        } else {
            Regulation::NotSignificant
        }
    }

    /// Wire/display name, matching the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Regulation::Up => "up-regulated",
            Regulation::Down => "down-regulated",
            Regulation::NotSignificant => "not significant",
        }
    }
}

// ============================================================================
// COHORTS AND SAMPLES
// ============================================================================

/// Donor age cohort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum Cohort {
    Young,
    Old,
}

impl Cohort {
    /// Infer the cohort from a sample column name.
    ///
    /// Young-donor columns carry a `YD` marker and old-donor columns an `OD`
    /// marker (e.g. `Set002.H4.YD12`). Columns with neither marker are not
    /// sample columns and yield `None`.
    pub fn from_sample_name(name: &str) -> Option<Self> {
        let upper = name.to_uppercase();
        if upper.contains("YD") {
            Some(Cohort::Young)
        } else if upper.contains("OD") {
            Some(Cohort::Old)
        } else {
            None
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Cohort::Young => "Young",
            Cohort::Old => "Old",
        }
    }
}

/// One donor measurement for a gene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleValue {
    /// Sample column name, e.g. `Set002.H4.YD12`.
    pub sample: String,
    /// Expression level for this gene in this sample.
    pub value: f64,
}

// ============================================================================
// GENE RECORD
// ============================================================================

/// Per-gene analysis result plus the grouped per-sample expression values.
///
/// Records are built once when the dataset is loaded and never mutated
/// afterwards; the serving layer shares them read-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneRecord {
    /// Gene symbol (unique key within the dataset).
    pub symbol: String,
    /// Log2 fold-change between the old and young cohorts.
    pub log_fc: f64,
    /// Multiple-comparison adjusted p-value.
    pub adj_p_value: f64,
    /// Regulation call derived from `log_fc` and `adj_p_value`.
    pub regulation: Regulation,
    /// Per-sample expression values for young donors.
    pub young: Vec<SampleValue>,
    /// Per-sample expression values for old donors.
    pub old: Vec<SampleValue>,
}

impl GeneRecord {
    /// Volcano-plot y coordinate: -log10 of the adjusted p-value.
    pub fn neg_log10_p(&self) -> f64 {
        -self.adj_p_value.log10()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_classify_up_regulated() {
        assert_eq!(
            Regulation::classify(1.5, 0.001, SIGNIFICANCE_THRESHOLD),
            Regulation::Up
        );
    }

    #[test]
    fn test_classify_down_regulated() {
        assert_eq!(
            Regulation::classify(-0.8, 0.02, SIGNIFICANCE_THRESHOLD),
            Regulation::Down
        );
    }

    #[test]
    fn test_classify_insignificant_p_value() {
        assert_eq!(
            Regulation::classify(2.0, 0.2, SIGNIFICANCE_THRESHOLD),
            Regulation::NotSignificant
        );
    }

    #[test]
    fn test_classify_boundary_p_value_is_not_significant() {
        // Exactly at the threshold: strict less-than is required.
        assert_eq!(
            Regulation::classify(1.0, SIGNIFICANCE_THRESHOLD, SIGNIFICANCE_THRESHOLD),
            Regulation::NotSignificant
        );
        assert_eq!(
            Regulation::classify(-1.0, SIGNIFICANCE_THRESHOLD, SIGNIFICANCE_THRESHOLD),
            Regulation::NotSignificant
        );
    }

    #[test]
    fn test_classify_zero_fold_change_is_not_significant() {
        assert_eq!(
            Regulation::classify(0.0, 0.001, SIGNIFICANCE_THRESHOLD),
            Regulation::NotSignificant
        );
    }

    #[test]
    fn test_regulation_wire_names() {
        assert_eq!(
            serde_json::to_string(&Regulation::Up).unwrap(),
            "\"up-regulated\""
        );
        assert_eq!(
            serde_json::to_string(&Regulation::Down).unwrap(),
            "\"down-regulated\""
        );
        assert_eq!(
            serde_json::to_string(&Regulation::NotSignificant).unwrap(),
            "\"not significant\""
        );
    }

    #[test]
    fn test_cohort_from_sample_name() {
        assert_eq!(Cohort::from_sample_name("Set002.H4.YD12"), Some(Cohort::Young));
        assert_eq!(Cohort::from_sample_name("Set002.H4.OD12"), Some(Cohort::Old));
        assert_eq!(Cohort::from_sample_name("Other.Column"), None);
        assert_eq!(Cohort::from_sample_name("set001.yd3"), Some(Cohort::Young));
    }

    #[test]
    fn test_neg_log10_p() {
        let record = GeneRecord {
            symbol: "CDK2".to_string(),
            log_fc: 1.0,
            adj_p_value: 0.001,
            regulation: Regulation::Up,
            young: vec![],
            old: vec![],
        };
        assert!((record.neg_log10_p() - 3.0).abs() < 1e-12);
    }

    proptest! {
        #[test]
        fn classification_matches_thresholds(
            log_fc in -10.0f64..10.0,
            adj_p in 0.0f64..1.0,
        ) {
            let reg = Regulation::classify(log_fc, adj_p, SIGNIFICANCE_THRESHOLD);
            let significant = adj_p < SIGNIFICANCE_THRESHOLD;
            match reg {
                Regulation::Up => prop_assert!(significant && log_fc > 0.0),
                Regulation::Down => prop_assert!(significant && log_fc < 0.0),
                Regulation::NotSignificant => {
                    prop_assert!(!significant || log_fc == 0.0)
                }
            }
        }
    }
}
