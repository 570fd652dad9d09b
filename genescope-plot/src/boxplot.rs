//! Boxplot specification builder for a single gene.

use genescope_core::{Cohort, GeneNotFound, GeneRecord, GenescopeResult, SampleValue};
use genescope_data::Dataset;

use crate::spec::{Axis, Layout, Marker, PlotSpec, Trace};

/// Build the Young-vs-Old boxplot specification for one gene.
///
/// Exactly one box trace per cohort that has samples; measured values pass
/// through unmodified. A gene with no sample columns yields an empty `data`
/// array with the layout intact.
pub fn boxplot_spec(record: &GeneRecord) -> PlotSpec {
    let mut data = Vec::new();
    for (cohort, samples) in [(Cohort::Young, &record.young), (Cohort::Old, &record.old)] {
        if let Some(trace) = cohort_trace(cohort, samples) {
            data.push(trace);
        }
    }

    let layout = Layout {
        title: format!(
            "Protein levels of {} in Young vs Old samples",
            record.symbol
        ),
        xaxis: Some(Axis {
            title: "Age group".to_string(),
            ..Axis::default()
        }),
        yaxis: Some(Axis {
            title: "Protein level".to_string(),
            gridcolor: Some("lightgray".to_string()),
            ..Axis::default()
        }),
        plot_bgcolor: Some("white".to_string()),
        boxmode: Some("group".to_string()),
        ..Layout::default()
    };

    PlotSpec { data, layout }
}

/// Look up `symbol` in the dataset and build its boxplot.
pub fn boxplot_for_symbol(dataset: &Dataset, symbol: &str) -> GenescopeResult<PlotSpec> {
    let record = dataset
        .get(symbol)
        .ok_or_else(|| GeneNotFound::new(symbol))?;
    Ok(boxplot_spec(record))
}

fn cohort_trace(cohort: Cohort, samples: &[SampleValue]) -> Option<Trace> {
    if samples.is_empty() {
        return None;
    }

    let color = match cohort {
        Cohort::Young => "royalblue",
        Cohort::Old => "firebrick",
    };

    Some(Trace {
        trace_type: "box".to_string(),
        name: cohort.label().to_string(),
        y: samples.iter().map(|s| s.value).collect(),
        marker: Some(Marker {
            color: color.to_string(),
            size: None,
            opacity: None,
        }),
        boxmean: Some(true),
        ..Trace::default()
    })
}
