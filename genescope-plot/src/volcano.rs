//! Volcano plot specification builder.

use genescope_core::{GeneRecord, Regulation, SIGNIFICANCE_THRESHOLD};

use crate::spec::{
    Annotation, Axis, Font, Layout, Legend, LineStyle, Margin, Marker, PlotSpec, Shape, Trace,
};

const HOVER_TEMPLATE: &str =
    "<b>%{customdata[0]}</b><br>Log2 FC: %{x:.3f}<br>p-value: %{text}<br><extra></extra>";

/// Fixed trace order; categories with no points contribute no trace.
const CATEGORIES: [Regulation; 3] = [
    Regulation::NotSignificant,
    Regulation::Up,
    Regulation::Down,
];

/// Build the volcano plot specification from the analyzed records.
///
/// One scatter trace per regulation category; every point carries its gene
/// symbol as non-visual `customdata` so a click can be resolved back to a
/// gene. Pure function of its input: the same records always serialize to
/// the same JSON.
pub fn volcano_spec(records: &[GeneRecord]) -> PlotSpec {
    let mut data = Vec::new();
    for category in CATEGORIES {
        if let Some(trace) = category_trace(records, category) {
            data.push(trace);
        }
    }

    let x_max = symmetric_x_limit(records);
    let y_max = records
        .iter()
        .map(GeneRecord::neg_log10_p)
        .fold(0.0f64, f64::max);
    let significance_y = -SIGNIFICANCE_THRESHOLD.log10();

    let dashed = |x0: f64, x1: f64, y0: f64, y1: f64| {
        Shape::line(
            x0,
            x1,
            y0,
            y1,
            LineStyle {
                color: "darkgray".to_string(),
                width: 1,
                dash: Some("dash".to_string()),
            },
        )
    };

    let layout = Layout {
        title: "Volcano Plot of Protein Activity".to_string(),
        xaxis: Some(Axis {
            title: "Log2 Fold Change".to_string(),
            gridcolor: Some("lightgray".to_string()),
            zeroline: Some(true),
            zerolinecolor: Some("black".to_string()),
            zerolinewidth: Some(1),
            range: Some([-x_max, x_max]),
        }),
        yaxis: Some(Axis {
            title: "-log10(adjusted P-value)".to_string(),
            gridcolor: Some("lightgray".to_string()),
            ..Axis::default()
        }),
        plot_bgcolor: Some("white".to_string()),
        hovermode: Some("closest".to_string()),
        margin: Some(Margin {
            l: 50,
            r: 50,
            b: 80,
            t: 100,
            pad: 4,
        }),
        legend: Some(Legend {
            orientation: "h".to_string(),
            yanchor: "bottom".to_string(),
            y: 1.02,
            xanchor: "center".to_string(),
            x: 0.5,
        }),
        shapes: vec![
            // Significance threshold.
            dashed(-x_max, x_max, significance_y, significance_y),
            // Fold-change guides at +/-1.
            dashed(1.0, 1.0, 0.0, y_max),
            dashed(-1.0, -1.0, 0.0, y_max),
        ],
        annotations: vec![Annotation {
            x: 0.0,
            y: significance_y,
            text: "p = 0.05".to_string(),
            showarrow: false,
            yshift: Some(10.0),
            font: Some(Font { size: 10 }),
        }],
        ..Layout::default()
    };

    PlotSpec { data, layout }
}

fn category_trace(records: &[GeneRecord], category: Regulation) -> Option<Trace> {
    let points: Vec<&GeneRecord> = records
        .iter()
        .filter(|r| r.regulation == category)
        .collect();
    if points.is_empty() {
        return None;
    }

    let (color, size, opacity) = match category {
        Regulation::NotSignificant => ("gray", 6, 0.6),
        Regulation::Up => ("red", 8, 0.8),
        Regulation::Down => ("blue", 8, 0.8),
    };

    Some(Trace {
        trace_type: "scatter".to_string(),
        name: category.as_str().to_string(),
        x: Some(points.iter().map(|r| r.log_fc).collect()),
        y: points.iter().map(|r| r.neg_log10_p()).collect(),
        mode: Some("markers".to_string()),
        marker: Some(Marker {
            color: color.to_string(),
            size: Some(size),
            opacity: Some(opacity),
        }),
        customdata: Some(points.iter().map(|r| vec![r.symbol.clone()]).collect()),
        text: Some(
            points
                .iter()
                .map(|r| format!("{:.2e}", r.adj_p_value))
                .collect(),
        ),
        hovertemplate: Some(HOVER_TEMPLATE.to_string()),
        ..Trace::default()
    })
}

/// Symmetric x-axis limit: largest |logFC| plus 10% padding, rounded to one
/// decimal, with a fallback when the range degenerates.
fn symmetric_x_limit(records: &[GeneRecord]) -> f64 {
    let max_abs = records
        .iter()
        .map(|r| r.log_fc.abs())
        .fold(0.0f64, f64::max);
    let padded = (max_abs * 1.1 * 10.0).round() / 10.0;
    if padded == 0.0 || !padded.is_finite() {
        5.0
    } else {
        padded
    }
}
