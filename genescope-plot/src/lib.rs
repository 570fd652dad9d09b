//! Genescope Plot - serializable plot specifications.
//!
//! Turns analyzer output into self-contained, Plotly-shaped structures
//! (traces + layout) that the browser can render without further server
//! calls. Building a spec is pure: the same records always produce the
//! same serialized structure, which is what makes the result cacheable.

pub mod boxplot;
pub mod spec;
pub mod volcano;

pub use boxplot::{boxplot_for_symbol, boxplot_spec};
pub use spec::{
    Annotation, Axis, Font, Layout, Legend, LineStyle, Margin, Marker, PlotSpec, Shape, Trace,
};
pub use volcano::volcano_spec;
