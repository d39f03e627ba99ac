//! # Trueno-Charts
//!
//! Declarative chart builders with idempotent redraw.
//!
//! A chart accumulates typed options through chainable setters, validates
//! them lazily when a `draw_*` operation runs, derives scales and bins from
//! the bound dataset, and repaints its surface from scratch. Drawing again
//! with different options gives the same picture as drawing once with the
//! final options.
//!
//! ## Chart Kinds
//!
//! - **Bar**: keyed values, grouped records, or one selected record
//! - **Histogram**: explicit, nice or count-based bins
//! - **Scatter**: several x series against one y, with a legend
//! - **Heatmap**: sorted values in a grid under a numeric color scale
//! - **Timeseries**: date-indexed lines with an optional crosshair
//! - **Table**: selected record fields as text cells
//!
//! ## Quick Start
//!
//! ```rust
//! use trueno_charts::prelude::*;
//!
//! let mut chart = BarChart::new();
//! chart.init(SvgSurface::new(), Dataset::keyed([("a", 3.0), ("b", 7.0)]));
//! chart.set_title("Counts").set_label_bars(true).draw_object()?;
//!
//! let svg = chart.surface().map(SvgSurface::render).unwrap_or_default();
//! assert!(svg.contains("<rect"));
//! # Ok::<(), trueno_charts::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `config` (default): load a [`ChartStyle`](config::ChartStyle) from YAML

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
// Allow unwrap() in tests only - banned in production code
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Core Modules
// ============================================================================

/// Color values and palettes.
pub mod color;

/// Geometric primitives and chart dimensions.
pub mod geometry;

/// Datasets bound to a chart.
pub mod data;

/// Tick and label formatting.
pub mod format;

/// Scale functions for data-to-visual mappings.
pub mod scale;

/// Histogram binning.
pub mod binning;

// ============================================================================
// Chart Modules
// ============================================================================

/// Shared presentation style.
pub mod config;

/// Generic chart builder core.
pub mod chart;

/// Chart kinds (bar, histogram, scatter, heatmap, timeseries, table).
pub mod plots;

// ============================================================================
// Rendering Modules
// ============================================================================

/// Scene description and surfaces.
pub mod render;

// ============================================================================
// Error Types
// ============================================================================

/// Error types for trueno-charts operations.
pub mod error;

pub use error::{Error, Result};

// ============================================================================
// Prelude
// ============================================================================

/// Commonly used types and traits for convenient imports.
///
/// ```rust
/// use trueno_charts::prelude::*;
/// ```
pub mod prelude {
    pub use batuta_common::display::WithDimensions;
    pub use crate::binning::BinSpec;
    pub use crate::chart::{Chart, ChartKind, ChartState, Titles};
    pub use crate::color::{Rgba, SCHEME_PAIRED};
    pub use crate::config::ChartStyle;
    pub use crate::data::{Dataset, Record, Value};
    pub use crate::error::{Error, Result};
    pub use crate::format::TickFormat;
    pub use crate::geometry::{Dimensions, Point, Rect};
    pub use crate::plots::{
        Bar, BarChart, Heatmap, HeatmapChart, Histogram, HistogramChart, Scatter, ScatterChart,
        Table, TableChart, Timeseries, TimeseriesChart,
    };
    pub use crate::render::{Scene, SvgSurface, Surface, TrackReadout};
}
