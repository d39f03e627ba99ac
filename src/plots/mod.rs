//! Chart kinds.
//!
//! Each kind is an options struct implementing [`ChartKind`](crate::chart::ChartKind)
//! plus inherent setters and draw operations on `Chart<Kind, S>`. A type
//! alias per kind names the common case.

mod bar;
mod heatmap;
mod histogram;
mod scatter;
mod table;
mod timeseries;

pub use bar::{Bar, BarChart};
pub use heatmap::{Heatmap, HeatmapChart};
pub use histogram::{Histogram, HistogramChart};
pub use scatter::{Scatter, ScatterChart};
pub use table::{Table, TableChart};
pub use timeseries::{Timeseries, TimeseriesChart};

use crate::chart::Frame;
use crate::error::{Error, Result};
use crate::format::TickFormat;
use crate::geometry::Point;
use crate::render::{Legend, LegendEntry, Shape, TextAnchor, TextMark, Tick};
use crate::scale::{extent, BandScale, LinearScale, Scale};

/// Ticks for a numeric axis: explicit values when given, otherwise about
/// `count` round values. Labels use `format` or the scale's default.
pub(crate) fn linear_ticks(
    scale: &LinearScale,
    count: usize,
    explicit: Option<&[f64]>,
    format: Option<&TickFormat>,
) -> Vec<Tick> {
    let values = explicit.map_or_else(|| scale.ticks(count), <[f64]>::to_vec);
    let format = format.cloned().unwrap_or_else(|| scale.tick_format(count));
    values
        .into_iter()
        .map(|v| Tick { offset: scale.scale(v) as f32, label: format.apply(v) })
        .collect()
}

/// One tick per category, at the band center.
pub(crate) fn band_ticks(scale: &BandScale) -> Vec<Tick> {
    scale
        .domain()
        .iter()
        .filter_map(|key| {
            scale.center(key).map(|offset| Tick { offset: offset as f32, label: key.clone() })
        })
        .collect()
}

/// Bold value label.
pub(crate) fn value_label(
    frame: &Frame<'_>,
    x: f64,
    y: f64,
    text: String,
    anchor: TextAnchor,
) -> TextMark {
    TextMark::new(
        x as f32,
        y as f32,
        text,
        frame.style.text(frame.style.label_size).bold().anchor(anchor),
    )
}

/// Bar entering from the bottom of the plotting area with zero height.
pub(crate) fn rising_from_baseline(frame: &Frame<'_>, x: f64, width: f64) -> Shape {
    Shape::rect(x as f32, frame.height() as f32, width as f32, 0.0, frame.style.enter_fill)
}

/// Vertical legend in surface coordinates.
pub(crate) fn legend(frame: &Frame<'_>, origin: Point, entries: Vec<LegendEntry>) -> Legend {
    Legend {
        origin,
        entries,
        swatch: frame.style.legend_swatch,
        row_height: frame.style.legend_row,
        style: frame.style.text(frame.style.legend_size),
    }
}

/// Axis domain by precedence: extent of explicit ticks, then an explicit
/// `[min, max]`, then the data extent.
pub(crate) fn resolve_domain(
    ticks: Option<&[f64]>,
    min_max: Option<(f64, f64)>,
    data: impl IntoIterator<Item = f64>,
) -> Result<(f64, f64)> {
    if let Some(domain) = ticks.and_then(|t| extent(t.iter().copied())) {
        return Ok(domain);
    }
    if let Some(domain) = min_max {
        return Ok(domain);
    }
    extent(data).ok_or(Error::EmptyData)
}
