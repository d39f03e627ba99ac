//! Timeseries: one line per numeric field against a date field, with an
//! optional crosshair tracking one of the lines.

use tracing::debug;

use crate::chart::{Chart, ChartKind, ChartState, Frame};
use crate::color::{Rgba, SCHEME_PAIRED};
use crate::data::{Dataset, Record, Value};
use crate::error::{Error, Result};
use crate::format::{format_date, format_number, parse_date, TickFormat};
use crate::geometry::{Point, Rect};
use crate::render::{LegendEntry, Mark, Scene, Shape, SvgSurface, Surface, TrackReadout};
use crate::scale::{bisect_right, LinearScale, OrdinalScale, Scale};

use super::{legend, linear_ticks, resolve_domain};

const DEFAULT_TICKS: usize = 10;

/// Timeseries options.
#[derive(Debug, Clone)]
pub struct Timeseries {
    variable_x: Option<String>,
    variables_y: Vec<String>,
    variables_y_labels: Option<Vec<String>>,
    time_format: String,
    line_width: f32,
    y_colors: Vec<Rgba>,
    x_ticks: Option<Vec<String>>,
    x_ticks_format: String,
    y_min_max: Option<(f64, f64)>,
    y_ticks_n: Option<usize>,
    y_ticks: Option<Vec<f64>>,
    y_ticks_format: Option<TickFormat>,
    y_track: Option<String>,
}

impl Default for Timeseries {
    fn default() -> Self {
        Self {
            variable_x: None,
            variables_y: Vec::new(),
            variables_y_labels: None,
            time_format: "%Y-%m-%d".to_string(),
            line_width: 2.0,
            y_colors: SCHEME_PAIRED.to_vec(),
            x_ticks: None,
            x_ticks_format: "%Y-%b".to_string(),
            y_min_max: None,
            y_ticks_n: None,
            y_ticks: None,
            y_ticks_format: None,
            y_track: None,
        }
    }
}

impl ChartKind for Timeseries {
    const NAME: &'static str = "timeseries";
}

/// A timeseries chart.
pub type TimeseriesChart<S = SvgSurface> = Chart<Timeseries, S>;

impl<S: Surface> Chart<Timeseries, S> {
    /// Record field holding the date of each record.
    pub fn set_variable_x(&mut self, field: impl Into<String>) -> &mut Self {
        let field = field.into();
        self.configure(|o| o.variable_x = Some(field))
    }

    /// Record fields drawn as lines.
    pub fn set_variables_y<I, T>(&mut self, fields: I) -> &mut Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let fields = fields.into_iter().map(Into::into).collect();
        self.configure(|o| o.variables_y = fields)
    }

    /// Legend labels, one per entry of `variables_y`.
    pub fn set_variables_y_labels<I, T>(&mut self, labels: I) -> &mut Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let labels = labels.into_iter().map(Into::into).collect();
        self.configure(|o| o.variables_y_labels = Some(labels))
    }

    /// strftime-style format of date strings (UTC).
    pub fn set_time_format(&mut self, format: impl Into<String>) -> &mut Self {
        let format = format.into();
        self.configure(|o| o.time_format = format)
    }

    /// Line stroke width.
    pub fn set_line_width(&mut self, width: f32) -> &mut Self {
        self.configure(|o| o.line_width = width)
    }

    /// Palette indexed by position in `variables_y`.
    pub fn set_y_colors(&mut self, colors: Vec<Rgba>) -> &mut Self {
        self.configure(|o| o.y_colors = colors)
    }

    /// Explicit x ticks as date strings; their extent becomes the x domain.
    pub fn set_x_ticks<I, T>(&mut self, ticks: I) -> &mut Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let ticks = ticks.into_iter().map(Into::into).collect();
        self.configure(|o| o.x_ticks = Some(ticks))
    }

    /// strftime-style format of x tick labels.
    pub fn set_x_ticks_format(&mut self, format: impl Into<String>) -> &mut Self {
        let format = format.into();
        self.configure(|o| o.x_ticks_format = format)
    }

    /// Explicit y domain, used when no y ticks are set.
    pub fn set_y_min_max(&mut self, min: f64, max: f64) -> &mut Self {
        self.configure(|o| o.y_min_max = Some((min, max)))
    }

    /// Approximate number of y ticks.
    pub fn set_y_ticks_n(&mut self, count: usize) -> &mut Self {
        self.configure(|o| o.y_ticks_n = Some(count))
    }

    /// Explicit y tick values; their extent becomes the y domain.
    pub fn set_y_ticks(&mut self, ticks: Vec<f64>) -> &mut Self {
        self.configure(|o| o.y_ticks = Some(ticks))
    }

    /// Y tick label format.
    pub fn set_y_ticks_format(&mut self, format: TickFormat) -> &mut Self {
        self.configure(|o| o.y_ticks_format = Some(format))
    }

    /// Series followed by the crosshair. Must be one of `variables_y`.
    pub fn set_y_track(&mut self, field: impl Into<String>) -> &mut Self {
        let field = field.into();
        self.configure(|o| o.y_track = Some(field))
    }

    /// Draw the timeseries.
    ///
    /// # Errors
    ///
    /// Fails when `variable_x` or `variables_y` is unset, a date does not
    /// match `time_format`, or a y field is missing or not numeric.
    pub fn draw_timeseries(&mut self) -> Result<&mut Self> {
        self.draw_with("draw_timeseries", compose)
    }

    /// Move the crosshair to the point of the tracked series nearest to the
    /// left of `pointer_x` (plot coordinates), and show it on the surface.
    ///
    /// Returns `None` when the chart has not been drawn or tracking is off.
    pub fn track_pointer(&mut self, pointer_x: f32) -> Option<TrackReadout> {
        if self.state() != ChartState::Drawn {
            return None;
        }
        let readout = match self.evaluate(|frame, ts, data| readout(frame, ts, data, pointer_x)) {
            Ok(found) => found?,
            Err(err) => {
                debug!(error = %err, "tracking unavailable");
                return None;
            }
        };
        if let Some(surface) = self.surface_mut() {
            surface.show_tracker(&readout);
        }
        Some(readout)
    }

    /// Hide the crosshair.
    pub fn release_pointer(&mut self) -> &mut Self {
        if let Some(surface) = self.surface_mut() {
            surface.hide_tracker();
        }
        self
    }
}

/// One line: field, palette index and `(epoch ms, value)` points.
struct Line<'a> {
    field: &'a str,
    index: usize,
    points: Vec<(f64, f64)>,
}

struct Layout<'a> {
    x: LinearScale,
    y: LinearScale,
    x_ticks: Option<Vec<f64>>,
    lines: Vec<Line<'a>>,
}

fn timestamp(record: &Record, field: &str, format: &str) -> Result<f64> {
    match record.get(field) {
        None => Err(Error::UnknownField { field: field.to_string() }),
        Some(Value::Number(millis)) => Ok(*millis),
        Some(Value::Text(text)) => parse_date(text, format),
        Some(Value::Null) => Err(Error::NotNumeric { field: field.to_string() }),
    }
}

fn layout<'a>(frame: &Frame<'_>, ts: &'a Timeseries, data: &Dataset) -> Result<Layout<'a>> {
    let x_field = ts.variable_x.as_deref().ok_or(Error::MissingOption { option: "variable_x" })?;
    if ts.variables_y.is_empty() {
        return Err(Error::MissingOption { option: "variables_y" });
    }
    let records = data.as_records()?;

    let dates =
        records.iter().map(|r| timestamp(r, x_field, &ts.time_format)).collect::<Result<Vec<_>>>()?;
    let x_ticks = ts
        .x_ticks
        .as_ref()
        .map(|ticks| ticks.iter().map(|t| parse_date(t, &ts.time_format)).collect::<Result<Vec<_>>>())
        .transpose()?;
    let x_domain = resolve_domain(x_ticks.as_deref(), None, dates.iter().copied())?;

    let mut lines = Vec::with_capacity(ts.variables_y.len());
    for (index, field) in ts.variables_y.iter().enumerate() {
        let mut points = Vec::with_capacity(records.len());
        for (record, &date) in records.iter().zip(&dates) {
            if date >= x_domain.0 && date <= x_domain.1 {
                points.push((date, record.number(field)?));
            }
        }
        lines.push(Line { field, index, points });
    }

    let y_domain = resolve_domain(
        ts.y_ticks.as_deref(),
        ts.y_min_max,
        lines.iter().flat_map(|l| l.points.iter().map(|p| p.1)),
    )?;
    let x = LinearScale::new(x_domain, (0.0, frame.width()))?.rounded().clamped();
    let y = LinearScale::new(y_domain, (frame.height(), 0.0))?.nice(DEFAULT_TICKS).rounded().clamped();
    tracing::trace!(x = ?x.domain(), y = ?y.domain(), lines = lines.len(), "timeseries scales");

    Ok(Layout { x, y, x_ticks, lines })
}

fn compose(frame: &Frame<'_>, ts: &Timeseries, data: &Dataset) -> Result<Scene> {
    let Layout { x, y, x_ticks, lines } = layout(frame, ts, data)?;
    let palette = OrdinalScale::new(ts.variables_y.iter().cloned(), &ts.y_colors);

    let mut scene = frame.scene();
    scene.transition = None;

    for line in &lines {
        let points = line
            .points
            .iter()
            .map(|&(xv, yv)| Point::new(x.scale(xv) as f32, y.scale(yv) as f32))
            .collect();
        scene.marks.push(Mark::new(
            line.field,
            Shape::path(points, palette.color_at(line.index), ts.line_width),
        ));
    }

    scene.axes.push(frame.bottom_axis(linear_ticks(
        &x,
        DEFAULT_TICKS,
        x_ticks.as_deref(),
        Some(&TickFormat::date(ts.x_ticks_format.clone())),
    )));
    let y_format = ts.y_ticks_format.clone().unwrap_or_else(|| TickFormat::new(format_number));
    scene.axes.push(frame.left_axis(linear_ticks(
        &y,
        ts.y_ticks_n.unwrap_or(DEFAULT_TICKS),
        ts.y_ticks.as_deref(),
        Some(&y_format),
    )));

    let labels = ts.variables_y_labels.as_deref().unwrap_or(&ts.variables_y);
    let entries = ts
        .variables_y
        .iter()
        .enumerate()
        .rev()
        .map(|(i, field)| LegendEntry {
            label: labels.get(i).unwrap_or(field).clone(),
            color: palette.color_at(i),
        })
        .collect();
    let dims = frame.dimensions;
    scene.legend = Some(legend(
        frame,
        Point::new(dims.left + dims.plot_width(), dims.top + dims.plot_height() / 2.0),
        entries,
    ));

    match ts.y_track.as_deref() {
        Some(track) if ts.variables_y.iter().any(|v| v == track) => {
            scene.tracking = Some(Rect::new(
                0.0,
                0.0,
                dims.plot_width(),
                dims.plot_height(),
            ));
        }
        Some(track) => debug!(y_track = track, "tracked series is not drawn, tracking disabled"),
        None => {}
    }

    Ok(scene)
}

/// Index of the last point at or before `value` in ascending `sorted`,
/// clamped to the valid range.
pub(crate) fn nearest_left(sorted: &[f64], value: f64) -> Option<usize> {
    let last = sorted.len().checked_sub(1)?;
    Some(bisect_right(sorted, value).saturating_sub(1).min(last))
}

fn readout(
    frame: &Frame<'_>,
    ts: &Timeseries,
    data: &Dataset,
    pointer_x: f32,
) -> Result<Option<TrackReadout>> {
    let Some(track) = ts.y_track.as_deref() else {
        return Ok(None);
    };
    let layout = layout(frame, ts, data)?;
    let Some(line) = layout.lines.iter().find(|l| l.field == track) else {
        return Ok(None);
    };

    let mut points = line.points.clone();
    points.sort_by(|a, b| a.0.total_cmp(&b.0));
    let dates: Vec<f64> = points.iter().map(|p| p.0).collect();
    let target = layout.x.invert(f64::from(pointer_x));
    let Some(index) = nearest_left(&dates, target) else {
        return Ok(None);
    };

    let (date, value) = points[index];
    let dot = Shape::circle(
        layout.x.scale(date) as f32,
        layout.y.scale(value) as f32,
        frame.style.tracker_radius,
        frame.style.tracker_fill,
    )
    .stroked(Rgba::BLACK, 2.0);
    Ok(Some(TrackReadout {
        index,
        dot,
        lines: vec![format_number(value), format_date(date, &ts.time_format)],
    }))
}
