//! Scatter plot: one or more x fields plotted against a shared y field.

use crate::chart::{Chart, ChartKind, Frame};
use crate::color::{Rgba, SCHEME_PAIRED};
use crate::data::Dataset;
use crate::error::{Error, Result};
use crate::format::{format_number, TickFormat};
use crate::geometry::Point;
use crate::render::{LegendEntry, Mark, Scene, Shape, SvgSurface, Surface};
use crate::scale::{LinearScale, OrdinalScale, Scale};

use super::{legend, linear_ticks, resolve_domain};

/// Tick count the y domain is rounded out to, whatever the axis shows.
const NICE_TICKS: usize = 10;

/// Options of one scatter axis.
#[derive(Debug, Clone)]
struct AxisOptions {
    ticks_n: usize,
    ticks: Option<Vec<f64>>,
    min_max: Option<(f64, f64)>,
    ticks_format: Option<TickFormat>,
}

impl Default for AxisOptions {
    fn default() -> Self {
        Self { ticks_n: 10, ticks: None, min_max: None, ticks_format: None }
    }
}

impl AxisOptions {
    fn format(&self) -> TickFormat {
        self.ticks_format.clone().unwrap_or_else(|| TickFormat::new(format_number))
    }
}

/// Scatter plot options.
#[derive(Debug, Clone)]
pub struct Scatter {
    variables_x: Vec<String>,
    variable_y: Option<String>,
    checked_x: Option<Vec<String>>,
    point_stroke: Rgba,
    point_radius: f32,
    x_colors: Vec<Rgba>,
    x_axis: AxisOptions,
    y_axis: AxisOptions,
}

impl Default for Scatter {
    fn default() -> Self {
        Self {
            variables_x: Vec::new(),
            variable_y: None,
            checked_x: None,
            point_stroke: Rgba::GRAY,
            point_radius: 4.0,
            x_colors: SCHEME_PAIRED.to_vec(),
            x_axis: AxisOptions::default(),
            y_axis: AxisOptions::default(),
        }
    }
}

impl ChartKind for Scatter {
    const NAME: &'static str = "scatter";
}

/// A scatter chart.
pub type ScatterChart<S = SvgSurface> = Chart<Scatter, S>;

impl<S: Surface> Chart<Scatter, S> {
    /// Record fields plotted on the x axis, one series each.
    pub fn set_variables_x<I, T>(&mut self, fields: I) -> &mut Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let fields = fields.into_iter().map(Into::into).collect();
        self.configure(|o| o.variables_x = fields)
    }

    /// Record field plotted on the y axis.
    pub fn set_variable_y(&mut self, field: impl Into<String>) -> &mut Self {
        let field = field.into();
        self.configure(|o| o.variable_y = Some(field))
    }

    /// Draw only these x series. Colors stay tied to the position in
    /// `variables_x`.
    pub fn set_checked_x<I, T>(&mut self, fields: I) -> &mut Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let fields = fields.into_iter().map(Into::into).collect();
        self.configure(|o| o.checked_x = Some(fields))
    }

    /// Point outline color.
    pub fn set_point_stroke(&mut self, stroke: Rgba) -> &mut Self {
        self.configure(|o| o.point_stroke = stroke)
    }

    /// Point radius.
    pub fn set_point_radius(&mut self, radius: f32) -> &mut Self {
        self.configure(|o| o.point_radius = radius)
    }

    /// Palette indexed by position in `variables_x`.
    pub fn set_x_colors(&mut self, colors: Vec<Rgba>) -> &mut Self {
        self.configure(|o| o.x_colors = colors)
    }

    /// Approximate number of x ticks.
    pub fn set_x_ticks_n(&mut self, count: usize) -> &mut Self {
        self.configure(|o| o.x_axis.ticks_n = count)
    }

    /// Explicit x tick values; their extent becomes the x domain.
    pub fn set_x_ticks(&mut self, ticks: Vec<f64>) -> &mut Self {
        self.configure(|o| o.x_axis.ticks = Some(ticks))
    }

    /// Explicit x domain, used when no x ticks are set.
    pub fn set_x_min_max(&mut self, min: f64, max: f64) -> &mut Self {
        self.configure(|o| o.x_axis.min_max = Some((min, max)))
    }

    /// X tick label format.
    pub fn set_x_ticks_format(&mut self, format: TickFormat) -> &mut Self {
        self.configure(|o| o.x_axis.ticks_format = Some(format))
    }

    /// Approximate number of y ticks.
    pub fn set_y_ticks_n(&mut self, count: usize) -> &mut Self {
        self.configure(|o| o.y_axis.ticks_n = count)
    }

    /// Explicit y tick values; their extent becomes the y domain.
    pub fn set_y_ticks(&mut self, ticks: Vec<f64>) -> &mut Self {
        self.configure(|o| o.y_axis.ticks = Some(ticks))
    }

    /// Explicit y domain, used when no y ticks are set.
    pub fn set_y_min_max(&mut self, min: f64, max: f64) -> &mut Self {
        self.configure(|o| o.y_axis.min_max = Some((min, max)))
    }

    /// Y tick label format.
    pub fn set_y_ticks_format(&mut self, format: TickFormat) -> &mut Self {
        self.configure(|o| o.y_axis.ticks_format = Some(format))
    }

    /// Draw the scatter plot.
    ///
    /// # Errors
    ///
    /// Fails when `variables_x` or `variable_y` is unset, a checked series
    /// is not among `variables_x`, or a field is missing or not numeric.
    pub fn draw_scatter(&mut self) -> Result<&mut Self> {
        self.draw_with("draw_scatter", compose)
    }
}

/// A series to draw: field name, palette index, and `(x, y)` per record.
struct Series<'a> {
    field: &'a str,
    index: usize,
    points: Vec<(f64, f64)>,
}

fn collect_series<'a>(scat: &'a Scatter, data: &Dataset, y_field: &str) -> Result<Vec<Series<'a>>> {
    let records = data.as_records()?;
    if let Some(checked) = &scat.checked_x {
        if let Some(unknown) = checked.iter().find(|c| !scat.variables_x.contains(c)) {
            return Err(Error::InvalidOption {
                option: "checked_x",
                value: unknown.clone(),
                expected: scat.variables_x.join(","),
            });
        }
    }

    let mut series = Vec::new();
    for (index, field) in scat.variables_x.iter().enumerate() {
        if scat.checked_x.as_ref().is_some_and(|checked| !checked.contains(field)) {
            continue;
        }
        let points = records
            .iter()
            .map(|r| Ok((r.number(field)?, r.number(y_field)?)))
            .collect::<Result<Vec<_>>>()?;
        series.push(Series { field, index, points });
    }
    Ok(series)
}

fn compose(frame: &Frame<'_>, scat: &Scatter, data: &Dataset) -> Result<Scene> {
    if scat.variables_x.is_empty() {
        return Err(Error::MissingOption { option: "variables_x" });
    }
    let y_field = scat.variable_y.as_deref().ok_or(Error::MissingOption { option: "variable_y" })?;
    let series = collect_series(scat, data, y_field)?;

    let points = || series.iter().flat_map(|s| s.points.iter());
    let x_domain =
        resolve_domain(scat.x_axis.ticks.as_deref(), scat.x_axis.min_max, points().map(|p| p.0))?;
    let y_domain =
        resolve_domain(scat.y_axis.ticks.as_deref(), scat.y_axis.min_max, points().map(|p| p.1))?;

    let (w, h) = (frame.width(), frame.height());
    let x = LinearScale::new(x_domain, (0.0, w))?.rounded().clamped();
    let y = LinearScale::new(y_domain, (h, 0.0))?.nice(NICE_TICKS).rounded().clamped();
    tracing::trace!(x = ?x.domain(), y = ?y.domain(), "scatter scales");

    let palette = OrdinalScale::new(scat.variables_x.iter().cloned(), &scat.x_colors);

    let mut scene = frame.scene();
    for s in &series {
        let fill = palette.color_at(s.index);
        for (i, &(xv, yv)) in s.points.iter().enumerate() {
            let cx = x.scale(xv) as f32;
            scene.marks.push(
                Mark::new(
                    format!("{}/{i}", s.field),
                    Shape::circle(cx, y.scale(yv) as f32, scat.point_radius, fill)
                        .stroked(scat.point_stroke, 1.0),
                )
                .entering_from(
                    Shape::circle(cx, h as f32, 0.0, frame.style.enter_fill)
                        .stroked(scat.point_stroke, 1.0),
                )
                .tooltip(vec![
                    format!("{}: {}", s.field, format_number(xv)),
                    format!("{y_field}: {}", format_number(yv)),
                ]),
            );
        }
    }

    scene.axes.push(frame.bottom_axis(linear_ticks(
        &x,
        scat.x_axis.ticks_n,
        scat.x_axis.ticks.as_deref(),
        Some(&scat.x_axis.format()),
    )));
    scene.axes.push(frame.left_axis(linear_ticks(
        &y,
        scat.y_axis.ticks_n,
        scat.y_axis.ticks.as_deref(),
        Some(&scat.y_axis.format()),
    )));

    let dims = frame.dimensions;
    let entries = series
        .iter()
        .rev()
        .map(|s| LegendEntry { label: s.field.to_string(), color: palette.color_at(s.index) })
        .collect();
    scene.legend = Some(legend(
        frame,
        Point::new(dims.left + dims.plot_width(), dims.top + dims.plot_height() / 2.0),
        entries,
    ));

    Ok(scene)
}
