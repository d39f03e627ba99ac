//! Bar charts: one bar per category, grouped bars per record, or the bars
//! of a single selected record.

use crate::chart::{Chart, ChartKind, Frame};
use crate::color::{Rgba, SCHEME_PAIRED};
use crate::data::{Dataset, Record};
use crate::error::{Error, Result};
use crate::format::{format_number, TickFormat};
use crate::geometry::Point;
use crate::render::{LegendEntry, Mark, Scene, Shape, SvgSurface, Surface, TextAnchor};
use crate::scale::{BandScale, LinearScale, OrdinalScale, Scale};

use super::{band_ticks, legend, linear_ticks, rising_from_baseline, value_label};

const BAR_PADDING: f64 = 0.05;
const GROUP_PADDING: f64 = 0.1;
const VALUE_TICKS: usize = 10;

/// Bar chart options.
#[derive(Debug, Clone)]
pub struct Bar {
    bar_fill: Rgba,
    axis_flip: bool,
    rotate_x_tic: bool,
    label_bars: bool,
    group_var: Option<String>,
    group_fills: Vec<Rgba>,
    select_var: Option<String>,
    selected: Option<String>,
    ticks_format: Option<TickFormat>,
}

impl Default for Bar {
    fn default() -> Self {
        Self {
            bar_fill: Rgba::BLUE,
            axis_flip: false,
            rotate_x_tic: false,
            label_bars: false,
            group_var: None,
            group_fills: SCHEME_PAIRED.to_vec(),
            select_var: None,
            selected: None,
            ticks_format: None,
        }
    }
}

impl ChartKind for Bar {
    const NAME: &'static str = "bar";
}

/// A bar chart.
pub type BarChart<S = SvgSurface> = Chart<Bar, S>;

impl<S: Surface> Chart<Bar, S> {
    /// Fill of single-series bars.
    pub fn set_bar_fill(&mut self, fill: Rgba) -> &mut Self {
        self.configure(|o| o.bar_fill = fill)
    }

    /// Put categories on the y axis and values on the x axis.
    pub fn set_axis_flip(&mut self, flip: bool) -> &mut Self {
        self.configure(|o| o.axis_flip = flip)
    }

    /// Rotate x tick labels by -45 degrees.
    pub fn set_rotate_x_tic(&mut self, rotate: bool) -> &mut Self {
        self.configure(|o| o.rotate_x_tic = rotate)
    }

    /// Print each bar's value next to it.
    pub fn set_label_bars(&mut self, label: bool) -> &mut Self {
        self.configure(|o| o.label_bars = label)
    }

    /// Record field whose values form the groups of a grouped chart.
    pub fn set_group_var(&mut self, field: impl Into<String>) -> &mut Self {
        let field = field.into();
        self.configure(|o| o.group_var = Some(field))
    }

    /// Palette for the series of a grouped chart.
    pub fn set_group_fills(&mut self, fills: Vec<Rgba>) -> &mut Self {
        self.configure(|o| o.group_fills = fills)
    }

    /// Record field identifying the record [`Self::draw_selected_record`] draws.
    pub fn set_select_var(&mut self, field: impl Into<String>) -> &mut Self {
        let field = field.into();
        self.configure(|o| o.select_var = Some(field))
    }

    /// Value of the select field identifying the record to draw.
    pub fn set_selected(&mut self, value: impl Into<String>) -> &mut Self {
        let value = value.into();
        self.configure(|o| o.selected = Some(value))
    }

    /// Label format of the value axis (SI prefixes by default).
    pub fn set_ticks_format(&mut self, format: TickFormat) -> &mut Self {
        self.configure(|o| o.ticks_format = Some(format))
    }

    /// Draw a keyed dataset, one bar per category.
    ///
    /// # Errors
    ///
    /// Fails when the dataset is unbound, not keyed, or empty.
    pub fn draw_object(&mut self) -> Result<&mut Self> {
        self.draw_with("draw_object", compose_object)
    }

    /// Draw records as groups of bars, one group per `group_var` value.
    ///
    /// # Errors
    ///
    /// Fails when `group_var` is unset or missing from a record, or a series
    /// value is not numeric.
    pub fn draw_grouped(&mut self) -> Result<&mut Self> {
        self.draw_with("draw_grouped", compose_grouped)
    }

    /// Draw the numeric fields of the record picked by `select_var` and
    /// `selected` (the first record when nothing is selected).
    ///
    /// # Errors
    ///
    /// Fails when `select_var` is unset or missing from the records, or
    /// `selected` matches no record.
    pub fn draw_selected_record(&mut self) -> Result<&mut Self> {
        self.draw_with("draw_selected_record", compose_selected)
    }
}

fn compose_object(frame: &Frame<'_>, bar: &Bar, data: &Dataset) -> Result<Scene> {
    compose_keyed(frame, bar, data.as_keyed()?)
}

fn compose_selected(frame: &Frame<'_>, bar: &Bar, data: &Dataset) -> Result<Scene> {
    let records = data.as_records()?;
    let field = bar.select_var.as_deref().ok_or(Error::MissingOption { option: "select_var" })?;
    if records.iter().any(|r| !r.contains(field)) {
        return Err(Error::UnknownField { field: field.to_string() });
    }

    let record = match bar.selected.as_deref() {
        None => records.first().ok_or(Error::EmptyData)?,
        Some(wanted) => find_selected(records, field, wanted)?,
    };
    let entries: Vec<(String, f64)> = record
        .field_names()
        .filter(|name| *name != field)
        .filter_map(|name| record.get(name)?.as_f64().map(|v| (name.to_string(), v)))
        .collect();
    compose_keyed(frame, bar, &entries)
}

fn find_selected<'a>(records: &'a [Record], field: &str, wanted: &str) -> Result<&'a Record> {
    let label = |r: &Record| r.get(field).map(ToString::to_string).unwrap_or_default();
    records.iter().find(|r| label(r) == wanted).ok_or_else(|| Error::InvalidOption {
        option: "selected",
        value: wanted.to_string(),
        expected: records.iter().map(label).collect::<Vec<_>>().join(","),
    })
}

fn compose_keyed(frame: &Frame<'_>, bar: &Bar, entries: &[(String, f64)]) -> Result<Scene> {
    let max = entries.iter().map(|(_, v)| *v).reduce(f64::max).ok_or(Error::EmptyData)?;
    let (w, h) = (frame.width(), frame.height());
    let keys = entries.iter().map(|(k, _)| k.as_str());
    let format = bar.ticks_format.clone().unwrap_or_else(TickFormat::si);
    let mut scene = frame.scene();

    if bar.axis_flip {
        let x = LinearScale::new((0.0, max), (0.0, w))?.rounded().nice(VALUE_TICKS).clamped();
        let y = BandScale::new(keys, (0.0, h)).rounded().padding(BAR_PADDING);
        let bw = y.bandwidth();
        tracing::trace!(domain = ?x.domain(), "bar value scale");

        for (key, value) in entries {
            let Some(top) = y.position(key) else { continue };
            let length = x.scale(*value);
            scene.marks.push(
                Mark::new(
                    key.clone(),
                    Shape::rect(0.0, top as f32, length as f32, bw as f32, bar.bar_fill),
                )
                .entering_from(Shape::rect(0.0, top as f32, 0.0, bw as f32, frame.style.enter_fill)),
            );
            if bar.label_bars {
                scene.labels.push(value_label(
                    frame,
                    length + 10.0,
                    top + bw / 2.0,
                    format_number(*value),
                    TextAnchor::Start,
                ));
            }
        }

        let mut x_axis = frame.bottom_axis(linear_ticks(&x, VALUE_TICKS, None, Some(&format)));
        if bar.rotate_x_tic {
            x_axis.label_rotation = Some(-45.0);
        }
        scene.axes.push(x_axis);
        scene.axes.push(frame.left_axis(band_ticks(&y)));
    } else {
        let x = BandScale::new(keys, (0.0, w)).rounded().padding(BAR_PADDING);
        let y = LinearScale::new((0.0, max), (h, 0.0))?.rounded().nice(VALUE_TICKS).clamped();
        let bw = x.bandwidth();
        tracing::trace!(domain = ?y.domain(), "bar value scale");

        for (key, value) in entries {
            let Some(left) = x.position(key) else { continue };
            let top = y.scale(*value);
            scene.marks.push(
                Mark::new(
                    key.clone(),
                    Shape::rect(left as f32, top as f32, bw as f32, (h - top) as f32, bar.bar_fill),
                )
                .entering_from(rising_from_baseline(frame, left, bw)),
            );
            if bar.label_bars {
                scene.labels.push(value_label(
                    frame,
                    left,
                    top - 5.0,
                    format_number(*value),
                    TextAnchor::Start,
                ));
            }
        }

        let mut x_axis = frame.bottom_axis(band_ticks(&x));
        if bar.rotate_x_tic {
            x_axis.label_rotation = Some(-45.0);
        }
        scene.axes.push(x_axis);
        scene.axes.push(frame.left_axis(linear_ticks(&y, VALUE_TICKS, None, Some(&format))));
    }

    Ok(scene)
}

fn compose_grouped(frame: &Frame<'_>, bar: &Bar, data: &Dataset) -> Result<Scene> {
    let records = data.as_records()?;
    let group_var = bar.group_var.as_deref().ok_or(Error::MissingOption { option: "group_var" })?;
    let first = records.first().ok_or(Error::EmptyData)?;
    if records.iter().any(|r| !r.contains(group_var)) {
        return Err(Error::UnknownField { field: group_var.to_string() });
    }

    let series: Vec<String> =
        first.field_names().filter(|name| *name != group_var).map(str::to_string).collect();
    let groups: Vec<String> = records
        .iter()
        .map(|r| r.get(group_var).map(ToString::to_string).unwrap_or_default())
        .collect();

    let mut rows = Vec::with_capacity(records.len());
    for record in records {
        let values = series.iter().map(|key| record.number(key)).collect::<Result<Vec<f64>>>()?;
        rows.push(values);
    }
    let max = rows.iter().flatten().copied().reduce(f64::max).unwrap_or(0.0);

    let (w, h) = (frame.width(), frame.height());
    let x0 = BandScale::new(groups.iter().cloned(), (0.0, w)).rounded().padding_inner(GROUP_PADDING);
    let x1 =
        BandScale::new(series.iter().cloned(), (0.0, x0.bandwidth())).rounded().padding(BAR_PADDING);
    let y = LinearScale::new((0.0, max), (h, 0.0))?.rounded().nice(VALUE_TICKS).clamped();
    let color = OrdinalScale::new(series.iter().cloned(), &bar.group_fills);
    let bw = x1.bandwidth();
    tracing::trace!(groups = x0.domain().len(), series = x1.domain().len(), "grouped bar scales");

    let mut scene = frame.scene();
    for (group, values) in groups.iter().zip(&rows) {
        let Some(group_left) = x0.position(group) else { continue };
        for (i, (key, value)) in series.iter().zip(values).enumerate() {
            let Some(offset) = x1.position(key) else { continue };
            let left = group_left + offset;
            let top = y.scale(*value);
            scene.marks.push(
                Mark::new(
                    format!("{group}/{key}"),
                    Shape::rect(left as f32, top as f32, bw as f32, (h - top) as f32, color.color_at(i)),
                )
                .entering_from(rising_from_baseline(frame, left, bw)),
            );
            if bar.label_bars {
                scene.labels.push(value_label(
                    frame,
                    left + bw / 2.0,
                    top - 5.0,
                    format_number(*value),
                    TextAnchor::Middle,
                ));
            }
        }
    }

    let mut x_axis = frame.bottom_axis(band_ticks(&x0));
    if bar.rotate_x_tic {
        x_axis.label_rotation = Some(-45.0);
    }
    scene.axes.push(x_axis);
    let format = bar.ticks_format.clone().unwrap_or_else(TickFormat::si);
    scene.axes.push(frame.left_axis(linear_ticks(&y, VALUE_TICKS, None, Some(&format))));

    let dims = frame.dimensions;
    let entries = series
        .iter()
        .enumerate()
        .rev()
        .map(|(i, key)| LegendEntry { label: key.clone(), color: color.color_at(i) })
        .collect();
    scene.legend = Some(legend(
        frame,
        Point::new(dims.left + dims.plot_width() + 5.0, dims.top + dims.plot_height() / 3.0),
        entries,
    ));

    Ok(scene)
}
