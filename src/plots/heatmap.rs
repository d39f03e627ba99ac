//! Heatmap: a grid of cells, one per sorted value, colored by a numeric
//! color scale.

use crate::chart::{Chart, ChartKind, Frame};
use crate::color::Rgba;
use crate::data::Dataset;
use crate::error::{Error, Result};
use crate::format::format_number;
use crate::render::{Mark, Scene, Shape, SvgSurface, Surface, TextMark};
use crate::scale::{ColorScaleKind, Scale};

/// Cell pitch in pixels.
const BOX: f32 = 30.0;
/// Cells per row.
const PER_ROW: usize = 20;

/// Heatmap options.
#[derive(Debug, Clone, PartialEq)]
pub struct Heatmap {
    variable: Option<String>,
    scale: Option<String>,
    thresholds: Option<Vec<f64>>,
    colors: Vec<Rgba>,
}

impl Default for Heatmap {
    fn default() -> Self {
        Self {
            variable: None,
            scale: None,
            thresholds: None,
            colors: vec![Rgba::WHITE, Rgba::PINK, Rgba::RED],
        }
    }
}

impl ChartKind for Heatmap {
    const NAME: &'static str = "heatmap";
}

/// A heatmap chart.
pub type HeatmapChart<S = SvgSurface> = Chart<Heatmap, S>;

impl<S: Surface> Chart<Heatmap, S> {
    /// Series to plot when the dataset holds named columns or records.
    pub fn set_variable(&mut self, variable: impl Into<String>) -> &mut Self {
        let variable = variable.into();
        self.configure(|o| o.variable = Some(variable))
    }

    /// Color scale name: `linear`, `quantize`, `quantile` or `threshold`.
    /// Checked at draw.
    pub fn set_scale(&mut self, scale: impl Into<String>) -> &mut Self {
        let scale = scale.into();
        self.configure(|o| o.scale = Some(scale))
    }

    /// Boundaries for the `threshold` scale.
    pub fn set_thresholds(&mut self, thresholds: Vec<f64>) -> &mut Self {
        self.configure(|o| o.thresholds = Some(thresholds))
    }

    /// Scale colors. The `linear` scale blends the first two between the
    /// minimum and maximum value.
    pub fn set_colors(&mut self, colors: Vec<Rgba>) -> &mut Self {
        self.configure(|o| o.colors = colors)
    }

    /// Draw the heatmap.
    ///
    /// # Errors
    ///
    /// Fails when the series cannot be resolved, `scale` is unset or
    /// unknown, or the threshold scale has no thresholds.
    pub fn draw_heatmap(&mut self) -> Result<&mut Self> {
        self.draw_with("draw_heatmap", compose)
    }
}

fn compose(frame: &Frame<'_>, heat: &Heatmap, data: &Dataset) -> Result<Scene> {
    let mut values = data.numeric_series(heat.variable.as_deref())?;
    let kind: ColorScaleKind =
        heat.scale.as_deref().ok_or(Error::MissingOption { option: "scale" })?.parse()?;
    values.sort_by(f64::total_cmp);
    let color = kind.build(&values, &heat.colors, heat.thresholds.as_deref())?;

    let mut scene = frame.scene();
    scene.title = None;
    scene.transition = None;

    let mut y_loc = 10.0;
    if let Some(title) = &frame.titles.main {
        y_loc += 30.0;
        scene.labels.push(TextMark::new(
            0.0,
            y_loc,
            title.clone(),
            frame.style.text(frame.style.title_size).bold(),
        ));
    }

    for (i, &value) in values.iter().enumerate() {
        let x = 2.0 + BOX * (i % PER_ROW) as f32;
        let y = 30.0 + BOX * (i / PER_ROW) as f32 + y_loc;
        scene.marks.push(
            Mark::new(
                format!("cell{}", i + 1),
                Shape::rect(x, y, BOX - 3.0, BOX - 3.0, color.scale(value))
                    .stroked(Rgba::BLACK, 1.0),
            )
            .tooltip(vec![format!("Index: {}", i + 1), format!("Value: {}", format_number(value))]),
        );
    }
    tracing::trace!(scale = %kind, cells = values.len(), "heatmap cells");

    Ok(scene)
}
