//! Generic chart builder core.
//!
//! A [`Chart`] owns its configuration, its dataset and the surface it paints
//! on. Every `draw_*` operation runs the same pipeline:
//!
//! 1. validate and compose a [`Scene`] from the current options and data,
//! 2. on failure, return the error and leave the surface untouched,
//! 3. otherwise clear the surface and paint the new scene.
//!
//! Scales and bins are derived inside step 1 on every draw and never kept,
//! so repeated draws with the same configuration paint identical scenes.
//!
//! Per-kind options live in the `K` parameter ([`ChartKind`]); the kind
//! modules under [`crate::plots`] add their setters and draw operations as
//! inherent impls on `Chart<TheirKind, S>`.

use std::fmt;

use batuta_common::display::WithDimensions;
use tracing::{debug, warn};

use crate::config::ChartStyle;
use crate::data::Dataset;
use crate::error::{Error, Result};
use crate::geometry::{Dimensions, Point};
use crate::render::{
    AxisOrient, AxisSpec, Scene, SvgSurface, Surface, TextAnchor, TextMark, Tick,
};

/// Per-kind chart options.
pub trait ChartKind: fmt::Debug + Default {
    /// Kind name used in log output.
    const NAME: &'static str;
}

/// Lifecycle state of a chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartState {
    /// No surface or dataset bound yet.
    Uninitialized,
    /// Bound, never drawn.
    Ready,
    /// Drawn at least once.
    Drawn,
}

/// Main and axis titles.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Titles {
    /// Main title.
    pub main: Option<String>,
    /// X axis title.
    pub x: Option<String>,
    /// Y axis title.
    pub y: Option<String>,
}

/// A chart builder bound to a surface `S`.
#[derive(Debug)]
pub struct Chart<K, S = SvgSurface> {
    dimensions: Dimensions,
    titles: Titles,
    style: ChartStyle,
    kind: K,
    dataset: Option<Dataset>,
    surface: Option<S>,
    state: ChartState,
}

impl<K: ChartKind, S: Surface> Default for Chart<K, S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: ChartKind, S: Surface> Chart<K, S> {
    /// Create an unbound chart with default options.
    #[must_use]
    pub fn new() -> Self {
        Self {
            dimensions: Dimensions::default(),
            titles: Titles::default(),
            style: ChartStyle::default(),
            kind: K::default(),
            dataset: None,
            surface: None,
            state: ChartState::Uninitialized,
        }
    }

    /// Bind the chart to a surface and a dataset.
    ///
    /// The surface is sized to the current dimensions and cleared. Binding
    /// again replaces both.
    pub fn init(&mut self, mut surface: S, dataset: impl Into<Dataset>) -> &mut Self {
        let dataset = dataset.into();
        surface.resize(self.dimensions.width, self.dimensions.height);
        surface.clear();
        debug!(kind = K::NAME, entries = dataset.len(), "chart bound");

        self.surface = Some(surface);
        self.dataset = Some(dataset);
        self.state = ChartState::Ready;
        self
    }

    /// Replace the dataset without touching the surface.
    pub fn set_data(&mut self, dataset: impl Into<Dataset>) -> &mut Self {
        self.dataset = Some(dataset.into());
        self
    }

    /// Replace size and margins. A bound surface is resized immediately.
    pub fn set_dimensions(&mut self, dimensions: Dimensions) -> &mut Self {
        self.resize_to(dimensions);
        self
    }

    /// Set main and axis titles at once.
    pub fn set_titles(
        &mut self,
        main: impl Into<String>,
        x: impl Into<String>,
        y: impl Into<String>,
    ) -> &mut Self {
        self.titles = Titles { main: Some(main.into()), x: Some(x.into()), y: Some(y.into()) };
        self
    }

    /// Set the main title.
    pub fn set_title(&mut self, title: impl Into<String>) -> &mut Self {
        self.titles.main = Some(title.into());
        self
    }

    /// Set the x axis title.
    pub fn set_x_title(&mut self, title: impl Into<String>) -> &mut Self {
        self.titles.x = Some(title.into());
        self
    }

    /// Set the y axis title.
    pub fn set_y_title(&mut self, title: impl Into<String>) -> &mut Self {
        self.titles.y = Some(title.into());
        self
    }

    /// Replace fonts, colors and transition timing.
    pub fn set_style(&mut self, style: ChartStyle) -> &mut Self {
        self.style = style;
        self
    }

    /// Lifecycle state.
    #[must_use]
    pub fn state(&self) -> ChartState {
        self.state
    }

    /// Current dimensions.
    #[must_use]
    pub fn dimensions(&self) -> &Dimensions {
        &self.dimensions
    }

    /// Current titles.
    #[must_use]
    pub fn titles(&self) -> &Titles {
        &self.titles
    }

    /// Current style.
    #[must_use]
    pub fn style(&self) -> &ChartStyle {
        &self.style
    }

    /// Kind-specific options.
    #[must_use]
    pub fn options(&self) -> &K {
        &self.kind
    }

    /// Bound dataset.
    #[must_use]
    pub fn dataset(&self) -> Option<&Dataset> {
        self.dataset.as_ref()
    }

    /// Bound surface.
    #[must_use]
    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    /// Bound surface, mutably.
    pub fn surface_mut(&mut self) -> Option<&mut S> {
        self.surface.as_mut()
    }

    fn resize_to(&mut self, dimensions: Dimensions) {
        self.dimensions = dimensions;
        if let Some(surface) = self.surface.as_mut() {
            surface.resize(dimensions.width, dimensions.height);
            debug!(kind = K::NAME, width = dimensions.width, height = dimensions.height, "chart resized");
        }
    }

    /// Mutate kind options.
    pub(crate) fn configure(&mut self, f: impl FnOnce(&mut K)) -> &mut Self {
        f(&mut self.kind);
        self
    }

    /// Run `f` against the bound dataset and current options.
    pub(crate) fn evaluate<T>(
        &self,
        f: impl FnOnce(&Frame<'_>, &K, &Dataset) -> Result<T>,
    ) -> Result<T> {
        let (Some(dataset), Some(_)) = (self.dataset.as_ref(), self.surface.as_ref()) else {
            return Err(Error::MissingDataset);
        };
        if !self.dimensions.is_valid() {
            return Err(Error::InvalidDimensions {
                width: self.dimensions.plot_width(),
                height: self.dimensions.plot_height(),
            });
        }
        let frame = Frame { dimensions: self.dimensions, titles: &self.titles, style: &self.style };
        f(&frame, &self.kind, dataset)
    }

    /// Compose a scene and, only if that succeeds, clear and repaint.
    pub(crate) fn draw_with(
        &mut self,
        operation: &'static str,
        compose: impl FnOnce(&Frame<'_>, &K, &Dataset) -> Result<Scene>,
    ) -> Result<&mut Self> {
        let scene = match self.evaluate(compose) {
            Ok(scene) => scene,
            Err(err) => {
                warn!(kind = K::NAME, operation, error = %err, "draw rejected");
                return Err(err);
            }
        };

        if let Some(surface) = self.surface.as_mut() {
            surface.clear();
            if scene.width != self.dimensions.width || scene.height != self.dimensions.height {
                surface.resize(scene.width, scene.height);
            }
            surface.paint(&scene);
        }
        self.state = ChartState::Drawn;
        debug!(kind = K::NAME, operation, marks = scene.marks.len(), "chart drawn");
        Ok(self)
    }
}

impl<K: ChartKind, S: Surface> WithDimensions for Chart<K, S> {
    fn set_dimensions(&mut self, width: u32, height: u32) {
        let dimensions =
            Dimensions { width: width as f32, height: height as f32, ..self.dimensions };
        self.resize_to(dimensions);
    }
}

/// Read-only view of the shared options handed to scene composition.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Frame<'a> {
    pub(crate) dimensions: Dimensions,
    pub(crate) titles: &'a Titles,
    pub(crate) style: &'a ChartStyle,
}

impl Frame<'_> {
    /// Plotting area width.
    pub(crate) fn width(&self) -> f64 {
        f64::from(self.dimensions.plot_width())
    }

    /// Plotting area height.
    pub(crate) fn height(&self) -> f64 {
        f64::from(self.dimensions.plot_height())
    }

    /// Empty scene sized to the surface, with the main title and an
    /// enter/update transition.
    pub(crate) fn scene(&self) -> Scene {
        let mut scene = Scene::new(
            self.dimensions.width,
            self.dimensions.height,
            self.dimensions.plot_origin(),
        );
        scene.title = self.titles.main.as_ref().map(|title| {
            TextMark::new(
                self.dimensions.plot_width() / 3.0,
                25.0,
                title.clone(),
                self.style.text(self.style.title_size).bold(),
            )
        });
        scene.transition = Some(self.style.transition());
        scene
    }

    fn x_title(&self) -> Option<TextMark> {
        self.titles.x.as_ref().map(|title| {
            TextMark::new(
                self.dimensions.plot_width() / 2.0,
                self.dimensions.plot_height() + self.dimensions.bottom - 10.0,
                title.clone(),
                self.style.text(self.style.axis_title_size).anchor(TextAnchor::Middle),
            )
        })
    }

    fn y_title(&self) -> Option<TextMark> {
        self.titles.y.as_ref().map(|title| {
            TextMark::new(
                -self.dimensions.left + 10.0,
                self.dimensions.plot_height() / 2.0,
                title.clone(),
                self.style
                    .text(self.style.axis_title_size)
                    .anchor(TextAnchor::Middle)
                    .rotate(-90.0),
            )
        })
    }

    /// X axis along the bottom of the plotting area.
    pub(crate) fn bottom_axis(&self, ticks: Vec<Tick>) -> AxisSpec {
        AxisSpec {
            orient: AxisOrient::Bottom,
            origin: Point::new(0.0, self.dimensions.plot_height()),
            span: (0.0, self.dimensions.plot_width()),
            ticks,
            label_rotation: None,
            title: self.x_title(),
        }
    }

    /// Y axis along the left edge of the plotting area.
    pub(crate) fn left_axis(&self, ticks: Vec<Tick>) -> AxisSpec {
        AxisSpec {
            orient: AxisOrient::Left,
            origin: Point::ORIGIN,
            span: (self.dimensions.plot_height(), 0.0),
            ticks,
            label_rotation: None,
            title: self.y_title(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgba;
    use crate::render::{Mark, Shape, TrackReadout};

    #[derive(Debug, Default)]
    struct Blank {
        fail: bool,
    }

    impl ChartKind for Blank {
        const NAME: &'static str = "blank";
    }

    fn compose(frame: &Frame<'_>, kind: &Blank, data: &Dataset) -> Result<Scene> {
        if kind.fail {
            return Err(Error::MissingOption { option: "fail" });
        }
        let mut scene = frame.scene();
        for (i, (key, value)) in data.as_keyed()?.iter().enumerate() {
            scene.marks.push(Mark::new(
                key.clone(),
                Shape::rect(i as f32 * 10.0, 0.0, 5.0, *value as f32, Rgba::BLUE),
            ));
        }
        Ok(scene)
    }

    #[derive(Debug, Default)]
    struct Recorder {
        calls: Vec<String>,
    }

    impl Surface for Recorder {
        fn resize(&mut self, width: f32, height: f32) {
            self.calls.push(format!("resize {width}x{height}"));
        }
        fn clear(&mut self) {
            self.calls.push("clear".to_string());
        }
        fn paint(&mut self, scene: &Scene) {
            self.calls.push(format!("paint {}", scene.marks.len()));
        }
        fn show_tracker(&mut self, _readout: &TrackReadout) {}
    }

    fn bound() -> Chart<Blank, Recorder> {
        let mut chart = Chart::new();
        chart.init(Recorder::default(), Dataset::keyed([("a", 1.0), ("b", 2.0)]));
        chart
    }

    #[test]
    fn test_state_machine() {
        let mut chart: Chart<Blank, Recorder> = Chart::new();
        assert_eq!(chart.state(), ChartState::Uninitialized);
        chart.init(Recorder::default(), Dataset::keyed([("a", 1.0)]));
        assert_eq!(chart.state(), ChartState::Ready);
        chart.draw_with("draw", compose).expect("operation should succeed");
        assert_eq!(chart.state(), ChartState::Drawn);
        chart.draw_with("draw", compose).expect("operation should succeed");
        assert_eq!(chart.state(), ChartState::Drawn);
    }

    #[test]
    fn test_draw_before_init_fails() {
        let mut chart: Chart<Blank, Recorder> = Chart::new();
        let err = chart.draw_with("draw", compose).unwrap_err();
        assert!(matches!(err, Error::MissingDataset));
        assert!(err.to_string().contains("dataset not specified"));
    }

    #[test]
    fn test_set_data_without_surface_still_uninitialized() {
        let mut chart: Chart<Blank, Recorder> = Chart::new();
        chart.set_data(Dataset::keyed([("a", 1.0)]));
        assert!(matches!(chart.draw_with("draw", compose), Err(Error::MissingDataset)));
    }

    #[test]
    fn test_init_sizes_and_clears() {
        let chart = bound();
        let calls = &chart.surface().unwrap().calls;
        assert_eq!(calls, &vec!["resize 900x700".to_string(), "clear".to_string()]);
    }

    #[test]
    fn test_set_dimensions_resizes_immediately() {
        let mut chart = bound();
        chart.set_dimensions(Dimensions::new(400.0, 300.0));
        assert_eq!(chart.surface().unwrap().calls.last().unwrap(), "resize 400x300");
        assert_eq!(chart.state(), ChartState::Ready);
    }

    #[test]
    fn test_failed_draw_leaves_surface_alone() {
        let mut chart = bound();
        chart.draw_with("draw", compose).unwrap();
        let before = chart.surface().unwrap().calls.len();

        chart.configure(|k| k.fail = true);
        assert!(chart.draw_with("draw", compose).is_err());
        assert_eq!(chart.surface().unwrap().calls.len(), before);
        assert_eq!(chart.state(), ChartState::Drawn);
    }

    #[test]
    fn test_draw_clears_then_paints() {
        let mut chart = bound();
        chart.draw_with("draw", compose).unwrap();
        let calls = &chart.surface().unwrap().calls;
        assert_eq!(&calls[2..], &["clear".to_string(), "paint 2".to_string()]);
    }

    #[test]
    fn test_invalid_dimensions_rejected() {
        let mut chart = bound();
        chart.set_dimensions(Dimensions::new(50.0, 50.0));
        let err = chart.draw_with("draw", compose).unwrap_err();
        assert!(matches!(err, Error::InvalidDimensions { .. }));
    }

    #[test]
    fn test_titles() {
        let mut chart = bound();
        chart.set_titles("Main", "X", "Y").set_y_title("Count");
        assert_eq!(chart.titles().main.as_deref(), Some("Main"));
        assert_eq!(chart.titles().y.as_deref(), Some("Count"));
    }

    #[test]
    fn test_frame_title_positions() {
        let mut chart = bound();
        chart.set_titles("Main", "X", "Y");
        let (scene, bottom, left) = chart
            .evaluate(|frame, _, _| {
                Ok((frame.scene(), frame.bottom_axis(vec![]), frame.left_axis(vec![])))
            })
            .unwrap();

        let title = scene.title.unwrap();
        assert_eq!((title.x, title.y), (270.0, 25.0));
        assert!(title.style.bold);

        let x_title = bottom.title.unwrap();
        assert_eq!((x_title.x, x_title.y), (405.0, 640.0));
        assert_eq!(bottom.origin, Point::new(0.0, 600.0));

        let y_title = left.title.unwrap();
        assert_eq!((y_title.x, y_title.y), (-50.0, 300.0));
        assert_eq!(y_title.style.rotate, -90.0);
    }

    #[test]
    fn test_with_dimensions_keeps_margins() {
        let mut chart = bound();
        chart.set_dimensions(Dimensions::new(900.0, 700.0).margins(10.0, 20.0, 30.0, 40.0));
        WithDimensions::set_dimensions(&mut chart, 640, 480);
        assert_eq!(chart.dimensions().width, 640.0);
        assert_eq!(chart.dimensions().left, 30.0);
        assert_eq!(chart.surface().unwrap().calls.last().unwrap(), "resize 640x480");
    }

    #[test]
    fn test_svg_surface_default() {
        let mut chart: Chart<Blank> = Chart::new();
        chart.init(SvgSurface::new(), Dataset::keyed([("a", 1.0)]));
        chart.draw_with("draw", compose).unwrap();
        assert!(chart.surface().unwrap().scene().unwrap().mark("a").is_some());
    }
}
