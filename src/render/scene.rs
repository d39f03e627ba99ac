//! The draw command set a chart hands to its surface.
//!
//! Marks, labels and axes are positioned in plot coordinates (relative to
//! [`Scene::origin`]); the title and legend are positioned on the surface.

use std::collections::HashSet;
use std::time::Duration;

use crate::color::Rgba;
use crate::geometry::{Point, Rect};

/// Text anchor position for text alignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextAnchor {
    /// Align text start at position (left-aligned for LTR)
    #[default]
    Start,
    /// Center text at position
    Middle,
    /// Align text end at position (right-aligned for LTR)
    End,
}

/// Font and placement attributes of a text element.
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    /// Font family.
    pub font_family: String,
    /// Font size in pixels.
    pub font_size: f32,
    /// Bold weight.
    pub bold: bool,
    /// Horizontal alignment.
    pub anchor: TextAnchor,
    /// Rotation in degrees around the text position.
    pub rotate: f32,
    /// Text color.
    pub fill: Rgba,
}

impl TextStyle {
    /// Plain black text.
    #[must_use]
    pub fn new(font_family: impl Into<String>, font_size: f32) -> Self {
        Self {
            font_family: font_family.into(),
            font_size,
            bold: false,
            anchor: TextAnchor::Start,
            rotate: 0.0,
            fill: Rgba::BLACK,
        }
    }

    /// Bold weight.
    #[must_use]
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Set the anchor.
    #[must_use]
    pub fn anchor(mut self, anchor: TextAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    /// Rotate by `degrees`.
    #[must_use]
    pub fn rotate(mut self, degrees: f32) -> Self {
        self.rotate = degrees;
        self
    }

    /// Set the text color.
    #[must_use]
    pub fn fill(mut self, fill: Rgba) -> Self {
        self.fill = fill;
        self
    }
}

/// A positioned piece of text.
#[derive(Debug, Clone, PartialEq)]
pub struct TextMark {
    /// X position.
    pub x: f32,
    /// Y position (baseline).
    pub y: f32,
    /// Content.
    pub text: String,
    /// Appearance.
    pub style: TextStyle,
}

impl TextMark {
    /// Create a text mark.
    #[must_use]
    pub fn new(x: f32, y: f32, text: impl Into<String>, style: TextStyle) -> Self {
        Self { x, y, text: text.into(), style }
    }
}

/// Geometry and paint of a mark.
///
/// Field names match SVG attribute names.
#[derive(Debug, Clone, PartialEq)]
#[allow(missing_docs)]
pub enum Shape {
    /// Rectangle
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        fill: Rgba,
        stroke: Option<Rgba>,
        stroke_width: f32,
    },
    /// Circle
    Circle {
        cx: f32,
        cy: f32,
        r: f32,
        fill: Rgba,
        stroke: Option<Rgba>,
        stroke_width: f32,
    },
    /// Connected line segments
    Path {
        points: Vec<Point>,
        stroke: Rgba,
        stroke_width: f32,
        fill: Option<Rgba>,
    },
}

impl Shape {
    /// Unstroked rectangle.
    #[must_use]
    pub fn rect(x: f32, y: f32, width: f32, height: f32, fill: Rgba) -> Self {
        Shape::Rect { x, y, width, height, fill, stroke: None, stroke_width: 1.0 }
    }

    /// Unstroked circle.
    #[must_use]
    pub fn circle(cx: f32, cy: f32, r: f32, fill: Rgba) -> Self {
        Shape::Circle { cx, cy, r, fill, stroke: None, stroke_width: 1.0 }
    }

    /// Unfilled polyline.
    #[must_use]
    pub fn path(points: Vec<Point>, stroke: Rgba, stroke_width: f32) -> Self {
        Shape::Path { points, stroke, stroke_width, fill: None }
    }

    /// Add a stroke to a rectangle or circle; paths keep their own.
    #[must_use]
    pub fn stroked(self, color: Rgba, width: f32) -> Self {
        match self {
            Shape::Rect { x, y, width: w, height, fill, .. } => {
                Shape::Rect { x, y, width: w, height, fill, stroke: Some(color), stroke_width: width }
            }
            Shape::Circle { cx, cy, r, fill, .. } => {
                Shape::Circle { cx, cy, r, fill, stroke: Some(color), stroke_width: width }
            }
            path @ Shape::Path { .. } => path,
        }
    }

    /// Extent of the shape along the axis bars grow on: height for
    /// rectangles, radius for circles, zero for paths.
    #[must_use]
    pub fn height(&self) -> f32 {
        match self {
            Shape::Rect { height, .. } => *height,
            Shape::Circle { r, .. } => *r,
            Shape::Path { .. } => 0.0,
        }
    }

    /// Width of a rectangle, diameter of a circle, zero for paths.
    #[must_use]
    pub fn width(&self) -> f32 {
        match self {
            Shape::Rect { width, .. } => *width,
            Shape::Circle { r, .. } => r * 2.0,
            Shape::Path { .. } => 0.0,
        }
    }

    /// Fill color, if any.
    #[must_use]
    pub fn fill(&self) -> Option<Rgba> {
        match self {
            Shape::Rect { fill, .. } | Shape::Circle { fill, .. } => Some(*fill),
            Shape::Path { fill, .. } => *fill,
        }
    }
}

/// A data-bound visual element.
#[derive(Debug, Clone, PartialEq)]
pub struct Mark {
    /// Identity used to match marks across redraws.
    pub key: String,
    /// Final geometry.
    pub shape: Shape,
    /// Starting geometry for the grow-in, if the mark animates.
    pub enter: Option<Shape>,
    /// Lines shown while the pointer hovers the mark.
    pub tooltip: Vec<String>,
}

impl Mark {
    /// Create a static mark.
    #[must_use]
    pub fn new(key: impl Into<String>, shape: Shape) -> Self {
        Self { key: key.into(), shape, enter: None, tooltip: Vec::new() }
    }

    /// Animate from `shape` on entry.
    #[must_use]
    pub fn entering_from(mut self, shape: Shape) -> Self {
        self.enter = Some(shape);
        self
    }

    /// Attach tooltip lines.
    #[must_use]
    pub fn tooltip(mut self, lines: Vec<String>) -> Self {
        self.tooltip = lines;
        self
    }
}

/// Which side of the plot an axis sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisOrient {
    /// Horizontal axis, ticks below the line.
    Bottom,
    /// Vertical axis, ticks left of the line.
    Left,
}

/// One labelled tick.
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    /// Position along the axis.
    pub offset: f32,
    /// Label text.
    pub label: String,
}

/// An axis: domain line, ticks and tick labels.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisSpec {
    /// Side of the plot.
    pub orient: AxisOrient,
    /// Axis line origin in plot coordinates.
    pub origin: Point,
    /// Axis line start and end along its direction.
    pub span: (f32, f32),
    /// Ticks.
    pub ticks: Vec<Tick>,
    /// Tick label rotation in degrees (labels then anchor at their end).
    pub label_rotation: Option<f32>,
    /// Axis title in plot coordinates.
    pub title: Option<TextMark>,
}

/// One legend row.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    /// Series name shown next to the swatch.
    pub label: String,
    /// Swatch color.
    pub color: Rgba,
}

/// A vertical stack of color swatches with labels.
#[derive(Debug, Clone, PartialEq)]
pub struct Legend {
    /// Top-left corner of the first swatch, on the surface.
    pub origin: Point,
    /// Rows from top to bottom.
    pub entries: Vec<LegendEntry>,
    /// Swatch edge length.
    pub swatch: f32,
    /// Vertical distance between rows.
    pub row_height: f32,
    /// Label style.
    pub style: TextStyle,
}

/// Two-phase sequential transition: exiting marks animate out during the
/// first phase, entering and updated marks animate during the second.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// Phase one duration.
    pub exit: Duration,
    /// Phase two duration.
    pub update: Duration,
}

impl Default for Transition {
    fn default() -> Self {
        Self { exit: Duration::from_millis(1500), update: Duration::from_millis(1500) }
    }
}

impl Transition {
    /// Combined duration of both phases.
    #[must_use]
    pub fn total(&self) -> Duration {
        self.exit + self.update
    }
}

/// Crosshair readout for the point nearest the pointer.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackReadout {
    /// Index of the located point in the tracked series.
    pub index: usize,
    /// Dot drawn on the located point, in plot coordinates.
    pub dot: Shape,
    /// Label lines (value, then date).
    pub lines: Vec<String>,
}

/// Everything one draw produces.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Scene {
    /// Surface width.
    pub width: f32,
    /// Surface height.
    pub height: f32,
    /// Offset of the plot group on the surface.
    pub origin: Point,
    /// Main title, on the surface.
    pub title: Option<TextMark>,
    /// Data marks.
    pub marks: Vec<Mark>,
    /// Value labels and other plot-space text.
    pub labels: Vec<TextMark>,
    /// Axes.
    pub axes: Vec<AxisSpec>,
    /// Legend, on the surface.
    pub legend: Option<Legend>,
    /// Animation applied to the marks.
    pub transition: Option<Transition>,
    /// Region that reports pointer movement for tracking.
    pub tracking: Option<Rect>,
}

impl Scene {
    /// Empty scene of the given size.
    #[must_use]
    pub fn new(width: f32, height: f32, origin: Point) -> Self {
        Self { width, height, origin, ..Self::default() }
    }

    /// Find a mark by key.
    #[must_use]
    pub fn mark(&self, key: &str) -> Option<&Mark> {
        self.marks.iter().find(|m| m.key == key)
    }

    /// Classify marks of `next` against `previous` by key.
    #[must_use]
    pub fn diff(previous: &Scene, next: &Scene) -> SceneDiff {
        let before: HashSet<&str> = previous.marks.iter().map(|m| m.key.as_str()).collect();
        let after: HashSet<&str> = next.marks.iter().map(|m| m.key.as_str()).collect();

        let mut diff = SceneDiff::default();
        for mark in &next.marks {
            if before.contains(mark.key.as_str()) {
                diff.update.push(mark.key.clone());
            } else {
                diff.enter.push(mark.key.clone());
            }
        }
        diff.exit = previous
            .marks
            .iter()
            .filter(|m| !after.contains(m.key.as_str()))
            .map(|m| m.key.clone())
            .collect();
        diff
    }
}

/// Enter/update/exit classification of mark keys between two scenes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SceneDiff {
    /// Keys only in the new scene.
    pub enter: Vec<String>,
    /// Keys in both scenes.
    pub update: Vec<String>,
    /// Keys only in the old scene.
    pub exit: Vec<String>,
}
