//! Retained SVG surface.
//!
//! Keeps the last painted [`Scene`] and serialises it on demand. Entering
//! marks carry SMIL `<animate>` elements that hold their starting geometry
//! through the exit phase and tween to the final geometry during the update
//! phase.

use std::fmt::Write as FmtWrite;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use tracing::debug;

use super::scene::{
    AxisOrient, AxisSpec, Legend, Mark, Scene, Shape, TextAnchor, TextMark, TrackReadout,
    Transition,
};
use super::Surface;
use crate::color::Rgba;
use crate::error::Result;

/// SVG-backed drawing surface.
#[derive(Debug, Clone)]
pub struct SvgSurface {
    /// SVG width
    width: f32,
    /// SVG height
    height: f32,
    /// Background color (None for transparent)
    background: Option<Rgba>,
    /// Last painted scene
    scene: Option<Scene>,
    /// Scene removed by the last clear
    retired: Option<Scene>,
    /// Active crosshair readout
    tracker: Option<TrackReadout>,
    /// Number of paints since creation
    paints: usize,
}

impl Default for SvgSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl SvgSurface {
    /// Create an empty, zero-sized surface. Charts size it on `init`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            width: 0.0,
            height: 0.0,
            background: None,
            scene: None,
            retired: None,
            tracker: None,
            paints: 0,
        }
    }

    /// Set background color (None for transparent).
    #[must_use]
    pub fn background(mut self, color: Option<Rgba>) -> Self {
        self.background = color;
        self
    }

    /// Current width.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Current height.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Last painted scene, if the surface has not been cleared since.
    #[must_use]
    pub fn scene(&self) -> Option<&Scene> {
        self.scene.as_ref()
    }

    /// Active crosshair readout.
    #[must_use]
    pub fn tracker(&self) -> Option<&TrackReadout> {
        self.tracker.as_ref()
    }

    /// Number of paints since creation.
    #[must_use]
    pub fn paint_count(&self) -> usize {
        self.paints
    }

    /// Render to SVG string.
    #[must_use]
    pub fn render(&self) -> String {
        let mut svg = String::with_capacity(4096);

        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
            self.width, self.height, self.width, self.height
        );

        if let Some(bg) = self.background {
            let _ = writeln!(svg, r#"  <rect width="100%" height="100%" fill="{}"/>"#, bg.to_css());
        }

        if let Some(scene) = &self.scene {
            if let Some(title) = &scene.title {
                let _ = writeln!(svg, "  {}", text_to_svg(title));
            }

            let _ = writeln!(
                svg,
                r#"  <g transform="translate({},{})">"#,
                scene.origin.x, scene.origin.y
            );
            for axis in &scene.axes {
                write_axis(&mut svg, axis);
            }
            for mark in &scene.marks {
                let _ = writeln!(svg, "    {}", mark_to_svg(mark, scene.transition.as_ref()));
            }
            for label in &scene.labels {
                let _ = writeln!(svg, "    {}", text_to_svg(label));
            }
            if let Some(region) = scene.tracking {
                let _ = writeln!(
                    svg,
                    r#"    <rect class="tracking" x="{}" y="{}" width="{}" height="{}" fill="none" pointer-events="all"/>"#,
                    region.x, region.y, region.width, region.height
                );
            }
            if let Some(readout) = &self.tracker {
                write_tracker(&mut svg, readout);
            }
            svg.push_str("  </g>\n");

            if let Some(legend) = &scene.legend {
                write_legend(&mut svg, legend);
            }
        }

        svg.push_str("</svg>\n");
        svg
    }

    /// Write to a file.
    ///
    /// # Errors
    ///
    /// Returns an error if file writing fails.
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(self.render().as_bytes())?;
        Ok(())
    }
}

impl Surface for SvgSurface {
    fn resize(&mut self, width: f32, height: f32) {
        debug!(width, height, "svg surface resized");
        self.width = width;
        self.height = height;
    }

    fn clear(&mut self) {
        if let Some(scene) = self.scene.take() {
            self.retired = Some(scene);
        }
        self.tracker = None;
    }

    fn paint(&mut self, scene: &Scene) {
        if let Some(previous) = self.retired.take() {
            let diff = Scene::diff(&previous, scene);
            debug!(
                enter = diff.enter.len(),
                update = diff.update.len(),
                exit = diff.exit.len(),
                "svg surface repainted"
            );
        }
        self.scene = Some(scene.clone());
        self.paints += 1;
    }

    fn show_tracker(&mut self, readout: &TrackReadout) {
        self.tracker = Some(readout.clone());
    }

    fn hide_tracker(&mut self) {
        self.tracker = None;
    }
}

/// Escape XML special characters.
fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn anchor_str(anchor: TextAnchor) -> &'static str {
    match anchor {
        TextAnchor::Start => "start",
        TextAnchor::Middle => "middle",
        TextAnchor::End => "end",
    }
}

fn text_to_svg(text: &TextMark) -> String {
    let style = &text.style;
    let weight = if style.bold { r#" font-weight="bold""# } else { "" };
    let rotate = if style.rotate == 0.0 {
        String::new()
    } else {
        format!(r#" transform="rotate({} {} {})""#, style.rotate, text.x, text.y)
    };
    format!(
        r#"<text x="{}" y="{}" font-family="{}" font-size="{}"{weight} fill="{}" text-anchor="{}"{rotate}>{}</text>"#,
        text.x,
        text.y,
        escape(&style.font_family),
        style.font_size,
        style.fill.to_css(),
        anchor_str(style.anchor),
        escape(&text.text)
    )
}

fn stroke_attr(stroke: Option<Rgba>, stroke_width: f32) -> String {
    stroke
        .map(|s| format!(r#" stroke="{}" stroke-width="{stroke_width}""#, s.to_css()))
        .unwrap_or_default()
}

/// `<animate>` for one attribute: hold `from` through the exit phase, then
/// tween to `to`.
fn animate(name: &str, from: &str, to: &str, transition: &Transition) -> String {
    let total = transition.total().as_secs_f32();
    if from == to || total <= 0.0 {
        return String::new();
    }
    let split = transition.exit.as_secs_f32() / total;
    format!(
        r#"<animate attributeName="{name}" values="{from};{from};{to}" keyTimes="0;{split};1" dur="{total}s" fill="freeze"/>"#
    )
}

fn shape_attrs(shape: &Shape) -> Vec<(&'static str, String)> {
    match shape {
        Shape::Rect { x, y, width, height, fill, .. } => vec![
            ("x", x.to_string()),
            ("y", y.to_string()),
            ("width", width.to_string()),
            ("height", height.to_string()),
            ("fill", fill.to_css()),
        ],
        Shape::Circle { cx, cy, r, fill, .. } => vec![
            ("cx", cx.to_string()),
            ("cy", cy.to_string()),
            ("r", r.to_string()),
            ("fill", fill.to_css()),
        ],
        Shape::Path { .. } => Vec::new(),
    }
}

fn mark_to_svg(mark: &Mark, transition: Option<&Transition>) -> String {
    let mut children = String::new();
    if !mark.tooltip.is_empty() {
        let _ = write!(children, "<title>{}</title>", escape(&mark.tooltip.join("\n")));
    }
    if let (Some(enter), Some(transition)) = (&mark.enter, transition) {
        for ((name, from), (_, to)) in shape_attrs(enter).iter().zip(shape_attrs(&mark.shape).iter()) {
            children.push_str(&animate(name, from, to, transition));
        }
    }

    let key = escape(&mark.key);
    let (open, tag) = match &mark.shape {
        Shape::Rect { x, y, width, height, fill, stroke, stroke_width } => (
            format!(
                r#"<rect data-key="{key}" x="{x}" y="{y}" width="{width}" height="{height}" fill="{}"{}"#,
                fill.to_css(),
                stroke_attr(*stroke, *stroke_width)
            ),
            "rect",
        ),
        Shape::Circle { cx, cy, r, fill, stroke, stroke_width } => (
            format!(
                r#"<circle data-key="{key}" cx="{cx}" cy="{cy}" r="{r}" fill="{}"{}"#,
                fill.to_css(),
                stroke_attr(*stroke, *stroke_width)
            ),
            "circle",
        ),
        Shape::Path { points, stroke, stroke_width, fill } => {
            let d: String = points
                .iter()
                .enumerate()
                .map(|(i, p)| format!("{}{},{}", if i == 0 { 'M' } else { 'L' }, p.x, p.y))
                .collect();
            let fill_attr = fill.map_or_else(|| "none".to_string(), Rgba::to_css);
            (
                format!(
                    r#"<path data-key="{key}" d="{d}" fill="{fill_attr}" stroke="{}" stroke-width="{stroke_width}""#,
                    stroke.to_css()
                ),
                "path",
            )
        }
    };

    if children.is_empty() {
        format!("{open}/>")
    } else {
        format!("{open}>{children}</{tag}>")
    }
}

fn write_axis(svg: &mut String, axis: &AxisSpec) {
    let _ = writeln!(
        svg,
        r#"    <g class="axis" transform="translate({},{})" font-size="10" font-family="sans-serif">"#,
        axis.origin.x, axis.origin.y
    );
    let (a, b) = axis.span;
    let domain = match axis.orient {
        AxisOrient::Bottom => format!("M{a},6V0H{b}V6"),
        AxisOrient::Left => format!("M-6,{a}H0V{b}H-6"),
    };
    let _ = writeln!(svg, r#"      <path class="domain" d="{domain}" fill="none" stroke="currentColor"/>"#);

    for tick in &axis.ticks {
        let label = escape(&tick.label);
        match axis.orient {
            AxisOrient::Bottom => {
                let text = match axis.label_rotation {
                    Some(deg) => format!(
                        r#"<text y="9" dy="0.71em" text-anchor="end" transform="translate(-10,0) rotate({deg})">{label}</text>"#
                    ),
                    None => format!(r#"<text y="9" dy="0.71em" text-anchor="middle">{label}</text>"#),
                };
                let _ = writeln!(
                    svg,
                    r#"      <g class="tick" transform="translate({},0)"><line y2="6" stroke="currentColor"/>{text}</g>"#,
                    tick.offset
                );
            }
            AxisOrient::Left => {
                let _ = writeln!(
                    svg,
                    r#"      <g class="tick" transform="translate(0,{})"><line x2="-6" stroke="currentColor"/><text x="-9" dy="0.32em" text-anchor="end">{label}</text></g>"#,
                    tick.offset
                );
            }
        }
    }
    svg.push_str("    </g>\n");

    if let Some(title) = &axis.title {
        let _ = writeln!(svg, "    {}", text_to_svg(title));
    }
}

fn write_legend(svg: &mut String, legend: &Legend) {
    svg.push_str("  <g class=\"legend\">\n");
    for (i, entry) in legend.entries.iter().enumerate() {
        let y = legend.origin.y + i as f32 * legend.row_height;
        let _ = writeln!(
            svg,
            r#"    <rect x="{}" y="{y}" width="{}" height="{}" fill="{}"/>"#,
            legend.origin.x,
            legend.swatch,
            legend.swatch,
            entry.color.to_css()
        );
        let label = TextMark::new(
            legend.origin.x + legend.swatch + 5.0,
            y + legend.swatch / 2.0,
            entry.label.clone(),
            legend.style.clone(),
        );
        let _ = writeln!(svg, "    {}", text_to_svg(&label));
    }
    svg.push_str("  </g>\n");
}

fn write_tracker(svg: &mut String, readout: &TrackReadout) {
    let dot = Mark::new("tracker", readout.dot.clone());
    let _ = writeln!(svg, "    {}", mark_to_svg(&dot, None));
    if let Shape::Circle { cx, cy, r, .. } = readout.dot {
        for (i, line) in readout.lines.iter().enumerate() {
            let _ = writeln!(
                svg,
                r#"    <text class="tracker" x="{}" y="{}" font-size="12" font-weight="bold">{}</text>"#,
                cx + r * 2.0,
                cy - r * 2.0 + i as f32 * 14.0,
                escape(line)
            );
        }
    }
}
