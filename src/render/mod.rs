//! Draw-command model and drawing surfaces.
//!
//! Charts never touch a backend directly. Each draw composes a [`Scene`]
//! and hands it to a [`Surface`], which clears and repaints. [`SvgSurface`]
//! is the bundled backend.

mod scene;
mod svg;

pub use scene::{
    AxisOrient, AxisSpec, Legend, LegendEntry, Mark, Scene, SceneDiff, Shape, TextAnchor,
    TextMark, TextStyle, Tick, TrackReadout, Transition,
};
pub use svg::SvgSurface;

/// A drawing target a chart is bound to.
pub trait Surface {
    /// Set the surface size in pixels.
    fn resize(&mut self, width: f32, height: f32);

    /// Remove everything previously painted.
    fn clear(&mut self);

    /// Paint a composed scene.
    fn paint(&mut self, scene: &Scene);

    /// Show a crosshair readout over the current scene.
    fn show_tracker(&mut self, _readout: &TrackReadout) {}

    /// Hide the crosshair readout.
    fn hide_tracker(&mut self) {}
}
