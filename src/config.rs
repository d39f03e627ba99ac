//! Presentation defaults shared by every chart kind.
//!
//! With the `config` feature a style can be loaded from YAML; every field is
//! optional and falls back to the built-in default.

#[cfg(feature = "config")]
use std::path::Path;
use std::time::Duration;

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};

use crate::color::Rgba;
#[cfg(feature = "config")]
use crate::error::Result;
use crate::render::{TextStyle, Transition};

/// Fonts, transition timing and fixed colors used when composing scenes.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
pub struct ChartStyle {
    /// Font family for all chart text.
    #[cfg_attr(feature = "config", serde(default = "default_font_family"))]
    pub font_family: String,

    /// Main title font size.
    #[cfg_attr(feature = "config", serde(default = "default_title_size"))]
    pub title_size: f32,

    /// Axis title font size.
    #[cfg_attr(feature = "config", serde(default = "default_axis_title_size"))]
    pub axis_title_size: f32,

    /// Value label font size.
    #[cfg_attr(feature = "config", serde(default = "default_label_size"))]
    pub label_size: f32,

    /// Legend text font size.
    #[cfg_attr(feature = "config", serde(default = "default_legend_size"))]
    pub legend_size: f32,

    /// Fill of marks as they enter.
    #[cfg_attr(feature = "config", serde(default = "default_enter_fill"))]
    pub enter_fill: Rgba,

    /// Fill of marks as they leave.
    #[cfg_attr(feature = "config", serde(default = "default_exit_fill"))]
    pub exit_fill: Rgba,

    /// Exit phase duration in milliseconds.
    #[cfg_attr(feature = "config", serde(default = "default_phase_ms"))]
    pub exit_ms: u64,

    /// Update phase duration in milliseconds.
    #[cfg_attr(feature = "config", serde(default = "default_phase_ms"))]
    pub update_ms: u64,

    /// Legend swatch side length.
    #[cfg_attr(feature = "config", serde(default = "default_legend_swatch"))]
    pub legend_swatch: f32,

    /// Legend row pitch.
    #[cfg_attr(feature = "config", serde(default = "default_legend_row"))]
    pub legend_row: f32,

    /// Crosshair dot fill.
    #[cfg_attr(feature = "config", serde(default = "default_tracker_fill"))]
    pub tracker_fill: Rgba,

    /// Crosshair dot radius.
    #[cfg_attr(feature = "config", serde(default = "default_tracker_radius"))]
    pub tracker_radius: f32,
}

fn default_font_family() -> String {
    "Verdana".to_string()
}
fn default_title_size() -> f32 {
    20.0
}
fn default_axis_title_size() -> f32 {
    14.0
}
fn default_label_size() -> f32 {
    14.0
}
fn default_legend_size() -> f32 {
    10.0
}
fn default_enter_fill() -> Rgba {
    Rgba::hex(0xb8_de6f)
}
fn default_exit_fill() -> Rgba {
    Rgba::hex(0xf3_9233)
}
fn default_phase_ms() -> u64 {
    1500
}
fn default_legend_swatch() -> f32 {
    19.0
}
fn default_legend_row() -> f32 {
    20.0
}
fn default_tracker_fill() -> Rgba {
    Rgba::hex(0xfc_8781)
}
fn default_tracker_radius() -> f32 {
    5.0
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            font_family: default_font_family(),
            title_size: default_title_size(),
            axis_title_size: default_axis_title_size(),
            label_size: default_label_size(),
            legend_size: default_legend_size(),
            enter_fill: default_enter_fill(),
            exit_fill: default_exit_fill(),
            exit_ms: default_phase_ms(),
            update_ms: default_phase_ms(),
            legend_swatch: default_legend_swatch(),
            legend_row: default_legend_row(),
            tracker_fill: default_tracker_fill(),
            tracker_radius: default_tracker_radius(),
        }
    }
}

impl ChartStyle {
    /// Two-phase transition timing.
    #[must_use]
    pub fn transition(&self) -> Transition {
        Transition {
            exit: Duration::from_millis(self.exit_ms),
            update: Duration::from_millis(self.update_ms),
        }
    }

    /// Style for text of the given size.
    #[must_use]
    pub fn text(&self, size: f32) -> TextStyle {
        TextStyle::new(self.font_family.clone(), size)
    }

    /// Loads a style from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[cfg(feature = "config")]
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parses a style from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed or a color is invalid.
    #[cfg(feature = "config")]
    pub fn parse(yaml: &str) -> Result<Self> {
        Ok(serde_yaml_ng::from_str(yaml)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_defaults() {
        let style = ChartStyle::default();
        assert_eq!(style.font_family, "Verdana");
        assert_eq!(style.title_size, 20.0);
        assert_eq!(style.enter_fill, Rgba::rgb(0xb8, 0xde, 0x6f));
        assert_eq!(style.transition().total(), Duration::from_millis(3000));
    }

    #[test]
    fn test_text_style() {
        let text = ChartStyle::default().text(14.0);
        assert_eq!(text.font_family, "Verdana");
        assert_eq!(text.font_size, 14.0);
        assert!(!text.bold);
    }

    #[cfg(feature = "config")]
    #[test]
    fn test_parse_partial_yaml() {
        let yaml = r##"
font_family: Helvetica
exit_ms: 0
enter_fill: "#ff0000"
"##;
        let style = ChartStyle::parse(yaml).expect("operation should succeed");
        assert_eq!(style.font_family, "Helvetica");
        assert_eq!(style.exit_ms, 0);
        assert_eq!(style.update_ms, 1500);
        assert_eq!(style.enter_fill, Rgba::RED);
        assert_eq!(style.legend_row, 20.0);
    }

    #[cfg(feature = "config")]
    #[test]
    fn test_parse_empty_yaml() {
        let style = ChartStyle::parse("{}").expect("operation should succeed");
        assert_eq!(style, ChartStyle::default());
    }

    #[cfg(feature = "config")]
    #[test]
    fn test_parse_invalid_color() {
        assert!(ChartStyle::parse("tracker_fill: notacolor").is_err());
    }

    #[cfg(feature = "config")]
    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("style.yaml");
        std::fs::write(&path, "title_size: 24\n").unwrap();
        let style = ChartStyle::load(&path).unwrap();
        assert_eq!(style.title_size, 24.0);
    }

    #[cfg(feature = "config")]
    #[test]
    fn test_load_missing_file() {
        assert!(ChartStyle::load("/nonexistent/style.yaml").is_err());
    }
}
