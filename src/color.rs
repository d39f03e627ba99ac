//! Color values, CSS color parsing and categorical palettes.
//!
//! Chart options take colors as CSS strings (`"blue"`, `"#b8de6f"`), so
//! [`Rgba`] parses the hex notations and the named colors charts commonly use.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// RGBA color with 8-bit components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "config",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub struct Rgba {
    /// Red component (0-255).
    pub r: u8,
    /// Green component (0-255).
    pub g: u8,
    /// Blue component (0-255).
    pub b: u8,
    /// Alpha component (0-255, 255 = fully opaque).
    pub a: u8,
}

impl Rgba {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);
    /// Opaque black.
    pub const BLACK: Self = Self::new(0, 0, 0, 255);
    /// Opaque white.
    pub const WHITE: Self = Self::new(255, 255, 255, 255);
    /// Opaque red.
    pub const RED: Self = Self::new(255, 0, 0, 255);
    /// Opaque blue.
    pub const BLUE: Self = Self::new(0, 0, 255, 255);
    /// CSS `gray`.
    pub const GRAY: Self = Self::new(128, 128, 128, 255);
    /// CSS `pink`.
    pub const PINK: Self = Self::new(255, 192, 203, 255);

    /// Create a new RGBA color.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque RGB color (alpha = 255).
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Create an opaque color from a `0xRRGGBB` literal.
    #[must_use]
    pub const fn hex(value: u32) -> Self {
        Self::rgb((value >> 16) as u8, (value >> 8) as u8, value as u8)
    }

    /// Create a color with modified alpha.
    #[must_use]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }

    /// Linear interpolation between two colors in RGB space.
    #[must_use]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (f32::from(a) * (1.0 - t) + f32::from(b) * t).round() as u8;

        Self::new(
            mix(self.r, other.r),
            mix(self.g, other.g),
            mix(self.b, other.b),
            mix(self.a, other.a),
        )
    }

    /// Parse a CSS color: `#rgb`, `#rrggbb`, `#rrggbbaa` or a named color.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidColor`] for anything else.
    pub fn parse(css: &str) -> Result<Self> {
        let css = css.trim();
        if let Some(hex) = css.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(|| Error::InvalidColor(css.to_string()));
        }
        named(&css.to_ascii_lowercase()).ok_or_else(|| Error::InvalidColor(css.to_string()))
    }

    /// CSS representation used in SVG attributes.
    #[must_use]
    pub fn to_css(self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("rgba({},{},{},{:.3})", self.r, self.g, self.b, f32::from(self.a) / 255.0)
        }
    }
}

fn parse_hex(hex: &str) -> Option<Rgba> {
    let digit = |i: usize| u8::from_str_radix(hex.get(i..=i)?, 16).ok();
    let byte = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    match hex.len() {
        3 => Some(Rgba::rgb(digit(0)? * 17, digit(1)? * 17, digit(2)? * 17)),
        6 => Some(Rgba::rgb(byte(0)?, byte(2)?, byte(4)?)),
        8 => Some(Rgba::new(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
        _ => None,
    }
}

fn named(name: &str) -> Option<Rgba> {
    let color = match name {
        "transparent" | "none" => Rgba::TRANSPARENT,
        "black" => Rgba::BLACK,
        "white" => Rgba::WHITE,
        "red" => Rgba::RED,
        "blue" => Rgba::BLUE,
        "green" => Rgba::hex(0x00_8000),
        "gray" | "grey" => Rgba::GRAY,
        "lightgray" | "lightgrey" => Rgba::hex(0xd3_d3d3),
        "pink" => Rgba::PINK,
        "orange" => Rgba::hex(0xff_a500),
        "yellow" => Rgba::hex(0xff_ff00),
        "purple" => Rgba::hex(0x80_0080),
        "brown" => Rgba::hex(0xa5_2a2a),
        "navy" => Rgba::hex(0x00_0080),
        "teal" => Rgba::hex(0x00_8080),
        "steelblue" => Rgba::hex(0x46_82b4),
        "orchid" => Rgba::hex(0xda_70d6),
        "salmon" => Rgba::hex(0xfa_8072),
        _ => return None,
    };
    Some(color)
}

impl FromStr for Rgba {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Rgba {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<Rgba> for String {
    fn from(color: Rgba) -> Self {
        color.to_css()
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

/// The twelve-color paired categorical palette (ColorBrewer "Paired").
pub const SCHEME_PAIRED: [Rgba; 12] = [
    Rgba::hex(0xa6_cee3),
    Rgba::hex(0x1f_78b4),
    Rgba::hex(0xb2_df8a),
    Rgba::hex(0x33_a02c),
    Rgba::hex(0xfb_9a99),
    Rgba::hex(0xe3_1a1c),
    Rgba::hex(0xfd_bf6f),
    Rgba::hex(0xff_7f00),
    Rgba::hex(0xca_b2d6),
    Rgba::hex(0x6a_3d9a),
    Rgba::hex(0xff_ff99),
    Rgba::hex(0xb1_5928),
];
