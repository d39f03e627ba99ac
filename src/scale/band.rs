//! Categorical scales: bands for positions, ordinal lookup for colors.

use crate::color::Rgba;

fn distinct(domain: impl IntoIterator<Item = impl Into<String>>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for key in domain {
        let key = key.into();
        if !out.contains(&key) {
            out.push(key);
        }
    }
    out
}

/// Band scale: partitions a continuous range into equal bands, one per
/// category.
///
/// Duplicate categories are collapsed, keeping first-occurrence order.
#[derive(Debug, Clone, PartialEq)]
pub struct BandScale {
    domain: Vec<String>,
    range: (f64, f64),
    padding_inner: f64,
    padding_outer: f64,
    align: f64,
    round: bool,
}

/// Resolved band layout: position of the first band, distance between band
/// starts, and the width of each band.
#[derive(Debug, Clone, Copy)]
struct Layout {
    start: f64,
    step: f64,
    bandwidth: f64,
}

impl BandScale {
    /// Create a band scale over `domain` spanning `range`.
    #[must_use]
    pub fn new(domain: impl IntoIterator<Item = impl Into<String>>, range: (f64, f64)) -> Self {
        Self {
            domain: distinct(domain),
            range,
            padding_inner: 0.0,
            padding_outer: 0.0,
            align: 0.5,
            round: false,
        }
    }

    /// Set inner and outer padding to the same fraction of a step.
    #[must_use]
    pub fn padding(mut self, padding: f64) -> Self {
        self.padding_inner = padding.clamp(0.0, 1.0);
        self.padding_outer = padding;
        self
    }

    /// Set the gap between bands as a fraction of a step.
    #[must_use]
    pub fn padding_inner(mut self, padding: f64) -> Self {
        self.padding_inner = padding.clamp(0.0, 1.0);
        self
    }

    /// Snap band starts and widths to whole pixels.
    #[must_use]
    pub fn rounded(mut self) -> Self {
        self.round = true;
        self
    }

    fn layout(&self) -> Layout {
        let n = self.domain.len() as f64;
        let (r0, r1) = self.range;
        let (lo, hi) = if r1 < r0 { (r1, r0) } else { (r0, r1) };

        let mut step = (hi - lo) / (n - self.padding_inner + self.padding_outer * 2.0).max(1.0);
        if self.round {
            step = step.floor();
        }
        let mut start = lo + (hi - lo - step * (n - self.padding_inner)) * self.align;
        let mut bandwidth = step * (1.0 - self.padding_inner);
        if self.round {
            start = start.round();
            bandwidth = bandwidth.round();
        }
        Layout { start, step, bandwidth }
    }

    /// Start of the band for `key`, or `None` for unknown categories.
    #[must_use]
    pub fn position(&self, key: &str) -> Option<f64> {
        let index = self.domain.iter().position(|k| k == key)?;
        let layout = self.layout();
        let (r0, r1) = self.range;
        let slot = if r1 < r0 { self.domain.len() - 1 - index } else { index };
        Some(layout.start + layout.step * slot as f64)
    }

    /// Center of the band for `key`.
    #[must_use]
    pub fn center(&self, key: &str) -> Option<f64> {
        Some(self.position(key)? + self.bandwidth() / 2.0)
    }

    /// Width of every band.
    #[must_use]
    pub fn bandwidth(&self) -> f64 {
        self.layout().bandwidth
    }

    /// Distance between the starts of adjacent bands.
    #[must_use]
    pub fn step(&self) -> f64 {
        self.layout().step
    }

    /// Categories in band order.
    #[must_use]
    pub fn domain(&self) -> &[String] {
        &self.domain
    }

    /// Output range.
    #[must_use]
    pub fn range(&self) -> (f64, f64) {
        self.range
    }
}

/// Ordinal color scale: the n-th category takes the n-th palette entry,
/// cycling when there are more categories than colors.
#[derive(Debug, Clone, PartialEq)]
pub struct OrdinalScale {
    domain: Vec<String>,
    palette: Vec<Rgba>,
}

impl OrdinalScale {
    /// Create an ordinal scale. An empty palette maps everything to black.
    #[must_use]
    pub fn new(domain: impl IntoIterator<Item = impl Into<String>>, palette: &[Rgba]) -> Self {
        Self { domain: distinct(domain), palette: palette.to_vec() }
    }

    /// Color for a category, or `None` for unknown categories.
    #[must_use]
    pub fn color(&self, key: &str) -> Option<Rgba> {
        let index = self.domain.iter().position(|k| k == key)?;
        Some(self.color_at(index))
    }

    /// Color for the category at `index`.
    #[must_use]
    pub fn color_at(&self, index: usize) -> Rgba {
        if self.palette.is_empty() {
            return Rgba::BLACK;
        }
        self.palette[index % self.palette.len()]
    }

    /// Categories in order.
    #[must_use]
    pub fn domain(&self) -> &[String] {
        &self.domain
    }
}
