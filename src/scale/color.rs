//! Numeric-to-color scales.
//!
//! Four interchangeable mappings, selected by name with [`ColorScaleKind`]:
//!
//! - **linear**: continuous interpolation across evenly spaced color stops
//! - **quantize**: the extent split into equal-width buckets, one per color
//! - **quantile**: buckets holding roughly equal numbers of observations
//! - **threshold**: caller-supplied boundaries

use std::fmt;
use std::str::FromStr;

use super::ticks::{bisect_right, extent, quantile_sorted};
use super::Scale;
use crate::color::Rgba;
use crate::error::{Error, Result};

/// Continuous color scale interpolating across evenly spaced stops.
#[derive(Debug, Clone)]
pub struct ColorScale {
    colors: Vec<Rgba>,
    domain_min: f64,
    domain_max: f64,
}

impl ColorScale {
    /// Create a new color scale.
    ///
    /// # Errors
    ///
    /// Returns an error if colors is empty.
    pub fn new(colors: Vec<Rgba>, domain: (f64, f64)) -> Result<Self> {
        if colors.is_empty() {
            return Err(Error::ScaleDomain("Color scale requires at least one color".to_string()));
        }

        Ok(Self { colors, domain_min: domain.0, domain_max: domain.1 })
    }
}

impl Scale<f64, Rgba> for ColorScale {
    fn scale(&self, value: f64) -> Rgba {
        let span = self.domain_max - self.domain_min;
        let t = if span == 0.0 { 0.5 } else { ((value - self.domain_min) / span).clamp(0.0, 1.0) };

        if self.colors.len() == 1 {
            return self.colors[0];
        }

        let segment_count = self.colors.len() - 1;
        let segment = ((t * segment_count as f64).floor() as usize).min(segment_count - 1);
        let local_t = t * segment_count as f64 - segment as f64;

        self.colors[segment].lerp(self.colors[segment + 1], local_t as f32)
    }

    fn domain(&self) -> (f64, f64) {
        (self.domain_min, self.domain_max)
    }

    fn range(&self) -> (Rgba, Rgba) {
        (*self.colors.first().unwrap_or(&Rgba::BLACK), *self.colors.last().unwrap_or(&Rgba::WHITE))
    }
}

/// Discrete color lookup by bisecting a sorted boundary list.
///
/// `colors[i]` covers values in `[thresholds[i-1], thresholds[i])`. Indexes
/// past the last color reuse it.
#[derive(Debug, Clone)]
struct Buckets {
    thresholds: Vec<f64>,
    colors: Vec<Rgba>,
}

impl Buckets {
    fn color(&self, value: f64) -> Rgba {
        let index = bisect_right(&self.thresholds, value);
        self.colors.get(index).or_else(|| self.colors.last()).copied().unwrap_or(Rgba::BLACK)
    }

    fn range(&self) -> (Rgba, Rgba) {
        (
            self.colors.first().copied().unwrap_or(Rgba::BLACK),
            self.colors.last().copied().unwrap_or(Rgba::BLACK),
        )
    }
}

fn require_colors(colors: &[Rgba]) -> Result<()> {
    if colors.is_empty() {
        return Err(Error::ScaleDomain("Color scale requires at least one color".to_string()));
    }
    Ok(())
}

/// Equal-width buckets over a continuous domain.
#[derive(Debug, Clone)]
pub struct QuantizeScale {
    domain: (f64, f64),
    buckets: Buckets,
}

impl QuantizeScale {
    /// Create a quantize scale splitting `domain` into `colors.len()` buckets.
    ///
    /// # Errors
    ///
    /// Returns an error if colors is empty.
    pub fn new(domain: (f64, f64), colors: Vec<Rgba>) -> Result<Self> {
        require_colors(&colors)?;
        let (x0, x1) = domain;
        let n = colors.len() - 1;
        let thresholds = (0..n)
            .map(|i| ((i + 1) as f64 * x1 - (i as f64 - n as f64) * x0) / (n + 1) as f64)
            .collect();
        Ok(Self { domain, buckets: Buckets { thresholds, colors } })
    }

    /// Interior bucket boundaries.
    #[must_use]
    pub fn thresholds(&self) -> &[f64] {
        &self.buckets.thresholds
    }
}

impl Scale<f64, Rgba> for QuantizeScale {
    fn scale(&self, value: f64) -> Rgba {
        self.buckets.color(value)
    }

    fn domain(&self) -> (f64, f64) {
        self.domain
    }

    fn range(&self) -> (Rgba, Rgba) {
        self.buckets.range()
    }
}

/// Buckets holding roughly equal numbers of the observed values.
#[derive(Debug, Clone)]
pub struct QuantileScale {
    domain: (f64, f64),
    buckets: Buckets,
}

impl QuantileScale {
    /// Create a quantile scale from the observed values.
    ///
    /// # Errors
    ///
    /// Returns an error if colors is empty.
    pub fn new(values: &[f64], colors: Vec<Rgba>) -> Result<Self> {
        require_colors(&colors)?;
        let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        sorted.sort_by(f64::total_cmp);

        let n = colors.len();
        let thresholds = (1..n)
            .filter_map(|i| quantile_sorted(&sorted, i as f64 / n as f64))
            .collect();
        let domain = extent(sorted.iter().copied()).unwrap_or((0.0, 0.0));
        Ok(Self { domain, buckets: Buckets { thresholds, colors } })
    }

    /// Quantile boundaries between colors.
    #[must_use]
    pub fn quantiles(&self) -> &[f64] {
        &self.buckets.thresholds
    }
}

impl Scale<f64, Rgba> for QuantileScale {
    fn scale(&self, value: f64) -> Rgba {
        self.buckets.color(value)
    }

    fn domain(&self) -> (f64, f64) {
        self.domain
    }

    fn range(&self) -> (Rgba, Rgba) {
        self.buckets.range()
    }
}

/// Explicit boundaries chosen by the caller.
#[derive(Debug, Clone)]
pub struct ThresholdScale {
    buckets: Buckets,
}

impl ThresholdScale {
    /// Create a threshold scale. `thresholds` must be ascending; ideally
    /// there is one color more than there are thresholds.
    ///
    /// # Errors
    ///
    /// Returns an error if colors is empty.
    pub fn new(thresholds: Vec<f64>, colors: Vec<Rgba>) -> Result<Self> {
        require_colors(&colors)?;
        Ok(Self { buckets: Buckets { thresholds, colors } })
    }
}

impl Scale<f64, Rgba> for ThresholdScale {
    fn scale(&self, value: f64) -> Rgba {
        self.buckets.color(value)
    }

    fn domain(&self) -> (f64, f64) {
        let t = &self.buckets.thresholds;
        (t.first().copied().unwrap_or(f64::NAN), t.last().copied().unwrap_or(f64::NAN))
    }

    fn range(&self) -> (Rgba, Rgba) {
        self.buckets.range()
    }
}

/// Named selection among the color scales.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorScaleKind {
    /// [`ColorScale`]
    Linear,
    /// [`QuantizeScale`]
    Quantize,
    /// [`QuantileScale`]
    Quantile,
    /// [`ThresholdScale`]
    Threshold,
}

impl ColorScaleKind {
    /// Accepted names, comma separated.
    pub const NAMES: &'static str = "linear,quantize,quantile,threshold";

    /// Build the scale for `values`.
    ///
    /// The linear kind maps the value extent onto the first two colors only;
    /// any further colors are unused.
    ///
    /// # Errors
    ///
    /// [`Error::MissingThresholds`] for the threshold kind without
    /// boundaries, [`Error::EmptyData`] for extent-based kinds without finite
    /// values, or a scale error for an empty palette.
    pub fn build(
        self,
        values: &[f64],
        colors: &[Rgba],
        thresholds: Option<&[f64]>,
    ) -> Result<Box<dyn Scale<f64, Rgba>>> {
        let colors = colors.to_vec();
        Ok(match self {
            ColorScaleKind::Linear => {
                // a two-stop domain reaches only the first two colors
                let domain = extent(values.iter().copied()).ok_or(Error::EmptyData)?;
                Box::new(ColorScale::new(colors.into_iter().take(2).collect(), domain)?)
            }
            ColorScaleKind::Quantize => {
                let domain = extent(values.iter().copied()).ok_or(Error::EmptyData)?;
                Box::new(QuantizeScale::new(domain, colors)?)
            }
            ColorScaleKind::Quantile => Box::new(QuantileScale::new(values, colors)?),
            ColorScaleKind::Threshold => {
                let thresholds = thresholds.ok_or(Error::MissingThresholds)?;
                Box::new(ThresholdScale::new(thresholds.to_vec(), colors)?)
            }
        })
    }
}

impl FromStr for ColorScaleKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "linear" => Ok(ColorScaleKind::Linear),
            "quantize" => Ok(ColorScaleKind::Quantize),
            "quantile" => Ok(ColorScaleKind::Quantile),
            "threshold" => Ok(ColorScaleKind::Threshold),
            other => Err(Error::InvalidOption {
                option: "scale",
                value: other.to_string(),
                expected: Self::NAMES.to_string(),
            }),
        }
    }
}

impl fmt::Display for ColorScaleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColorScaleKind::Linear => "linear",
            ColorScaleKind::Quantize => "quantize",
            ColorScaleKind::Quantile => "quantile",
            ColorScaleKind::Threshold => "threshold",
        };
        f.write_str(name)
    }
}
