//! Continuous linear scale.

use super::ticks::{extent, nice, tick_step, ticks};
use super::Scale;
use crate::error::{Error, Result};
use crate::format::{precision_for_step, TickFormat};

/// Linear scale for continuous-to-continuous mapping.
///
/// A degenerate domain (`min == max`) maps every value to the middle of the
/// range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain_min: f64,
    domain_max: f64,
    range_min: f64,
    range_max: f64,
    clamp: bool,
    round: bool,
}

impl LinearScale {
    /// Create a new linear scale.
    ///
    /// # Errors
    ///
    /// Returns an error if either domain bound is not finite.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Result<Self> {
        if !domain.0.is_finite() || !domain.1.is_finite() {
            return Err(Error::ScaleDomain(format!(
                "Domain bounds must be finite, got [{}, {}]",
                domain.0, domain.1
            )));
        }

        Ok(Self {
            domain_min: domain.0,
            domain_max: domain.1,
            range_min: range.0,
            range_max: range.1,
            clamp: false,
            round: false,
        })
    }

    /// Create a scale from the data extent.
    #[must_use]
    pub fn from_data(data: &[f64], range: (f64, f64)) -> Option<Self> {
        let (min, max) = extent(data.iter().copied())?;
        Self::new((min, max), range).ok()
    }

    /// Clamp output to the range (and inverted input to the domain).
    #[must_use]
    pub fn clamped(mut self) -> Self {
        self.clamp = true;
        self
    }

    /// Round output to whole pixels.
    #[must_use]
    pub fn rounded(mut self) -> Self {
        self.round = true;
        self
    }

    /// Extend the domain to round tick values.
    #[must_use]
    pub fn nice(mut self, count: usize) -> Self {
        let reversed = self.domain_max < self.domain_min;
        let (lo, hi) = if reversed {
            (self.domain_max, self.domain_min)
        } else {
            (self.domain_min, self.domain_max)
        };
        let (lo, hi) = nice(lo, hi, count);
        if reversed {
            self.domain_min = hi;
            self.domain_max = lo;
        } else {
            self.domain_min = lo;
            self.domain_max = hi;
        }
        self
    }

    fn normalize(&self, value: f64) -> f64 {
        let span = self.domain_max - self.domain_min;
        let t = if span == 0.0 { 0.5 } else { (value - self.domain_min) / span };
        if self.clamp {
            t.clamp(0.0, 1.0)
        } else {
            t
        }
    }

    /// Invert the scale (range to domain).
    #[must_use]
    pub fn invert(&self, value: f64) -> f64 {
        let span = self.range_max - self.range_min;
        let mut t = if span == 0.0 { 0.5 } else { (value - self.range_min) / span };
        if self.clamp {
            t = t.clamp(0.0, 1.0);
        }
        self.domain_min + t * (self.domain_max - self.domain_min)
    }

    /// Tick values for roughly `count` ticks across the domain.
    #[must_use]
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        ticks(self.domain_min, self.domain_max, count)
    }

    /// Default label format for [`Self::ticks`] with the same count.
    #[must_use]
    pub fn tick_format(&self, count: usize) -> TickFormat {
        let step = tick_step(self.domain_min, self.domain_max, count);
        TickFormat::fixed(precision_for_step(step.abs()))
    }
}

impl Scale<f64, f64> for LinearScale {
    fn scale(&self, value: f64) -> f64 {
        let out = self.range_min + self.normalize(value) * (self.range_max - self.range_min);
        if self.round {
            out.round()
        } else {
            out
        }
    }

    fn domain(&self) -> (f64, f64) {
        (self.domain_min, self.domain_max)
    }

    fn range(&self) -> (f64, f64) {
        (self.range_min, self.range_max)
    }
}
