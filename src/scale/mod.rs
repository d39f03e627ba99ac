//! Scale functions for data-to-visual mappings.
//!
//! Scales are rebuilt on every draw from the current dataset and options;
//! nothing here is cached between draws.
//!
//! # Families
//!
//! - **Positional**: [`LinearScale`] (numeric domain) and [`BandScale`]
//!   (categorical domain)
//! - **Color**: [`OrdinalScale`] for categories, and [`ColorScale`],
//!   [`QuantizeScale`], [`QuantileScale`], [`ThresholdScale`] for numbers

mod band;
mod color;
mod linear;
mod ticks;

pub use band::{BandScale, OrdinalScale};
pub use color::{ColorScale, ColorScaleKind, QuantileScale, QuantizeScale, ThresholdScale};
pub use linear::LinearScale;
pub use ticks::{bisect_right, extent, nice, quantile_sorted, tick_increment, tick_step, ticks};

/// Trait for scale functions that map domain values to range values.
pub trait Scale<D, R> {
    /// Transform a domain value to a range value.
    fn scale(&self, value: D) -> R;

    /// Get the domain extent.
    fn domain(&self) -> (D, D);

    /// Get the range extent.
    fn range(&self) -> (R, R);
}
