//! Error types for trueno-charts operations.
//!
//! Every error is raised synchronously by a `draw_*` call (or by the style
//! loader); setters never fail.

use std::io;
use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in trueno-charts operations.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error (file operations, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Style configuration could not be parsed.
    #[cfg(feature = "config")]
    #[error("Config error: {0}")]
    Config(#[from] serde_yaml_ng::Error),

    /// `draw_*` was called before a dataset was bound with `init`.
    #[error("The 'data' argument must be specified: dataset not specified")]
    MissingDataset,

    /// A required option was never set.
    #[error("The '{option}' argument must be specified")]
    MissingOption {
        /// Option name.
        option: &'static str,
    },

    /// A configured field name does not exist in the dataset.
    #[error("Field '{field}' is not in the data")]
    UnknownField {
        /// Field name as configured.
        field: String,
    },

    /// An enumerated option holds a value outside its supported set.
    #[error("The '{option}' argument must be one of {expected}, got '{value}'")]
    InvalidOption {
        /// Option name.
        option: &'static str,
        /// Value that was supplied.
        value: String,
        /// Accepted values.
        expected: String,
    },

    /// Threshold colour scale selected without boundaries.
    #[error("The threshold scale requires a defined 'thresholds' array argument")]
    MissingThresholds,

    /// Histogram drawn without any bin spec.
    #[error("Please specify bin intervals (i.e. n_bins, bins, or bins_nice)")]
    MissingBins,

    /// "Nice" bin spec is not a `[start, stop, count]` triple.
    #[error("The 'bins_nice' array is not in the form [start, stop, count] (got {len} values)")]
    MalformedNiceBins {
        /// Number of values supplied.
        len: usize,
    },

    /// Dataset shape does not suit the requested draw operation.
    #[error("The data must be {expected}")]
    DataShape {
        /// Shape the draw operation needs.
        expected: &'static str,
    },

    /// A field expected to hold numbers holds text.
    #[error("Field '{field}' must contain numeric values")]
    NotNumeric {
        /// Field name.
        field: String,
    },

    /// Margins leave no room for the plotting area.
    #[error("Invalid dimensions: plotting area is {width}x{height}")]
    InvalidDimensions {
        /// Derived plotting-area width.
        width: f32,
        /// Derived plotting-area height.
        height: f32,
    },

    /// Empty data provided where non-empty is required.
    #[error("Empty data provided")]
    EmptyData,

    /// Scale domain error (e.g. degenerate range).
    #[error("Scale domain error: {0}")]
    ScaleDomain(String),

    /// Color parsing error.
    #[error("Invalid color: {0}")]
    InvalidColor(String),

    /// A date string did not match the configured time format.
    #[error("Cannot parse '{value}' with time format '{format}'")]
    InvalidDate {
        /// Raw field value.
        value: String,
        /// Format string used.
        format: String,
    },
}
