//! Number and date formatting for tick labels, value labels and tooltips.

use std::fmt::{self, Write as _};
use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime, TimeZone, Utc};

use crate::error::{Error, Result};

/// Format a number the way value labels show it: integers without a
/// fractional part, everything else in shortest round-trip form.
#[must_use]
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e21 {
        // -0 prints as 0
        format!("{:.0}", value + 0.0)
    } else {
        format!("{value}")
    }
}

/// Fixed-precision format with thousands separators.
#[must_use]
pub fn format_fixed(value: f64, decimals: usize) -> String {
    let text = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (text.as_str(), None),
    };

    let mut grouped = String::with_capacity(text.len() + 4);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if let Some(frac) = frac_part {
        grouped.push('.');
        grouped.push_str(frac);
    }

    let is_zero = text.chars().all(|c| c == '0' || c == '.');
    if value.is_sign_negative() && !is_zero {
        grouped.insert(0, '-');
    }
    grouped
}

const SI_PREFIXES: [(i32, &str); 9] = [
    (-12, "p"),
    (-9, "n"),
    (-6, "\u{b5}"),
    (-3, "m"),
    (0, ""),
    (3, "k"),
    (6, "M"),
    (9, "G"),
    (12, "T"),
];

/// SI-prefix format (`1500` → `1.5k`, `0.25` → `250m`).
#[must_use]
pub fn format_si(value: f64) -> String {
    if value == 0.0 || !value.is_finite() {
        return format_number(value);
    }
    let exponent = value.abs().log10().floor() as i32;
    let prefix_exp = (exponent.div_euclid(3) * 3).clamp(-12, 12);
    let suffix = SI_PREFIXES
        .iter()
        .find(|(e, _)| *e == prefix_exp)
        .map_or("", |(_, s)| *s);

    let scaled = value / 10f64.powi(prefix_exp);
    // six significant digits, trailing zeros trimmed
    let decimals = (5 - (exponent - prefix_exp)).max(0) as usize;
    let mut text = format!("{scaled:.decimals$}");
    if text.contains('.') {
        text = text.trim_end_matches('0').trim_end_matches('.').to_string();
    }
    text.push_str(suffix);
    text
}

/// Number of decimals that distinguishes ticks spaced `step` apart.
#[must_use]
pub fn precision_for_step(step: f64) -> usize {
    if !step.is_finite() || step <= 0.0 {
        return 0;
    }
    (-step.abs().log10().floor()).max(0.0) as usize
}

/// Parse a date string with a strftime-style format, in UTC.
///
/// Formats without a time component resolve to midnight, and a missing
/// month or day is the first (`%Y` gives January 1st). Returns epoch
/// milliseconds.
///
/// # Errors
///
/// Returns [`Error::InvalidDate`] when the string does not match.
pub fn parse_date(value: &str, format: &str) -> Result<f64> {
    parse_naive(value, format)
        .map(|dt| Utc.from_utc_datetime(&dt).timestamp_millis() as f64)
        .ok_or_else(|| Error::InvalidDate { value: value.to_string(), format: format.to_string() })
}

fn parse_naive(value: &str, format: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
        return Some(dt);
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, format) {
        return date.and_hms_opt(0, 0, 0);
    }
    [("|01|01", "|%m|%d"), ("|01", "|%d")]
        .iter()
        .find_map(|(pad, spec)| {
            NaiveDate::parse_from_str(&format!("{value}{pad}"), &format!("{format}{spec}")).ok()
        })
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

/// Format epoch milliseconds with a strftime-style format, in UTC.
///
/// Falls back to the raw number when the timestamp is out of range or the
/// format string is invalid.
#[must_use]
pub fn format_date(millis: f64, format: &str) -> String {
    let Some(dt) = Utc.timestamp_millis_opt(millis.round() as i64).single() else {
        return format_number(millis);
    };
    let mut out = String::new();
    if write!(out, "{}", dt.format(format)).is_err() {
        return format_number(millis);
    }
    out
}

/// A tick label formatter.
#[derive(Clone)]
pub struct TickFormat(Arc<dyn Fn(f64) -> String + Send + Sync>);

impl TickFormat {
    /// Wrap a formatting closure.
    pub fn new(f: impl Fn(f64) -> String + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    /// SI-prefix labels.
    #[must_use]
    pub fn si() -> Self {
        Self::new(format_si)
    }

    /// Fixed decimals with thousands separators.
    #[must_use]
    pub fn fixed(decimals: usize) -> Self {
        Self::new(move |v| format_fixed(v, decimals))
    }

    /// Date labels for epoch-millisecond ticks.
    #[must_use]
    pub fn date(format: impl Into<String>) -> Self {
        let format = format.into();
        Self::new(move |v| format_date(v, &format))
    }

    /// Apply the formatter.
    #[must_use]
    pub fn apply(&self, value: f64) -> String {
        (self.0)(value)
    }
}

impl fmt::Debug for TickFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TickFormat(..)")
    }
}
