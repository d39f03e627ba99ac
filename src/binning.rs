//! Histogram binning.
//!
//! Bins are half-open `[x0, x1)` intervals except the last, which also holds
//! values equal to its upper bound. Values outside the binning domain are
//! dropped.
//!
//! Boundary-based specs ([`BinSpec::Boundaries`], [`BinSpec::Nice`]) always
//! produce one extra zero-width bin at the top boundary; it is discarded.
//! Count-based binning ([`BinSpec::Count`]) extends the niced upper bound
//! instead and keeps every bin.

use crate::error::{Error, Result};
use crate::scale::{bisect_right, extent, nice, tick_increment, ticks};

/// How histogram bin boundaries are chosen.
#[derive(Debug, Clone, PartialEq)]
pub enum BinSpec {
    /// Explicit ascending boundaries; the domain is their extent.
    Boundaries(Vec<f64>),
    /// `[start, stop, count]`: round boundaries spanning start..stop.
    ///
    /// Kept as a slice so malformed triples surface at draw time.
    Nice(Vec<f64>),
    /// Roughly this many round-width bins over the data extent.
    Count(usize),
}

/// One histogram bin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bin {
    /// Lower bound (inclusive).
    pub x0: f64,
    /// Upper bound (exclusive, except for the last bin).
    pub x1: f64,
    /// Number of values in the bin.
    pub count: usize,
}

impl Bin {
    /// Midpoint of the bin.
    #[must_use]
    pub fn mid(&self) -> f64 {
        (self.x0 + self.x1) / 2.0
    }
}

/// Output of [`bin_values`].
#[derive(Debug, Clone, PartialEq)]
pub struct Binned {
    /// Bins in ascending order.
    pub bins: Vec<Bin>,
    /// Domain the x axis should span.
    pub domain: (f64, f64),
}

impl Binned {
    /// Largest bin count.
    #[must_use]
    pub fn max_count(&self) -> usize {
        self.bins.iter().map(|b| b.count).max().unwrap_or(0)
    }

    /// Counts in bin order.
    #[must_use]
    pub fn counts(&self) -> Vec<usize> {
        self.bins.iter().map(|b| b.count).collect()
    }
}

/// Bin `values` according to `spec`.
///
/// # Errors
///
/// [`Error::MalformedNiceBins`] when a nice spec is not a triple,
/// [`Error::MissingBins`] when boundaries are empty, and
/// [`Error::EmptyData`] when count-based binning has no finite values.
pub fn bin_values(values: &[f64], spec: &BinSpec) -> Result<Binned> {
    match spec {
        BinSpec::Boundaries(bounds) => bin_by_boundaries(values, bounds.clone()),
        BinSpec::Nice(triple) => {
            let &[start, stop, count] = triple.as_slice() else {
                return Err(Error::MalformedNiceBins { len: triple.len() });
            };
            if !(count >= 1.0) {
                return Err(Error::MalformedNiceBins { len: triple.len() });
            }
            bin_by_boundaries(values, ticks(start, stop, count as usize))
        }
        BinSpec::Count(count) => bin_by_count(values, *count),
    }
}

fn bin_by_boundaries(values: &[f64], mut bounds: Vec<f64>) -> Result<Binned> {
    bounds.retain(|b| b.is_finite());
    bounds.sort_by(f64::total_cmp);
    let (Some(&x0), Some(&x1)) = (bounds.first(), bounds.last()) else {
        return Err(Error::MissingBins);
    };

    let mut bins = assign(values, x0, x1, &bounds);
    bins.pop();
    Ok(Binned { bins, domain: (x0, x1) })
}

fn bin_by_count(values: &[f64], count: usize) -> Result<Binned> {
    let (min, max) = extent(values.iter().copied()).ok_or(Error::EmptyData)?;
    let (x0, mut x1) = nice(min, max, count);
    let mut thresholds = ticks(x0, x1, count);

    if thresholds.last().is_some_and(|&last| last >= x1) {
        if max >= x1 {
            // widen by one step so the maximum lands in a full-width bin
            let step = tick_increment(x0, x1, count);
            if step > 0.0 {
                x1 = ((x1 / step).floor() + 1.0) * step;
            } else if step < 0.0 {
                x1 = ((x1 * -step).ceil() + 1.0) / -step;
            }
        } else {
            thresholds.pop();
        }
    }

    let bins = assign(values, x0, x1, &thresholds);
    let domain = match (bins.first(), bins.last()) {
        (Some(first), Some(last)) => (first.x0, last.x1),
        _ => (x0, x1),
    };
    Ok(Binned { bins, domain })
}

/// Count `values` into the bins delimited by the thresholds strictly inside
/// `(x0, x1]`.
fn assign(values: &[f64], x0: f64, x1: f64, thresholds: &[f64]) -> Vec<Bin> {
    let inner: Vec<f64> = thresholds.iter().copied().filter(|&t| t > x0 && t <= x1).collect();
    let m = inner.len();

    let mut bins: Vec<Bin> = (0..=m)
        .map(|i| Bin {
            x0: if i > 0 { inner[i - 1] } else { x0 },
            x1: if i < m { inner[i] } else { x1 },
            count: 0,
        })
        .collect();

    for &v in values {
        if v >= x0 && v <= x1 {
            bins[bisect_right(&inner, v)].count += 1;
        }
    }
    bins
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_explicit_boundaries_discard_trailing_bin() {
        let binned = bin_values(&[5.0, 15.0, 25.0], &BinSpec::Boundaries(vec![0.0, 10.0, 20.0, 30.0]))
            .expect("binning should succeed");
        assert_eq!(binned.counts(), vec![1, 1, 1]);
        assert_eq!(binned.domain, (0.0, 30.0));
        assert_eq!(binned.bins[2].x0, 20.0);
        assert_eq!(binned.bins[2].x1, 30.0);
    }

    #[test]
    fn test_value_on_top_boundary_falls_in_discarded_bin() {
        let binned = bin_values(&[30.0, 29.0], &BinSpec::Boundaries(vec![0.0, 10.0, 20.0, 30.0])).unwrap();
        assert_eq!(binned.counts(), vec![0, 0, 1]);
    }

    #[test]
    fn test_values_outside_domain_dropped() {
        let binned = bin_values(&[-1.0, 3.0, 99.0], &BinSpec::Boundaries(vec![0.0, 5.0, 10.0])).unwrap();
        assert_eq!(binned.counts(), vec![1, 0]);
    }

    #[test]
    fn test_boundaries_unsorted_input() {
        let binned = bin_values(&[1.0, 6.0], &BinSpec::Boundaries(vec![10.0, 0.0, 5.0])).unwrap();
        assert_eq!(binned.counts(), vec![1, 1]);
    }

    #[test]
    fn test_empty_boundaries() {
        let err = bin_values(&[1.0], &BinSpec::Boundaries(vec![])).unwrap_err();
        assert!(matches!(err, Error::MissingBins));
    }

    #[test]
    fn test_nice_triple() {
        // ticks(0, 30, 3) = [0, 10, 20, 30]
        let binned = bin_values(&[5.0, 15.0, 25.0], &BinSpec::Nice(vec![0.0, 30.0, 3.0])).unwrap();
        assert_eq!(binned.counts(), vec![1, 1, 1]);
    }

    #[test]
    fn test_nice_malformed() {
        let err = bin_values(&[1.0], &BinSpec::Nice(vec![0.0, 10.0])).unwrap_err();
        assert!(matches!(err, Error::MalformedNiceBins { len: 2 }));
        let err = bin_values(&[1.0], &BinSpec::Nice(vec![0.0, 10.0, 0.0])).unwrap_err();
        assert!(matches!(err, Error::MalformedNiceBins { len: 3 }));
    }

    #[test]
    fn test_count_keeps_all_bins() {
        let values: Vec<f64> = (0..10).map(f64::from).collect();
        let binned = bin_values(&values, &BinSpec::Count(5)).unwrap();
        assert_eq!(binned.counts(), vec![2, 2, 2, 2, 2]);
        assert_eq!(binned.domain, (0.0, 10.0));
    }

    #[test]
    fn test_count_extends_when_max_on_boundary() {
        let values: Vec<f64> = (0..=10).map(f64::from).collect();
        let binned = bin_values(&values, &BinSpec::Count(5)).unwrap();
        assert_eq!(binned.bins.len(), 6);
        assert_eq!(binned.domain, (0.0, 12.0));
        assert_eq!(binned.bins[5].count, 1);
        assert_eq!(binned.counts().iter().sum::<usize>(), 11);
    }

    #[test]
    fn test_count_single_value() {
        let binned = bin_values(&[4.0, 4.0], &BinSpec::Count(10)).unwrap();
        assert_eq!(binned.counts(), vec![2]);
        assert_eq!(binned.domain, (4.0, 4.0));
    }

    #[test]
    fn test_count_empty() {
        assert!(matches!(bin_values(&[], &BinSpec::Count(5)), Err(Error::EmptyData)));
    }

    #[test]
    fn test_bin_mid_and_max() {
        let binned = bin_values(&[1.0, 1.5, 7.0], &BinSpec::Boundaries(vec![0.0, 5.0, 10.0, 15.0])).unwrap();
        assert_eq!(binned.max_count(), 2);
        assert_eq!(binned.bins[0].mid(), 2.5);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn prop_count_binning_keeps_every_value(values in proptest::collection::vec(-1e4f64..1e4, 1..200), count in 1usize..30) {
            let binned = bin_values(&values, &BinSpec::Count(count)).unwrap();
            prop_assert_eq!(binned.counts().iter().sum::<usize>(), values.len());
        }

        #[test]
        fn prop_bins_are_contiguous(values in proptest::collection::vec(0f64..100.0, 1..100), count in 1usize..20) {
            let binned = bin_values(&values, &BinSpec::Count(count)).unwrap();
            for pair in binned.bins.windows(2) {
                prop_assert_eq!(pair[0].x1, pair[1].x0);
            }
        }
    }
}
