//! Histogram: counts of a numeric series over bins.

use crate::binning::{bin_values, BinSpec, Binned};
use crate::chart::{Chart, ChartKind, Frame};
use crate::color::Rgba;
use crate::data::Dataset;
use crate::error::{Error, Result};
use crate::render::{Mark, Scene, Shape, SvgSurface, Surface, TextAnchor};
use crate::scale::{LinearScale, Scale};

use super::{linear_ticks, rising_from_baseline, value_label};

const AXIS_TICKS: usize = 10;

/// Histogram options.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    variable: Option<String>,
    bins: Option<BinSpec>,
    bar_fill: Rgba,
    label_bars: bool,
}

impl Default for Histogram {
    fn default() -> Self {
        Self { variable: None, bins: None, bar_fill: Rgba::BLUE, label_bars: false }
    }
}

impl ChartKind for Histogram {
    const NAME: &'static str = "histogram";
}

impl Histogram {
    /// Active bin spec.
    #[must_use]
    pub fn bins(&self) -> Option<&BinSpec> {
        self.bins.as_ref()
    }
}

/// A histogram chart.
pub type HistogramChart<S = SvgSurface> = Chart<Histogram, S>;

impl<S: Surface> Chart<Histogram, S> {
    /// Series to bin when the dataset holds named columns or records.
    pub fn set_variable(&mut self, variable: impl Into<String>) -> &mut Self {
        let variable = variable.into();
        self.configure(|o| o.variable = Some(variable))
    }

    /// Bin on explicit boundaries. Replaces any other bin spec.
    pub fn set_bins(&mut self, boundaries: Vec<f64>) -> &mut Self {
        self.configure(|o| o.bins = Some(BinSpec::Boundaries(boundaries)))
    }

    /// Bin on round boundaries from `[start, stop, count]`. Replaces any
    /// other bin spec; the shape is checked at draw.
    pub fn set_bins_nice(&mut self, triple: &[f64]) -> &mut Self {
        let triple = triple.to_vec();
        self.configure(|o| o.bins = Some(BinSpec::Nice(triple)))
    }

    /// Bin into roughly `count` round-width bins over the data. Replaces any
    /// other bin spec.
    pub fn set_n_bins(&mut self, count: usize) -> &mut Self {
        self.configure(|o| o.bins = Some(BinSpec::Count(count)))
    }

    /// Bar fill.
    pub fn set_bar_fill(&mut self, fill: Rgba) -> &mut Self {
        self.configure(|o| o.bar_fill = fill)
    }

    /// Print each bin's count above its bar.
    pub fn set_label_bars(&mut self, label: bool) -> &mut Self {
        self.configure(|o| o.label_bars = label)
    }

    /// Draw the histogram.
    ///
    /// # Errors
    ///
    /// Fails when no bin spec is set, a nice spec is malformed, or the
    /// series cannot be resolved from the dataset.
    pub fn draw_histo(&mut self) -> Result<&mut Self> {
        self.draw_with("draw_histo", compose)
    }
}

fn compose(frame: &Frame<'_>, histo: &Histogram, data: &Dataset) -> Result<Scene> {
    let spec = histo.bins.as_ref().ok_or(Error::MissingBins)?;
    let values = data.numeric_series(histo.variable.as_deref())?;
    let binned = bin_values(&values, spec)?;
    compose_bins(frame, histo, &binned)
}

fn compose_bins(frame: &Frame<'_>, histo: &Histogram, binned: &Binned) -> Result<Scene> {
    let (w, h) = (frame.width(), frame.height());
    let x = LinearScale::new(binned.domain, (0.0, w))?;
    let y = LinearScale::new((0.0, binned.max_count() as f64), (h, 0.0))?.nice(AXIS_TICKS);
    tracing::trace!(x = ?x.domain(), y = ?y.domain(), bins = binned.bins.len(), "histogram scales");

    let mut scene = frame.scene();
    for (i, bin) in binned.bins.iter().enumerate() {
        let left = x.scale(bin.x0);
        let right = x.scale(bin.x1);
        let width = (right - left - 1.0).max(0.0);
        let top = y.scale(bin.count as f64);
        scene.marks.push(
            Mark::new(
                format!("bin{i}"),
                Shape::rect(left as f32, top as f32, width as f32, (h - top) as f32, histo.bar_fill),
            )
            .entering_from(rising_from_baseline(frame, left, width))
            .tooltip(vec![format!("[{}, {}): {}", bin.x0, bin.x1, bin.count)]),
        );
        if histo.label_bars {
            scene.labels.push(value_label(
                frame,
                left + (right - left) / 2.0,
                top - 10.0,
                bin.count.to_string(),
                TextAnchor::Middle,
            ));
        }
    }

    scene.axes.push(frame.bottom_axis(linear_ticks(&x, AXIS_TICKS, None, None)));
    scene.axes.push(frame.left_axis(linear_ticks(&y, AXIS_TICKS, None, None)));
    Ok(scene)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Record;

    fn drawn(chart: &HistogramChart) -> &Scene {
        chart.surface().unwrap().scene().unwrap()
    }

    fn bar_width(scene: &Scene, key: &str) -> f32 {
        scene.mark(key).unwrap().shape.width()
    }

    #[test]
    fn test_explicit_bins() {
        let mut chart = HistogramChart::new();
        chart.init(SvgSurface::new(), vec![5.0, 15.0, 25.0]);
        chart.set_bins(vec![0.0, 10.0, 20.0, 30.0]).draw_histo().expect("operation should succeed");

        let scene = drawn(&chart);
        assert_eq!(scene.marks.len(), 3);
        // 810 px over [0, 30]: 270 px per bin minus 1 px gap
        assert_eq!(bar_width(scene, "bin0"), 269.0);
        assert_eq!(scene.mark("bin2").unwrap().shape.height(), 600.0);
    }

    #[test]
    fn test_last_bin_spec_wins() {
        let mut chart = HistogramChart::new();
        chart.init(SvgSurface::new(), vec![5.0, 15.0, 25.0]);
        chart.set_bins(vec![0.0, 10.0]).set_bins_nice(&[0.0, 30.0, 3.0]).set_n_bins(4);
        assert_eq!(chart.options().bins(), Some(&BinSpec::Count(4)));
        chart.set_bins(vec![0.0, 30.0]);
        assert_eq!(chart.options().bins(), Some(&BinSpec::Boundaries(vec![0.0, 30.0])));
    }

    #[test]
    fn test_missing_bins() {
        let mut chart = HistogramChart::new();
        chart.init(SvgSurface::new(), vec![1.0]);
        let err = chart.draw_histo().unwrap_err();
        assert!(matches!(err, Error::MissingBins));
        assert!(err.to_string().contains("n_bins"));
    }

    #[test]
    fn test_malformed_nice_fails_at_draw() {
        let mut chart = HistogramChart::new();
        chart.init(SvgSurface::new(), vec![1.0]);
        chart.set_bins_nice(&[0.0, 10.0]);
        assert!(matches!(chart.draw_histo(), Err(Error::MalformedNiceBins { len: 2 })));
    }

    #[test]
    fn test_variable_selects_column() {
        let data = Dataset::columns([("a", vec![1.0, 2.0]), ("b", vec![50.0, 60.0, 70.0])]);
        let mut chart = HistogramChart::new();
        chart.init(SvgSurface::new(), data);
        chart.set_n_bins(5);
        assert!(matches!(chart.draw_histo(), Err(Error::MissingOption { option: "variable" })));

        chart.set_variable("b").draw_histo().unwrap();
        let total: f32 = drawn(&chart).marks.iter().map(|m| m.shape.height()).sum();
        assert!(total > 0.0);
    }

    #[test]
    fn test_variable_selects_record_field() {
        let records = vec![
            Record::new().with("t", 1.0),
            Record::new().with("t", 2.0),
            Record::new().with("t", 3.0),
        ];
        let mut chart = HistogramChart::new();
        chart.init(SvgSurface::new(), records);
        chart.set_variable("t").set_bins(vec![0.0, 2.0, 4.0]).draw_histo().unwrap();
        assert_eq!(drawn(&chart).marks.len(), 2);
    }

    #[test]
    fn test_count_labels() {
        let mut chart = HistogramChart::new();
        chart.init(SvgSurface::new(), vec![1.0, 2.0, 12.0]);
        chart.set_bins(vec![0.0, 10.0, 20.0]).set_label_bars(true).draw_histo().unwrap();

        let labels: Vec<&str> = drawn(&chart).labels.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(labels, vec!["2", "1"]);
        let first = &drawn(&chart).labels[0];
        assert_eq!(first.x, 202.5);
        assert_eq!(first.y, -10.0);
    }

    #[test]
    fn test_count_bins_keep_trailing_bin() {
        let values: Vec<f64> = (0..=10).map(f64::from).collect();
        let mut chart = HistogramChart::new();
        chart.init(SvgSurface::new(), values);
        chart.set_n_bins(5).draw_histo().unwrap();
        assert_eq!(drawn(&chart).marks.len(), 6);
    }
}
