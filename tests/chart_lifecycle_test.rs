//! Chart lifecycle tests: build, draw, redraw and export through the public
//! API only.
//!
//! Run: cargo test --test chart_lifecycle_test

#![allow(clippy::unwrap_used, clippy::float_cmp)]

use proptest::prelude::*;
use trueno_charts::prelude::*;
use trueno_charts::render::{AxisOrient, Shape};

// ============================================================================
// Helpers
// ============================================================================

/// Surface that records every call for later inspection.
#[derive(Debug, Default)]
struct Recorder {
    size: (f32, f32),
    clears: usize,
    painted: Vec<Scene>,
}

impl Surface for Recorder {
    fn resize(&mut self, width: f32, height: f32) {
        self.size = (width, height);
    }

    fn clear(&mut self) {
        self.clears += 1;
    }

    fn paint(&mut self, scene: &Scene) {
        self.painted.push(scene.clone());
    }
}

fn last_scene<K: ChartKind>(chart: &Chart<K, Recorder>) -> &Scene {
    chart.surface().unwrap().painted.last().unwrap()
}

fn sales() -> Dataset {
    Dataset::keyed([("north", 40.0), ("south", 10.0), ("east", 25.0), ("west", 5.0)])
}

fn grouped_records() -> Vec<Record> {
    vec![
        Record::new().with("G", "A").with("x", 10.0).with("y", 20.0),
        Record::new().with("G", "B").with("x", 15.0).with("y", 5.0),
    ]
}

// ============================================================================
// Idempotence
// ============================================================================

#[test]
fn test_redraw_is_idempotent() {
    let mut chart: Chart<Bar, Recorder> = Chart::new();
    chart.init(Recorder::default(), sales());
    chart.set_title("Sales").set_label_bars(true);
    chart.draw_object().unwrap();
    chart.draw_object().unwrap();

    let painted = &chart.surface().unwrap().painted;
    assert_eq!(painted.len(), 2);
    assert_eq!(painted[0], painted[1]);
    // init clears once, then each draw
    assert_eq!(chart.surface().unwrap().clears, 3);
}

#[test]
fn test_final_configuration_wins() {
    let mut redrawn: Chart<Bar, Recorder> = Chart::new();
    redrawn.init(Recorder::default(), sales());
    redrawn.set_bar_fill(Rgba::RED).set_axis_flip(true).draw_object().unwrap();
    redrawn.set_bar_fill(Rgba::BLUE).set_axis_flip(false).set_title("T").draw_object().unwrap();

    let mut fresh: Chart<Bar, Recorder> = Chart::new();
    fresh.init(Recorder::default(), sales());
    fresh.set_title("T").draw_object().unwrap();

    assert_eq!(last_scene(&redrawn), last_scene(&fresh));
}

#[test]
fn test_redraw_svg_has_no_stale_marks() {
    let mut chart = BarChart::new();
    chart.init(SvgSurface::new(), sales());
    chart.draw_object().unwrap();
    chart.set_data(Dataset::keyed([("only", 1.0)])).draw_object().unwrap();

    let svg = chart.surface().unwrap().render();
    assert!(svg.contains(r#"data-key="only""#));
    assert!(!svg.contains(r#"data-key="north""#));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_bar_redraw_identical(values in proptest::collection::vec(0.0f64..1e6, 1..20)) {
        let data: Vec<(String, f64)> =
            values.iter().enumerate().map(|(i, v)| (format!("k{i}"), *v)).collect();
        let mut chart = BarChart::new();
        chart.init(SvgSurface::new(), Dataset::keyed(data));
        chart.draw_object().unwrap();
        let first = chart.surface().unwrap().render();
        chart.draw_object().unwrap();
        prop_assert_eq!(first, chart.surface().unwrap().render());
    }

    #[test]
    fn prop_histogram_redraw_identical(
        values in proptest::collection::vec(-1e3f64..1e3, 1..200),
        bins in 1usize..30,
    ) {
        let mut chart: Chart<Histogram, Recorder> = Chart::new();
        chart.init(Recorder::default(), values);
        chart.set_n_bins(bins).draw_histo().unwrap();
        chart.draw_histo().unwrap();
        let painted = &chart.surface().unwrap().painted;
        prop_assert_eq!(&painted[0], &painted[1]);
    }
}

// ============================================================================
// Per-kind properties
// ============================================================================

#[test]
fn test_grouped_domains() {
    let mut chart: Chart<Bar, Recorder> = Chart::new();
    chart.init(Recorder::default(), grouped_records());
    chart.set_group_var("G").draw_grouped().unwrap();

    let scene = last_scene(&chart);
    let bottom = scene.axes.iter().find(|a| a.orient == AxisOrient::Bottom).unwrap();
    let groups: Vec<&str> = bottom.ticks.iter().map(|t| t.label.as_str()).collect();
    assert_eq!(groups, vec!["A", "B"]);

    let keys: Vec<&str> = scene.marks.iter().map(|m| m.key.as_str()).collect();
    assert_eq!(keys, vec!["A/x", "A/y", "B/x", "B/y"]);

    let legend: Vec<&str> =
        scene.legend.as_ref().unwrap().entries.iter().map(|e| e.label.as_str()).collect();
    assert_eq!(legend, vec!["y", "x"]);
}

#[test]
fn test_histogram_explicit_bins_drop_trailing_bin() {
    let mut chart: Chart<Histogram, Recorder> = Chart::new();
    chart.init(Recorder::default(), vec![5.0, 15.0, 25.0]);
    chart.set_bins(vec![0.0, 10.0, 20.0, 30.0]).draw_histo().unwrap();

    let scene = last_scene(&chart);
    assert_eq!(scene.marks.len(), 3);
    let heights: Vec<f32> = scene.marks.iter().map(|m| m.shape.height()).collect();
    assert!(heights.iter().all(|h| *h == heights[0]));
}

#[test]
fn test_threshold_without_thresholds_leaves_surface_untouched() {
    let mut chart: Chart<Heatmap, Recorder> = Chart::new();
    chart.init(Recorder::default(), vec![1.0, 2.0, 3.0]);
    chart.set_scale("quantile").draw_heatmap().unwrap();
    let clears = chart.surface().unwrap().clears;

    chart.set_scale("threshold");
    let err = chart.draw_heatmap().unwrap_err();
    assert!(err.to_string().contains("thresholds"));

    let surface = chart.surface().unwrap();
    assert_eq!(surface.clears, clears);
    assert_eq!(surface.painted.len(), 1);
    assert_eq!(chart.state(), ChartState::Drawn);
}

#[test]
fn test_axis_flip_keeps_proportions() {
    let data = Dataset::keyed([("a", 10.0), ("b", 20.0), ("c", 40.0)]);
    let mut chart: Chart<Bar, Recorder> = Chart::new();
    chart.init(Recorder::default(), data);

    chart.draw_object().unwrap();
    let vertical: Vec<f32> = last_scene(&chart).marks.iter().map(|m| m.shape.height()).collect();
    chart.set_axis_flip(true).draw_object().unwrap();
    let flipped: Vec<f32> = last_scene(&chart).marks.iter().map(|m| m.shape.width()).collect();

    // lengths snap to whole pixels
    for lengths in [&vertical, &flipped] {
        assert!((lengths[1] / lengths[0] - 2.0).abs() < 0.02);
        assert!((lengths[2] / lengths[0] - 4.0).abs() < 0.02);
    }
}

#[test]
fn test_negative_values_clamp_to_zero_length() {
    let data = Dataset::keyed([("gain", 10.0), ("loss", -5.0)]);
    let mut chart: Chart<Bar, Recorder> = Chart::new();
    chart.init(Recorder::default(), data);

    chart.draw_object().unwrap();
    let vertical: Vec<f32> = last_scene(&chart).marks.iter().map(|m| m.shape.height()).collect();
    chart.set_axis_flip(true).draw_object().unwrap();
    let flipped: Vec<f32> = last_scene(&chart).marks.iter().map(|m| m.shape.width()).collect();

    assert_eq!(vertical, vec![600.0, 0.0]);
    assert_eq!(flipped, vec![810.0, 0.0]);

    let mut grouped: Chart<Bar, Recorder> = Chart::new();
    grouped.init(
        Recorder::default(),
        vec![
            Record::new().with("G", "A").with("x", 10.0).with("y", -5.0),
            Record::new().with("G", "B").with("x", 2.0).with("y", 4.0),
        ],
    );
    grouped.set_group_var("G").draw_grouped().unwrap();
    let scene = last_scene(&grouped);
    assert!(scene.marks.iter().all(|m| m.shape.height() >= 0.0));
    assert_eq!(scene.mark("A/y").unwrap().shape.height(), 0.0);
}

#[test]
fn test_scatter_overrides_clamp_points_to_plot_edges() {
    let records: Vec<Record> = [(1.0, 10.0), (2.0, 20.0), (3.0, 30.0)]
        .iter()
        .map(|&(x, y)| Record::new().with("x", x).with("y", y))
        .collect();
    let mut chart: Chart<Scatter, Recorder> = Chart::new();
    chart.init(Recorder::default(), records);
    chart
        .set_variables_x(["x"])
        .set_variable_y("y")
        .set_x_min_max(1.5, 2.5)
        .set_y_min_max(15.0, 25.0)
        .draw_scatter()
        .unwrap();

    let centers: Vec<(f32, f32)> = last_scene(&chart)
        .marks
        .iter()
        .map(|m| match m.shape {
            Shape::Circle { cx, cy, .. } => (cx, cy),
            _ => panic!("expected circle"),
        })
        .collect();
    assert_eq!(centers, vec![(0.0, 600.0), (405.0, 300.0), (810.0, 0.0)]);
}

#[test]
fn test_timeseries_tracking_never_picks_next_point() {
    let records: Vec<Record> = (1..=9)
        .map(|day| Record::new().with("date", format!("2021-03-0{day}")).with("v", f64::from(day)))
        .collect();
    let mut chart = TimeseriesChart::new();
    chart.init(SvgSurface::new(), records);
    chart.set_variable_x("date").set_variables_y(["v"]).set_y_track("v").draw_timeseries().unwrap();

    // 8 intervals over 810 px; just before the fourth point
    let step = 810.0 / 8.0;
    let readout = chart.track_pointer(3.0 * step - 1.0).unwrap();
    assert_eq!(readout.index, 2);
    assert_eq!(readout.lines[1], "2021-03-03");

    let exact = chart.track_pointer(3.0 * step).unwrap();
    assert_eq!(exact.index, 3);
}

#[test]
fn test_scatter_series_share_y() {
    let records = vec![
        Record::new().with("a", 1.0).with("b", 2.0).with("y", 10.0),
        Record::new().with("a", 3.0).with("b", 4.0).with("y", 20.0),
    ];
    let mut chart: Chart<Scatter, Recorder> = Chart::new();
    chart.init(Recorder::default(), records);
    chart.set_variables_x(["a", "b"]).set_variable_y("y").draw_scatter().unwrap();

    let scene = last_scene(&chart);
    assert_eq!(scene.marks.len(), 4);
    assert!(scene.marks.iter().all(|m| matches!(m.shape, Shape::Circle { .. })));
}

#[test]
fn test_table_resizes_surface() {
    let mut chart: Chart<Table, Recorder> = Chart::new();
    chart.init(Recorder::default(), grouped_records());
    chart.set_variables(["G", "x", "y"]).draw_table().unwrap();
    assert_eq!(chart.surface().unwrap().size, (370.0, 180.0));
}

// ============================================================================
// Lifecycle
// ============================================================================

#[test]
fn test_draw_before_init_fails() {
    let mut chart: Chart<Bar, Recorder> = Chart::new();
    assert_eq!(chart.state(), ChartState::Uninitialized);
    let err = chart.draw_object().unwrap_err();
    assert!(matches!(err, Error::MissingDataset));
    assert!(err.to_string().contains("dataset not specified"));
}

#[test]
fn test_set_dimensions_before_draw_resizes_surface() {
    let mut chart: Chart<Histogram, Recorder> = Chart::new();
    chart.init(Recorder::default(), vec![1.0, 2.0]);
    assert_eq!(chart.surface().unwrap().size, (900.0, 700.0));

    chart.set_dimensions(Dimensions::new(640.0, 480.0));
    assert_eq!(chart.surface().unwrap().size, (640.0, 480.0));
    assert!(chart.surface().unwrap().painted.is_empty());
    assert_eq!(chart.state(), ChartState::Ready);

    WithDimensions::set_dimensions(&mut chart, 320, 240);
    assert_eq!(chart.surface().unwrap().size, (320.0, 240.0));
    assert_eq!(chart.dimensions().left, 60.0);
}

#[test]
fn test_svg_export_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("histogram.svg");

    let mut chart = HistogramChart::new();
    chart.init(SvgSurface::new(), vec![1.0, 2.0, 2.5, 7.0]);
    chart.set_title("Spread").set_n_bins(4).draw_histo().unwrap();
    chart.surface().unwrap().write_to_file(&path).unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.starts_with("<svg"));
    assert!(written.contains("Spread"));
    assert!(written.contains("<animate"));
}
