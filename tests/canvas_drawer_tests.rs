use telemetry_chart::api::{Alignment, CanvasDrawer, ChartConfig, ChartView, SubChart};
use telemetry_chart::core::{DataSeries, QueryWindow, UnitLabel, Viewport};
use telemetry_chart::render::{Color, LineRole, TextHAlign};

const SERIES_COLOR: Color = Color::rgb(0.1, 0.2, 0.9);

// 300px wide, 200px graph height once the 24px time label band is removed.
fn build_config() -> ChartConfig {
    ChartConfig::new(Viewport::new(300, 224))
}

fn percent_sub_chart(alignment: Alignment) -> SubChart {
    SubChart::new(alignment, UnitLabel::new(["%"], 1.0).expect("unit label"))
}

fn series_every_slot(skip: Option<usize>) -> DataSeries {
    let mut series = DataSeries::new("cpu", SERIES_COLOR);
    for index in 0..=20usize {
        if Some(index) == skip {
            continue;
        }
        series.add_data_point(50.0, index as f64 * 1_500.0);
    }
    series
}

fn view_at(visible_start_time: f64, scroll_position_px: f64) -> ChartView {
    ChartView {
        visible_start_time,
        scale: 100.0,
        scroll_position_px,
    }
}

#[test]
fn query_window_follows_view() {
    let drawer = CanvasDrawer::new(build_config());
    let window = drawer.query_window(view_at(700.0, 7.0)).expect("window");
    let expected = QueryWindow::for_view(700.0, 100.0, 7.0, 300.0, 15).expect("window");
    assert_eq!(window, expected);

    let invalid = ChartView {
        visible_start_time: 0.0,
        scale: 0.0,
        scroll_position_px: 0.0,
    };
    assert!(drawer.query_window(invalid).is_err());
}

#[test]
fn contiguous_slots_become_one_polyline() {
    let drawer = CanvasDrawer::new(build_config());
    let mut sub_chart = percent_sub_chart(Alignment::Left);
    sub_chart.add_data_series(series_every_slot(None));

    let frame = drawer
        .draw(view_at(0.0, 0.0), [&mut sub_chart])
        .expect("draw");
    let segments: Vec<_> = frame.lines_with_role(LineRole::Series).collect();
    assert_eq!(segments.len(), 20);

    let first = segments[0];
    assert_eq!((first.x1, first.y1, first.x2, first.y2), (0.0, 0.0, 15.0, 0.0));
    assert_eq!(first.color, SERIES_COLOR);
    assert_eq!(segments[19].x2, 300.0);
}

#[test]
fn empty_interior_slot_breaks_the_line() {
    let drawer = CanvasDrawer::new(build_config());
    let mut sub_chart = percent_sub_chart(Alignment::Left);
    sub_chart.add_data_series(series_every_slot(Some(10)));

    let frame = drawer
        .draw(view_at(0.0, 0.0), [&mut sub_chart])
        .expect("draw");
    let segments: Vec<_> = frame.lines_with_role(LineRole::Series).collect();
    assert_eq!(segments.len(), 18);
    assert!(segments.iter().all(|segment| segment.x2 != 150.0));
}

#[test]
fn sub_stride_scroll_shifts_line_left() {
    let drawer = CanvasDrawer::new(build_config());
    let mut sub_chart = percent_sub_chart(Alignment::Left);
    sub_chart.add_data_series(series_every_slot(None));

    let frame = drawer
        .draw(view_at(700.0, 7.0), [&mut sub_chart])
        .expect("draw");
    let segments: Vec<_> = frame.lines_with_role(LineRole::Series).collect();
    assert_eq!(segments.len(), 20);
    assert_eq!(segments[0].x1, -7.0);
    assert_eq!(segments[0].x2, 8.0);
}

#[test]
fn max_value_override_sets_vertical_ceiling() {
    let config = build_config().with_max_value_override(Some(100.0));
    let drawer = CanvasDrawer::new(config);
    let mut sub_chart = percent_sub_chart(Alignment::Left);
    sub_chart.add_data_series(series_every_slot(None));

    let frame = drawer
        .draw(view_at(0.0, 0.0), [&mut sub_chart])
        .expect("draw");
    let first = frame
        .lines_with_role(LineRole::Series)
        .next()
        .expect("segment");
    assert_eq!(first.y1, 100.0);
    assert_eq!(sub_chart.unit_label().max_value_cache(), 100.0);
}

#[test]
fn hidden_series_draws_no_line_but_axes_remain() {
    let drawer = CanvasDrawer::new(build_config());
    let mut sub_chart = percent_sub_chart(Alignment::Left);
    let mut series = series_every_slot(None);
    series.set_visible(false);
    sub_chart.add_data_series(series);

    let frame = drawer
        .draw(view_at(0.0, 0.0), [&mut sub_chart])
        .expect("draw");
    assert_eq!(frame.lines_with_role(LineRole::Series).count(), 0);
    assert!(frame.lines_with_role(LineRole::Grid).count() > 0);
}

#[test]
fn grid_and_labels_cover_both_axes() {
    let drawer = CanvasDrawer::new(build_config());
    let mut sub_chart = percent_sub_chart(Alignment::Left);
    sub_chart.add_data_series(series_every_slot(None));

    let frame = drawer
        .draw(view_at(0.0, 0.0), [&mut sub_chart])
        .expect("draw");

    // Six unit rows (50 % down to 0 %) plus time ticks at 0s, 15s and 30s.
    assert_eq!(frame.lines_with_role(LineRole::Grid).count(), 9);
    assert_eq!(frame.texts.len(), 9);

    let time_labels: Vec<_> = frame
        .texts
        .iter()
        .filter(|text| text.h_align == TextHAlign::Center)
        .map(|text| text.text.as_str())
        .collect();
    assert_eq!(time_labels, ["00:00:00", "00:00:15", "00:00:30"]);

    let unit_labels: Vec<_> = frame
        .texts
        .iter()
        .filter(|text| text.h_align == TextHAlign::Left)
        .collect();
    assert_eq!(unit_labels.len(), 6);
    assert_eq!(unit_labels[0].text, "50 %");
    assert_eq!(unit_labels[0].x, 4.0);
}

#[test]
fn right_sub_chart_adds_right_aligned_labels_only() {
    let drawer = CanvasDrawer::new(build_config());
    let mut left = percent_sub_chart(Alignment::Left);
    left.add_data_series(series_every_slot(None));
    let mut right = SubChart::new(
        Alignment::Right,
        UnitLabel::new(["B", "KB", "MB"], 1024.0).expect("unit label"),
    );
    let mut bytes = DataSeries::new("rx", Color::rgb(0.8, 0.1, 0.1));
    bytes.add_data_point(2_048.0, 0.0);
    bytes.add_data_point(4_096.0, 1_500.0);
    right.add_data_series(bytes);

    let frame = drawer
        .draw(view_at(0.0, 0.0), [&mut left, &mut right])
        .expect("draw");

    assert_eq!(frame.lines_with_role(LineRole::Grid).count(), 9);
    let right_labels: Vec<_> = frame
        .texts
        .iter()
        .filter(|text| text.h_align == TextHAlign::Right)
        .collect();
    assert_eq!(right_labels.len(), right.unit_label().labels().len());
    assert!(right_labels.iter().all(|text| text.x == 296.0));
    assert_eq!(right.unit_label().unit(), "KB");
    assert_eq!(frame.lines_with_role(LineRole::Series).count(), 20 + 1);
}

#[test]
fn shared_max_aggregates_visible_series_and_floors_at_zero() {
    let drawer = CanvasDrawer::new(build_config());
    let window = QueryWindow::for_view(0.0, 100.0, 0.0, 300.0, 15).expect("window");

    let mut sub_chart = percent_sub_chart(Alignment::Left);
    let mut negative = DataSeries::new("delta", SERIES_COLOR);
    negative.add_data_point(-4.0, 0.0);
    sub_chart.add_data_series(negative);
    assert_eq!(drawer.shared_max_value(&mut sub_chart, window), 0.0);

    let mut hidden = DataSeries::new("hidden", SERIES_COLOR);
    hidden.add_data_point(500.0, 0.0);
    hidden.set_visible(false);
    sub_chart.add_data_series(hidden);
    let mut user = DataSeries::new("user", SERIES_COLOR);
    user.add_data_point(30.0, 0.0);
    sub_chart.add_data_series(user);
    assert_eq!(drawer.shared_max_value(&mut sub_chart, window), 30.0);

    let pinned = CanvasDrawer::new(build_config().with_max_value_override(Some(80.0)));
    assert_eq!(pinned.shared_max_value(&mut sub_chart, window), 80.0);
}

#[test]
fn max_value_override_setter_validates() {
    let mut drawer = CanvasDrawer::new(build_config());
    assert!(drawer.set_max_value_override(Some(-1.0)).is_err());
    assert_eq!(drawer.config().max_value_override, None);
    drawer
        .set_max_value_override(Some(10.0))
        .expect("valid override");
    assert_eq!(drawer.config().max_value_override, Some(10.0));
}
