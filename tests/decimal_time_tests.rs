use chrono::DateTime;
use rust_decimal::Decimal;
use telemetry_chart::core::{DataPoint, DataSeries};
use telemetry_chart::render::Color;

#[test]
fn decimal_sample_converts_to_millisecond_point() {
    let time = DateTime::from_timestamp_millis(1_700_000_000_123).expect("timestamp");
    let point = DataPoint::from_decimal_at(Decimal::new(1234, 2), time).expect("point");

    assert!((point.value - 12.34).abs() <= 1e-12);
    assert_eq!(point.time, 1_700_000_000_123.0);
    assert!(point.is_finite());
}

#[test]
fn decimal_points_feed_a_series() {
    let mut series = DataSeries::new("battery", Color::rgb(0.0, 0.5, 0.0));
    for (seconds, percent) in [(0, 9950), (1, 9900), (2, 9875)] {
        let time = DateTime::from_timestamp(1_700_000_000 + seconds, 0).expect("timestamp");
        let point = DataPoint::from_decimal_at(Decimal::new(percent, 2), time).expect("point");
        series.add_data_point(point.value, point.time);
    }

    assert_eq!(series.len(), 3);
    let start = 1_700_000_000_000.0;
    let values = series.get_displayed_values(start, 1_000.0, 3).to_vec();
    assert_eq!(values, vec![Some(99.5), Some(99.0), Some(98.75)]);
}
