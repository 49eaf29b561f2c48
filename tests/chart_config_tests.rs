use telemetry_chart::ChartError;
use telemetry_chart::api::{
    ChartConfig, DEFAULT_MAX_SCALE_MS_PER_PX, DEFAULT_MIN_SCALE_MS_PER_PX, DEFAULT_SAMPLE_RATE_PX,
    DEFAULT_SCALE_MS_PER_PX, DEFAULT_TEXT_SIZE_PX, DEFAULT_ZOOM_RATE,
};
use telemetry_chart::core::Viewport;
use telemetry_chart::render::Color;

#[test]
fn defaults_are_valid() {
    let config = ChartConfig::new(Viewport::new(600, 300));
    config.validate().expect("defaults");

    assert_eq!(config.sample_rate_px, DEFAULT_SAMPLE_RATE_PX);
    assert_eq!(config.text_size_px, DEFAULT_TEXT_SIZE_PX);
    assert_eq!(config.default_scale, DEFAULT_SCALE_MS_PER_PX);
    assert_eq!(config.min_scale, DEFAULT_MIN_SCALE_MS_PER_PX);
    assert_eq!(config.max_scale, DEFAULT_MAX_SCALE_MS_PER_PX);
    assert_eq!(config.zoom_rate, DEFAULT_ZOOM_RATE);
    assert_eq!(config.max_value_override, None);
    assert_eq!(config.graph_width_px(), 600.0);
    assert_eq!(config.graph_height_px(), 300.0 - 2.0 * DEFAULT_TEXT_SIZE_PX);
}

#[test]
fn json_fills_missing_fields_with_defaults() {
    let config = ChartConfig::from_json_str(
        r#"{ "viewport": { "width": 800, "height": 400 }, "sample_rate_px": 10 }"#,
    )
    .expect("parse config");

    assert_eq!(config.viewport, Viewport::new(800, 400));
    assert_eq!(config.sample_rate_px, 10);
    assert_eq!(config.default_scale, DEFAULT_SCALE_MS_PER_PX);
}

#[test]
fn json_round_trip_preserves_config() {
    let config = ChartConfig::new(Viewport::new(640, 360))
        .with_sample_rate_px(8)
        .with_scale(50.0, 5.0, 5_000.0)
        .with_zoom_rate(2.0)
        .with_max_value_override(Some(100.0))
        .with_colors(Color::rgb(0.5, 0.5, 0.5), Color::rgb(0.0, 0.0, 0.0));

    let json = config.to_json_pretty().expect("serialize");
    let restored = ChartConfig::from_json_str(&json).expect("parse");
    assert_eq!(restored, config);
}

#[test]
fn malformed_json_reports_json_error() {
    let err = ChartConfig::from_json_str("{ not json").expect_err("must fail");
    assert!(matches!(err, ChartError::Json(_)));
}

#[test]
fn invalid_configs_are_rejected() {
    let base = ChartConfig::new(Viewport::new(600, 300));

    let viewport = ChartConfig::new(Viewport::new(0, 300));
    assert!(matches!(
        viewport.validate(),
        Err(ChartError::InvalidViewport { .. })
    ));

    for config in [
        base.with_sample_rate_px(0),
        base.with_text_size_px(0.0),
        base.with_line_width_px(f64::NAN),
        base.with_scale(10.0, 20.0, 100.0),
        base.with_scale(1_000.0, 1.0, 100.0),
        base.with_scale(-1.0, -2.0, 100.0),
        base.with_zoom_rate(1.0),
        base.with_max_value_override(Some(0.0)),
        base.with_colors(Color::rgb(2.0, 0.0, 0.0), Color::rgb(0.0, 0.0, 0.0)),
        ChartConfig::new(Viewport::new(600, 20)),
    ] {
        assert!(
            matches!(config.validate(), Err(ChartError::InvalidConfig(_))),
            "{config:?} should be rejected"
        );
    }
}
