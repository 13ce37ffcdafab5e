use chrono::{TimeZone, Utc};
use quote_chart::ChartError;
use quote_chart::core::{
    ContinuousRange, OhlcBar, Padding, PixelBox, Range, RangeOrientation, Sample, Style, Viewport,
    project_candle,
};
use quote_chart::render::Color;
use rust_decimal::Decimal;

#[test]
fn viewport_validation_rejects_empty_sizes() {
    assert!(Viewport::new(1024, 400).validate().is_ok());

    let err = Viewport::new(0, 400).validate().expect_err("zero width");
    assert!(matches!(
        err,
        ChartError::InvalidViewport {
            width: 0,
            height: 400
        }
    ));
}

#[test]
fn pixel_box_shrink_never_crosses_sides() {
    let frame = PixelBox::from_ltrb(0, 0, 40, 40);

    let inner = frame.shrink(Padding::uniform(5));
    assert_eq!(inner, PixelBox::from_ltrb(5, 5, 35, 35));
    assert_eq!(inner.width(), 30);

    let collapsed = frame.shrink(Padding::uniform(30));
    assert_eq!(collapsed.width(), 0);
    assert_eq!(collapsed.height(), 0);
}

#[test]
fn decimal_quotes_convert_to_samples() {
    let timestamp = Utc
        .with_ymd_and_hms(2024, 3, 12, 20, 0, 0)
        .single()
        .expect("valid instant");
    let sample = Sample::from_decimal_quote(
        timestamp,
        Decimal::new(17325, 2),
        1_000,
        Decimal::new(17100, 2),
        Decimal::new(17400, 2),
        Decimal::new(17050, 2),
        Decimal::new(17325, 2),
        true,
    )
    .expect("valid quote");

    assert_eq!(sample.price, 173.25);
    assert_eq!(sample.low, 170.5);
    assert!(sample.is_historical);
}

#[test]
fn ohlc_bar_rejects_inconsistent_prices() {
    let err = OhlcBar::new(0.0, 10.0, 9.0, 11.0, 10.0).expect_err("low above high");
    assert!(matches!(err, ChartError::InvalidData(_)));

    let err = OhlcBar::new(0.0, 12.0, 11.0, 9.0, 10.0).expect_err("open above high");
    assert!(matches!(err, ChartError::InvalidData(_)));

    let err = OhlcBar::new(f64::NAN, 10.0, 11.0, 9.0, 10.0).expect_err("nan time");
    assert!(matches!(err, ChartError::InvalidData(_)));
}

#[test]
fn candle_projection_puts_higher_prices_nearer_the_top() {
    let x_range: Range = ContinuousRange::from_bounds(0.0, 100.0)
        .expect("valid x range")
        .with_orientation(RangeOrientation::LowToHigh)
        .with_domain(100)
        .into();
    let y_range: Range = ContinuousRange::from_bounds(0.0, 100.0)
        .expect("valid y range")
        .with_orientation(RangeOrientation::HighToLow)
        .with_domain(100)
        .into();
    let bar = OhlcBar::new(50.0, 40.0, 80.0, 20.0, 60.0).expect("valid bar");

    let geometry = project_candle(bar, &x_range, &y_range, 10, 5, 6);

    assert_eq!(geometry.center_x, 60);
    assert_eq!((geometry.body_left, geometry.body_right), (57, 63));
    assert_eq!((geometry.body_top, geometry.body_bottom), (45, 65));
    assert_eq!((geometry.wick_top, geometry.wick_bottom), (25, 85));
    assert!(geometry.is_bullish);
}

#[test]
fn style_inherits_only_unset_fields() {
    let defaults = Style::default()
        .with_stroke_color(Color::BLACK)
        .with_font_size(12.0);
    let own = Style::default().with_stroke_color(Color::WHITE);

    let merged = own.inherit_from(&defaults);
    assert_eq!(merged.stroke_color, Color::WHITE);
    assert_eq!(merged.font_size(), 12.0);
    assert_eq!(merged.stroke_width(), 1.0);
    assert!(merged.show);
}

#[cfg(not(feature = "telemetry"))]
#[test]
fn default_tracing_is_a_no_op_without_the_feature() {
    assert!(!quote_chart::telemetry::init_default_tracing());
}
