use quote_chart::ChartError;
use quote_chart::core::{ContinuousRange, Range, RangeOrientation};

#[test]
fn high_to_low_range_maps_max_to_top_and_min_to_bottom() {
    let range = ContinuousRange::from_bounds(10.0, 110.0)
        .expect("valid range")
        .with_domain(400);

    assert_eq!(range.orientation(), RangeOrientation::HighToLow);
    assert_eq!(range.translate(110.0), 0);
    assert_eq!(range.translate(10.0), 400);
    assert_eq!(range.translate(60.0), 200);
}

#[test]
fn low_to_high_range_maps_min_to_left_and_max_to_right() {
    let range = ContinuousRange::from_bounds(0.0, 50.0)
        .expect("valid range")
        .with_orientation(RangeOrientation::LowToHigh)
        .with_domain(1000);

    assert_eq!(range.translate(0.0), 0);
    assert_eq!(range.translate(50.0), 1000);
    assert_eq!(range.translate(12.5), 250);
}

#[test]
fn degenerate_range_maps_everything_to_the_middle() {
    let range = ContinuousRange::from_bounds(42.0, 42.0)
        .expect("degenerate range is allowed")
        .with_domain(300);

    assert_eq!(range.translate(42.0), 150);
    assert_eq!(range.translate(-1.0e6), 150);
    assert!(Range::from(range).is_degenerate());
}

#[test]
fn continuous_range_fits_min_and_max_from_values() {
    let range = ContinuousRange::new_continuous(&[3.0, -2.0, 8.5, 1.0]).expect("valid values");

    assert_eq!(range.min(), -2.0);
    assert_eq!(range.max(), 8.5);
    assert_eq!(range.delta(), 10.5);
}

#[test]
fn continuous_range_rejects_empty_values() {
    let err = ContinuousRange::new_continuous(&[]).expect_err("empty values must fail");
    assert!(matches!(err, ChartError::EmptySeries(_)));
}

#[test]
fn continuous_range_rejects_non_finite_values() {
    let err = ContinuousRange::new_continuous(&[1.0, f64::NAN]).expect_err("nan must fail");
    assert!(matches!(err, ChartError::InvalidData(_)));

    let err = ContinuousRange::from_bounds(0.0, f64::INFINITY).expect_err("inf must fail");
    assert!(matches!(err, ChartError::InvalidData(_)));
}

#[test]
fn continuous_range_rejects_inverted_bounds() {
    let err = ContinuousRange::from_bounds(5.0, 1.0).expect_err("max < min must fail");
    assert!(matches!(err, ChartError::InvalidData(_)));
}

#[test]
fn range_enum_forwards_domain_updates() {
    let mut range: Range = ContinuousRange::from_bounds(0.0, 10.0)
        .expect("valid range")
        .into();
    range.set_domain(100);

    assert_eq!(range.domain(), 100);
    assert_eq!(range.translate(10.0), 0);
    assert_eq!(range.translate(0.0), 100);
    assert!(!range.is_degenerate());
}
