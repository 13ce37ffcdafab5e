use proptest::prelude::*;
use quote_chart::core::math::{exponential_smoothing, windowed_means};
use quote_chart::core::{ContinuousRange, RangeOrientation};

proptest! {
    #[test]
    fn low_to_high_translate_is_monotonic_and_bounded(
        min in -1_000_000.0f64..1_000_000.0,
        span in 0.001f64..1_000_000.0,
        a in 0.0f64..1.0,
        b in 0.0f64..1.0,
        domain in 1i32..4096,
    ) {
        let max = min + span;
        let range = ContinuousRange::from_bounds(min, max)
            .expect("valid range")
            .with_orientation(RangeOrientation::LowToHigh)
            .with_domain(domain);
        let (low, high) = if a <= b { (a, b) } else { (b, a) };

        let low_px = range.translate(min + span * low);
        let high_px = range.translate(min + span * high);

        prop_assert!(low_px <= high_px);
        prop_assert!(low_px >= 0);
        prop_assert!(high_px <= domain);
    }

    #[test]
    fn high_to_low_translate_is_antitonic(
        min in -1_000_000.0f64..1_000_000.0,
        span in 0.001f64..1_000_000.0,
        a in 0.0f64..1.0,
        b in 0.0f64..1.0,
        domain in 1i32..4096,
    ) {
        let range = ContinuousRange::from_bounds(min, min + span)
            .expect("valid range")
            .with_domain(domain);
        let (low, high) = if a <= b { (a, b) } else { (b, a) };

        prop_assert!(range.translate(min + span * low) >= range.translate(min + span * high));
    }

    #[test]
    fn windowed_means_stay_within_input_bounds(
        values in prop::collection::vec(-1_000.0f64..1_000.0, 1..64),
        period in 1usize..32,
    ) {
        let means = windowed_means(&values, period);
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        prop_assert_eq!(means.len(), values.len());
        for mean in means {
            prop_assert!(mean >= min - 1e-9 && mean <= max + 1e-9);
        }
    }

    #[test]
    fn exponential_smoothing_starts_at_the_first_value(
        values in prop::collection::vec(-1_000.0f64..1_000.0, 1..64),
        sigma in 0.01f64..1.0,
    ) {
        let smoothed = exponential_smoothing(&values, sigma);
        prop_assert_eq!(smoothed.len(), values.len());
        prop_assert_eq!(smoothed[0], values[0]);
    }
}
