use chrono::{Duration, TimeZone, Utc};
use criterion::{Criterion, criterion_group, criterion_main};
use quote_chart::core::math::{exponential_smoothing, polynomial_fit, windowed_mean_std};
use quote_chart::core::primitives::datetime_to_unix_seconds;
use quote_chart::core::{ContinuousRange, DataPoint, MarketHoursRange, MarketSession};
use quote_chart::render::RecordingRenderer;
use quote_chart::series::{MacdComputation, MacdParams, PriceSeries, Series};
use quote_chart::{ChartRequest, OutputFormat};
use std::hint::black_box;

fn synthetic_prices(count: usize) -> Vec<f64> {
    (0..count)
        .map(|i| {
            let t = i as f64;
            100.0 + (t * 0.05).sin() * 8.0 + t * 0.01
        })
        .collect()
}

fn bench_continuous_translate(c: &mut Criterion) {
    let range = ContinuousRange::from_bounds(0.0, 10_000.0)
        .expect("valid range")
        .with_domain(1920);

    c.bench_function("continuous_range_translate", |b| {
        b.iter(|| black_box(range.translate(black_box(4_321.123))))
    });
}

fn bench_market_hours_translate_month(c: &mut Criterion) {
    let min = Utc
        .with_ymd_and_hms(2024, 2, 1, 14, 30, 0)
        .single()
        .expect("valid min");
    let max = min + Duration::days(30);
    let range = MarketHoursRange::new(min, max, MarketSession::nyse())
        .expect("valid range")
        .with_domain(1920);
    let instant = datetime_to_unix_seconds(min + Duration::days(17));

    c.bench_function("market_hours_translate_month", |b| {
        b.iter(|| black_box(range.translate(black_box(instant))))
    });
}

fn bench_indicator_kernels_10k(c: &mut Criterion) {
    let prices = synthetic_prices(10_000);

    c.bench_function("bollinger_mean_std_10k", |b| {
        b.iter(|| windowed_mean_std(black_box(&prices), black_box(20)))
    });
    c.bench_function("ema_10k", |b| {
        b.iter(|| exponential_smoothing(black_box(&prices), black_box(0.1)))
    });
    c.bench_function("polynomial_fit_degree3_1k", |b| {
        b.iter(|| polynomial_fit(black_box(&prices[..1_000]), black_box(3)).expect("fit"))
    });
}

fn bench_macd_10k(c: &mut Criterion) {
    let points = synthetic_prices(10_000)
        .into_iter()
        .enumerate()
        .map(|(i, y)| DataPoint::new(i as f64 * 60.0, y))
        .collect();
    let price: Series = PriceSeries::from_points("BENCH", points)
        .expect("valid points")
        .into();

    c.bench_function("macd_computation_10k", |b| {
        b.iter(|| {
            MacdComputation::new(black_box(price.clone()), MacdParams::default()).expect("macd")
        })
    });
}

fn bench_chart_render_recording_2k(c: &mut Criterion) {
    let start = Utc
        .with_ymd_and_hms(2020, 1, 2, 21, 0, 0)
        .single()
        .expect("valid start");
    let samples: Vec<_> = synthetic_prices(2_000)
        .into_iter()
        .enumerate()
        .map(|(i, price)| quote_chart::core::Sample::new(start + Duration::days(i as i64), price))
        .collect();
    let request = ChartRequest {
        format: OutputFormat::Svg,
        use_sma: true,
        use_bollinger: true,
        use_macd: true,
        ..ChartRequest::default()
    };
    let chart = request.build("BENCH", &samples, None).expect("valid chart");

    c.bench_function("chart_render_recording_2k", |b| {
        b.iter(|| {
            let mut recorder = RecordingRenderer::new();
            chart.render_with(&mut recorder).expect("render")
        })
    });
    c.bench_function("chart_render_svg_2k", |b| {
        b.iter(|| chart.render(OutputFormat::Svg).expect("render"))
    });
}

criterion_group!(
    benches,
    bench_continuous_translate,
    bench_market_hours_translate_month,
    bench_indicator_kernels_10k,
    bench_macd_10k,
    bench_chart_render_recording_2k
);
criterion_main!(benches);
