use chrono::{Duration, TimeZone, Utc};
use quote_chart::axis::{Axis, date_value_formatter, percent_value_formatter};
use quote_chart::core::default_palette;
use quote_chart::core::palette::DEFAULT_FONT_FAMILY;
use quote_chart::core::{ContinuousRange, HolidayPredicate, MarketSession, Padding, Sample, Style};
use quote_chart::render::{Color, PathOp, RecordedCommand, RecordingRenderer, Renderer};
use quote_chart::series::{PriceSeries, Series};
use quote_chart::{Chart, ChartError, ChartRequest, OutputFormat, TimeframeClass};

fn daily_samples(count: usize, first_price: f64) -> Vec<Sample> {
    let start = Utc
        .with_ymd_and_hms(2024, 1, 2, 21, 0, 0)
        .single()
        .expect("valid start");
    (0..count)
        .map(|index| {
            Sample::new(
                start + Duration::days(index as i64),
                first_price + index as f64,
            )
        })
        .collect()
}

fn svg_request() -> ChartRequest {
    ChartRequest {
        format: OutputFormat::Svg,
        ..ChartRequest::default()
    }
}

#[test]
fn price_line_plots_every_sample() {
    let samples = daily_samples(30, 100.0);
    let chart = svg_request()
        .build("AAPL", &samples, None)
        .expect("valid chart");

    let mut recorder = RecordingRenderer::new();
    chart.render_with(&mut recorder).expect("render succeeds");

    let stroke = default_palette().series_stroke(0);
    let price_paths: Vec<&[PathOp]> = recorder
        .strokes_with_color(stroke)
        .filter(|path| path.len() == 30)
        .collect();
    assert_eq!(price_paths.len(), 1);
    assert!(matches!(price_paths[0][0], PathOp::MoveTo { .. }));
    assert!(
        price_paths[0][1..]
            .iter()
            .all(|op| matches!(op, PathOp::LineTo { .. }))
    );
}

#[test]
fn last_value_label_sits_right_of_the_last_point() {
    let samples = daily_samples(30, 100.0);
    let chart = svg_request()
        .build("AAPL", &samples, None)
        .expect("valid chart");

    let layout = chart
        .layout(&mut RecordingRenderer::new())
        .expect("valid layout");
    let last = samples.last().expect("samples");
    let point_x = layout.canvas.left + layout.x_range.translate(last.unix_seconds());
    let point_y = layout.canvas.top + layout.y_range.translate(last.price);

    let mut recorder = RecordingRenderer::new();
    chart.render_with(&mut recorder).expect("render succeeds");

    // Tip at the point, shoulder 10px right, label padded 5px and centred on a 10px line.
    let expected = ("129.00", point_x + 15, point_y + 5);
    assert!(
        recorder.texts().any(|text| text == expected),
        "missing last value label at {expected:?}"
    );
}

#[test]
fn last_value_label_carries_the_name_without_a_legend() {
    let samples = daily_samples(30, 100.0);
    let request = ChartRequest {
        show_legend: false,
        ..svg_request()
    };
    let chart = request.build("AAPL", &samples, None).expect("valid chart");

    let mut recorder = RecordingRenderer::new();
    chart.render_with(&mut recorder).expect("render succeeds");

    assert!(recorder.texts().any(|(body, _, _)| body == "AAPL 129.00"));
}

#[test]
fn layout_keeps_the_canvas_inside_the_padded_frame() {
    let chart = svg_request()
        .build("AAPL", &daily_samples(30, 100.0), None)
        .expect("valid chart");
    let layout = chart
        .layout(&mut RecordingRenderer::new())
        .expect("valid layout");

    assert_eq!(layout.frame.width(), 1024);
    assert_eq!(layout.frame.height(), 400);
    assert_eq!(layout.content.left, 5);
    assert!(layout.canvas.left >= layout.content.left);
    assert!(layout.canvas.right < layout.content.right);
    assert!(layout.canvas.bottom < layout.content.bottom);
    assert_eq!(layout.x_range.domain(), layout.canvas.width());
    assert_eq!(layout.y_range.domain(), layout.canvas.height());
    assert!(!layout.x_ticks.is_empty());
    assert!(!layout.y_ticks.is_empty());
    assert!(layout.y_range_secondary.is_none());
}

#[test]
fn svg_output_is_deterministic() {
    let chart = svg_request()
        .build("AAPL", &daily_samples(30, 100.0), None)
        .expect("valid chart");

    let first = chart.render(OutputFormat::Svg).expect("first render");
    let second = chart.render(OutputFormat::Svg).expect("second render");

    assert_eq!(first, second);
    assert_eq!(first.content_type(), "image/svg+xml");
    let document = String::from_utf8(first.bytes).expect("utf-8 svg");
    assert!(document.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"1024\""));
    assert!(document.trim_end().ends_with("</svg>"));
    assert!(document.contains(">129.00</text>"));
}

#[test]
fn chart_without_series_is_rejected() {
    let err = Chart::new(800, 400)
        .render(OutputFormat::Svg)
        .expect_err("empty chart must fail");
    assert!(matches!(err, ChartError::EmptySeries(_)));
}

#[test]
fn chart_with_only_hidden_series_is_rejected() {
    let price: Series = PriceSeries::from_samples("AAPL", &daily_samples(5, 10.0))
        .expect("valid series")
        .into();
    let chart = Chart::new(800, 400)
        .with_series(price.with_style(quote_chart::core::Style::hidden()));

    let err = chart
        .render_with(&mut RecordingRenderer::new())
        .expect_err("hidden-only chart must fail");
    assert!(matches!(err, ChartError::EmptySeries(_)));
}

#[test]
fn zero_sized_chart_is_rejected() {
    let price = PriceSeries::from_samples("AAPL", &daily_samples(5, 10.0)).expect("valid series");
    let err = Chart::new(0, 400)
        .with_series(price)
        .render(OutputFormat::Svg)
        .expect_err("zero width must fail");
    assert!(matches!(err, ChartError::InvalidViewport { width: 0, .. }));
}

#[test]
fn padding_larger_than_the_image_is_rejected() {
    let price = PriceSeries::from_samples("AAPL", &daily_samples(5, 10.0)).expect("valid series");
    let err = Chart::new(40, 40)
        .with_series(price)
        .with_padding(Padding::uniform(30))
        .layout(&mut RecordingRenderer::new())
        .expect_err("no room for a canvas");
    assert!(matches!(err, ChartError::InvalidViewport { .. }));
}

#[test]
fn unknown_output_format_is_a_configuration_error() {
    let err = "gif"
        .parse::<OutputFormat>()
        .expect_err("gif is unsupported");
    assert!(matches!(err, ChartError::InvalidConfiguration(_)));
    assert_eq!("SVG".parse::<OutputFormat>().expect("svg"), OutputFormat::Svg);
}

#[cfg(not(feature = "cairo-backend"))]
#[test]
fn png_without_raster_backend_is_a_configuration_error() {
    let price = PriceSeries::from_samples("AAPL", &daily_samples(5, 10.0)).expect("valid series");
    let err = Chart::new(320, 200)
        .with_series(price)
        .render(OutputFormat::Png)
        .expect_err("png needs the raster backend");
    assert!(matches!(err, ChartError::InvalidConfiguration(_)));
}

#[test]
fn recording_renderer_finishes_as_json() {
    let mut recorder = RecordingRenderer::new();
    recorder.move_to(0, 0);
    recorder.line_to(10, 10);
    recorder.stroke().expect("stroke");
    let bytes = recorder.finish().expect("first finish");

    let commands: serde_json::Value = serde_json::from_slice(&bytes).expect("json commands");
    assert_eq!(commands.as_array().map(Vec::len), Some(1));
}

#[test]
fn market_hours_chart_uses_session_ticks() {
    let start = Utc
        .with_ymd_and_hms(2024, 3, 12, 13, 30, 0)
        .single()
        .expect("valid start");
    let samples: Vec<Sample> = (0..=78)
        .map(|index| Sample::new(start + Duration::minutes(5 * index), 170.0 + index as f64 * 0.1))
        .collect();
    let price = PriceSeries::from_samples("MSFT", &samples).expect("valid series");
    let chart = Chart::new(800, 300)
        .with_series(price)
        .with_timeframe(TimeframeClass::MarketHours);

    let layout = chart
        .layout(&mut RecordingRenderer::new())
        .expect("valid layout");

    assert_eq!(layout.x_ticks.len(), 7);
    assert_eq!(layout.x_range.translate(samples[0].unix_seconds()), 0);
    assert_eq!(
        layout.x_range.translate(samples[78].unix_seconds()),
        layout.canvas.width()
    );
}

#[test]
fn legend_lists_visible_series_in_order() {
    let request = ChartRequest {
        use_sma: true,
        use_bollinger: true,
        ..svg_request()
    };
    let chart = request
        .build("AAPL", &daily_samples(40, 50.0), None)
        .expect("valid chart");

    let labels: Vec<String> = chart
        .legend_entries()
        .into_iter()
        .map(|entry| entry.label)
        .collect();
    assert_eq!(
        labels,
        vec!["AAPL - Bol. Bands", "AAPL", "AAPL - SMA(16)"]
    );

    let mut recorder = RecordingRenderer::new();
    chart.render_with(&mut recorder).expect("render succeeds");
    let dashed = recorder.commands().iter().any(|command| {
        matches!(command, RecordedCommand::Stroke { dashes, .. } if dashes == &vec![5.0, 5.0])
    });
    assert!(dashed);
}

#[test]
fn compare_series_is_placed_on_the_secondary_range() {
    let samples = daily_samples(30, 100.0);
    let compare: Vec<Sample> = samples
        .iter()
        .map(|sample| Sample::new(sample.timestamp, sample.price * 10.0 + 500.0))
        .collect();
    let request = ChartRequest {
        show_last_value: false,
        ..svg_request()
    };
    let chart = request
        .build("AAPL", &samples, Some(("MSFT", compare.as_slice())))
        .expect("valid chart");

    let layout = chart
        .layout(&mut RecordingRenderer::new())
        .expect("valid layout");
    let secondary = layout
        .y_range_secondary
        .as_ref()
        .expect("secondary range for the compare series");
    assert_eq!(secondary.min(), 1_500.0);
    assert_eq!(secondary.max(), 1_790.0);

    let mut recorder = RecordingRenderer::new();
    chart.render_with(&mut recorder).expect("render succeeds");
    let compare_paths: Vec<&[PathOp]> = recorder
        .strokes_with_color(default_palette().series_stroke(1))
        .filter(|path| path.len() == compare.len())
        .collect();
    assert_eq!(compare_paths.len(), 1);

    for (op, sample) in compare_paths[0].iter().zip(&compare) {
        let expected_x = layout.canvas.left + layout.x_range.translate(sample.unix_seconds());
        let expected_y = layout.canvas.top + secondary.translate(sample.price);
        let (x, y) = match *op {
            PathOp::MoveTo { x, y } | PathOp::LineTo { x, y } => (x, y),
            PathOp::Close => panic!("line paths are open"),
        };
        assert_eq!((x, y), (expected_x, expected_y));
    }

    // The same prices on the primary range would land elsewhere.
    let last = compare.last().expect("samples");
    assert_ne!(
        layout.y_range.translate(last.price),
        secondary.translate(last.price)
    );
}

#[test]
fn pinned_axes_keep_their_range_formatter_and_style() {
    let accent = Color::rgb(0.2, 0.4, 0.6);
    let price = PriceSeries::from_samples("AAPL", &daily_samples(30, 50.0)).expect("valid series");
    let chart = Chart::new(800, 400)
        .with_series(price)
        .with_legend(false)
        .with_x_axis(
            Axis::new(date_value_formatter).with_style(Style::default().with_font_color(accent)),
        )
        .with_y_axis(
            Axis::default()
                .with_name("Price")
                .with_value_formatter(percent_value_formatter)
                .with_range(ContinuousRange::from_bounds(0.0, 200.0).expect("valid range")),
        )
        .with_y_axis_secondary(
            Axis::default().with_range(ContinuousRange::from_bounds(-1.0, 1.0).expect("valid range")),
        );

    let layout = chart
        .layout(&mut RecordingRenderer::new())
        .expect("valid layout");
    assert_eq!((layout.y_range.min(), layout.y_range.max()), (0.0, 200.0));
    assert!(layout.y_ticks.iter().all(|tick| tick.label.ends_with('%')));
    let secondary = layout
        .y_range_secondary
        .as_ref()
        .expect("pinned secondary range");
    assert_eq!((secondary.min(), secondary.max()), (-1.0, 1.0));
    assert_eq!(
        layout.y_ticks_secondary.last().map(|tick| tick.label.as_str()),
        Some("1.00")
    );

    let mut recorder = RecordingRenderer::new();
    chart.render_with(&mut recorder).expect("render succeeds");
    assert!(recorder.texts().any(|(body, _, _)| body == "Price"));

    let accented: Vec<&str> = recorder
        .commands()
        .iter()
        .filter_map(|command| match command {
            RecordedCommand::Text { body, color, .. } if *color == accent => Some(body.as_str()),
            _ => None,
        })
        .collect();
    assert!(!accented.is_empty());
    assert!(accented.iter().all(|label| label.starts_with("2024-")));

    assert!(recorder.commands().iter().all(|command| match command {
        RecordedCommand::Text { family, .. } => family.as_deref() == Some(DEFAULT_FONT_FAMILY),
        _ => true,
    }));
}

#[test]
fn custom_session_trades_through_an_exchange_holiday() {
    // 2024-01-15 is Martin Luther King Jr. Day; 14:30 UTC is the 09:30 EST open.
    let start = Utc
        .with_ymd_and_hms(2024, 1, 15, 14, 30, 0)
        .single()
        .expect("valid start");
    let samples: Vec<Sample> = (0..=78)
        .map(|index| Sample::new(start + Duration::minutes(5 * index), 150.0 + index as f64 * 0.1))
        .collect();
    let price = PriceSeries::from_samples("SPY", &samples).expect("valid series");
    let chart = Chart::new(800, 300)
        .with_series(price)
        .with_timeframe(TimeframeClass::MarketHours)
        .with_session(MarketSession::nyse().with_holidays(HolidayPredicate::none()));

    let layout = chart
        .layout(&mut RecordingRenderer::new())
        .expect("valid layout");

    assert_eq!(layout.x_ticks.len(), 7);
    assert_eq!(layout.x_range.translate(samples[0].unix_seconds()), 0);
    assert_eq!(
        layout.x_range.translate(samples[78].unix_seconds()),
        layout.canvas.width()
    );
}
