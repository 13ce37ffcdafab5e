#![cfg(feature = "cairo-backend")]

use chrono::{Duration, TimeZone, Utc};
use quote_chart::core::Sample;
use quote_chart::render::{Color, RasterRenderer, Renderer};
use quote_chart::{ChartError, ChartRequest, OutputFormat};

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

#[test]
fn raster_renderer_rejects_invalid_surface_size() {
    let err = RasterRenderer::new(0, 480).expect_err("invalid width must fail");
    assert!(matches!(err, ChartError::InvalidViewport { .. }));
}

#[test]
fn raster_renderer_encodes_png() {
    let mut renderer = RasterRenderer::new(120, 80).expect("renderer");
    renderer.set_stroke_color(Color::BLACK);
    renderer.set_stroke_width(2.0);
    renderer.move_to(10, 10);
    renderer.line_to(110, 70);
    renderer.stroke().expect("stroke");
    renderer.set_font_size(12.0);
    renderer.text("AAPL", 10, 40).expect("text");

    let bytes = renderer.finish().expect("png bytes");
    assert!(bytes.starts_with(&PNG_SIGNATURE));
}

#[test]
fn raster_text_metrics_grow_with_font_size() {
    let mut renderer = RasterRenderer::new(200, 100).expect("renderer");
    renderer.set_font_size(8.0);
    let small = renderer.measure_text("129.00");
    renderer.set_font_size(16.0);
    let large = renderer.measure_text("129.00");

    assert!(small.width > 0 && small.height > 0);
    assert!(large.width > small.width);
    assert!(large.height > small.height);
}

#[test]
fn chart_request_renders_png_end_to_end() {
    let start = Utc
        .with_ymd_and_hms(2024, 1, 2, 21, 0, 0)
        .single()
        .expect("valid start");
    let samples: Vec<Sample> = (0..60)
        .map(|index| Sample::new(start + Duration::days(index), 100.0 + (index as f64).sqrt()))
        .collect();
    let request = ChartRequest {
        width: 640,
        height: 320,
        use_sma: true,
        use_bollinger: true,
        ..ChartRequest::default()
    };

    let rendered = request
        .build("AAPL", &samples, None)
        .expect("valid chart")
        .render(OutputFormat::Png)
        .expect("png render");

    assert_eq!(rendered.content_type(), "image/png");
    assert!(rendered.bytes.starts_with(&PNG_SIGNATURE));
}
