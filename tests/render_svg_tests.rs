use quote_chart::ChartError;
use quote_chart::chart::{Annotation, LegendEntry, draw_annotation, draw_legend, measure_annotation};
use quote_chart::core::{PixelBox, Style};
use quote_chart::render::{
    Color, PathOp, RecordedCommand, RecordingRenderer, Renderer, SvgRenderer, estimate_text_box,
};

#[test]
fn hex_colors_parse_in_short_long_and_alpha_forms() {
    assert_eq!(Color::from_hex("#fff").expect("short"), Color::WHITE);
    assert_eq!(
        Color::from_hex("0074d9").expect("long").to_rgba8(),
        [0x00, 0x74, 0xd9, 0xff]
    );
    assert_eq!(
        Color::from_hex("#ff413680").expect("alpha").to_rgba8(),
        [0xff, 0x41, 0x36, 0x80]
    );

    let err = Color::from_hex("#12345").expect_err("five digits");
    assert!(matches!(err, ChartError::InvalidData(_)));
    let err = Color::from_hex("zzzzzz").expect_err("not hex");
    assert!(matches!(err, ChartError::InvalidData(_)));
}

#[test]
fn color_css_keeps_alpha_as_a_fraction() {
    assert_eq!(Color::from_rgb8(255, 0, 0).to_css(), "rgba(255,0,0,1.0)");
    assert_eq!(Color::TRANSPARENT.to_css(), "rgba(0,0,0,0.0)");
    assert!(Color::TRANSPARENT.is_zero());
    assert!(!Color::BLACK.is_zero());
}

#[test]
fn text_estimate_counts_narrow_glyphs_as_half_width() {
    assert_eq!(estimate_text_box("WWWW", 10.0).width, 24);
    assert_eq!(estimate_text_box("iiii", 10.0).width, 12);
    assert_eq!(estimate_text_box("", 10.0).height, 0);
    assert_eq!(estimate_text_box("x", 10.5).height, 11);
}

#[test]
fn svg_document_carries_paths_and_escaped_text() {
    let mut renderer = SvgRenderer::new(200, 100);
    renderer.set_stroke_color(Color::from_rgb8(0, 116, 217));
    renderer.set_stroke_width(2.0);
    renderer.set_dash_array(&[5.0, 5.0]);
    renderer.move_to(0, 50);
    renderer.line_to(200, 50);
    renderer.stroke().expect("stroke");

    renderer.set_font_color(Color::BLACK);
    renderer.text("P&L <USD>", 10, 20).expect("text");

    let document = String::from_utf8(renderer.finish().expect("finish")).expect("utf-8");
    assert!(document.starts_with(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"200\" height=\"100\" viewBox=\"0 0 200 100\">"
    ));
    assert!(document.contains(
        "<path d=\"M 0 50 L 200 50\" style=\"stroke:rgba(0,116,217,1.0);stroke-width:2;stroke-dasharray:5,5;fill:none\"/>"
    ));
    assert!(document.contains(">P&amp;L &lt;USD&gt;</text>"));
}

#[test]
fn svg_renderer_refuses_work_after_finish() {
    let mut renderer = SvgRenderer::new(10, 10);
    renderer.finish().expect("first finish");

    let err = renderer.finish().expect_err("second finish must fail");
    assert!(matches!(err, ChartError::RenderBackend(_)));
    let err = renderer.text("late", 0, 0).expect_err("text after finish");
    assert!(matches!(err, ChartError::RenderBackend(_)));
}

#[test]
fn draw_box_closes_a_rectangle_and_fills_it() {
    let mut recorder = RecordingRenderer::new();
    recorder.set_fill_color(Color::WHITE);
    recorder
        .draw_box(PixelBox::from_ltrb(1, 2, 11, 22))
        .expect("box");

    assert_eq!(
        recorder.commands(),
        &[RecordedCommand::FillStroke {
            path: vec![
                PathOp::MoveTo { x: 1, y: 2 },
                PathOp::LineTo { x: 11, y: 2 },
                PathOp::LineTo { x: 11, y: 22 },
                PathOp::LineTo { x: 1, y: 22 },
                PathOp::Close,
            ],
            fill: Color::WHITE,
            stroke: Color::default(),
            width: 1.0,
        }]
    );
}

#[test]
fn annotation_box_hangs_right_of_its_anchor() {
    let mut recorder = RecordingRenderer::new();
    let style = Style::default().with_stroke_color(Color::BLACK);

    // "129.00" is 33px wide and 10px tall at the default size.
    let bounds = measure_annotation(&mut recorder, &style, 100, 50, "129.00");
    assert_eq!(bounds, PixelBox::from_ltrb(100, 40, 100 + 10 + 33 + 10, 60));

    draw_annotation(&mut recorder, &style, 100, 50, "129.00").expect("annotation");
    assert_eq!(recorder.texts().last(), Some(("129.00", 115, 55)));
}

#[test]
fn annotation_round_trips_through_json() {
    let annotation = Annotation::new(1.5, 2.5, "last");
    let json = serde_json::to_string(&annotation).expect("serialize");
    let parsed: Annotation = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(parsed, annotation);
}

#[test]
fn legend_draws_one_row_per_entry() {
    let mut recorder = RecordingRenderer::new();
    let canvas = PixelBox::from_ltrb(20, 30, 400, 300);
    let entries = vec![
        LegendEntry {
            label: "AAPL".to_owned(),
            style: Style::default().with_stroke_color(Color::from_rgb8(0, 116, 217)),
        },
        LegendEntry {
            label: "AAPL - SMA(16)".to_owned(),
            style: Style::default().with_stroke_color(Color::from_rgb8(255, 65, 54)),
        },
    ];

    draw_legend(&mut recorder, canvas, &Style::default(), &entries).expect("legend");

    let labels: Vec<&str> = recorder.texts().map(|(body, _, _)| body).collect();
    assert_eq!(labels, vec!["AAPL", "AAPL - SMA(16)"]);
    let swatches = recorder
        .commands()
        .iter()
        .filter(|command| matches!(command, RecordedCommand::Stroke { path, .. } if path.len() == 2))
        .count();
    assert_eq!(swatches, 2);
}

#[test]
fn hidden_legend_draws_nothing() {
    let mut recorder = RecordingRenderer::new();
    let entries = vec![LegendEntry {
        label: "AAPL".to_owned(),
        style: Style::default(),
    }];

    draw_legend(
        &mut recorder,
        PixelBox::from_ltrb(0, 0, 100, 100),
        &Style::hidden(),
        &entries,
    )
    .expect("legend");
    assert!(recorder.commands().is_empty());
}
