//! Rendering tests — parse the sample chart and render it to SVG.

use chartstrip::{
    chart_summary_json, parse_chart_file, render_chart_to_svg, render_file_to_svg,
    render_layout_to_svg, summarize, ChartLayout, RenderConfig,
};
use std::path::PathBuf;

fn charts_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("charts")
}

fn output_dir() -> PathBuf {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("test_output");
    std::fs::create_dir_all(&dir).ok();
    dir
}

#[test]
fn render_demo_svg() {
    let path = charts_dir().join("demo.json");
    let svg = render_file_to_svg(&path, &RenderConfig::default()).expect("Failed to render demo");

    // Basic SVG structure checks
    assert!(svg.starts_with("<svg"), "Output should be SVG");
    assert!(svg.contains("</svg>"), "SVG should be closed");

    // 3300 px of scroll + 1 + 100 px margin = 3401 px, two 3000 px pages
    assert!(svg.contains(r#"viewBox="0 0 1200 3000""#), "SVG should be two pages wide");
    assert_eq!(svg.matches("<use href=\"#layout\"/>").count(), 2);

    // Notes, links and labels
    assert!(svg.contains("rx=\"10.0\""), "SVG should contain tap notes");
    assert!(svg.contains("stroke-dasharray"), "SVG should contain chain links");
    assert!(svg.contains(">1.5x</text>"), "SVG should label speed changes");
    assert!(svg.contains(">4x</text>"), "Speed labels show the written scale");
    assert!(svg.contains(">8</text>"), "SVG should label eighth subdivisions");

    let out = output_dir().join("demo.svg");
    std::fs::write(&out, &svg).expect("Failed to write SVG");
    println!("✓ Rendered demo.svg ({} bytes)", svg.len());
    println!("  Output: {}", out.display());
}

#[test]
fn demo_layout_dimensions() {
    let chart = parse_chart_file(charts_dir().join("demo.json")).unwrap();
    let config = RenderConfig::default();
    let layout = ChartLayout::compute(&chart, &config);

    // 2s at 1.0, 3s at 1.5, 1.5s clamped to 2.0, 1.5s at 1.0 = 11s of scroll
    assert_eq!(layout.track_height, 3301);
    assert_eq!((layout.width, layout.height), (600, 3401));
}

#[test]
fn unpaged_layout_keeps_full_height() {
    let chart = parse_chart_file(charts_dir().join("demo.json")).unwrap();
    let svg = render_layout_to_svg(&chart, &RenderConfig::default()).unwrap();
    assert!(svg.contains(r#"viewBox="0 0 600 3401""#));
    assert!(!svg.contains("<use"));
}

#[test]
fn smaller_pages_produce_more_tiles() {
    let chart = parse_chart_file(charts_dir().join("demo.json")).unwrap();
    let config = RenderConfig {
        page_height: 1000,
        ..Default::default()
    };
    let svg = render_chart_to_svg(&chart, &config).unwrap();
    assert_eq!(svg.matches("<use href=\"#layout\"/>").count(), 4);
    assert!(svg.contains(r#"viewBox="0 0 2400 1000""#));
}

#[test]
fn demo_summary() {
    let chart = parse_chart_file(charts_dir().join("demo.json")).unwrap();
    let summary = summarize(&chart, &RenderConfig::default()).unwrap();

    let times: Vec<f64> = summary.coincidences.iter().map(|c| c.time).collect();
    assert_eq!(times, vec![0.0, 2.0, 7.0]);
    assert_eq!(summary.coincidences[1].positions, vec![0.2, 0.7]);

    assert_eq!(&summary.gridlines[..2], &[2.0, 4.0]);
    assert!(summary.gridlines.windows(2).all(|w| w[0] < w[1]));

    // The 180 bpm tempo governs the gap right after its own timestamp.
    assert!(summary
        .subdivisions
        .iter()
        .any(|s| s.time == 4.0 && s.division == 4));
    assert_eq!(summary.subdivisions[0].division, 4);

    let clamped = &summary.speed_segments[1];
    assert_eq!((clamped.raw_scale, clamped.scale), (4.0, 2.0));
    assert_eq!(summary.pages.page_count, 2);

    let json = chart_summary_json(charts_dir().join("demo.json"), &RenderConfig::default()).unwrap();
    assert!(json.contains("\"speed_segments\""));
}
