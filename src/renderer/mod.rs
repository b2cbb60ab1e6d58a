//! Chart renderer — turns a chart into a scrolling vertical layout.
//!
//! Time runs bottom-up: the chart start sits at the bottom edge of the
//! track and every timestamp is placed `TimeMap::offset` pixels above it.
//! All geometry is computed here; pixels are the canvas backend's job.

pub mod canvas;
mod constants;
mod notes;
mod svg_builder;

use std::collections::HashSet;

use crate::analysis::{compute_coincidences, compute_gridlines, compute_subdivisions};
use crate::config::RenderConfig;
use crate::error::Result;
use crate::model::{Chart, Note};
use crate::pager::tile;
use crate::timemap::{speed_segments, TimeMap};
use canvas::{Canvas, TextAnchor};
use constants::*;
use notes::render_notes;

pub use constants::PAGE_BACKGROUND;
pub use svg_builder::SvgBuilder;

// ═══════════════════════════════════════════════════════════════════════
// Layout
// ═══════════════════════════════════════════════════════════════════════

/// Dimensions of the full, unpaged layout.
#[derive(Debug, Clone)]
pub struct ChartLayout {
    /// Height of the note track: the last note's offset plus one pixel
    pub track_height: u32,
    /// Full canvas width including horizontal margins
    pub width: u32,
    /// Full canvas height including vertical margins
    pub height: u32,
    time_map: TimeMap,
}

impl ChartLayout {
    pub fn compute(chart: &Chart, config: &RenderConfig) -> Self {
        let time_map = TimeMap::new(chart, config);
        let track_height = time_map.offset(chart.max_time()).floor() as u32 + 1;
        Self {
            track_height,
            width: (config.track_width + config.width_extra).ceil() as u32,
            height: (track_height as f64 + config.height_extra).ceil() as u32,
            time_map,
        }
    }

    pub fn time_map(&self) -> &TimeMap {
        &self.time_map
    }

    fn track<'a>(&'a self, config: &'a RenderConfig) -> Track<'a> {
        Track {
            config,
            map: &self.time_map,
            left: config.width_extra / 2.0,
            top: config.height_extra / 2.0,
            width: config.track_width,
            height: self.track_height as f64,
        }
    }

    /// Issue every draw command for the chart onto `canvas`.
    pub fn draw(&self, chart: &Chart, config: &RenderConfig, canvas: &mut dyn Canvas) {
        let track = self.track(config);
        let right = track.left + track.width;

        // Speed change hint bands
        for segment in speed_segments(chart, config) {
            if segment.raw_scale != 1.0 {
                canvas.rect(track.left, track.y(segment.end), right, track.y(segment.start), &SPEED_BAND);
            }
        }

        // Measure gridlines
        for time in compute_gridlines(chart) {
            let y = track.y(time);
            canvas.line((track.left, y), (right, y), &GRIDLINE);
        }

        // Connectors across simultaneous notes
        let groups = compute_coincidences(chart.notes());
        for group in &groups {
            let y = track.y(group.time);
            let (start, end) = group.span();
            canvas.line((track.x(start), y), (track.x(end), y), &COINCIDENCE_LINE);
        }

        let coincident: HashSet<u64> = groups.iter().map(|g| (g.time + 0.0).to_bits()).collect();
        render_notes(canvas, chart, &track, &|t: f64| coincident.contains(&(t + 0.0).to_bits()));

        // Subdivision labels on the right margin
        for label in compute_subdivisions(chart) {
            let y = track.y(label.time) + LABEL_DESCENT;
            canvas.text(right + LABEL_GAP, y, &label.division.to_string(), LABEL_SIZE, TextAnchor::Start, &LABEL_TEXT);
        }

        // Speed labels on the left margin
        for change in chart.speed_changes() {
            let y = track.y(change.time) + LABEL_DESCENT;
            let text = format!("{}x", general_format(change.time_scale));
            canvas.text(track.left - LABEL_GAP, y, &text, LABEL_SIZE, TextAnchor::End, &LABEL_TEXT);
        }

        // Track boundaries
        let (top, bottom) = (track.top, track.top + track.height);
        canvas.line((track.left, top), (track.left, bottom), &BOUNDARY_LINE);
        canvas.line((right, top), (right, bottom), &BOUNDARY_LINE);
    }
}

/// Placement of the note track inside the full canvas.
struct Track<'a> {
    config: &'a RenderConfig,
    map: &'a TimeMap,
    left: f64,
    top: f64,
    width: f64,
    height: f64,
}

impl Track<'_> {
    fn x(&self, position: f64) -> f64 {
        self.left + self.width * self.config.compress_position(position)
    }

    fn y(&self, time: f64) -> f64 {
        self.top + self.height - self.map.offset(time)
    }

    fn point(&self, note: &Note) -> (f64, f64) {
        (self.x(note.position), self.y(note.time))
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Public API
// ═══════════════════════════════════════════════════════════════════════

/// Render the full layout as one tall SVG, without paging.
pub fn render_layout_to_svg(chart: &Chart, config: &RenderConfig) -> Result<String> {
    config.validate()?;
    let layout = ChartLayout::compute(chart, config);
    let mut svg = SvgBuilder::new(layout.width as f64, layout.height as f64);
    layout.draw(chart, config, &mut svg);
    Ok(svg.build())
}

/// Render a chart and tile it into pages, returning the paged SVG.
pub fn render_chart_to_svg(chart: &Chart, config: &RenderConfig) -> Result<String> {
    config.validate()?;
    let layout = ChartLayout::compute(chart, config);
    let mut svg = SvgBuilder::new(layout.width as f64, layout.height as f64);
    layout.draw(chart, config, &mut svg);

    let plan = tile(layout.height, layout.width, config.page_height)?;
    log::info!(
        "rendered {} draw commands into {} page(s) of {}x{}",
        svg.element_count(),
        plan.page_count,
        layout.width,
        config.page_height
    );
    Ok(svg.build_paged(&plan, PAGE_BACKGROUND))
}

/// Six significant digits with trailing zeros dropped, switching to
/// exponent form below 1e-4 and from 1e6 up (`1.5`, `4`, `1e-05`).
fn general_format(x: f64) -> String {
    if !x.is_finite() {
        return if x.is_nan() { "nan".into() } else if x > 0.0 { "inf".into() } else { "-inf".into() };
    }
    if x == 0.0 {
        return "0".into();
    }

    let sci = format!("{x:.5e}");
    let (mantissa, exp) = match sci.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (sci.as_str(), 0),
    };

    if !(-4..6).contains(&exp) {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{}e{sign}{:02}", trim_fraction(mantissa), exp.abs())
    } else {
        let fixed = format!("{x:.*}", (5 - exp) as usize);
        trim_fraction(&fixed).to_string()
    }
}

fn trim_fraction(digits: &str) -> &str {
    if digits.contains('.') {
        digits.trim_end_matches('0').trim_end_matches('.')
    } else {
        digits
    }
}
