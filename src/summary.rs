//! Analysis summary: every derived structure for one chart in a single
//! serializable value, for tooling and FFI consumers that draw the chart
//! themselves.

use serde::Serialize;

use crate::analysis::{
    compute_coincidences, compute_gridlines, compute_subdivisions, CoincidenceGroup, Subdivision,
};
use crate::config::RenderConfig;
use crate::error::Result;
use crate::model::Chart;
use crate::pager::{tile, TilePlan};
use crate::renderer::ChartLayout;
use crate::timemap::{speed_segments, SpeedSegment};

#[derive(Debug, Clone, Serialize)]
pub struct ChartSummary {
    pub note_count: usize,
    pub max_time: f64,
    /// Measure gridline timestamps
    pub gridlines: Vec<f64>,
    pub coincidences: Vec<CoincidenceJson>,
    pub subdivisions: Vec<SubdivisionJson>,
    pub speed_segments: Vec<SpeedSegmentJson>,
    /// Full layout size before paging
    pub layout_width: u32,
    pub layout_height: u32,
    pub pages: TilePlan,
}

#[derive(Debug, Clone, Serialize)]
pub struct CoincidenceJson {
    pub time: f64,
    /// Positions of the grouped notes, left to right
    pub positions: Vec<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubdivisionJson {
    pub time: f64,
    pub division: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SpeedSegmentJson {
    pub start: f64,
    pub end: f64,
    pub raw_scale: f64,
    pub scale: f64,
}

impl From<&CoincidenceGroup<'_>> for CoincidenceJson {
    fn from(g: &CoincidenceGroup<'_>) -> Self {
        Self {
            time: g.time,
            positions: g.notes.iter().map(|n| n.position).collect(),
        }
    }
}

impl From<&Subdivision> for SubdivisionJson {
    fn from(s: &Subdivision) -> Self {
        Self {
            time: s.time,
            division: s.division,
        }
    }
}

impl From<&SpeedSegment> for SpeedSegmentJson {
    fn from(s: &SpeedSegment) -> Self {
        Self {
            start: s.start,
            end: s.end,
            raw_scale: s.raw_scale,
            scale: s.scale,
        }
    }
}

/// Run every analyzer and the pager planner over `chart`.
pub fn summarize(chart: &Chart, config: &RenderConfig) -> Result<ChartSummary> {
    config.validate()?;
    let layout = ChartLayout::compute(chart, config);
    let pages = tile(layout.height, layout.width, config.page_height)?;

    let coincidences = compute_coincidences(chart.notes())
        .iter()
        .map(CoincidenceJson::from)
        .collect();
    let subdivisions = compute_subdivisions(chart)
        .iter()
        .map(SubdivisionJson::from)
        .collect();
    let speed_segments = speed_segments(chart, config)
        .iter()
        .map(SpeedSegmentJson::from)
        .collect();

    Ok(ChartSummary {
        note_count: chart.notes().len(),
        max_time: chart.max_time(),
        gridlines: compute_gridlines(chart),
        coincidences,
        subdivisions,
        speed_segments,
        layout_width: layout.width,
        layout_height: layout.height,
        pages,
    })
}

/// Convert a summary to a JSON string.
pub fn summary_to_json(summary: &ChartSummary) -> Result<String> {
    Ok(serde_json::to_string_pretty(summary)?)
}
