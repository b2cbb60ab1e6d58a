//! Tempo segments and the measure gridlines derived from them.

use crate::model::Chart;

/// Beats in one measure. Charts are always laid out in 4/4.
pub const BEATS_PER_MEASURE: f64 = 4.0;

/// Length of one 4-beat measure in seconds at `bpm`.
pub fn measure_length(bpm: f64) -> f64 {
    60.0 / bpm * BEATS_PER_MEASURE
}

/// A tempo in effect from `start` until the next segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TempoSegment {
    pub start: f64,
    pub bpm: f64,
}

/// Tempo changes in time order, on top of the chart's base tempo.
#[derive(Debug, Clone)]
pub struct TempoMap {
    base_bpm: f64,
    segments: Vec<TempoSegment>,
}

impl TempoMap {
    pub fn new(chart: &Chart) -> Self {
        let segments = chart
            .tempo_changes()
            .into_iter()
            .map(|n| TempoSegment {
                start: n.time,
                bpm: n.bpm,
            })
            .collect();
        Self {
            base_bpm: chart.base_bpm(),
            segments,
        }
    }

    pub fn segments(&self) -> &[TempoSegment] {
        &self.segments
    }

    /// Tempo governing time `t`. A change at exactly `t` already applies;
    /// of several changes sharing a time, the last one wins.
    pub fn bpm_at(&self, t: f64) -> f64 {
        let idx = self.segments.partition_point(|s| s.start <= t);
        match idx {
            0 => self.base_bpm,
            i => self.segments[i - 1].bpm,
        }
    }
}

/// Measure gridline timestamps, strictly ascending.
///
/// Walks measure by measure at the current tempo. Each tempo change
/// emits its own time as a gridline and switches the step length; the
/// cursor keeps running from the last measure line, it is not moved to
/// the change. Values that would not ascend past the last gridline (a
/// shared boundary, or a faster tempo stepping back under it) are
/// skipped. Gridlines stop short of the chart's last note.
pub fn compute_gridlines(chart: &Chart) -> Vec<f64> {
    let tempo = TempoMap::new(chart);
    let max_time = chart.max_time();

    let mut gridlines: Vec<f64> = Vec::new();
    let mut emit = |t: f64| {
        if gridlines.last().map_or(true, |&last| t > last) {
            gridlines.push(t);
        }
    };

    let mut cursor = 0.0;
    let mut bpm = chart.base_bpm();
    let mut changes = tempo.segments().iter();

    loop {
        let next_change = changes.next();
        let limit = next_change.map_or(max_time, |c| c.start);
        let step = measure_length(bpm);

        while cursor + step < limit {
            cursor += step;
            emit(cursor);
        }

        let Some(change) = next_change else {
            break;
        };
        emit(change.start);
        bpm = change.bpm;
    }

    log::debug!(
        "computed {} gridlines over {:.3}s ({} tempo changes)",
        gridlines.len(),
        max_time,
        tempo.segments().len()
    );
    gridlines
}
