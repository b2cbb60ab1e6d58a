//! Rhythmic subdivision labels: how finely a measure is split at each
//! note timestamp, judged from the gap to the next timestamp.

use crate::analysis::tempo::{measure_length, TempoMap};
use crate::model::Chart;

/// How far a measure/gap ratio may sit from an integer and still count.
pub const SUBDIVISION_TOLERANCE: f64 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Subdivision {
    pub time: f64,
    /// Even, nonzero measure division (8 = eighth-measure spacing)
    pub division: u64,
}

/// Classify each distinct non-meta timestamp against the one after it.
///
/// Only the forward gap is considered, so the last timestamp is never
/// labelled. Odd divisions such as triplets are left unlabelled.
pub fn compute_subdivisions(chart: &Chart) -> Vec<Subdivision> {
    let tempo = TempoMap::new(chart);

    let mut times: Vec<f64> = chart.playable_notes().map(|n| n.time + 0.0).collect();
    times.sort_by(f64::total_cmp);
    times.dedup();

    let labels: Vec<Subdivision> = times
        .windows(2)
        .filter_map(|pair| {
            let (curr, next) = (pair[0], pair[1]);
            let ratio = measure_length(tempo.bpm_at(curr)) / (next - curr);
            let rounded = ratio.round();
            if (ratio - rounded).abs() >= SUBDIVISION_TOLERANCE {
                return None;
            }
            let division = rounded as u64;
            (division != 0 && division % 2 == 0).then_some(Subdivision { time: curr, division })
        })
        .collect();

    log::debug!(
        "labelled {} of {} distinct timestamps",
        labels.len(),
        times.len()
    );
    labels
}
