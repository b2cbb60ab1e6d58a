//! Map chart time onto vertical layout space.
//!
//! Scroll speed is piecewise constant: it starts at 1.0 and each speed
//! change sets a new (clamped) multiplier from its timestamp onward. A
//! timestamp's vertical offset is the integral of that speed function
//! from zero, scaled by the configured pixels-per-second.

use crate::config::RenderConfig;
use crate::model::Chart;

/// One stretch of constant scroll speed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedSegment {
    pub start: f64,
    /// Next speed change, or the chart's last note time
    pub end: f64,
    /// Multiplier as written in the chart
    pub raw_scale: f64,
    /// Multiplier after clamping to the configured bounds
    pub scale: f64,
}

/// Speed segments of a chart in time order.
pub fn speed_segments(chart: &Chart, config: &RenderConfig) -> Vec<SpeedSegment> {
    let changes = chart.speed_changes();
    let max_time = chart.max_time();

    changes
        .iter()
        .enumerate()
        .map(|(i, change)| {
            let scale = config.clamp_scale(change.time_scale);
            if scale != change.time_scale {
                log::debug!(
                    "speed change at {:.3}s clamped from {} to {}",
                    change.time,
                    change.time_scale,
                    scale
                );
            }
            SpeedSegment {
                start: change.time,
                end: changes.get(i + 1).map_or(max_time, |n| n.time),
                raw_scale: change.time_scale,
                scale,
            }
        })
        .collect()
}

/// A precomputed time-to-offset mapping for one chart and config.
#[derive(Debug, Clone)]
pub struct TimeMap {
    /// (boundary time, scale from the boundary onward, unscaled offset at the boundary)
    boundaries: Vec<(f64, f64, f64)>,
    height_factor: f64,
}

impl TimeMap {
    pub fn new(chart: &Chart, config: &RenderConfig) -> Self {
        let mut boundaries = Vec::new();
        let mut accumulated = 0.0;
        let mut last_boundary = 0.0;
        let mut current_scale = 1.0;

        for segment in speed_segments(chart, config) {
            accumulated += current_scale * (segment.start - last_boundary);
            last_boundary = segment.start;
            current_scale = segment.scale;
            boundaries.push((last_boundary, current_scale, accumulated));
        }

        Self {
            boundaries,
            height_factor: config.height_factor,
        }
    }

    /// Vertical pixel offset of time `t` from the chart start.
    ///
    /// Non-decreasing in `t`. Speed changes at or after `t` have no effect,
    /// and zero-length segments contribute nothing.
    pub fn offset(&self, t: f64) -> f64 {
        let passed = self.boundaries.partition_point(|&(start, _, _)| start < t);
        let unscaled = match passed {
            0 => t,
            i => {
                let (start, scale, accumulated) = self.boundaries[i - 1];
                accumulated + scale * (t - start)
            }
        };
        unscaled * self.height_factor
    }
}

/// One-shot convenience for [`TimeMap::offset`].
pub fn map_time_to_offset(chart: &Chart, config: &RenderConfig, t: f64) -> f64 {
    TimeMap::new(chart, config).offset(t)
}
