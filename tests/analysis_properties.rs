//! Property tests for the analyzers and the time-space mapper.

use chartstrip::{
    compute_coincidences, compute_gridlines, compute_subdivisions, map_time_to_offset, tile, Chart,
    Note, RenderConfig, Subdivision, TimeMap,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

/// Random charts: a few taps plus speed and tempo changes.
fn arb_chart() -> impl Strategy<Value = Chart> {
    (
        60.0f64..240.0,
        prop::collection::vec((0.0f64..30.0, 0.0f64..1.0), 1..40),
        prop::collection::vec((0.0f64..30.0, 0.01f64..8.0), 0..8),
        prop::collection::vec((0.0f64..30.0, 60.0f64..300.0), 0..4),
    )
        .prop_map(|(bpm, taps, speeds, tempos)| {
            let mut notes: Vec<Note> = taps.into_iter().map(|(t, p)| Note::tap(t, p)).collect();
            notes.extend(speeds.into_iter().map(|(t, s)| Note::speed(t, s)));
            notes.extend(tempos.into_iter().map(|(t, b)| Note::tempo(t, b)));
            Chart::new(bpm, notes).unwrap()
        })
}

proptest! {
    #[test]
    fn offset_is_monotonic(chart in arb_chart(), a in 0.0f64..40.0, b in 0.0f64..40.0) {
        let map = TimeMap::new(&chart, &RenderConfig::default());
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(map.offset(lo) <= map.offset(hi) + 1e-9);
    }

    #[test]
    fn analyzers_are_idempotent(chart in arb_chart()) {
        prop_assert_eq!(compute_gridlines(&chart), compute_gridlines(&chart));
        prop_assert_eq!(compute_subdivisions(&chart), compute_subdivisions(&chart));
        prop_assert_eq!(
            compute_coincidences(chart.notes()),
            compute_coincidences(chart.notes())
        );
    }

    #[test]
    fn gridlines_ascend_below_max_time(chart in arb_chart()) {
        let lines = compute_gridlines(&chart);
        prop_assert!(lines.windows(2).all(|w| w[0] < w[1]));
        prop_assert!(lines.iter().all(|&t| t.is_finite() && t <= chart.max_time()));
    }

    #[test]
    fn subdivisions_are_even(chart in arb_chart()) {
        for label in compute_subdivisions(&chart) {
            prop_assert!(label.division > 0 && label.division % 2 == 0);
        }
    }

    #[test]
    fn tiles_cover_the_layout(height in 1u32..20_000, width in 1u32..2_000, page in 1u32..5_000) {
        let plan = tile(height, width, page).unwrap();
        prop_assert_eq!(plan.tiles.len() as u32, plan.page_count);
        prop_assert!(plan.page_count as u64 * page as u64 >= height as u64);
        prop_assert_eq!(plan.tiles[0].src.bottom, height as i64);
        prop_assert_eq!(plan.tiled_width, width * plan.page_count);
    }
}

#[test]
fn constant_tempo_gridlines() {
    let chart = Chart::new(120.0, vec![Note::tap(0.0, 0.5), Note::tap(10.0, 0.5)]).unwrap();
    assert_eq!(compute_gridlines(&chart), vec![2.0, 4.0, 6.0, 8.0]);
}

#[test]
fn coincidence_example() {
    let notes = vec![Note::tap(1.0, 0.7), Note::tap(1.0, 0.2), Note::tap(2.0, 0.5)];
    let groups = compute_coincidences(&notes);
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].time, 1.0);
    assert_eq!(groups[0].span(), (0.2, 0.7));
}

#[test]
fn subdivision_example() {
    let chart = Chart::new(120.0, vec![Note::tap(0.0, 0.5), Note::tap(0.25, 0.5)]).unwrap();
    assert_eq!(
        compute_subdivisions(&chart),
        vec![Subdivision { time: 0.0, division: 8 }]
    );
}

#[test]
fn pagination_examples() {
    let plan = tile(3000, 600, 3000).unwrap();
    assert_eq!(plan.page_count, 1);
    assert_eq!(plan.tiles[0].dst.left, 0);

    let plan = tile(4500, 600, 3000).unwrap();
    assert_eq!(plan.page_count, 2);
    assert_eq!((plan.tiles[0].src.top, plan.tiles[0].src.bottom), (1500, 4500));
    assert_eq!((plan.tiles[1].src.top, plan.tiles[1].src.bottom), (-1500, 1500));
    assert_eq!(plan.tiles[1].dst.left, 600);
}

#[test]
fn speed_clamp_example() {
    let chart = Chart::new(120.0, vec![Note::speed(0.0, 5.0), Note::tap(3.0, 0.5)]).unwrap();
    let config = RenderConfig {
        height_factor: 1.0,
        max_time_scale: 2.0,
        ..Default::default()
    };
    assert_eq!(map_time_to_offset(&chart, &config, 3.0), 6.0);
}
