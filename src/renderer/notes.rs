//! Note rendering — taps, chains and long (charge) notes.

use super::canvas::{Canvas, Paint, Point};
use super::constants::*;
use super::Track;
use crate::model::{Chart, Note, NoteKind};

/// Flat hexagon around `(cx, cy)`, stretched sideways by `extra_width`.
fn charge_outline(cx: f64, cy: f64, extra_width: f64) -> [Point; 6] {
    let half = extra_width / 2.0;
    let a = 5.0 * 3f64.sqrt();
    [
        (cx - 10.0 - half, cy),
        (cx - 5.0 - half, cy - a),
        (cx + 5.0 + half, cy - a),
        (cx + 10.0 + half, cy),
        (cx + 5.0 + half, cy + a),
        (cx - 5.0 - half, cy + a),
    ]
}

fn chain_outline(cx: f64, cy: f64) -> [Point; 4] {
    [
        (cx, cy - CHAIN_RADIUS),
        (cx + CHAIN_RADIUS, cy),
        (cx, cy + CHAIN_RADIUS),
        (cx - CHAIN_RADIUS, cy),
    ]
}

/// Drawn width of a tap or long note.
pub(super) fn note_width(note: &Note, track: &Track<'_>) -> f64 {
    if note.is_wide() {
        track.width * note.width * track.config.width_scale
    } else {
        NOTE_SIZE
    }
}

/// Draw every non-meta note in time order.
///
/// Notes whose timestamp is in `coincident` get the bold outline.
pub(super) fn render_notes(
    canvas: &mut dyn Canvas,
    chart: &Chart,
    track: &Track<'_>,
    coincident: &dyn Fn(f64) -> bool,
) {
    for id in chart.sorted_by_time() {
        let Some(note) = chart.note(id) else {
            continue;
        };
        let outline: &Paint = if coincident(note.time) {
            &NOTE_BOLD_STROKE
        } else {
            &NOTE_STROKE
        };
        let (x, y) = track.point(note);

        match note.kind {
            NoteKind::Tap => {
                let half = note_width(note, track) / 2.0;
                let (l, t, r, b) = (x - half, y - NOTE_HALF_HEIGHT, x + half, y + NOTE_HALF_HEIGHT);
                canvas.round_rect(l, t, r, b, TAP_CORNER_RADIUS, &TAP_FILL);
                canvas.round_rect(l, t, r, b, TAP_CORNER_RADIUS, outline);
            }
            NoteKind::Chain => {
                if let Some(next) = chart.next_of(note) {
                    canvas.dashed_line((x, y), track.point(next), CHAIN_DASH, &CHAIN_LINK);
                }
                let diamond = chain_outline(x, y);
                canvas.polygon(&diamond, &CHAIN_FILL);
                canvas.polygon(&diamond, outline);
            }
            NoteKind::Long => {
                let width = note_width(note, track);
                if let Some(next) = chart.next_of(note) {
                    let (nx, ny) = track.point(next);
                    let half = width / 2.0;
                    let body = [(x - half, y), (x + half, y), (nx + half, ny), (nx - half, ny)];
                    canvas.polygon(&body, &CHARGE_BODY_FILL);
                    canvas.polygon(&body, &CHARGE_BODY_STROKE);
                }
                let head = charge_outline(x, y, width - NOTE_SIZE);
                canvas.polygon(&head, &CHARGE_FILL);
                canvas.polygon(&head, outline);
            }
            NoteKind::TempoChange | NoteKind::SpeedChange => {}
        }
    }
}
