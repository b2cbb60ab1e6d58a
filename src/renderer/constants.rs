//! Shared constants for the layout renderer (all in pixels).

use super::canvas::{Color, Paint};

// ── Note dimensions ─────────────────────────────────────────────────
pub(super) const NOTE_SIZE: f64 = 20.0; // width of a regular note, height of every note
pub(super) const NOTE_HALF_HEIGHT: f64 = NOTE_SIZE / 2.0;
pub(super) const TAP_CORNER_RADIUS: f64 = 10.0;
pub(super) const CHAIN_RADIUS: f64 = 10.0; // half diagonal of the chain diamond
pub(super) const CHAIN_DASH: f64 = 15.0;

// ── Labels ──────────────────────────────────────────────────────────
pub(super) const LABEL_SIZE: f64 = 20.0;
pub(super) const LABEL_GAP: f64 = 10.0; // distance from the track edge
pub(super) const LABEL_DESCENT: f64 = LABEL_SIZE * 0.22; // baseline drop below the mark

// ── Colors ──────────────────────────────────────────────────────────
pub const PAGE_BACKGROUND: Color = Color(0xff080403);

pub(super) const TAP_FILL: Paint = Paint::fill(0xff7b013d);
pub(super) const CHAIN_FILL: Paint = Paint::fill(0xff004a80);
pub(super) const CHARGE_FILL: Paint = Paint::fill(0xff3c7b1e);
pub(super) const CHARGE_BODY_FILL: Paint = Paint::fill(0xff374219);
pub(super) const CHARGE_BODY_STROKE: Paint = Paint::stroke(0xdde8c9c7, 1.0);
pub(super) const NOTE_STROKE: Paint = Paint::stroke(0xffe8c9c7, 2.5);
pub(super) const NOTE_BOLD_STROKE: Paint = Paint::stroke(0xffe8c9c7, 4.0);
pub(super) const CHAIN_LINK: Paint = Paint::stroke(0xffeeeeee, 1.0);
pub(super) const COINCIDENCE_LINE: Paint = Paint::stroke(0xffeeeeee, 1.0);
pub(super) const GRIDLINE: Paint = Paint::stroke(0xff888888, 1.0);
pub(super) const SPEED_BAND: Paint = Paint::fill(0x11ffff00);
pub(super) const LABEL_TEXT: Paint = Paint::fill(0xffffffff);
pub(super) const BOUNDARY_LINE: Paint = Paint::stroke(0xffffffff, 1.0);
