//! Data model for a parsed rhythm-game chart.
//!
//! A chart is immutable once built: `Chart::new` validates every note
//! up front so the analyzers and the time-space mapper can run without
//! failure paths of their own.

use serde::{Deserialize, Serialize};

use crate::error::{ChartError, Result};

/// What a note means on the timeline.
///
/// `TempoChange` and `SpeedChange` are meta notes: they carry timeline
/// metadata and are never drawn as hit marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteKind {
    Tap,
    #[serde(rename = "tempo")]
    TempoChange,
    #[serde(rename = "speed")]
    SpeedChange,
    Chain,
    Long,
}

/// Index of a note inside its chart's note list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(pub usize);

/// One chart event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    #[serde(rename = "type")]
    pub kind: NoteKind,
    /// Seconds from the start of the chart
    pub time: f64,
    /// Lateral placement across the track, 0..1
    #[serde(default)]
    pub position: f64,
    /// Lateral extent as a fraction of the track; zero for regular notes
    #[serde(default)]
    pub width: f64,
    /// New tempo, valid for `TempoChange`
    #[serde(default)]
    pub bpm: f64,
    /// Scroll-speed multiplier from this point onward, valid for `SpeedChange`
    #[serde(default = "default_time_scale")]
    pub time_scale: f64,
    /// Chain/hold successor. A forward link only, never owning.
    #[serde(default)]
    pub next: Option<NoteId>,
}

fn default_time_scale() -> f64 {
    1.0
}

impl Note {
    fn new(kind: NoteKind, time: f64, position: f64) -> Self {
        Self {
            kind,
            time,
            position,
            width: 0.0,
            bpm: 0.0,
            time_scale: 1.0,
            next: None,
        }
    }

    pub fn tap(time: f64, position: f64) -> Self {
        Self::new(NoteKind::Tap, time, position)
    }

    pub fn chain(time: f64, position: f64) -> Self {
        Self::new(NoteKind::Chain, time, position)
    }

    pub fn long(time: f64, position: f64) -> Self {
        Self::new(NoteKind::Long, time, position)
    }

    pub fn tempo(time: f64, bpm: f64) -> Self {
        Self {
            bpm,
            ..Self::new(NoteKind::TempoChange, time, 0.0)
        }
    }

    pub fn speed(time: f64, time_scale: f64) -> Self {
        Self {
            time_scale,
            ..Self::new(NoteKind::SpeedChange, time, 0.0)
        }
    }

    pub fn with_width(mut self, width: f64) -> Self {
        self.width = width;
        self
    }

    pub fn with_next(mut self, next: usize) -> Self {
        self.next = Some(NoteId(next));
        self
    }

    /// Tempo and speed changes describe the timeline rather than hits.
    pub fn is_meta(&self) -> bool {
        matches!(self.kind, NoteKind::TempoChange | NoteKind::SpeedChange)
    }

    pub fn is_wide(&self) -> bool {
        self.width > 0.0
    }
}

/// A complete chart: base tempo plus notes in insertion order.
#[derive(Debug, Clone, Serialize)]
pub struct Chart {
    /// Tempo in effect before the first tempo change
    #[serde(rename = "bpm")]
    base_bpm: f64,
    notes: Vec<Note>,
    #[serde(skip)]
    max_time: f64,
}

impl Chart {
    /// Build a chart, rejecting inputs the analyzers cannot handle.
    pub fn new(base_bpm: f64, notes: Vec<Note>) -> Result<Self> {
        if notes.is_empty() {
            return Err(ChartError::EmptyChart);
        }
        if !base_bpm.is_finite() || base_bpm <= 0.0 {
            return Err(ChartError::InvalidBaseBpm(base_bpm));
        }

        for (index, note) in notes.iter().enumerate() {
            if !note.time.is_finite() || note.time < 0.0 {
                return Err(ChartError::InvalidTime { index, time: note.time });
            }
            if note.kind == NoteKind::TempoChange && !(note.bpm.is_finite() && note.bpm > 0.0) {
                return Err(ChartError::InvalidTempo {
                    index,
                    time: note.time,
                    bpm: note.bpm,
                });
            }
        }

        // Links are checked after all times are known to be valid.
        for (index, note) in notes.iter().enumerate() {
            let Some(NoteId(next)) = note.next else {
                continue;
            };
            let target = notes
                .get(next)
                .ok_or(ChartError::DanglingLink { index, next })?;
            if target.time < note.time {
                return Err(ChartError::BackwardLink {
                    index,
                    time: note.time,
                    next,
                    next_time: target.time,
                });
            }
        }

        let max_time = notes.iter().map(|n| n.time).fold(0.0, f64::max);

        Ok(Self {
            base_bpm,
            notes,
            max_time,
        })
    }

    pub fn base_bpm(&self) -> f64 {
        self.base_bpm
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn note(&self, id: NoteId) -> Option<&Note> {
        self.notes.get(id.0)
    }

    /// Chain/hold successor of `note`, if any.
    pub fn next_of(&self, note: &Note) -> Option<&Note> {
        note.next.and_then(|id| self.note(id))
    }

    /// Latest timestamp of any note, meta notes included.
    pub fn max_time(&self) -> f64 {
        self.max_time
    }

    /// Note ids ordered by time. Ties keep insertion order.
    pub fn sorted_by_time(&self) -> Vec<NoteId> {
        let mut ids: Vec<NoteId> = (0..self.notes.len()).map(NoteId).collect();
        ids.sort_by(|a, b| self.notes[a.0].time.total_cmp(&self.notes[b.0].time));
        ids
    }

    /// Notes of one kind in time order.
    pub fn notes_of_kind(&self, kind: NoteKind) -> Vec<&Note> {
        self.sorted_by_time()
            .into_iter()
            .map(|id| &self.notes[id.0])
            .filter(|n| n.kind == kind)
            .collect()
    }

    pub fn tempo_changes(&self) -> Vec<&Note> {
        self.notes_of_kind(NoteKind::TempoChange)
    }

    pub fn speed_changes(&self) -> Vec<&Note> {
        self.notes_of_kind(NoteKind::SpeedChange)
    }

    /// Non-meta notes in insertion order.
    pub fn playable_notes(&self) -> impl Iterator<Item = &Note> {
        self.notes.iter().filter(|n| !n.is_meta())
    }

    /// Serialize back to the chart file shape.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
