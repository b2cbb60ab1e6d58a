//! Chart analysis — everything derived from note timing alone: measure
//! gridlines, simultaneous-note groups and rhythmic subdivisions.
//!
//! All analyzers are pure functions over an immutable chart.

pub mod coincidence;
pub mod subdivision;
pub mod tempo;

pub use coincidence::{compute_coincidences, CoincidenceGroup};
pub use subdivision::{compute_subdivisions, Subdivision, SUBDIVISION_TOLERANCE};
pub use tempo::{compute_gridlines, measure_length, TempoMap, TempoSegment};
