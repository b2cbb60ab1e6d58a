//! Groups of notes that must be hit at the same instant.

use std::collections::HashMap;

use crate::model::Note;

/// Two or more non-meta notes sharing a bit-identical timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct CoincidenceGroup<'a> {
    pub time: f64,
    /// Ordered by lateral position, left to right
    pub notes: Vec<&'a Note>,
}

impl CoincidenceGroup<'_> {
    /// Leftmost and rightmost positions in the group.
    pub fn span(&self) -> (f64, f64) {
        let first = self.notes.first().map_or(0.0, |n| n.position);
        let last = self.notes.last().map_or(0.0, |n| n.position);
        (first, last)
    }
}

/// Hash key for exact timestamp equality. Folds `-0.0` into `0.0`.
fn time_key(time: f64) -> u64 {
    (time + 0.0).to_bits()
}

/// Group non-meta notes by exact time and keep groups of two or more.
///
/// Timestamps come from a single deterministic parse, so no epsilon is
/// applied. Groups come out in first-appearance order of their time.
pub fn compute_coincidences<'a, I>(notes: I) -> Vec<CoincidenceGroup<'a>>
where
    I: IntoIterator<Item = &'a Note>,
{
    let mut index: HashMap<u64, usize> = HashMap::new();
    let mut groups: Vec<CoincidenceGroup<'a>> = Vec::new();

    for note in notes.into_iter().filter(|n| !n.is_meta()) {
        let slot = *index.entry(time_key(note.time)).or_insert_with(|| {
            groups.push(CoincidenceGroup {
                time: note.time,
                notes: Vec::new(),
            });
            groups.len() - 1
        });
        groups[slot].notes.push(note);
    }

    groups.retain(|g| g.notes.len() >= 2);
    for group in &mut groups {
        group.notes.sort_by(|a, b| a.position.total_cmp(&b.position));
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_shared_timestamps_by_position() {
        let notes = vec![Note::tap(1.0, 0.7), Note::tap(1.0, 0.2), Note::tap(2.0, 0.5)];
        let groups = compute_coincidences(&notes);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].time, 1.0);
        let positions: Vec<f64> = groups[0].notes.iter().map(|n| n.position).collect();
        assert_eq!(positions, vec![0.2, 0.7]);
        assert_eq!(groups[0].span(), (0.2, 0.7));
    }

    #[test]
    fn ignores_meta_notes() {
        let notes = vec![Note::tap(1.0, 0.5), Note::speed(1.0, 2.0), Note::tempo(1.0, 140.0)];
        assert!(compute_coincidences(&notes).is_empty());
    }

    #[test]
    fn nearly_equal_times_do_not_coincide() {
        let notes = vec![Note::tap(0.1 + 0.2, 0.1), Note::chain(0.3, 0.9)];
        assert!(compute_coincidences(&notes).is_empty());
    }

    #[test]
    fn keeps_first_appearance_order() {
        let notes = vec![
            Note::tap(3.0, 0.1),
            Note::tap(1.0, 0.1),
            Note::long(3.0, 0.9),
            Note::chain(1.0, 0.4),
            Note::tap(-0.0, 0.3),
            Note::tap(0.0, 0.6),
        ];
        let times: Vec<f64> = compute_coincidences(&notes).iter().map(|g| g.time).collect();
        assert_eq!(times, vec![3.0, 1.0, 0.0]);
    }
}
