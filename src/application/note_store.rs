//! In-memory collection of notes keyed by id

use crate::domain::Note;
use std::collections::HashMap;

/// Outcome of merging a batch of notes into a store
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeSummary {
    pub added: usize,
    pub updated: usize,
}

/// Notes in first-seen order. Re-reading a note refreshes it in place.
#[derive(Debug, Default)]
pub struct NoteStore {
    notes: Vec<Note>,
    index: HashMap<u64, usize>,
}

impl NoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add unseen notes and refresh the ones already held.
    ///
    /// A refreshed note keeps its position; its contents are replaced wholesale.
    /// Notes without an id (zero) are always added and never refreshed.
    pub fn merge(&mut self, notes: Vec<Note>) -> MergeSummary {
        let mut summary = MergeSummary::default();
        for note in notes {
            if note.id() == 0 {
                self.notes.push(note);
                summary.added += 1;
                continue;
            }
            match self.index.get(&note.id()) {
                Some(&position) => {
                    self.notes[position].update_with(note);
                    summary.updated += 1;
                }
                None => {
                    self.index.insert(note.id(), self.notes.len());
                    self.notes.push(note);
                    summary.added += 1;
                }
            }
        }
        summary
    }

    pub fn get(&self, id: u64) -> Option<&Note> {
        self.index.get(&id).map(|&position| &self.notes[position])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Note> {
        self.notes.iter()
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{LatLon, NoteState};

    fn note(id: u64, state: NoteState) -> Note {
        let mut note = Note::new(LatLon::new(id as f64, 0.0));
        note.set_id(id);
        note.set_state(state);
        note
    }

    #[test]
    fn test_merge_into_empty_store() {
        let mut store = NoteStore::new();
        let summary = store.merge(vec![note(1, NoteState::Open), note(2, NoteState::Open)]);
        assert_eq!(summary, MergeSummary { added: 2, updated: 0 });
        assert_eq!(store.len(), 2);
        assert!(store.get(2).is_some());
        assert!(store.get(3).is_none());
    }

    #[test]
    fn test_merge_refreshes_in_place() {
        let mut store = NoteStore::new();
        store.merge(vec![note(1, NoteState::Open), note(2, NoteState::Open)]);

        let summary = store.merge(vec![note(1, NoteState::Closed), note(3, NoteState::Open)]);
        assert_eq!(summary, MergeSummary { added: 1, updated: 1 });

        let ids: Vec<u64> = store.iter().map(|n| n.id()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(store.get(1).unwrap().state(), NoteState::Closed);
    }

    #[test]
    fn test_notes_without_id_are_kept_apart() {
        let mut store = NoteStore::new();
        let summary = store.merge(vec![
            note(0, NoteState::Open),
            note(5, NoteState::Open),
            note(0, NoteState::Closed),
        ]);
        assert_eq!(summary, MergeSummary { added: 3, updated: 0 });

        let summary = store.merge(vec![note(0, NoteState::Open)]);
        assert_eq!(summary, MergeSummary { added: 1, updated: 0 });

        let states: Vec<NoteState> = store.iter().map(|n| n.state()).collect();
        assert_eq!(
            states,
            vec![NoteState::Open, NoteState::Open, NoteState::Closed, NoteState::Open]
        );
        assert!(store.get(0).is_none());
    }
}
