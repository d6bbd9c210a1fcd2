//! Note statistics use case

use crate::domain::{Note, NoteState};

/// Totals over a set of notes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoteStats {
    pub notes: usize,
    pub open: usize,
    pub closed: usize,
    pub comments: usize,
    /// Notes missing their creation date or a comment date
    pub degraded: usize,
}

impl NoteStats {
    pub fn collect<'a>(notes: impl IntoIterator<Item = &'a Note>) -> Self {
        let mut stats = NoteStats::default();
        for note in notes {
            stats.notes += 1;
            match note.state() {
                NoteState::Open => stats.open += 1,
                NoteState::Closed => stats.closed += 1,
            }
            stats.comments += note.comments().len();
            if is_degraded(note) {
                stats.degraded += 1;
            }
        }
        stats
    }
}

fn is_degraded(note: &Note) -> bool {
    note.created_at().is_none() || note.comments().iter().any(|c| c.timestamp().is_none())
}
