//! Application layer - Use cases and orchestration

pub mod note_store;
pub mod read_notes;
pub mod stats;

pub use note_store::{MergeSummary, NoteStore};
pub use read_notes::ReadNotesService;
pub use stats::NoteStats;
