//! Domain layer - Notes, comments and their authors

pub mod comment;
pub mod note;
pub mod timestamp;
pub mod user;

pub use comment::{Comment, CommentAction};
pub use note::{LatLon, Note, NoteState};
pub use timestamp::TimestampFormat;
pub use user::{User, UserFactory, UserRegistry};
