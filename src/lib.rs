//! notexml - Streaming reader for map notes
//!
//! Reads geographically anchored notes and their comment threads from either
//! the live API's XML responses or the bulk dump file, without building a DOM.

pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use domain::{Comment, CommentAction, LatLon, Note, NoteState, User};
pub use error::NoteError;
pub use infrastructure::{Dialect, NoteReader, ReaderConfig};
