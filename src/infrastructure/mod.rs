//! Infrastructure layer - XML input, configuration and diagnostics

pub mod config;
pub mod diagnostics;
pub mod reader;

pub use config::ReaderConfig;
pub use diagnostics::{Diagnostics, LogDiagnostics};
pub use reader::{Dialect, NoteReader};
