//! Error types for notexml

use thiserror::Error;

/// Main error type for notexml
#[derive(Debug, Error)]
pub enum NoteError {
    /// The document is not well-formed, or a structural field is unusable
    #[error("Malformed document: {0}")]
    MalformedDocument(String),

    /// The reader could not be set up (bad configuration, unknown dialect)
    #[error("Configuration error: {message}")]
    Configuration {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A note was asked for its opening comment before it had any
    #[error("Note {0} has no comments")]
    EmptyThread(u64),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),
}

impl NoteError {
    /// Shorthand for a `MalformedDocument` error
    pub fn malformed(message: impl Into<String>) -> Self {
        NoteError::MalformedDocument(message.into())
    }

    /// A configuration error without an underlying cause
    pub fn config(message: impl Into<String>) -> Self {
        NoteError::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// A configuration error chained from the failure that caused it
    pub fn config_caused_by<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        NoteError::Configuration {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            NoteError::MalformedDocument(_) => 2,
            NoteError::Configuration { .. } | NoteError::TomlDeserialize(_) => 3,
            NoteError::EmptyThread(_) => 4,
            NoteError::Io(_) => 1,
        }
    }

    /// Get a user-friendly error message with suggestions
    pub fn display_with_suggestions(&self) -> String {
        match self {
            NoteError::MalformedDocument(msg) => {
                format!(
                    "Malformed document: {}\n\n\
                    Suggestions:\n\
                    • Check that the file is complete and well-formed XML\n\
                    • Make sure the dialect matches the file (--dialect api or --dialect dump)\n\
                    • Notes from the API look like <note lat=\"..\" lon=\"..\"><id>..</id>\n\
                    • Notes from the dump look like <note id=\"..\" lat=\"..\" lon=\"..\" created_at=\"..\">",
                    msg
                )
            }
            NoteError::Configuration { message, .. } => {
                if message.contains("dialect") {
                    format!(
                        "{}\n\n\
                        Valid dialects: api, dump\n\
                        Example: notexml list --dialect dump notes.osn",
                        message
                    )
                } else {
                    format!(
                        "{}\n\n\
                        Suggestions:\n\
                        • Check the path given with --config or NOTEXML_CONFIG\n\
                        • Valid keys: expected_notes, report_unknown_elements",
                        message
                    )
                }
            }
            _ => self.to_string(),
        }
    }
}

/// Result type using NoteError
pub type Result<T> = std::result::Result<T, NoteError>;
