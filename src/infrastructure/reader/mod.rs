//! Streaming note reader.
//!
//! The document is pulled through quick-xml one event at a time; no tree is
//! ever built. Each event is handed to the [`ElementHandler`] for the chosen
//! [`Dialect`], which assembles notes as their closing tags arrive.

pub mod api;
pub mod dump;
pub mod handler;

pub use api::ApiHandler;
pub use dump::DumpHandler;
pub use handler::{ElementAttrs, ElementHandler, ParseContext};

use crate::domain::{Note, UserFactory, UserRegistry};
use crate::error::{NoteError, Result};
use crate::infrastructure::{Diagnostics, LogDiagnostics, ReaderConfig};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;

/// The two XML layouts the upstream service publishes notes in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// Responses of the live API: fields are child elements
    #[default]
    Api,
    /// The bulk dump file: fields are attributes
    Dump,
}

impl Dialect {
    fn handler(self, capacity: usize) -> Box<dyn ElementHandler> {
        match self {
            Dialect::Api => Box::new(ApiHandler::new(capacity)),
            Dialect::Dump => Box::new(DumpHandler::new(capacity)),
        }
    }
}

impl FromStr for Dialect {
    type Err = NoteError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "api" => Ok(Dialect::Api),
            "dump" => Ok(Dialect::Dump),
            _ => Err(NoteError::config(format!(
                "Invalid dialect: '{}'. Valid dialects are: api, dump",
                s
            ))),
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dialect::Api => f.write_str("api"),
            Dialect::Dump => f.write_str("dump"),
        }
    }
}

/// Reads the notes of one document. Build a new reader per document.
pub struct NoteReader<R> {
    source: R,
    dialect: Dialect,
    config: ReaderConfig,
    diagnostics: Box<dyn Diagnostics>,
    users: Box<dyn UserFactory>,
}

impl NoteReader<BufReader<File>> {
    /// Open a file for reading
    pub fn open(path: &Path, dialect: Dialect) -> Result<Self> {
        let file = File::open(path)?;
        Ok(NoteReader::new(BufReader::new(file), dialect))
    }
}

impl<R: BufRead> NoteReader<R> {
    pub fn new(source: R, dialect: Dialect) -> Self {
        NoteReader {
            source,
            dialect,
            config: ReaderConfig::default(),
            diagnostics: Box::new(LogDiagnostics),
            users: Box::new(UserRegistry::new()),
        }
    }

    pub fn with_config(mut self, config: ReaderConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_diagnostics(mut self, diagnostics: impl Diagnostics + 'static) -> Self {
        self.diagnostics = Box::new(diagnostics);
        self
    }

    pub fn with_user_factory(mut self, users: impl UserFactory + 'static) -> Self {
        self.users = Box::new(users);
        self
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Consume the whole stream and return its notes in document order.
    ///
    /// Fails on the first structural problem; no notes are returned then.
    pub fn parse(self) -> Result<Vec<Note>> {
        let NoteReader {
            source,
            dialect,
            config,
            diagnostics,
            mut users,
        } = self;

        let mut handler = dialect.handler(config.capacity_for(dialect));
        let mut ctx = ParseContext {
            diagnostics: &*diagnostics,
            users: &mut *users,
            report_unknown_elements: config.report_unknown_elements,
        };

        let mut xml = Reader::from_reader(source);
        xml.config_mut().expand_empty_elements = true;
        xml.config_mut().trim_text(false);

        let mut buf = Vec::new();
        // text seen since the most recent start tag
        let mut text = String::new();
        let mut open: Vec<String> = Vec::new();
        let mut saw_root = false;
        let mut root_closed = false;

        loop {
            let event = xml
                .read_event_into(&mut buf)
                .map_err(|e| xml_error(e, xml.buffer_position()))?;

            match event {
                Event::Start(start) => {
                    let name = decode_name(start.local_name().as_ref())?;
                    if root_closed {
                        return Err(NoteError::malformed(format!(
                            "<{}> after the end of the root element (at byte {})",
                            name,
                            xml.buffer_position()
                        )));
                    }
                    let attrs = collect_attrs(&start)?;
                    text.clear();
                    handler.start_element(&mut ctx, &name, &attrs)?;
                    open.push(name);
                    saw_root = true;
                }
                Event::End(end) => {
                    let name = decode_name(end.local_name().as_ref())?;
                    open.pop();
                    handler.end_element(&mut ctx, &name, &text)?;
                    root_closed = open.is_empty();
                }
                Event::Text(chunk) => {
                    let unescaped = chunk
                        .unescape()
                        .map_err(|e| NoteError::malformed(format!("invalid text: {}", e)))?;
                    if open.is_empty() && !unescaped.trim().is_empty() {
                        return Err(outside_root(xml.buffer_position()));
                    }
                    text.push_str(&unescaped);
                }
                Event::CData(chunk) => {
                    let raw = std::str::from_utf8(&chunk).map_err(|e| {
                        NoteError::malformed(format!("invalid UTF-8 in CDATA section: {}", e))
                    })?;
                    if open.is_empty() {
                        return Err(outside_root(xml.buffer_position()));
                    }
                    text.push_str(raw);
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        if let Some(name) = open.last() {
            return Err(NoteError::malformed(format!(
                "unexpected end of document: <{}> is not closed",
                name
            )));
        }
        if !saw_root {
            return Err(NoteError::malformed("document has no root element"));
        }

        let notes = handler.finish();
        ctx.debug(&format!("parsed notes: {}", notes.len()));
        Ok(notes)
    }
}

fn xml_error(error: quick_xml::Error, position: impl fmt::Display) -> NoteError {
    match error {
        quick_xml::Error::Io(io) => NoteError::Io(std::io::Error::new(io.kind(), io.to_string())),
        other => NoteError::malformed(format!("{} (at byte {})", other, position)),
    }
}

fn outside_root(position: impl fmt::Display) -> NoteError {
    NoteError::malformed(format!("text outside the root element (at byte {})", position))
}

fn decode_name(raw: &[u8]) -> Result<String> {
    std::str::from_utf8(raw)
        .map(str::to_string)
        .map_err(|e| NoteError::malformed(format!("invalid UTF-8 in element name: {}", e)))
}

fn collect_attrs(start: &BytesStart<'_>) -> Result<ElementAttrs> {
    let mut attrs = ElementAttrs::new();
    for attr in start.attributes() {
        let attr = attr.map_err(|e| NoteError::malformed(format!("invalid attribute: {}", e)))?;
        let name = decode_name(attr.key.local_name().as_ref())?;
        let value = attr
            .unescape_value()
            .map_err(|e| NoteError::malformed(format!("invalid value for '{}': {}", name, e)))?;
        attrs.push(name, value.into_owned());
    }
    Ok(attrs)
}
