//! The event-consumer seam between the tokenizer loop and a dialect

use crate::domain::{LatLon, Note, TimestampFormat, UserFactory};
use crate::error::{NoteError, Result};
use crate::infrastructure::Diagnostics;
use chrono::{DateTime, Utc};
use log::Level;
use std::str::FromStr;

/// Attributes of one start tag, unescaped
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementAttrs {
    attrs: Vec<(String, String)>,
}

impl ElementAttrs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attrs.push((name.into(), value.into()));
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Like `get`, but a missing attribute breaks the document
    pub fn require(&self, element: &str, name: &str) -> Result<&str> {
        self.get(name).ok_or_else(|| {
            NoteError::malformed(format!(
                "<{}> is missing required attribute '{}'",
                element, name
            ))
        })
    }

    /// Parse a required numeric attribute
    pub fn require_parsed<T>(&self, element: &str, name: &str) -> Result<T>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        parse_number(self.require(element, name)?, element, name)
    }

    /// Build a location from the `lat`/`lon` pair every note opens with
    pub fn location(&self, element: &str) -> Result<LatLon> {
        let lat = self.coordinate(element, "lat")?;
        let lon = self.coordinate(element, "lon")?;
        Ok(LatLon::new(lat, lon))
    }

    fn coordinate(&self, element: &str, name: &str) -> Result<f64> {
        let value: f64 = self.require_parsed(element, name)?;
        if !value.is_finite() {
            return Err(NoteError::malformed(format!(
                "invalid {} '{}' in <{}>: not a finite number",
                name, value, element
            )));
        }
        Ok(value)
    }
}

/// Parse numeric text where a bad value is structural, not degradable
pub fn parse_number<T>(text: &str, element: &str, field: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    text.trim().parse().map_err(|e| {
        NoteError::malformed(format!(
            "invalid {} '{}' in <{}>: {}",
            field, text, element, e
        ))
    })
}

/// Parse an enumeration whose unknown values mean the protocol changed
pub fn parse_enum<T>(text: &str, element: &str) -> Result<T>
where
    T: FromStr<Err = String>,
{
    text.parse()
        .map_err(|e| NoteError::malformed(format!("in <{}>: {}", element, e)))
}

/// Collaborators a dialect may call while handling an event
pub struct ParseContext<'a> {
    pub diagnostics: &'a dyn Diagnostics,
    pub users: &'a mut dyn UserFactory,
    pub report_unknown_elements: bool,
}

impl ParseContext<'_> {
    /// Parse a date, degrading to `None` and reporting when it does not fit
    pub fn parse_date(&self, format: TimestampFormat, text: &str) -> Option<DateTime<Utc>> {
        match format.parse(text) {
            Ok(date) => Some(date),
            Err(reason) => {
                self.diagnostics.report(
                    Level::Error,
                    &format!("error parsing date in {} notes: {}", format_label(format), reason),
                );
                None
            }
        }
    }

    pub fn debug(&self, message: &str) {
        self.diagnostics.report(Level::Debug, message);
    }
}

fn format_label(format: TimestampFormat) -> &'static str {
    match format {
        TimestampFormat::Api => "API",
        TimestampFormat::Dump => "dump",
    }
}

/// Receives the element events of one document and assembles notes.
///
/// Element names arrive without namespace prefix. `text` on `end_element` is
/// everything accumulated since the most recent start tag.
pub trait ElementHandler {
    fn start_element(
        &mut self,
        ctx: &mut ParseContext<'_>,
        name: &str,
        attrs: &ElementAttrs,
    ) -> Result<()>;

    fn end_element(&mut self, ctx: &mut ParseContext<'_>, name: &str, text: &str) -> Result<()>;

    /// Hand over the completed notes once the document has ended
    fn finish(self: Box<Self>) -> Vec<Note>;
}

/// The note currently being assembled, or a structural error if there is none
pub fn current_note<'n>(note: &'n mut Option<Note>, element: &str) -> Result<&'n mut Note> {
    note.as_mut().ok_or_else(|| {
        NoteError::malformed(format!("<{}> found outside of a <note>", element))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attrs_lookup() {
        let mut attrs = ElementAttrs::new();
        attrs.push("lat", "51.5");
        attrs.push("lon", "-0.12");
        assert_eq!(attrs.get("lat"), Some("51.5"));
        assert_eq!(attrs.get("id"), None);
        assert_eq!(attrs.location("note").unwrap(), LatLon::new(51.5, -0.12));
    }

    #[test]
    fn test_missing_required_attr() {
        let attrs = ElementAttrs::new();
        match attrs.require("note", "lat").unwrap_err() {
            NoteError::MalformedDocument(msg) => {
                assert!(msg.contains("<note>"));
                assert!(msg.contains("'lat'"));
            }
            other => panic!("Expected MalformedDocument, got {:?}", other),
        }
    }

    #[test]
    fn test_unparsable_coordinate() {
        let mut attrs = ElementAttrs::new();
        attrs.push("lat", "north");
        attrs.push("lon", "2.0");
        assert!(matches!(
            attrs.location("note"),
            Err(NoteError::MalformedDocument(_))
        ));
    }

    #[test]
    fn test_non_finite_coordinate() {
        for (lat, lon) in [("NaN", "2.0"), ("1.0", "inf"), ("-infinity", "2.0")] {
            let mut attrs = ElementAttrs::new();
            attrs.push("lat", lat);
            attrs.push("lon", lon);
            match attrs.location("note") {
                Err(NoteError::MalformedDocument(msg)) => assert!(msg.contains("finite")),
                other => panic!("Expected MalformedDocument for {}/{}, got {:?}", lat, lon, other),
            }
        }
    }

    #[test]
    fn test_parse_number_tolerates_whitespace() {
        assert_eq!(parse_number::<u64>(" 42\n", "id", "id").unwrap(), 42);
        assert!(parse_number::<u64>("-1", "uid", "uid").is_err());
    }

    #[test]
    fn test_current_note_outside_note() {
        let mut note = None;
        assert!(matches!(
            current_note(&mut note, "id"),
            Err(NoteError::MalformedDocument(_))
        ));
    }
}
