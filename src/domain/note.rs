//! Map notes and their comment threads

use crate::domain::Comment;
use crate::error::{NoteError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A latitude/longitude pair in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

impl LatLon {
    pub fn new(lat: f64, lon: f64) -> Self {
        LatLon { lat, lon }
    }
}

impl fmt::Display for LatLon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.7},{:.7}", self.lat, self.lon)
    }
}

/// Whether a note is still waiting to be resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum NoteState {
    #[default]
    Open,
    Closed,
}

impl FromStr for NoteState {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "open" => Ok(NoteState::Open),
            "closed" => Ok(NoteState::Closed),
            _ => Err(format!(
                "Invalid note status: '{}'. Valid statuses are: open, closed",
                s
            )),
        }
    }
}

impl fmt::Display for NoteState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoteState::Open => f.pad("open"),
            NoteState::Closed => f.pad("closed"),
        }
    }
}

/// A map note. Every complete note has at least one comment, the one it was
/// opened with.
#[derive(Debug, Clone, PartialEq)]
pub struct Note {
    id: u64,
    location: LatLon,
    created_at: Option<DateTime<Utc>>,
    closed_at: Option<DateTime<Utc>>,
    state: NoteState,
    url: Option<String>,
    comments: Vec<Comment>,
}

impl Note {
    /// Create an open note at `location` with no id, dates or comments yet
    pub fn new(location: LatLon) -> Self {
        Note {
            id: 0,
            location,
            created_at: None,
            closed_at: None,
            state: NoteState::Open,
            url: None,
            comments: Vec::new(),
        }
    }

    /// Upstream id; zero until known
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn set_id(&mut self, id: u64) {
        self.id = id;
    }

    pub fn location(&self) -> LatLon {
        self.location
    }

    /// When the note was submitted
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    pub fn set_created_at(&mut self, created_at: Option<DateTime<Utc>>) {
        self.created_at = created_at;
    }

    /// When the note was closed (dump dialect only)
    pub fn closed_at(&self) -> Option<DateTime<Utc>> {
        self.closed_at
    }

    pub fn set_closed_at(&mut self, closed_at: Option<DateTime<Utc>>) {
        self.closed_at = closed_at;
    }

    pub fn state(&self) -> NoteState {
        self.state
    }

    pub fn set_state(&mut self, state: NoteState) {
        self.state = state;
    }

    /// Link to the note on the upstream service (API dialect only)
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn set_url(&mut self, url: Option<String>) {
        self.url = url;
    }

    /// Comments in the order they were written
    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    pub fn append_comment(&mut self, comment: Comment) {
        self.comments.push(comment);
    }

    /// The comment the note was opened with
    pub fn first_comment(&self) -> Result<&Comment> {
        self.comments
            .first()
            .ok_or(NoteError::EmptyThread(self.id))
    }

    /// Replace every field with the contents of a freshly fetched copy.
    ///
    /// Whoever holds this note keeps holding it and sees the new contents.
    pub fn update_with(&mut self, other: Note) {
        let Note {
            id,
            location,
            created_at,
            closed_at,
            state,
            url,
            comments,
        } = other;
        self.id = id;
        self.location = location;
        self.created_at = created_at;
        self.closed_at = closed_at;
        self.state = state;
        self.url = url;
        self.comments = comments;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CommentAction, User};
    use chrono::TimeZone;

    fn comment(text: &str) -> Comment {
        Comment::new(
            text.to_string(),
            None,
            Some(CommentAction::Commented),
            User::new(1, Some("bob")),
            None,
        )
    }

    #[test]
    fn test_new_note_is_blank() {
        let note = Note::new(LatLon::new(1.0, 2.0));
        assert_eq!(note.id(), 0);
        assert_eq!(note.location(), LatLon::new(1.0, 2.0));
        assert_eq!(note.created_at(), None);
        assert_eq!(note.closed_at(), None);
        assert_eq!(note.state(), NoteState::Open);
        assert_eq!(note.url(), None);
        assert!(note.comments().is_empty());
    }

    #[test]
    fn test_first_comment_on_empty_thread() {
        let mut note = Note::new(LatLon::new(1.0, 2.0));
        note.set_id(12);
        match note.first_comment() {
            Err(NoteError::EmptyThread(12)) => {}
            other => panic!("Expected EmptyThread error, got {:?}", other),
        }
    }

    #[test]
    fn test_comments_keep_append_order() {
        let mut note = Note::new(LatLon::new(1.0, 2.0));
        note.append_comment(comment("first"));
        note.append_comment(comment("second"));
        note.append_comment(comment("second"));

        let texts: Vec<&str> = note.comments().iter().map(|c| c.text()).collect();
        assert_eq!(texts, vec!["first", "second", "second"]);
        assert_eq!(note.first_comment().unwrap().text(), "first");
    }

    #[test]
    fn test_update_with_replaces_everything() {
        let mut stale = Note::new(LatLon::new(1.0, 2.0));
        stale.set_id(5);
        stale.set_url(Some("https://example.org/note/5".to_string()));
        stale.append_comment(comment("opened"));

        let mut fresh = Note::new(LatLon::new(1.5, 2.5));
        fresh.set_id(5);
        fresh.set_state(NoteState::Closed);
        let closed = Utc.with_ymd_and_hms(2015, 2, 1, 0, 0, 0).unwrap();
        fresh.set_closed_at(Some(closed));
        fresh.append_comment(comment("opened"));
        fresh.append_comment(comment("fixed"));

        stale.update_with(fresh.clone());

        assert_eq!(stale, fresh);
        assert_eq!(stale.url(), None);
        assert_eq!(stale.comments().len(), 2);
        assert_eq!(stale.closed_at(), Some(closed));
    }

    #[test]
    fn test_note_state_from_str_is_case_sensitive() {
        assert_eq!("open".parse::<NoteState>(), Ok(NoteState::Open));
        assert_eq!("closed".parse::<NoteState>(), Ok(NoteState::Closed));
        assert!("Open".parse::<NoteState>().is_err());
        assert!("unknown_value".parse::<NoteState>().is_err());
    }

    #[test]
    fn test_lat_lon_display() {
        assert_eq!(LatLon::new(1.0, -2.5).to_string(), "1.0000000,-2.5000000");
    }
}
