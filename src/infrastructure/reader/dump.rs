//! Notes from the bulk dump file.
//!
//! Note and comment fields are attributes; only the comment body is text:
//!
//! ```xml
//! <note id="5" lat="51.5" lon="-0.1" created_at="2013-04-24T08:07:02Z" closed_at="2013-04-25T10:00:00Z">
//!   <comment action="opened" timestamp="2013-04-24T08:07:02Z" uid="7" user="alice">hi</comment>
//!   <comment action="closed" timestamp="2013-04-25T10:00:00Z" uid="8" user="bob">fixed</comment>
//! </note>
//! ```

use super::handler::{current_note, parse_enum, parse_number, ElementAttrs, ElementHandler, ParseContext};
use crate::domain::{Comment, CommentAction, Note, NoteState, TimestampFormat};
use crate::error::{NoteError, Result};
use chrono::{DateTime, Utc};
use log::Level;

#[derive(Debug, Default)]
struct CommentScratch {
    timestamp: Option<DateTime<Utc>>,
    uid: u64,
    user: Option<String>,
    action: Option<CommentAction>,
}

#[derive(Debug, Default)]
pub struct DumpHandler {
    notes: Vec<Note>,
    note: Option<Note>,
    comment: CommentScratch,
}

impl DumpHandler {
    pub fn new(capacity: usize) -> Self {
        DumpHandler {
            notes: Vec::with_capacity(capacity),
            ..Self::default()
        }
    }

    fn start_note(&mut self, ctx: &mut ParseContext<'_>, attrs: &ElementAttrs) -> Result<()> {
        let mut note = Note::new(attrs.location("note")?);
        note.set_id(attrs.require_parsed("note", "id")?);

        let created_at = attrs.require("note", "created_at")?;
        note.set_created_at(ctx.parse_date(TimestampFormat::Dump, created_at));

        // closed_at alone decides the state
        match attrs.get("closed_at") {
            Some(closed_at) => {
                note.set_state(NoteState::Closed);
                note.set_closed_at(ctx.parse_date(TimestampFormat::Dump, closed_at));
            }
            None => {
                note.set_state(NoteState::Open);
                note.set_closed_at(None);
            }
        }

        self.note = Some(note);
        Ok(())
    }

    fn start_comment(&mut self, ctx: &mut ParseContext<'_>, attrs: &ElementAttrs) -> Result<()> {
        let uid = match attrs.get("uid") {
            Some(uid) => parse_number(uid, "comment", "uid")?,
            None => 0,
        };
        let action = match attrs.get("action") {
            Some(action) => Some(parse_enum::<CommentAction>(action, "comment")?),
            None => None,
        };
        let timestamp = match attrs.get("timestamp") {
            Some(timestamp) => ctx.parse_date(TimestampFormat::Dump, timestamp),
            None => {
                ctx.diagnostics
                    .report(Level::Error, "comment in note dump has no timestamp");
                None
            }
        };

        self.comment = CommentScratch {
            timestamp,
            uid,
            user: attrs.get("user").map(str::to_string),
            action,
        };
        Ok(())
    }
}

impl ElementHandler for DumpHandler {
    fn start_element(
        &mut self,
        ctx: &mut ParseContext<'_>,
        name: &str,
        attrs: &ElementAttrs,
    ) -> Result<()> {
        match name {
            "note" => self.start_note(ctx, attrs),
            "comment" => self.start_comment(ctx, attrs),
            _ => Ok(()),
        }
    }

    fn end_element(&mut self, ctx: &mut ParseContext<'_>, name: &str, text: &str) -> Result<()> {
        match name {
            "comment" => {
                let note = current_note(&mut self.note, name)?;
                let scratch = std::mem::take(&mut self.comment);
                let author = ctx.users.create_user(scratch.uid, scratch.user.as_deref());
                note.append_comment(Comment::new(
                    text.to_string(),
                    None,
                    scratch.action,
                    author,
                    scratch.timestamp,
                ));
            }
            "note" => {
                let note = self
                    .note
                    .take()
                    .ok_or_else(|| NoteError::malformed("</note> without a matching <note>"))?;
                self.notes.push(note);
            }
            _ => {}
        }
        Ok(())
    }

    fn finish(self: Box<Self>) -> Vec<Note> {
        self.notes
    }
}
