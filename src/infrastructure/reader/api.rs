//! Notes as returned by the live API.
//!
//! Every field is a child element with text content:
//!
//! ```xml
//! <note lat="51.5" lon="-0.1">
//!   <id>5</id>
//!   <url>https://api.example.org/notes/5</url>
//!   <date_created>2015-01-01 00:00:00 UTC</date_created>
//!   <status>open</status>
//!   <comments>
//!     <comment>
//!       <date>2015-01-01 00:00:00 UTC</date>
//!       <uid>7</uid>
//!       <user>alice</user>
//!       <action>opened</action>
//!       <text>hi</text>
//!       <html>&lt;p&gt;hi&lt;/p&gt;</html>
//!     </comment>
//!   </comments>
//! </note>
//! ```

use super::handler::{current_note, parse_enum, parse_number, ElementAttrs, ElementHandler, ParseContext};
use crate::domain::{Comment, CommentAction, Note, NoteState, TimestampFormat};
use crate::error::{NoteError, Result};
use chrono::{DateTime, Utc};

/// Fields of the comment being read, collected until `</comment>`
#[derive(Debug, Default)]
struct CommentScratch {
    date: Option<DateTime<Utc>>,
    uid: u64,
    user: Option<String>,
    text: Option<String>,
    html: Option<String>,
    action: Option<CommentAction>,
}

impl CommentScratch {
    /// Build the comment and leave the scratch empty for the next one
    fn take_comment(&mut self, ctx: &mut ParseContext<'_>) -> Comment {
        let scratch = std::mem::take(self);
        let author = ctx.users.create_user(scratch.uid, scratch.user.as_deref());
        Comment::new(
            scratch.text.unwrap_or_default(),
            scratch.html,
            scratch.action,
            author,
            scratch.date,
        )
    }
}

#[derive(Debug, Default)]
pub struct ApiHandler {
    notes: Vec<Note>,
    note: Option<Note>,
    comment: CommentScratch,
}

impl ApiHandler {
    pub fn new(capacity: usize) -> Self {
        ApiHandler {
            notes: Vec::with_capacity(capacity),
            ..Self::default()
        }
    }
}

impl ElementHandler for ApiHandler {
    fn start_element(
        &mut self,
        _ctx: &mut ParseContext<'_>,
        name: &str,
        attrs: &ElementAttrs,
    ) -> Result<()> {
        if name == "note" {
            self.note = Some(Note::new(attrs.location(name)?));
        }
        Ok(())
    }

    fn end_element(&mut self, ctx: &mut ParseContext<'_>, name: &str, text: &str) -> Result<()> {
        match name {
            // note fields
            "id" => current_note(&mut self.note, name)?.set_id(parse_number(text, name, "id")?),
            "status" => {
                let state: NoteState = parse_enum(text.trim(), name)?;
                current_note(&mut self.note, name)?.set_state(state);
            }
            "url" => {
                ctx.debug(&format!("note URL: {}", text));
                current_note(&mut self.note, name)?.set_url(Some(text.to_string()));
            }
            "date_created" => {
                let created_at = ctx.parse_date(TimestampFormat::Api, text);
                current_note(&mut self.note, name)?.set_created_at(created_at);
            }
            "note" => {
                let note = self
                    .note
                    .take()
                    .ok_or_else(|| NoteError::malformed("</note> without a matching <note>"))?;
                self.notes.push(note);
            }

            // comment fields
            "date" => self.comment.date = ctx.parse_date(TimestampFormat::Api, text),
            "uid" => self.comment.uid = parse_number(text, name, "uid")?,
            "user" => self.comment.user = Some(text.to_string()),
            "text" => self.comment.text = Some(text.to_string()),
            "html" => self.comment.html = Some(text.to_string()),
            "action" => self.comment.action = Some(parse_enum(text.trim(), name)?),
            "comment" => {
                let note = current_note(&mut self.note, name)?;
                note.append_comment(self.comment.take_comment(ctx));
            }

            _ => {
                if ctx.report_unknown_elements {
                    ctx.debug(&format!("ignoring XML element: {}", name));
                }
            }
        }
        Ok(())
    }

    fn finish(self: Box<Self>) -> Vec<Note> {
        self.notes
    }
}
