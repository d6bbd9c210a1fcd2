//! Output formatting utilities

use crate::application::NoteStats;
use crate::domain::{Comment, Note};
use chrono::{DateTime, Utc};

fn format_date(date: Option<DateTime<Utc>>) -> String {
    match date {
        Some(date) => date.format("%Y-%m-%d %H:%M").to_string(),
        None => "????-??-?? ??:??".to_string(),
    }
}

fn format_comment(comment: &Comment) -> String {
    let action = comment
        .action()
        .map(|action| format!(" [{}]", action))
        .unwrap_or_default();
    let text: Vec<&str> = comment.text().split_whitespace().collect();
    format!(
        "    {}  {}{}: {}\n",
        format_date(comment.timestamp()),
        comment.author(),
        action,
        text.join(" ")
    )
}

/// Format notes for display, one line each
pub fn format_note_list<'a>(notes: impl IntoIterator<Item = &'a Note>, with_comments: bool) -> String {
    let mut output = String::new();
    for note in notes {
        let count = note.comments().len();
        output.push_str(&format!(
            "#{}  {:<6}  {}  {}  {} comment{}\n",
            note.id(),
            note.state(),
            note.location(),
            format_date(note.created_at()),
            count,
            if count == 1 { "" } else { "s" }
        ));
        if with_comments {
            for comment in note.comments() {
                output.push_str(&format_comment(comment));
            }
        }
    }

    if output.is_empty() {
        return "No notes found".to_string();
    }
    output
}

/// Format totals for display
pub fn format_stats(stats: &NoteStats) -> String {
    format!(
        "notes:    {}\nopen:     {}\nclosed:   {}\ncomments: {}\ndegraded: {}\n",
        stats.notes, stats.open, stats.closed, stats.comments, stats.degraded
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CommentAction, LatLon, NoteState, User};
    use chrono::TimeZone;

    fn sample_note() -> Note {
        let date = Utc.with_ymd_and_hms(2015, 1, 1, 12, 30, 0).unwrap();
        let mut note = Note::new(LatLon::new(1.0, 2.0));
        note.set_id(5);
        note.set_created_at(Some(date));
        note.append_comment(Comment::new(
            "hi\nthere".to_string(),
            None,
            Some(CommentAction::Opened),
            User::new(7, Some("alice")),
            Some(date),
        ));
        note
    }

    #[test]
    fn test_format_empty_list() {
        let notes: Vec<Note> = vec![];
        assert_eq!(format_note_list(&notes, false), "No notes found");
    }

    #[test]
    fn test_format_note_line() {
        let notes = vec![sample_note()];
        let output = format_note_list(&notes, false);
        assert_eq!(
            output,
            "#5  open    1.0000000,2.0000000  2015-01-01 12:30  1 comment\n"
        );
    }

    #[test]
    fn test_format_with_comments() {
        let notes = vec![sample_note()];
        let output = format_note_list(&notes, true);
        assert!(output.contains("    2015-01-01 12:30  alice (7) [opened]: hi there\n"));
    }

    #[test]
    fn test_format_undated_closed_note() {
        let mut note = Note::new(LatLon::new(0.0, 0.0));
        note.set_state(NoteState::Closed);
        let output = format_note_list(&[note], false);
        assert!(output.contains("closed"));
        assert!(output.contains("????-??-?? ??:??"));
        assert!(output.contains("0 comments"));
    }

    #[test]
    fn test_format_stats() {
        let stats = NoteStats {
            notes: 3,
            open: 2,
            closed: 1,
            comments: 6,
            degraded: 0,
        };
        let output = format_stats(&stats);
        assert!(output.contains("notes:    3\n"));
        assert!(output.contains("comments: 6\n"));
    }
}
