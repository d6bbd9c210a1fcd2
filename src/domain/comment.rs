//! Comments on a note

use crate::domain::User;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Why a comment was recorded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommentAction {
    Opened,
    Closed,
    Reopened,
    Commented,
    Hidden,
}

impl FromStr for CommentAction {
    type Err = String;

    /// Case-sensitive: the upstream service only writes lowercase values
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "opened" => Ok(CommentAction::Opened),
            "closed" => Ok(CommentAction::Closed),
            "reopened" => Ok(CommentAction::Reopened),
            "commented" => Ok(CommentAction::Commented),
            "hidden" => Ok(CommentAction::Hidden),
            _ => Err(format!(
                "Invalid comment action: '{}'. Valid actions are: opened, closed, reopened, commented, hidden",
                s
            )),
        }
    }
}

impl fmt::Display for CommentAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CommentAction::Opened => "opened",
            CommentAction::Closed => "closed",
            CommentAction::Reopened => "reopened",
            CommentAction::Commented => "commented",
            CommentAction::Hidden => "hidden",
        };
        f.write_str(name)
    }
}

/// One message in a note's thread. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Comment {
    text: String,
    html_text: Option<String>,
    action: Option<CommentAction>,
    author: User,
    timestamp: Option<DateTime<Utc>>,
}

impl Comment {
    pub fn new(
        text: String,
        html_text: Option<String>,
        action: Option<CommentAction>,
        author: User,
        timestamp: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            text,
            html_text,
            action,
            author,
            timestamp,
        }
    }

    /// Plain text body
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Pre-rendered HTML body (API dialect only)
    pub fn html_text(&self) -> Option<&str> {
        self.html_text.as_deref()
    }

    pub fn action(&self) -> Option<CommentAction> {
        self.action
    }

    pub fn author(&self) -> &User {
        &self.author
    }

    /// Creation time; `None` only when the source date could not be parsed
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.timestamp
    }
}
