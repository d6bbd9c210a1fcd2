#![allow(dead_code)]

use assert_cmd::Command;
use log::Level;
use notexml::infrastructure::Diagnostics;
use std::cell::RefCell;
use std::rc::Rc;

pub fn notexml_cmd() -> Command {
    let mut cmd = Command::cargo_bin("notexml").unwrap();
    cmd.env_remove("NOTEXML_CONFIG");
    cmd.env_remove("RUST_LOG");
    cmd
}

/// Keeps every reported message so tests can look at them after parsing
#[derive(Debug, Clone, Default)]
pub struct RecordingDiagnostics {
    messages: Rc<RefCell<Vec<(Level, String)>>>,
}

impl RecordingDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn at(&self, level: Level) -> Vec<String> {
        self.messages
            .borrow()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.clone())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.borrow().is_empty()
    }
}

impl Diagnostics for RecordingDiagnostics {
    fn report(&self, level: Level, message: &str) {
        self.messages.borrow_mut().push((level, message.to_string()));
    }
}
