//! Where the reader sends its warnings and debug chatter

use log::Level;

/// Sink for leveled diagnostic messages. Reporting never fails or blocks.
pub trait Diagnostics {
    fn report(&self, level: Level, message: &str);
}

/// Forwards every message to the `log` facade
#[derive(Debug, Default, Clone, Copy)]
pub struct LogDiagnostics;

impl Diagnostics for LogDiagnostics {
    fn report(&self, level: Level, message: &str) {
        log::log!(target: "notexml::reader", level, "{}", message);
    }
}
