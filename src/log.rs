//! Leveled log sink injected into the solver.
//!
//! The solver never writes to a global logger directly; it reports through a
//! [`LogSink`]. [`TracingLog`] forwards to the `tracing` macros so the
//! caller's subscriber decides where messages go.

use tracing::{debug, error, info, warn};

/// Severity of a solver message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogLevel {
    /// Progress information.
    Info,
    /// Non-fatal anomaly (unused vehicles, unrepaired routes).
    Warning,
    /// Fatal condition about to be returned as an error.
    Error,
    /// Completed phase with a positive outcome.
    Success,
    /// Detailed traces such as route listings.
    Verbose,
}

/// Receiver of leveled solver messages.
pub trait LogSink {
    /// Records `message` at `level`. Must not block.
    fn log(&self, level: LogLevel, message: &str);
}

/// Forwards messages to `tracing`.
///
/// `Success` is emitted at info level with an `outcome = "success"` field,
/// `Verbose` at debug level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLog;

impl LogSink for TracingLog {
    fn log(&self, level: LogLevel, message: &str) {
        match level {
            LogLevel::Info => info!("{message}"),
            LogLevel::Warning => warn!("{message}"),
            LogLevel::Error => error!("{message}"),
            LogLevel::Success => info!(outcome = "success", "{message}"),
            LogLevel::Verbose => debug!("{message}"),
        }
    }
}

/// Discards every message.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullLog;

impl LogSink for NullLog {
    fn log(&self, _level: LogLevel, _message: &str) {}
}

impl<T: LogSink + ?Sized> LogSink for &T {
    fn log(&self, level: LogLevel, message: &str) {
        (**self).log(level, message);
    }
}
