//! Logger Capability Module
//!
//! The store reports every cleanup deletion through an injected [`Logger`]
//! rather than a hidden global, so embedders decide where diagnostics go.
//! The default sink forwards to the `tracing` facade; [`StdoutLogger`]
//! covers processes that never install a subscriber, and [`NoopLogger`]
//! silences tests.

use std::fmt;

// == Logger Trait ==
/// Diagnostic sink injected into the cache at construction.
///
/// `printf` carries per-event lines (one per reclaimed entry), `println`
/// carries lifecycle notes. Implementations must be cheap to call; the
/// store invokes them while holding its lock.
pub trait Logger: fmt::Debug + Send + Sync {
    /// Writes one formatted diagnostic line.
    fn printf(&self, args: fmt::Arguments<'_>);

    /// Writes one plain diagnostic line.
    fn println(&self, line: &str);
}

// == Tracing Logger ==
/// Default sink: forwards to the `tracing` macros.
///
/// Per-event lines land at `debug` level, lifecycle notes at `info`,
/// matching the granularity the sweeper itself logs at. Whether anything
/// reaches stdout depends on the subscriber the embedding process
/// installs.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn printf(&self, args: fmt::Arguments<'_>) {
        tracing::debug!("{args}");
    }

    fn println(&self, line: &str) {
        tracing::info!("{line}");
    }
}

// == Stdout Logger ==
/// Writes every line to standard output, prefixed with `cache:`.
///
/// The fallback for processes that do not set up `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutLogger;

impl Logger for StdoutLogger {
    fn printf(&self, args: fmt::Arguments<'_>) {
        println!("cache: {args}");
    }

    fn println(&self, line: &str) {
        println!("cache: {line}");
    }
}

// == Noop Logger ==
/// Discards everything. Intended for tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopLogger;

impl Logger for NoopLogger {
    fn printf(&self, _args: fmt::Arguments<'_>) {}

    fn println(&self, _line: &str) {}
}

// == Recording Logger (test support) ==
/// Captures every line for later assertion.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct RecordingLogger {
    lines: std::sync::Mutex<Vec<String>>,
}

#[cfg(test)]
impl RecordingLogger {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn lines(&self) -> Vec<String> {
        self.lines.lock().expect("recording logger lock poisoned").clone()
    }
}

#[cfg(test)]
impl Logger for RecordingLogger {
    fn printf(&self, args: fmt::Arguments<'_>) {
        self.lines
            .lock()
            .expect("recording logger lock poisoned")
            .push(args.to_string());
    }

    fn println(&self, line: &str) {
        self.lines
            .lock()
            .expect("recording logger lock poisoned")
            .push(line.to_string());
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noop_logger_discards() {
        let logger = NoopLogger;
        logger.printf(format_args!("dropped {}", 1));
        logger.println("dropped");
    }

    #[test]
    fn test_recording_logger_captures_in_order() {
        let logger = RecordingLogger::new();
        logger.printf(format_args!("first {}", "line"));
        logger.println("second line");

        let lines = logger.lines();
        assert_eq!(lines, vec!["first line".to_string(), "second line".to_string()]);
    }

    #[test]
    fn test_loggers_are_object_safe() {
        let sinks: Vec<Box<dyn Logger>> =
            vec![Box::new(TracingLogger), Box::new(StdoutLogger), Box::new(NoopLogger)];
        for sink in &sinks {
            sink.printf(format_args!("probe"));
            sink.println("probe");
        }
    }
}
