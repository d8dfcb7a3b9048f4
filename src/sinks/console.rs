//! Console sinks for standard output and standard error

use crate::core::{LoggerError, Result, Sink};
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleTarget {
    Stdout,
    Stderr,
}

/// Writes messages to the process's standard output or standard error.
///
/// Each message is written with a single locked `write_all`, so messages from
/// different threads do not interleave within the same stream.
#[derive(Debug, Clone, Copy)]
pub struct ConsoleSink {
    target: ConsoleTarget,
}

impl ConsoleSink {
    pub const fn new(target: ConsoleTarget) -> Self {
        Self { target }
    }

    pub const fn stdout() -> Self {
        Self::new(ConsoleTarget::Stdout)
    }

    pub const fn stderr() -> Self {
        Self::new(ConsoleTarget::Stderr)
    }

    pub fn target(&self) -> ConsoleTarget {
        self.target
    }
}

impl Sink for ConsoleSink {
    fn write(&self, text: &str) -> Result<()> {
        let result = match self.target {
            ConsoleTarget::Stdout => std::io::stdout().lock().write_all(text.as_bytes()),
            ConsoleTarget::Stderr => std::io::stderr().lock().write_all(text.as_bytes()),
        };
        result.map_err(|e| {
            LoggerError::io_operation(format!("writing to {}", self.name()), "message not written", e)
        })
    }

    fn flush(&self) -> Result<()> {
        match self.target {
            ConsoleTarget::Stdout => std::io::stdout().flush()?,
            ConsoleTarget::Stderr => std::io::stderr().flush()?,
        }
        Ok(())
    }

    fn name(&self) -> &str {
        match self.target {
            ConsoleTarget::Stdout => "stdout",
            ConsoleTarget::Stderr => "stderr",
        }
    }
}
