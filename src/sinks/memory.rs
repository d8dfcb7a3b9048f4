//! In-memory sink for capturing rendered messages

use crate::core::{Result, Sink};
use parking_lot::Mutex;

/// Collects everything written to it.
///
/// Useful in tests and for rendering messages into a string.
#[derive(Debug)]
pub struct MemorySink {
    name: String,
    buffer: Mutex<String>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::named("memory")
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            buffer: Mutex::new(String::new()),
        }
    }

    pub fn contents(&self) -> String {
        self.buffer.lock().clone()
    }

    pub fn lines(&self) -> Vec<String> {
        self.buffer.lock().lines().map(str::to_string).collect()
    }

    /// Return the contents and leave the sink empty
    pub fn take(&self) -> String {
        std::mem::take(&mut *self.buffer.lock())
    }

    pub fn clear(&self) {
        self.buffer.lock().clear();
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.lock().is_empty()
    }
}

impl Default for MemorySink {
    fn default() -> Self {
        Self::new()
    }
}

impl Sink for MemorySink {
    fn write(&self, text: &str) -> Result<()> {
        self.buffer.lock().push_str(text);
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}
