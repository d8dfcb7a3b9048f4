//! Sink over any `std::io::Write`

use crate::core::{LoggerError, Result, Sink};
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes messages to a wrapped writer, e.g. a file or a socket.
pub struct WriterSink<W: Write + Send> {
    name: String,
    writer: Mutex<W>,
}

impl<W: Write + Send> WriterSink<W> {
    pub fn new(name: impl Into<String>, writer: W) -> Self {
        Self {
            name: name.into(),
            writer: Mutex::new(writer),
        }
    }

    /// Unwrap the inner writer
    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

impl WriterSink<BufWriter<File>> {
    /// Append to the file at `path`, creating it if needed
    pub fn append_to(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| {
                LoggerError::io_operation(
                    format!("opening '{}'", path.display()),
                    "cannot open file for appending",
                    e,
                )
            })?;
        Ok(Self::new(path.display().to_string(), BufWriter::new(file)))
    }
}

impl<W: Write + Send> Sink for WriterSink<W> {
    fn write(&self, text: &str) -> Result<()> {
        self.writer
            .lock()
            .write_all(text.as_bytes())
            .map_err(|e| LoggerError::io_operation(format!("writing to {}", self.name), "message not written", e))
    }

    fn flush(&self) -> Result<()> {
        self.writer.lock().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_writes_to_inner() {
        let sink = WriterSink::new("buffer", Vec::new());
        sink.write("hello ").unwrap();
        sink.write("world").unwrap();
        assert_eq!(sink.into_inner(), b"hello world");
    }

    #[test]
    fn test_failure_is_reported() {
        let sink = WriterSink::new("pipe", ClosedPipe);
        let err = sink.write("lost").unwrap_err();
        assert!(matches!(err, LoggerError::IoOperation { .. }));
        assert!(err.to_string().contains("writing to pipe"));
    }

    #[test]
    fn test_append_to_file() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("app.log");

        let sink = WriterSink::append_to(&path).expect("Failed to open sink");
        sink.write("first\n").unwrap();
        sink.flush().unwrap();

        let content = std::fs::read_to_string(&path).expect("Failed to read log file");
        assert_eq!(content, "first\n");
    }
}
