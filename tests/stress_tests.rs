//! Stress tests for concurrent emission
//!
//! These tests verify:
//! - Whole messages are written under concurrent load on a shared sink
//! - Per-thread call order is preserved on one sink
//! - Metrics stay consistent across threads
//! - Routing by rank holds under load

use hiplog::core::colorize::NoColor;
use hiplog::core::{Severity, StreamSelector};
use hiplog::prelude::*;
use std::collections::HashMap;
use std::sync::Arc;
use std::thread;
use tempfile::TempDir;

const THREADS: usize = 8;
const PER_THREAD: usize = 250;

fn shared_logger(level: &str) -> (Arc<Logger>, Arc<MemorySink>) {
    let sink = Arc::new(MemorySink::new());
    let logger = Logger::builder()
        .sink(sink.clone())
        .colorizer(Arc::new(NoColor))
        .level(level)
        .build();
    (Arc::new(logger), sink)
}

/// Every message arrives whole and each thread's messages keep their order
#[test]
fn test_concurrent_messages_stay_whole() {
    let (logger, sink) = shared_logger("debug");

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || {
                for i in 0..PER_THREAD {
                    logger
                        .info(&["thread".into(), t.into(), "message".into(), i.into()])
                        .expect("write to memory sink");
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("logging thread panicked");
    }

    let lines = sink.lines();
    assert_eq!(lines.len(), THREADS * PER_THREAD);

    let mut next: HashMap<usize, usize> = HashMap::new();
    for line in &lines {
        let words: Vec<&str> = line
            .strip_prefix(" INFO • ")
            .unwrap_or_else(|| panic!("malformed line: {:?}", line))
            .split(' ')
            .collect();
        assert_eq!(words.len(), 4, "interleaved line: {:?}", line);
        let thread: usize = words[1].parse().expect("thread number");
        let index: usize = words[3].parse().expect("message number");

        let expected = next.entry(thread).or_insert(0);
        assert_eq!(index, *expected, "thread {} out of order", thread);
        *expected += 1;
    }

    assert_eq!(logger.metrics().written_count(), (THREADS * PER_THREAD) as u64);
}

/// Multi-line messages from many threads never interleave line by line
#[test]
fn test_concurrent_multiline_blocks() {
    let (logger, sink) = shared_logger("debug");

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || {
                let payload = Object::new().with("thread", t).with("text", "x".repeat(250));
                for _ in 0..20 {
                    logger
                        .warning(&["payload".into(), (&payload).into()])
                        .expect("write to memory sink");
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("logging thread panicked");
    }

    let contents = sink.contents();
    let blocks: Vec<&str> = contents
        .split(" WARN • ")
        .filter(|block| !block.is_empty())
        .collect();
    assert_eq!(blocks.len(), THREADS * 20);

    for block in blocks {
        let thread_line = block
            .lines()
            .find(|line| line.trim_start().starts_with("thread:"))
            .expect("thread field");
        let text_line = block
            .lines()
            .find(|line| line.trim_start().starts_with("text:"))
            .expect("text field");
        assert!(thread_line.starts_with("          thread: "));
        assert!(text_line.ends_with(&format!("'{}'", "x".repeat(250))));
    }
}

/// Filtered and written counts add up across threads
#[test]
fn test_concurrent_metrics() {
    let (logger, sink) = shared_logger("notice");

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || {
                for i in 0..PER_THREAD {
                    let severity = Severity::ALL[(t + i) % Severity::ALL.len()];
                    logger
                        .emit(severity.rank(), &[i.into()])
                        .expect("write to memory sink");
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("logging thread panicked");
    }

    let metrics = logger.metrics();
    assert_eq!(metrics.total_calls(), (THREADS * PER_THREAD) as u64);
    assert_eq!(metrics.written_count(), sink.lines().len() as u64);
    assert_eq!(metrics.failed_count(), 0);
    // ranks 0..=5 of every 8 pass
    assert_eq!(metrics.written_count(), (THREADS * PER_THREAD * 6 / 8) as u64);
}

/// Routing stays by rank when many threads share one split selector
#[test]
fn test_concurrent_routing() {
    let errors = Arc::new(MemorySink::named("errors"));
    let output = Arc::new(MemorySink::named("output"));
    let logger = Arc::new(
        Logger::builder()
            .stream(StreamSelector::split(errors.clone(), output.clone()))
            .colors(false)
            .level("debug")
            .build(),
    );

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || {
                for i in 0..PER_THREAD {
                    let severity = Severity::ALL[i % Severity::ALL.len()];
                    logger
                        .emit(severity.rank(), &[severity.to_str().into()])
                        .expect("write to memory sink");
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("logging thread panicked");
    }

    for line in errors.lines() {
        let name = line.rsplit(' ').next().unwrap_or_default();
        let rank = logger.rank_of(name).expect("known level");
        assert!(rank <= 4, "{} went to errors", name);
    }
    for line in output.lines() {
        let name = line.rsplit(' ').next().unwrap_or_default();
        let rank = logger.rank_of(name).expect("known level");
        assert!(rank >= 5, "{} went to output", name);
    }
    assert_eq!(errors.lines().len() + output.lines().len(), THREADS * PER_THREAD);
}

/// A file-backed sink shared by many threads receives every line
#[test]
fn test_concurrent_file_sink() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("stress.log");

    let sink = Arc::new(WriterSink::append_to(&log_file).expect("Failed to open log file"));
    let logger = Arc::new(
        Logger::builder()
            .sink(sink)
            .colors(false)
            .level("debug")
            .build(),
    );

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || {
                for i in 0..PER_THREAD {
                    logger
                        .debug(&[format!("t{}-m{}", t, i).into()])
                        .expect("write to file sink");
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("logging thread panicked");
    }
    logger.flush().expect("Failed to flush");

    let content = std::fs::read_to_string(&log_file).expect("Failed to read log file");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), THREADS * PER_THREAD);
    assert!(lines.iter().all(|line| line.starts_with("DEBUG • t")));
}
