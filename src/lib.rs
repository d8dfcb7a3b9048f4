//! # hiplog
//!
//! A leveled console logger that renders any mix of values into one aligned,
//! colorized message per call.
//!
//! ## Features
//!
//! - **Eight syslog-style levels** by default, or any ordered list of names
//! - **Mixed values**: strings, numbers, nested objects with cycles, errors with cleaned stack traces
//! - **Aligned output**: continuation lines start under the first body column
//! - **Routing by severity**: warnings and worse to stderr, the rest to stdout
//! - **Environment presets** for development, test and production
//!
//! ```
//! use hiplog::prelude::*;
//! use std::sync::Arc;
//!
//! let sink = Arc::new(MemorySink::new());
//! let logger = Logger::builder().sink(sink.clone()).colors(false).build();
//!
//! logger.warning(&["disk usage".into(), 93.into(), "%".into()]).unwrap();
//! assert_eq!(sink.contents(), " WARN • disk usage 93 %\n");
//! ```

pub mod core;
pub mod env;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        ConfigOverrides, ErrorValue, LevelHandle, LevelStyle, Logger, LoggerBuilder,
        LoggerConfig, LoggerError, LoggerMetrics, Object, Result, Severity, Sink,
        StreamSelector, TimestampFormat, Value,
    };
    pub use crate::sinks::{ConsoleSink, MemorySink, WriterSink};
}

pub use crate::core::{
    ConfigOverrides, ErrorValue, LevelHandle, Logger, LoggerBuilder, LoggerConfig, LoggerError,
    LoggerMetrics, Object, Result, Severity, Sink, StreamSelector, TimestampFormat, Value,
};
pub use crate::env::{from_env, from_env_map};
pub use crate::sinks::{ConsoleSink, MemorySink, WriterSink};
