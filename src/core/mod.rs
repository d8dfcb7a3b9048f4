//! Rendering pipeline, configuration and the logger

pub mod ansi;
pub mod colorize;
pub mod composer;
pub mod config;
pub mod error;
pub mod formatter;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod preset;
pub mod sink;
pub mod stack_trace;
pub mod stringify;
pub mod timestamp;
pub mod value;

pub use ansi::{strip_ansi, visible_width};
pub use colorize::{AnsiColorizer, Colorizer, NoColor};
pub use composer::MessageComposer;
pub use config::{ConfigOverrides, LoggerConfig, StreamSelector, DEFAULT_SEPARATOR};
pub use error::{LoggerError, Result};
pub use formatter::{ValueFormatter, INLINE_WIDTH_LIMIT};
pub use log_level::{ColorId, LevelStyle, Severity, Style};
pub use logger::{LevelHandle, Logger, LoggerBuilder};
pub use metrics::LoggerMetrics;
pub use sink::{SharedSink, Sink};
pub use stack_trace::{
    separate_message_from_stack, CleanStackTrace, StackTraceContext, StackTraceFormatter,
};
pub use stringify::{PrettyPrinter, Stringify, StringifyOptions, CIRCULAR_MARKER};
pub use timestamp::{Clock, FixedClock, SystemClock, TimestampFormat, DEFAULT_TIME_PATTERN};
pub use value::{ErrorValue, Object, Value};
