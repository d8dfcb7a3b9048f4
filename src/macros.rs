//! Logging macros that accept any mix of values.
//!
//! Every argument after the logger is converted with `Value::from`, so
//! strings, numbers, objects and errors can be passed side by side.
//!
//! # Examples
//!
//! ```
//! use hiplog::prelude::*;
//! use hiplog::info;
//!
//! let logger = Logger::builder().sink(std::sync::Arc::new(MemorySink::new())).build();
//!
//! info!(logger, "Server started").unwrap();
//!
//! let port = 8080;
//! info!(logger, "listening on", port).unwrap();
//!
//! let user = Object::new().with("id", 42).with("action", "login");
//! info!(logger, "user", user).unwrap();
//! ```

/// Log at a level given by name.
///
/// Returns `Err(LoggerError::UnknownLevel)` when the logger has no such level.
///
/// ```
/// # use hiplog::prelude::*;
/// # let logger = Logger::builder().sink(std::sync::Arc::new(MemorySink::new())).build();
/// use hiplog::log;
/// log!(logger, "notice", "Simple message").unwrap();
/// log!(logger, "error", "Error code:", 500).unwrap();
/// assert!(log!(logger, "verbose", "nope").is_err());
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr $(, $part:expr)* $(,)?) => {
        $logger.log($level, &[$($crate::Value::from($part)),*])
    };
}

#[macro_export]
macro_rules! emergency {
    ($logger:expr $(, $part:expr)* $(,)?) => {
        $crate::log!($logger, "emergency" $(, $part)*)
    };
}

#[macro_export]
macro_rules! alert {
    ($logger:expr $(, $part:expr)* $(,)?) => {
        $crate::log!($logger, "alert" $(, $part)*)
    };
}

#[macro_export]
macro_rules! critical {
    ($logger:expr $(, $part:expr)* $(,)?) => {
        $crate::log!($logger, "critical" $(, $part)*)
    };
}

/// Log an error-level message.
///
/// ```
/// # use hiplog::prelude::*;
/// # let logger = Logger::builder().sink(std::sync::Arc::new(MemorySink::new())).build();
/// use hiplog::error;
/// let failure = ErrorValue::new("connection refused");
/// error!(logger, "Failed to connect to database", failure).unwrap();
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr $(, $part:expr)* $(,)?) => {
        $crate::log!($logger, "error" $(, $part)*)
    };
}

#[macro_export]
macro_rules! warning {
    ($logger:expr $(, $part:expr)* $(,)?) => {
        $crate::log!($logger, "warning" $(, $part)*)
    };
}

#[macro_export]
macro_rules! notice {
    ($logger:expr $(, $part:expr)* $(,)?) => {
        $crate::log!($logger, "notice" $(, $part)*)
    };
}

#[macro_export]
macro_rules! info {
    ($logger:expr $(, $part:expr)* $(,)?) => {
        $crate::log!($logger, "info" $(, $part)*)
    };
}

#[macro_export]
macro_rules! debug {
    ($logger:expr $(, $part:expr)* $(,)?) => {
        $crate::log!($logger, "debug" $(, $part)*)
    };
}
