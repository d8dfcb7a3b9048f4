//! Loggable values
//!
//! A log call takes any number of heterogeneous [`Value`]s: pre-formatted
//! strings, primitives, structures (which may reference themselves), regular
//! expressions, function placeholders and errors carrying a stack trace.

use parking_lot::RwLock;
use std::backtrace::{Backtrace, BacktraceStatus};
use std::fmt;
use std::sync::Arc;

/// Any value that can be passed to a log call
#[derive(Debug, Clone)]
pub enum Value {
    Null,
    Undefined,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Array(Vec<Value>),
    Object(Object),
    Regex { pattern: String, flags: String },
    Function(Option<String>),
    Error(Arc<ErrorValue>),
}

impl Value {
    pub fn regex(pattern: impl Into<String>, flags: impl Into<String>) -> Self {
        Value::Regex {
            pattern: pattern.into(),
            flags: flags.into(),
        }
    }

    pub fn function(name: impl Into<String>) -> Self {
        Value::Function(Some(name.into()))
    }

    pub fn anonymous_function() -> Self {
        Value::Function(None)
    }

    /// Wrap a Rust error, folding its `source()` chain into the message
    pub fn from_error(error: &(dyn std::error::Error + 'static)) -> Self {
        Value::Error(Arc::new(ErrorValue::from_error(error)))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Value::Error(_))
    }
}

/// A shared, insertion-ordered key/value node.
///
/// Cloning an `Object` clones the handle, not the entries, so an object can be
/// stored inside itself (directly or through other objects).
#[derive(Clone, Default)]
pub struct Object(Arc<RwLock<Vec<(String, Value)>>>);

impl Object {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Object::insert`]
    #[must_use]
    pub fn with<K, V>(self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        self.insert(key, value);
        self
    }

    /// Insert or replace a field, keeping the original position of an existing key.
    ///
    /// Storing an object inside itself, directly or through other objects,
    /// creates a reference cycle: its nodes are never freed until one edge of
    /// the cycle is taken out again with [`Object::remove`].
    pub fn insert<K, V>(&self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<Value>,
    {
        let key = key.into();
        let value = value.into();
        let mut fields = self.0.write();
        match fields.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => fields.push((key, value)),
        }
    }

    /// Take a field out, returning its value
    pub fn remove(&self, key: &str) -> Option<Value> {
        let mut fields = self.0.write();
        let index = fields.iter().position(|(k, _)| k == key)?;
        Some(fields.remove(index).1)
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        self.0
            .read()
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    }

    /// Snapshot of the fields in insertion order
    pub fn entries(&self) -> Vec<(String, Value)> {
        self.0.read().clone()
    }

    pub fn len(&self) -> usize {
        self.0.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.read().is_empty()
    }

    /// Identity of the node, stable for the lifetime of all its handles
    pub fn id(&self) -> usize {
        Arc::as_ptr(&self.0) as *const () as usize
    }

    pub fn ptr_eq(&self, other: &Object) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Object {
    // Keys only: entries may lead back to this object.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keys: Vec<String> = self.0.read().iter().map(|(k, _)| k.clone()).collect();
        f.debug_struct("Object")
            .field("id", &format_args!("{:#x}", self.id()))
            .field("keys", &keys)
            .finish()
    }
}

/// An error with a message and a raw stack trace.
///
/// The raw stack has the conventional shape
/// `"<name>: <message>\n    at <frame>\n    at <frame>"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorValue {
    name: String,
    message: String,
    stack: String,
}

impl ErrorValue {
    /// Create an `Error` capturing the current backtrace
    pub fn new(message: impl Into<String>) -> Self {
        let frames = backtrace_frames(&Backtrace::force_capture());
        Self::with_frames("Error", message, frames)
    }

    pub fn with_frames<I, S>(name: impl Into<String>, message: impl Into<String>, frames: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let name = name.into();
        let message = message.into();
        let mut stack = format!("{}: {}", name, message);
        for frame in frames {
            stack.push_str("\n    at ");
            stack.push_str(frame.as_ref());
        }
        Self {
            name,
            message,
            stack,
        }
    }

    /// Build from a Rust error; each `source()` becomes a `Caused by:` line
    pub fn from_error(error: &(dyn std::error::Error + 'static)) -> Self {
        let mut message = error.to_string();
        let mut source = error.source();
        while let Some(cause) = source {
            message.push_str("\nCaused by: ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        let frames = backtrace_frames(&Backtrace::force_capture());
        Self::with_frames("Error", message, frames)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn stack(&self) -> &str {
        &self.stack
    }
}

impl fmt::Display for ErrorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.message)
    }
}

impl std::error::Error for ErrorValue {}

/// Convert a captured backtrace into `symbol (file:line:col)` frames, skipping
/// frames that have no location
fn backtrace_frames(backtrace: &Backtrace) -> Vec<String> {
    if backtrace.status() != BacktraceStatus::Captured {
        return Vec::new();
    }

    let rendered = backtrace.to_string();
    let mut frames: Vec<(String, Option<String>)> = Vec::new();
    for line in rendered.lines() {
        let trimmed = line.trim();
        if let Some(location) = trimmed.strip_prefix("at ") {
            if let Some((_, slot)) = frames.last_mut() {
                if slot.is_none() {
                    *slot = Some(location.to_string());
                }
            }
            continue;
        }
        if let Some((index, symbol)) = trimmed.split_once(": ") {
            if !index.is_empty() && index.chars().all(|c| c.is_ascii_digit()) {
                frames.push((symbol.to_string(), None));
            }
        }
    }

    // frames without a source location are runtime or unsymbolized noise
    frames
        .into_iter()
        .filter_map(|(symbol, location)| Some(format!("{} ({})", symbol, location?)))
        .collect()
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Value::Str(s.clone())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(i: $t) -> Self {
                    Value::Int(i64::from(i))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<u64> for Value {
    fn from(i: u64) -> Self {
        i64::try_from(i).map(Value::Int).unwrap_or(Value::Float(i as f64))
    }
}

impl From<usize> for Value {
    fn from(i: usize) -> Self {
        i64::try_from(i).map(Value::Int).unwrap_or(Value::Float(i as f64))
    }
}

impl From<f32> for Value {
    fn from(f: f32) -> Self {
        Value::Float(f64::from(f))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Undefined
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(o: Option<T>) -> Self {
        o.map(Into::into).unwrap_or(Value::Null)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::Array(v.into_iter().map(Into::into).collect())
    }
}

impl From<Object> for Value {
    fn from(o: Object) -> Self {
        Value::Object(o)
    }
}

impl From<&Object> for Value {
    fn from(o: &Object) -> Self {
        Value::Object(o.clone())
    }
}

impl From<ErrorValue> for Value {
    fn from(e: ErrorValue) -> Self {
        Value::Error(Arc::new(e))
    }
}

impl From<&Value> for Value {
    fn from(v: &Value) -> Self {
        v.clone()
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Value::Str(s),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => {
                let object = Object::new();
                for (key, value) in map {
                    object.insert(key, Value::from(value));
                }
                Value::Object(object)
            }
        }
    }
}
