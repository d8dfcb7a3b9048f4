//! Structured value printer
//!
//! [`PrettyPrinter`] renders [`Value`]s as JavaScript-like literals. Objects
//! that are already being printed higher up the current path render as
//! `[Circular]`, so self- and mutually-referencing structures terminate.

use super::error::Result;
use super::value::{ErrorValue, Object, Value};

/// Back-reference marker for an object revisited on the current path
pub const CIRCULAR_MARKER: &str = "[Circular]";

/// Options passed to a [`Stringify`] implementation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StringifyOptions {
    /// Spaces per nesting level; `0` prints everything on one line
    pub indent: usize,
}

impl Default for StringifyOptions {
    fn default() -> Self {
        Self { indent: 2 }
    }
}

/// Cycle-safe structured printer for arbitrary values
pub trait Stringify: Send + Sync {
    fn stringify(&self, value: &Value, options: &StringifyOptions) -> Result<String>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PrettyPrinter;

impl PrettyPrinter {
    pub const fn new() -> Self {
        Self
    }
}

impl Stringify for PrettyPrinter {
    fn stringify(&self, value: &Value, options: &StringifyOptions) -> Result<String> {
        let mut printer = Printer {
            out: String::new(),
            indent: options.indent,
            path: Vec::new(),
        };
        printer.value(value, 0);
        Ok(printer.out)
    }
}

struct Printer {
    out: String,
    indent: usize,
    /// Ids of the objects currently open
    path: Vec<usize>,
}

impl Printer {
    fn value(&mut self, value: &Value, depth: usize) {
        match value {
            Value::Null => self.out.push_str("null"),
            Value::Undefined => self.out.push_str("undefined"),
            Value::Bool(b) => self.out.push_str(if *b { "true" } else { "false" }),
            Value::Int(i) => self.out.push_str(&i.to_string()),
            Value::Float(f) => self.out.push_str(&number(*f)),
            Value::Str(s) => quote(&mut self.out, s),
            Value::Regex { pattern, flags } => {
                self.out.push('/');
                self.out.push_str(pattern);
                self.out.push('/');
                self.out.push_str(flags);
            }
            Value::Function(name) => {
                self.out.push_str("[Function: ");
                self.out.push_str(name.as_deref().unwrap_or("(anonymous)"));
                self.out.push(']');
            }
            Value::Error(error) => self.error(error),
            Value::Array(items) => self.array(items, depth),
            Value::Object(object) => self.object(object, depth),
        }
    }

    fn error(&mut self, error: &ErrorValue) {
        let first_line = error.message().lines().next().unwrap_or_default();
        self.out.push('[');
        self.out.push_str(error.name());
        self.out.push_str(": ");
        self.out.push_str(first_line);
        self.out.push(']');
    }

    fn array(&mut self, items: &[Value], depth: usize) {
        if items.is_empty() {
            self.out.push_str("[]");
            return;
        }
        self.out.push('[');
        for (index, item) in items.iter().enumerate() {
            self.break_line(depth + 1);
            self.value(item, depth + 1);
            if index + 1 < items.len() {
                self.out.push(',');
            }
        }
        self.break_line(depth);
        self.out.push(']');
    }

    fn object(&mut self, object: &Object, depth: usize) {
        let id = object.id();
        if self.path.contains(&id) {
            self.out.push_str(CIRCULAR_MARKER);
            return;
        }

        let entries = object.entries();
        if entries.is_empty() {
            self.out.push_str("{}");
            return;
        }

        self.path.push(id);
        self.out.push('{');
        for (index, (key, value)) in entries.iter().enumerate() {
            self.break_line(depth + 1);
            if is_identifier(key) {
                self.out.push_str(key);
            } else {
                quote(&mut self.out, key);
            }
            self.out.push_str(": ");
            self.value(value, depth + 1);
            if index + 1 < entries.len() {
                self.out.push(',');
            }
        }
        self.break_line(depth);
        self.out.push('}');
        self.path.pop();
    }

    fn break_line(&mut self, depth: usize) {
        if self.indent == 0 {
            self.out.push(' ');
        } else {
            self.out.push('\n');
            self.out.push_str(&" ".repeat(self.indent * depth));
        }
    }
}

fn number(f: f64) -> String {
    if f.is_nan() {
        "NaN".to_string()
    } else if f == f64::INFINITY {
        "Infinity".to_string()
    } else if f == f64::NEG_INFINITY {
        "-Infinity".to_string()
    } else {
        f.to_string()
    }
}

fn quote(out: &mut String, s: &str) {
    out.push('\'');
    for c in s.chars() {
        match c {
            '\'' => out.push_str("\\'"),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('\'');
}

fn is_identifier(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}
