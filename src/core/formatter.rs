//! Rendering of a single value into display text

use super::ansi::visible_width;
use super::colorize::Colorizer;
use super::error::Result;
use super::log_level::{ColorId, Style};
use super::stack_trace::{
    separate_message_from_stack, CleanStackTrace, StackTraceContext, StackTraceFormatter,
    STACK_INDENT,
};
use super::stringify::{PrettyPrinter, Stringify, StringifyOptions};
use super::value::{ErrorValue, Value};
use std::fmt;
use std::sync::Arc;

/// Structured values whose visible length is below this are printed inline
pub const INLINE_WIDTH_LIMIT: usize = 200;

/// Indentation requested from the structured printer
pub const STRUCTURED_INDENT: usize = 2;

/// Renders one value, dispatching on its shape.
///
/// - errors: red message followed by the cleaned stack and a blank line
/// - strings: returned unchanged
/// - everything else: structured printer output in grey, inline when short,
///   otherwise as a block surrounded by newlines
#[derive(Clone)]
pub struct ValueFormatter {
    stringifier: Arc<dyn Stringify>,
    trace_formatter: Arc<dyn StackTraceFormatter>,
    trace_context: StackTraceContext,
    lenient: bool,
}

impl ValueFormatter {
    pub fn new() -> Self {
        Self {
            stringifier: Arc::new(PrettyPrinter::new()),
            trace_formatter: Arc::new(CleanStackTrace::new()),
            trace_context: StackTraceContext::default(),
            lenient: false,
        }
    }

    #[must_use]
    pub fn with_stringifier(mut self, stringifier: Arc<dyn Stringify>) -> Self {
        self.stringifier = stringifier;
        self
    }

    #[must_use]
    pub fn with_trace_formatter(mut self, trace_formatter: Arc<dyn StackTraceFormatter>) -> Self {
        self.trace_formatter = trace_formatter;
        self
    }

    #[must_use]
    pub fn with_trace_context(mut self, context: StackTraceContext) -> Self {
        self.trace_context = context;
        self
    }

    /// Render a placeholder instead of failing when the structured printer errors.
    ///
    /// Off by default: printer failures propagate to the log call.
    #[must_use]
    pub fn lenient(mut self, lenient: bool) -> Self {
        self.lenient = lenient;
        self
    }

    pub fn trace_context(&self) -> &StackTraceContext {
        &self.trace_context
    }

    pub fn format(&self, value: &Value, colorizer: &dyn Colorizer) -> Result<String> {
        match value {
            Value::Error(error) => Ok(self.format_error(error, colorizer)),
            Value::Str(s) => Ok(s.clone()),
            other => self.format_structured(other, colorizer),
        }
    }

    fn format_error(&self, error: &ErrorValue, colorizer: &dyn Colorizer) -> String {
        let (message, stack) = separate_message_from_stack(error.stack());
        let trace = self
            .trace_formatter
            .format_stack_trace(&stack, &self.trace_context);
        let trace = trace
            .split('\n')
            .map(|line| line.strip_prefix(STACK_INDENT).unwrap_or(line))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            "{}\n{}\n",
            colorizer.colorize(&message, Style::new(ColorId::Red)),
            trace
        )
    }

    fn format_structured(&self, value: &Value, colorizer: &dyn Colorizer) -> Result<String> {
        let options = StringifyOptions {
            indent: STRUCTURED_INDENT,
        };
        let text = match self.stringifier.stringify(value, &options) {
            Ok(text) => text,
            Err(e) if self.lenient => format!("[Unformattable: {}]", e),
            Err(e) => return Err(e),
        };

        let text = if visible_width(&text) < INLINE_WIDTH_LIMIT {
            collapse_lines(&text)
        } else {
            format!("\n{}\n", text)
        };
        Ok(colorizer.colorize(&text, Style::dim()))
    }
}

impl Default for ValueFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ValueFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueFormatter")
            .field("trace_context", &self.trace_context)
            .field("lenient", &self.lenient)
            .finish_non_exhaustive()
    }
}

/// Replace every newline and the spaces that follow it with a single space
fn collapse_lines(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\n' {
            while chars.peek() == Some(&' ') {
                chars.next();
            }
            out.push(' ');
        } else {
            out.push(c);
        }
    }
    out
}
