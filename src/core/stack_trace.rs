//! Stack trace separation and cleanup

use std::path::PathBuf;

/// Indentation a [`StackTraceFormatter`] puts in front of every frame
pub const STACK_INDENT: &str = "    ";

/// Symbol prefixes of frames that belong to the runtime or to backtrace capture
const INTERNAL_PREFIXES: &[&str] = &[
    "std::",
    "core::",
    "alloc::",
    "backtrace::",
    "<std::",
    "<core::",
    "<alloc::",
    "<F as core::",
    "<fn(",
    "test::",
    "__rust",
    "rust_begin_unwind",
    "__libc_start",
    "hiplog::core::value::",
];

/// Whole symbols of process entry, thread start and unsymbolized frames
const INTERNAL_SYMBOLS: &[&str] = &[
    "main",
    "_start",
    "start_thread",
    "clone",
    "clone3",
    "__clone",
    "__clone3",
    "<unknown>",
];

/// Information a [`StackTraceFormatter`] may use to shorten frames
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StackTraceContext {
    /// Paths under this directory are printed relative to it
    pub root_dir: Option<PathBuf>,
}

impl StackTraceContext {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_root_dir(mut self, root_dir: impl Into<PathBuf>) -> Self {
        self.root_dir = Some(root_dir.into());
        self
    }
}

/// Cleans a raw stack trace into display form.
///
/// Implementations return one frame per line, each starting with
/// [`STACK_INDENT`].
pub trait StackTraceFormatter: Send + Sync {
    fn format_stack_trace(&self, stack: &str, context: &StackTraceContext) -> String;
}

/// Default formatter: drops runtime frames and relativizes paths
#[derive(Debug, Clone, Default)]
pub struct CleanStackTrace {
    extra_ignored: Vec<String>,
}

impl CleanStackTrace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Also drop frames whose symbol starts with `prefix`
    #[must_use]
    pub fn ignore(mut self, prefix: impl Into<String>) -> Self {
        self.extra_ignored.push(prefix.into());
        self
    }

    fn is_internal(&self, frame: &str) -> bool {
        let symbol = frame.split(" (").next().unwrap_or(frame);
        INTERNAL_SYMBOLS.contains(&symbol)
            || INTERNAL_PREFIXES.iter().any(|p| symbol.starts_with(p))
            || self.extra_ignored.iter().any(|p| symbol.starts_with(p.as_str()))
    }
}

impl StackTraceFormatter for CleanStackTrace {
    fn format_stack_trace(&self, stack: &str, context: &StackTraceContext) -> String {
        let root = context
            .root_dir
            .as_ref()
            .map(|dir| format!("{}/", dir.display().to_string().trim_end_matches('/')));

        stack
            .lines()
            .filter_map(|line| line.trim_start().strip_prefix("at "))
            .filter(|frame| !self.is_internal(frame))
            .map(|frame| {
                let frame = match &root {
                    Some(root) => frame.replace(root.as_str(), ""),
                    None => frame.to_string(),
                };
                format!("{}at {}", STACK_INDENT, frame)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Split a raw stack into the human message and the frame lines.
///
/// The stack starts at the first `at ` line that ends in a `:line:col`
/// location; everything before it is the message, with a leading `Error: `
/// removed.
pub fn separate_message_from_stack(raw: &str) -> (String, String) {
    let lines: Vec<&str> = raw.lines().collect();
    let first_frame = lines
        .iter()
        .position(|line| is_located_frame(line))
        .unwrap_or(lines.len());

    let message = lines[..first_frame].join("\n");
    let message = message
        .strip_prefix("Error: ")
        .map(str::to_string)
        .unwrap_or(message);
    let stack = lines[first_frame..].join("\n");
    (message, stack)
}

/// `at <symbol> (<file>:<line>:<col>)` or `at <file>:<line>:<col>`
fn is_located_frame(line: &str) -> bool {
    let Some(frame) = line.trim_start().strip_prefix("at ") else {
        return false;
    };
    let location = frame.trim_end();
    let location = location.strip_suffix(')').unwrap_or(location);

    let mut parts = location.rsplitn(3, ':');
    let is_number = |part: Option<&str>| {
        part.is_some_and(|p| !p.is_empty() && p.chars().all(|c| c.is_ascii_digit()))
    };
    is_number(parts.next()) && is_number(parts.next()) && parts.next().is_some_and(|p| !p.is_empty())
}
