//! Terminal styling capability

use super::log_level::Style;
use std::borrow::Cow;

/// Wraps text with a terminal styling directive.
pub trait Colorizer: Send + Sync {
    fn colorize(&self, text: &str, style: Style) -> String;
}

/// SGR escape sequence colorizer built on `colored` color codes
#[derive(Debug, Clone, Copy)]
pub struct AnsiColorizer {
    enabled: bool,
}

impl AnsiColorizer {
    pub const fn new() -> Self {
        Self { enabled: true }
    }

    pub const fn with_colors(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Follow `colored`'s own terminal and `CLICOLOR`/`NO_COLOR` detection
    pub fn detect() -> Self {
        Self::with_colors(colored::control::SHOULD_COLORIZE.should_colorize())
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

impl Default for AnsiColorizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Colorizer for AnsiColorizer {
    fn colorize(&self, text: &str, style: Style) -> String {
        if !self.enabled || text.is_empty() {
            return text.to_string();
        }

        // `colored::Colorize` would consult its global SHOULD_COLORIZE and
        // override `enabled`, so only its color codes are borrowed here.
        let mut codes: Vec<Cow<'static, str>> = Vec::with_capacity(3);
        if style.bold {
            codes.push(Cow::Borrowed("1"));
        }
        if style.inverse {
            codes.push(Cow::Borrowed("7"));
        }
        codes.push(style.color.to_color().to_fg_str());

        format!("\x1b[{}m{}\x1b[0m", codes.join(";"), text)
    }
}

/// Colorizer that never styles anything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoColor;

impl Colorizer for NoColor {
    fn colorize(&self, text: &str, _style: Style) -> String {
        text.to_string()
    }
}
