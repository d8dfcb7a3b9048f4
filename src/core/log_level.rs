//! Severity levels and their display styles

use serde::{Deserialize, Serialize};
use std::fmt;

/// The conventional syslog-style severity sequence, most severe first.
///
/// The discriminant is the rank of the level in [`Severity::ALL`], which is
/// also the default level sequence of a [`Logger`](crate::Logger).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Emergency = 0,
    Alert = 1,
    Critical = 2,
    Error = 3,
    Warning = 4,
    Notice = 5,
    Info = 6,
    Debug = 7,
}

impl Severity {
    pub const ALL: [Severity; 8] = [
        Severity::Emergency,
        Severity::Alert,
        Severity::Critical,
        Severity::Error,
        Severity::Warning,
        Severity::Notice,
        Severity::Info,
        Severity::Debug,
    ];

    pub fn to_str(&self) -> &'static str {
        match self {
            Severity::Emergency => "emergency",
            Severity::Alert => "alert",
            Severity::Critical => "critical",
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Notice => "notice",
            Severity::Info => "info",
            Severity::Debug => "debug",
        }
    }

    /// Rank in the default level sequence
    pub fn rank(&self) -> usize {
        *self as usize
    }

    /// Five-column label shown in the message header
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Emergency => "EMERG",
            Severity::Alert => "ALERT",
            Severity::Critical => "CRITI",
            Severity::Error => "ERROR",
            Severity::Warning => " WARN",
            Severity::Notice => " NOTE",
            Severity::Info => " INFO",
            Severity::Debug => "DEBUG",
        }
    }

    pub fn style(&self) -> Style {
        match self {
            Severity::Emergency | Severity::Critical => Style::new(ColorId::Red).bold(),
            Severity::Alert | Severity::Error => Style::new(ColorId::Red),
            Severity::Warning => Style::new(ColorId::Magenta),
            Severity::Notice => Style::new(ColorId::Yellow),
            Severity::Info => Style::new(ColorId::Blue),
            Severity::Debug => Style::new(ColorId::Grey),
        }
    }

    /// Emergency and alert labels are printed in reverse video
    pub fn inverse(&self) -> bool {
        matches!(self, Severity::Emergency | Severity::Alert)
    }

    pub fn level_style(&self) -> LevelStyle {
        LevelStyle {
            label: self.label().to_string(),
            style: self.style(),
            inverse: self.inverse(),
        }
    }

    /// Names of the default level sequence
    pub fn names() -> Vec<String> {
        Self::ALL.iter().map(|s| s.to_str().to_string()).collect()
    }

    /// Styles of the default level sequence, parallel to [`Severity::names`]
    pub fn styles() -> Vec<LevelStyle> {
        Self::ALL.iter().map(Severity::level_style).collect()
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

/// Foreground color token understood by a [`Colorizer`](crate::core::Colorizer)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorId {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    Grey,
}

impl ColorId {
    pub fn to_color(&self) -> colored::Color {
        use colored::Color::*;
        match self {
            ColorId::Black => Black,
            ColorId::Red => Red,
            ColorId::Green => Green,
            ColorId::Yellow => Yellow,
            ColorId::Blue => Blue,
            ColorId::Magenta => Magenta,
            ColorId::Cyan => Cyan,
            ColorId::White => White,
            ColorId::Grey => BrightBlack,
        }
    }
}

/// A styling directive: one foreground color plus bold and inverse flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Style {
    pub color: ColorId,
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub inverse: bool,
}

impl Style {
    pub const fn new(color: ColorId) -> Self {
        Self {
            color,
            bold: false,
            inverse: false,
        }
    }

    #[must_use]
    pub const fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    #[must_use]
    pub const fn inverse(mut self) -> Self {
        self.inverse = true;
        self
    }

    /// Neutral style used for timestamps and structured values
    pub const fn dim() -> Self {
        Self::new(ColorId::Grey)
    }
}

/// Display metadata for one rank of the level sequence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelStyle {
    pub label: String,
    pub style: Style,
    #[serde(default)]
    pub inverse: bool,
}

impl LevelStyle {
    pub fn new(label: impl Into<String>, style: Style) -> Self {
        Self {
            label: label.into(),
            style,
            inverse: false,
        }
    }

    #[must_use]
    pub fn inverted(mut self) -> Self {
        self.inverse = true;
        self
    }

    /// Style for a level that has no configured entry: the upper-cased name
    /// right-aligned in five columns, in grey.
    pub fn fallback(name: &str) -> Self {
        let upper: String = name.to_uppercase().chars().take(5).collect();
        Self::new(format!("{:>5}", upper), Style::dim())
    }

    /// Style applied to the label itself
    pub fn label_style(&self) -> Style {
        if self.inverse {
            self.style.inverse()
        } else {
            self.style
        }
    }
}
