//! Logger configuration
//!
//! A [`LoggerConfig`] is assembled once from three layers, highest precedence
//! first: explicit [`ConfigOverrides`], an environment preset, and the
//! built-in defaults. It never changes after the logger is built.

use super::colorize::{AnsiColorizer, Colorizer};
use super::error::Result;
use super::formatter::ValueFormatter;
use super::log_level::{LevelStyle, Severity};
use super::sink::{SharedSink, Sink};
use super::timestamp::{Clock, SystemClock, TimestampFormat};
use crate::sinks::ConsoleSink;
use serde::{Deserialize, Deserializer};
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

/// Separator between time and label, and between label and body
pub const DEFAULT_SEPARATOR: &str = " • ";

/// Threshold used when nothing else is configured
pub const DEFAULT_LEVEL: &str = "info";

/// Highest rank (least severe) that the default selector sends to stderr
pub const STDERR_MAX_RANK: usize = 4;

/// Chooses the output sink of a message from its rank
#[derive(Clone)]
pub enum StreamSelector {
    Static(SharedSink),
    ByRank(Arc<dyn Fn(usize) -> SharedSink + Send + Sync>),
}

impl StreamSelector {
    /// Send every message to `sink`
    pub fn fixed(sink: impl Sink + 'static) -> Self {
        StreamSelector::Static(Arc::new(sink))
    }

    pub fn shared(sink: SharedSink) -> Self {
        StreamSelector::Static(sink)
    }

    pub fn by_rank<F>(select: F) -> Self
    where
        F: Fn(usize) -> SharedSink + Send + Sync + 'static,
    {
        StreamSelector::ByRank(Arc::new(select))
    }

    /// Ranks up to `warning` go to `errors`, the rest to `output`
    pub fn split(errors: SharedSink, output: SharedSink) -> Self {
        Self::by_rank(move |rank| {
            if rank <= STDERR_MAX_RANK {
                Arc::clone(&errors)
            } else {
                Arc::clone(&output)
            }
        })
    }

    /// Standard error for `emergency..=warning`, standard output otherwise
    pub fn console() -> Self {
        Self::split(Arc::new(ConsoleSink::stderr()), Arc::new(ConsoleSink::stdout()))
    }

    pub fn resolve(&self, rank: usize) -> SharedSink {
        match self {
            StreamSelector::Static(sink) => Arc::clone(sink),
            StreamSelector::ByRank(select) => select(rank),
        }
    }
}

impl Default for StreamSelector {
    fn default() -> Self {
        Self::console()
    }
}

impl fmt::Debug for StreamSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamSelector::Static(sink) => f.debug_tuple("Static").field(&sink.name()).finish(),
            StreamSelector::ByRank(_) => f.write_str("ByRank(..)"),
        }
    }
}

/// Complete, immutable logger configuration
#[derive(Clone)]
pub struct LoggerConfig {
    /// Level names, most severe first; a name's index is its rank
    pub levels: Vec<String>,
    /// Display style per rank, parallel to `levels`
    pub styles: Vec<LevelStyle>,
    pub separator: String,
    pub stream: StreamSelector,
    pub display_time: bool,
    pub time_format: TimestampFormat,
    /// Name of the least severe level that is still written
    pub level: String,
    pub colorizer: Arc<dyn Colorizer>,
    pub formatter: ValueFormatter,
    pub clock: Arc<dyn Clock>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            levels: Severity::names(),
            styles: Severity::styles(),
            separator: DEFAULT_SEPARATOR.to_string(),
            stream: StreamSelector::default(),
            display_time: false,
            time_format: TimestampFormat::default(),
            level: DEFAULT_LEVEL.to_string(),
            colorizer: Arc::new(AnsiColorizer::new()),
            formatter: ValueFormatter::default(),
            clock: Arc::new(SystemClock),
        }
    }
}

impl LoggerConfig {
    /// Layer `explicit` over `preset` over the defaults
    pub fn merged(explicit: ConfigOverrides, preset: ConfigOverrides) -> Self {
        Self::default().apply(explicit.or(preset))
    }

    /// Replace every field that `overrides` sets
    #[must_use]
    pub fn apply(mut self, overrides: ConfigOverrides) -> Self {
        let ConfigOverrides {
            levels,
            styles,
            separator,
            stream,
            display_time,
            time_format,
            level,
            colorizer,
            formatter,
            clock,
        } = overrides;

        if let Some(levels) = levels {
            self.levels = levels;
        }
        if let Some(styles) = styles {
            self.styles = styles;
        }
        if let Some(separator) = separator {
            self.separator = separator;
        }
        if let Some(stream) = stream {
            self.stream = stream;
        }
        if let Some(display_time) = display_time {
            self.display_time = display_time;
        }
        if let Some(time_format) = time_format {
            self.time_format = time_format;
        }
        if let Some(level) = level {
            self.level = level;
        }
        if let Some(colorizer) = colorizer {
            self.colorizer = colorizer;
        }
        if let Some(formatter) = formatter {
            self.formatter = formatter;
        }
        if let Some(clock) = clock {
            self.clock = clock;
        }
        self
    }

    pub fn rank_of(&self, name: &str) -> Option<usize> {
        self.levels.iter().position(|level| level == name)
    }

    /// Rank of the configured threshold; `None` when the name is not a level,
    /// in which case nothing is written.
    pub fn threshold_rank(&self) -> Option<usize> {
        self.rank_of(&self.level)
    }

    /// Style of `rank`, or a grey fallback derived from the level name when
    /// `styles` is shorter than `levels`
    pub fn style_for(&self, rank: usize) -> Cow<'_, LevelStyle> {
        match self.styles.get(rank) {
            Some(style) => Cow::Borrowed(style),
            None => {
                let name = self.levels.get(rank).map(String::as_str).unwrap_or("?");
                Cow::Owned(LevelStyle::fallback(name))
            }
        }
    }
}

impl fmt::Debug for LoggerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggerConfig")
            .field("levels", &self.levels)
            .field("styles", &self.styles)
            .field("separator", &self.separator)
            .field("stream", &self.stream)
            .field("display_time", &self.display_time)
            .field("time_format", &self.time_format)
            .field("level", &self.level)
            .field("formatter", &self.formatter)
            .finish_non_exhaustive()
    }
}

/// A partial configuration; `None` leaves the lower layer in force.
///
/// The plain-data fields can be read from JSON; sinks, colorizers,
/// formatters and clocks are only settable in code.
///
/// # Examples
///
/// ```
/// use hiplog::core::ConfigOverrides;
///
/// let overrides = ConfigOverrides::from_json(r#"{ "level": "debug", "displayTime": true }"#).unwrap();
/// assert_eq!(overrides.level.as_deref(), Some("debug"));
/// assert_eq!(overrides.display_time, Some(true));
/// ```
#[derive(Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct ConfigOverrides {
    pub levels: Option<Vec<String>>,
    pub styles: Option<Vec<LevelStyle>>,
    pub separator: Option<String>,
    #[serde(skip)]
    pub stream: Option<StreamSelector>,
    pub display_time: Option<bool>,
    #[serde(deserialize_with = "time_format_from_str")]
    pub time_format: Option<TimestampFormat>,
    pub level: Option<String>,
    #[serde(skip)]
    pub colorizer: Option<Arc<dyn Colorizer>>,
    #[serde(skip)]
    pub formatter: Option<ValueFormatter>,
    #[serde(skip)]
    pub clock: Option<Arc<dyn Clock>>,
}

impl ConfigOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Fill every field left unset here from `lower`
    #[must_use]
    pub fn or(self, lower: ConfigOverrides) -> Self {
        Self {
            levels: self.levels.or(lower.levels),
            styles: self.styles.or(lower.styles),
            separator: self.separator.or(lower.separator),
            stream: self.stream.or(lower.stream),
            display_time: self.display_time.or(lower.display_time),
            time_format: self.time_format.or(lower.time_format),
            level: self.level.or(lower.level),
            colorizer: self.colorizer.or(lower.colorizer),
            formatter: self.formatter.or(lower.formatter),
            clock: self.clock.or(lower.clock),
        }
    }

    #[must_use]
    pub fn level(mut self, level: impl Into<String>) -> Self {
        self.level = Some(level.into());
        self
    }

    #[must_use]
    pub fn display_time(mut self, display_time: bool) -> Self {
        self.display_time = Some(display_time);
        self
    }

    #[must_use]
    pub fn time_format(mut self, time_format: TimestampFormat) -> Self {
        self.time_format = Some(time_format);
        self
    }

    #[must_use]
    pub fn stream(mut self, stream: StreamSelector) -> Self {
        self.stream = Some(stream);
        self
    }
}

impl fmt::Debug for ConfigOverrides {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigOverrides")
            .field("levels", &self.levels)
            .field("styles", &self.styles)
            .field("separator", &self.separator)
            .field("stream", &self.stream)
            .field("display_time", &self.display_time)
            .field("time_format", &self.time_format)
            .field("level", &self.level)
            .field("colorizer", &self.colorizer.as_ref().map(|_| ".."))
            .field("formatter", &self.formatter)
            .field("clock", &self.clock.as_ref().map(|_| ".."))
            .finish()
    }
}

fn time_format_from_str<'de, D>(deserializer: D) -> std::result::Result<Option<TimestampFormat>, D::Error>
where
    D: Deserializer<'de>,
{
    let pattern: Option<String> = Option::deserialize(deserializer)?;
    Ok(pattern.map(|p| match p.parse::<TimestampFormat>() {
        Ok(format) => format,
        Err(never) => match never {},
    }))
}
