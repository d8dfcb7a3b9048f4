//! Main logger implementation

use super::{
    colorize::{AnsiColorizer, Colorizer},
    composer::MessageComposer,
    config::{ConfigOverrides, LoggerConfig, StreamSelector},
    error::{LoggerError, Result},
    formatter::ValueFormatter,
    log_level::{LevelStyle, Severity},
    metrics::LoggerMetrics,
    sink::{SharedSink, Sink},
    timestamp::{Clock, TimestampFormat},
    value::Value,
};
use std::collections::HashMap;
use std::sync::Arc;

/// Leveled logger writing composed messages to the sink chosen by rank.
///
/// The configuration is fixed at construction. Every call formats and writes
/// synchronously, so messages sent to one sink keep their call order.
///
/// # Example
///
/// ```
/// use hiplog::prelude::*;
/// use std::sync::Arc;
///
/// let sink = Arc::new(MemorySink::new());
/// let logger = Logger::builder()
///     .sink(sink.clone())
///     .colors(false)
///     .build();
///
/// logger.info(&["listening on".into(), 8080.into()]).unwrap();
/// logger.debug(&["hidden".into()]).unwrap();
///
/// assert_eq!(sink.contents(), " INFO • listening on 8080\n");
/// ```
#[derive(Debug)]
pub struct Logger {
    config: LoggerConfig,
    /// `None` when the configured threshold is not a level name
    threshold: Option<usize>,
    ranks: HashMap<String, usize>,
    metrics: Arc<LoggerMetrics>,
}

impl Logger {
    /// Logger with the built-in defaults
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(LoggerConfig::default())
    }

    #[must_use]
    pub fn with_config(config: LoggerConfig) -> Self {
        let mut ranks = HashMap::with_capacity(config.levels.len());
        for (rank, name) in config.levels.iter().enumerate() {
            ranks.entry(name.clone()).or_insert(rank);
        }
        let threshold = config.threshold_rank();

        Self {
            config,
            threshold,
            ranks,
            metrics: Arc::new(LoggerMetrics::new()),
        }
    }

    /// Explicit overrides win over the preset, which wins over the defaults
    #[must_use]
    pub fn from_overrides(explicit: ConfigOverrides, preset: ConfigOverrides) -> Self {
        Self::with_config(LoggerConfig::merged(explicit, preset))
    }

    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    /// Write `parts` at `rank` if the rank passes the threshold.
    ///
    /// Filtered calls return `Ok(())` without side effects on any sink.
    /// Formatting and write failures are returned to the caller; nothing is
    /// retried or buffered.
    pub fn emit(&self, rank: usize, parts: &[Value]) -> Result<()> {
        if !self.is_enabled(rank) {
            self.metrics.record_filtered();
            return Ok(());
        }

        let sink = self.config.stream.resolve(rank);
        let result = self
            .build_message(rank, parts)
            .and_then(|message| sink.write(&message));

        match result {
            Ok(()) => {
                self.metrics.record_written();
                Ok(())
            }
            Err(e) => {
                self.metrics.record_failed();
                Err(e)
            }
        }
    }

    /// Emit at the level called `name`
    pub fn log(&self, name: &str, parts: &[Value]) -> Result<()> {
        let rank = self
            .rank_of(name)
            .ok_or_else(|| LoggerError::unknown_level(name))?;
        self.emit(rank, parts)
    }

    /// Callable bound to the level called `name`
    pub fn level(&self, name: &str) -> Option<LevelHandle<'_>> {
        let rank = self.rank_of(name)?;
        Some(LevelHandle {
            logger: self,
            name: &self.config.levels[rank],
            rank,
        })
    }

    /// One handle per configured level, most severe first
    pub fn levels(&self) -> impl Iterator<Item = LevelHandle<'_>> {
        self.config
            .levels
            .iter()
            .enumerate()
            .map(move |(rank, name)| LevelHandle {
                logger: self,
                name,
                rank,
            })
    }

    pub fn emergency(&self, parts: &[Value]) -> Result<()> {
        self.log(Severity::Emergency.to_str(), parts)
    }

    pub fn alert(&self, parts: &[Value]) -> Result<()> {
        self.log(Severity::Alert.to_str(), parts)
    }

    pub fn critical(&self, parts: &[Value]) -> Result<()> {
        self.log(Severity::Critical.to_str(), parts)
    }

    pub fn error(&self, parts: &[Value]) -> Result<()> {
        self.log(Severity::Error.to_str(), parts)
    }

    pub fn warning(&self, parts: &[Value]) -> Result<()> {
        self.log(Severity::Warning.to_str(), parts)
    }

    pub fn notice(&self, parts: &[Value]) -> Result<()> {
        self.log(Severity::Notice.to_str(), parts)
    }

    pub fn info(&self, parts: &[Value]) -> Result<()> {
        self.log(Severity::Info.to_str(), parts)
    }

    pub fn debug(&self, parts: &[Value]) -> Result<()> {
        self.log(Severity::Debug.to_str(), parts)
    }

    /// Compose the message for `rank` without writing it
    pub fn build_message(&self, rank: usize, parts: &[Value]) -> Result<String> {
        MessageComposer::new(&self.config).build_message(rank, parts)
    }

    pub fn threshold(&self) -> Option<usize> {
        self.threshold
    }

    #[inline]
    pub fn is_enabled(&self, rank: usize) -> bool {
        matches!(self.threshold, Some(threshold) if rank <= threshold)
    }

    pub fn rank_of(&self, name: &str) -> Option<usize> {
        self.ranks.get(name).copied()
    }

    pub fn config(&self) -> &LoggerConfig {
        &self.config
    }

    /// # Example
    ///
    /// ```
    /// use hiplog::Logger;
    ///
    /// let logger = Logger::builder().level("warning").build();
    /// logger.debug(&["not written".into()]).unwrap();
    ///
    /// assert_eq!(logger.metrics().filtered_count(), 1);
    /// ```
    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    /// Flush every distinct sink the stream selector can return
    pub fn flush(&self) -> Result<()> {
        let mut flushed: Vec<SharedSink> = Vec::new();
        for rank in 0..self.config.levels.len() {
            let sink = self.config.stream.resolve(rank);
            if flushed.iter().any(|seen| Arc::ptr_eq(seen, &sink)) {
                continue;
            }
            sink.flush()?;
            flushed.push(sink);
        }
        Ok(())
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

/// A logger bound to one level
#[derive(Debug, Clone, Copy)]
pub struct LevelHandle<'a> {
    logger: &'a Logger,
    name: &'a str,
    rank: usize,
}

impl<'a> LevelHandle<'a> {
    pub fn log(&self, parts: &[Value]) -> Result<()> {
        self.logger.emit(self.rank, parts)
    }

    pub fn name(&self) -> &'a str {
        self.name
    }

    pub fn rank(&self) -> usize {
        self.rank
    }

    pub fn is_enabled(&self) -> bool {
        self.logger.is_enabled(self.rank)
    }
}

/// Builder for creating a Logger
///
/// Every setter is an explicit override; a preset given with
/// [`LoggerBuilder::preset`] only fills what was not set.
///
/// # Example
///
/// ```
/// use hiplog::prelude::*;
///
/// let logger = Logger::builder()
///     .level("debug")
///     .display_time(true)
///     .time_format(TimestampFormat::Custom("%H:%M:%S".to_string()))
///     .preset(ConfigOverrides::new().level("critical"))
///     .build();
///
/// assert_eq!(logger.threshold(), Some(7));
/// ```
#[derive(Debug, Default)]
pub struct LoggerBuilder {
    overrides: ConfigOverrides,
    preset: ConfigOverrides,
}

impl LoggerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Level names, most severe first
    #[must_use = "builder methods return a new value"]
    pub fn levels<I, S>(mut self, levels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.overrides.levels = Some(levels.into_iter().map(Into::into).collect());
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn styles(mut self, styles: Vec<LevelStyle>) -> Self {
        self.overrides.styles = Some(styles);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn separator(mut self, separator: impl Into<String>) -> Self {
        self.overrides.separator = Some(separator.into());
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn stream(mut self, stream: StreamSelector) -> Self {
        self.overrides.stream = Some(stream);
        self
    }

    /// Send every level to one sink
    #[must_use = "builder methods return a new value"]
    pub fn sink<S: Sink + 'static>(self, sink: Arc<S>) -> Self {
        self.stream(StreamSelector::shared(sink))
    }

    #[must_use = "builder methods return a new value"]
    pub fn display_time(mut self, display_time: bool) -> Self {
        self.overrides.display_time = Some(display_time);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn time_format(mut self, time_format: TimestampFormat) -> Self {
        self.overrides.time_format = Some(time_format);
        self
    }

    /// Threshold level name
    #[must_use = "builder methods return a new value"]
    pub fn level(mut self, level: impl Into<String>) -> Self {
        self.overrides.level = Some(level.into());
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn colorizer(mut self, colorizer: Arc<dyn Colorizer>) -> Self {
        self.overrides.colorizer = Some(colorizer);
        self
    }

    /// Force ANSI colors on or off
    #[must_use = "builder methods return a new value"]
    pub fn colors(self, enabled: bool) -> Self {
        self.colorizer(Arc::new(AnsiColorizer::with_colors(enabled)))
    }

    #[must_use = "builder methods return a new value"]
    pub fn formatter(mut self, formatter: ValueFormatter) -> Self {
        self.overrides.formatter = Some(formatter);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.overrides.clock = Some(clock);
        self
    }

    /// Merge a whole set of explicit overrides; fields set here replace
    /// those set by earlier calls
    #[must_use = "builder methods return a new value"]
    pub fn overrides(mut self, overrides: ConfigOverrides) -> Self {
        self.overrides = overrides.or(self.overrides);
        self
    }

    /// Lower-precedence layer, usually from [`crate::core::preset::resolve`]
    #[must_use = "builder methods return a new value"]
    pub fn preset(mut self, preset: ConfigOverrides) -> Self {
        self.preset = preset;
        self
    }

    pub fn build(self) -> Logger {
        Logger::from_overrides(self.overrides, self.preset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::colorize::NoColor;
    use crate::core::value::Object;
    use crate::sinks::MemorySink;

    fn memory_logger(level: &str) -> (Logger, Arc<MemorySink>) {
        let sink = Arc::new(MemorySink::new());
        let logger = Logger::builder()
            .sink(sink.clone())
            .colorizer(Arc::new(NoColor))
            .level(level)
            .build();
        (logger, sink)
    }

    struct BrokenSink;

    impl Sink for BrokenSink {
        fn write(&self, _message: &str) -> Result<()> {
            Err(LoggerError::io_operation(
                "write",
                "broken",
                std::io::Error::new(std::io::ErrorKind::BrokenPipe, "stream closed"),
            ))
        }

        fn flush(&self) -> Result<()> {
            Ok(())
        }

        fn name(&self) -> &str {
            "broken"
        }
    }

    #[test]
    fn test_default_logger() {
        let logger = Logger::new();
        assert_eq!(logger.threshold(), Some(6));
        assert!(logger.is_enabled(Severity::Info.rank()));
        assert!(!logger.is_enabled(Severity::Debug.rank()));
    }

    #[test]
    fn test_threshold_monotonicity() {
        let (logger, sink) = memory_logger("warning");
        for handle in logger.levels() {
            handle.log(&[handle.name().into()]).unwrap();
        }
        assert_eq!(
            sink.lines(),
            vec![
                "EMERG • emergency",
                "ALERT • alert",
                "CRITI • critical",
                "ERROR • error",
                " WARN • warning",
            ]
        );
        assert_eq!(logger.metrics().written_count(), 5);
        assert_eq!(logger.metrics().filtered_count(), 3);
    }

    #[test]
    fn test_unknown_threshold_is_silent() {
        let (logger, sink) = memory_logger("verbose");
        assert_eq!(logger.threshold(), None);
        logger.emergency(&["nobody hears this".into()]).unwrap();
        logger.emit(0, &[]).unwrap();
        assert!(sink.is_empty());
        assert_eq!(logger.metrics().filtered_count(), 2);
    }

    #[test]
    fn test_unknown_level_name_is_an_error() {
        let (logger, _) = memory_logger("debug");
        assert!(matches!(
            logger.log("verbose", &["x".into()]),
            Err(LoggerError::UnknownLevel { .. })
        ));
        assert!(logger.level("verbose").is_none());
    }

    #[test]
    fn test_level_handles() {
        let (logger, sink) = memory_logger("debug");
        let notice = logger.level("notice").unwrap();
        assert_eq!(notice.rank(), 5);
        assert!(notice.is_enabled());
        notice.log(&["disk".into(), 93.5.into(), "% full".into()]).unwrap();
        assert_eq!(sink.contents(), " NOTE • disk 93.5 % full\n");
    }

    #[test]
    fn test_custom_levels() {
        let sink = Arc::new(MemorySink::new());
        let logger = Logger::builder()
            .levels(["fatal", "chatty"])
            .styles(vec![Severity::Emergency.level_style()])
            .level("chatty")
            .sink(sink.clone())
            .colors(false)
            .build();

        logger.log("chatty", &["hello".into()]).unwrap();
        assert_eq!(sink.contents(), "CHATT • hello\n");

        // the convenience methods look their name up like everyone else
        assert!(logger.info(&["x".into()]).is_err());
    }

    #[test]
    fn test_explicit_beats_preset() {
        let logger = Logger::builder()
            .level("debug")
            .preset(ConfigOverrides::new().level("critical").display_time(false))
            .build();
        assert_eq!(logger.threshold(), Some(Severity::Debug.rank()));
        assert!(!logger.config().display_time);

        let logger = Logger::builder()
            .preset(ConfigOverrides::new().level("critical"))
            .build();
        assert_eq!(logger.threshold(), Some(Severity::Critical.rank()));
    }

    #[test]
    fn test_overrides_merge_into_builder() {
        let logger = Logger::builder()
            .level("debug")
            .separator(" | ")
            .overrides(ConfigOverrides::new().level("error"))
            .build();
        assert_eq!(logger.threshold(), Some(3));
        assert_eq!(logger.config().separator, " | ");
    }

    #[test]
    fn test_write_failure_propagates() {
        let logger = Logger::builder()
            .sink(Arc::new(BrokenSink))
            .colors(false)
            .build();
        let result = logger.error(&["lost".into()]);
        assert!(matches!(result, Err(LoggerError::IoOperation { .. })));
        assert_eq!(logger.metrics().failed_count(), 1);

        // filtered calls never touch the sink
        assert!(logger.debug(&["filtered".into()]).is_ok());
    }

    #[test]
    fn test_routing_by_rank() {
        let errors = Arc::new(MemorySink::named("errors"));
        let output = Arc::new(MemorySink::named("output"));
        let logger = Logger::builder()
            .stream(StreamSelector::split(errors.clone(), output.clone()))
            .colors(false)
            .level("debug")
            .build();

        logger.warning(&["w".into()]).unwrap();
        logger.notice(&["n".into()]).unwrap();
        logger.critical(&["c".into()]).unwrap();
        logger.debug(&["d".into()]).unwrap();

        assert_eq!(errors.lines(), vec![" WARN • w", "CRITI • c"]);
        assert_eq!(output.lines(), vec![" NOTE • n", "DEBUG • d"]);
    }

    #[test]
    fn test_structured_parts() {
        let (logger, sink) = memory_logger("info");
        let object = Object::new().with("id", 7).with("tags", vec!["a", "b"]);
        logger.info(&["user".into(), object.into()]).unwrap();
        assert_eq!(sink.contents(), " INFO • user { id: 7, tags: [ 'a', 'b' ] }\n");
    }

    #[test]
    fn test_build_message_does_not_write() {
        let (logger, sink) = memory_logger("info");
        let message = logger.build_message(3, &["x".into()]).unwrap();
        assert_eq!(message, "ERROR • x\n");
        assert!(sink.is_empty());
        assert_eq!(logger.metrics().total_calls(), 0);
    }

    #[test]
    fn test_flush_visits_each_sink_once() {
        let (logger, _) = memory_logger("info");
        assert!(logger.flush().is_ok());
        assert!(Logger::builder().sink(Arc::new(BrokenSink)).build().flush().is_ok());
    }

    #[test]
    fn test_logger_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Logger>();
    }
}
