//! Composition of header and body into one message

use super::ansi::{indent, visible_width};
use super::config::LoggerConfig;
use super::error::Result;
use super::log_level::Style;
use super::value::Value;

/// Builds messages for a configuration.
///
/// A message is the colored header, the formatted parts, and a trailing
/// newline. Continuation lines of the body are indented by the visible width
/// of the header so they line up under the first body line.
#[derive(Debug, Clone, Copy)]
pub struct MessageComposer<'a> {
    config: &'a LoggerConfig,
}

impl<'a> MessageComposer<'a> {
    pub fn new(config: &'a LoggerConfig) -> Self {
        Self { config }
    }

    /// Optional grey time block, the level label and the separator
    pub fn build_header(&self, rank: usize) -> Result<String> {
        let config = self.config;
        let colorizer = config.colorizer.as_ref();
        let style = config.style_for(rank);

        let mut header = String::new();
        if config.display_time {
            let now = config.clock.now();
            let time = config.time_format.format(&now)?;
            header.push_str(&colorizer.colorize(&format!("{}{}", time, config.separator), Style::dim()));
        }
        header.push_str(&colorizer.colorize(&style.label, style.label_style()));
        header.push_str(&colorizer.colorize(&config.separator, style.style));
        Ok(header)
    }

    /// Format every part; one multi-line part puts every part on its own line
    pub fn build_body(&self, parts: &[Value]) -> Result<String> {
        let colorizer = self.config.colorizer.as_ref();
        let rendered = parts
            .iter()
            .map(|part| self.config.formatter.format(part, colorizer))
            .collect::<Result<Vec<_>>>()?;

        let separator = if rendered.iter().any(|part| part.contains('\n')) {
            "\n"
        } else {
            " "
        };
        Ok(rendered.join(separator))
    }

    pub fn build_message(&self, rank: usize, parts: &[Value]) -> Result<String> {
        let header = self.build_header(rank)?;
        let body = self.build_body(parts)?;
        let width = visible_width(&header);

        let mut message = header;
        message.push_str(&indent(&body, width));
        message.push('\n');
        Ok(message)
    }
}
