//! Logger construction from environment variables
//!
//! This is the only place that reads the process environment. Variables:
//!
//! - `APP_ENV`: preset name, `development` when unset (see [`crate::core::preset`])
//! - `LOG`, then `LOG_LEVEL`: threshold level name
//! - `LOG_TIME`: `1` or `true` shows the time, `0` or `false` hides it
//! - `LOG_TIME_FORMAT`: named format or strftime pattern
//! - `NO_COLOR`: any non-empty value disables colors
//!
//! Explicit overrides win over variables, which win over the preset. Unset and
//! empty variables are ignored.
//!
//! # Example
//!
//! ```
//! use hiplog::core::ConfigOverrides;
//! use std::collections::HashMap;
//!
//! let env = HashMap::from([
//!     ("APP_ENV".to_string(), "test".to_string()),
//!     ("LOG".to_string(), "debug".to_string()),
//! ]);
//! let logger = hiplog::env::from_env_map(ConfigOverrides::new(), &env);
//! assert_eq!(logger.threshold(), Some(7));
//! ```

use crate::core::colorize::AnsiColorizer;
use crate::core::config::ConfigOverrides;
use crate::core::formatter::ValueFormatter;
use crate::core::logger::Logger;
use crate::core::preset::{self, DEVELOPMENT};
use crate::core::stack_trace::StackTraceContext;
use crate::core::timestamp::TimestampFormat;
use std::collections::HashMap;
use std::sync::Arc;

pub const ENVIRONMENT_VAR: &str = "APP_ENV";
pub const LEVEL_VAR: &str = "LOG";
pub const LEVEL_ALIAS_VAR: &str = "LOG_LEVEL";
pub const TIME_VAR: &str = "LOG_TIME";
pub const TIME_FORMAT_VAR: &str = "LOG_TIME_FORMAT";
pub const NO_COLOR_VAR: &str = "NO_COLOR";

/// Logger configured from the process environment.
///
/// Colors also follow terminal detection, and stack frames under the current
/// directory are printed relative to it.
pub fn from_env(explicit: ConfigOverrides) -> Logger {
    let env = process_vars();

    let mut ambient = ConfigOverrides::new();
    ambient.colorizer = Some(Arc::new(AnsiColorizer::detect()));
    if let Ok(root) = std::env::current_dir() {
        ambient.formatter = Some(
            ValueFormatter::new().with_trace_context(StackTraceContext::new().with_root_dir(root)),
        );
    }

    let variables = overrides_from_map(&env).or(ambient);
    Logger::from_overrides(explicit.or(variables), preset_from_map(&env))
}

/// Logger configured from `env` instead of the process environment
pub fn from_env_map(explicit: ConfigOverrides, env: &HashMap<String, String>) -> Logger {
    Logger::from_overrides(explicit.or(overrides_from_map(env)), preset_from_map(env))
}

/// The preset selected by the environment variable, defaulting to development
pub fn preset_from_map(env: &HashMap<String, String>) -> ConfigOverrides {
    let environment = lookup(env, ENVIRONMENT_VAR).unwrap_or(DEVELOPMENT);
    preset::resolve(environment).unwrap_or_default()
}

/// Overrides carried by the logging variables
pub fn overrides_from_map(env: &HashMap<String, String>) -> ConfigOverrides {
    let mut overrides = ConfigOverrides::new();

    if let Some(level) = lookup(env, LEVEL_VAR).or_else(|| lookup(env, LEVEL_ALIAS_VAR)) {
        overrides.level = Some(level.to_string());
    }
    overrides.display_time = lookup(env, TIME_VAR).and_then(parse_flag);
    if let Some(pattern) = lookup(env, TIME_FORMAT_VAR) {
        overrides.time_format = pattern.parse::<TimestampFormat>().ok();
    }
    if lookup(env, NO_COLOR_VAR).is_some() {
        overrides.colorizer = Some(Arc::new(AnsiColorizer::with_colors(false)));
    }

    overrides
}

/// The process environment, skipping entries that are not valid UTF-8
fn process_vars() -> HashMap<String, String> {
    std::env::vars_os()
        .filter_map(|(name, value)| Some((name.into_string().ok()?, value.into_string().ok()?)))
        .collect()
}

fn lookup<'a>(env: &'a HashMap<String, String>, name: &str) -> Option<&'a str> {
    env.get(name).map(String::as_str).filter(|value| !value.is_empty())
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" => Some(true),
        "0" | "false" => Some(false),
        _ => None,
    }
}
