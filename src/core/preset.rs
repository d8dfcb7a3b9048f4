//! Environment presets
//!
//! Maps an environment name such as `test` to a partial configuration that
//! sits between the built-in defaults and explicit overrides.

use super::config::ConfigOverrides;
use super::log_level::Severity;

pub const DEVELOPMENT: &str = "development";
pub const TEST: &str = "test";
pub const PRODUCTION: &str = "production";

/// Names that stand for one of the known environments
const ALIASES: &[(&str, &str)] = &[
    ("dev", DEVELOPMENT),
    ("testing", TEST),
    ("staging", PRODUCTION),
    ("prod", PRODUCTION),
];

fn direct(environment: &str) -> Option<ConfigOverrides> {
    match environment {
        DEVELOPMENT => Some(ConfigOverrides::new().display_time(false)),
        TEST => Some(
            ConfigOverrides::new()
                .display_time(false)
                .level(Severity::Critical.to_str()),
        ),
        PRODUCTION => Some(ConfigOverrides::new()),
        _ => None,
    }
}

/// Known environment `environment` stands for, following at most one alias
pub fn canonical(environment: &str) -> Option<&'static str> {
    [DEVELOPMENT, TEST, PRODUCTION]
        .into_iter()
        .find(|known| *known == environment)
        .or_else(|| {
            ALIASES
                .iter()
                .find(|(alias, _)| *alias == environment)
                .map(|(_, target)| *target)
        })
}

/// Preset for `environment`.
///
/// `None` for unknown names, which leaves the defaults in force.
///
/// # Examples
///
/// ```
/// use hiplog::core::preset;
///
/// let test = preset::resolve("testing").unwrap();
/// assert_eq!(test.level.as_deref(), Some("critical"));
/// assert!(preset::resolve("qa").is_none());
/// ```
pub fn resolve(environment: &str) -> Option<ConfigOverrides> {
    canonical(environment).and_then(direct)
}
