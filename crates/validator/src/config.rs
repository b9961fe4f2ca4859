//! Engine configuration.

use serde::{Deserialize, Serialize};

/// Construction-time settings for a [`ValidationEngine`](crate::engine::ValidationEngine).
///
/// # Examples
///
/// ```
/// use fieldcheck_validator::config::ValidatorConfig;
///
/// let config: ValidatorConfig = serde_json::from_str(r#"{ "prefix": "user" }"#).unwrap();
/// assert_eq!(config.qualify("email"), "user[email]");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Wraps every field lookup and full error key as `prefix[field]`.
    pub prefix: Option<String>,
}

impl ValidatorConfig {
    /// Creates a config with no prefix.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the field prefix.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Composes `field` with the configured prefix.
    pub fn qualify(&self, field: &str) -> String {
        qualify(self.prefix.as_deref(), field)
    }
}

/// `prefix[field]` when a prefix is set, `field` otherwise.
pub(crate) fn qualify(prefix: Option<&str>, field: &str) -> String {
    match prefix {
        Some(prefix) => format!("{prefix}[{field}]"),
        None => field.to_string(),
    }
}
