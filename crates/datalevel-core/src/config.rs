use crate::schema::app::Level;

use serde::{Deserialize, Serialize};

/// Engine configuration.
///
/// Deserializable so it can sit in a host application's configuration file:
///
/// ```
/// # use datalevel_core::Config;
/// # use datalevel_core::schema::app::Level;
/// let config: Config = serde_json::from_str(r#"{ "default_level": 20 }"#).unwrap();
/// assert_eq!(config.max_depth, 10);
/// assert_eq!(config.default_level, Some(Level::SHORT));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Maximum number of segments in a resolution path before the engine
    /// reports a circle dependency.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// Level applied to queries that carry neither a request level nor a
    /// model default.
    #[serde(default)]
    pub default_level: Option<Level>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            default_level: None,
        }
    }
}

fn default_max_depth() -> usize {
    10
}
