use std::collections::HashMap;

use serde::Deserialize;

/// App configuration, read from `config.toml` in the data directory.
/// Everything is optional; a missing file means all defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub ui: UiConfig,
}

/// `[ui]` section: color overrides as `name = "#RRGGBB"` pairs.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UiConfig {
    #[serde(default)]
    pub colors: HashMap<String, String>,
}
