//! Classification rule configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Where user rules come from and which rules are switched off.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RulesConfig {
    /// TOML file with `[[rules]]` entries merged over the built-in set.
    pub path: Option<PathBuf>,
    /// Rule ids removed from the effective set.
    #[serde(default)]
    pub disabled: Vec<String>,
}
