use crate::domain::BumpKind;
use crate::error::{GumpError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// File name looked up in the repository root and the user config dir.
pub const CONFIG_FILE_NAME: &str = "gump.toml";

/// Represents the complete configuration for gump.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub remote: RemoteConfig,

    #[serde(default)]
    pub behavior: BehaviorConfig,
}

fn default_remote_name() -> String {
    "origin".to_string()
}

fn default_bump() -> String {
    BumpKind::Patch.as_str().to_string()
}

/// Remote that new tags are pushed to.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct RemoteConfig {
    #[serde(default = "default_remote_name")]
    pub name: String,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        RemoteConfig {
            name: default_remote_name(),
        }
    }
}

/// Defaults applied when the matching command-line flags are absent.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct BehaviorConfig {
    #[serde(default)]
    pub push: bool,

    #[serde(default = "default_bump")]
    pub default_bump: String,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        BehaviorConfig {
            push: false,
            default_bump: default_bump(),
        }
    }
}

impl Config {
    /// The configured default bump kind.
    pub fn default_bump_kind(&self) -> Result<BumpKind> {
        self.behavior.default_bump.parse()
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `gump.toml` in the repository root
/// 3. `gump/gump.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If a file exists but cannot be read, parsed or validated
pub fn load_config(config_path: Option<&Path>, repo_dir: &Path) -> Result<Config> {
    let candidate = match config_path {
        Some(path) => Some(path.to_path_buf()),
        None => {
            let in_repo = repo_dir.join(CONFIG_FILE_NAME);
            if in_repo.exists() {
                Some(in_repo)
            } else {
                dirs::config_dir()
                    .map(|dir| dir.join("gump").join(CONFIG_FILE_NAME))
                    .filter(|path| path.exists())
            }
        }
    };

    let Some(path) = candidate else {
        return Ok(Config::default());
    };

    let config_str = fs::read_to_string(&path)?;
    let config = parse_config(&config_str)
        .map_err(|e| GumpError::config(format!("{}: {}", path.display(), e)))?;
    Ok(config)
}

/// Parse and validate a configuration document.
pub fn parse_config(source: &str) -> Result<Config> {
    let config: Config = toml::from_str(source).map_err(|e| GumpError::config(e.to_string()))?;
    config.default_bump_kind()?;
    if config.remote.name.trim().is_empty() {
        return Err(GumpError::config("remote.name must not be empty"));
    }
    Ok(config)
}
