use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::error::AppError;
use crate::paths;

/// Endpoint used when neither the CLI nor the config file names one.
pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com";

/// Model used when neither the CLI nor the config file names one.
pub const DEFAULT_MODEL: &str = "gpt-5-mini";

/// Environment variable holding the API key for the default endpoint.
pub const DEFAULT_API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Settings in the `[clijp]` section of config.toml.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClijpConfig {
    /// The OpenAI-compatible API endpoint URL.
    pub endpoint: Option<String>,
    /// Model name.
    pub model: Option<String>,
    /// API key stored directly in config (not recommended).
    pub api_key: Option<String>,
    /// Environment variable name containing the API key.
    pub api_key_env: Option<String>,
}

/// The complete configuration file structure.
///
/// Corresponds to `~/.config/clijp/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub clijp: ClijpConfig,
}

/// Resolved configuration after merging CLI arguments, config file and
/// built-in defaults.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// The API endpoint URL.
    pub endpoint: String,
    /// The model to use for translation.
    pub model: String,
    /// The API key, if one was found.
    pub api_key: Option<String>,
    /// Environment variable the key is expected in; `None` when no key is
    /// required.
    pub api_key_env: Option<String>,
}

/// CLI overrides that take precedence over config file values.
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    pub endpoint: Option<String>,
    pub model: Option<String>,
}

/// Resolves configuration by merging CLI options with config file settings.
///
/// Priority is CLI, then config file, then built-in defaults. An API key is
/// expected when the config names one (directly or via `api_key_env`) or when
/// the default endpoint is used.
pub fn resolve_config(options: &ResolveOptions, config_file: &ConfigFile) -> ResolvedConfig {
    let file = &config_file.clijp;

    let endpoint = options
        .endpoint
        .as_ref()
        .or(file.endpoint.as_ref())
        .map_or_else(|| DEFAULT_ENDPOINT.to_string(), Clone::clone);

    let model = options
        .model
        .as_ref()
        .or(file.model.as_ref())
        .map_or_else(|| DEFAULT_MODEL.to_string(), Clone::clone);

    let api_key_env = file.api_key_env.clone().or_else(|| {
        (file.api_key.is_none() && endpoint == DEFAULT_ENDPOINT)
            .then(|| DEFAULT_API_KEY_ENV.to_string())
    });

    let api_key = api_key_env
        .as_deref()
        .and_then(|var| std::env::var(var).ok())
        .filter(|key| !key.is_empty())
        .or_else(|| file.api_key.clone());

    ResolvedConfig {
        endpoint,
        model,
        api_key,
        api_key_env,
    }
}

/// Manages loading the configuration file.
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Creates a new config manager.
    ///
    /// Configuration is stored at `$XDG_CONFIG_HOME/clijp/config.toml`
    /// or `~/.config/clijp/config.toml` if `XDG_CONFIG_HOME` is not set.
    pub fn new() -> Result<Self, AppError> {
        Ok(Self {
            config_path: paths::config_dir()?.join("config.toml"),
        })
    }

    pub const fn config_path(&self) -> &PathBuf {
        &self.config_path
    }

    /// Loads the config file; a missing file yields the defaults.
    pub fn load(&self) -> Result<ConfigFile> {
        if !self.config_path.exists() {
            return Ok(ConfigFile::default());
        }

        let contents = fs::read_to_string(&self.config_path).with_context(|| {
            format!("Failed to read config file: {}", self.config_path.display())
        })?;

        toml::from_str(&contents).with_context(|| {
            format!("Failed to parse config file: {}", self.config_path.display())
        })
    }
}
