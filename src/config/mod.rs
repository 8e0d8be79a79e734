mod manager;

pub use manager::{
    ClijpConfig, ConfigFile, ConfigManager, DEFAULT_API_KEY_ENV, DEFAULT_ENDPOINT, DEFAULT_MODEL,
    ResolveOptions, ResolvedConfig, resolve_config,
};
