//! Configuration loader
//!
//! Handles loading configuration from TOML files, environment variables,
//! and default values using Figment.

use crate::config::{AppConfig, BackendKind, CacheConfig, LoggingConfig, ServerConfig};
use crate::constants::{
    CONFIG_ENV_PREFIX, CONFIG_ENV_SEPARATOR, DEFAULT_CONFIG_DIR, DEFAULT_CONFIG_FILENAME,
};
use crate::error_ext::ErrorContext;
use crate::logging::{log_config_loaded, parse_log_level};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use memo_domain::CacheKey;
use memo_domain::error::{Error, Result};
use std::env;
use std::path::{Path, PathBuf};

/// Configuration loader service
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Configuration file path
    config_path: Option<PathBuf>,

    /// Environment prefix
    env_prefix: String,
}

impl ConfigLoader {
    /// Create a new configuration loader with default settings
    pub fn new() -> Self {
        Self {
            config_path: None,
            env_prefix: CONFIG_ENV_PREFIX.to_string(),
        }
    }

    /// Set the configuration file path
    pub fn with_config_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the environment variable prefix
    pub fn with_env_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Load configuration from all sources
    ///
    /// Configuration sources are merged in this order (later sources override earlier):
    /// 1. Default values from `AppConfig::default()`
    /// 2. TOML configuration file (if exists)
    /// 3. Environment variables with prefix (e.g., `MEMO__CACHE__REDIS_URL`)
    pub fn load(&self) -> Result<AppConfig> {
        let app_config: AppConfig = self
            .figment()
            .extract()
            .config_context("Failed to extract configuration")?;

        validate_app_config(&app_config)?;

        Ok(app_config)
    }

    /// Assemble the layered Figment without extracting it
    pub fn figment(&self) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(AppConfig::default()));

        if let Some((path, true)) = self.resolved_config_file() {
            figment = figment.merge(Toml::file(path));
        }

        // Double underscore separates nested keys so field names keep their
        // single underscores (MEMO__CACHE__REDIS_URL -> cache.redis_url).
        let prefix = format!("{}{CONFIG_ENV_SEPARATOR}", self.env_prefix);
        figment.merge(Env::prefixed(&prefix).split(CONFIG_ENV_SEPARATOR))
    }

    /// Configuration file this loader reads, and whether it exists
    ///
    /// An explicit path is reported even when missing. Without one, the
    /// first existing default location is used.
    pub fn resolved_config_file(&self) -> Option<(PathBuf, bool)> {
        match &self.config_path {
            Some(path) => Some((path.clone(), path.exists())),
            None => Self::find_default_config_path().map(|path| (path, true)),
        }
    }

    /// Report which configuration file was read
    ///
    /// Call once the subscriber is installed; loading runs before logging
    /// is configured.
    pub fn log_config_source(&self) {
        if let Some((path, found)) = self.resolved_config_file() {
            log_config_loaded(&path, found);
        }
    }

    /// Save configuration to file
    pub fn save_to_file<P: AsRef<Path>>(&self, config: &AppConfig, path: P) -> Result<()> {
        let toml_string =
            toml::to_string_pretty(config).context("Failed to serialize config to TOML")?;

        std::fs::write(path.as_ref(), toml_string).context("Failed to write config file")?;

        Ok(())
    }

    /// Get the current configuration file path
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// Find the first existing default configuration file
    fn find_default_config_path() -> Option<PathBuf> {
        let current_dir = env::current_dir().ok()?;

        let candidates = [
            Some(current_dir.join(DEFAULT_CONFIG_FILENAME)),
            Some(
                current_dir
                    .join(DEFAULT_CONFIG_DIR)
                    .join(DEFAULT_CONFIG_FILENAME),
            ),
            dirs::config_dir().map(|d| d.join(DEFAULT_CONFIG_DIR).join(DEFAULT_CONFIG_FILENAME)),
        ];

        candidates.into_iter().flatten().find(|path| path.exists())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Validate application configuration
///
/// Performs validation of all configuration sections.
pub fn validate_app_config(config: &AppConfig) -> Result<()> {
    validate_server_config(&config.server)?;
    validate_cache_config(&config.cache)?;
    validate_logging_config(&config.logging)?;
    Ok(())
}

fn validate_server_config(config: &ServerConfig) -> Result<()> {
    if config.port == 0 {
        return Err(Error::configuration("Server port cannot be 0"));
    }
    if config.host.trim().is_empty() {
        return Err(Error::configuration("Server host cannot be empty"));
    }
    Ok(())
}

fn validate_cache_config(config: &CacheConfig) -> Result<()> {
    if config.enabled && config.default_ttl_secs == 0 {
        return Err(Error::configuration(
            "Cache TTL cannot be 0 when cache is enabled",
        ));
    }
    if config.operation_timeout_ms == 0 || config.ping_timeout_ms == 0 {
        return Err(Error::configuration("Cache timeouts cannot be 0"));
    }
    if config.effective_provider() == BackendKind::Redis && config.redis_url.trim().is_empty() {
        return Err(Error::configuration(
            "Redis URL cannot be empty when the Redis backend is selected",
        ));
    }
    if config.effective_provider() == BackendKind::Moka && config.moka_max_entries == 0 {
        return Err(Error::configuration(
            "Moka capacity cannot be 0 when the Moka backend is selected",
        ));
    }
    CacheKey::validate_namespace(&config.namespace)
}

fn validate_logging_config(config: &LoggingConfig) -> Result<()> {
    parse_log_level(&config.level).map(|_| ())
}

/// Configuration builder for programmatic configuration
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    config: AppConfig,
}

impl ConfigBuilder {
    /// Create a new configuration builder with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set server configuration
    pub fn with_server(mut self, server: ServerConfig) -> Self {
        self.config.server = server;
        self
    }

    /// Set cache configuration
    pub fn with_cache(mut self, cache: CacheConfig) -> Self {
        self.config.cache = cache;
        self
    }

    /// Set logging configuration
    pub fn with_logging(mut self, logging: LoggingConfig) -> Self {
        self.config.logging = logging;
        self
    }

    /// Validate and build the configuration
    pub fn build(self) -> Result<AppConfig> {
        validate_app_config(&self.config)?;
        Ok(self.config)
    }
}
