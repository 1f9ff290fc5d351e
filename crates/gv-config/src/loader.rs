//! Configuration loader with file and environment variable support

use crate::{AppConfig, ConfigError};
use std::env;
use std::path::PathBuf;
use tracing::{info, warn};

/// Standard config file search paths
const CONFIG_PATHS: &[&str] = &[
    "config.toml",
    "gamevault.toml",
    "./config/config.toml",
    "/etc/gamevault/config.toml",
];

/// Configuration loader
pub struct ConfigLoader {
    config_path: Option<PathBuf>,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self { config_path: None }
    }

    /// Create a loader with a specific config file path
    pub fn with_path<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            config_path: Some(path.into()),
        }
    }

    /// Load configuration from file (if found) with environment variable overrides
    pub fn load(&self) -> Result<AppConfig, ConfigError> {
        self.load_with(|key| env::var(key).ok())
    }

    /// Same as [`load`](Self::load) with an explicit variable lookup
    pub fn load_with<F>(&self, lookup: F) -> Result<AppConfig, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = AppConfig::default();

        if let Some(path) = self.find_config_file(&lookup) {
            info!(?path, "Loading configuration from file");
            config = AppConfig::from_file(&path)?;
        }

        apply_overrides(&mut config, &lookup);
        config.validate()?;

        Ok(config)
    }

    fn find_config_file<F>(&self, lookup: &F) -> Option<PathBuf>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = &self.config_path {
            if path.exists() {
                return Some(path.clone());
            }
            warn!(?path, "Configured file does not exist, searching defaults");
        }

        if let Some(path) = lookup("GAMEVAULT_CONFIG").map(PathBuf::from) {
            if path.exists() {
                return Some(path);
            }
        }

        CONFIG_PATHS
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_into<T: std::str::FromStr>(target: &mut T, key: &str, raw: Option<String>) {
    if let Some(raw) = raw {
        match raw.parse() {
            Ok(value) => *target = value,
            Err(_) => warn!(key, value = %raw, "Ignoring unparseable override"),
        }
    }
}

/// Apply environment variable overrides.
///
/// `DB_URL` and `PORT` are honoured for deployments that predate the
/// `GAMEVAULT_` prefix; the prefixed names win when both are set.
fn apply_overrides<F>(config: &mut AppConfig, lookup: &F)
where
    F: Fn(&str) -> Option<String>,
{
    // HTTP
    parse_into(&mut config.http.port, "PORT", lookup("PORT"));
    parse_into(&mut config.http.port, "GAMEVAULT_HTTP_PORT", lookup("GAMEVAULT_HTTP_PORT"));
    if let Some(val) = lookup("GAMEVAULT_HTTP_HOST") {
        config.http.host = val;
    }
    if let Some(val) = lookup("GAMEVAULT_CORS_ORIGINS") {
        config.http.cors_origins = val
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
    }

    // MongoDB
    if let Some(val) = lookup("DB_URL") {
        config.mongodb.uri = val;
    }
    if let Some(val) = lookup("GAMEVAULT_MONGODB_URI") {
        config.mongodb.uri = val;
    }
    if let Some(val) = lookup("GAMEVAULT_MONGODB_DATABASE") {
        config.mongodb.database = val;
    }

    // Cloud endpoint
    if let Some(val) = lookup("GAMEVAULT_APP_ID") {
        config.parse.app_id = val;
    }
    if let Some(val) = lookup("GAMEVAULT_MOUNT_PATH") {
        config.parse.mount_path = val;
    }

    // Store
    if let Some(val) = lookup("GAMEVAULT_STORE_BACKEND") {
        config.store.backend = val;
    }

    // Auth
    parse_into(
        &mut config.auth.argon2_memory_cost,
        "GAMEVAULT_ARGON2_MEMORY_COST",
        lookup("GAMEVAULT_ARGON2_MEMORY_COST"),
    );
    parse_into(
        &mut config.auth.argon2_time_cost,
        "GAMEVAULT_ARGON2_TIME_COST",
        lookup("GAMEVAULT_ARGON2_TIME_COST"),
    );
    parse_into(
        &mut config.auth.argon2_parallelism,
        "GAMEVAULT_ARGON2_PARALLELISM",
        lookup("GAMEVAULT_ARGON2_PARALLELISM"),
    );

    // General
    if let Some(val) = lookup("GAMEVAULT_DEV_MODE") {
        config.dev_mode = val == "true" || val == "1";
    }
}
