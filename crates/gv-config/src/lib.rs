//! GameVault Configuration System
//!
//! TOML-based configuration with environment variable overrides.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

mod loader;

pub use loader::ConfigLoader;

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Root application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub http: HttpConfig,
    pub mongodb: MongoConfig,
    pub parse: ParseConfig,
    pub store: StoreConfig,
    pub auth: AuthConfig,

    /// Seed demo data on startup
    pub dev_mode: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            http: HttpConfig::default(),
            mongodb: MongoConfig::default(),
            parse: ParseConfig::default(),
            store: StoreConfig::default(),
            auth: AuthConfig::default(),
            dev_mode: false,
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub port: u16,
    pub host: String,
    /// Allowed CORS origins; "*" allows any origin
    pub cors_origins: Vec<String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            port: 1337,
            host: "0.0.0.0".to_string(),
            cors_origins: vec!["*".to_string()],
        }
    }
}

impl HttpConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.is_empty() || self.cors_origins.iter().any(|o| o == "*")
    }
}

/// MongoDB configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MongoConfig {
    pub uri: String,
    pub database: String,
}

impl Default for MongoConfig {
    fn default() -> Self {
        Self {
            uri: "mongodb://localhost:27017".to_string(),
            database: "gamevault".to_string(),
        }
    }
}

/// Cloud function endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseConfig {
    /// Value clients must send in `X-Parse-Application-Id`
    pub app_id: String,
    /// URL prefix the cloud router is mounted under
    pub mount_path: String,
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            app_id: "myAppId".to_string(),
            mount_path: "/parse".to_string(),
        }
    }
}

/// Store backend selection
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// mongodb or memory
    pub backend: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: "mongodb".to_string(),
        }
    }
}

impl StoreConfig {
    pub const BACKENDS: &'static [&'static str] = &["mongodb", "memory"];

    pub fn is_memory(&self) -> bool {
        self.backend.eq_ignore_ascii_case("memory")
    }
}

/// Password hashing parameters (Argon2id)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Memory cost in KiB
    pub argon2_memory_cost: u32,
    pub argon2_time_cost: u32,
    pub argon2_parallelism: u32,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            argon2_memory_cost: 65536, // 64 MiB
            argon2_time_cost: 3,
            argon2_parallelism: 4,
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration with environment variable override
    pub fn load() -> Result<Self, ConfigError> {
        ConfigLoader::new().load()
    }

    /// Check settings that would otherwise fail at first request
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.http.port == 0 {
            return Err(ConfigError::ValidationError("http.port must be non-zero".into()));
        }
        if self.parse.app_id.trim().is_empty() {
            return Err(ConfigError::ValidationError("parse.app_id must be set".into()));
        }
        let mount = &self.parse.mount_path;
        if !mount.starts_with('/') || mount.len() < 2 || mount.ends_with('/') {
            return Err(ConfigError::ValidationError(format!(
                "parse.mount_path must start with '/' and name a sub-path without a trailing '/': {}",
                mount
            )));
        }
        let backend = self.store.backend.to_ascii_lowercase();
        if !StoreConfig::BACKENDS.contains(&backend.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "unknown store.backend '{}' (expected one of {:?})",
                self.store.backend,
                StoreConfig::BACKENDS
            )));
        }
        Ok(())
    }

    /// Generate an example TOML configuration
    pub fn example_toml() -> String {
        r#"# GameVault Configuration
# Environment variables override these settings

dev_mode = false

[http]
port = 1337
host = "0.0.0.0"
cors_origins = ["*"]

[mongodb]
uri = "mongodb://localhost:27017"
database = "gamevault"

[parse]
app_id = "myAppId"
mount_path = "/parse"

[store]
backend = "mongodb"  # mongodb or memory

[auth]
argon2_memory_cost = 65536
argon2_time_cost = 3
argon2_parallelism = 4
"#
        .to_string()
    }
}
