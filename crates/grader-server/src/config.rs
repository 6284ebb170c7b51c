//! Server configuration

use grader_core::program::AE_PROJECT_WORK;
use grader_core::IncompletePolicy;
use grader_repository::StorageConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default config file, resolved by the `config` crate with any supported extension
pub const DEFAULT_CONFIG_FILE: &str = "config/server";

/// Prefix of configuration environment variables, e.g. `GRADER_PORT`
pub const ENV_PREFIX: &str = "GRADER";

/// Where the active exam program comes from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ProgramSource {
    /// One of the programs compiled into the grader
    Builtin {
        #[serde(default = "default_program_id")]
        id: String,
    },
    /// A YAML or JSON program definition on disk
    File { path: PathBuf },
}

fn default_program_id() -> String {
    AE_PROJECT_WORK.to_string()
}

impl Default for ProgramSource {
    fn default() -> Self {
        ProgramSource::Builtin {
            id: default_program_id(),
        }
    }
}

/// Server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server host
    pub host: String,

    /// Server port (HTTP)
    pub port: u16,

    /// Record storage backend
    pub storage: StorageConfig,

    /// Active exam program
    pub program: ProgramSource,

    /// Overrides the program's handling of records without any scores
    pub incomplete_policy: Option<IncompletePolicy>,

    /// Log level for the grader crates when `RUST_LOG` is not set
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            storage: StorageConfig::default(),
            program: ProgramSource::default(),
            incomplete_policy: None,
            log_level: "info".to_string(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from `.env`, the default config file and
    /// environment variables
    pub fn load() -> anyhow::Result<Self> {
        // Load .env file if exists
        dotenvy::dotenv().ok();

        Self::load_from(DEFAULT_CONFIG_FILE)
    }

    /// Load configuration from the given file (optional) layered with
    /// environment variables. Nested keys use `__`, e.g.
    /// `GRADER_STORAGE__TYPE=memory`.
    pub fn load_from(file: &str) -> anyhow::Result<Self> {
        config::Config::builder()
            .add_source(config::File::with_name(file).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to read config: {}", e))?
            .try_deserialize()
            .map_err(|e| anyhow::anyhow!("Failed to deserialize config: {}", e))
    }

    /// Socket address string to bind
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Default tracing filter for this configuration
    pub fn log_filter(&self) -> String {
        format!(
            "grader_server={level},grader_repository={level},tower_http=debug",
            level = self.log_level
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_config_default() {
        let config = ServerConfig::default();

        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8000);
        assert_eq!(config.storage, StorageConfig::default());
        assert_eq!(config.program, ProgramSource::default());
        assert!(config.incomplete_policy.is_none());
        assert_eq!(config.log_level, "info");
        assert_eq!(config.bind_address(), "127.0.0.1:8000");
    }

    #[test]
    fn test_program_source_default() {
        if let ProgramSource::Builtin { id } = ProgramSource::default() {
            assert_eq!(id, "ae-project-work");
        } else {
            panic!("Expected builtin program source");
        }
    }

    #[test]
    fn test_log_filter() {
        let config = ServerConfig {
            log_level: "debug".to_string(),
            ..ServerConfig::default()
        };
        assert_eq!(
            config.log_filter(),
            "grader_server=debug,grader_repository=debug,tower_http=debug"
        );
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: ServerConfig = serde_json::from_str(r#"{"port": 9000}"#).unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.storage, StorageConfig::default());
    }
}
