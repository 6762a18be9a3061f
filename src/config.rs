//! Server configuration: command-line flags layered over an optional YAML file.
//!
//! Precedence is CLI flag (or its environment variable), then the file, then
//! the built-in defaults.

use crate::employee_actor;
use crate::framework::IdAssignment;
use clap::Parser;
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// CLI arguments for the server.
#[derive(Parser, Debug, Default)]
#[command(name = "crud-recipe")]
#[command(about = "CRUD resource collections served over HTTP")]
pub struct CliArgs {
    /// Path to the YAML configuration file
    #[arg(short, long, env = "CRUD_RECIPE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Address to bind
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "CRUD_RECIPE_PORT")]
    pub port: Option<u16>,

    /// Default log level when RUST_LOG is unset
    #[arg(long)]
    pub log_level: Option<String>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("invalid listen address {0}")]
    Address(String),
}

/// Root configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Deadline applied to every collection call made on behalf of a request.
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
    /// Capacity of each collection's request queue.
    #[serde(default = "default_mailbox_size")]
    pub mailbox_size: usize,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Reported by `GET /version`.
    #[serde(default = "default_version")]
    pub version: String,
    /// Start the book collection with the two demo books.
    #[serde(default)]
    pub seed_demo_data: bool,
    #[serde(default)]
    pub books: IdAssignment,
    #[serde(default = "employee_actor::default_assignment")]
    pub employees: IdAssignment,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_request_timeout_ms() -> u64 {
    5_000
}

fn default_mailbox_size() -> usize {
    32
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout_ms: default_request_timeout_ms(),
            mailbox_size: default_mailbox_size(),
            log_level: default_log_level(),
            version: default_version(),
            seed_demo_data: false,
            books: IdAssignment::default(),
            employees: employee_actor::default_assignment(),
        }
    }
}

impl ServerConfig {
    /// Builds the effective configuration from the CLI and the file it names.
    pub fn load(args: &CliArgs) -> Result<Self, ConfigError> {
        let mut config = match &args.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        if let Some(host) = &args.host {
            config.host = host.clone();
        }
        if let Some(port) = args.port {
            config.port = port;
        }
        if let Some(level) = &args.log_level {
            config.log_level = level.clone();
        }
        Ok(config)
    }

    /// Load configuration from a YAML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_yaml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|_| ConfigError::Address(format!("{}:{}", self.host, self.port)))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::{ClientIds, IdPolicy};
    use std::io::Write;

    fn write_config(yaml: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(yaml.as_bytes()).unwrap();
        file
    }

    #[test]
    fn should_use_defaults_without_file() {
        let config = ServerConfig::load(&CliArgs::default()).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.request_timeout(), Duration::from_secs(5));
        assert_eq!(config.books.policy, IdPolicy::Sequential { start: 1 });
        assert_eq!(config.employees.client_ids, ClientIds::Ignore);
        assert!(!config.seed_demo_data);
    }

    #[test]
    fn should_parse_partial_yaml() {
        let file = write_config(
            "port: 9000\nversion: \"0.9.0\"\nseed_demo_data: true\nemployees:\n  policy:\n    kind: store_assigned\n",
        );
        let config = ServerConfig::from_file(file.path()).unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.version, "0.9.0");
        assert!(config.seed_demo_data);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.employees.policy, IdPolicy::StoreAssigned);
        // A collection section without client_ids falls back to accepting them.
        assert_eq!(config.employees.client_ids, ClientIds::Accept);
    }

    #[test]
    fn should_let_cli_override_file() {
        let file = write_config("port: 9000\nlog_level: warn\n");
        let args = CliArgs {
            config: Some(file.path().to_path_buf()),
            port: Some(7000),
            ..Default::default()
        };
        let config = ServerConfig::load(&args).unwrap();
        assert_eq!(config.port, 7000);
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn should_report_unreadable_and_malformed_files() {
        let missing = ServerConfig::from_file(Path::new("/nonexistent/crud-recipe.yaml"));
        assert!(matches!(missing, Err(ConfigError::Read { .. })));

        let file = write_config("port: [not a port]\n");
        assert!(matches!(
            ServerConfig::from_file(file.path()),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn should_reject_bad_listen_address() {
        let config = ServerConfig {
            host: "not an ip".into(),
            ..Default::default()
        };
        assert!(matches!(config.socket_addr(), Err(ConfigError::Address(_))));
    }
}
