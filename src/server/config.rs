use serde::Deserialize;
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file at {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse TOML from config file at {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("Failed to load config from environment: {0}")]
    Env(#[from] envy::Error),
    #[error("Invalid listen address '{0}'")]
    ListenAddr(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub dataset_path: PathBuf,
    pub listen_addr: SocketAddr,
    pub log_dir: PathBuf,
}

// Partial config for layering
#[derive(Deserialize, Default, Debug)]
struct PartialServerConfig {
    dataset_path: Option<PathBuf>,
    listen_addr: Option<String>,
    log_dir: Option<PathBuf>,
}

fn default_dataset_path() -> PathBuf {
    PathBuf::from("cleaned_supply_chain_data.csv")
}

fn default_listen_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 8000))
}

fn default_log_dir() -> PathBuf {
    PathBuf::from("logs")
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            dataset_path: default_dataset_path(),
            listen_addr: default_listen_addr(),
            log_dir: default_log_dir(),
        }
    }
}

impl ServerConfig {
    /// Resolves the configuration: defaults, then the TOML file (if it
    /// exists), then environment variables, then the `--dataset` override.
    pub fn load(config_path: Option<&Path>, dataset_override: Option<PathBuf>) -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();

        // 1. Load from file (optional)
        let file_config = match config_path {
            Some(path) if path.exists() => read_file(path)?,
            _ => PartialServerConfig::default(),
        };

        // 2. Load from environment variables
        let env_config: PartialServerConfig = envy::from_env::<PartialServerConfig>()?;

        // 3. Merge: environment overrides file, CLI overrides both
        let mut config = merge(file_config, env_config)?;
        if let Some(path) = dataset_override {
            config.dataset_path = path;
        }
        Ok(config)
    }
}

fn read_file(path: &Path) -> Result<PartialServerConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn merge(file: PartialServerConfig, env: PartialServerConfig) -> Result<ServerConfig, ConfigError> {
    let listen_addr = match env.listen_addr.or(file.listen_addr) {
        Some(raw) => raw
            .parse::<SocketAddr>()
            .map_err(|_| ConfigError::ListenAddr(raw))?,
        None => default_listen_addr(),
    };
    Ok(ServerConfig {
        dataset_path: env
            .dataset_path
            .or(file.dataset_path)
            .unwrap_or_else(default_dataset_path),
        listen_addr,
        log_dir: env.log_dir.or(file.log_dir).unwrap_or_else(default_log_dir),
    })
}
