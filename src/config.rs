use std::path::PathBuf;
use serde::{Deserialize, Serialize};
use directories::ProjectDirs;
use clap::Parser;
use std::fs;
use tracing::{info, warn};

use crate::security::HashParams;


#[cfg(test)]
mod prop_tests;

/// Name of the SQLite file created when no database URL is configured
pub const DEFAULT_DATABASE_FILE: &str = "marketplace.db";

/// Name of the configuration file inside the config directory
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Configuration for the marketplace server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// URL for the database connection
    pub database_url: String,
    /// Address the server binds to
    pub host: String,
    /// Port the server listens on
    pub port: u16,
    /// Secret used to sign session tokens; generated per process when unset
    pub token_secret: Option<String>,
    /// Lifetime of a session token in hours
    pub token_ttl_hours: i64,
    /// Argon2 memory cost in KiB
    pub hash_memory_kib: u32,
    /// Argon2 iteration count
    pub hash_iterations: u32,
    /// Argon2 lanes
    pub hash_parallelism: u32,
    /// Directory for JSON log files
    pub log_dir: Option<PathBuf>,
}

/// Update structure for Config with all fields optional
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ConfigUpdate {
    #[serde(default)]
    pub database_url: Option<String>,
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default)]
    pub port: Option<u16>,
    #[serde(default)]
    pub token_secret: Option<String>,
    #[serde(default)]
    pub token_ttl_hours: Option<i64>,
    #[serde(default)]
    pub hash_memory_kib: Option<u32>,
    #[serde(default)]
    pub hash_iterations: Option<u32>,
    #[serde(default)]
    pub hash_parallelism: Option<u32>,
    #[serde(default)]
    pub log_dir: Option<PathBuf>,
}

/// Command line arguments for the server
#[derive(Parser, Debug, Default)]
#[clap(name = "marketplace", about = "Marketplace listings API server")]
pub struct CliArgs {
    /// Database URL
    #[clap(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Address to bind to
    #[clap(long, env = "MARKETPLACE_HOST")]
    pub host: Option<String>,

    /// Port to listen on
    #[clap(long, env = "PORT")]
    pub port: Option<u16>,

    /// Secret used to sign session tokens
    #[clap(long, env = "TOKEN_SECRET", hide_env_values = true)]
    pub token_secret: Option<String>,

    /// Token lifetime in hours
    #[clap(long, env = "TOKEN_TTL_HOURS")]
    pub token_ttl_hours: Option<i64>,

    /// Argon2 memory cost in KiB
    #[clap(long, env = "HASH_MEMORY_KIB")]
    pub hash_memory_kib: Option<u32>,

    /// Argon2 iteration count
    #[clap(long, env = "HASH_ITERATIONS")]
    pub hash_iterations: Option<u32>,

    /// Argon2 lanes
    #[clap(long, env = "HASH_PARALLELISM")]
    pub hash_parallelism: Option<u32>,

    /// Directory for JSON log files
    #[clap(long, env = "MARKETPLACE_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    /// Wipe the database and load the fixture data on start
    #[clap(long, env = "MARKETPLACE_SEED", default_value_t = false)]
    pub seed: bool,

    /// Debug mode
    #[clap(long, env = "MARKETPLACE_DEBUG", default_value_t = false)]
    pub debug: bool,
}

impl Config {
    /// Applies a config update to the current configuration
    pub fn apply_update(self, update: ConfigUpdate) -> Self {
        Self {
            database_url: update.database_url.unwrap_or(self.database_url),
            host: update.host.unwrap_or(self.host),
            port: update.port.unwrap_or(self.port),
            token_secret: update.token_secret.or(self.token_secret),
            token_ttl_hours: update.token_ttl_hours.unwrap_or(self.token_ttl_hours),
            hash_memory_kib: update.hash_memory_kib.unwrap_or(self.hash_memory_kib),
            hash_iterations: update.hash_iterations.unwrap_or(self.hash_iterations),
            hash_parallelism: update.hash_parallelism.unwrap_or(self.hash_parallelism),
            log_dir: update.log_dir.or(self.log_dir),
        }
    }

    /// Returns the Argon2 cost parameters
    pub fn hash_params(&self) -> HashParams {
        HashParams {
            memory_kib: self.hash_memory_kib,
            iterations: self.hash_iterations,
            parallelism: self.hash_parallelism,
        }
    }

    /// Returns the token lifetime as a Duration
    pub fn token_ttl(&self) -> chrono::Duration {
        chrono::Duration::hours(self.token_ttl_hours)
    }

    /// Returns the `host:port` pair the server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Returns the base URL a local client reaches the server at
    pub fn server_url(&self) -> String {
        format!("http://{}", self.bind_address())
    }
}

/// Returns the base (default) configuration
pub fn base_config(config_path: Option<PathBuf>) -> Config {
    let database_url = config_path.map_or(DEFAULT_DATABASE_FILE.to_string(), |path| {
        path.join(DEFAULT_DATABASE_FILE).to_string_lossy().to_string()
    });
    let hash = HashParams::default();

    Config {
        database_url,
        host: "127.0.0.1".to_string(),
        port: 5000,
        token_secret: None,
        token_ttl_hours: 24,
        hash_memory_kib: hash.memory_kib,
        hash_iterations: hash.iterations,
        hash_parallelism: hash.parallelism,
        log_dir: None,
    }
}

/// Loads configuration from a TOML file
///
/// A missing file is not an error; it yields an empty update.
pub fn config_from_file(config_path: Option<PathBuf>) -> Result<ConfigUpdate, String> {
    let Some(config_path) = config_path else {
        return Ok(ConfigUpdate::default());
    };

    if !config_path.exists() {
        info!("Config file not found at {:?}, using defaults", config_path);
        return Ok(ConfigUpdate::default());
    }

    let content = fs::read_to_string(&config_path).map_err(|e| {
        warn!("Failed to read config file: {}", e);
        format!("Failed to read config file: {}", e)
    })?;

    let update = toml::from_str::<ConfigUpdate>(&content).map_err(|e| {
        warn!("Failed to parse config file: {}", e);
        format!("Failed to parse config file: {}", e)
    })?;

    info!("Loaded configuration from {:?}", config_path);
    Ok(update)
}

/// Loads configuration from command line arguments
pub fn config_from_args(args: &CliArgs) -> ConfigUpdate {
    ConfigUpdate {
        database_url: args.database_url.clone(),
        host: args.host.clone(),
        port: args.port,
        token_secret: args.token_secret.clone(),
        token_ttl_hours: args.token_ttl_hours,
        hash_memory_kib: args.hash_memory_kib,
        hash_iterations: args.hash_iterations,
        hash_parallelism: args.hash_parallelism,
        log_dir: args.log_dir.clone(),
    }
}

/// Returns the XDG config directory, if it exists
pub fn config_dir_path() -> Option<PathBuf> {
    let Some(proj_dirs) = ProjectDirs::from("com", "marketplace", "marketplace") else {
        warn!("Could not determine XDG config directory, skipping config file");
        return None;
    };

    let path = PathBuf::from(proj_dirs.config_dir());
    if !path.exists() {
        info!("Config path not found at {:?}, using defaults", path);
        return None;
    }

    Some(path)
}

/// Combines the layers in order of increasing precedence
pub fn resolve_config(config_dir: Option<PathBuf>, args: &CliArgs) -> Config {
    let file_update = config_from_file(config_dir.as_ref().map(|dir| dir.join(CONFIG_FILE_NAME)))
        .unwrap_or_default();

    base_config(config_dir)
        .apply_update(file_update)
        .apply_update(config_from_args(args))
}

/// Gets the complete configuration by combining defaults with
/// values from config file, environment variables, and command line arguments
/// in order of increasing precedence
pub fn get_config(args: &CliArgs) -> Config {
    resolve_config(config_dir_path(), args)
}

impl Config {
    /// Logs the resolved settings, leaving the token secret out
    pub fn log_summary(&self) {
        info!(
            "Final configuration: database_url={}, bind={}, token_ttl={}h, token_secret={}, log_dir={:?}",
            self.database_url,
            self.bind_address(),
            self.token_ttl_hours,
            if self.token_secret.is_some() { "set" } else { "generated" },
            self.log_dir
        );
    }
}
