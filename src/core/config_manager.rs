// src/core/config_manager.rs
//! Configuration: which backing store to reach and where to listen

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::app_log;
use crate::core::{Database, ServiceClient, StoreBackend};

const CONFIG_FILE: &str = "config.yaml";
const DEFAULT_DATABASE_FILE: &str = "jobswipe.db";
const DEFAULT_API_KEY_ENV: &str = "STORE_API_KEY";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_PORT: u16 = 8000;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum StoreConfig {
    Sqlite {
        database_path: PathBuf,
    },
    Rest {
        url: String,
        #[serde(default = "default_api_key_env")]
        api_key_env: String,
        #[serde(default = "default_timeout")]
        timeout_seconds: u64,
    },
}

fn default_api_key_env() -> String {
    DEFAULT_API_KEY_ENV.to_string()
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EnvironmentConfig {
    pub store: StoreConfig,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    local: EnvironmentConfig,
    #[serde(default)]
    production: Option<EnvironmentConfig>,
}

#[derive(Debug, Clone)]
pub struct ConfigManager {
    pub environment_name: String,
    pub environment: EnvironmentConfig,
}

impl ConfigManager {
    /// Load configuration from config.yaml, or from the environment when absent
    pub fn load() -> Result<Self> {
        let environment_name = Self::get_environment();
        app_log!(info, "Loading configuration for environment: {}", environment_name);

        let base_dir = std::env::current_dir().context("Failed to get current directory")?;
        let config_path = base_dir.join(CONFIG_FILE);

        let mut environment = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read {}", config_path.display()))?;
            Self::from_yaml(&content, &environment_name)?
        } else {
            app_log!(info, "{} not found, using environment variables", CONFIG_FILE);
            Self::from_env(std::env::var("STORE_URL").ok())
        };

        if let StoreConfig::Sqlite { database_path } = &mut environment.store {
            *database_path = resolve_path(&base_dir, database_path);
        }

        if let Ok(port) = std::env::var("ROCKET_PORT") {
            environment.port = port
                .parse::<u16>()
                .map_err(|_| anyhow::anyhow!("ROCKET_PORT must be a valid port number"))?;
        }

        Ok(Self {
            environment_name,
            environment,
        })
    }

    fn get_environment() -> String {
        std::env::var("JOBSWIPE_ENV")
            .or_else(|_| std::env::var("ENVIRONMENT"))
            .unwrap_or_else(|_| "local".to_string())
    }

    pub fn from_yaml(content: &str, environment_name: &str) -> Result<EnvironmentConfig> {
        let config_file: ConfigFile =
            serde_yaml::from_str(content).context("Failed to parse config.yaml")?;

        Ok(match (environment_name, config_file.production) {
            ("production", Some(production)) => production,
            _ => config_file.local,
        })
    }

    fn from_env(store_url: Option<String>) -> EnvironmentConfig {
        let store = match store_url {
            Some(url) => StoreConfig::Rest {
                url,
                api_key_env: default_api_key_env(),
                timeout_seconds: DEFAULT_TIMEOUT_SECS,
            },
            None => StoreConfig::Sqlite {
                database_path: PathBuf::from(DEFAULT_DATABASE_FILE),
            },
        };

        EnvironmentConfig {
            store,
            port: DEFAULT_PORT,
        }
    }

    /// Open the configured backing store
    pub async fn connect_store(&self) -> Result<Arc<dyn StoreBackend>> {
        match &self.environment.store {
            StoreConfig::Sqlite { database_path } => {
                let db = Database::new(database_path).await?;
                Ok(Arc::new(db))
            }
            StoreConfig::Rest {
                url,
                api_key_env,
                timeout_seconds,
            } => {
                let api_key = std::env::var(api_key_env)
                    .map_err(|_| anyhow::anyhow!("{} environment variable not set", api_key_env))?;
                app_log!(info, "Using REST store at {}", url);
                let client = ServiceClient::new(url, &api_key, *timeout_seconds)?;
                Ok(Arc::new(client))
            }
        }
    }
}

fn resolve_path(base_dir: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}
