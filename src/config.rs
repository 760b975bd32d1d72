use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::CitedexError;

pub const DEFAULT_DB_PATH: &str = "citedex.db";
pub const DEFAULT_ROWS: u32 = 10;
pub const DEFAULT_LIST_LIMIT: u32 = 50;

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub db_path: Option<String>,
    #[serde(default)]
    pub default_rows: Option<u32>,
}

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub db_path: String,
    pub default_rows: u32,
}

pub struct ConfigLoader;

impl ConfigLoader {
    /// Resolves the effective config. An explicit `--config` path must
    /// exist; the default `citedex.json` is optional and its absence just
    /// yields the built-in defaults.
    pub fn resolve(path: Option<&str>) -> Result<ResolvedConfig, CitedexError> {
        let config_path = match path {
            Some(path) => PathBuf::from(path),
            None => PathBuf::from("citedex.json"),
        };

        if path.is_none() && !config_path.exists() {
            return Ok(Self::resolve_config(Config::default()));
        }

        let content = fs::read_to_string(&config_path)
            .map_err(|_| CitedexError::ConfigRead(config_path.clone()))?;
        let config: Config = serde_json::from_str(&content)
            .map_err(|err| CitedexError::ConfigParse(err.to_string()))?;

        Ok(Self::resolve_config(config))
    }

    pub fn resolve_config(config: Config) -> ResolvedConfig {
        ResolvedConfig {
            db_path: config
                .db_path
                .unwrap_or_else(|| DEFAULT_DB_PATH.to_string()),
            default_rows: config.default_rows.unwrap_or(DEFAULT_ROWS),
        }
    }
}
