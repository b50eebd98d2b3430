use serde::{Deserialize, Serialize};
use std::{
    env,
    fs::{self, File},
    io::{self, Write},
    path::{Path, PathBuf},
};
use thiserror::Error;

use crate::currency::{CurrencyFormat, DEFAULT_CURRENCY_SYMBOL};

/// Overrides the directory holding `config/config.json`.
pub const HOME_ENV: &str = "BILLSPLIT_HOME";
const APP_DIR_NAME: &str = "billsplit";
const CONFIG_DIR: &str = "config";
const CONFIG_FILE: &str = "config.json";
const TMP_SUFFIX: &str = "tmp";

/// Default lifetime of the "copied" indicator.
pub const DEFAULT_COPY_FEEDBACK_MS: u64 = 2000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Invalid configuration: {0}")]
    Serde(String),
    #[error("Unknown setting `{0}`")]
    UnknownKey(String),
    #[error("Invalid value `{value}` for `{key}`")]
    InvalidValue { key: String, value: String },
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Serde(err.to_string())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub currency_symbol: String,
    pub copy_feedback_ms: u64,
    pub ui_color_enabled: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.into(),
            copy_feedback_ms: DEFAULT_COPY_FEEDBACK_MS,
            ui_color_enabled: true,
        }
    }
}

impl Config {
    pub const KEYS: [&'static str; 3] = ["currency_symbol", "copy_feedback_ms", "ui_color_enabled"];

    pub fn currency_format(&self) -> CurrencyFormat {
        CurrencyFormat::new(self.currency_symbol.clone())
    }

    /// Updates one setting from its textual form.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let invalid = || ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        };
        match key {
            "currency_symbol" => {
                let symbol = value.trim();
                if symbol.is_empty() {
                    return Err(invalid());
                }
                self.currency_symbol = symbol.to_string();
            }
            "copy_feedback_ms" => {
                self.copy_feedback_ms = value.trim().parse().map_err(|_| invalid())?;
            }
            "ui_color_enabled" => {
                self.ui_color_enabled = match value.trim().to_ascii_lowercase().as_str() {
                    "true" | "on" | "yes" | "1" => true,
                    "false" | "off" | "no" | "0" => false,
                    _ => return Err(invalid()),
                };
            }
            other => return Err(ConfigError::UnknownKey(other.to_string())),
        }
        Ok(())
    }

    /// `(key, value)` pairs in display order.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        vec![
            ("currency_symbol", self.currency_symbol.clone()),
            ("copy_feedback_ms", self.copy_feedback_ms.to_string()),
            ("ui_color_enabled", self.ui_color_enabled.to_string()),
        ]
    }
}

pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    /// Resolves the location from `BILLSPLIT_HOME`, then the platform config dir.
    pub fn from_env() -> Self {
        let path = match env::var_os(HOME_ENV) {
            Some(home) => PathBuf::from(home).join(CONFIG_DIR).join(CONFIG_FILE),
            None => dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(APP_DIR_NAME)
                .join(CONFIG_FILE),
        };
        Self { path }
    }

    pub fn with_base_dir(base: impl AsRef<Path>) -> Self {
        Self {
            path: base.as_ref().join(CONFIG_DIR).join(CONFIG_FILE),
        }
    }

    pub fn load(&self) -> Result<Config, ConfigError> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<(), ConfigError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        write_file(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        tracing::debug!(path = %self.path.display(), "configuration saved");
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_file(path: &Path, data: &str) -> Result<(), ConfigError> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
