use serde::Deserialize;
use std::path::Path;
use tracing::warn;

use crate::error::{AppResult, ConfigError, FileError};
use crate::models::CatalogMode;

/// Default config file, read when present
pub const DEFAULT_CONFIG_FILE: &str = "pathfinder.toml";

/// Program configuration
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL shared by `/predict`, `/chat` and the health probe
    pub api_base_url: String,
    /// Overrides the base URL for `/predict` only
    pub predict_base_url: Option<String>,
    /// Overrides the base URL for `/chat` only
    pub chat_base_url: Option<String>,
    /// Branch step or flat subject list
    pub catalog_mode: CatalogMode,
    /// Custom catalog TOML; replaces the built-in catalog
    pub catalog_file: Option<String>,
    /// Send `probability` alongside `prompt` and `role` to `/chat`
    pub include_probability: bool,
    /// Probe the service once at start-up
    pub check_health: bool,
    /// Where to write the rendered results page
    pub report_file: Option<String>,
    /// Debug-level logs
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "https://aiml-project-swqs.onrender.com".to_string(),
            predict_base_url: None,
            chat_base_url: None,
            catalog_mode: CatalogMode::Branched,
            catalog_file: None,
            include_probability: false,
            check_health: true,
            report_file: None,
            verbose_logging: false,
        }
    }
}

impl Config {
    /// Defaults, then `PATHFINDER_CONFIG` (or `pathfinder.toml` if present),
    /// then environment variables
    pub fn load() -> AppResult<Self> {
        let base = match std::env::var("PATHFINDER_CONFIG") {
            Ok(path) => Self::from_toml_file(Path::new(&path))?,
            Err(_) if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_toml_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            Err(_) => Self::default(),
        };
        let config = base.with_env(|name| std::env::var(name).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults overridden by environment variables
    pub fn from_env() -> AppResult<Self> {
        let config = Self::default().with_env(|name| std::env::var(name).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_file(path: &Path) -> AppResult<Self> {
        let display = path.display().to_string();
        let content =
            std::fs::read_to_string(path).map_err(|e| FileError::read_failed(&display, e))?;
        let config: Config = toml::from_str(&content).map_err(|e| FileError::TomlParseFailed {
            path: display,
            source: Box::new(e),
        })?;
        Ok(config)
    }

    /// Applies overrides from a variable lookup (the process environment in
    /// production, a map in tests)
    pub fn with_env<F>(self, lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let default = self;
        Ok(Self {
            api_base_url: lookup("PATHFINDER_API_BASE_URL").unwrap_or(default.api_base_url),
            predict_base_url: lookup("PATHFINDER_PREDICT_BASE_URL").or(default.predict_base_url),
            chat_base_url: lookup("PATHFINDER_CHAT_BASE_URL").or(default.chat_base_url),
            catalog_mode: match lookup("PATHFINDER_CATALOG_MODE") {
                Some(v) => v
                    .parse::<CatalogMode>()
                    .map_err(|_| parse_failed("PATHFINDER_CATALOG_MODE", &v, "catalog mode"))?,
                None => default.catalog_mode,
            },
            catalog_file: lookup("PATHFINDER_CATALOG_FILE").or(default.catalog_file),
            include_probability: parse_bool(
                &lookup,
                "PATHFINDER_INCLUDE_PROBABILITY",
                default.include_probability,
            )?,
            check_health: parse_bool(&lookup, "PATHFINDER_CHECK_HEALTH", default.check_health)?,
            report_file: lookup("PATHFINDER_REPORT_FILE").or(default.report_file),
            verbose_logging: parse_bool(&lookup, "VERBOSE_LOGGING", default.verbose_logging)?,
        })
    }

    /// Rejects empty or non-http base URLs
    pub fn validate(&self) -> AppResult<()> {
        let urls = [
            ("api_base_url", Some(&self.api_base_url)),
            ("predict_base_url", self.predict_base_url.as_ref()),
            ("chat_base_url", self.chat_base_url.as_ref()),
        ];
        for (field, value) in urls {
            if let Some(value) = value {
                if !(value.starts_with("http://") || value.starts_with("https://")) {
                    return Err(ConfigError::InvalidBaseUrl {
                        field: field.to_string(),
                        value: value.clone(),
                    }
                    .into());
                }
            }
        }
        Ok(())
    }

    pub fn predict_base(&self) -> &str {
        self.predict_base_url.as_deref().unwrap_or(&self.api_base_url)
    }

    pub fn chat_base(&self) -> &str {
        self.chat_base_url.as_deref().unwrap_or(&self.api_base_url)
    }

    /// Whether `/predict` and `/chat` resolve to different hosts
    pub fn is_split_host(&self) -> bool {
        self.predict_base().trim_end_matches('/') != self.chat_base().trim_end_matches('/')
    }

    /// Logs settings that are allowed but probably unintended
    pub fn warn_suspicious(&self) {
        if self.is_split_host() {
            warn!(
                "⚠️ /predict and /chat use different hosts ({} vs {})",
                self.predict_base(),
                self.chat_base()
            );
        }
    }
}

fn parse_bool<F>(lookup: &F, name: &str, default: bool) -> AppResult<bool>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(v) => match v.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(parse_failed(name, &v, "bool").into()),
        },
        None => Ok(default),
    }
}

fn parse_failed(name: &str, value: &str, expected: &str) -> ConfigError {
    ConfigError::EnvVarParseFailed {
        var_name: name.to_string(),
        value: value.to_string(),
        expected_type: expected.to_string(),
    }
}
