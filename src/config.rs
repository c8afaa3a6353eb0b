use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use config::{Config, ConfigError};
use tracing::debug;

pub const CONNECTION_INFO_FILE: &str = "pleasanter_connection_info.json";

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    #[serde(rename = "HOST", alias = "host")]
    pub host: HostConfig,
    #[serde(rename = "SITES", alias = "sites", default)]
    pub sites: HashMap<String, serde_json::Value>,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub page: PageConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct HostConfig {
    #[serde(rename = "URL", alias = "url")]
    pub url: String,
    #[serde(rename = "APIKEY", alias = "apikey")]
    pub api_key: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ApiConfig {
    pub version: f64,
    pub connect_timeout_secs: f64,
    pub read_timeout_secs: f64,
    pub headers: HashMap<String, String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        let mut headers = HashMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        headers.insert("charset".to_string(), "UTF-8".to_string());

        Self {
            version: 1.1,
            connect_timeout_secs: 3.0,
            read_timeout_secs: 10.0,
            headers,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct PageConfig {
    pub record_id: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            record_id: "6".to_string(),
        }
    }
}

impl Settings {
    /// Loads `config/default`, the connection info file and `APP__*` variables.
    pub fn new() -> Result<Self, ConfigError> {
        Self::load(None)
    }

    /// Like [`Settings::new`], but reads connection info from `path`, which must exist.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let connection_source = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name(CONNECTION_INFO_FILE).required(false),
        };

        let builder = Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(connection_source)
            .add_source(config::Environment::with_prefix("APP").prefix_separator("__").separator("__"));

        let config = builder.build()?;

        if let Ok(headers) = config.get_table("api.headers") {
            debug!(
                ?headers,
                "Loaded API headers from configuration"
            );
        }

        let settings: Settings = config.try_deserialize()?;

        debug!(
            host = %settings.host.url,
            api_version = settings.api.version,
            "Parsed settings"
        );

        Ok(settings)
    }

    /// Settings for a single host with every other section at its default.
    pub fn with_host(url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            host: HostConfig {
                url: url.into(),
                api_key: api_key.into(),
            },
            sites: HashMap::new(),
            api: ApiConfig::default(),
            page: PageConfig::default(),
        }
    }
}

/// The on-disk connection info file.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ConnectionInfo {
    #[serde(rename = "HOST")]
    pub host: HostConfig,
    #[serde(rename = "SITES", default)]
    pub sites: HashMap<String, serde_json::Value>,
}

impl ConnectionInfo {
    /// Returns `None` when either value is empty.
    pub fn new(url: &str, api_key: &str) -> Option<Self> {
        if url.is_empty() || api_key.is_empty() {
            return None;
        }

        Some(Self {
            host: HostConfig {
                url: url.to_string(),
                api_key: api_key.to_string(),
            },
            sites: HashMap::new(),
        })
    }

    pub fn write_to(&self, path: &Path) -> crate::error::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
