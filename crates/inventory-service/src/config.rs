use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::StartupError;

/// Environment variable overriding the listening port
pub const PORT_ENV: &str = "PORT";

/// Configuration structure, optionally loaded from YAML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Listening address for the HTTP server
    #[serde(default = "default_listen_address")]
    pub listen_address: String,

    /// Listening port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Cross-origin policy
    #[serde(default)]
    pub cors: CorsConfig,

    /// API documentation settings
    #[serde(default)]
    pub docs: DocsConfig,
}

fn default_listen_address() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    4000
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Whether credentialed requests are allowed
    #[serde(default = "default_true")]
    pub allow_credentials: bool,

    /// Allowed request methods
    #[serde(default = "default_allow_methods")]
    pub allow_methods: Vec<String>,

    /// Allowed request headers
    #[serde(default = "default_allow_headers")]
    pub allow_headers: Vec<String>,
}

fn default_true() -> bool {
    true
}

fn default_allow_methods() -> Vec<String> {
    ["GET", "POST", "PUT", "DELETE", "PATCH", "OPTIONS"]
        .iter()
        .map(|m| m.to_string())
        .collect()
}

fn default_allow_headers() -> Vec<String> {
    ["Content-Type", "Authorization", "Accept"]
        .iter()
        .map(|h| h.to_string())
        .collect()
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allow_credentials: default_true(),
            allow_methods: default_allow_methods(),
            allow_headers: default_allow_headers(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocsConfig {
    /// OpenAPI document title
    #[serde(default = "default_docs_title")]
    pub title: String,

    /// OpenAPI document description
    #[serde(default = "default_docs_description")]
    pub description: String,

    /// API version advertised in the document
    #[serde(default = "default_docs_version")]
    pub version: String,

    /// Mount point of the Swagger UI
    #[serde(default = "default_docs_path")]
    pub path: String,

    /// Path serving the OpenAPI JSON document
    #[serde(default = "default_docs_spec_path")]
    pub spec_path: String,
}

fn default_docs_title() -> String {
    "Inventory Service API".to_string()
}

fn default_docs_description() -> String {
    "API para gestión de inventario".to_string()
}

fn default_docs_version() -> String {
    "1.0.0".to_string()
}

fn default_docs_path() -> String {
    "/docs".to_string()
}

fn default_docs_spec_path() -> String {
    "/docs-json".to_string()
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            title: default_docs_title(),
            description: default_docs_description(),
            version: default_docs_version(),
            path: default_docs_path(),
            spec_path: default_docs_spec_path(),
        }
    }
}

impl Config {
    /// Resolve the configuration: defaults, then the optional YAML file, then the environment
    pub fn load(path: Option<&str>) -> Result<Self, StartupError> {
        let mut config = match path {
            Some(path) => {
                let config = Self::from_file(path)?;
                info!("Loaded configuration from {}", path);
                config
            }
            None => Self::default(),
        };

        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Load configuration from a YAML file
    pub fn from_file(path: &str) -> Result<Self, StartupError> {
        let contents = std::fs::read_to_string(path).map_err(|source| StartupError::ConfigFile {
            path: path.to_string(),
            source,
        })?;
        serde_yaml::from_str(&contents).map_err(|source| StartupError::ConfigParse {
            path: path.to_string(),
            source,
        })
    }

    /// Apply environment overrides through `lookup`
    ///
    /// An absent or empty `PORT` leaves the current port untouched.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), StartupError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(PORT_ENV) {
            let trimmed = value.trim();
            if !trimmed.is_empty() {
                self.port = trimmed
                    .parse()
                    .map_err(|_| StartupError::InvalidPort { value: value.clone() })?;
            }
        }
        Ok(())
    }

    /// Address the HTTP listener binds to
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.listen_address, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_address: default_listen_address(),
            port: default_port(),
            cors: CorsConfig::default(),
            docs: DocsConfig::default(),
        }
    }
}
