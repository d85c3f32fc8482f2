use config::{Config, ConfigError, Environment, File};
use pdfview_common::config::StorageAppConfig;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct CorsConfig {
    #[serde(default)]
    pub allow_origins: Vec<String>,
    #[serde(default = "default_cors_max_age")]
    pub max_age: u64,
}

fn default_cors_max_age() -> u64 {
    3600
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allow_origins: Vec::new(),
            max_age: default_cors_max_age(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Prefix for viewer URLs handed to the browser, e.g.
    /// `https://pdf.example.edu`. Root-relative URLs when unset.
    #[serde(default)]
    pub public_base_url: Option<String>,
    #[serde(default)]
    pub cors: CorsConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 3000,
            public_base_url: None,
            cors: CorsConfig::default(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct DatabaseConfig {
    /// Postgres URL. Instance state is kept in memory when unset.
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub storage: StorageAppConfig,
}

/// Environment overrides, e.g. `PDFVIEW__STORAGE__ROOT`.
/// `PDFVIEW__SERVER__CORS__ALLOW_ORIGINS` takes a comma-separated list.
fn environment() -> Environment {
    Environment::with_prefix("PDFVIEW")
        .separator("__")
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("server.cors.allow_origins")
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var("PDFVIEW_CONFIG").unwrap_or_else(|_| "config/config".into());
        Self::load_from(&path, environment())
    }

    fn load_from(path: &str, env: Environment) -> Result<Self, ConfigError> {
        let s = Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .add_source(File::with_name(path).required(false))
            .add_source(env)
            .build()?;

        s.try_deserialize()
    }

    /// Where viewer URLs for managed assets point.
    pub fn serve_endpoint(&self) -> String {
        let base = self
            .server
            .public_base_url
            .as_deref()
            .unwrap_or_default()
            .trim_end_matches('/');
        format!("{base}/api/v1/assets/serve")
    }
}
