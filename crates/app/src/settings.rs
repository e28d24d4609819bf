//! Handles settings for the application. Configuration is written in
//! `settings.toml` and can be overridden with `FINBOARD__<SECTION>__<KEY>`
//! environment variables.
//!
//! ```toml
//! [app]
//! level = "info"
//!
//! [server]
//! bind = "127.0.0.1"
//! port = 5000
//! database = { sqlite = "finboard.db" }
//!
//! [auth]
//! jwt_secret = "change-me"
//! ```
use config::{Config, ConfigError, Environment, File};
use engine::AuthConfig;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct App {
    #[serde(default = "default_level")]
    pub level: String,
}

impl Default for App {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}

#[derive(Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Database {
    #[default]
    Memory,
    Sqlite(String),
}

#[derive(Debug, Deserialize)]
pub struct Server {
    pub bind: Option<String>,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub database: Database,
}

impl Default for Server {
    fn default() -> Self {
        Self {
            bind: None,
            port: default_port(),
            database: Database::default(),
        }
    }
}

fn default_port() -> u16 {
    5000
}

impl Server {
    pub fn addr(&self) -> String {
        let bind = self.bind.as_deref().unwrap_or("127.0.0.1");
        format!("{bind}:{}", self.port)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct Auth {
    pub jwt_secret: Option<String>,
    pub bcrypt_cost: Option<u32>,
}

impl Auth {
    /// Fills the gaps with defaults. A missing secret is allowed but loud.
    pub fn into_config(self) -> AuthConfig {
        let defaults = AuthConfig::default();
        let jwt_secret = self.jwt_secret.unwrap_or_else(|| {
            tracing::warn!("auth.jwt_secret is not set, falling back to the default secret");
            defaults.jwt_secret.clone()
        });

        AuthConfig {
            jwt_secret,
            bcrypt_cost: self.bcrypt_cost.unwrap_or(defaults.bcrypt_cost),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub app: App,
    #[serde(default)]
    pub server: Server,
    #[serde(default)]
    pub auth: Auth,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("settings").required(false))
            .add_source(Environment::with_prefix("FINBOARD").separator("__"))
            .build()?;

        settings.try_deserialize()
    }
}
