//! Application configuration and running environment.
//!
//! The config is a TOML document shaped like:
//!
//! ```toml
//! environment = "development"
//!
//! [environment]
//! name = "shop"
//! base-url = "https://shop.example.com"
//!
//! [connections.development]
//! driver = "mysql"
//! host = "127.0.0.1"
//! port = 3306
//! database = "shop"
//! username = "root"
//!
//! [validation]
//! format = "<li>:message</li>"
//!
//! [validation.messages.email]
//! required = "Please tell us your email address."
//! ```
use crate::{TomlValue, error::Error, extension::TomlTableExt};
use std::{fs, path::Path};
use toml::value::Table;
use url::Url;

mod env;

pub use self::env::Env;

/// A parsed configuration together with its selected [`Env`].
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Environment.
    env: Env,
    /// Configuration.
    table: Table,
}

impl Config {
    /// Parses the config from a TOML string.
    /// The env is selected by the top-level `environment` string.
    pub fn parse(content: &str) -> Result<Self, Error> {
        let table = content
            .parse::<Table>()
            .map_err(|err| Error::with_source("fail to parse the config", err))?;
        let env = table
            .get_str("environment")
            .map(Env::from)
            .unwrap_or_default();
        Ok(Self { env, table })
    }

    /// Reads the config from a local file.
    pub fn read_file(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|err| {
            let path = path.display();
            Error::with_source(format!("fail to read the config file `{path}`"), err)
        })?;
        let config = Self::parse(&content)?;
        if let Some(file_name) = path.file_name().and_then(|s| s.to_str()) {
            tracing::info!(env = config.env.as_str(), "`{file_name}` loaded");
        }
        Ok(config)
    }

    /// Loads the config file and lets the `APP_ENV` variable override the env.
    /// With the `dotenv` feature, the `.env` file is loaded first.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        #[cfg(feature = "dotenv")]
        dotenvy::dotenv().ok();

        let mut config = Self::read_file(path)?;
        if let Ok(app_env) = std::env::var("APP_ENV") {
            if !app_env.is_empty() {
                config.env = Env::from(app_env.as_str());
            }
        }
        Ok(config)
    }

    /// Returns `self` with the env replaced.
    #[inline]
    pub fn with_env(mut self, env: Env) -> Self {
        self.env = env;
        self
    }

    /// Returns a reference to the env.
    #[inline]
    pub fn env(&self) -> &Env {
        &self.env
    }

    /// Returns the database connection table for the current env.
    #[inline]
    pub fn connection(&self) -> Option<&Table> {
        self.table
            .get_table("connections")
            .and_then(|connections| connections.get_table(self.env.as_str()))
    }

    /// Looks up a value in the database connection of the current env.
    #[inline]
    pub fn database(&self, key: &str) -> Option<&TomlValue> {
        self.connection().and_then(|connection| connection.get(key))
    }

    /// Looks up a value in the `[environment]` table.
    #[inline]
    pub fn environment(&self, key: &str) -> Option<&TomlValue> {
        self.table
            .get_table("environment")
            .and_then(|environment| environment.get(key))
    }

    /// Looks up a value in the `[environment]` table and parses it as `Url`.
    #[inline]
    pub fn environment_url(&self, key: &str) -> Option<Result<Url, url::ParseError>> {
        self.table
            .get_table("environment")
            .and_then(|environment| environment.parse_url(key))
    }

    /// Returns the `[validation]` table.
    #[inline]
    pub fn validation(&self) -> Option<&Table> {
        self.table.get_table("validation")
    }

    /// Formats the connection URL of the current env,
    /// which looks like `{driver}://{username}:{password}@{host}:{port}/{database}`.
    pub fn database_url(&self) -> Option<String> {
        let connection = self.connection()?;
        let driver = connection.get_str("driver").unwrap_or("mysql");
        let mut url = format!("{driver}://");

        if let Some(username) = connection.get_str("username") {
            url += username;
            if let Some(password) = connection.get_str("password") {
                url += &format!(":{password}");
            }
            url.push('@');
        }

        let host = connection.get_str("host").unwrap_or("localhost");
        url += host;
        if let Some(port) = connection.get_u16("port") {
            url += &format!(":{port}");
        }
        if let Some(database) = connection.get_str("database") {
            url += &format!("/{database}");
        }
        Some(url)
    }
}
