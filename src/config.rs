use anyhow::{bail, Context, Result};
use std::env;
use std::fmt;

/// Connection parameters for the animals collection.
#[derive(Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub user: Option<String>,
    pub password: Option<String>,
    pub host: String,
    pub port: u16,
    pub database: String,
    pub collection: String,
}

impl StoreConfig {
    /// Build the `mongodb://` connection string. Credentials are percent-encoded so
    /// passwords containing `@`, `:` or `/` survive URI parsing.
    pub fn connection_uri(&self) -> Result<String> {
        let credentials = match (&self.user, &self.password) {
            (Some(user), Some(password)) => format!(
                "{}:{}@",
                urlencoding::encode(user),
                urlencoding::encode(password)
            ),
            (Some(user), None) => format!("{}@", urlencoding::encode(user)),
            (None, Some(_)) => bail!("MONGO_PASSWORD is set but MONGO_USER is not"),
            (None, None) => String::new(),
        };

        Ok(format!("mongodb://{}{}:{}", credentials, self.host, self.port))
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            user: None,
            password: None,
            host: "localhost".to_string(),
            port: 27017,
            database: "AAC".to_string(),
            collection: "animals".to_string(),
        }
    }
}

// Hand-written so the password never ends up in logs.
impl fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreConfig")
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("collection", &self.collection)
            .finish()
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub store: StoreConfig,
    pub server_address: String,
    pub static_dir: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let defaults = StoreConfig::default();
        let port = match env::var("MONGO_PORT") {
            Ok(raw) => raw
                .trim()
                .parse::<u16>()
                .with_context(|| format!("MONGO_PORT must be a port number, got '{}'", raw))?,
            Err(_) => defaults.port,
        };

        let store = StoreConfig {
            user: non_empty_var("MONGO_USER"),
            password: non_empty_var("MONGO_PASSWORD"),
            host: non_empty_var("MONGO_HOST").unwrap_or(defaults.host),
            port,
            database: non_empty_var("MONGO_DATABASE").unwrap_or(defaults.database),
            collection: non_empty_var("MONGO_COLLECTION").unwrap_or(defaults.collection),
        };

        // Fail at startup rather than on the first request.
        store.connection_uri()?;

        Ok(Config {
            store,
            server_address: env::var("SERVER_ADDRESS")
                .unwrap_or_else(|_| "0.0.0.0:5000".to_string()),
            static_dir: non_empty_var("STATIC_DIR"),
        })
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
