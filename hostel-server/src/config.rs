//! Database configuration
//!
//! Built once at process start from environment variables and passed by
//! reference to everything that needs a connection.
//!
//! | Variable | Default |
//! |---|---|
//! | `DATABASE_URL` | unset (overrides the discrete variables) |
//! | `DB_HOST` | `localhost` |
//! | `DB_PORT` | `5432` |
//! | `DB_USER` | `postgres` |
//! | `DB_PASSWORD` | empty |
//! | `DB_NAME` | `hostel_management_db` |
//! | `DB_MAX_CONNECTIONS` | `5` |
//! | `DB_ACQUIRE_TIMEOUT_SECS` | `30` |

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use sqlx::postgres::PgConnectOptions;

const DEFAULT_HOST: &str = "localhost";
const DEFAULT_PORT: u16 = 5432;
const DEFAULT_USER: &str = "postgres";
const DEFAULT_DATABASE: &str = "hostel_management_db";

/// Database that always exists on a PostgreSQL server, used to create ours.
const MAINTENANCE_DATABASE: &str = "postgres";

/// Default maximum connections for the pool.
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

const DEFAULT_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: '{value}'")]
    InvalidVar { var: &'static str, value: String },

    #[error("invalid DATABASE_URL: {0}")]
    InvalidUrl(#[source] sqlx::Error),
}

/// Storage connection parameters
#[derive(Clone)]
pub struct DbConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
    /// Full connection URL. When set, it takes precedence over the fields above.
    pub url: Option<String>,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_owned(),
            port: DEFAULT_PORT,
            user: DEFAULT_USER.to_owned(),
            password: String::new(),
            database: DEFAULT_DATABASE.to_owned(),
            url: None,
            max_connections: DEFAULT_MAX_CONNECTIONS,
            acquire_timeout: DEFAULT_ACQUIRE_TIMEOUT,
        }
    }
}

// Hand-written so the password never ends up in logs.
impl fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"***")
            .field("database", &self.database)
            .field("url", &self.url.as_ref().map(|_| "***"))
            .field("max_connections", &self.max_connections)
            .field("acquire_timeout", &self.acquire_timeout)
            .finish()
    }
}

fn parse_var<T: FromStr>(var: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidVar { var, value })
}

impl DbConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary lookup function.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match get("DB_PORT") {
            Some(v) => parse_var("DB_PORT", v)?,
            None => defaults.port,
        };
        let max_connections = match get("DB_MAX_CONNECTIONS") {
            Some(v) => parse_var("DB_MAX_CONNECTIONS", v)?,
            None => defaults.max_connections,
        };
        let acquire_timeout = match get("DB_ACQUIRE_TIMEOUT_SECS") {
            Some(v) => Duration::from_secs(parse_var("DB_ACQUIRE_TIMEOUT_SECS", v)?),
            None => defaults.acquire_timeout,
        };

        let config = Self {
            host: get("DB_HOST").unwrap_or(defaults.host),
            port,
            user: get("DB_USER").unwrap_or(defaults.user),
            // An empty password is a legitimate value.
            password: lookup("DB_PASSWORD").unwrap_or_default(),
            database: get("DB_NAME").unwrap_or(defaults.database),
            url: get("DATABASE_URL"),
            max_connections,
            acquire_timeout,
        };

        // Fail early on a malformed URL rather than at first connect.
        config.connect_options()?;
        Ok(config)
    }

    /// Replace the discrete parameters with a full connection URL.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Connection options for the hostel database.
    pub fn connect_options(&self) -> Result<PgConnectOptions, ConfigError> {
        match &self.url {
            Some(url) => PgConnectOptions::from_str(url).map_err(ConfigError::InvalidUrl),
            None => Ok(PgConnectOptions::new()
                .host(&self.host)
                .port(self.port)
                .username(&self.user)
                .password(&self.password)
                .database(&self.database)),
        }
    }

    /// Connection options for the server's maintenance database.
    ///
    /// Used to create the hostel database when it does not exist yet.
    pub fn server_options(&self) -> Result<PgConnectOptions, ConfigError> {
        Ok(self.connect_options()?.database(MAINTENANCE_DATABASE))
    }

    /// Name of the hostel database.
    pub fn database_name(&self) -> Result<String, ConfigError> {
        let options = self.connect_options()?;
        Ok(options
            .get_database()
            .map(str::to_owned)
            .unwrap_or_else(|| self.database.clone()))
    }

    /// One-line description with the password masked.
    pub fn display_masked(&self) -> String {
        match &self.url {
            Some(url) => mask_url(url),
            None => format!(
                "postgres://{}:***@{}:{}/{}",
                self.user, self.host, self.port, self.database
            ),
        }
    }
}

/// Replace every password in a connection URL with `***`.
///
/// Covers the userinfo part (split at the last `@`, since passwords are
/// often pasted unencoded) and `password=` query parameters.
fn mask_url(url: &str) -> String {
    let Some((scheme, rest)) = url.split_once("://") else {
        return "***".to_owned();
    };
    let (location, query) = match rest.split_once('?') {
        Some((location, query)) => (location, Some(query)),
        None => (rest, None),
    };

    let location = match location.rsplit_once('@') {
        Some((userinfo, host)) => {
            let user = userinfo.split(':').next().unwrap_or_default();
            format!("{user}:***@{host}")
        }
        None => location.to_owned(),
    };

    match query {
        Some(query) => {
            let pairs: Vec<String> = query
                .split('&')
                .map(|pair| match pair.split_once('=') {
                    Some((key, _)) if key.eq_ignore_ascii_case("password") => {
                        format!("{key}=***")
                    }
                    _ => pair.to_owned(),
                })
                .collect();
            format!("{scheme}://{location}?{}", pairs.join("&"))
        }
        None => format!("{scheme}://{location}"),
    }
}
