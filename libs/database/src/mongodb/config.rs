#[cfg(feature = "config")]
use core_config::{ConfigError, FromEnv, env_first, env_parse_or};

/// Database used when neither `MONGODB_DATABASE` nor the URI path names one.
pub const DEFAULT_DATABASE: &str = "rsvp";

/// MongoDB connection settings.
///
/// Constructed manually or loaded from environment variables (with the
/// `config` feature).
///
/// # Example
///
/// ```ignore
/// use database::mongodb::MongoConfig;
///
/// let config = MongoConfig::new("mongodb://localhost:27017/rsvp");
/// let config = MongoConfig::with_database("mongodb://localhost:27017", "rsvp");
/// let config = MongoConfig::from_env()?;
/// ```
#[derive(Clone, Debug)]
pub struct MongoConfig {
    /// Connection string
    /// Format: mongodb://[username:password@]host[:port][/database][?options]
    pub url: String,

    /// Explicit database name; overrides the one in the URI path
    pub database: Option<String>,

    /// Optional application name for server logs
    pub app_name: Option<String>,

    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,

    /// Server selection timeout in seconds
    pub server_selection_timeout_secs: u64,
}

impl MongoConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            database: None,
            app_name: None,
            connect_timeout_secs: 10,
            server_selection_timeout_secs: 30,
        }
    }

    pub fn with_database(url: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            database: Some(database.into()),
            ..Self::new(url)
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// The connection string with any `user:password@` credentials masked,
    /// suitable for logs.
    pub fn redacted_url(&self) -> String {
        let Some(scheme_end) = self.url.find("://") else {
            return self.url.clone();
        };
        let authority_start = scheme_end + 3;
        let rest = &self.url[authority_start..];
        let authority_end = rest.find('/').unwrap_or(rest.len());

        match rest[..authority_end].rfind('@') {
            Some(at) => format!(
                "{}***@{}",
                &self.url[..authority_start],
                &rest[at + 1..]
            ),
            None => self.url.clone(),
        }
    }

    /// Explicit database name, if one was configured
    pub fn database(&self) -> Option<&str> {
        self.database.as_deref()
    }
}

/// Load MongoConfig from environment variables
///
/// - `MONGODB_URI`, `MONGODB_URL` or `MONGO_URL` (required) - connection string
/// - `MONGODB_DATABASE` (optional) - database name, otherwise taken from the URI
/// - `MONGODB_APP_NAME` (optional) - application name for server logs
/// - `MONGODB_CONNECT_TIMEOUT_SECS` (optional, default: 10)
/// - `MONGODB_SERVER_SELECTION_TIMEOUT_SECS` (optional, default: 30)
#[cfg(feature = "config")]
impl FromEnv for MongoConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let url = env_first(&["MONGODB_URI", "MONGODB_URL", "MONGO_URL"]).ok_or_else(|| {
            ConfigError::MissingEnvVar("MONGODB_URI (or MONGODB_URL / MONGO_URL)".to_string())
        })?;

        Ok(Self {
            url,
            database: std::env::var("MONGODB_DATABASE")
                .ok()
                .filter(|db| !db.is_empty()),
            app_name: std::env::var("MONGODB_APP_NAME").ok(),
            connect_timeout_secs: env_parse_or("MONGODB_CONNECT_TIMEOUT_SECS", 10)?,
            server_selection_timeout_secs: env_parse_or(
                "MONGODB_SERVER_SELECTION_TIMEOUT_SECS",
                30,
            )?,
        })
    }
}
