use crate::{ConfigError, FromEnv, env_first};

/// Cross-origin policy for the browser client.
///
/// `FRONTEND_URL` (falling back to `CORS_ALLOWED_ORIGIN`) holds one or more
/// comma-separated origins. When neither is set the list is empty and callers
/// decide how permissive to be.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl CorsConfig {
    pub fn new<I, S>(origins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed_origins: origins.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_restricted(&self) -> bool {
        !self.allowed_origins.is_empty()
    }

    fn parse(raw: &str) -> Vec<String> {
        raw.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| s.trim_end_matches('/').to_string())
            .collect()
    }
}

impl FromEnv for CorsConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let allowed_origins = env_first(&["FRONTEND_URL", "CORS_ALLOWED_ORIGIN"])
            .map(|raw| Self::parse(&raw))
            .unwrap_or_default();

        Ok(Self { allowed_origins })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cors_from_frontend_url() {
        temp_env::with_vars(
            [
                ("FRONTEND_URL", Some("http://localhost:3000/")),
                ("CORS_ALLOWED_ORIGIN", None::<&str>),
            ],
            || {
                let config = CorsConfig::from_env().unwrap();
                assert_eq!(config.allowed_origins, vec!["http://localhost:3000"]);
                assert!(config.is_restricted());
            },
        );
    }

    #[test]
    fn test_cors_fallback_and_comma_separated() {
        temp_env::with_vars(
            [
                ("FRONTEND_URL", None::<&str>),
                (
                    "CORS_ALLOWED_ORIGIN",
                    Some("https://a.example.com, https://b.example.com,,"),
                ),
            ],
            || {
                let config = CorsConfig::from_env().unwrap();
                assert_eq!(
                    config.allowed_origins,
                    vec!["https://a.example.com", "https://b.example.com"]
                );
            },
        );
    }

    #[test]
    fn test_cors_unset_is_unrestricted() {
        temp_env::with_vars(
            [
                ("FRONTEND_URL", None::<&str>),
                ("CORS_ALLOWED_ORIGIN", None::<&str>),
            ],
            || {
                let config = CorsConfig::from_env().unwrap();
                assert!(!config.is_restricted());
            },
        );
    }
}
