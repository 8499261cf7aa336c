//! Application configuration loaded from environment variables.

use std::env;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Frontend URL allowed for CORS
    pub frontend_url: String,
    /// GCP project ID locating the Firestore database
    pub gcp_project_id: String,
    /// Server port
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// `GCP_PROJECT_ID` is required. For local development against the
    /// emulator, set `FIRESTORE_EMULATOR_HOST` alongside it.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Self::from_vars(|name| env::var(name).ok())
    }

    /// Build configuration from a variable lookup function.
    fn from_vars(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            frontend_url: get("FRONTEND_URL")
                .unwrap_or_else(|| "http://localhost:5173".to_string()),
            gcp_project_id: get("GCP_PROJECT_ID")
                .ok_or(ConfigError::Missing("GCP_PROJECT_ID"))?,
            port: get("PORT")
                .unwrap_or_else(|| "4000".to_string())
                .parse()
                .unwrap_or(4000),
        })
    }

    /// Default config for testing only.
    pub fn test_default() -> Self {
        Self {
            frontend_url: "http://localhost:5173".to_string(),
            gcp_project_id: "test-project".to_string(),
            port: 4000,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn var(name: &'static str, value: &'static str) -> impl Fn(&str) -> Option<String> {
        move |key| (key == name).then(|| value.to_string())
    }

    #[test]
    fn test_defaults_applied_for_optional_vars() {
        let config = Config::from_vars(var("GCP_PROJECT_ID", "my-project")).unwrap();

        assert_eq!(config.gcp_project_id, "my-project");
        assert_eq!(config.port, 4000);
        assert_eq!(config.frontend_url, "http://localhost:5173");
    }

    #[test]
    fn test_missing_project_id_is_an_error() {
        let err = Config::from_vars(|_| None).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("GCP_PROJECT_ID")));
    }

    #[test]
    fn test_unparseable_port_falls_back_to_default() {
        let config = Config::from_vars(|key| match key {
            "GCP_PROJECT_ID" => Some("my-project".to_string()),
            "PORT" => Some("not-a-port".to_string()),
            _ => None,
        })
        .unwrap();

        assert_eq!(config.port, 4000);
    }
}
