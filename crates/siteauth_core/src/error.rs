use miette::Diagnostic;
use siteauth_db::DbError;
use thiserror::Error;

/// Configuration file errors
#[derive(Error, Debug, Clone)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("TOML parse error: {0}")]
    TomlParse(String),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(String),
}

#[derive(Error, Diagnostic, Debug)]
pub enum CoreError {
    #[error("{} must be set in environment variables", .missing.join(" and "))]
    #[diagnostic(
        code(siteauth_core::configuration_missing),
        help("Export the variables or add them to a .env file next to the binary")
    )]
    ConfigurationMissing { missing: Vec<&'static str> },

    #[error("Configuration error in {config_path}: expected {expected}")]
    #[diagnostic(
        code(siteauth_core::configuration_error),
        help("Check the configuration file format")
    )]
    ConfigurationError {
        config_path: String,
        expected: String,
        #[source]
        cause: ConfigError,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Persistence(#[from] DbError),
}

impl CoreError {
    /// Whether this is the recoverable missing-credentials case.
    pub fn is_configuration_missing(&self) -> bool {
        matches!(self, Self::ConfigurationMissing { .. })
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_missing_message() {
        let err = CoreError::ConfigurationMissing {
            missing: vec!["KEYCLOAK_CLIENT_ID", "KEYCLOAK_CLIENT_SECRET"],
        };
        assert_eq!(
            err.to_string(),
            "KEYCLOAK_CLIENT_ID and KEYCLOAK_CLIENT_SECRET must be set in environment variables"
        );
        assert!(err.is_configuration_missing());

        let err = CoreError::ConfigurationMissing {
            missing: vec!["KEYCLOAK_CLIENT_SECRET"],
        };
        assert_eq!(
            err.to_string(),
            "KEYCLOAK_CLIENT_SECRET must be set in environment variables"
        );
    }

    #[test]
    fn test_persistence_is_not_missing_configuration() {
        let err = CoreError::from(DbError::SiteNotFound { site_id: 3 });
        assert!(!err.is_configuration_missing());
        assert_eq!(err.to_string(), "Site not found: 3");
    }
}
