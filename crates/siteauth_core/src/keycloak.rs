//! Keycloak settings sourced from the process environment.
//!
//! Only the client credentials are persisted. The server, realm and OIDC
//! endpoint variables are read purely so the setup report can show the
//! operator what the rest of the deployment is configured with.

use crate::Result;
use crate::error::CoreError;

pub const CLIENT_ID_VAR: &str = "KEYCLOAK_CLIENT_ID";
pub const CLIENT_SECRET_VAR: &str = "KEYCLOAK_CLIENT_SECRET";
pub const SERVER_URL_VAR: &str = "KEYCLOAK_SERVER_URL";
pub const REALM_VAR: &str = "KEYCLOAK_REALM";
pub const AUTHORIZE_URL_VAR: &str = "OIDC_AUTHORIZE_URL";
pub const ACCESS_TOKEN_URL_VAR: &str = "OIDC_ACCESS_TOKEN_URL";
pub const PROFILE_URL_VAR: &str = "OIDC_PROFILE_URL";
pub const ID_TOKEN_ISSUER_VAR: &str = "OIDC_ID_TOKEN_ISSUER";

/// Shown in the summary for any display-only variable that is unset.
pub const NOT_SET: &str = "Not set";

/// Validated OAuth client credentials. Both values are non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientCredentials {
    client_id: String,
    client_secret: String,
}

impl ClientCredentials {
    /// Build credentials, rejecting empty values.
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Result<Self> {
        let client_id = client_id.into();
        let client_secret = client_secret.into();

        let mut missing = Vec::new();
        if client_id.is_empty() {
            missing.push(CLIENT_ID_VAR);
        }
        if client_secret.is_empty() {
            missing.push(CLIENT_SECRET_VAR);
        }
        if !missing.is_empty() {
            return Err(CoreError::ConfigurationMissing { missing });
        }

        Ok(Self {
            client_id,
            client_secret,
        })
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn client_secret(&self) -> &str {
        &self.client_secret
    }
}

/// Everything the Keycloak setup reads from the environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeycloakEnv {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub server_url: Option<String>,
    pub realm: Option<String>,
    pub authorize_url: Option<String>,
    pub access_token_url: Option<String>,
    pub profile_url: Option<String>,
    pub id_token_issuer: Option<String>,
}

impl KeycloakEnv {
    /// Load Keycloak settings from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `KEYCLOAK_CLIENT_ID`, `KEYCLOAK_CLIENT_SECRET` -> credentials (required by setup)
    /// - `KEYCLOAK_SERVER_URL`, `KEYCLOAK_REALM` -> display only
    /// - `OIDC_AUTHORIZE_URL`, `OIDC_ACCESS_TOKEN_URL`, `OIDC_PROFILE_URL`,
    ///   `OIDC_ID_TOKEN_ISSUER` -> display only
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load settings through an arbitrary lookup function.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            client_id: lookup(CLIENT_ID_VAR),
            client_secret: lookup(CLIENT_SECRET_VAR),
            server_url: lookup(SERVER_URL_VAR),
            realm: lookup(REALM_VAR),
            authorize_url: lookup(AUTHORIZE_URL_VAR),
            access_token_url: lookup(ACCESS_TOKEN_URL_VAR),
            profile_url: lookup(PROFILE_URL_VAR),
            id_token_issuer: lookup(ID_TOKEN_ISSUER_VAR),
        }
    }

    /// The client credentials, or the names of the variables that are
    /// unset or empty.
    pub fn credentials(&self) -> Result<ClientCredentials> {
        let mut missing = Vec::new();
        if is_blank(&self.client_id) {
            missing.push(CLIENT_ID_VAR);
        }
        if is_blank(&self.client_secret) {
            missing.push(CLIENT_SECRET_VAR);
        }
        if !missing.is_empty() {
            return Err(CoreError::ConfigurationMissing { missing });
        }

        ClientCredentials::new(
            self.client_id.clone().unwrap_or_default(),
            self.client_secret.clone().unwrap_or_default(),
        )
    }

    /// Labelled display-only settings, in report order, with `Not set`
    /// standing in for absent values.
    pub fn endpoint_summary(&self) -> [(&'static str, &str); 6] {
        [
            ("Server URL", or_not_set(&self.server_url)),
            ("Realm", or_not_set(&self.realm)),
            ("Authorization URL", or_not_set(&self.authorize_url)),
            ("Token URL", or_not_set(&self.access_token_url)),
            ("UserInfo URL", or_not_set(&self.profile_url)),
            ("Issuer", or_not_set(&self.id_token_issuer)),
        ]
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().is_none_or(str::is_empty)
}

fn or_not_set(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or(NOT_SET)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_from(pairs: &[(&str, &str)]) -> KeycloakEnv {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        KeycloakEnv::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_credentials_present() {
        let env = env_from(&[(CLIENT_ID_VAR, "abc"), (CLIENT_SECRET_VAR, "xyz")]);
        let creds = env.credentials().unwrap();
        assert_eq!(creds.client_id(), "abc");
        assert_eq!(creds.client_secret(), "xyz");
    }

    #[test]
    fn test_empty_secret_is_missing() {
        let env = env_from(&[(CLIENT_ID_VAR, "abc"), (CLIENT_SECRET_VAR, "")]);
        match env.credentials() {
            Err(CoreError::ConfigurationMissing { missing }) => {
                assert_eq!(missing, vec![CLIENT_SECRET_VAR]);
            }
            other => panic!("expected ConfigurationMissing, got {other:?}"),
        }
    }

    #[test]
    fn test_both_missing_are_reported() {
        let env = env_from(&[]);
        match env.credentials() {
            Err(CoreError::ConfigurationMissing { missing }) => {
                assert_eq!(missing, vec![CLIENT_ID_VAR, CLIENT_SECRET_VAR]);
            }
            other => panic!("expected ConfigurationMissing, got {other:?}"),
        }
    }

    #[test]
    fn test_client_credentials_reject_empty() {
        assert!(ClientCredentials::new("id", "secret").is_ok());

        let err = ClientCredentials::new("", "secret").unwrap_err();
        assert_eq!(
            err.to_string(),
            "KEYCLOAK_CLIENT_ID must be set in environment variables"
        );

        let err = ClientCredentials::new("", "").unwrap_err();
        assert_eq!(
            err.to_string(),
            "KEYCLOAK_CLIENT_ID and KEYCLOAK_CLIENT_SECRET must be set in environment variables"
        );
    }

    #[test]
    fn test_endpoint_summary_defaults_to_not_set() {
        let env = env_from(&[
            (SERVER_URL_VAR, "https://sso.example.org"),
            (REALM_VAR, "geonode"),
        ]);

        let summary = env.endpoint_summary();
        assert_eq!(summary[0], ("Server URL", "https://sso.example.org"));
        assert_eq!(summary[1], ("Realm", "geonode"));
        for (_, value) in &summary[2..] {
            assert_eq!(*value, NOT_SET);
        }
    }
}
