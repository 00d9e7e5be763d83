//! Create-or-update of a provider configuration for the current site.
//!
//! The current site is always passed in by the caller. Nothing in here looks
//! up ambient deployment state, so the operation depends only on its inputs
//! and the database handle.

use std::fmt;

use siteauth_db::{Site, SiteAuthDb, SocialApp, SocialAppUpsert, queries};
use tracing::info;

use crate::Result;
use crate::config::ProviderConfig;
use crate::keycloak::{ClientCredentials, KeycloakEnv};

/// What the upsert did to the stored record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupAction {
    Created,
    Updated,
}

impl SetupAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            SetupAction::Created => "created",
            SetupAction::Updated => "updated",
        }
    }

    /// Capitalised form used at the start of a sentence.
    pub fn title(&self) -> &'static str {
        match self {
            SetupAction::Created => "Created",
            SetupAction::Updated => "Updated",
        }
    }
}

impl fmt::Display for SetupAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ensures exactly one provider configuration exists for a `(provider, name)`
/// key, holding the latest credentials and linked to the given site.
#[derive(Debug, Clone, Copy)]
pub struct ConfigurationUpserter<'a> {
    db: &'a SiteAuthDb,
}

impl<'a> ConfigurationUpserter<'a> {
    pub fn new(db: &'a SiteAuthDb) -> Self {
        Self { db }
    }

    /// Create the record if absent, otherwise overwrite its name and
    /// credentials, then add `current_site` to its sites.
    ///
    /// The whole sequence is one transaction; on error nothing is written.
    pub async fn ensure_provider_configuration(
        &self,
        provider_key: &str,
        display_name: &str,
        credentials: &ClientCredentials,
        current_site: &Site,
    ) -> Result<(SetupAction, SocialApp)> {
        let values = SocialAppUpsert {
            provider: provider_key,
            name: display_name,
            client_id: credentials.client_id(),
            secret: credentials.client_secret(),
        };

        let outcome = queries::ensure_social_app(self.db.pool(), &values, current_site).await?;
        let action = if outcome.created {
            SetupAction::Created
        } else {
            SetupAction::Updated
        };

        info!(
            provider = provider_key,
            name = display_name,
            site = %current_site.domain,
            "{} provider configuration",
            action.title()
        );

        Ok((action, outcome.app))
    }
}

/// Run the Keycloak setup: validate credentials from `env`, upsert the
/// configured provider record and link it to `current_site`.
///
/// Returns [`CoreError::ConfigurationMissing`](crate::CoreError::ConfigurationMissing)
/// without touching the database when either credential is unset or empty.
pub async fn setup_keycloak(
    db: &SiteAuthDb,
    provider: &ProviderConfig,
    env: &KeycloakEnv,
    current_site: &Site,
) -> Result<SetupReport> {
    let credentials = env.credentials()?;

    let (action, app) = ConfigurationUpserter::new(db)
        .ensure_provider_configuration(&provider.key, &provider.name, &credentials, current_site)
        .await?;

    Ok(SetupReport {
        action,
        app,
        site: current_site.clone(),
        env: env.clone(),
    })
}

/// Operator-facing result of a setup run.
#[derive(Debug, Clone)]
pub struct SetupReport {
    pub action: SetupAction,
    pub app: SocialApp,
    pub site: Site,
    env: KeycloakEnv,
}

impl SetupReport {
    /// One-line status for unattended runs.
    pub fn compact_line(&self) -> String {
        format!(
            "✅ {} social app {} ({})",
            self.app.name, self.action, self.app.provider
        )
    }

    /// Verbose headline.
    pub fn headline(&self) -> String {
        format!(
            "{} {} Social Application with client_id: {}",
            self.action.title(),
            self.app.name,
            self.app.client_id
        )
    }

    pub fn summary_title(&self) -> String {
        format!("{} Configuration Summary:", self.app.name)
    }

    /// Configuration dump shown after the headline. Display only; none of
    /// the endpoint values are stored.
    pub fn summary_lines(&self) -> Vec<String> {
        let endpoints = self.env.endpoint_summary();
        let mut lines = Vec::with_capacity(endpoints.len() + 2);

        let (server, realm) = (endpoints[0], endpoints[1]);
        lines.push(format!("- {}: {}", server.0, server.1));
        lines.push(format!("- {}: {}", realm.0, realm.1));
        lines.push(format!("- Client ID: {}", self.app.client_id));
        for (label, value) in &endpoints[2..] {
            lines.push(format!("- {label}: {value}"));
        }
        lines.push(format!("- Site: {}", self.site.domain));

        lines
    }
}
