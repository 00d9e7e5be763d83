use chrono::Utc;
use miette::Result;
use owo_colors::OwoColorize;
use siteauth_core::config::SiteAuthConfig;
use siteauth_core::db::queries;

use crate::helpers::get_db;
use crate::output::{Output, format_relative_time};

/// List stored provider configurations. Secrets are redacted.
pub async fn list(config: &SiteAuthConfig, output: &Output) -> Result<()> {
    let db = get_db(config).await?;
    let apps = queries::list_social_apps(db.pool()).await?;

    if apps.is_empty() {
        db.close().await;
        output.status("No provider configurations stored.");
        output.status(&format!(
            "Run {} to create one.",
            "siteauth setup-keycloak".bright_green()
        ));
        return Ok(());
    }

    output.section(&format!("Provider configurations ({})", apps.len()));
    let now = Utc::now();
    for app in &apps {
        let sites = queries::list_social_app_sites(db.pool(), app.id).await?;
        let domains: Vec<&str> = sites.iter().map(|s| s.domain.as_str()).collect();

        output.print("");
        output.print(&format!("{} ({})", app.name.bold(), app.provider.bright_cyan()));
        output.info("Client ID:", &app.client_id);
        output.info("Secret:", &app.redacted_secret());
        if domains.is_empty() {
            output.info("Sites:", &"none".dimmed().to_string());
        } else {
            output.info("Sites:", &domains.join(", "));
        }
        output.info("Updated:", &format_relative_time(app.updated_at, now));
    }

    db.close().await;
    Ok(())
}
