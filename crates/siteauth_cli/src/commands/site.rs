use miette::Result;
use owo_colors::OwoColorize;
use siteauth_core::config::SiteAuthConfig;
use siteauth_core::db::queries;

use crate::helpers::{current_site, get_db};
use crate::output::Output;

/// Show the site this deployment is configured as
pub async fn show(config: &SiteAuthConfig, output: &Output) -> Result<()> {
    let db = get_db(config).await?;
    let site = current_site(&db, config).await?;
    db.close().await;

    output.section("Current Site");
    output.info("ID:", &site.id.to_string());
    output.info("Domain:", &site.domain.bright_cyan().to_string());
    output.info("Name:", &site.name);

    Ok(())
}

/// Create or update the configured site
pub async fn set(
    config: &SiteAuthConfig,
    domain: &str,
    name: Option<&str>,
    output: &Output,
) -> Result<()> {
    let db = get_db(config).await?;
    let site = queries::set_site(db.pool(), config.site.id, domain, name.unwrap_or(domain)).await?;
    db.close().await;

    output.success(&format!(
        "Site {} is now {} ({})",
        site.id,
        site.domain.bright_cyan(),
        site.name
    ));

    Ok(())
}
