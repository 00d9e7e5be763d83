//! Shared helper functions for CLI commands

use miette::Result;
use siteauth_core::config::SiteAuthConfig;
use siteauth_core::db::{Site, SiteAuthDb, queries};

/// Open the database named by the config, creating and migrating it on
/// first use.
pub async fn get_db(config: &SiteAuthConfig) -> Result<SiteAuthDb> {
    let path = config.database.db_file();
    tracing::debug!("Opening database at {}", path.display());
    Ok(SiteAuthDb::open(&path).await?)
}

/// The site row this deployment is configured as.
pub async fn current_site(db: &SiteAuthDb, config: &SiteAuthConfig) -> Result<Site> {
    Ok(queries::get_current_site(db.pool(), config.site.id).await?)
}
