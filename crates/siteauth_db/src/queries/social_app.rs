//! Identity-provider configuration queries.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::models::{Site, SocialApp, SocialAppUpsert, UpsertOutcome};

/// Get a provider configuration by its `(provider, name)` key.
pub async fn get_social_app(
    pool: &SqlitePool,
    provider: &str,
    name: &str,
) -> DbResult<Option<SocialApp>> {
    let app = sqlx::query_as::<_, SocialApp>(
        r#"
        SELECT id, provider, name, client_id, secret, created_at, updated_at
        FROM social_apps
        WHERE provider = ? AND name = ?
        "#,
    )
    .bind(provider)
    .bind(name)
    .fetch_optional(pool)
    .await?;
    Ok(app)
}

/// List all provider configurations, ordered by provider then name.
pub async fn list_social_apps(pool: &SqlitePool) -> DbResult<Vec<SocialApp>> {
    let apps = sqlx::query_as::<_, SocialApp>(
        r#"
        SELECT id, provider, name, client_id, secret, created_at, updated_at
        FROM social_apps
        ORDER BY provider, name
        "#,
    )
    .fetch_all(pool)
    .await?;
    Ok(apps)
}

/// List the sites a provider configuration is enabled for.
pub async fn list_social_app_sites(pool: &SqlitePool, social_app_id: i64) -> DbResult<Vec<Site>> {
    let sites = sqlx::query_as::<_, Site>(
        r#"
        SELECT s.id, s.domain, s.name
        FROM sites s
        INNER JOIN social_app_sites sas ON sas.site_id = s.id
        WHERE sas.social_app_id = ?
        ORDER BY s.id
        "#,
    )
    .bind(social_app_id)
    .fetch_all(pool)
    .await?;
    Ok(sites)
}

/// Count provider configurations stored for a provider key.
pub async fn count_social_apps(pool: &SqlitePool, provider: &str) -> DbResult<i64> {
    let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM social_apps WHERE provider = ?")
        .bind(provider)
        .fetch_one(pool)
        .await?;
    Ok(count.0)
}

/// Create or update a provider configuration and link it to a site.
///
/// Lookup, write and site link run in one transaction. The insert is an
/// `ON CONFLICT (provider, name)` upsert, and the transaction holds the
/// write lock from the start, so concurrent runs on the same key wait for
/// each other and still end with a single row. Linking a site that is
/// already linked is a no-op.
pub async fn ensure_social_app(
    pool: &SqlitePool,
    values: &SocialAppUpsert<'_>,
    site: &Site,
) -> DbResult<UpsertOutcome> {
    if values.provider.trim().is_empty() {
        return Err(DbError::invalid_data("provider key must not be empty"));
    }
    if values.name.trim().is_empty() {
        return Err(DbError::invalid_data("provider display name must not be empty"));
    }

    // Write lock before the lookup; concurrent runs queue on busy_timeout.
    let mut tx = pool.begin_with("BEGIN IMMEDIATE").await?;

    let existing: Option<(i64,)> =
        sqlx::query_as("SELECT id FROM social_apps WHERE provider = ? AND name = ?")
            .bind(values.provider)
            .bind(values.name)
            .fetch_optional(&mut *tx)
            .await?;

    let now = Utc::now();
    let app = sqlx::query_as::<_, SocialApp>(
        r#"
        INSERT INTO social_apps (provider, name, client_id, secret, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?)
        ON CONFLICT (provider, name) DO UPDATE SET
            name = excluded.name,
            client_id = excluded.client_id,
            secret = excluded.secret,
            updated_at = excluded.updated_at
        RETURNING id, provider, name, client_id, secret, created_at, updated_at
        "#,
    )
    .bind(values.provider)
    .bind(values.name)
    .bind(values.client_id)
    .bind(values.secret)
    .bind(now)
    .bind(now)
    .fetch_one(&mut *tx)
    .await?;

    sqlx::query(
        r#"
        INSERT INTO social_app_sites (social_app_id, site_id) VALUES (?, ?)
        ON CONFLICT (social_app_id, site_id) DO NOTHING
        "#,
    )
    .bind(app.id)
    .bind(site.id)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    let created = existing.is_none();
    debug!(
        provider = %app.provider,
        name = %app.name,
        site = %site.domain,
        created,
        "Provider configuration stored"
    );

    Ok(UpsertOutcome { app, created })
}
