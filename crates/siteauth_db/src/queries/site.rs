//! Site queries.

use sqlx::SqlitePool;

use crate::error::{DbError, DbResult};
use crate::models::Site;

/// Get a site by ID.
pub async fn get_site(pool: &SqlitePool, id: i64) -> DbResult<Option<Site>> {
    let site = sqlx::query_as::<_, Site>("SELECT id, domain, name FROM sites WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(site)
}

/// Resolve the current site from the configured site ID.
///
/// Unlike [`get_site`], a missing row is an error: every provider
/// configuration has to be attached to the deployment's site.
pub async fn get_current_site(pool: &SqlitePool, site_id: i64) -> DbResult<Site> {
    get_site(pool, site_id)
        .await?
        .ok_or(DbError::SiteNotFound { site_id })
}

/// Create or update the site with the given ID.
pub async fn set_site(pool: &SqlitePool, id: i64, domain: &str, name: &str) -> DbResult<Site> {
    if domain.trim().is_empty() {
        return Err(DbError::invalid_data("site domain must not be empty"));
    }

    let site = sqlx::query_as::<_, Site>(
        r#"
        INSERT INTO sites (id, domain, name) VALUES (?, ?, ?)
        ON CONFLICT (id) DO UPDATE SET
            domain = excluded.domain,
            name = excluded.name
        RETURNING id, domain, name
        "#,
    )
    .bind(id)
    .bind(domain)
    .bind(name)
    .fetch_one(pool)
    .await?;

    Ok(site)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SiteAuthDb;

    #[tokio::test]
    async fn test_default_site_is_seeded() {
        let db = SiteAuthDb::open_in_memory().await.unwrap();

        let site = get_current_site(db.pool(), 1).await.unwrap();
        assert_eq!(site.domain, "example.com");
        assert_eq!(site.name, "example.com");
    }

    #[tokio::test]
    async fn test_missing_current_site() {
        let db = SiteAuthDb::open_in_memory().await.unwrap();

        let err = get_current_site(db.pool(), 42).await.unwrap_err();
        assert!(matches!(err, DbError::SiteNotFound { site_id: 42 }));
    }

    #[tokio::test]
    async fn test_set_site_updates_and_creates() {
        let db = SiteAuthDb::open_in_memory().await.unwrap();

        let site = set_site(db.pool(), 1, "maps.example.org", "Maps").await.unwrap();
        assert_eq!(site.id, 1);
        assert_eq!(site.domain, "maps.example.org");
        assert_eq!(site.name, "Maps");

        let second = set_site(db.pool(), 2, "staging.example.org", "Staging")
            .await
            .unwrap();
        assert_eq!(second.id, 2);
        assert_eq!(get_site(db.pool(), 2).await.unwrap(), Some(second));
    }

    #[tokio::test]
    async fn test_set_site_rejects_empty_domain() {
        let db = SiteAuthDb::open_in_memory().await.unwrap();

        let err = set_site(db.pool(), 1, "  ", "Nameless").await.unwrap_err();
        assert!(matches!(err, DbError::InvalidData { .. }));

        // Seeded site untouched
        let site = get_current_site(db.pool(), 1).await.unwrap();
        assert_eq!(site.domain, "example.com");
    }
}
