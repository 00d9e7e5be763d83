//! Identity-provider configuration models.

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// A stored identity-provider integration.
///
/// One row per `(provider, name)` pair. The credentials are whatever was
/// supplied last.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct SocialApp {
    pub id: i64,

    /// Integration type key, e.g. `geonode_openid_connect`
    pub provider: String,

    /// Display label
    pub name: String,

    /// Public client identifier issued by the provider
    pub client_id: String,

    /// Confidential client secret issued by the provider
    pub secret: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SocialApp {
    /// Secret with everything but the last four characters masked.
    pub fn redacted_secret(&self) -> String {
        let chars: Vec<char> = self.secret.chars().collect();
        if chars.len() <= 4 {
            return "*".repeat(chars.len());
        }
        let visible: String = chars[chars.len() - 4..].iter().collect();
        format!("{}{}", "*".repeat(chars.len() - 4), visible)
    }
}

/// Values to write for one provider configuration.
#[derive(Debug, Clone, Copy)]
pub struct SocialAppUpsert<'a> {
    pub provider: &'a str,
    pub name: &'a str,
    pub client_id: &'a str,
    pub secret: &'a str,
}

/// Result of an upsert: the stored row and whether it was newly inserted.
#[derive(Debug, Clone)]
pub struct UpsertOutcome {
    pub app: SocialApp,
    pub created: bool,
}
