//! Site model.

use sqlx::FromRow;

/// The public identity of a deployment.
///
/// Sites are owned by whoever administers the deployment. The provider
/// upsert only ever links to an existing site, it never creates one.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Site {
    pub id: i64,

    /// Domain the deployment is served from (unique)
    pub domain: String,

    /// Display name
    pub name: String,
}
