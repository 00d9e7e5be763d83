//! siteauth database layer
//!
//! SQLite storage for a deployment's identity-provider integrations.
//!
//! # Tables
//!
//! - **sites** - the deployment's public identity, seeded with `example.com`
//! - **social_apps** - one row per `(provider, name)` integration
//! - **social_app_sites** - which sites an integration is enabled for
//!
//! # Usage
//!
//! ```rust,ignore
//! use siteauth_db::{SiteAuthDb, queries};
//!
//! let db = SiteAuthDb::open("path/to/siteauth.db").await?;
//! let site = queries::get_current_site(db.pool(), 1).await?;
//! ```

pub mod connection;
pub mod error;
pub mod models;
pub mod queries;

pub use connection::{DB_FILE_NAME, SiteAuthDb};
pub use error::{DbError, DbResult};
pub use models::{Site, SocialApp, SocialAppUpsert, UpsertOutcome};
