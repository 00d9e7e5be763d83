//! Error types for the storage layer.

use miette::Diagnostic;
use thiserror::Error;

/// Result type alias for database operations.
pub type DbResult<T> = Result<T, DbError>;

/// Database error types.
#[derive(Debug, Error, Diagnostic)]
pub enum DbError {
    /// SQLite/sqlx error
    #[error("Database error: {0}")]
    #[diagnostic(code(siteauth_db::database))]
    Sqlx(#[from] sqlx::Error),

    /// Migration error
    #[error("Migration error: {0}")]
    #[diagnostic(code(siteauth_db::migration))]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// IO error (creating the database directory)
    #[error("IO error: {0}")]
    #[diagnostic(code(siteauth_db::io))]
    Io(#[from] std::io::Error),

    /// The configured current site does not exist.
    #[error("Site not found: {site_id}")]
    #[diagnostic(
        code(siteauth_db::site_not_found),
        help("Create it with `siteauth site set --domain <domain>`")
    )]
    SiteNotFound { site_id: i64 },

    /// Invalid data
    #[error("Invalid data: {message}")]
    #[diagnostic(code(siteauth_db::invalid_data))]
    InvalidData { message: String },
}

impl DbError {
    /// Create an invalid data error.
    pub fn invalid_data(message: impl Into<String>) -> Self {
        Self::InvalidData {
            message: message.into(),
        }
    }
}
