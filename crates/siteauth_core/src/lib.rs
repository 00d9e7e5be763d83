//! siteauth core
//!
//! Sets up identity-provider integrations for a deployment: reads the
//! client credentials from the environment, upserts the provider
//! configuration and links it to the deployment's site.

pub mod config;
pub mod error;
pub mod keycloak;
pub mod setup;

pub use error::{CoreError, Result};
pub use setup::{ConfigurationUpserter, SetupAction, SetupReport, setup_keycloak};
pub use siteauth_db as db;
