//! Database models.

mod site;
mod social_app;

pub use site::Site;
pub use social_app::{SocialApp, SocialAppUpsert, UpsertOutcome};
