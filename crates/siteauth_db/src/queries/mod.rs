//! Database query functions.
//!
//! Organized by domain:
//! - `site`: Site lookup and administration
//! - `social_app`: Identity-provider configurations and their site links

mod site;
mod social_app;

pub use site::*;
pub use social_app::*;
