pub mod config;
pub mod keycloak;
pub mod provider;
pub mod site;
