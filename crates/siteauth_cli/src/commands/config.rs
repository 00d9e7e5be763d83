use std::path::Path;

use miette::{IntoDiagnostic, Result};
use owo_colors::OwoColorize;
use siteauth_core::config::{self, SiteAuthConfig};

use crate::output::Output;

/// Show the effective configuration: the resolved locations first, then the
/// TOML that would reproduce it.
pub async fn show(config: &SiteAuthConfig, output: &Output) -> Result<()> {
    output.section("Effective Settings");
    for (label, value) in resolved_settings(config) {
        output.info(label, &value);
    }

    output.print("");
    output.section("Configuration (TOML)");
    let toml_str = toml::to_string_pretty(config).into_diagnostic()?;
    for line in toml_str.lines() {
        output.print(line);
    }

    Ok(())
}

/// Where this configuration will read and write, as label/value pairs.
fn resolved_settings(config: &SiteAuthConfig) -> Vec<(&'static str, String)> {
    let db_file = config.database.db_file();
    let db_state = if db_file.exists() {
        "exists"
    } else {
        "created on first use"
    };

    vec![
        (
            "Database file:",
            format!("{} ({db_state})", db_file.display()),
        ),
        ("Site ID:", config.site.id.to_string()),
        (
            "Provider:",
            format!("{} ({})", config.provider.name, config.provider.key),
        ),
    ]
}

/// Save the effective configuration to a file
pub async fn save(config: &SiteAuthConfig, path: &Path, output: &Output) -> Result<()> {
    config::save_config(config, path).await?;

    output.success(&format!("Configuration saved to {}", path.display()));
    output.info("Database file:", &config.database.db_file().display().to_string());
    output.status(&format!(
        "Use it with {} --config {} setup-keycloak",
        "siteauth".bright_green(),
        path.display()
    ));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_resolved_settings_name_the_database_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = SiteAuthConfig::default();
        config.database.path = dir.path().join("data");
        config.site.id = 4;

        let settings = resolved_settings(&config);
        assert_eq!(
            settings[0],
            (
                "Database file:",
                format!(
                    "{} (created on first use)",
                    dir.path().join("data").join("siteauth.db").display()
                )
            )
        );
        assert_eq!(settings[1], ("Site ID:", "4".to_string()));
        assert_eq!(
            settings[2],
            ("Provider:", "Keycloak (geonode_openid_connect)".to_string())
        );
    }

    #[tokio::test]
    async fn test_save_writes_loadable_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("siteauth.toml");
        let mut config = SiteAuthConfig::default();
        config.database.path = dir.path().join("data");

        save(&config, &path, &Output::new()).await.unwrap();

        let loaded = config::load_config(&path).await.unwrap();
        assert_eq!(loaded, config);
    }
}
