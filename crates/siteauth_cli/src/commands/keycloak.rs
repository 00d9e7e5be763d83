//! `setup-keycloak`: create or update the Keycloak provider configuration
//! from environment variables and link it to the current site.

use miette::Result;
use siteauth_core::config::SiteAuthConfig;
use siteauth_core::keycloak::KeycloakEnv;
use siteauth_core::{CoreError, SetupReport, setup_keycloak};

use crate::helpers::{current_site, get_db};
use crate::output::Output;

/// Run the setup. Missing credentials are reported and leave the database
/// untouched; the command still exits successfully in that case.
pub async fn setup(
    config: &SiteAuthConfig,
    env: &KeycloakEnv,
    no_input: bool,
    output: &Output,
) -> Result<()> {
    // Checked before opening the database so a misconfigured run never
    // creates or migrates anything.
    if let Err(e) = env.credentials() {
        return handle_setup_error(e, output);
    }

    let db = get_db(config).await?;
    let site = current_site(&db, config).await?;

    let result = setup_keycloak(&db, &config.provider, env, &site).await;
    db.close().await;

    match result {
        Ok(report) => {
            let mut lines = render(&report, no_input).into_iter();
            if let Some(first) = lines.next() {
                if no_input {
                    output.print(&first);
                } else {
                    output.success(&first);
                }
            }
            for line in lines {
                output.print(&line);
            }
            Ok(())
        }
        Err(e) => handle_setup_error(e, output),
    }
}

/// Lines to show for a finished run: the compact status alone in quiet
/// mode, otherwise the headline followed by the configuration summary.
fn render(report: &SetupReport, no_input: bool) -> Vec<String> {
    if no_input {
        return vec![report.compact_line()];
    }

    let mut lines = vec![report.headline(), String::new(), report.summary_title()];
    lines.extend(report.summary_lines());
    lines
}

fn handle_setup_error(error: CoreError, output: &Output) -> Result<()> {
    if error.is_configuration_missing() {
        tracing::debug!("Keycloak setup skipped: {}", error);
        output.error(&error.to_string());
        return Ok(());
    }
    Err(error.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use siteauth_core::db::{DbError, SiteAuthDb, queries};

    fn credentials_env() -> KeycloakEnv {
        KeycloakEnv {
            client_id: Some("abc".to_string()),
            client_secret: Some("xyz".to_string()),
            ..Default::default()
        }
    }

    fn temp_config(dir: &tempfile::TempDir) -> SiteAuthConfig {
        let mut config = SiteAuthConfig::default();
        config.database.path = dir.path().join("data");
        config
    }

    async fn report() -> SetupReport {
        let db = SiteAuthDb::open_in_memory().await.unwrap();
        let site = queries::get_current_site(db.pool(), 1).await.unwrap();
        setup_keycloak(&db, &Default::default(), &credentials_env(), &site)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_quiet_mode_renders_one_line() {
        let report = report().await;

        let lines = render(&report, true);
        assert_eq!(lines, vec![report.compact_line()]);
        assert!(lines[0].contains("created"));
        assert!(lines[0].contains("Keycloak"));
    }

    #[tokio::test]
    async fn test_verbose_mode_includes_summary() {
        let report = report().await;

        let lines = render(&report, false);
        assert_eq!(lines[0], report.headline());
        assert_eq!(lines[2], "Keycloak Configuration Summary:");
        assert!(lines.contains(&"- Client ID: abc".to_string()));
        assert!(lines.contains(&"- Site: example.com".to_string()));
        assert_eq!(lines.len(), 3 + report.summary_lines().len());
    }

    #[tokio::test]
    async fn test_missing_credentials_create_no_database() {
        let dir = tempfile::tempdir().unwrap();
        let config = temp_config(&dir);
        let env = KeycloakEnv {
            client_id: Some("abc".to_string()),
            ..Default::default()
        };

        setup(&config, &env, false, &Output::new()).await.unwrap();
        assert!(!config.database.db_file().exists());
    }

    #[tokio::test]
    async fn test_setup_writes_the_record() {
        let dir = tempfile::tempdir().unwrap();
        let config = temp_config(&dir);

        setup(&config, &credentials_env(), true, &Output::new())
            .await
            .unwrap();

        let db = SiteAuthDb::open(config.database.db_file()).await.unwrap();
        let apps = queries::list_social_apps(db.pool()).await.unwrap();
        assert_eq!(apps.len(), 1);
        assert_eq!(apps[0].client_id, "abc");
    }

    #[test]
    fn test_persistence_failure_is_fatal() {
        let err = CoreError::Persistence(DbError::SiteNotFound { site_id: 3 });
        assert!(handle_setup_error(err, &Output::new()).is_err());
    }
}
