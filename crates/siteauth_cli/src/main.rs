mod commands;
mod helpers;
mod logging;
mod output;

use clap::{Parser, Subcommand};
use miette::Result;
use siteauth_core::config::{self, SiteAuthConfig};
use siteauth_core::keycloak::KeycloakEnv;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "siteauth")]
#[command(about = "Identity-provider setup for a deployment")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(long, short = 'c', global = true)]
    config: Option<PathBuf>,

    /// Database directory (overrides config)
    #[arg(long, global = true)]
    db_path: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Create or update the Keycloak social app from environment variables
    SetupKeycloak {
        /// Print a single status line instead of the configuration summary
        #[arg(long)]
        no_input: bool,
    },
    /// Site management
    Site {
        #[command(subcommand)]
        cmd: SiteCommands,
    },
    /// Stored provider configurations
    Provider {
        #[command(subcommand)]
        cmd: ProviderCommands,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        cmd: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum SiteCommands {
    /// Show the current site
    Show,
    /// Create or update the current site
    Set {
        /// Public domain of this deployment
        #[arg(long)]
        domain: String,
        /// Display name (defaults to the domain)
        #[arg(long)]
        name: Option<String>,
    },
}

#[derive(Subcommand)]
enum ProviderCommands {
    /// List stored provider configurations
    List,
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Save current configuration to file
    Save {
        /// Path to save configuration
        #[arg(default_value = "siteauth.toml")]
        path: PathBuf,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .rgb_colors(miette::RgbColors::Preferred)
                .with_cause_chain()
                .color(true)
                .context_lines(5)
                .tab_width(2)
                .break_words(true)
                .build(),
        )
    }))?;
    miette::set_panic_hook();
    let cli = Cli::parse();

    let _log_guard = logging::init(cli.debug);

    let config = load_effective_config(&cli).await?;
    let output = output::Output::new();

    match &cli.command {
        Commands::SetupKeycloak { no_input } => {
            let env = KeycloakEnv::from_env();
            commands::keycloak::setup(&config, &env, *no_input, &output).await?
        }
        Commands::Site { cmd } => match cmd {
            SiteCommands::Show => commands::site::show(&config, &output).await?,
            SiteCommands::Set { domain, name } => {
                commands::site::set(&config, domain, name.as_deref(), &output).await?
            }
        },
        Commands::Provider { cmd } => match cmd {
            ProviderCommands::List => commands::provider::list(&config, &output).await?,
        },
        Commands::Config { cmd } => match cmd {
            ConfigCommands::Show => commands::config::show(&config, &output).await?,
            ConfigCommands::Save { path } => {
                commands::config::save(&config, path, &output).await?
            }
        },
    }

    Ok(())
}

/// Config file (explicit or from standard locations) with command-line
/// overrides applied.
async fn load_effective_config(cli: &Cli) -> Result<SiteAuthConfig> {
    let mut config = if let Some(config_path) = &cli.config {
        info!("Loading config from: {:?}", config_path);
        config::load_config(config_path).await?
    } else {
        info!("Loading config from standard locations");
        config::load_config_from_standard_locations().await?
    };

    if let Some(db_path) = &cli.db_path {
        info!("Database path overridden: {:?}", db_path);
        config.database.path = db_path.clone();
    }

    Ok(config)
}
