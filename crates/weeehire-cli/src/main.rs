//! WEEEHire - recruiting pipeline directory tools
//!
//! Lists recruiters and issues invite links against the LDAP directory.

mod commands;

use clap::{Parser, Subcommand};
use commands::CommandContext;
use std::sync::Arc;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use weeehire_core::config::{LoggingConfig, WeeehireConfig};
use weeehire_ldap::{CacheStore, MemoryCache};

#[derive(Parser)]
#[command(name = "weeehire")]
#[command(author = "WEEEHire Team")]
#[command(version = weeehire_core::VERSION)]
#[command(about = "Recruiting pipeline directory tools", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true, env = "WEEEHIRE_CONFIG")]
    config: Option<String>,

    /// LDAP server URL
    #[arg(long, global = true, env = "WEEEHIRE_LDAP_URL")]
    ldap_url: Option<String>,

    /// Bind DN
    #[arg(long, global = true, env = "WEEEHIRE_LDAP_BIND_DN")]
    bind_dn: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, env = "WEEEHIRE_LOG_LEVEL")]
    log_level: Option<String>,

    /// Output JSON instead of text
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List recruiters, sorted by name
    Recruiters,

    /// Create an invite for an accepted candidate and print its link
    Invite {
        /// Given name
        #[arg(long)]
        name: String,

        /// Family name
        #[arg(long)]
        surname: String,

        /// Matriculation id, e.g. s123456
        #[arg(long)]
        matricola: String,

        /// Degree course
        #[arg(long)]
        degree_course: String,
    },

    /// Show version information
    Version,
}

fn main() -> anyhow::Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Load or create config
    let mut config = if let Some(config_path) = &cli.config {
        WeeehireConfig::from_file(config_path)?
    } else {
        WeeehireConfig::from_env()
    };

    // Override with CLI args
    if let Some(url) = cli.ldap_url {
        config.ldap.server_url = url;
    }
    if let Some(bind_dn) = cli.bind_dn {
        config.ldap.bind_dn = bind_dn;
    }
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }

    init_logging(&config.logging);

    let cache: Arc<dyn CacheStore> = if config.cache.enabled {
        Arc::new(MemoryCache::new())
    } else {
        Arc::new(MemoryCache::disabled())
    };

    let ctx = CommandContext {
        config,
        cache,
        json: cli.json,
    };

    match cli.command {
        Commands::Recruiters => commands::recruiters::execute(&ctx),
        Commands::Invite {
            name,
            surname,
            matricola,
            degree_course,
        } => commands::invite::execute(&ctx, name, surname, matricola, degree_course),
        Commands::Version => {
            println!("weeehire {}", weeehire_core::VERSION);
            Ok(())
        }
    }
}

fn init_logging(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    // Logs go to stderr, command output to stdout
    if logging.format == "json" {
        tracing_subscriber::registry()
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .with(filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .with(filter)
            .init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_invite() {
        let cli = Cli::parse_from([
            "weeehire",
            "--json",
            "invite",
            "--name",
            "Ada",
            "--surname",
            "Lovelace",
            "--matricola",
            "s123456",
            "--degree-course",
            "Ingegneria Informatica",
        ]);

        assert!(cli.json);
        match cli.command {
            Commands::Invite {
                name, matricola, ..
            } => {
                assert_eq!(name, "Ada");
                assert_eq!(matricola, "s123456");
            }
            _ => panic!("expected invite"),
        }
    }
}
