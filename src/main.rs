use std::fmt::Display;
use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use envresolver::config::{config_schema, load_config, Target};
use envresolver::models::registration::wire_schema;
use envresolver::models::Origin;
use envresolver::resolver::EnvironmentResolver;
use envresolver::startup;
use envresolver::utils::logger::init_logging;

/// `envresolver` command arguments.
#[derive(Debug, Parser)]
#[command(
    name = "envresolver",
    about = "Serve the environment record of one deployment target",
    version
)]
struct Cli {
    /// Configuration file, layered over the built-in targets.
    #[arg(
        short = 'f',
        long = "config",
        value_name = "path",
        default_value = "./config.yaml",
        global = true
    )]
    config: PathBuf,
    /// Deployment target: production, qa or test. Overrides the configured one.
    #[arg(
        short = 't',
        long = "target",
        value_name = "name",
        value_parser = parse_target,
        global = true
    )]
    target: Option<Target>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, PartialEq, Eq, Subcommand)]
enum Command {
    /// Serve the environment over HTTP (default).
    Serve,
    /// Print the environment as seen from ORIGIN.
    Resolve {
        /// e.g. https://qa.example.com
        origin: String,
    },
    /// Print the JSON schema of the configuration file.
    Schema,
    /// Print the JSON schemas of the registration API types.
    WireSchema,
}

fn parse_target(value: &str) -> Result<Target, String> {
    value.parse::<Target>().map_err(|e| e.to_string())
}

/// Prints the error and stops before anything has started.
fn fail(e: impl Display) -> ! {
    eprintln!("Error: {}", e);
    process::exit(1);
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Command::Serve);

    match command {
        Command::Schema => {
            println!("{}", config_schema().unwrap_or_else(|e| fail(e)));
            return;
        }
        Command::WireSchema => {
            println!("{}", wire_schema().unwrap_or_else(|e| fail(e)));
            return;
        }
        Command::Serve | Command::Resolve { .. } => {}
    }

    let mut config = load_config(&cli.config).unwrap_or_else(|e| fail(e));
    if cli.target.is_some() {
        config.target = cli.target;
    }

    match command {
        Command::Resolve { origin } => {
            let resolver = EnvironmentResolver::from_config(&config).unwrap_or_else(|e| fail(e));
            let origin = Origin::parse(&origin).unwrap_or_else(|e| fail(e));
            let environment = resolver.resolve(&origin);
            match serde_json::to_string_pretty(&environment) {
                Ok(json) => println!("{}", json),
                Err(e) => fail(e),
            }
        }
        _ => {
            init_logging(&config.logging, config.target).unwrap_or_else(|e| fail(e));
            let resolver = EnvironmentResolver::from_config(&config).unwrap_or_else(|e| fail(e));

            if let Err(e) = startup::run(Arc::new(config), Arc::new(resolver)).await {
                tracing::error!("Server stopped: {}", e);
                process::exit(1);
            }
        }
    }
}
