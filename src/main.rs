mod cli;
mod client;
mod commands;
mod config;
mod error;
mod mutations;
mod output;
mod pagination;
mod project;
mod responses;
mod score;
#[cfg(test)]
mod test_utils;
mod types;
mod usage;

use std::error::Error;
use std::io;

use clap::{CommandFactory, Parser};
use clap_complete::generate;

use cli::{Cli, Commands};
use client::GitHubClient;
use config::Config;
use error::Result;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    let verbose = cli.verbose;

    init_tracing(verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");

        if verbose {
            let mut source = e.source();
            while let Some(cause) = source {
                eprintln!("Caused by: {cause}");
                source = cause.source();
            }
        }

        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(io::stderr))
        .with(filter)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    output::set_json_output(cli.json);
    output::set_quiet(cli.quiet);

    match cli.command {
        // Commands that don't require config/client
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "project-sync", &mut io::stdout());
        }
        Commands::Init => {
            commands::init::run().await?;
        }
        // Commands that require config and client
        command => {
            let config = Config::load()?;
            let client = GitHubClient::new(config.token()?, config.api_url())?;

            match command {
                Commands::RateLimit => {
                    commands::rate_limit::show(&client).await?;
                }
                Commands::Fields => {
                    let target = config.project(cli.org.as_deref(), cli.project)?;
                    commands::fields::list(&client, &target).await?;
                }
                Commands::AddRecent(args) => {
                    let target = config.project(cli.org.as_deref(), cli.project)?;
                    commands::add_recent::run(&client, &config, &target, args).await?;
                }
                Commands::PainScores(args) => {
                    let target = config.project(cli.org.as_deref(), cli.project)?;
                    commands::pain_scores::run(&client, &target, args).await?;
                }
                Commands::Completions { .. } | Commands::Init => {
                    // Already handled above
                }
            }
        }
    }

    Ok(())
}
