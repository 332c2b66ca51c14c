// Copyright 2026 Harvester Contributors
// SPDX-License-Identifier: Apache-2.0

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use moodle_harvester::cli;
use moodle_harvester::config::DEFAULT_CONFIG_PATH;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "harvester",
    about = "Scrapes course checklists from a Moodle portal and relays them to an IFTTT webhook",
    version,
    after_help = "Run 'harvester <command> --help' for details on each command.\nRun 'harvester' with no command to perform a full harvest."
)]
struct Cli {
    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Enable verbose/debug logging
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in, scrape every course checklist, and relay the items
    Run {
        /// Path to the YAML config file
        #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
        config: PathBuf,
        /// Log items instead of sending them (overrides config)
        #[arg(long)]
        dry_run: bool,
    },
    /// Log in and list enrolled courses without scraping or sending
    Courses {
        /// Path to the YAML config file
        #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
        config: PathBuf,
    },
    /// Generate shell completion scripts
    Completions {
        /// Shell type (bash, zsh, fish, powershell)
        shell: Shell,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global flags via environment variables so all modules can check them
    if cli.quiet {
        std::env::set_var("HARVESTER_QUIET", "1");
    }
    if cli.verbose {
        std::env::set_var("HARVESTER_VERBOSE", "1");
    }

    let default_level = if cli.verbose {
        "moodle_harvester=debug"
    } else {
        "moodle_harvester=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(default_level.parse().unwrap()),
        )
        .init();

    let result = match cli.command {
        // No subcommand → full harvest with the default config path
        None => cli::run_cmd::run(&PathBuf::from(DEFAULT_CONFIG_PATH), false).await,

        Some(Commands::Run { config, dry_run }) => cli::run_cmd::run(&config, dry_run).await,
        Some(Commands::Courses { config }) => cli::courses_cmd::run(&config).await,
        Some(Commands::Completions { shell }) => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "harvester", &mut std::io::stdout());
            Ok(())
        }
    };

    // Consistent exit codes: 0=success, 1=error
    if let Err(e) = &result {
        if !cli::output::is_quiet() {
            eprintln!("  Error: {e:#}");
        }
        std::process::exit(1);
    }

    result
}
