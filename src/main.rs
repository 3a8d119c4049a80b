// Copyright 2026 Loginscout Contributors
// SPDX-License-Identifier: Apache-2.0

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use loginscout::cli;

#[derive(Parser)]
#[command(
    name = "loginscout",
    about = "Loginscout — detect login form elements on web pages",
    version,
    after_help = "Run 'loginscout <command> --help' for details on each command."
)]
struct Cli {
    /// Output results as JSON (machine-readable)
    #[arg(long, global = true)]
    json: bool,

    /// Enable verbose/debug logging
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a single page for login elements
    Scan {
        /// URL of the page to scan (scheme optional, https assumed)
        url: String,
        /// Skip writing results to the detection log
        #[arg(long)]
        no_log: bool,
        /// Write results to this file instead of the default log
        #[arg(long)]
        log_file: Option<String>,
    },
    /// Serve the HTTP API
    Serve {
        /// Port to listen on (binds 127.0.0.1)
        #[arg(long, default_value = "7800")]
        port: u16,
        /// Disable the detection log
        #[arg(long)]
        no_log: bool,
    },
    /// Check environment and diagnose issues
    Doctor,
    /// Generate shell completion scripts
    Completions {
        /// Shell type (bash, zsh, fish, powershell)
        shell: Shell,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let directive = if cli.verbose {
        "loginscout=debug"
    } else {
        "loginscout=info"
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(directive.parse().unwrap()),
        )
        .init();

    let result = match cli.command {
        Commands::Scan {
            url,
            no_log,
            log_file,
        } => cli::scan_cmd::run(&url, cli.json, no_log, log_file.as_deref()).await,
        Commands::Serve { port, no_log } => cli::serve_cmd::run(port, no_log).await,
        Commands::Doctor => cli::doctor::run().await,
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "loginscout", &mut std::io::stdout());
            Ok(())
        }
    };

    // Consistent exit codes: 0=success, 1=error
    if let Err(e) = result {
        eprintln!("  Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}
