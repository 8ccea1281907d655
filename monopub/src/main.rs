mod commands;
mod formatting;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::Level;

#[derive(Parser)]
#[command(name = "monopub")]
#[command(about = "Publish monorepo packages in dependency order")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Directory inside the repository to operate on.
    #[arg(long, global = true, default_value = ".")]
    path: PathBuf,

    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[arg(short, long, global = true, action)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List packages under the working directory.
    List {
        #[arg(long, action)]
        json: bool,
        /// Include a content hash for each package.
        #[arg(long, action)]
        hash: bool,
    },
    /// Show the order in which a package's local dependencies are processed.
    Order {
        package: String,
        #[arg(long, action)]
        json: bool,
    },
    /// Show every local dependency of one or more packages.
    Deps {
        #[arg(required = true)]
        packages: Vec<String>,
        #[arg(long, action)]
        json: bool,
    },
    /// Publish packages to the registry in dependency order.
    Publish {
        /// Only print the plan.
        #[arg(long, action)]
        dry: bool,
        /// Write publish commands to a script instead of publishing.
        #[arg(long)]
        write: Option<PathBuf>,
        /// Check the registry for existing versions, even if disabled in config.
        #[arg(long, action, overrides_with = "no_check_existing")]
        check_existing: bool,
        /// Skip checking the registry for existing versions.
        #[arg(long, action, overrides_with = "check_existing")]
        no_check_existing: bool,
        /// Also publish the local dependencies of each package.
        #[arg(long, action, overrides_with = "no_recursive")]
        recursive: bool,
        /// Publish only the selected packages, even if config says recursive.
        #[arg(long, action, overrides_with = "recursive")]
        no_recursive: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.quiet {
        Level::ERROR
    } else {
        match cli.verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        }
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::List { json, hash } => commands::cmd_list(cli.path, json, hash)?,
        Commands::Order { package, json } => commands::cmd_order(cli.path, package, json)?,
        Commands::Deps { packages, json } => commands::cmd_deps(cli.path, packages, json)?,
        Commands::Publish {
            dry,
            write,
            check_existing,
            no_check_existing,
            recursive,
            no_recursive,
        } => commands::cmd_publish(
            cli.path,
            commands::PublishOptions {
                dry,
                write,
                check_existing: switch(check_existing, no_check_existing),
                recursive: switch(recursive, no_recursive),
            },
        )?,
    }

    Ok(())
}

/// Collapses a `--flag`/`--no-flag` pair; `None` defers to the config file.
fn switch(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}
