//! CLI Adapter.

mod form;
mod poll;
mod project;
mod task;
mod user;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use crate::domain::AppError;

#[derive(Parser)]
#[command(name = "phorge")]
#[command(version)]
#[command(
    about = "Query and mutate Phorge tasks, projects and users over Conduit",
    long_about = None
)]
struct Cli {
    /// TOML file with `host`, `token` and `timeout_secs`
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Log requests and poll windows to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search, create, edit and comment on tasks
    #[clap(visible_alias = "t")]
    Task {
        #[command(subcommand)]
        command: task::TaskCommands,
    },
    /// Search projects and list project options
    #[clap(visible_alias = "projects")]
    Project {
        #[command(subcommand)]
        command: project::ProjectCommands,
    },
    /// Search users
    #[clap(visible_alias = "users")]
    User {
        #[command(subcommand)]
        command: user::UserCommands,
    },
    /// Fetch tasks created or updated since the last poll
    Poll(poll::PollArgs),
    /// Check the configured credentials
    Whoami,
}

/// Entry point for the CLI.
pub fn run() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = cli.config.as_deref();
    let result: Result<(), AppError> = match cli.command {
        Commands::Task { command } => task::run_task(command, config),
        Commands::Project { command } => project::run_project(command, config),
        Commands::User { command } => user::run_user(command, config),
        Commands::Poll(args) => poll::run_poll(args, config),
        Commands::Whoami => run_whoami(config),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).try_init();
}

fn run_whoami(config: Option<&Path>) -> Result<(), AppError> {
    let record = crate::whoami(config)?;
    print_json(&[record])
}

/// Print one compact JSON document per line.
fn print_json<T: Serialize>(items: &[T]) -> Result<(), AppError> {
    for item in items {
        println!("{}", serde_json::to_string(item)?);
    }
    Ok(())
}
