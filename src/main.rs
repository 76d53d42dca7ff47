mod cli;
mod commands;
mod config;
mod manifest;
mod progress;
mod ui;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::generate;
use cli::{Cli, Command};
use std::io;
use std::path::PathBuf;

/// Global context for the application
pub struct Context {
    pub verbose: u8,
    pub quiet: bool,
    pub config: Option<PathBuf>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub user: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let log_level = match cli.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter_level(if cli.quiet {
            log::LevelFilter::Error
        } else {
            log_level
        })
        .format_timestamp(None)
        .init();

    let ctx = Context {
        verbose: cli.verbose,
        quiet: cli.quiet,
        config: cli.config,
        host: cli.host,
        port: cli.port,
        user: cli.user,
    };

    match cli.command {
        Command::Exec { command } => commands::exec::run(&ctx, &command),
        Command::Show { kind, id } => commands::show::run(&ctx, kind, id.as_deref()),
        Command::Apply(args) => commands::apply::run(&ctx, &args),
        Command::Destroy { kind, id, yes } => commands::destroy::run(&ctx, kind, &id, yes),
        Command::Completions { shell } => {
            generate(shell, &mut Cli::command(), "softsync", &mut io::stdout());
            Ok(())
        }
    }
}
