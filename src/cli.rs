use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "softsync")]
#[command(author = "Alberto Cavalcante")]
#[command(version)]
#[command(
    about = "Converge a Soft Serve git server to a declared configuration",
    long_about = None
)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Connection config file (default: ~/.config/softsync/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Server host
    #[arg(long, global = true)]
    pub host: Option<String>,

    /// Server SSH port
    #[arg(long, global = true)]
    pub port: Option<u16>,

    /// Admin username
    #[arg(long, global = true)]
    pub user: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run one raw admin command and print its output
    Exec {
        /// Command words, e.g. `repo list`
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        command: Vec<String>,
    },

    /// Import a resource and print its state as JSON
    Show {
        /// Resource kind
        #[arg(value_enum)]
        kind: Kind,

        /// Name, or repository/username for collaborators (not needed for settings)
        id: Option<String>,
    },

    /// Converge the server to a manifest
    Apply(ApplyArgs),

    /// Delete one resource
    Destroy {
        /// Resource kind
        #[arg(value_enum)]
        kind: Kind,

        /// Name, or repository/username for collaborators
        id: String,

        /// Don't ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(clap::Args)]
pub struct ApplyArgs {
    /// Manifest file (TOML)
    pub manifest: PathBuf,

    /// Show the commands that would run without running them
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Don't ask for confirmation
    #[arg(short, long)]
    pub yes: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Kind {
    /// Repository
    #[value(alias = "repository")]
    Repo,
    /// User account
    User,
    /// Repository collaborator
    #[value(alias = "collaborator")]
    Collab,
    /// Server settings
    Settings,
}
