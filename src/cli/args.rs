//! CLI argument definitions using clap.
//!
//! This module defines the command-line interface structure for all sincefix
//! commands. It uses clap's derive API for declarative argument parsing.
//!
//! ## Commands
//!
//! - `update`: Resolve `@since TODO` markers and rewrite them in place
//! - `init`: Initialize a sincefix configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }
}

/// Common arguments shared by all commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Repository root directory (defaults to the current directory)
    #[arg(long)]
    pub repo_root: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Parser)]
pub struct UpdateArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Compute and log every resolution but never write to any file
    #[arg(short = 'n', long)]
    pub dry_run: bool,
}

#[derive(Debug, Args)]
pub struct UpdateCommand {
    #[command(flatten)]
    pub args: UpdateArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Replace '@since TODO' markers with the first release containing them
    Update(UpdateCommand),
    /// Initialize a new .sincerc.json configuration file
    Init,
}
