//! Command dispatch for the sincefix CLI.
//!
//! Maps parsed arguments onto the update pipeline or the one-shot `init`
//! helper. Errors bubble up to `main`, which reports them and exits with
//! `ExitStatus::Error`.

use std::{fs, path::Path};

use anyhow::Result;

use super::args::{Arguments, Command};
use super::exit_status::ExitStatus;
use crate::config::{CONFIG_FILE_NAME, default_config_json};
use crate::report;
use crate::resolve::update;

pub fn run(Arguments { command }: Arguments) -> Result<ExitStatus> {
    match command {
        Some(Command::Update(cmd)) => {
            let outcome = update(cmd.args)?;
            report::print(&outcome);
            Ok(ExitStatus::Success)
        }
        Some(Command::Init) => {
            init()?;
            println!("Created {}", CONFIG_FILE_NAME);
            Ok(ExitStatus::Success)
        }
        None => {
            anyhow::bail!("No command provided. Use --help to see available commands.")
        }
    }
}

fn init() -> Result<()> {
    let config_path = Path::new(CONFIG_FILE_NAME);
    if config_path.exists() {
        anyhow::bail!("{} already exists", CONFIG_FILE_NAME);
    }

    fs::write(config_path, default_config_json()?)?;
    Ok(())
}
