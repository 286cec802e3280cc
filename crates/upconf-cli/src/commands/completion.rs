//! `upconf completion <shell>` prints a completion script for the `upconf`
//! binary on stdout. Supported shells: bash, zsh, fish and PowerShell.

use anyhow::Result;
use clap::CommandFactory;
use clap_complete::{Shell, generate};

use crate::cli::{Cli, CompletionArgs, CompletionCommands};
use crate::context::RuntimeContext;

impl From<&CompletionCommands> for Shell {
    fn from(command: &CompletionCommands) -> Self {
        match command {
            CompletionCommands::Bash => Shell::Bash,
            CompletionCommands::Zsh => Shell::Zsh,
            CompletionCommands::Fish => Shell::Fish,
            CompletionCommands::Powershell => Shell::PowerShell,
        }
    }
}

/// Write the completion script for the requested shell.
pub fn run(_ctx: &RuntimeContext, args: &CompletionArgs) -> Result<()> {
    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(
        Shell::from(&args.command),
        &mut cmd,
        bin_name,
        &mut std::io::stdout(),
    );
    Ok(())
}
