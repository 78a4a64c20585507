use clap::CommandFactory;
use clap_complete::{generate, Shell};

use crate::cli::types::Cli;

/// Print a completion script for the given shell on stdout
pub fn handle_completions_command(shell: Shell) {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "mdtoc", &mut std::io::stdout());
}
