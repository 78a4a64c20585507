pub mod commands;
pub mod logging;
pub mod types;

use clap::Parser;

/// Run the command-line interface; returns the process exit code
pub fn run() -> i32 {
    let cli = types::Cli::parse();

    logging::init_logging(cli.debug);

    match &cli.command {
        Some(types::Commands::Completions { shell }) => {
            commands::handle_completions_command(*shell);
            0
        }
        None => {
            let failures = commands::handle_process_command(&cli);
            if failures == 0 {
                0
            } else {
                1
            }
        }
    }
}
