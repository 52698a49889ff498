// vidframes-cli/src/main.rs
//
// Entry point for the `vidframes` binary. Parses arguments, installs the
// logger and dispatches to the command implementations in the library.
//
// Exit codes: 0 on success or for --help/--version, 1 for any usage error
// or failed command.

use clap::Parser;
use std::process;
use vidframes_cli::output::print_error;
use vidframes_cli::{Cli, Commands, logging, run_batch, run_convert, run_info};

fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Convert(_) => "convert",
        Commands::Batch(_) => "batch",
        Commands::Info(_) => "info",
    }
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            process::exit(code);
        }
    };

    let Cli { command, global } = cli;

    match logging::init_logging(global.verbose, global.log_dir.as_deref(), command_name(&command))
    {
        Ok(Some(log_path)) => log::debug!("Logging to {}", log_path.display()),
        Ok(None) => {}
        Err(e) => {
            print_error(&format!("{e}"));
            process::exit(1);
        }
    }

    let result = match command {
        Commands::Convert(args) => run_convert(args, &global),
        Commands::Batch(args) => run_batch(args, &global),
        Commands::Info(args) => run_info(args, &global),
    };

    if let Err(e) = result {
        log::debug!("Command failed: {e:?}");
        print_error(&format!("{e}"));
        process::exit(1);
    }
}
