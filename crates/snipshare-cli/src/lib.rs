pub mod cli;
pub mod client;
pub mod commands;
pub mod utils;

use clap::Parser;
use cli::Snipshare;
use commands::handle_command;
use std::process;
use utils::init_tracing;

/// Run the snipshare CLI application
pub fn run_main() {
    let args = Snipshare::parse();
    init_tracing(args.verbose);

    let result = handle_command(args.config.as_deref(), args.commands);

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
