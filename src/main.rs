use std::process::ExitCode;

use clap::Parser;
use switex::{
    cli::{self, Cli},
    utils::tracing::flush_tracing,
};

fn main() -> ExitCode {
    let cli = Cli::parse();
    let result = cli::run(cli);
    flush_tracing();

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("switex: {e}");
            ExitCode::from(cli::EXIT_ERROR)
        }
    }
}
