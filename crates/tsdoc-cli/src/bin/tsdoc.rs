#![allow(clippy::print_stderr)]

use clap::Parser;
use std::io::IsTerminal;
use std::process::ExitCode;

use tsdoc_cli::args::CliArgs;
use tsdoc_cli::{driver, reporter, tracing_config};

fn main() -> ExitCode {
    tracing_config::init_tracing();

    let args = CliArgs::parse();
    match driver::run(&args) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            let color = std::io::stderr().is_terminal();
            eprintln!("{}", reporter::format_error(&err, color));
            ExitCode::FAILURE
        }
    }
}
