use std::process::ExitCode;

use clap::Parser;

mod app;
mod audio;
mod cli;
mod config;
mod error;
mod library;
mod logging;
mod runtime;
mod ui;

use cli::{Action, Cli};

fn main() -> ExitCode {
    match Cli::parse().action() {
        Action::PrintVersion => {
            println!("version: {}", cli::VERSION);
            ExitCode::SUCCESS
        }
        Action::MissingInput => {
            println!("too few arguments, use '-h' to see help info");
            ExitCode::FAILURE
        }
        Action::Play(input) => match runtime::run(&input) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("cadenza: {e}");
                ExitCode::FAILURE
            }
        },
    }
}
