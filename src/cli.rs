//! Command-line surface: `-h`, `-v` and `-i <path>`.

use std::path::PathBuf;

use clap::Parser;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Parser)]
#[command(
    name = "cadenza",
    about = "Play music from a folder or file in the terminal",
    disable_version_flag = true
)]
pub struct Cli {
    /// Print version info and exit
    #[arg(short = 'v', long = "version")]
    pub version: bool,

    /// Input music folder/file path
    #[arg(short = 'i', long = "input", value_name = "PATH")]
    pub input: Option<PathBuf>,
}

/// What `main` should do with the parsed arguments.
#[derive(Debug, PartialEq, Eq)]
pub enum Action {
    PrintVersion,
    Play(PathBuf),
    MissingInput,
}

impl Cli {
    pub fn action(self) -> Action {
        if self.version {
            Action::PrintVersion
        } else if let Some(input) = self.input {
            Action::Play(input)
        } else {
            Action::MissingInput
        }
    }
}
