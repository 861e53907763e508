//! Command-line interface module.

mod args;
mod prompt;

pub use args::Cli;
pub use prompt::confirm_reorganize;
