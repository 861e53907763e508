//! sitemove - reorganize a static site into `blog/` and `projects/` folders.

mod cli;
mod config;
mod locale;
mod logger;
mod mapping;
mod reorg;
mod rewrite;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, confirm_reorganize};
use config::ReorgConfig;
use rewrite::LiteralHrefRewriter;

fn main() {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    if let Err(e) = run(&cli) {
        log!("error"; "{:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = ReorgConfig::load(cli)?;
    debug!("config"; "site root: {}", config.root.display());

    let outcome = reorg::run(&config, &LiteralHrefRewriter, confirm_reorganize)?;
    debug!("reorg"; "finished: {:?}", outcome);
    Ok(())
}
