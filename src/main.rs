//! Binary crate for the `skycast` command-line tool.
//!
//! Prints background selections and condition cards as JSON.

use clap::Parser;

mod cli;

fn main() -> anyhow::Result<()> {
    let cmd = cli::Cli::parse();
    cmd.run()
}
