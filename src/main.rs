//! CLI entry point for the asset preparation utilities

use clap::Parser;
use spriteprep::io::cli::Cli;

fn main() -> spriteprep::Result<()> {
    let cli = Cli::parse();
    cli.run()
}
