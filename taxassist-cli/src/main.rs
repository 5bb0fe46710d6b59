use anyhow::Result;
use clap::Parser;
use taxassist_cli::{cli, logging};

fn main() -> Result<()> {
    logging::init_default_logging();
    cli::run(cli::Args::parse())
}
