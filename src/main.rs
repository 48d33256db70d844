// src/main.rs
#![allow(clippy::multiple_crate_versions)]

use anyhow::Result;
use clap::Parser;
use notecount::{app, cli::Args, logging};

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.debug);
    let tree = app::run(&args)?;
    print!("{tree}");
    Ok(())
}
