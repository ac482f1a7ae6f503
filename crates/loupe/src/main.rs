//! Loupe queries HTML and XML documents, printing their markup or text.

use clap::Parser;
use loupe::{
    args::{Args, Command, RunCommand},
    config::Config,
};

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();
    let config = Config::load()?.unwrap_or_default();

    match args.command {
        Command::Html(args) => args.run(config)?,
        Command::Text(args) => args.run(config)?,
    }
    Ok(())
}
