use crate::commands::*;
use anyhow::Result;
use clap::{self, Parser, Subcommand};

mod commands;
mod io;

#[derive(Subcommand, Debug)]
enum Command {
    Play(play::Args),
    Analyze(analyze::Args),
    Outcomes(outcomes::Args),
    Simulate(simulate::Args),
}

#[derive(Parser)]
struct Args {
    #[clap(subcommand)]
    command: Command,
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    match args.command {
        Command::Play(args) => play::run(args),
        Command::Analyze(args) => analyze::run(args),
        Command::Outcomes(args) => outcomes::run(args),
        Command::Simulate(args) => simulate::run(args),
    }
}
