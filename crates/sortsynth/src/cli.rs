#![forbid(unsafe_code)]

use std::io::Write;

use clap::{ArgAction, Parser, Subcommand};
use sortsynth_core::Algorithm;

use crate::error::Result;
use crate::logging;
use crate::moves::{MovesArgs, run_moves};
use crate::play::{PlayArgs, run_play};

#[derive(Debug, Parser)]
#[command(
    name = "sortsynth",
    about = "Watch and hear sorting algorithms, one move at a time",
    version
)]
pub struct Cli {
    /// Raise log verbosity (-v info, -vv debug, -vvv trace). Overrides SORTSYNTH_LOG.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate an array, sort it and replay the moves as animated bars.
    Play(PlayArgs),

    /// Print an input array and its move log as JSON.
    Moves(MovesArgs),

    /// Print the supported algorithm names.
    List,
}

pub fn run_from_env() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    run(cli)
}

pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Play(args) => run_play(args),
        Commands::Moves(args) => run_moves(args),
        Commands::List => {
            let stdout = std::io::stdout();
            print_algorithms(&mut stdout.lock())
        }
    }
}

pub fn print_algorithms(out: &mut dyn Write) -> Result<()> {
    for algorithm in Algorithm::ALL {
        writeln!(out, "{algorithm}")?;
    }
    Ok(())
}
