use anyhow::{Result, bail};
use clap::{self, Parser};
use nim::position::{Move, Outcome, Position};
use serde::{Deserialize, Serialize};

/// Analyze a single position using the Nim-sum strategy.
#[derive(Parser, Debug)]
pub struct Args {
    /// Comma separated pile sizes
    #[arg(long, num_args=1.., value_delimiter=',')]
    piles: Vec<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Report {
    piles: Vec<u32>,
    nim_sum: u32,
    outcome: Outcome,
    optimal_move: Option<Move>,
    winning_moves: Vec<Move>,
}

impl Report {
    fn new(position: &Position) -> Self {
        Self {
            piles: position.piles().to_vec(),
            nim_sum: position.nim_sum().value(),
            outcome: position.outcome(),
            optimal_move: position.optimal_move(),
            winning_moves: position.winning_moves(),
        }
    }
}

#[allow(clippy::needless_pass_by_value)]
pub fn run(args: Args) -> Result<()> {
    if let Some(index) = args.piles.iter().position(|&pile| pile == 0) {
        bail!("Pile {} is empty. All pile sizes must be positive.", index + 1);
    }

    let report = Report::new(&Position::new(args.piles));
    println!("{}", serde_json::ser::to_string(&report)?);
    Ok(())
}
