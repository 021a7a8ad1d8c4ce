use anyhow::{Result, bail};
use clap::{self, Parser, ValueEnum};
use nim::{
    impartial_game::ImpartialGame,
    position::{Outcome, Position},
    transposition_table::GrundyTable,
};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutcomeFilter {
    All,
    P,
    N,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Report {
    position: String,
    nim_sum: u32,
    grundy_value: String,
    outcome: Outcome,
}

/// Evaluate all positions with a given number of piles by exhaustive search and compare
/// their Grundy values with the Nim-sum.
#[derive(Debug, Clone, Parser)]
pub struct Args {
    /// Number of piles
    #[arg(long, default_value_t = 3)]
    pile_count: usize,

    /// Largest pile size
    #[arg(long, default_value_t = 4)]
    max_size: u32,

    #[arg(long, value_enum, default_value_t = OutcomeFilter::All)]
    filter: OutcomeFilter,
}

impl OutcomeFilter {
    fn keeps(self, outcome: Outcome) -> bool {
        match self {
            OutcomeFilter::All => true,
            OutcomeFilter::P => outcome == Outcome::P,
            OutcomeFilter::N => outcome == Outcome::N,
        }
    }
}

/// Evaluate every position, failing on the first Grundy value that differs from the Nim-sum
fn evaluate(
    pile_count: usize,
    max_size: u32,
    filter: OutcomeFilter,
    table: &GrundyTable<Position>,
) -> Result<Vec<Report>> {
    let positions = Position::enumerate(pile_count, max_size).collect::<Vec<_>>();
    let reports = positions
        .into_par_iter()
        .map(|position| {
            let grundy_value = position.nim_value_cached(table);
            let nim_sum = position.nim_sum();
            if grundy_value != nim_sum {
                bail!(
                    "Position {} has Grundy value {} but Nim-sum {}",
                    position,
                    grundy_value,
                    nim_sum
                );
            }
            Ok(Report {
                position: position.to_string(),
                nim_sum: nim_sum.value(),
                grundy_value: grundy_value.to_string(),
                outcome: position.outcome(),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(reports
        .into_iter()
        .filter(|report| filter.keeps(report.outcome))
        .collect())
}

#[allow(clippy::needless_pass_by_value)]
pub fn run(args: Args) -> Result<()> {
    if args.max_size == 0 {
        bail!("Largest pile size must be positive.");
    }

    let table = GrundyTable::new();
    let reports = evaluate(args.pile_count, args.max_size, args.filter, &table)?;
    log::info!("Evaluated {} distinct positions", table.len());

    for report in reports {
        println!("{}", serde_json::ser::to_string(&report)?);
    }

    Ok(())
}
