use anyhow::{Result, bail};
use clap::{self, Parser};
use nim::{game::Game, player::Player};
use rand::{Rng, SeedableRng, rngs::StdRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Play the optimal strategy as Player 1 against a random opponent.
#[derive(Parser, Debug)]
pub struct Args {
    /// Comma separated starting pile sizes
    #[arg(long, num_args=1.., value_delimiter=',')]
    piles: Vec<u32>,

    /// Number of games to play
    #[arg(long, default_value_t = 1000)]
    games: u64,

    /// Seed of the first game, game `i` uses `seed + i`
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct Report {
    games: u64,
    optimal_wins: u64,
    random_wins: u64,
    average_moves: f64,
}

/// Play a single game, returning the winner and the number of moves
fn play_game(game: &mut Game, rng: &mut impl Rng) -> (Player, usize) {
    while !game.is_game_over() {
        if game.current_player() == Player::One {
            game.play_optimal_move();
        } else {
            let moves = game.position().legal_moves().collect::<Vec<_>>();
            let mv = moves[rng.random_range(0..moves.len())];
            if let Err(err) = game.play(mv) {
                unreachable!("generated move {} is illegal: {}", mv, err);
            }
        }
    }

    match game.winner() {
        Some(winner) => (winner, game.history().len()),
        None => unreachable!("finished game has a winner"),
    }
}

#[allow(clippy::needless_pass_by_value)]
pub fn run(args: Args) -> Result<()> {
    let mut initial = Game::new();
    if let Err(err) = initial.start(&args.piles) {
        bail!("Invalid starting piles: {err}");
    }

    let results = (0..args.games)
        .into_par_iter()
        .map(|i| {
            let mut rng = StdRng::seed_from_u64(args.seed.wrapping_add(i));
            play_game(&mut initial.clone(), &mut rng)
        })
        .collect::<Vec<_>>();

    let optimal_wins = results
        .iter()
        .filter(|(winner, _)| *winner == Player::One)
        .count() as u64;
    let total_moves = results.iter().map(|(_, moves)| *moves).sum::<usize>();
    let report = Report {
        games: args.games,
        optimal_wins,
        random_wins: args.games - optimal_wins,
        average_moves: if args.games == 0 {
            0.0
        } else {
            total_moves as f64 / args.games as f64
        },
    };
    println!("{}", serde_json::ser::to_string(&report)?);

    Ok(())
}
