use nim::{
    game::Game,
    player::Player,
    position::{Outcome, Position},
};
use quickcheck::{Arbitrary, Gen, QuickCheck};
use std::collections::HashMap;

/// Outcome computed directly from the rules: a position is a previous player win iff every
/// move leads to a next player win
fn search_outcome(position: &Position, known: &mut HashMap<Position, Outcome>) -> Outcome {
    let key = position.sorted();
    if let Some(outcome) = known.get(&key) {
        return *outcome;
    }

    let mut outcome = Outcome::P;
    for mv in key.legal_moves() {
        let next = key.after(mv).unwrap();
        if search_outcome(&next, known) == Outcome::P {
            outcome = Outcome::N;
            break;
        }
    }
    known.insert(key, outcome);
    outcome
}

#[test]
fn nim_sum_zero_iff_previous_player_wins() {
    let mut known = HashMap::new();
    for pile_count in 1..=3 {
        for position in Position::enumerate(pile_count, 4) {
            let outcome = search_outcome(&position, &mut known);
            assert_eq!(
                position.nim_sum().is_zero(),
                outcome == Outcome::P,
                "{}",
                position
            );
            assert_eq!(position.outcome(), outcome);
        }
    }
}

/// Starting piles and a stream of choices among legal moves
#[derive(Debug, Clone)]
struct RandomGame {
    piles: Vec<u32>,
    choices: Vec<usize>,
}

impl Arbitrary for RandomGame {
    fn arbitrary(g: &mut Gen) -> Self {
        let pile_count = usize::arbitrary(g) % 4 + 2;
        let piles = (0..pile_count).map(|_| u32::arbitrary(g) % 10 + 1).collect();
        let choices = (0..64).map(|_| usize::arbitrary(g)).collect();
        RandomGame { piles, choices }
    }
}

#[test]
fn last_mover_wins() {
    let test = |random: RandomGame| {
        let mut game = Game::new();
        game.start(&random.piles).unwrap();

        let mut last_mover = None;
        let mut choices = random.choices.iter().cycle();
        while !game.is_game_over() {
            assert_eq!(game.winner(), None);
            assert_eq!(game.winner_number(), -1);

            let moves = game.position().legal_moves().collect::<Vec<_>>();
            let choice = choices.next().copied().unwrap_or_default();
            let mover = game.current_player();
            game.play(moves[choice % moves.len()]).unwrap();
            last_mover = Some(mover);
        }

        assert_eq!(game.winner(), last_mover);
        assert_ne!(game.winner_number(), -1);
    };
    QuickCheck::new().quickcheck(test as fn(RandomGame));
}

#[test]
fn optimal_player_wins_from_winning_position() {
    let test = |random: RandomGame| {
        let mut game = Game::new();
        game.start(&random.piles).unwrap();
        let optimal = if game.nim_sum().is_zero() {
            Player::Two
        } else {
            Player::One
        };

        let mut choices = random.choices.iter().cycle();
        while !game.is_game_over() {
            if game.current_player() == optimal {
                game.play_optimal_move().unwrap();
                assert!(game.nim_sum().is_zero());
            } else {
                let moves = game.position().legal_moves().collect::<Vec<_>>();
                let choice = choices.next().copied().unwrap_or_default();
                game.play(moves[choice % moves.len()]).unwrap();
            }
        }

        assert_eq!(game.winner(), Some(optimal));
    };
    QuickCheck::new().quickcheck(test as fn(RandomGame));
}

#[test]
fn undo_whole_game() {
    let mut game = Game::new();
    game.start(&[3, 4, 5]).unwrap();
    while game.play_optimal_move().is_some() {}
    assert!(game.is_game_over());
    assert_eq!(game.winner(), Some(Player::One));

    let moves = game.history().len();
    for _ in 0..moves {
        assert!(game.undo_move());
    }
    assert!(!game.undo_move());
    assert_eq!(game.piles(), &[3, 4, 5]);
    assert_eq!(game.current_player(), Player::One);
}
