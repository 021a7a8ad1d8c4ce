//! Stateful game of Nim with turn tracking and undo history

use crate::{
    numeric::nimber::Nimber,
    player::Player,
    position::{Move, MoveError, Position},
};
use std::fmt::Display;
use thiserror::Error;

/// Minimum number of piles a game may start with
pub const MIN_PILES: usize = 2;

/// Reasons for rejecting a starting configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StartError {
    /// Game needs at least [`MIN_PILES`] piles
    #[error("a game must start with at least {MIN_PILES} piles, got {count}")]
    TooFewPiles {
        /// Number of provided piles
        count: usize,
    },

    /// Every pile has to hold at least one object
    #[error("pile {index} is empty, all pile sizes must be positive")]
    EmptyPile {
        /// Index of the first empty pile
        index: usize,
    },

    /// Restart requested before any game was started
    #[error("no game has been started yet")]
    NotStarted,
}

/// A single game of Nim.
///
/// Player [`One`](Player::One) moves first and the player who removes the last object wins.
/// Every accepted move pushes a snapshot of the piles onto the history so it can be undone.
/// Rejected calls never change the game.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Game {
    piles: Position,
    initial_piles: Position,
    player: Player,
    history: Vec<Position>,
}

impl Game {
    /// Create new game with no piles. Use [`Game::start`] to set it up.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new game with given pile sizes, discarding the current one.
    ///
    /// # Errors
    /// - There are fewer than [`MIN_PILES`] piles
    /// - Some pile is empty
    pub fn start(&mut self, initial_piles: &[u32]) -> Result<(), StartError> {
        if let Err(err) = Self::validate_start(initial_piles) {
            log::debug!("Rejected start with {:?}: {}", initial_piles, err);
            return Err(err);
        }

        let piles = Position::new(initial_piles.to_vec());
        self.initial_piles = piles.clone();
        self.piles = piles;
        self.player = Player::One;
        self.history.clear();
        log::info!("Game started with piles {}", self.piles);
        Ok(())
    }

    fn validate_start(initial_piles: &[u32]) -> Result<(), StartError> {
        if initial_piles.len() < MIN_PILES {
            return Err(StartError::TooFewPiles {
                count: initial_piles.len(),
            });
        }
        if let Some(index) = initial_piles.iter().position(|&pile| pile == 0) {
            return Err(StartError::EmptyPile { index });
        }
        Ok(())
    }

    /// Start again from the piles of the last successful [`Game::start`]
    ///
    /// # Errors
    /// - No game has been started yet
    pub fn restart(&mut self) -> Result<(), StartError> {
        if self.initial_piles.is_empty() {
            log::debug!("Rejected restart, no game has been started");
            return Err(StartError::NotStarted);
        }

        self.piles = self.initial_piles.clone();
        self.player = Player::One;
        self.history.clear();
        log::info!("Game restarted with piles {}", self.piles);
        Ok(())
    }

    /// Remove `number_to_remove` objects from the pile at `pile_index`. The pile is dropped
    /// when it becomes empty, shifting the indices of all piles after it.
    ///
    /// # Errors
    /// - Pile index is out of range
    /// - Number of objects is zero or exceeds the pile size
    #[inline]
    pub fn remove(&mut self, pile_index: usize, number_to_remove: u32) -> Result<(), MoveError> {
        self.play(Move::new(pile_index, number_to_remove))
    }

    /// Make a move and pass the turn to the other player
    ///
    /// # Errors
    /// Same as [`Game::remove`]
    pub fn play(&mut self, mv: Move) -> Result<(), MoveError> {
        let previous = self.piles.clone();
        if let Err(err) = self.piles.apply(mv) {
            log::debug!("Rejected move in {}: {}", self.piles, err);
            return Err(err);
        }

        self.history.push(previous);
        log::debug!("{} made move ({}), piles {}", self.player, mv, self.piles);
        self.player = self.player.opposite();
        Ok(())
    }

    /// Revert the last move. Returns `false` if there is nothing to undo.
    pub fn undo_move(&mut self) -> bool {
        let Some(previous) = self.history.pop() else {
            log::debug!("No moves to undo");
            return false;
        };

        self.piles = previous;
        self.player = self.player.opposite();
        log::info!("Last move undone, piles {}", self.piles);
        true
    }

    /// Check if all piles are gone
    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.piles.is_terminal()
    }

    /// Player who took the last object, `None` while the game is in progress
    pub fn winner(&self) -> Option<Player> {
        // Turn has already passed to the loser
        self.is_game_over().then(|| self.player.opposite())
    }

    /// Winner as a player number, or -1 while the game is in progress
    pub fn winner_number(&self) -> i32 {
        self.winner().map_or(-1, |winner| i32::from(winner.number()))
    }

    /// Nim-sum of current piles
    #[inline]
    pub fn nim_sum(&self) -> Nimber {
        self.piles.nim_sum()
    }

    /// Best move for the current player, `None` if the game is over.
    /// See [`Position::optimal_move`].
    #[inline]
    pub fn optimal_move(&self) -> Option<Move> {
        self.piles.optimal_move()
    }

    /// Let the computer make the [optimal move](Game::optimal_move) for the current player
    pub fn play_optimal_move(&mut self) -> Option<Move> {
        let mv = self.optimal_move()?;
        log::debug!("Computer chose move ({}) for {}", mv, self.player);
        match self.play(mv) {
            Ok(()) => Some(mv),
            Err(err) => unreachable!("optimal move {} is illegal: {}", mv, err),
        }
    }

    /// Current pile sizes
    #[inline]
    pub fn piles(&self) -> &[u32] {
        self.piles.piles()
    }

    /// Current position
    #[inline]
    pub const fn position(&self) -> &Position {
        &self.piles
    }

    /// Pile sizes the game was started with
    #[inline]
    pub fn initial_piles(&self) -> &[u32] {
        self.initial_piles.piles()
    }

    /// Player to move
    #[inline]
    pub const fn current_player(&self) -> Player {
        self.player
    }

    /// Snapshots of piles before each move that can be undone, oldest first
    #[inline]
    pub fn history(&self) -> &[Position] {
        &self.history
    }
}

impl Display for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.winner() {
            Some(winner) => write!(f, "{} (won by {})", self.piles, winner),
            None => write!(f, "{} ({} to move)", self.piles, self.player),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck::{Arbitrary, Gen, QuickCheck};

    fn started(piles: &[u32]) -> Game {
        let mut game = Game::new();
        game.start(piles).unwrap();
        game
    }

    #[test]
    fn start_copies_piles() {
        let game = started(&[3, 4, 5]);
        assert_eq!(game.piles(), &[3, 4, 5]);
        assert_eq!(game.initial_piles(), &[3, 4, 5]);
        assert_eq!(game.current_player(), Player::One);
        assert!(game.history().is_empty());
        assert_eq!(game.nim_sum(), Nimber::new(2));
    }

    #[test]
    fn start_rejects_invalid_configuration() {
        let mut game = started(&[2, 2]);
        game.remove(0, 1).unwrap();
        let before = game.clone();

        assert_eq!(game.start(&[5]), Err(StartError::TooFewPiles { count: 1 }));
        assert_eq!(game.start(&[]), Err(StartError::TooFewPiles { count: 0 }));
        assert_eq!(game.start(&[3, 0, 2]), Err(StartError::EmptyPile { index: 1 }));
        assert_eq!(game, before);
    }

    #[test]
    fn initial_piles_do_not_alias_current_piles() {
        let mut game = started(&[3, 4]);
        game.remove(0, 3).unwrap();
        assert_eq!(game.piles(), &[4]);
        assert_eq!(game.initial_piles(), &[3, 4]);

        game.restart().unwrap();
        assert_eq!(game.piles(), &[3, 4]);
        assert_eq!(game.current_player(), Player::One);
        assert!(game.history().is_empty());
    }

    #[test]
    fn restart_needs_started_game() {
        let mut game = Game::new();
        assert_eq!(game.restart(), Err(StartError::NotStarted));
        assert_eq!(game, Game::new());
    }

    #[test]
    fn two_single_piles() {
        let mut game = started(&[1, 1]);
        game.remove(0, 1).unwrap();
        assert_eq!(game.piles(), &[1]);
        assert_eq!(game.current_player(), Player::Two);
        assert_eq!(game.winner(), None);
        assert_eq!(game.winner_number(), -1);

        game.remove(0, 1).unwrap();
        assert!(game.piles().is_empty());
        assert_eq!(game.current_player(), Player::One);
        assert!(game.is_game_over());
        assert_eq!(game.winner(), Some(Player::Two));
        assert_eq!(game.winner_number(), 2);
        assert_eq!(game.optimal_move(), None);
        assert_eq!(game.play_optimal_move(), None);
    }

    #[test]
    fn rejected_moves_leave_game_unchanged() {
        let mut game = started(&[2, 3]);
        game.remove(1, 1).unwrap();
        let before = game.clone();

        assert!(game.remove(2, 1).is_err());
        assert!(game.remove(0, 0).is_err());
        assert!(game.remove(0, 3).is_err());
        assert_eq!(game, before);
        assert_eq!(game.history().len(), 1);
    }

    #[test]
    fn undo_reverts_game_over() {
        let mut game = started(&[1, 1]);
        assert!(!game.undo_move());

        game.remove(1, 1).unwrap();
        game.remove(0, 1).unwrap();
        assert!(game.is_game_over());

        assert!(game.undo_move());
        assert!(!game.is_game_over());
        assert_eq!(game.piles(), &[1]);
        assert_eq!(game.current_player(), Player::Two);

        assert!(game.undo_move());
        assert_eq!(game.piles(), &[1, 1]);
        assert_eq!(game.current_player(), Player::One);
        assert!(!game.undo_move());
        assert_eq!(game.initial_piles(), &[1, 1]);
    }

    #[test]
    fn computer_move() {
        let mut game = started(&[3, 4, 5]);
        assert_eq!(game.optimal_move(), Some(Move::new(0, 2)));
        assert_eq!(game.play_optimal_move(), Some(Move::new(0, 2)));
        assert_eq!(game.piles(), &[1, 4, 5]);
        assert_eq!(game.nim_sum(), Nimber::ZERO);
        assert_eq!(game.current_player(), Player::Two);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserialized_game_keeps_piles_non_empty() {
        let mut game = started(&[3, 4, 5]);
        game.remove(1, 4).unwrap();
        let json = serde_json::to_string(&game).unwrap();
        let mut restored = serde_json::from_str::<Game>(&json).unwrap();
        assert_eq!(restored, game);
        assert!(restored.undo_move());
        assert_eq!(restored.piles(), &[3, 4, 5]);

        let zero_pile = r#"{"piles":[0],"initial_piles":[1,1],"player":1,"history":[]}"#;
        assert!(serde_json::from_str::<Game>(zero_pile).is_err());
        let zero_history = r#"{"piles":[1],"initial_piles":[1,1],"player":2,"history":[[1,0]]}"#;
        assert!(serde_json::from_str::<Game>(zero_history).is_err());
        let bad_player = r#"{"piles":[1],"initial_piles":[1,1],"player":3,"history":[]}"#;
        assert!(serde_json::from_str::<Game>(bad_player).is_err());
    }

    #[test]
    fn display() {
        let mut game = started(&[1, 2]);
        assert_eq!(game.to_string(), "[1, 2] (Player 1 to move)");
        game.remove(1, 2).unwrap();
        game.remove(0, 1).unwrap();
        assert_eq!(game.to_string(), "[] (won by Player 2)");
    }

    /// Valid starting configuration with a list of moves, not necessarily legal
    #[derive(Debug, Clone)]
    struct Script {
        piles: Vec<u32>,
        moves: Vec<(usize, u32)>,
    }

    impl Arbitrary for Script {
        fn arbitrary(g: &mut Gen) -> Self {
            let pile_count = usize::arbitrary(g) % 4 + MIN_PILES;
            let piles = (0..pile_count).map(|_| u32::arbitrary(g) % 8 + 1).collect();
            let move_count = usize::arbitrary(g) % 24;
            let moves = (0..move_count)
                .map(|_| (usize::arbitrary(g) % 6, u32::arbitrary(g) % 9))
                .collect();
            Script { piles, moves }
        }
    }

    #[test]
    fn undo_is_inverse_of_move() {
        let test = |script: Script| {
            let mut game = started(&script.piles);
            for (pile, remove) in script.moves {
                let before = game.clone();
                match game.remove(pile, remove) {
                    Ok(()) => {
                        assert_eq!(game.history().len(), before.history().len() + 1);
                        let mut undone = game.clone();
                        assert!(undone.undo_move());
                        assert_eq!(undone, before);
                    }
                    Err(_) => assert_eq!(game, before),
                }
            }
        };
        QuickCheck::new().quickcheck(test as fn(Script));
    }

    #[test]
    fn history_tracks_moves_minus_undos() {
        let test = |script: Script| {
            let mut game = started(&script.piles);
            let mut expected = 0usize;
            for (idx, (pile, remove)) in script.moves.into_iter().enumerate() {
                if idx % 3 == 2 {
                    if game.undo_move() {
                        expected -= 1;
                    }
                } else if game.remove(pile, remove).is_ok() {
                    expected += 1;
                }
                assert_eq!(game.history().len(), expected);
            }
        };
        QuickCheck::new().quickcheck(test as fn(Script));
    }
}
