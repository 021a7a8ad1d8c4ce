//! Nim position - an ordered sequence of non-empty piles.
//!
//! Piles are addressed by their index in the sequence. A pile that is emptied is removed, so
//! every pile after it shifts down by one and indices are not stable across such moves.

use crate::{display, impartial_game::ImpartialGame, numeric::nimber::Nimber};
use itertools::{Either, Itertools};
use std::fmt::Display;
use thiserror::Error;

/// Remove `remove` objects from the pile at index `pile`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Move {
    /// 0-based pile index
    pub pile: usize,

    /// Number of objects to take, at least one
    pub remove: u32,
}

impl Move {
    /// Construct new move
    #[inline]
    pub const fn new(pile: usize, remove: u32) -> Self {
        Self { pile, remove }
    }
}

impl Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "take {} from pile {}", self.remove, self.pile)
    }
}

/// Reasons for rejecting a move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    /// Pile index does not address any pile
    #[error("pile {pile} does not exist, there are {piles} piles")]
    PileOutOfRange {
        /// Requested pile index
        pile: usize,
        /// Number of piles in the position
        piles: usize,
    },

    /// Move has to take at least one object
    #[error("at least one object has to be removed")]
    NothingRemoved,

    /// Pile is smaller than the requested amount
    #[error("cannot remove {requested} objects from pile {pile} holding {available}")]
    TooMany {
        /// Requested pile index
        pile: usize,
        /// Requested number of objects
        requested: u32,
        /// Objects left in the pile
        available: u32,
    },
}

/// Pile sequence containing an empty pile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("pile {index} is empty, all pile sizes must be positive")]
pub struct EmptyPileError {
    /// Index of the first empty pile
    pub index: usize,
}

/// Outcome class of a position under normal play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    /// Previous player wins, the player to move loses against optimal play
    P,

    /// Next player wins, the player to move can force a win
    N,
}

impl Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::P => write!(f, "P"),
            Outcome::N => write!(f, "N"),
        }
    }
}

/// See [position](self) header
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Vec<u32>", into = "Vec<u32>"))]
pub struct Position {
    // Invariant: no zeros
    piles: Vec<u32>,
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        display::brackets(f, |f| display::commas(f, self.piles()))
    }
}

impl Position {
    /// Create new position from pile sizes. Empty piles are dropped.
    #[inline]
    pub fn new(mut piles: Vec<u32>) -> Self {
        piles.retain(|&pile| pile != 0);
        Self { piles }
    }

    /// Get the pile sizes
    #[inline]
    pub fn piles(&self) -> &[u32] {
        &self.piles
    }

    /// Number of piles left
    #[inline]
    pub fn len(&self) -> usize {
        self.piles.len()
    }

    /// Check if there are no piles left, i.e. the player to move has lost
    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.piles.is_empty()
    }

    /// Alias of [`Position::is_terminal`]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.is_terminal()
    }

    /// Bitwise XOR of all pile sizes. Zero for the terminal position.
    pub fn nim_sum(&self) -> Nimber {
        self.piles.iter().copied().map(Nimber::new).sum()
    }

    /// Outcome class of the position, determined by the Nim-sum
    pub fn outcome(&self) -> Outcome {
        if self.nim_sum().is_zero() {
            Outcome::P
        } else {
            Outcome::N
        }
    }

    /// Check if the move is legal in the position
    pub fn validate(&self, mv: Move) -> Result<(), MoveError> {
        let Some(&available) = self.piles.get(mv.pile) else {
            return Err(MoveError::PileOutOfRange {
                pile: mv.pile,
                piles: self.piles.len(),
            });
        };
        if mv.remove == 0 {
            return Err(MoveError::NothingRemoved);
        }
        if mv.remove > available {
            return Err(MoveError::TooMany {
                pile: mv.pile,
                requested: mv.remove,
                available,
            });
        }
        Ok(())
    }

    /// Apply the move in place. Position is unchanged if the move is illegal.
    pub fn apply(&mut self, mv: Move) -> Result<(), MoveError> {
        self.validate(mv)?;
        self.piles[mv.pile] -= mv.remove;
        if self.piles[mv.pile] == 0 {
            self.piles.remove(mv.pile);
        }
        Ok(())
    }

    /// Position reached after making the move
    pub fn after(&self, mv: Move) -> Result<Self, MoveError> {
        let mut res = self.clone();
        res.apply(mv)?;
        Ok(res)
    }

    /// All legal moves, ordered by pile and then by number of removed objects
    pub fn legal_moves(&self) -> impl Iterator<Item = Move> + '_ {
        self.piles
            .iter()
            .enumerate()
            .flat_map(|(pile, &size)| (1..=size).map(move |remove| Move::new(pile, remove)))
    }

    /// All moves that leave a position with Nim-sum zero. Empty for P-positions.
    pub fn winning_moves(&self) -> Vec<Move> {
        let nim_sum = self.nim_sum().value();
        if nim_sum == 0 {
            return Vec::new();
        }

        self.piles
            .iter()
            .enumerate()
            .filter_map(|(pile, &size)| {
                let target = size ^ nim_sum;
                (target < size).then(|| Move::new(pile, size - target))
            })
            .collect()
    }

    /// Move chosen by the Nim-sum strategy, `None` only for the terminal position.
    ///
    /// With non-zero Nim-sum the first pile (from the left) that can be reduced to restore
    /// Nim-sum zero is chosen. In a P-position no such move exists and one object is taken
    /// from the first largest pile instead.
    pub fn optimal_move(&self) -> Option<Move> {
        if self.is_terminal() {
            return None;
        }

        let nim_sum = self.nim_sum().value();
        if nim_sum == 0 {
            let mut largest = 0;
            for (pile, &size) in self.piles.iter().enumerate() {
                if size > self.piles[largest] {
                    largest = pile;
                }
            }
            return Some(Move::new(largest, 1));
        }

        for (pile, &size) in self.piles.iter().enumerate() {
            let target = size ^ nim_sum;
            if target < size {
                return Some(Move::new(pile, size - target));
            }
        }

        // The highest set bit of the nim-sum is set in at least one pile
        unreachable!("position {} with non-zero nim-sum has no reducing pile", self)
    }

    /// Same piles in non-decreasing order. Pile order does not affect the game value.
    #[must_use]
    pub fn sorted(&self) -> Self {
        let mut piles = self.piles.clone();
        piles.sort_unstable();
        Self { piles }
    }

    /// All positions with exactly `pile_count` piles, each of size `1..=max_size`
    pub fn enumerate(pile_count: usize, max_size: u32) -> impl Iterator<Item = Position> {
        if pile_count == 0 {
            Either::Left(std::iter::once(Position::default()))
        } else {
            Either::Right(
                std::iter::repeat_n(1..=max_size, pile_count)
                    .multi_cartesian_product()
                    .map(|piles| Position { piles }),
            )
        }
    }
}

impl TryFrom<Vec<u32>> for Position {
    type Error = EmptyPileError;

    fn try_from(piles: Vec<u32>) -> Result<Self, Self::Error> {
        match piles.iter().position(|&pile| pile == 0) {
            Some(index) => Err(EmptyPileError { index }),
            None => Ok(Self { piles }),
        }
    }
}

impl From<Position> for Vec<u32> {
    fn from(position: Position) -> Self {
        position.piles
    }
}

impl ImpartialGame for Position {
    fn moves(&self) -> Vec<Self> {
        self.legal_moves()
            .map(|mv| {
                let mut res = self.clone();
                res.piles[mv.pile] -= mv.remove;
                if res.piles[mv.pile] == 0 {
                    res.piles.remove(mv.pile);
                }
                res
            })
            .collect()
    }

    fn nim_value_cached(&self, table: &crate::transposition_table::GrundyTable<Self>) -> Nimber {
        let key = self.sorted();
        if let Some(known) = table.lookup_position(&key) {
            return known;
        }

        let game_moves = key
            .moves()
            .iter()
            .map(|m| m.nim_value_cached(table))
            .collect::<Vec<_>>();
        let value = Nimber::mex(game_moves);
        table.insert_position(key, value);
        value
    }
}

#[cfg(any(test, feature = "quickcheck"))]
impl quickcheck::Arbitrary for Position {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        let pile_count = usize::arbitrary(g) % 6;
        let piles = (0..pile_count)
            .map(|_| u32::arbitrary(g) % 32 + 1)
            .collect();
        Position { piles }
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        Box::new(self.piles.shrink().map(Position::new))
    }
}
