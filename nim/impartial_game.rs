//! Impartial game - both players have the same moves

use crate::{numeric::nimber::Nimber, transposition_table::GrundyTable};
use std::hash::Hash;

/// Impartial game
pub trait ImpartialGame: Sized {
    /// Get a list of moves from the position
    fn moves(&self) -> Vec<Self>;

    /// Calculate the Nim value of the position
    fn nim_value(&self) -> Nimber {
        let moves = self.moves();
        let mut game_moves = Vec::with_capacity(moves.len());
        for m in moves {
            game_moves.push(m.nim_value());
        }
        Nimber::mex(game_moves)
    }

    /// Calculate the Nim value of the position, reusing values already stored in the table
    fn nim_value_cached(&self, table: &GrundyTable<Self>) -> Nimber
    where
        Self: Clone + Eq + Hash,
    {
        if let Some(known) = table.lookup_position(self) {
            return known;
        }

        let moves = self.moves();
        let mut game_moves = Vec::with_capacity(moves.len());
        for m in moves {
            game_moves.push(m.nim_value_cached(table));
        }
        let value = Nimber::mex(game_moves);
        table.insert_position(self.clone(), value);
        value
    }
}
