//! Nim game engine.
//!
//! The library tracks a single game of standard Nim ([`game::Game`]): piles of objects,
//! whose turn it is and an undo history. Optimal play is derived from the Nim-sum of the
//! [position](crate::position::Position), and the Sprague-Grundy value of any position can be
//! verified by exhaustive search through [`impartial_game::ImpartialGame`].

#![warn(missing_docs)]

pub mod game;
pub mod impartial_game;
pub mod numeric;
pub mod player;
pub mod position;
pub mod transposition_table;

mod display;
