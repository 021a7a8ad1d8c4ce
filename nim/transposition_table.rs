//! Thread safe transposition table for Grundy values

use crate::numeric::nimber::Nimber;
use dashmap::DashMap;
use std::{fmt::Debug, hash::Hash};

/// Cache of game positions and their Grundy values.
pub struct GrundyTable<G> {
    positions: DashMap<G, Nimber, ahash::RandomState>,
}

impl<G> GrundyTable<G>
where
    G: Eq + Hash,
{
    /// Create new empty transposition table.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get number of saved positions
    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Check if table stores any position
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Lookup a position value if exists
    #[inline]
    pub fn lookup_position(&self, position: &G) -> Option<Nimber> {
        self.positions.get(position).map(|entry| *entry.value())
    }

    /// Save position and its Grundy value
    #[inline]
    pub fn insert_position(&self, position: G, value: Nimber) {
        self.positions.insert(position, value);
    }
}

impl<G> Debug for GrundyTable<G>
where
    G: Debug + Hash + Eq,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GrundyTable")
            .field("positions", &self.positions)
            .finish()
    }
}

impl<G> Default for GrundyTable<G>
where
    G: Hash + Eq,
{
    #[inline]
    fn default() -> Self {
        Self {
            positions: DashMap::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_lookup() {
        let table = GrundyTable::new();
        assert!(table.is_empty());
        assert_eq!(table.lookup_position(&7u32), None);

        table.insert_position(7u32, Nimber::new(3));
        table.insert_position(7u32, Nimber::new(3));
        assert_eq!(table.len(), 1);
        assert_eq!(table.lookup_position(&7), Some(Nimber::new(3)));
    }
}
