//! Progression store: recorded match winners.
//!
//! The store is the only mutable state of the engine. Rounds after the first
//! are always recomputed from it, never cached.

use super::models::{MatchKey, Player};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Mapping from match key to the recorded winner
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProgressionStore {
    winners: HashMap<MatchKey, Player>,
}

impl ProgressionStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: MatchKey) -> Option<&Player> {
        self.winners.get(&key)
    }

    pub fn contains(&self, key: MatchKey) -> bool {
        self.winners.contains_key(&key)
    }

    /// Record a winner, returning the one it replaced
    pub fn set(&mut self, key: MatchKey, winner: Player) -> Option<Player> {
        self.winners.insert(key, winner)
    }

    /// Remove a single entry
    pub fn remove(&mut self, key: MatchKey) -> Option<Player> {
        self.winners.remove(&key)
    }

    /// Remove every entry fed by `key`, leaving `key` itself in place
    ///
    /// # Returns
    ///
    /// * `usize` - Number of entries removed
    pub fn clear_downstream(&mut self, key: MatchKey, round_count: usize) -> usize {
        key.downstream(round_count)
            .filter(|next| self.winners.remove(next).is_some())
            .count()
    }

    /// Drop all recorded progress
    pub fn clear(&mut self) {
        self.winners.clear();
    }

    pub fn len(&self) -> usize {
        self.winners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.winners.is_empty()
    }

    /// Entries ordered by round, then match
    pub fn entries(&self) -> Vec<(MatchKey, &Player)> {
        let mut entries: Vec<_> = self.winners.iter().map(|(key, p)| (*key, p)).collect();
        entries.sort_by_key(|(key, _)| *key);
        entries
    }
}
