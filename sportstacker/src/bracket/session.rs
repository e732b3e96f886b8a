//! Bracket editing session for one group.

use super::builder::{build_bracket, record_winner, reset_match};
use super::errors::{BracketError, BracketResult};
use super::grouping::Group;
use super::models::{Bracket, Draw, MatchKey, Occupant, PlayerId};
use super::progression::ProgressionStore;
use super::seeding::{SeedPolicy, seed_group};
use crate::config::EngineConfig;
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Draw, reseed token and recorded winners for one group
///
/// The session owns no logic of its own: each method threads the store
/// through the engine functions in [`super::builder`] and keeps the result.
#[derive(Debug, Clone)]
pub struct BracketSession {
    group: Group,
    policy: SeedPolicy,
    token: u64,
    draw: Draw,
    store: ProgressionStore,
}

impl BracketSession {
    /// Seed a fresh session for `group`
    pub fn new(group: Group, config: &EngineConfig) -> BracketResult<Self> {
        let draw = seed_group(&group, &config.seed_policy.seeder(config.initial_token))?;

        Ok(Self {
            group,
            policy: config.seed_policy,
            token: config.initial_token,
            draw,
            store: ProgressionStore::new(),
        })
    }

    pub fn group(&self) -> &Group {
        &self.group
    }

    pub fn policy(&self) -> SeedPolicy {
        self.policy
    }

    pub fn token(&self) -> u64 {
        self.token
    }

    pub fn draw(&self) -> &Draw {
        &self.draw
    }

    pub fn store(&self) -> &ProgressionStore {
        &self.store
    }

    /// Rebuild the bracket from the current store
    pub fn bracket(&self) -> Bracket {
        build_bracket(&self.group.key, &self.draw, &self.store)
    }

    /// Record a winner and return the refreshed bracket
    pub fn record_winner(&mut self, key: MatchKey, winner: &PlayerId) -> BracketResult<Bracket> {
        self.store = record_winner(&self.draw, &self.store, key, winner)?;
        Ok(self.bracket())
    }

    /// Reset a match and return the refreshed bracket
    pub fn reset_match(&mut self, key: MatchKey) -> Bracket {
        self.store = reset_match(&self.draw, &self.store, key);
        self.bracket()
    }

    /// Discard all progress and draw again
    ///
    /// The token policy moves to the next token so the new draw is still
    /// reproducible; the random policy simply reshuffles.
    pub fn reseed(&mut self) -> BracketResult<Bracket> {
        let token = match self.policy {
            SeedPolicy::Token => self.token.wrapping_add(1),
            SeedPolicy::Random => self.token,
        };

        self.draw = seed_group(&self.group, &self.policy.seeder(token))?;
        self.token = token;
        self.store.clear();

        info!(
            "Reseeded {} with {} policy (token {})",
            self.group.key, self.policy, self.token
        );
        Ok(self.bracket())
    }

    /// Capture the session so it can be resumed later
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            group_key: self.group.key.clone(),
            policy: self.policy,
            token: self.token,
            draw: self
                .draw
                .slots()
                .iter()
                .map(|slot| PlayerId::new(slot.id()))
                .collect(),
            winners: self
                .store
                .entries()
                .into_iter()
                .map(|(key, player)| RecordedWinner {
                    key,
                    winner: player.id.clone(),
                })
                .collect(),
        }
    }

    /// Resume a session from a snapshot
    ///
    /// The saved draw must seat every player of `group` exactly once, and
    /// each saved winner is replayed through the normal validation.
    pub fn restore(group: Group, snapshot: &SessionSnapshot) -> BracketResult<Self> {
        if snapshot.group_key != group.key {
            return Err(BracketError::SnapshotMismatch(format!(
                "snapshot is for group {}, not {}",
                snapshot.group_key, group.key
            )));
        }

        let draw = restore_draw(&group, &snapshot.draw)?;

        let mut winners = snapshot.winners.clone();
        winners.sort_by_key(|entry| entry.key);

        let mut store = ProgressionStore::new();
        for entry in &winners {
            store = record_winner(&draw, &store, entry.key, &entry.winner)?;
        }

        info!(
            "Restored {} with {} recorded results",
            group.key,
            store.len()
        );

        Ok(Self {
            group,
            policy: snapshot.policy,
            token: snapshot.token,
            draw,
            store,
        })
    }
}

fn restore_draw(group: &Group, ids: &[PlayerId]) -> BracketResult<Draw> {
    let mismatch = |reason: String| BracketError::SnapshotMismatch(reason);

    let expected_len = match group.len() {
        0 => 0,
        n => n.next_power_of_two(),
    };
    if ids.len() != expected_len {
        return Err(mismatch(format!(
            "draw has {} slots, group needs {expected_len}",
            ids.len()
        )));
    }

    let mut by_id: HashMap<&PlayerId, _> = group.players.iter().map(|p| (&p.id, p)).collect();
    let mut slots = Vec::with_capacity(ids.len());
    for id in ids {
        let slot = if id.as_str() == Occupant::Bye.id() {
            Occupant::Bye
        } else {
            let player = by_id
                .remove(id)
                .ok_or_else(|| mismatch(format!("unknown or repeated player {id} in draw")))?;
            Occupant::Player(player.clone())
        };
        slots.push(slot);
    }

    if !by_id.is_empty() {
        return Err(mismatch(format!(
            "{} group players missing from draw",
            by_id.len()
        )));
    }

    // Byes only pad the tail
    if slots
        .iter()
        .skip_while(|slot| !slot.is_bye())
        .any(|slot| !slot.is_bye())
    {
        return Err(mismatch("player seated after a bye".to_string()));
    }

    Ok(Draw::from_slots(slots))
}

/// One saved result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordedWinner {
    pub key: MatchKey,
    pub winner: PlayerId,
}

/// Serializable state of a [`BracketSession`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub group_key: String,
    pub policy: SeedPolicy,
    pub token: u64,
    pub draw: Vec<PlayerId>,
    pub winners: Vec<RecordedWinner>,
}
