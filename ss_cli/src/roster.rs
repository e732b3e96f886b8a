//! Roster loading.
//!
//! The roster is the registration export: a JSON array of player records
//! using the registration field names (`ageCategory`, `weightClass`).

use anyhow::{Context, Result};
use sportstacker::Player;
use std::{fs, path::Path};

/// Read and validate a roster file
///
/// An empty array is a valid roster. Any record that cannot be seated in a
/// draw (missing id or name, reserved id) rejects the whole file.
pub fn load_roster(path: &Path) -> Result<Vec<Player>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read roster {}", path.display()))?;

    parse_roster(&raw).with_context(|| format!("Invalid roster {}", path.display()))
}

/// Parse roster JSON
pub fn parse_roster(raw: &str) -> Result<Vec<Player>> {
    let players: Vec<Player> = serde_json::from_str(raw).context("Roster is not a JSON player list")?;

    for (position, player) in players.iter().enumerate() {
        player
            .validate()
            .with_context(|| format!("Roster entry {}", position + 1))?;
    }

    tracing::debug!("Parsed roster with {} players", players.len());
    Ok(players)
}
