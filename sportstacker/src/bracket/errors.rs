//! Bracket engine error types.

use super::models::{MatchKey, PlayerId};
use thiserror::Error;

/// Bracket engine errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BracketError {
    /// Roster entry that cannot take part in a draw
    #[error("Invalid player {id:?}: {reason}")]
    InvalidPlayer { id: String, reason: String },

    /// Same id registered twice in one group
    #[error("Duplicate player id in group: {0}")]
    DuplicatePlayer(PlayerId),

    /// Match key outside the bracket
    #[error("Match not found: {0}")]
    UnknownMatch(MatchKey),

    /// One of the occupants is still undecided
    #[error("Match {0} is waiting on an earlier result")]
    MatchNotReady(MatchKey),

    /// Bye pairings resolve on their own
    #[error("Match {0} is a walkover and cannot be recorded")]
    WalkoverMatch(MatchKey),

    /// Chosen winner is a sentinel or not seated in the match
    #[error("Player {player} is not a selectable winner for match {key}")]
    InvalidWinner { key: MatchKey, player: PlayerId },

    /// Malformed `round<r>-match<m>` key
    #[error("Invalid match key: {0}")]
    InvalidMatchKey(String),

    /// Requested group does not exist in the roster
    #[error("Group not found: {0}")]
    GroupNotFound(String),

    /// Saved session does not fit the current roster
    #[error("Session snapshot does not match roster: {0}")]
    SnapshotMismatch(String),
}

impl BracketError {
    /// Get a message suitable for showing to the bracket operator
    ///
    /// Internal detail such as raw player ids is replaced with a short hint.
    pub fn client_message(&self) -> String {
        match self {
            BracketError::InvalidPlayer { .. } | BracketError::DuplicatePlayer(_) => {
                "Roster contains an invalid player entry".to_string()
            }
            BracketError::InvalidWinner { key, .. } => {
                format!("Pick one of the two players in match {key}")
            }
            _ => self.to_string(),
        }
    }
}

/// Result type for bracket operations
pub type BracketResult<T> = Result<T, BracketError>;
