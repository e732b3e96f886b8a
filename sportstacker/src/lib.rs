//! # Sportstacker
//!
//! Bracket engine for combat-sport tournaments.
//!
//! Players registered for a tournament are split into competitive groups
//! (gender, age category, weight class) and each group gets its own
//! single-elimination bracket. The engine is synchronous and performs no
//! I/O: callers hand it a roster and get back rounds ready for display.
//!
//! ## Core Modules
//!
//! - [`bracket`]: Grouping, seeding, bracket building and match progression
//! - [`config`]: Seeding configuration for new sessions
//!
//! ## Example
//!
//! ```
//! use sportstacker::{BracketSession, EngineConfig, group_players, Player};
//!
//! let roster = vec![
//!     Player::new("p1", "Arjun", "Boys", "U-19").with_weight_class("60kg"),
//!     Player::new("p2", "Dev", "Boys", "U-19").with_weight_class("60kg"),
//! ];
//!
//! let group = group_players(&roster).remove(0);
//! let session = BracketSession::new(group, &EngineConfig::default()).unwrap();
//! assert_eq!(session.bracket().rounds.len(), 1);
//! ```

/// Single-elimination bracket engine.
pub mod bracket;
pub use bracket::{
    Bracket, BracketError, BracketResult, BracketSession, Group, Match, MatchKey, Occupant,
    Outcome, Player, PlayerId, ProgressionStore, Round, SeedPolicy, group_players,
};

/// Engine configuration.
pub mod config;
pub use config::EngineConfig;
