//! Single-elimination bracket engine.
//!
//! This module turns a flat roster into one bracket per competitive group:
//! - Grouping of players by gender, age category and weight class
//! - Seeding, either shuffled or derived from a reseed token
//! - Bye padding to the next power of two, with automatic walkovers
//! - Winner recording, match reset and full reseed
//!
//! The recorded winners ([`ProgressionStore`]) are the only state. Rounds
//! after the first are rebuilt from them on every call, so building twice
//! from the same store always gives the same bracket.
//!
//! ## Example
//!
//! ```
//! use sportstacker::bracket::{
//!     MatchKey, Player, ProgressionStore, SeedPolicy, build_bracket, group_players,
//!     record_winner, seed_group,
//! };
//!
//! let roster = vec![
//!     Player::new("p1", "Asha", "Girls", "U-14"),
//!     Player::new("p2", "Bea", "Girls", "U-14"),
//!     Player::new("p3", "Cleo", "Girls", "U-14"),
//! ];
//!
//! let groups = group_players(&roster);
//! let draw = seed_group(&groups[0], &SeedPolicy::Token.seeder(1)).unwrap();
//! let store = ProgressionStore::new();
//!
//! let bracket = build_bracket(&groups[0].key, &draw, &store);
//! assert_eq!(bracket.slot_count(), 4);
//!
//! // Pick whoever is seated first in the opening match
//! let opening = &bracket.rounds[0].matches[0];
//! let winner = opening.selectable_winners()[0].id.clone();
//! let store = record_winner(&draw, &store, MatchKey::new(0, 0), &winner).unwrap();
//!
//! let bracket = build_bracket(&groups[0].key, &draw, &store);
//! assert_eq!(bracket.rounds[1].matches[0].player1.id(), winner.as_str());
//! ```

pub mod builder;
pub mod errors;
pub mod grouping;
pub mod models;
pub mod progression;
pub mod seeding;
pub mod session;

pub use builder::{build_bracket, record_winner, reset_match};
pub use errors::{BracketError, BracketResult};
pub use grouping::{Group, NO_WEIGHT_LABEL, find_group, group_key, group_players};
pub use models::{
    BYE_ID, Bracket, Draw, Match, MatchKey, Occupant, Outcome, Player, PlayerId, Round, TBD_ID,
};
pub use progression::ProgressionStore;
pub use seeding::{DrawOrder, SeedPolicy, Seeder, ShuffleSeeder, TokenSeeder, pad_draw, seed_group};
pub use session::{BracketSession, RecordedWinner, SessionSnapshot};
