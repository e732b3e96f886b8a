//! Bracket data models: players, sentinels, matches, rounds and draws.

use super::errors::BracketError;
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use std::{fmt, str::FromStr};

/// Reserved id of the bye placeholder
pub const BYE_ID: &str = "bye";
/// Reserved id of the undecided placeholder
pub const TBD_ID: &str = "tbd";

const BYE_NAME: &str = "BYE";
const TBD_NAME: &str = "TBD";

/// Player identity as issued by the registration subsystem
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this id collides with a sentinel id
    pub fn is_reserved(&self) -> bool {
        self.0 == BYE_ID || self.0 == TBD_ID
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for PlayerId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Registered competitor
///
/// Field names follow the registration export (`ageCategory`, `weightClass`)
/// so a roster can be deserialized as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub gender: String,
    pub age_category: String,
    #[serde(default)]
    pub weight_class: Option<String>,
    #[serde(default)]
    pub belt: Option<String>,
}

impl Player {
    /// Create a player without weight class or belt
    pub fn new(
        id: impl Into<PlayerId>,
        name: impl Into<String>,
        gender: impl Into<String>,
        age_category: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            gender: gender.into(),
            age_category: age_category.into(),
            weight_class: None,
            belt: None,
        }
    }

    pub fn with_weight_class(mut self, weight_class: impl Into<String>) -> Self {
        self.weight_class = Some(weight_class.into());
        self
    }

    pub fn with_belt(mut self, belt: impl Into<String>) -> Self {
        self.belt = Some(belt.into());
        self
    }

    /// Check that the record can be placed in a draw
    pub fn validate(&self) -> Result<(), BracketError> {
        let reason = if self.id.as_str().trim().is_empty() {
            "missing id"
        } else if self.id.is_reserved() {
            "id is reserved for bracket placeholders"
        } else if self.name.trim().is_empty() {
            "missing name"
        } else {
            return Ok(());
        };

        Err(BracketError::InvalidPlayer {
            id: self.id.to_string(),
            reason: reason.to_string(),
        })
    }
}

/// Whatever sits in one side of a match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "player", rename_all = "lowercase")]
pub enum Occupant {
    Player(Player),
    /// Padding slot, the opponent advances automatically
    Bye,
    /// Winner of an undecided upstream match
    Tbd,
}

impl Occupant {
    /// Player id, or the reserved sentinel id
    pub fn id(&self) -> &str {
        match self {
            Occupant::Player(player) => player.id.as_str(),
            Occupant::Bye => BYE_ID,
            Occupant::Tbd => TBD_ID,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Occupant::Player(player) => &player.name,
            Occupant::Bye => BYE_NAME,
            Occupant::Tbd => TBD_NAME,
        }
    }

    pub fn as_player(&self) -> Option<&Player> {
        match self {
            Occupant::Player(player) => Some(player),
            _ => None,
        }
    }

    /// Only real players may ever be picked as winners
    pub fn is_selectable(&self) -> bool {
        matches!(self, Occupant::Player(_))
    }

    pub fn is_bye(&self) -> bool {
        matches!(self, Occupant::Bye)
    }

    pub fn is_tbd(&self) -> bool {
        matches!(self, Occupant::Tbd)
    }
}

impl From<Player> for Occupant {
    fn from(player: Player) -> Self {
        Occupant::Player(player)
    }
}

impl fmt::Display for Occupant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Stable address of a match: round index and match index within the round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MatchKey {
    pub round: usize,
    pub index: usize,
}

impl MatchKey {
    pub fn new(round: usize, index: usize) -> Self {
        Self { round, index }
    }

    /// Match in the next round that this match's winner advances to
    pub fn next(&self) -> MatchKey {
        MatchKey::new(self.round + 1, self.index / 2)
    }

    /// Every match this one feeds, up to and including the final
    ///
    /// `round_count` is the total number of rounds in the bracket.
    pub fn downstream(self, round_count: usize) -> impl Iterator<Item = MatchKey> {
        std::iter::successors(Some(self.next()), |key| Some(key.next()))
            .take_while(move |key| key.round < round_count)
    }
}

impl fmt::Display for MatchKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "round{}-match{}", self.round, self.index)
    }
}

impl FromStr for MatchKey {
    type Err = BracketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || BracketError::InvalidMatchKey(s.to_string());

        let (round, index) = s
            .strip_prefix("round")
            .and_then(|rest| rest.split_once("-match"))
            .ok_or_else(invalid)?;

        Ok(MatchKey::new(
            round.parse().map_err(|_| invalid())?,
            index.parse().map_err(|_| invalid())?,
        ))
    }
}

impl Serialize for MatchKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MatchKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

/// Resolution state of a match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "winner", rename_all = "snake_case")]
pub enum Outcome {
    /// Waiting for a result or for an upstream match
    Pending,
    /// Winner chosen by the operator
    Recorded(Player),
    /// Paired against a bye; the other side advances without a result
    Walkover(Occupant),
}

/// A single pairing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    pub key: MatchKey,
    pub player1: Occupant,
    pub player2: Occupant,
    pub outcome: Outcome,
}

impl Match {
    /// Real player who won, by result or walkover
    pub fn winner(&self) -> Option<&Player> {
        match &self.outcome {
            Outcome::Recorded(player) => Some(player),
            Outcome::Walkover(occupant) => occupant.as_player(),
            Outcome::Pending => None,
        }
    }

    /// Side that was knocked out by a recorded result
    pub fn loser(&self) -> Option<&Occupant> {
        let Outcome::Recorded(winner) = &self.outcome else {
            return None;
        };

        if self.player1.id() == winner.id.as_str() {
            Some(&self.player2)
        } else {
            Some(&self.player1)
        }
    }

    /// What moves on to the next round
    pub fn advancing(&self) -> Occupant {
        match &self.outcome {
            Outcome::Recorded(player) => Occupant::Player(player.clone()),
            Outcome::Walkover(occupant) => occupant.clone(),
            Outcome::Pending => Occupant::Tbd,
        }
    }

    pub fn is_decided(&self) -> bool {
        !matches!(self.outcome, Outcome::Pending)
    }

    pub fn is_walkover(&self) -> bool {
        matches!(self.outcome, Outcome::Walkover(_))
    }

    /// Only recorded results can be undone
    pub fn can_reset(&self) -> bool {
        matches!(self.outcome, Outcome::Recorded(_))
    }

    /// Players the operator may currently pick as winner
    ///
    /// Empty once the match is decided, or while either side is a placeholder.
    pub fn selectable_winners(&self) -> Vec<&Player> {
        if self.is_decided() {
            return Vec::new();
        }

        match (self.player1.as_player(), self.player2.as_player()) {
            (Some(p1), Some(p2)) => vec![p1, p2],
            _ => Vec::new(),
        }
    }

    /// Find the seated player with the given id
    pub fn occupant(&self, id: &PlayerId) -> Option<&Player> {
        [&self.player1, &self.player2]
            .into_iter()
            .filter_map(Occupant::as_player)
            .find(|player| &player.id == id)
    }
}

/// All matches played at one stage of the bracket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    pub index: usize,
    pub matches: Vec<Match>,
}

impl Round {
    pub fn is_final(&self) -> bool {
        self.matches.len() == 1
    }

    pub fn is_complete(&self) -> bool {
        self.matches.iter().all(Match::is_decided)
    }
}

/// Seeded round-0 slots, padded with byes to a power of two
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Draw {
    slots: Vec<Occupant>,
}

impl Draw {
    pub(crate) fn from_slots(slots: Vec<Occupant>) -> Self {
        Self { slots }
    }

    pub fn slots(&self) -> &[Occupant] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Real players in draw order
    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.slots.iter().filter_map(Occupant::as_player)
    }

    pub fn player_count(&self) -> usize {
        self.players().count()
    }

    pub fn bye_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_bye()).count()
    }

    /// Number of rounds needed to reduce the draw to one champion
    pub fn round_count(&self) -> usize {
        match self.slots.len() {
            0 | 1 => 0,
            n => n.next_power_of_two().trailing_zeros() as usize,
        }
    }
}

/// Full single-elimination bracket for one group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bracket {
    pub group_key: String,
    pub draw: Draw,
    pub rounds: Vec<Round>,
}

impl Bracket {
    /// Group champion, if decided
    ///
    /// A one-player group has no matches and its only player wins outright.
    pub fn champion(&self) -> Option<&Player> {
        match self.rounds.last() {
            Some(final_round) => final_round.matches.first().and_then(Match::winner),
            None if self.draw.len() == 1 => self.draw.players().next(),
            None => None,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.champion().is_some()
    }

    pub fn match_at(&self, key: MatchKey) -> Option<&Match> {
        self.rounds
            .get(key.round)
            .and_then(|round| round.matches.get(key.index))
    }

    pub fn slot_count(&self) -> usize {
        self.draw.len()
    }

    pub fn match_count(&self) -> usize {
        self.rounds.iter().map(|round| round.matches.len()).sum()
    }
}
