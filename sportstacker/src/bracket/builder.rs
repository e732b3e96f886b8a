//! Bracket construction and match progression.
//!
//! Every operation is a pure function of the draw and a progression store.
//! Mutating operations take the store by reference and hand back the new one,
//! so callers decide when state actually changes.

use super::errors::{BracketError, BracketResult};
use super::models::{Bracket, Draw, Match, MatchKey, Occupant, Outcome, PlayerId, Round};
use super::progression::ProgressionStore;
use log::{debug, info, warn};

/// Build every round of the bracket from the draw and recorded winners
///
/// Round 0 pairs consecutive draw slots. Each later match is fed by the two
/// matches at `2i` and `2i + 1` of the previous round. Construction stops at
/// the round with a single match. Empty and one-player draws have no rounds.
pub fn build_bracket(group_key: &str, draw: &Draw, store: &ProgressionStore) -> Bracket {
    let rounds = build_rounds(draw, store);
    debug!(
        "Built bracket for {group_key}: {} slots, {} rounds, {} recorded results",
        draw.len(),
        rounds.len(),
        store.len()
    );

    Bracket {
        group_key: group_key.to_string(),
        draw: draw.clone(),
        rounds,
    }
}

fn build_rounds(draw: &Draw, store: &ProgressionStore) -> Vec<Round> {
    let mut rounds: Vec<Round> = Vec::with_capacity(draw.round_count());
    let mut current: Vec<Occupant> = draw.slots().to_vec();

    while current.len() > 1 {
        let round = rounds.len();
        let matches: Vec<Match> = current
            .chunks_exact(2)
            .enumerate()
            .map(|(index, pair)| {
                resolve_match(
                    MatchKey::new(round, index),
                    pair[0].clone(),
                    pair[1].clone(),
                    store,
                )
            })
            .collect();

        current = matches.iter().map(Match::advancing).collect();
        rounds.push(Round {
            index: round,
            matches,
        });
    }

    rounds
}

fn resolve_match(
    key: MatchKey,
    player1: Occupant,
    player2: Occupant,
    store: &ProgressionStore,
) -> Match {
    let outcome = match (&player1, &player2) {
        // The bye's opponent is not known yet
        (Occupant::Bye, Occupant::Tbd) | (Occupant::Tbd, Occupant::Bye) => Outcome::Pending,
        (Occupant::Bye, other) | (other, Occupant::Bye) => Outcome::Walkover(other.clone()),
        _ => store
            .get(key)
            .map_or(Outcome::Pending, |winner| Outcome::Recorded(winner.clone())),
    };

    Match {
        key,
        player1,
        player2,
        outcome,
    }
}

/// Record the winner of a match
///
/// Replacing an earlier winner with a different player also clears every
/// result downstream of this match, since those were decided with the old
/// winner seated.
///
/// # Arguments
///
/// * `draw` - Seeded round-0 slots
/// * `store` - Current recorded winners
/// * `key` - Match to decide
/// * `winner` - Id of one of the two seated players
///
/// # Returns
///
/// * `BracketResult<ProgressionStore>` - Updated store
///
/// # Errors
///
/// Rejects unknown matches, matches still waiting on an upstream result,
/// walkovers, and winners that are not seated in the match.
pub fn record_winner(
    draw: &Draw,
    store: &ProgressionStore,
    key: MatchKey,
    winner: &PlayerId,
) -> BracketResult<ProgressionStore> {
    let rounds = build_rounds(draw, store);
    let target = rounds
        .get(key.round)
        .and_then(|round| round.matches.get(key.index))
        .ok_or(BracketError::UnknownMatch(key))?;

    if target.is_walkover() {
        return Err(BracketError::WalkoverMatch(key));
    }

    if target.player1.is_tbd() || target.player2.is_tbd() {
        return Err(BracketError::MatchNotReady(key));
    }

    let chosen = target.occupant(winner).ok_or_else(|| {
        warn!("Rejected winner {winner} for {key}: not seated in match");
        BracketError::InvalidWinner {
            key,
            player: winner.clone(),
        }
    })?;

    let mut next = store.clone();
    match next.set(key, chosen.clone()) {
        Some(previous) if previous.id != chosen.id => {
            let cleared = next.clear_downstream(key, rounds.len());
            info!(
                "Winner of {key} changed from {} to {}, cleared {cleared} later results",
                previous.id, chosen.id
            );
        }
        _ => info!("Recorded {} as winner of {key}", chosen.id),
    }

    Ok(next)
}

/// Undo the recorded result of a match
///
/// Every later result fed by this match is removed as well, so the match and
/// the path to the final fall back to placeholders. Resetting a match with no
/// recorded result leaves the store unchanged.
pub fn reset_match(draw: &Draw, store: &ProgressionStore, key: MatchKey) -> ProgressionStore {
    let mut next = store.clone();

    match next.remove(key) {
        Some(previous) => {
            let cleared = next.clear_downstream(key, draw.round_count());
            info!("Reset {key} (was {}), cleared {cleared} later results", previous.id);
        }
        None => debug!("Reset of {key} ignored: no recorded result"),
    }

    next
}
