//! Text views of groups and brackets.

use sportstacker::{Bracket, Group, Match, Occupant, Outcome};
use std::fmt;

const EMPTY_ROSTER: &str = "No players registered yet.";

/// Numbered group list with player counts
pub struct GroupList<'a> {
    pub groups: &'a [Group],
    pub selected: Option<&'a str>,
}

impl fmt::Display for GroupList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.groups.is_empty() {
            return writeln!(f, "{EMPTY_ROSTER}");
        }

        writeln!(f, "Groups:")?;
        for (i, group) in self.groups.iter().enumerate() {
            let marker = if self.selected == Some(group.key.as_str()) {
                " *"
            } else {
                ""
            };
            writeln!(f, "  {}. {}{}", i + 1, group, marker)?;
        }
        Ok(())
    }
}

/// Full bracket with round and match numbers as the operator types them
pub struct BracketView<'a>(pub &'a Bracket);

impl fmt::Display for BracketView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bracket = self.0;
        writeln!(
            f,
            "{} ({} players, {} slots)",
            bracket.group_key,
            bracket.draw.player_count(),
            bracket.slot_count()
        )?;

        if bracket.rounds.is_empty() {
            return match bracket.champion() {
                Some(player) => writeln!(f, "Only one player registered: {} wins by default", player.name),
                None => writeln!(f, "{EMPTY_ROSTER}"),
            };
        }

        for round in &bracket.rounds {
            if round.is_final() {
                writeln!(f, "Round {} (Final)", round.index + 1)?;
            } else {
                writeln!(f, "Round {}", round.index + 1)?;
            }
            for m in &round.matches {
                writeln!(f, "  {}", MatchLine(m))?;
            }
        }

        if let Some(champion) = bracket.champion() {
            writeln!(f, "Champion: {}", champion.name)?;
        }
        Ok(())
    }
}

/// One match: both sides, their marks and whether a result is expected
struct MatchLine<'a>(&'a Match);

impl fmt::Display for MatchLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = self.0;
        write!(
            f,
            "Match {}: {}{} vs {}{}",
            m.key.index + 1,
            m.player1,
            side_mark(m, &m.player1),
            m.player2,
            side_mark(m, &m.player2)
        )?;

        match &m.outcome {
            Outcome::Walkover(_) => write!(f, " (walkover)"),
            Outcome::Pending if !m.selectable_winners().is_empty() => write!(f, " (open)"),
            _ => Ok(()),
        }
    }
}

fn side_mark(m: &Match, side: &Occupant) -> &'static str {
    match m.winner() {
        Some(winner) if m.can_reset() && side.id() == winner.id.as_str() => " [WINNER]",
        Some(_) if m.can_reset() => " [Eliminated]",
        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sportstacker::bracket::{ProgressionStore, build_bracket, pad_draw, record_winner};
    use sportstacker::{MatchKey, Player, PlayerId};

    fn players(names: &[&str]) -> Vec<Player> {
        names
            .iter()
            .map(|name| Player::new(*name, *name, "Boys", "Open"))
            .collect()
    }

    #[test]
    fn test_empty_group_list() {
        let view = GroupList {
            groups: &[],
            selected: None,
        };
        assert_eq!(view.to_string(), "No players registered yet.\n");
    }

    #[test]
    fn test_group_list_marks_selection() {
        let groups = vec![
            Group {
                key: "Boys-Open-No Weight".to_string(),
                players: players(&["A", "B"]),
            },
            Group {
                key: "Girls-Open-No Weight".to_string(),
                players: players(&["C"]),
            },
        ];
        let text = GroupList {
            groups: &groups,
            selected: Some("Girls-Open-No Weight"),
        }
        .to_string();

        assert!(text.contains("  1. Boys-Open-No Weight (2 players)\n"));
        assert!(text.contains("  2. Girls-Open-No Weight (1 players) *\n"));
    }

    #[test]
    fn test_bracket_view_uses_one_based_numbers() {
        let draw = pad_draw(players(&["A", "B", "C"]));
        let text = BracketView(&build_bracket("g", &draw, &ProgressionStore::new())).to_string();

        assert!(text.contains("Round 1\n"));
        assert!(text.contains("  Match 1: A vs B (open)\n"));
        assert!(text.contains("  Match 2: C vs BYE (walkover)\n"));
        assert!(text.contains("Round 2 (Final)\n"));
        assert!(text.contains("  Match 1: TBD vs C\n"));
        assert!(!text.contains("Champion"));
    }

    #[test]
    fn test_bracket_view_marks_winner_and_champion() {
        let draw = pad_draw(players(&["A", "B"]));
        let store = record_winner(
            &draw,
            &ProgressionStore::new(),
            MatchKey::new(0, 0),
            &PlayerId::new("B"),
        )
        .unwrap();
        let text = BracketView(&build_bracket("g", &draw, &store)).to_string();

        assert!(text.contains("Match 1: A [Eliminated] vs B [WINNER]"));
        assert!(text.contains("Champion: B\n"));
    }

    #[test]
    fn test_single_player_wins_by_default() {
        let draw = pad_draw(players(&["Solo"]));
        let text = BracketView(&build_bracket("g", &draw, &ProgressionStore::new())).to_string();
        assert!(text.contains("Solo wins by default"));
    }
}
