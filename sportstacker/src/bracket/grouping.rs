//! Partitioning of a roster into competitive groups.

use super::errors::{BracketError, BracketResult};
use super::models::Player;
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, fmt};

/// Label used in the group key when a player has no weight class
pub const NO_WEIGHT_LABEL: &str = "No Weight";

/// Players sharing gender, age category and weight class
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub key: String,
    pub players: Vec<Player>,
}

impl Group {
    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} players)", self.key, self.players.len())
    }
}

/// Build the `gender-ageCategory-weightClass` key for a player
///
/// A blank weight class counts as missing.
pub fn group_key(player: &Player) -> String {
    let weight = player
        .weight_class
        .as_deref()
        .filter(|weight| !weight.is_empty())
        .unwrap_or(NO_WEIGHT_LABEL);

    format!("{}-{}-{}", player.gender, player.age_category, weight)
}

/// Split a roster into groups
///
/// Groups, and players within each group, keep the order in which they
/// first appear in the roster.
pub fn group_players(roster: &[Player]) -> Vec<Group> {
    let mut groups: Vec<Group> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for player in roster {
        let key = group_key(player);
        match positions.get(&key) {
            Some(&idx) => groups[idx].players.push(player.clone()),
            None => {
                positions.insert(key.clone(), groups.len());
                groups.push(Group {
                    key,
                    players: vec![player.clone()],
                });
            }
        }
    }

    groups
}

/// Look up a group by key
pub fn find_group<'a>(groups: &'a [Group], key: &str) -> BracketResult<&'a Group> {
    groups
        .iter()
        .find(|group| group.key == key)
        .ok_or_else(|| BracketError::GroupNotFound(key.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(id: &str, gender: &str, age: &str, weight: Option<&str>) -> Player {
        let player = Player::new(id, id, gender, age);
        match weight {
            Some(w) => player.with_weight_class(w),
            None => player,
        }
    }

    #[test]
    fn test_group_key_format() {
        let p = player("a", "Boys", "U-14", Some("45kg"));
        assert_eq!(group_key(&p), "Boys-U-14-45kg");

        let p = player("b", "Girls", "Open", None);
        assert_eq!(group_key(&p), "Girls-Open-No Weight");

        let p = player("c", "Girls", "Open", Some(""));
        assert_eq!(group_key(&p), "Girls-Open-No Weight");
    }

    #[test]
    fn test_empty_roster_yields_no_groups() {
        assert!(group_players(&[]).is_empty());
    }

    #[test]
    fn test_groups_keep_first_seen_order() {
        let roster = vec![
            player("1", "Girls", "U-19", None),
            player("2", "Boys", "U-14", Some("45kg")),
            player("3", "Girls", "U-19", None),
            player("4", "Boys", "Open", None),
            player("5", "Boys", "U-14", Some("45kg")),
        ];

        let groups = group_players(&roster);
        let keys: Vec<_> = groups.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(
            keys,
            vec!["Girls-U-19-No Weight", "Boys-U-14-45kg", "Boys-Open-No Weight"]
        );

        let ids: Vec<_> = groups[1].players.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "5"]);
        assert_eq!(groups.iter().map(Group::len).sum::<usize>(), roster.len());
    }

    #[test]
    fn test_find_group() {
        let groups = group_players(&[player("1", "Boys", "Open", None)]);
        assert!(find_group(&groups, "Boys-Open-No Weight").is_ok());
        assert_eq!(
            find_group(&groups, "Girls-Open-No Weight"),
            Err(BracketError::GroupNotFound("Girls-Open-No Weight".to_string()))
        );
    }

    #[test]
    fn test_group_display_shows_count() {
        let groups = group_players(&[
            player("1", "Boys", "Open", None),
            player("2", "Boys", "Open", None),
        ]);
        assert_eq!(groups[0].to_string(), "Boys-Open-No Weight (2 players)");
    }
}
