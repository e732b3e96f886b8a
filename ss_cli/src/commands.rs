use sportstacker::{MatchKey, PlayerId};
use std::{fmt, path::PathBuf};

/// Operator commands understood by the console.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List groups with player counts.
    Groups,
    /// Switch to another group.
    Select(GroupSelector),
    /// Print the current bracket.
    Show,
    /// Record a winner.
    Win { key: MatchKey, pick: WinnerPick },
    /// Undo a recorded winner.
    Reset(MatchKey),
    /// Discard progress and draw again.
    Reseed,
    /// Write the current session to a file.
    Save(PathBuf),
    /// Resume a session from a file.
    Load(PathBuf),
    Help,
    Quit,
}

/// Group chosen by list position (1-based) or by key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupSelector {
    Position(usize),
    Key(String),
}

/// Winner chosen by side (1 or 2) or by player id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WinnerPick {
    Side(u8),
    Player(PlayerId),
}

/// Errors that can occur during command parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Round or match number is missing or not a positive integer.
    InvalidMatchNumber(String),
    /// Win command without a winner.
    WinMissingPlayer,
    /// Command needs an argument that was not given.
    MissingArgument(&'static str),
    /// Unrecognized command.
    UnrecognizedCommand(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidMatchNumber(value) => write!(
                f,
                "Invalid round or match number '{}'. Use the numbers shown in the bracket (e.g., 'win 1 2 1')",
                value
            ),
            Self::WinMissingPlayer => {
                write!(f, "Win requires a side or player id (e.g., 'win 1 2 1')")
            }
            Self::MissingArgument(usage) => write!(f, "Missing argument. Usage: {}", usage),
            Self::UnrecognizedCommand(cmd) => write!(
                f,
                "Unrecognized command '{}'. Type 'help' to see available commands",
                cmd
            ),
        }
    }
}

impl std::error::Error for ParseError {}

/// Parse a console line into a Command.
///
/// Round and match numbers are 1-based, as printed by `show`.
///
/// # Examples
///
/// ```
/// use ss_cli::commands::{parse_command, Command, WinnerPick};
/// use sportstacker::MatchKey;
///
/// assert_eq!(parse_command("show"), Ok(Command::Show));
/// assert_eq!(
///     parse_command("win 1 2 1"),
///     Ok(Command::Win { key: MatchKey::new(0, 1), pick: WinnerPick::Side(1) })
/// );
/// assert_eq!(parse_command("reset 2 1"), Ok(Command::Reset(MatchKey::new(1, 0))));
/// ```
pub fn parse_command(input: &str) -> Result<Command, ParseError> {
    let trimmed = input.trim();

    // Try single-word commands first
    match trimmed {
        "groups" => return Ok(Command::Groups),
        "show" | "" => return Ok(Command::Show),
        "reseed" | "regenerate" => return Ok(Command::Reseed),
        "help" | "?" => return Ok(Command::Help),
        "quit" | "exit" => return Ok(Command::Quit),
        _ => {}
    }

    let parts: Vec<&str> = trimmed.split_ascii_whitespace().collect();
    match parts.first() {
        Some(&"group") => parse_group_command(&parts),
        Some(&"win") => parse_win_command(&parts),
        Some(&"reset") => parse_match_key(&parts, "reset ROUND MATCH").map(Command::Reset),
        Some(&"save") => parse_path(&parts, "save FILE").map(Command::Save),
        Some(&"load") => parse_path(&parts, "load FILE").map(Command::Load),
        _ => Err(ParseError::UnrecognizedCommand(trimmed.to_string())),
    }
}

/// Parse "group N" or "group KEY" (keys may contain spaces)
fn parse_group_command(parts: &[&str]) -> Result<Command, ParseError> {
    if parts.len() < 2 {
        return Err(ParseError::MissingArgument("group NUMBER|KEY"));
    }

    let selector = match &parts[1..] {
        [single] => match single.parse::<usize>() {
            Ok(position) => GroupSelector::Position(position),
            Err(_) => GroupSelector::Key(single.to_string()),
        },
        words => GroupSelector::Key(words.join(" ")),
    };

    Ok(Command::Select(selector))
}

/// Parse "win ROUND MATCH 1|2|PLAYER_ID"
fn parse_win_command(parts: &[&str]) -> Result<Command, ParseError> {
    let key = parse_match_key(parts, "win ROUND MATCH 1|2|PLAYER_ID")?;

    let pick = match parts.get(3) {
        Some(&"1") => WinnerPick::Side(1),
        Some(&"2") => WinnerPick::Side(2),
        Some(id) => WinnerPick::Player(PlayerId::new(*id)),
        None => return Err(ParseError::WinMissingPlayer),
    };

    Ok(Command::Win { key, pick })
}

/// Convert displayed 1-based round/match numbers into a match key
fn parse_match_key(parts: &[&str], usage: &'static str) -> Result<MatchKey, ParseError> {
    let (Some(round), Some(index)) = (parts.get(1), parts.get(2)) else {
        return Err(ParseError::MissingArgument(usage));
    };

    Ok(MatchKey::new(one_based(round)?, one_based(index)?))
}

fn one_based(value: &str) -> Result<usize, ParseError> {
    match value.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n - 1),
        _ => Err(ParseError::InvalidMatchNumber(value.to_string())),
    }
}

fn parse_path(parts: &[&str], usage: &'static str) -> Result<PathBuf, ParseError> {
    parts
        .get(1)
        .map(PathBuf::from)
        .ok_or(ParseError::MissingArgument(usage))
}

#[cfg(test)]
mod tests {
    use super::*;

    // === Single-word command tests ===

    #[test]
    fn test_parse_single_words() {
        assert_eq!(parse_command("groups"), Ok(Command::Groups));
        assert_eq!(parse_command("show"), Ok(Command::Show));
        assert_eq!(parse_command("  "), Ok(Command::Show));
        assert_eq!(parse_command("reseed"), Ok(Command::Reseed));
        assert_eq!(parse_command("regenerate"), Ok(Command::Reseed));
        assert_eq!(parse_command("help"), Ok(Command::Help));
        assert_eq!(parse_command("quit"), Ok(Command::Quit));
    }

    // === Group command tests ===

    #[test]
    fn test_parse_group_by_position() {
        assert_eq!(
            parse_command("group 2"),
            Ok(Command::Select(GroupSelector::Position(2)))
        );
    }

    #[test]
    fn test_parse_group_by_key_with_spaces() {
        assert_eq!(
            parse_command("group Girls-Open-No Weight"),
            Ok(Command::Select(GroupSelector::Key(
                "Girls-Open-No Weight".to_string()
            )))
        );
    }

    #[test]
    fn test_parse_group_missing_argument() {
        assert!(matches!(
            parse_command("group"),
            Err(ParseError::MissingArgument(_))
        ));
    }

    // === Win / reset command tests ===

    #[test]
    fn test_parse_win_by_side() {
        assert_eq!(
            parse_command("win 2 1 2"),
            Ok(Command::Win {
                key: MatchKey::new(1, 0),
                pick: WinnerPick::Side(2),
            })
        );
    }

    #[test]
    fn test_parse_win_by_player_id() {
        assert_eq!(
            parse_command("win 1 1 cm1xyz"),
            Ok(Command::Win {
                key: MatchKey::new(0, 0),
                pick: WinnerPick::Player(PlayerId::new("cm1xyz")),
            })
        );
    }

    #[test]
    fn test_parse_win_missing_player() {
        assert_eq!(parse_command("win 1 1"), Err(ParseError::WinMissingPlayer));
    }

    #[test]
    fn test_parse_zero_is_not_a_match_number() {
        assert_eq!(
            parse_command("reset 0 1"),
            Err(ParseError::InvalidMatchNumber("0".to_string()))
        );
        assert_eq!(
            parse_command("win 1 x 1"),
            Err(ParseError::InvalidMatchNumber("x".to_string()))
        );
    }

    #[test]
    fn test_parse_reset() {
        assert_eq!(
            parse_command("reset 3 1"),
            Ok(Command::Reset(MatchKey::new(2, 0)))
        );
        assert!(matches!(
            parse_command("reset 3"),
            Err(ParseError::MissingArgument(_))
        ));
    }

    // === Save / load command tests ===

    #[test]
    fn test_parse_save_and_load() {
        assert_eq!(
            parse_command("save bracket.json"),
            Ok(Command::Save(PathBuf::from("bracket.json")))
        );
        assert_eq!(
            parse_command("load bracket.json"),
            Ok(Command::Load(PathBuf::from("bracket.json")))
        );
        assert!(parse_command("save").is_err());
    }

    #[test]
    fn test_unrecognized_command() {
        let err = parse_command("dance").unwrap_err();
        assert_eq!(err, ParseError::UnrecognizedCommand("dance".to_string()));
        assert!(err.to_string().contains("help"));
    }
}
