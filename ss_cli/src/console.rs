//! Operator console: one bracket session per group, driven by parsed commands.

use crate::commands::{Command, GroupSelector, WinnerPick};
use crate::logging::{log_bracket_event, log_rejected_action};
use crate::render::{BracketView, GroupList};
use anyhow::{Context, Result};
use sportstacker::bracket::{SessionSnapshot, find_group};
use sportstacker::{
    BracketError, BracketSession, EngineConfig, Group, Match, MatchKey, Player, PlayerId,
    group_players,
};
use std::collections::{HashMap, hash_map::Entry};
use std::{fs, path::Path};

const NO_PLAYERS: &str = "No players registered yet.";

pub const COMMANDS_HELP: &str = "\
Commands:
  groups                        List groups with player counts
  group NUMBER|KEY              Switch to another group
  show                          Print the current bracket
  win ROUND MATCH 1|2|PLAYER_ID Record the winner of a match
  reset ROUND MATCH             Undo a result and everything it fed
  reseed                        Regenerate the draw (clears all results)
  save FILE                     Save the current group's bracket
  load FILE                     Resume a saved bracket
  help                          Show this help
  quit                          Leave the console
";

/// Result of handling one command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Output(String),
    Quit,
}

/// Interactive bracket editor over a loaded roster
///
/// Sessions are created the first time a group is shown, so switching
/// between groups keeps each group's draw and results.
pub struct Console {
    groups: Vec<Group>,
    sessions: HashMap<String, BracketSession>,
    selected: Option<String>,
    engine: EngineConfig,
}

impl Console {
    /// Group the roster and select `group`, or the first group if unset
    pub fn new(roster: &[Player], engine: EngineConfig, group: Option<&str>) -> Result<Self> {
        let groups = group_players(roster);

        let selected = match group {
            Some(key) => Some(find_group(&groups, key)?.key.clone()),
            None => groups.first().map(|g| g.key.clone()),
        };

        tracing::info!(
            groups = groups.len(),
            players = roster.len(),
            "Console ready"
        );

        Ok(Self {
            groups,
            sessions: HashMap::new(),
            selected,
            engine,
        })
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn selected_group(&self) -> Option<&Group> {
        let key = self.selected.as_deref()?;
        self.groups.iter().find(|g| g.key == key)
    }

    /// Session of the selected group, if one has been opened
    pub fn session(&self) -> Option<&BracketSession> {
        self.selected.as_ref().and_then(|key| self.sessions.get(key))
    }

    /// Handle a command
    ///
    /// Rejections from the bracket engine become operator messages. Other
    /// failures (file I/O, malformed saves) are returned as errors.
    pub fn handle(&mut self, command: Command) -> Result<Reply> {
        let action = action_name(&command);

        match self.dispatch(command) {
            Err(err) => match err.downcast_ref::<BracketError>() {
                Some(engine_err) => {
                    let group = self.selected.as_deref().unwrap_or("-");
                    log_rejected_action(action, group, &engine_err.to_string());
                    Ok(Reply::Output(engine_err.client_message()))
                }
                None => Err(err),
            },
            reply => reply,
        }
    }

    fn dispatch(&mut self, command: Command) -> Result<Reply> {
        match command {
            Command::Groups => Ok(output(GroupList {
                groups: &self.groups,
                selected: self.selected.as_deref(),
            })),
            Command::Select(selector) => self.select(selector),
            Command::Show => self.show(),
            Command::Win { key, pick } => self.record(key, pick),
            Command::Reset(key) => self.reset(key),
            Command::Reseed => self.reseed(),
            Command::Save(path) => self.save(&path),
            Command::Load(path) => self.load(&path),
            Command::Help => Ok(Reply::Output(COMMANDS_HELP.to_string())),
            Command::Quit => Ok(Reply::Quit),
        }
    }

    fn select(&mut self, selector: GroupSelector) -> Result<Reply> {
        let key = match selector {
            GroupSelector::Position(position) => {
                match position.checked_sub(1).and_then(|i| self.groups.get(i)) {
                    Some(group) => group.key.clone(),
                    None if self.groups.is_empty() => return Ok(text(NO_PLAYERS)),
                    None => {
                        return Ok(Reply::Output(format!(
                            "No group {position}. Choose 1-{}",
                            self.groups.len()
                        )));
                    }
                }
            }
            GroupSelector::Key(key) => find_group(&self.groups, &key)?.key.clone(),
        };

        self.selected = Some(key);
        self.show()
    }

    fn show(&mut self) -> Result<Reply> {
        match self.session_mut()? {
            Some(session) => Ok(output(BracketView(&session.bracket()))),
            None => Ok(text(NO_PLAYERS)),
        }
    }

    fn record(&mut self, key: MatchKey, pick: WinnerPick) -> Result<Reply> {
        let Some(session) = self.session_mut()? else {
            return Ok(text(NO_PLAYERS));
        };

        let winner = match pick {
            WinnerPick::Player(id) => id,
            WinnerPick::Side(side) => {
                let bracket = session.bracket();
                let m = bracket
                    .match_at(key)
                    .ok_or(BracketError::UnknownMatch(key))?;
                let occupant = if side == 1 { &m.player1 } else { &m.player2 };
                PlayerId::new(occupant.id())
            }
        };

        let bracket = session.record_winner(key, &winner)?;
        let name = bracket
            .match_at(key)
            .and_then(Match::winner)
            .map(|p| p.name.clone())
            .unwrap_or_default();

        log_bracket_event(
            "record",
            &bracket.group_key,
            Some(&key.to_string()),
            &format!("Winner recorded: {name}"),
        );

        Ok(Reply::Output(format!(
            "{name} wins {}\n\n{}",
            describe(key),
            BracketView(&bracket)
        )))
    }

    fn reset(&mut self, key: MatchKey) -> Result<Reply> {
        let Some(session) = self.session_mut()? else {
            return Ok(text(NO_PLAYERS));
        };

        let before = session.bracket();
        let Some(m) = before.match_at(key) else {
            return Err(BracketError::UnknownMatch(key).into());
        };
        if !m.can_reset() {
            return Ok(Reply::Output(format!(
                "Nothing to reset in {}",
                describe(key)
            )));
        }

        let bracket = session.reset_match(key);
        log_bracket_event(
            "reset",
            &bracket.group_key,
            Some(&key.to_string()),
            "Result cleared",
        );

        Ok(Reply::Output(format!(
            "Reset {}\n\n{}",
            describe(key),
            BracketView(&bracket)
        )))
    }

    fn reseed(&mut self) -> Result<Reply> {
        let Some(session) = self.session_mut()? else {
            return Ok(text(NO_PLAYERS));
        };

        let bracket = session.reseed()?;
        log_bracket_event(
            "reseed",
            &bracket.group_key,
            None,
            &format!("Draw regenerated with {} policy", session.policy()),
        );

        Ok(Reply::Output(format!(
            "Bracket regenerated\n\n{}",
            BracketView(&bracket)
        )))
    }

    fn save(&mut self, path: &Path) -> Result<Reply> {
        let Some(session) = self.session_mut()? else {
            return Ok(text(NO_PLAYERS));
        };

        let snapshot = session.snapshot();
        let json = serde_json::to_string_pretty(&snapshot)?;
        fs::write(path, json)
            .with_context(|| format!("Failed to write session to {}", path.display()))?;

        log_bracket_event(
            "save",
            &snapshot.group_key,
            None,
            &format!("Saved {} results", snapshot.winners.len()),
        );

        Ok(Reply::Output(format!(
            "Saved {} to {}\n",
            snapshot.group_key,
            path.display()
        )))
    }

    fn load(&mut self, path: &Path) -> Result<Reply> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read session from {}", path.display()))?;
        let snapshot: SessionSnapshot = serde_json::from_str(&raw)
            .with_context(|| format!("{} is not a saved bracket", path.display()))?;

        let group = find_group(&self.groups, &snapshot.group_key)?.clone();
        let session = BracketSession::restore(group, &snapshot)?;
        let key = session.group().key.clone();

        log_bracket_event(
            "load",
            &key,
            None,
            &format!("Restored {} results", session.store().len()),
        );

        let view = BracketView(&session.bracket()).to_string();
        self.sessions.insert(key.clone(), session);
        self.selected = Some(key);

        Ok(Reply::Output(format!("Loaded {}\n\n{view}", path.display())))
    }

    /// Session of the selected group, seeded on first use
    fn session_mut(&mut self) -> Result<Option<&mut BracketSession>> {
        let Some(group) = self.selected_group().cloned() else {
            return Ok(None);
        };

        match self.sessions.entry(group.key.clone()) {
            Entry::Occupied(entry) => Ok(Some(entry.into_mut())),
            Entry::Vacant(entry) => {
                let session = BracketSession::new(group, &self.engine)?;
                Ok(Some(entry.insert(session)))
            }
        }
    }
}

/// Text to print for a handled command, or `None` once the operator quits
///
/// Failures are printed with their full context chain; the console keeps
/// running after them.
pub fn reply_text(result: Result<Reply>) -> Option<String> {
    match result {
        Ok(Reply::Output(out)) => Some(out),
        Ok(Reply::Quit) => None,
        Err(e) => Some(format!("Error: {e:#}")),
    }
}

fn action_name(command: &Command) -> &'static str {
    match command {
        Command::Groups => "groups",
        Command::Select(_) => "select",
        Command::Show => "show",
        Command::Win { .. } => "record",
        Command::Reset(_) => "reset",
        Command::Reseed => "reseed",
        Command::Save(_) => "save",
        Command::Load(_) => "load",
        Command::Help => "help",
        Command::Quit => "quit",
    }
}

fn describe(key: MatchKey) -> String {
    format!("Round {} Match {}", key.round + 1, key.index + 1)
}

fn output(view: impl std::fmt::Display) -> Reply {
    Reply::Output(view.to_string())
}

fn text(message: &str) -> Reply {
    Reply::Output(format!("{message}\n"))
}
