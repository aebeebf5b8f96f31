//! Command registry and prefix resolution.
//!
//! The command set is closed: every command the dispatcher understands is a
//! variant of [`Command`]. A typed token resolves by unambiguous prefix, so
//! `/q alice` reaches `query` and `/con irc.example.org` reaches `connect`.
//! The [`PrefixIndex`] is built once at dispatcher construction and is
//! read-only afterwards.

use std::collections::HashMap;
use std::fmt;

/// A command known to the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Connect,
    Disconnect,
    Help,
    Join,
    Me,
    Nick,
    Part,
    Query,
}

impl Command {
    /// All commands, in listing order.
    pub const ALL: [Command; 8] = [
        Command::Connect,
        Command::Disconnect,
        Command::Help,
        Command::Join,
        Command::Me,
        Command::Nick,
        Command::Part,
        Command::Query,
    ];

    /// Canonical names, aligned with [`Command::ALL`].
    pub const NAMES: [&'static str; 8] = [
        "connect",
        "disconnect",
        "help",
        "join",
        "me",
        "nick",
        "part",
        "query",
    ];

    /// Canonical name of the command.
    pub fn name(self) -> &'static str {
        match self {
            Command::Connect => "connect",
            Command::Disconnect => "disconnect",
            Command::Help => "help",
            Command::Join => "join",
            Command::Me => "me",
            Command::Nick => "nick",
            Command::Part => "part",
            Command::Query => "query",
        }
    }

    /// Look up a command by its canonical name.
    pub fn from_name(name: &str) -> Option<Command> {
        Command::ALL
            .into_iter()
            .find(|command| command.name() == name)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Outcome of resolving a command token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution<'a> {
    /// Exactly one command matches the token.
    Unique(&'static str),
    /// Two or more commands match; candidates are sorted by name.
    Ambiguous(&'a [&'static str]),
    /// No command matches.
    Unknown,
}

/// Index from every non-empty prefix of every command name to the set of
/// command names sharing that prefix.
pub struct PrefixIndex {
    names: Vec<&'static str>,
    entries: HashMap<String, Vec<&'static str>>,
}

impl PrefixIndex {
    /// Build an index over a set of command names.
    ///
    /// The set is closed; a repeated name is a construction error and panics.
    pub fn build<I>(names: I) -> Self
    where
        I: IntoIterator<Item = &'static str>,
    {
        let names: Vec<&'static str> = names.into_iter().collect();
        let mut entries: HashMap<String, Vec<&'static str>> = HashMap::new();

        for (position, &name) in names.iter().enumerate() {
            assert!(
                !names[..position].contains(&name),
                "duplicate command name: {name}"
            );
            let mut prefix = String::new();
            for ch in name.chars() {
                prefix.push(ch);
                entries.entry(prefix.clone()).or_default().push(name);
            }
        }

        for candidates in entries.values_mut() {
            candidates.sort_unstable();
        }

        Self { names, entries }
    }

    /// Index over the standard command set.
    pub fn standard() -> Self {
        Self::build(Command::NAMES)
    }

    /// Resolve a lower-cased command token.
    ///
    /// A token equal to a full command name resolves uniquely to that command
    /// even when the name is also a prefix of a longer one.
    pub fn resolve(&self, token: &str) -> Resolution<'_> {
        if let Some(&name) = self.names.iter().find(|&&name| name == token) {
            return Resolution::Unique(name);
        }
        match self.entries.get(token) {
            None => Resolution::Unknown,
            Some(candidates) if candidates.len() == 1 => Resolution::Unique(candidates[0]),
            Some(candidates) => Resolution::Ambiguous(candidates),
        }
    }
}
