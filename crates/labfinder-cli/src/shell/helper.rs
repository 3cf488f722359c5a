use std::borrow::Cow::{self, Borrowed, Owned};

use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};

/// Shell commands, with a one-line description for `help`.
pub const COMMANDS: &[(&str, &str)] = &[
    ("home", "go to the search page"),
    ("about", "about Medical Lab Finder"),
    ("bookings", "your bookings"),
    ("profile", "create a profile"),
    ("edit", "edit your profile"),
    ("go", "go to a path, e.g. `go /results?test=CBC&location=Boston`"),
    ("back", "previous page"),
    ("test", "set the test to search for"),
    ("location", "set the search location"),
    ("detect", "detect your location"),
    ("find", "search for labs"),
    ("signin", "sign in"),
    ("signup", "create an account"),
    ("close", "close the sign-in dialog"),
    ("save", "fill in and submit the profile form"),
    ("sort", "sort results: distance, price-asc, price-desc, rating"),
    ("within", "filter results: all, 5, 10, 20"),
    ("book", "book a lab by id"),
    ("logout", "sign out"),
    ("help", "show commands"),
    ("quit", "exit"),
];

/// Completion, highlighting, and hints for shell commands.
#[derive(Clone)]
pub struct CliHelper {
    commands: Vec<String>,
}

impl CliHelper {
    pub fn new() -> Self {
        Self {
            commands: COMMANDS.iter().map(|(name, _)| name.to_string()).collect(),
        }
    }

    fn is_command(&self, word: &str) -> bool {
        self.commands.iter().any(|cmd| cmd == word)
    }
}

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];

        if line.contains(' ') {
            return Ok((0, vec![]));
        }
        let candidates: Vec<Pair> = self
            .commands
            .iter()
            .filter(|cmd| cmd.starts_with(line))
            .map(|cmd| Pair {
                display: cmd.clone(),
                replacement: cmd.clone(),
            })
            .collect();
        Ok((0, candidates))
    }
}

impl Highlighter for CliHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        match line.split_once(' ') {
            Some((word, rest)) if self.is_command(word) => {
                Owned(format!("{} {}", word.bright_cyan(), rest))
            }
            None if self.is_command(line) => Owned(line.bright_cyan().to_string()),
            _ => Borrowed(line),
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for CliHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];

        if line.is_empty() || line.contains(' ') {
            return None;
        }
        self.commands
            .iter()
            .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
            .map(|cmd| cmd[line.len()..].to_string())
    }
}

impl Validator for CliHelper {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highlights_only_known_commands() {
        let helper = CliHelper::new();
        assert!(matches!(helper.highlight("find", 4), Owned(_)));
        assert!(matches!(helper.highlight("test CBC", 8), Owned(_)));
        assert!(matches!(helper.highlight("nonsense", 8), Borrowed(_)));
    }
}
