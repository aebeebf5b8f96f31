//! Command-line parsing against an argument specification.
//!
//! One parse attempt runs tokenization and binding to completion and always
//! lands in a terminal [`ParseOutcome`]: bound arguments, a help request, or
//! a failure carrying rendered guidance. Malformed input never surfaces as an
//! error to the dispatcher.

use std::collections::{HashMap, HashSet};

use super::spec::{ArgSpec, Arity};

/// Bound argument values for one invocation.
#[derive(Debug, Default)]
pub struct ParsedArgs {
    values: HashMap<&'static str, String>,
    switches: HashSet<&'static str>,
}

impl ParsedArgs {
    /// Value bound to a positional or valued option, if one was bound.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Whether the named switch was given.
    pub fn is_set(&self, name: &str) -> bool {
        self.switches.contains(name)
    }
}

/// Terminal state of one parse attempt.
#[derive(Debug)]
pub enum ParseOutcome {
    /// Binding succeeded; the handler may run with these arguments.
    Success(ParsedArgs),
    /// `-h`/`--help` was given; carries the rendered help block.
    Help(String),
    /// Structural parse failure; carries the rendered usage and error line.
    Failed(String),
}

/// Cursor over the raw remainder string.
///
/// Tokens split on whitespace runs; the verbatim tail keeps embedded and
/// trailing whitespace for remainder arguments.
struct Cursor<'a> {
    rest: &'a str,
}

impl<'a> Cursor<'a> {
    fn new(input: &'a str) -> Self {
        Self { rest: input }
    }

    fn peek(&mut self) -> Option<&'a str> {
        self.rest = self.rest.trim_start();
        if self.rest.is_empty() {
            return None;
        }
        let end = self
            .rest
            .find(char::is_whitespace)
            .unwrap_or(self.rest.len());
        Some(&self.rest[..end])
    }

    fn advance(&mut self) -> Option<&'a str> {
        let token = self.peek()?;
        self.rest = &self.rest[token.len()..];
        Some(token)
    }

    fn tail(&mut self) -> &'a str {
        self.rest.trim_start()
    }
}

/// Parse a raw remainder string against a command's spec.
pub fn parse_args(spec: &ArgSpec, input: &str) -> ParseOutcome {
    let mut cursor = Cursor::new(input);
    let mut args = ParsedArgs::default();
    let positionals = spec.positional_list();
    let mut bound = 0;

    while let Some(token) = cursor.peek() {
        // Option tokens are only recognized until a remainder argument
        // starts consuming the line.
        if token.starts_with('-') && token.len() > 1 {
            cursor.advance();
            if token == "-h" || token == "--help" {
                return ParseOutcome::Help(spec.render_help());
            }
            let Some(flag) = spec.find_flag(token) else {
                return ParseOutcome::Failed(
                    spec.usage_error(&format!("unrecognized arguments: {token}")),
                );
            };
            if flag.takes_value {
                let Some(value) = cursor.advance() else {
                    return ParseOutcome::Failed(spec.usage_error(&format!(
                        "argument {}/{}: expected one argument",
                        flag.short, flag.long
                    )));
                };
                args.values.insert(flag.name(), value.to_string());
            } else {
                args.switches.insert(flag.name());
            }
            continue;
        }

        let Some(positional) = positionals.get(bound) else {
            return ParseOutcome::Failed(
                spec.usage_error(&format!("unrecognized arguments: {}", cursor.tail())),
            );
        };

        if positional.arity == Arity::Remainder {
            args.values.insert(positional.name, cursor.tail().to_string());
            bound += 1;
            break;
        }

        cursor.advance();
        if let Some(choices) = positional.choices {
            if !choices.iter().any(|&choice| choice == token) {
                return ParseOutcome::Failed(spec.usage_error(&format!(
                    "argument {}: invalid choice: \"{}\" (choose from {})",
                    positional.name,
                    token,
                    join_choices(choices)
                )));
            }
        }
        args.values.insert(positional.name, token.to_string());
        bound += 1;
    }

    let missing: Vec<&str> = positionals[bound..]
        .iter()
        .filter(|positional| positional.arity == Arity::Required)
        .map(|positional| positional.name)
        .collect();
    if !missing.is_empty() {
        return ParseOutcome::Failed(spec.usage_error(&format!(
            "the following arguments are required: {}",
            missing.join(", ")
        )));
    }

    for positional in &positionals[bound..] {
        match positional.arity {
            Arity::Optional => {
                if let Some(default) = positional.default {
                    args.values.insert(positional.name, default.to_string());
                }
            }
            Arity::Remainder => {
                args.values.insert(positional.name, String::new());
            }
            Arity::Required => {}
        }
    }

    for flag in spec.flag_list() {
        if flag.takes_value && !args.values.contains_key(flag.name()) {
            if let Some(default) = flag.default {
                args.values.insert(flag.name(), default.to_string());
            }
        }
    }

    ParseOutcome::Success(args)
}

fn join_choices(choices: &[&str]) -> String {
    choices
        .iter()
        .map(|choice| format!("\"{choice}\""))
        .collect::<Vec<_>>()
        .join(", ")
}
