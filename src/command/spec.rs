//! Declarative argument specifications.
//!
//! Each command publishes one [`ArgSpec`] describing its positional
//! arguments, switches and valued options, together with the help text shown
//! for `/help <command>` and on parse failures. The spec also renders the
//! usage line and the full help block; the parser borrows it to drive
//! binding.

use super::registry::Command;

/// Help text starts at this column when the invocation fits before it.
const HELP_COLUMN: usize = 24;

/// How many tokens a positional argument consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Arity {
    /// Exactly one token; parsing fails if none remains.
    Required,
    /// One token if available, otherwise the declared default.
    Optional,
    /// The rest of the line, verbatim, as a single value.
    Remainder,
}

/// A positional argument declaration.
#[derive(Debug, Clone)]
pub(crate) struct Positional {
    pub(crate) name: &'static str,
    pub(crate) arity: Arity,
    pub(crate) default: Option<&'static str>,
    pub(crate) choices: Option<&'static [&'static str]>,
    pub(crate) help: &'static str,
}

impl Positional {
    /// Name as shown in usage and help; restricted choices render as the
    /// brace-wrapped choice list.
    fn display_name(&self) -> String {
        match self.choices {
            Some(choices) => format!("{{{}}}", choices.join(",")),
            None => self.name.to_string(),
        }
    }
}

/// A flag declaration: a toggle switch or a valued option.
#[derive(Debug, Clone)]
pub(crate) struct Flag {
    pub(crate) short: &'static str,
    pub(crate) long: &'static str,
    pub(crate) takes_value: bool,
    pub(crate) default: Option<&'static str>,
    pub(crate) help: &'static str,
}

impl Flag {
    /// Binding name: the long marker without its leading dashes.
    pub(crate) fn name(&self) -> &'static str {
        self.long.trim_start_matches('-')
    }

    fn metavar(&self) -> String {
        self.name().to_uppercase()
    }

    fn invocation(&self) -> String {
        if self.takes_value {
            let metavar = self.metavar();
            format!("{} {metavar}, {} {metavar}", self.short, self.long)
        } else {
            format!("{}, {}", self.short, self.long)
        }
    }
}

/// Declarative description of one command's arguments.
///
/// Declaration order is significant: positional values bind left to right.
#[derive(Debug, Clone)]
pub struct ArgSpec {
    name: &'static str,
    description: &'static str,
    positionals: Vec<Positional>,
    flags: Vec<Flag>,
}

impl ArgSpec {
    /// Start a spec for the named command.
    pub fn new(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            description,
            positionals: Vec::new(),
            flags: Vec::new(),
        }
    }

    fn push_positional(&mut self, positional: Positional) {
        // A remainder swallows the rest of the line; nothing may follow it.
        assert!(
            self.positionals
                .last()
                .map_or(true, |last| last.arity != Arity::Remainder),
            "positional declared after a remainder argument"
        );
        self.positionals.push(positional);
    }

    /// Add a positional that must be present.
    pub fn required(mut self, name: &'static str, help: &'static str) -> Self {
        self.push_positional(Positional {
            name,
            arity: Arity::Required,
            default: None,
            choices: None,
            help,
        });
        self
    }

    /// Add a positional that may be omitted, binding `default` when it is.
    pub fn optional(
        mut self,
        name: &'static str,
        default: Option<&'static str>,
        help: &'static str,
    ) -> Self {
        self.push_positional(Positional {
            name,
            arity: Arity::Optional,
            default,
            choices: None,
            help,
        });
        self
    }

    /// Add a required positional restricted to a closed choice set.
    pub fn required_choice(
        mut self,
        name: &'static str,
        choices: &'static [&'static str],
        help: &'static str,
    ) -> Self {
        self.push_positional(Positional {
            name,
            arity: Arity::Required,
            default: None,
            choices: Some(choices),
            help,
        });
        self
    }

    /// Add a positional that consumes the rest of the line verbatim.
    pub fn remainder(mut self, name: &'static str, help: &'static str) -> Self {
        self.push_positional(Positional {
            name,
            arity: Arity::Remainder,
            default: None,
            choices: None,
            help,
        });
        self
    }

    /// Add a toggle switch (`-i`/`--insecure` style; consumes no value).
    pub fn switch(mut self, short: &'static str, long: &'static str, help: &'static str) -> Self {
        self.flags.push(Flag {
            short,
            long,
            takes_value: false,
            default: None,
            help,
        });
        self
    }

    /// Add a valued option (`-p`/`--port` style; consumes one token).
    pub fn value(
        mut self,
        short: &'static str,
        long: &'static str,
        default: Option<&'static str>,
        help: &'static str,
    ) -> Self {
        self.flags.push(Flag {
            short,
            long,
            takes_value: true,
            default,
            help,
        });
        self
    }

    /// Name of the command this spec belongs to.
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub(crate) fn positional_list(&self) -> &[Positional] {
        &self.positionals
    }

    pub(crate) fn flag_list(&self) -> &[Flag] {
        &self.flags
    }

    /// Find the flag matching an option token, by short or long marker.
    pub(crate) fn find_flag(&self, token: &str) -> Option<&Flag> {
        self.flags
            .iter()
            .find(|flag| flag.short == token || flag.long == token)
    }

    /// One-line usage summary.
    pub fn usage(&self) -> String {
        let mut line = format!("usage: {} [-h]", self.name);
        for flag in &self.flags {
            if flag.takes_value {
                line.push_str(&format!(" [{} {}]", flag.short, flag.metavar()));
            } else {
                line.push_str(&format!(" [{}]", flag.short));
            }
        }
        for positional in &self.positionals {
            let shown = positional.display_name();
            match positional.arity {
                Arity::Required => line.push_str(&format!(" {shown}")),
                Arity::Optional => line.push_str(&format!(" [{shown}]")),
                Arity::Remainder => line.push_str(&format!(" [{shown} ...]")),
            }
        }
        line
    }

    /// Full help block: usage, description, then one entry per argument.
    pub fn render_help(&self) -> String {
        let mut out = String::new();
        out.push_str(&self.usage());
        out.push_str("\n\n");
        out.push_str(self.description);
        out.push('\n');

        if !self.positionals.is_empty() {
            out.push('\n');
            out.push_str("positional arguments:\n");
            for positional in &self.positionals {
                push_item(&mut out, &positional.display_name(), positional.help);
            }
        }

        out.push('\n');
        out.push_str("options:\n");
        push_item(&mut out, "-h, --help", "show this help message and exit");
        for flag in &self.flags {
            push_item(&mut out, &flag.invocation(), flag.help);
        }
        out
    }

    /// Usage line followed by a one-line error, the parse-failure rendering.
    pub fn usage_error(&self, message: &str) -> String {
        format!("{}\n{}: error: {}", self.usage(), self.name, message)
    }
}

/// Append one argument entry, aligning help text at [`HELP_COLUMN`] or
/// wrapping onto the next line when the invocation is too wide.
fn push_item(out: &mut String, invocation: &str, help: &str) {
    if 2 + invocation.len() + 2 <= HELP_COLUMN {
        out.push_str(&format!(
            "  {:<width$}{}\n",
            invocation,
            help,
            width = HELP_COLUMN - 2
        ));
    } else {
        out.push_str(&format!("  {invocation}\n"));
        out.push_str(&format!("{:width$}{}\n", "", help, width = HELP_COLUMN));
    }
}

impl Command {
    /// The argument specification for this command.
    pub fn spec(self) -> ArgSpec {
        match self {
            Command::Connect => ArgSpec::new("connect", "Connect to a new IRC server")
                .switch("-i", "--insecure", "Disable ssl/tls for this server")
                .value("-p", "--port", Some("6697"), "The port to connect on")
                .value("-n", "--nick", None, "The nick to use on this server")
                .value("-r", "--realname", None, "The real name to use on this server")
                .value("-u", "--username", None, "The username to use on this server")
                .required("host", "The server to connect to"),
            Command::Disconnect => {
                ArgSpec::new("disconnect", "Disconnect from the current IRC server")
                    .remainder("message", "The quit message")
            }
            Command::Help => ArgSpec::new("help", "Display help and usage information for commands")
                .required_choice("command", &Command::NAMES, "The command to display help for"),
            Command::Join => ArgSpec::new("join", "Join a new channel")
                .optional("channel", None, "The channel to join")
                .optional("password", None, "Optional password for the channel"),
            Command::Me => {
                ArgSpec::new("me", "Do a thing!").remainder("action", "The thing to do")
            }
            Command::Nick => ArgSpec::new("nick", "Change your nickname on this server")
                .required("new_nick", "What to change your nick to"),
            Command::Part => ArgSpec::new("part", "Leave a channel").optional(
                "channel",
                None,
                "The channel to leave",
            ),
            Command::Query => ArgSpec::new("query", "Start a private conversation")
                .required("who", "Who to start a conversation with"),
        }
    }
}
