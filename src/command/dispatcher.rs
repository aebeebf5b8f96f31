//! Top-level command dispatch.
//!
//! The dispatcher owns the prefix index and the handler for every command.
//! One [`Dispatcher::dispatch`] call takes a raw input line and a buffer,
//! resolves the command token, parses the remainder against the command's
//! spec and runs the handler against the buffer's server. All feedback
//! (unknown or ambiguous tokens, usage errors, help text, rejections) lands
//! in the buffer as system notice lines; the call itself only errors when a
//! collaborator does.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::connection::{InterfaceRegistry, ServerConnector, ServerInterface};
use crate::store::{Buffer, BufferId, BufferStore, LineKind, Server, UserIdentity, SYSTEM_NICK};
use crate::Result;

use super::parser::{parse_args, ParseOutcome, ParsedArgs};
use super::registry::{Command, PrefixIndex, Resolution};

/// Default command prefix character.
pub const DEFAULT_PREFIX: char = '/';

/// Width of the ruler lines framing help and usage output.
const RULER_WIDTH: usize = 80;

/// Interprets command lines against buffers and their servers.
pub struct Dispatcher {
    store: Arc<dyn BufferStore>,
    connector: Arc<dyn ServerConnector>,
    interfaces: Arc<InterfaceRegistry>,
    index: PrefixIndex,
    prefix: char,
}

impl Dispatcher {
    /// Create a dispatcher over the given collaborators, using the default
    /// `/` prefix.
    pub fn new(
        store: Arc<dyn BufferStore>,
        connector: Arc<dyn ServerConnector>,
        interfaces: Arc<InterfaceRegistry>,
    ) -> Self {
        Self {
            store,
            connector,
            interfaces,
            index: PrefixIndex::standard(),
            prefix: DEFAULT_PREFIX,
        }
    }

    /// Use a different command prefix character.
    pub fn with_prefix(mut self, prefix: char) -> Self {
        self.prefix = prefix;
        self
    }

    /// Interpret one input line against the given buffer.
    ///
    /// A line that does not start with the command prefix is not a command
    /// and nothing happens; routing such lines to message sending is the
    /// caller's job. Unknown and ambiguous tokens, parse failures and help
    /// requests all end as notice lines in the buffer.
    pub async fn dispatch(&self, buffer_id: BufferId, line: &str) -> Result<()> {
        let Some(stripped) = line.strip_prefix(self.prefix) else {
            return Ok(());
        };
        let (token, rest) = split_command(stripped);
        let token = token.to_lowercase();

        let buffer = self.store.get_buffer(buffer_id).await?;

        let name = match self.index.resolve(&token) {
            Resolution::Unique(name) => name,
            Resolution::Ambiguous(candidates) => {
                debug!("Ambiguous command token {:?} in buffer {}", token, buffer.id);
                let notice = format!(
                    "ambiguous command \"{}\" (candidates: {})",
                    token,
                    candidates.join(", ")
                );
                return self.notice(&buffer, &notice).await;
            }
            Resolution::Unknown => {
                debug!("Unknown command token {:?} in buffer {}", token, buffer.id);
                return self
                    .notice(&buffer, &format!("unknown command \"{token}\""))
                    .await;
            }
        };
        let Some(command) = Command::from_name(name) else {
            return Ok(());
        };
        debug!("Dispatching {} in buffer {}", command, buffer.id);

        // me takes its remainder verbatim and skips structured parsing.
        if command == Command::Me {
            return self.cmd_me(&buffer, rest).await;
        }

        let args = match parse_args(&command.spec(), rest) {
            ParseOutcome::Success(args) => args,
            ParseOutcome::Help(text) => {
                debug!("Help requested for {}", command);
                return self.banner(&buffer, &text).await;
            }
            ParseOutcome::Failed(text) => {
                debug!("Argument parse failed for {}", command);
                return self.banner(&buffer, &text).await;
            }
        };

        match command {
            Command::Connect => self.cmd_connect(&buffer, &args).await,
            Command::Disconnect => self.cmd_disconnect(&buffer, &args).await,
            Command::Help => self.cmd_help(&buffer, &args).await,
            Command::Join => self.cmd_join(&buffer, &args).await,
            // me was handled before parsing; this arm is never reached.
            Command::Me => Ok(()),
            Command::Nick => self.cmd_nick(&buffer, &args).await,
            Command::Part => self.cmd_part(&buffer, &args).await,
            Command::Query => self.cmd_query(&buffer, &args).await,
        }
    }

    /// Write one system notice line to the buffer.
    async fn notice(&self, buffer: &Buffer, content: &str) -> Result<()> {
        self.store
            .create_line(buffer, content, LineKind::Other, SYSTEM_NICK)
            .await
    }

    /// Write a multi-line text block framed by ruler lines.
    async fn banner(&self, buffer: &Buffer, text: &str) -> Result<()> {
        let ruler = "=".repeat(RULER_WIDTH);
        self.notice(buffer, &ruler).await?;
        for line in text.lines() {
            self.notice(buffer, line).await?;
        }
        self.notice(buffer, &ruler).await
    }

    /// The buffer's server, or a rejection notice when this is a system
    /// buffer.
    async fn require_server<'a>(
        &self,
        buffer: &'a Buffer,
        command: Command,
    ) -> Result<Option<&'a Server>> {
        match buffer.server.as_ref() {
            Some(server) => Ok(Some(server)),
            None => {
                self.notice(buffer, &format!("Can't {command} from system buffer."))
                    .await?;
                Ok(None)
            }
        }
    }

    /// The live interface for the buffer's server, or the matching rejection
    /// notice when there is no server or no connection.
    async fn require_interface(
        &self,
        buffer: &Buffer,
        command: Command,
    ) -> Result<Option<Arc<dyn ServerInterface>>> {
        let Some(server) = self.require_server(buffer, command).await? else {
            return Ok(None);
        };
        match self.interfaces.get(server.id).await {
            Some(interface) => Ok(Some(interface)),
            None => {
                warn!("No interface registered for server {}", server.id);
                self.notice(buffer, &format!("Not connected to {}.", server.host))
                    .await?;
                Ok(None)
            }
        }
    }

    async fn cmd_help(&self, buffer: &Buffer, args: &ParsedArgs) -> Result<()> {
        // Choice validation already restricted the target to a real command.
        let Some(target) = args.get("command").and_then(Command::from_name) else {
            return Ok(());
        };
        self.banner(buffer, &target.spec().render_help()).await
    }

    async fn cmd_join(&self, buffer: &Buffer, args: &ParsedArgs) -> Result<()> {
        let Some(interface) = self.require_interface(buffer, Command::Join).await? else {
            return Ok(());
        };
        let channel = args.get("channel").unwrap_or(buffer.name.as_str());
        interface.join(channel, args.get("password")).await
    }

    async fn cmd_part(&self, buffer: &Buffer, args: &ParsedArgs) -> Result<()> {
        let Some(interface) = self.require_interface(buffer, Command::Part).await? else {
            return Ok(());
        };
        let channel = args.get("channel").unwrap_or(buffer.name.as_str());
        interface.part(channel).await
    }

    async fn cmd_query(&self, buffer: &Buffer, args: &ParsedArgs) -> Result<()> {
        let Some(server) = self.require_server(buffer, Command::Query).await? else {
            return Ok(());
        };
        let Some(who) = args.get("who") else {
            return Ok(());
        };
        let created = self.store.ensure_buffer(who, server.id).await?;
        debug!("Query buffer {} ready for {}", created.id, who);
        Ok(())
    }

    async fn cmd_me(&self, buffer: &Buffer, action: &str) -> Result<()> {
        if action.is_empty() {
            let spec = Command::Me.spec();
            return self
                .banner(
                    buffer,
                    &spec.usage_error("the following arguments are required: action"),
                )
                .await;
        }
        let Some(interface) = self.require_interface(buffer, Command::Me).await? else {
            return Ok(());
        };
        interface
            .send_message(&buffer.name, &format!("\x01ACTION {action}\x01"))
            .await
    }

    async fn cmd_nick(&self, buffer: &Buffer, args: &ParsedArgs) -> Result<()> {
        let Some(interface) = self.require_interface(buffer, Command::Nick).await? else {
            return Ok(());
        };
        let Some(new_nick) = args.get("new_nick") else {
            return Ok(());
        };
        interface.change_nick(new_nick).await
    }

    async fn cmd_connect(&self, buffer: &Buffer, args: &ParsedArgs) -> Result<()> {
        let Some(host) = args.get("host") else {
            return Ok(());
        };
        let Some(port_text) = args.get("port") else {
            return Ok(());
        };
        let Ok(port) = port_text.parse::<u16>() else {
            let spec = Command::Connect.spec();
            return self
                .banner(
                    buffer,
                    &spec.usage_error(&format!(
                        "argument -p/--port: invalid port value: \"{port_text}\""
                    )),
                )
                .await;
        };
        let secure = !args.is_set("insecure");

        // Identity fields fall back to the current server's user; a system
        // buffer has none to fall back to, so there all three must be given.
        let user = match (args.get("nick"), args.get("realname"), args.get("username")) {
            (Some(nick), Some(realname), Some(username)) => {
                UserIdentity::new(nick, realname, username)
            }
            (nick, realname, username) => {
                let Some(server) = self.require_server(buffer, Command::Connect).await? else {
                    return Ok(());
                };
                UserIdentity::new(
                    nick.unwrap_or(server.user.nick.as_str()),
                    realname.unwrap_or(server.user.realname.as_str()),
                    username.unwrap_or(server.user.username.as_str()),
                )
            }
        };

        let server = self.store.create_server(host, port, secure, user).await?;
        let interface = self.connector.connect(&server).await?;
        self.interfaces.insert(server.id, interface).await;
        info!(
            "Connected to {}:{} as {}",
            server.host, server.port, server.user.nick
        );
        Ok(())
    }

    async fn cmd_disconnect(&self, buffer: &Buffer, args: &ParsedArgs) -> Result<()> {
        let Some(server) = self.require_server(buffer, Command::Disconnect).await? else {
            return Ok(());
        };
        // Handle lookup comes before any side effect: with no live
        // connection there is no banner, no store write and no quit.
        let Some(interface) = self.interfaces.get(server.id).await else {
            return self
                .notice(buffer, &format!("Not connected to {}.", server.host))
                .await;
        };
        let message = args.get("message").unwrap_or("");

        self.notice(buffer, "*** DISCONNECTED ***").await?;
        self.store.disconnect_server(server.id).await?;
        interface.quit(message).await?;
        self.interfaces.remove(server.id).await;
        info!("Disconnected from {}:{}", server.host, server.port);
        Ok(())
    }
}

/// Split an input line (prefix already stripped) into the lower-caseable
/// command token and the verbatim remainder after the first whitespace run.
fn split_command(input: &str) -> (&str, &str) {
    let input = input.trim_start();
    let end = input.find(char::is_whitespace).unwrap_or(input.len());
    let (token, rest) = input.split_at(end);
    (token, rest.trim_start())
}
