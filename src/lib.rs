//! Confab - IRC client command core
//!
//! Interprets `/`-prefixed command lines: abbreviated command names resolve
//! by unambiguous prefix, per-command argument specifications parse the rest
//! of the line, and handlers act on conversation buffers and their server
//! connections through narrow collaborator traits.

pub mod command;
pub mod config;
pub mod connection;
pub mod error;
pub mod logging;
pub mod store;

pub use command::{
    parse_args, ArgSpec, Command, Dispatcher, ParseOutcome, ParsedArgs, PrefixIndex, Resolution,
    DEFAULT_PREFIX,
};
pub use config::{CommandsConfig, Config, LoggingConfig};
pub use connection::{InterfaceRegistry, ServerConnector, ServerInterface};
pub use error::{ConfabError, Result};
pub use store::{
    Buffer, BufferId, BufferStore, Line, LineKind, MemoryStore, Server, ServerId, UserIdentity,
    SYSTEM_NICK,
};
