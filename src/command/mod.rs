//! Command interpretation and dispatch.
//!
//! This module provides the command layer:
//! - The closed command registry with unambiguous-prefix resolution
//! - Per-command argument specifications with rendered usage and help
//! - Parsing of raw remainders into bound argument values
//! - The dispatcher wiring commands to buffers and server interfaces

mod dispatcher;
mod parser;
mod registry;
mod spec;

pub use dispatcher::{Dispatcher, DEFAULT_PREFIX};
pub use parser::{parse_args, ParseOutcome, ParsedArgs};
pub use registry::{Command, PrefixIndex, Resolution};
pub use spec::ArgSpec;
