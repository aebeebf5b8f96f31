//! Buffer and line storage.
//!
//! This module provides the persistence boundary for the command layer:
//! - Domain types (servers, buffers, lines, user identities)
//! - The [`BufferStore`] trait the dispatcher writes through
//! - An in-memory store for tests and embedders without a database

mod memory;
mod model;
mod traits;

pub use memory::MemoryStore;
pub use model::{
    Buffer, BufferId, Line, LineKind, Server, ServerId, UserIdentity, SYSTEM_NICK,
};
pub use traits::BufferStore;
