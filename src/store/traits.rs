//! Storage abstraction trait for Confab.
//!
//! The command core never owns persistence: it reaches servers, buffers, and
//! lines through [`BufferStore`], and the embedding application decides what
//! actually backs it (a database, a daemon, or the bundled in-memory store).

use async_trait::async_trait;

use super::model::{Buffer, BufferId, LineKind, Server, ServerId, UserIdentity};
use crate::Result;

/// Trait for buffer store operations.
///
/// Implementations must be safe to share across tasks; the dispatcher calls
/// these methods concurrently for unrelated buffers.
#[async_trait]
pub trait BufferStore: Send + Sync {
    /// Get a buffer by ID.
    ///
    /// Returns [`ConfabError::NotFound`](crate::ConfabError::NotFound) when no
    /// buffer has that ID.
    async fn get_buffer(&self, id: BufferId) -> Result<Buffer>;

    /// Append a line to a buffer.
    async fn create_line(
        &self,
        buffer: &Buffer,
        content: &str,
        kind: LineKind,
        nick: &str,
    ) -> Result<()>;

    /// Get the buffer named `name` on `server`, creating it if absent.
    ///
    /// Must be idempotent: two calls with the same name and server return the
    /// same buffer.
    async fn ensure_buffer(&self, name: &str, server: ServerId) -> Result<Buffer>;

    /// Create a new server record.
    async fn create_server(
        &self,
        host: &str,
        port: u16,
        secure: bool,
        user: UserIdentity,
    ) -> Result<Server>;

    /// Mark a server as disconnected.
    async fn disconnect_server(&self, server: ServerId) -> Result<()>;
}
