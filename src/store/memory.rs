//! In-memory buffer store.
//!
//! Reference implementation of [`BufferStore`] used by the test suite and by
//! embedders that do not persist anything. All state lives behind one
//! [`RwLock`]; IDs are assigned sequentially the way a database would.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::model::{Buffer, BufferId, Line, LineKind, Server, ServerId, UserIdentity};
use super::traits::BufferStore;
use crate::{ConfabError, Result};

/// Buffer row as stored; the owning server is kept as an ID so that server
/// state has a single source of truth.
#[derive(Debug, Clone)]
struct BufferRecord {
    id: BufferId,
    name: String,
    server: Option<ServerId>,
}

#[derive(Default)]
struct Inner {
    servers: HashMap<ServerId, Server>,
    buffers: HashMap<BufferId, BufferRecord>,
    lines: Vec<Line>,
    last_server_id: ServerId,
    last_buffer_id: BufferId,
}

impl Inner {
    fn compose(&self, record: &BufferRecord) -> Buffer {
        Buffer {
            id: record.id,
            name: record.name.clone(),
            server: record.server.and_then(|id| self.servers.get(&id).cloned()),
        }
    }
}

/// In-memory [`BufferStore`].
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
        }
    }

    /// Seed a buffer directly, bypassing [`BufferStore::ensure_buffer`].
    ///
    /// This is how system buffers (no server) come to exist; the trait surface
    /// only creates server-owned buffers.
    pub async fn add_buffer(&self, name: impl Into<String>, server: Option<ServerId>) -> Buffer {
        let mut inner = self.inner.write().await;
        inner.last_buffer_id += 1;
        let record = BufferRecord {
            id: inner.last_buffer_id,
            name: name.into(),
            server,
        };
        let buffer = inner.compose(&record);
        inner.buffers.insert(record.id, record);
        buffer
    }

    /// Get a server record by ID.
    pub async fn server(&self, id: ServerId) -> Option<Server> {
        self.inner.read().await.servers.get(&id).cloned()
    }

    /// Lines recorded for a buffer, in insertion order.
    pub async fn lines(&self, buffer: BufferId) -> Vec<Line> {
        self.inner
            .read()
            .await
            .lines
            .iter()
            .filter(|line| line.buffer_id == buffer)
            .cloned()
            .collect()
    }

    /// Total number of buffers.
    pub async fn buffer_count(&self) -> usize {
        self.inner.read().await.buffers.len()
    }

    /// Look up a buffer by name and owning server.
    pub async fn find_buffer(&self, name: &str, server: ServerId) -> Option<Buffer> {
        let inner = self.inner.read().await;
        inner
            .buffers
            .values()
            .find(|record| record.name == name && record.server == Some(server))
            .map(|record| inner.compose(record))
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BufferStore for MemoryStore {
    async fn get_buffer(&self, id: BufferId) -> Result<Buffer> {
        let inner = self.inner.read().await;
        inner
            .buffers
            .get(&id)
            .map(|record| inner.compose(record))
            .ok_or_else(|| ConfabError::NotFound(format!("buffer {id}")))
    }

    async fn create_line(
        &self,
        buffer: &Buffer,
        content: &str,
        kind: LineKind,
        nick: &str,
    ) -> Result<()> {
        let mut inner = self.inner.write().await;
        inner.lines.push(Line {
            buffer_id: buffer.id,
            content: content.to_string(),
            kind,
            nick: nick.to_string(),
            timestamp: Utc::now(),
        });
        Ok(())
    }

    async fn ensure_buffer(&self, name: &str, server: ServerId) -> Result<Buffer> {
        let mut inner = self.inner.write().await;
        if let Some(record) = inner
            .buffers
            .values()
            .find(|record| record.name == name && record.server == Some(server))
        {
            return Ok(inner.compose(&record.clone()));
        }

        inner.last_buffer_id += 1;
        let record = BufferRecord {
            id: inner.last_buffer_id,
            name: name.to_string(),
            server: Some(server),
        };
        let buffer = inner.compose(&record);
        inner.buffers.insert(record.id, record);
        Ok(buffer)
    }

    async fn create_server(
        &self,
        host: &str,
        port: u16,
        secure: bool,
        user: UserIdentity,
    ) -> Result<Server> {
        let mut inner = self.inner.write().await;
        inner.last_server_id += 1;
        let server = Server {
            id: inner.last_server_id,
            host: host.to_string(),
            port,
            secure,
            connected: true,
            user,
        };
        inner.servers.insert(server.id, server.clone());
        Ok(server)
    }

    async fn disconnect_server(&self, server: ServerId) -> Result<()> {
        let mut inner = self.inner.write().await;
        match inner.servers.get_mut(&server) {
            Some(record) => {
                record.connected = false;
                Ok(())
            }
            None => Err(ConfabError::NotFound(format!("server {server}"))),
        }
    }
}
