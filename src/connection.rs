//! Server connection boundary.
//!
//! This module defines the outward-facing seam of the command layer:
//! - [`ServerInterface`], the protocol actions a live connection accepts
//! - [`ServerConnector`], the factory that opens new connections
//! - [`InterfaceRegistry`], the shared map from server ID to live interface
//!
//! Everything network-shaped lives behind these traits so the dispatcher can
//! be driven against recording fakes in tests.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::store::{Server, ServerId};
use crate::Result;

/// Protocol actions available on a live server connection.
///
/// Implementations are expected to be cheap fire-and-forget wrappers around
/// an outbound message queue; errors mean the message could not be queued,
/// not that the server rejected it.
#[async_trait]
pub trait ServerInterface: Send + Sync {
    /// Join a channel, optionally with a key.
    async fn join(&self, channel: &str, password: Option<&str>) -> Result<()>;

    /// Leave a channel.
    async fn part(&self, channel: &str) -> Result<()>;

    /// Send a message to a channel or nick.
    async fn send_message(&self, target: &str, text: &str) -> Result<()>;

    /// Change the connection's nick.
    async fn change_nick(&self, new_nick: &str) -> Result<()>;

    /// Quit the server with a parting message.
    async fn quit(&self, message: &str) -> Result<()>;
}

/// Factory for opening connections to servers.
#[async_trait]
pub trait ServerConnector: Send + Sync {
    /// Open a connection for the given server record and return its
    /// interface once the connection is established.
    async fn connect(&self, server: &Server) -> Result<Arc<dyn ServerInterface>>;
}

/// Registry of live server interfaces.
///
/// This is shared across all sessions and provides thread-safe access to
/// the interface for each connected server.
pub struct InterfaceRegistry {
    /// Interfaces indexed by server ID.
    interfaces: RwLock<HashMap<ServerId, Arc<dyn ServerInterface>>>,
}

impl InterfaceRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            interfaces: RwLock::new(HashMap::new()),
        }
    }

    /// Get the interface for a server, if it is connected.
    pub async fn get(&self, server: ServerId) -> Option<Arc<dyn ServerInterface>> {
        self.interfaces.read().await.get(&server).cloned()
    }

    /// Register the interface for a server, replacing any previous one.
    pub async fn insert(&self, server: ServerId, interface: Arc<dyn ServerInterface>) {
        self.interfaces.write().await.insert(server, interface);
    }

    /// Remove a server's interface.
    ///
    /// Returns the removed interface so a caller may still send a final
    /// message on it.
    pub async fn remove(&self, server: ServerId) -> Option<Arc<dyn ServerInterface>> {
        self.interfaces.write().await.remove(&server)
    }

    /// Whether a server currently has a registered interface.
    pub async fn contains(&self, server: ServerId) -> bool {
        self.interfaces.read().await.contains_key(&server)
    }

    /// Number of registered interfaces.
    pub async fn count(&self) -> usize {
        self.interfaces.read().await.len()
    }
}

impl Default for InterfaceRegistry {
    fn default() -> Self {
        Self::new()
    }
}
