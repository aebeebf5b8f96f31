//! Test helpers for dispatch tests.
//!
//! Provides a recording server interface and connector plus a harness that
//! wires them to an in-memory store and a dispatcher.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use confab::{
    Buffer, BufferStore, Dispatcher, InterfaceRegistry, MemoryStore, Result, Server,
    ServerConnector, ServerInterface, UserIdentity,
};

/// One protocol action observed by a recording interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProtocolCall {
    Join { channel: String, password: Option<String> },
    Part { channel: String },
    Message { target: String, text: String },
    Nick { new_nick: String },
    Quit { message: String },
}

/// Server interface that journals every call instead of talking to a server.
#[derive(Default)]
pub struct RecordingInterface {
    calls: Mutex<Vec<ProtocolCall>>,
}

impl RecordingInterface {
    fn record(&self, call: ProtocolCall) {
        self.calls.lock().unwrap().push(call);
    }

    /// All calls observed so far, in order.
    pub fn calls(&self) -> Vec<ProtocolCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ServerInterface for RecordingInterface {
    async fn join(&self, channel: &str, password: Option<&str>) -> Result<()> {
        self.record(ProtocolCall::Join {
            channel: channel.to_string(),
            password: password.map(str::to_string),
        });
        Ok(())
    }

    async fn part(&self, channel: &str) -> Result<()> {
        self.record(ProtocolCall::Part {
            channel: channel.to_string(),
        });
        Ok(())
    }

    async fn send_message(&self, target: &str, text: &str) -> Result<()> {
        self.record(ProtocolCall::Message {
            target: target.to_string(),
            text: text.to_string(),
        });
        Ok(())
    }

    async fn change_nick(&self, new_nick: &str) -> Result<()> {
        self.record(ProtocolCall::Nick {
            new_nick: new_nick.to_string(),
        });
        Ok(())
    }

    async fn quit(&self, message: &str) -> Result<()> {
        self.record(ProtocolCall::Quit {
            message: message.to_string(),
        });
        Ok(())
    }
}

/// Connector that hands out fresh recording interfaces.
#[derive(Default)]
pub struct RecordingConnector {
    created: Mutex<Vec<Arc<RecordingInterface>>>,
}

impl RecordingConnector {
    /// Interfaces created so far, in creation order.
    pub fn created(&self) -> Vec<Arc<RecordingInterface>> {
        self.created.lock().unwrap().clone()
    }
}

#[async_trait]
impl ServerConnector for RecordingConnector {
    async fn connect(&self, _server: &Server) -> Result<Arc<dyn ServerInterface>> {
        let interface = Arc::new(RecordingInterface::default());
        self.created.lock().unwrap().push(Arc::clone(&interface));
        Ok(interface)
    }
}

/// Identity used for seeded servers.
pub fn test_identity() -> UserIdentity {
    UserIdentity::new("alice", "Alice Example", "alice")
}

/// A dispatcher wired to an in-memory store, a recording connector and a
/// shared interface registry, with seeding helpers for buffers.
pub struct Harness {
    pub store: Arc<MemoryStore>,
    pub interfaces: Arc<InterfaceRegistry>,
    pub connector: Arc<RecordingConnector>,
    pub dispatcher: Dispatcher,
}

impl Harness {
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let interfaces = Arc::new(InterfaceRegistry::new());
        let connector = Arc::new(RecordingConnector::default());
        let dispatcher = Dispatcher::new(
            store.clone(),
            connector.clone(),
            interfaces.clone(),
        );
        Self {
            store,
            interfaces,
            connector,
            dispatcher,
        }
    }

    /// A buffer on a connected server; returns the buffer and the recording
    /// interface registered for that server.
    pub async fn connected_buffer(&self, name: &str) -> (Buffer, Arc<RecordingInterface>) {
        let server = self
            .store
            .create_server("irc.example.org", 6697, true, test_identity())
            .await
            .unwrap();
        let interface = Arc::new(RecordingInterface::default());
        self.interfaces
            .insert(server.id, interface.clone())
            .await;
        let buffer = self.store.add_buffer(name, Some(server.id)).await;
        (buffer, interface)
    }

    /// A buffer on a server with no live interface registered.
    pub async fn disconnected_buffer(&self, name: &str) -> Buffer {
        let server = self
            .store
            .create_server("irc.example.org", 6697, true, test_identity())
            .await
            .unwrap();
        self.store.add_buffer(name, Some(server.id)).await
    }

    /// A buffer with no server at all.
    pub async fn system_buffer(&self) -> Buffer {
        self.store.add_buffer("status", None).await
    }

    /// Line contents recorded in a buffer, in order.
    pub async fn lines(&self, buffer: &Buffer) -> Vec<String> {
        self.store
            .lines(buffer.id)
            .await
            .into_iter()
            .map(|line| line.content)
            .collect()
    }
}

impl Default for Harness {
    fn default() -> Self {
        Self::new()
    }
}
