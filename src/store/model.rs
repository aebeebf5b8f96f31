//! Data model for buffers, servers, and lines.

use chrono::{DateTime, Utc};

/// Identifier for a conversation buffer.
pub type BufferId = i64;

/// Identifier for a server record.
pub type ServerId = i64;

/// Reserved sender nick for lines generated by the client itself
/// (command feedback, help text, disconnect banners).
pub const SYSTEM_NICK: &str = "-!-";

/// Kind of a buffer line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Ordinary chat message.
    Message,
    /// Action message (/me).
    Action,
    /// Server notice.
    Notice,
    /// User joined a channel.
    Join,
    /// User left a channel.
    Part,
    /// User quit a server.
    Quit,
    /// Anything else, including client-generated feedback.
    Other,
}

impl LineKind {
    /// Get string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            LineKind::Message => "message",
            LineKind::Action => "action",
            LineKind::Notice => "notice",
            LineKind::Join => "join",
            LineKind::Part => "part",
            LineKind::Quit => "quit",
            LineKind::Other => "other",
        }
    }
}

impl std::fmt::Display for LineKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A user's identity on one server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserIdentity {
    /// Nickname.
    pub nick: String,
    /// Real name sent at registration.
    pub realname: String,
    /// Username sent at registration.
    pub username: String,
}

impl UserIdentity {
    /// Create a new identity.
    pub fn new(
        nick: impl Into<String>,
        realname: impl Into<String>,
        username: impl Into<String>,
    ) -> Self {
        Self {
            nick: nick.into(),
            realname: realname.into(),
            username: username.into(),
        }
    }
}

/// A server record.
#[derive(Debug, Clone)]
pub struct Server {
    /// Server ID assigned by the store.
    pub id: ServerId,
    /// Hostname the connection was opened against.
    pub host: String,
    /// Port number.
    pub port: u16,
    /// Whether the connection uses TLS.
    pub secure: bool,
    /// Whether the server is currently marked connected.
    pub connected: bool,
    /// Identity in use on this server.
    pub user: UserIdentity,
}

/// A conversation buffer (channel, private chat, or system meta-view).
#[derive(Debug, Clone)]
pub struct Buffer {
    /// Buffer ID assigned by the store.
    pub id: BufferId,
    /// Buffer name (channel name, nick of the peer, or a meta name).
    pub name: String,
    /// Owning server; None for system buffers.
    pub server: Option<Server>,
}

impl Buffer {
    /// Check whether this is a system buffer (no owning server).
    pub fn is_system(&self) -> bool {
        self.server.is_none()
    }
}

/// A stored buffer line.
#[derive(Debug, Clone)]
pub struct Line {
    /// Buffer the line belongs to.
    pub buffer_id: BufferId,
    /// Line content.
    pub content: String,
    /// Kind of line.
    pub kind: LineKind,
    /// Sender nick ([`SYSTEM_NICK`] for client-generated lines).
    pub nick: String,
    /// Timestamp when the line was created.
    pub timestamp: DateTime<Utc>,
}
