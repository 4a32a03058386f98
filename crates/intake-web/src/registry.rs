//! Connection registry for broadcast fan-out.
//!
//! Tracks every open real-time channel as an unbounded sender of outbound
//! protocol messages. A slow or dead client can never block the broadcast
//! turn: delivery is a queue push, and a failed push prunes the channel.

use std::collections::HashMap;

use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;

use crate::protocol::ServerMessage;

/// Routing identity of one connected client.
pub type ConnectionId = u64;

/// The set of currently open channels.
#[derive(Debug, Default)]
pub struct ConnectionRegistry {
    next_id: ConnectionId,
    channels: HashMap<ConnectionId, UnboundedSender<ServerMessage>>,
}

impl ConnectionRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a channel to the broadcast set and return its id.
    pub fn register(&mut self, sender: UnboundedSender<ServerMessage>) -> ConnectionId {
        let id = self.next_id;
        self.next_id += 1;
        self.channels.insert(id, sender);
        id
    }

    /// Remove a channel. Unregistering an unknown or already-removed id is
    /// a no-op.
    pub fn unregister(&mut self, id: ConnectionId) {
        self.channels.remove(&id);
    }

    /// Queue a message for one channel. Returns false if the channel is
    /// gone, in which case it is pruned.
    pub fn send_to(&mut self, id: ConnectionId, message: ServerMessage) -> bool {
        match self.channels.get(&id) {
            Some(sender) if sender.send(message).is_ok() => true,
            Some(_) => {
                debug!(conn_id = id, "channel closed, pruning");
                self.channels.remove(&id);
                false
            }
            None => false,
        }
    }

    /// Queue a message for every registered channel. A failed delivery is
    /// logged and the dead channel pruned; the remaining channels still
    /// receive the message.
    pub fn broadcast(&mut self, message: &ServerMessage) {
        let mut dead: Vec<ConnectionId> = Vec::new();
        for (id, sender) in &self.channels {
            if sender.send(message.clone()).is_err() {
                debug!(conn_id = id, "broadcast delivery failed, pruning channel");
                dead.push(*id);
            }
        }
        for id in dead {
            self.channels.remove(&id);
        }
    }

    /// Number of registered channels.
    pub fn len(&self) -> usize {
        self.channels.len()
    }

    /// Whether no channels are registered.
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }
}
