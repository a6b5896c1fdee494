//! Room registry: membership tracking and peer-set fan-out
//!
//! Each room maps live connections to their announced peer ids. Every
//! mutation recomputes the announced peer set under the room's own lock
//! and fans the snapshot out to all members after the lock is released,
//! so slow deliveries never stall membership changes and distinct rooms
//! never contend with each other.

use crate::signaling::messages::ServerMessage;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{mpsc, RwLock};
use uuid::Uuid;

/// Opaque identifier for one signaling connection.
pub type ConnectionId = Uuid;

/// Outbound handle for one member; sends never block.
pub type MemberSender = mpsc::UnboundedSender<ServerMessage>;

#[derive(Debug)]
struct RoomMember {
    /// Empty until the member's hello announces it.
    peer_id: String,
    sender: MemberSender,
}

/// One room's membership. The member map is guarded by the room's own
/// lock; a connection belongs to exactly one room for its lifetime.
#[derive(Debug, Default)]
struct Room {
    members: RwLock<HashMap<ConnectionId, RoomMember>>,
}

impl Room {
    /// Announced (non-empty) peer ids plus every member's sender.
    /// Callers hold the snapshot, not the lock, while delivering.
    async fn snapshot(&self) -> (Vec<String>, Vec<(ConnectionId, MemberSender)>) {
        let members = self.members.read().await;
        Self::snapshot_locked(&members)
    }

    fn snapshot_locked(
        members: &HashMap<ConnectionId, RoomMember>,
    ) -> (Vec<String>, Vec<(ConnectionId, MemberSender)>) {
        let peers = members
            .values()
            .filter(|m| !m.peer_id.is_empty())
            .map(|m| m.peer_id.clone())
            .collect();
        let senders = members
            .iter()
            .map(|(id, m)| (*id, m.sender.clone()))
            .collect();
        (peers, senders)
    }
}

/// Process-wide registry of live rooms, keyed by room code.
///
/// Rooms are created lazily on first connect and never torn down; an
/// empty room costs only an empty map.
#[derive(Debug, Default)]
pub struct RoomRegistry {
    rooms: RwLock<HashMap<String, Arc<Room>>>,
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    async fn room(&self, code: &str) -> Arc<Room> {
        {
            let rooms = self.rooms.read().await;
            if let Some(room) = rooms.get(code) {
                return Arc::clone(room);
            }
        }
        let mut rooms = self.rooms.write().await;
        Arc::clone(rooms.entry(code.to_string()).or_default())
    }

    /// Register a new connection in `code`, creating the room if needed.
    /// No broadcast: nothing other members need has changed yet.
    pub async fn connect(&self, code: &str, sender: MemberSender) -> ConnectionId {
        let id = Uuid::new_v4();
        let room = self.room(code).await;
        let mut members = room.members.write().await;
        members.insert(
            id,
            RoomMember {
                peer_id: String::new(),
                sender,
            },
        );
        log::info!("Connection {} joined room {}", id, code);
        id
    }

    /// Set or update the peer id for a connection, then broadcast the
    /// updated peer list. Unknown connections are ignored.
    pub async fn announce(&self, code: &str, connection: ConnectionId, peer_id: &str) {
        let room = self.room(code).await;
        let snapshot = {
            let mut members = room.members.write().await;
            let Some(member) = members.get_mut(&connection) else {
                log::warn!("Announce for unknown connection {} in room {}", connection, code);
                return;
            };
            member.peer_id = peer_id.to_string();
            Room::snapshot_locked(&members)
        };
        log::info!(
            "Connection {} announced peer '{}' in room {}",
            connection,
            peer_id,
            code
        );
        Self::deliver(code, snapshot);
    }

    /// Remove a connection and its identifier, then broadcast the updated
    /// peer list to the remaining members.
    pub async fn disconnect(&self, code: &str, connection: ConnectionId) {
        let room = self.room(code).await;
        let snapshot = {
            let mut members = room.members.write().await;
            if members.remove(&connection).is_none() {
                return;
            }
            Room::snapshot_locked(&members)
        };
        log::info!("Connection {} left room {}", connection, code);
        Self::deliver(code, snapshot);
    }

    /// Push the current peer set to every member of `code`.
    pub async fn broadcast(&self, code: &str) {
        let room = self.room(code).await;
        let snapshot = room.snapshot().await;
        Self::deliver(code, snapshot);
    }

    /// Announced peer ids currently in `code`.
    pub async fn peer_ids(&self, code: &str) -> Vec<String> {
        let room = self.room(code).await;
        room.snapshot().await.0
    }

    /// Connections (announced or not) currently in `code`.
    pub async fn member_count(&self, code: &str) -> usize {
        let room = self.room(code).await;
        let count = room.members.read().await.len();
        count
    }

    pub async fn room_count(&self) -> usize {
        self.rooms.read().await.len()
    }

    /// Fan a peer-set snapshot out to every member. A failed send to one
    /// member (its channel already closed) is logged and skipped; that
    /// member's own disconnect path cleans it up.
    fn deliver(code: &str, snapshot: (Vec<String>, Vec<(ConnectionId, MemberSender)>)) {
        let (peers, targets) = snapshot;
        let message = ServerMessage::Peers { peers };
        for (id, sender) in targets {
            if sender.send(message.clone()).is_err() {
                log::warn!(
                    "Failed to deliver peer list to connection {} in room {}",
                    id,
                    code
                );
            }
        }
    }
}
