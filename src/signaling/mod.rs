//! Room presence and signaling: who is in which room, and telling
//! everyone when that changes.

pub mod messages;
pub mod registry;
pub mod server;

pub use messages::{ClientMessage, PeerMessage, ServerMessage};
pub use registry::{ConnectionId, RoomRegistry};
