//! Signaling wire messages
//!
//! JSON messages exchanged over the per-member signaling channel, tagged
//! by a `type` field. Unknown types received from clients are ignored, not
//! rejected, so the protocol can grow without breaking old servers.

use serde::{Deserialize, Serialize};

/// Messages a client sends to the signaling server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ClientMessage {
    /// Announces presence: the sender's media-transport peer id plus its
    /// user id. A connection exists before this arrives; only announced
    /// peers appear in membership broadcasts.
    #[serde(rename_all = "camelCase")]
    Hello {
        #[serde(default)]
        peer_id: String,
        #[serde(default)]
        user_id: String,
    },
}

/// Messages the server pushes to room members.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ServerMessage {
    /// Current set of announced peer ids in the room (own id included),
    /// pushed on every membership change.
    Peers { peers: Vec<String> },
}

/// Messages room members exchange directly, peer-to-peer, once the peer
/// set is known. The signaling server never inspects or forwards these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PeerMessage {
    Caption {
        text: String,
        #[serde(default)]
        emoji: String,
    },
}
