//! Room registry integration tests
//!
//! Exercises the connect/announce/disconnect lifecycle the way the
//! WebSocket endpoint drives it: each member holds an unbounded channel
//! standing in for its socket writer.

use signcall::signaling::messages::ServerMessage;
use signcall::signaling::RoomRegistry;
use tokio::sync::mpsc;

type Receiver = mpsc::UnboundedReceiver<ServerMessage>;

fn peers_of(message: ServerMessage) -> Vec<String> {
    let ServerMessage::Peers { mut peers } = message;
    peers.sort();
    peers
}

fn drain_last(rx: &mut Receiver) -> Option<ServerMessage> {
    let mut last = None;
    while let Ok(message) = rx.try_recv() {
        last = Some(message);
    }
    last
}

/// Three members join room "R" and announce A, B, C in sequence: every
/// announce broadcasts the cumulative set, and C's disconnect shrinks the
/// list back to {A, B}.
#[tokio::test]
async fn test_three_member_room_lifecycle() {
    let registry = RoomRegistry::new();

    let (tx_a, mut rx_a) = mpsc::unbounded_channel();
    let (tx_b, mut rx_b) = mpsc::unbounded_channel();
    let (tx_c, mut rx_c) = mpsc::unbounded_channel();

    let a = registry.connect("R", tx_a).await;
    let b = registry.connect("R", tx_b).await;
    let c = registry.connect("R", tx_c).await;

    // Joining alone announces nothing
    assert!(rx_a.try_recv().is_err());

    registry.announce("R", a, "A").await;
    assert_eq!(peers_of(rx_a.recv().await.unwrap()), vec!["A"]);

    registry.announce("R", b, "B").await;
    assert_eq!(peers_of(rx_b.recv().await.unwrap()), vec!["A", "B"]);

    registry.announce("R", c, "C").await;
    assert_eq!(peers_of(rx_c.recv().await.unwrap()), vec!["A", "B", "C"]);

    registry.disconnect("R", c).await;
    assert_eq!(peers_of(drain_last(&mut rx_a).unwrap()), vec!["A", "B"]);
    assert_eq!(peers_of(drain_last(&mut rx_b).unwrap()), vec!["A", "B"]);
    assert_eq!(registry.member_count("R").await, 2);
}

/// A member that vanished mid-close (receiver dropped) must not prevent
/// delivery to the healthy members, and must disappear after its own
/// disconnect runs.
#[tokio::test]
async fn test_dead_member_does_not_poison_broadcast() {
    let registry = RoomRegistry::new();

    let (tx_a, mut rx_a) = mpsc::unbounded_channel();
    let (tx_dead, rx_dead) = mpsc::unbounded_channel();

    let a = registry.connect("R", tx_a).await;
    let dead = registry.connect("R", tx_dead).await;
    registry.announce("R", dead, "ghost").await;
    drop(rx_dead);
    let _ = drain_last(&mut rx_a);

    registry.announce("R", a, "A").await;
    assert_eq!(
        peers_of(rx_a.recv().await.unwrap()),
        vec!["A", "ghost"]
    );

    registry.disconnect("R", dead).await;
    assert_eq!(peers_of(rx_a.recv().await.unwrap()), vec!["A"]);
}

/// Disconnecting before the hello handshake completes leaves no residue
/// and broadcasts to the remaining members.
#[tokio::test]
async fn test_disconnect_mid_handshake() {
    let registry = RoomRegistry::new();

    let (tx_a, mut rx_a) = mpsc::unbounded_channel();
    let (tx_b, _rx_b) = mpsc::unbounded_channel();

    let a = registry.connect("R", tx_a).await;
    let b = registry.connect("R", tx_b).await;
    registry.announce("R", a, "A").await;
    let _ = rx_a.recv().await;

    // B never announced; its departure still triggers a broadcast
    registry.disconnect("R", b).await;
    assert_eq!(peers_of(rx_a.recv().await.unwrap()), vec!["A"]);
    assert_eq!(registry.member_count("R").await, 1);
}

/// Concurrent announces on one room settle on a final broadcast listing
/// every announced peer.
#[tokio::test]
async fn test_concurrent_announces_converge() {
    let registry = std::sync::Arc::new(RoomRegistry::new());

    let mut receivers = Vec::new();
    let mut handles = Vec::new();
    for i in 0..8 {
        let (tx, rx) = mpsc::unbounded_channel();
        let connection = registry.connect("busy", tx).await;
        receivers.push(rx);
        let registry = std::sync::Arc::clone(&registry);
        handles.push(tokio::spawn(async move {
            registry
                .announce("busy", connection, &format!("peer-{}", i))
                .await;
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let mut peers = registry.peer_ids("busy").await;
    peers.sort();
    let expected: Vec<String> = (0..8).map(|i| format!("peer-{}", i)).collect();
    assert_eq!(peers, expected);
}
