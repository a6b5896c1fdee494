//! SignCall: room signaling and gesture captions for peer-to-peer
//! sign language video calls
//!
//! This crate provides the two core subsystems behind a multi-party
//! captioned video call: a room presence/signaling service that tells
//! every member who else is in the room, and a gesture recognition
//! engine that turns streams of hand-landmark frames into short textual
//! captions.
//!
//! # Features
//! - WebSocket room signaling with membership fan-out
//! - Rule-based recognition of a built-in sign vocabulary
//! - Trainable nearest-prototype matching for user-defined signs
//! - Teaching sessions that persist samples through a storage boundary
//! - Per-user caption history with emoji tagging
//!
//! # Usage
//! ```rust,no_run
//! use signcall::gesture::RecognitionEngine;
//! use signcall::storage::MemorySampleStore;
//! use signcall::SignCallConfig;
//!
//! let config = SignCallConfig::default();
//! let mut engine =
//!     RecognitionEngine::new("demo_user", &config, Box::new(MemorySampleStore::new()));
//! # let frame = signcall::testing::synthetic_data::thumb_up_frame();
//! if let Some(caption) = engine.process_frame(Some(&frame)).unwrap() {
//!     println!("{} {}", caption.text, caption.emoji);
//! }
//! ```
pub mod captions;
pub mod config;
pub mod errors;
pub mod gesture;
pub mod signaling;
pub mod storage;
pub mod types;

// Testing utilities - synthetic hand poses for offline testing
pub mod testing;

// Re-exports for convenience
pub use captions::{CaptionEvent, CaptionLog};
pub use config::SignCallConfig;
pub use errors::SignCallError;
pub use gesture::RecognitionEngine;
pub use signaling::RoomRegistry;
pub use types::{FeatureVector, LandmarkFrame, FEATURE_DIM, LANDMARK_COUNT};

/// Initialize logging for the signaling and recognition subsystems
pub fn init_logging() {
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "signcall=info");
    }
    let _ = env_logger::try_init();
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Get crate information
pub fn get_info() -> CrateInfo {
    CrateInfo {
        name: NAME.to_string(),
        version: VERSION.to_string(),
        description: DESCRIPTION.to_string(),
    }
}

/// Crate information structure
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CrateInfo {
    pub name: String,
    pub version: String,
    pub description: String,
}
