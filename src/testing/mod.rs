//! Testing utilities for SignCall
//!
//! Provides synthetic hand poses matching the standard 21-point
//! topology, enabling reliable offline testing without a camera or a
//! landmark extractor.

pub mod synthetic_data;

pub use synthetic_data::{
    coincident_frame, jittered_palm_frame, open_palm_frame, thumb_down_frame, thumb_up_frame,
    v_sign_frame,
};
