//! Caption events and caption history
//!
//! A caption is the textual output of the pipeline: either a built-in sign,
//! a custom gesture name, or transcribed speech handed in from outside.
//! Captions travel to other room members peer-to-peer; this module only
//! produces the events and keeps the per-user history log.

use crate::gesture::rules::BuiltinSign;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Emoji attached to every recognized custom gesture.
pub const CUSTOM_SIGN_EMOJI: &str = "🖐";

lazy_static::lazy_static! {
    /// Known sign text to emoji mapping, keyed lowercase.
    pub static ref EMOJI_MAP: HashMap<&'static str, &'static str> = {
        let mut map = HashMap::new();
        map.insert("yes", "👍");
        map.insert("no", "👎");
        map.insert("hello", "✌");
        map
    };
}

/// Look up the emoji for a known caption text, case-insensitively.
pub fn emoji_for(text: &str) -> Option<&'static str> {
    EMOJI_MAP.get(text.trim().to_lowercase().as_str()).copied()
}

/// One caption produced by the recognition pipeline (or by speech capture).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptionEvent {
    pub text: String,
    pub emoji: String,
}

impl CaptionEvent {
    pub fn new(text: impl Into<String>, emoji: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            emoji: emoji.into(),
        }
    }

    pub fn builtin(sign: BuiltinSign) -> Self {
        Self::new(sign.text(), sign.emoji())
    }

    pub fn custom(name: &str) -> Self {
        Self::new(name, CUSTOM_SIGN_EMOJI)
    }
}

/// A persisted caption history row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptionRecord {
    pub user_id: String,
    pub content: String,
    pub emoji: String,
    pub language: String,
    pub timestamp: DateTime<Utc>,
}

/// In-memory caption history, ordered by submission time.
#[derive(Debug, Default)]
pub struct CaptionLog {
    records: Vec<CaptionRecord>,
}

impl CaptionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a caption for a user. When no emoji is supplied and the text
    /// matches a known sign, the mapped emoji is filled in automatically.
    pub fn submit(
        &mut self,
        user_id: &str,
        content: &str,
        emoji: Option<&str>,
        language: &str,
    ) -> CaptionRecord {
        let emoji = match emoji {
            Some(e) if !e.is_empty() => e.to_string(),
            _ => emoji_for(content).unwrap_or("").to_string(),
        };

        let record = CaptionRecord {
            user_id: user_id.to_string(),
            content: content.to_string(),
            emoji,
            language: language.to_string(),
            timestamp: Utc::now(),
        };
        self.records.push(record.clone());
        record
    }

    /// A user's caption history in submission order.
    pub fn history(&self, user_id: &str) -> Vec<&CaptionRecord> {
        self.records
            .iter()
            .filter(|r| r.user_id == user_id)
            .collect()
    }

    /// Drop all of a user's history.
    pub fn clear(&mut self, user_id: &str) {
        self.records.retain(|r| r.user_id != user_id);
    }
}
