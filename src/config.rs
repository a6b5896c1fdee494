//! Configuration management for SignCall
//!
//! Provides configuration loading, saving, and management for recognition
//! thresholds, teaching limits, signaling endpoints, and sample storage.
//! The recognition defaults are the empirically tuned values the system
//! shipped with; treat them as starting points, not invariants.

use crate::errors::SignCallError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignCallConfig {
    pub recognition: RecognitionConfig,
    pub teaching: TeachingConfig,
    pub signaling: SignalingConfig,
    pub storage: StorageConfig,
}

/// Gesture recognition configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecognitionConfig {
    /// Sliding window length in frames (~1-1.5s at typical sampling rates)
    pub window_frames: usize,
    /// Minimum cosine similarity for a custom gesture to fire (0.0-1.0)
    pub similarity_threshold: f32,
    /// Cooldown after a custom gesture fires, in milliseconds
    pub cooldown_ms: u64,
    /// Minimum horizontal fingertip separation for the V-sign rule,
    /// in normalized image-space units
    pub v_sign_separation: f32,
}

/// Teaching session configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeachingConfig {
    /// Minimum samples per taught gesture
    pub min_samples: u32,
    /// Maximum samples per taught gesture
    pub max_samples: u32,
}

/// Signaling server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalingConfig {
    /// Bind address for the WebSocket signaling endpoint
    pub bind_address: String,
    /// Bind port
    pub port: u16,
}

/// Sample storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding persisted gesture samples (one JSON file per user)
    pub samples_directory: String,
}

impl Default for SignCallConfig {
    fn default() -> Self {
        Self {
            recognition: RecognitionConfig {
                window_frames: 36,
                similarity_threshold: 0.92,
                cooldown_ms: 1500,
                v_sign_separation: 0.05,
            },
            teaching: TeachingConfig {
                min_samples: 5,
                max_samples: 20,
            },
            signaling: SignalingConfig {
                bind_address: "127.0.0.1".to_string(),
                port: 8003,
            },
            storage: StorageConfig {
                samples_directory: "./samples".to_string(),
            },
        }
    }
}

impl SignCallConfig {
    /// Load configuration from TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, SignCallError> {
        let path = path.as_ref();

        if !path.exists() {
            log::info!("Config file not found at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).map_err(|e| {
            SignCallError::ConfigError(format!("Failed to read config file: {}", e))
        })?;

        let config: SignCallConfig = toml::from_str(&contents).map_err(|e| {
            SignCallError::ConfigError(format!("Failed to parse config file: {}", e))
        })?;

        log::info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), SignCallError> {
        let path = path.as_ref();

        // Create parent directories if needed
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                SignCallError::ConfigError(format!("Failed to create config directory: {}", e))
            })?;
        }

        let toml_string = toml::to_string_pretty(self).map_err(|e| {
            SignCallError::ConfigError(format!("Failed to serialize config: {}", e))
        })?;

        fs::write(path, toml_string).map_err(|e| {
            SignCallError::ConfigError(format!("Failed to write config file: {}", e))
        })?;

        log::info!("Saved configuration to {:?}", path);
        Ok(())
    }

    /// Get default config file path
    pub fn default_path() -> PathBuf {
        PathBuf::from("signcall.toml")
    }

    /// Load from default location or create with defaults
    pub fn load_or_default() -> Self {
        Self::load_from_file(Self::default_path()).unwrap_or_else(|e| {
            log::warn!("Failed to load config, using defaults: {}", e);
            Self::default()
        })
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        // Validate recognition config
        if self.recognition.window_frames < 2 || self.recognition.window_frames > 600 {
            return Err("Window length must be between 2 and 600 frames".to_string());
        }
        if !(0.0..=1.0).contains(&self.recognition.similarity_threshold) {
            return Err("Similarity threshold must be between 0.0 and 1.0".to_string());
        }
        if self.recognition.cooldown_ms > 60_000 {
            return Err("Cooldown must be at most 60000 ms".to_string());
        }
        if !(0.0..=1.0).contains(&self.recognition.v_sign_separation) {
            return Err("V-sign separation must be between 0.0 and 1.0".to_string());
        }

        // Validate teaching config
        if self.teaching.min_samples == 0 {
            return Err("Minimum sample count must be at least 1".to_string());
        }
        if self.teaching.min_samples > self.teaching.max_samples {
            return Err("Minimum sample count must not exceed maximum".to_string());
        }

        // Validate signaling config
        if self.signaling.bind_address.is_empty() {
            return Err("Bind address must not be empty".to_string());
        }

        // Validate storage config
        if self.storage.samples_directory.is_empty() {
            return Err("Samples directory must not be empty".to_string());
        }

        Ok(())
    }
}
