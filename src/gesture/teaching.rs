//! Teaching sessions for user-defined signs
//!
//! Captures a target number of whole-window samples for a new gesture name
//! and hands each one to the persistence boundary as it completes. While a
//! session records, live recognition on the same stream is suspended.

use crate::config::TeachingConfig;
use crate::errors::SignCallError;
use crate::gesture::library::GestureSample;
use crate::gesture::normalize::normalize;
use crate::gesture::window::WindowBuffer;
use crate::storage::SampleStore;
use crate::types::LandmarkFrame;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeachingState {
    Idle,
    Recording,
}

#[derive(Debug)]
pub struct TeachingSession {
    state: TeachingState,
    user_id: String,
    name: String,
    target: u32,
    captured: u32,
    window: WindowBuffer,
}

impl TeachingSession {
    pub fn new(user_id: &str, window_frames: usize) -> Self {
        Self {
            state: TeachingState::Idle,
            user_id: user_id.to_string(),
            name: String::new(),
            target: 0,
            captured: 0,
            window: WindowBuffer::new(window_frames),
        }
    }

    /// Begin recording samples for `name`. The requested sample count is
    /// clamped into the configured range; the effective target is returned.
    pub fn start(
        &mut self,
        name: &str,
        requested_samples: u32,
        limits: &TeachingConfig,
    ) -> Result<u32, SignCallError> {
        if name.trim().is_empty() {
            return Err(SignCallError::TeachingError(
                "Gesture name must not be empty".to_string(),
            ));
        }
        if self.state == TeachingState::Recording {
            return Err(SignCallError::TeachingError(format!(
                "Already recording samples for '{}'",
                self.name
            )));
        }

        let target = requested_samples.clamp(limits.min_samples, limits.max_samples);
        self.state = TeachingState::Recording;
        self.name = name.trim().to_string();
        self.target = target;
        self.captured = 0;
        self.window.clear();

        log::info!(
            "Teaching started for user {}: '{}', {} sample(s)",
            self.user_id,
            self.name,
            target
        );
        Ok(target)
    }

    pub fn state(&self) -> TeachingState {
        self.state
    }

    pub fn is_recording(&self) -> bool {
        self.state == TeachingState::Recording
    }

    pub fn captured(&self) -> u32 {
        self.captured
    }

    pub fn target(&self) -> u32 {
        self.target
    }

    pub fn gesture_name(&self) -> &str {
        &self.name
    }

    /// Feed one frame into the capture window.
    ///
    /// Each time the window fills, the whole sequence is emitted as one
    /// sample (1-based index), saved through the store, and the window is
    /// cleared to begin the next repetition. Partial frames are skipped
    /// rather than zero-filled, so capture duration scales with how
    /// reliably the hand is visible.
    ///
    /// A failed save is surfaced to the caller but does NOT roll back the
    /// sample count (the physical gesture was genuinely captured), and
    /// the session keeps accepting frames.
    pub fn push_frame(
        &mut self,
        frame: &LandmarkFrame,
        store: &mut dyn SampleStore,
    ) -> Result<Option<GestureSample>, SignCallError> {
        if self.state != TeachingState::Recording {
            return Ok(None);
        }

        let vector = match normalize(frame) {
            Ok(vector) => vector,
            Err(SignCallError::InsufficientLandmarks { got }) => {
                log::debug!("Teaching: skipping partial frame ({} landmarks)", got);
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        self.window.push(vector);
        if !self.window.is_full() {
            return Ok(None);
        }

        self.captured += 1;
        let sample = GestureSample::new(
            self.user_id.clone(),
            self.name.clone(),
            self.captured,
            self.window.frames(),
        );
        self.window.clear();

        if self.captured >= self.target {
            log::info!(
                "Teaching complete for user {}: '{}' ({} samples)",
                self.user_id,
                self.name,
                self.captured
            );
            self.state = TeachingState::Idle;
        }

        if let Err(e) = store.save_sample(&sample) {
            log::warn!(
                "Failed to persist sample {} of '{}': {}",
                sample.sample_idx,
                sample.name,
                e
            );
            return Err(SignCallError::PersistenceFailure(e.to_string()));
        }

        Ok(Some(sample))
    }

    /// Stop recording. A partially captured in-progress window is
    /// discarded, never persisted as a partial sample.
    pub fn cancel(&mut self) {
        if self.state == TeachingState::Recording {
            log::info!(
                "Teaching cancelled for user {}: '{}' after {} sample(s)",
                self.user_id,
                self.name,
                self.captured
            );
        }
        self.state = TeachingState::Idle;
        self.window.clear();
    }
}
