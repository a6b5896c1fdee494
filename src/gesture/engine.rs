//! Per-stream recognition pipeline driver
//!
//! One engine owns the whole gesture path for a single participant's
//! stream: rule classification, window accumulation, prototype matching,
//! and the teaching session. Frames are processed one at a time, since
//! the window is not safe for concurrent mutation, and nothing here blocks
//! on network I/O.

use crate::captions::CaptionEvent;
use crate::config::{SignCallConfig, TeachingConfig};
use crate::errors::SignCallError;
use crate::gesture::classifier::PrototypeClassifier;
use crate::gesture::library::PrototypeLibrary;
use crate::gesture::normalize::normalize;
use crate::gesture::rules::RuleClassifier;
use crate::gesture::teaching::TeachingSession;
use crate::gesture::window::WindowBuffer;
use crate::storage::SampleStore;
use crate::types::LandmarkFrame;
use std::time::Duration;

pub struct RecognitionEngine {
    user_id: String,
    rules: RuleClassifier,
    window: WindowBuffer,
    classifier: PrototypeClassifier,
    library: PrototypeLibrary,
    teaching: TeachingSession,
    teaching_limits: TeachingConfig,
    store: Box<dyn SampleStore>,
}

impl RecognitionEngine {
    /// Build an engine for one user's stream. The library starts empty;
    /// call [`load_library`](Self::load_library) to hydrate it from the
    /// sample store.
    pub fn new(user_id: &str, config: &SignCallConfig, store: Box<dyn SampleStore>) -> Self {
        let recognition = &config.recognition;
        Self {
            user_id: user_id.to_string(),
            rules: RuleClassifier::new(recognition.v_sign_separation),
            window: WindowBuffer::new(recognition.window_frames),
            classifier: PrototypeClassifier::new(
                recognition.similarity_threshold,
                Duration::from_millis(recognition.cooldown_ms),
            ),
            library: PrototypeLibrary::new(),
            teaching: TeachingSession::new(user_id, recognition.window_frames),
            teaching_limits: config.teaching.clone(),
            store,
        }
    }

    /// Rebuild the prototype library from persisted samples.
    pub fn load_library(&mut self) -> Result<(), SignCallError> {
        self.library
            .reload(self.store.as_ref(), &self.user_id)
            .map_err(SignCallError::from)
    }

    pub fn library(&self) -> &PrototypeLibrary {
        &self.library
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Start teaching a new sign; live recognition is suspended until the
    /// session finishes or is cancelled. Returns the effective (clamped)
    /// sample target.
    pub fn start_teaching(&mut self, name: &str, samples: u32) -> Result<u32, SignCallError> {
        let target = self
            .teaching
            .start(name, samples, &self.teaching_limits)?;
        // Fresh motion required once recognition resumes
        self.window.clear();
        Ok(target)
    }

    pub fn cancel_teaching(&mut self) {
        self.teaching.cancel();
    }

    pub fn is_teaching(&self) -> bool {
        self.teaching.is_recording()
    }

    /// Samples captured so far and the session target.
    pub fn teaching_progress(&self) -> (u32, u32) {
        (self.teaching.captured(), self.teaching.target())
    }

    /// Run one landmark frame through the pipeline.
    ///
    /// `None` input means no hand was detected this frame; it is skipped.
    /// While teaching records, frames feed the capture window only. In
    /// live mode the built-in rules run first on the raw frame; a match
    /// emits immediately without touching the window, and only unmatched
    /// frames accumulate toward custom-gesture matching.
    pub fn process_frame(
        &mut self,
        frame: Option<&LandmarkFrame>,
    ) -> Result<Option<CaptionEvent>, SignCallError> {
        let Some(frame) = frame else {
            return Ok(None);
        };

        if self.teaching.is_recording() {
            return match self.teaching.push_frame(frame, self.store.as_mut()) {
                Ok(Some(sample)) => {
                    self.library.add_sample(&sample);
                    Ok(None)
                }
                Ok(None) => Ok(None),
                // Save failures are surfaced but the session keeps running
                Err(e) => Err(e),
            };
        }

        if let Some(sign) = self.rules.classify(frame) {
            log::debug!("Built-in sign recognized for {}: {:?}", self.user_id, sign);
            return Ok(Some(CaptionEvent::builtin(sign)));
        }

        let vector = match normalize(frame) {
            Ok(vector) => vector,
            Err(SignCallError::InsufficientLandmarks { got }) => {
                log::debug!("Skipping partial frame ({} landmarks)", got);
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        self.window.push(vector);
        if let Some(matched) = self.classifier.classify(&mut self.window, &self.library) {
            log::info!(
                "Custom gesture recognized for {}: '{}' ({:.3})",
                self.user_id,
                matched.name,
                matched.score
            );
            return Ok(Some(CaptionEvent::custom(&matched.name)));
        }

        Ok(None)
    }
}
