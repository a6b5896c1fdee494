//! Prototype library for user-taught gestures
//!
//! The library is an in-memory view over the authoritative sample store:
//! every persisted sample contributes one mean-pooled prototype vector,
//! grouped by gesture name. Samples of the same name are kept as separate
//! exemplars rather than being merged, which improves match recall across
//! stylistic variation. The library can always be rebuilt from storage.

use crate::storage::{SampleStore, StorageError};
use crate::types::FeatureVector;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One recorded repetition of a taught gesture: a full window of feature
/// vectors tagged with its owner, name, and 1-based sample index.
/// Immutable once stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GestureSample {
    pub user_id: String,
    pub name: String,
    pub sample_idx: u32,
    pub frames: Vec<FeatureVector>,
    pub created_at: DateTime<Utc>,
}

impl GestureSample {
    pub fn new(user_id: String, name: String, sample_idx: u32, frames: Vec<FeatureVector>) -> Self {
        Self {
            user_id,
            name,
            sample_idx,
            frames,
            created_at: Utc::now(),
        }
    }

    /// Mean-pool this sample's frames into one prototype vector.
    /// `None` for a sample with no frames.
    pub fn prototype(&self) -> Option<FeatureVector> {
        let first = self.frames.first()?;
        let dim = first.dim();
        let mut sum = vec![0.0f32; dim];
        for frame in &self.frames {
            for (accumulator, value) in sum.iter_mut().zip(frame.0.iter()) {
                *accumulator += value;
            }
        }
        let inv = 1.0 / self.frames.len() as f32;
        for value in sum.iter_mut() {
            *value *= inv;
        }
        Some(FeatureVector(sum))
    }
}

/// A gesture name with its accumulated prototype vectors (one per sample).
#[derive(Debug, Clone)]
pub struct GesturePrototype {
    pub name: String,
    pub vectors: Vec<FeatureVector>,
}

/// Named collections of prototype vectors for one user.
///
/// Lookup is by full iteration; at personal-dictionary scale an index
/// structure would cost more than it saves. Iteration order is insertion
/// order, which makes tie-breaking in the classifier deterministic.
#[derive(Debug, Clone, Default)]
pub struct PrototypeLibrary {
    entries: Vec<GesturePrototype>,
}

impl PrototypeLibrary {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Build a library from every sample the store holds for `user_id`.
    pub fn from_store(store: &dyn SampleStore, user_id: &str) -> Result<Self, StorageError> {
        let mut library = Self::new();
        for sample in store.load_samples(user_id, None)? {
            library.add_sample(&sample);
        }
        log::info!(
            "Loaded gesture library for {}: {} name(s), {} prototype vector(s)",
            user_id,
            library.len(),
            library.vector_count()
        );
        Ok(library)
    }

    /// Incrementally add one sample's prototype without a full reload.
    /// Empty samples contribute nothing.
    pub fn add_sample(&mut self, sample: &GestureSample) {
        let Some(vector) = sample.prototype() else {
            return;
        };
        match self.entries.iter_mut().find(|e| e.name == sample.name) {
            Some(entry) => entry.vectors.push(vector),
            None => self.entries.push(GesturePrototype {
                name: sample.name.clone(),
                vectors: vec![vector],
            }),
        }
    }

    /// Reconcile with persisted storage by rebuilding from scratch.
    pub fn reload(&mut self, store: &dyn SampleStore, user_id: &str) -> Result<(), StorageError> {
        *self = Self::from_store(store, user_id)?;
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = &GesturePrototype> {
        self.entries.iter()
    }

    /// Number of distinct gesture names.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total prototype vectors across all names.
    pub fn vector_count(&self) -> usize {
        self.entries.iter().map(|e| e.vectors.len()).sum()
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.name.as_str()).collect()
    }
}
