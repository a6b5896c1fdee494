//! Sliding window of recent feature vectors
//!
//! Summarizes the last ~1-1.5 seconds of hand motion for prototype
//! matching. Oldest frames are evicted first once the window is full.

use crate::types::FeatureVector;
use std::collections::VecDeque;

#[derive(Debug, Clone)]
pub struct WindowBuffer {
    frames: VecDeque<FeatureVector>,
    capacity: usize,
}

impl WindowBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            frames: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a vector, evicting the oldest one at capacity.
    pub fn push(&mut self, vector: FeatureVector) {
        if self.frames.len() == self.capacity {
            self.frames.pop_front();
        }
        self.frames.push_back(vector);
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.frames.len() >= self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Element-wise average of all held vectors, used as the window's
    /// summary representation for matching. `None` when empty.
    pub fn mean_vector(&self) -> Option<FeatureVector> {
        let first = self.frames.front()?;
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

    /// Drain the window. Called after a successful custom-gesture trigger
    /// and after a completed teaching capture so a sign must be
    /// re-performed before it can register again.
    pub fn clear(&mut self) {
        self.frames.clear();
    }

    /// Snapshot of the held vectors in oldest-first order.
    pub fn frames(&self) -> Vec<FeatureVector> {
        self.frames.iter().cloned().collect()
    }
}
