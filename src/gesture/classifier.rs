//! Nearest-prototype matching over the current window
//!
//! Scores the window's mean vector against every prototype vector in the
//! library by cosine similarity. A match fires only above the configured
//! threshold and is followed by a cooldown plus a window clear, so one
//! held gesture emits one event instead of a stream of duplicates.

use crate::gesture::library::PrototypeLibrary;
use crate::gesture::window::WindowBuffer;
use crate::types::FeatureVector;
use std::time::{Duration, Instant};

/// Additive floor in the cosine denominator; keeps degenerate all-zero
/// vectors from dividing by zero.
const COSINE_EPSILON: f32 = 1e-9;

/// Cosine similarity between two equal-dimension vectors.
pub fn cosine_similarity(a: &FeatureVector, b: &FeatureVector) -> f32 {
    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;
    for (va, vb) in a.0.iter().zip(b.0.iter()) {
        dot += va * vb;
        norm_a += va * va;
        norm_b += vb * vb;
    }
    dot / (norm_a.sqrt() * norm_b.sqrt() + COSINE_EPSILON)
}

/// A fired match: gesture name plus its confidence score.
#[derive(Debug, Clone, PartialEq)]
pub struct PrototypeMatch {
    pub name: String,
    pub score: f32,
}

#[derive(Debug, Clone)]
pub struct PrototypeClassifier {
    threshold: f32,
    cooldown: Duration,
    cooldown_until: Option<Instant>,
}

impl PrototypeClassifier {
    pub fn new(threshold: f32, cooldown: Duration) -> Self {
        Self {
            threshold,
            cooldown,
            cooldown_until: None,
        }
    }

    /// Match the window against the library, firing at most one event.
    ///
    /// Yields `None` while the window is not yet full, the library is
    /// empty, the cooldown has not elapsed, or the best score falls below
    /// the threshold; none of these are error conditions. On a fire the
    /// window is cleared so the sign must be re-performed to trigger again.
    pub fn classify(
        &mut self,
        window: &mut WindowBuffer,
        library: &PrototypeLibrary,
    ) -> Option<PrototypeMatch> {
        self.classify_at(Instant::now(), window, library)
    }

    fn classify_at(
        &mut self,
        now: Instant,
        window: &mut WindowBuffer,
        library: &PrototypeLibrary,
    ) -> Option<PrototypeMatch> {
        if !window.is_full() || library.is_empty() {
            return None;
        }
        if let Some(until) = self.cooldown_until {
            if now < until {
                return None;
            }
        }

        let current = window.mean_vector()?;

        let mut best: Option<PrototypeMatch> = None;
        for entry in library.iter() {
            for vector in &entry.vectors {
                let score = cosine_similarity(&current, vector);
                // Strict comparison: ties go to the first-seen prototype
                if best.as_ref().map_or(true, |b| score > b.score) {
                    best = Some(PrototypeMatch {
                        name: entry.name.clone(),
                        score,
                    });
                }
            }
        }

        let best = best?;
        if best.score < self.threshold {
            return None;
        }

        log::debug!(
            "Custom gesture fired: {} (score {:.4})",
            best.name,
            best.score
        );
        self.cooldown_until = Some(now + self.cooldown);
        window.clear();
        Some(best)
    }

    /// Whether the post-fire cooldown is currently suppressing matches.
    pub fn in_cooldown(&self) -> bool {
        self.cooldown_until
            .map_or(false, |until| Instant::now() < until)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::library::GestureSample;

    fn library_with(entries: &[(&str, Vec<f32>)]) -> PrototypeLibrary {
        let mut library = PrototypeLibrary::new();
        for (i, (name, values)) in entries.iter().enumerate() {
            library.add_sample(&GestureSample::new(
                "user-1".to_string(),
                name.to_string(),
                i as u32 + 1,
                vec![FeatureVector(values.clone())],
            ));
        }
        library
    }

    fn full_window(values: &[f32], capacity: usize) -> WindowBuffer {
        let mut window = WindowBuffer::new(capacity);
        for _ in 0..capacity {
            window.push(FeatureVector(values.to_vec()));
        }
        window
    }

    #[test]
    fn test_cosine_identical_is_one() {
        let a = FeatureVector(vec![0.3, -0.2, 0.9]);
        let score = cosine_similarity(&a, &a.clone());
        assert!((score - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_cosine_orthogonal_is_zero() {
        let a = FeatureVector(vec![1.0, 0.0]);
        let b = FeatureVector(vec![0.0, 1.0]);
        assert!(cosine_similarity(&a, &b).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_zero_vectors_do_not_divide_by_zero() {
        let a = FeatureVector(vec![0.0, 0.0]);
        let score = cosine_similarity(&a, &a.clone());
        assert!(score.is_finite());
    }

    #[test]
    fn test_exact_match_fires() {
        let mut classifier = PrototypeClassifier::new(0.92, Duration::from_millis(1500));
        let library = library_with(&[("wave", vec![0.5, 0.5, 0.1])]);
        let mut window = full_window(&[0.5, 0.5, 0.1], 36);

        let fired = classifier.classify(&mut window, &library).unwrap();
        assert_eq!(fired.name, "wave");
        assert!((fired.score - 1.0).abs() < 1e-4);
        // Window was cleared on fire
        assert!(window.is_empty());
    }

    #[test]
    fn test_below_threshold_does_not_fire() {
        let mut classifier = PrototypeClassifier::new(0.92, Duration::from_millis(1500));
        let library = library_with(&[("wave", vec![1.0, 0.0, 0.0])]);
        let mut window = full_window(&[0.0, 1.0, 0.0], 36);

        assert!(classifier.classify(&mut window, &library).is_none());
        assert!(window.is_full());
    }

    #[test]
    fn test_cooldown_suppresses_refire() {
        let mut classifier = PrototypeClassifier::new(0.92, Duration::from_millis(1500));
        let library = library_with(&[("wave", vec![0.5, 0.5, 0.1])]);
        let mut window = full_window(&[0.5, 0.5, 0.1], 8);

        assert!(classifier.classify(&mut window, &library).is_some());
        assert!(classifier.in_cooldown());

        // Refill immediately: still inside the 1.5s cooldown
        let mut window = full_window(&[0.5, 0.5, 0.1], 8);
        assert!(classifier.classify(&mut window, &library).is_none());
    }

    #[test]
    fn test_partial_window_yields_no_match() {
        let mut classifier = PrototypeClassifier::new(0.92, Duration::from_millis(1500));
        let library = library_with(&[("wave", vec![0.5, 0.5, 0.1])]);
        let mut window = WindowBuffer::new(36);
        window.push(FeatureVector(vec![0.5, 0.5, 0.1]));

        assert!(classifier.classify(&mut window, &library).is_none());
    }

    #[test]
    fn test_empty_library_yields_no_match() {
        let mut classifier = PrototypeClassifier::new(0.92, Duration::from_millis(1500));
        let library = PrototypeLibrary::new();
        let mut window = full_window(&[0.5, 0.5, 0.1], 4);

        assert!(classifier.classify(&mut window, &library).is_none());
    }

    #[test]
    fn test_tie_breaks_to_first_seen() {
        let mut classifier = PrototypeClassifier::new(0.92, Duration::ZERO);
        // Identical prototype vectors under two names: first entry wins
        let library = library_with(&[
            ("first", vec![0.5, 0.5, 0.1]),
            ("second", vec![0.5, 0.5, 0.1]),
        ]);
        let mut window = full_window(&[0.5, 0.5, 0.1], 4);

        let fired = classifier.classify(&mut window, &library).unwrap();
        assert_eq!(fired.name, "first");
    }

    #[test]
    fn test_best_of_multiple_prototypes_wins() {
        let mut classifier = PrototypeClassifier::new(0.5, Duration::ZERO);
        let library = library_with(&[
            ("far", vec![1.0, 0.0, 0.0]),
            ("near", vec![0.0, 1.0, 0.0]),
        ]);
        let mut window = full_window(&[0.1, 1.0, 0.0], 4);

        let fired = classifier.classify(&mut window, &library).unwrap();
        assert_eq!(fired.name, "near");
    }
}
