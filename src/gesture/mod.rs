//! Gesture recognition pipeline: normalize -> window -> classify.

pub mod classifier;
pub mod engine;
pub mod library;
pub mod normalize;
pub mod rules;
pub mod teaching;
pub mod window;

pub use classifier::{cosine_similarity, PrototypeClassifier, PrototypeMatch};
pub use engine::RecognitionEngine;
pub use library::{GesturePrototype, GestureSample, PrototypeLibrary};
pub use normalize::normalize;
pub use rules::{BuiltinSign, RuleClassifier};
pub use teaching::{TeachingSession, TeachingState};
pub use window::WindowBuffer;
