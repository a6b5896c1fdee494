use std::fmt;

#[derive(Debug)]
pub enum SignCallError {
    /// A hand pose arrived with fewer than the expected 21 landmarks.
    /// Frames carrying this error are skipped, never fatal.
    InsufficientLandmarks { got: usize },
    /// Sample save/load failed at the persistence boundary.
    PersistenceFailure(String),
    TeachingError(String),
    SignalingError(String),
    ConfigError(String),
}

impl fmt::Display for SignCallError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SignCallError::InsufficientLandmarks { got } => {
                write!(f, "Insufficient landmarks: got {}, need 21", got)
            }
            SignCallError::PersistenceFailure(msg) => write!(f, "Persistence failure: {}", msg),
            SignCallError::TeachingError(msg) => write!(f, "Teaching error: {}", msg),
            SignCallError::SignalingError(msg) => write!(f, "Signaling error: {}", msg),
            SignCallError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for SignCallError {}

impl From<crate::storage::StorageError> for SignCallError {
    fn from(err: crate::storage::StorageError) -> Self {
        SignCallError::PersistenceFailure(err.to_string())
    }
}
