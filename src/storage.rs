//! Sample persistence boundary
//!
//! TeachingSession writes completed samples through a [`SampleStore`];
//! PrototypeLibrary rebuilds itself from the same store at session start.
//! Two implementations ship with the crate: an in-memory store for tests
//! and short-lived sessions, and a JSON-file store keeping one file per
//! user under a configured directory.

use crate::gesture::library::GestureSample;
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("sample store I/O failure: {0}")]
    Io(#[from] std::io::Error),
    #[error("sample serialization failure: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Persistence boundary for taught gesture samples.
pub trait SampleStore: Send {
    /// Persist one completed sample. Samples are immutable once stored.
    fn save_sample(&mut self, sample: &GestureSample) -> Result<(), StorageError>;

    /// All stored samples for a user, optionally filtered by gesture name.
    fn load_samples(
        &self,
        user_id: &str,
        name: Option<&str>,
    ) -> Result<Vec<GestureSample>, StorageError>;

    /// Per-name sample counts for a user's personal dictionary.
    fn list_gestures(&self, user_id: &str) -> Result<Vec<(String, usize)>, StorageError> {
        let mut counts: Vec<(String, usize)> = Vec::new();
        for sample in self.load_samples(user_id, None)? {
            match counts.iter_mut().find(|(name, _)| *name == sample.name) {
                Some((_, count)) => *count += 1,
                None => counts.push((sample.name.clone(), 1)),
            }
        }
        Ok(counts)
    }
}

/// In-memory store; contents die with the process.
#[derive(Debug, Default)]
pub struct MemorySampleStore {
    samples: Vec<GestureSample>,
}

impl MemorySampleStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SampleStore for MemorySampleStore {
    fn save_sample(&mut self, sample: &GestureSample) -> Result<(), StorageError> {
        self.samples.push(sample.clone());
        Ok(())
    }

    fn load_samples(
        &self,
        user_id: &str,
        name: Option<&str>,
    ) -> Result<Vec<GestureSample>, StorageError> {
        Ok(self
            .samples
            .iter()
            .filter(|s| s.user_id == user_id)
            .filter(|s| name.map_or(true, |n| s.name == n))
            .cloned()
            .collect())
    }
}

/// File-backed store: one JSON file per user under `directory`.
#[derive(Debug, Clone)]
pub struct JsonSampleStore {
    directory: PathBuf,
}

impl JsonSampleStore {
    pub fn new<P: Into<PathBuf>>(directory: P) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    fn user_path(&self, user_id: &str) -> PathBuf {
        // User ids come from an external identity provider; keep only
        // filename-safe characters when mapping them to paths.
        let safe: String = user_id
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.directory.join(format!("{}.json", safe))
    }

    fn read_user(&self, user_id: &str) -> Result<Vec<GestureSample>, StorageError> {
        let path = self.user_path(user_id);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let contents = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }
}

impl SampleStore for JsonSampleStore {
    fn save_sample(&mut self, sample: &GestureSample) -> Result<(), StorageError> {
        fs::create_dir_all(&self.directory)?;
        let mut samples = self.read_user(&sample.user_id)?;
        samples.push(sample.clone());
        let path = self.user_path(&sample.user_id);
        fs::write(&path, serde_json::to_string(&samples)?)?;
        log::debug!(
            "Persisted sample {} of '{}' for {} ({:?})",
            sample.sample_idx,
            sample.name,
            sample.user_id,
            path
        );
        Ok(())
    }

    fn load_samples(
        &self,
        user_id: &str,
        name: Option<&str>,
    ) -> Result<Vec<GestureSample>, StorageError> {
        Ok(self
            .read_user(user_id)?
            .into_iter()
            .filter(|s| name.map_or(true, |n| s.name == n))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FeatureVector;

    fn sample(user: &str, name: &str, idx: u32) -> GestureSample {
        GestureSample::new(
            user.to_string(),
            name.to_string(),
            idx,
            vec![FeatureVector(vec![idx as f32; 6]); 2],
        )
    }

    #[test]
    fn test_memory_store_filters_by_user_and_name() {
        let mut store = MemorySampleStore::new();
        store.save_sample(&sample("alice", "wave", 1)).unwrap();
        store.save_sample(&sample("alice", "stop", 1)).unwrap();
        store.save_sample(&sample("bob", "wave", 1)).unwrap();

        assert_eq!(store.load_samples("alice", None).unwrap().len(), 2);
        assert_eq!(store.load_samples("alice", Some("wave")).unwrap().len(), 1);
        assert_eq!(store.load_samples("carol", None).unwrap().len(), 0);
    }

    #[test]
    fn test_list_gestures_counts() {
        let mut store = MemorySampleStore::new();
        store.save_sample(&sample("alice", "wave", 1)).unwrap();
        store.save_sample(&sample("alice", "wave", 2)).unwrap();
        store.save_sample(&sample("alice", "stop", 1)).unwrap();

        let listed = store.list_gestures("alice").unwrap();
        assert_eq!(
            listed,
            vec![("wave".to_string(), 2), ("stop".to_string(), 1)]
        );
    }

    #[test]
    fn test_json_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonSampleStore::new(dir.path());

        store.save_sample(&sample("alice", "wave", 1)).unwrap();
        store.save_sample(&sample("alice", "wave", 2)).unwrap();

        let loaded = store.load_samples("alice", Some("wave")).unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].sample_idx, 1);
        assert_eq!(loaded[1].frames[0].0, vec![2.0; 6]);
    }

    #[test]
    fn test_json_store_missing_user_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonSampleStore::new(dir.path());
        assert!(store.load_samples("nobody", None).unwrap().is_empty());
    }

    #[test]
    fn test_json_store_sanitizes_user_ids() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonSampleStore::new(dir.path());

        store.save_sample(&sample("../evil/user", "wave", 1)).unwrap();
        // Path traversal characters were flattened into the store directory
        let loaded = store.load_samples("../evil/user", None).unwrap();
        assert_eq!(loaded.len(), 1);
        assert!(dir.path().join("___evil_user.json").exists());
    }
}
