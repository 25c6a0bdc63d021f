use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use model::{HighScoreStore, StoreError};
use tracing::{debug, warn};

const HIGH_SCORE_KEY: &str = "HighScore";

/// Small JSON key-value file; the high score lives under `"HighScore"`.
#[derive(Clone, Debug)]
pub struct FileHighScoreStore {
    path: PathBuf,
}

impl FileHighScoreStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    fn read_entries(&self) -> Result<BTreeMap<String, u64>, StoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(e.into()),
        };
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&content)
            .map_err(|e| StoreError::Format(format!("{}: {}", self.path.display(), e)))
    }
}

impl HighScoreStore for FileHighScoreStore {
    fn load(&self) -> Result<u64, StoreError> {
        let high_score = self
            .read_entries()?
            .get(HIGH_SCORE_KEY)
            .copied()
            .unwrap_or(0);
        debug!(path = %self.path.display(), high_score, "high score loaded");
        Ok(high_score)
    }

    fn save(&mut self, high_score: u64) -> Result<(), StoreError> {
        let mut entries = match self.read_entries() {
            Ok(entries) => entries,
            Err(StoreError::Format(e)) => {
                warn!("replacing unreadable score file {}", e);
                BTreeMap::new()
            }
            Err(e) => return Err(e),
        };
        entries.insert(HIGH_SCORE_KEY.to_string(), high_score);
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(&entries)
            .map_err(|e| StoreError::Format(e.to_string()))?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_means_zero() {
        let dir = tempdir().unwrap();
        let store = FileHighScoreStore::new(dir.path().join("scores.json"));
        assert_eq!(store.load().unwrap(), 0);
    }

    #[test]
    fn save_then_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("scores.json");
        let mut store = FileHighScoreStore::new(&path);
        store.save(2048).unwrap();
        assert_eq!(store.load().unwrap(), 2048);
        assert_eq!(FileHighScoreStore::new(&path).load().unwrap(), 2048);
    }

    #[test]
    fn other_keys_are_kept() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("scores.json");
        fs::write(&path, r#"{"Volume": 7, "HighScore": 12}"#).unwrap();
        let mut store = FileHighScoreStore::new(&path);
        assert_eq!(store.load().unwrap(), 12);
        store.save(40).unwrap();
        let entries: BTreeMap<String, u64> =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(entries.get("Volume"), Some(&7));
        assert_eq!(entries.get("HighScore"), Some(&40));
    }

    #[test]
    fn corrupt_file_is_a_format_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("scores.json");
        fs::write(&path, "not json").unwrap();
        let mut store = FileHighScoreStore::new(&path);
        assert!(matches!(store.load(), Err(StoreError::Format(_))));
        store.save(8).unwrap();
        assert_eq!(store.load().unwrap(), 8);
        let entries: BTreeMap<String, u64> =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn unreadable_path_fails_save() {
        let dir = tempdir().unwrap();
        let mut store = FileHighScoreStore::new(dir.path());
        assert!(matches!(store.save(8), Err(StoreError::Io(_))));
        assert!(dir.path().is_dir());
    }
}
