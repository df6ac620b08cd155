use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// A single persisted best score.
pub trait ScoreStore {
    /// Stored high score, or 0 when there is none.
    fn load(&self) -> u32;
    fn save(&mut self, high_score: u32) -> Result<()>;
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct Slot {
    #[serde(rename = "highScore", default)]
    high_score: u32,
}

/// Keeps the high score as `{"highScore": N}` in a JSON file.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: PathBuf) -> Self {
        JsonFileStore { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ScoreStore for JsonFileStore {
    fn load(&self) -> u32 {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) => {
                debug!(path = %self.path.display(), %err, "no stored high score");
                return 0;
            }
        };

        match serde_json::from_str::<Slot>(&text) {
            Ok(slot) => slot.high_score,
            Err(err) => {
                warn!(path = %self.path.display(), %err, "ignoring unreadable high score file");
                0
            }
        }
    }

    fn save(&mut self, high_score: u32) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;
        }

        let tmp = self.path.with_extension("json.tmp");
        let data = serde_json::to_vec_pretty(&Slot { high_score })?;
        fs::write(&tmp, data).with_context(|| format!("Failed to write {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("Failed to replace {}", self.path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct MemoryStore {
    pub value: u32,
    pub writes: Vec<u32>,
}

#[cfg(test)]
impl ScoreStore for MemoryStore {
    fn load(&self) -> u32 {
        self.value
    }

    fn save(&mut self, high_score: u32) -> Result<()> {
        self.value = high_score;
        self.writes.push(high_score);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn scratch_dir(name: &str) -> PathBuf {
        let nanos = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_nanos();
        let dir = std::env::temp_dir().join(format!("boxsnake-{}-{}-{}", name, std::process::id(), nanos));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn missing_file_reads_as_zero() {
        let dir = scratch_dir("missing");
        let store = JsonFileStore::new(dir.join("highscore.json"));
        assert_eq!(store.load(), 0);
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn saved_score_is_read_back() {
        let dir = scratch_dir("saved");
        let path = dir.join("nested").join("highscore.json");
        let mut store = JsonFileStore::new(path.clone());

        store.save(700).unwrap();
        assert_eq!(JsonFileStore::new(path.clone()).load(), 700);
        assert!(!path.with_extension("json.tmp").exists());

        let text = fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["highScore"], 700);

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn corrupt_file_reads_as_zero() {
        let dir = scratch_dir("corrupt");
        let path = dir.join("highscore.json");
        fs::write(&path, "not json").unwrap();

        assert_eq!(JsonFileStore::new(path).load(), 0);
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn missing_key_reads_as_zero() {
        let dir = scratch_dir("nokey");
        let path = dir.join("highscore.json");
        fs::write(&path, "{}").unwrap();

        assert_eq!(JsonFileStore::new(path).load(), 0);
        fs::remove_dir_all(dir).unwrap();
    }
}
