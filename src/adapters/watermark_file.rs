use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::domain::AppError;
use crate::ports::WatermarkStore;

/// On-disk shape of the poll state file.
#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct PollState {
    last_poll: i64,
}

/// Watermark persisted as `last_poll = <unix seconds>` in a TOML file.
#[derive(Debug, Clone)]
pub struct FileWatermarkStore {
    path: PathBuf,
}

impl FileWatermarkStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl WatermarkStore for FileWatermarkStore {
    fn load(&self) -> Result<Option<i64>, AppError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        if content.trim().is_empty() {
            return Ok(None);
        }
        let state: PollState = toml::from_str(&content)?;
        Ok(Some(state.last_poll))
    }

    /// Writes a sibling temp file and renames it over the state file.
    fn save(&mut self, timestamp: i64) -> Result<(), AppError> {
        let dir = match self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            Some(parent) => {
                fs::create_dir_all(parent)?;
                parent
            }
            None => Path::new("."),
        };
        let content = toml::to_string(&PollState { last_poll: timestamp })?;

        let mut temp = NamedTempFile::new_in(dir)?;
        temp.write_all(content.as_bytes())?;
        temp.as_file().sync_all()?;
        temp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn missing_file_has_no_watermark() {
        let dir = TempDir::new().unwrap();
        let store = FileWatermarkStore::new(dir.path().join("state.toml"));
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn save_creates_parent_directories_and_round_trips() {
        let dir = TempDir::new().unwrap();
        let mut store = FileWatermarkStore::new(dir.path().join("nested/state/poll.toml"));

        store.save(1_700_000_000).unwrap();

        assert_eq!(store.load().unwrap(), Some(1_700_000_000));
        let raw = fs::read_to_string(store.path()).unwrap();
        assert_eq!(raw.trim(), "last_poll = 1700000000");
    }

    #[test]
    fn save_replaces_existing_state_without_leftovers() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state.toml");
        fs::write(&path, "last_poll = 1234\n").unwrap();
        let mut store = FileWatermarkStore::new(&path);

        store.save(5678).unwrap();

        assert_eq!(store.load().unwrap(), Some(5678));
        let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1, "temporary file left behind");
    }

    #[test]
    fn failed_save_keeps_previous_watermark() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state.toml");
        fs::write(&path, "last_poll = 1234\n").unwrap();
        // A directory at the target path makes the final rename fail.
        let blocked = dir.path().join("blocked");
        fs::create_dir_all(blocked.join("child")).unwrap();

        assert!(FileWatermarkStore::new(&blocked).save(5678).is_err());
        assert_eq!(FileWatermarkStore::new(&path).load().unwrap(), Some(1234));
        let leftovers = fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(leftovers, 2);
    }

    #[test]
    fn malformed_state_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state.toml");
        fs::write(&path, "last_poll = \"yesterday\"\n").unwrap();

        let err = FileWatermarkStore::new(path).load().unwrap_err();
        assert!(matches!(err, AppError::TomlParseError(_)));
    }
}
