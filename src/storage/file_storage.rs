use std::fs;
use std::path::{Path, PathBuf};

use super::{KeyValueStore, Result, StorageError};

/// File-backed store
///
/// Directory structure:
/// ```text
/// {data_dir}/
/// ├── latinsay_learning_data.json
/// └── latinsay_favorites.json
/// ```
pub struct FileStorage {
    base_path: PathBuf,
}

impl FileStorage {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    /// Get the default data directory
    pub fn default_data_dir() -> Result<PathBuf> {
        dirs::data_local_dir()
            .map(|p| p.join("latinsay"))
            .ok_or(StorageError::DataDirNotFound)
    }

    /// Initialize storage directory
    pub fn init(&self) -> Result<()> {
        fs::create_dir_all(&self.base_path)?;
        Ok(())
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Keys become file names, so only a conservative alphabet is allowed
    fn key_path(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.')
            && !key.starts_with('.');
        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.base_path.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key)?;
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path)?;
        Ok(Some(content))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.key_path(key)?;
        self.init()?;

        // Write to a sibling temp file, then rename over the target
        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, value)?;
        fs::rename(&tmp_path, &path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_storage() -> (FileStorage, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path().join("data"));
        (storage, temp_dir)
    }

    #[test]
    fn test_get_before_init() {
        let (storage, _temp) = create_test_storage();
        assert_eq!(storage.get("latinsay_favorites").unwrap(), None);
    }

    #[test]
    fn test_set_and_get() {
        let (storage, _temp) = create_test_storage();

        storage.set("latinsay_favorites", "[]").unwrap();
        assert_eq!(
            storage.get("latinsay_favorites").unwrap().as_deref(),
            Some("[]")
        );
        assert!(storage.base_path().join("latinsay_favorites.json").exists());
        assert!(!storage.base_path().join("latinsay_favorites.json.tmp").exists());
    }

    #[test]
    fn test_values_survive_reopen() {
        let (storage, temp) = create_test_storage();
        storage.set("k", "{\"version\":1}").unwrap();
        drop(storage);

        let reopened = FileStorage::new(temp.path().join("data"));
        assert_eq!(reopened.get("k").unwrap().as_deref(), Some("{\"version\":1}"));
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let (storage, _temp) = create_test_storage();

        for key in ["", "../escape", "a/b", ".hidden"] {
            let result = storage.set(key, "x");
            assert!(matches!(result, Err(StorageError::InvalidKey(_))), "key {:?}", key);
        }
    }
}
