use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::CreativeTimeError;

/// Directory under the home directory that holds the secrets file
const STORE_DIR: &str = ".creative-time";

/// File name of the secrets file
const STORE_FILE: &str = "secrets.json";

/// Persistent storage for the API key
///
/// Secrets live in a JSON object on disk. A missing file reads as an empty
/// store; the file is only created on the first write.
#[derive(Debug)]
pub struct SecretStore {
    secrets: BTreeMap<String, String>,
    file_path: PathBuf,
}

impl SecretStore {
    /// Opens the store at `~/.creative-time/secrets.json`.
    pub fn open() -> Result<Self, CreativeTimeError> {
        let home_dir = dirs::home_dir().ok_or_else(|| {
            CreativeTimeError::Io("could not determine the home directory".to_string())
        })?;
        Self::open_at(home_dir.join(STORE_DIR).join(STORE_FILE))
    }

    /// Opens the store backed by an explicit file.
    pub fn open_at(file_path: impl Into<PathBuf>) -> Result<Self, CreativeTimeError> {
        let mut store = SecretStore {
            secrets: BTreeMap::new(),
            file_path: file_path.into(),
        };
        store.load()?;
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn load(&mut self) -> Result<(), CreativeTimeError> {
        match fs::read_to_string(&self.file_path) {
            Ok(contents) if contents.trim().is_empty() => Ok(()),
            Ok(contents) => {
                self.secrets = serde_json::from_str(&contents).map_err(|e| {
                    CreativeTimeError::JsonError(format!(
                        "{} is not a valid secrets file: {e}",
                        self.file_path.display()
                    ))
                })?;
                Ok(())
            }
            Err(ref e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self) -> Result<(), CreativeTimeError> {
        if let Some(parent) = self.file_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(&self.secrets)?;
        fs::write(&self.file_path, contents)?;
        log::debug!("saved secrets to {}", self.file_path.display());
        Ok(())
    }

    /// Retrieves a secret value for the given key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.secrets.get(key).map(String::as_str)
    }

    /// Sets a secret value for the given key and writes the file
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), CreativeTimeError> {
        self.secrets.insert(key.to_string(), value.to_string());
        self.save()
    }

    /// Deletes a secret and writes the file. Returns whether the key existed.
    pub fn delete(&mut self, key: &str) -> Result<bool, CreativeTimeError> {
        let existed = self.secrets.remove(key).is_some();
        if existed {
            self.save()?;
        }
        Ok(existed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_an_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = SecretStore::open_at(dir.path().join("nested").join("secrets.json")).unwrap();
        assert_eq!(store.get("OPEN_AI_API_KEY"), None);
        assert!(!store.path().exists());
    }

    #[test]
    fn set_get_delete_round_trip_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("secrets.json");

        let mut store = SecretStore::open_at(&path).unwrap();
        store.set("OPEN_AI_API_KEY", "sk-test").unwrap();

        let reopened = SecretStore::open_at(&path).unwrap();
        assert_eq!(reopened.get("OPEN_AI_API_KEY"), Some("sk-test"));

        let mut store = reopened;
        assert!(store.delete("OPEN_AI_API_KEY").unwrap());
        assert!(!store.delete("OPEN_AI_API_KEY").unwrap());
        assert_eq!(SecretStore::open_at(&path).unwrap().get("OPEN_AI_API_KEY"), None);
    }

    #[test]
    fn corrupt_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("secrets.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            SecretStore::open_at(&path),
            Err(CreativeTimeError::JsonError(_))
        ));
    }
}
