use serde_json::{Map, Value};
use std::fs;
#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use crate::domain::entities::cached_credential::CachedCredential;

/// Default cache file name, placed beside the executable
pub const DEFAULT_CACHE_NAME: &str = "sqlcl-wrapper.cache";

const PASSWORD_KEY: &str = "password";
const PASSWORD_SAVE_TIME_KEY: &str = "password_save_time";

/// Credential store related errors
#[derive(Debug, Error)]
pub enum CredentialStoreError {
    #[error("Cannot locate the cache directory: {0}")]
    LocationUnavailable(String),

    #[error("Cache file read failed for {}: {source}", path.display())]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cache file write failed for {}: {source}", path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cache file is corrupt: {0}")]
    Corrupt(String),
}

/// Persistent single-slot password cache
pub trait CredentialStore: Send {
    fn password(&self) -> Result<Option<String>, CredentialStoreError>;

    fn password_save_time(&self) -> Result<Option<i64>, CredentialStoreError>;

    fn set_password(&mut self, password: &str) -> Result<(), CredentialStoreError>;

    fn set_password_save_time(&mut self, saved_at: i64) -> Result<(), CredentialStoreError>;

    /// Both halves of the slot, or `None` if either is missing
    fn cached(&self) -> Result<Option<CachedCredential>, CredentialStoreError> {
        match (self.password()?, self.password_save_time()?) {
            (Some(password), Some(saved_at)) => Ok(Some(CachedCredential::new(password, saved_at))),
            _ => Ok(None),
        }
    }
}

/// Default cache location: `<directory of the running executable>/sqlcl-wrapper.cache`
pub fn default_cache_path() -> Result<PathBuf, CredentialStoreError> {
    let exe = std::env::current_exe()
        .map_err(|e| CredentialStoreError::LocationUnavailable(e.to_string()))?;
    let exe = fs::canonicalize(&exe).unwrap_or(exe);
    let dir = exe.parent().ok_or_else(|| {
        CredentialStoreError::LocationUnavailable(format!(
            "{} has no parent directory",
            exe.display()
        ))
    })?;
    Ok(dir.join(DEFAULT_CACHE_NAME))
}

/// JSON object on disk, rewritten on every update
pub struct JsonFileCredentialStore {
    path: PathBuf,
    entries: Map<String, Value>,
}

impl JsonFileCredentialStore {
    /// Open the cache file, creating an empty one if absent
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, CredentialStoreError> {
        let path = path.as_ref().to_path_buf();

        if !path.exists() {
            debug!("Creating credential cache at {}", path.display());
            let mut store = Self {
                path,
                entries: Map::new(),
            };
            store.flush()?;
            return Ok(store);
        }

        let contents = fs::read_to_string(&path).map_err(|source| {
            CredentialStoreError::ReadFailed {
                path: path.clone(),
                source,
            }
        })?;

        let entries = if contents.trim().is_empty() {
            Map::new()
        } else {
            match serde_json::from_str::<Value>(&contents) {
                Ok(Value::Object(map)) => map,
                Ok(_) => {
                    return Err(CredentialStoreError::Corrupt(format!(
                        "{} does not hold a JSON object",
                        path.display()
                    )))
                }
                Err(e) => return Err(CredentialStoreError::Corrupt(e.to_string())),
            }
        };

        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&mut self) -> Result<(), CredentialStoreError> {
        let contents = serde_json::to_string_pretty(&self.entries)
            .map_err(|e| CredentialStoreError::Corrupt(e.to_string()))?;

        fs::write(&self.path, contents).map_err(|source| CredentialStoreError::WriteFailed {
            path: self.path.clone(),
            source,
        })?;

        #[cfg(unix)]
        fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600)).map_err(|source| {
            CredentialStoreError::WriteFailed {
                path: self.path.clone(),
                source,
            }
        })?;

        Ok(())
    }
}

impl CredentialStore for JsonFileCredentialStore {
    fn password(&self) -> Result<Option<String>, CredentialStoreError> {
        match self.entries.get(PASSWORD_KEY) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(other) => Err(CredentialStoreError::Corrupt(format!(
                "'{}' is not a string: {}",
                PASSWORD_KEY, other
            ))),
        }
    }

    fn password_save_time(&self) -> Result<Option<i64>, CredentialStoreError> {
        match self.entries.get(PASSWORD_SAVE_TIME_KEY) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Number(n)) => Ok(n.as_i64().or_else(|| n.as_f64().map(|f| f as i64))),
            Some(other) => Err(CredentialStoreError::Corrupt(format!(
                "'{}' is not a number: {}",
                PASSWORD_SAVE_TIME_KEY, other
            ))),
        }
    }

    fn set_password(&mut self, password: &str) -> Result<(), CredentialStoreError> {
        self.entries
            .insert(PASSWORD_KEY.to_string(), Value::String(password.to_string()));
        self.flush()
    }

    fn set_password_save_time(&mut self, saved_at: i64) -> Result<(), CredentialStoreError> {
        self.entries
            .insert(PASSWORD_SAVE_TIME_KEY.to_string(), Value::from(saved_at));
        self.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_creates_empty_cache() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(DEFAULT_CACHE_NAME);

        let store = JsonFileCredentialStore::open(&path).unwrap();
        assert!(path.exists());
        assert_eq!(store.password().unwrap(), None);
        assert_eq!(store.cached().unwrap(), None);
    }

    #[test]
    fn test_values_survive_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(DEFAULT_CACHE_NAME);

        let mut store = JsonFileCredentialStore::open(&path).unwrap();
        store.set_password("tiger").unwrap();
        store.set_password_save_time(1_700_000_000).unwrap();

        let reopened = JsonFileCredentialStore::open(&path).unwrap();
        assert_eq!(
            reopened.cached().unwrap(),
            Some(CachedCredential::new("tiger", 1_700_000_000))
        );
    }

    #[test]
    fn test_cached_requires_both_keys() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(DEFAULT_CACHE_NAME);
        fs::write(&path, r#"{"password": "tiger"}"#).unwrap();

        let store = JsonFileCredentialStore::open(&path).unwrap();
        assert_eq!(store.password().unwrap().as_deref(), Some("tiger"));
        assert_eq!(store.cached().unwrap(), None);
    }

    #[test]
    fn test_fractional_save_time_is_accepted() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(DEFAULT_CACHE_NAME);
        fs::write(&path, r#"{"password": "tiger", "password_save_time": 1700000000.75}"#).unwrap();

        let store = JsonFileCredentialStore::open(&path).unwrap();
        assert_eq!(store.password_save_time().unwrap(), Some(1_700_000_000));
    }

    #[test]
    fn test_corrupt_cache_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(DEFAULT_CACHE_NAME);
        fs::write(&path, "not json").unwrap();

        let result = JsonFileCredentialStore::open(&path);
        assert!(matches!(result, Err(CredentialStoreError::Corrupt(_))));
    }

    #[test]
    fn test_open_in_missing_directory_fails() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing").join(DEFAULT_CACHE_NAME);

        let result = JsonFileCredentialStore::open(&path);
        assert!(matches!(result, Err(CredentialStoreError::WriteFailed { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn test_cache_file_is_private() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(DEFAULT_CACHE_NAME);
        JsonFileCredentialStore::open(&path).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
