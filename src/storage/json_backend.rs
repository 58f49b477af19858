use std::{
    collections::BTreeMap,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use super::KeyValueStore;
use crate::errors::{PlanError, Result};

const TMP_SUFFIX: &str = "tmp";
const STORE_FILE_NAME: &str = "store.json";
const APP_DIR_NAME: &str = "sparplan";

/// File-backed key-value store. The whole map is kept in memory and written
/// back as one pretty-printed JSON document after every mutation, via a
/// temp-file rename so a crash mid-write leaves the previous state intact.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Opens the store at `path`, loading existing content if present. A
    /// missing file is an empty store; unreadable content is an error.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let entries = if path.exists() {
            let data = fs::read_to_string(&path)?;
            serde_json::from_str(&data)?
        } else {
            BTreeMap::new()
        };
        Ok(Self { path, entries })
    }

    /// Opens the store at the default per-user location.
    pub fn open_default() -> Result<Self> {
        Self::open(default_store_path()?)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&self.entries)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        self.persist()
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        if self.entries.remove(key).is_some() {
            self.persist()?;
        }
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.entries.clear();
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

/// Default store file under the user data directory.
pub fn default_store_path() -> Result<PathBuf> {
    let base = dirs::data_dir()
        .ok_or_else(|| PlanError::Storage("could not resolve user data directory".into()))?;
    Ok(base.join(APP_DIR_NAME).join(STORE_FILE_NAME))
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in_temp_dir() -> (JsonFileStore, TempDir) {
        let temp = TempDir::new().expect("temp dir");
        let store = JsonFileStore::open(temp.path().join("store.json")).expect("json store");
        (store, temp)
    }

    #[test]
    fn missing_file_opens_as_empty_store() {
        let (store, _guard) = store_in_temp_dir();
        assert_eq!(store.get("monthly_income").unwrap(), None);
        assert!(!store.path().exists());
    }

    #[test]
    fn values_survive_a_reopen() {
        let (mut store, guard) = store_in_temp_dir();
        store.set("monthly_income", "3000").unwrap();
        store.set("expense_list", "[]").unwrap();

        let reopened = JsonFileStore::open(guard.path().join("store.json")).unwrap();
        assert_eq!(reopened.get("monthly_income").unwrap().as_deref(), Some("3000"));
        assert_eq!(reopened.get("expense_list").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn clear_removes_the_backing_file() {
        let (mut store, guard) = store_in_temp_dir();
        store.set("monthly_income", "3000").unwrap();
        store.clear().unwrap();
        assert!(!guard.path().join("store.json").exists());
        assert_eq!(store.get("monthly_income").unwrap(), None);
    }

    #[test]
    fn corrupt_content_surfaces_as_storage_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("store.json");
        fs::write(&path, "not json").unwrap();
        let err = JsonFileStore::open(&path).unwrap_err();
        assert!(matches!(err, PlanError::Storage(_)));
    }

    #[test]
    fn remove_deletes_a_single_key() {
        let (mut store, _guard) = store_in_temp_dir();
        store.set("monthly_income", "3000").unwrap();
        store.set("expense_list", "[]").unwrap();
        store.remove("monthly_income").unwrap();
        assert_eq!(store.get("monthly_income").unwrap(), None);
        assert_eq!(store.get("expense_list").unwrap().as_deref(), Some("[]"));
    }
}
