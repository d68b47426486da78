use std::path::{Path, PathBuf};

use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::utils::get_db_path;

pub const LOAN_ITEMS_KEY: &str = "loan_items";
pub const CONTACTS_KEY: &str = "contacts";
pub const PAYMENTS_KEY: &str = "payments";
pub const ONBOARDING_KEY: &str = "has_completed_onboarding";

/// Key-value persistence over a local SQLite file. Each collection is stored
/// whole, as one JSON blob under a fixed key; there are no partial updates
/// and no schema versioning.
#[derive(Debug, Clone)]
pub struct Store {
    path: PathBuf,
}

impl Store {
    pub fn open(path: impl AsRef<Path>) -> Result<Store, String> {
        let store = Store {
            path: path.as_ref().to_path_buf(),
        };
        let conn = store.connect()?;
        conn.execute(
            "CREATE TABLE IF NOT EXISTS kv_store (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )",
            [],
        )
        .map_err(|e| e.to_string())?;
        Ok(store)
    }

    /// Opens the store at the platform data directory.
    pub fn open_default() -> Result<Store, String> {
        Store::open(get_db_path())
    }

    fn connect(&self) -> Result<Connection, String> {
        Connection::open(&self.path).map_err(|e| e.to_string())
    }

    fn get_raw(&self, key: &str) -> Result<Option<String>, String> {
        let conn = self.connect()?;
        conn.query_row(
            "SELECT value FROM kv_store WHERE key = ?1",
            params![key],
            |row| row.get(0),
        )
        .optional()
        .map_err(|e| e.to_string())
    }

    fn set_raw(&self, key: &str, value: &str) -> Result<(), String> {
        let conn = self.connect()?;
        conn.execute(
            "INSERT OR REPLACE INTO kv_store (key, value) VALUES (?1, ?2)",
            params![key, value],
        )
        .map_err(|e| e.to_string())?;
        Ok(())
    }

    /// Loads the collection stored under `key`. A missing entry or a blob
    /// that no longer decodes loads as an empty collection.
    pub fn load_collection<T: DeserializeOwned>(&self, key: &str) -> Vec<T> {
        let raw = match self.get_raw(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                log::warn!("failed to read '{}': {}", key, e);
                return Vec::new();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(items) => items,
            Err(e) => {
                log::warn!("failed to decode '{}', loading empty: {}", key, e);
                Vec::new()
            }
        }
    }

    pub fn save_collection<T: Serialize>(&self, key: &str, items: &[T]) -> Result<(), String> {
        let raw = serde_json::to_string(items).map_err(|e| e.to_string())?;
        self.set_raw(key, &raw)
    }

    pub fn get_flag(&self, key: &str) -> bool {
        match self.get_raw(key) {
            Ok(Some(raw)) => raw == "true",
            Ok(None) => false,
            Err(e) => {
                log::warn!("failed to read '{}': {}", key, e);
                false
            }
        }
    }

    pub fn set_flag(&self, key: &str, value: bool) -> Result<(), String> {
        self.set_raw(key, if value { "true" } else { "false" })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Contact;
    use crate::testutil::test_store;

    #[test]
    fn collections_round_trip() {
        let store = test_store("db_round_trip");
        let contacts = vec![Contact::new("Dana Petrov"), Contact::new("Sam Lowe")];
        store.save_collection(CONTACTS_KEY, &contacts).unwrap();

        let loaded: Vec<Contact> = store.load_collection(CONTACTS_KEY);
        assert_eq!(loaded, contacts);
    }

    #[test]
    fn missing_key_loads_empty() {
        let store = test_store("db_missing_key");
        let loaded: Vec<Contact> = store.load_collection(CONTACTS_KEY);
        assert!(loaded.is_empty());
    }

    #[test]
    fn corrupt_blob_loads_empty() {
        let store = test_store("db_corrupt_blob");
        store.set_raw(CONTACTS_KEY, "{not json").unwrap();
        let loaded: Vec<Contact> = store.load_collection(CONTACTS_KEY);
        assert!(loaded.is_empty());
    }

    #[test]
    fn flag_defaults_to_false() {
        let store = test_store("db_flag");
        assert!(!store.get_flag(ONBOARDING_KEY));
        store.set_flag(ONBOARDING_KEY, true).unwrap();
        assert!(store.get_flag(ONBOARDING_KEY));
    }

    #[test]
    fn save_overwrites_previous_blob() {
        let store = test_store("db_overwrite");
        store
            .save_collection(CONTACTS_KEY, &[Contact::new("First")])
            .unwrap();
        store
            .save_collection(CONTACTS_KEY, &[Contact::new("Second"), Contact::new("Third")])
            .unwrap();

        let loaded: Vec<Contact> = store.load_collection(CONTACTS_KEY);
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].name, "Second");
    }
}
