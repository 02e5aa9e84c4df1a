mod config;
pub mod database;

pub use config::{Config, NotificationsConfig, TimerConfig, UiConfig};
pub use database::Database;

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{ConfigError, StoreError};

/// Record keys. Ledger keys come from [`crate::calendar::date_key`].
pub mod keys {
    pub const CUSTOM_HABITS: &str = "custom_habits";
    pub const GOALS: &str = "goals";
    pub const SESSIONS: &str = "sessions";
    pub const WORK_MINUTES: &str = "custom_work";
    pub const BREAK_MINUTES: &str = "custom_break";
    pub const HABIT_TOTALS: &str = "habit_totals";
}

/// Persistent string-keyed, string-valued mapping.
///
/// Access is synchronous. Implementations must survive process restarts
/// (except [`MemoryStore`], which exists for tests and dry runs).
pub trait KvStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    /// All keys beginning with `prefix`, in ascending order.
    fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, StoreError>;
}

impl<S: KvStore + ?Sized> KvStore for &mut S {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, StoreError> {
        (**self).keys_with_prefix(prefix)
    }
}

/// In-memory store.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, StoreError> {
        Ok(self
            .entries
            .range(prefix.to_string()..)
            .take_while(|(k, _)| k.starts_with(prefix))
            .map(|(k, _)| k.clone())
            .collect())
    }
}

/// Read a JSON record. Missing or malformed records yield `T::default()`.
pub fn load_json<T, S>(store: &S, key: &str) -> Result<T, StoreError>
where
    T: DeserializeOwned + Default,
    S: KvStore + ?Sized,
{
    let Some(raw) = store.get(key)? else {
        tracing::debug!(key, "record absent, using default");
        return Ok(T::default());
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Ok(value),
        Err(e) => {
            tracing::warn!(key, error = %e, "malformed record, using default");
            Ok(T::default())
        }
    }
}

/// Write a JSON record.
pub fn save_json<T, S>(store: &mut S, key: &str, value: &T) -> Result<(), StoreError>
where
    T: Serialize + ?Sized,
    S: KvStore + ?Sized,
{
    let raw = serde_json::to_string(value)
        .map_err(|e| StoreError::QueryFailed(format!("serialize {key}: {e}")))?;
    tracing::debug!(key, bytes = raw.len(), "writing record");
    store.set(key, &raw)
}

/// Read a positive integer record such as a configured duration.
/// Zero, garbage and absence all yield `None`.
pub fn load_minutes<S: KvStore + ?Sized>(store: &S, key: &str) -> Result<Option<u32>, StoreError> {
    Ok(store
        .get(key)?
        .and_then(|raw| raw.trim().parse::<u32>().ok())
        .filter(|m| *m > 0))
}

/// Returns the data directory, creating it if needed.
///
/// `HABITROOM_DATA_DIR` wins when set. Otherwise `~/.config/habitroom[-dev]/`
/// depending on `HABITROOM_ENV`.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os("HABITROOM_DATA_DIR") {
        Some(explicit) => PathBuf::from(explicit),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("HABITROOM_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("habitroom-dev")
            } else {
                base_dir.join("habitroom")
            }
        }
    };

    std::fs::create_dir_all(&dir).map_err(|e| ConfigError::DataDir {
        path: dir.clone(),
        message: e.to_string(),
    })?;
    Ok(dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    struct Sample {
        n: u32,
    }

    #[test]
    fn prefix_scan_is_bounded() {
        let mut store = MemoryStore::new();
        store.set("habits_2024-01-01", "{}").unwrap();
        store.set("habits_2024-01-02", "{}").unwrap();
        store.set("habit_totals", "{}").unwrap();
        store.set("goals", "[]").unwrap();
        assert_eq!(
            store.keys_with_prefix("habits_").unwrap(),
            vec!["habits_2024-01-01", "habits_2024-01-02"]
        );
    }

    #[test]
    fn malformed_json_falls_back_to_default() {
        let mut store = MemoryStore::new();
        store.set("sample", "{not json").unwrap();
        let loaded: Sample = load_json(&store, "sample").unwrap();
        assert_eq!(loaded, Sample::default());

        save_json(&mut store, "sample", &Sample { n: 4 }).unwrap();
        let loaded: Sample = load_json(&store, "sample").unwrap();
        assert_eq!(loaded.n, 4);
    }

    #[test]
    fn minutes_ignore_zero_and_garbage() {
        let mut store = MemoryStore::new();
        assert_eq!(load_minutes(&store, keys::WORK_MINUTES).unwrap(), None);
        store.set(keys::WORK_MINUTES, "0").unwrap();
        assert_eq!(load_minutes(&store, keys::WORK_MINUTES).unwrap(), None);
        store.set(keys::WORK_MINUTES, "abc").unwrap();
        assert_eq!(load_minutes(&store, keys::WORK_MINUTES).unwrap(), None);
        store.set(keys::WORK_MINUTES, "50").unwrap();
        assert_eq!(load_minutes(&store, keys::WORK_MINUTES).unwrap(), Some(50));
    }
}
