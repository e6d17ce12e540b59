//! Persisted calendar filter preferences.
//!
//! [`FilterStore`] owns the current [`CalendarFilters`] and writes every
//! change through an injected [`KeyValueStorage`]. Storage problems never
//! reach callers: a missing, unreadable or corrupt record loads as the
//! defaults, and failed writes are logged and dropped.

use std::collections::HashMap;
use std::convert::Infallible;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use tracing::{debug, warn};

use crate::error::{Result, SlotCalError};
use crate::models::CalendarFilters;

/// Storage key of the filter record.
pub const FILTERS_KEY: &str = "training_calendar_filters";

/// A string key-value store.
pub trait KeyValueStorage {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Retrieves the value stored under `key`, or `None` if not present.
    fn get_item(&self, key: &str) -> std::result::Result<Option<String>, Self::Error>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set_item(&self, key: &str, value: &str) -> std::result::Result<(), Self::Error>;
}

/// An in-memory store backed by a HashMap.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    data: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStorage for MemoryStorage {
    type Error = Infallible;

    fn get_item(&self, key: &str) -> std::result::Result<Option<String>, Self::Error> {
        let data = self.data.read().unwrap_or_else(PoisonError::into_inner);
        Ok(data.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> std::result::Result<(), Self::Error> {
        let mut data = self.data.write().unwrap_or_else(PoisonError::into_inner);
        data.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Stores each key as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStorage for FileStorage {
    type Error = SlotCalError;

    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(SlotCalError::Storage(format!(
                "Failed to read '{}': {}",
                path.display(),
                e
            ))),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.dir).map_err(|e| {
            SlotCalError::Storage(format!(
                "Failed to create '{}': {}",
                self.dir.display(),
                e
            ))
        })?;
        let path = self.path_for(key);
        fs::write(&path, value).map_err(|e| {
            SlotCalError::Storage(format!("Failed to write '{}': {}", path.display(), e))
        })
    }
}

/// Load the filter record, falling back to the defaults on any problem.
pub fn load_filters<S: KeyValueStorage>(storage: &S) -> CalendarFilters {
    let raw = match storage.get_item(FILTERS_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return CalendarFilters::default(),
        Err(e) => {
            warn!(error = %e, "failed to read filter preferences");
            return CalendarFilters::default();
        }
    };

    match serde_json::from_str::<Option<CalendarFilters>>(&raw) {
        Ok(filters) => {
            let filters = filters.unwrap_or_default();
            debug!(?filters, "loaded filter preferences");
            filters
        }
        Err(e) => {
            warn!(error = %e, "ignoring corrupt filter preferences");
            CalendarFilters::default()
        }
    }
}

/// Save the filter record. Returns whether the write succeeded.
pub fn save_filters<S: KeyValueStorage>(storage: &S, filters: CalendarFilters) -> bool {
    let result = serde_json::to_string(&filters)
        .map_err(SlotCalError::from)
        .and_then(|json| {
            storage
                .set_item(FILTERS_KEY, &json)
                .map_err(|e| SlotCalError::Storage(e.to_string()))
        });

    match result {
        Ok(()) => true,
        Err(e) => {
            warn!(error = %e, "failed to save filter preferences");
            false
        }
    }
}

/// Handle returned by [`FilterStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn Fn(&CalendarFilters) + Send + Sync>;

/// Observable owner of the calendar filter preferences.
pub struct FilterStore<S: KeyValueStorage> {
    storage: S,
    value: CalendarFilters,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_id: u64,
}

impl<S: KeyValueStorage> FilterStore<S> {
    /// Create a store, loading the persisted value once.
    pub fn new(storage: S) -> Self {
        let value = load_filters(&storage);
        Self {
            storage,
            value,
            subscribers: Vec::new(),
            next_id: 0,
        }
    }

    pub fn get(&self) -> CalendarFilters {
        self.value
    }

    /// Replace the value, persist it and notify subscribers.
    pub fn set(&mut self, value: CalendarFilters) {
        self.value = value;
        save_filters(&self.storage, value);
        for (_, subscriber) in &self.subscribers {
            subscriber(&self.value);
        }
    }

    pub fn update(&mut self, f: impl FnOnce(CalendarFilters) -> CalendarFilters) {
        self.set(f(self.value));
    }

    /// Register a callback. It is called immediately with the current value
    /// and then after every change.
    pub fn subscribe(
        &mut self,
        subscriber: impl Fn(&CalendarFilters) + Send + Sync + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        subscriber(&self.value);
        self.subscribers.push((id, Box::new(subscriber)));
        id
    }

    /// Remove a callback. Returns whether it was registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(existing, _)| *existing != id);
        self.subscribers.len() != before
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}

impl<S: KeyValueStorage + std::fmt::Debug> std::fmt::Debug for FilterStore<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilterStore")
            .field("storage", &self.storage)
            .field("value", &self.value)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
