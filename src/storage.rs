//! Persistence gateway — durable key-value storage of the snapshot under one
//! fixed key.
//!
//! Backends only move JSON values in and out. The gateway owns the policy:
//! saves never fail the caller, a backend that errors flips the gateway into
//! degraded (in-memory only) mode, and a missing entry is reported as
//! `Loaded::NotFound`, distinct from an entry that decodes to defaults.

use log::{debug, warn};
use serde_json::Value;
use std::collections::HashMap;

use crate::error::{GameError, Result};
use crate::game::snapshot::{Decoded, PersistedSnapshot};

/// localStorage key, kept from the first release so old saves are found.
pub const STORAGE_KEY: &str = "robot-guess-who-storage";

/// Raw key-value access. Implementations must not panic when storage is
/// missing; report `PersistenceUnavailable` instead.
pub trait SnapshotBackend {
    fn read(&self, key: &str) -> Result<Option<Value>>;
    fn write(&mut self, key: &str, value: &Value) -> Result<()>;
}

/// In-memory backend. Used by tests and as the fallback when the browser
/// has no usable storage. Values are kept in their serialized form so the
/// persisted bytes can be inspected.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: HashMap<String, String>,
    writes: usize,
    offline: bool,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend whose every call fails, standing in for disabled storage or
    /// an exhausted quota.
    pub fn offline() -> Self {
        Self {
            offline: true,
            ..Self::default()
        }
    }

    pub fn with_entry(key: &str, raw: &str) -> Self {
        let mut backend = Self::default();
        backend.entries.insert(key.to_string(), raw.to_string());
        backend
    }

    pub fn raw(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn write_count(&self) -> usize {
        self.writes
    }
}

impl SnapshotBackend for MemoryBackend {
    fn read(&self, key: &str) -> Result<Option<Value>> {
        if self.offline {
            return Err(GameError::PersistenceUnavailable("storage offline".to_string()));
        }
        match self.entries.get(key) {
            // Unparseable text still counts as found; it decodes to defaults.
            Some(raw) => Ok(Some(serde_json::from_str(raw).unwrap_or(Value::Null))),
            None => Ok(None),
        }
    }

    fn write(&mut self, key: &str, value: &Value) -> Result<()> {
        if self.offline {
            return Err(GameError::PersistenceUnavailable("storage offline".to_string()));
        }
        self.entries.insert(key.to_string(), value.to_string());
        self.writes += 1;
        Ok(())
    }
}

/// `window.localStorage` through gloo-storage.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default)]
pub struct BrowserBackend;

#[cfg(target_arch = "wasm32")]
impl BrowserBackend {
    /// Returns `None` when there is no window (e.g. inside a worker) or
    /// storage is disabled; gloo would panic on access in those cases.
    pub fn detect() -> Option<Self> {
        let storage = web_sys::window()?.local_storage().ok().flatten();
        storage.map(|_| BrowserBackend)
    }
}

#[cfg(target_arch = "wasm32")]
impl SnapshotBackend for BrowserBackend {
    fn read(&self, key: &str) -> Result<Option<Value>> {
        use gloo_storage::errors::StorageError;
        use gloo_storage::{LocalStorage, Storage};

        match LocalStorage::get::<Value>(key) {
            Ok(value) => Ok(Some(value)),
            Err(StorageError::KeyNotFound(_)) => Ok(None),
            // Present but not JSON: found, decodes to defaults.
            Err(StorageError::SerdeError(_)) => Ok(Some(Value::Null)),
            Err(e) => Err(GameError::PersistenceUnavailable(e.to_string())),
        }
    }

    fn write(&mut self, key: &str, value: &Value) -> Result<()> {
        use gloo_storage::{LocalStorage, Storage};

        LocalStorage::set(key, value).map_err(|e| GameError::PersistenceUnavailable(e.to_string()))
    }
}

/// The backend for the current target: localStorage in the browser when it
/// is reachable, memory otherwise.
pub fn default_backend() -> Box<dyn SnapshotBackend> {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(browser) = BrowserBackend::detect() {
            return Box::new(browser);
        }
        warn!("localStorage unavailable; game progress will not survive a reload");
    }
    Box::new(MemoryBackend::new())
}

/// Outcome of a gateway load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Loaded {
    /// Nothing stored yet (first run), or storage unreachable.
    NotFound,
    Found(Decoded),
}

pub struct Gateway {
    backend: Box<dyn SnapshotBackend>,
    key: String,
    degraded: bool,
}

impl Gateway {
    pub fn new(backend: Box<dyn SnapshotBackend>) -> Self {
        Self::with_key(backend, STORAGE_KEY)
    }

    pub fn with_key(backend: Box<dyn SnapshotBackend>, key: &str) -> Self {
        Self {
            backend,
            key: key.to_string(),
            degraded: false,
        }
    }

    /// Gateway over an in-memory backend.
    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryBackend::new()))
    }

    /// True once any backend call has failed. Play continues in memory.
    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    pub fn load(&mut self) -> Loaded {
        match self.backend.read(&self.key) {
            Ok(Some(value)) => {
                let decoded = PersistedSnapshot::decode(&value);
                if !decoded.fallbacks.is_empty() {
                    warn!(
                        "snapshot v{} loaded with defaults for: {}",
                        decoded.source_version,
                        decoded.fallbacks.join(", ")
                    );
                }
                Loaded::Found(decoded)
            }
            Ok(None) => Loaded::NotFound,
            Err(e) => {
                self.mark_degraded(&e);
                Loaded::NotFound
            }
        }
    }

    /// Write the snapshot. Failures are absorbed; the return value only
    /// reports whether the write landed.
    pub fn save(&mut self, snapshot: &PersistedSnapshot) -> bool {
        match self.backend.write(&self.key, &snapshot.to_value()) {
            Ok(()) => {
                debug!("snapshot saved ({} eliminated)", snapshot.eliminated.len());
                true
            }
            Err(e) => {
                self.mark_degraded(&e);
                false
            }
        }
    }

    fn mark_degraded(&mut self, err: &GameError) {
        if !self.degraded {
            warn!("{}; continuing in memory", err);
        }
        self.degraded = true;
    }
}

impl std::fmt::Debug for Gateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gateway")
            .field("key", &self.key)
            .field("degraded", &self.degraded)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::options::Style;

    /// Backend shared with the test so the stored bytes can be inspected
    /// after the gateway takes ownership.
    #[derive(Clone, Default)]
    struct SharedBackend(std::rc::Rc<std::cell::RefCell<MemoryBackend>>);

    impl SnapshotBackend for SharedBackend {
        fn read(&self, key: &str) -> Result<Option<Value>> {
            self.0.borrow().read(key)
        }

        fn write(&mut self, key: &str, value: &Value) -> Result<()> {
            self.0.borrow_mut().write(key, value)
        }
    }

    #[test]
    fn first_run_is_not_found() {
        let mut gateway = Gateway::in_memory();
        assert_eq!(gateway.load(), Loaded::NotFound);
        assert!(!gateway.is_degraded());
    }

    #[test]
    fn empty_snapshot_is_found() {
        let backend = MemoryBackend::with_entry(STORAGE_KEY, "{}");
        let mut gateway = Gateway::new(Box::new(backend));
        match gateway.load() {
            Loaded::Found(decoded) => assert_eq!(decoded.snapshot, PersistedSnapshot::default()),
            Loaded::NotFound => panic!("expected a found snapshot"),
        }
    }

    #[test]
    fn corrupt_text_is_found_with_defaults() {
        let backend = MemoryBackend::with_entry(STORAGE_KEY, "{{{ not json");
        let mut gateway = Gateway::new(Box::new(backend));
        assert!(matches!(gateway.load(), Loaded::Found(_)));
    }

    #[test]
    fn save_then_load_returns_snapshot() {
        let mut gateway = Gateway::in_memory();
        let mut snapshot = PersistedSnapshot::default();
        snapshot.style = Style::Blocky;
        snapshot.eliminated.insert("Mars Rover".into(), true);
        assert!(gateway.save(&snapshot));

        match gateway.load() {
            Loaded::Found(decoded) => assert_eq!(decoded.snapshot, snapshot),
            Loaded::NotFound => panic!("expected saved snapshot"),
        }
    }

    #[test]
    fn save_is_idempotent() {
        let shared = SharedBackend::default();
        let mut gateway = Gateway::new(Box::new(shared.clone()));
        let mut snapshot = PersistedSnapshot::default();
        snapshot.eliminated.insert("Pool Cleaner".into(), true);
        snapshot.eliminated.insert("Camera Drone".into(), false);

        gateway.save(&snapshot);
        let once = shared.0.borrow().raw(STORAGE_KEY).map(str::to_string);
        gateway.save(&snapshot);
        let twice = shared.0.borrow().raw(STORAGE_KEY).map(str::to_string);

        assert!(once.is_some());
        assert_eq!(once, twice);
        assert_eq!(shared.0.borrow().write_count(), 2);
    }

    #[test]
    fn offline_backend_degrades_without_failing() {
        let mut gateway = Gateway::new(Box::new(MemoryBackend::offline()));
        assert_eq!(gateway.load(), Loaded::NotFound);
        assert!(gateway.is_degraded());
        assert!(!gateway.save(&PersistedSnapshot::default()));
    }

    #[test]
    fn custom_key_is_isolated() {
        let backend = MemoryBackend::with_entry(STORAGE_KEY, r#"{"style":"blocky"}"#);
        let mut gateway = Gateway::with_key(Box::new(backend), "other-key");
        assert_eq!(gateway.load(), Loaded::NotFound);
    }
}
