//! Per-page session owned by the WASM bridge.
//!
//! The store itself is an ordinary constructed value; the bridge keeps the
//! one live `Session` in a `thread_local!` + `RefCell`, which is safe in
//! single-threaded WASM. Route handlers receive `&Session` / `&mut Session`
//! and run to completion, so actions never interleave.

use std::cell::RefCell;

use crate::assets::AssetConfig;
use crate::game::store::GameStore;
use crate::gesture::{GestureConfig, LongPress};
use crate::storage::{self, Gateway};

#[derive(Debug)]
pub struct Session {
    pub store: GameStore,
    pub gesture: LongPress,
    /// Robot under the pointer for the interaction in progress.
    pub gesture_target: Option<String>,
    pub assets: AssetConfig,
}

impl Session {
    pub fn new(store: GameStore) -> Self {
        Self {
            store,
            gesture: LongPress::default(),
            gesture_target: None,
            assets: AssetConfig::default(),
        }
    }

    /// Session backed by localStorage when available.
    pub fn open_default() -> Self {
        Self::new(GameStore::open(Gateway::new(storage::default_backend())))
    }

    pub fn in_memory() -> Self {
        Self::new(GameStore::in_memory())
    }

    /// Apply host configuration. A zero delay keeps the current one.
    pub fn configure(&mut self, base_url: &str, long_press_ms: u32) {
        if !base_url.is_empty() {
            self.assets.base_url = base_url.to_string();
        }
        if long_press_ms > 0 {
            self.gesture = LongPress::new(GestureConfig {
                delay_ms: long_press_ms,
                ..self.gesture.config()
            });
            self.gesture_target = None;
        }
    }
}

thread_local! {
    static SESSION: RefCell<Session> = RefCell::new(Session::open_default());
}

/// Execute a closure with read access to the session.
pub fn with_session<F, R>(f: F) -> R
where
    F: FnOnce(&Session) -> R,
{
    SESSION.with(|s| f(&s.borrow()))
}

/// Execute a closure with mutable access to the session.
pub fn with_session_mut<F, R>(f: F) -> R
where
    F: FnOnce(&mut Session) -> R,
{
    SESSION.with(|s| f(&mut s.borrow_mut()))
}

/// Replace the whole session (tests, and hosts that swap storage).
pub fn replace_session(new_session: Session) {
    SESSION.with(|s| {
        *s.borrow_mut() = new_session;
    });
}
