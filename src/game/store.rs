//! Game state store — the single owner of session-mutable game state.
//!
//! Every action validates first and mutates second, so a rejected action
//! leaves the state untouched. A successful action writes the snapshot
//! through the gateway (best effort) and then notifies subscribers.
//!
//! Style and grid are display preferences, not game progress: `reset`
//! leaves them alone.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use log::{debug, info, warn};
use std::collections::BTreeMap;

use crate::catalog::{self, ROBOTS, Robot};
use crate::error::{GameError, Result};
use crate::game::options::{GridColumns, Style};
use crate::game::snapshot::{PersistedSnapshot, SNAPSHOT_VERSION};
use crate::storage::{Gateway, Loaded};

/// Everything the store owns that survives a reload.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GameState {
    /// Robot name → eliminated. Absent means not eliminated.
    pub eliminated: BTreeMap<String, bool>,
    pub style: Style,
    pub grid_columns: GridColumns,
    pub secret_robot: Option<String>,
}

impl From<PersistedSnapshot> for GameState {
    fn from(snapshot: PersistedSnapshot) -> Self {
        Self {
            eliminated: snapshot.eliminated,
            style: snapshot.style,
            grid_columns: snapshot.grid_columns,
            secret_robot: snapshot.secret_robot,
        }
    }
}

impl GameState {
    pub fn to_snapshot(&self) -> PersistedSnapshot {
        PersistedSnapshot {
            version: SNAPSHOT_VERSION,
            eliminated: self.eliminated.clone(),
            style: self.style,
            grid_columns: self.grid_columns,
            secret_robot: self.secret_robot.clone(),
        }
    }
}

pub type SubscriptionId = u32;

type Listener = Box<dyn FnMut(&GameState)>;

pub struct GameStore {
    state: GameState,
    gateway: Gateway,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: SubscriptionId,
    /// Set when a stored game with progress was loaded and nothing has
    /// happened since.
    resume_pending: bool,
}

impl GameStore {
    /// Build a store from an initial snapshot. Nothing is read from the
    /// gateway; use `open` for that. The snapshot goes through the same
    /// per-field fallback as stored data, so an unknown secret robot or an
    /// undeclared grid count takes its default.
    pub fn create(initial: PersistedSnapshot, gateway: Gateway) -> Self {
        let decoded = PersistedSnapshot::decode(&initial.to_value());
        if !decoded.fallbacks.is_empty() {
            warn!("initial snapshot used defaults for: {}", decoded.fallbacks.join(", "));
        }
        Self {
            state: GameState::from(decoded.snapshot),
            gateway,
            listeners: Vec::new(),
            next_subscription: 0,
            resume_pending: false,
        }
    }

    /// Build a store from whatever the gateway holds, defaults on first run.
    pub fn open(mut gateway: Gateway) -> Self {
        let loaded = gateway.load();
        let found = matches!(loaded, Loaded::Found(_));
        let initial = match loaded {
            Loaded::Found(decoded) => decoded.snapshot,
            Loaded::NotFound => PersistedSnapshot::default(),
        };
        let mut store = Self::create(initial, gateway);
        store.resume_pending = found && store.has_progress();
        store
    }

    pub fn in_memory() -> Self {
        Self::create(PersistedSnapshot::default(), Gateway::in_memory())
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn snapshot(&self) -> PersistedSnapshot {
        self.state.to_snapshot()
    }

    /// True when the backend has failed and progress is memory-only.
    pub fn is_degraded(&self) -> bool {
        self.gateway.is_degraded()
    }

    // ── Subscriptions ──────────────────────────────────────────────

    /// Register a callback run after every successful mutation.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&GameState) + 'static,
    {
        let id = self.next_subscription;
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns false if the id was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    // ── Actions ────────────────────────────────────────────────────

    /// Flip the eliminated flag for `name`. Names outside the catalog are
    /// tolerated. Returns the new flag.
    pub fn toggle_elimination(&mut self, name: &str) -> bool {
        let entry = self.state.eliminated.entry(name.to_string()).or_insert(false);
        *entry = !*entry;
        let now = *entry;
        debug!("toggle {} -> {}", name, now);
        self.commit();
        now
    }

    pub fn set_style(&mut self, value: &str) -> Result<Style> {
        let style: Style = value.parse()?;
        self.state.style = style;
        self.commit();
        Ok(style)
    }

    pub fn set_grid_preference(&mut self, value: &str) -> Result<GridColumns> {
        let grid: GridColumns = value.parse()?;
        self.state.grid_columns = grid;
        self.commit();
        Ok(grid)
    }

    /// Choose (or clear, with `None`) the robot the opponent has to guess.
    pub fn set_secret_robot(&mut self, name: Option<&str>) -> Result<()> {
        let selection = match name {
            Some(name) => {
                let robot = catalog::find_robot(name)
                    .ok_or_else(|| GameError::UnknownRobot(name.to_string()))?;
                Some(robot.name.to_string())
            }
            None => None,
        };
        self.state.secret_robot = selection;
        self.commit();
        Ok(())
    }

    /// Start a new game: clear eliminations and the secret robot. Style and
    /// grid preference are kept.
    pub fn reset(&mut self) {
        self.state.eliminated.clear();
        self.state.secret_robot = None;
        info!("game reset");
        self.commit();
    }

    /// Re-read the stored snapshot with per-field fallback. Never fails;
    /// when nothing is stored (or storage is unreachable) the in-memory
    /// state is kept.
    pub fn load(&mut self) {
        if let Loaded::Found(decoded) = self.gateway.load() {
            self.state = GameState::from(decoded.snapshot);
            self.resume_pending = self.has_progress();
            self.notify();
        }
    }

    // ── Import / export ────────────────────────────────────────────

    pub fn export_json(&self) -> String {
        self.snapshot().to_json()
    }

    /// Replace the state from snapshot JSON. Text that is not a JSON object
    /// is rejected and the state is unchanged; anything else loads per field.
    pub fn import_json(&mut self, json: &str) -> Result<()> {
        let decoded = PersistedSnapshot::parse(json)?;
        self.state = GameState::from(decoded.snapshot);
        self.commit();
        Ok(())
    }

    /// URL-safe base64 of the snapshot JSON, for moving a game between
    /// devices.
    pub fn export_share_code(&self) -> String {
        URL_SAFE_NO_PAD.encode(self.export_json())
    }

    pub fn import_share_code(&mut self, code: &str) -> Result<()> {
        let bytes = URL_SAFE_NO_PAD
            .decode(code.trim())
            .map_err(|e| GameError::InvalidSnapshot(format!("base64 decode error: {}", e)))?;
        let json = String::from_utf8(bytes)
            .map_err(|e| GameError::InvalidSnapshot(format!("utf-8 error: {}", e)))?;
        self.import_json(&json)
    }

    // ── Welcome-back prompt ────────────────────────────────────────

    /// Offer "continue or start over" only for a game loaded from storage
    /// with progress, until it is answered or any action is taken.
    pub fn should_offer_resume(&self) -> bool {
        self.resume_pending && self.has_progress()
    }

    pub fn acknowledge_resume(&mut self) {
        self.resume_pending = false;
    }

    // ── Derived views ──────────────────────────────────────────────

    pub fn is_eliminated(&self, name: &str) -> bool {
        self.state.eliminated.get(name).copied().unwrap_or(false)
    }

    /// Eliminated robots that are in the catalog.
    pub fn eliminated_count(&self) -> usize {
        ROBOTS.iter().filter(|r| self.is_eliminated(r.name)).count()
    }

    pub fn remaining_count(&self) -> usize {
        ROBOTS.len() - self.eliminated_count()
    }

    /// A catalog robot is eliminated or a secret robot is chosen.
    pub fn has_progress(&self) -> bool {
        self.eliminated_count() > 0 || self.secret_robot().is_some()
    }

    pub fn secret_robot(&self) -> Option<&'static Robot> {
        self.state.secret_robot.as_deref().and_then(catalog::find_robot)
    }

    /// Robots in board order. With `hide_eliminated` only standing robots are
    /// returned; otherwise eliminated robots move to the end, each group in
    /// catalog order.
    pub fn visible_robots(&self, hide_eliminated: bool) -> Vec<&'static Robot> {
        let (standing, eliminated): (Vec<&'static Robot>, Vec<&'static Robot>) =
            ROBOTS.iter().partition(|r| !self.is_eliminated(r.name));
        if hide_eliminated {
            standing
        } else {
            standing.into_iter().chain(eliminated).collect()
        }
    }

    // ── Internals ──────────────────────────────────────────────────

    fn commit(&mut self) {
        self.resume_pending = false;
        self.gateway.save(&self.state.to_snapshot());
        self.notify();
    }

    fn notify(&mut self) {
        for (_, listener) in self.listeners.iter_mut() {
            listener(&self.state);
        }
    }
}

impl std::fmt::Debug for GameStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameStore")
            .field("state", &self.state)
            .field("gateway", &self.gateway)
            .field("listeners", &self.listeners.len())
            .field("resume_pending", &self.resume_pending)
            .finish()
    }
}
