//! Persisted snapshot — the serializable subset of store state.
//!
//! ## Shape (version 2)
//!
//! ```text
//! {
//!   "version": 2,
//!   "eliminated": { "Mars Rover": true, ... },
//!   "style": "blocky" | "realistic",
//!   "gridColumns": "auto" | 3 | 4 | 5 | 6 | 8 | 10,
//!   "secretRobot": "Mars Rover" | null
//! }
//! ```
//!
//! ## Reading older shapes
//!
//! Earlier releases stored the state inside a `{"state": {...}, "version": n}`
//! envelope with the field names `flippedRobots`, `imageStyle` and
//! `myRobotName`, and some carried session flags or a retired style. Decoding
//! is per-field: a field that is missing or invalid takes its default and the
//! rest of the snapshot still loads. Decoding a JSON value never fails.

use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::catalog;
use crate::error::GameError;
use crate::game::options::{GridColumns, Style};

pub const SNAPSHOT_VERSION: u32 = 2;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedSnapshot {
    pub version: u32,
    pub eliminated: BTreeMap<String, bool>,
    pub style: Style,
    pub grid_columns: GridColumns,
    pub secret_robot: Option<String>,
}

impl Default for PersistedSnapshot {
    fn default() -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            eliminated: BTreeMap::new(),
            style: Style::default(),
            grid_columns: GridColumns::default(),
            secret_robot: None,
        }
    }
}

/// Result of decoding a stored value: the usable snapshot plus the fields
/// that had to fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    pub snapshot: PersistedSnapshot,
    /// Version tag found in storage. 0 for untagged legacy data.
    pub source_version: u32,
    pub fallbacks: Vec<&'static str>,
}

impl PersistedSnapshot {
    /// Canonical JSON form. Map keys are ordered, so the same snapshot always
    /// produces the same bytes.
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    pub fn to_json(&self) -> String {
        self.to_value().to_string()
    }

    /// Parse snapshot JSON text. Only unparseable text is an error; a
    /// parseable document is decoded per field.
    pub fn parse(json: &str) -> Result<Decoded, GameError> {
        let value: Value =
            serde_json::from_str(json).map_err(|e| GameError::InvalidSnapshot(e.to_string()))?;
        if !value.is_object() {
            return Err(GameError::InvalidSnapshot("expected a JSON object".to_string()));
        }
        Ok(Self::decode(&value))
    }

    /// Decode any stored JSON value with per-field fallback.
    pub fn decode(value: &Value) -> Decoded {
        let empty = Map::new();
        let outer = value.as_object().unwrap_or(&empty);
        let source_version = outer
            .get("version")
            .and_then(Value::as_u64)
            .and_then(|v| u32::try_from(v).ok())
            .unwrap_or(0);
        let fields = unwrap_envelope(outer);

        let mut fallbacks = Vec::new();
        let mut snapshot = PersistedSnapshot::default();

        match field(fields, &["eliminated", "flippedRobots"]) {
            Some(Value::Object(entries)) => {
                // Non-boolean entries are dropped; absent already means false.
                snapshot.eliminated = entries
                    .iter()
                    .filter_map(|(name, flag)| flag.as_bool().map(|b| (name.clone(), b)))
                    .collect();
                if snapshot.eliminated.len() != entries.len() {
                    fallbacks.push("eliminated");
                }
            }
            Some(Value::Null) | None => {}
            Some(_) => fallbacks.push("eliminated"),
        }

        match field(fields, &["style", "imageStyle"]) {
            Some(Value::String(s)) => match s.parse::<Style>() {
                Ok(style) => snapshot.style = style,
                Err(_) => fallbacks.push("style"),
            },
            Some(Value::Null) | None => {}
            Some(_) => fallbacks.push("style"),
        }

        match field(fields, &["gridColumns"]) {
            Some(Value::Null) | None => {}
            Some(v) => match GridColumns::from_json(v) {
                Ok(grid) => snapshot.grid_columns = grid,
                Err(_) => fallbacks.push("gridColumns"),
            },
        }

        match field(fields, &["secretRobot", "myRobotName"]) {
            Some(Value::String(name)) if catalog::contains(name) => {
                snapshot.secret_robot = Some(name.clone());
            }
            Some(Value::Null) | None => {}
            Some(_) => fallbacks.push("secretRobot"),
        }

        Decoded {
            snapshot,
            source_version,
            fallbacks,
        }
    }
}

/// Legacy data nests the fields under `"state"`; current data is flat.
fn unwrap_envelope(outer: &Map<String, Value>) -> &Map<String, Value> {
    let is_flat = outer.contains_key("eliminated") || outer.contains_key("style");
    match outer.get("state") {
        Some(Value::Object(inner)) if !is_flat => inner,
        _ => outer,
    }
}

/// First present key wins, so current names shadow legacy aliases.
fn field<'a>(fields: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().find_map(|k| fields.get(*k))
}
