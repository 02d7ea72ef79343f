//! Closed option sets for display preferences: illustration style and grid
//! column count. Both parse from their wire form and reject anything outside
//! the declared set with `InvalidOption`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::GameError;

/// Illustration style. Each value is also the suffix of the generated image
/// file, e.g. `mars_rover_blocky.png`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    Blocky,
    #[default]
    Realistic,
}

impl Style {
    pub const ALL: [Style; 2] = [Style::Blocky, Style::Realistic];

    pub fn as_str(self) -> &'static str {
        match self {
            Style::Blocky => "blocky",
            Style::Realistic => "realistic",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Style::Blocky => "Blocky",
            Style::Realistic => "Realistic",
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Style {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Style::ALL
            .into_iter()
            .find(|style| style.as_str() == s)
            .ok_or_else(|| GameError::invalid_option("style", s))
    }
}

/// Fixed column counts offered next to `auto`.
pub const GRID_COLUMN_COUNTS: [u8; 6] = [3, 4, 5, 6, 8, 10];

/// Board column preference: `auto` sizes by card count, otherwise a fixed
/// count from `GRID_COLUMN_COUNTS`. Construct fixed values with
/// `GridColumns::fixed` so the invariant holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GridColumns {
    #[default]
    Auto,
    Fixed(u8),
}

impl GridColumns {
    pub fn fixed(count: u8) -> Result<Self, GameError> {
        if GRID_COLUMN_COUNTS.contains(&count) {
            Ok(GridColumns::Fixed(count))
        } else {
            Err(GameError::invalid_option("grid", count.to_string()))
        }
    }

    /// Every declared option, `auto` first.
    pub fn options() -> impl Iterator<Item = GridColumns> {
        std::iter::once(GridColumns::Auto).chain(GRID_COLUMN_COUNTS.into_iter().map(GridColumns::Fixed))
    }

    pub fn label(self) -> String {
        match self {
            GridColumns::Auto => "Auto".to_string(),
            GridColumns::Fixed(n) => n.to_string(),
        }
    }

    /// Parse a JSON value as persisted: `"auto"`, a number, or a numeric
    /// string.
    pub fn from_json(value: &serde_json::Value) -> Result<Self, GameError> {
        match value {
            serde_json::Value::String(s) => s.parse(),
            serde_json::Value::Number(n) => n
                .as_u64()
                .and_then(|n| u8::try_from(n).ok())
                .ok_or_else(|| GameError::invalid_option("grid", n.to_string()))
                .and_then(GridColumns::fixed),
            other => Err(GameError::invalid_option("grid", other.to_string())),
        }
    }
}

impl Serialize for GridColumns {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            GridColumns::Auto => serializer.serialize_str("auto"),
            GridColumns::Fixed(n) => serializer.serialize_u8(*n),
        }
    }
}

impl fmt::Display for GridColumns {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridColumns::Auto => f.write_str("auto"),
            GridColumns::Fixed(n) => write!(f, "{}", n),
        }
    }
}

impl FromStr for GridColumns {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("auto") {
            return Ok(GridColumns::Auto);
        }
        trimmed
            .parse::<u8>()
            .map_err(|_| GameError::invalid_option("grid", s))
            .and_then(GridColumns::fixed)
    }
}
