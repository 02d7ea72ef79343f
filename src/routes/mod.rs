//! Route handlers. Each returns an HTML fragment for HTMX to swap, except
//! `/api/game/state` and `/api/gesture`, which return JSON.

pub mod board;
pub mod game;
pub mod gesture;
pub mod secret;
pub mod settings;
pub mod util;
