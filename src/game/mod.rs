//! Game state: the option types, the persisted snapshot format, the store
//! that owns eliminations and settings, and the per-page session that the
//! WASM bridge keeps in a `thread_local`.

pub mod options;
pub mod session;
pub mod snapshot;
pub mod store;
