//! Error taxonomy for store actions and persistence.
//!
//! Asset load failures have no variant: a broken image is swapped for the
//! placeholder URL.

/// Errors surfaced by store actions and the persistence gateway.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    /// A style or grid value outside the declared option set.
    #[error("invalid {field} option: {value:?}")]
    InvalidOption { field: &'static str, value: String },

    /// A secret-robot name that is not in the catalog.
    #[error("unknown robot: {0}")]
    UnknownRobot(String),

    /// The storage backend could not be reached. The store keeps running
    /// in memory when this happens.
    #[error("persistence unavailable: {0}")]
    PersistenceUnavailable(String),

    /// An explicitly imported snapshot could not be parsed at all.
    #[error("invalid snapshot: {0}")]
    InvalidSnapshot(String),
}

impl GameError {
    pub(crate) fn invalid_option(field: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidOption {
            field,
            value: value.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, GameError>;
