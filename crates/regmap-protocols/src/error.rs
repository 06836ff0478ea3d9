//! Registry errors.

use thiserror::Error;

/// Errors produced by registry lookups and strict insertion.
///
/// The `NotFound` and `AlreadyExists` variants are sentinels: callers
/// classify them with [`RegistryError::is_not_found`] and
/// [`RegistryError::is_already_exists`], and classification survives any
/// number of `anyhow` context layers via `downcast_ref`.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// No entry for the requested key.
    #[error("Entry not found: {key} ({type_name})")]
    NotFound {
        /// Name of the value type stored by the registry.
        type_name: &'static str,
        /// Debug rendering of the requested key.
        key: String,
    },

    /// Strict insertion attempted on an occupied key.
    #[error("Entry already registered: {key} ({type_name})")]
    AlreadyExists {
        type_name: &'static str,
        key: String,
    },

    /// A caller-supplied default loader failed.
    ///
    /// The loader's error is surfaced verbatim, never remapped to
    /// `NotFound`. Display and source delegate to the original error.
    #[error(transparent)]
    Loader(#[from] anyhow::Error),
}

impl RegistryError {
    /// Whether this is the missing-entry sentinel.
    pub fn is_not_found(&self) -> bool {
        matches!(self, RegistryError::NotFound { .. })
    }

    /// Whether this is the occupied-key sentinel.
    pub fn is_already_exists(&self) -> bool {
        matches!(self, RegistryError::AlreadyExists { .. })
    }
}
