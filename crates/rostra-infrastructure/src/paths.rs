//! Centralized path resolution for the local store.

use std::path::PathBuf;

use rostra_core::error::{Result, RostraError};

/// Resolves where the store's collection files live.
pub struct RostraPaths;

impl RostraPaths {
    /// The default base directory: `<platform config dir>/rostra`.
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("rostra"))
            .ok_or_else(|| RostraError::storage("cannot determine the config directory"))
    }
}
