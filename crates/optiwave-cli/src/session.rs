//! Persisted login session
//!
//! The token returned by login/register is stored in a small JSON file under
//! the user's config directory so authenticated commands work across
//! invocations.

use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A stored login session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub email: String,
    pub name: String,
}

impl Session {
    /// Path of the session file.
    ///
    /// `OPTIWAVE_CONFIG_DIR` overrides the platform config directory.
    pub fn path() -> Result<PathBuf> {
        let base = match std::env::var("OPTIWAVE_CONFIG_DIR") {
            Ok(dir) => PathBuf::from(dir),
            Err(_) => dirs::config_dir()
                .ok_or_else(|| CliError::session("could not determine a config directory"))?
                .join("optiwave"),
        };
        Ok(base.join("session.json"))
    }

    /// Load the stored session, if any.
    pub fn load() -> Result<Option<Session>> {
        let path = Self::path()?;
        if !path.exists() {
            return Ok(None);
        }

        let contents = std::fs::read_to_string(&path)?;
        let session = serde_json::from_str(&contents)
            .map_err(|e| CliError::session(format!("invalid session file: {}", e)))?;
        Ok(Some(session))
    }

    /// Persist this session.
    pub fn save(&self) -> Result<()> {
        let path = Self::path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Remove any stored session.
    pub fn clear() -> Result<bool> {
        let path = Self::path()?;
        if path.exists() {
            std::fs::remove_file(&path)?;
            return Ok(true);
        }
        Ok(false)
    }
}
