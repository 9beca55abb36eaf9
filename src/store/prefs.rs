//! JSON preference file
//!
//! Persists the display toggles and the recent-color set as a single
//! pretty-printed JSON document. Reads fall back to defaults when the
//! file does not exist yet; writes replace the whole document. I/O is
//! synchronous and is expected to run on a blocking task, off the
//! interactive thread.

use crate::{PickerError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Boolean toggles for the "3D" rendering of each display surface
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayToggles {
    #[serde(default)]
    pub use_3d: bool,
    #[serde(default)]
    pub keypad_3d: bool,
    #[serde(default)]
    pub topbar_3d: bool,
    #[serde(default)]
    pub sheet_3d: bool,
    #[serde(default)]
    pub drawer_3d: bool,
    #[serde(default)]
    pub settings_3d: bool,
}

impl DisplayToggles {
    /// Set every per-surface toggle at once
    pub fn set_all_surfaces(&mut self, enabled: bool) {
        self.keypad_3d = enabled;
        self.topbar_3d = enabled;
        self.sheet_3d = enabled;
        self.drawer_3d = enabled;
        self.settings_3d = enabled;
    }
}

/// The persisted preference document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default)]
    pub display: DisplayToggles,
    /// Recent colors as an unordered set of hex strings; recency is
    /// reconstructed in memory
    #[serde(default)]
    pub history: BTreeSet<String>,
}

/// Preference file handle
///
/// Holds the path plus a shared write-version guard: saves dispatched to
/// background tasks may complete out of order, and the guard keeps an
/// older document from overwriting a newer one.
#[derive(Debug, Clone)]
pub struct PreferenceStore {
    path: PathBuf,
    last_written: Arc<Mutex<u64>>,
}

impl PreferenceStore {
    /// Create a store for the given file path; nothing is read or
    /// created until the first load or save
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            last_written: Arc::new(Mutex::new(0)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read preferences, or defaults when the file does not exist
    ///
    /// # Errors
    ///
    /// Returns an error for unreadable files or undecodable contents; a
    /// missing file is not an error.
    pub fn load(&self) -> Result<Preferences> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Preferences::default());
            }
            Err(e) => {
                return Err(PickerError::preference_io(
                    format!("reading {}", self.path.display()),
                    e,
                ));
            }
        };

        serde_json::from_str(&raw).map_err(|e| {
            PickerError::preference_encoding(format!("decoding {}", self.path.display()), e)
        })
    }

    /// Write the full preference document, creating parent directories
    /// as needed
    pub fn save(&self, preferences: &Preferences) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    PickerError::preference_io(format!("creating {}", parent.display()), e)
                })?;
            }
        }

        let json = serde_json::to_string_pretty(preferences)
            .map_err(|e| PickerError::preference_encoding("encoding preferences", e))?;

        fs::write(&self.path, json).map_err(|e| {
            PickerError::preference_io(format!("writing {}", self.path.display()), e)
        })
    }

    /// Write a versioned document unless a newer version already landed
    ///
    /// Callers hand out monotonically increasing versions from a single
    /// writer; clones of this store share the guard. Returns false when
    /// the write was skipped as stale.
    pub fn save_if_newer(&self, version: u64, preferences: &Preferences) -> Result<bool> {
        let mut last = self
            .last_written
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if version <= *last {
            return Ok(false);
        }
        self.save(preferences)?;
        *last = version;
        Ok(true)
    }
}
