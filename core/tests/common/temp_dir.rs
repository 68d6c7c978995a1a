// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Temporary state directories, removed on drop.

use std::path::PathBuf;

/// Temporary directories used for testing.
#[derive(Debug)]
pub struct TempDirs {
    base: PathBuf,

    /// State directory for database files, not created yet.
    pub state_dir: PathBuf,
}

impl TempDirs {
    /// Creates a fresh base directory.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation fails.
    pub fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let base = tempfile::tempdir()?.keep();
        let state_dir = base.join("state").join("habitual");
        Ok(Self { base, state_dir })
    }

    /// Path of the database file inside the state directory.
    #[must_use]
    pub fn db_path(&self) -> PathBuf {
        self.state_dir.join("habitual.db")
    }
}

/// Sets up temporary directories for integration tests.
///
/// # Errors
///
/// Returns an error if directory creation fails.
pub fn setup_temp_dirs() -> Result<TempDirs, Box<dyn std::error::Error>> {
    TempDirs::new()
}

impl Drop for TempDirs {
    fn drop(&mut self) {
        if let Err(e) = std::fs::remove_dir_all(&self.base) {
            tracing::warn!(path = %self.base.display(), err = %e, "failed to clean up temp directory");
        }
    }
}
