// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Test data factories for integration tests.

use std::path::Path;

use habitual_core::{Config, Habitual, Routine};
use jiff::civil::{Date, date};

/// The day every fixture pretends it is.
pub const TODAY: Date = date(2026, 3, 10);

/// Creates a test configuration storing its database under `state_dir`.
#[must_use]
pub fn test_config(state_dir: &Path) -> Config {
    Config {
        state_dir: Some(state_dir.to_path_buf()),
    }
}

/// Opens a store under `state_dir`, pinned to [`TODAY`].
pub async fn setup_habitual(state_dir: &Path) -> Habitual {
    let mut habitual = Habitual::new(test_config(state_dir))
        .await
        .expect("Failed to open store");
    habitual.set_today(TODAY);
    habitual
}

/// Appends one routine per name, in order.
pub async fn seed_routines(habitual: &Habitual, names: &[&str]) -> Vec<Routine> {
    let mut routines = Vec::with_capacity(names.len());
    for name in names {
        let routine = habitual
            .new_routine(name)
            .await
            .expect("Failed to create routine");
        routines.push(routine);
    }
    routines
}

/// Names of the routines, in order.
#[must_use]
pub fn names(routines: &[Routine]) -> Vec<&str> {
    routines.iter().map(|r| r.name.as_str()).collect()
}
