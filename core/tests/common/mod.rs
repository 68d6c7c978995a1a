// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Common test utilities for integration tests.

mod fixtures;
mod temp_dir;

pub use fixtures::{names, seed_routines, setup_habitual, test_config};
pub use temp_dir::setup_temp_dirs;
