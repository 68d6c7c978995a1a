// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

mod config;
mod habitual;
mod localdb;
mod position;
mod types;

pub use crate::config::{APP_NAME, Config, expand_path, get_config_dir};
pub use crate::habitual::{Habitual, WEEK_DAYS};
pub use crate::position::{PositionError, SENTINEL, decode, encode};
pub use crate::types::{Completion, Routine, Task};
