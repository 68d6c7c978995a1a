// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

mod cli;
mod cmd_check;
mod cmd_generate_completion;
mod cmd_routine;
mod cmd_task;
mod config;
mod routine_formatter;
mod table;
mod task_formatter;
mod tui;
mod util;

pub use crate::cli::{Cli, Commands, run};
