// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! End-to-end workflow tests for the habitual-core crate, against a database
//! file in a temporary state directory.

mod check_in;
mod hiding;
mod persistence;
mod reorder;
