// SPDX-FileCopyrightText: 2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Slot arithmetic shared by the dragged row and its neighbours.

/// Resolves the slot a dragged row occupies from its vertical offset.
///
/// The floored quotient is nudged by one when negative, so a row dragged
/// upwards changes slot after a full extent, the same as a row dragged
/// downwards. The result is clamped to the list.
///
/// Returns `None` while the extent is unmeasured or the list is empty.
pub fn resolve_slot(
    item_index: usize,
    offset_y: f32,
    extent: f32,
    item_count: usize,
) -> Option<usize> {
    if extent.is_nan() || extent <= 0.0 || item_count == 0 || !offset_y.is_finite() {
        return None;
    }

    let quotient = (offset_y / extent).floor() as i64;
    let relative = if quotient < 0 { quotient + 1 } else { quotient };
    let last = item_count as i64 - 1;
    let slot = (item_index as i64 + relative).clamp(0, last);
    Some(slot as usize)
}

/// How a resting row reacts to the dragged row moving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Evasion {
    /// Move up by one extent to make room below.
    AvoidUp,

    /// Move down by one extent to make room above.
    AvoidDown,

    /// Go back to the resting slot.
    Return,
}

impl Evasion {
    /// Target vertical offset for a row of `extent`.
    pub fn target(self, extent: f32) -> f32 {
        match self {
            Evasion::AvoidUp => -extent,
            Evasion::AvoidDown => extent,
            Evasion::Return => 0.0,
        }
    }
}

/// Decides how the row at `item` reacts when the dragged row, which started at
/// `start`, moves from `previous` to `current`.
///
/// Only a fresh crossing of the row's slot causes movement; `None` means stay
/// put. The dragged row itself never evades.
pub fn evasion_for(item: usize, start: usize, previous: usize, current: usize) -> Option<Evasion> {
    if start < item && current >= item && previous < item {
        // came from above and reached this slot
        Some(Evasion::AvoidUp)
    } else if start > item && current <= item && previous > item {
        Some(Evasion::AvoidDown)
    } else if start < item && current < item && previous >= item {
        // came from above, went back above
        Some(Evasion::Return)
    } else if start > item && current > item && previous <= item {
        Some(Evasion::Return)
    } else {
        None
    }
}
