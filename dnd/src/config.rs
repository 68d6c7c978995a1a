// SPDX-FileCopyrightText: 2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::time::Duration;

/// Tuning of a reorderable list.
///
/// Distances are in list units: pixels on a touch screen, rows on a terminal.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DragConfig {
    /// Distance from the top edge within which edge scrolling kicks in. Zero
    /// disables the upper edge.
    pub upper_threshold: f32,

    /// Distance from the bottom edge within which edge scrolling kicks in.
    /// Zero disables the lower edge.
    pub lower_threshold: f32,

    /// Edge-scroll speed at the very edge, per frame.
    pub max_speed: f32,

    /// Duration of the animation moving a row out of (or back into) its slot.
    #[cfg_attr(
        feature = "serde",
        serde(rename = "evasion_duration_ms", with = "millis")
    )]
    pub evasion_duration: Duration,

    /// Duration of the snap animation after the dragged row is released.
    #[cfg_attr(
        feature = "serde",
        serde(rename = "dropping_duration_ms", with = "millis")
    )]
    pub dropping_duration: Duration,

    /// Space between rows, added to each measured row extent.
    pub item_gap: f32,

    /// Height of the whole screen, when the touch coordinates are screen
    /// absolute rather than relative to the list viewport.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub screen_extent: Option<f32>,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            upper_threshold: 150.0,
            lower_threshold: 150.0,
            max_speed: 20.0,
            evasion_duration: Duration::from_millis(200),
            dropping_duration: Duration::from_millis(200),
            item_gap: 8.0,
            screen_extent: None,
        }
    }
}

impl DragConfig {
    /// Sets both edge thresholds.
    pub fn with_thresholds(mut self, upper: f32, lower: f32) -> Self {
        self.upper_threshold = upper;
        self.lower_threshold = lower;
        self
    }

    /// Sets the maximum edge-scroll speed.
    pub fn with_max_speed(mut self, max_speed: f32) -> Self {
        self.max_speed = max_speed;
        self
    }

    /// Sets both animation durations.
    pub fn with_durations(mut self, evasion: Duration, dropping: Duration) -> Self {
        self.evasion_duration = evasion;
        self.dropping_duration = dropping;
        self
    }

    /// Sets the gap between rows.
    pub fn with_item_gap(mut self, item_gap: f32) -> Self {
        self.item_gap = item_gap;
        self
    }

    /// Sets the screen height used for edge detection.
    pub fn with_screen_extent(mut self, extent: f32) -> Self {
        self.screen_extent = Some(extent);
        self
    }
}

#[cfg(feature = "serde")]
mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, ser: S) -> Result<S::Ok, S::Error> {
        ser.serialize_u64(u64::try_from(value.as_millis()).unwrap_or(u64::MAX))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<Duration, D::Error> {
        u64::deserialize(de).map(Duration::from_millis)
    }
}
