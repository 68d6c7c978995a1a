// SPDX-FileCopyrightText: 2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

/// Scroll metrics of the list surface.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollGeometry {
    /// Current scroll offset.
    pub current_offset: f32,

    /// Largest reachable scroll offset.
    pub max_offset: f32,

    /// Visible extent of the list.
    pub viewport_extent: f32,

    /// Total extent of the list content.
    pub content_extent: f32,
}

impl ScrollGeometry {
    /// Records a new viewport extent.
    pub fn set_viewport_extent(&mut self, extent: f32) {
        self.viewport_extent = extent;
        self.recompute_max();
    }

    /// Records a new content extent.
    pub fn set_content_extent(&mut self, extent: f32) {
        self.content_extent = extent;
        self.recompute_max();
    }

    /// `offset` clamped to `[0, max_offset]`.
    pub fn clamp(&self, offset: f32) -> f32 {
        offset.clamp(0.0, self.max_offset)
    }

    fn recompute_max(&mut self) {
        self.max_offset = (self.content_extent - self.viewport_extent).max(0.0);
    }
}

/// Programmatic access to the host's scrollable surface.
pub trait ScrollSurface {
    /// Scrolls to `offset` without reporting it back as a user scroll.
    fn scroll_to(&mut self, offset: f32);
}

impl<F: FnMut(f32)> ScrollSurface for F {
    fn scroll_to(&mut self, offset: f32) {
        self(offset)
    }
}

/// A surface that ignores scroll requests, for hosts that render the offset
/// from [`ScrollGeometry`] themselves.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSurface;

impl ScrollSurface for NoopSurface {
    fn scroll_to(&mut self, _offset: f32) {}
}

/// Converts the touch position into an edge-scroll velocity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeScroller {
    /// Size of the upper edge zone.
    pub upper_threshold: f32,

    /// Size of the lower edge zone.
    pub lower_threshold: f32,

    /// Speed at the very edge.
    pub max_speed: f32,
}

impl EdgeScroller {
    /// Velocity for a touch at `touch_y` in a viewport of `viewport_extent`.
    ///
    /// Negative scrolls up. `None` (no touch) yields zero.
    pub fn velocity(&self, touch_y: Option<f32>, viewport_extent: f32) -> f32 {
        let Some(y) = touch_y else {
            return 0.0;
        };

        let upper = self.upper_threshold;
        if upper > 0.0 && y <= upper {
            return -self.max_speed * ((upper - y) / upper).min(1.0);
        }

        let lower = self.lower_threshold;
        let bottom = viewport_extent - lower;
        if lower > 0.0 && y >= bottom {
            return self.max_speed * ((y - bottom) / lower).min(1.0);
        }

        0.0
    }
}
