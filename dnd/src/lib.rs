// SPDX-FileCopyrightText: 2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Headless drag-and-drop engine for reorderable, auto-scrolling lists.
//!
//! A [`DragList`] is the shared root of one reorderable list. It owns the drag
//! session, the scroll geometry, the edge-scroll loop and the evasion
//! broadcaster. Every row gets a [`DragItem`] controller that turns gesture
//! input into drag events, tracks its own animated offset, and moves out of
//! the way while another row is dragged across it.
//!
//! The host drives everything through a [`FrameClock`] (one `tick` per display
//! frame) and reports gestures and scroll-surface events. Nothing here is
//! thread-safe: one list lives on one UI thread.

#![warn(
    trivial_casts,
    trivial_numeric_casts,
    missing_debug_implementations,
    missing_docs,
    unsafe_code,
    unused_import_braces,
    unused_qualifications,
    clippy::dbg_macro,
    clippy::indexing_slicing
)]

mod animation;
mod broadcast;
mod config;
mod frame;
mod item;
mod list;
mod scroll;
mod slot;

pub use crate::animation::{AnimatedOffset, Offset, ValueSubscription};
pub use crate::broadcast::{EvasionBroadcast, IndexChange, ListenerId, Subscription};
pub use crate::config::DragConfig;
pub use crate::frame::{FrameClock, FrameControl, FrameLoop};
pub use crate::item::{DragCallbacks, DragItem, GestureState};
pub use crate::list::{DragList, DragPhase, DragSession};
pub use crate::scroll::{EdgeScroller, NoopSurface, ScrollGeometry, ScrollSurface};
pub use crate::slot::{Evasion, evasion_for, resolve_slot};
