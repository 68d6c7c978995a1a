// SPDX-FileCopyrightText: 2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use crate::broadcast::{EvasionBroadcast, IndexChange};
use crate::config::DragConfig;
use crate::frame::{FrameClock, FrameControl, FrameLoop};
use crate::item::{DragCallbacks, DragItem, ItemInner};
use crate::scroll::{EdgeScroller, ScrollGeometry, ScrollSurface};

/// Where the list is in its drag lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragPhase {
    /// No drag in progress.
    Idle,

    /// A row follows the touch.
    Dragging,

    /// The touch was released and the row is snapping into its slot.
    Releasing,
}

/// The one drag in progress on a list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    /// Slot the dragged row started from.
    pub start_index: usize,

    /// Slot the dragged row occupied before the last change.
    pub previous_index: usize,

    /// Slot the dragged row occupies now.
    pub current_index: usize,

    /// Number of slots when the drag started.
    pub item_count: usize,

    /// Scroll offset at the moment the touch was granted.
    pub touch_origin_scroll_offset: f32,

    /// Extent of the dragged row, once measured.
    pub dragged_item_extent: Option<f32>,

    /// Lifecycle phase.
    pub phase: DragPhase,
}

impl DragSession {
    /// Vertical offset that puts the dragged row exactly into its current
    /// slot, if its extent is known.
    pub fn snap_offset(&self) -> Option<f32> {
        let slots = self.current_index as f32 - self.start_index as f32;
        self.dragged_item_extent.map(|extent| extent * slots)
    }
}

/// The row controller that armed the current session.
struct Owner {
    id: u64,
    item: Weak<ItemInner>,
}

pub(crate) struct ListInner {
    config: DragConfig,
    clock: FrameClock,
    scroller: EdgeScroller,
    geometry: Cell<ScrollGeometry>,
    velocity: Cell<f32>,
    scroll_enabled: Cell<bool>,
    surface: RefCell<Box<dyn ScrollSurface>>,
    item_count: Cell<usize>,
    session: Cell<Option<DragSession>>,
    owner: RefCell<Option<Owner>>,
    next_item_id: Cell<u64>,
    broadcast: EvasionBroadcast,
    edge_loop: RefCell<Option<FrameLoop>>,
}

/// Shared root of one reorderable list.
///
/// Owns the drag session, the scroll geometry, the edge-scroll loop and the
/// evasion broadcaster. Rows get their controllers from [`DragList::item`];
/// the controllers only hold a weak reference back, so the list must outlive
/// them. Cloning yields another handle to the same list.
#[derive(Clone)]
pub struct DragList {
    inner: Rc<ListInner>,
}

impl DragList {
    /// Creates a list and starts its edge-scroll loop on `clock`.
    pub fn new(
        config: DragConfig,
        clock: &FrameClock,
        surface: impl ScrollSurface + 'static,
    ) -> Self {
        let inner = Rc::new(ListInner {
            config,
            clock: clock.clone(),
            scroller: EdgeScroller {
                upper_threshold: config.upper_threshold,
                lower_threshold: config.lower_threshold,
                max_speed: config.max_speed,
            },
            geometry: Cell::default(),
            velocity: Cell::new(0.0),
            scroll_enabled: Cell::new(true),
            surface: RefCell::new(Box::new(surface)),
            item_count: Cell::new(0),
            session: Cell::new(None),
            owner: RefCell::default(),
            next_item_id: Cell::new(0),
            broadcast: EvasionBroadcast::new(),
            edge_loop: RefCell::default(),
        });

        let weak = Rc::downgrade(&inner);
        let edge_loop = clock.start_loop(move |_| match weak.upgrade() {
            Some(inner) => {
                step_edge_scroll(&inner);
                FrameControl::Continue
            }
            None => FrameControl::Stop,
        });
        *inner.edge_loop.borrow_mut() = Some(edge_loop);

        Self { inner }
    }

    pub(crate) fn upgrade(weak: &Weak<ListInner>) -> Option<DragList> {
        weak.upgrade().map(|inner| DragList { inner })
    }

    pub(crate) fn downgrade(&self) -> Weak<ListInner> {
        Rc::downgrade(&self.inner)
    }

    /// Creates the controller of the row at `index`.
    pub fn item(&self, index: usize, callbacks: DragCallbacks) -> DragItem {
        let id = self.inner.next_item_id.get();
        self.inner.next_item_id.set(id + 1);
        DragItem::new(self, id, index, callbacks)
    }

    /// Records the row controller that armed the current session.
    pub(crate) fn claim(&self, id: u64, item: Weak<ItemInner>) {
        *self.inner.owner.borrow_mut() = Some(Owner { id, item });
    }

    /// Id of the row controller owning the current session, if any.
    pub(crate) fn owner_id(&self) -> Option<u64> {
        self.inner.owner.borrow().as_ref().map(|o| o.id)
    }

    /// Stops the owning row from tracking the touch.
    fn disarm_owner(&self, return_home: bool) {
        let owner = self.inner.owner.borrow_mut().take();
        if let Some(item) = owner.and_then(|o| o.item.upgrade()) {
            item.disarm(self, return_home);
        }
    }

    /// List tuning.
    pub fn config(&self) -> &DragConfig {
        &self.inner.config
    }

    /// Clock driving the list's loops and animations.
    pub fn clock(&self) -> &FrameClock {
        &self.inner.clock
    }

    /// Broadcaster of the dragged row's slot changes.
    pub fn broadcast(&self) -> &EvasionBroadcast {
        &self.inner.broadcast
    }

    /// The drag in progress, if any.
    pub fn session(&self) -> Option<DragSession> {
        self.inner.session.get()
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> DragPhase {
        self.session().map_or(DragPhase::Idle, |s| s.phase)
    }

    /// Begins a drag of the row at `index`.
    ///
    /// Returns `false`, leaving any existing session untouched, when a drag is
    /// already in progress or `index` is not a slot of the list.
    pub fn start_drag(&self, index: usize, dragged_item_extent: Option<f32>) -> bool {
        if let Some(session) = self.session() {
            tracing::debug!(
                index,
                active = session.start_index,
                "drag rejected, another drag is in progress"
            );
            return false;
        }

        let item_count = self.item_count();
        if index >= item_count {
            tracing::debug!(index, item_count, "drag rejected, index out of range");
            return false;
        }

        self.inner.scroll_enabled.set(false);
        self.inner.owner.borrow_mut().take();
        self.inner.session.set(Some(DragSession {
            start_index: index,
            previous_index: index,
            current_index: index,
            item_count,
            touch_origin_scroll_offset: self.scroll_offset(),
            dragged_item_extent: dragged_item_extent.filter(|e| *e > 0.0),
            phase: DragPhase::Dragging,
        }));
        tracing::debug!(index, "drag started");
        true
    }

    /// Re-captures the scroll offset the dragged row's displacement is
    /// measured from.
    pub fn capture_touch_origin(&self) {
        let offset = self.scroll_offset();
        self.modify_session(|s| s.touch_origin_scroll_offset = offset);
    }

    /// Records the measured extent of the dragged row.
    pub fn set_dragged_item_extent(&self, extent: f32) {
        if extent > 0.0 {
            self.modify_session(|s| s.dragged_item_extent = Some(extent));
        }
    }

    /// Moves the dragged row to `index`, clamped to the list.
    ///
    /// Listeners are notified only when the slot actually changes.
    pub fn update_current_index(&self, index: isize) -> Option<IndexChange> {
        let mut session = self.session().filter(|s| s.phase == DragPhase::Dragging)?;
        let last = session.item_count.saturating_sub(1);
        let clamped = usize::try_from(index).unwrap_or(0).min(last);
        if clamped == session.current_index {
            return None;
        }

        session.previous_index = session.current_index;
        session.current_index = clamped;
        self.inner.session.set(Some(session));

        let change = IndexChange {
            start: session.start_index,
            previous: session.previous_index,
            current: session.current_index,
        };
        self.inner.broadcast.notify(change);
        Some(change)
    }

    /// Aborts the drag before release; nothing is reported to the owner.
    ///
    /// Rows that moved aside are told the dragged row went back to its start,
    /// and the dragged row stops tracking the touch and animates home.
    pub fn cancel_drag(&self) -> bool {
        let Some(session) = self.session().filter(|s| s.phase == DragPhase::Dragging) else {
            return false;
        };

        self.update_current_index(session.start_index as isize);
        self.inner.session.set(None);
        self.inner.scroll_enabled.set(true);
        self.inner.velocity.set(0.0);
        self.disarm_owner(true);
        tracing::debug!(index = session.start_index, "drag cancelled");
        true
    }

    /// Releases the dragged row. The session stays alive until
    /// [`DragList::finish_drop`]; the dragged row stops tracking the touch.
    pub fn end_drag(&self) -> Option<DragSession> {
        let mut session = self.session().filter(|s| s.phase == DragPhase::Dragging)?;
        session.phase = DragPhase::Releasing;
        self.inner.session.set(Some(session));
        self.inner.scroll_enabled.set(true);
        self.inner.velocity.set(0.0);
        self.disarm_owner(false);
        tracing::debug!(
            start = session.start_index,
            end = session.current_index,
            "drag released"
        );
        Some(session)
    }

    /// Ends the session once the released row has snapped into its slot.
    pub fn finish_drop(&self) -> Option<DragSession> {
        let session = self.session().filter(|s| s.phase == DragPhase::Releasing)?;
        self.inner.session.set(None);
        tracing::debug!(
            start = session.start_index,
            end = session.current_index,
            "drop finished"
        );
        Some(session)
    }

    /// Updates the edge-scroll velocity from the touch position; `None` stops
    /// edge scrolling.
    pub fn update_edge_diving_velocity(&self, touch_y: Option<f32>) {
        let extent = self
            .inner
            .config
            .screen_extent
            .unwrap_or_else(|| self.geometry().viewport_extent);
        let velocity = self.inner.scroller.velocity(touch_y, extent);
        self.inner.velocity.set(velocity);
    }

    /// Current edge-scroll velocity, per frame.
    pub fn velocity(&self) -> f32 {
        self.inner.velocity.get()
    }

    /// Whether the host's own scrolling is enabled, i.e. no row is dragged.
    pub fn scroll_enabled(&self) -> bool {
        self.inner.scroll_enabled.get()
    }

    /// Reports a scroll of the surface. Ignored while a drag owns the offset.
    pub fn on_scroll(&self, offset: f32) {
        if self.scroll_enabled() {
            self.modify_geometry(|g| g.current_offset = offset);
        }
    }

    /// Reports the visible extent of the surface.
    pub fn on_layout(&self, viewport_extent: f32) {
        self.modify_geometry(|g| g.set_viewport_extent(viewport_extent));
    }

    /// Reports the total extent of the content.
    pub fn on_content_size_change(&self, content_extent: f32) {
        self.modify_geometry(|g| g.set_content_extent(content_extent));
    }

    /// Current scroll metrics.
    pub fn geometry(&self) -> ScrollGeometry {
        self.inner.geometry.get()
    }

    /// Current scroll offset.
    pub fn scroll_offset(&self) -> f32 {
        self.geometry().current_offset
    }

    /// Sets the number of rows.
    pub fn set_item_count(&self, count: usize) {
        self.inner.item_count.set(count);
    }

    /// Number of rows.
    pub fn item_count(&self) -> usize {
        self.inner.item_count.get()
    }

    /// Stops the edge-scroll loop. Further calls do nothing.
    pub fn teardown(&self) {
        let edge_loop = self.inner.edge_loop.borrow_mut().take();
        if let Some(edge_loop) = edge_loop {
            edge_loop.cancel();
            tracing::debug!("drag list torn down");
        }
    }

    /// Whether the edge-scroll loop is running.
    pub fn is_active(&self) -> bool {
        self.inner.edge_loop.borrow().is_some()
    }

    fn modify_session(&self, f: impl FnOnce(&mut DragSession)) {
        if let Some(mut session) = self.session() {
            f(&mut session);
            self.inner.session.set(Some(session));
        }
    }

    fn modify_geometry(&self, f: impl FnOnce(&mut ScrollGeometry)) {
        let mut geometry = self.geometry();
        f(&mut geometry);
        self.inner.geometry.set(geometry);
    }
}

impl fmt::Debug for DragList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DragList")
            .field("config", &self.inner.config)
            .field("geometry", &self.geometry())
            .field("velocity", &self.velocity())
            .field("item_count", &self.item_count())
            .field("session", &self.session())
            .field("broadcast", &self.inner.broadcast)
            .finish()
    }
}

fn step_edge_scroll(inner: &ListInner) {
    let velocity = inner.velocity.get();
    if velocity == 0.0 {
        return;
    }

    let mut geometry = inner.geometry.get();
    let offset = geometry.clamp(geometry.current_offset + velocity);
    geometry.current_offset = offset;
    inner.geometry.set(geometry);

    match inner.surface.try_borrow_mut() {
        Ok(mut surface) => surface.scroll_to(offset),
        Err(_) => tracing::warn!(offset, "scroll surface busy, skipped scroll"),
    }
}
