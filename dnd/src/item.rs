// SPDX-FileCopyrightText: 2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use crate::animation::{AnimatedOffset, Offset, ValueSubscription};
use crate::broadcast::Subscription;
use crate::frame::{FrameControl, FrameLoop};
use crate::list::{DragList, DragPhase, ListInner};
use crate::slot::{evasion_for, resolve_slot};

type StartedFn = Rc<dyn Fn(usize)>;
type MovedFn = Rc<dyn Fn(usize, usize)>;

/// Hooks a row owner attaches to its controller.
#[derive(Clone, Default)]
pub struct DragCallbacks {
    on_drag_started: Option<StartedFn>,
    on_drag_finishing: Option<MovedFn>,
    on_drag_finished: Option<MovedFn>,
}

impl DragCallbacks {
    /// No hooks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Called with the start index once the touch is granted.
    pub fn on_drag_started(mut self, f: impl Fn(usize) + 'static) -> Self {
        self.on_drag_started = Some(Rc::new(f));
        self
    }

    /// Called with `(start, end)` on release, before the snap animation.
    pub fn on_drag_finishing(mut self, f: impl Fn(usize, usize) + 'static) -> Self {
        self.on_drag_finishing = Some(Rc::new(f));
        self
    }

    /// Called with `(start, end)` once the row has snapped into its slot. This
    /// is where the new order gets persisted.
    pub fn on_drag_finished(mut self, f: impl Fn(usize, usize) + 'static) -> Self {
        self.on_drag_finished = Some(Rc::new(f));
        self
    }
}

impl fmt::Debug for DragCallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DragCallbacks")
            .field("on_drag_started", &self.on_drag_started.is_some())
            .field("on_drag_finishing", &self.on_drag_finishing.is_some())
            .field("on_drag_finished", &self.on_drag_finished.is_some())
            .finish()
    }
}

/// Touch displacement reported by the host's gesture recognizer.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GestureState {
    /// Horizontal displacement since the grant.
    pub dx: f32,

    /// Vertical displacement since the grant.
    pub dy: f32,

    /// Vertical touch position at the grant, in edge-detection coordinates.
    pub y0: f32,
}

pub(crate) struct ItemInner {
    id: u64,
    list: Weak<ListInner>,
    index: Cell<usize>,
    extent: Cell<Option<f32>>,
    tracking_touch: Cell<bool>,
    selected: Cell<bool>,
    touch_delta: Cell<Offset>,
    offset: AnimatedOffset,
    tracker: RefCell<Option<FrameLoop>>,
    evasion: RefCell<Option<Subscription>>,
    offset_listener: RefCell<Option<ValueSubscription>>,
    callbacks: DragCallbacks,
}

impl ItemInner {
    fn untrack(&self) {
        self.tracking_touch.set(false);
        self.selected.set(false);
        let tracker = self.tracker.borrow_mut().take();
        drop(tracker);
    }

    /// Called by the list when it ends the session this row armed.
    pub(crate) fn disarm(&self, list: &DragList, return_home: bool) {
        self.untrack();
        if return_home {
            self.offset
                .animate_to(Offset::ZERO, list.config().dropping_duration, None);
        }
    }
}

impl Drop for ItemInner {
    fn drop(&mut self) {
        // a row removed mid-drag must not leave the list locked
        if !self.tracking_touch.get() {
            return;
        }
        if let Some(list) = DragList::upgrade(&self.list) {
            if list.owner_id() == Some(self.id) {
                list.update_edge_diving_velocity(None);
                list.cancel_drag();
            }
        }
    }
}

/// Controller of one row: gesture handling, live offset and evasion.
pub struct DragItem {
    inner: Rc<ItemInner>,
}

impl DragItem {
    pub(crate) fn new(list: &DragList, id: u64, index: usize, callbacks: DragCallbacks) -> Self {
        let item = Self {
            inner: Rc::new(ItemInner {
                id,
                list: list.downgrade(),
                index: Cell::new(index),
                extent: Cell::new(None),
                tracking_touch: Cell::new(false),
                selected: Cell::new(false),
                touch_delta: Cell::new(Offset::ZERO),
                offset: AnimatedOffset::new(list.clock(), Offset::ZERO),
                tracker: RefCell::default(),
                evasion: RefCell::default(),
                offset_listener: RefCell::default(),
                callbacks,
            }),
        };
        item.subscribe();
        item
    }

    /// Slot index of the row.
    pub fn index(&self) -> usize {
        self.inner.index.get()
    }

    /// Current visual offset from the resting slot.
    pub fn offset(&self) -> Offset {
        self.inner.offset.value()
    }

    /// Whether the row is being animated.
    pub fn is_animating(&self) -> bool {
        self.inner.offset.is_animating()
    }

    /// Whether the row should render with its "selected" style.
    pub fn is_selected(&self) -> bool {
        self.inner.selected.get()
    }

    /// Measured extent including the row gap, once laid out.
    pub fn extent(&self) -> Option<f32> {
        self.inner.extent.get()
    }

    /// Arms the row for dragging, typically from its long-press handler.
    ///
    /// Returns `false` when another drag owns the list.
    pub fn start_drag(&self) -> bool {
        if self.inner.tracking_touch.get() {
            return false;
        }
        let list = self.list();
        if !list.start_drag(self.index(), self.extent()) {
            return false;
        }

        list.claim(self.inner.id, Rc::downgrade(&self.inner));
        self.inner.tracking_touch.set(true);
        self.inner.selected.set(true);
        true
    }

    /// Whether the row's gesture recognizer should claim the touch.
    pub fn should_claim_touch(&self) -> bool {
        self.inner.tracking_touch.get()
    }

    /// The recognizer was granted the touch.
    pub fn on_grant(&self) {
        if !self.inner.tracking_touch.get() {
            return;
        }

        let list = self.list();
        list.capture_touch_origin();
        self.inner.touch_delta.set(Offset::ZERO);

        if self.inner.tracker.borrow().is_none() {
            let weak = Rc::downgrade(&self.inner);
            let tracker = list.clock().start_loop(move |_| track_touch(&weak));
            *self.inner.tracker.borrow_mut() = Some(tracker);
        }

        if let Some(f) = self.inner.callbacks.on_drag_started.clone() {
            f(self.index());
        }
    }

    /// The touch moved.
    pub fn on_move(&self, gesture: GestureState) {
        if !self.inner.tracking_touch.get() {
            return;
        }

        self.list()
            .update_edge_diving_velocity(Some(gesture.dy + gesture.y0));
        self.inner
            .touch_delta
            .set(Offset::new(gesture.dx, gesture.dy));
    }

    /// The touch was released: snap into the current slot, then report the
    /// move through `on_drag_finished`.
    pub fn on_release(&self) {
        if !self.inner.tracking_touch.get() {
            return;
        }

        let list = self.list();
        self.inner.untrack();
        list.update_edge_diving_velocity(None);
        let Some(session) = list.end_drag() else {
            return;
        };

        let (start, end) = (session.start_index, session.current_index);
        if let Some(f) = self.inner.callbacks.on_drag_finishing.clone() {
            f(start, end);
        }

        let target = Offset::vertical(session.snap_offset().unwrap_or(0.0));
        let finished = self.inner.callbacks.on_drag_finished.clone();
        let weak = list.downgrade();
        self.inner.offset.animate_to(
            target,
            list.config().dropping_duration,
            Some(Box::new(move || {
                if let Some(f) = finished {
                    f(start, end);
                }
                if let Some(list) = DragList::upgrade(&weak) {
                    list.finish_drop();
                }
            })),
        );
    }

    /// Aborts a drag armed by [`DragItem::start_drag`], for when another
    /// recognizer wins the touch. Nothing is reported to the owner.
    pub fn cancel_drag(&self) -> bool {
        if !self.inner.tracking_touch.get() {
            return false;
        }

        let list = self.list();
        self.inner.untrack();
        list.update_edge_diving_velocity(None);
        list.cancel_drag()
    }

    /// The row was laid out with `extent`; the list's row gap is added.
    pub fn on_layout(&self, extent: f32) {
        let list = self.list();
        let extent = extent + list.config().item_gap;
        self.inner.extent.set(Some(extent));

        if self.inner.tracking_touch.get() && list.owner_id() == Some(self.inner.id) {
            list.set_dragged_item_extent(extent);
        }
    }

    /// The row moved to another slot, after a reorder or a filter.
    pub fn set_index(&self, index: usize) {
        if index == self.index() {
            return;
        }

        self.inner.index.set(index);
        self.inner.touch_delta.set(Offset::ZERO);
        self.inner.offset.set_value(Offset::ZERO);
        self.subscribe();
    }

    fn list(&self) -> DragList {
        DragList::upgrade(&self.inner.list)
            .expect("drag item used outside of its list context")
    }

    /// Replaces both listeners with ones bound to the current index.
    fn subscribe(&self) {
        let stale = (
            self.inner.evasion.borrow_mut().take(),
            self.inner.offset_listener.borrow_mut().take(),
        );
        drop(stale);

        let list = self.list();
        let index = self.index();

        let weak = Rc::downgrade(&self.inner);
        let evasion = list.broadcast().subscribe(move |change| {
            let Some(item) = weak.upgrade() else {
                return;
            };
            let Some(evasion) = evasion_for(index, change.start, change.previous, change.current)
            else {
                return;
            };
            let Some(list) = DragList::upgrade(&item.list) else {
                return;
            };
            let Some(extent) = list.session().and_then(|s| s.dragged_item_extent) else {
                return;
            };

            item.offset.animate_to(
                Offset::vertical(evasion.target(extent)),
                list.config().evasion_duration,
                None,
            );
        });

        let weak = Rc::downgrade(&self.inner);
        let offset_listener = self.inner.offset.add_listener(move |value| {
            let Some(item) = weak.upgrade() else {
                return;
            };
            if !item.tracking_touch.get() {
                return;
            }
            let Some(list) = DragList::upgrade(&item.list) else {
                return;
            };
            let Some(session) = list.session() else {
                return;
            };
            if session.start_index != index || session.phase != DragPhase::Dragging {
                return;
            }

            let extent = item.extent.get().or(session.dragged_item_extent);
            let Some(extent) = extent else {
                return;
            };
            if let Some(slot) = resolve_slot(index, value.y, extent, session.item_count) {
                list.update_current_index(slot as isize);
            }
        });

        *self.inner.evasion.borrow_mut() = Some(evasion);
        *self.inner.offset_listener.borrow_mut() = Some(offset_listener);
    }
}

impl fmt::Debug for DragItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DragItem")
            .field("id", &self.inner.id)
            .field("index", &self.index())
            .field("extent", &self.extent())
            .field("offset", &self.offset())
            .field("tracking_touch", &self.inner.tracking_touch.get())
            .field("selected", &self.is_selected())
            .finish()
    }
}

/// One frame of the dragged row following the touch while the list scrolls
/// underneath it.
fn track_touch(weak: &Weak<ItemInner>) -> FrameControl {
    let Some(item) = weak.upgrade() else {
        return FrameControl::Stop;
    };
    let Some(list) = DragList::upgrade(&item.list) else {
        return FrameControl::Stop;
    };
    let Some(session) = list.session() else {
        return FrameControl::Stop;
    };

    let scrolled = list.scroll_offset() - session.touch_origin_scroll_offset;
    item.offset
        .set_value(item.touch_delta.get() + Offset::vertical(scrolled));
    FrameControl::Continue
}
