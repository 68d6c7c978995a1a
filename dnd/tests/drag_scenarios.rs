// SPDX-FileCopyrightText: 2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use habitual_dnd::{
    DragCallbacks, DragConfig, DragItem, DragList, DragPhase, FrameClock, GestureState, NoopSurface,
    Offset,
};

const FRAME: Duration = Duration::from_millis(16);

struct Harness {
    clock: FrameClock,
    list: DragList,
    items: Vec<DragItem>,
    drops: Rc<RefCell<Vec<(usize, usize)>>>,
}

impl Harness {
    fn new(count: usize) -> Self {
        let clock = FrameClock::new();
        let config = DragConfig::default()
            .with_item_gap(0.0)
            .with_durations(Duration::from_millis(80), Duration::from_millis(80));
        let list = DragList::new(config, &clock, NoopSurface);
        list.set_item_count(count);
        list.on_layout(500.0);
        list.on_content_size_change(10.0 * count as f32);

        let drops = Rc::new(RefCell::new(Vec::new()));
        let items = (0..count)
            .map(|i| {
                let drops = drops.clone();
                let callbacks =
                    DragCallbacks::new().on_drag_finished(move |s, e| drops.borrow_mut().push((s, e)));
                let item = list.item(i, callbacks);
                item.on_layout(10.0);
                item
            })
            .collect();

        Self {
            clock,
            list,
            items,
            drops,
        }
    }

    fn item(&self, index: usize) -> &DragItem {
        self.items.get(index).expect("Failed to get item")
    }

    fn settle(&self) {
        for _ in 0..30 {
            self.clock.tick(FRAME);
        }
    }

    fn drag(&self, index: usize, dy: f32) {
        let item = self.item(index);
        assert!(item.start_drag());
        item.on_grant();
        item.on_move(GestureState {
            dx: 0.0,
            dy,
            y0: 250.0,
        });
        self.clock.tick(FRAME);
    }
}

#[test]
fn drop_reports_start_and_end_after_snap() {
    // Arrange
    let h = Harness::new(3);

    // Act
    h.drag(0, 20.0);
    h.item(0).on_release();
    assert!(h.drops.borrow().is_empty());
    h.settle();

    // Assert
    assert_eq!(*h.drops.borrow(), vec![(0, 2)]);
    assert_eq!(h.item(0).offset(), Offset::vertical(20.0));
    assert_eq!(h.item(1).offset(), Offset::vertical(-10.0));
    assert_eq!(h.item(2).offset(), Offset::vertical(-10.0));
    assert_eq!(h.list.phase(), DragPhase::Idle);
}

#[test]
fn evasion_round_trip_returns_every_row_home() {
    // Arrange
    let h = Harness::new(5);
    assert!(h.item(0).start_drag());
    h.item(0).on_grant();

    // Act
    for index in [1, 2, 3, 4, 3, 2, 1, 0] {
        h.list.update_current_index(index);
        h.clock.tick(FRAME);
    }
    h.settle();

    // Assert
    for index in 1..5 {
        assert_eq!(h.item(index).offset(), Offset::ZERO, "row {index}");
    }
}

#[test]
fn evasion_moves_rows_between_start_and_current() {
    // Arrange
    let h = Harness::new(5);
    assert!(h.item(4).start_drag());
    h.item(4).on_grant();

    // Act
    h.list.update_current_index(1);
    h.settle();

    // Assert
    assert_eq!(h.item(0).offset(), Offset::ZERO);
    for index in 1..4 {
        assert_eq!(h.item(index).offset(), Offset::vertical(10.0), "row {index}");
    }
}

#[test]
fn only_one_session_at_a_time() {
    // Arrange
    let h = Harness::new(4);
    assert!(h.item(1).start_drag());

    // Act
    let second = h.item(3).start_drag();
    h.item(3).on_grant();

    // Assert
    assert!(!second);
    let session = h.list.session().expect("Failed to get session");
    assert_eq!(session.start_index, 1);
    assert!(!h.item(3).should_claim_touch());
}

#[test]
fn current_index_stays_in_range_during_fast_drags() {
    // Arrange
    let h = Harness::new(3);

    // Act
    h.drag(1, 1_000.0);
    let down = h.list.session().map(|s| s.current_index);
    h.item(1).on_move(GestureState {
        dx: 0.0,
        dy: -1_000.0,
        y0: 250.0,
    });
    h.clock.tick(FRAME);
    let up = h.list.session().map(|s| s.current_index);

    // Assert
    assert_eq!(down, Some(2));
    assert_eq!(up, Some(0));
}

#[test]
fn edge_velocity_ramps_with_proximity() {
    // Arrange
    let clock = FrameClock::new();
    let config = DragConfig::default().with_max_speed(20.0);
    let list = DragList::new(config, &clock, NoopSurface);
    list.on_layout(1_000.0);

    // Act & Assert
    list.update_edge_diving_velocity(Some(75.0));
    assert_eq!(list.velocity(), -10.0);
    list.update_edge_diving_velocity(Some(150.0));
    assert_eq!(list.velocity(), 0.0);
    list.update_edge_diving_velocity(Some(0.0));
    assert_eq!(list.velocity(), -20.0);
    list.update_edge_diving_velocity(None);
    assert_eq!(list.velocity(), 0.0);
}

#[test]
fn dragged_row_follows_auto_scroll() {
    // Arrange
    let clock = FrameClock::new();
    let scrolled = Rc::new(RefCell::new(Vec::new()));
    let sink = scrolled.clone();
    let config = DragConfig::default().with_item_gap(0.0);
    let list = DragList::new(config, &clock, move |y: f32| sink.borrow_mut().push(y));
    list.set_item_count(100);
    list.on_layout(500.0);
    list.on_content_size_change(1_000.0);
    let item = list.item(0, DragCallbacks::new());
    item.on_layout(10.0);

    // Act
    assert!(item.start_drag());
    item.on_grant();
    item.on_move(GestureState {
        dx: 0.0,
        dy: 0.0,
        y0: 500.0,
    });
    clock.tick(FRAME);
    clock.tick(FRAME);

    // Assert
    assert_eq!(*scrolled.borrow(), vec![20.0, 40.0]);
    assert_eq!(item.offset(), Offset::vertical(40.0));
    assert_eq!(list.session().map(|s| s.current_index), Some(4));
}

#[test]
fn cancel_leaves_no_trace() {
    // Arrange
    let h = Harness::new(3);
    h.drag(0, 15.0);

    // Act
    assert!(h.item(0).cancel_drag());
    h.settle();

    // Assert
    assert!(h.drops.borrow().is_empty());
    assert!(h.list.session().is_none());
    assert!(h.list.scroll_enabled());
    for index in 0..3 {
        assert_eq!(h.item(index).offset(), Offset::ZERO, "row {index}");
    }
}

#[test]
fn reindexed_rows_evade_for_their_new_slot() {
    // Arrange
    let h = Harness::new(3);
    h.drag(0, 20.0);
    h.item(0).on_release();
    h.settle();

    // Act: the owner persisted (0, 2) and re-laid the rows out as [B, C, A]
    h.item(1).set_index(0);
    h.item(2).set_index(1);
    h.item(0).set_index(2);
    h.drag(0, -21.0);

    // Assert
    assert_eq!(h.list.session().map(|s| s.current_index), Some(0));
    assert_eq!(h.item(1).offset(), Offset::ZERO);
    h.settle();
    assert_eq!(h.item(1).offset(), Offset::vertical(10.0));
    assert_eq!(h.item(2).offset(), Offset::vertical(10.0));
    assert_eq!(h.list.broadcast().len(), 3);
}

#[test]
fn teardown_cancels_edge_loop_once() {
    // Arrange
    let h = Harness::new(2);
    let before = h.clock.active_loops();

    // Act
    h.list.teardown();
    h.list.teardown();

    // Assert
    assert_eq!(h.clock.active_loops(), before - 1);
    assert!(!h.list.is_active());
}
