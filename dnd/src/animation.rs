// SPDX-FileCopyrightText: 2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};
use std::time::Duration;

use crate::frame::{FrameClock, FrameControl, FrameLoop};

/// A 2D displacement in list units.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Offset {
    /// Horizontal component.
    pub x: f32,

    /// Vertical component.
    pub y: f32,
}

impl Offset {
    /// No displacement.
    pub const ZERO: Offset = Offset { x: 0.0, y: 0.0 };

    /// Creates an offset.
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// A purely vertical offset.
    pub const fn vertical(y: f32) -> Self {
        Self { x: 0.0, y }
    }

    /// Linear interpolation, `t` in `[0, 1]`.
    pub fn lerp(self, to: Offset, t: f32) -> Offset {
        Offset {
            x: self.x + (to.x - self.x) * t,
            y: self.y + (to.y - self.y) * t,
        }
    }
}

impl std::ops::Add for Offset {
    type Output = Offset;

    fn add(self, rhs: Offset) -> Offset {
        Offset::new(self.x + rhs.x, self.y + rhs.y)
    }
}

type Listener = Rc<dyn Fn(Offset)>;

struct AnimatedInner {
    value: Cell<Offset>,
    listeners: RefCell<Vec<(u64, Listener)>>,
    next_listener: Cell<u64>,
    generation: Cell<u64>,
    running: RefCell<Option<FrameLoop>>,
}

/// An animatable offset with an interruptible target and change listeners.
///
/// Starting a new animation supersedes the running one: the new animation
/// starts from whatever value is current at that moment, and the superseded
/// animation's completion callback is never invoked.
#[derive(Clone)]
pub struct AnimatedOffset {
    inner: Rc<AnimatedInner>,
    clock: FrameClock,
}

impl AnimatedOffset {
    /// Creates a value at `initial`, animated by `clock`.
    pub fn new(clock: &FrameClock, initial: Offset) -> Self {
        Self {
            inner: Rc::new(AnimatedInner {
                value: Cell::new(initial),
                listeners: RefCell::default(),
                next_listener: Cell::new(0),
                generation: Cell::new(0),
                running: RefCell::default(),
            }),
            clock: clock.clone(),
        }
    }

    /// Current value.
    pub fn value(&self) -> Offset {
        self.inner.value.get()
    }

    /// Stops any running animation and jumps to `value`.
    pub fn set_value(&self, value: Offset) {
        self.stop();
        write(&self.inner, value);
    }

    /// Stops the running animation, if any, leaving the value where it is.
    pub fn stop(&self) {
        self.inner.generation.set(self.inner.generation.get() + 1);
        let running = self.inner.running.borrow_mut().take();
        drop(running);
    }

    /// Whether an animation is in flight.
    pub fn is_animating(&self) -> bool {
        self.inner.running.borrow().is_some()
    }

    /// Animates from the current value to `target` over `duration`.
    ///
    /// `on_complete` runs once the target is reached, and never if the
    /// animation is interrupted.
    pub fn animate_to(
        &self,
        target: Offset,
        duration: Duration,
        on_complete: Option<Box<dyn FnOnce()>>,
    ) {
        self.stop();

        let from = self.value();
        let generation = self.inner.generation.get();
        let weak: Weak<AnimatedInner> = Rc::downgrade(&self.inner);
        let mut on_complete = on_complete;
        let mut elapsed = Duration::ZERO;
        let frame_loop = self.clock.start_loop(move |dt| {
            let Some(inner) = weak.upgrade() else {
                return FrameControl::Stop;
            };

            elapsed += dt;
            let t = if duration.is_zero() {
                1.0
            } else {
                (elapsed.as_secs_f32() / duration.as_secs_f32()).min(1.0)
            };
            write(&inner, from.lerp(target, ease(t)));
            if inner.generation.get() != generation {
                // a listener superseded this animation
                return FrameControl::Stop;
            }
            if t < 1.0 {
                return FrameControl::Continue;
            }

            // release the guard before completing, the callback may start a new animation
            let finished = inner.running.borrow_mut().take();
            drop(finished);
            if let Some(f) = on_complete.take() {
                f();
            }
            FrameControl::Stop
        });
        *self.inner.running.borrow_mut() = Some(frame_loop);
    }

    /// Registers `f` to be called with every new value.
    #[must_use = "dropping the subscription removes the listener"]
    pub fn add_listener(&self, f: impl Fn(Offset) + 'static) -> ValueSubscription {
        let id = self.inner.next_listener.get();
        self.inner.next_listener.set(id + 1);
        self.inner.listeners.borrow_mut().push((id, Rc::new(f)));
        ValueSubscription {
            target: Rc::downgrade(&self.inner),
            id,
        }
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.inner.listeners.borrow().len()
    }
}

impl fmt::Debug for AnimatedOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimatedOffset")
            .field("value", &self.value())
            .field("animating", &self.is_animating())
            .field("listeners", &self.listener_count())
            .finish()
    }
}

fn write(inner: &AnimatedInner, value: Offset) {
    if inner.value.replace(value) == value {
        return;
    }

    let listeners: Vec<Listener> = inner
        .listeners
        .borrow()
        .iter()
        .map(|(_, f)| f.clone())
        .collect();
    for f in listeners {
        f(value);
    }
}

/// Smoothstep easing.
fn ease(t: f32) -> f32 {
    t * t * (3.0 - 2.0 * t)
}

/// Guard for a listener registered with [`AnimatedOffset::add_listener`].
#[derive(Debug)]
pub struct ValueSubscription {
    target: Weak<AnimatedInner>,
    id: u64,
}

impl Drop for ValueSubscription {
    fn drop(&mut self) {
        if let Some(inner) = self.target.upgrade() {
            let removed = {
                let mut listeners = inner.listeners.borrow_mut();
                let index = listeners.iter().position(|(id, _)| *id == self.id);
                index.map(|i| listeners.remove(i))
            };
            drop(removed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: Duration = Duration::from_millis(10);

    fn run(clock: &FrameClock, frames: usize) {
        for _ in 0..frames {
            clock.tick(FRAME);
        }
    }

    #[test]
    fn animated_offset_reaches_target_and_completes() {
        let clock = FrameClock::new();
        let value = AnimatedOffset::new(&clock, Offset::ZERO);
        let done = Rc::new(Cell::new(false));
        let flag = done.clone();

        value.animate_to(
            Offset::vertical(100.0),
            Duration::from_millis(50),
            Some(Box::new(move || flag.set(true))),
        );
        run(&clock, 2);
        assert!(value.is_animating());
        assert!(value.value().y > 0.0 && value.value().y < 100.0);

        run(&clock, 3);
        assert_eq!(value.value(), Offset::vertical(100.0));
        assert!(done.get());
        assert!(!value.is_animating());
        assert_eq!(clock.active_loops(), 0);
    }

    #[test]
    fn animated_offset_interrupt_starts_from_current_value() {
        let clock = FrameClock::new();
        let value = AnimatedOffset::new(&clock, Offset::ZERO);
        let first_done = Rc::new(Cell::new(false));
        let flag = first_done.clone();

        value.animate_to(
            Offset::vertical(100.0),
            Duration::from_millis(100),
            Some(Box::new(move || flag.set(true))),
        );
        run(&clock, 5);
        let midway = value.value().y;

        value.animate_to(Offset::ZERO, Duration::from_millis(100), None);
        clock.tick(Duration::ZERO);
        assert_eq!(value.value().y, midway);

        run(&clock, 10);
        assert_eq!(value.value(), Offset::ZERO);
        assert!(!first_done.get());
        assert_eq!(clock.active_loops(), 0);
    }

    #[test]
    fn animated_offset_zero_duration_jumps_on_next_frame() {
        let clock = FrameClock::new();
        let value = AnimatedOffset::new(&clock, Offset::ZERO);

        value.animate_to(Offset::vertical(-8.0), Duration::ZERO, None);
        clock.tick(FRAME);

        assert_eq!(value.value(), Offset::vertical(-8.0));
        assert!(!value.is_animating());
    }

    #[test]
    fn animated_offset_listeners_see_changes_only() {
        let clock = FrameClock::new();
        let value = AnimatedOffset::new(&clock, Offset::ZERO);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let subscription = value.add_listener(move |v| sink.borrow_mut().push(v.y));

        value.set_value(Offset::vertical(3.0));
        value.set_value(Offset::vertical(3.0));
        value.set_value(Offset::vertical(4.0));
        drop(subscription);
        value.set_value(Offset::vertical(5.0));

        assert_eq!(*seen.borrow(), vec![3.0, 4.0]);
        assert_eq!(value.listener_count(), 0);
    }

    #[test]
    fn animated_offset_set_value_stops_animation() {
        let clock = FrameClock::new();
        let value = AnimatedOffset::new(&clock, Offset::ZERO);
        value.animate_to(Offset::vertical(50.0), Duration::from_millis(100), None);

        value.set_value(Offset::vertical(7.0));
        run(&clock, 20);

        assert_eq!(value.value(), Offset::vertical(7.0));
        assert_eq!(clock.active_loops(), 0);
    }

    #[test]
    fn ease_is_monotonic_with_fixed_ends() {
        assert_eq!(ease(0.0), 0.0);
        assert_eq!(ease(1.0), 1.0);
        let samples: Vec<f32> = (0..=10).map(|i| ease(i as f32 / 10.0)).collect();
        assert!(samples.windows(2).all(|w| w[0] <= w[1]));
    }
}
