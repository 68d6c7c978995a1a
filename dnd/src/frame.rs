// SPDX-FileCopyrightText: 2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};
use std::time::Duration;

/// Whether a frame callback wants to run again on the next frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameControl {
    /// Keep the loop scheduled.
    Continue,

    /// Unschedule the loop after this frame.
    Stop,
}

type FrameCallback = Rc<RefCell<dyn FnMut(Duration) -> FrameControl>>;

#[derive(Default)]
struct ClockInner {
    next_id: u64,
    loops: Vec<(u64, FrameCallback)>,
    frames: u64,
    elapsed: Duration,
}

/// Per-frame callback scheduler, driven by the host's display clock.
///
/// Loops started while a frame is running are first invoked on the next frame.
/// Cloning yields another handle to the same clock.
#[derive(Clone, Default)]
pub struct FrameClock {
    inner: Rc<RefCell<ClockInner>>,
}

impl FrameClock {
    /// Creates a clock with no scheduled loops.
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules `callback` to run once per frame until it returns
    /// [`FrameControl::Stop`] or the returned guard is dropped.
    #[must_use = "dropping the guard cancels the loop immediately"]
    pub fn start_loop(
        &self,
        callback: impl FnMut(Duration) -> FrameControl + 'static,
    ) -> FrameLoop {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.loops.push((id, Rc::new(RefCell::new(callback))));
        tracing::trace!(id, "frame loop started");
        FrameLoop {
            clock: Rc::downgrade(&self.inner),
            id,
        }
    }

    /// Runs one frame: every loop that was scheduled before this call and has
    /// not been cancelled in the meantime is invoked once with `dt`.
    pub fn tick(&self, dt: Duration) {
        let snapshot = {
            let mut inner = self.inner.borrow_mut();
            inner.frames += 1;
            inner.elapsed += dt;
            inner.loops.clone()
        };

        for (id, callback) in snapshot {
            // an earlier callback of this frame may have cancelled it
            if !is_scheduled(&self.inner, id) {
                continue;
            }

            let control = match callback.try_borrow_mut() {
                Ok(mut f) => f(dt),
                Err(_) => continue,
            };
            if control == FrameControl::Stop {
                unschedule(&self.inner, id);
            }
        }
    }

    /// Number of loops currently scheduled.
    pub fn active_loops(&self) -> usize {
        self.inner.borrow().loops.len()
    }

    /// Number of frames ticked so far.
    pub fn frames(&self) -> u64 {
        self.inner.borrow().frames
    }

    /// Total time ticked so far.
    pub fn elapsed(&self) -> Duration {
        self.inner.borrow().elapsed
    }
}

impl fmt::Debug for FrameClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("FrameClock")
            .field("loops", &inner.loops.len())
            .field("frames", &inner.frames)
            .field("elapsed", &inner.elapsed)
            .finish()
    }
}

/// Guard for a loop scheduled on a [`FrameClock`].
///
/// The loop is cancelled exactly once: on [`FrameLoop::cancel`] or on drop,
/// whichever comes first.
#[derive(Debug)]
pub struct FrameLoop {
    clock: Weak<RefCell<ClockInner>>,
    id: u64,
}

impl FrameLoop {
    /// Cancels the loop.
    pub fn cancel(self) {
        drop(self);
    }

    /// Whether the loop is still scheduled.
    pub fn is_active(&self) -> bool {
        self.clock
            .upgrade()
            .is_some_and(|inner| is_scheduled(&inner, self.id))
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        if let Some(inner) = self.clock.upgrade() {
            if unschedule(&inner, self.id) {
                tracing::trace!(id = self.id, "frame loop cancelled");
            }
        }
    }
}

fn is_scheduled(inner: &RefCell<ClockInner>, id: u64) -> bool {
    inner.borrow().loops.iter().any(|(a, _)| *a == id)
}

fn unschedule(inner: &RefCell<ClockInner>, id: u64) -> bool {
    // the callback may own guards of its own, so it is dropped outside the borrow
    let removed = {
        let mut inner = inner.borrow_mut();
        let index = inner.loops.iter().position(|(a, _)| *a == id);
        index.map(|i| inner.loops.remove(i))
    };
    removed.is_some()
}
