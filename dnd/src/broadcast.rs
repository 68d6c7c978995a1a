// SPDX-FileCopyrightText: 2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

/// A change of the dragged item's slot, as seen by the rest of the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexChange {
    /// Slot the dragged item started from.
    pub start: usize,

    /// Slot it occupied before this change.
    pub previous: usize,

    /// Slot it occupies now.
    pub current: usize,
}

/// Identifier of a registered evasion listener, unique for the lifetime of
/// the broadcaster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

type Callback = Rc<dyn Fn(IndexChange)>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    listeners: Vec<(ListenerId, Callback)>,
}

/// Synchronous pub/sub that tells every row when the dragged item moves.
#[derive(Clone, Default)]
pub struct EvasionBroadcast {
    registry: Rc<RefCell<Registry>>,
}

impl EvasionBroadcast {
    /// Creates an empty broadcaster.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `f`, returning its id. Prefer [`EvasionBroadcast::subscribe`].
    pub fn add_listener(&self, f: impl Fn(IndexChange) + 'static) -> ListenerId {
        let mut registry = self.registry.borrow_mut();
        let id = ListenerId(registry.next_id);
        registry.next_id += 1;
        registry.listeners.push((id, Rc::new(f)));
        id
    }

    /// Removes a listener. Returns whether it was registered; removing twice
    /// is harmless.
    pub fn remove_listener(&self, id: ListenerId) -> bool {
        remove(&self.registry, id)
    }

    /// Registers `f` for as long as the returned guard lives.
    #[must_use = "dropping the subscription removes the listener"]
    pub fn subscribe(&self, f: impl Fn(IndexChange) + 'static) -> Subscription {
        let id = self.add_listener(f);
        Subscription {
            registry: Rc::downgrade(&self.registry),
            id,
        }
    }

    /// Invokes every listener registered at the time of the call.
    pub fn notify(&self, change: IndexChange) {
        let listeners: Vec<Callback> = self
            .registry
            .borrow()
            .listeners
            .iter()
            .map(|(_, f)| f.clone())
            .collect();

        tracing::trace!(
            start = change.start,
            previous = change.previous,
            current = change.current,
            listeners = listeners.len(),
            "evasion broadcast"
        );
        for f in listeners {
            f(change);
        }
    }

    /// Number of registered listeners.
    pub fn len(&self) -> usize {
        self.registry.borrow().listeners.len()
    }

    /// Whether nobody is listening.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for EvasionBroadcast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EvasionBroadcast")
            .field("listeners", &self.len())
            .finish()
    }
}

/// Disposer returned by [`EvasionBroadcast::subscribe`].
#[derive(Debug)]
pub struct Subscription {
    registry: Weak<RefCell<Registry>>,
    id: ListenerId,
}

impl Subscription {
    /// Id of the underlying listener.
    pub fn id(&self) -> ListenerId {
        self.id
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            remove(&registry, self.id);
        }
    }
}

fn remove(registry: &RefCell<Registry>, id: ListenerId) -> bool {
    let removed = {
        let mut registry = registry.borrow_mut();
        let index = registry.listeners.iter().position(|(a, _)| *a == id);
        index.map(|i| registry.listeners.remove(i))
    };
    removed.is_some()
}
