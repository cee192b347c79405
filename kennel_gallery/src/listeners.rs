// Copyright 2025 the Kennel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Document-level resources held for a scope: key listeners and the scroll lock.
//!
//! Both are acquired from a [`Document`](crate::Document) and released when the
//! returned guard is dropped, so every exit path (an explicit close, an early
//! return, or dropping the owner outright) gives them back.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use kennel_scene::NodeId;
use tracing::trace;

/// A key listener installed on the whole document.
///
/// Document listeners run after the focused element's handlers and before the
/// document's default actions.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum KeyListener {
    /// Report Escape presses on behalf of `owner`.
    Escape {
        /// Region that asked for the notification.
        owner: NodeId,
    },
    /// Keep Tab and Shift+Tab cycling among the tabbable regions of `container`.
    TabCycle {
        /// Region whose tab order is trapped.
        container: NodeId,
    },
}

#[derive(Debug, Default)]
struct Slots {
    next: u64,
    entries: Vec<(u64, KeyListener)>,
}

/// Registry of document key listeners, in registration order.
#[derive(Clone, Debug, Default)]
pub(crate) struct ListenerRegistry {
    slots: Rc<RefCell<Slots>>,
}

impl ListenerRegistry {
    pub(crate) fn register(&self, listener: KeyListener) -> ListenerGuard {
        let mut slots = self.slots.borrow_mut();
        let id = slots.next;
        slots.next += 1;
        slots.entries.push((id, listener));
        trace!(id, ?listener, "key listener registered");
        ListenerGuard {
            slots: Rc::clone(&self.slots),
            id,
        }
    }

    pub(crate) fn snapshot(&self) -> Vec<KeyListener> {
        self.slots.borrow().entries.iter().map(|(_, l)| *l).collect()
    }

    pub(crate) fn len(&self) -> usize {
        self.slots.borrow().entries.len()
    }
}

/// Keeps a [`KeyListener`] registered until dropped.
#[must_use = "the listener is removed as soon as the guard is dropped"]
#[derive(Debug)]
pub struct ListenerGuard {
    slots: Rc<RefCell<Slots>>,
    id: u64,
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        let mut slots = self.slots.borrow_mut();
        slots.entries.retain(|(id, _)| *id != self.id);
        trace!(id = self.id, "key listener released");
    }
}

/// Suppresses page scrolling until dropped.
///
/// Locks nest: scrolling resumes once every outstanding lock is gone.
#[must_use = "scrolling resumes as soon as the lock is dropped"]
#[derive(Debug)]
pub struct ScrollLock {
    count: Rc<Cell<usize>>,
}

impl ScrollLock {
    pub(crate) fn acquire(count: &Rc<Cell<usize>>) -> Self {
        count.set(count.get() + 1);
        trace!(locks = count.get(), "page scroll locked");
        Self {
            count: Rc::clone(count),
        }
    }
}

impl Drop for ScrollLock {
    fn drop(&mut self) {
        self.count.set(self.count.get().saturating_sub(1));
        trace!(locks = self.count.get(), "page scroll lock released");
    }
}
