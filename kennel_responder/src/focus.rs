// Copyright 2025 the Kennel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Focus state: which node holds keyboard focus, and the transitions between owners.
//!
//! Focus is tracked as the root→focused path so that containers can react to focus
//! entering or leaving their subtree (the `focus-within` notion). Moving focus emits
//! [`FocusEvent::Out`] for the abandoned part of the old path (inner→outer), then
//! [`FocusEvent::In`] for the new part (outer→inner). Ancestors shared by both paths
//! see nothing.
//!
//! ```
//! use kennel_responder::focus::{FocusEvent, FocusState};
//! let mut f: FocusState<u32> = FocusState::new();
//! assert_eq!(f.focus_path(&[1, 2]), vec![FocusEvent::In(1), FocusEvent::In(2)]);
//! assert_eq!(f.focused(), Some(2));
//! assert_eq!(f.focus_path(&[1, 3]), vec![FocusEvent::Out(2), FocusEvent::In(3)]);
//! assert!(f.focus_within(1));
//! ```

use alloc::vec::Vec;

/// Keyboard focus owner, tracked as a root→focused path.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FocusState<K: Copy + Eq> {
    path: Vec<K>,
}

/// A focus transition.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FocusEvent<K> {
    /// Focus entered the node's subtree (outer→inner order).
    In(K),
    /// Focus left the node's subtree (inner→outer order).
    Out(K),
}

impl<K: Copy + Eq> FocusState<K> {
    /// Nothing focused.
    pub fn new() -> Self {
        Self { path: Vec::new() }
    }

    /// The focused node, if any.
    pub fn focused(&self) -> Option<K> {
        self.path.last().copied()
    }

    /// The root→focused path.
    pub fn path(&self) -> &[K] {
        &self.path
    }

    /// Whether focus is on `node` or inside its subtree.
    pub fn focus_within(&self, node: K) -> bool {
        self.path.contains(&node)
    }

    /// Move focus to the last node of `path` and return the transitions.
    ///
    /// Refocusing the current owner yields no events.
    pub fn focus_path(&mut self, path: &[K]) -> Vec<FocusEvent<K>> {
        let shared = self
            .path
            .iter()
            .zip(path)
            .take_while(|(a, b)| a == b)
            .count();

        let mut out = Vec::new();
        for &k in self.path[shared..].iter().rev() {
            out.push(FocusEvent::Out(k));
        }
        for &k in &path[shared..] {
            out.push(FocusEvent::In(k));
        }
        self.path.clear();
        self.path.extend_from_slice(path);
        out
    }

    /// Drop focus entirely, returning `Out` events inner→outer.
    pub fn blur(&mut self) -> Vec<FocusEvent<K>> {
        self.focus_path(&[])
    }
}
