// Copyright 2025 the Kennel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Router implementation.
//!
//! ## Overview
//!
//! Orders hits, reconstructs paths, and emits dispatch steps.
//! Produces a capture → target → bubble sequence for the selected target.
//!
//! ## Target Selection
//!
//! - Pointer events rank candidates by [`Depth`](crate::types::Depth); the nearest wins,
//!   and equal-depth ties are stable with the last candidate winning.
//! - Key events target the focused node ([`Router::set_focus`]).
//!
//! ## Modal scope
//!
//! [`Router::set_modal_root`] confines routing to one subtree, the way a modal dialog
//! blocks the rest of the page. Pointer candidates outside the subtree are skipped, and
//! key events whose focus lies outside it are routed to the modal root instead.
//!
//! ## See Also
//!
//! [`focus`](crate::focus) for focus transitions and [`trap`](crate::trap) for
//! keeping sequential navigation inside a modal subtree.

use alloc::vec::Vec;

use crate::types::{Dispatch, NoParent, ParentLookup, Phase, ResolvedHit, WidgetLookup};

/// Deterministic responder chain router.
///
/// ## Usage
///
/// - Construct with [`Router::new`] when callers always provide a full path in
///   [`ResolvedHit`], or with [`Router::with_parent`] to enable path reconstruction
///   via a [`ParentLookup`].
/// - Optionally set [`Router::set_modal_root`] and [`Router::set_focus`].
/// - Call [`Router::route_pointer`] for pointer events and [`Router::route_key`] for
///   keyboard events.
pub struct Router<K, L: WidgetLookup<K>, P: ParentLookup<K> = NoParent> {
    lookup: L,
    parent: P,
    modal_root: Option<K>,
    focus: Option<K>,
}

impl<K: Copy + Eq + core::fmt::Debug, L: WidgetLookup<K>, P: ParentLookup<K>> core::fmt::Debug
    for Router<K, L, P>
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Router")
            .field("modal_root", &self.modal_root)
            .field("focus", &self.focus)
            .finish_non_exhaustive()
    }
}

impl<K: Copy + Eq, L: WidgetLookup<K>, P: ParentLookup<K> + Default> Router<K, L, P> {
    /// Create a router with a default parent lookup.
    pub fn new(lookup: L) -> Self {
        Self::with_parent(lookup, P::default())
    }
}

impl<K: Copy + Eq, L: WidgetLookup<K>, P: ParentLookup<K>> Router<K, L, P> {
    /// Create a router with an explicit parent lookup provider.
    pub fn with_parent(lookup: L, parent: P) -> Self {
        Self {
            lookup,
            parent,
            modal_root: None,
            focus: None,
        }
    }

    /// Confine routing to the subtree rooted at `root`, or lift the confinement with `None`.
    pub fn set_modal_root(&mut self, root: Option<K>) {
        self.modal_root = root;
    }

    /// Current modal root, if any.
    pub fn modal_root(&self) -> Option<K> {
        self.modal_root
    }

    /// Set the focused node that receives key events.
    pub fn set_focus(&mut self, node: Option<K>) {
        self.focus = node;
    }

    /// Currently focused node, if any.
    pub fn focus(&self) -> Option<K> {
        self.focus
    }

    /// Select the nearest in-scope hit and produce its propagation sequence.
    ///
    /// Returns an empty sequence when no candidate is in scope.
    pub fn route_pointer(&self, hits: &[ResolvedHit<K>]) -> Vec<Dispatch<K, L::WidgetId>> {
        // Single pass without sorting; `>=` keeps the last of equal-depth candidates.
        let mut best: Option<(&ResolvedHit<K>, Vec<K>)> = None;
        for h in hits {
            let path = match &h.path {
                Some(p) => p.clone(),
                None => self.reconstruct_path(h.node),
            };
            if !self.in_scope(&path) {
                continue;
            }
            if best.as_ref().is_none_or(|(b, _)| h.depth >= b.depth) {
                best = Some((h, path));
            }
        }
        match best {
            Some((_, path)) => self.emit_path(path),
            None => Vec::new(),
        }
    }

    /// Produce the propagation sequence for a key event.
    ///
    /// Targets the focused node; when a modal root is set and focus lies outside it
    /// (or nothing is focused), the modal root is targeted instead. Returns an empty
    /// sequence when there is neither focus nor a modal root.
    pub fn route_key(&self) -> Vec<Dispatch<K, L::WidgetId>> {
        let focused = self.focus.map(|f| self.reconstruct_path(f));
        match (focused, self.modal_root) {
            (Some(path), _) if self.in_scope(&path) => self.emit_path(path),
            (_, Some(root)) => self.emit_path(self.reconstruct_path(root)),
            (_, None) => Vec::new(),
        }
    }

    fn in_scope(&self, path: &[K]) -> bool {
        match self.modal_root {
            Some(root) => path.contains(&root),
            None => true,
        }
    }

    fn make_dispatch(&self, phase: Phase, node: K) -> Dispatch<K, L::WidgetId> {
        Dispatch {
            phase,
            node,
            widget: self.lookup.widget_of(&node),
        }
    }

    fn reconstruct_path(&self, target: K) -> Vec<K> {
        let mut out = Vec::new();
        let mut cur = target;
        // Collect to root; caller ensures acyclic ancestry.
        loop {
            out.push(cur);
            match self.parent.parent_of(&cur) {
                Some(p) => cur = p,
                None => break,
            }
        }
        out.reverse();
        out
    }

    fn emit_path(&self, path: Vec<K>) -> Vec<Dispatch<K, L::WidgetId>> {
        let Some(&target) = path.last() else {
            return Vec::new();
        };
        let mut out = Vec::with_capacity(path.len() * 2 + 1);
        // Capture: root→target
        for &n in &path {
            out.push(self.make_dispatch(Phase::Capture, n));
        }
        out.push(self.make_dispatch(Phase::Target, target));
        // Bubble: target→root
        for &n in path.iter().rev() {
            out.push(self.make_dispatch(Phase::Bubble, n));
        }
        out
    }
}
