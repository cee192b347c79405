// Copyright 2025 the Kennel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types for the responder: phases, outcomes, hits, lookups, and dispatch.
//!
//! ## Overview
//!
//! These types describe the responder protocol and its inputs/outputs.
//! They are referenced by the [`router`](crate::router) and used by downstream toolkits.

use alloc::vec::Vec;

/// Phases of event propagation.
///
/// Appears on each [`Dispatch`] item produced by the [router](crate::router::Router).
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Phase {
    /// Root-to-target traversal.
    Capture,
    /// Target node.
    Target,
    /// Target-to-root traversal.
    Bubble,
}

/// Handler outcome controlling propagation.
///
/// Returned by per-node handlers passed to [`run_dispatch`](crate::dispatch::run_dispatch).
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Outcome {
    /// Continue within the current phase.
    Continue,
    /// Stop propagation within the current phase.
    Stop,
    /// Stop and mark consumed; remaining phases are skipped.
    StopAndConsume,
}

/// Stacking rank of a candidate; higher is nearer to the user.
///
/// Equal ranks are stable and the last candidate wins.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Depth(pub u32);

/// A resolved hit to be routed.
///
/// Typically obtained from a scene hit test; see the
/// [`scene` adapter](crate::adapters) when the `scene_adapter` feature is enabled.
#[derive(Clone, Debug)]
pub struct ResolvedHit<K> {
    /// Node key associated with the hit.
    pub node: K,
    /// Optional root→target path; if absent, the router consults its [`ParentLookup`].
    pub path: Option<Vec<K>>,
    /// Rank used to pick the winning target from candidates.
    pub depth: Depth,
}

/// Map nodes to toolkit widget identifiers.
///
/// Each [`Dispatch`] carries the widget identifier of its node, which is what
/// handlers usually match on.
pub trait WidgetLookup<K> {
    /// Toolkit widget identifier type associated with a node.
    type WidgetId: Copy + core::fmt::Debug;
    /// Returns a widget identifier for the given node, if any.
    fn widget_of(&self, node: &K) -> Option<Self::WidgetId>;
}

/// Look up the parent of a node to reconstruct a root→target path for propagation.
pub trait ParentLookup<K> {
    /// Returns the parent of `node`, or `None` if `node` is a root.
    fn parent_of(&self, node: &K) -> Option<K>;
}

/// A no‑op parent provider used by default when no parent lookup is needed.
///
/// All calls to [`ParentLookup::parent_of`] return `None`.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoParent;

impl<K> ParentLookup<K> for NoParent {
    #[inline]
    fn parent_of(&self, _node: &K) -> Option<K> {
        None
    }
}

/// A single dispatch item.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dispatch<K, W> {
    /// Propagation phase for this step.
    pub phase: Phase,
    /// Node associated with this dispatch step.
    pub node: K,
    /// Optional widget id corresponding to the node.
    pub widget: Option<W>,
}

/// The node an event was routed to: the single [`Phase::Target`] entry, if any.
pub fn target_of<K: Copy, W>(seq: &[Dispatch<K, W>]) -> Option<K> {
    seq.iter().find(|d| d.phase == Phase::Target).map(|d| d.node)
}
