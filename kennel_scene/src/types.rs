// Copyright 2025 the Kennel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the scene: node identifiers, flags, and local geometry.

use kurbo::{Affine, Rect};

/// Identifier for a region in the tree.
///
/// A small, copyable handle made of a slot index and a generation counter.
///
/// ## Semantics
///
/// - On insert, a fresh slot is allocated with generation `1`.
/// - On remove, the slot is freed; any existing `NodeId` that pointed to that slot is now stale.
/// - On reuse of a freed slot, its generation is incremented, producing a new, distinct `NodeId`.
///
/// Stale ids never alias a different live node, so holding on to a `NodeId` after its
/// region was unmounted is safe: every query simply reports it as gone.
/// Use [`Tree::is_alive`](crate::Tree::is_alive) to check liveness explicitly.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32, pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

bitflags::bitflags! {
    /// Region flags controlling visibility, picking, and focus.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct NodeFlags: u8 {
        /// Region is visible. Hidden regions hide their whole subtree.
        const VISIBLE   = 0b0000_0001;
        /// Region is pickable (participates in hit testing).
        const PICKABLE  = 0b0000_0010;
        /// Region may receive focus programmatically.
        const FOCUSABLE = 0b0000_0100;
        /// Region participates in sequential (Tab) navigation. Implies focusable.
        const TABBABLE  = 0b0000_1000;
    }
}

impl Default for NodeFlags {
    fn default() -> Self {
        Self::VISIBLE | Self::PICKABLE
    }
}

impl NodeFlags {
    /// Flags for a region that is reachable with the Tab key.
    pub fn tabbable() -> Self {
        Self::default() | Self::FOCUSABLE | Self::TABBABLE
    }

    /// Whether a region with these flags can hold focus.
    pub fn can_focus(self) -> bool {
        self.intersects(Self::FOCUSABLE | Self::TABBABLE)
    }
}

/// Local geometry for a region.
#[derive(Clone, Debug)]
pub struct LocalNode {
    /// Local (untransformed) bounds.
    pub local_bounds: Rect,
    /// Local transform relative to parent space.
    pub local_transform: Affine,
    /// Z-order within the parent's stacking context. Higher is drawn on top.
    pub z_index: i32,
    /// Visibility, picking, and focus flags.
    pub flags: NodeFlags,
}

impl Default for LocalNode {
    fn default() -> Self {
        Self {
            local_bounds: Rect::ZERO,
            local_transform: Affine::IDENTITY,
            z_index: 0,
            flags: NodeFlags::default(),
        }
    }
}

impl LocalNode {
    /// A region covering `bounds` with default flags.
    pub fn with_bounds(bounds: Rect) -> Self {
        Self {
            local_bounds: bounds,
            ..Self::default()
        }
    }
}
