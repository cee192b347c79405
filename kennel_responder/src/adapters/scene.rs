// Copyright 2025 the Kennel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Adapter helpers for Kennel Scene.
//!
//! ## Feature
//!
//! Enable with `scene_adapter`.
//!
//! ## Notes
//!
//! - [`hits_for_point`] turns every region under a point into a [`ResolvedHit`], ranked
//!   by stacking order, so the router can apply its modal scope before choosing.
//! - `&Tree` implements [`ParentLookup`], which lets key routing rebuild the focused
//!   node's path.

use alloc::vec::Vec;

use kennel_scene::{NodeId, QueryFilter, Tree};
use kurbo::Point;

use crate::types::{Depth, ParentLookup, ResolvedHit};

/// Build resolved hits for every node under a point, bottom-most first.
///
/// Paths come from the scene, and the depth is the stacking rank, so the topmost
/// node carries the highest [`Depth`].
pub fn hits_for_point(tree: &Tree, pt: Point, filter: QueryFilter) -> Vec<ResolvedHit<NodeId>> {
    tree.hits_at_point(pt, filter)
        .into_iter()
        .enumerate()
        .map(|(rank, hit)| {
            #[allow(
                clippy::cast_possible_truncation,
                reason = "A scene never holds more than u32::MAX nodes."
            )]
            let depth = Depth(rank as u32);
            ResolvedHit {
                node: hit.node,
                path: Some(hit.path),
                depth,
            }
        })
        .collect()
}

impl ParentLookup<NodeId> for &Tree {
    fn parent_of(&self, node: &NodeId) -> Option<NodeId> {
        Tree::parent_of(self, *node)
    }
}
