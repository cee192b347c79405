// Copyright 2025 the Kennel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Kennel Scene: a Kurbo-native region tree for interactive documents.
//!
//! The scene is the "interactive tree" of a UI document: a hierarchy of regions with
//! local transforms, z-order, and flags. It answers the two geometric questions an
//! event layer needs:
//!
//! - Which region is under the pointer? ([`Tree::hit_test_point`], [`Tree::hits_at_point`])
//! - Which regions can the Tab key reach, and in what order? ([`Tree::tab_order`])
//!
//! ## Stacking
//!
//! Z-index only competes among siblings. A subtree whose root carries a high z-index
//! (a dialog overlay, say) covers everything painted by lower siblings, no matter how
//! large the z-index of nodes nested inside those siblings. Descendants paint above
//! their ancestors, and equal z keeps insertion order.
//!
//! ## Liveness
//!
//! [`NodeId`]s are generational. Once a region is removed, every query treats its id as
//! absent, even after the slot is reused. Deferred work holding an id (a focus move
//! scheduled for the next tick, for example) can therefore check [`Tree::is_alive`] and
//! become a no-op instead of touching an unrelated region.
//!
//! ## Not a layout engine
//!
//! Upstream code computes positions and sizes, then writes the resulting boxes here.
//! Call [`Tree::commit`] after edits to refresh world-space data before hit testing.
//!
//! ### Minimal usage
//!
//! ```
//! use kennel_scene::{LocalNode, NodeFlags, QueryFilter, Tree};
//! use kurbo::{Point, Rect};
//!
//! let mut tree = Tree::new();
//! let root = tree.insert(None, LocalNode::with_bounds(Rect::new(0.0, 0.0, 200.0, 200.0)));
//! let button = tree.insert(
//!     Some(root),
//!     LocalNode {
//!         local_bounds: Rect::new(10.0, 10.0, 60.0, 40.0),
//!         flags: NodeFlags::tabbable(),
//!         ..LocalNode::default()
//!     },
//! );
//! tree.commit();
//!
//! let hit = tree.hit_test_point(Point::new(20.0, 20.0), QueryFilter::POINTER).unwrap();
//! assert_eq!(hit.node, button);
//! assert_eq!(tree.tab_order(None), [button]);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod tree;
mod types;

pub use tree::{Hit, QueryFilter, Tree};
pub use types::{LocalNode, NodeFlags, NodeId};
