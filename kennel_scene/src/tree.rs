// Copyright 2025 the Kennel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core tree implementation: structure, updates, queries.

use alloc::vec::Vec;
use kurbo::{Affine, Point, Rect};

use crate::types::{LocalNode, NodeFlags, NodeId};

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

/// Top-level region tree.
pub struct Tree {
    nodes: Vec<Option<Node>>, // slots
    generations: Vec<u32>,    // last generation per slot (persists across frees)
    free_list: Vec<usize>,
    roots: Vec<NodeId>,
    epoch: u64,
}

impl core::fmt::Debug for Tree {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.nodes.len();
        let alive = self.nodes.iter().filter(|n| n.is_some()).count();
        f.debug_struct("Tree")
            .field("nodes_total", &total)
            .field("nodes_alive", &alive)
            .field("free_list", &self.free_list.len())
            .field("roots", &self.roots.len())
            .field("epoch", &self.epoch)
            .finish_non_exhaustive()
    }
}

/// Results of a hit test.
#[derive(Clone, Debug)]
pub struct Hit {
    /// The matched node.
    pub node: NodeId,
    /// Path from root to node (inclusive).
    pub path: Vec<NodeId>,
}

/// Filters applied during hit testing.
///
/// Used by [`Tree::hit_test_point`] and [`Tree::hits_at_point`].
#[derive(Clone, Copy, Debug, Default)]
pub struct QueryFilter {
    /// If true, only consider nodes whose whole ancestry is [`NodeFlags::VISIBLE`].
    pub visible_only: bool,
    /// If true, only consider nodes marked [`NodeFlags::PICKABLE`].
    pub pickable_only: bool,
}

impl QueryFilter {
    /// Visible and pickable nodes only; what a pointer press can land on.
    pub const POINTER: Self = Self {
        visible_only: true,
        pickable_only: true,
    };
}

#[derive(Clone, Debug, Default)]
struct WorldNode {
    transform: Affine,
    bounds: Rect, // AABB of the transformed local bounds
    visible: bool,
}

#[derive(Clone, Debug)]
struct Node {
    generation: u32,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    local: LocalNode,
    world: WorldNode,
    dirty: bool,
}

impl Node {
    fn new(generation: u32, local: LocalNode) -> Self {
        Self {
            generation,
            parent: None,
            children: Vec::new(),
            local,
            world: WorldNode::default(),
            dirty: true,
        }
    }
}

impl Tree {
    /// Create a new empty tree.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            roots: Vec::new(),
            epoch: 0,
        }
    }

    /// Number of commits performed so far.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_some()).count()
    }

    /// Whether the tree has no live nodes.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Insert a new node as the last child of `parent` (or as a root if `None`).
    ///
    /// A stale `parent` inserts the node as a root.
    pub fn insert(&mut self, parent: Option<NodeId>, local: LocalNode) -> NodeId {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.nodes[idx] = Some(Node::new(generation, local));
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            (idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.nodes.push(Some(Node::new(generation, local)));
            self.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            ((self.nodes.len() - 1) as u32, generation)
        };
        let id = NodeId::new(idx, generation);
        match parent {
            Some(p) if self.is_alive(p) => self.link_parent(id, p),
            _ => self.roots.push(id),
        }
        id
    }

    /// Remove a node (and its subtree) from the tree.
    ///
    /// Removing a stale id is a no-op.
    pub fn remove(&mut self, id: NodeId) {
        if !self.is_alive(id) {
            return;
        }
        match self.node(id).parent {
            Some(parent) => self.unlink_parent(id, parent),
            None => self.roots.retain(|r| *r != id),
        }
        self.free_subtree(id);
    }

    /// Update local bounds.
    pub fn set_local_bounds(&mut self, id: NodeId, bounds: Rect) {
        if let Some(node) = self.node_opt_mut(id) {
            node.local.local_bounds = bounds;
            node.dirty = true;
        }
    }

    /// Update local transform.
    pub fn set_local_transform(&mut self, id: NodeId, transform: Affine) {
        if let Some(node) = self.node_opt_mut(id) {
            node.local.local_transform = transform;
            node.dirty = true;
        }
    }

    /// Update z index.
    pub fn set_z_index(&mut self, id: NodeId, z: i32) {
        if let Some(node) = self.node_opt_mut(id) {
            node.local.z_index = z;
        }
    }

    /// Update flags.
    pub fn set_flags(&mut self, id: NodeId, flags: NodeFlags) {
        if let Some(node) = self.node_opt_mut(id) {
            node.local.flags = flags;
            // visibility is inherited, so world data needs a refresh
            node.dirty = true;
        }
    }

    /// Commit pending changes, updating world transforms, bounds, and effective visibility.
    ///
    /// Returns the number of nodes whose world data was recomputed.
    pub fn commit(&mut self) -> usize {
        self.epoch = self.epoch.wrapping_add(1);
        let roots = self.roots.clone();
        let mut updated = 0;
        for root in roots {
            updated += self.update_world_recursive(root, Affine::IDENTITY, true, false);
        }
        updated
    }

    /// Returns the topmost node at a world-space point.
    ///
    /// Honors [`QueryFilter`]. Uses world data from the last [`Tree::commit`].
    pub fn hit_test_point(&self, pt: Point, filter: QueryFilter) -> Option<Hit> {
        self.hits_at_point(pt, filter).pop()
    }

    /// Returns every node containing a world-space point, bottom-most first.
    ///
    /// Ordering follows stacking contexts: z-index is compared level by level from
    /// the root, siblings with equal z keep insertion order, and descendants paint
    /// above their ancestors.
    pub fn hits_at_point(&self, pt: Point, filter: QueryFilter) -> Vec<Hit> {
        let mut found: Vec<(Vec<(i32, usize)>, NodeId)> = Vec::new();
        for (i, slot) in self.nodes.iter().enumerate() {
            let Some(node) = slot.as_ref() else {
                continue;
            };
            if filter.visible_only && !node.world.visible {
                continue;
            }
            if filter.pickable_only && !node.local.flags.contains(NodeFlags::PICKABLE) {
                continue;
            }
            if !node.world.bounds.contains(pt) {
                continue;
            }
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            let id = NodeId::new(i as u32, node.generation);
            found.push((self.stacking_key(id), id));
        }
        found.sort_by(|a, b| a.0.cmp(&b.0));
        found
            .into_iter()
            .map(|(_, node)| Hit {
                node,
                path: self.path(node),
            })
            .collect()
    }

    /// Visible, tabbable nodes in document (pre-order) order.
    ///
    /// With `scope`, only the subtree rooted at `scope` (inclusive) is walked.
    /// A stale scope yields an empty list.
    pub fn tab_order(&self, scope: Option<NodeId>) -> Vec<NodeId> {
        let mut out = Vec::new();
        match scope {
            Some(root) => {
                if self.is_alive(root) && self.ancestors_visible(root) {
                    self.collect_tabbable(root, &mut out);
                }
            }
            None => {
                for &root in &self.roots {
                    self.collect_tabbable(root, &mut out);
                }
            }
        }
        out
    }

    /// Whether `id` refers to a live node.
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.nodes
            .get(id.idx())
            .and_then(|n| n.as_ref())
            .map(|n| n.generation == id.1)
            .unwrap_or(false)
    }

    /// Parent of a live node.
    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.node_opt(id)?.parent
    }

    /// Children of a live node, in insertion order.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node_opt(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Current flags of a live node.
    pub fn flags(&self, id: NodeId) -> Option<NodeFlags> {
        self.node_opt(id).map(|n| n.local.flags)
    }

    /// World-space bounds from the last commit.
    pub fn world_bounds(&self, id: NodeId) -> Option<Rect> {
        self.node_opt(id).map(|n| n.world.bounds)
    }

    /// Whether `node` is `ancestor` or lies inside its subtree.
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        if !self.is_alive(ancestor) {
            return false;
        }
        let mut cur = Some(node);
        while let Some(id) = cur {
            if id == ancestor {
                return true;
            }
            cur = self.parent_of(id);
        }
        false
    }

    /// Whether the node and all of its ancestors are visible.
    pub fn ancestors_visible(&self, id: NodeId) -> bool {
        let mut cur = Some(id);
        while let Some(n) = cur.and_then(|c| self.node_opt(c)) {
            if !n.local.flags.contains(NodeFlags::VISIBLE) {
                return false;
            }
            cur = n.parent;
        }
        self.is_alive(id)
    }

    /// Path from the root to `id` (inclusive). Empty for stale ids.
    pub fn path(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut cur = Some(id);
        while let Some(c) = cur {
            let Some(node) = self.node_opt(c) else {
                break;
            };
            out.push(c);
            cur = node.parent;
        }
        out.reverse();
        out
    }

    /// Subtree rooted at `id` in pre-order (inclusive).
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        if self.is_alive(id) {
            self.collect_subtree(id, &mut out);
        }
        out
    }

    // --- internals ---

    fn node(&self, id: NodeId) -> &Node {
        self.nodes[id.idx()].as_ref().expect("dangling NodeId")
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        self.nodes[id.idx()].as_mut().expect("dangling NodeId")
    }

    fn node_opt(&self, id: NodeId) -> Option<&Node> {
        let n = self.nodes.get(id.idx())?.as_ref()?;
        (n.generation == id.1).then_some(n)
    }

    fn node_opt_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        let n = self.nodes.get_mut(id.idx())?.as_mut()?;
        if n.generation != id.1 {
            return None;
        }
        Some(n)
    }

    fn link_parent(&mut self, id: NodeId, parent: NodeId) {
        self.node_mut(parent).children.push(id);
        self.node_mut(id).parent = Some(parent);
    }

    fn unlink_parent(&mut self, id: NodeId, parent: NodeId) {
        self.node_mut(parent).children.retain(|c| *c != id);
        self.node_mut(id).parent = None;
    }

    fn free_subtree(&mut self, id: NodeId) {
        let children = core::mem::take(&mut self.node_mut(id).children);
        for child in children {
            self.free_subtree(child);
        }
        self.nodes[id.idx()] = None;
        self.free_list.push(id.idx());
    }

    fn collect_subtree(&self, id: NodeId, out: &mut Vec<NodeId>) {
        out.push(id);
        for &child in &self.node(id).children {
            self.collect_subtree(child, out);
        }
    }

    fn collect_tabbable(&self, id: NodeId, out: &mut Vec<NodeId>) {
        let node = self.node(id);
        if !node.local.flags.contains(NodeFlags::VISIBLE) {
            return;
        }
        if node.local.flags.contains(NodeFlags::TABBABLE) {
            out.push(id);
        }
        for &child in &node.children {
            self.collect_tabbable(child, out);
        }
    }

    /// Root→node list of `(z_index, sibling position)` pairs.
    fn stacking_key(&self, id: NodeId) -> Vec<(i32, usize)> {
        let mut key = Vec::new();
        for n in self.path(id) {
            let node = self.node(n);
            let siblings = match node.parent {
                Some(p) => self.node(p).children.as_slice(),
                None => self.roots.as_slice(),
            };
            let pos = siblings.iter().position(|s| *s == n).unwrap_or(0);
            key.push((node.local.z_index, pos));
        }
        key
    }

    fn update_world_recursive(
        &mut self,
        id: NodeId,
        parent_tf: Affine,
        parent_visible: bool,
        parent_changed: bool,
    ) -> usize {
        let (changed, tf, visible, children) = {
            let node = self.node_mut(id);
            let changed = parent_changed || node.dirty;
            if changed {
                node.world.transform = parent_tf * node.local.local_transform;
                node.world.bounds = node
                    .world
                    .transform
                    .transform_rect_bbox(node.local.local_bounds);
                node.world.visible =
                    parent_visible && node.local.flags.contains(NodeFlags::VISIBLE);
                node.dirty = false;
            }
            (
                changed,
                node.world.transform,
                node.world.visible,
                node.children.clone(),
            )
        };
        let mut updated = usize::from(changed);
        for child in children {
            updated += self.update_world_recursive(child, tf, visible, changed);
        }
        updated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Vec2;

    fn rect_node(x0: f64, y0: f64, x1: f64, y1: f64) -> LocalNode {
        LocalNode::with_bounds(Rect::new(x0, y0, x1, y1))
    }

    #[test]
    fn stale_ids_never_alias_reused_slots() {
        let mut tree = Tree::new();
        let a = tree.insert(None, rect_node(0.0, 0.0, 10.0, 10.0));
        tree.remove(a);
        let b = tree.insert(None, rect_node(0.0, 0.0, 10.0, 10.0));
        assert_ne!(a, b, "reused slot must get a fresh generation");
        assert!(!tree.is_alive(a));
        assert!(tree.is_alive(b));
        assert!(tree.flags(a).is_none());
        assert!(tree.path(a).is_empty());
    }

    #[test]
    fn remove_drops_whole_subtree() {
        let mut tree = Tree::new();
        let root = tree.insert(None, rect_node(0.0, 0.0, 100.0, 100.0));
        let mid = tree.insert(Some(root), rect_node(0.0, 0.0, 50.0, 50.0));
        let leaf = tree.insert(Some(mid), rect_node(0.0, 0.0, 10.0, 10.0));
        tree.remove(mid);
        assert!(!tree.is_alive(mid));
        assert!(!tree.is_alive(leaf));
        assert!(tree.children(root).is_empty());
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn hit_prefers_descendant_over_ancestor() {
        let mut tree = Tree::new();
        let root = tree.insert(None, rect_node(0.0, 0.0, 100.0, 100.0));
        let child = tree.insert(Some(root), rect_node(10.0, 10.0, 40.0, 40.0));
        tree.commit();
        let hit = tree.hit_test_point(Point::new(20.0, 20.0), QueryFilter::POINTER);
        let hit = hit.expect("point is inside the child");
        assert_eq!(hit.node, child);
        assert_eq!(hit.path, [root, child]);
    }

    #[test]
    fn stacking_context_beats_raw_z() {
        // An overlay subtree with a high z on its root covers a sibling whose
        // own child carries an even higher z, because z only competes among siblings.
        let mut tree = Tree::new();
        let page = tree.insert(None, rect_node(0.0, 0.0, 100.0, 100.0));
        let content = tree.insert(Some(page), rect_node(0.0, 0.0, 100.0, 100.0));
        let _deep = tree.insert(
            Some(content),
            LocalNode {
                z_index: 1_000,
                ..rect_node(0.0, 0.0, 100.0, 100.0)
            },
        );
        let overlay = tree.insert(
            Some(page),
            LocalNode {
                z_index: 10,
                ..rect_node(0.0, 0.0, 100.0, 100.0)
            },
        );
        let panel = tree.insert(Some(overlay), rect_node(25.0, 25.0, 75.0, 75.0));
        tree.commit();

        let at_panel = tree.hit_test_point(Point::new(50.0, 50.0), QueryFilter::POINTER);
        assert_eq!(at_panel.map(|h| h.node), Some(panel));
        let at_edge = tree.hit_test_point(Point::new(5.0, 5.0), QueryFilter::POINTER);
        assert_eq!(at_edge.map(|h| h.node), Some(overlay));
    }

    #[test]
    fn hidden_ancestor_hides_subtree_from_hits() {
        let mut tree = Tree::new();
        let root = tree.insert(None, rect_node(0.0, 0.0, 100.0, 100.0));
        let child = tree.insert(Some(root), rect_node(0.0, 0.0, 50.0, 50.0));
        tree.set_flags(root, NodeFlags::PICKABLE);
        tree.commit();
        assert!(
            tree.hit_test_point(Point::new(10.0, 10.0), QueryFilter::POINTER)
                .is_none()
        );
        let unfiltered = tree.hits_at_point(Point::new(10.0, 10.0), QueryFilter::default());
        assert_eq!(unfiltered.len(), 2);
        assert_eq!(unfiltered[1].node, child);
    }

    #[test]
    fn transforms_move_world_bounds() {
        let mut tree = Tree::new();
        let root = tree.insert(None, rect_node(0.0, 0.0, 200.0, 200.0));
        let child = tree.insert(Some(root), rect_node(0.0, 0.0, 10.0, 10.0));
        tree.commit();
        tree.set_local_transform(root, Affine::translate(Vec2::new(50.0, 0.0)));
        let updated = tree.commit();
        assert_eq!(updated, 2, "moving a parent refreshes its subtree");
        assert_eq!(tree.world_bounds(child), Some(Rect::new(50.0, 0.0, 60.0, 10.0)));
        let hit = tree.hit_test_point(Point::new(55.0, 5.0), QueryFilter::POINTER);
        assert_eq!(hit.map(|h| h.node), Some(child));
    }

    #[test]
    fn tab_order_is_document_order_and_scoped() {
        let mut tree = Tree::new();
        let page = tree.insert(None, LocalNode::default());
        let first = tree.insert(
            Some(page),
            LocalNode {
                flags: NodeFlags::tabbable(),
                ..LocalNode::default()
            },
        );
        let dialog = tree.insert(
            Some(page),
            LocalNode {
                z_index: 50,
                ..LocalNode::default()
            },
        );
        let inside_a = tree.insert(
            Some(dialog),
            LocalNode {
                flags: NodeFlags::tabbable(),
                ..LocalNode::default()
            },
        );
        let _programmatic = tree.insert(
            Some(dialog),
            LocalNode {
                flags: NodeFlags::default() | NodeFlags::FOCUSABLE,
                ..LocalNode::default()
            },
        );
        let inside_b = tree.insert(
            Some(dialog),
            LocalNode {
                flags: NodeFlags::tabbable(),
                ..LocalNode::default()
            },
        );
        assert_eq!(tree.tab_order(None), [first, inside_a, inside_b]);
        assert_eq!(tree.tab_order(Some(dialog)), [inside_a, inside_b]);

        tree.set_flags(dialog, NodeFlags::PICKABLE);
        assert_eq!(tree.tab_order(None), [first]);
        assert!(tree.tab_order(Some(dialog)).is_empty());
    }

    #[test]
    fn contains_walks_ancestry() {
        let mut tree = Tree::new();
        let root = tree.insert(None, LocalNode::default());
        let a = tree.insert(Some(root), LocalNode::default());
        let b = tree.insert(Some(root), LocalNode::default());
        let a1 = tree.insert(Some(a), LocalNode::default());
        assert!(tree.contains(root, a1));
        assert!(tree.contains(a, a1));
        assert!(tree.contains(a1, a1));
        assert!(!tree.contains(b, a1));
        assert_eq!(tree.descendants(a), [a, a1]);
    }
}
