// Copyright 2025 the Kennel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The host document: a scene of regions with accessibility metadata, one focus
//! owner, and the page-level services components lean on.
//!
//! ## Events
//!
//! - [`Document::click`] hit-tests the scene, routes through the responder chain
//!   (confined to the modal root when one is set), moves focus to the nearest
//!   focusable region on the target's path, and then delivers the dispatch
//!   sequence.
//! - [`Document::key_down`] routes to the focused region first. Unless a handler
//!   consumed the press, the document's [`KeyListener`]s run next, and finally the
//!   default action (Tab moves focus, Space and Page Down scroll) unless someone
//!   called [`KeyContext::prevent_default`].
//!
//! ## Deferred work
//!
//! [`Document::defer_focus`] queues a focus move for the next [`Document::run_ticks`].
//! A queued move whose target has since been unmounted, hidden, or made unfocusable
//! is dropped without effect.
//!
//! All bounds are in page coordinates.

use std::cell::Cell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use kennel_responder::adapters::scene::hits_for_point;
use kennel_responder::dispatch::run_dispatch;
use kennel_responder::focus::FocusState;
use kennel_responder::router::Router;
use kennel_responder::trap::{self, Direction};
use kennel_responder::types::{Dispatch, Outcome, WidgetLookup, target_of};
use kennel_scene::{LocalNode, NodeId, QueryFilter, Tree};
use kurbo::{Point, Rect, Size};
use tracing::{debug, trace};

use crate::element::{Element, Handler, Role};
use crate::key::{Key, KeyEvent};
use crate::listeners::{KeyListener, ListenerGuard, ListenerRegistry, ScrollLock};

/// Fraction of the viewport height a Space or Page Down press scrolls.
const PAGE_STEP: f64 = 0.875;

/// One dispatch step as seen by handlers.
pub type Step = Dispatch<NodeId, Handler>;

/// A key press being delivered.
#[derive(Debug)]
pub struct KeyContext {
    event: KeyEvent,
    default_prevented: bool,
}

impl KeyContext {
    /// The key press.
    pub fn event(&self) -> &KeyEvent {
        &self.event
    }

    /// Suppress the document's default action for this press.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    /// Whether the default action has been suppressed.
    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// Something a document listener observed during a key press.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Notice {
    /// Escape was pressed while `owner` listened for it.
    Escape {
        /// The listening region.
        owner: NodeId,
    },
}

/// Result of [`Document::key_down`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KeyReport {
    /// Region the press was routed to.
    pub target: Option<NodeId>,
    /// Whether a handler consumed the press.
    pub consumed: bool,
    /// Whether the default action was suppressed.
    pub default_prevented: bool,
    /// What document listeners observed, in registration order.
    pub notices: Vec<Notice>,
}

/// Result of [`Document::click`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ClickReport {
    /// Region the click was routed to.
    pub target: Option<NodeId>,
    /// Whether a handler consumed the click.
    pub consumed: bool,
}

#[derive(Copy, Clone, Debug)]
enum Tick {
    Focus(NodeId),
}

struct Handlers<'a>(&'a HashMap<NodeId, Element>);

impl WidgetLookup<NodeId> for Handlers<'_> {
    type WidgetId = Handler;
    fn widget_of(&self, node: &NodeId) -> Option<Handler> {
        self.0.get(node).and_then(|e| e.handler)
    }
}

/// A page of regions with one focus owner.
#[derive(Debug)]
pub struct Document {
    scene: Tree,
    elements: HashMap<NodeId, Element>,
    body: NodeId,
    focus: FocusState<NodeId>,
    modal_root: Option<NodeId>,
    listeners: ListenerRegistry,
    scroll_locks: Rc<Cell<usize>>,
    scroll_y: f64,
    viewport: Size,
    ticks: VecDeque<Tick>,
}

impl Document {
    /// An empty page shown through a viewport of the given size.
    pub fn new(viewport: Size) -> Self {
        let mut scene = Tree::new();
        let body = scene.insert(None, LocalNode::with_bounds(viewport.to_rect()));
        let mut elements = HashMap::new();
        elements.insert(body, Element::new(Role::Generic));
        let mut doc = Self {
            scene,
            elements,
            body,
            focus: FocusState::new(),
            modal_root: None,
            listeners: ListenerRegistry::default(),
            scroll_locks: Rc::new(Cell::new(0)),
            scroll_y: 0.0,
            viewport,
            ticks: VecDeque::new(),
        };
        doc.commit();
        doc
    }

    /// The root region everything else mounts under.
    pub fn body(&self) -> NodeId {
        self.body
    }

    /// The underlying scene.
    pub fn scene(&self) -> &Tree {
        &self.scene
    }

    /// Viewport size.
    pub fn viewport(&self) -> Size {
        self.viewport
    }

    // --- structure ---

    /// Mount a region under `parent`.
    pub fn mount(&mut self, parent: NodeId, bounds: Rect, element: Element) -> NodeId {
        self.mount_layer(parent, bounds, 0, element)
    }

    /// Mount a region under `parent` with an explicit z-index.
    pub fn mount_layer(
        &mut self,
        parent: NodeId,
        bounds: Rect,
        z_index: i32,
        element: Element,
    ) -> NodeId {
        let local = LocalNode {
            local_bounds: bounds,
            z_index,
            flags: element.flags(),
            ..LocalNode::default()
        };
        let id = self.scene.insert(Some(parent), local);
        self.elements.insert(id, element);
        id
    }

    /// Remove a region and its subtree.
    ///
    /// Focus inside the subtree is dropped. Ids of removed regions stay stale forever.
    pub fn unmount(&mut self, id: NodeId) {
        if id == self.body || !self.scene.is_alive(id) {
            return;
        }
        if self.focus.focus_within(id) {
            trace!(?id, "focused region unmounted");
            self.focus.blur();
        }
        if self.modal_root.is_some_and(|m| self.scene.contains(id, m)) {
            self.modal_root = None;
        }
        for node in self.scene.descendants(id) {
            self.elements.remove(&node);
        }
        self.scene.remove(id);
    }

    /// Whether `id` is still mounted.
    pub fn is_mounted(&self, id: NodeId) -> bool {
        self.scene.is_alive(id)
    }

    /// Metadata of a mounted region.
    pub fn element(&self, id: NodeId) -> Option<&Element> {
        self.elements.get(&id)
    }

    /// Edit the metadata of a mounted region.
    pub fn update(&mut self, id: NodeId, f: impl FnOnce(&mut Element)) {
        let Some(element) = self.elements.get_mut(&id) else {
            return;
        };
        f(element);
        let flags = element.flags();
        self.scene.set_flags(id, flags);
        if !flags.can_focus() && self.focus.focused() == Some(id) {
            self.focus.blur();
        }
    }

    /// Move a mounted region.
    pub fn set_bounds(&mut self, id: NodeId, bounds: Rect) {
        self.scene.set_local_bounds(id, bounds);
    }

    /// First region, in document order, whose document id is `dom_id`.
    pub fn find_by_id(&self, dom_id: &str) -> Option<NodeId> {
        self.find(|e| e.dom_id.as_deref() == Some(dom_id))
    }

    /// First region, in document order, whose accessible name is `label`.
    pub fn find_by_label(&self, label: &str) -> Option<NodeId> {
        self.find(|e| e.label.as_deref() == Some(label))
    }

    fn find(&self, pred: impl Fn(&Element) -> bool) -> Option<NodeId> {
        self.scene
            .descendants(self.body)
            .into_iter()
            .find(|n| self.elements.get(n).is_some_and(&pred))
    }

    /// Recompute world geometry and grow the body to cover every region.
    pub fn commit(&mut self) {
        self.scene.commit();
        let extent = self
            .scene
            .descendants(self.body)
            .into_iter()
            .skip(1)
            .filter_map(|n| self.scene.world_bounds(n))
            .fold(self.viewport.to_rect(), |acc, r| acc.union(r));
        if self.scene.world_bounds(self.body) != Some(extent) {
            self.scene.set_local_bounds(self.body, extent);
            self.scene.commit();
        }
    }

    /// World-space center of a region, as of the last commit.
    pub fn center_of(&self, id: NodeId) -> Option<Point> {
        self.scene.world_bounds(id).map(|r| r.center())
    }

    /// Size of the whole page, as of the last commit.
    pub fn page_size(&self) -> Size {
        self.scene
            .world_bounds(self.body)
            .map_or(self.viewport, |r| r.size())
    }

    // --- focus ---

    /// The focused region.
    pub fn focused(&self) -> Option<NodeId> {
        self.focus.focused()
    }

    /// Whether focus is on `id` or inside its subtree.
    pub fn focus_within(&self, id: NodeId) -> bool {
        self.focus.focus_within(id)
    }

    /// Whether `id` could take focus right now.
    ///
    /// It must be mounted, visible, focusable, and inside the modal root if one is set.
    pub fn can_focus(&self, id: NodeId) -> bool {
        self.scene.ancestors_visible(id)
            && self.scene.flags(id).is_some_and(|f| f.can_focus())
            && self.in_modal_scope(id)
    }

    /// Move focus to `id`. Returns `false`, leaving focus alone, when `id` cannot take it.
    pub fn focus(&mut self, id: NodeId) -> bool {
        if !self.can_focus(id) {
            trace!(?id, "focus refused");
            return false;
        }
        let path = self.scene.path(id);
        if !self.focus.focus_path(&path).is_empty() {
            debug!(?id, "focus moved");
        }
        true
    }

    /// Drop focus.
    pub fn blur(&mut self) {
        if !self.focus.blur().is_empty() {
            debug!("focus cleared");
        }
    }

    /// Visible Tab stops in document order, limited to the modal root if one is set.
    pub fn tab_order(&self) -> Vec<NodeId> {
        self.scene.tab_order(self.modal_root)
    }

    /// Confine events and focus to the subtree at `root`, or lift confinement with `None`.
    pub fn set_modal_root(&mut self, root: Option<NodeId>) {
        self.modal_root = root;
    }

    /// Current modal root.
    pub fn modal_root(&self) -> Option<NodeId> {
        self.modal_root
    }

    fn in_modal_scope(&self, id: NodeId) -> bool {
        self.modal_root
            .is_none_or(|root| self.scene.contains(root, id))
    }

    // --- deferred work ---

    /// Focus `id` on the next [`Document::run_ticks`].
    pub fn defer_focus(&mut self, id: NodeId) {
        self.ticks.push_back(Tick::Focus(id));
    }

    /// Number of queued ticks.
    pub fn pending_ticks(&self) -> usize {
        self.ticks.len()
    }

    /// Run the ticks queued so far. Work queued meanwhile waits for the next call.
    pub fn run_ticks(&mut self) -> usize {
        self.commit();
        let ticks = std::mem::take(&mut self.ticks);
        let ran = ticks.len();
        for tick in ticks {
            match tick {
                Tick::Focus(id) => {
                    if !self.focus(id) {
                        trace!(?id, "deferred focus skipped");
                    }
                }
            }
        }
        ran
    }

    // --- page services ---

    /// Install a document key listener until the guard drops.
    pub fn listen(&self, listener: KeyListener) -> ListenerGuard {
        self.listeners.register(listener)
    }

    /// Number of installed document key listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Suppress page scrolling until the lock drops.
    pub fn lock_scroll(&self) -> ScrollLock {
        ScrollLock::acquire(&self.scroll_locks)
    }

    /// Whether any scroll lock is held.
    pub fn is_scroll_locked(&self) -> bool {
        self.scroll_locks.get() > 0
    }

    /// Vertical page scroll offset.
    pub fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    /// Scroll the page by `dy`, clamped to the page. Ignored while scrolling is locked.
    pub fn scroll_by(&mut self, dy: f64) {
        if self.is_scroll_locked() {
            trace!(dy, "scroll suppressed");
            return;
        }
        let max = (self.page_size().height - self.viewport.height).max(0.0);
        self.scroll_y = (self.scroll_y + dy).clamp(0.0, max);
    }

    // --- events ---

    fn router(&self) -> Router<NodeId, Handlers<'_>, &Tree> {
        let mut router = Router::with_parent(Handlers(&self.elements), &self.scene);
        router.set_modal_root(self.modal_root);
        router.set_focus(self.focus.focused());
        router
    }

    /// Deliver a pointer click at `pt`.
    pub fn click<F>(&mut self, pt: Point, mut deliver: F) -> ClickReport
    where
        F: FnMut(&Step) -> Outcome,
    {
        self.commit();
        let hits = hits_for_point(&self.scene, pt, QueryFilter::POINTER);
        let seq = self.router().route_pointer(&hits);
        let target = target_of(&seq);
        if let Some(target) = target {
            let focusable = self
                .scene
                .path(target)
                .into_iter()
                .rev()
                .find(|&n| self.can_focus(n));
            match focusable {
                Some(n) => {
                    self.focus(n);
                }
                None => self.blur(),
            }
        }
        trace!(?pt, ?target, "click");
        let consumed = run_dispatch(&seq, |step| deliver(step));
        ClickReport { target, consumed }
    }

    /// Deliver a key press.
    pub fn key_down<F>(&mut self, event: KeyEvent, mut deliver: F) -> KeyReport
    where
        F: FnMut(&Step, &mut KeyContext) -> Outcome,
    {
        self.commit();
        let seq = self.router().route_key();
        let target = target_of(&seq);
        let mut ctx = KeyContext {
            event,
            default_prevented: false,
        };
        let consumed = run_dispatch(&seq, |step| deliver(step, &mut ctx));

        let mut notices = Vec::new();
        if !consumed {
            for listener in self.listeners.snapshot() {
                match listener {
                    KeyListener::Escape { owner } if event.key == Key::Escape => {
                        notices.push(Notice::Escape { owner });
                    }
                    KeyListener::TabCycle { container } => {
                        if let Some(direction) = event.tab_direction() {
                            self.cycle_within(container, direction, &mut ctx);
                        }
                    }
                    KeyListener::Escape { .. } => {}
                }
            }
        }

        if !ctx.default_prevented {
            self.default_action(&event);
        }
        KeyReport {
            target,
            consumed,
            default_prevented: ctx.default_prevented,
            notices,
        }
    }

    fn cycle_within(&mut self, container: NodeId, direction: Direction, ctx: &mut KeyContext) {
        if ctx.default_prevented {
            return;
        }
        let order = self.scene.tab_order(Some(container));
        let step = trap::step(&order, self.focused(), direction);
        trace!(?step, "tab cycle");
        if step.prevents_default() {
            ctx.prevent_default();
        }
        if let Some(next) = step.target() {
            self.focus(next);
        }
    }

    fn default_action(&mut self, event: &KeyEvent) {
        if let Some(direction) = event.tab_direction() {
            self.navigate(direction);
            return;
        }
        if matches!(event.key, Key::Space | Key::PageDown) {
            self.scroll_by(self.viewport.height * PAGE_STEP);
        }
    }

    fn navigate(&mut self, direction: Direction) {
        let order = self.tab_order();
        if order.is_empty() {
            return;
        }
        let current = self
            .focused()
            .and_then(|f| order.iter().position(|&n| n == f));
        let next = match (current, direction) {
            (None, Direction::Forward) => 0,
            (None, Direction::Backward) => order.len() - 1,
            (Some(i), Direction::Forward) => (i + 1) % order.len(),
            (Some(i), Direction::Backward) => (i + order.len() - 1) % order.len(),
        };
        self.focus(order[next]);
    }
}
