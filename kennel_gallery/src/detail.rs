// Copyright 2025 the Kennel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The detail view: a modal dialog showing one record.
//!
//! ## Lifecycle
//!
//! [`DetailView::open`] remembers where focus should return (the activation origin
//! if the caller has one, otherwise whatever held focus), locks page scrolling,
//! mounts the dialog, confines events to it, installs the Escape and Tab-cycle
//! document listeners, and queues a focus move to the close button for the next
//! tick. Everything acquired is held by the open session; [`DetailView::close`]
//! drops the session, which releases the listeners and the scroll lock, then
//! unmounts the dialog and restores focus. Dropping a `DetailView` while open
//! releases the listeners and the lock too.
//!
//! ## Closing
//!
//! The close button, Escape, or a click on the backdrop close the view. The
//! backdrop is a dedicated region sitting beneath the content panel; clicks on the
//! panel land on the panel and never reach it.

use kennel_records::PetRecord;
use kennel_responder::types::Phase;
use kennel_scene::NodeId;
use kurbo::{Rect, Size};
use tracing::debug;

use crate::document::{Document, Notice, Step};
use crate::element::{Element, Handler, Role};
use crate::listeners::{KeyListener, ListenerGuard, ScrollLock};

/// Id of the dialog's title element.
pub const TITLE_ID: &str = "pet-modal-title";

const PANEL: Size = Size::new(672.0, 560.0);
const PADDING: f64 = 32.0;
const CLOSE: f64 = 40.0;

/// Accessible name of the close button.
pub fn close_label(record: &PetRecord) -> String {
    format!("Close {} details modal", record.name)
}

/// Id of the dialog's descriptive content.
pub fn description_id(record: &PetRecord) -> String {
    format!("pet-modal-description-{}", record.id)
}

/// Regions of an open detail view.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DetailNodes {
    /// Dialog root, the modal scope.
    pub root: NodeId,
    /// Area around the panel; clicking it closes the view.
    pub backdrop: NodeId,
    /// Content panel.
    pub panel: NodeId,
    /// Title heading.
    pub title: NodeId,
    /// Descriptive content.
    pub description: NodeId,
    /// Close button; receives focus once the view is shown.
    pub close: NodeId,
}

/// Why the view wants to close.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CloseReason {
    /// The close button was activated.
    Button,
    /// Escape was pressed.
    Escape,
    /// The backdrop was clicked.
    Backdrop,
}

#[derive(Debug)]
struct Session {
    record: PetRecord,
    nodes: DetailNodes,
    origin: Option<NodeId>,
    previous_focus: Option<NodeId>,
    _escape: ListenerGuard,
    _tab_cycle: ListenerGuard,
    _scroll: ScrollLock,
}

/// The detail view, closed or open.
#[derive(Debug, Default)]
pub struct DetailView {
    session: Option<Session>,
}

impl DetailView {
    /// A closed view.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the view is open.
    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    /// The record shown.
    pub fn record(&self) -> Option<&PetRecord> {
        self.session.as_ref().map(|s| &s.record)
    }

    /// Regions of the open view.
    pub fn nodes(&self) -> Option<DetailNodes> {
        self.session.as_ref().map(|s| s.nodes)
    }

    /// Where focus returns on close.
    pub fn restore_target(&self) -> Option<NodeId> {
        let s = self.session.as_ref()?;
        s.origin.or(s.previous_focus)
    }

    /// Show `record`. An already open view is closed first.
    ///
    /// `origin` is the region that asked for the view; it takes precedence over the
    /// current focus owner when focus is restored.
    pub fn open(&mut self, doc: &mut Document, record: &PetRecord, origin: Option<NodeId>) {
        if self.is_open() {
            self.close(doc);
        }
        let previous_focus = doc.focused();
        let scroll = doc.lock_scroll();
        let nodes = mount(doc, record);
        doc.set_modal_root(Some(nodes.root));
        let escape = doc.listen(KeyListener::Escape { owner: nodes.root });
        let tab_cycle = doc.listen(KeyListener::TabCycle {
            container: nodes.panel,
        });
        doc.defer_focus(nodes.close);
        debug!(id = %record.id, ?origin, ?previous_focus, "detail view opened");
        self.session = Some(Session {
            record: record.clone(),
            nodes,
            origin,
            previous_focus,
            _escape: escape,
            _tab_cycle: tab_cycle,
            _scroll: scroll,
        });
    }

    /// Close the view and restore focus. Returns the region that received focus.
    ///
    /// The activation origin wins over the previously focused region; a target that
    /// has been unmounted meanwhile is skipped. Closing a closed view does nothing.
    pub fn close(&mut self, doc: &mut Document) -> Option<NodeId> {
        let session = self.session.take()?;
        let Session {
            record,
            nodes,
            origin,
            previous_focus,
            _escape: escape,
            _tab_cycle: tab_cycle,
            _scroll: scroll,
        } = session;
        drop((escape, tab_cycle, scroll));
        doc.set_modal_root(None);
        doc.unmount(nodes.root);
        let restored = [origin, previous_focus]
            .into_iter()
            .flatten()
            .find(|&n| doc.focus(n));
        debug!(id = %record.id, ?restored, "detail view closed");
        restored
    }

    /// Whether a pointer step asks the view to close.
    pub fn on_click(&self, step: &Step) -> Option<CloseReason> {
        let nodes = self.nodes()?;
        match step.widget? {
            Handler::Backdrop if step.phase == Phase::Target && step.node == nodes.backdrop => {
                Some(CloseReason::Backdrop)
            }
            Handler::CloseDetail if step.phase != Phase::Capture && step.node == nodes.close => {
                Some(CloseReason::Button)
            }
            _ => None,
        }
    }

    /// Whether a document notice asks the view to close.
    pub fn on_notice(&self, notice: &Notice) -> Option<CloseReason> {
        let nodes = self.nodes()?;
        match *notice {
            Notice::Escape { owner } if owner == nodes.root => Some(CloseReason::Escape),
            Notice::Escape { .. } => None,
        }
    }
}

fn mount(doc: &mut Document, record: &PetRecord) -> DetailNodes {
    let viewport = doc.viewport();
    let page = doc.page_size();
    let overlay = Rect::new(
        0.0,
        0.0,
        viewport.width.max(page.width),
        viewport.height.max(page.height),
    );
    let top = doc.scroll_y() + ((viewport.height - PANEL.height) / 2.0).max(0.0);
    let left = ((viewport.width - PANEL.width) / 2.0).max(0.0);
    let panel_rect = Rect::from_origin_size((left, top), PANEL);
    let description_id = description_id(record);

    let body = doc.body();
    let root = doc.mount_layer(
        body,
        overlay,
        100,
        Element::new(Role::Dialog)
            .modal()
            .labelled_by(TITLE_ID)
            .described_by(description_id.clone()),
    );
    let backdrop = doc.mount(root, overlay, Element::default().hidden().on(Handler::Backdrop));
    let panel = doc.mount(root, panel_rect, Element::default().tab_index(-1));

    let inner_x0 = panel_rect.x0 + PADDING;
    let inner_x1 = panel_rect.x1 - PADDING;
    let close = doc.mount(
        panel,
        Rect::new(
            panel_rect.x1 - PADDING - CLOSE,
            panel_rect.y0 + PADDING,
            panel_rect.x1 - PADDING,
            panel_rect.y0 + PADDING + CLOSE,
        ),
        Element::new(Role::Button)
            .label(close_label(record))
            .text("×")
            .tab_index(0)
            .on(Handler::CloseDetail),
    );
    let image_bottom = panel_rect.y0 + PADDING + 240.0;
    doc.mount(
        panel,
        Rect::new(inner_x0, panel_rect.y0 + PADDING, inner_x1 - CLOSE - 16.0, image_bottom),
        Element::new(Role::Image).label(record.image_alt()),
    );
    let title = doc.mount(
        panel,
        Rect::new(inner_x0, image_bottom + 16.0, inner_x1, image_bottom + 56.0),
        Element::new(Role::Heading(2))
            .id(TITLE_ID)
            .text(record.name.clone()),
    );
    let status = record.adoption_status;
    doc.mount(
        panel,
        Rect::new(inner_x0, image_bottom + 64.0, inner_x0 + 160.0, image_bottom + 92.0),
        Element::new(Role::Status)
            .label(status.label())
            .text(status.capitalized()),
    );
    let description = doc.mount(
        panel,
        Rect::new(inner_x0, image_bottom + 100.0, inner_x1, panel_rect.y1 - PADDING),
        Element::default().id(description_id).text(format!(
            "{} {} • {} • {}. {} Location: {}",
            record.breed,
            record.species,
            record.age_phrase(),
            status.capitalized(),
            record.description,
            record.shelter_location,
        )),
    );

    DetailNodes {
        root,
        backdrop,
        panel,
        title,
        description,
        close,
    }
}
