// Copyright 2025 the Kennel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The gallery coordinator.
//!
//! [`Gallery`] owns the document, the record store, the search panel, the current
//! results, and the detail view. Input arrives through [`Gallery::click`] and
//! [`Gallery::key_down`]; handlers translate what they see into [`Message`]s, and
//! [`Gallery::update`] is the only place state changes. Every message that touches
//! the criteria recomputes the results before returning, so the grid, the live
//! region, and the empty state never lag behind the controls.

use kennel_records::{
    AdoptionStatus, Choice, FilterCriteria, PetRecord, RecordStore, Selection, Species, announce,
};
use kennel_responder::types::{Outcome, Phase};
use kennel_scene::NodeId;
use kurbo::{Point, Rect};
use tracing::{debug, trace};

use crate::card::{self, Card, MountedCard};
use crate::detail::{CloseReason, DetailView};
use crate::document::{ClickReport, Document, KeyReport};
use crate::element::{Element, Handler, Live, Role};
use crate::key::{Key, KeyEvent};
use crate::options::GalleryOptions;
use crate::search::{self, SearchPanel};

const MARGIN: f64 = 32.0;
const HEADER: f64 = 120.0;
const GAP: f64 = 24.0;
/// Height of one card in the grid.
pub const CARD_HEIGHT: f64 = 440.0;

/// A state change.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Message {
    /// The search text changed.
    SearchChanged(String),
    /// A species filter was picked.
    SpeciesSelected(Choice<Species>),
    /// A status filter was picked.
    StatusSelected(Choice<AdoptionStatus>),
    /// The search text was cleared.
    ClearSearch,
    /// Every filter was reset.
    ClearFilters,
    /// A card was activated.
    OpenDetail {
        /// Position of the record among the current results.
        index: usize,
        /// Region that triggered the activation.
        origin: Option<NodeId>,
    },
    /// The detail view asked to close.
    CloseDetail(CloseReason),
}

/// What the results area shows.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Presentation {
    /// A grid of cards.
    Results {
        /// Number of cards.
        count: usize,
    },
    /// Nothing matched.
    Empty,
}

/// Which record the detail view shows, and who opened it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionState {
    /// Record shown in the detail view.
    pub selected_record_id: Option<String>,
    /// Whether the detail view is open.
    pub is_detail_open: bool,
    /// Region that opened the detail view; focus returns there.
    pub activation_origin: Option<NodeId>,
}

#[derive(Copy, Clone, Debug)]
enum Content {
    List(NodeId),
    Empty(NodeId),
}

/// The pet gallery.
#[derive(Debug)]
pub struct Gallery {
    doc: Document,
    store: RecordStore,
    options: GalleryOptions,
    search: SearchPanel,
    results_region: NodeId,
    results_top: f64,
    content: Option<Content>,
    results: Selection,
    cards: Vec<MountedCard>,
    detail: DetailView,
    selection: SelectionState,
}

impl Gallery {
    /// Build a gallery over `store`, seeded from `options`.
    pub fn new(store: RecordStore, options: GalleryOptions) -> Self {
        let mut doc = Document::new(options.viewport.into());
        let body = doc.body();
        let width = doc.viewport().width;

        let header = doc.mount(
            body,
            Rect::new(0.0, 0.0, width, HEADER),
            Element::new(Role::Banner),
        );
        doc.mount(
            header,
            Rect::new(MARGIN, 24.0, width - MARGIN, 72.0),
            Element::new(Role::Heading(1)).text("Pet Adoption Gallery"),
        );
        doc.mount(
            header,
            Rect::new(MARGIN, 76.0, width - MARGIN, 100.0),
            Element::default().text("Find your perfect companion"),
        );

        let search = SearchPanel::mount(
            &mut doc,
            body,
            Rect::new(MARGIN, HEADER, width - MARGIN, HEADER + SearchPanel::HEIGHT),
            options.criteria(),
        );
        let results_top = HEADER + SearchPanel::HEIGHT + GAP;
        let results_region = doc.mount(
            body,
            Rect::new(MARGIN, results_top, width - MARGIN, results_top),
            Element::default().label("Available pets for adoption"),
        );
        let results = store.select(search.criteria());

        let mut gallery = Self {
            doc,
            store,
            options,
            search,
            results_region,
            results_top,
            content: None,
            results,
            cards: Vec::new(),
            detail: DetailView::new(),
            selection: SelectionState::default(),
        };
        gallery.render_results();
        if let Some(id) = gallery.options.initial_modal_pet_id.clone() {
            gallery.open_initial(&id);
        }
        gallery.doc.commit();
        gallery
    }

    fn open_initial(&mut self, id: &str) {
        let Some(record) = self.store.get(id) else {
            debug!(id, "initial detail record not found; staying closed");
            return;
        };
        self.selection = SelectionState {
            selected_record_id: Some(record.id.clone()),
            is_detail_open: true,
            activation_origin: None,
        };
        self.detail.open(&mut self.doc, record, None);
    }

    // --- queries ---

    /// The document.
    pub fn document(&self) -> &Document {
        &self.doc
    }

    /// The document, for driving it directly.
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.doc
    }

    /// The record store.
    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    /// Current criteria.
    pub fn criteria(&self) -> &FilterCriteria {
        self.search.criteria()
    }

    /// Current results.
    pub fn results(&self) -> &Selection {
        &self.results
    }

    /// What the results area shows.
    pub fn presentation(&self) -> Presentation {
        if self.results.is_empty() {
            Presentation::Empty
        } else {
            Presentation::Results {
                count: self.results.len(),
            }
        }
    }

    /// Detail view selection.
    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// The search panel.
    pub fn search(&self) -> &SearchPanel {
        &self.search
    }

    /// The detail view.
    pub fn detail(&self) -> &DetailView {
        &self.detail
    }

    /// Cards in the grid, in result order.
    pub fn cards(&self) -> &[MountedCard] {
        &self.cards
    }

    /// Record shown by the `index`-th card.
    pub fn record_at(&self, index: usize) -> Option<&PetRecord> {
        self.results.get(index)
    }

    /// The card showing record `id`.
    pub fn card_for(&self, id: &str) -> Option<NodeId> {
        self.cards
            .iter()
            .find(|c| c.record_id() == id)
            .map(MountedCard::root)
    }

    /// The result list region, while there are results.
    pub fn result_list(&self) -> Option<NodeId> {
        match self.content? {
            Content::List(n) => Some(n),
            Content::Empty(_) => None,
        }
    }

    /// The empty-state region, while nothing matches.
    pub fn empty_state(&self) -> Option<NodeId> {
        match self.content? {
            Content::Empty(n) => Some(n),
            Content::List(_) => None,
        }
    }

    // --- input ---

    /// Deliver a pointer click at `pt`.
    pub fn click(&mut self, pt: Point) -> ClickReport {
        let mut messages = Vec::new();
        let detail = &self.detail;
        let report = self.doc.click(pt, |step| {
            if let Some(reason) = detail.on_click(step) {
                messages.push(Message::CloseDetail(reason));
                return Outcome::StopAndConsume;
            }
            match step.widget {
                Some(Handler::Card(index)) if card::activates_on_click(step) => {
                    messages.push(Message::OpenDetail {
                        index,
                        origin: Some(step.node),
                    });
                    Outcome::StopAndConsume
                }
                Some(handler) if step.phase == Phase::Target => match button_message(handler) {
                    Some(message) => {
                        messages.push(message);
                        Outcome::StopAndConsume
                    }
                    None => Outcome::Continue,
                },
                _ => Outcome::Continue,
            }
        });
        for message in messages {
            self.update(message);
        }
        report
    }

    /// Deliver a key press.
    pub fn key_down(&mut self, event: impl Into<KeyEvent>) -> KeyReport {
        let mut messages = Vec::new();
        let search_text = self.search.criteria().search_text.clone();
        let report = self.doc.key_down(event.into(), |step, ctx| match step.widget {
            Some(Handler::Card(index)) => match card::key_activation(step, ctx) {
                Some(outcome) => {
                    messages.push(Message::OpenDetail {
                        index,
                        origin: Some(step.node),
                    });
                    outcome
                }
                None => Outcome::Continue,
            },
            Some(Handler::SearchInput) if step.phase == Phase::Target => {
                match search::edit_text(&search_text, ctx.event()) {
                    Some(text) => {
                        ctx.prevent_default();
                        messages.push(Message::SearchChanged(text));
                        Outcome::StopAndConsume
                    }
                    None => Outcome::Continue,
                }
            }
            Some(handler) if step.phase == Phase::Target && ctx.event().is_activation() => {
                match button_message(handler) {
                    Some(message) => {
                        ctx.prevent_default();
                        messages.push(message);
                        Outcome::StopAndConsume
                    }
                    None => Outcome::Continue,
                }
            }
            _ => Outcome::Continue,
        });
        for notice in &report.notices {
            if let Some(reason) = self.detail.on_notice(notice) {
                messages.push(Message::CloseDetail(reason));
            }
        }
        for message in messages {
            self.update(message);
        }
        report
    }

    /// Type `text` into the focused region, one key per character.
    pub fn type_text(&mut self, text: &str) {
        for c in text.chars() {
            let key = if c == ' ' { Key::Space } else { Key::Character(c) };
            self.key_down(key);
        }
    }

    /// Run deferred work, such as the detail view's initial focus move.
    pub fn tick(&mut self) -> usize {
        self.doc.run_ticks()
    }

    // --- state ---

    /// Apply a state change.
    pub fn update(&mut self, message: Message) {
        trace!(?message, "update");
        match message {
            Message::SearchChanged(text) => {
                self.search.set_search_text(&mut self.doc, text);
                self.refilter();
            }
            Message::SpeciesSelected(choice) => {
                self.search.set_species(&mut self.doc, choice);
                self.refilter();
            }
            Message::StatusSelected(choice) => {
                self.search.set_status(&mut self.doc, choice);
                self.refilter();
            }
            Message::ClearSearch => {
                self.search.clear_search(&mut self.doc);
                self.refilter();
            }
            Message::ClearFilters => {
                self.search.clear_all(&mut self.doc);
                self.refilter();
            }
            Message::OpenDetail { index, origin } => {
                let Some(record) = self.results.get(index) else {
                    debug!(index, "activated card is no longer in the results");
                    return;
                };
                self.selection = SelectionState {
                    selected_record_id: Some(record.id.clone()),
                    is_detail_open: true,
                    activation_origin: origin,
                };
                self.detail.open(&mut self.doc, record, origin);
            }
            Message::CloseDetail(reason) => {
                if !self.detail.is_open() {
                    return;
                }
                let restored = self.detail.close(&mut self.doc);
                debug!(?reason, ?restored, "detail view dismissed");
                self.selection = SelectionState::default();
            }
        }
        self.doc.commit();
    }

    fn refilter(&mut self) {
        self.results = self.store.select(self.search.criteria());
        debug!(count = self.results.len(), "results recomputed");
        self.render_results();
    }

    fn render_results(&mut self) {
        if let Some(content) = self.content.take() {
            let (Content::List(node) | Content::Empty(node)) = content;
            self.doc.unmount(node);
        }
        self.cards.clear();
        self.search.announce(&mut self.doc, self.results.len());

        let width = self.doc.viewport().width;
        let (x0, x1) = (MARGIN, width - MARGIN);
        let top = self.results_top;

        if self.results.is_empty() {
            let empty = self.doc.mount(
                self.results_region,
                Rect::new(x0, top, x1, top + 200.0),
                Element::new(Role::Status).live(Live::Polite),
            );
            self.doc.mount(
                empty,
                Rect::new(x0, top + 64.0, x1, top + 104.0),
                Element::new(Role::Heading(3)).text("No pets found"),
            );
            self.doc.mount(
                empty,
                Rect::new(x0, top + 112.0, x1, top + 136.0),
                Element::default().text("Try adjusting your search or filter criteria"),
            );
            self.content = Some(Content::Empty(empty));
            return;
        }

        let columns = self.options.columns_for(x1 - x0, GAP);
        let rows = self.results.len().div_ceil(columns);
        let card_width = (x1 - x0 - (columns - 1) as f64 * GAP) / columns as f64;
        let height = rows as f64 * (CARD_HEIGHT + GAP) - GAP;
        let list = self.doc.mount(
            self.results_region,
            Rect::new(x0, top, x1, top + height),
            Element::new(Role::List).label(announce::results_label(self.results.len())),
        );
        for (i, record) in self.results.iter().enumerate() {
            let x = x0 + (i % columns) as f64 * (card_width + GAP);
            let y = top + (i / columns) as f64 * (CARD_HEIGHT + GAP);
            let cell = Rect::new(x, y, x + card_width, y + CARD_HEIGHT);
            let item = self.doc.mount(list, cell, Element::new(Role::ListItem));
            let card = Card::new(record)
                .on_activate(Handler::Card(i))
                .mount(&mut self.doc, item, cell);
            self.cards.push(card);
        }
        self.content = Some(Content::List(list));
    }
}

fn button_message(handler: Handler) -> Option<Message> {
    match handler {
        Handler::CloseDetail => Some(Message::CloseDetail(CloseReason::Button)),
        Handler::ClearSearch => Some(Message::ClearSearch),
        Handler::ClearFilters => Some(Message::ClearFilters),
        Handler::Species(choice) => Some(Message::SpeciesSelected(choice)),
        Handler::Status(choice) => Some(Message::StatusSelected(choice)),
        Handler::Card(_) | Handler::Backdrop | Handler::SearchInput => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detail::TITLE_ID;
    use crate::search::CLEAR_FILTERS_LABEL;

    fn gallery() -> Gallery {
        Gallery::new(RecordStore::sample(), GalleryOptions::default())
    }

    fn center(g: &Gallery, node: NodeId) -> Point {
        g.document().center_of(node).unwrap()
    }

    fn text(g: &Gallery, node: NodeId) -> Option<String> {
        g.document().element(node)?.text.clone()
    }

    fn open_by_click(g: &mut Gallery, id: &str) -> NodeId {
        let card = g.card_for(id).unwrap();
        let at = center(g, card);
        g.click(at);
        card
    }

    #[test]
    fn page_chrome_names_the_gallery() {
        let g = gallery();
        let doc = g.document();
        let texts: Vec<_> = doc
            .scene()
            .descendants(doc.body())
            .into_iter()
            .filter_map(|n| Some((doc.element(n)?.role, text(&g, n)?)))
            .collect();
        assert!(texts.contains(&(Role::Heading(1), "Pet Adoption Gallery".to_owned())));
        assert!(texts.contains(&(Role::Generic, "Find your perfect companion".to_owned())));
        assert_eq!(
            doc.element(g.results_region).unwrap().label.as_deref(),
            Some("Available pets for adoption")
        );
        assert_eq!(doc.find_by_id("pet-search-input"), Some(g.search().input()));
    }

    #[test]
    fn starts_with_every_record_in_order() {
        let g = gallery();
        assert_eq!(g.results().ids(), ["1", "2", "3"]);
        assert_eq!(g.presentation(), Presentation::Results { count: 3 });
        let list = g.result_list().unwrap();
        assert_eq!(
            g.document().element(list).unwrap().label.as_deref(),
            Some("3 pets found")
        );
        assert_eq!(
            text(&g, g.search().live_region()).as_deref(),
            Some("3 pets found")
        );
        assert!(g.cards().iter().all(MountedCard::is_interactive));
        assert!(!g.selection().is_detail_open);
    }

    #[test]
    fn pending_status_button_selects_thumper() {
        let mut g = gallery();
        let pending = g
            .search()
            .status_button(Choice::Only(AdoptionStatus::Pending))
            .unwrap();
        g.click(center(&g, pending));
        assert_eq!(g.results().ids(), ["3"]);
        assert_eq!(g.document().element(pending).unwrap().pressed, Some(true));
        assert_eq!(g.cards().len(), 1);
        assert_eq!(
            text(&g, g.search().live_region()).as_deref(),
            Some("1 pet found")
        );
    }

    #[test]
    fn typing_a_missing_term_shows_the_empty_state() {
        let mut g = gallery();
        g.click(center(&g, g.search().input()));
        assert_eq!(g.document().focused(), Some(g.search().input()));
        g.type_text("nonexistent");
        assert_eq!(g.criteria().search_text, "nonexistent");
        assert!(g.results().is_empty());
        assert_eq!(g.presentation(), Presentation::Empty);
        assert!(g.result_list().is_none());
        let empty = g.empty_state().unwrap();
        let texts: Vec<_> = g
            .document()
            .scene()
            .descendants(empty)
            .into_iter()
            .filter_map(|n| text(&g, n))
            .collect();
        assert_eq!(
            texts,
            ["No pets found", "Try adjusting your search or filter criteria"]
        );
        assert_eq!(
            text(&g, g.search().live_region()).as_deref(),
            Some("No pets found matching your search criteria")
        );
    }

    #[test]
    fn spaces_in_the_search_box_do_not_scroll() {
        let mut g = gallery();
        g.click(center(&g, g.search().input()));
        g.type_text("lap cat");
        assert_eq!(g.results().ids(), ["2"]);
        assert_eq!(g.document().scroll_y(), 0.0);
    }

    #[test]
    fn every_criteria_change_recomputes_results() {
        let mut g = gallery();
        g.update(Message::SpeciesSelected(Choice::Only(Species::Cat)));
        assert_eq!(g.results().ids(), ["2"]);
        assert!(g.card_for("1").is_none());
        g.update(Message::SearchChanged("luna".into()));
        assert!(g.results().is_empty());
        g.update(Message::SpeciesSelected(Choice::All));
        assert_eq!(g.results().ids(), ["1"]);
        g.update(Message::ClearSearch);
        assert_eq!(g.results().ids(), ["1", "2", "3"]);
    }

    #[test]
    fn clear_all_button_resets_filters_and_focuses_search() {
        let mut g = Gallery::new(
            RecordStore::sample(),
            GalleryOptions::default()
                .with_search_query("zzz")
                .with_status(AdoptionStatus::Adopted),
        );
        assert_eq!(g.presentation(), Presentation::Empty);
        let clear = g.document().find_by_label(CLEAR_FILTERS_LABEL).unwrap();
        g.click(center(&g, clear));
        assert_eq!(g.criteria(), &FilterCriteria::new());
        assert_eq!(g.results().len(), 3);
        assert_eq!(g.document().focused(), Some(g.search().input()));
        assert!(g.search().clear_filters_button().is_none());
    }

    #[test]
    fn card_click_opens_detail_and_escape_restores_focus() {
        let mut g = gallery();
        let card = open_by_click(&mut g, "1");
        assert_eq!(
            g.selection(),
            &SelectionState {
                selected_record_id: Some("1".into()),
                is_detail_open: true,
                activation_origin: Some(card),
            }
        );
        let nodes = g.detail().nodes().unwrap();
        assert_eq!(g.document().focused(), Some(card));
        assert_eq!(g.tick(), 1);
        assert_eq!(g.document().focused(), Some(nodes.close));
        assert!(g.document().is_scroll_locked());

        g.key_down(Key::Escape);
        assert!(!g.detail().is_open());
        assert_eq!(g.selection(), &SelectionState::default());
        assert_eq!(g.document().focused(), Some(card));
        assert!(!g.document().is_scroll_locked());
        assert_eq!(g.document().listener_count(), 0);
        assert!(!g.document().is_mounted(nodes.root));
    }

    #[test]
    fn enter_and_space_open_the_focused_card() {
        for key in [Key::Enter, Key::Space] {
            let mut g = gallery();
            let card = g.card_for("3").unwrap();
            assert!(g.document_mut().focus(card));
            let report = g.key_down(key);
            assert!(report.default_prevented);
            assert_eq!(g.document().scroll_y(), 0.0);
            assert_eq!(g.detail().record().map(|r| r.name.as_str()), Some("Thumper"));
            assert_eq!(g.selection().activation_origin, Some(card));
        }
    }

    #[test]
    fn tab_stays_inside_the_open_detail_view() {
        let mut g = gallery();
        open_by_click(&mut g, "2");
        g.tick();
        let nodes = g.detail().nodes().unwrap();
        for _ in 0..3 {
            g.key_down(KeyEvent::new(Key::Tab));
            assert_eq!(g.document().focused(), Some(nodes.close));
            g.key_down(KeyEvent::new(Key::Tab).with_shift());
            assert_eq!(g.document().focused(), Some(nodes.close));
        }
    }

    #[test]
    fn panel_clicks_keep_the_view_open_backdrop_clicks_close_it() {
        let mut g = gallery();
        let card = open_by_click(&mut g, "2");
        g.tick();
        let nodes = g.detail().nodes().unwrap();
        let title = g.document().find_by_id(TITLE_ID).unwrap();
        g.click(center(&g, title));
        assert!(g.detail().is_open());
        g.click(Point::new(4.0, 4.0));
        assert!(!g.detail().is_open());
        assert!(!g.document().is_mounted(nodes.backdrop));
        assert_eq!(g.document().focused(), Some(card));
    }

    #[test]
    fn clicks_behind_the_dialog_do_not_reach_the_page() {
        let mut g = gallery();
        open_by_click(&mut g, "1");
        let other = g.card_for("3").unwrap();
        let before = g.selection().clone();
        // The backdrop covers the card, so this closes instead of opening Thumper.
        g.click(center(&g, other));
        assert_ne!(g.selection(), &before);
        assert!(!g.detail().is_open());
    }

    #[test]
    fn close_button_works_by_click_and_by_keyboard() {
        let mut g = gallery();
        let card = open_by_click(&mut g, "1");
        g.tick();
        let close = g.detail().nodes().unwrap().close;
        g.click(center(&g, close));
        assert!(!g.detail().is_open());
        assert_eq!(g.document().focused(), Some(card));

        open_by_click(&mut g, "1");
        g.tick();
        g.key_down(Key::Enter);
        assert!(!g.detail().is_open());
        assert_eq!(g.document().focused(), Some(card));
    }

    #[test]
    fn initial_modal_id_opens_without_origin() {
        let mut g = Gallery::new(
            RecordStore::sample(),
            GalleryOptions::default().with_modal_pet("2"),
        );
        assert!(g.detail().is_open());
        assert_eq!(g.selection().selected_record_id.as_deref(), Some("2"));
        assert_eq!(g.selection().activation_origin, None);
        g.tick();
        g.key_down(Key::Escape);
        assert!(!g.detail().is_open());
        assert_eq!(g.document().focused(), None);
    }

    #[test]
    fn unknown_initial_modal_id_is_ignored() {
        let g = Gallery::new(
            RecordStore::sample(),
            GalleryOptions::default().with_modal_pet("404"),
        );
        assert!(!g.detail().is_open());
        assert_eq!(g.document().listener_count(), 0);
        assert_eq!(g.document().pending_ticks(), 0);
    }

    #[test]
    fn closing_before_the_tick_leaves_focus_at_the_origin() {
        let mut g = gallery();
        let card = open_by_click(&mut g, "1");
        g.key_down(Key::Escape);
        assert_eq!(g.tick(), 1);
        assert_eq!(g.document().focused(), Some(card));
    }

    #[test]
    fn narrow_viewport_stacks_cards() {
        let g = Gallery::new(
            RecordStore::sample(),
            GalleryOptions::default().with_viewport(400.0, 800.0),
        );
        let xs: Vec<f64> = g
            .cards()
            .iter()
            .map(|c| g.document().scene().world_bounds(c.root()).unwrap().x0)
            .collect();
        assert_eq!(xs, [MARGIN, MARGIN, MARGIN]);
    }
}
