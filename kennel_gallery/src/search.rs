// Copyright 2025 the Kennel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The search panel: the controls that edit [`FilterCriteria`].
//!
//! The panel owns the criteria and keeps its regions in step with them: the input's
//! text, `aria-pressed` on the species and status buttons, the clear-search button
//! (present only while there is search text), and the active-filter badge with its
//! "Clear all search filters" button (present only while a filter is active). The
//! results live region is updated by whoever recomputes the results.

use kennel_records::{AdoptionStatus, Choice, FilterCriteria, Species, announce};
use kennel_scene::NodeId;
use kurbo::Rect;
use tracing::trace;

use crate::document::Document;
use crate::element::{Element, Handler, Live, Role};
use crate::key::{Key, KeyEvent};

/// Accessible name of the search input.
pub const SEARCH_LABEL: &str = "Search pets by name, breed, description, or location";
/// Accessible name of the button that resets every filter.
pub const CLEAR_FILTERS_LABEL: &str = "Clear all search filters";
/// Accessible name of the button that empties the search input.
pub const CLEAR_SEARCH_LABEL: &str = "Clear search";
/// Document id of the search input.
pub const INPUT_ID: &str = "pet-search-input";
/// Document id of the hint describing the search input.
pub const HINT_ID: &str = "search-description";
/// Screen-reader hint read after the input's name.
pub const SEARCH_HINT: &str =
    "Enter keywords to search pets by name, breed, description, or shelter location";

const PADDING: f64 = 24.0;
const ROW: f64 = 48.0;
const GAP: f64 = 16.0;

/// Text of a species filter button.
pub fn species_text(choice: Choice<Species>) -> &'static str {
    match choice {
        Choice::All => "All",
        Choice::Only(s) => s.plural_label(),
    }
}

/// Text of a status filter button.
pub fn status_text(choice: Choice<AdoptionStatus>) -> &'static str {
    match choice {
        Choice::All => "All Statuses",
        Choice::Only(s) => s.capitalized(),
    }
}

/// The input's text after `key`, or `None` when the key does not edit text.
pub fn edit_text(current: &str, key: &KeyEvent) -> Option<String> {
    match key.key {
        Key::Character(c) => {
            let mut s = current.to_owned();
            s.push(c);
            Some(s)
        }
        Key::Space => Some(format!("{current} ")),
        Key::Backspace => {
            let mut s = current.to_owned();
            s.pop();
            Some(s)
        }
        _ => None,
    }
}

/// The mounted search panel.
#[derive(Debug)]
pub struct SearchPanel {
    criteria: FilterCriteria,
    region: NodeId,
    input_row: NodeId,
    input_rect: Rect,
    input: NodeId,
    clear_search: Option<NodeId>,
    species: Vec<(Choice<Species>, NodeId)>,
    status: Vec<(Choice<AdoptionStatus>, NodeId)>,
    summary_row: NodeId,
    summary_rect: Rect,
    live: NodeId,
    badge: Option<NodeId>,
    clear_filters: Option<NodeId>,
}

impl SearchPanel {
    /// Height the panel needs.
    pub const HEIGHT: f64 = PADDING * 2.0 + ROW * 5.0 + GAP * 4.0;

    /// Mount the panel under `parent`, starting from `criteria`.
    pub fn mount(
        doc: &mut Document,
        parent: NodeId,
        bounds: Rect,
        criteria: FilterCriteria,
    ) -> Self {
        let region = doc.mount(
            parent,
            bounds,
            Element::new(Role::Search).label("Search and filter pets"),
        );
        let x0 = bounds.x0 + PADDING;
        let x1 = bounds.x1 - PADDING;
        let row = |i: u32| {
            let y = bounds.y0 + PADDING + f64::from(i) * (ROW + GAP);
            Rect::new(x0, y, x1, y + ROW)
        };

        doc.mount(
            region,
            row(0),
            Element::new(Role::Heading(2)).text("Search and filter pets"),
        );

        let input_row = doc.mount(region, row(1), Element::default());
        let input = doc.mount(
            input_row,
            row(1),
            Element::new(Role::SearchBox)
                .id(INPUT_ID)
                .label(SEARCH_LABEL)
                .described_by(HINT_ID)
                .text(criteria.search_text.clone())
                .tab_index(0)
                .on(Handler::SearchInput),
        );

        let hint = row(1);
        doc.mount(
            region,
            Rect::new(hint.x0, hint.y1, hint.x1, hint.y1),
            Element::default().id(HINT_ID).text(SEARCH_HINT),
        );

        let species_row = doc.mount(
            region,
            row(2),
            Element::new(Role::Group).label("Filter by pet type"),
        );
        let choices = core::iter::once(Choice::All).chain(Species::ALL.map(Choice::Only));
        let species = buttons(doc, species_row, row(2), 120.0, choices, |c| {
            Element::new(Role::Button)
                .text(species_text(c))
                .tab_index(0)
                .on(Handler::Species(c))
        });

        let status_row = doc.mount(
            region,
            row(3),
            Element::new(Role::Group).label("Filter by adoption status"),
        );
        let choices = core::iter::once(Choice::All).chain(AdoptionStatus::ALL.map(Choice::Only));
        let status = buttons(doc, status_row, row(3), 150.0, choices, |c| {
            Element::new(Role::Button)
                .text(status_text(c))
                .tab_index(0)
                .on(Handler::Status(c))
        });

        let summary_row = doc.mount(region, row(4), Element::default());
        let summary = row(4);
        let live = doc.mount(
            summary_row,
            Rect::new(summary.x0, summary.y0, summary.center().x, summary.y1),
            Element::new(Role::Status)
                .id("search-results")
                .live(Live::Polite),
        );

        let mut panel = Self {
            criteria,
            region,
            input_row,
            input_rect: row(1),
            input,
            clear_search: None,
            species,
            status,
            summary_row,
            summary_rect: summary,
            live,
            badge: None,
            clear_filters: None,
        };
        panel.sync(doc);
        panel
    }

    /// Current criteria.
    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// The panel's landmark region.
    pub fn region(&self) -> NodeId {
        self.region
    }

    /// The search input.
    pub fn input(&self) -> NodeId {
        self.input
    }

    /// The clear-search button, while there is search text.
    pub fn clear_search_button(&self) -> Option<NodeId> {
        self.clear_search
    }

    /// The clear-all button, while any filter is active.
    pub fn clear_filters_button(&self) -> Option<NodeId> {
        self.clear_filters
    }

    /// The active-filter badge, while any filter is active.
    pub fn badge(&self) -> Option<NodeId> {
        self.badge
    }

    /// The button selecting `choice` as species filter.
    pub fn species_button(&self, choice: Choice<Species>) -> Option<NodeId> {
        self.species.iter().find(|(c, _)| *c == choice).map(|(_, n)| *n)
    }

    /// The button selecting `choice` as status filter.
    pub fn status_button(&self, choice: Choice<AdoptionStatus>) -> Option<NodeId> {
        self.status.iter().find(|(c, _)| *c == choice).map(|(_, n)| *n)
    }

    /// The live region announcing result counts.
    pub fn live_region(&self) -> NodeId {
        self.live
    }

    /// Replace the search text.
    pub fn set_search_text(&mut self, doc: &mut Document, text: String) {
        self.criteria.search_text = text;
        self.sync(doc);
    }

    /// Select a species filter.
    pub fn set_species(&mut self, doc: &mut Document, choice: Choice<Species>) {
        self.criteria.species = choice;
        self.sync(doc);
    }

    /// Select a status filter.
    pub fn set_status(&mut self, doc: &mut Document, choice: Choice<AdoptionStatus>) {
        self.criteria.status = choice;
        self.sync(doc);
    }

    /// Empty the search text and return focus to the input.
    pub fn clear_search(&mut self, doc: &mut Document) {
        self.criteria.search_text.clear();
        self.sync(doc);
        doc.focus(self.input);
    }

    /// Reset every filter and return focus to the input.
    pub fn clear_all(&mut self, doc: &mut Document) {
        self.criteria = FilterCriteria::new();
        self.sync(doc);
        doc.focus(self.input);
    }

    /// Announce a new result count.
    pub fn announce(&self, doc: &mut Document, count: usize) {
        let message = announce::results_announcement(count);
        trace!(%message, "announce");
        doc.update(self.live, |e| e.text = Some(message));
    }

    fn sync(&mut self, doc: &mut Document) {
        let text = self.criteria.search_text.clone();
        doc.update(self.input, |e| e.text = Some(text));
        for &(choice, node) in &self.species {
            let pressed = self.criteria.species == choice;
            doc.update(node, |e| e.pressed = Some(pressed));
        }
        for &(choice, node) in &self.status {
            let pressed = self.criteria.status == choice;
            doc.update(node, |e| e.pressed = Some(pressed));
        }

        let input_bounds = self.input_rect;
        toggle(
            doc,
            &mut self.clear_search,
            !self.criteria.search_text.is_empty(),
            || {
                (
                    self.input_row,
                    Rect::new(
                        input_bounds.x1 - 56.0,
                        input_bounds.y0 + 8.0,
                        input_bounds.x1 - 8.0,
                        input_bounds.y1 - 8.0,
                    ),
                    Element::new(Role::Button)
                        .label(CLEAR_SEARCH_LABEL)
                        .tab_index(0)
                        .on(Handler::ClearSearch),
                )
            },
        );

        let active = self.criteria.active_filter_count();
        let summary = self.summary_rect;
        let mid = summary.center().x;
        match self.badge {
            Some(badge) if active > 0 => doc.update(badge, |e| {
                e.label = Some(announce::active_filters_label(active));
                e.text = Some(announce::filters_badge(active));
            }),
            _ => toggle(doc, &mut self.badge, active > 0, || {
                (
                    self.summary_row,
                    Rect::new(mid, summary.y0, mid + 120.0, summary.y1),
                    Element::default()
                        .label(announce::active_filters_label(active))
                        .text(announce::filters_badge(active)),
                )
            }),
        }
        toggle(doc, &mut self.clear_filters, active > 0, || {
            (
                self.summary_row,
                Rect::new(mid + 136.0, summary.y0, summary.x1, summary.y1),
                Element::new(Role::Button)
                    .label(CLEAR_FILTERS_LABEL)
                    .text("Clear Filters")
                    .tab_index(0)
                    .on(Handler::ClearFilters),
            )
        });
    }
}

fn buttons<T: Copy>(
    doc: &mut Document,
    parent: NodeId,
    row: Rect,
    width: f64,
    choices: impl Iterator<Item = T>,
    element: impl Fn(T) -> Element,
) -> Vec<(T, NodeId)> {
    let mut x = row.x0;
    choices
        .map(|c| {
            let node = doc.mount(parent, Rect::new(x, row.y0, x + width, row.y1), element(c));
            x += width + GAP;
            (c, node)
        })
        .collect()
}

/// Mount or unmount an optional region so that it exists exactly when `present`.
fn toggle(
    doc: &mut Document,
    slot: &mut Option<NodeId>,
    present: bool,
    build: impl FnOnce() -> (NodeId, Rect, Element),
) {
    match (*slot, present) {
        (None, true) => {
            let (parent, bounds, element) = build();
            *slot = Some(doc.mount(parent, bounds, element));
        }
        (Some(node), false) => {
            doc.unmount(node);
            *slot = None;
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Size;

    fn panel(criteria: FilterCriteria) -> (Document, SearchPanel) {
        let mut doc = Document::new(Size::new(1024.0, 768.0));
        let body = doc.body();
        let panel = SearchPanel::mount(
            &mut doc,
            body,
            Rect::new(0.0, 0.0, 1024.0, SearchPanel::HEIGHT),
            criteria,
        );
        (doc, panel)
    }

    fn pressed(doc: &Document, node: Option<NodeId>) -> Option<bool> {
        doc.element(node?)?.pressed
    }

    #[test]
    fn fresh_panel_has_no_conditional_controls() {
        let (doc, p) = panel(FilterCriteria::new());
        assert!(p.clear_search_button().is_none());
        assert!(p.clear_filters_button().is_none());
        assert!(p.badge().is_none());
        assert_eq!(pressed(&doc, p.species_button(Choice::All)), Some(true));
        assert_eq!(
            pressed(&doc, p.species_button(Choice::Only(Species::Dog))),
            Some(false)
        );
        assert_eq!(pressed(&doc, p.status_button(Choice::All)), Some(true));
    }

    #[test]
    fn input_is_named_and_described() {
        let (doc, p) = panel(FilterCriteria::new());
        let input = doc.element(p.input()).unwrap();
        assert_eq!(input.dom_id.as_deref(), Some("pet-search-input"));
        assert_eq!(input.label.as_deref(), Some(SEARCH_LABEL));
        assert_eq!(input.described_by.as_deref(), Some("search-description"));
        let hint = doc.find_by_id("search-description").unwrap();
        assert_eq!(
            doc.element(hint).unwrap().text.as_deref(),
            Some("Enter keywords to search pets by name, breed, description, or shelter location")
        );
        let heading = doc
            .scene()
            .children(p.region())
            .iter()
            .find_map(|&n| doc.element(n).filter(|e| e.role == Role::Heading(2)))
            .unwrap();
        assert_eq!(heading.text.as_deref(), Some("Search and filter pets"));
    }

    #[test]
    fn filters_toggle_pressed_state_and_badge() {
        let (mut doc, mut p) = panel(FilterCriteria::new());
        p.set_species(&mut doc, Choice::Only(Species::Cat));
        assert_eq!(
            pressed(&doc, p.species_button(Choice::Only(Species::Cat))),
            Some(true)
        );
        assert_eq!(pressed(&doc, p.species_button(Choice::All)), Some(false));
        let badge = p.badge().unwrap();
        assert_eq!(
            doc.element(badge).unwrap().label.as_deref(),
            Some("1 active filter")
        );

        p.set_status(&mut doc, Choice::Only(AdoptionStatus::Pending));
        assert_eq!(p.badge(), Some(badge));
        assert_eq!(doc.element(badge).unwrap().text.as_deref(), Some("2 filters"));
        let clear = p.clear_filters_button().unwrap();
        let clear = doc.element(clear).unwrap();
        assert_eq!(clear.label.as_deref(), Some(CLEAR_FILTERS_LABEL));
        assert_eq!(clear.text.as_deref(), Some("Clear Filters"));
    }

    #[test]
    fn clear_search_appears_with_text_and_refocuses_input() {
        let (mut doc, mut p) = panel(FilterCriteria::new());
        p.set_search_text(&mut doc, "lu".into());
        let clear = p.clear_search_button().unwrap();
        assert!(doc.focus(clear));
        p.clear_search(&mut doc);
        assert!(p.criteria().search_text.is_empty());
        assert!(p.clear_search_button().is_none());
        assert!(!doc.is_mounted(clear));
        assert_eq!(doc.focused(), Some(p.input()));
    }

    #[test]
    fn clear_all_resets_everything() {
        let (mut doc, mut p) = panel(
            FilterCriteria::new()
                .with_search_text("a")
                .with_species(Species::Dog)
                .with_status(AdoptionStatus::Adopted),
        );
        assert_eq!(
            doc.element(p.badge().unwrap()).unwrap().text.as_deref(),
            Some("3 filters")
        );
        p.clear_all(&mut doc);
        assert_eq!(p.criteria(), &FilterCriteria::new());
        assert!(p.badge().is_none());
        assert_eq!(doc.focused(), Some(p.input()));
        assert_eq!(doc.element(p.input()).unwrap().text.as_deref(), Some(""));
    }

    #[test]
    fn conditional_buttons_keep_document_order() {
        let (mut doc, mut p) = panel(FilterCriteria::new());
        p.set_search_text(&mut doc, "x".into());
        let order = doc.tab_order();
        assert_eq!(order[0], p.input());
        assert_eq!(order[1], p.clear_search_button().unwrap());
        assert_eq!(order.last().copied(), p.clear_filters_button());
    }

    #[test]
    fn editing_keys() {
        assert_eq!(edit_text("lu", &KeyEvent::new(Key::Character('n'))).as_deref(), Some("lun"));
        assert_eq!(edit_text("lu", &KeyEvent::new(Key::Backspace)).as_deref(), Some("l"));
        assert_eq!(edit_text("", &KeyEvent::new(Key::Backspace)).as_deref(), Some(""));
        assert_eq!(edit_text("a", &KeyEvent::new(Key::Space)).as_deref(), Some("a "));
        assert_eq!(edit_text("a", &KeyEvent::new(Key::Enter)), None);
    }

    #[test]
    fn announcements_land_in_the_live_region() {
        let (mut doc, p) = panel(FilterCriteria::new());
        p.announce(&mut doc, 0);
        let live = doc.element(p.live_region()).unwrap();
        assert_eq!(live.live, Some(Live::Polite));
        assert_eq!(
            live.text.as_deref(),
            Some("No pets found matching your search criteria")
        );
    }
}
