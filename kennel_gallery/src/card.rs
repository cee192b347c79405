// Copyright 2025 the Kennel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The card presenter: one record as a static article or an activatable button.
//!
//! A card built with [`Card::on_activate`] becomes a Tab stop with the button role
//! and an accessible name summarizing the record. Enter and Space activate it, and
//! the press's default action (Space scrolls the page) is suppressed. Without a
//! handler the card is plain content with no Tab stop.
//!
//! Either way the card carries a status indicator labelled `"{Status} for adoption"`.

use kennel_records::PetRecord;
use kennel_responder::types::{Outcome, Phase};
use kennel_scene::NodeId;
use kurbo::Rect;

use crate::document::{Document, KeyContext, Step};
use crate::element::{Element, Handler, Role};

/// Height of the photo strip at the top of a card.
pub const IMAGE_HEIGHT: f64 = 256.0;
const PADDING: f64 = 24.0;
const LINE: f64 = 28.0;

/// Accessible name of an interactive card.
///
/// ```
/// use kennel_gallery::card::accessible_label;
/// use kennel_records::RecordStore;
///
/// let store = RecordStore::sample();
/// let thumper = store.get("3").unwrap();
/// assert_eq!(
///     accessible_label(thumper),
///     "View details for Thumper, rabbit, 2 years old, Holland Lop, Pending for adoption",
/// );
/// ```
pub fn accessible_label(record: &PetRecord) -> String {
    format!(
        "View details for {}, {}, {}, {}, {}",
        record.name,
        record.species,
        record.age_phrase(),
        record.breed,
        record.adoption_status.label(),
    )
}

/// Id of the element holding a card's body text.
pub fn description_id(record: &PetRecord) -> String {
    format!("pet-description-{}", record.id)
}

/// A card about to be mounted.
#[derive(Clone, Debug)]
pub struct Card<'a> {
    record: &'a PetRecord,
    on_activate: Option<Handler>,
}

impl<'a> Card<'a> {
    /// A static card for `record`.
    pub fn new(record: &'a PetRecord) -> Self {
        Self {
            record,
            on_activate: None,
        }
    }

    /// Make the card interactive; activation is reported as `handler`.
    pub fn on_activate(mut self, handler: Handler) -> Self {
        self.on_activate = Some(handler);
        self
    }

    /// Mount the card's regions under `parent`, filling `bounds`.
    pub fn mount(self, doc: &mut Document, parent: NodeId, bounds: Rect) -> MountedCard {
        let record = self.record;
        let described_by = description_id(record);
        let root_element = match self.on_activate {
            Some(handler) => Element::new(Role::Button)
                .tab_index(0)
                .label(accessible_label(record))
                .on(handler),
            None => Element::new(Role::Article),
        }
        .id(format!("pet-card-{}", record.id))
        .described_by(described_by.clone());
        let root = doc.mount(parent, bounds, root_element);

        let image_bounds = Rect::new(bounds.x0, bounds.y0, bounds.x1, bounds.y0 + IMAGE_HEIGHT);
        let image = doc.mount(
            root,
            image_bounds,
            Element::new(Role::Image).label(record.image_alt()),
        );
        let status = record.adoption_status;
        doc.mount(
            image,
            Rect::new(
                image_bounds.x1 - 120.0,
                image_bounds.y0 + 16.0,
                image_bounds.x1 - 16.0,
                image_bounds.y0 + 44.0,
            ),
            Element::new(Role::Status)
                .label(status.label())
                .text(status.capitalized()),
        );

        // The body holds every text line; its id is what the root's description reads.
        let body = doc.mount(
            root,
            Rect::new(bounds.x0, image_bounds.y1, bounds.x1, bounds.y1),
            Element::default().id(described_by),
        );
        let x0 = bounds.x0 + PADDING;
        let x1 = bounds.x1 - PADDING;
        let mut y = image_bounds.y1 + PADDING;
        let mut line = |doc: &mut Document, element: Element| {
            doc.mount(body, Rect::new(x0, y, x1, y + LINE), element);
            y += LINE;
        };
        line(doc, Element::new(Role::Heading(3)).text(record.name.clone()));
        line(
            doc,
            Element::default().text(format!(
                "{} • {}",
                capitalize(record.species.as_str()),
                record.age_phrase()
            )),
        );
        line(doc, Element::default().text(record.breed.clone()));
        line(doc, Element::default().text(record.description.clone()));
        line(
            doc,
            Element::default().text(format!("Location: {}", record.shelter_location)),
        );

        MountedCard {
            root,
            record_id: record.id.clone(),
            interactive: self.on_activate.is_some(),
        }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// A card in the document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MountedCard {
    root: NodeId,
    record_id: String,
    interactive: bool,
}

impl MountedCard {
    /// The card's root region; the Tab stop when interactive.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Id of the record shown.
    pub fn record_id(&self) -> &str {
        &self.record_id
    }

    /// Whether the card activates.
    pub fn is_interactive(&self) -> bool {
        self.interactive
    }
}

/// Whether a pointer step activates the card whose handler it carries.
///
/// Clicks anywhere inside the card reach its root at the target or bubble phase.
pub fn activates_on_click(step: &Step) -> bool {
    step.phase != Phase::Capture
}

/// React to a key press on a card's root; `Some` when the card activates.
///
/// Enter and Space both activate, and both suppress the default action.
pub fn key_activation(step: &Step, ctx: &mut KeyContext) -> Option<Outcome> {
    if step.phase != Phase::Target || !ctx.event().is_activation() {
        return None;
    }
    ctx.prevent_default();
    Some(Outcome::StopAndConsume)
}
