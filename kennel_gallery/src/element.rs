// Copyright 2025 the Kennel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Accessibility metadata attached to scene regions.
//!
//! Every mounted region carries an [`Element`]: its role, the ids and labels assistive
//! technology reads, and an optional [`Handler`] naming what the region does when
//! it receives an event. Handlers are plain data, the way widget messages are in
//! Elm-style toolkits; the [`Gallery`](crate::Gallery) turns them into state changes.

use kennel_records::{AdoptionStatus, Choice, Species};
use kennel_scene::NodeFlags;

/// Semantic role of a region.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Role {
    /// No particular semantics.
    #[default]
    Generic,
    /// Page header.
    Banner,
    /// Heading of the given level.
    Heading(u8),
    /// Search landmark.
    Search,
    /// Text input used for searching.
    SearchBox,
    /// Activatable control.
    Button,
    /// Group of related controls.
    Group,
    /// Advisory status message.
    Status,
    /// List container.
    List,
    /// Item of a list.
    ListItem,
    /// Self-contained composition, such as a static card.
    Article,
    /// Modal dialog.
    Dialog,
    /// Image with alternative text.
    Image,
}

impl Role {
    /// Whether the role exposes an interactive control.
    pub fn is_interactive(self) -> bool {
        matches!(self, Self::Button | Self::SearchBox)
    }
}

/// Politeness of a live region.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Live {
    /// Announced when the user is idle.
    Polite,
    /// Announced immediately.
    Assertive,
}

/// What a region does with the events routed to it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Handler {
    /// An interactive card showing the `n`-th visible result.
    Card(usize),
    /// The detail view's close button.
    CloseDetail,
    /// The area around the detail view's content panel.
    Backdrop,
    /// The free-text search input.
    SearchInput,
    /// The button that empties the search input.
    ClearSearch,
    /// The button that resets every filter.
    ClearFilters,
    /// A species filter button.
    Species(Choice<Species>),
    /// A status filter button.
    Status(Choice<AdoptionStatus>),
}

/// Accessibility metadata of one region.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Element {
    /// Semantic role.
    pub role: Role,
    /// Document-unique id that other elements may reference.
    pub dom_id: Option<String>,
    /// Accessible name (an `aria-label`, or alternative text for images).
    pub label: Option<String>,
    /// Id of the element whose text names this one.
    pub labelled_by: Option<String>,
    /// Id of the element whose text describes this one.
    pub described_by: Option<String>,
    /// Visible text content.
    pub text: Option<String>,
    /// `None` is not focusable, negative is focusable only programmatically,
    /// zero or more joins the Tab sequence.
    pub tab_index: Option<i32>,
    /// Whether the element blocks the rest of the page while shown.
    pub aria_modal: bool,
    /// Whether the element is excluded from the accessibility tree.
    pub aria_hidden: bool,
    /// Toggle state of a pressed button.
    pub pressed: Option<bool>,
    /// Live region politeness.
    pub live: Option<Live>,
    /// Event handler.
    pub handler: Option<Handler>,
}

impl Element {
    /// An element with `role` and nothing else.
    pub fn new(role: Role) -> Self {
        Self {
            role,
            ..Self::default()
        }
    }

    /// Set the document id.
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.dom_id = Some(id.into());
        self
    }

    /// Set the accessible name.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Reference the element naming this one.
    pub fn labelled_by(mut self, id: impl Into<String>) -> Self {
        self.labelled_by = Some(id.into());
        self
    }

    /// Reference the element describing this one.
    pub fn described_by(mut self, id: impl Into<String>) -> Self {
        self.described_by = Some(id.into());
        self
    }

    /// Set the visible text.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Set the tab index.
    pub fn tab_index(mut self, index: i32) -> Self {
        self.tab_index = Some(index);
        self
    }

    /// Mark as modal.
    pub fn modal(mut self) -> Self {
        self.aria_modal = true;
        self
    }

    /// Exclude from the accessibility tree.
    pub fn hidden(mut self) -> Self {
        self.aria_hidden = true;
        self
    }

    /// Set the pressed state.
    pub fn pressed(mut self, pressed: bool) -> Self {
        self.pressed = Some(pressed);
        self
    }

    /// Make this a live region.
    pub fn live(mut self, live: Live) -> Self {
        self.live = Some(live);
        self
    }

    /// Attach a handler.
    pub fn on(mut self, handler: Handler) -> Self {
        self.handler = Some(handler);
        self
    }

    /// Whether the element may hold focus.
    pub fn is_focusable(&self) -> bool {
        self.tab_index.is_some()
    }

    /// Whether the element is a Tab stop.
    pub fn is_tabbable(&self) -> bool {
        self.tab_index.is_some_and(|i| i >= 0)
    }

    /// Scene flags matching this element's focus behavior.
    pub fn flags(&self) -> NodeFlags {
        if self.is_tabbable() {
            NodeFlags::tabbable()
        } else if self.is_focusable() {
            NodeFlags::default() | NodeFlags::FOCUSABLE
        } else {
            NodeFlags::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tab_index_drives_scene_flags() {
        assert!(!Element::new(Role::Article).flags().can_focus());
        let panel = Element::new(Role::Generic).tab_index(-1);
        assert!(panel.is_focusable());
        assert!(!panel.is_tabbable());
        assert!(!panel.flags().contains(NodeFlags::TABBABLE));
        assert!(panel.flags().can_focus());
        let button = Element::new(Role::Button).tab_index(0);
        assert!(button.flags().contains(NodeFlags::TABBABLE));
    }

    #[test]
    fn builder_sets_fields() {
        let e = Element::new(Role::Dialog)
            .id("d")
            .labelled_by("t")
            .described_by("b")
            .modal();
        assert_eq!(e.dom_id.as_deref(), Some("d"));
        assert_eq!(e.labelled_by.as_deref(), Some("t"));
        assert_eq!(e.described_by.as_deref(), Some("b"));
        assert!(e.aria_modal);
        assert!(!e.aria_hidden);
        assert!(!e.role.is_interactive());
    }
}
