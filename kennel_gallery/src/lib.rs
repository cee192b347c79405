// Copyright 2025 the Kennel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Kennel Gallery: a headless, accessible pet adoption gallery.
//!
//! The gallery is a filterable grid of pet cards plus a modal detail view, built on a
//! [`Document`]: a [`kennel_scene`] region tree annotated with accessibility metadata,
//! with focus, routing, and focus trapping from [`kennel_responder`]. Nothing here
//! draws pixels; hosts feed clicks and key presses in and read regions, labels, and
//! focus back out.
//!
//! ## Pieces
//!
//! - [`Gallery`]: the coordinator. Owns the criteria, the results, and which record
//!   the detail view shows.
//! - [`card`]: renders one record as a static article or an activatable button.
//! - [`search`]: the search box and filter buttons.
//! - [`detail`]: the modal dialog, with its focus trap, scroll lock, and focus
//!   restoration.
//! - [`Document`]: focus owner, document key listeners, deferred ticks, and page
//!   scrolling.
//! - [`GalleryOptions`]: initial state seeds and layout, loadable from JSON.
//!
//! ## Example
//!
//! ```
//! use kennel_gallery::{Gallery, GalleryOptions, Key};
//! use kennel_records::RecordStore;
//!
//! let mut gallery = Gallery::new(RecordStore::sample(), GalleryOptions::default());
//! let luna = gallery.card_for("1").unwrap();
//! assert!(gallery.document_mut().focus(luna));
//!
//! gallery.key_down(Key::Enter);
//! gallery.tick();
//! let close = gallery.detail().nodes().unwrap().close;
//! assert_eq!(gallery.document().focused(), Some(close));
//!
//! gallery.key_down(Key::Escape);
//! assert!(!gallery.detail().is_open());
//! assert_eq!(gallery.document().focused(), Some(luna));
//! ```

pub mod card;
pub mod detail;
mod document;
mod element;
mod gallery;
mod key;
mod listeners;
mod options;
pub mod search;

pub use document::{ClickReport, Document, KeyContext, KeyReport, Notice, Step};
pub use element::{Element, Handler, Live, Role};
pub use gallery::{CARD_HEIGHT, Gallery, Message, Presentation, SelectionState};
pub use key::{Key, KeyEvent, Modifiers};
pub use listeners::{KeyListener, ListenerGuard, ScrollLock};
pub use options::{GalleryOptions, MAX_COLUMNS, MIN_CARD_WIDTH, OptionsError, Viewport};
