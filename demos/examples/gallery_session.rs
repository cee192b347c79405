// Copyright 2025 the Kennel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A scripted session: search, filter, open a pet, tab around, and close with Escape.
//!
//! Run:
//! - `RUST_LOG=kennel_gallery=debug cargo run -p kennel_demos --example gallery_session`

use kennel_gallery::{Gallery, GalleryOptions, Key, KeyEvent, Presentation};
use kennel_records::{AdoptionStatus, Choice, RecordStore};
use kennel_scene::NodeId;
use tracing_subscriber::EnvFilter;

fn describe(gallery: &Gallery, node: Option<NodeId>) -> String {
    let doc = gallery.document();
    let Some(element) = node.and_then(|id| doc.element(id)) else {
        return "<nothing>".to_owned();
    };
    let name = element
        .label
        .as_deref()
        .or(element.text.as_deref())
        .unwrap_or("<unnamed>");
    format!("{:?} \"{name}\"", element.role)
}

fn report(gallery: &Gallery, step: &str) {
    let shown = match gallery.presentation() {
        Presentation::Results { count } => format!("{count} results"),
        Presentation::Empty => "empty state".to_owned(),
    };
    let focus = describe(gallery, gallery.document().focused());
    println!("{step:<28} | {shown:<11} | focus: {focus}");
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let mut gallery = Gallery::new(RecordStore::sample(), GalleryOptions::default());
    report(&gallery, "start");

    let input = gallery.search().input();
    if let Some(pt) = gallery.document().center_of(input) {
        gallery.click(pt);
    }
    gallery.type_text("lu");
    report(&gallery, "typed 'lu'");

    gallery.key_down(Key::Backspace);
    gallery.key_down(Key::Backspace);
    report(&gallery, "erased search");

    if let Some(pt) = gallery
        .search()
        .status_button(Choice::Only(AdoptionStatus::Available))
        .and_then(|id| gallery.document().center_of(id))
    {
        gallery.click(pt);
    }
    report(&gallery, "status: available");

    let Some(card) = gallery.cards().first().map(|card| card.root()) else {
        println!("no cards to open");
        return;
    };
    if let Some(pt) = gallery.document().center_of(card) {
        gallery.click(pt);
    }
    report(&gallery, "clicked first card");
    gallery.tick();
    report(&gallery, "after tick");

    gallery.key_down(Key::Tab);
    report(&gallery, "Tab");
    gallery.key_down(KeyEvent::new(Key::Tab).with_shift());
    report(&gallery, "Shift+Tab");

    gallery.key_down(Key::Escape);
    report(&gallery, "Escape");
    println!("scroll locked: {}", gallery.document().is_scroll_locked());
}
