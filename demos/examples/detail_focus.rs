// Copyright 2025 the Kennel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drive the detail view directly on a bare document.
//!
//! Shows the focus trap, backdrop versus panel clicks, and a deferred focus that
//! lands after the dialog has already closed.
//!
//! Run:
//! - `RUST_LOG=trace cargo run -p kennel_demos --example detail_focus`

use kennel_gallery::detail::DetailView;
use kennel_gallery::{Document, Element, Key, Role};
use kennel_records::RecordStore;
use kennel_responder::types::Outcome;
use kurbo::{Point, Rect, Size};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let store = RecordStore::sample();
    let Some(record) = store.get("2") else {
        return;
    };

    let mut doc = Document::new(Size::new(800.0, 600.0));
    let body = doc.body();
    let opener = doc.mount(
        body,
        Rect::new(20.0, 20.0, 220.0, 60.0),
        Element::new(Role::Button).label("Open").tab_index(0),
    );
    doc.commit();
    doc.focus(opener);

    let mut detail = DetailView::new();
    detail.open(&mut doc, record, Some(opener));
    println!(
        "open: pending ticks {}, listeners {}, scroll locked {}",
        doc.pending_ticks(),
        doc.listener_count(),
        doc.is_scroll_locked()
    );
    doc.run_ticks();
    let Some(nodes) = detail.nodes() else {
        return;
    };
    println!("focus on close button: {}", doc.focused() == Some(nodes.close));

    for _ in 0..3 {
        doc.key_down(Key::Tab.into(), |_, _| Outcome::Continue);
        println!("Tab -> still on close button: {}", doc.focused() == Some(nodes.close));
    }

    let panel_center = doc.center_of(nodes.panel).unwrap_or_default();
    let report = doc.click(panel_center, |step| {
        match detail.on_click(step) {
            Some(_) => Outcome::StopAndConsume,
            None => Outcome::Continue,
        }
    });
    println!("panel click consumed: {}", report.consumed);

    let report = doc.click(Point::new(5.0, 595.0), |step| {
        match detail.on_click(step) {
            Some(_) => Outcome::StopAndConsume,
            None => Outcome::Continue,
        }
    });
    if report.consumed {
        detail.close(&mut doc);
    }
    println!(
        "backdrop click closed: {}, focus back on opener: {}",
        !detail.is_open(),
        doc.focused() == Some(opener)
    );

    detail.open(&mut doc, record, Some(opener));
    detail.close(&mut doc);
    let ran = doc.run_ticks();
    println!(
        "stale tick ran {ran} task(s); focus still on opener: {}",
        doc.focused() == Some(opener)
    );
}
