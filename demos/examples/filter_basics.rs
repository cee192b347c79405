// Copyright 2025 the Kennel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Filter the bundled records and print what a screen reader would announce.
//!
//! Run:
//! - `cargo run -p kennel_demos --example filter_basics`

use kennel_gallery::GalleryOptions;
use kennel_records::announce::{active_filters_label, results_announcement};
use kennel_records::{AdoptionStatus, FilterCriteria, RecordStore, SAMPLE_JSON, Species};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let store = match RecordStore::from_json(SAMPLE_JSON) {
        Ok(store) => store,
        Err(err) => {
            tracing::error!(%err, "bundled records failed to load");
            return;
        }
    };
    tracing::info!(records = store.len(), "loaded");

    let queries = [
        ("everything", FilterCriteria::new()),
        ("cats", FilterCriteria::new().with_species(Species::Cat)),
        ("pending", FilterCriteria::new().with_status(AdoptionStatus::Pending)),
        ("'RETRIEVER'", FilterCriteria::new().with_search_text("RETRIEVER")),
        (
            "available dogs matching 'lu'",
            FilterCriteria::new()
                .with_search_text("lu")
                .with_species(Species::Dog)
                .with_status(AdoptionStatus::Available),
        ),
        ("'nonexistent'", FilterCriteria::new().with_search_text("nonexistent")),
    ];

    for (name, criteria) in &queries {
        let selection = store.select(criteria);
        println!("{name}: {}", results_announcement(selection.len()));
        if criteria.has_active_filters() {
            println!("  ({})", active_filters_label(criteria.active_filter_count()));
        }
        for record in selection.iter() {
            println!("  - {} ({}, {})", record.name, record.breed, record.adoption_status.label());
        }
    }

    let json = r#"{"initialType": "rabbit", "initialStatus": "pending", "columns": 2}"#;
    match GalleryOptions::from_json(json) {
        Ok(options) => {
            let count = store.select(&options.criteria()).len();
            println!("options {json} start with {}", results_announcement(count));
        }
        Err(err) => tracing::warn!(%err, "options rejected"),
    }
    if let Err(err) = GalleryOptions::from_json(r#"{"columns": 0}"#) {
        println!("rejected: {err}");
    }
}
