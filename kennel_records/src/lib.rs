// Copyright 2025 the Kennel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Kennel Records: the data layer of the pet adoption gallery.
//!
//! - [`PetRecord`], [`Species`], [`AdoptionStatus`]: the record model, with serde
//!   support for the JSON shape the gallery's data files use.
//! - [`RecordStore`]: an immutable, id-unique list of records.
//! - [`filter`] and [`FilterCriteria`]: the pure filter engine. Filtering never reorders
//!   or mutates its input; the result count is simply the length of the output.
//! - [`announce`]: the live-region texts derived from counts.
//!
//! ```
//! use kennel_records::{FilterCriteria, RecordStore, Species, announce};
//!
//! let store = RecordStore::sample();
//! let cats = store.select(&FilterCriteria::new().with_species(Species::Cat));
//! assert_eq!(cats.ids(), ["2"]);
//! assert_eq!(announce::results_announcement(cats.len()), "1 pet found");
//! ```

pub mod announce;
mod error;
mod filter;
mod record;
mod store;

pub use error::RecordError;
pub use filter::{Choice, FilterCriteria, filter};
pub use record::{AdoptionStatus, PetRecord, Species};
pub use store::{RecordStore, SAMPLE_JSON, Selection};
