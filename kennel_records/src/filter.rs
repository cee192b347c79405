// Copyright 2025 the Kennel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The filter engine: a pure, order-preserving predicate over records.
//!
//! A record matches when all three conditions hold:
//!
//! - the search text is empty, or occurs case-insensitively as a substring of the name,
//!   breed, description, or shelter location (the text is not trimmed, so whitespace is
//!   matched literally);
//! - the species choice is `All` or equals the record's species;
//! - the status choice is `All` or equals the record's adoption status.

use serde::{Deserialize, Serialize};

use crate::record::{AdoptionStatus, PetRecord, Species};

/// A selector that either admits everything or exactly one value.
///
/// Serializes as `"all"` or as the value's own representation.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Choice<T> {
    /// No restriction.
    #[default]
    All,
    /// Only this value.
    #[serde(untagged)]
    Only(T),
}

impl<T: PartialEq> Choice<T> {
    /// Whether `value` passes this selector.
    pub fn admits(&self, value: &T) -> bool {
        match self {
            Self::All => true,
            Self::Only(v) => v == value,
        }
    }

    /// Whether this selector is unrestricted.
    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

impl<T> From<T> for Choice<T> {
    fn from(value: T) -> Self {
        Self::Only(value)
    }
}

/// The user's current query.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FilterCriteria {
    /// Case-insensitive substring; empty matches everything.
    pub search_text: String,
    /// Species selector.
    pub species: Choice<Species>,
    /// Adoption status selector.
    pub status: Choice<AdoptionStatus>,
}

impl FilterCriteria {
    /// Criteria that admit every record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the search text.
    pub fn with_search_text(mut self, text: impl Into<String>) -> Self {
        self.search_text = text.into();
        self
    }

    /// Replace the species selector.
    pub fn with_species(mut self, species: impl Into<Choice<Species>>) -> Self {
        self.species = species.into();
        self
    }

    /// Replace the status selector.
    pub fn with_status(mut self, status: impl Into<Choice<AdoptionStatus>>) -> Self {
        self.status = status.into();
        self
    }

    /// Whether `record` passes all three conditions.
    pub fn matches(&self, record: &PetRecord) -> bool {
        self.species.admits(&record.species)
            && self.status.admits(&record.adoption_status)
            && self.matches_text(record)
    }

    fn matches_text(&self, record: &PetRecord) -> bool {
        if self.search_text.is_empty() {
            return true;
        }
        let needle = self.search_text.to_lowercase();
        record
            .searchable_fields()
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }

    /// How many of the three conditions are restricting.
    pub fn active_filter_count(&self) -> usize {
        usize::from(!self.search_text.is_empty())
            + usize::from(!self.species.is_all())
            + usize::from(!self.status.is_all())
    }

    /// Whether any condition is restricting.
    pub fn has_active_filters(&self) -> bool {
        self.active_filter_count() > 0
    }
}

/// Return the records matching `criteria`, in their original order.
///
/// The input is never modified; an empty input yields an empty result.
///
/// ```
/// use kennel_records::{filter, AdoptionStatus, FilterCriteria, RecordStore};
///
/// let store = RecordStore::sample();
/// let pending = filter(store.as_slice(), &FilterCriteria::new().with_status(AdoptionStatus::Pending));
/// let names: Vec<_> = pending.iter().map(|r| r.name.as_str()).collect();
/// assert_eq!(names, ["Thumper"]);
/// ```
pub fn filter<'a>(records: &'a [PetRecord], criteria: &FilterCriteria) -> Vec<&'a PetRecord> {
    records.iter().filter(|r| criteria.matches(r)).collect()
}
