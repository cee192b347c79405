// Copyright 2025 the Kennel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The immutable record store and owned filter selections.

use std::sync::Arc;

use tracing::debug;

use crate::error::RecordError;
use crate::filter::FilterCriteria;
use crate::record::PetRecord;

/// The bundled sample records as JSON, in the format [`RecordStore::from_json`] reads.
pub const SAMPLE_JSON: &str = include_str!("../data/pets.json");

/// A fixed list of pet records with unique ids.
///
/// Cloning is cheap and shares the records. Nothing can mutate the list after
/// construction; filtering produces [`Selection`]s instead.
#[derive(Clone, Debug)]
pub struct RecordStore {
    records: Arc<[PetRecord]>,
}

impl RecordStore {
    /// Build a store, rejecting duplicate ids.
    pub fn new(records: Vec<PetRecord>) -> Result<Self, RecordError> {
        for (i, r) in records.iter().enumerate() {
            if records[..i].iter().any(|earlier| earlier.id == r.id) {
                return Err(RecordError::DuplicateId(r.id.clone()));
            }
        }
        debug!(count = records.len(), "loaded pet records");
        Ok(Self {
            records: records.into(),
        })
    }

    /// Parse a JSON array of records and build a store from it.
    pub fn from_json(json: &str) -> Result<Self, RecordError> {
        Self::new(serde_json::from_str(json)?)
    }

    /// The three sample records: Luna, Mr. Whiskers, and Thumper, parsed from
    /// [`SAMPLE_JSON`].
    pub fn sample() -> Self {
        Self::from_json(SAMPLE_JSON).expect("bundled sample records are valid")
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records, in load order.
    pub fn as_slice(&self) -> &[PetRecord] {
        &self.records
    }

    /// Iterate records in load order.
    pub fn iter(&self) -> std::slice::Iter<'_, PetRecord> {
        self.records.iter()
    }

    /// Look up a record by id.
    pub fn get(&self, id: &str) -> Option<&PetRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// The records matching `criteria`, as an owned selection.
    pub fn select(&self, criteria: &FilterCriteria) -> Selection {
        let indices = self
            .records
            .iter()
            .enumerate()
            .filter(|(_, r)| criteria.matches(r))
            .map(|(i, _)| i)
            .collect();
        Selection {
            store: self.clone(),
            indices,
        }
    }
}

impl<'a> IntoIterator for &'a RecordStore {
    type Item = &'a PetRecord;
    type IntoIter = std::slice::Iter<'a, PetRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A filtered view over a [`RecordStore`] that owns its share of the records.
///
/// Order always follows the store's load order.
#[derive(Clone, Debug)]
pub struct Selection {
    store: RecordStore,
    indices: Vec<usize>,
}

impl Selection {
    /// Number of matching records; the value a live region announces.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Whether nothing matched.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// The `i`-th matching record.
    pub fn get(&self, i: usize) -> Option<&PetRecord> {
        self.indices.get(i).map(|&idx| &self.store.records[idx])
    }

    /// Iterate matching records in order.
    pub fn iter(&self) -> impl Iterator<Item = &PetRecord> + '_ {
        self.indices.iter().map(|&idx| &self.store.records[idx])
    }

    /// Ids of the matching records, in order.
    pub fn ids(&self) -> Vec<&str> {
        self.iter().map(|r| r.id.as_str()).collect()
    }
}
