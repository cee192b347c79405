// Copyright 2025 the Kennel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The pet record and its closed enumerations.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Kind of animal.
///
/// Values outside the known set deserialize to [`Species::Other`], the generic
/// fallback category, so malformed data never fails to render.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Species {
    /// A dog.
    Dog,
    /// A cat.
    Cat,
    /// A rabbit.
    Rabbit,
    /// Anything else.
    #[serde(other)]
    Other,
}

impl Species {
    /// The selectable species, in display order.
    pub const ALL: [Self; 3] = [Self::Dog, Self::Cat, Self::Rabbit];

    /// Lowercase wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dog => "dog",
            Self::Cat => "cat",
            Self::Rabbit => "rabbit",
            Self::Other => "other",
        }
    }

    /// Capitalized plural, as used on filter buttons ("Dogs").
    pub fn plural_label(self) -> &'static str {
        match self {
            Self::Dog => "Dogs",
            Self::Cat => "Cats",
            Self::Rabbit => "Rabbits",
            Self::Other => "Others",
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a pet is in the adoption process.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdoptionStatus {
    /// Open for adoption.
    Available,
    /// An adoption is in progress.
    Pending,
    /// Already adopted.
    Adopted,
}

impl AdoptionStatus {
    /// Every status, in display order.
    pub const ALL: [Self; 3] = [Self::Available, Self::Pending, Self::Adopted];

    /// Lowercase wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Pending => "pending",
            Self::Adopted => "adopted",
        }
    }

    /// First letter capitalized ("Pending").
    pub fn capitalized(self) -> &'static str {
        match self {
            Self::Available => "Available",
            Self::Pending => "Pending",
            Self::Adopted => "Adopted",
        }
    }

    /// Accessible label of a status indicator: `"{Status} for adoption"`.
    pub fn label(self) -> String {
        format!("{} for adoption", self.capitalized())
    }
}

impl fmt::Display for AdoptionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One adoptable pet.
///
/// Records are created once when a [`RecordStore`](crate::RecordStore) is built and are
/// never mutated afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PetRecord {
    /// Identifier, unique within a store.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Kind of animal.
    #[serde(rename = "type")]
    pub species: Species,
    /// Age in whole years.
    pub age: u32,
    /// Display breed.
    pub breed: String,
    /// Free-text description.
    pub description: String,
    /// URL or path of the pet's photo.
    #[serde(rename = "imageUrl")]
    pub image_reference: String,
    /// Free-text shelter location.
    pub shelter_location: String,
    /// Adoption status.
    pub adoption_status: AdoptionStatus,
}

impl PetRecord {
    /// `"{age} year old"` or `"{age} years old"`; singular only for an age of one.
    pub fn age_phrase(&self) -> String {
        let unit = if self.age == 1 { "year" } else { "years" };
        format!("{} {unit} old", self.age)
    }

    /// Alternative text for the pet's photo.
    pub fn image_alt(&self) -> String {
        format!(
            "{}, a {}-year-old {} {}",
            self.name, self.age, self.breed, self.species
        )
    }

    /// The fields free-text search looks at.
    pub fn searchable_fields(&self) -> [&str; 4] {
        [
            self.name.as_str(),
            self.breed.as_str(),
            self.description.as_str(),
            self.shelter_location.as_str(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pet(age: u32) -> PetRecord {
        PetRecord {
            id: "9".into(),
            name: "Pip".into(),
            species: Species::Rabbit,
            age,
            breed: "Rex".into(),
            description: String::new(),
            image_reference: String::new(),
            shelter_location: String::new(),
            adoption_status: AdoptionStatus::Adopted,
        }
    }

    #[test]
    fn age_phrase_is_singular_only_for_one() {
        assert_eq!(pet(0).age_phrase(), "0 years old");
        assert_eq!(pet(1).age_phrase(), "1 year old");
        assert_eq!(pet(2).age_phrase(), "2 years old");
    }

    #[test]
    fn status_label_capitalizes_first_letter() {
        assert_eq!(AdoptionStatus::Pending.label(), "Pending for adoption");
        assert_eq!(AdoptionStatus::Available.label(), "Available for adoption");
    }

    #[test]
    fn unknown_species_falls_back_to_other() {
        let s: Species = serde_json::from_str("\"hamster\"").unwrap();
        assert_eq!(s, Species::Other);
        let d: Species = serde_json::from_str("\"dog\"").unwrap();
        assert_eq!(d, Species::Dog);
    }

    #[test]
    fn image_alt_reads_naturally() {
        assert_eq!(pet(4).image_alt(), "Pip, a 4-year-old Rex rabbit");
    }

    #[test]
    fn wire_format_uses_original_field_names() {
        let json = serde_json::to_value(pet(1)).unwrap();
        assert_eq!(json["type"], "rabbit");
        assert_eq!(json["adoptionStatus"], "adopted");
        assert!(json.get("imageUrl").is_some());
        assert!(json.get("shelterLocation").is_some());
    }
}
