// Copyright 2025 the Kennel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gallery configuration: initial state seeds and layout.

use kennel_records::{AdoptionStatus, Choice, FilterCriteria, Species};
use kurbo::Size;
use serde::{Deserialize, Serialize};

/// Cards never get narrower than this; the grid drops columns instead.
pub const MIN_CARD_WIDTH: f64 = 280.0;

/// Widest grid the layout will produce.
pub const MAX_COLUMNS: usize = 12;

/// Errors from loading [`GalleryOptions`].
#[derive(Debug, thiserror::Error)]
pub enum OptionsError {
    /// The JSON could not be parsed.
    #[error("invalid gallery options: {0}")]
    Json(#[from] serde_json::Error),
    /// The viewport has a non-positive or non-finite side.
    #[error("viewport must be positive and finite, got {width}x{height}")]
    Viewport {
        /// Requested width.
        width: f64,
        /// Requested height.
        height: f64,
    },
    /// The column count is outside `1..=MAX_COLUMNS`.
    #[error("columns must be between 1 and {max}, got {0}", max = MAX_COLUMNS)]
    Columns(usize),
}

/// Size of the visible part of the page.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Viewport {
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 800.0,
        }
    }
}

impl From<Viewport> for Size {
    fn from(v: Viewport) -> Self {
        Self::new(v.width, v.height)
    }
}

/// How a gallery starts out.
///
/// The `initial*` fields only seed state; nothing reads them after construction.
/// An unknown `initialModalPetId` simply leaves the detail view closed.
///
/// ```
/// use kennel_gallery::GalleryOptions;
/// use kennel_records::{AdoptionStatus, Choice};
///
/// let opts = GalleryOptions::from_json(r#"{"initialStatus": "pending", "columns": 2}"#).unwrap();
/// assert_eq!(opts.initial_status, Choice::Only(AdoptionStatus::Pending));
/// assert_eq!(opts.columns, 2);
/// assert!(opts.initial_search_query.is_empty());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GalleryOptions {
    /// Initial search text.
    pub initial_search_query: String,
    /// Initial species filter.
    #[serde(rename = "initialType")]
    pub initial_species: Choice<Species>,
    /// Initial status filter.
    pub initial_status: Choice<AdoptionStatus>,
    /// Record to show in the detail view right away.
    pub initial_modal_pet_id: Option<String>,
    /// Viewport size.
    pub viewport: Viewport,
    /// Maximum number of grid columns.
    pub columns: usize,
}

impl Default for GalleryOptions {
    fn default() -> Self {
        Self {
            initial_search_query: String::new(),
            initial_species: Choice::All,
            initial_status: Choice::All,
            initial_modal_pet_id: None,
            viewport: Viewport::default(),
            columns: 3,
        }
    }
}

impl GalleryOptions {
    /// Parse and validate options from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, OptionsError> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    /// Check the layout fields.
    pub fn validate(&self) -> Result<(), OptionsError> {
        let Viewport { width, height } = self.viewport;
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(OptionsError::Viewport { width, height });
        }
        if !(1..=MAX_COLUMNS).contains(&self.columns) {
            return Err(OptionsError::Columns(self.columns));
        }
        Ok(())
    }

    /// Start with this search text.
    pub fn with_search_query(mut self, query: impl Into<String>) -> Self {
        self.initial_search_query = query.into();
        self
    }

    /// Start with this species filter.
    pub fn with_species(mut self, species: impl Into<Choice<Species>>) -> Self {
        self.initial_species = species.into();
        self
    }

    /// Start with this status filter.
    pub fn with_status(mut self, status: impl Into<Choice<AdoptionStatus>>) -> Self {
        self.initial_status = status.into();
        self
    }

    /// Open the detail view for this record id right away.
    pub fn with_modal_pet(mut self, id: impl Into<String>) -> Self {
        self.initial_modal_pet_id = Some(id.into());
        self
    }

    /// Use this viewport.
    pub fn with_viewport(mut self, width: f64, height: f64) -> Self {
        self.viewport = Viewport { width, height };
        self
    }

    /// The criteria the gallery starts with.
    pub fn criteria(&self) -> FilterCriteria {
        FilterCriteria {
            search_text: self.initial_search_query.clone(),
            species: self.initial_species,
            status: self.initial_status,
        }
    }

    /// Columns that fit `content_width` without cards dropping below [`MIN_CARD_WIDTH`].
    ///
    /// The configured count is clamped to `1..=MAX_COLUMNS` first.
    pub fn columns_for(&self, content_width: f64, gap: f64) -> usize {
        let mut columns = self.columns.clamp(1, MAX_COLUMNS);
        while columns > 1 {
            let gaps = (columns - 1) as f64 * gap;
            let width = (content_width - gaps) / columns as f64;
            if width >= MIN_CARD_WIDTH {
                break;
            }
            columns -= 1;
        }
        columns
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_missing_fields() {
        let opts = GalleryOptions::from_json("{}").unwrap();
        assert_eq!(opts, GalleryOptions::default());
        assert_eq!(opts.criteria(), FilterCriteria::new());
    }

    #[test]
    fn seeds_map_onto_criteria() {
        let opts = GalleryOptions::from_json(
            r#"{"initialSearchQuery": "lu", "initialType": "dog", "initialModalPetId": "1"}"#,
        )
        .unwrap();
        let c = opts.criteria();
        assert_eq!(c.search_text, "lu");
        assert_eq!(c.species, Choice::Only(Species::Dog));
        assert_eq!(c.status, Choice::All);
        assert_eq!(opts.initial_modal_pet_id.as_deref(), Some("1"));
    }

    #[test]
    fn bad_layout_is_rejected() {
        let err = GalleryOptions::from_json(r#"{"columns": 0}"#).unwrap_err();
        assert!(matches!(err, OptionsError::Columns(0)));
        let err = GalleryOptions::from_json(r#"{"columns": 13}"#).unwrap_err();
        assert!(matches!(err, OptionsError::Columns(13)));
        let err = GalleryOptions::from_json(r#"{"viewport": {"width": 0}}"#).unwrap_err();
        assert!(matches!(err, OptionsError::Viewport { .. }));
        let err = GalleryOptions::from_json("[").unwrap_err();
        assert!(matches!(err, OptionsError::Json(_)));
    }

    #[test]
    fn narrow_viewports_drop_columns() {
        let opts = GalleryOptions::default();
        assert_eq!(opts.columns_for(1200.0, 24.0), 3);
        assert_eq!(opts.columns_for(700.0, 24.0), 2);
        assert_eq!(opts.columns_for(300.0, 24.0), 1);
        assert_eq!(opts.columns_for(100.0, 24.0), 1);
    }

    #[test]
    fn huge_column_counts_are_rejected_and_clamped() {
        let json = format!(r#"{{"columns": {}}}"#, usize::MAX);
        let err = GalleryOptions::from_json(&json).unwrap_err();
        assert!(matches!(err, OptionsError::Columns(n) if n == usize::MAX));

        let opts = GalleryOptions {
            columns: usize::MAX,
            ..GalleryOptions::default()
        };
        assert_eq!(opts.columns_for(1216.0, 24.0), 4);
        assert_eq!(opts.columns_for(f64::INFINITY, 24.0), MAX_COLUMNS);
        assert_eq!(opts.columns_for(300.0, 24.0), 1);
    }
}
