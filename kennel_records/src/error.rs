// Copyright 2025 the Kennel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use thiserror::Error;

/// Errors raised while loading records.
#[derive(Debug, Error)]
pub enum RecordError {
    /// Two records share an id.
    #[error("duplicate pet id `{0}`")]
    DuplicateId(String),

    /// The input was not a valid JSON array of records.
    #[error("invalid record data: {0}")]
    Json(#[from] serde_json::Error),
}
