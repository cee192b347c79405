// Copyright 2025 the Kennel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Walking a dispatch sequence.
//!
//! The router only computes the traversal order. [`run_dispatch`] delivers each
//! entry to a handler and honors the returned [`Outcome`]: `Stop` skips the rest of
//! the current phase, `StopAndConsume` aborts every remaining phase.

use crate::types::{Dispatch, Outcome};

/// Deliver a dispatch sequence to `deliver`, phase by phase.
///
/// Returns `true` if a handler consumed the event.
///
/// ```
/// use kennel_responder::dispatch::run_dispatch;
/// use kennel_responder::types::{Dispatch, Outcome, Phase};
///
/// let seq = [
///     Dispatch { phase: Phase::Capture, node: 1_u32, widget: None::<()> },
///     Dispatch { phase: Phase::Target, node: 2, widget: None },
///     Dispatch { phase: Phase::Bubble, node: 2, widget: None },
///     Dispatch { phase: Phase::Bubble, node: 1, widget: None },
/// ];
/// let mut seen = Vec::new();
/// let consumed = run_dispatch(&seq, |d| {
///     seen.push((d.phase, d.node));
///     if d.phase == Phase::Target { Outcome::StopAndConsume } else { Outcome::Continue }
/// });
/// assert!(consumed);
/// assert_eq!(seen, [(Phase::Capture, 1), (Phase::Target, 2)]);
/// ```
pub fn run_dispatch<K, W, F>(seq: &[Dispatch<K, W>], mut deliver: F) -> bool
where
    F: FnMut(&Dispatch<K, W>) -> Outcome,
{
    let mut i = 0;
    while i < seq.len() {
        let phase = seq[i].phase;
        // Process contiguous entries for the same phase.
        while i < seq.len() && seq[i].phase == phase {
            match deliver(&seq[i]) {
                Outcome::Continue => {}
                Outcome::Stop => {
                    // Skip remaining entries in this phase.
                    while i + 1 < seq.len() && seq[i + 1].phase == phase {
                        i += 1;
                    }
                }
                Outcome::StopAndConsume => return true,
            }
            i += 1;
        }
    }
    false
}
