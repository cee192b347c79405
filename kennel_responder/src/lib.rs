// Copyright 2025 the Kennel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Kennel Responder: a deterministic, `no_std` router for UI events.
//!
//! ## Overview
//!
//! This crate builds the responder chain sequence (capture → target → bubble) for pointer
//! and keyboard events, and carries the focus machinery a modal dialog needs.
//! It does not perform hit testing; feed it [`ResolvedHit`](crate::types::ResolvedHit)
//! items, for example from a [`kennel_scene`](https://docs.rs/kennel_scene) tree via the
//! `scene_adapter` feature.
//!
//! ## Pieces
//!
//! - [`router::Router`]: picks the nearest in-scope pointer candidate, or the focused node
//!   for key events, and emits the propagation sequence. A modal root confines both.
//! - [`dispatch::run_dispatch`]: walks a sequence and honors
//!   [`Outcome`](crate::types::Outcome) (stop within a phase, or stop and consume).
//! - [`focus::FocusState`]: the focus owner as a root→node path, with focus-in/focus-out
//!   transitions.
//! - [`trap::step`]: the focus-trap policy that keeps Tab and Shift+Tab cycling inside a
//!   region.
//!
//! ## Workflow
//!
//! 1) Resolve candidates under the pointer and call
//!    [`Router::route_pointer`](crate::router::Router::route_pointer), or call
//!    [`Router::route_key`](crate::router::Router::route_key) for a key press.
//! 2) Deliver the sequence with [`run_dispatch`](crate::dispatch::run_dispatch).
//!    A handler on an inner node that returns `StopAndConsume` keeps outer handlers
//!    (say, a backdrop that closes a dialog) from ever seeing the event.
//! 3) When a handler moves focus, feed the new path to
//!    [`FocusState::focus_path`](crate::focus::FocusState::focus_path).
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod adapters;
pub mod dispatch;
pub mod focus;
pub mod router;
pub mod trap;
pub mod types;
