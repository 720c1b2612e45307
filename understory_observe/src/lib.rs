// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Observe: pluggable visibility and resize observation.
//!
//! ## Overview
//!
//! UI code that reacts to layout (scroll spies, sticky headers, lazy loading) usually
//! leans on two host primitives: one that reports when an element enters or leaves a
//! region of the viewport, and one that reports when an element changes size. This
//! crate abstracts both behind small capability traits so the logic on top can run and
//! be tested without a host.
//!
//! - [`VisibilityBackend`] / [`VisibilityObserver`]: connect an observer with
//!   [`VisibilityOptions`] (a [`RootMargin`] and a threshold), observe targets, and
//!   pull [`VisibilityEntry`] records.
//! - [`ResizeBackend`] / [`ResizeObserver`]: observe targets and pull [`ResizeEntry`]
//!   records carrying the new content box.
//! - [`memory`]: in-memory backends. They support manual triggering for tests and
//!   geometry-driven evaluation for headless hosts.
//!
//! ## Availability
//!
//! A host may lack a primitive entirely. Backends report that through
//! `available()`, which returns [`ObserveError::Unavailable`]; consumers are expected
//! to probe once at construction and refuse to start rather than silently never
//! receiving records.
//!
//! ## Records are pulled
//!
//! Observers accumulate records and hand them out through `take_records`. The owner
//! decides when a batch is processed, which keeps everything on one thread and avoids
//! re-entrant callbacks into half-updated state.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod backend;
pub mod error;
pub mod memory;
pub mod types;

pub use backend::{ResizeBackend, ResizeObserver, VisibilityBackend, VisibilityObserver};
pub use error::ObserveError;
pub use types::{Primitive, ResizeEntry, RootMargin, VisibilityEntry, VisibilityOptions};
