// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Capability traits for visibility and resize observation.
//!
//! A *backend* is the host capability (for example a browser binding or the
//! in-memory hubs in [`memory`](crate::memory)). Connecting to a backend yields
//! an *observer*, which watches a set of targets and accumulates records until
//! they are taken.
//!
//! Records are pulled, not pushed: the owner calls `take_records` when it is
//! ready to process a batch, typically once per host tick. This keeps callers
//! single-threaded and free of re-entrant callbacks.

use alloc::vec::Vec;

use crate::error::ObserveError;
use crate::types::{ResizeEntry, VisibilityEntry, VisibilityOptions};

/// A host capability producing [`VisibilityObserver`]s.
pub trait VisibilityBackend<K> {
    /// Observer type produced by [`connect`](Self::connect).
    type Observer: VisibilityObserver<K>;

    /// Report whether the primitive exists in this host.
    ///
    /// Consumers probe this once at construction and fail fast on error.
    fn available(&self) -> Result<(), ObserveError> {
        Ok(())
    }

    /// Create an observer with fixed options. It observes nothing yet.
    fn connect(&self, options: VisibilityOptions) -> Self::Observer;
}

/// Watches targets for visibility changes relative to a root.
///
/// Dropping an observer must release everything it observes.
pub trait VisibilityObserver<K> {
    /// Options the observer was connected with.
    fn options(&self) -> &VisibilityOptions;

    /// Start observing `target`. Observing a target twice is a no-op.
    fn observe(&mut self, target: K);

    /// Stop observing `target` and discard its pending records.
    fn unobserve(&mut self, target: K);

    /// Stop observing every target and discard all pending records.
    fn disconnect(&mut self);

    /// Drain the records accumulated since the last call, oldest first.
    fn take_records(&mut self) -> Vec<VisibilityEntry<K>>;
}

/// A host capability producing [`ResizeObserver`]s.
pub trait ResizeBackend<K> {
    /// Observer type produced by [`connect`](Self::connect).
    type Observer: ResizeObserver<K>;

    /// Report whether the primitive exists in this host.
    fn available(&self) -> Result<(), ObserveError> {
        Ok(())
    }

    /// Create an observer. It observes nothing yet.
    fn connect(&self) -> Self::Observer;
}

/// Watches targets for content-box size changes.
///
/// Dropping an observer must release everything it observes.
pub trait ResizeObserver<K> {
    /// Start observing `target`. Observing a target twice is a no-op.
    fn observe(&mut self, target: K);

    /// Stop observing `target` and discard its pending records.
    fn unobserve(&mut self, target: K);

    /// Stop observing every target and discard all pending records.
    fn disconnect(&mut self);

    /// Drain the records accumulated since the last call, oldest first.
    fn take_records(&mut self) -> Vec<ResizeEntry<K>>;
}
