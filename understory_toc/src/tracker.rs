// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Intersection tracker: one visibility observer over the current target set.
//!
//! ## Reconfiguration
//!
//! Observer options are fixed at connect time, so a new margin needs a new
//! observer. [`IntersectionTracker::configure`] therefore always tears down
//! completely (unobserve every element, disconnect, drop) before connecting a
//! fresh observer for the new targets. There is no partial update path.

use alloc::vec::Vec;

use understory_observe::{VisibilityBackend, VisibilityEntry, VisibilityObserver, VisibilityOptions};

use crate::types::{ObservationMargin, TargetSet};

/// Observes every target of a [`TargetSet`] for full visibility.
pub struct IntersectionTracker<K: Copy + Eq, V: VisibilityBackend<K>> {
    backend: V,
    threshold: f64,
    observer: Option<V::Observer>,
    observed: Vec<K>,
    generation: u64,
}

impl<K: Copy + Eq, V: VisibilityBackend<K>> core::fmt::Debug for IntersectionTracker<K, V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("IntersectionTracker")
            .field("threshold", &self.threshold)
            .field("observed", &self.observed.len())
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}

impl<K: Copy + Eq, V: VisibilityBackend<K>> IntersectionTracker<K, V> {
    /// Create an idle tracker. Nothing is observed until [`configure`](Self::configure).
    pub fn new(backend: V, threshold: f64) -> Self {
        Self {
            backend,
            threshold,
            observer: None,
            observed: Vec::new(),
            generation: 0,
        }
    }

    /// Tear down and observe `targets` with a root shrunk by `margin` at the top.
    ///
    /// With no targets the tracker stays idle.
    pub fn configure(&mut self, targets: &TargetSet<K>, margin: ObservationMargin) {
        self.teardown();
        self.generation = self.generation.wrapping_add(1);
        if targets.is_empty() {
            return;
        }
        let options = VisibilityOptions {
            root_margin: margin.root_margin(),
            threshold: self.threshold,
        };
        let mut observer = self.backend.connect(options);
        for t in targets {
            observer.observe(t.node);
            self.observed.push(t.node);
        }
        tracing::trace!(
            generation = self.generation,
            targets = self.observed.len(),
            root_margin = %options.root_margin,
            "visibility observer configured"
        );
        self.observer = Some(observer);
    }

    /// Unobserve every element and drop the observer.
    ///
    /// Every element is released, whether or not it was ever reported.
    pub fn teardown(&mut self) {
        if let Some(mut observer) = self.observer.take() {
            for &node in &self.observed {
                observer.unobserve(node);
            }
            observer.disconnect();
        }
        self.observed.clear();
    }

    /// Drain pending records for currently observed elements.
    pub fn take_records(&mut self) -> Vec<VisibilityEntry<K>> {
        let Some(observer) = self.observer.as_mut() else {
            return Vec::new();
        };
        let mut records = observer.take_records();
        records.retain(|r| self.observed.contains(&r.target));
        records
    }

    /// Options of the live observer, if any.
    pub fn options(&self) -> Option<&VisibilityOptions> {
        self.observer.as_ref().map(|o| o.options())
    }

    /// Whether `node` is currently observed.
    pub fn is_observing(&self, node: K) -> bool {
        self.observed.contains(&node)
    }

    /// Number of completed [`configure`](Self::configure) calls.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The backend observers are connected through.
    pub fn backend(&self) -> &V {
        &self.backend
    }
}

impl<K: Copy + Eq, V: VisibilityBackend<K>> Drop for IntersectionTracker<K, V> {
    fn drop(&mut self) {
        self.teardown();
    }
}
