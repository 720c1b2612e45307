// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout change monitor: turn size changes of the compact control into an
//! [`ObservationMargin`].

use understory_observe::{ResizeBackend, ResizeObserver};

use crate::types::ObservationMargin;

/// Watches a single element (the compact control) and tracks its height.
pub struct MarginMonitor<K: Copy + Eq, R: ResizeBackend<K>> {
    observer: R::Observer,
    element: Option<K>,
    margin: ObservationMargin,
}

impl<K: Copy + Eq, R: ResizeBackend<K>> core::fmt::Debug for MarginMonitor<K, R> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MarginMonitor")
            .field("observing", &self.element.is_some())
            .field("margin", &self.margin)
            .finish_non_exhaustive()
    }
}

impl<K: Copy + Eq, R: ResizeBackend<K>> MarginMonitor<K, R> {
    /// Connect to `backend`. Nothing is observed until [`observe`](Self::observe).
    pub fn new(backend: &R) -> Self {
        Self {
            observer: backend.connect(),
            element: None,
            margin: ObservationMargin::ZERO,
        }
    }

    /// Observe `element`, releasing any previously observed element.
    pub fn observe(&mut self, element: K) {
        if self.element == Some(element) {
            return;
        }
        self.unobserve();
        self.observer.observe(element);
        self.element = Some(element);
    }

    /// Stop observing. The last measured margin is kept.
    pub fn unobserve(&mut self) {
        if let Some(prev) = self.element.take() {
            self.observer.unobserve(prev);
        }
    }

    /// The observed element, if any.
    pub fn element(&self) -> Option<K> {
        self.element
    }

    /// Most recent margin.
    pub fn margin(&self) -> ObservationMargin {
        self.margin
    }

    /// Drain pending size records and return the new margin if it changed.
    ///
    /// The last record for the observed element in the batch wins.
    pub fn process(&mut self) -> Option<ObservationMargin> {
        let element = self.element?;
        let measured = self
            .observer
            .take_records()
            .into_iter()
            .rev()
            .find(|r| r.target == element)
            .map(|r| ObservationMargin::from_height(r.content_rect.height()))?;
        if measured == self.margin {
            return None;
        }
        self.margin = measured;
        Some(measured)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Rect;
    use understory_observe::memory::ResizeHub;

    fn rect(height: f64) -> Rect {
        Rect::new(0.0, 0.0, 320.0, height)
    }

    #[test]
    fn reports_rounded_height() {
        let hub: ResizeHub<u32> = ResizeHub::new();
        let mut m = MarginMonitor::new(&hub);
        m.observe(1);
        hub.run(1, rect(31.6));
        assert_eq!(m.process(), Some(ObservationMargin::new(32)));
        assert_eq!(m.margin().px(), 32);
    }

    #[test]
    fn unchanged_height_reports_nothing() {
        let hub: ResizeHub<u32> = ResizeHub::new();
        let mut m = MarginMonitor::new(&hub);
        m.observe(1);
        hub.run(1, rect(32.0));
        assert!(m.process().is_some());
        hub.run(1, rect(32.2));
        assert_eq!(m.process(), None);
        assert_eq!(m.process(), None, "nothing pending");
    }

    #[test]
    fn last_record_in_a_batch_wins() {
        let hub: ResizeHub<u32> = ResizeHub::new();
        let mut m = MarginMonitor::new(&hub);
        m.observe(1);
        hub.run(1, rect(10.0));
        hub.run(1, rect(48.0));
        assert_eq!(m.process(), Some(ObservationMargin::new(48)));
    }

    #[test]
    fn observing_another_element_releases_the_first() {
        let hub: ResizeHub<u32> = ResizeHub::new();
        let mut m = MarginMonitor::new(&hub);
        m.observe(1);
        m.observe(2);
        assert!(!hub.is_observed(1));
        assert!(hub.is_observed(2));
        hub.run(1, rect(99.0));
        assert_eq!(m.process(), None);
        assert_eq!(m.element(), Some(2));

        m.unobserve();
        assert_eq!(hub.live_observers(), 0);
        assert_eq!(m.process(), None);
    }
}
