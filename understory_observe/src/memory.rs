// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory observation backends.
//!
//! [`VisibilityHub`] and [`ResizeHub`] implement the backend traits without a
//! host. Each hub is a cheap, cloneable handle to a shared registry of the
//! observers connected through it, so the code that owns the observers and the
//! code that drives the hub (a test, or a headless host loop) can both hold one.
//!
//! Records reach an observer in two ways:
//!
//! - Manual triggering with [`VisibilityHub::run`] / [`ResizeHub::run`], which
//!   queues a record on every live observer watching the target.
//! - Geometry with [`VisibilityHub::evaluate`], which intersects each target's
//!   bounds with the margin-adjusted viewport and queues a record when the
//!   result differs from the last one delivered for that target. The first
//!   evaluation after `observe` always reports, like the browser primitive's
//!   initial notification.
//!
//! A record only exists inside an observer, so dropping or disconnecting an
//! observer guarantees none of its records are seen later.
//!
//! ```
//! use understory_observe::memory::VisibilityHub;
//! use understory_observe::{RootMargin, VisibilityBackend, VisibilityObserver, VisibilityOptions};
//!
//! let hub: VisibilityHub<u32> = VisibilityHub::new();
//! let mut observer = hub.connect(VisibilityOptions {
//!     root_margin: RootMargin::top(-32.0),
//!     threshold: 1.0,
//! });
//! // Observers only count as registered once they watch something.
//! assert!(hub.instance_options().is_empty());
//!
//! observer.observe(7);
//! hub.run(7, true);
//! let records = observer.take_records();
//! assert_eq!(records.len(), 1);
//! assert!(records[0].is_intersecting);
//! assert_eq!(hub.instance_options()[0].root_margin.to_string(), "-32px 0px 0px 0px");
//! ```

use alloc::collections::BTreeMap;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;

use kurbo::Rect;

use crate::backend::{ResizeBackend, ResizeObserver, VisibilityBackend, VisibilityObserver};
use crate::error::ObserveError;
use crate::types::{Primitive, ResizeEntry, VisibilityEntry, VisibilityOptions};

/// Fraction of `target` inside `root`, or `None` when they do not touch.
///
/// Edge-adjacent rectangles touch with a ratio of `0.0`. A zero-area target
/// that touches the root counts as fully inside.
pub fn intersection_ratio(target: Rect, root: Rect) -> Option<f64> {
    let x0 = target.x0.max(root.x0);
    let y0 = target.y0.max(root.y0);
    let x1 = target.x1.min(root.x1);
    let y1 = target.y1.min(root.y1);
    if x1 < x0 || y1 < y0 {
        return None;
    }
    let area = target.area();
    if area <= 0.0 {
        return Some(1.0);
    }
    Some(((x1 - x0) * (y1 - y0) / area).min(1.0))
}

#[derive(Debug)]
struct Slot<K, O, R, X> {
    options: O,
    targets: Vec<K>,
    records: Vec<R>,
    extra: X,
}

#[derive(Debug)]
struct Registry<K, O, R, X> {
    available: bool,
    next_id: u32,
    slots: BTreeMap<u32, Slot<K, O, R, X>>,
}

impl<K: Copy + Eq, O: Copy, R, X: Default> Registry<K, O, R, X> {
    fn new(available: bool) -> Self {
        Self {
            available,
            next_id: 0,
            slots: BTreeMap::new(),
        }
    }

    fn connect(&mut self, options: O) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        self.slots.insert(
            id,
            Slot {
                options,
                targets: Vec::new(),
                records: Vec::new(),
                extra: X::default(),
            },
        );
        id
    }

    fn observe(&mut self, id: u32, target: K) {
        if let Some(slot) = self.slots.get_mut(&id)
            && !slot.targets.contains(&target)
        {
            slot.targets.push(target);
        }
    }

    fn unobserve(&mut self, id: u32, target: K, target_of: impl Fn(&R) -> K) -> Option<&mut X> {
        let slot = self.slots.get_mut(&id)?;
        slot.targets.retain(|&t| t != target);
        slot.records.retain(|r| target_of(r) != target);
        Some(&mut slot.extra)
    }

    fn disconnect(&mut self, id: u32) {
        if let Some(slot) = self.slots.get_mut(&id) {
            slot.targets.clear();
            slot.records.clear();
            slot.extra = X::default();
        }
    }

    fn release(&mut self, id: u32) {
        self.slots.remove(&id);
    }

    fn take(&mut self, id: u32) -> Vec<R> {
        self.slots
            .get_mut(&id)
            .map(|s| core::mem::take(&mut s.records))
            .unwrap_or_default()
    }

    /// Slots that watch at least one target.
    fn live(&self) -> impl Iterator<Item = &Slot<K, O, R, X>> {
        self.slots.values().filter(|s| !s.targets.is_empty())
    }

    fn live_mut(&mut self) -> impl Iterator<Item = &mut Slot<K, O, R, X>> {
        self.slots.values_mut().filter(|s| !s.targets.is_empty())
    }

    fn is_observed(&self, target: K) -> bool {
        self.live().any(|s| s.targets.contains(&target))
    }
}

type VisibilityRegistry<K> = Registry<K, VisibilityOptions, VisibilityEntry<K>, BTreeMap<K, bool>>;

/// In-memory [`VisibilityBackend`].
///
/// Cloning yields another handle to the same registry.
#[derive(Debug)]
pub struct VisibilityHub<K> {
    registry: Rc<RefCell<VisibilityRegistry<K>>>,
}

impl<K> Clone for VisibilityHub<K> {
    fn clone(&self) -> Self {
        Self {
            registry: Rc::clone(&self.registry),
        }
    }
}

impl<K: Copy + Ord> Default for VisibilityHub<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Copy + Ord> VisibilityHub<K> {
    /// Create a hub with no observers.
    pub fn new() -> Self {
        Self {
            registry: Rc::new(RefCell::new(Registry::new(true))),
        }
    }

    /// Create a hub that reports the primitive as missing from the host.
    pub fn unavailable() -> Self {
        Self {
            registry: Rc::new(RefCell::new(Registry::new(false))),
        }
    }

    /// Queue a record for `target` on every live observer watching it.
    pub fn run(&self, target: K, is_intersecting: bool) {
        let mut reg = self.registry.borrow_mut();
        for slot in reg.live_mut() {
            if slot.targets.contains(&target) {
                slot.records.push(VisibilityEntry {
                    target,
                    is_intersecting,
                });
                slot.extra.insert(target, is_intersecting);
            }
        }
    }

    /// Intersect every observed target with `viewport` and queue records for
    /// targets whose state changed since the last delivered record.
    ///
    /// Each observer applies its own root margin and threshold. Targets for
    /// which `bounds` returns `None` are treated as not intersecting.
    pub fn evaluate(&self, viewport: Rect, bounds: impl Fn(K) -> Option<Rect>) {
        let mut reg = self.registry.borrow_mut();
        for slot in reg.live_mut() {
            let root = slot.options.root_margin.apply(viewport);
            let threshold = slot.options.threshold;
            for &target in &slot.targets {
                let is_intersecting = bounds(target)
                    .and_then(|b| intersection_ratio(b, root))
                    .is_some_and(|ratio| ratio >= threshold);
                if slot.extra.get(&target) != Some(&is_intersecting) {
                    slot.extra.insert(target, is_intersecting);
                    slot.records.push(VisibilityEntry {
                        target,
                        is_intersecting,
                    });
                }
            }
        }
    }

    /// Options of every observer that currently watches at least one target.
    pub fn instance_options(&self) -> Vec<VisibilityOptions> {
        self.registry.borrow().live().map(|s| s.options).collect()
    }

    /// Whether any live observer watches `target`.
    pub fn is_observed(&self, target: K) -> bool {
        self.registry.borrow().is_observed(target)
    }
}

impl<K: Copy + Ord> VisibilityBackend<K> for VisibilityHub<K> {
    type Observer = MemoryVisibilityObserver<K>;

    fn available(&self) -> Result<(), ObserveError> {
        if self.registry.borrow().available {
            Ok(())
        } else {
            Err(ObserveError::Unavailable {
                primitive: Primitive::Visibility,
            })
        }
    }

    fn connect(&self, options: VisibilityOptions) -> Self::Observer {
        let id = self.registry.borrow_mut().connect(options);
        MemoryVisibilityObserver {
            hub: self.clone(),
            id,
            options,
        }
    }
}

/// Observer produced by [`VisibilityHub`].
#[derive(Debug)]
pub struct MemoryVisibilityObserver<K: Copy + Ord> {
    hub: VisibilityHub<K>,
    id: u32,
    options: VisibilityOptions,
}

impl<K: Copy + Ord> VisibilityObserver<K> for MemoryVisibilityObserver<K> {
    fn options(&self) -> &VisibilityOptions {
        &self.options
    }

    fn observe(&mut self, target: K) {
        self.hub.registry.borrow_mut().observe(self.id, target);
    }

    fn unobserve(&mut self, target: K) {
        let mut reg = self.hub.registry.borrow_mut();
        if let Some(last) = reg.unobserve(self.id, target, |r| r.target) {
            last.remove(&target);
        }
    }

    fn disconnect(&mut self) {
        self.hub.registry.borrow_mut().disconnect(self.id);
    }

    fn take_records(&mut self) -> Vec<VisibilityEntry<K>> {
        self.hub.registry.borrow_mut().take(self.id)
    }
}

impl<K: Copy + Ord> Drop for MemoryVisibilityObserver<K> {
    fn drop(&mut self) {
        self.hub.registry.borrow_mut().release(self.id);
    }
}

type ResizeRegistry<K> = Registry<K, (), ResizeEntry<K>, ()>;

/// In-memory [`ResizeBackend`].
///
/// Cloning yields another handle to the same registry.
#[derive(Debug)]
pub struct ResizeHub<K> {
    registry: Rc<RefCell<ResizeRegistry<K>>>,
}

impl<K> Clone for ResizeHub<K> {
    fn clone(&self) -> Self {
        Self {
            registry: Rc::clone(&self.registry),
        }
    }
}

impl<K: Copy + Eq> Default for ResizeHub<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Copy + Eq> ResizeHub<K> {
    /// Create a hub with no observers.
    pub fn new() -> Self {
        Self {
            registry: Rc::new(RefCell::new(Registry::new(true))),
        }
    }

    /// Create a hub that reports the primitive as missing from the host.
    pub fn unavailable() -> Self {
        Self {
            registry: Rc::new(RefCell::new(Registry::new(false))),
        }
    }

    /// Queue a record for `target` on every live observer watching it.
    pub fn run(&self, target: K, content_rect: Rect) {
        let mut reg = self.registry.borrow_mut();
        for slot in reg.live_mut() {
            if slot.targets.contains(&target) {
                slot.records.push(ResizeEntry {
                    target,
                    content_rect,
                });
            }
        }
    }

    /// Number of observers that currently watch at least one target.
    pub fn live_observers(&self) -> usize {
        self.registry.borrow().live().count()
    }

    /// Whether any live observer watches `target`.
    pub fn is_observed(&self, target: K) -> bool {
        self.registry.borrow().is_observed(target)
    }
}

impl<K: Copy + Eq> ResizeBackend<K> for ResizeHub<K> {
    type Observer = MemoryResizeObserver<K>;

    fn available(&self) -> Result<(), ObserveError> {
        if self.registry.borrow().available {
            Ok(())
        } else {
            Err(ObserveError::Unavailable {
                primitive: Primitive::Resize,
            })
        }
    }

    fn connect(&self) -> Self::Observer {
        let id = self.registry.borrow_mut().connect(());
        MemoryResizeObserver {
            hub: self.clone(),
            id,
        }
    }
}

/// Observer produced by [`ResizeHub`].
#[derive(Debug)]
pub struct MemoryResizeObserver<K: Copy + Eq> {
    hub: ResizeHub<K>,
    id: u32,
}

impl<K: Copy + Eq> ResizeObserver<K> for MemoryResizeObserver<K> {
    fn observe(&mut self, target: K) {
        self.hub.registry.borrow_mut().observe(self.id, target);
    }

    fn unobserve(&mut self, target: K) {
        let _ = self
            .hub
            .registry
            .borrow_mut()
            .unobserve(self.id, target, |r| r.target);
    }

    fn disconnect(&mut self) {
        self.hub.registry.borrow_mut().disconnect(self.id);
    }

    fn take_records(&mut self) -> Vec<ResizeEntry<K>> {
        self.hub.registry.borrow_mut().take(self.id)
    }
}

impl<K: Copy + Eq> Drop for MemoryResizeObserver<K> {
    fn drop(&mut self) {
        self.hub.registry.borrow_mut().release(self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RootMargin;
    use alloc::vec;

    fn full_visibility(top: f64) -> VisibilityOptions {
        VisibilityOptions {
            root_margin: RootMargin::top(top),
            threshold: 1.0,
        }
    }

    #[test]
    fn ratio_edges() {
        let root = Rect::new(0.0, 0.0, 100.0, 100.0);
        assert_eq!(intersection_ratio(Rect::new(10.0, 10.0, 20.0, 20.0), root), Some(1.0));
        assert_eq!(intersection_ratio(Rect::new(50.0, 90.0, 60.0, 110.0), root), Some(0.5));
        assert_eq!(intersection_ratio(Rect::new(0.0, 100.0, 10.0, 110.0), root), Some(0.0));
        assert_eq!(intersection_ratio(Rect::new(0.0, 101.0, 10.0, 110.0), root), None);
        // Zero-area anchors are either inside or out.
        assert_eq!(intersection_ratio(Rect::new(5.0, 5.0, 5.0, 5.0), root), Some(1.0));
        assert_eq!(intersection_ratio(Rect::new(5.0, -5.0, 5.0, -5.0), root), None);
    }

    #[test]
    fn run_reaches_only_observers_of_the_target() {
        let hub: VisibilityHub<u32> = VisibilityHub::new();
        let mut a = hub.connect(VisibilityOptions::default());
        let mut b = hub.connect(VisibilityOptions::default());
        a.observe(1);
        b.observe(2);
        hub.run(1, true);
        assert_eq!(
            a.take_records(),
            vec![VisibilityEntry {
                target: 1,
                is_intersecting: true
            }]
        );
        assert!(b.take_records().is_empty());
        assert!(a.take_records().is_empty(), "records are drained once");
    }

    #[test]
    fn unobserve_discards_pending_records() {
        let hub: VisibilityHub<u32> = VisibilityHub::new();
        let mut o = hub.connect(VisibilityOptions::default());
        o.observe(1);
        o.observe(2);
        hub.run(1, true);
        hub.run(2, true);
        o.unobserve(2);
        let records = o.take_records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].target, 1);
        hub.run(2, false);
        assert!(o.take_records().is_empty());
        assert!(!hub.is_observed(2));
    }

    #[test]
    fn dropping_an_observer_unregisters_it() {
        let hub: VisibilityHub<u32> = VisibilityHub::new();
        let mut o = hub.connect(full_visibility(-32.0));
        o.observe(1);
        assert_eq!(hub.instance_options(), vec![full_visibility(-32.0)]);
        drop(o);
        assert!(hub.instance_options().is_empty());
        assert!(!hub.is_observed(1));
    }

    #[test]
    fn disconnect_keeps_handle_but_stops_reporting() {
        let hub: VisibilityHub<u32> = VisibilityHub::new();
        let mut o = hub.connect(VisibilityOptions::default());
        o.observe(1);
        hub.run(1, true);
        o.disconnect();
        assert!(o.take_records().is_empty());
        assert!(hub.instance_options().is_empty());
        o.observe(1);
        hub.run(1, false);
        assert_eq!(o.take_records().len(), 1);
    }

    #[test]
    fn evaluate_reports_changes_only() {
        let hub: VisibilityHub<u32> = VisibilityHub::new();
        let mut o = hub.connect(full_visibility(-32.0));
        o.observe(1);
        o.observe(2);
        let bounds = |k: u32| match k {
            1 => Some(Rect::new(0.0, 40.0, 100.0, 60.0)),
            2 => Some(Rect::new(0.0, 400.0, 100.0, 420.0)),
            _ => None,
        };
        let viewport = Rect::new(0.0, 0.0, 800.0, 300.0);

        hub.evaluate(viewport, bounds);
        // Initial notification covers every target.
        assert_eq!(
            o.take_records(),
            vec![
                VisibilityEntry {
                    target: 1,
                    is_intersecting: true
                },
                VisibilityEntry {
                    target: 2,
                    is_intersecting: false
                },
            ]
        );

        hub.evaluate(viewport, bounds);
        assert!(o.take_records().is_empty());

        // Scroll so anchor 1 hides behind the 32px margin and anchor 2 appears.
        hub.evaluate(Rect::new(0.0, 30.0, 800.0, 430.0), bounds);
        assert_eq!(
            o.take_records(),
            vec![
                VisibilityEntry {
                    target: 1,
                    is_intersecting: false
                },
                VisibilityEntry {
                    target: 2,
                    is_intersecting: true
                },
            ]
        );
    }

    #[test]
    fn partially_visible_target_misses_full_threshold() {
        let hub: VisibilityHub<u32> = VisibilityHub::new();
        let mut o = hub.connect(full_visibility(0.0));
        o.observe(1);
        hub.evaluate(Rect::new(0.0, 0.0, 100.0, 100.0), |_| {
            Some(Rect::new(0.0, 90.0, 10.0, 110.0))
        });
        assert!(!o.take_records()[0].is_intersecting);
    }

    #[test]
    fn resize_run_and_liveness() {
        let hub: ResizeHub<u32> = ResizeHub::new();
        let mut o = hub.connect();
        assert_eq!(hub.live_observers(), 0);
        o.observe(9);
        assert_eq!(hub.live_observers(), 1);
        hub.run(9, Rect::new(0.0, 0.0, 320.0, 32.0));
        hub.run(8, Rect::new(0.0, 0.0, 1.0, 1.0));
        let records = o.take_records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].content_rect.height(), 32.0);
        o.unobserve(9);
        assert_eq!(hub.live_observers(), 0);
    }

    #[test]
    fn unavailable_hubs_fail_the_probe() {
        let v: VisibilityHub<u32> = VisibilityHub::unavailable();
        let r: ResizeHub<u32> = ResizeHub::unavailable();
        assert_eq!(
            v.available(),
            Err(ObserveError::Unavailable {
                primitive: Primitive::Visibility
            })
        );
        assert_eq!(
            r.available(),
            Err(ObserveError::Unavailable {
                primitive: Primitive::Resize
            })
        );
        assert!(VisibilityHub::<u32>::new().available().is_ok());
    }
}
