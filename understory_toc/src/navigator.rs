// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The navigator state container.
//!
//! ## Inputs
//!
//! [`TableOfContents`] changes state only in response to explicit inputs:
//!
//! - [`content_changed`](TableOfContents::content_changed): the slotted content
//!   mutated. Re-harvest, tear down and resubscribe the tracker, drop state for
//!   removed targets.
//! - [`flush`](TableOfContents::flush): deliver pending observation records.
//!   Visibility records are applied first, then resize records (which may
//!   reconfigure the tracker with a new margin).
//! - [`handle_user_jump`](TableOfContents::handle_user_jump) /
//!   [`handle_action`](TableOfContents::handle_action): the user picked a target.
//! - [`set_viewport_width`](TableOfContents::set_viewport_width): the viewport
//!   resized; only the layout changes.
//!
//! After each input the navigator recomputes the active target and, if anything
//! changed, publishes a new [`NavigatorSnapshot`] to subscribers.
//!
//! ## Ticks
//!
//! Observation is asynchronous in any real host: elements observed during
//! `content_changed` only produce records once the host has run its observers,
//! so records are never available in the same call that subscribed. Hosts call
//! `flush` once per tick, after their observers had a chance to run.

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::vec::Vec;

use understory_observe::{ResizeBackend, VisibilityBackend, VisibilityEntry};

use crate::config::TocConfig;
use crate::error::TocError;
use crate::harvest::harvest;
use crate::margin::MarginMonitor;
use crate::resolve::{IntersectionState, resolve, settle};
use crate::source::ContentSource;
use crate::tracker::IntersectionTracker;
use crate::types::{ActiveTarget, JumpRequest, ObservationMargin, TargetSet, UserAction};
use crate::view::{Layout, Presentation, render};

/// Immutable view of everything the navigator tracks.
///
/// Replaced wholesale on every change; `revision` increases by one each time.
#[derive(Clone, Debug, PartialEq)]
pub struct NavigatorSnapshot<K> {
    /// Number of published changes.
    pub revision: u64,
    /// Targets from the most recent harvest.
    pub targets: Rc<TargetSet<K>>,
    /// Reported intersection state, keyed by target id.
    pub intersection: IntersectionState,
    /// The indicated target.
    pub active: ActiveTarget,
    /// Height of the compact control.
    pub margin: ObservationMargin,
}

impl<K> Default for NavigatorSnapshot<K> {
    fn default() -> Self {
        Self {
            revision: 0,
            targets: Rc::new(TargetSet::default()),
            intersection: IntersectionState::default(),
            active: ActiveTarget::None,
            margin: ObservationMargin::ZERO,
        }
    }
}

/// Handle returned by [`TableOfContents::subscribe`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener<K> = Box<dyn FnMut(&NavigatorSnapshot<K>)>;

/// A table-of-contents navigator over host nodes `K`.
///
/// `V` provides visibility observation for the targets, `R` size observation
/// for the compact control.
pub struct TableOfContents<K: Copy + Eq, V: VisibilityBackend<K>, R: ResizeBackend<K>> {
    config: TocConfig,
    tracker: IntersectionTracker<K, V>,
    monitor: MarginMonitor<K, R>,
    snapshot: NavigatorSnapshot<K>,
    viewport_width: f64,
    jumps: Vec<JumpRequest<K>>,
    listeners: Vec<(SubscriptionId, Listener<K>)>,
    next_subscription: u64,
}

impl<K, V, R> core::fmt::Debug for TableOfContents<K, V, R>
where
    K: Copy + Eq + core::fmt::Debug,
    V: VisibilityBackend<K>,
    R: ResizeBackend<K>,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TableOfContents")
            .field("snapshot", &self.snapshot)
            .field("tracker", &self.tracker)
            .field("monitor", &self.monitor)
            .field("viewport_width", &self.viewport_width)
            .field("pending_jumps", &self.jumps.len())
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

impl<K: Copy + Eq, V: VisibilityBackend<K>, R: ResizeBackend<K>> TableOfContents<K, V, R> {
    /// Create a navigator, failing fast if either observation primitive is missing.
    ///
    /// The viewport width starts at `0.0`, i.e. the compact layout.
    pub fn new(config: TocConfig, visibility: V, resize: R) -> Result<Self, TocError> {
        visibility.available()?;
        resize.available()?;
        let tracker = IntersectionTracker::new(visibility, config.threshold);
        let monitor = MarginMonitor::new(&resize);
        Ok(Self {
            config,
            tracker,
            monitor,
            snapshot: NavigatorSnapshot::default(),
            viewport_width: 0.0,
            jumps: Vec::new(),
            listeners: Vec::new(),
            next_subscription: 0,
        })
    }

    /// Start measuring the compact control so its height feeds the margin.
    pub fn mount(&mut self, compact_control: K) {
        self.monitor.observe(compact_control);
    }

    /// Re-harvest `root` and resubscribe the tracker to the new targets.
    ///
    /// Returns `true` if the snapshot changed.
    pub fn content_changed<S>(&mut self, source: &S, root: K) -> bool
    where
        S: ContentSource<Node = K>,
    {
        let targets = Rc::new(harvest(source, root, &self.config.rules));
        // Teardown of the old set completes inside `configure` before any new
        // element is observed.
        self.tracker.configure(&targets, self.snapshot.margin);
        let intersection = self.snapshot.intersection.retain_targets(&targets);
        self.recompute(targets, intersection, self.snapshot.margin, None)
    }

    /// Deliver pending observation records.
    ///
    /// Returns `true` if the snapshot changed.
    pub fn flush(&mut self) -> bool {
        let records = self.tracker.take_records();
        let mut changed = self.apply_visibility(&records);
        if let Some(margin) = self.monitor.process() {
            let targets = Rc::clone(&self.snapshot.targets);
            self.tracker.configure(&targets, margin);
            let intersection = self.snapshot.intersection.clone();
            changed |= self.recompute(targets, intersection, margin, None);
        }
        changed
    }

    /// Apply visibility records, ignoring any for nodes that are not targets.
    ///
    /// Returns `true` if the snapshot changed.
    pub fn apply_visibility(&mut self, records: &[VisibilityEntry<K>]) -> bool {
        let targets = Rc::clone(&self.snapshot.targets);
        let updates: Vec<(&str, bool)> = records
            .iter()
            .filter_map(|r| {
                let t = targets.by_node(r.target)?;
                Some((t.id.as_str(), r.is_intersecting))
            })
            .collect();
        if updates.is_empty() {
            return false;
        }
        tracing::trace!(records = updates.len(), "applying visibility records");
        let intersection = self.snapshot.intersection.with_updates(updates);
        let margin = self.snapshot.margin;
        self.recompute(Rc::clone(&targets), intersection, margin, None)
    }

    /// The user picked `id`: indicate it immediately, then request the jump.
    ///
    /// Tracking keeps running, so a later intersection record may replace the
    /// provisional indication. Unknown ids are ignored.
    pub fn handle_user_jump(&mut self, id: &str) -> Option<JumpRequest<K>> {
        let Some(target) = self.snapshot.targets.get(id) else {
            tracing::debug!(id, "ignoring jump to unknown target");
            return None;
        };
        let request = JumpRequest {
            id: target.id.clone(),
            fragment: target.fragment(),
            node: target.node,
        };
        let targets = Rc::clone(&self.snapshot.targets);
        let intersection = self.snapshot.intersection.clone();
        let margin = self.snapshot.margin;
        self.recompute(
            targets,
            intersection,
            margin,
            Some(ActiveTarget::Jump(request.id.clone())),
        );
        self.jumps.push(request.clone());
        Some(request)
    }

    /// Route a user interaction from either presentation.
    pub fn handle_action(&mut self, action: &UserAction) -> Option<JumpRequest<K>> {
        self.handle_user_jump(action.id())
    }

    /// Drain jump requests the host has not yet performed, oldest first.
    pub fn take_jump_requests(&mut self) -> Vec<JumpRequest<K>> {
        core::mem::take(&mut self.jumps)
    }

    /// Record the viewport width and return the resulting layout.
    pub fn set_viewport_width(&mut self, width: f64) -> Layout {
        self.viewport_width = width;
        self.layout()
    }

    /// Layout for the current viewport width.
    pub fn layout(&self) -> Layout {
        Layout::for_width(self.viewport_width, self.config.breakpoint)
    }

    /// Presentation state for both views.
    pub fn presentation(&self) -> Presentation {
        render(&self.snapshot.targets, &self.snapshot.active, self.layout())
    }

    /// The current snapshot.
    pub fn snapshot(&self) -> &NavigatorSnapshot<K> {
        &self.snapshot
    }

    /// Targets from the most recent harvest.
    pub fn targets(&self) -> &TargetSet<K> {
        &self.snapshot.targets
    }

    /// The indicated target.
    pub fn active(&self) -> &ActiveTarget {
        &self.snapshot.active
    }

    /// What the selection resolver alone picks, ignoring fallback and jumps.
    pub fn resolved(&self) -> Option<&str> {
        resolve(&self.snapshot.intersection, &self.snapshot.targets).map(|t| t.id.as_str())
    }

    /// The configuration.
    pub fn config(&self) -> &TocConfig {
        &self.config
    }

    /// The intersection tracker, for inspection.
    pub fn tracker(&self) -> &IntersectionTracker<K, V> {
        &self.tracker
    }

    /// Call `listener` with every published snapshot.
    pub fn subscribe(
        &mut self,
        listener: impl FnMut(&NavigatorSnapshot<K>) + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns `false` if it was already removed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(l, _)| *l != id);
        self.listeners.len() != before
    }

    /// Release every observation registration.
    ///
    /// Call when the navigator leaves the document. Dropping the navigator has
    /// the same effect.
    pub fn disconnect(&mut self) {
        self.tracker.teardown();
        self.monitor.unobserve();
    }

    fn recompute(
        &mut self,
        targets: Rc<TargetSet<K>>,
        intersection: IntersectionState,
        margin: ObservationMargin,
        provisional: Option<ActiveTarget>,
    ) -> bool {
        let active = match provisional {
            Some(active) => active,
            None => settle(
                resolve(&intersection, &targets),
                &self.snapshot.active,
                &targets,
                self.config.fallback,
            ),
        };
        let next = NavigatorSnapshot {
            revision: self.snapshot.revision,
            targets,
            intersection,
            active,
            margin,
        };
        if next == self.snapshot {
            return false;
        }
        self.snapshot = NavigatorSnapshot {
            revision: self.snapshot.revision + 1,
            ..next
        };
        for (_, listener) in &mut self.listeners {
            listener(&self.snapshot);
        }
        true
    }
}

#[cfg(all(test, feature = "content_adapter"))]
mod tests {
    use super::*;
    use crate::config::FallbackPolicy;
    use alloc::string::{String, ToString};
    use alloc::vec;
    use core::cell::Cell;
    use kurbo::Rect;
    use understory_content::{Element, NodeId, Tree};
    use understory_observe::memory::{ResizeHub, VisibilityHub};
    use understory_observe::{ObserveError, Primitive, RootMargin, VisibilityOptions};

    type Toc = TableOfContents<NodeId, VisibilityHub<NodeId>, ResizeHub<NodeId>>;

    struct Fixture {
        tree: Tree,
        root: NodeId,
        compact: NodeId,
        anchors: Vec<NodeId>,
        visibility: VisibilityHub<NodeId>,
        resize: ResizeHub<NodeId>,
        toc: Toc,
    }

    impl Fixture {
        fn new(config: TocConfig) -> Self {
            let mut tree = Tree::new();
            let root = tree.insert_element(None, Element::new("div"));
            let anchors = (1..=3)
                .map(|n| {
                    let a = tree.insert_element(
                        Some(root),
                        Element::new("a").with_attribute("name", alloc::format!("{n}")),
                    );
                    tree.insert_text(Some(a), alloc::format!("Section - {n}"));
                    a
                })
                .collect();
            let compact = tree.insert_element(None, Element::new("div"));
            let _ = tree.commit();

            let visibility = VisibilityHub::new();
            let resize = ResizeHub::new();
            let mut toc = Toc::new(config, visibility.clone(), resize.clone()).unwrap();
            toc.mount(compact);
            Self {
                tree,
                root,
                compact,
                anchors,
                visibility,
                resize,
                toc,
            }
        }

        fn harvest(&mut self) -> bool {
            self.toc.content_changed(&self.tree, self.root)
        }

        fn intersect(&mut self, n: usize, is_intersecting: bool) {
            self.visibility.run(self.anchors[n - 1], is_intersecting);
            self.toc.flush();
        }

        fn expanded_flags(&self) -> Vec<bool> {
            self.toc
                .presentation()
                .expanded
                .iter()
                .map(|i| i.active)
                .collect()
        }

        fn compact_value(&self) -> Option<String> {
            self.toc.presentation().compact.value
        }
    }

    #[test]
    fn harvested_targets_render_as_links() {
        let mut f = Fixture::new(TocConfig::default());
        assert!(f.harvest());
        let p = f.toc.presentation();
        let links: Vec<(&str, &str, &str)> = p
            .expanded
            .iter()
            .map(|i| (i.id.as_str(), i.href.as_str(), i.label.as_str()))
            .collect();
        assert_eq!(
            links,
            vec![
                ("1", "#1", "Section - 1"),
                ("2", "#2", "Section - 2"),
                ("3", "#3", "Section - 3"),
            ]
        );
    }

    #[test]
    fn intersection_marks_target_active() {
        let mut f = Fixture::new(TocConfig::default());
        f.harvest();
        f.intersect(2, true);
        assert_eq!(f.expanded_flags(), vec![false, true, false]);
        assert_eq!(f.compact_value().as_deref(), Some("2"));
        assert_eq!(f.toc.active(), &ActiveTarget::Resolved("2".into()));
    }

    #[test]
    fn first_intersecting_target_wins() {
        let mut f = Fixture::new(TocConfig::default());
        f.harvest();
        f.intersect(2, true);
        f.intersect(3, true);
        assert_eq!(f.expanded_flags(), vec![false, true, false]);
        assert_eq!(f.compact_value().as_deref(), Some("2"));

        // Arrival order does not matter.
        let mut g = Fixture::new(TocConfig::default());
        g.harvest();
        g.visibility.run(g.anchors[2], true);
        g.visibility.run(g.anchors[1], true);
        g.toc.flush();
        assert_eq!(g.toc.resolved(), Some("2"));
    }

    #[test]
    fn next_target_takes_over_when_the_first_leaves() {
        let mut f = Fixture::new(TocConfig::default());
        f.harvest();
        f.intersect(2, true);
        f.intersect(3, true);
        f.intersect(2, false);
        assert_eq!(f.compact_value().as_deref(), Some("3"));
    }

    #[test]
    fn compact_height_becomes_the_root_margin() {
        let mut f = Fixture::new(TocConfig::default());
        f.harvest();
        f.resize.run(f.compact, Rect::new(0.0, 0.0, 320.0, 32.0));
        assert!(f.toc.flush());
        assert_eq!(
            f.visibility.instance_options(),
            vec![VisibilityOptions {
                root_margin: RootMargin::top(-32.0),
                threshold: 1.0,
            }]
        );
        assert_eq!(
            f.visibility.instance_options()[0].root_margin.to_string(),
            "-32px 0px 0px 0px"
        );
        assert_eq!(f.toc.snapshot().margin, ObservationMargin::new(32));
        assert_eq!(f.toc.tracker().generation(), 2);
    }

    #[test]
    fn margin_survives_reharvest() {
        let mut f = Fixture::new(TocConfig::default());
        f.harvest();
        f.resize.run(f.compact, Rect::new(0.0, 0.0, 320.0, 48.0));
        f.toc.flush();
        let extra = f
            .tree
            .insert_element(Some(f.root), Element::new("a").with_attribute("name", "4"));
        f.tree.insert_text(Some(extra), "Section - 4");
        f.harvest();
        assert_eq!(f.toc.targets().len(), 4);
        assert_eq!(
            f.visibility.instance_options()[0].root_margin,
            RootMargin::top(-48.0)
        );
    }

    #[test]
    fn removed_target_stops_reporting() {
        let mut f = Fixture::new(TocConfig::default());
        f.harvest();
        f.intersect(2, true);
        let removed = f.anchors[1];
        f.tree.remove(removed);
        assert!(f.tree.commit().is_structural());
        f.harvest();

        let ids: Vec<&str> = f.toc.targets().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["1", "3"]);
        assert_eq!(f.toc.snapshot().intersection.get("2"), None);
        assert!(!f.visibility.is_observed(removed));

        let before = f.toc.snapshot().clone();
        f.visibility.run(removed, true);
        assert!(!f.toc.flush());
        assert_eq!(f.toc.snapshot(), &before);

        // Records naming a removed node are ignored even if delivered directly.
        assert!(!f.toc.apply_visibility(&[VisibilityEntry {
            target: removed,
            is_intersecting: true,
        }]));
    }

    #[test]
    fn surviving_targets_keep_their_state() {
        let mut f = Fixture::new(TocConfig::default());
        f.harvest();
        f.intersect(3, true);
        f.tree.remove(f.anchors[0]);
        let _ = f.tree.commit();
        f.harvest();
        assert_eq!(f.toc.snapshot().intersection.get("3"), Some(true));
        assert_eq!(f.toc.active(), &ActiveTarget::Resolved("3".into()));
    }

    #[test]
    fn user_jump_applies_before_any_intersection() {
        let mut f = Fixture::new(TocConfig::default());
        f.harvest();
        let request = f.toc.handle_user_jump("2").unwrap();
        assert_eq!(f.toc.active(), &ActiveTarget::Jump("2".into()));
        assert_eq!(f.compact_value().as_deref(), Some("2"));
        assert_eq!(request.fragment, "#2");
        assert_eq!(request.node, f.anchors[1]);
        assert_eq!(f.toc.take_jump_requests(), vec![request]);
        assert!(f.toc.take_jump_requests().is_empty());
    }

    #[test]
    fn jump_is_published_before_the_request_is_queued() {
        let mut f = Fixture::new(TocConfig::default());
        f.harvest();
        let seen = Rc::new(Cell::new(false));
        let seen_in = Rc::clone(&seen);
        f.toc.subscribe(move |s| {
            if s.active == ActiveTarget::Jump("3".into()) {
                seen_in.set(true);
            }
        });
        f.toc.handle_action(&UserAction::SelectChange("3".into()));
        assert!(seen.get());
        assert_eq!(f.toc.take_jump_requests().len(), 1);
    }

    #[test]
    fn later_intersection_overrides_a_jump() {
        let mut f = Fixture::new(TocConfig::default());
        f.harvest();
        f.toc.handle_action(&UserAction::Activate("3".into()));
        // Unrelated records keep the provisional target.
        f.intersect(1, false);
        assert_eq!(f.toc.active(), &ActiveTarget::Jump("3".into()));
        f.intersect(1, true);
        assert_eq!(f.toc.active(), &ActiveTarget::Resolved("1".into()));
    }

    #[test]
    fn unknown_jump_is_ignored() {
        let mut f = Fixture::new(TocConfig::default());
        f.harvest();
        let before = f.toc.snapshot().revision;
        assert!(f.toc.handle_user_jump("nope").is_none());
        assert_eq!(f.toc.snapshot().revision, before);
        assert!(f.toc.take_jump_requests().is_empty());
    }

    #[test]
    fn compact_view_defaults_to_first_target() {
        let mut f = Fixture::new(TocConfig::default());
        f.harvest();
        assert_eq!(f.toc.resolved(), None);
        assert_eq!(f.toc.active(), &ActiveTarget::Fallback("1".into()));
        assert_eq!(f.compact_value().as_deref(), Some("1"));
        assert_eq!(f.expanded_flags(), vec![true, false, false]);
    }

    #[test]
    fn keep_last_holds_position_when_nothing_intersects() {
        let mut f = Fixture::new(TocConfig::default());
        f.harvest();
        f.intersect(3, true);
        f.intersect(3, false);
        assert_eq!(f.toc.active(), &ActiveTarget::Fallback("3".into()));

        let mut g = Fixture::new(TocConfig::default().with_fallback(FallbackPolicy::First));
        g.harvest();
        g.intersect(3, true);
        g.intersect(3, false);
        assert_eq!(g.toc.active(), &ActiveTarget::Fallback("1".into()));
    }

    #[test]
    fn empty_content_is_tolerated() {
        let mut tree = Tree::new();
        let root = tree.insert_element(None, Element::new("div"));
        let visibility = VisibilityHub::new();
        let mut toc = Toc::new(TocConfig::default(), visibility.clone(), ResizeHub::new()).unwrap();
        toc.content_changed(&tree, root);
        assert!(toc.targets().is_empty());
        assert_eq!(toc.active(), &ActiveTarget::None);
        assert!(visibility.instance_options().is_empty());
        assert_eq!(toc.presentation().compact.value, None);
    }

    #[test]
    fn missing_primitive_fails_construction() {
        let err = Toc::new(
            TocConfig::default(),
            VisibilityHub::unavailable(),
            ResizeHub::new(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            TocError::Observe(ObserveError::Unavailable {
                primitive: Primitive::Visibility
            })
        );

        let err = Toc::new(
            TocConfig::default(),
            VisibilityHub::new(),
            ResizeHub::unavailable(),
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "table of contents cannot track the viewport: resize observation is not available in this host"
        );
    }

    #[test]
    fn subscribers_see_each_change_once() {
        let mut f = Fixture::new(TocConfig::default());
        let count = Rc::new(Cell::new(0_u32));
        let count_in = Rc::clone(&count);
        let id = f.toc.subscribe(move |_| count_in.set(count_in.get() + 1));
        f.harvest();
        assert_eq!(count.get(), 1);
        // Re-harvesting identical content publishes nothing.
        assert!(!f.harvest());
        assert_eq!(count.get(), 1);
        f.intersect(2, true);
        assert_eq!(count.get(), 2);
        assert_eq!(f.toc.snapshot().revision, 2);

        assert!(f.toc.unsubscribe(id));
        assert!(!f.toc.unsubscribe(id));
        f.intersect(1, true);
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn layout_follows_viewport_width() {
        let mut f = Fixture::new(TocConfig::default().with_breakpoint(800.0));
        assert_eq!(f.toc.layout(), Layout::Compact);
        assert_eq!(f.toc.set_viewport_width(1024.0), Layout::Expanded);
        assert_eq!(f.toc.presentation().layout, Layout::Expanded);
        assert_eq!(f.toc.set_viewport_width(640.0), Layout::Compact);
    }

    #[test]
    fn disconnect_releases_all_registrations() {
        let mut f = Fixture::new(TocConfig::default());
        f.harvest();
        assert_eq!(f.resize.live_observers(), 1);
        f.toc.disconnect();
        assert!(f.visibility.instance_options().is_empty());
        assert_eq!(f.resize.live_observers(), 0);
        assert!(f.anchors.iter().all(|&a| !f.visibility.is_observed(a)));
    }

    #[test]
    fn dropping_releases_all_registrations() {
        let Fixture {
            toc,
            visibility,
            resize,
            ..
        } = {
            let mut f = Fixture::new(TocConfig::default());
            f.harvest();
            f
        };
        drop(toc);
        assert!(visibility.instance_options().is_empty());
        assert_eq!(resize.live_observers(), 0);
    }

    #[test]
    fn geometry_drives_the_active_target() {
        let mut f = Fixture::new(TocConfig::default());
        for (&a, i) in f.anchors.iter().zip(0_u32..) {
            let y = 500.0 * f64::from(i);
            f.tree.set_bounds(a, Rect::new(0.0, y, 600.0, y + 24.0));
        }
        let _ = f.tree.commit();
        f.harvest();

        let tree = &f.tree;
        f.visibility
            .evaluate(Rect::new(0.0, 480.0, 1280.0, 1200.0), |n| tree.bounds(n));
        f.toc.flush();
        assert_eq!(f.toc.active(), &ActiveTarget::Resolved("2".into()));

        // A 32px compact bar now covers anchor 2.
        f.resize.run(f.compact, Rect::new(0.0, 0.0, 320.0, 32.0));
        f.toc.flush();
        let tree = &f.tree;
        f.visibility
            .evaluate(Rect::new(0.0, 480.0, 1280.0, 1200.0), |n| tree.bounds(n));
        f.toc.flush();
        assert_eq!(f.toc.snapshot().intersection.get("2"), Some(false));
        assert_eq!(f.toc.active(), &ActiveTarget::Resolved("3".into()));
    }
}
