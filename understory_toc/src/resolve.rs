// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Selection: intersection state snapshots and the active-target policy.
//!
//! [`resolve`] is the pure selection rule: the intersecting target with the
//! lowest harvested order wins, whatever order the records arrived in.
//! [`settle`] layers the presentation policy on top: what to indicate when
//! nothing resolves.
//!
//! ```
//! use understory_toc::resolve::IntersectionState;
//!
//! let state = IntersectionState::new().with_updates([("3", true), ("2", true)]);
//! let state = state.with_updates([("3", false)]);
//! assert!(state.is_intersecting("2"));
//! assert_eq!(state.get("3"), Some(false));
//! assert_eq!(state.get("1"), None);
//! ```

use alloc::borrow::ToOwned;
use alloc::collections::BTreeMap;
use alloc::string::String;

use crate::config::FallbackPolicy;
use crate::types::{ActiveTarget, NavigationTarget, TargetSet};

/// Which targets currently intersect the configured viewport region.
///
/// Immutable: updates produce a new snapshot.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IntersectionState {
    entries: BTreeMap<String, bool>,
}

impl IntersectionState {
    /// An empty state: nothing reported yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Last reported state of `id`, `None` if never reported.
    pub fn get(&self, id: &str) -> Option<bool> {
        self.entries.get(id).copied()
    }

    /// Whether `id` was last reported as intersecting.
    pub fn is_intersecting(&self, id: &str) -> bool {
        self.get(id).unwrap_or(false)
    }

    /// Number of ids with a reported state.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing has been reported.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Reported states, ordered by id.
    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> + '_ {
        self.entries.iter().map(|(k, &v)| (k.as_str(), v))
    }

    /// A new snapshot with `updates` applied in order; later updates win.
    pub fn with_updates<'a>(&self, updates: impl IntoIterator<Item = (&'a str, bool)>) -> Self {
        let mut entries = self.entries.clone();
        for (id, is_intersecting) in updates {
            entries.insert(id.to_owned(), is_intersecting);
        }
        Self { entries }
    }

    /// A new snapshot keeping only ids present in `targets`.
    pub fn retain_targets<K: Copy + Eq>(&self, targets: &TargetSet<K>) -> Self {
        let mut entries = self.entries.clone();
        entries.retain(|id, _| targets.contains(id));
        Self { entries }
    }
}

/// The intersecting target with the lowest order, or `None` if nothing intersects.
pub fn resolve<'t, K: Copy + Eq>(
    state: &IntersectionState,
    targets: &'t TargetSet<K>,
) -> Option<&'t NavigationTarget<K>> {
    targets.iter().find(|t| state.is_intersecting(&t.id))
}

/// Decide what to indicate given the resolver's pick and the previous indication.
///
/// - A resolved target always wins.
/// - Otherwise a provisional jump target is kept while it exists.
/// - Otherwise `policy` applies.
/// - With no targets the result is [`ActiveTarget::None`].
pub fn settle<K: Copy + Eq>(
    resolved: Option<&NavigationTarget<K>>,
    previous: &ActiveTarget,
    targets: &TargetSet<K>,
    policy: FallbackPolicy,
) -> ActiveTarget {
    if let Some(t) = resolved {
        return ActiveTarget::Resolved(t.id.clone());
    }
    let surviving = previous.id().filter(|id| targets.contains(id));
    if let (ActiveTarget::Jump(_), Some(id)) = (previous, surviving) {
        return ActiveTarget::Jump(id.to_owned());
    }
    let kept = match policy {
        FallbackPolicy::KeepLast => surviving,
        FallbackPolicy::First => None,
    };
    match kept.or_else(|| targets.first().map(|t| t.id.as_str())) {
        Some(id) => ActiveTarget::Fallback(id.to_owned()),
        None => ActiveTarget::None,
    }
}
