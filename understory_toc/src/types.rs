// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core value types: targets, margins, the active target, and jump requests.
//!
//! Everything here is a plain value. The navigator replaces these wholesale on
//! each recompute instead of mutating them in place.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use understory_observe::RootMargin;

/// A navigable anchor harvested from caller content.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavigationTarget<K> {
    /// Stable identifier; unique within one [`TargetSet`] and usable as a URL fragment.
    pub id: String,
    /// Human-readable label.
    pub label: String,
    /// Position among accepted anchors in document order, starting at `0`.
    pub order: usize,
    /// Host node backing the anchor.
    pub node: K,
}

impl<K> NavigationTarget<K> {
    /// In-page link to the target, e.g. `#intro`.
    pub fn fragment(&self) -> String {
        format!("#{}", self.id)
    }
}

/// An ordered, immutable set of targets produced by one harvest.
///
/// Targets are stored by ascending `order`, so iteration is document order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TargetSet<K> {
    targets: Vec<NavigationTarget<K>>,
}

impl<K> Default for TargetSet<K> {
    fn default() -> Self {
        Self {
            targets: Vec::new(),
        }
    }
}

impl<K: Copy + Eq> TargetSet<K> {
    /// Build a set from targets whose `order` matches their index.
    pub(crate) fn from_ordered(targets: Vec<NavigationTarget<K>>) -> Self {
        debug_assert!(
            targets.iter().enumerate().all(|(i, t)| t.order == i),
            "targets must be stored by ascending order"
        );
        Self { targets }
    }

    /// Number of targets.
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// True when the harvest found nothing navigable.
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Targets in document order.
    pub fn iter(&self) -> core::slice::Iter<'_, NavigationTarget<K>> {
        self.targets.iter()
    }

    /// Targets as a slice, indexed by `order`.
    pub fn as_slice(&self) -> &[NavigationTarget<K>] {
        &self.targets
    }

    /// The first target in document order.
    pub fn first(&self) -> Option<&NavigationTarget<K>> {
        self.targets.first()
    }

    /// Look up a target by id.
    pub fn get(&self, id: &str) -> Option<&NavigationTarget<K>> {
        self.targets.iter().find(|t| t.id == id)
    }

    /// Whether a target with `id` exists.
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Look up the target backed by `node`.
    pub fn by_node(&self, node: K) -> Option<&NavigationTarget<K>> {
        self.targets.iter().find(|t| t.node == node)
    }
}

impl<'a, K> IntoIterator for &'a TargetSet<K> {
    type Item = &'a NavigationTarget<K>;
    type IntoIter = core::slice::Iter<'a, NavigationTarget<K>>;

    fn into_iter(self) -> Self::IntoIter {
        self.targets.iter()
    }
}

/// Height of the compact control, in whole pixels.
///
/// The tracker shrinks the top of the visibility root by this amount so a
/// target hidden behind the control does not count as visible.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObservationMargin(u32);

impl ObservationMargin {
    /// No offset.
    pub const ZERO: Self = Self(0);

    /// Margin of `px` pixels.
    pub const fn new(px: u32) -> Self {
        Self(px)
    }

    /// Round a measured height half-up to whole pixels.
    ///
    /// Negative and NaN heights clamp to zero.
    ///
    /// ```
    /// use understory_toc::ObservationMargin;
    ///
    /// assert_eq!(ObservationMargin::from_height(31.5).px(), 32);
    /// assert_eq!(ObservationMargin::from_height(31.49).px(), 31);
    /// assert_eq!(ObservationMargin::from_height(f64::NAN).px(), 0);
    /// ```
    pub fn from_height(height: f64) -> Self {
        if height.is_nan() || height <= 0.0 {
            return Self::ZERO;
        }
        #[allow(
            clippy::cast_possible_truncation,
            reason = "float-to-int casts saturate; heights beyond u32 are not meaningful."
        )]
        Self((height + 0.5) as u32)
    }

    /// Value in pixels.
    pub const fn px(self) -> u32 {
        self.0
    }

    /// Root margin that hides the top `px` pixels of the viewport.
    pub fn root_margin(self) -> RootMargin {
        RootMargin::top(-f64::from(self.0))
    }
}

/// The target currently indicated in both presentations, with its provenance.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ActiveTarget {
    /// Nothing to indicate (no targets).
    #[default]
    None,
    /// Picked by the selection resolver from intersection state.
    Resolved(String),
    /// Provisionally set by a user-initiated jump, until a target resolves.
    Jump(String),
    /// Chosen by the fallback policy because nothing intersects.
    Fallback(String),
}

impl ActiveTarget {
    /// Id of the indicated target, if any.
    pub fn id(&self) -> Option<&str> {
        match self {
            Self::None => None,
            Self::Resolved(id) | Self::Jump(id) | Self::Fallback(id) => Some(id),
        }
    }

    /// True for an assignment made by a user jump.
    pub fn is_provisional(&self) -> bool {
        matches!(self, Self::Jump(_))
    }
}

/// A request for the host to navigate to an in-page fragment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JumpRequest<K> {
    /// Target id.
    pub id: String,
    /// Fragment to navigate to, `#` followed by the id.
    pub fragment: String,
    /// Host node backing the target, for hosts that scroll directly.
    pub node: K,
}

/// A user interaction with one of the presentations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UserAction {
    /// A link in the expanded list was activated.
    Activate(String),
    /// The compact selector's value changed.
    SelectChange(String),
}

impl UserAction {
    /// Id of the target the user picked.
    pub fn id(&self) -> &str {
        match self {
            Self::Activate(id) | Self::SelectChange(id) => id,
        }
    }
}
