// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Navigator configuration.

use crate::harvest::HarvestRules;

/// Viewport width, in pixels, at which the expanded presentation takes over.
///
/// Matches the design system's `lg` breakpoint.
pub const DEFAULT_BREAKPOINT: f64 = 1056.0;

/// What the navigator indicates when no target intersects.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum FallbackPolicy {
    /// Keep the last indicated target while it still exists, else the first target.
    #[default]
    KeepLast,
    /// Always indicate the first target.
    First,
}

/// Configuration for a [`TableOfContents`](crate::TableOfContents).
#[derive(Clone, Debug, PartialEq)]
pub struct TocConfig {
    /// Anchor harvesting rules.
    pub rules: HarvestRules,
    /// Width at or above which the expanded presentation is used.
    pub breakpoint: f64,
    /// Visibility threshold passed to the tracker. `1.0` means fully visible.
    pub threshold: f64,
    /// Indication policy when nothing intersects.
    pub fallback: FallbackPolicy,
}

impl Default for TocConfig {
    fn default() -> Self {
        Self {
            rules: HarvestRules::default(),
            breakpoint: DEFAULT_BREAKPOINT,
            threshold: 1.0,
            fallback: FallbackPolicy::default(),
        }
    }
}

impl TocConfig {
    /// Replace the harvesting rules.
    pub fn with_rules(mut self, rules: HarvestRules) -> Self {
        self.rules = rules;
        self
    }

    /// Replace the expanded/compact breakpoint.
    pub fn with_breakpoint(mut self, breakpoint: f64) -> Self {
        self.breakpoint = breakpoint;
        self
    }

    /// Replace the visibility threshold, clamped to `0.0..=1.0`.
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold.clamp(0.0, 1.0);
        self
    }

    /// Replace the fallback policy.
    pub fn with_fallback(mut self, fallback: FallbackPolicy) -> Self {
        self.fallback = fallback;
        self
    }
}
