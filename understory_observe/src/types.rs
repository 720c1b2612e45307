// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Option and record types shared by every observation backend.

use core::fmt;

use kurbo::{Insets, Rect};

/// Offsets applied to the edges of the visibility root before intersecting.
///
/// Positive values grow the root outward, negative values shrink it. The
/// [`Display`](fmt::Display) form uses CSS shorthand order (top, right,
/// bottom, left), e.g. `"-32px 0px 0px 0px"`.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct RootMargin {
    /// Offset of the top edge in pixels.
    pub top: f64,
    /// Offset of the right edge in pixels.
    pub right: f64,
    /// Offset of the bottom edge in pixels.
    pub bottom: f64,
    /// Offset of the left edge in pixels.
    pub left: f64,
}

impl RootMargin {
    /// No offset on any edge.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    /// Create a margin from CSS-ordered edge offsets.
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// A margin offsetting only the top edge.
    pub const fn top(top: f64) -> Self {
        Self::new(top, 0.0, 0.0, 0.0)
    }

    /// The same offsets as Kurbo insets.
    pub fn to_insets(self) -> Insets {
        Insets::new(self.left, self.top, self.right, self.bottom)
    }

    /// Apply the margin to a root rectangle.
    ///
    /// ```
    /// use kurbo::Rect;
    /// use understory_observe::RootMargin;
    ///
    /// let root = Rect::new(0.0, 0.0, 800.0, 600.0);
    /// assert_eq!(RootMargin::top(-32.0).apply(root), Rect::new(0.0, 32.0, 800.0, 600.0));
    /// ```
    pub fn apply(self, root: Rect) -> Rect {
        Rect::new(
            root.x0 - self.left,
            root.y0 - self.top,
            root.x1 + self.right,
            root.y1 + self.bottom,
        )
    }
}

impl fmt::Display for RootMargin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Fold `-0.0` into `0.0` so a zero margin never prints as `-0px`.
        let px = |v: f64| if v == 0.0 { 0.0 } else { v };
        write!(
            f,
            "{}px {}px {}px {}px",
            px(self.top),
            px(self.right),
            px(self.bottom),
            px(self.left)
        )
    }
}

/// Construction options of a visibility observer.
///
/// Options are fixed for the lifetime of an observer; changing them means
/// connecting a new one.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct VisibilityOptions {
    /// Offsets applied to the root before intersecting.
    pub root_margin: RootMargin,
    /// Fraction of a target's area that must lie inside the root for it to
    /// count as intersecting. `1.0` means fully visible.
    pub threshold: f64,
}

/// One visibility change reported for an observed target.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct VisibilityEntry<K> {
    /// The observed target.
    pub target: K,
    /// Whether the target now meets the observer's threshold.
    pub is_intersecting: bool,
}

/// One size change reported for an observed target.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ResizeEntry<K> {
    /// The observed target.
    pub target: K,
    /// The target's new content box.
    pub content_rect: Rect,
}

/// The observation primitives a host may provide.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Primitive {
    /// Element visibility observation.
    Visibility,
    /// Element size observation.
    Resize,
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Visibility => "visibility",
            Self::Resize => "resize",
        })
    }
}
