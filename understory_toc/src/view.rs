// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! View synchronization: derive both presentations from one state.
//!
//! The expanded presentation is a list of links; the compact one is a
//! single-select control. [`render`] builds both from the same targets and
//! active target, so the highlighted list item and the selected option always
//! agree.

use alloc::string::String;
use alloc::vec::Vec;

use crate::types::{ActiveTarget, TargetSet};

/// Which presentation the current viewport calls for.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Layout {
    /// Wide viewports: the full list.
    Expanded,
    /// Narrow viewports: the single-select control.
    Compact,
}

impl Layout {
    /// `Expanded` at or above `breakpoint`, `Compact` below it.
    pub fn for_width(width: f64, breakpoint: f64) -> Self {
        if width >= breakpoint {
            Self::Expanded
        } else {
            Self::Compact
        }
    }
}

/// One link of the expanded presentation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExpandedItem {
    /// Target id.
    pub id: String,
    /// Link text.
    pub label: String,
    /// In-page link, `#` followed by the id.
    pub href: String,
    /// Whether this item is highlighted.
    pub active: bool,
}

/// One option of the compact presentation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompactOption {
    /// Option value: the target id.
    pub value: String,
    /// Option text.
    pub label: String,
}

/// The compact single-select control.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CompactSelect {
    /// Options in document order.
    pub options: Vec<CompactOption>,
    /// Selected value; `None` only when there are no options.
    pub value: Option<String>,
}

/// Presentation state for both views.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Presentation {
    /// The presentation the viewport calls for. Both are always populated.
    pub layout: Layout,
    /// Expanded list items in document order.
    pub expanded: Vec<ExpandedItem>,
    /// Compact control state.
    pub compact: CompactSelect,
}

impl Presentation {
    /// Index of the highlighted expanded item.
    pub fn active_index(&self) -> Option<usize> {
        self.expanded.iter().position(|i| i.active)
    }
}

/// Render both presentations for `targets` with `active` highlighted.
///
/// An active id that is not in `targets` highlights nothing.
pub fn render<K: Copy + Eq>(
    targets: &TargetSet<K>,
    active: &ActiveTarget,
    layout: Layout,
) -> Presentation {
    let active_id = active.id().filter(|id| targets.contains(id));
    let expanded = targets
        .iter()
        .map(|t| ExpandedItem {
            id: t.id.clone(),
            label: t.label.clone(),
            href: t.fragment(),
            active: Some(t.id.as_str()) == active_id,
        })
        .collect();
    let options = targets
        .iter()
        .map(|t| CompactOption {
            value: t.id.clone(),
            label: t.label.clone(),
        })
        .collect();
    Presentation {
        layout,
        expanded,
        compact: CompactSelect {
            options,
            value: active_id.map(String::from),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NavigationTarget;
    use alloc::borrow::ToOwned;
    use alloc::format;
    use alloc::vec;

    fn targets(ids: &[&str]) -> TargetSet<u32> {
        TargetSet::from_ordered(
            ids.iter()
                .zip(0_u32..)
                .enumerate()
                .map(|(order, (id, node))| NavigationTarget {
                    id: (*id).to_owned(),
                    label: format!("Section - {id}"),
                    order,
                    node,
                })
                .collect(),
        )
    }

    #[test]
    fn both_views_agree_on_the_active_target() {
        let p = render(
            &targets(&["1", "2", "3"]),
            &ActiveTarget::Resolved("2".into()),
            Layout::Expanded,
        );
        let flags: Vec<bool> = p.expanded.iter().map(|i| i.active).collect();
        assert_eq!(flags, vec![false, true, false]);
        assert_eq!(p.compact.value.as_deref(), Some("2"));
        assert_eq!(p.active_index(), Some(1));
        assert_eq!(p.expanded[1].href, "#2");
        assert_eq!(p.compact.options[2].label, "Section - 3");
    }

    #[test]
    fn unknown_active_highlights_nothing() {
        let p = render(
            &targets(&["1"]),
            &ActiveTarget::Jump("9".into()),
            Layout::Compact,
        );
        assert_eq!(p.active_index(), None);
        assert_eq!(p.compact.value, None);
    }

    #[test]
    fn empty_targets_render_nothing_navigable() {
        let p = render(&targets(&[]), &ActiveTarget::None, Layout::Compact);
        assert!(p.expanded.is_empty());
        assert_eq!(p.compact, CompactSelect::default());
    }

    #[test]
    fn breakpoint_is_inclusive() {
        assert_eq!(Layout::for_width(1056.0, 1056.0), Layout::Expanded);
        assert_eq!(Layout::for_width(1055.9, 1056.0), Layout::Compact);
        assert_eq!(Layout::for_width(0.0, 1056.0), Layout::Compact);
    }
}
