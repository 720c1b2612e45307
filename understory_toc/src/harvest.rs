// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Target harvesting: scan caller content for anchors.
//!
//! ## Rules
//!
//! - Descendants of the root are visited depth first in document order. The
//!   root itself is the slot container and is never a candidate.
//! - An element is an anchor when its tag matches [`HarvestRules::tag`]
//!   (ASCII case-insensitive) and it carries [`HarvestRules::id_attribute`].
//!   Anchors are not searched for nested anchors.
//! - The id is the identifying attribute verbatim, so its fragment still names
//!   the element. Anchors whose id is blank, or repeats an id already
//!   harvested, are skipped and do not consume an `order`.
//! - The label is the title attribute verbatim when present and non-empty,
//!   else all text under the anchor, in document order, trimmed.
//!
//! ## Example
//!
//! ```
//! use understory_content::{Element, Tree};
//! use understory_toc::harvest::{harvest, HarvestRules};
//!
//! let mut tree = Tree::new();
//! let root = tree.insert_element(None, Element::new("div"));
//! let a = tree.insert_element(Some(root), Element::new("a").with_attribute("name", "1"));
//! tree.insert_text(Some(a), " Section - 1 ");
//! tree.insert_element(
//!     Some(root),
//!     Element::new("a").with_attribute("name", "2").with_attribute("data-title", "Section - 2"),
//! );
//!
//! let targets = harvest(&tree, root, &HarvestRules::default());
//! let labels: Vec<_> = targets.iter().map(|t| (t.id.as_str(), t.label.as_str())).collect();
//! assert_eq!(labels, [("1", "Section - 1"), ("2", "Section - 2")]);
//! ```

use alloc::borrow::ToOwned;
use alloc::collections::BTreeSet;
use alloc::string::String;
use alloc::vec::Vec;

use crate::source::ContentSource;
use crate::types::{NavigationTarget, TargetSet};

/// Which elements count as anchors and where their id and label come from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HarvestRules {
    /// Tag name of anchor elements, compared ASCII case-insensitively.
    pub tag: String,
    /// Attribute holding the target id.
    pub id_attribute: String,
    /// Attribute holding an explicit label, if any.
    pub title_attribute: Option<String>,
}

impl Default for HarvestRules {
    fn default() -> Self {
        Self {
            tag: "a".into(),
            id_attribute: "name".into(),
            title_attribute: Some("data-title".into()),
        }
    }
}

impl HarvestRules {
    fn is_anchor<S: ContentSource>(&self, source: &S, node: S::Node) -> bool {
        source
            .tag(node)
            .is_some_and(|t| t.eq_ignore_ascii_case(&self.tag))
            && source.attribute(node, &self.id_attribute).is_some()
    }

    fn label<S: ContentSource>(&self, source: &S, node: S::Node) -> String {
        if let Some(title) = self
            .title_attribute
            .as_deref()
            .and_then(|attr| source.attribute(node, attr))
            .filter(|t| !t.is_empty())
        {
            return title.to_owned();
        }
        text_content(source, node).trim().to_owned()
    }
}

/// Harvest the anchors under `root` into an ordered [`TargetSet`].
pub fn harvest<S: ContentSource>(
    source: &S,
    root: S::Node,
    rules: &HarvestRules,
) -> TargetSet<S::Node> {
    let mut targets = Vec::new();
    let mut seen = BTreeSet::new();
    let mut stack = Vec::new();
    push_children(source, root, &mut stack);

    while let Some(node) = stack.pop() {
        if !rules.is_anchor(source, node) {
            push_children(source, node, &mut stack);
            continue;
        }
        let id = source
            .attribute(node, &rules.id_attribute)
            .unwrap_or_default();
        if id.trim().is_empty() {
            tracing::debug!(
                attribute = %rules.id_attribute,
                "skipping anchor without a usable identifier"
            );
            continue;
        }
        if !seen.insert(id.to_owned()) {
            tracing::debug!(id, "skipping anchor with a duplicate identifier");
            continue;
        }
        targets.push(NavigationTarget {
            id: id.to_owned(),
            label: rules.label(source, node),
            order: targets.len(),
            node,
        });
    }

    TargetSet::from_ordered(targets)
}

/// Push `node`'s children so that the first child pops first.
fn push_children<S: ContentSource>(source: &S, node: S::Node, stack: &mut Vec<S::Node>) {
    let start = stack.len();
    stack.extend(source.children(node));
    stack[start..].reverse();
}

/// Concatenated text of every text node under `node`, in document order.
fn text_content<S: ContentSource>(source: &S, node: S::Node) -> String {
    let mut out = String::new();
    let mut stack = Vec::new();
    push_children(source, node, &mut stack);
    while let Some(n) = stack.pop() {
        match source.text(n) {
            Some(t) => out.push_str(t),
            None => push_children(source, n, &mut stack),
        }
    }
    out
}
