// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the content tree: node identifiers, node payloads, and mutation kinds.

use alloc::string::String;
use alloc::vec::Vec;
use kurbo::Rect;

/// Identifier for a node in the tree.
///
/// This is a small, copyable handle that stays stable across updates but becomes
/// invalid when the underlying slot is reused.
/// It consists of a slot index and a generation counter.
///
/// ## Semantics
///
/// - On insert, a fresh slot is allocated with generation `1`.
/// - On remove, the slot is freed; any existing `NodeId` that pointed to that slot is now stale.
/// - On reuse of a freed slot, its generation is incremented, producing a new, distinct `NodeId`.
///
/// Use [`Tree::is_alive`](crate::Tree::is_alive) to check whether a `NodeId` still refers to a live node.
/// Stale `NodeId`s never alias a different live node because the generation must match.
///
/// The derived ordering (slot, then generation) is arbitrary but total, which is
/// what ordered maps keyed by node need. It says nothing about document order.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct NodeId(pub(crate) u32, pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

bitflags::bitflags! {
    /// Kinds of mutation accumulated between two [`Tree::commit`](crate::Tree::commit) calls.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Changes: u8 {
        /// Nodes were inserted or removed.
        const CHILD_LIST     = 0b0000_0001;
        /// An element attribute was set or removed.
        const ATTRIBUTES     = 0b0000_0010;
        /// The data of a text node changed.
        const CHARACTER_DATA = 0b0000_0100;
        /// Element bounds changed. Does not affect structure.
        const GEOMETRY       = 0b0000_1000;
    }
}

impl Changes {
    /// Mutations that can change what a traversal of the tree observes.
    pub const STRUCTURAL: Self = Self::CHILD_LIST
        .union(Self::ATTRIBUTES)
        .union(Self::CHARACTER_DATA);
}

/// An element: a tag, an ordered attribute list and document-space bounds.
#[derive(Clone, Debug, PartialEq)]
pub struct Element {
    /// Tag name, stored as given.
    pub tag: String,
    /// Attributes in insertion order. Names are unique.
    pub attributes: Vec<(String, String)>,
    /// Border box in document coordinates, as computed by an upstream layout pass.
    pub bounds: Rect,
}

impl Element {
    /// Create an element with no attributes and zero bounds.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: Vec::new(),
            bounds: Rect::ZERO,
        }
    }

    /// Builder-style attribute setter.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(name.into(), value.into());
        self
    }

    /// Builder-style bounds setter.
    pub fn with_bounds(mut self, bounds: Rect) -> Self {
        self.bounds = bounds;
        self
    }

    /// Look up an attribute value by exact name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub(crate) fn set_attribute(&mut self, name: String, value: String) {
        if let Some(slot) = self.attributes.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = value;
        } else {
            self.attributes.push((name, value));
        }
    }

    pub(crate) fn remove_attribute(&mut self, name: &str) -> bool {
        let before = self.attributes.len();
        self.attributes.retain(|(n, _)| n != name);
        self.attributes.len() != before
    }
}

/// Payload of a node.
#[derive(Clone, Debug, PartialEq)]
pub enum NodeKind {
    /// An element that may have children.
    Element(Element),
    /// A text node. Text nodes never have children.
    Text(String),
}

impl From<Element> for NodeKind {
    fn from(e: Element) -> Self {
        Self::Element(e)
    }
}
