// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Read-only view of caller content.

/// A DOM-like tree the harvester can scan.
///
/// Implement this for whatever holds the slotted markup. Element nodes report a
/// tag and attributes; text nodes report their data. A node is never both.
///
/// With the `content_adapter` feature, [`understory_content::Tree`] implements
/// this trait.
pub trait ContentSource {
    /// Handle of a node. Also used as the observation key.
    type Node: Copy + Eq;

    /// Children of `node` in document order.
    fn children(&self, node: Self::Node) -> impl Iterator<Item = Self::Node> + '_;

    /// Tag name of an element, `None` for text nodes.
    fn tag(&self, node: Self::Node) -> Option<&str>;

    /// Attribute value of an element.
    fn attribute(&self, node: Self::Node, name: &str) -> Option<&str>;

    /// Data of a text node, `None` for elements.
    fn text(&self, node: Self::Node) -> Option<&str>;
}
