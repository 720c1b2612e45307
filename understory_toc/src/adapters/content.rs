// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! [`ContentSource`] for the Understory content tree.
//!
//! ## Feature
//!
//! Enable with `content_adapter`.
//!
//! ## Notes
//!
//! Tree nodes double as observation keys, so the same [`NodeId`] flows from
//! harvesting through the visibility backend and back.

use understory_content::{NodeId, Tree};

use crate::source::ContentSource;

impl ContentSource for Tree {
    type Node = NodeId;

    fn children(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        Tree::children(self, node).iter().copied()
    }

    fn tag(&self, node: NodeId) -> Option<&str> {
        Tree::tag(self, node)
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        Tree::attribute(self, node, name)
    }

    fn text(&self, node: NodeId) -> Option<&str> {
        Tree::text(self, node)
    }
}
