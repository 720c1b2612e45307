// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core tree implementation: structure, updates, queries.

use alloc::string::String;
use alloc::vec::Vec;
use kurbo::Rect;

use crate::types::{Changes, Element, NodeId, NodeKind};

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

/// A content tree of elements and text nodes.
pub struct Tree {
    nodes: Vec<Option<Node>>, // slots
    generations: Vec<u32>,    // last generation per slot (persists across frees)
    free_list: Vec<usize>,
    epoch: u64,
    pending: Pending,
}

impl core::fmt::Debug for Tree {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.nodes.len();
        let alive = self.nodes.iter().filter(|n| n.is_some()).count();
        let free = self.free_list.len();
        f.debug_struct("Tree")
            .field("nodes_total", &total)
            .field("nodes_alive", &alive)
            .field("free_list", &free)
            .field("epoch", &self.epoch)
            .field("pending", &self.pending.changes)
            .finish_non_exhaustive()
    }
}

/// Mutations batched by [`Tree::commit`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Mutations {
    /// Epoch after the commit that produced this record.
    pub epoch: u64,
    /// Union of the mutation kinds seen since the previous commit.
    pub changes: Changes,
    /// Nodes inserted since the previous commit and still alive.
    pub added: Vec<NodeId>,
    /// Nodes removed since the previous commit, including removed descendants.
    pub removed: Vec<NodeId>,
}

impl Mutations {
    /// True when the batch contains anything a traversal could observe.
    pub fn is_structural(&self) -> bool {
        self.changes.intersects(Changes::STRUCTURAL)
    }

    /// True when nothing changed.
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }
}

#[derive(Clone, Debug, Default)]
struct Pending {
    changes: Changes,
    added: Vec<NodeId>,
    removed: Vec<NodeId>,
}

#[derive(Clone, Debug)]
struct Node {
    generation: u32,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    kind: NodeKind,
}

impl Node {
    fn new(generation: u32, kind: NodeKind) -> Self {
        Self {
            generation,
            parent: None,
            children: Vec::new(),
            kind,
        }
    }
}

impl Tree {
    /// Create a new empty tree.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            epoch: 0,
            pending: Pending::default(),
        }
    }

    /// Insert a new node as the last child of `parent` (or as a root if `None`).
    ///
    /// Inserting under a stale or text parent creates a root instead.
    pub fn insert(&mut self, parent: Option<NodeId>, kind: impl Into<NodeKind>) -> NodeId {
        let kind = kind.into();
        let idx = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.nodes[idx] = Some(Node::new(generation, kind));
            idx
        } else {
            self.generations.push(1);
            self.nodes.push(Some(Node::new(1, kind)));
            self.nodes.len() - 1
        };
        #[allow(
            clippy::cast_possible_truncation,
            reason = "NodeId slots are 32-bit."
        )]
        let id = NodeId::new(idx as u32, self.generations[idx]);
        if let Some(p) = parent
            && matches!(self.kind(p), Some(NodeKind::Element(_)))
        {
            self.node_mut(id).parent = Some(p);
            self.node_mut(p).children.push(id);
        }
        self.pending.changes |= Changes::CHILD_LIST;
        self.pending.added.push(id);
        id
    }

    /// Insert an element under `parent`.
    pub fn insert_element(&mut self, parent: Option<NodeId>, element: Element) -> NodeId {
        self.insert(parent, NodeKind::Element(element))
    }

    /// Insert a text node under `parent`.
    pub fn insert_text(&mut self, parent: Option<NodeId>, text: impl Into<String>) -> NodeId {
        self.insert(parent, NodeKind::Text(text.into()))
    }

    /// Remove a node (and its subtree) from the tree.
    pub fn remove(&mut self, id: NodeId) {
        if !self.is_alive(id) {
            return;
        }
        if let Some(parent) = self.node(id).parent {
            self.node_mut(parent).children.retain(|&c| c != id);
        }
        self.remove_subtree(id);
        self.pending.changes |= Changes::CHILD_LIST;
    }

    fn remove_subtree(&mut self, id: NodeId) {
        let mut stack = Vec::from([id]);
        while let Some(n) = stack.pop() {
            stack.append(&mut self.node_mut(n).children);
            self.nodes[n.idx()] = None;
            self.free_list.push(n.idx());
            self.pending.removed.push(n);
        }
    }

    /// Set (or replace) an attribute on an element. No-op for text nodes.
    pub fn set_attribute(&mut self, id: NodeId, name: impl Into<String>, value: impl Into<String>) {
        if let Some(NodeKind::Element(e)) = self.kind_opt_mut(id) {
            e.set_attribute(name.into(), value.into());
            self.pending.changes |= Changes::ATTRIBUTES;
        }
    }

    /// Remove an attribute from an element.
    pub fn remove_attribute(&mut self, id: NodeId, name: &str) {
        if let Some(NodeKind::Element(e)) = self.kind_opt_mut(id)
            && e.remove_attribute(name)
        {
            self.pending.changes |= Changes::ATTRIBUTES;
        }
    }

    /// Replace the data of a text node. No-op for elements.
    pub fn set_text(&mut self, id: NodeId, text: impl Into<String>) {
        if let Some(NodeKind::Text(t)) = self.kind_opt_mut(id) {
            *t = text.into();
            self.pending.changes |= Changes::CHARACTER_DATA;
        }
    }

    /// Update the document-space bounds of an element.
    pub fn set_bounds(&mut self, id: NodeId, bounds: Rect) {
        if let Some(NodeKind::Element(e)) = self.kind_opt_mut(id) {
            e.bounds = bounds;
            self.pending.changes |= Changes::GEOMETRY;
        }
    }

    /// Commit pending changes and return the batched mutation record.
    ///
    /// Nodes that were inserted and removed within the same batch appear in
    /// `removed` only.
    pub fn commit(&mut self) -> Mutations {
        self.epoch = self.epoch.wrapping_add(1);
        let Pending {
            changes,
            mut added,
            removed,
        } = core::mem::take(&mut self.pending);
        added.retain(|&id| self.is_alive(id));
        Mutations {
            epoch: self.epoch,
            changes,
            added,
            removed,
        }
    }

    /// Number of commits so far.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Returns `true` if `id` refers to a live node.
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.nodes
            .get(id.idx())
            .and_then(|n| n.as_ref())
            .is_some_and(|n| n.generation == id.1)
    }

    /// Parent of a live node.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node_opt(id)?.parent
    }

    /// Children of a live node in document order. Empty for stale ids.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node_opt(id).map_or(&[], |n| &n.children)
    }

    /// Payload of a live node.
    pub fn kind(&self, id: NodeId) -> Option<&NodeKind> {
        self.node_opt(id).map(|n| &n.kind)
    }

    /// Element payload of a live element node.
    pub fn element(&self, id: NodeId) -> Option<&Element> {
        match self.kind(id)? {
            NodeKind::Element(e) => Some(e),
            NodeKind::Text(_) => None,
        }
    }

    /// Tag name of a live element.
    pub fn tag(&self, id: NodeId) -> Option<&str> {
        self.element(id).map(|e| e.tag.as_str())
    }

    /// Attribute value of a live element.
    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id)?.attribute(name)
    }

    /// Data of a live text node.
    pub fn text(&self, id: NodeId) -> Option<&str> {
        match self.kind(id)? {
            NodeKind::Text(t) => Some(t),
            NodeKind::Element(_) => None,
        }
    }

    /// Bounds of a live element.
    pub fn bounds(&self, id: NodeId) -> Option<Rect> {
        self.element(id).map(|e| e.bounds)
    }

    /// Concatenated data of every text node in the subtree, in document order.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        if let Some(t) = self.text(id) {
            out.push_str(t);
        }
        for d in self.descendants(id) {
            if let Some(t) = self.text(d) {
                out.push_str(t);
            }
        }
        out
    }

    /// Pre-order (document order) iterator over the descendants of `id`, excluding `id`.
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        let mut stack: Vec<NodeId> = self.children(id).to_vec();
        stack.reverse();
        Descendants { tree: self, stack }
    }

    fn node_opt(&self, id: NodeId) -> Option<&Node> {
        self.nodes
            .get(id.idx())
            .and_then(|n| n.as_ref())
            .filter(|n| n.generation == id.1)
    }

    fn node(&self, id: NodeId) -> &Node {
        self.nodes[id.idx()].as_ref().expect("dangling NodeId")
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        self.nodes[id.idx()].as_mut().expect("dangling NodeId")
    }

    fn kind_opt_mut(&mut self, id: NodeId) -> Option<&mut NodeKind> {
        if !self.is_alive(id) {
            return None;
        }
        Some(&mut self.node_mut(id).kind)
    }
}

/// Iterator returned by [`Tree::descendants`].
#[derive(Debug)]
pub struct Descendants<'a> {
    tree: &'a Tree,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.tree.children(id).iter().rev().copied());
        Some(id)
    }
}
