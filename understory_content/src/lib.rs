// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Content: a generational tree of elements and text.
//!
//! This crate is a small, DOM-shaped container for caller-supplied markup: the kind of
//! subtree a widget receives through content slotting and has to scan, observe, and
//! react to when it changes.
//!
//! - Elements carry a tag, an ordered attribute list, and document-space bounds ([`kurbo::Rect`]).
//! - Text nodes carry their data and never have children.
//! - Mutations are batched; [`Tree::commit`] returns a [`Mutations`] record describing
//!   what changed since the previous commit, so consumers can decide whether to rescan.
//!
//! ## Not a layout engine
//!
//! Bounds are inputs, not outputs. Upstream code computes positions and sizes with
//! whatever layout system it uses and writes them back with [`Tree::set_bounds`].
//!
//! ## API overview
//!
//! - [`Tree`]: container managing nodes, traversal, and mutation batching.
//! - [`Element`] / [`NodeKind`]: node payloads.
//! - [`NodeId`]: generational handle of a node.
//! - [`Changes`]: mutation kinds reported by [`Tree::commit`].
//!
//! ### Minimal usage
//!
//! ```
//! use understory_content::{Changes, Element, Tree};
//!
//! let mut tree = Tree::new();
//! let root = tree.insert_element(None, Element::new("div"));
//! let anchor = tree.insert_element(Some(root), Element::new("a").with_attribute("name", "intro"));
//! tree.insert_text(Some(anchor), "Introduction");
//!
//! let m = tree.commit();
//! assert!(m.changes.contains(Changes::CHILD_LIST));
//! assert_eq!(tree.text_content(root), "Introduction");
//! assert_eq!(tree.descendants(root).next(), Some(anchor));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod tree;
mod types;

pub use tree::{Descendants, Mutations, Tree};
pub use types::{Changes, Element, NodeId, NodeKind};
