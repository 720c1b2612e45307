// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_toc --heading-base-level=0

//! Understory TOC: a headless, `no_std` table-of-contents navigator.
//!
//! ## Overview
//!
//! This crate keeps a list of in-page anchors in sync with what the reader is
//! looking at. It harvests anchors from caller content, watches them for full
//! visibility, picks the first fully visible anchor in document order, and
//! renders two presentations from that single choice: an expanded list of
//! links for wide viewports and a compact single-select control for narrow ones.
//!
//! It does not scroll, paint, or own a document. The host supplies content
//! through [`ContentSource`](crate::source::ContentSource) and observation
//! through the backend traits of `understory_observe`.
//!
//! ## Pieces
//!
//! - [`harvest`](crate::harvest::harvest): content → ordered [`TargetSet`](crate::types::TargetSet).
//! - [`MarginMonitor`](crate::margin::MarginMonitor): compact control height →
//!   [`ObservationMargin`](crate::types::ObservationMargin).
//! - [`IntersectionTracker`](crate::tracker::IntersectionTracker): one visibility
//!   observer over the current targets, rebuilt whenever targets or margin change.
//! - [`resolve`](crate::resolve::resolve) / [`settle`](crate::resolve::settle):
//!   intersection state → [`ActiveTarget`](crate::types::ActiveTarget).
//! - [`render`](crate::view::render): active target → [`Presentation`](crate::view::Presentation).
//! - [`TableOfContents`](crate::navigator::TableOfContents) wires them together
//!   and publishes a [`NavigatorSnapshot`](crate::navigator::NavigatorSnapshot)
//!   whenever anything changes.
//!
//! ## Margin
//!
//! In the compact layout the control sits over the top of the viewport, so an
//! anchor under it is not really visible. The control's height is applied as a
//! negative top margin to the visibility root. A new height means a new
//! observer, since observer options are fixed at creation.
//!
//! ## Workflow
//!
//! 1) Create a [`TableOfContents`](crate::navigator::TableOfContents) with both
//!    backends and [`mount`](crate::navigator::TableOfContents::mount) the compact control.
//! 2) Call [`content_changed`](crate::navigator::TableOfContents::content_changed)
//!    whenever the slotted content mutates structurally.
//! 3) Once per tick, after the host's observers ran, call
//!    [`flush`](crate::navigator::TableOfContents::flush).
//! 4) Route clicks and selections through
//!    [`handle_action`](crate::navigator::TableOfContents::handle_action) and perform the
//!    queued [`JumpRequest`](crate::types::JumpRequest)s.
//!
//! ```
//! use kurbo::Rect;
//! use understory_content::{Element, Tree};
//! use understory_observe::memory::{ResizeHub, VisibilityHub};
//! use understory_toc::{ActiveTarget, Layout, TableOfContents, TocConfig, UserAction};
//!
//! let mut tree = Tree::new();
//! let root = tree.insert_element(None, Element::new("div"));
//! let mut anchors = Vec::new();
//! for n in 1..=3 {
//!     let a = tree.insert_element(
//!         Some(root),
//!         Element::new("a").with_attribute("name", format!("{n}")),
//!     );
//!     tree.insert_text(Some(a), format!("Section - {n}"));
//!     anchors.push(a);
//! }
//! let control = tree.insert_element(None, Element::new("select"));
//!
//! let visibility = VisibilityHub::new();
//! let resize = ResizeHub::new();
//! let mut toc = TableOfContents::new(TocConfig::default(), visibility.clone(), resize.clone())
//!     .expect("in-memory backends are always available");
//! toc.mount(control);
//! toc.content_changed(&tree, root);
//!
//! // Nothing reported yet: the compact control shows the first target.
//! assert_eq!(toc.presentation().compact.value.as_deref(), Some("1"));
//!
//! // The host's observer reports anchor 2 fully visible.
//! visibility.run(anchors[1], true);
//! toc.flush();
//! assert_eq!(toc.active(), &ActiveTarget::Resolved("2".into()));
//!
//! // The compact control is 40px tall: the root margin follows.
//! resize.run(control, Rect::new(0.0, 0.0, 320.0, 40.0));
//! toc.flush();
//! assert_eq!(visibility.instance_options()[0].root_margin.to_string(), "-40px 0px 0px 0px");
//!
//! // A click indicates the target at once and queues the jump.
//! toc.handle_action(&UserAction::Activate("3".into()));
//! assert_eq!(toc.active(), &ActiveTarget::Jump("3".into()));
//! assert_eq!(toc.take_jump_requests()[0].fragment, "#3");
//!
//! assert_eq!(toc.set_viewport_width(1280.0), Layout::Expanded);
//! ```
//!
//! ## Features
//!
//! - `std` (default): forwards `std` to dependencies.
//! - `libm`: `no_std` float support for the geometry used by `understory_observe`.
//! - `content_adapter` (default): implements
//!   [`ContentSource`](crate::source::ContentSource) for `understory_content::Tree`.

#![no_std]

extern crate alloc;

pub mod adapters;
pub mod config;
pub mod error;
pub mod harvest;
pub mod margin;
pub mod navigator;
pub mod resolve;
pub mod source;
pub mod tracker;
pub mod types;
pub mod view;

pub use config::{FallbackPolicy, TocConfig};
pub use error::TocError;
pub use navigator::{NavigatorSnapshot, SubscriptionId, TableOfContents};
pub use source::ContentSource;
pub use types::{
    ActiveTarget, JumpRequest, NavigationTarget, ObservationMargin, TargetSet, UserAction,
};
pub use view::{Layout, Presentation};
