// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Table of contents user jumps.
//!
//! Pick a section from the compact control, perform the queued jump by
//! scrolling the viewport, then let the next observation confirm it.
//!
//! Run:
//! - `cargo run -p understory_demos --example toc_jump`

use kurbo::Rect;
use understory_content::{Element, NodeId, Tree};
use understory_observe::memory::{ResizeHub, VisibilityHub};
use understory_toc::{ActiveTarget, TableOfContents, TocConfig, UserAction};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let mut tree = Tree::new();
    let root = tree.insert_element(None, Element::new("div"));
    for (title, n) in ["Install", "Configure", "Deploy"].into_iter().zip(0_u32..) {
        let y = 1000.0 * f64::from(n);
        tree.insert_element(
            Some(root),
            Element::new("a")
                .with_attribute("name", title.to_lowercase())
                .with_attribute("data-title", title)
                .with_bounds(Rect::new(0.0, y, 600.0, y + 20.0)),
        );
    }
    let control = tree.insert_element(None, Element::new("select"));

    let visibility = VisibilityHub::new();
    let resize = ResizeHub::new();
    let mut toc = TableOfContents::new(TocConfig::default(), visibility.clone(), resize.clone())
        .expect("in-memory backends are always available");
    toc.mount(control);
    toc.content_changed(&tree, root);
    resize.run(control, Rect::new(0.0, 0.0, 600.0, 40.0));

    let mut viewport = Rect::new(0.0, 0.0, 600.0, 700.0);
    visibility.evaluate(viewport, |n: NodeId| tree.bounds(n));
    toc.flush();
    println!("initial: {:?}", toc.active());

    // Unknown values are ignored.
    assert!(toc.handle_action(&UserAction::SelectChange("faq".into())).is_none());

    toc.handle_action(&UserAction::SelectChange("deploy".into()));
    println!("after select: {:?}", toc.active());
    assert_eq!(toc.active(), &ActiveTarget::Jump("deploy".into()));

    for request in toc.take_jump_requests() {
        let Some(bounds) = tree.bounds(request.node) else {
            continue;
        };
        println!("navigating to {}", request.fragment);
        // Land the anchor just below the compact control.
        let top = bounds.y0 - f64::from(toc.snapshot().margin.px());
        viewport = Rect::new(0.0, top, 600.0, top + 700.0);
    }
    visibility.evaluate(viewport, |n: NodeId| tree.bounds(n));
    toc.flush();
    println!("after scroll: {:?}", toc.active());
    assert_eq!(toc.active(), &ActiveTarget::Resolved("deploy".into()));
}
