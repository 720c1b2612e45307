// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Table of contents scroll tracking.
//!
//! Lay out a long document, scroll it, and watch the active target follow.
//! Halfway through, the viewport narrows and the compact control's height
//! starts shrinking the visibility root.
//!
//! Run:
//! - `cargo run -p understory_demos --example toc_scroll`
//! - `RUST_LOG=understory_toc=trace cargo run -p understory_demos --example toc_scroll`

use kurbo::Rect;
use understory_content::{Element, NodeId, Tree};
use understory_observe::memory::{ResizeHub, VisibilityHub};
use understory_toc::{Layout, TableOfContents, TocConfig};

const SECTION_HEIGHT: f64 = 600.0;
const VIEWPORT_HEIGHT: f64 = 800.0;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let mut tree = Tree::new();
    let root = tree.insert_element(None, Element::new("article"));
    for n in 0..6_u32 {
        let y = f64::from(n) * SECTION_HEIGHT;
        let a = tree.insert_element(
            Some(root),
            Element::new("a")
                .with_attribute("name", format!("s{}", n + 1))
                .with_bounds(Rect::new(0.0, y, 720.0, y + 24.0)),
        );
        tree.insert_text(Some(a), format!("Section - {}", n + 1));
        let body = tree.insert_element(
            Some(root),
            Element::new("p").with_bounds(Rect::new(0.0, y + 32.0, 720.0, y + SECTION_HEIGHT)),
        );
        tree.insert_text(Some(body), "Lorem ipsum dolor sit amet.");
    }
    let control = tree.insert_element(None, Element::new("select"));
    let _ = tree.commit();

    let visibility = VisibilityHub::new();
    let resize = ResizeHub::new();
    let mut toc = TableOfContents::new(TocConfig::default(), visibility.clone(), resize.clone())
        .expect("in-memory backends are always available");
    toc.mount(control);
    toc.content_changed(&tree, root);
    toc.subscribe(|s| println!("  revision {} -> {:?}", s.revision, s.active));

    let mut width = 1280.0;
    println!("layout: {:?}", toc.set_viewport_width(width));
    for step in 0..12_u32 {
        if step == 6 {
            width = 640.0;
            let layout = toc.set_viewport_width(width);
            println!("layout: {layout:?}");
            if layout == Layout::Compact {
                // The compact control is 48px tall and covers the top of the viewport.
                resize.run(control, Rect::new(0.0, 0.0, width, 48.0));
            }
        }
        let top = f64::from(step) * 250.0;
        let viewport = Rect::new(0.0, top, width, top + VIEWPORT_HEIGHT);
        println!("scroll to {top}");
        visibility.evaluate(viewport, |n: NodeId| tree.bounds(n));
        toc.flush();

        let p = toc.presentation();
        let labels: Vec<String> = p
            .expanded
            .iter()
            .map(|i| {
                if i.active {
                    format!("[{}]", i.label)
                } else {
                    i.label.clone()
                }
            })
            .collect();
        match p.layout {
            Layout::Expanded => println!("  {}", labels.join(" | ")),
            Layout::Compact => println!("  select = {:?}", p.compact.value),
        }
    }

    toc.disconnect();
    assert!(visibility.instance_options().is_empty());
    assert_eq!(resize.live_observers(), 0);
}
