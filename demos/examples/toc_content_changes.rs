// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Table of contents over changing content.
//!
//! Mutate the slotted content, commit, and re-harvest only when the batch is
//! structural. Removed anchors stop being observed immediately.
//!
//! Run:
//! - `RUST_LOG=understory_toc=debug cargo run -p understory_demos --example toc_content_changes`

use understory_content::{Element, NodeId, Tree};
use understory_observe::memory::{ResizeHub, VisibilityHub};
use understory_observe::{ResizeBackend, VisibilityBackend};
use understory_toc::{TableOfContents, TocConfig};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let mut tree = Tree::new();
    let root = tree.insert_element(None, Element::new("div"));
    let mut anchors = Vec::new();
    for n in 1..=3 {
        let a = tree.insert_element(
            Some(root),
            Element::new("a").with_attribute("name", format!("{n}")),
        );
        tree.insert_text(Some(a), format!("Section - {n}"));
        anchors.push(a);
    }
    let _ = tree.commit();

    let visibility = VisibilityHub::new();
    let mut toc = TableOfContents::new(TocConfig::default(), visibility.clone(), ResizeHub::new())
        .expect("in-memory backends are always available");
    toc.content_changed(&tree, root);
    print_targets(&toc);

    // Text edits do not change the anchor set.
    let label = tree.children(anchors[0])[0];
    tree.set_text(label, "Section - 1 (edited)");
    let batch = tree.commit();
    println!("text edit structural: {}", batch.is_structural());

    // Removing an anchor and adding an empty-named one does.
    tree.remove(anchors[1]);
    tree.insert_element(Some(root), Element::new("a").with_attribute("name", "  "));
    let batch = tree.commit();
    println!("removal structural: {}", batch.is_structural());
    if batch.is_structural() {
        toc.content_changed(&tree, root);
    }
    print_targets(&toc);

    visibility.run(anchors[1], true);
    toc.flush();
    println!("removed anchor observed: {}", visibility.is_observed(anchors[1]));
    println!("active: {:?}", toc.active());
}

fn print_targets<V, R>(toc: &TableOfContents<NodeId, V, R>)
where
    V: VisibilityBackend<NodeId>,
    R: ResizeBackend<NodeId>,
{
    for t in toc.targets() {
        println!("  {} {:?} -> {}", t.order, t.label, t.fragment());
    }
}
