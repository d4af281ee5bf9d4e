// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end tour of the tree engine: build, project, search, window,
//! drag.
//!
//! Run:
//! - `cargo run -p arbor_demos --example checkbox_tree`

use arbor_index::{
    BuildOptions, ExpandPolicy, NodeKey, RowFlags, SearchQuery, SimpleNode, TreeIndex,
};
use arbor_reorder::{DropTarget, commit_drop};
use arbor_view::TreeController;

fn fruits() -> Vec<SimpleNode> {
    vec![
        SimpleNode::labeled("citrus", "Citrus").with_children(vec![
            SimpleNode::labeled("orange", "Orange"),
            SimpleNode::labeled("lemon", "Lemon"),
            SimpleNode::labeled("lime", "Lime"),
        ]),
        SimpleNode::labeled("berries", "Berries").with_children(vec![
            SimpleNode::labeled("strawberry", "Strawberry"),
            SimpleNode::labeled("blueberry", "Blueberry"),
        ]),
        SimpleNode::labeled("stone", "Stone fruit")
            .with_disabled(true)
            .with_children(vec![SimpleNode::labeled("peach", "Peach")]),
    ]
}

fn print_rows(title: &str, controller: &mut TreeController, index: &TreeIndex<'_, SimpleNode>) {
    println!("== {title}");
    for row in controller.node_list(index) {
        let checkbox = if row.flags.contains(RowFlags::INDETERMINATE) {
            "[-]"
        } else if row.flags.contains(RowFlags::CHECKED) {
            "[x]"
        } else {
            "[ ]"
        };
        let disabled = if row.flags.contains(RowFlags::DISABLED) {
            " (disabled)"
        } else {
            ""
        };
        let hit = if row.flags.contains(RowFlags::SEARCHED) {
            " *"
        } else {
            ""
        };
        let indent = "  ".repeat(row.depth - 1);
        println!("{indent}{checkbox} {}{disabled}{hit}", row.node.label);
    }
    println!();
}

fn main() {
    let mut roots = fruits();
    // 24px rows in a 240px viewport with one row of overscan.
    let mut controller = TreeController::new(24.0, 240.0, 24.0);

    // Everything starts expanded on first sight; recorded state wins later.
    let options = BuildOptions {
        expand: ExpandPolicy::All,
        ..BuildOptions::default()
    };
    let index = TreeIndex::build(&roots, &options, controller.state_mut());
    print_rows("initial", &mut controller, &index);

    // Checking a branch cascades to its enabled leaves…
    let citrus = index.entry_by_key("citrus").expect("citrus is indexed");
    controller.on_check(&index, citrus, true);
    // …and unchecking one leaf leaves the branch indeterminate.
    let lemon = index.entry_by_key("lemon").expect("lemon is indexed");
    controller.on_check(&index, lemon, false);
    print_rows("after toggling", &mut controller, &index);

    // Search marks matches; revealing them is an explicit expansion step.
    let fields: &[&[&str]] = &[&["label"]];
    let options = BuildOptions {
        search: Some(SearchQuery {
            text: "berry",
            fields,
        }),
        ..BuildOptions::default()
    };
    let index = TreeIndex::build(&roots, &options, controller.state_mut());
    for key in index.expansion_keys_for_matches(controller.state()) {
        controller.state_mut().record_expanded(key, true);
    }
    print_rows("searching \"berry\"", &mut controller, &index);

    // Drag "lime" into "berries", then rebuild against the mutated input.
    controller.set_current_drag_key(NodeKey::from("lime"));
    let policy =
        |_: &NodeKey, hovered: Option<&NodeKey>| hovered.cloned().map(DropTarget::Node);
    let hovered = NodeKey::from("berries");
    controller.on_drag_over(Some(&hovered), &policy);
    let plan = controller.on_drop().expect("hover resolved a target");
    drop(index);
    commit_drop(&mut roots, None, &plan).expect("keys exist and target is legal");
    controller.invalidate();

    let index = TreeIndex::build(&roots, &BuildOptions::default(), controller.state_mut());
    print_rows("after dropping lime into berries", &mut controller, &index);

    // The windowed slice is what a renderer would actually materialize.
    let rows = controller.rows(&index);
    println!(
        "window materializes {} of {} visible rows",
        rows.len(),
        controller.window().len()
    );
}
