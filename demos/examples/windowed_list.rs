// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Windowing a large flat tree without the controller layer.
//!
//! Run:
//! - `cargo run -p arbor_demos --example windowed_list`

use arbor_index::{BuildOptions, ExpandPolicy, SimpleNode, TreeIndex, TreeState};
use arbor_window::{RowWindow, ScrollAlign};

fn main() {
    // 1000 branches of 10 leaves each, all expanded: 11000 visible rows.
    let roots: Vec<SimpleNode> = (0..1000)
        .map(|branch| {
            SimpleNode::new(&format!("branch-{branch}")).with_children(
                (0..10)
                    .map(|leaf| SimpleNode::new(&format!("leaf-{branch}-{leaf}")))
                    .collect(),
            )
        })
        .collect();

    let mut state = TreeState::new();
    let options = BuildOptions {
        expand: ExpandPolicy::All,
        ..BuildOptions::default()
    };
    let index = TreeIndex::build(&roots, &options, &mut state);
    let visible = index.visible(&state);
    println!("{} entries, {} visible", index.len(), visible.len());

    // 28px rows in a 700px viewport, two rows of overscan on each end.
    let mut window = RowWindow::new(visible.len(), 28.0, 700.0, 56.0);
    window.scroll_to_index(5_000, ScrollAlign::Center);

    let slice = window.slice();
    println!(
        "materializing rows {}..{} of {} ({}px of spacer above, {}px below)",
        slice.start, slice.end, visible.len(), slice.before_extent, slice.after_extent,
    );

    for id in &visible[slice.start..slice.end] {
        let row = index.row(*id, &mut state).expect("windowed ids are in range");
        println!("{}{}", "  ".repeat(row.depth - 1), row.key);
    }
}
