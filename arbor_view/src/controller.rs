// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The host-side controller for one mounted tree component.

use alloc::borrow::ToOwned;
use alloc::string::String;
use alloc::vec::Vec;

use arbor_index::{EntryId, NodeKey, Row, TreeIndex, TreeState};
use arbor_reorder::{DragState, DropPlan, DropTarget};
use arbor_window::{RowWindow, ScrollAlign};

use crate::debounce::Debounce;

/// Debounce applied to search-text changes before they trigger a rebuild.
pub const SEARCH_DEBOUNCE_MS: u64 = 150;
/// Debounce applied to container resizes before the window recomputes.
pub const RESIZE_DEBOUNCE_MS: u64 = 100;
/// Debounce between edge auto-scroll steps while dragging.
pub const AUTOSCROLL_DEBOUNCE_MS: u64 = 60;

/// Everything one mounted tree component owns.
///
/// The controller holds the durable halves of the engine — the persistent
/// [`TreeState`], the [`RowWindow`], the [`DragState`], the active row, and
/// the rebuild revision — while the [`TreeIndex`] itself stays ephemeral:
/// the host rebuilds it from the raw input whenever that input, a control
/// prop, or [`revision`](Self::revision) changes, and passes it into the
/// methods here.
///
/// Renderer callbacks (`on_expand`, `on_check`, drag passthroughs) write
/// into the owned state; the imperative handle (`scroll_to`,
/// `scroll_to_key`, `check_all`, `rows`) reads back out of it. Dropping the
/// controller tears everything down; there are no external resources and no
/// pending timers beyond the debounced slots, which die with it.
#[derive(Debug)]
pub struct TreeController {
    state: TreeState,
    window: RowWindow,
    drag: DragState,
    active: Option<NodeKey>,
    revision: u64,
    search_debounce: Debounce<String>,
    resize_debounce: Debounce<f64>,
    autoscroll: Debounce<f64>,
}

impl TreeController {
    /// Creates a controller with the given row extent, viewport extent, and
    /// symmetric overscan (all in the host's coordinate space).
    #[must_use]
    pub fn new(row_extent: f64, viewport_extent: f64, overscan: f64) -> Self {
        Self {
            state: TreeState::new(),
            window: RowWindow::new(0, row_extent, viewport_extent, overscan),
            drag: DragState::new(),
            active: None,
            revision: 0,
            search_debounce: Debounce::new(SEARCH_DEBOUNCE_MS),
            resize_debounce: Debounce::new(RESIZE_DEBOUNCE_MS),
            autoscroll: Debounce::new(AUTOSCROLL_DEBOUNCE_MS),
        }
    }

    /// The persistent projection state, for index builds.
    #[must_use]
    pub fn state(&self) -> &TreeState {
        &self.state
    }

    /// Mutable access to the persistent projection state.
    pub fn state_mut(&mut self) -> &mut TreeState {
        &mut self.state
    }

    /// The row window.
    #[must_use]
    pub fn window(&self) -> &RowWindow {
        &self.window
    }

    /// Mutable access to the row window.
    pub fn window_mut(&mut self) -> &mut RowWindow {
        &mut self.window
    }

    /// The current rebuild revision.
    ///
    /// Hosts fold this into their rebuild trigger alongside raw-input
    /// identity and control props.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Bumps the rebuild revision after an in-place mutation the input's
    /// identity does not reflect (a committed drop, typically).
    pub fn invalidate(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    // --- renderer callbacks ---

    /// Expansion toggle from a row chevron.
    pub fn on_expand<N>(&mut self, index: &TreeIndex<'_, N>, id: EntryId, expanded: bool) {
        index.set_expanded(id, expanded, &mut self.state);
    }

    /// Check toggle from a row checkbox.
    pub fn on_check<N>(&mut self, index: &TreeIndex<'_, N>, id: EntryId, checked: bool) {
        index.set_checked(id, checked, &mut self.state);
    }

    /// Row activation (click/enter); remembers the active key.
    pub fn on_activate(&mut self, key: NodeKey) {
        self.active = Some(key);
    }

    /// The most recently activated key, if any.
    #[must_use]
    pub fn active(&self) -> Option<&NodeKey> {
        self.active.as_ref()
    }

    // --- drag session ---

    /// Begins a drag session for `key`.
    pub fn set_current_drag_key(&mut self, key: NodeKey) {
        self.drag.start(key);
    }

    /// The drag session state.
    #[must_use]
    pub fn drag(&self) -> &DragState {
        &self.drag
    }

    /// Re-evaluates a hover against the caller's drop policy.
    pub fn on_drag_over(
        &mut self,
        hovered: Option<&NodeKey>,
        policy: &dyn Fn(&NodeKey, Option<&NodeKey>) -> Option<DropTarget>,
    ) -> Option<DropTarget> {
        self.drag.over(hovered, policy).cloned()
    }

    /// Ends the drag session; a resolved target yields the plan to commit
    /// (see `arbor_reorder::commit_drop`), after which the host calls
    /// [`invalidate`](Self::invalidate) and rebuilds.
    pub fn on_drop(&mut self) -> Option<DropPlan> {
        self.drag.finish()
    }

    /// Abandons any drag session and any pending auto-scroll.
    pub fn cancel_drag(&mut self) {
        self.drag.cancel();
        self.autoscroll.cancel();
    }

    /// Requests an edge auto-scroll step while dragging near the viewport
    /// edge; the latest request wins.
    pub fn request_autoscroll(&mut self, delta: f64, now_ms: u64) {
        if self.drag.is_dragging() {
            self.autoscroll.schedule(delta, now_ms);
        }
    }

    /// Applies a due auto-scroll step. Returns `true` when the window
    /// scrolled.
    pub fn poll_autoscroll(&mut self, now_ms: u64) -> bool {
        if let Some(delta) = self.autoscroll.poll(now_ms) {
            self.window.scroll_by(delta);
            true
        } else {
            false
        }
    }

    // --- imperative handle ---

    /// Jumps the window to the given position in the visible sequence.
    pub fn scroll_to(&mut self, position: usize) {
        self.window.scroll_to_index(position, ScrollAlign::Start);
    }

    /// Resolves `key` through the index, finds its position in the visible
    /// sequence, and jumps there. Returns `false` when the key is unknown
    /// or currently hidden by a collapsed ancestor.
    pub fn scroll_to_key<N>(&mut self, index: &TreeIndex<'_, N>, key: &str) -> bool {
        let Some(id) = index.entry_by_key(key) else {
            return false;
        };
        let visible = index.visible(&self.state);
        let Some(position) = visible.iter().position(|&entry| entry == id) else {
            return false;
        };
        self.window.set_len(visible.len());
        self.window.scroll_to_index(position, ScrollAlign::Start);
        true
    }

    /// Checks every enabled root, cascading to enabled descendants.
    pub fn check_all<N>(&mut self, index: &TreeIndex<'_, N>) {
        for &root in index.roots() {
            if !index.is_disabled(root, &self.state) {
                index.set_checked(root, true, &mut self.state);
            }
        }
    }

    /// Materializes the windowed rows for rendering.
    ///
    /// Recomputes the visible sequence, syncs the window's row count to it,
    /// and returns rows for the materialized slice only.
    pub fn rows<'a, N>(&mut self, index: &TreeIndex<'a, N>) -> Vec<Row<'a, N>> {
        let visible = index.visible(&self.state);
        self.window.set_len(visible.len());
        let slice = self.window.slice();
        visible[slice.start..slice.end]
            .iter()
            .filter_map(|&id| index.row(id, &mut self.state))
            .collect()
    }

    /// Every visible row, without windowing.
    pub fn node_list<'a, N>(&mut self, index: &TreeIndex<'a, N>) -> Vec<Row<'a, N>> {
        index
            .visible(&self.state)
            .into_iter()
            .filter_map(|id| index.row(id, &mut self.state))
            .collect()
    }

    // --- debounced inputs ---

    /// Schedules a search-text change; the latest call wins.
    pub fn set_search_text(&mut self, text: &str, now_ms: u64) {
        self.search_debounce.schedule(text.to_owned(), now_ms);
    }

    /// The search text due for a rebuild, once its debounce has elapsed.
    pub fn take_due_search(&mut self, now_ms: u64) -> Option<String> {
        self.search_debounce.poll(now_ms)
    }

    /// Schedules a container resize; the latest call wins.
    pub fn set_viewport_extent(&mut self, extent: f64, now_ms: u64) {
        self.resize_debounce.schedule(extent, now_ms);
    }

    /// Applies a due resize to the window. Returns `true` when the window
    /// changed and the host should re-render the materialized slice.
    pub fn poll_resize(&mut self, now_ms: u64) -> bool {
        if let Some(extent) = self.resize_debounce.poll(now_ms) {
            self.window.set_viewport_extent(extent);
            true
        } else {
            false
        }
    }
}
