//! Scroll/repaint debug channel.
//!
//! Repaint decisions are the part of this toolkit that is hardest to debug
//! from a live terminal, so they get a dedicated trace channel. Events are
//! emitted through `tracing` and gated behind `PANE_DEBUG_SCROLL=1`; a quiet
//! host pays one lazy flag read per call.

use std::sync::OnceLock;

use crate::config::EnvConfig;

pub fn debug_scroll_enabled() -> bool {
    static FLAG: OnceLock<bool> = OnceLock::new();
    *FLAG.get_or_init(|| EnvConfig::from_env().debug_scroll)
}

pub(crate) fn log_scroll_decision(
    cursor: usize,
    old_offset: usize,
    new_offset: usize,
    list_height: usize,
    paging: bool,
) {
    if !debug_scroll_enabled() {
        return;
    }
    tracing::debug!(
        target: "pane_tui::scroll",
        cursor,
        old_offset,
        new_offset,
        list_height,
        paging,
        full_repaint = old_offset != new_offset,
        "scroll decision"
    );
}
