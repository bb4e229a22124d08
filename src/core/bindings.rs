//! Scroll navigation intents and their key tables.

use once_cell::sync::Lazy;

use crate::core::key::Key;

/// Navigation intent applied to a scroll window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScrollIntent {
    Previous,
    Next,
    PreviousPage,
    NextPage,
    ToStart,
    ToEnd,
}

/// Key lists that trigger each intent.
///
/// Every list may hold several keys so an application can add vi-style or
/// emacs-style chords next to the arrow keys without replacing them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrollBindings {
    pub previous: Vec<Key>,
    pub next: Vec<Key>,
    pub previous_page: Vec<Key>,
    pub next_page: Vec<Key>,
    pub to_start: Vec<Key>,
    pub to_end: Vec<Key>,
}

static DEFAULT_SCROLL_BINDINGS: Lazy<ScrollBindings> = Lazy::new(|| ScrollBindings {
    previous: vec![Key::Up],
    next: vec![Key::Down],
    previous_page: vec![Key::PageUp],
    next_page: vec![Key::PageDown],
    to_start: vec![Key::Home],
    to_end: vec![Key::End],
});

impl Default for ScrollBindings {
    fn default() -> Self {
        DEFAULT_SCROLL_BINDINGS.clone()
    }
}

impl ScrollBindings {
    /// The intent bound to `key`, if any.
    pub fn intent_for(&self, key: &Key) -> Option<ScrollIntent> {
        if self.previous.contains(key) {
            Some(ScrollIntent::Previous)
        } else if self.next.contains(key) {
            Some(ScrollIntent::Next)
        } else if self.previous_page.contains(key) {
            Some(ScrollIntent::PreviousPage)
        } else if self.next_page.contains(key) {
            Some(ScrollIntent::NextPage)
        } else if self.to_start.contains(key) {
            Some(ScrollIntent::ToStart)
        } else if self.to_end.contains(key) {
            Some(ScrollIntent::ToEnd)
        } else {
            None
        }
    }
}
