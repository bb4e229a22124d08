//! Completion popups over a text field.
//!
//! The overlay owns the popup mechanics; computing suggestions is an
//! injected strategy so the popup never knows where alternatives come from
//! (command tables, file listings, history, ...).

use crate::core::key::Key;
use crate::core::screen::Screen;
use crate::widgets::scroll_window::ScrollWindow;

/// Read-only view of the owning field handed to the suggestion source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldState<'a> {
    pub text: &'a str,
    /// Character position of the caret.
    pub cursor: usize,
    /// Span of the word under the caret, when there is one.
    pub word: Option<(usize, usize)>,
}

/// Computes suggestion strings for the current field state.
pub trait CompletionSource {
    /// Suggestions to show; an empty list closes the popup.
    fn suggest(&mut self, field: &FieldState<'_>) -> Vec<String>;
}

impl<F> CompletionSource for F
where
    F: FnMut(&FieldState<'_>) -> Vec<String>,
{
    fn suggest(&mut self, field: &FieldState<'_>) -> Vec<String> {
        self(field)
    }
}

/// What an offered key did to the popup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionAction {
    /// Not a popup key; the field should process it normally.
    Ignored,
    /// The popup consumed the key (navigation).
    Consumed,
    /// The user accepted this suggestion.
    Accepted(String),
    /// The user dismissed the popup.
    Cancelled,
}

/// Popup height never exceeds this many rows.
const MAX_POPUP_HEIGHT: usize = 10;

/// Bridges text-field edits to a scroll-window popup.
pub struct CompletionOverlay {
    source: Box<dyn CompletionSource>,
    popup: Option<ScrollWindow<String>>,
}

impl CompletionOverlay {
    pub fn new(source: Box<dyn CompletionSource>) -> Self {
        Self {
            source,
            popup: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.popup.is_some()
    }

    /// The popup's scroll window, while it is open.
    pub fn popup(&self) -> Option<&ScrollWindow<String>> {
        self.popup.as_ref()
    }

    /// Recompute suggestions for the current field state.
    ///
    /// `cursor_y`/`cursor_x` are the caret's screen coordinates; the popup
    /// positions itself relative to them. No suggestions closes the popup.
    pub fn update(
        &mut self,
        screen: &mut dyn Screen,
        field: &FieldState<'_>,
        cursor_y: i32,
        cursor_x: i32,
    ) {
        let items = self.source.suggest(field);
        self.set_alternatives(screen, items, cursor_y, cursor_x);
    }

    /// Show `items` in the popup, creating and placing it as needed.
    ///
    /// Height is `min(10, items, max(space_below, space_above))`; width is
    /// the longest item, shrunk to two thirds of the screen when it would
    /// not fit. The popup prefers hanging below the caret, flips above when
    /// the space below is too small, and is pulled left just enough to stay
    /// inside the right screen edge.
    pub fn set_alternatives(
        &mut self,
        screen: &mut dyn Screen,
        items: Vec<String>,
        cursor_y: i32,
        cursor_x: i32,
    ) {
        if items.is_empty() {
            self.close(screen);
            return;
        }

        let size = screen.size();
        let space_below = (size.rows as i64 - cursor_y as i64 - 1).max(0) as usize;
        let space_above = cursor_y.max(0) as usize;

        let height = MAX_POPUP_HEIGHT
            .min(items.len())
            .min(space_below.max(space_above));
        if height == 0 {
            // a one-row screen has no side to hang the popup on
            self.close(screen);
            return;
        }

        let longest = items
            .iter()
            .map(|item| item.chars().count())
            .max()
            .unwrap_or(0);
        let mut width = longest.max(1);
        if width > size.cols as usize {
            width = (size.cols as usize) * 2 / 3;
        }
        let width = width.max(1).min(size.cols as usize) as u16;

        let y = if height <= space_below {
            cursor_y + 1
        } else {
            cursor_y - height as i32
        };
        let mut x = cursor_x;
        if x + width as i32 > size.cols as i32 {
            x = size.cols as i32 - width as i32;
        }
        let x = x.max(0);

        if self.popup.is_none() {
            let mut popup = ScrollWindow::with_display_painter();
            popup.set_wrapping(true);
            popup.set_margin(0);
            self.popup = Some(popup);
        }
        let popup = self
            .popup
            .as_mut()
            .expect("popup allocated just above");
        popup.resize(screen, height as u16, width);
        popup.move_to(screen, y, x);
        popup.set_items(items);
        popup.jump_to_index(0);
        popup.paint(true);
        popup.focus();
    }

    /// Offer a key to the popup.
    pub fn handle_key(&mut self, key: &Key) -> CompletionAction {
        let Some(popup) = self.popup.as_mut() else {
            return CompletionAction::Ignored;
        };
        match key {
            Key::Return | Key::Tab => match popup.selected_item() {
                Some(choice) => CompletionAction::Accepted(choice.clone()),
                None => CompletionAction::Cancelled,
            },
            Key::Escape => CompletionAction::Cancelled,
            _ => {
                let response = popup.scroll_key_response(key);
                if response.handled {
                    if response.must_repaint {
                        popup.paint(response.must_clear);
                    }
                    popup.focus();
                    CompletionAction::Consumed
                } else {
                    CompletionAction::Ignored
                }
            }
        }
    }

    /// Destroy the popup. No-op when already closed.
    pub fn close(&mut self, screen: &mut dyn Screen) {
        if let Some(mut popup) = self.popup.take() {
            popup.destroy();
            screen.mark_dirty();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CompletionAction, CompletionOverlay, FieldState};
    use crate::core::key::Key;
    use crate::testing::TestScreen;

    fn fixed_source(items: Vec<&str>) -> Box<dyn super::CompletionSource> {
        let items: Vec<String> = items.into_iter().map(str::to_string).collect();
        Box::new(move |_field: &FieldState<'_>| items.clone())
    }

    fn state<'a>(text: &'a str) -> FieldState<'a> {
        FieldState {
            text,
            cursor: text.chars().count(),
            word: None,
        }
    }

    #[test]
    fn popup_opens_below_cursor_when_space_allows() {
        let mut screen = TestScreen::new(24, 80);
        let mut overlay = CompletionOverlay::new(fixed_source(vec!["alpha", "beta"]));

        overlay.update(&mut screen, &state("a"), 5, 10);
        assert!(overlay.is_open());
        let popup = overlay.popup().expect("open");
        assert_eq!(popup.panel().rect().y, 6);
        assert_eq!(popup.panel().rect().x, 10);
        assert_eq!(popup.panel().rect().height, 2);
        assert_eq!(popup.panel().rect().width, 5);
    }

    #[test]
    fn popup_flips_above_when_no_room_below() {
        let mut screen = TestScreen::new(10, 40);
        let mut overlay =
            CompletionOverlay::new(fixed_source(vec!["one", "two", "three", "four"]));

        overlay.update(&mut screen, &state("x"), 8, 3);
        let popup = overlay.popup().expect("open");
        // four rows do not fit in the single row below the caret
        assert_eq!(popup.panel().rect().y, 4);
    }

    #[test]
    fn popup_is_pulled_left_at_the_right_edge() {
        let mut screen = TestScreen::new(24, 30);
        let mut overlay = CompletionOverlay::new(fixed_source(vec!["longish-item"]));

        overlay.update(&mut screen, &state("x"), 2, 25);
        let popup = overlay.popup().expect("open");
        assert_eq!(popup.panel().rect().width, 12);
        assert_eq!(popup.panel().rect().x, 18);
    }

    #[test]
    fn oversized_items_shrink_to_two_thirds_of_screen() {
        let mut screen = TestScreen::new(24, 30);
        let long = "x".repeat(50);
        let mut overlay = CompletionOverlay::new(fixed_source(vec![long.as_str()]));

        overlay.update(&mut screen, &state("x"), 2, 0);
        let popup = overlay.popup().expect("open");
        assert_eq!(popup.panel().rect().width, 20);
    }

    #[test]
    fn empty_suggestions_close_the_popup() {
        let mut screen = TestScreen::new(24, 80);
        let mut overlay = CompletionOverlay::new(fixed_source(vec!["alpha"]));

        overlay.update(&mut screen, &state("a"), 5, 10);
        assert!(overlay.is_open());

        overlay.set_alternatives(&mut screen, Vec::new(), 5, 10);
        assert!(!overlay.is_open());
    }

    #[test]
    fn navigation_wraps_and_accept_returns_selection() {
        let mut screen = TestScreen::new(24, 80);
        let mut overlay = CompletionOverlay::new(fixed_source(vec!["alpha", "beta"]));
        overlay.update(&mut screen, &state("a"), 5, 10);

        assert_eq!(overlay.handle_key(&Key::Down), CompletionAction::Consumed);
        assert_eq!(overlay.handle_key(&Key::Down), CompletionAction::Consumed);
        assert_eq!(
            overlay.handle_key(&Key::Return),
            CompletionAction::Accepted("alpha".to_string())
        );
    }

    #[test]
    fn close_is_idempotent() {
        let mut screen = TestScreen::new(24, 80);
        let mut overlay = CompletionOverlay::new(fixed_source(vec!["alpha"]));
        overlay.update(&mut screen, &state("a"), 5, 10);

        overlay.close(&mut screen);
        overlay.close(&mut screen);
        assert!(!overlay.is_open());
        assert_eq!(overlay.handle_key(&Key::Down), CompletionAction::Ignored);
    }
}
