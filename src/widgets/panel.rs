//! Bordered panel drawing into a backend window.

use crate::core::geometry::{BorderMask, Rect};
use crate::core::key::Key;
use crate::core::screen::{Attr, Screen, Window};
use crate::core::widget::Widget;

const CORNER_TOP_LEFT: &str = "┌";
const CORNER_TOP_RIGHT: &str = "┐";
const CORNER_BOTTOM_LEFT: &str = "└";
const CORNER_BOTTOM_RIGHT: &str = "┘";
const EDGE_HORIZONTAL: &str = "─";
const EDGE_VERTICAL: &str = "│";

/// Write that tolerates backend-rejected boundary cells.
///
/// Rejections at terminal-imposed boundaries (the absolute last cell on some
/// backends) are expected behavior, never surfaced.
pub(crate) fn put(win: &mut dyn Window, y: u16, x: u16, text: &str, attr: Attr) {
    let _ = win.write_text(y, x, text, attr);
}

/// A rectangular surface with an optional border.
///
/// Every higher widget embeds a panel. A freshly created panel owns no
/// backend window yet; `resize` must run before the first `paint`.
pub struct Panel {
    rect: Rect,
    border: BorderMask,
    win: Option<Box<dyn Window>>,
}

impl Panel {
    /// An unsized panel. Call [`Panel::resize`] before painting.
    pub fn new() -> Self {
        Self {
            rect: Rect::default(),
            border: BorderMask::NONE,
            win: None,
        }
    }

    /// A panel with an initial size and position.
    pub fn with_geometry(
        screen: &mut dyn Screen,
        size: (u16, u16),
        pos: (i32, i32),
    ) -> Self {
        let mut panel = Self::new();
        panel.resize(screen, size.0, size.1);
        panel.move_to(screen, pos.0, pos.1);
        panel
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn border(&self) -> BorderMask {
        self.border
    }

    pub fn set_border(&mut self, border: BorderMask) {
        self.border = border;
    }

    pub fn is_sized(&self) -> bool {
        self.win.is_some()
    }

    /// The backend window.
    ///
    /// Panics when the panel has never been sized; that is a programming
    /// error and should surface during development rather than paint
    /// garbage.
    pub fn win(&mut self) -> &mut dyn Window {
        self.win
            .as_deref_mut()
            .expect("panel used before resize; call resize() first")
    }

    /// Window-relative interior area once borders are carved off.
    pub fn content_area(&self) -> Rect {
        self.border
            .content_area(Rect::new(0, 0, self.rect.height, self.rect.width))
    }

    /// Set dimensions, (re)allocating the backend window, and clear it.
    pub fn resize(&mut self, screen: &mut dyn Screen, height: u16, width: u16) {
        self.rect.height = height;
        self.rect.width = width;
        match self.win.as_deref_mut() {
            None => self.win = Some(screen.create_window(self.rect)),
            Some(win) => win.resize(height, width),
        }
        let win = self.win();
        win.clear();
        win.flush_pending();
    }

    /// Reposition the panel.
    ///
    /// The screen is marked stale: moving can uncover cells the panel was
    /// covering, and only a full repaint of the parent surface heals them.
    pub fn move_to(&mut self, screen: &mut dyn Screen, y: i32, x: i32) {
        self.rect.y = y;
        self.rect.x = x;
        let Some(win) = self.win.as_deref_mut() else {
            return;
        };
        win.move_to(y, x);
        screen.mark_dirty();
    }

    /// Queue pending damage; `force` touches the whole surface first.
    pub fn refresh(&mut self, force: bool) {
        let Some(win) = self.win.as_deref_mut() else {
            return;
        };
        if force {
            win.touch();
        }
        win.flush_pending();
    }

    /// Move the cursor to the first content cell and return it.
    pub fn focus(&mut self) -> (u16, u16) {
        let mut y = 0;
        let mut x = 0;
        if self.border.contains(BorderMask::TOP) {
            y += 1;
        }
        if self.border.contains(BorderMask::LEFT) {
            x += 1;
        }
        let win = self.win();
        win.move_cursor(y, x);
        win.flush_pending();
        (y, x)
    }

    /// Draw the border; `clear` erases the interior first.
    pub fn paint(&mut self, clear: bool) {
        let rect = self.rect;
        let border = self.border;
        let win = self.win();
        if clear {
            win.clear();
        }
        paint_border(win, border, rect.height, rect.width);
        win.flush_pending();
    }

    /// Release the backend window. No-op when already released.
    pub fn destroy(&mut self) {
        self.win = None;
    }
}

impl Default for Panel {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for Panel {
    fn paint(&mut self, clear: bool) {
        Panel::paint(self, clear);
    }

    fn resize(&mut self, screen: &mut dyn Screen, height: u16, width: u16) {
        Panel::resize(self, screen, height, width);
    }

    fn move_to(&mut self, screen: &mut dyn Screen, y: i32, x: i32) {
        Panel::move_to(self, screen, y, x);
    }

    fn refresh(&mut self, force: bool) {
        Panel::refresh(self, force);
    }

    fn focus(&mut self) -> (u16, u16) {
        Panel::focus(self)
    }

    fn handle_key(&mut self, _screen: &mut dyn Screen, _key: &Key) -> bool {
        false
    }

    fn destroy(&mut self) {
        Panel::destroy(self);
    }
}

/// Corner glyphs appear only where two adjacent edges are both active; a
/// lone edge stays a straight run. Runs shrink by one cell per adjacent
/// corner so corners are never overdrawn.
fn paint_border(win: &mut dyn Window, border: BorderMask, height: u16, width: u16) {
    if border == BorderMask::NONE || height == 0 || width == 0 {
        return;
    }

    let bottom = height - 1;
    let right = width - 1;

    let top_left = border.contains(BorderMask::TOP | BorderMask::LEFT);
    let top_right = border.contains(BorderMask::TOP | BorderMask::RIGHT);
    let bottom_left = border.contains(BorderMask::BOTTOM | BorderMask::LEFT);
    let bottom_right = border.contains(BorderMask::BOTTOM | BorderMask::RIGHT);

    if top_left {
        put(win, 0, 0, CORNER_TOP_LEFT, Attr::default());
    }
    if top_right {
        put(win, 0, right, CORNER_TOP_RIGHT, Attr::default());
    }
    if bottom_left {
        put(win, bottom, 0, CORNER_BOTTOM_LEFT, Attr::default());
    }
    if bottom_right {
        // the backend may reject the terminal's absolute last cell
        put(win, bottom, right, CORNER_BOTTOM_RIGHT, Attr::default());
    }

    if border.contains(BorderMask::TOP) {
        let len = (width as usize)
            .saturating_sub(top_left as usize)
            .saturating_sub(top_right as usize);
        put(
            win,
            0,
            top_left as u16,
            &EDGE_HORIZONTAL.repeat(len),
            Attr::default(),
        );
    }
    if border.contains(BorderMask::BOTTOM) {
        let len = (width as usize)
            .saturating_sub(bottom_left as usize)
            .saturating_sub(bottom_right as usize);
        put(
            win,
            bottom,
            bottom_left as u16,
            &EDGE_HORIZONTAL.repeat(len),
            Attr::default(),
        );
    }
    if border.contains(BorderMask::LEFT) {
        let start = top_left as u16;
        let len = height
            .saturating_sub(top_left as u16)
            .saturating_sub(bottom_left as u16);
        for row in 0..len {
            put(win, start + row, 0, EDGE_VERTICAL, Attr::default());
        }
    }
    if border.contains(BorderMask::RIGHT) {
        let start = top_right as u16;
        let len = height
            .saturating_sub(top_right as u16)
            .saturating_sub(bottom_right as u16);
        for row in 0..len {
            put(win, start + row, right, EDGE_VERTICAL, Attr::default());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Panel;
    use crate::core::geometry::BorderMask;
    use crate::testing::TestScreen;

    #[test]
    fn full_border_draws_corners_and_runs() {
        let mut screen = TestScreen::new(24, 80);
        let mut panel = Panel::with_geometry(&mut screen, (4, 6), (0, 0));
        panel.set_border(BorderMask::ALL);
        panel.paint(true);

        let win = screen.window(0);
        let state = win.borrow();
        assert_eq!(state.row(0), "┌────┐");
        assert_eq!(state.row(1), "│    │");
        assert_eq!(state.row(2), "│    │");
        assert_eq!(state.row(3), "└────┘");
    }

    #[test]
    fn lone_top_edge_has_no_corners() {
        let mut screen = TestScreen::new(24, 80);
        let mut panel = Panel::with_geometry(&mut screen, (3, 5), (0, 0));
        panel.set_border(BorderMask::TOP);
        panel.paint(true);

        let win = screen.window(0);
        assert_eq!(win.borrow().row(0), "─────");
    }

    #[test]
    fn adjacent_pair_draws_single_corner() {
        let mut screen = TestScreen::new(24, 80);
        let mut panel = Panel::with_geometry(&mut screen, (3, 5), (0, 0));
        panel.set_border(BorderMask::TOP | BorderMask::LEFT);
        panel.paint(true);

        let win = screen.window(0);
        let state = win.borrow();
        assert_eq!(state.row(0), "┌────");
        assert_eq!(state.row(1), "│    ");
        assert_eq!(state.row(2), "│    ");
    }

    #[test]
    fn bottom_right_corner_survives_last_cell_rejection() {
        let mut screen = TestScreen::new(3, 5);
        let mut panel = Panel::with_geometry(&mut screen, (3, 5), (0, 0));
        screen.window(0).borrow_mut().reject_last_cell = true;
        panel.set_border(BorderMask::ALL);
        panel.paint(true);

        let win = screen.window(0);
        let state = win.borrow();
        assert_eq!(state.row(0), "┌───┐");
        // last cell stays blank, everything else painted
        assert_eq!(state.row(2), "└─── ");
    }

    #[test]
    fn move_marks_screen_dirty() {
        let mut screen = TestScreen::new(24, 80);
        let mut panel = Panel::with_geometry(&mut screen, (3, 5), (0, 0));
        assert_eq!(screen.dirty_marks(), 1);

        panel.move_to(&mut screen, 4, 10);
        assert_eq!(screen.dirty_marks(), 2);
        assert_eq!(panel.rect().y, 4);
        assert_eq!(panel.rect().x, 10);
    }

    #[test]
    fn destroy_is_idempotent() {
        let mut screen = TestScreen::new(24, 80);
        let mut panel = Panel::with_geometry(&mut screen, (3, 5), (0, 0));
        panel.destroy();
        panel.destroy();
        assert!(!panel.is_sized());
    }

    #[test]
    #[should_panic(expected = "panel used before resize")]
    fn painting_an_unsized_panel_panics() {
        let mut panel = Panel::new();
        panel.paint(false);
    }
}
