//! In-memory backend for exercising widgets without a terminal.
//!
//! `TestScreen` hands out `TestWindow`s backed by shared cell grids, so a
//! test can drive a widget through the public API and then assert on the
//! exact cells it produced, the writes it issued, and the flush/touch
//! traffic it generated. The grids mimic one real-terminal quirk on
//! request: rejecting the window's absolute last cell.

use std::cell::RefCell;
use std::rc::Rc;

use crate::core::colors::ColorPair;
use crate::core::geometry::Rect;
use crate::core::screen::{Attr, Screen, Size, Window, WriteRejected};

/// One recorded `write_text` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteRecord {
    pub y: u16,
    pub x: u16,
    pub text: String,
    pub attr: Attr,
}

/// Shared state behind a [`TestWindow`].
#[derive(Debug)]
pub struct WindowState {
    pub rect: Rect,
    cells: Vec<Vec<char>>,
    pub writes: Vec<WriteRecord>,
    pub clears: usize,
    pub touches: usize,
    pub flushes: usize,
    pub cursor: Option<(u16, u16)>,
    /// Reject writes covering the bottom-right cell, like terminals that
    /// error on the absolute last cell.
    pub reject_last_cell: bool,
}

impl WindowState {
    fn new(rect: Rect) -> Self {
        let mut state = Self {
            rect,
            cells: Vec::new(),
            writes: Vec::new(),
            clears: 0,
            touches: 0,
            flushes: 0,
            cursor: None,
            reject_last_cell: false,
        };
        state.allocate();
        state
    }

    fn allocate(&mut self) {
        self.cells = vec![vec![' '; self.rect.width as usize]; self.rect.height as usize];
    }

    /// The characters of row `y` as a string.
    pub fn row(&self, y: usize) -> String {
        self.cells
            .get(y)
            .map(|row| row.iter().collect())
            .unwrap_or_default()
    }

    /// All rows, for whole-grid comparisons.
    pub fn rows(&self) -> Vec<String> {
        (0..self.cells.len()).map(|y| self.row(y)).collect()
    }

    fn write(&mut self, y: u16, x: u16, text: &str, attr: Attr) -> Result<(), WriteRejected> {
        self.writes.push(WriteRecord {
            y,
            x,
            text: text.to_string(),
            attr,
        });

        let height = self.rect.height;
        let width = self.rect.width;
        if y >= height {
            return Err(WriteRejected);
        }
        for (index, ch) in text.chars().enumerate() {
            let col = x as usize + index;
            if col >= width as usize {
                return Err(WriteRejected);
            }
            if self.reject_last_cell && y == height - 1 && col == width as usize - 1 {
                return Err(WriteRejected);
            }
            self.cells[y as usize][col] = ch;
        }
        Ok(())
    }
}

/// Drawing surface handed out by [`TestScreen::create_window`].
pub struct TestWindow {
    state: Rc<RefCell<WindowState>>,
}

impl Window for TestWindow {
    fn write_text(&mut self, y: u16, x: u16, text: &str, attr: Attr) -> Result<(), WriteRejected> {
        self.state.borrow_mut().write(y, x, text, attr)
    }

    fn clear(&mut self) {
        let mut state = self.state.borrow_mut();
        state.clears += 1;
        state.allocate();
    }

    fn resize(&mut self, height: u16, width: u16) {
        let mut state = self.state.borrow_mut();
        state.rect.height = height;
        state.rect.width = width;
        state.allocate();
    }

    fn move_to(&mut self, y: i32, x: i32) {
        let mut state = self.state.borrow_mut();
        state.rect.y = y;
        state.rect.x = x;
    }

    fn move_cursor(&mut self, y: u16, x: u16) {
        self.state.borrow_mut().cursor = Some((y, x));
    }

    fn touch(&mut self) {
        self.state.borrow_mut().touches += 1;
    }

    fn flush_pending(&mut self) {
        self.state.borrow_mut().flushes += 1;
    }
}

/// Recording screen backend.
pub struct TestScreen {
    size: Size,
    windows: Vec<Rc<RefCell<WindowState>>>,
    dirty_marks: usize,
    registered: Vec<ColorPair>,
    reject_pairs: bool,
    next_attr: u64,
}

impl TestScreen {
    pub fn new(rows: u16, cols: u16) -> Self {
        Self {
            size: Size { rows, cols },
            windows: Vec::new(),
            dirty_marks: 0,
            registered: Vec::new(),
            reject_pairs: false,
            next_attr: 0,
        }
    }

    /// The state of the `index`-th created window.
    pub fn window(&self, index: usize) -> Rc<RefCell<WindowState>> {
        self.windows[index].clone()
    }

    pub fn window_count(&self) -> usize {
        self.windows.len()
    }

    /// How often widgets marked the screen stale.
    pub fn dirty_marks(&self) -> usize {
        self.dirty_marks
    }

    /// Color pairs registered so far, in order.
    pub fn registered_pairs(&self) -> &[ColorPair] {
        &self.registered
    }

    /// Make color-pair registration fail from now on.
    pub fn reject_color_pairs(&mut self, reject: bool) {
        self.reject_pairs = reject;
    }
}

impl Screen for TestScreen {
    fn size(&self) -> Size {
        self.size
    }

    fn create_window(&mut self, rect: Rect) -> Box<dyn Window> {
        let state = Rc::new(RefCell::new(WindowState::new(rect)));
        self.windows.push(state.clone());
        Box::new(TestWindow { state })
    }

    fn mark_dirty(&mut self) {
        self.dirty_marks += 1;
    }

    fn register_color_pair(&mut self, pair: ColorPair) -> Option<Attr> {
        if self.reject_pairs {
            return None;
        }
        self.registered.push(pair);
        self.next_attr += 1;
        Some(Attr(self.next_attr))
    }
}
