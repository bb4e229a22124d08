//! Backend interfaces consumed by the widgets.
//!
//! The terminal driver (raw mode, escape decoding, color-pair setup, the
//! flush that pushes cells to the terminal) lives outside this crate;
//! widgets only see these traits.

use crate::core::colors::ColorPair;
use crate::core::geometry::Rect;

/// Opaque display attribute assigned by the backend.
///
/// The toolkit never interprets the value; it only threads it into
/// [`Window::write_text`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Attr(pub u64);

/// Screen dimensions in character cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    pub rows: u16,
    pub cols: u16,
}

/// A write landed outside the window's writable region.
///
/// Some terminals reject the absolute last cell; callers treat this as
/// expected backend behavior, not a logic fault, and drop the write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteRejected;

/// One drawing surface, exclusively owned by a panel.
pub trait Window {
    /// Write `text` starting at window-relative cell `(y, x)`.
    fn write_text(&mut self, y: u16, x: u16, text: &str, attr: Attr) -> Result<(), WriteRejected>;

    /// Erase the window contents.
    fn clear(&mut self);

    /// Change the window extent in place.
    fn resize(&mut self, height: u16, width: u16);

    /// Reposition the window on the screen.
    fn move_to(&mut self, y: i32, x: i32);

    /// Place the hardware cursor at a cell inside this window.
    fn move_cursor(&mut self, y: u16, x: u16);

    /// Force the entire surface to repaint on the next flush.
    fn touch(&mut self);

    /// Queue this window's damage for the collaborator's next flush.
    fn flush_pending(&mut self);
}

/// The shared screen owned by the terminal collaborator.
pub trait Screen {
    fn size(&self) -> Size;

    /// Allocate a drawing surface covering `rect`.
    fn create_window(&mut self, rect: Rect) -> Box<dyn Window>;

    /// Mark the whole screen stale so cells uncovered by a moved or closed
    /// panel are repainted on the next flush.
    fn mark_dirty(&mut self);

    /// Ask the backend for an attribute representing `pair`.
    ///
    /// `None` when the terminal cannot register further pairs.
    fn register_color_pair(&mut self, pair: ColorPair) -> Option<Attr>;
}
