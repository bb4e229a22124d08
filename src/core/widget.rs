//! Behavior shared by panel-backed widgets.

use crate::core::key::Key;
use crate::core::screen::Screen;

/// Operations a grid or host application drives on any widget.
///
/// Implementations forward to the embedded panel and layer their own state
/// maintenance on top (a scroll window recomputes its viewport on resize, a
/// text field re-scrolls its offset, and so on).
pub trait Widget {
    /// Draw the widget; `clear` erases the interior first.
    fn paint(&mut self, clear: bool);

    /// Change the widget extent; allocates the backend window on first use.
    fn resize(&mut self, screen: &mut dyn Screen, height: u16, width: u16);

    /// Reposition on the screen; marks the screen stale behind the old spot.
    fn move_to(&mut self, screen: &mut dyn Screen, y: i32, x: i32);

    /// Queue pending damage; `force` touches the whole surface first.
    fn refresh(&mut self, force: bool);

    /// Place the cursor inside the content area; returns the window-relative
    /// cell it landed on.
    fn focus(&mut self) -> (u16, u16);

    /// Offer a decoded key; returns whether the widget consumed it.
    fn handle_key(&mut self, screen: &mut dyn Screen, key: &Key) -> bool {
        let _ = (screen, key);
        false
    }

    /// Release the backend window. Safe to call repeatedly.
    fn destroy(&mut self);
}
