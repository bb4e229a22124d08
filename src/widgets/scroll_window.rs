//! Scrolling selection over an ordered item list.

use std::fmt::Display;

use crate::core::bindings::{ScrollBindings, ScrollIntent};
use crate::core::geometry::BorderMask;
use crate::core::key::Key;
use crate::core::screen::{Attr, Screen, Window};
use crate::core::widget::Widget;
use crate::logging;
use crate::widgets::panel::{put, Panel};

/// Row geometry handed to the item painter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemRow {
    /// Window-relative row of the item.
    pub y: u16,
    /// Window-relative column where the item starts.
    pub x: u16,
    /// Cells available on the row.
    pub max_width: usize,
    /// Whether the item is the current selection.
    pub selected: bool,
}

/// Paints one item into its row.
pub type ItemPainter<T> = Box<dyn FnMut(&mut dyn Window, ItemRow, &T)>;

/// Outcome of offering a key to the scroll engine.
///
/// `handle_key` consumes the repaint flags itself; embedders that own the
/// repaint (a completion popup inside a text field) read them instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollKeyResponse {
    /// The key mapped to an intent that moved the cursor.
    pub handled: bool,
    /// The whole viewport must be repainted.
    pub must_repaint: bool,
    /// The repaint should clear first (the offset moved).
    pub must_clear: bool,
}

impl ScrollKeyResponse {
    const IGNORED: ScrollKeyResponse = ScrollKeyResponse {
        handled: false,
        must_repaint: false,
        must_clear: false,
    };
}

/// The scrolling/selection engine.
///
/// Items are caller-owned and replaced wholesale with [`set_items`]; the
/// window tracks a selection cursor and the offset of the first visible
/// item. After any `scroll()` call the cursor lies inside the visible
/// window whenever the list is non-empty and the viewport has rows.
///
/// [`set_items`]: ScrollWindow::set_items
pub struct ScrollWindow<T> {
    panel: Panel,
    items: Vec<T>,
    cursor: usize,
    offset: usize,
    list_height: usize,
    margin: usize,
    paging: bool,
    wrapping: bool,
    bindings: ScrollBindings,
    painter: ItemPainter<T>,
}

impl<T> ScrollWindow<T> {
    pub fn new(painter: ItemPainter<T>) -> Self {
        Self {
            panel: Panel::new(),
            items: Vec::new(),
            cursor: 0,
            offset: 0,
            list_height: 1,
            margin: 5,
            paging: false,
            wrapping: false,
            bindings: ScrollBindings::default(),
            painter,
        }
    }

    pub fn panel(&self) -> &Panel {
        &self.panel
    }

    pub fn panel_mut(&mut self) -> &mut Panel {
        &mut self.panel
    }

    pub fn set_border(&mut self, border: BorderMask) {
        self.panel.set_border(border);
        self.calc_list_height();
    }

    pub fn set_margin(&mut self, margin: usize) {
        self.margin = margin;
    }

    pub fn set_paging(&mut self, paging: bool) {
        self.paging = paging;
    }

    pub fn set_wrapping(&mut self, wrapping: bool) {
        self.wrapping = wrapping;
    }

    pub fn set_bindings(&mut self, bindings: ScrollBindings) {
        self.bindings = bindings;
    }

    pub fn set_painter(&mut self, painter: ItemPainter<T>) {
        self.painter = painter;
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Replace the item list wholesale and reconcile cursor and offset.
    ///
    /// Does not repaint; the caller decides when (usually with a clear,
    /// since rows may have shifted arbitrarily).
    pub fn set_items(&mut self, items: Vec<T>) {
        self.items = items;
        if self.items.is_empty() {
            self.cursor = 0;
            self.offset = 0;
        } else {
            self.scroll();
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn list_height(&self) -> usize {
        self.list_height
    }

    /// The currently selected item, if the list is non-empty.
    pub fn selected_item(&self) -> Option<&T> {
        self.items.get(self.cursor)
    }

    /// Select an item by index and reconcile the offset.
    ///
    /// Returns `false` when the index is out of range. Does not repaint;
    /// the cursor may have moved far, so the caller usually repaints with a
    /// clear.
    pub fn jump_to_index(&mut self, index: usize) -> bool {
        if index >= self.items.len() {
            return false;
        }
        self.cursor = index;
        self.scroll();
        true
    }

    /// Recompute the viewport height from the panel geometry.
    fn calc_list_height(&mut self) {
        self.list_height = self.panel.content_area().height as usize;
    }

    /// Reconcile `offset` with `cursor` so the selection stays visible.
    ///
    /// Uses the effective margin `min(list_height / 2, margin)`; a larger
    /// configured margin would leave no settled band in a small viewport.
    /// Returns whether the offset changed, which is exactly "the caller
    /// must repaint the whole viewport". An unchanged offset means only the
    /// affected rows need paint.
    pub fn scroll(&mut self) -> bool {
        if self.items.is_empty() {
            self.cursor = 0;
            let changed = self.offset != 0;
            self.offset = 0;
            return changed;
        }
        self.cursor = self.cursor.min(self.items.len() - 1);
        if self.list_height == 0 {
            return false;
        }

        let old_offset = self.offset;
        let h = self.list_height;
        let m = (h / 2).min(self.margin);

        if self.paging {
            // jump by whole pages instead of creeping row by row
            if self.cursor < self.offset + m || self.cursor + m >= self.offset + h {
                self.offset = (self.cursor / h) * h;
            }
        } else if self.cursor < self.offset + m {
            self.offset = self.cursor.saturating_sub(m);
        } else if self.cursor + m >= self.offset + h {
            // near the end of the list there are fewer than `m` rows left to
            // show below the cursor; reach at least one past it
            let reach = m.min(self.items.len() - self.cursor).max(1);
            self.offset = (self.cursor + reach).saturating_sub(h);
        }
        self.offset = self.offset.min(self.items.len().saturating_sub(h));

        logging::log_scroll_decision(self.cursor, old_offset, self.offset, h, self.paging);
        self.offset != old_offset
    }

    /// Apply a navigation intent.
    ///
    /// A candidate cursor equal to the current one reports "not handled" so
    /// the surrounding widget can treat the key as unconsumed. Otherwise the
    /// cursor commits and `scroll()` reconciles the offset; when the offset
    /// is stable only the two affected rows are repainted here, and the
    /// response tells the caller nothing else is needed.
    pub fn apply_intent(&mut self, intent: ScrollIntent) -> ScrollKeyResponse {
        if self.items.is_empty() {
            return ScrollKeyResponse::IGNORED;
        }
        let last = self.items.len() - 1;
        let cursor = self.cursor;

        let candidate = match intent {
            ScrollIntent::Previous => {
                if cursor > 0 {
                    cursor - 1
                } else if self.wrapping {
                    last
                } else {
                    cursor
                }
            }
            ScrollIntent::Next => {
                if cursor < last {
                    cursor + 1
                } else if self.wrapping {
                    0
                } else {
                    cursor
                }
            }
            ScrollIntent::PreviousPage => cursor.saturating_sub(self.list_height),
            ScrollIntent::NextPage => (cursor + self.list_height).min(last),
            ScrollIntent::ToStart => 0,
            ScrollIntent::ToEnd => last,
        };

        if candidate == cursor {
            return ScrollKeyResponse::IGNORED;
        }

        let old_cursor = cursor;
        self.cursor = candidate;
        if self.scroll() {
            ScrollKeyResponse {
                handled: true,
                must_repaint: true,
                must_clear: true,
            }
        } else {
            // offset stable: repaint just the rows that changed
            self.paint_item(old_cursor);
            self.paint_item(self.cursor);
            self.panel.refresh(false);
            ScrollKeyResponse {
                handled: true,
                must_repaint: false,
                must_clear: false,
            }
        }
    }

    /// Map a key through the bindings and apply the intent, leaving the
    /// viewport repaint to the caller.
    pub fn scroll_key_response(&mut self, key: &Key) -> ScrollKeyResponse {
        match self.bindings.intent_for(key) {
            Some(intent) => self.apply_intent(intent),
            None => ScrollKeyResponse::IGNORED,
        }
    }

    /// Offer a key and perform whatever repaint it requires.
    pub fn handle_key(&mut self, key: &Key) -> bool {
        let response = self.scroll_key_response(key);
        if response.handled && response.must_repaint {
            self.paint(response.must_clear);
        }
        response.handled
    }

    /// Draw the border and every visible row.
    ///
    /// Rows past the end of the list are blank-filled so stale rows from a
    /// longer previous list never remain visible.
    pub fn paint(&mut self, clear: bool) {
        self.panel.paint(clear);

        let end = (self.offset + self.list_height).min(self.items.len());
        for index in self.offset..end {
            self.paint_item(index);
        }

        let content = self.panel.content_area();
        let width = (content.width as usize).saturating_sub(1);
        let blank = " ".repeat(width);
        let first_blank = end.saturating_sub(self.offset);
        for row in first_blank..self.list_height {
            put(
                self.panel.win(),
                content.y as u16 + row as u16,
                content.x as u16,
                &blank,
                Attr::default(),
            );
        }

        self.panel.refresh(false);
    }

    /// Repaint a single item row, if it is inside the visible window.
    pub fn paint_item(&mut self, index: usize) {
        if index < self.offset || index >= self.offset + self.list_height {
            return;
        }
        let Some(item) = self.items.get(index) else {
            return;
        };

        let content = self.panel.content_area();
        let row = ItemRow {
            y: content.y as u16 + (index - self.offset) as u16,
            x: content.x as u16,
            // the rightmost cell stays untouched, like the cell a terminal
            // reserves at the bottom-right corner
            max_width: (content.width as usize).saturating_sub(1),
            selected: index == self.cursor,
        };
        (self.painter)(self.panel.win(), row, item);
    }

    /// Move the cursor cell onto the selected row.
    pub fn focus(&mut self) -> (u16, u16) {
        let mut y = 0u16;
        let mut x = 0u16;
        if self.panel.border().contains(BorderMask::TOP) {
            y += 1;
        }
        if self.panel.border().contains(BorderMask::LEFT) {
            x += 1;
        }
        let row = self
            .cursor
            .saturating_sub(self.offset)
            .min(self.list_height.saturating_sub(1));
        y += row as u16;

        let win = self.panel.win();
        win.move_cursor(y, x);
        win.flush_pending();
        (y, x)
    }

    /// Resize the panel and restore the visibility invariant.
    ///
    /// The cursor never moves here; only the offset is reconciled when the
    /// smaller viewport would leave the selection outside the window.
    pub fn resize(&mut self, screen: &mut dyn Screen, height: u16, width: u16) {
        self.panel.resize(screen, height, width);
        self.calc_list_height();
        self.scroll();
    }

    pub fn move_to(&mut self, screen: &mut dyn Screen, y: i32, x: i32) {
        self.panel.move_to(screen, y, x);
    }

    pub fn refresh(&mut self, force: bool) {
        self.panel.refresh(force);
    }

    pub fn destroy(&mut self) {
        self.panel.destroy();
    }
}

impl<T: PartialEq> ScrollWindow<T> {
    /// Select `item` by equality lookup and reconcile the offset.
    ///
    /// Returns `false` when the item is not in the list. Repaint is the
    /// caller's responsibility, as with [`jump_to_index`].
    ///
    /// [`jump_to_index`]: ScrollWindow::jump_to_index
    pub fn jump_to(&mut self, item: &T) -> bool {
        match self.items.iter().position(|candidate| candidate == item) {
            Some(index) => self.jump_to_index(index),
            None => false,
        }
    }
}

impl<T: Display> ScrollWindow<T> {
    /// A scroll window that paints items with their `Display` impl,
    /// truncated and padded to the row width so stale cells from a longer
    /// previous item never survive a row repaint.
    pub fn with_display_painter() -> Self {
        Self::new(Box::new(|win, row, item: &T| {
            let mut text: String = item.to_string().chars().take(row.max_width).collect();
            for _ in text.chars().count()..row.max_width {
                text.push(' ');
            }
            put(win, row.y, row.x, &text, Attr::default());
        }))
    }
}

impl<T> Widget for ScrollWindow<T> {
    fn paint(&mut self, clear: bool) {
        ScrollWindow::paint(self, clear);
    }

    fn resize(&mut self, screen: &mut dyn Screen, height: u16, width: u16) {
        ScrollWindow::resize(self, screen, height, width);
    }

    fn move_to(&mut self, screen: &mut dyn Screen, y: i32, x: i32) {
        ScrollWindow::move_to(self, screen, y, x);
    }

    fn refresh(&mut self, force: bool) {
        ScrollWindow::refresh(self, force);
    }

    fn focus(&mut self) -> (u16, u16) {
        ScrollWindow::focus(self)
    }

    fn handle_key(&mut self, _screen: &mut dyn Screen, key: &Key) -> bool {
        ScrollWindow::handle_key(self, key)
    }

    fn destroy(&mut self) {
        ScrollWindow::destroy(self);
    }
}
