//! Single-row text entry with horizontal scrolling.

use crate::core::geometry::BorderMask;
use crate::core::key::Key;
use crate::core::screen::{Attr, Screen};
use crate::core::widget::Widget;
use crate::widgets::completion::{CompletionAction, CompletionOverlay, CompletionSource, FieldState};
use crate::widgets::panel::{put, Panel};

/// A one-row editable text buffer.
///
/// Cursor and offset are character positions; the offset algorithm is the
/// scroll-window reconciliation in one dimension, keeping the cursor inside
/// `[margin, width - margin - prefix_len)` of the visible slice.
pub struct TextField {
    panel: Panel,
    text: String,
    cursor: usize,
    offset: usize,
    margin: usize,
    prefix: String,
    background: char,
    read_only: bool,
    completion: Option<CompletionOverlay>,
}

impl TextField {
    pub fn new(screen: &mut dyn Screen, width: u16, pos: (i32, i32)) -> Self {
        let mut panel = Panel::new();
        panel.resize(screen, 1, width);
        panel.move_to(screen, pos.0, pos.1);
        Self {
            panel,
            text: String::new(),
            cursor: 0,
            offset: 0,
            margin: 2,
            prefix: String::new(),
            background: ' ',
            read_only: false,
            completion: None,
        }
    }

    pub fn panel(&self) -> &Panel {
        &self.panel
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.cursor = self.cursor.min(self.char_len());
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn set_cursor(&mut self, cursor: usize) {
        self.cursor = cursor.min(self.char_len());
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn set_margin(&mut self, margin: usize) {
        self.margin = margin;
    }

    pub fn set_prefix(&mut self, prefix: impl Into<String>) {
        self.prefix = prefix.into();
    }

    pub fn set_background(&mut self, background: char) {
        self.background = background;
    }

    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    /// Attach a suggestion source; edits will drive its popup from now on.
    pub fn set_completion(&mut self, source: Box<dyn CompletionSource>) {
        self.completion = Some(CompletionOverlay::new(source));
    }

    pub fn completion(&self) -> Option<&CompletionOverlay> {
        self.completion.as_ref()
    }

    pub fn completion_mut(&mut self) -> Option<&mut CompletionOverlay> {
        self.completion.as_mut()
    }

    /// Detach the suggestion source, closing any open popup.
    pub fn clear_completion(&mut self, screen: &mut dyn Screen) {
        if let Some(mut completion) = self.completion.take() {
            completion.close(screen);
        }
    }

    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_index)
            .map(|(byte, _)| byte)
            .unwrap_or(self.text.len())
    }

    /// Reconcile the horizontal offset with the cursor.
    ///
    /// Returns whether the offset changed; an unchanged offset means the
    /// visible slice did not shift and no repaint is needed for motion.
    pub fn scroll(&mut self) -> bool {
        let len = self.char_len();
        self.cursor = self.cursor.min(len);
        let width = self.panel.rect().width as usize;
        let prefix_len = self.prefix.chars().count();
        let upper = width.saturating_sub(self.margin + prefix_len);

        if self.cursor >= self.offset + self.margin && self.cursor < self.offset + upper {
            return false;
        }

        let old = self.offset;
        self.offset = (self.cursor + self.margin + prefix_len)
            .saturating_sub(width)
            .min(len);
        self.offset != old
    }

    /// Draw the background fill, prefix, and visible text slice.
    pub fn paint(&mut self, clear: bool) {
        // a one-row field never draws a border
        self.panel.set_border(BorderMask::NONE);
        self.panel.paint(clear);
        self.scroll();

        let width = self.panel.rect().width as usize;
        let prefix_len = self.prefix.chars().count();
        let fill: String = std::iter::repeat(self.background)
            .take(width.saturating_sub(1))
            .collect();
        let visible: String = self
            .text
            .chars()
            .skip(self.offset)
            .take(width.saturating_sub(1 + prefix_len))
            .collect();

        let prefix = self.prefix.clone();
        let win = self.panel.win();
        put(win, 0, 0, &fill, Attr::default());
        put(win, 0, 0, &prefix, Attr::default());
        put(win, 0, prefix_len as u16, &visible, Attr::default());
        win.flush_pending();
    }

    /// Move the cursor cell onto the caret position.
    pub fn focus(&mut self) -> (u16, u16) {
        let prefix_len = self.prefix.chars().count();
        let x = (self.cursor.saturating_sub(self.offset) + prefix_len) as u16;
        let win = self.panel.win();
        win.move_cursor(0, x);
        win.flush_pending();
        (0, x)
    }

    /// Change the field width; the height is always one row.
    pub fn resize(&mut self, screen: &mut dyn Screen, width: u16) {
        self.panel.resize(screen, 1, width);
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

    /// Insert a character at the cursor.
    pub fn insert_char(&mut self, ch: char) {
        let at = self.byte_index(self.cursor);
        self.text.insert(at, ch);
        self.cursor += 1;
    }

    /// Delete the character before the cursor. Returns whether anything
    /// changed.
    pub fn delete_before(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let at = self.byte_index(self.cursor - 1);
        self.text.remove(at);
        self.cursor -= 1;
        true
    }

    /// Delete the character under the cursor.
    pub fn delete_at(&mut self) -> bool {
        if self.cursor >= self.char_len() {
            return false;
        }
        let at = self.byte_index(self.cursor);
        self.text.remove(at);
        true
    }

    /// Delete everything before the cursor.
    pub fn delete_to_start(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let at = self.byte_index(self.cursor);
        self.text = self.text[at..].to_string();
        self.cursor = 0;
        true
    }

    /// Move the cursor to the start of the previous word.
    pub fn move_word_left(&mut self) {
        let chars: Vec<char> = self.text.chars().collect();
        let mut pos = self.cursor.min(chars.len());
        while pos > 0 && chars[pos - 1].is_whitespace() {
            pos -= 1;
        }
        while pos > 0 && !chars[pos - 1].is_whitespace() {
            pos -= 1;
        }
        self.cursor = pos;
    }

    /// Move the cursor past the end of the next word.
    pub fn move_word_right(&mut self) {
        let chars: Vec<char> = self.text.chars().collect();
        let len = chars.len();
        let mut pos = self.cursor.min(len);
        while pos < len && chars[pos].is_whitespace() {
            pos += 1;
        }
        while pos < len && !chars[pos].is_whitespace() {
            pos += 1;
        }
        self.cursor = pos;
    }

    /// The half-open character span of the word under or adjacent to the
    /// cursor.
    ///
    /// A cursor at end-of-text sits just after the last character; a cursor
    /// on whitespace looks one position back. Whitespace (or the buffer
    /// edge) on both immediate sides means there is no word.
    pub fn current_word(&self) -> Option<(usize, usize)> {
        let chars: Vec<char> = self.text.chars().collect();
        if chars.is_empty() {
            return None;
        }
        let mut pos = self.cursor.min(chars.len());
        if pos == chars.len() || chars[pos].is_whitespace() {
            if pos == 0 || chars[pos - 1].is_whitespace() {
                return None;
            }
            pos -= 1;
        }

        let mut start = pos;
        while start > 0 && !chars[start - 1].is_whitespace() {
            start -= 1;
        }
        let mut end = pos + 1;
        while end < chars.len() && !chars[end].is_whitespace() {
            end += 1;
        }
        Some((start, end))
    }

    /// Replace the current word with `replacement`, or insert it at the
    /// cursor when no word span exists.
    ///
    /// The cursor lands at the end of the inserted text unless
    /// `move_to_end` is false. State only; the caller repaints.
    pub fn replace_word(&mut self, replacement: &str, move_to_end: bool) {
        let (start, end) = match self.current_word() {
            Some(span) => span,
            None => {
                let at = self.cursor.min(self.char_len());
                (at, at)
            }
        };
        let start_byte = self.byte_index(start);
        let end_byte = self.byte_index(end);
        self.text.replace_range(start_byte..end_byte, replacement);

        if move_to_end {
            self.cursor = start + replacement.chars().count();
        } else {
            self.cursor = self.cursor.min(self.char_len());
        }
        self.scroll();
    }

    /// Offer a decoded key.
    ///
    /// An open completion popup gets the key first; its navigation keys
    /// scroll it, accept replaces the current word, cancel closes it.
    /// Everything else falls through to editing. Returns whether the key
    /// was consumed.
    pub fn handle_key(&mut self, screen: &mut dyn Screen, key: &Key) -> bool {
        if self
            .completion
            .as_ref()
            .is_some_and(CompletionOverlay::is_open)
        {
            let mut completion = self
                .completion
                .take()
                .expect("completion presence checked above");
            let action = completion.handle_key(key);
            match action {
                CompletionAction::Accepted(choice) => {
                    completion.close(screen);
                    self.completion = Some(completion);
                    self.replace_word(&choice, true);
                    self.paint(false);
                    self.focus();
                    return true;
                }
                CompletionAction::Cancelled => {
                    completion.close(screen);
                    self.completion = Some(completion);
                    return true;
                }
                CompletionAction::Consumed => {
                    self.completion = Some(completion);
                    return true;
                }
                CompletionAction::Ignored => {
                    self.completion = Some(completion);
                }
            }
        }

        let len = self.char_len();
        let mut must_repaint = false;
        let mut text_changed = false;

        match *key {
            Key::Right => {
                self.cursor = (self.cursor + 1).min(len);
                must_repaint = self.scroll();
            }
            Key::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                must_repaint = self.scroll();
            }
            Key::End | Key::Ctrl('e') => {
                self.cursor = len;
                must_repaint = self.scroll();
            }
            Key::Home | Key::Ctrl('a') => {
                self.cursor = 0;
                must_repaint = self.scroll();
            }
            Key::Alt('b') => {
                self.move_word_left();
                must_repaint = self.scroll();
            }
            Key::Alt('f') => {
                self.move_word_right();
                must_repaint = self.scroll();
            }
            Key::Backspace | Key::Ctrl('h') if !self.read_only => {
                text_changed = self.delete_before();
            }
            Key::Ctrl('u') if !self.read_only => {
                text_changed = self.delete_to_start();
            }
            Key::Delete if !self.read_only => {
                text_changed = self.delete_at();
            }
            Key::Char(ch) if !self.read_only => {
                self.insert_char(ch);
                text_changed = true;
            }
            _ => return false,
        }

        if text_changed {
            self.scroll();
            must_repaint = true;
        }
        if must_repaint {
            self.paint(false);
            self.focus();
        }
        if text_changed {
            self.sync_completion(screen);
        }
        true
    }

    /// Push the current field state to the attached suggestion source.
    fn sync_completion(&mut self, screen: &mut dyn Screen) {
        let Some(mut completion) = self.completion.take() else {
            return;
        };
        let rect = self.panel.rect();
        let prefix_len = self.prefix.chars().count();
        let cursor_col = self.cursor.saturating_sub(self.offset) + prefix_len;
        let state = FieldState {
            text: &self.text,
            cursor: self.cursor,
            word: self.current_word(),
        };
        completion.update(screen, &state, rect.y, rect.x + cursor_col as i32);
        self.completion = Some(completion);
    }
}

impl Widget for TextField {
    fn paint(&mut self, clear: bool) {
        TextField::paint(self, clear);
    }

    fn resize(&mut self, screen: &mut dyn Screen, _height: u16, width: u16) {
        TextField::resize(self, screen, width);
    }

    fn move_to(&mut self, screen: &mut dyn Screen, y: i32, x: i32) {
        TextField::move_to(self, screen, y, x);
    }

    fn refresh(&mut self, force: bool) {
        TextField::refresh(self, force);
    }

    fn focus(&mut self) -> (u16, u16) {
        TextField::focus(self)
    }

    fn handle_key(&mut self, screen: &mut dyn Screen, key: &Key) -> bool {
        TextField::handle_key(self, screen, key)
    }

    fn destroy(&mut self) {
        TextField::destroy(self);
    }
}
