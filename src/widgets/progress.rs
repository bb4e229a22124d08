//! Progress bar widget.

use crate::core::geometry::BorderMask;
use crate::core::screen::{Attr, Screen};
use crate::core::widget::Widget;
use crate::error::Error;
use crate::widgets::panel::{put, Panel};

const FILLED: &str = "█";
const EMPTY: &str = " ";

/// A labeled single-row progress bar.
///
/// The description keeps the width it was constructed with; later updates
/// truncate to it so the bar geometry never shifts.
pub struct ProgressBar {
    panel: Panel,
    progress: u8,
    description: String,
    description_size: usize,
    attr: Attr,
}

impl ProgressBar {
    pub fn new(description: impl Into<String>, border: BorderMask, attr: Option<Attr>) -> Self {
        let description = description.into();
        let description_size = description.chars().count();
        let mut panel = Panel::new();
        panel.set_border(border);
        Self {
            panel,
            progress: 0,
            description,
            description_size,
            attr: attr.unwrap_or_default(),
        }
    }

    pub fn panel(&self) -> &Panel {
        &self.panel
    }

    pub fn progress(&self) -> u8 {
        self.progress
    }

    /// Rows this bar occupies, derived from its border mask.
    pub fn bar_height(&self) -> u16 {
        let border = self.panel.border();
        if border.intersects(BorderMask::LEFT | BorderMask::RIGHT) {
            return 3;
        }
        1 + border.contains(BorderMask::TOP) as u16 + border.contains(BorderMask::BOTTOM) as u16
    }

    /// Row the bar itself is painted on.
    fn bar_row(&self) -> u16 {
        let border = self.panel.border();
        if border.intersects(BorderMask::LEFT | BorderMask::RIGHT | BorderMask::TOP) {
            1
        } else {
            0
        }
    }

    /// Set the progress value, optionally replacing the description.
    ///
    /// Values outside `0..=100` are rejected, never coerced.
    pub fn update(&mut self, progress: i32, description: Option<&str>) -> Result<(), Error> {
        if !(0..=100).contains(&progress) {
            return Err(Error::ProgressOutOfRange { found: progress });
        }
        if let Some(description) = description {
            self.description = description.chars().take(self.description_size).collect();
        }
        self.progress = progress as u8;
        self.panel.refresh(false);
        Ok(())
    }

    /// Width of the bar portion, given the current panel geometry.
    fn bar_width(&self) -> usize {
        let content = self.panel.content_area();
        (content.width as usize).saturating_sub(self.description_size + 2)
    }

    /// Cells painted for `progress` within `bar_width`.
    fn filled_cells(bar_width: usize, progress: u8) -> usize {
        let painted = (bar_width as f64 * progress as f64 / 100.0).round() as usize;
        painted.min(bar_width)
    }

    pub fn paint(&mut self, clear: bool) {
        self.panel.paint(clear);

        let content = self.panel.content_area();
        let y = self.bar_row();
        let x = content.x as u16;
        let bar_width = self.bar_width();
        let filled = Self::filled_cells(bar_width, self.progress);
        let bar = format!(
            "{}{}",
            FILLED.repeat(filled),
            EMPTY.repeat(bar_width - filled)
        );

        let description = self.description.clone();
        let description_size = self.description_size as u16;
        let attr = self.attr;
        let win = self.panel.win();
        put(win, y, x, &description, Attr::default());
        put(win, y, x + description_size, " ", Attr::default());
        put(win, y, x + description_size + 1, &bar, attr);
        win.flush_pending();
    }

    /// Change the bar width; the height always derives from the border.
    pub fn resize(&mut self, screen: &mut dyn Screen, width: u16) {
        let height = self.bar_height();
        self.panel.resize(screen, height, width);
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

impl Widget for ProgressBar {
    fn paint(&mut self, clear: bool) {
        ProgressBar::paint(self, clear);
    }

    fn resize(&mut self, screen: &mut dyn Screen, _height: u16, width: u16) {
        ProgressBar::resize(self, screen, width);
    }

    fn move_to(&mut self, screen: &mut dyn Screen, y: i32, x: i32) {
        ProgressBar::move_to(self, screen, y, x);
    }

    fn refresh(&mut self, force: bool) {
        ProgressBar::refresh(self, force);
    }

    fn focus(&mut self) -> (u16, u16) {
        self.panel.focus()
    }

    fn destroy(&mut self) {
        ProgressBar::destroy(self);
    }
}
