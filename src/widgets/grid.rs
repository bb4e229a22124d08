//! Rectangular grid tiling of widgets.

use crate::core::screen::Screen;
use crate::core::widget::Widget;
use crate::error::Error;

struct GridSlot<W> {
    key: Option<String>,
    row: usize,
    col: usize,
    row_span: usize,
    col_span: usize,
    widget: W,
}

/// A `rows x cols` tiling with optional separators between cells.
///
/// Slots may span multiple rows or columns and may carry a key for lookup.
/// Geometry is distributed on `resize`; adding a slot to an already-sized
/// grid takes effect at the next resize.
pub struct Grid<W> {
    rows: usize,
    cols: usize,
    row_sep: usize,
    col_sep: usize,
    size: Option<(u16, u16)>,
    slots: Vec<GridSlot<W>>,
}

impl<W: Widget> Grid<W> {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows: rows.max(1),
            cols: cols.max(1),
            row_sep: 0,
            col_sep: 0,
            size: None,
            slots: Vec::new(),
        }
    }

    pub fn with_separators(mut self, row_sep: usize, col_sep: usize) -> Self {
        self.row_sep = row_sep;
        self.col_sep = col_sep;
        self
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Place `widget` in a single grid cell.
    pub fn add(
        &mut self,
        key: Option<&str>,
        row: usize,
        col: usize,
        widget: W,
    ) -> Result<(), Error> {
        self.add_span(key, row, col, 1, 1, widget)
    }

    /// Place `widget` spanning `row_span x col_span` cells.
    ///
    /// A key that is already present is rejected; anonymous slots may
    /// repeat freely.
    pub fn add_span(
        &mut self,
        key: Option<&str>,
        row: usize,
        col: usize,
        row_span: usize,
        col_span: usize,
        widget: W,
    ) -> Result<(), Error> {
        if let Some(key) = key {
            if self.slots.iter().any(|slot| slot.key.as_deref() == Some(key)) {
                return Err(Error::DuplicateGridKey {
                    key: key.to_string(),
                });
            }
        }
        self.slots.push(GridSlot {
            key: key.map(str::to_string),
            row,
            col,
            row_span: row_span.max(1),
            col_span: col_span.max(1),
            widget,
        });
        Ok(())
    }

    fn position(&self, key: &str) -> Result<usize, Error> {
        self.slots
            .iter()
            .position(|slot| slot.key.as_deref() == Some(key))
            .ok_or_else(|| Error::UnknownGridKey {
                key: key.to_string(),
            })
    }

    /// The widget registered under `key`.
    pub fn get(&self, key: &str) -> Result<&W, Error> {
        let index = self.position(key)?;
        Ok(&self.slots[index].widget)
    }

    pub fn get_mut(&mut self, key: &str) -> Result<&mut W, Error> {
        let index = self.position(key)?;
        Ok(&mut self.slots[index].widget)
    }

    /// The widget at insertion position `index`.
    pub fn by_index(&self, index: usize) -> Option<&W> {
        self.slots.get(index).map(|slot| &slot.widget)
    }

    pub fn by_index_mut(&mut self, index: usize) -> Option<&mut W> {
        self.slots.get_mut(index).map(|slot| &mut slot.widget)
    }

    /// Remove the slot registered under `key` and hand its widget back.
    pub fn remove(&mut self, key: &str) -> Result<W, Error> {
        let index = self.position(key)?;
        Ok(self.slots.remove(index).widget)
    }

    /// Cell extent for the current size.
    pub fn cell_size(&self) -> Option<(u16, u16)> {
        let (height, width) = self.size?;
        let cell_height = (height as usize / self.rows).saturating_sub(self.row_sep * self.rows);
        let cell_width = (width as usize / self.cols).saturating_sub(self.col_sep * self.cols);
        Some((cell_height as u16, cell_width as u16))
    }

    /// Distribute `height x width` across all slots, span-aware.
    pub fn resize(&mut self, screen: &mut dyn Screen, height: u16, width: u16) {
        self.size = Some((height, width));
        let (cell_height, cell_width) = self
            .cell_size()
            .expect("size assigned just above");
        let cell_height = cell_height as usize;
        let cell_width = cell_width as usize;

        for slot in self.slots.iter_mut() {
            let slot_height = slot.row_span * cell_height + (slot.row_span - 1) * self.row_sep;
            let slot_width = slot.col_span * cell_width + (slot.col_span - 1) * self.col_sep;
            let y = slot.row * (cell_height + self.row_sep) + self.row_sep;
            let x = slot.col * (cell_width + self.col_sep) + self.col_sep;

            slot.widget
                .resize(screen, slot_height as u16, slot_width as u16);
            slot.widget.move_to(screen, y as i32, x as i32);
        }
    }

    /// Paint every slot, in insertion order.
    pub fn paint(&mut self, clear: bool) {
        for slot in self.slots.iter_mut() {
            slot.widget.paint(clear);
        }
    }

    /// Queue every slot's pending damage.
    pub fn refresh(&mut self, force: bool) {
        for slot in self.slots.iter_mut() {
            slot.widget.refresh(force);
        }
    }

    /// Destroy every slot's backend window.
    pub fn destroy(&mut self) {
        for slot in self.slots.iter_mut() {
            slot.widget.destroy();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Grid;
    use crate::core::geometry::Rect;
    use crate::error::Error;
    use crate::testing::TestScreen;
    use crate::widgets::panel::Panel;

    #[test]
    fn duplicate_keys_are_rejected() {
        let mut grid: Grid<Panel> = Grid::new(2, 2);
        grid.add(Some("main"), 0, 0, Panel::new()).expect("first");

        let result = grid.add(Some("main"), 1, 1, Panel::new());
        assert_eq!(
            result.err(),
            Some(Error::DuplicateGridKey {
                key: "main".to_string()
            })
        );
        assert_eq!(grid.len(), 1);
    }

    #[test]
    fn unknown_key_lookup_is_an_error() {
        let grid: Grid<Panel> = Grid::new(2, 2);
        assert_eq!(
            grid.get("nope").err(),
            Some(Error::UnknownGridKey {
                key: "nope".to_string()
            })
        );
    }

    #[test]
    fn anonymous_slots_may_repeat() {
        let mut grid: Grid<Panel> = Grid::new(2, 2);
        grid.add(None, 0, 0, Panel::new()).expect("anonymous");
        grid.add(None, 0, 1, Panel::new()).expect("anonymous");
        assert_eq!(grid.len(), 2);
    }

    #[test]
    fn resize_distributes_cells_and_spans() {
        let mut screen = TestScreen::new(20, 40);
        let mut grid: Grid<Panel> = Grid::new(2, 2);
        grid.add(Some("a"), 0, 0, Panel::new()).expect("add");
        grid.add(Some("b"), 0, 1, Panel::new()).expect("add");
        grid.add_span(Some("wide"), 1, 0, 1, 2, Panel::new())
            .expect("add");

        grid.resize(&mut screen, 20, 40);

        assert_eq!(grid.get("a").expect("a").rect(), Rect::new(0, 0, 10, 20));
        assert_eq!(grid.get("b").expect("b").rect(), Rect::new(0, 20, 10, 20));
        assert_eq!(
            grid.get("wide").expect("wide").rect(),
            Rect::new(10, 0, 10, 40)
        );
    }

    #[test]
    fn remove_returns_the_widget_and_frees_the_key() {
        let mut grid: Grid<Panel> = Grid::new(1, 2);
        grid.add(Some("a"), 0, 0, Panel::new()).expect("add");

        let panel = grid.remove("a").expect("present");
        assert!(!panel.is_sized());
        assert!(grid.get("a").is_err());
        grid.add(Some("a"), 0, 1, Panel::new()).expect("reusable");
    }
}
