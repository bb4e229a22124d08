//! Cell-exact border composition across all 16 edge masks.

use pretty_assertions::assert_eq;

use pane_tui::testing::TestScreen;
use pane_tui::{BorderMask, Panel, Rect};

fn painted_panel(mask: BorderMask) -> (TestScreen, Panel) {
    let mut screen = TestScreen::new(24, 80);
    let mut panel = Panel::with_geometry(&mut screen, (10, 10), (0, 0));
    panel.set_border(mask);
    panel.paint(true);
    (screen, panel)
}

#[test]
fn content_area_matrix_for_all_masks_on_10x10() {
    let rect = Rect::new(0, 0, 10, 10);
    for mask in BorderMask::all_masks() {
        let area = mask.content_area(rect);
        let vertical =
            mask.contains(BorderMask::TOP) as u16 + mask.contains(BorderMask::BOTTOM) as u16;
        let horizontal =
            mask.contains(BorderMask::LEFT) as u16 + mask.contains(BorderMask::RIGHT) as u16;

        assert_eq!(area.height, 10 - vertical, "mask {mask:?}");
        assert_eq!(area.width, 10 - horizontal, "mask {mask:?}");
    }
}

#[test]
fn full_border_grid_is_cell_exact() {
    let (screen, _panel) = painted_panel(BorderMask::ALL);
    let state = screen.window(0);
    let rows = state.borrow().rows();

    let mut expected = Vec::new();
    expected.push("┌────────┐".to_string());
    for _ in 0..8 {
        expected.push("│        │".to_string());
    }
    expected.push("└────────┘".to_string());

    assert_eq!(rows, expected);
}

#[test]
fn top_and_bottom_without_sides_are_straight_runs() {
    let (screen, _panel) = painted_panel(BorderMask::TOP | BorderMask::BOTTOM);
    let state = screen.window(0);
    let rows = state.borrow().rows();

    assert_eq!(rows[0], "──────────");
    assert_eq!(rows[9], "──────────");
    for row in &rows[1..9] {
        assert_eq!(row.trim_end(), "");
    }
}

#[test]
fn sides_without_top_and_bottom_are_full_height_runs() {
    let (screen, _panel) = painted_panel(BorderMask::LEFT | BorderMask::RIGHT);
    let state = screen.window(0);
    let rows = state.borrow().rows();

    for row in &rows {
        assert_eq!(row.chars().next(), Some('│'));
        assert_eq!(row.chars().last(), Some('│'));
    }
}

#[test]
fn corners_appear_only_where_adjacent_edges_meet() {
    for mask in BorderMask::all_masks() {
        let (screen, _panel) = painted_panel(mask);
        let state = screen.window(0);
        let state = state.borrow();

        let corner_cases = [
            (0usize, 0usize, BorderMask::TOP | BorderMask::LEFT, '┌'),
            (0, 9, BorderMask::TOP | BorderMask::RIGHT, '┐'),
            (9, 0, BorderMask::BOTTOM | BorderMask::LEFT, '└'),
            (9, 9, BorderMask::BOTTOM | BorderMask::RIGHT, '┘'),
        ];
        for (y, x, edges, glyph) in corner_cases {
            let cell = state.row(y).chars().nth(x).expect("cell in range");
            if mask.contains(edges) {
                assert_eq!(cell, glyph, "mask {mask:?} corner ({y},{x})");
            } else {
                assert_ne!(cell, glyph, "mask {mask:?} stray corner at ({y},{x})");
            }
        }
    }
}

#[test]
fn edge_runs_cover_active_edges_and_leave_inactive_edges_blank() {
    for mask in BorderMask::all_masks() {
        let (screen, _panel) = painted_panel(mask);
        let state = screen.window(0);
        let state = state.borrow();

        // interior columns of the top and bottom rows
        for x in 1..9 {
            let top = state.row(0).chars().nth(x).expect("cell");
            let bottom = state.row(9).chars().nth(x).expect("cell");
            assert_eq!(
                top == '─',
                mask.contains(BorderMask::TOP),
                "mask {mask:?} top run at {x}"
            );
            assert_eq!(
                bottom == '─',
                mask.contains(BorderMask::BOTTOM),
                "mask {mask:?} bottom run at {x}"
            );
        }
        // interior rows of the left and right columns
        for y in 1..9 {
            let left = state.row(y).chars().next().expect("cell");
            let right = state.row(y).chars().nth(9).expect("cell");
            assert_eq!(
                left == '│',
                mask.contains(BorderMask::LEFT),
                "mask {mask:?} left run at {y}"
            );
            assert_eq!(
                right == '│',
                mask.contains(BorderMask::RIGHT),
                "mask {mask:?} right run at {y}"
            );
        }
    }
}

#[test]
fn border_paint_tolerates_rejected_last_cell() {
    let mut screen = TestScreen::new(10, 10);
    let mut panel = Panel::with_geometry(&mut screen, (10, 10), (0, 0));
    screen.window(0).borrow_mut().reject_last_cell = true;
    panel.set_border(BorderMask::ALL);
    panel.paint(true);

    let state = screen.window(0);
    let state = state.borrow();
    assert_eq!(state.row(0), "┌────────┐");
    assert_eq!(state.row(9), "└──────── ");
}

#[test]
fn one_by_one_panel_paints_without_panicking() {
    let mut screen = TestScreen::new(24, 80);
    for mask in BorderMask::all_masks() {
        let mut panel = Panel::with_geometry(&mut screen, (1, 1), (0, 0));
        panel.set_border(mask);
        panel.paint(true);
        let area = panel.content_area();
        assert_eq!(area.height, mask.content_area(Rect::new(0, 0, 1, 1)).height);
    }
}
