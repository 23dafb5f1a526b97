//! Fixed grid geometry.
//!
//! Every grid is 4 rows by 6 columns of 50px thumbnail slots regardless of
//! how many results it shows. Cell `i` sits at row `i / 6`, column `i % 6`.
//! Columns are 5px apart, rows leave 20px under each thumbnail for its
//! caption, and a 5px border surrounds the whole canvas.

use gridpick_core::token;

pub const ROWS: u32 = 4;
pub const COLUMNS: u32 = 6;
pub const CELLS: usize = (ROWS * COLUMNS) as usize;

/// Longest thumbnail edge in pixels.
pub const THUMB_SIDE: u32 = 50;
pub const PAD_X: u32 = 5;
pub const PAD_Y: u32 = 20;
pub const BORDER: u32 = 5;

/// Gap between the bottom of a thumbnail slot and the top of its caption.
pub const CAPTION_GAP: u32 = 4;

pub const CELL_WIDTH: u32 = THUMB_SIDE + PAD_X;
pub const CELL_HEIGHT: u32 = THUMB_SIDE + PAD_Y;

pub const CANVAS_WIDTH: u32 = CELL_WIDTH * COLUMNS + BORDER * 2;
pub const CANVAS_HEIGHT: u32 = CELL_HEIGHT * ROWS + BORDER * 2;

/// Placement of one result in the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub row: u32,
    pub column: u32,
    /// Top-left corner of the thumbnail.
    pub origin: (u32, u32),
    /// Top-left corner of the caption text.
    pub caption_origin: (u32, u32),
    /// Token a user can redeem for this result.
    pub label: String,
}

impl Cell {
    /// Cell `position` of a grid whose first cell shows result `start`.
    pub fn new(position: usize, slug: &str, start: usize) -> Self {
        let row = (position / COLUMNS as usize) as u32;
        let column = (position % COLUMNS as usize) as u32;
        let x = BORDER + column * CELL_WIDTH;
        let y = BORDER + row * CELL_HEIGHT;

        Self {
            row,
            column,
            origin: (x, y),
            caption_origin: (x, y + THUMB_SIDE + CAPTION_GAP),
            label: token::label(slug, start + position),
        }
    }
}

/// Cells for `count` results, in input order.
pub fn cells(count: usize, slug: &str, start: usize) -> Vec<Cell> {
    (0..count).map(|i| Cell::new(i, slug, start)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canvas_dimensions() {
        assert_eq!(CANVAS_WIDTH, 340);
        assert_eq!(CANVAS_HEIGHT, 290);
        assert_eq!(CELLS, 24);
    }

    #[test]
    fn test_full_grid_labels_row_major() {
        let cells = cells(24, "XYZ", 0);
        assert_eq!(cells.len(), 24);

        for (i, cell) in cells.iter().enumerate() {
            assert_eq!(cell.label, format!("XYZx{i:02}"));
            assert_eq!(cell.row, i as u32 / 6);
            assert_eq!(cell.column, i as u32 % 6);
        }

        assert_eq!(cells[0].label, "XYZx00");
        assert_eq!(cells[23].label, "XYZx23");
        assert_eq!((cells[5].row, cells[5].column), (0, 5));
        assert_eq!((cells[6].row, cells[6].column), (1, 0));
    }

    #[test]
    fn test_cell_geometry() {
        let first = Cell::new(0, "ABC", 0);
        assert_eq!(first.origin, (5, 5));
        assert_eq!(first.caption_origin, (5, 59));

        let seventh = Cell::new(7, "ABC", 0);
        assert_eq!(seventh.origin, (60, 75));

        let last = Cell::new(23, "ABC", 0);
        assert_eq!(last.origin, (280, 215));
        assert!(last.origin.0 + THUMB_SIDE <= CANVAS_WIDTH - BORDER);
        assert!(last.caption_origin.1 < CANVAS_HEIGHT);
    }

    #[test]
    fn test_labels_use_absolute_offset() {
        let cells = cells(6, "QRS", 24);
        let labels: Vec<_> = cells.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, ["QRSx24", "QRSx25", "QRSx26", "QRSx27", "QRSx28", "QRSx29"]);
        assert_eq!(cells[0].origin, (5, 5));
    }
}
