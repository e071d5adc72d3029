//! Layout data types for imposition
//!
//! These types sit between the imposition plan and PDF rendering.

/// Which physical side of the printed sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SheetSide {
    /// Front of the sheet (odd-page stream, printed first in duplex)
    Front,
    /// Back of the sheet (even-page stream, printed second in duplex)
    Back,
}

/// Position within the grid (row, column)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridPosition {
    /// Row index (0 = top row)
    pub row: usize,
    /// Column index (0 = leftmost column)
    pub col: usize,
}

impl GridPosition {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Row-major index for a grid with `cols` columns
    pub fn index(self, cols: usize) -> usize {
        self.row * cols + self.col
    }

    /// The position this cell lands on after flipping the sheet along
    /// its long edge.
    pub fn mirrored(self, cols: usize) -> Self {
        Self {
            row: self.row,
            col: cols - 1 - self.col,
        }
    }
}

/// A rectangular area in points
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// X position (left edge)
    pub x: f32,
    /// Y position (bottom edge)
    pub y: f32,
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge x coordinate
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Top edge y coordinate
    pub fn top(&self) -> f32 {
        self.y + self.height
    }

    /// Center x coordinate
    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    /// Center y coordinate
    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }

    /// Rectangle of the given size centered on this one
    pub fn centered(&self, width: f32, height: f32) -> Rect {
        Rect::new(
            self.center_x() - width / 2.0,
            self.center_y() - height / 2.0,
            width,
            height,
        )
    }
}

/// Where and how a source page is drawn inside one cell
#[derive(Debug, Clone, PartialEq)]
pub struct CellPlacement {
    /// The full cell (used for clipping, borders and labels)
    pub cell: Rect,
    /// Visible bounds of the scaled page, after any rotation
    pub content_rect: Rect,
    /// Scale factor applied to the source page
    pub scale: f32,
    /// Whether the page is turned 90° to match the cell orientation
    pub rotated: bool,
}
