//! Sheet geometry
//!
//! This module turns an N-up grid, an output page size and the
//! margin/spacing settings into cell rectangles.

use crate::constants::mm_to_pt;
use crate::types::Orientation;

use super::{GridPosition, NUp, Rect};

// =============================================================================
// Geometry Creation
// =============================================================================

/// Cell layout of one output page
#[derive(Debug, Clone, PartialEq)]
pub struct SheetGeometry {
    /// Output page width in points
    pub page_width_pt: f32,
    /// Output page height in points
    pub page_height_pt: f32,
    /// Inset from every sheet edge in points
    pub margin_pt: f32,
    /// Gutter between neighbouring cells in points
    pub spacing_pt: f32,
    /// Number of columns in the grid
    pub cols: usize,
    /// Number of rows in the grid
    pub rows: usize,
    /// Width of each cell in points
    pub cell_width_pt: f32,
    /// Height of each cell in points
    pub cell_height_pt: f32,
}

/// Create the sheet geometry for a layout.
///
/// # Arguments
/// * `layout` - The N-up grid
/// * `page_width_pt` - Output page width in points
/// * `page_height_pt` - Output page height in points
/// * `margin_mm` - Sheet-edge inset in millimeters
/// * `spacing_mm` - Inter-cell gutter in millimeters
pub fn create_sheet_geometry(
    layout: NUp,
    page_width_pt: f32,
    page_height_pt: f32,
    margin_mm: f32,
    spacing_mm: f32,
) -> SheetGeometry {
    let (cols, rows) = layout.grid_dimensions();
    let margin_pt = mm_to_pt(margin_mm);
    let spacing_pt = mm_to_pt(spacing_mm);

    let available_width = page_width_pt - 2.0 * margin_pt - (cols - 1) as f32 * spacing_pt;
    let available_height = page_height_pt - 2.0 * margin_pt - (rows - 1) as f32 * spacing_pt;

    SheetGeometry {
        page_width_pt,
        page_height_pt,
        margin_pt,
        spacing_pt,
        cols,
        rows,
        cell_width_pt: available_width / cols as f32,
        cell_height_pt: available_height / rows as f32,
    }
}

// =============================================================================
// Cell Calculations
// =============================================================================

impl SheetGeometry {
    /// Bounds of the cell at the given grid position.
    ///
    /// Row 0 is the top row, so y is measured down from the page top.
    pub fn cell_bounds(&self, pos: GridPosition) -> Rect {
        let x = self.margin_pt + pos.col as f32 * (self.cell_width_pt + self.spacing_pt);
        let y = self.page_height_pt
            - self.margin_pt
            - (pos.row + 1) as f32 * self.cell_height_pt
            - pos.row as f32 * self.spacing_pt;

        Rect::new(x, y, self.cell_width_pt, self.cell_height_pt)
    }

    /// Whether margins and spacing leave a drawable area in every cell
    pub fn has_usable_cells(&self) -> bool {
        self.cell_width_pt > 0.0 && self.cell_height_pt > 0.0
    }

    pub fn cell_orientation(&self) -> Orientation {
        Orientation::of(self.cell_width_pt, self.cell_height_pt)
    }
}
