//! Content placement within cells
//!
//! This module calculates where a source page is drawn inside its cell:
//! - Scaling (fit or fill)
//! - Optional 90° rotation when page and cell orientations disagree
//! - Centering

use crate::types::{Orientation, ScalingMode};

use super::{CellPlacement, Rect};

/// Calculate the placement of a source page inside a cell.
///
/// # Arguments
/// * `cell` - The cell bounds
/// * `source_width` - Width of the source page in points
/// * `source_height` - Height of the source page in points
/// * `scaling_mode` - How to scale the source page
/// * `auto_rotate` - Turn the page when its orientation differs from the cell's
pub fn place_page(
    cell: &Rect,
    source_width: f32,
    source_height: f32,
    scaling_mode: ScalingMode,
    auto_rotate: bool,
) -> CellPlacement {
    let rotated = auto_rotate
        && Orientation::of(source_width, source_height) != Orientation::of(cell.width, cell.height);

    // A turned page occupies its height horizontally
    let (visual_width, visual_height) = if rotated {
        (source_height, source_width)
    } else {
        (source_width, source_height)
    };

    let scale = scaling_mode.scale((visual_width, visual_height), (cell.width, cell.height));
    let content_rect = cell.centered(visual_width * scale, visual_height * scale);

    CellPlacement {
        cell: *cell,
        content_rect,
        scale,
        rotated,
    }
}

impl CellPlacement {
    /// Transformation matrix `[a b c d e f]` drawing a page whose box
    /// starts at `origin` into `content_rect`.
    ///
    /// Rotated pages are turned 90° counter-clockwise.
    pub fn transform(&self, origin: (f32, f32)) -> [f32; 6] {
        let s = self.scale;
        let (ox, oy) = origin;
        let rect = &self.content_rect;

        if self.rotated {
            // (x, y) -> (right - s(y - oy), bottom + s(x - ox))
            [0.0, s, -s, 0.0, rect.right() + s * oy, rect.y - s * ox]
        } else {
            [s, 0.0, 0.0, s, rect.x - s * ox, rect.y - s * oy]
        }
    }

    /// Whether the drawn page spills outside its cell
    pub fn overflows(&self) -> bool {
        const EPSILON: f32 = 0.01;
        self.content_rect.width > self.cell.width + EPSILON
            || self.content_rect.height > self.cell.height + EPSILON
    }
}
