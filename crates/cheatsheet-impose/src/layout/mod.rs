//! Layout calculation modules for cheat-sheet imposition
//!
//! This module handles the geometric side of imposition:
//! - The supported N-up grids
//! - Sheet geometry (cell rectangles from margins and spacing)
//! - Content placement (scaling, centering, auto-rotation)

mod grid;
mod nup;
mod placement;
mod types;

pub use grid::*;
pub use nup::*;
pub use placement::*;
pub use types::*;
