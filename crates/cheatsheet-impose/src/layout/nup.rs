//! Supported N-up grids

use crate::types::ImposeError;
use std::fmt;

/// Number of source pages per sheet face.
///
/// Only these grids are supported; each fixes its column and row count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NUp {
    /// 2 columns x 1 row
    Two,
    /// 2 columns x 2 rows
    Four,
    /// 3 columns x 2 rows
    #[default]
    Six,
    /// 3 columns x 3 rows
    Nine,
}

impl NUp {
    pub const ALL: [NUp; 4] = [NUp::Two, NUp::Four, NUp::Six, NUp::Nine];

    /// Grid as (columns, rows)
    pub fn grid_dimensions(self) -> (usize, usize) {
        match self {
            NUp::Two => (2, 1),
            NUp::Four => (2, 2),
            NUp::Six => (3, 2),
            NUp::Nine => (3, 3),
        }
    }

    pub fn cols(self) -> usize {
        self.grid_dimensions().0
    }

    pub fn rows(self) -> usize {
        self.grid_dimensions().1
    }

    /// Cells on one face of a sheet
    pub fn cells_per_side(self) -> usize {
        let (cols, rows) = self.grid_dimensions();
        cols * rows
    }

    /// Source pages one physical sheet holds (front and back)
    pub fn capacity_per_sheet(self) -> usize {
        2 * self.cells_per_side()
    }
}

impl TryFrom<usize> for NUp {
    type Error = ImposeError;

    fn try_from(cells: usize) -> Result<Self, Self::Error> {
        match cells {
            2 => Ok(NUp::Two),
            4 => Ok(NUp::Four),
            6 => Ok(NUp::Six),
            9 => Ok(NUp::Nine),
            other => Err(ImposeError::Config(format!(
                "Unsupported layout {}-up (expected 2, 4, 6 or 9)",
                other
            ))),
        }
    }
}

impl fmt::Display for NUp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-up", self.cells_per_side())
    }
}
