//! Duplex N-up imposition planning
//!
//! A plan maps every output cell `(sheet, side, row, col)` back to a page
//! of the page sequence, or to a blank.
//!
//! Fronts carry the odd pages in row-major order. Backs carry the even
//! pages, with each row reversed so that after flipping the sheet along
//! its long edge page `2k` sits directly behind page `2k - 1`:
//!
//! ```text
//! 9-up, sheet 0
//!
//!   FRONT            BACK
//!   1  3  5          6  4  2
//!   7  9 11         12 10  8
//!  13 15 17         18 16 14
//! ```
//!
//! Planning is pure: no I/O and no PDF knowledge, only page counts.

use crate::layout::{GridPosition, NUp, SheetSide};

/// One face of a sheet: a `rows x cols` row-major matrix of 1-based page
/// numbers, `None` for blank cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cols: usize,
    rows: usize,
    cells: Vec<Option<usize>>,
}

impl Grid {
    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Cells in row-major order
    pub fn cells(&self) -> &[Option<usize>] {
        &self.cells
    }

    pub fn get(&self, pos: GridPosition) -> Option<usize> {
        if pos.row >= self.rows || pos.col >= self.cols {
            return None;
        }
        self.cells[pos.index(self.cols)]
    }

    /// Rows from top to bottom
    pub fn row_slices(&self) -> impl Iterator<Item = &[Option<usize>]> {
        self.cells.chunks(self.cols)
    }

    /// Every cell with its position, blanks included
    pub fn positions(&self) -> impl Iterator<Item = (GridPosition, Option<usize>)> + '_ {
        let cols = self.cols;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &page)| (GridPosition::new(i / cols, i % cols), page))
    }

    /// Non-blank page numbers in row-major order
    pub fn pages(&self) -> impl Iterator<Item = usize> + '_ {
        self.cells.iter().flatten().copied()
    }

    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(Option::is_none)
    }

    pub fn blank_cells(&self) -> usize {
        self.cells.iter().filter(|c| c.is_none()).count()
    }

    /// Nested rows, handy for display and comparisons
    pub fn to_rows(&self) -> Vec<Vec<Option<usize>>> {
        self.row_slices().map(<[_]>::to_vec).collect()
    }
}

/// Arrange a flat row-major list into a grid.
///
/// Cells past the end of `pages` are blank; extra entries are ignored.
pub fn arrange_in_grid(pages: &[Option<usize>], cols: usize, rows: usize) -> Grid {
    let cells = (0..cols * rows)
        .map(|i| pages.get(i).copied().flatten())
        .collect();
    Grid { cols, rows, cells }
}

/// One physical sheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sheet {
    pub front: Grid,
    pub back: Grid,
}

impl Sheet {
    pub fn face(&self, side: SheetSide) -> &Grid {
        match side {
            SheetSide::Front => &self.front,
            SheetSide::Back => &self.back,
        }
    }

    /// Faces that carry content, front first.
    ///
    /// A fully blank back is skipped so the output never contains a
    /// wasted empty face.
    pub fn printed_faces(&self) -> impl Iterator<Item = (SheetSide, &Grid)> {
        [
            (SheetSide::Front, &self.front),
            (SheetSide::Back, &self.back),
        ]
        .into_iter()
        .filter(|(_, grid)| !grid.is_blank())
    }
}

/// Where a page ended up in a plan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellLocation {
    pub sheet: usize,
    pub side: SheetSide,
    pub pos: GridPosition,
}

/// Ordered list of sheets covering pages `1..=total_pages` exactly once
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImpositionPlan {
    layout: NUp,
    total_pages: usize,
    sheets: Vec<Sheet>,
}

impl ImpositionPlan {
    pub fn layout(&self) -> NUp {
        self.layout
    }

    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    pub fn sheets(&self) -> &[Sheet] {
        &self.sheets
    }

    pub fn len(&self) -> usize {
        self.sheets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }

    /// Number of faces that will be emitted as output pages
    pub fn printed_face_count(&self) -> usize {
        self.sheets.iter().map(|s| s.printed_faces().count()).sum()
    }

    /// Find the cell holding `page`
    pub fn locate(&self, page: usize) -> Option<CellLocation> {
        if page == 0 || page > self.total_pages {
            return None;
        }

        let capacity = self.layout.capacity_per_sheet();
        let sheet = (page - 1) / capacity;
        let offset = (page - 1) % capacity;
        let index = offset / 2;
        let cols = self.layout.cols();
        let unflipped = GridPosition::new(index / cols, index % cols);

        let (side, pos) = if page % 2 == 1 {
            (SheetSide::Front, unflipped)
        } else {
            (SheetSide::Back, unflipped.mirrored(cols))
        };

        Some(CellLocation { sheet, side, pos })
    }
}

/// Compute the duplex imposition plan for `total_pages` pages.
///
/// # Panics
/// Panics if `total_pages` is zero; callers reject empty inputs before
/// planning.
pub fn plan(total_pages: usize, layout: NUp) -> ImpositionPlan {
    assert!(total_pages >= 1, "cannot plan an empty page sequence");

    let (cols, rows) = layout.grid_dimensions();
    let cells_per_side = layout.cells_per_side();
    let capacity = layout.capacity_per_sheet();
    let sheet_count = total_pages.div_ceil(capacity);

    let page_or_blank = |page: usize| (page <= total_pages).then_some(page);

    let mut sheets = Vec::with_capacity(sheet_count);
    for sheet_index in 0..sheet_count {
        let base = sheet_index * capacity;

        // Odd-page stream, row-major
        let front: Vec<Option<usize>> = (0..cells_per_side)
            .map(|i| page_or_blank(base + 2 * i + 1))
            .collect();

        // Even-page stream, each row reversed for the long-edge flip
        let mut back = Vec::with_capacity(cells_per_side);
        for row in 0..rows {
            let mut row_pages: Vec<Option<usize>> = (0..cols)
                .map(|col| page_or_blank(base + 2 * (row * cols + col) + 2))
                .collect();
            row_pages.reverse();
            back.extend(row_pages);
        }

        let sheet = Sheet {
            front: arrange_in_grid(&front, cols, rows),
            back: arrange_in_grid(&back, cols, rows),
        };

        if sheet.front.is_blank() && sheet.back.is_blank() {
            continue;
        }
        sheets.push(sheet);
    }

    ImpositionPlan {
        layout,
        total_pages,
        sheets,
    }
}
