//! Shared constants for cheat-sheet imposition
//!
//! This module centralizes magic numbers used by the geometry and
//! rendering stages.

// =============================================================================
// Unit Conversion
// =============================================================================

/// Points per millimeter (1 inch = 72 points, 1 inch = 25.4mm)
pub const POINTS_PER_MM: f32 = 72.0 / 25.4; // ≈ 2.83465

/// Convert millimeters to points
#[inline]
pub fn mm_to_pt(mm: f32) -> f32 {
    mm * POINTS_PER_MM
}

/// Convert points to millimeters
#[inline]
pub fn pt_to_mm(pt: f32) -> f32 {
    pt / POINTS_PER_MM
}

// =============================================================================
// Source Pages
// =============================================================================

/// Fallback page box when a source page has no usable MediaBox (US Letter)
pub const DEFAULT_PAGE_DIMENSIONS: (f32, f32) = (612.0, 792.0);

// =============================================================================
// Input Limits
// =============================================================================

/// Largest accepted input file (50 MiB)
pub const MAX_INPUT_BYTES: u64 = 50 * 1024 * 1024;

/// Every PDF file starts with this header
pub const PDF_MAGIC: &[u8] = b"%PDF-";

// =============================================================================
// Borders
// =============================================================================

/// Gray level of cell borders (0 = black, 1 = white)
pub const BORDER_GRAY: f32 = 0.8;

// =============================================================================
// Text
// =============================================================================

/// Approximate character width ratio for Helvetica
pub const HELVETICA_CHAR_WIDTH_RATIO: f32 = 0.5;

/// Font size for cell page-number labels (points)
pub const PAGE_NUMBER_FONT_SIZE: f32 = 8.0;

/// Distance of the page-number baseline above the cell bottom (points)
pub const PAGE_NUMBER_OFFSET: f32 = 4.0;

/// Font size for the margin note (points)
pub const MARGIN_NOTE_FONT_SIZE: f32 = 10.0;

/// Baseline of the margin note, kept clear of printer margins (points)
pub const MARGIN_NOTE_BASELINE: f32 = 30.0;

/// Gray level of the margin note
pub const MARGIN_NOTE_GRAY: f32 = 0.6;

// =============================================================================
// History
// =============================================================================

/// Default number of option snapshots kept for undo
pub const DEFAULT_HISTORY_CAPACITY: usize = 50;
