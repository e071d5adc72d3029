use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImposeError {
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
    #[error("No pages to impose")]
    NoPages,
    #[error("Rejected {name}: {reason}")]
    InvalidInput { name: String, reason: String },
    #[error("Render error: {0}")]
    Render(String),
}

pub type Result<T> = std::result::Result<T, ImposeError>;

/// Resolved paper orientation of an output page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    /// Portrait: height > width
    #[default]
    Portrait,
    /// Landscape: width >= height
    Landscape,
}

impl Orientation {
    /// Orientation of a box with the given dimensions.
    ///
    /// Square boxes count as landscape, matching the "height > width"
    /// test used for portrait detection.
    pub fn of(width: f32, height: f32) -> Self {
        if height > width {
            Orientation::Portrait
        } else {
            Orientation::Landscape
        }
    }
}

/// Requested output orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OrientationMode {
    /// Follow the first page of the page sequence
    #[default]
    Auto,
    Portrait,
    Landscape,
}

impl OrientationMode {
    /// Resolve against the dimensions of the first source page
    pub fn resolve(self, first_page: (f32, f32)) -> Orientation {
        match self {
            OrientationMode::Auto => Orientation::of(first_page.0, first_page.1),
            OrientationMode::Portrait => Orientation::Portrait,
            OrientationMode::Landscape => Orientation::Landscape,
        }
    }
}

/// Standard paper sizes
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PaperSize {
    A3,
    #[default]
    A4,
    A5,
    Letter,
    Legal,
    Tabloid,
}

impl PaperSize {
    /// Get base dimensions (always portrait: width < height)
    pub fn dimensions_mm(self) -> (f32, f32) {
        match self {
            PaperSize::A3 => (297.0, 420.0),
            PaperSize::A4 => (210.0, 297.0),
            PaperSize::A5 => (148.0, 210.0),
            PaperSize::Letter => (215.9, 279.4),
            PaperSize::Legal => (215.9, 355.6),
            PaperSize::Tabloid => (279.4, 431.8),
        }
    }

    /// Get dimensions with orientation applied
    pub fn dimensions_with_orientation(self, orientation: Orientation) -> (f32, f32) {
        let (w, h) = self.dimensions_mm();
        match orientation {
            Orientation::Portrait => (w, h),
            Orientation::Landscape => (h, w),
        }
    }
}

/// Page scaling behavior inside a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScalingMode {
    /// Shrink to fit inside the cell (preserve aspect ratio)
    #[default]
    Fit,
    /// Grow to cover the cell (preserve aspect ratio, may overflow)
    Fill,
}

impl ScalingMode {
    /// Scale factor mapping a `src` box onto a `target` box
    pub fn scale(self, src: (f32, f32), target: (f32, f32)) -> f32 {
        let scale_w = target.0 / src.0;
        let scale_h = target.1 / src.1;
        match self {
            ScalingMode::Fit => scale_w.min(scale_h),
            ScalingMode::Fill => scale_w.max(scale_h),
        }
    }
}

/// Cell border weight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BorderStyle {
    None,
    Light,
    #[default]
    Normal,
    Thick,
}

impl BorderStyle {
    /// Stroke width in points, `None` when no border is drawn
    pub fn width_pt(self) -> Option<f32> {
        match self {
            BorderStyle::None => None,
            BorderStyle::Light => Some(0.5),
            BorderStyle::Normal => Some(1.0),
            BorderStyle::Thick => Some(2.0),
        }
    }
}

/// Statistics about a cheat-sheet run
#[derive(Debug, Clone, PartialEq)]
pub struct CheatSheetStatistics {
    /// Number of pages in the page sequence
    pub source_pages: usize,
    /// Physical sheets needed when printed duplex
    pub output_sheets: usize,
    /// Faces emitted to the output document
    pub output_pages: usize,
    /// Empty cells on emitted faces
    pub blank_cells: usize,
    /// Paper saved relative to printing one page per sheet
    pub paper_saved_percent: i64,
}
