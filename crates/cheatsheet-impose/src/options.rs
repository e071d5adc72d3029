use crate::constants::mm_to_pt;
use crate::layout::{NUp, create_sheet_geometry};
use crate::types::*;
use std::path::PathBuf;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A source document and the pages to take from it
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct InputFile {
    pub path: PathBuf,
    /// Page-range expression such as `"1-3,5"`; `None` takes every page
    #[cfg_attr(feature = "serde", serde(default))]
    pub page_range: Option<String>,
}

impl InputFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            page_range: None,
        }
    }

    pub fn with_range(path: impl Into<PathBuf>, range: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            page_range: Some(range.into()),
        }
    }
}

impl From<PathBuf> for InputFile {
    fn from(path: PathBuf) -> Self {
        Self::new(path)
    }
}

/// Complete cheat-sheet configuration.
///
/// Treated as an immutable value: edits produce a new snapshot that is
/// recorded in an [`OptionsHistory`](crate::OptionsHistory).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CheatSheetOptions {
    // Input
    pub input_files: Vec<InputFile>,

    // Grid
    pub layout: NUp,

    // Output page
    pub paper_size: PaperSize,
    pub orientation: OrientationMode,
    pub margin_mm: f32,
    pub spacing_mm: f32,

    // Cell appearance
    pub border: BorderStyle,
    pub scaling_mode: ScalingMode,
    pub auto_rotate: bool,
    pub page_numbers: bool,

    // Annotation drawn once per face
    pub margin_note: String,
}

impl Default for CheatSheetOptions {
    fn default() -> Self {
        Self {
            input_files: Vec::new(),
            layout: NUp::Six,
            paper_size: PaperSize::A4,
            orientation: OrientationMode::Auto,
            margin_mm: 5.0,
            spacing_mm: 3.0,
            border: BorderStyle::Normal,
            scaling_mode: ScalingMode::Fit,
            auto_rotate: false,
            page_numbers: false,
            margin_note: String::new(),
        }
    }
}

impl CheatSheetOptions {
    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options = serde_json::from_slice(&bytes)
            .map_err(|e| ImposeError::Config(format!("Failed to parse config: {}", e)))?;
        Ok(options)
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| ImposeError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        if self.input_files.is_empty() {
            return Err(ImposeError::Config("No input files specified".to_string()));
        }

        for (name, value) in [("Margin", self.margin_mm), ("Spacing", self.spacing_mm)] {
            if !value.is_finite() || value < 0.0 {
                return Err(ImposeError::Config(format!(
                    "{} must be a non-negative length, got {}",
                    name, value
                )));
            }
        }

        // The orientation may still be unresolved, so both must leave room
        for orientation in [Orientation::Portrait, Orientation::Landscape] {
            let (width_mm, height_mm) = self.paper_size.dimensions_with_orientation(orientation);
            let geometry = create_sheet_geometry(
                self.layout,
                mm_to_pt(width_mm),
                mm_to_pt(height_mm),
                self.margin_mm,
                self.spacing_mm,
            );
            if !geometry.has_usable_cells() {
                return Err(ImposeError::Config(format!(
                    "Margin {}mm and spacing {}mm leave no room for a {} grid on {:?} paper",
                    self.margin_mm, self.spacing_mm, self.layout, self.paper_size
                )));
            }
        }

        Ok(())
    }

    /// Page-range expression for the document at `index`
    pub fn page_range(&self, index: usize) -> Option<&str> {
        self.input_files
            .get(index)
            .and_then(|file| file.page_range.as_deref())
    }

    /// File name used when the caller does not pick one
    pub fn default_output_name(&self) -> String {
        default_output_name(self.layout)
    }
}

/// `cheatsheet-6-in-1.pdf` and friends
pub fn default_output_name(layout: NUp) -> String {
    format!("cheatsheet-{}-in-1.pdf", layout.cells_per_side())
}
