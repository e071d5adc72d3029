use std::path::PathBuf;

mod session;

pub use cheatsheet_impose::{CheatSheetOptions, CheatSheetStatistics, NUp};
pub use session::{LoadedFile, Session, worker_task};

/// Commands sent from a front end to the worker
#[derive(Debug, Clone)]
pub enum CheatSheetCommand {
    /// Load PDFs and append them to the upload list
    UploadFiles {
        paths: Vec<PathBuf>,
    },
    RemoveFile {
        index: usize,
    },
    /// Set or clear (`None`) the page-range expression of one upload
    SetPageRange {
        index: usize,
        range: Option<String>,
    },
    SelectLayout {
        layout: NUp,
    },
    /// Replace the whole options snapshot
    ChangeOptions {
        options: CheatSheetOptions,
    },
    Undo,
    Redo,
    CalculateStats,
    Generate {
        output_path: PathBuf,
    },
}

/// Updates sent from the worker back to the front end
#[derive(Debug, Clone)]
pub enum CheatSheetUpdate {
    /// Current upload list after an upload, removal or range change
    FilesLoaded {
        files: Vec<FileSummary>,
    },
    FileRejected {
        path: PathBuf,
        reason: String,
    },
    OptionsChanged {
        options: CheatSheetOptions,
        can_undo: bool,
        can_redo: bool,
    },
    StatsCalculated {
        stats: CheatSheetStatistics,
    },
    Progress {
        operation: String,
        current: usize,
        total: usize,
    },
    GenerateComplete {
        path: PathBuf,
        stats: CheatSheetStatistics,
    },
    Error {
        message: String,
    },
}

/// One entry of the upload list as reported to the front end
#[derive(Debug, Clone, PartialEq)]
pub struct FileSummary {
    pub path: PathBuf,
    pub page_count: usize,
    pub page_range: Option<String>,
    /// Pages the range currently selects
    pub selected_pages: usize,
}
