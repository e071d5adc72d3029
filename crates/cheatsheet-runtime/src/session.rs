//! Worker-side state for one cheat-sheet session
//!
//! The session owns the uploaded documents and the options history.
//! Uploads are not part of the history: undo and redo walk the option
//! snapshots only, and every snapshot handed out carries the current
//! upload list as its `input_files`.

use cheatsheet_impose::{
    CheatSheetOptions, CheatSheetStatistics, ImposeError, ImpositionJob, InputFile,
    OptionsHistory, PageSelection, PageSequence, calculate_statistics, load_pdf, save_pdf,
    statistics_for,
};
use lopdf::Document;
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;

use crate::{CheatSheetCommand, CheatSheetUpdate, FileSummary};

/// An uploaded, validated source document
#[derive(Debug, Clone)]
pub struct LoadedFile {
    pub input: InputFile,
    pub document: Document,
    pub page_count: usize,
}

impl LoadedFile {
    fn selection(&self) -> PageSelection<'_> {
        PageSelection {
            page_count: self.page_count,
            range: self.input.page_range.as_deref(),
        }
    }

    fn summary(&self) -> FileSummary {
        FileSummary {
            path: self.input.path.clone(),
            page_count: self.page_count,
            page_range: self.input.page_range.clone(),
            selected_pages: self.selection().resolve().len(),
        }
    }
}

pub struct Session {
    files: Vec<LoadedFile>,
    history: OptionsHistory,
    update_tx: mpsc::UnboundedSender<CheatSheetUpdate>,
}

impl Session {
    pub fn new(update_tx: mpsc::UnboundedSender<CheatSheetUpdate>) -> Self {
        Self {
            files: Vec::new(),
            history: OptionsHistory::default(),
            update_tx,
        }
    }

    pub fn files(&self) -> &[LoadedFile] {
        &self.files
    }

    /// Current options with the upload list as `input_files`
    pub fn options(&self) -> CheatSheetOptions {
        CheatSheetOptions {
            input_files: self.files.iter().map(|f| f.input.clone()).collect(),
            ..self.history.current().clone()
        }
    }

    /// Process one command, reporting through the update channel
    pub async fn dispatch(&mut self, cmd: CheatSheetCommand) {
        match cmd {
            CheatSheetCommand::UploadFiles { paths } => self.upload(paths).await,
            CheatSheetCommand::RemoveFile { index } => {
                if index < self.files.len() {
                    let removed = self.files.remove(index);
                    log::info!("Removed {}", removed.input.path.display());
                    self.send_files();
                } else {
                    self.send_error(format!("No uploaded file at position {}", index + 1));
                }
            }
            CheatSheetCommand::SetPageRange { index, range } => match self.files.get_mut(index) {
                Some(file) => {
                    file.input.page_range = range.filter(|r| !r.trim().is_empty());
                    self.send_files();
                }
                None => self.send_error(format!("No uploaded file at position {}", index + 1)),
            },
            CheatSheetCommand::SelectLayout { layout } => {
                if self.history.update(|o| o.layout = layout) {
                    self.send_options();
                }
            }
            CheatSheetCommand::ChangeOptions { options } => {
                if let Err(e) = validate_settings(&options) {
                    self.send_error(e.to_string());
                    return;
                }
                // The upload list lives outside the history
                let recorded = self.history.apply(CheatSheetOptions {
                    input_files: Vec::new(),
                    ..options
                });
                if recorded {
                    self.send_options();
                } else {
                    log::debug!("Options unchanged");
                }
            }
            CheatSheetCommand::Undo => {
                if self.history.undo().is_some() {
                    self.send_options();
                } else {
                    log::debug!("Nothing to undo");
                }
            }
            CheatSheetCommand::Redo => {
                if self.history.redo().is_some() {
                    self.send_options();
                } else {
                    log::debug!("Nothing to redo");
                }
            }
            CheatSheetCommand::CalculateStats => match self.statistics() {
                Ok(stats) => self.send(CheatSheetUpdate::StatsCalculated { stats }),
                Err(e) => self.send_error(format!("Failed to calculate statistics: {}", e)),
            },
            CheatSheetCommand::Generate { output_path } => {
                match self.generate(&output_path).await {
                    Ok(stats) => self.send(CheatSheetUpdate::GenerateComplete {
                        path: output_path,
                        stats,
                    }),
                    Err(e) => self.send_error(format!("Failed to generate cheat sheet: {}", e)),
                }
            }
        }
    }

    async fn upload(&mut self, paths: Vec<PathBuf>) {
        let total = paths.len();
        for (i, path) in paths.into_iter().enumerate() {
            match load_pdf(&path).await {
                Ok(document) => {
                    let page_count = document.get_pages().len();
                    self.files.push(LoadedFile {
                        input: InputFile::new(path),
                        document,
                        page_count,
                    });
                }
                Err(e) => {
                    log::warn!("Rejected {}: {}", path.display(), e);
                    let reason = match e {
                        ImposeError::InvalidInput { reason, .. } => reason,
                        other => other.to_string(),
                    };
                    self.send(CheatSheetUpdate::FileRejected { path, reason });
                }
            }

            self.send(CheatSheetUpdate::Progress {
                operation: "Loading PDFs".to_string(),
                current: i + 1,
                total,
            });
        }
        self.send_files();
    }

    /// Statistics for the current uploads and layout
    pub fn statistics(&self) -> cheatsheet_impose::Result<CheatSheetStatistics> {
        let selections: Vec<PageSelection<'_>> =
            self.files.iter().map(LoadedFile::selection).collect();
        let sequence = PageSequence::build(&selections);
        statistics_for(sequence.len(), self.history.current().layout)
    }

    async fn generate(&self, output_path: &Path) -> cheatsheet_impose::Result<CheatSheetStatistics> {
        let options = self.options();
        options.validate()?;

        let documents: Vec<Document> = self.files.iter().map(|f| f.document.clone()).collect();
        let progress_tx = self.update_tx.clone();

        let (output, stats) = tokio::task::spawn_blocking(move || {
            let job = ImpositionJob::new(&documents, &options)?;
            let stats = calculate_statistics(job.plan());
            let output = job.run(|current, total| {
                let _ = progress_tx.send(CheatSheetUpdate::Progress {
                    operation: "Rendering sheets".to_string(),
                    current,
                    total,
                });
            })?;
            Ok::<_, ImposeError>((output, stats))
        })
        .await??;

        save_pdf(output, output_path).await?;
        log::info!(
            "Wrote {} ({} pages)",
            output_path.display(),
            stats.output_pages
        );
        Ok(stats)
    }

    fn send(&self, update: CheatSheetUpdate) {
        let _ = self.update_tx.send(update);
    }

    fn send_error(&self, message: String) {
        self.send(CheatSheetUpdate::Error { message });
    }

    fn send_files(&self) {
        self.send(CheatSheetUpdate::FilesLoaded {
            files: self.files.iter().map(LoadedFile::summary).collect(),
        });
    }

    fn send_options(&self) {
        self.send(CheatSheetUpdate::OptionsChanged {
            options: self.options(),
            can_undo: self.history.can_undo(),
            can_redo: self.history.can_redo(),
        });
    }
}

/// Validate everything but the upload list, which the session owns
fn validate_settings(options: &CheatSheetOptions) -> cheatsheet_impose::Result<()> {
    CheatSheetOptions {
        input_files: vec![InputFile::new("")],
        ..options.clone()
    }
    .validate()
}

/// Async worker task that processes cheat-sheet commands and sends updates
pub async fn worker_task(
    mut command_rx: mpsc::UnboundedReceiver<CheatSheetCommand>,
    update_tx: mpsc::UnboundedSender<CheatSheetUpdate>,
) {
    let mut session = Session::new(update_tx);

    while let Some(cmd) = command_rx.recv().await {
        log::debug!("Processing {:?}", cmd);
        session.dispatch(cmd).await;
    }
}

