//! Cheat-sheet imposition
//!
//! This module orchestrates a run:
//! 1. Resolve page ranges into one page sequence
//! 2. Plan the duplex N-up sheets
//! 3. Resolve output orientation and cell geometry
//! 4. Render each sheet's printed faces in plan order

mod io;
mod job;
mod output;

pub use io::{check_pdf_bytes, load_multiple_pdfs, load_pdf, load_pdf_bytes, save_pdf, save_pdf_bytes};
pub use job::{ImpositionJob, SheetTask};

use crate::options::CheatSheetOptions;
use crate::types::*;
use lopdf::Document;

/// Main imposition function
pub async fn impose(documents: &[Document], options: &CheatSheetOptions) -> Result<Document> {
    options.validate()?;

    let documents = documents.to_vec();
    let options = options.clone();

    tokio::task::spawn_blocking(move || ImpositionJob::new(&documents, &options)?.run(|_, _| {}))
        .await?
}
