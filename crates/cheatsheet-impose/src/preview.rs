use crate::impose::ImpositionJob;
use crate::options::CheatSheetOptions;
use crate::types::*;
use lopdf::Document;

/// Generate a preview of the cheat sheet
/// Returns a document holding only the first `max_sheets` sheets
pub async fn generate_preview(
    documents: &[Document],
    options: &CheatSheetOptions,
    max_sheets: usize,
) -> Result<Document> {
    options.validate()?;

    let documents = documents.to_vec();
    let options = options.clone();

    tokio::task::spawn_blocking(move || {
        ImpositionJob::new(&documents, &options)?.run_limited(max_sheets, |_, _| {})
    })
    .await?
}
