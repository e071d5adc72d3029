//! Document I/O for cheat-sheet imposition
//!
//! Inputs are checked before anything is planned: oversize files,
//! non-PDF files and unreadable or empty documents are rejected with a
//! reason.

use crate::constants::{MAX_INPUT_BYTES, PDF_MAGIC};
use crate::types::*;
use lopdf::Document;
use std::path::Path;

/// Load a single PDF document
pub async fn load_pdf(path: impl AsRef<Path>) -> Result<Document> {
    let path = path.as_ref().to_owned();
    let name = path.display().to_string();

    let size = tokio::fs::metadata(&path).await?.len();
    if size > MAX_INPUT_BYTES {
        return Err(oversize(&name, size));
    }

    let bytes = tokio::fs::read(&path).await?;
    let doc = tokio::task::spawn_blocking(move || load_pdf_bytes(&name, &bytes)).await??;
    log::info!("Loaded {} ({} pages)", path.display(), doc.get_pages().len());
    Ok(doc)
}

/// Load multiple PDF documents, in order
pub async fn load_multiple_pdfs(paths: &[impl AsRef<Path>]) -> Result<Vec<Document>> {
    let mut documents = Vec::new();
    for path in paths {
        documents.push(load_pdf(path).await?);
    }
    Ok(documents)
}

/// Parse an in-memory PDF after checking size and header.
///
/// `name` only appears in error messages.
pub fn load_pdf_bytes(name: &str, bytes: &[u8]) -> Result<Document> {
    check_pdf_bytes(name, bytes)?;

    let doc = Document::load_mem(bytes).map_err(|e| ImposeError::InvalidInput {
        name: name.to_string(),
        reason: format!("unreadable PDF ({})", e),
    })?;

    if doc.get_pages().is_empty() {
        return Err(ImposeError::InvalidInput {
            name: name.to_string(),
            reason: "document has no pages".to_string(),
        });
    }

    Ok(doc)
}

/// Reject oversize and non-PDF input without parsing it
pub fn check_pdf_bytes(name: &str, bytes: &[u8]) -> Result<()> {
    if bytes.len() as u64 > MAX_INPUT_BYTES {
        return Err(oversize(name, bytes.len() as u64));
    }

    if !bytes.starts_with(PDF_MAGIC) {
        return Err(ImposeError::InvalidInput {
            name: name.to_string(),
            reason: "not a PDF file".to_string(),
        });
    }

    Ok(())
}

fn oversize(name: &str, size: u64) -> ImposeError {
    ImposeError::InvalidInput {
        name: name.to_string(),
        reason: format!(
            "file is {:.2} MB, the limit is {} MB",
            size as f64 / (1024.0 * 1024.0),
            MAX_INPUT_BYTES / (1024 * 1024)
        ),
    }
}

/// Serialize the imposed document
pub async fn save_pdf_bytes(mut doc: Document) -> Result<Vec<u8>> {
    let bytes = tokio::task::spawn_blocking(move || {
        let mut writer = Vec::new();
        doc.save_to(&mut writer)?;
        Ok::<_, ImposeError>(writer)
    })
    .await??;
    Ok(bytes)
}

/// Save the imposed document
pub async fn save_pdf(doc: Document, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref().to_owned();
    let bytes = save_pdf_bytes(doc).await?;
    tokio::fs::write(&path, bytes).await?;
    Ok(())
}
