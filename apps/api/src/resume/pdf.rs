//! PDF to plain text, the step that feeds the resume extractor.

use bytes::Bytes;
use thiserror::Error;
use tracing::debug;

const PDF_MAGIC: &[u8] = b"%PDF-";
const PAGE_BREAK: char = '\x0C';

#[derive(Debug, Error)]
pub enum PdfTextError {
    #[error("PDF could not be read: {0}")]
    Extract(String),

    #[error("PDF extraction task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Checks for the `%PDF-` header. Leading whitespace before the header is not accepted.
pub fn is_pdf(bytes: &[u8]) -> bool {
    bytes.starts_with(PDF_MAGIC)
}

/// Extracts the text of every page, in reading order, one page per block.
///
/// Parsing is CPU-bound and `pdf_extract` can panic on malformed input, so it
/// runs on the blocking pool; a panic surfaces as `PdfTextError::Task`.
pub async fn extract_pdf_text(bytes: Bytes) -> Result<String, PdfTextError> {
    let raw = tokio::task::spawn_blocking(move || {
        pdf_extract::extract_text_from_mem(&bytes).map_err(|e| PdfTextError::Extract(e.to_string()))
    })
    .await??;

    let text = join_pages(&raw);
    debug!(chars = text.len(), "Extracted PDF text");
    Ok(text)
}

/// Splits on form feeds and terminates every page with a newline.
fn join_pages(raw: &str) -> String {
    raw.split(PAGE_BREAK)
        .map(|page| format!("{}\n", page.trim_end()))
        .collect()
}
