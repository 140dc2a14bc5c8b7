//! PDF text extraction.
//!
//! Pages are read through `lopdf` one at a time so that a single bad page
//! does not lose the rest of the document. Files `lopdf` cannot open are
//! handed to `pdf-extract` as a best-effort second attempt; it parses with
//! its own lopdf revision and can panic on malformed input, so a panic there
//! is reported as an unreadable PDF.

use std::fmt::Display;
use std::panic::{self, UnwindSafe};
use std::path::Path;

use lopdf::Document;
use tracing::{debug, warn};

use crate::IngestError;

/// Extract the text of the PDF at `path`, one page per line group.
pub fn extract_text(path: &Path) -> Result<String, IngestError> {
    let structural = match extract_pages(path) {
        Ok(text) => return Ok(text),
        Err(e) => e,
    };
    warn!(
        error = %structural,
        path = %path.display(),
        "structural PDF parse failed; trying whole-document extraction"
    );

    recover(|| pdf_extract::extract_text(path)).map_err(|e| IngestError::UnreadablePdf {
        cause: format!("{structural} / {e}"),
    })
}

/// Run a fallback extractor, turning a panic into an error message.
fn recover<F, E>(extract: F) -> Result<String, String>
where
    F: FnOnce() -> Result<String, E> + UnwindSafe,
    E: Display,
{
    match panic::catch_unwind(extract) {
        Ok(result) => result.map_err(|e| e.to_string()),
        Err(payload) => {
            let message = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            Err(format!("pdf-extract panicked: {message}"))
        }
    }
}

/// Page-by-page extraction. Empty pages are skipped, pages are joined with
/// a newline.
fn extract_pages(path: &Path) -> Result<String, lopdf::Error> {
    let doc = Document::load(path)?;
    let pages = doc.get_pages();

    let mut parts = Vec::with_capacity(pages.len());
    for &page_number in pages.keys() {
        match doc.extract_text(&[page_number]) {
            Ok(text) if !text.is_empty() => parts.push(text),
            Ok(_) => {}
            Err(e) => debug!(page = page_number, error = %e, "no text on PDF page"),
        }
    }
    debug!(pages = pages.len(), with_text = parts.len(), "extracted PDF text");
    Ok(parts.join("\n"))
}
