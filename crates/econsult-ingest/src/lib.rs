//! Ingestion adapters: uploaded PDF and CSV files to document sections.
//!
//! Uploaded bytes are spooled into a temporary file carrying the declared
//! extension, read by the matching adapter and removed again on every exit
//! path. PDFs go through [`econsult_core::parse_sections`]; CSV comments
//! are wrapped into a single bullet-list section so that both kinds flow
//! through the same comment aggregation.

pub mod csv;
mod error;
pub mod pdf;

pub use error::IngestError;

use std::fmt;
use std::io::Write;
use std::path::Path;

use econsult_core::{Section, parse_sections};
use tempfile::NamedTempFile;
use tracing::info;

/// Title of the section holding CSV comments.
pub const CSV_SECTION_TITLE: &str = "CSV Comments";

/// Supported upload kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    Pdf,
    Csv,
}

impl FileKind {
    /// Match a bare extension such as `pdf` or `CSV`.
    pub fn from_extension(ext: &str) -> Result<Self, IngestError> {
        match ext.to_ascii_lowercase().as_str() {
            "pdf" => Ok(Self::Pdf),
            "csv" => Ok(Self::Csv),
            _ => Err(IngestError::UnsupportedFormat(ext.to_string())),
        }
    }

    /// Kind from the extension of an uploaded file name. Names without an
    /// extension are unsupported.
    pub fn from_file_name(name: &str) -> Result<Self, IngestError> {
        let ext = Path::new(name)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        Self::from_extension(ext)
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Csv => "csv",
        }
    }

    fn suffix(&self) -> &'static str {
        match self {
            Self::Pdf => ".pdf",
            Self::Csv => ".csv",
        }
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Turn an uploaded file into document sections.
pub fn ingest(kind: FileKind, bytes: &[u8]) -> Result<Vec<Section>, IngestError> {
    let file = spool(kind, bytes)?;
    let sections = read_sections(kind, file.path())?;
    info!(
        kind = %kind,
        bytes = bytes.len(),
        sections = sections.len(),
        "ingested upload"
    );
    Ok(sections)
}

/// Run the adapter for `kind` on a file already on disk.
pub fn read_sections(kind: FileKind, path: &Path) -> Result<Vec<Section>, IngestError> {
    match kind {
        FileKind::Pdf => {
            let text = pdf::extract_text(path)?;
            Ok(parse_sections(&text))
        }
        FileKind::Csv => {
            let comments = csv::read_comments(path)?;
            Ok(vec![comments_section(&comments)])
        }
    }
}

/// One section listing every comment as a `• ` bullet line.
pub fn comments_section<S: AsRef<str>>(comments: &[S]) -> Section {
    let content = comments
        .iter()
        .map(|c| format!("• {}", c.as_ref().replace('\n', " ")))
        .collect::<Vec<_>>()
        .join("\n");
    Section::new(CSV_SECTION_TITLE, content)
}

fn spool(kind: FileKind, bytes: &[u8]) -> Result<NamedTempFile, IngestError> {
    let mut file = tempfile::Builder::new()
        .prefix("econsult-")
        .suffix(kind.suffix())
        .tempfile()?;
    file.write_all(bytes)?;
    file.flush()?;
    Ok(file)
}
