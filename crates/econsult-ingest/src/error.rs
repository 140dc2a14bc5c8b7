use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Unsupported file format. Please upload a PDF or CSV.")]
    UnsupportedFormat(String),

    #[error("CSV appears empty.")]
    EmptyCsv,

    #[error("Could not parse CSV: {with_header} / {without_header}")]
    UnparseableCsv {
        with_header: String,
        without_header: String,
    },

    #[error("Could not read PDF: file appears truncated or is not a valid PDF.")]
    UnreadablePdf { cause: String },

    #[error("temp file error: {0}")]
    TempFile(#[from] std::io::Error),

    #[error("arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),
}

impl IngestError {
    /// Whether the error is the caller's fault (bad or unsupported input)
    /// rather than an internal failure.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedFormat(_)
                | Self::EmptyCsv
                | Self::UnparseableCsv { .. }
                | Self::UnreadablePdf { .. }
        )
    }
}
