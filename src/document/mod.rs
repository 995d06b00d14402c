pub mod docx;
pub mod format;
pub mod pdf;

pub use format::{Document, DocumentFormat};

use crate::error::DocumentError;
use std::path::Path;

/// Read the human-readable text of a PDF or DOCX file.
///
/// An empty string is a legitimate result here; deciding that an empty
/// document is a failure is left to the caller.
pub fn extract_text(path: &Path) -> Result<String, DocumentError> {
    let document = Document::from_path(path)?;

    tracing::debug!(path = %path.display(), format = %document.format, "extracting text");

    match document.format {
        DocumentFormat::Pdf => pdf::extract_text(&document.path),
        DocumentFormat::Docx => docx::extract_text(&document.path),
    }
}
