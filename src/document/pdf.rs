use crate::error::DocumentError;
use std::path::Path;

/// Text of every page, in page order, one trailing newline per page that
/// produced any text.
pub fn extract_text(path: &Path) -> Result<String, DocumentError> {
    // Whole-file read: the handle is closed before parsing starts.
    let bytes = std::fs::read(path).map_err(|e| {
        DocumentError::extraction_failed(format!("cannot open {}", path.display()), e)
    })?;

    let pages = pdf_extract::extract_text_from_mem_by_pages(&bytes).map_err(|e| {
        DocumentError::extraction_failed(format!("cannot parse PDF {}", path.display()), e)
    })?;

    tracing::trace!(path = %path.display(), pages = pages.len(), "parsed PDF");

    Ok(join_pages(pages))
}

/// The layout engine pads page text with blank lines above and below the
/// content; that padding is dropped so a page's first line is its first
/// line of text. Pages with nothing left are skipped.
pub fn join_pages<I>(pages: I) -> String
where
    I: IntoIterator<Item = String>,
{
    let mut text = String::new();

    for page in pages {
        let page = page.trim_matches(|c| c == '\n' || c == '\r');
        if page.is_empty() {
            continue;
        }
        text.push_str(page);
        text.push('\n');
    }

    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    /// A PDF with one Helvetica text line per page; `None` makes a page with
    /// an empty content stream.
    fn make_test_pdf(pages: &[Option<&str>]) -> Vec<u8> {
        use lopdf::dictionary;
        use lopdf::{Document, Object, Stream};

        let mut doc = Document::with_version("1.4");
        let pages_id = doc.new_object_id();

        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        });

        let mut kids: Vec<Object> = Vec::new();
        for page in pages {
            let content = match page {
                Some(text) => format!("BT /F1 12 Tf 100 700 Td ({}) Tj ET", text),
                None => String::new(),
            };
            let content_id = doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));

            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
                "Contents" => content_id,
                "Resources" => dictionary! {
                    "Font" => dictionary! { "F1" => font_id },
                },
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut buf = Vec::new();
        doc.save_to(&mut buf).unwrap();
        buf
    }

    #[test]
    fn test_join_pages_skips_empty_pages() {
        let text = join_pages(vec![
            "\n\nJane Doe\njane@example.com\n".to_string(),
            String::new(),
            "\n\n".to_string(),
            "Experience".to_string(),
        ]);
        assert_eq!(text, "Jane Doe\njane@example.com\nExperience\n");
    }

    #[test]
    fn test_join_pages_keeps_inner_blank_lines_and_spaces() {
        let text = join_pages(vec!["  Jane\n\nDoe  ".to_string()]);
        assert_eq!(text, "  Jane\n\nDoe  \n");
        assert_eq!(join_pages(Vec::<String>::new()), "");
    }

    #[test]
    fn test_extract_text_from_digital_pdf() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("cv.pdf");
        std::fs::write(&path, make_test_pdf(&[Some("Jane Doe"), None, Some("Engineer")])).unwrap();

        let text = extract_text(&path).unwrap();

        assert_eq!(text, "Jane Doe\nEngineer\n");
        assert_eq!(crate::recognizer::recognize(&text).name, "Jane Doe");
    }

    #[test]
    fn test_pdf_without_text_yields_empty_string() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("scan.pdf");
        std::fs::write(&path, make_test_pdf(&[None, None])).unwrap();

        assert_eq!(extract_text(&path).unwrap().trim(), "");
    }

    #[test]
    fn test_invalid_pdf_returns_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.pdf");
        std::fs::write(&path, b"not a pdf").unwrap();

        let error = extract_text(&path).unwrap_err();
        assert!(matches!(error, DocumentError::ExtractionFailed { .. }));

        let detailed = error.detailed_message();
        assert!(detailed.starts_with("Failed to extract text: cannot parse PDF"));
        assert!(detailed.len() > error.to_string().len(), "cause missing: {}", detailed);
    }

    #[test]
    fn test_repeated_extraction_is_identical() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("cv.pdf");
        std::fs::write(&path, make_test_pdf(&[Some("Jane Doe")])).unwrap();

        assert_eq!(extract_text(&path).unwrap(), extract_text(&path).unwrap());
    }
}
