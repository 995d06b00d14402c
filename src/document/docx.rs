//! Plain-text extraction for Office Open XML word-processing documents.
//!
//! A `.docx` file is a zip archive; the body text lives in
//! `word/document.xml`. Only top-level body paragraphs are read, in document
//! order, each followed by a newline. Tables, headers, footers and text boxes
//! are not part of the output.

use crate::error::DocumentError;
use roxmltree::Node;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use zip::ZipArchive;

const WORD_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const DOCUMENT_PART: &str = "word/document.xml";

pub fn extract_text(path: &Path) -> Result<String, DocumentError> {
    let file = File::open(path).map_err(|e| {
        DocumentError::extraction_failed(format!("cannot open {}", path.display()), e)
    })?;

    let mut archive = ZipArchive::new(BufReader::new(file)).map_err(|e| {
        DocumentError::extraction_failed(format!("{} is not a valid DOCX archive", path.display()), e)
    })?;

    let mut xml = String::new();
    archive
        .by_name(DOCUMENT_PART)
        .map_err(|e| {
            DocumentError::extraction_failed(
                format!("{} has no {} part", path.display(), DOCUMENT_PART),
                e,
            )
        })?
        .read_to_string(&mut xml)
        .map_err(|e| {
            DocumentError::extraction_failed(format!("cannot read {}", DOCUMENT_PART), e)
        })?;

    text_from_document_xml(&xml)
}

/// Paragraph text of a `word/document.xml` payload.
pub fn text_from_document_xml(xml: &str) -> Result<String, DocumentError> {
    let document = roxmltree::Document::parse(xml)
        .map_err(|e| DocumentError::extraction_failed("malformed document XML", e))?;

    let body = document
        .root_element()
        .children()
        .find(|n| is_word_element(n, "body"))
        .ok_or_else(|| DocumentError::ExtractionFailed {
            message: "document XML has no body element".to_string(),
            source: None,
        })?;

    let mut text = String::new();
    for paragraph in body.children().filter(|n| is_word_element(n, "p")) {
        push_paragraph_text(paragraph, &mut text);
        text.push('\n');
    }

    Ok(text)
}

fn push_paragraph_text(paragraph: Node, out: &mut String) {
    for child in paragraph.children() {
        if is_word_element(&child, "r") {
            push_run_text(child, out);
        } else if is_word_element(&child, "hyperlink") {
            for run in child.children().filter(|n| is_word_element(n, "r")) {
                push_run_text(run, out);
            }
        }
    }
}

fn push_run_text(run: Node, out: &mut String) {
    for child in run.children().filter(|n| n.is_element()) {
        if child.tag_name().namespace() != Some(WORD_NS) {
            continue;
        }

        match child.tag_name().name() {
            "t" => out.push_str(child.text().unwrap_or("")),
            "tab" | "ptab" => out.push('\t'),
            "cr" => out.push('\n'),
            // Page and column breaks carry no text.
            "br" => match child.attribute((WORD_NS, "type")) {
                None | Some("textWrapping") => out.push('\n'),
                Some(_) => {}
            },
            "noBreakHyphen" => out.push('-'),
            _ => {}
        }
    }
}

fn is_word_element(node: &Node, name: &str) -> bool {
    node.is_element()
        && node.tag_name().name() == name
        && node.tag_name().namespace() == Some(WORD_NS)
}
