//! Text extraction from PDF, DOCX and plain text containers

use crate::error::{Result, ResumeAnalyzerError};
use crate::input::file_detector::DocumentKind;
use crate::processing::document::{Document, NormalizedText};
use log::{debug, warn};
use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::{Cursor, Read};
use zip::ZipArchive;

pub trait TextExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String>;
}

/// Route a document to the extractor for its kind
pub fn extract(document: &Document) -> Result<NormalizedText> {
    let text = match document.kind() {
        DocumentKind::Pdf => PdfExtractor.extract(document.bytes())?,
        DocumentKind::RichText => DocxExtractor.extract(document.bytes())?,
        DocumentKind::PlainText => PlainTextExtractor.extract(document.bytes())?,
    };

    debug!(
        "Extracted {} characters from {} byte {} document '{}'",
        text.chars().count(),
        document.byte_len(),
        document.kind(),
        document.source()
    );

    Ok(NormalizedText::new(text))
}

/// Page texts joined by a single space, in page order
pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String> {
        let doc = lopdf::Document::load_mem(bytes)
            .map_err(|e| ResumeAnalyzerError::PdfExtraction(format!("Failed to load PDF: {}", e)))?;

        // get_pages is keyed by page number, so iteration is in page order
        let pages = doc
            .get_pages()
            .into_keys()
            .map(|page_num| (page_num, doc.extract_text(&[page_num])));

        Ok(Self::join_pages(pages))
    }
}

impl PdfExtractor {
    /// A page that fails to extract still contributes an empty segment
    fn join_pages<E>(pages: impl IntoIterator<Item = (u32, std::result::Result<String, E>)>) -> String
    where
        E: std::fmt::Display,
    {
        pages
            .into_iter()
            .map(|(page_num, text)| match text {
                Ok(text) => text,
                Err(e) => {
                    warn!("Page {} yielded no text: {}", page_num, e);
                    String::new()
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Body paragraph texts joined by a single space, in document order
pub struct DocxExtractor;

impl TextExtractor for DocxExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String> {
        let mut archive = ZipArchive::new(Cursor::new(bytes))
            .map_err(|e| ResumeAnalyzerError::DocxExtraction(format!("Not a DOCX container: {}", e)))?;

        let mut xml = String::new();
        archive
            .by_name("word/document.xml")
            .map_err(|e| ResumeAnalyzerError::DocxExtraction(format!("Missing word/document.xml: {}", e)))?
            .read_to_string(&mut xml)?;

        Ok(Self::paragraphs(&xml)?.join(" "))
    }
}

impl DocxExtractor {
    /// Collect the text of every body-level `w:p`. Paragraphs inside tables
    /// and text boxes (`w:txbxContent`) are skipped; the enclosing paragraph
    /// keeps its own text.
    pub fn paragraphs(xml: &str) -> Result<Vec<String>> {
        let mut reader = Reader::from_str(xml);
        let mut paragraphs = Vec::new();
        let mut current = String::new();
        let mut paragraph_depth = 0usize;
        let mut table_depth = 0usize;
        let mut text_box_depth = 0usize;
        let mut in_text = false;

        loop {
            let event = reader
                .read_event()
                .map_err(|e| ResumeAnalyzerError::DocxExtraction(format!("Malformed document.xml: {}", e)))?;
            let nested = table_depth > 0 || text_box_depth > 0;
            let collecting = paragraph_depth > 0 && !nested;

            match event {
                Event::Start(e) => match e.local_name().as_ref() {
                    b"tbl" => table_depth += 1,
                    b"txbxContent" => text_box_depth += 1,
                    b"p" if !nested => {
                        if paragraph_depth == 0 {
                            current.clear();
                        }
                        paragraph_depth += 1;
                    }
                    b"t" if collecting => in_text = true,
                    _ => {}
                },
                Event::End(e) => match e.local_name().as_ref() {
                    b"tbl" => table_depth = table_depth.saturating_sub(1),
                    b"txbxContent" => text_box_depth = text_box_depth.saturating_sub(1),
                    b"p" if !nested && paragraph_depth > 0 => {
                        paragraph_depth -= 1;
                        if paragraph_depth == 0 {
                            paragraphs.push(std::mem::take(&mut current));
                        }
                    }
                    b"t" => in_text = false,
                    _ => {}
                },
                Event::Empty(e) => match e.local_name().as_ref() {
                    b"p" if !nested && paragraph_depth == 0 => paragraphs.push(String::new()),
                    b"tab" if collecting => current.push('\t'),
                    b"br" | b"cr" if collecting => current.push('\n'),
                    _ => {}
                },
                Event::Text(t) if in_text => {
                    let text = t
                        .unescape()
                        .map_err(|e| ResumeAnalyzerError::DocxExtraction(format!("Bad text run: {}", e)))?;
                    current.push_str(&text);
                }
                Event::Eof => break,
                _ => {}
            }
        }

        Ok(paragraphs)
    }
}

/// UTF-8 bytes returned unchanged
pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String> {
        Ok(String::from_utf8(bytes.to_vec())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn docx_xml(body: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{}</w:body></w:document>"#,
            body
        )
    }

    #[test]
    fn test_plain_text_identity() {
        let text = "Jane Doe\n  5 years of Rust, naïve café ✓\n";
        let extracted = PlainTextExtractor.extract(text.as_bytes()).unwrap();
        assert_eq!(extracted, text);
    }

    #[test]
    fn test_plain_text_invalid_utf8() {
        let result = PlainTextExtractor.extract(&[0x66, 0x6f, 0xff, 0xfe]);
        assert!(matches!(result, Err(ResumeAnalyzerError::Decode(_))));
    }

    #[test]
    fn test_docx_paragraphs_and_runs() {
        let xml = docx_xml(
            r#"<w:p><w:r><w:t>Jane</w:t></w:r><w:r><w:t xml:space="preserve"> Doe</w:t></w:r></w:p>
<w:p/>
<w:p><w:r><w:t>Skills</w:t><w:tab/><w:t>Rust &amp; Go</w:t></w:r></w:p>"#,
        );

        let paragraphs = DocxExtractor::paragraphs(&xml).unwrap();
        assert_eq!(paragraphs, vec!["Jane Doe", "", "Skills\tRust & Go"]);
    }

    #[test]
    fn test_docx_skips_table_paragraphs() {
        let xml = docx_xml(
            r#"<w:p><w:r><w:t>Before</w:t></w:r></w:p>
<w:tbl><w:tr><w:tc><w:p><w:r><w:t>Cell</w:t></w:r></w:p></w:tc></w:tr></w:tbl>
<w:p><w:r><w:t>After</w:t></w:r></w:p>"#,
        );

        let paragraphs = DocxExtractor::paragraphs(&xml).unwrap();
        assert_eq!(paragraphs, vec!["Before", "After"]);
    }

    #[test]
    fn test_docx_text_box_keeps_enclosing_paragraph() {
        let xml = docx_xml(
            r#"<w:p><w:r><w:t>Jane Doe</w:t></w:r><w:r><w:drawing><wp:anchor><a:graphic><a:graphicData><wps:wsp><wps:txbx><w:txbxContent><w:p><w:r><w:t>Contact box</w:t></w:r></w:p></w:txbxContent></wps:txbx></wps:wsp></a:graphicData></a:graphic></wp:anchor></w:drawing></w:r><w:r><w:t xml:space="preserve"> Senior Engineer</w:t></w:r></w:p>
<w:p><w:r><w:t>Next</w:t></w:r></w:p>"#,
        );

        let paragraphs = DocxExtractor::paragraphs(&xml).unwrap();
        assert_eq!(paragraphs, vec!["Jane Doe Senior Engineer", "Next"]);
    }

    #[test]
    fn test_docx_rejects_non_zip() {
        let result = DocxExtractor.extract(b"definitely not a zip");
        assert!(matches!(result, Err(ResumeAnalyzerError::DocxExtraction(_))));
    }

    #[test]
    fn test_pdf_rejects_garbage() {
        let result = PdfExtractor.extract(b"%PDF-garbage");
        assert!(matches!(result, Err(ResumeAnalyzerError::PdfExtraction(_))));
    }

    #[test]
    fn test_pdf_failed_page_keeps_its_slot() {
        let pages = vec![
            (1, Ok("alpha".to_string())),
            (2, Err("unsupported font encoding")),
            (3, Ok("omega".to_string())),
        ];
        assert_eq!(PdfExtractor::join_pages(pages), "alpha  omega");
    }

    #[test]
    fn test_extract_dispatches_plain_text() {
        let doc = Document::new(DocumentKind::PlainText, b"MBA, 10 yrs".to_vec(), "cv.txt");
        assert_eq!(extract(&doc).unwrap().as_str(), "MBA, 10 yrs");
    }
}
