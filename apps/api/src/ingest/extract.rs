//! Best-effort text extraction from uploaded documents.
//!
//! Every failure mode degrades to an empty string: a corrupt or unsupported
//! file must never abort the ingestion pipeline. No OCR, no layout
//! reconstruction, no encrypted-PDF handling beyond failing softly.

use std::io::Read;
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::Reader;
use tracing::debug;

/// Extracts plain text from a stored document, dispatching on the file
/// extension (case-insensitive). Unknown extensions fall back to a lossy
/// UTF-8 read. Returns `""` on any extraction failure.
pub fn extract_file_text(path: &Path) -> String {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "pdf" => extract_pdf(path),
        "docx" => extract_docx(path),
        _ => extract_plain_text(path),
    }
}

fn extract_pdf(path: &Path) -> String {
    match pdf_extract::extract_text(path) {
        Ok(text) => text,
        Err(e) => {
            debug!("PDF extraction failed for {}: {e}", path.display());
            String::new()
        }
    }
}

fn extract_docx(path: &Path) -> String {
    match read_docx_paragraphs(path) {
        Ok(text) => text,
        Err(e) => {
            debug!("DOCX extraction failed for {}: {e}", path.display());
            String::new()
        }
    }
}

/// Reads `word/document.xml` out of the docx zip container and joins the
/// `<w:t>` text runs of each `<w:p>` paragraph with newlines.
fn read_docx_paragraphs(path: &Path) -> anyhow::Result<String> {
    let file = std::fs::File::open(path)?;
    let mut archive = zip::ZipArchive::new(file)?;
    let mut document = archive.by_name("word/document.xml")?;
    let mut xml = String::new();
    document.read_to_string(&mut xml)?;

    let mut reader = Reader::from_str(&xml);
    let mut paragraphs: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut in_text_run = false;

    loop {
        match reader.read_event()? {
            Event::Start(ref e) if e.name().as_ref() == b"w:t" => in_text_run = true,
            Event::End(ref e) if e.name().as_ref() == b"w:t" => in_text_run = false,
            Event::Text(t) if in_text_run => current.push_str(&t.unescape()?),
            Event::End(ref e) if e.name().as_ref() == b"w:p" => {
                paragraphs.push(std::mem::take(&mut current));
            }
            Event::Eof => break,
            _ => {}
        }
    }
    if !current.is_empty() {
        paragraphs.push(current);
    }

    Ok(paragraphs.join("\n"))
}

fn extract_plain_text(path: &Path) -> String {
    match std::fs::read(path) {
        // Invalid bytes are replaced, never fatal
        Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        Err(e) => {
            debug!("Text read failed for {}: {e}", path.display());
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_docx(path: &Path, document_xml: &str) {
        let file = std::fs::File::create(path).unwrap();
        let mut zip = zip::ZipWriter::new(file);
        zip.start_file("word/document.xml", zip::write::FileOptions::default())
            .unwrap();
        zip.write_all(document_xml.as_bytes()).unwrap();
        zip.finish().unwrap();
    }

    #[test]
    fn test_missing_pdf_degrades_to_empty() {
        assert_eq!(extract_file_text(Path::new("no/such/file.pdf")), "");
    }

    #[test]
    fn test_missing_docx_degrades_to_empty() {
        assert_eq!(extract_file_text(Path::new("no/such/file.docx")), "");
    }

    #[test]
    fn test_missing_plain_file_degrades_to_empty() {
        assert_eq!(extract_file_text(Path::new("no/such/file.txt")), "");
    }

    #[test]
    fn test_plain_text_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resume.txt");
        std::fs::write(&path, "Python and SQL experience").unwrap();
        assert_eq!(extract_file_text(&path), "Python and SQL experience");
    }

    #[test]
    fn test_unknown_extension_falls_back_to_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resume.md");
        std::fs::write(&path, "# Skills\ndocker").unwrap();
        assert_eq!(extract_file_text(&path), "# Skills\ndocker");
    }

    #[test]
    fn test_invalid_utf8_is_replaced_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resume.txt");
        std::fs::write(&path, b"Rust caf\xe9 systems").unwrap();
        let text = extract_file_text(&path);
        assert!(text.starts_with("Rust caf"));
        assert!(text.ends_with("systems"));
    }

    #[test]
    fn test_extension_dispatch_is_case_insensitive() {
        // An uppercase .PDF must hit the PDF path, not the text fallback
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resume.PDF");
        std::fs::write(&path, "not really a pdf").unwrap();
        assert_eq!(extract_file_text(&path), "");
    }

    #[test]
    fn test_docx_paragraphs_joined_with_newlines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resume.docx");
        write_docx(
            &path,
            r#"<?xml version="1.0"?>
            <w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
              <w:body>
                <w:p><w:r><w:t>Senior engineer</w:t></w:r></w:p>
                <w:p><w:r><w:t>Python</w:t></w:r><w:r><w:t> and Docker</w:t></w:r></w:p>
              </w:body>
            </w:document>"#,
        );
        assert_eq!(extract_file_text(&path), "Senior engineer\nPython and Docker");
    }

    #[test]
    fn test_docx_without_document_xml_degrades_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resume.docx");
        let file = std::fs::File::create(&path).unwrap();
        let mut zip = zip::ZipWriter::new(file);
        zip.start_file("unrelated.txt", zip::write::FileOptions::default())
            .unwrap();
        zip.write_all(b"nothing").unwrap();
        zip.finish().unwrap();

        assert_eq!(extract_file_text(&path), "");
    }
}
