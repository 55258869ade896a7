//! Raw text extraction from staged documents.
//!
//! The rest of the pipeline treats this as an opaque step: bytes on disk
//! in, text out. PDFs go through pdf-extract; anything that reads as UTF-8
//! is taken as plain text.

use std::path::Path;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DocumentParseError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF parsing failed: {0}")]
    Pdf(String),

    #[error("document contains no extractable text")]
    EmptyDocument,

    #[error("unsupported document format")]
    UnsupportedFormat,
}

enum DocumentFormat {
    Pdf,
    PlainText,
}

/// Detect the document format from magic bytes.
fn detect_format(bytes: &[u8]) -> Result<DocumentFormat, DocumentParseError> {
    if bytes.len() >= 5 && &bytes[0..5] == b"%PDF-" {
        Ok(DocumentFormat::Pdf)
    } else if std::str::from_utf8(bytes).is_ok() {
        Ok(DocumentFormat::PlainText)
    } else {
        Err(DocumentParseError::UnsupportedFormat)
    }
}

/// Extract the raw text of one staged document.
pub fn extract_text(path: &Path) -> Result<String, DocumentParseError> {
    let bytes = std::fs::read(path)?;

    let text = match detect_format(&bytes)? {
        DocumentFormat::Pdf => pdf_extract::extract_text_from_mem(&bytes)
            .map_err(|e| DocumentParseError::Pdf(e.to_string()))?,
        DocumentFormat::PlainText => String::from_utf8_lossy(&bytes).into_owned(),
    };

    if text.trim().is_empty() {
        return Err(DocumentParseError::EmptyDocument);
    }

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn staged(bytes: &[u8]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(bytes).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn extracts_plain_text() {
        let file = staged(b"Commenced loading 08:00, completed 12:00, weather: clear");
        let text = extract_text(file.path()).unwrap();
        assert!(text.contains("Commenced loading 08:00"));
    }

    #[test]
    fn empty_document_is_an_error() {
        let file = staged(b"");
        assert!(matches!(
            extract_text(file.path()),
            Err(DocumentParseError::EmptyDocument)
        ));

        let file = staged(b"   \n\t  ");
        assert!(matches!(
            extract_text(file.path()),
            Err(DocumentParseError::EmptyDocument)
        ));
    }

    #[test]
    fn binary_garbage_is_unsupported() {
        let file = staged(&[0x00, 0xFF, 0xFE, 0x01, 0x80, 0x9C]);
        assert!(matches!(
            extract_text(file.path()),
            Err(DocumentParseError::UnsupportedFormat)
        ));
    }

    #[test]
    fn corrupt_pdf_is_a_parse_error() {
        // PDF magic bytes but no readable structure behind them.
        let file = staged(b"%PDF-1.4\n\xDE\xAD\xBE\xEF truncated");
        assert!(matches!(
            extract_text(file.path()),
            Err(DocumentParseError::Pdf(_))
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let path = Path::new("definitely/not/here.txt");
        assert!(matches!(
            extract_text(path),
            Err(DocumentParseError::Io(_))
        ));
    }
}
