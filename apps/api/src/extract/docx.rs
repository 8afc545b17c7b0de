//! DOCX extraction: raw paragraph text via `docx-rs`. No URL extraction is
//! performed for this format.

use docx_rs::{read_docx, DocumentChild, ParagraphChild, RunChild};
use tracing::debug;

use super::{ExtractError, ExtractedText};

pub fn extract(data: &[u8]) -> Result<ExtractedText, ExtractError> {
    let docx = read_docx(data).map_err(|e| ExtractError::Docx(e.to_string()))?;

    let mut paragraphs: Vec<String> = Vec::new();

    for child in docx.document.children.iter() {
        if let DocumentChild::Paragraph(paragraph) = child {
            let mut line = String::new();
            for para_child in paragraph.children.iter() {
                if let ParagraphChild::Run(run) = para_child {
                    for run_child in run.children.iter() {
                        if let RunChild::Text(t) = run_child {
                            line.push_str(&t.text);
                        }
                    }
                }
            }
            if !line.is_empty() {
                paragraphs.push(line);
            }
        }
    }

    let text = paragraphs.join("\n");
    debug!("DOCX text extracted: {} characters", text.len());

    Ok(ExtractedText {
        text,
        urls: Vec::new(),
        page_count: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_docx_bytes_fail() {
        // DOCX files are ZIP archives; arbitrary bytes must error cleanly
        let result = extract(b"not a valid docx file");
        assert!(matches!(result, Err(ExtractError::Docx(_))));
    }
}
