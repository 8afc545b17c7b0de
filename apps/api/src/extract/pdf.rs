//! PDF extraction: text via `pdf-extract`, structure (page count and link
//! annotations) via `lopdf`.

use lopdf::{Dictionary, Document, Object};
use tracing::debug;

use super::{ExtractError, ExtractedText};

pub fn extract(data: &[u8]) -> Result<ExtractedText, ExtractError> {
    let text =
        pdf_extract::extract_text_from_mem(data).map_err(|e| ExtractError::Pdf(e.to_string()))?;

    // A second, structural pass for page count and hyperlink annotations.
    // Text extraction alone drops link targets, and resumes routinely hide
    // contact/project URLs behind anchor text.
    let (page_count, urls) = match Document::load_mem(data) {
        Ok(doc) => (Some(doc.get_pages().len()), collect_link_urls(&doc)),
        Err(e) => {
            debug!("PDF structural pass failed, continuing without links: {e}");
            (None, Vec::new())
        }
    };

    debug!(
        "PDF text extracted: {} characters, {:?} pages, {} links",
        text.len(),
        page_count,
        urls.len()
    );

    Ok(ExtractedText {
        text,
        urls,
        page_count,
    })
}

/// Walks every page's annotations and collects URI actions of Link annots,
/// filtered to http(s) targets, deduplicated in document order.
fn collect_link_urls(doc: &Document) -> Vec<String> {
    let mut urls: Vec<String> = Vec::new();

    for page_id in doc.get_pages().into_values() {
        let Ok(page) = doc.get_dictionary(page_id) else {
            continue;
        };
        let Some(annots) = resolve_array(doc, page.get(b"Annots").ok()) else {
            continue;
        };

        for annot in &annots {
            let Some(dict) = resolve_dict(doc, Some(annot)) else {
                continue;
            };
            if !matches!(dict.get(b"Subtype"), Ok(Object::Name(n)) if n == b"Link") {
                continue;
            }
            let Some(action) = resolve_dict(doc, dict.get(b"A").ok()) else {
                continue;
            };
            if let Ok(Object::String(bytes, _)) = action.get(b"URI") {
                let uri = String::from_utf8_lossy(bytes).into_owned();
                if uri.starts_with("http") && !urls.contains(&uri) {
                    urls.push(uri);
                }
            }
        }
    }

    urls
}

fn resolve_array(doc: &Document, object: Option<&Object>) -> Option<Vec<Object>> {
    match object? {
        Object::Array(items) => Some(items.clone()),
        Object::Reference(id) => match doc.get_object(*id).ok()? {
            Object::Array(items) => Some(items.clone()),
            _ => None,
        },
        _ => None,
    }
}

fn resolve_dict<'a>(doc: &'a Document, object: Option<&'a Object>) -> Option<&'a Dictionary> {
    match object? {
        Object::Dictionary(dict) => Some(dict),
        Object::Reference(id) => match doc.get_object(*id).ok()? {
            Object::Dictionary(dict) => Some(dict),
            _ => None,
        },
        _ => None,
    }
}
