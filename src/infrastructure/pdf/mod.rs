// ============================================================
// PDF LINK EXTRACTION
// ============================================================
// Builds a name -> URL mapping from a PDF, using both the text layer
// (URLs written out on a line) and /Link annotations with a /URI action.

use std::collections::BTreeMap;
use std::path::Path;

use lopdf::{Document, Object, ObjectId};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::error::{AppError, Result};

static HTTP_LINK_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"https?://[^\s<>"')\]]+"#).unwrap());

const LABEL_SEPARATORS: [char; 4] = [':', '-', '|', '\u{2013}'];

pub type LinkMap = BTreeMap<String, String>;

pub trait LinkExtractor {
    fn extract_http_links_from_pdf(&self, path: &Path) -> Result<LinkMap>;
}

#[derive(Debug, Default, Clone)]
pub struct PdfLinkExtractor;

impl PdfLinkExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl LinkExtractor for PdfLinkExtractor {
    fn extract_http_links_from_pdf(&self, path: &Path) -> Result<LinkMap> {
        let document = Document::load(path)
            .map_err(|e| AppError::ProcessingError(format!("Failed to load PDF: {}", e)))?;

        let mut links = LinkMap::new();

        for (page_num, page_id) in document.get_pages() {
            // Pages without a decodable text layer still get their annotations scanned.
            match document.extract_text(&[page_num]) {
                Ok(text) => {
                    for (name, url) in links_in_text(&text) {
                        insert_link(&mut links, name, url);
                    }
                }
                Err(e) => {
                    tracing::debug!(page = page_num, error = %e, "No text layer on page");
                }
            }

            for url in annotation_uris(&document, page_id) {
                if links.values().any(|existing| existing == &url) {
                    continue;
                }
                insert_link(&mut links, name_from_url(&url), url);
            }
        }

        tracing::info!(links = links.len(), "Extracted links from PDF");
        Ok(links)
    }
}

fn insert_link(links: &mut LinkMap, name: String, url: String) {
    links.entry(name).or_insert(url);
}

/// URLs found in extracted text. A URL is named by whatever precedes it on
/// its line, falling back to its host.
pub fn links_in_text(text: &str) -> Vec<(String, String)> {
    let mut found = Vec::new();
    for line in text.lines() {
        let mut label_start = 0;
        for m in HTTP_LINK_PATTERN.find_iter(line) {
            let url = m.as_str().trim_end_matches(['.', ',', ';']).to_string();
            let label = line[label_start..m.start()]
                .trim_matches(|c: char| c.is_whitespace() || LABEL_SEPARATORS.contains(&c));
            let name = if label.is_empty() {
                name_from_url(&url)
            } else {
                label.to_string()
            };
            found.push((name, url));
            label_start = m.end();
        }
    }
    found
}

/// Host without a leading `www.`; the raw URL when it does not parse
pub fn name_from_url(raw: &str) -> String {
    url::Url::parse(raw)
        .ok()
        .and_then(|parsed| parsed.host_str().map(|h| h.trim_start_matches("www.").to_string()))
        .unwrap_or_else(|| raw.to_string())
}

fn annotation_uris(document: &Document, page_id: ObjectId) -> Vec<String> {
    let page = match document.get_object(page_id).and_then(Object::as_dict) {
        Ok(page) => page,
        Err(_) => return Vec::new(),
    };
    let annots = match page.get(b"Annots").map(|obj| resolve(document, obj)) {
        Ok(Some(Object::Array(items))) => items,
        _ => return Vec::new(),
    };

    annots
        .iter()
        .filter_map(|item| match resolve(document, item) {
            Some(Object::Dictionary(annot)) => Some(annot),
            _ => None,
        })
        .filter(|annot| {
            annot
                .get(b"Subtype")
                .and_then(Object::as_name)
                .map(|name| name == b"Link")
                .unwrap_or(false)
        })
        .filter_map(|annot| {
            let action = match annot.get(b"A").ok().and_then(|obj| resolve(document, obj)) {
                Some(Object::Dictionary(action)) => action,
                _ => return None,
            };
            match action.get(b"URI").ok().and_then(|obj| resolve(document, obj)) {
                Some(Object::String(bytes, _)) => {
                    Some(String::from_utf8_lossy(bytes).trim().to_string())
                }
                _ => None,
            }
        })
        .filter(|uri| uri.starts_with("http://") || uri.starts_with("https://"))
        .collect()
}

fn resolve<'a>(document: &'a Document, object: &'a Object) -> Option<&'a Object> {
    match object {
        Object::Reference(id) => document.get_object(*id).ok(),
        other => Some(other),
    }
}
