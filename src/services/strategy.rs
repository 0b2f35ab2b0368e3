use anyhow::{anyhow, Result};
use lopdf::Document;
use once_cell::sync::OnceCell;
use tracing::{debug, warn};

/// A document that has already been opened for extraction. Strategies that
/// work from the parsed object tree use `doc`; strategies that run their own
/// parser start from `bytes`.
pub struct LoadedDocument<'a> {
    pub bytes: &'a [u8],
    pub doc: Document,
}

/// One text-extraction algorithm.
///
/// Strategies are tried in order for each page; the first one to produce
/// non-empty text wins. Returning an error or empty text hands the page to
/// the next strategy, so a strategy never has to be right about every
/// document it sees.
pub trait ExtractionStrategy {
    fn name(&self) -> &'static str;

    /// Extract the text of a single page. `page_number` is 1-indexed, as in
    /// the document's page tree.
    fn extract_page(&self, document: &LoadedDocument<'_>, page_number: u32) -> Result<String>;
}

/// Primary strategy: per-page content-stream extraction through lopdf.
pub struct LopdfStrategy;

impl ExtractionStrategy for LopdfStrategy {
    fn name(&self) -> &'static str {
        "lopdf"
    }

    fn extract_page(&self, document: &LoadedDocument<'_>, page_number: u32) -> Result<String> {
        document
            .doc
            .extract_text(&[page_number])
            .map_err(|e| anyhow!("content stream extraction failed: {}", e))
    }
}

/// Fallback strategy: pdf-extract's layout-aware pass over the whole
/// document. The library has no per-page entry point that shares parse
/// state, so the document is processed at most once and the per-page texts
/// are cached for every later page that falls back here.
pub struct PdfExtractStrategy {
    pages: OnceCell<Option<Vec<String>>>,
}

impl PdfExtractStrategy {
    pub fn new() -> Self {
        Self {
            pages: OnceCell::new(),
        }
    }

    fn pages(&self, bytes: &[u8]) -> Option<&Vec<String>> {
        self.pages
            .get_or_init(|| {
                debug!("Running pdf-extract fallback pass over the document");
                match pdf_extract::extract_text_from_mem_by_pages(bytes) {
                    Ok(pages) => Some(pages),
                    Err(e) => {
                        warn!("pdf-extract fallback pass failed: {}", e);
                        None
                    }
                }
            })
            .as_ref()
    }
}

impl Default for PdfExtractStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtractionStrategy for PdfExtractStrategy {
    fn name(&self) -> &'static str {
        "pdf-extract"
    }

    fn extract_page(&self, document: &LoadedDocument<'_>, page_number: u32) -> Result<String> {
        let pages = self
            .pages(document.bytes)
            .ok_or_else(|| anyhow!("fallback parser could not read the document"))?;

        let index = (page_number as usize)
            .checked_sub(1)
            .ok_or_else(|| anyhow!("page numbers are 1-indexed"))?;
        pages
            .get(index)
            .cloned()
            .ok_or_else(|| anyhow!("fallback parser has no page {}", page_number))
    }
}
