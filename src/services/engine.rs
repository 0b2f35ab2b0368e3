use std::time::Instant;
use lopdf::Document;
use tracing::{debug, info, warn};

use crate::error::{AppError, AppResult};
use crate::services::strategy::{
    ExtractionStrategy, LoadedDocument, LopdfStrategy, PdfExtractStrategy,
};

/// Text recovered from one document.
#[derive(Debug)]
pub struct ExtractionOutcome {
    pub text: String,
    pub pages: usize,
    pub processing_time_ms: u64,
}

/// Walks a document's pages and accumulates their text.
///
/// Document-level problems (unparsable container, password protection) are
/// returned as errors; page-level problems are swallowed so a damaged page
/// costs only its own text, never the rest of the document.
///
/// The engine holds no state and is safe to use from concurrent requests.
pub struct ExtractionEngine;

impl ExtractionEngine {
    pub fn new() -> Self {
        Self
    }

    /// Strategy names in the order they are tried, for health reporting.
    pub fn strategy_names() -> &'static [&'static str] {
        &["lopdf", "pdf-extract"]
    }

    pub fn extract(&self, bytes: &[u8]) -> AppResult<ExtractionOutcome> {
        let start = Instant::now();

        if bytes.is_empty() {
            return Err(AppError::unreadable("document is empty"));
        }

        let doc = Document::load_mem(bytes).map_err(|e| {
            warn!("Failed to open document: {}", e);
            AppError::unreadable(e.to_string())
        })?;

        if doc.is_encrypted() {
            warn!("Rejecting password-protected document");
            return Err(AppError::EncryptedDocument);
        }

        // BTreeMap keys come back ordered; sort anyway so the output order
        // never depends on the map type.
        let mut page_numbers: Vec<u32> = doc.get_pages().keys().copied().collect();
        page_numbers.sort_unstable();
        let page_count = page_numbers.len();

        let loaded = LoadedDocument { bytes, doc };
        let strategies: Vec<Box<dyn ExtractionStrategy>> =
            vec![Box::new(LopdfStrategy), Box::new(PdfExtractStrategy::new())];

        let mut page_texts = Vec::with_capacity(page_count);
        for page_number in page_numbers {
            page_texts.push(self.page_text(&loaded, page_number, &strategies));
        }

        let text = page_texts.join("\n");
        let processing_time_ms = start.elapsed().as_millis() as u64;

        info!(
            pages = page_count,
            characters = text.len(),
            processing_time_ms,
            "Document extraction completed"
        );

        Ok(ExtractionOutcome {
            text,
            pages: page_count,
            processing_time_ms,
        })
    }

    /// Text of one page, or the empty string if every strategy fails.
    ///
    /// Trailing whitespace is trimmed from the winning strategy's output
    /// (both libraries append a page-final newline of their own); leading
    /// whitespace is preserved. Pages are joined with a single `'\n'` by the
    /// caller.
    fn page_text(
        &self,
        document: &LoadedDocument<'_>,
        page_number: u32,
        strategies: &[Box<dyn ExtractionStrategy>],
    ) -> String {
        for strategy in strategies {
            match strategy.extract_page(document, page_number) {
                Ok(text) if !text.trim().is_empty() => {
                    debug!(
                        page = page_number,
                        strategy = strategy.name(),
                        characters = text.len(),
                        "Page text extracted"
                    );
                    return text.trim_end().to_string();
                }
                Ok(_) => {
                    debug!(
                        page = page_number,
                        strategy = strategy.name(),
                        "Strategy returned no text for page"
                    );
                }
                Err(e) => {
                    warn!(
                        page = page_number,
                        strategy = strategy.name(),
                        error = %e,
                        "Page extraction failed, trying next strategy"
                    );
                }
            }
        }

        String::new()
    }
}

impl Default for ExtractionEngine {
    fn default() -> Self {
        Self::new()
    }
}
