//! Extraction engine tests over in-memory PDF fixtures.
//!
//! Fixtures are built with lopdf so the tests need no files on disk. Page
//! content streams use the standard Helvetica font, which both extraction
//! libraries can decode without embedded font programs.

use excerpt::error::AppError;
use excerpt::services::{
    ExtractionEngine, ExtractionStrategy, LoadedDocument, LopdfStrategy,
};
use lopdf::{dictionary, Document, Object, Stream};

/// Build a PDF whose pages carry the given raw content streams.
fn build_pdf(page_contents: &[&[u8]]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });

    let mut page_ids = Vec::with_capacity(page_contents.len());
    for content in page_contents {
        let stream = Stream::new(dictionary! {}, content.to_vec());
        let content_id = doc.add_object(stream);

        let page_dict = dictionary! {
            "Type" => "Page",
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(612),
                Object::Integer(792),
            ],
            "Contents" => Object::Reference(content_id),
            "Resources" => dictionary! {
                "Font" => dictionary! { "F1" => Object::Reference(font_id) },
            },
        };
        page_ids.push(doc.add_object(page_dict));
    }

    let pages_dict = dictionary! {
        "Type" => "Pages",
        "Kids" => page_ids.iter().map(|id| Object::Reference(*id)).collect::<Vec<_>>(),
        "Count" => Object::Integer(page_ids.len() as i64),
    };
    let pages_id = doc.add_object(pages_dict);

    for page_id in &page_ids {
        if let Ok(page_obj) = doc.get_object_mut(*page_id) {
            if let Ok(dict) = page_obj.as_dict_mut() {
                dict.set("Parent", Object::Reference(pages_id));
            }
        }
    }

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => Object::Reference(pages_id),
    });
    doc.trailer.set("Root", Object::Reference(catalog_id));

    let mut buf = Vec::new();
    doc.save_to(&mut buf).unwrap();
    buf
}

/// Content stream that draws one line of text.
fn text_page(text: &str) -> Vec<u8> {
    format!("BT /F1 12 Tf 72 720 Td ({}) Tj ET", text).into_bytes()
}

#[test]
fn single_page_document_extracts_its_text() {
    let pdf = build_pdf(&[&text_page("Hello World")]);

    let outcome = ExtractionEngine::new().extract(&pdf).unwrap();
    assert_eq!(outcome.text, "Hello World");
    assert_eq!(outcome.pages, 1);
}

#[test]
fn pages_are_joined_in_document_order() {
    let pdf = build_pdf(&[
        &text_page("Alpha"),
        &text_page("Beta"),
        &text_page("Gamma"),
    ]);

    let outcome = ExtractionEngine::new().extract(&pdf).unwrap();
    assert_eq!(outcome.text, "Alpha\nBeta\nGamma");
    assert_eq!(outcome.pages, 3);
    // N pages, N-1 separators.
    assert_eq!(outcome.text.matches('\n').count(), outcome.pages - 1);
}

#[test]
fn corrupt_page_costs_only_its_own_text() {
    // The middle page's content stream is an unterminated string literal,
    // which neither extraction library can make sense of.
    let pdf = build_pdf(&[
        &text_page("Alpha"),
        b"(this string never closes Tj ET",
        &text_page("Gamma"),
    ]);

    let outcome = ExtractionEngine::new().extract(&pdf).unwrap();
    assert_eq!(outcome.pages, 3);
    assert_eq!(outcome.text, "Alpha\n\nGamma");

    let alpha = outcome.text.find("Alpha").unwrap();
    let gamma = outcome.text.find("Gamma").unwrap();
    assert!(alpha < gamma, "page order must be preserved");
}

#[test]
fn zero_byte_input_is_unreadable() {
    let err = ExtractionEngine::new().extract(&[]).unwrap_err();
    assert!(matches!(err, AppError::UnreadableDocument { .. }));
}

#[test]
fn non_pdf_input_is_unreadable() {
    let err = ExtractionEngine::new()
        .extract(b"this is just some text, not a document")
        .unwrap_err();
    assert!(matches!(err, AppError::UnreadableDocument { .. }));
}

#[test]
fn truncated_pdf_header_is_unreadable() {
    let err = ExtractionEngine::new().extract(b"%PDF-1.5").unwrap_err();
    assert!(matches!(err, AppError::UnreadableDocument { .. }));
}

#[test]
fn encrypted_document_is_rejected() {
    let mut doc = Document::load_mem(&build_pdf(&[&text_page("Secret")])).unwrap();
    let encrypt_id = doc.add_object(dictionary! {
        "Filter" => "Standard",
        "V" => 1,
        "R" => 2,
    });
    doc.trailer.set("Encrypt", Object::Reference(encrypt_id));
    let mut buf = Vec::new();
    doc.save_to(&mut buf).unwrap();

    let err = ExtractionEngine::new().extract(&buf).unwrap_err();
    assert!(matches!(err, AppError::EncryptedDocument));
}

#[test]
fn page_without_text_yields_empty_string_not_error() {
    // A page that only paints graphics, like a scanned image page.
    let pdf = build_pdf(&[b"q 1 0 0 1 0 0 cm Q"]);

    let outcome = ExtractionEngine::new().extract(&pdf).unwrap();
    assert_eq!(outcome.pages, 1);
    assert_eq!(outcome.text, "");
}

#[test]
fn extraction_is_idempotent() {
    let pdf = build_pdf(&[&text_page("Alpha"), &text_page("Beta")]);
    let engine = ExtractionEngine::new();

    let first = engine.extract(&pdf).unwrap();
    let second = engine.extract(&pdf).unwrap();
    assert_eq!(first.text, second.text);
}

#[test]
fn primary_strategy_reads_pages_independently() {
    let bytes = build_pdf(&[&text_page("Alpha"), &text_page("Beta")]);
    let loaded = LoadedDocument {
        bytes: &bytes,
        doc: Document::load_mem(&bytes).unwrap(),
    };

    let strategy = LopdfStrategy;
    let first = strategy.extract_page(&loaded, 1).unwrap();
    let second = strategy.extract_page(&loaded, 2).unwrap();
    assert!(first.contains("Alpha"));
    assert!(!first.contains("Beta"));
    assert!(second.contains("Beta"));
}

#[test]
fn strategy_names_are_reported_in_order() {
    assert_eq!(ExtractionEngine::strategy_names(), &["lopdf", "pdf-extract"]);
}
