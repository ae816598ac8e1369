//! In-memory PDFs for tests.

use super::PdfDocument;
use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, Stream, StringFormat};

/// Build a PDF with `num_pages` pages, each carrying at least `padding` extra
/// bytes of (uncompressed) content so tests can push pages over a size limit.
pub fn create_test_pdf(num_pages: u32, padding: usize) -> Vec<u8> {
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();

    let mut page_ids = Vec::new();
    for i in 0..num_pages {
        let mut operations = vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec![Object::Name(b"F1".to_vec()), Object::Integer(12)]),
            Operation::new("Td", vec![Object::Integer(100), Object::Integer(700)]),
            Operation::new(
                "Tj",
                vec![Object::String(
                    format!("Page {}", i + 1).into_bytes(),
                    StringFormat::Literal,
                )],
            ),
        ];
        if padding > 0 {
            // distinct per page so nothing could ever be shared between pages
            let filler = format!("{:x}", i % 16).repeat(padding);
            operations.push(Operation::new(
                "Tj",
                vec![Object::String(filler.into_bytes(), StringFormat::Literal)],
            ));
        }
        operations.push(Operation::new("ET", vec![]));

        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(Dictionary::new(), content.encode().unwrap()));

        let page = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Page".to_vec())),
            ("Parent", Object::Reference(pages_id)),
            (
                "MediaBox",
                Object::Array(vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Integer(612),
                    Object::Integer(792),
                ]),
            ),
            ("Contents", Object::Reference(content_id)),
        ]);
        page_ids.push(doc.add_object(page));
    }

    let pages = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Count", Object::Integer(num_pages as i64)),
        (
            "Kids",
            Object::Array(page_ids.iter().map(|id| Object::Reference(*id)).collect()),
        ),
    ]);
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]);
    let catalog_id = doc.add_object(catalog);
    doc.trailer.set("Root", Object::Reference(catalog_id));

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).unwrap();
    buffer
}

pub fn open_test_pdf(num_pages: u32, padding: usize) -> PdfDocument {
    PdfDocument::from_bytes(&create_test_pdf(num_pages, padding), "test.pdf").unwrap()
}

/// Page count of a PDF written to disk.
pub fn pages_in(path: &std::path::Path) -> usize {
    Document::load(path).unwrap().get_pages().len()
}

/// The "Page N" markers of a PDF written to disk, in page order.
pub fn page_markers(path: &std::path::Path) -> Vec<u32> {
    let doc = Document::load(path).unwrap();
    doc.get_pages()
        .values()
        .map(|&id| {
            let content = Content::decode(&doc.get_page_content(id).unwrap()).unwrap();
            content
                .operations
                .iter()
                .filter(|op| op.operator == "Tj")
                .find_map(|op| match op.operands.first() {
                    Some(Object::String(bytes, _)) => String::from_utf8_lossy(bytes)
                        .strip_prefix("Page ")
                        .and_then(|n| n.parse().ok()),
                    _ => None,
                })
                .unwrap()
        })
        .collect()
}
