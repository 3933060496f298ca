//! In-memory sample documents for tests

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use std::fmt::Write as _;
use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Zip archive with the given `(path, contents)` entries, in order.
pub fn zip_bytes(entries: &[(&str, &str)]) -> Vec<u8> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, contents) in entries {
        zip.start_file(*name, SimpleFileOptions::default()).unwrap();
        zip.write_all(contents.as_bytes()).unwrap();
    }
    zip.finish().unwrap().into_inner()
}

/// Word document with one run per paragraph.
pub fn docx_bytes(paragraphs: &[&str]) -> Vec<u8> {
    let body = paragraphs.iter().fold(String::new(), |mut out, p| {
        let _ = write!(out, "<w:p><w:r><w:t>{}</w:t></w:r></w:p>", escape(p));
        out
    });
    let document = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body}</w:body></w:document>"#
    );
    zip_bytes(&[
        ("[Content_Types].xml", "<Types/>"),
        ("word/document.xml", &document),
    ])
}

/// Presentation deck; each slide holds one text run per fragment.
///
/// Slides are stored in reverse so that readers cannot rely on archive order.
pub fn pptx_bytes(slides: &[&[&str]]) -> Vec<u8> {
    let slide_xml: Vec<(String, String)> = slides
        .iter()
        .enumerate()
        .map(|(i, fragments)| {
            let runs = fragments.iter().fold(String::new(), |mut out, f| {
                let _ = write!(out, "<a:p><a:r><a:t>{}</a:t></a:r></a:p>", escape(f));
                out
            });
            let xml = format!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sld xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main"><p:cSld><p:spTree><p:sp><p:txBody>{runs}</p:txBody></p:sp></p:spTree></p:cSld></p:sld>"#
            );
            (format!("ppt/slides/slide{}.xml", i + 1), xml)
        })
        .collect();

    let mut entries: Vec<(&str, &str)> = vec![
        ("[Content_Types].xml", "<Types/>"),
        ("ppt/presentation.xml", "<p:presentation/>"),
    ];
    entries.extend(
        slide_xml
            .iter()
            .rev()
            .map(|(name, xml)| (name.as_str(), xml.as_str())),
    );
    zip_bytes(&entries)
}

/// Single-page PDF showing `text` in Helvetica.
pub fn pdf_bytes(text: &str) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let page_tree_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });
    let content = Content {
        operations: vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), 24.into()]),
            Operation::new("Td", vec![72.into(), 700.into()]),
            Operation::new("Tj", vec![Object::string_literal(text)]),
            Operation::new("ET", vec![]),
        ],
    };
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
    let page = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => page_tree_id,
        "Contents" => content_id,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
    });
    let page_tree = dictionary! {
        "Type" => "Pages",
        "Kids" => vec![page.into()],
        "Count" => 1,
    };
    doc.objects.insert(page_tree_id, Object::Dictionary(page_tree));
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => page_tree_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();
    bytes
}
