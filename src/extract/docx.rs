//! Raw text of a Word document
//!
//! Walks `word/document.xml`: text runs are concatenated per paragraph and
//! every paragraph is followed by a blank line. Paragraphs nested in text
//! boxes are emitted before the paragraph that anchors them.

use super::ooxml::{open_archive, read_part};
use super::{DocumentKind, ExtractError};
use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::Cursor;

const DOCUMENT_PART: &str = "word/document.xml";

pub fn extract_text(bytes: &[u8]) -> Result<String, ExtractError> {
    let mut archive = open_archive(Cursor::new(bytes), DocumentKind::Docx)?;
    let xml = read_part(&mut archive, DOCUMENT_PART, DocumentKind::Docx)?;
    document_text(&xml)
}

fn document_text(xml: &str) -> Result<String, ExtractError> {
    let mut reader = Reader::from_str(xml);
    let mut output = String::new();
    // Text boxes nest whole paragraphs inside a run of the outer one
    let mut paragraphs: Vec<String> = Vec::new();
    let mut run_depth = 0u32;
    let mut in_text = false;
    // `mc:Fallback` repeats the `mc:Choice` content for older readers
    let mut fallback_depth = 0u32;

    loop {
        let event = reader.read_event().map_err(|e| {
            ExtractError::failed(
                DocumentKind::Docx,
                format!("XML parse error at {}: {e}", reader.buffer_position()),
            )
        })?;

        if fallback_depth > 0 {
            match &event {
                Event::Start(e) if e.local_name().as_ref() == b"Fallback" => fallback_depth += 1,
                Event::End(e) if e.local_name().as_ref() == b"Fallback" => fallback_depth -= 1,
                Event::Eof => break,
                _ => {}
            }
            continue;
        }

        match event {
            Event::Start(e) => match e.local_name().as_ref() {
                b"p" => paragraphs.push(String::new()),
                b"r" => run_depth += 1,
                b"t" if run_depth > 0 => in_text = true,
                b"Fallback" => fallback_depth = 1,
                _ => {}
            },
            // Tab stops inside paragraph properties are also `w:tab`, so
            // only count the ones that appear inside a run.
            Event::Empty(e) => match e.local_name().as_ref() {
                b"tab" if run_depth > 0 => push_to(&mut paragraphs, "\t"),
                b"br" | b"cr" if run_depth > 0 => push_to(&mut paragraphs, "\n"),
                b"p" => output.push_str("\n\n"),
                _ => {}
            },
            Event::End(e) => match e.local_name().as_ref() {
                b"p" => {
                    if let Some(paragraph) = paragraphs.pop() {
                        output.push_str(&paragraph);
                        output.push_str("\n\n");
                    }
                }
                b"r" => run_depth = run_depth.saturating_sub(1),
                b"t" => in_text = false,
                _ => {}
            },
            Event::Text(e) if in_text => {
                let text = e
                    .unescape()
                    .map_err(|err| ExtractError::failed(DocumentKind::Docx, err))?;
                push_to(&mut paragraphs, &text);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(output)
}

/// Append to the innermost open paragraph.
fn push_to(paragraphs: &mut [String], text: &str) {
    if let Some(paragraph) = paragraphs.last_mut() {
        paragraph.push_str(text);
    }
}
