//! Slide text of a `.pptx` deck
//!
//! The deck is parsed from a temporary copy on disk. The copy is a
//! `NamedTempFile`, so it is removed when it drops, whichever way parsing
//! ends.

use super::ooxml::{open_archive, read_part};
use super::{DocumentKind, ExtractError};
use quick_xml::events::Event;
use quick_xml::Reader;
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;

const PRESENTATION_PART: &str = "ppt/presentation.xml";

pub fn extract_text(bytes: &[u8], scratch_dir: &Path) -> Result<String, ExtractError> {
    let mut temp = tempfile::Builder::new()
        .prefix("deck-")
        .suffix(".pptx")
        .tempfile_in(scratch_dir)
        .map_err(|e| ExtractError::failed(DocumentKind::Pptx, format!("temp file: {e}")))?;
    temp.write_all(bytes)
        .and_then(|()| temp.flush())
        .map_err(|e| ExtractError::failed(DocumentKind::Pptx, format!("temp file: {e}")))?;

    tracing::debug!(path = %temp.path().display(), "Parsing PPTX from temp copy");
    extract_from_path(temp.path())
}

fn extract_from_path(path: &Path) -> Result<String, ExtractError> {
    let file = File::open(path)
        .map_err(|e| ExtractError::failed(DocumentKind::Pptx, format!("temp file: {e}")))?;
    let mut archive = open_archive(BufReader::new(file), DocumentKind::Pptx)?;

    if !archive.file_names().any(|name| name == PRESENTATION_PART) {
        return Err(ExtractError::failed(
            DocumentKind::Pptx,
            format!("missing {PRESENTATION_PART}"),
        ));
    }

    let mut slides: Vec<(u32, String)> = archive
        .file_names()
        .filter_map(|name| slide_number(name).map(|n| (n, name.to_string())))
        .collect();
    slides.sort_unstable_by_key(|(n, _)| *n);

    let mut texts = Vec::with_capacity(slides.len());
    for (_, name) in &slides {
        let xml = read_part(&mut archive, name, DocumentKind::Pptx)?;
        texts.push(slide_text(&xml)?);
    }
    Ok(texts.join("\n\n"))
}

/// `ppt/slides/slide12.xml` -> 12
fn slide_number(name: &str) -> Option<u32> {
    name.strip_prefix("ppt/slides/slide")?
        .strip_suffix(".xml")?
        .parse()
        .ok()
}

/// Text fragments (`a:t`) of one slide joined by a space. A slide without
/// any text yields an empty string.
fn slide_text(xml: &str) -> Result<String, ExtractError> {
    let mut reader = Reader::from_str(xml);
    let mut fragments: Vec<String> = Vec::new();
    let mut current: Option<String> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) if e.local_name().as_ref() == b"t" => {
                current = Some(String::new());
            }
            Ok(Event::Text(e)) => {
                if let Some(fragment) = current.as_mut() {
                    let text = e
                        .unescape()
                        .map_err(|err| ExtractError::failed(DocumentKind::Pptx, err))?;
                    fragment.push_str(&text);
                }
            }
            Ok(Event::End(e)) if e.local_name().as_ref() == b"t" => {
                if let Some(fragment) = current.take().filter(|f| !f.is_empty()) {
                    fragments.push(fragment);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(ExtractError::failed(
                    DocumentKind::Pptx,
                    format!("XML parse error at {}: {e}", reader.buffer_position()),
                ))
            }
            _ => {}
        }
    }

    Ok(fragments.join(" "))
}
