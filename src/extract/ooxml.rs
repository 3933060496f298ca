//! Shared helpers for the zipped XML formats (DOCX, PPTX)

use super::{DocumentKind, ExtractError};
use std::io::{Read, Seek};
use zip::ZipArchive;

pub fn open_archive<R: Read + Seek>(
    reader: R,
    kind: DocumentKind,
) -> Result<ZipArchive<R>, ExtractError> {
    ZipArchive::new(reader)
        .map_err(|e| ExtractError::failed(kind, format!("not a valid {kind} archive: {e}")))
}

/// Read one XML part of the package as UTF-8.
pub fn read_part<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    name: &str,
    kind: DocumentKind,
) -> Result<String, ExtractError> {
    let mut entry = archive
        .by_name(name)
        .map_err(|_| ExtractError::failed(kind, format!("missing {name}")))?;
    let mut xml = String::new();
    entry
        .read_to_string(&mut xml)
        .map_err(|e| ExtractError::failed(kind, format!("failed to read {name}: {e}")))?;
    Ok(xml)
}
