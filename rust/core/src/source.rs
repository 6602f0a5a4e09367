// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Source loading: file path to parsed XML document.

use std::path::Path;

use roxmltree::Document;

use crate::error::{Error, Result};

/// Read a SpeedTree XML export into memory.
pub fn read_source(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    std::fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse XML text into a read-only document tree.
///
/// The document borrows `text`, so the caller keeps the source alive for as
/// long as node records are in use.
pub fn parse_document(text: &str) -> Result<Document<'_>> {
    let doc = Document::parse(text)?;
    tracing::trace!(
        root = doc.root_element().tag_name().name(),
        "parsed XML document"
    );
    Ok(doc)
}
