// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Node record extraction
//!
//! Locates the `Objects` container under the document root and selects the
//! `Object` records that describe tree parts. The record whose `ID` equals
//! [`ROOT_ID`] is the exporter's sentinel for the tree itself and carries no
//! geometry, so it is skipped.

use roxmltree::Node;

use crate::error::{Error, Result};
use crate::fast_parse::parse_float;

/// Tag of the container holding all object records.
pub const OBJECTS_TAG: &str = "Objects";

/// Tag of a single object record.
pub const OBJECT_TAG: &str = "Object";

/// Identifier reserved for the sentinel root record.
pub const ROOT_ID: f64 = 0.0;

/// Find the first direct child of `root` tagged `Objects`.
pub fn locate_container<'a, 'input>(root: Node<'a, 'input>) -> Result<Node<'a, 'input>> {
    root.children()
        .find(|child| child.is_element() && child.tag_name().name() == OBJECTS_TAG)
        .ok_or(Error::MissingElement(OBJECTS_TAG))
}

/// Returns true if `id` names the sentinel root record.
///
/// The comparison is numeric, so `"0"`, `"0.0"` and `"-0"` all match.
#[inline]
pub fn is_root_id(id: f64) -> bool {
    id == ROOT_ID
}

/// Select the non-sentinel `Object` children of `container`, in document order.
pub fn extract_node_records<'a, 'input>(
    container: Node<'a, 'input>,
) -> Result<Vec<Node<'a, 'input>>> {
    let mut records = Vec::new();
    let mut skipped = 0usize;

    for child in container
        .children()
        .filter(|n| n.is_element() && n.tag_name().name() == OBJECT_TAG)
    {
        let raw = child.attribute("ID").ok_or_else(|| Error::MissingAttribute {
            object: child.attribute("Name").unwrap_or_default().to_string(),
            attr: "ID",
        })?;
        let id = parse_float(raw).ok_or_else(|| Error::InvalidNumber {
            object: child.attribute("Name").unwrap_or_default().to_string(),
            field: "ID",
            value: raw.to_string(),
        })?;

        if is_root_id(id) {
            skipped += 1;
            continue;
        }
        records.push(child);
    }

    tracing::debug!(records = records.len(), skipped, "extracted object records");
    Ok(records)
}
