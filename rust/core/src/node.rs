// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Node entities built from `Object` records
//!
//! A record looks like:
//!
//! ```xml
//! <Object Name="Trunk_01" ID="1" ParentID="0" AbsX="0" AbsY="0" AbsZ="0">
//!   <Points>
//!     <X>1.0 2.0 3.0</X>
//!     <Y>0.1 0.2 0.3</Y>
//!     <Z>5.0 5.1 5.2</Z>
//!   </Points>
//! </Object>
//! ```
//!
//! Point lists are relative to the node origin; the `Abs*` attributes hold
//! the world-space offset of that origin.

use roxmltree::Node;

use crate::error::{Error, Result};
use crate::fast_parse::{parse_float, parse_float_list};

/// One tree part with relative and absolute point coordinates.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeEntity {
    /// Node name, e.g. `Trunk_01`. The prefix before `_` encodes the category.
    pub name: String,
    /// Node identifier.
    pub id: f64,
    /// Identifier of the parent node (`0` for children of the root).
    pub parent_id: f64,
    /// Relative X coordinates.
    pub x: Vec<f64>,
    /// Relative Y coordinates.
    pub y: Vec<f64>,
    /// Relative Z coordinates.
    pub z: Vec<f64>,
    /// Absolute X coordinates (`x[i] + AbsX`).
    pub abs_x: Vec<f64>,
    /// Absolute Y coordinates (`y[i] + AbsY`).
    pub abs_y: Vec<f64>,
    /// Absolute Z coordinates (`z[i] + AbsZ`).
    pub abs_z: Vec<f64>,
}

impl NodeEntity {
    /// Build an entity from an `Object` record.
    pub fn from_record(record: Node<'_, '_>) -> Result<Self> {
        let name = record
            .attribute("Name")
            .ok_or_else(|| Error::MissingAttribute {
                object: format!("ID={}", record.attribute("ID").unwrap_or("?")),
                attr: "Name",
            })?
            .to_string();

        let id = float_attr(record, &name, "ID")?;
        let parent_id = float_attr(record, &name, "ParentID")?;
        let (x, y, z) = read_points(record, &name)?;

        let offset = [
            float_attr(record, &name, "AbsX")?,
            float_attr(record, &name, "AbsY")?,
            float_attr(record, &name, "AbsZ")?,
        ];

        let abs_x = offset_axis(&x, offset[0]);
        let abs_y = offset_axis(&y, offset[1]);
        let abs_z = offset_axis(&z, offset[2]);

        tracing::trace!(name = %name, id, parent_id, points = x.len(), "built node");

        Ok(Self {
            name,
            id,
            parent_id,
            x,
            y,
            z,
            abs_x,
            abs_y,
            abs_z,
        })
    }

    /// Number of points held by this node.
    #[inline]
    pub fn point_count(&self) -> usize {
        self.abs_x.len()
    }

    /// Returns true if the node carries no geometry.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.abs_x.is_empty()
    }

    /// Returns true if the node hangs directly off the tree root.
    #[inline]
    pub fn is_root_child(&self) -> bool {
        crate::extract::is_root_id(self.parent_id)
    }
}

/// Build entities for every record, stopping at the first failure.
pub fn build_nodes(records: &[Node<'_, '_>]) -> Result<Vec<NodeEntity>> {
    records.iter().map(|&r| NodeEntity::from_record(r)).collect()
}

fn float_attr(record: Node<'_, '_>, object: &str, attr: &'static str) -> Result<f64> {
    let raw = record
        .attribute(attr)
        .ok_or_else(|| Error::MissingAttribute {
            object: object.to_string(),
            attr,
        })?;
    parse_float(raw).ok_or_else(|| Error::InvalidNumber {
        object: object.to_string(),
        field: attr,
        value: raw.to_string(),
    })
}

/// Read the `Points` block. A missing block or a missing axis element leaves
/// the node without geometry; a repeated axis element replaces the earlier one.
fn read_points(record: Node<'_, '_>, object: &str) -> Result<(Vec<f64>, Vec<f64>, Vec<f64>)> {
    let (mut x, mut y, mut z) = (Vec::new(), Vec::new(), Vec::new());
    let mut present = [false; 3];

    let points = record
        .children()
        .filter(|n| n.is_element() && n.tag_name().name() == "Points");

    for block in points {
        for axis in block.children().filter(|n| n.is_element()) {
            let (target, field, slot) = match axis.tag_name().name() {
                "X" => (&mut x, "Points/X", 0),
                "Y" => (&mut y, "Points/Y", 1),
                "Z" => (&mut z, "Points/Z", 2),
                _ => continue,
            };
            present[slot] = true;
            *target = parse_float_list(axis.text().unwrap_or_default()).map_err(|value| {
                Error::InvalidNumber {
                    object: object.to_string(),
                    field,
                    value,
                }
            })?;
        }
    }

    if present.contains(&false) {
        if present.contains(&true) {
            tracing::debug!(object, ?present, "incomplete Points block, node has no geometry");
        }
        return Ok((Vec::new(), Vec::new(), Vec::new()));
    }

    if x.len() != y.len() || x.len() != z.len() {
        return Err(Error::AxisLengthMismatch {
            object: object.to_string(),
            x: x.len(),
            y: y.len(),
            z: z.len(),
        });
    }

    Ok((x, y, z))
}

#[inline]
fn offset_axis(values: &[f64], offset: f64) -> Vec<f64> {
    values.iter().map(|v| v + offset).collect()
}
