// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for point-cloud extraction.

use std::path::PathBuf;

/// Result type alias for extraction operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Coarse failure category of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The source file could not be read or is not well-formed XML.
    Parse,
    /// The document lacks an expected container element.
    Structure,
    /// A node record has a missing or malformed field.
    Field,
}

/// Errors that can occur while extracting a point cloud.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The source file could not be read.
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The source text is not well-formed XML.
    #[error("malformed XML: {0}")]
    Xml(#[from] roxmltree::Error),

    /// A required container element was not found.
    #[error("missing <{0}> element")]
    MissingElement(&'static str),

    /// A node record lacks a required attribute.
    #[error("object {object:?}: missing attribute {attr}")]
    MissingAttribute { object: String, attr: &'static str },

    /// A numeric field could not be parsed.
    #[error("object {object:?}: invalid number {value:?} in {field}")]
    InvalidNumber {
        object: String,
        field: &'static str,
        value: String,
    },

    /// The X, Y and Z point lists of a node have different lengths.
    #[error("object {object:?}: point axes differ in length (x={x}, y={y}, z={z})")]
    AxisLengthMismatch {
        object: String,
        x: usize,
        y: usize,
        z: usize,
    },
}

impl Error {
    /// Failure category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Io { .. } | Error::Xml(_) => ErrorKind::Parse,
            Error::MissingElement(_) => ErrorKind::Structure,
            Error::MissingAttribute { .. }
            | Error::InvalidNumber { .. }
            | Error::AxisLengthMismatch { .. } => ErrorKind::Field,
        }
    }
}
