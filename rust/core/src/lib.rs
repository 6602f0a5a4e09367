// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # TreeCloud Core
//!
//! Point-cloud extraction from SpeedTree XML exports.
//!
//! ## Overview
//!
//! An export stores the tree as a flat list of `Object` records under a
//! single `Objects` element. Each record carries point lists relative to its
//! origin plus the absolute position of that origin. This crate:
//!
//! - **Extracts** the object records, skipping the sentinel root (`ID="0"`)
//! - **Builds** [`NodeEntity`] values with relative and absolute coordinates
//! - **Classifies** nodes into trunk, branch and leaf buckets by keywords in
//!   the name prefix (`BigBranch_03` is a branch, `Frond_7` a leaf)
//! - **Flattens** a bucket into plain `X`, `Y`, `Z` lists
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use treecloud_core::{extract_trunk_points, Selection, TreeModel};
//!
//! // One category, one call
//! let (x, y, z) = extract_trunk_points("tree.xml")?.into_xyz();
//!
//! // Several categories from one parse
//! let model = TreeModel::from_path("tree.xml")?;
//! let all = model.points(Selection::All);
//! let buckets = model.buckets();
//! println!("{} leaf nodes", buckets.leaf.len());
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialization support for nodes, clouds and statistics

pub mod classify;
pub mod cloud;
pub mod error;
pub mod extract;
pub mod fast_parse;
pub mod node;
pub mod pipeline;
pub mod source;
pub mod summary;

pub use classify::{
    category_key, classify, Buckets, Category, ClassifyMode, Selection, BRANCH_KEYWORDS,
    LEAF_KEYWORDS, TRUNK_KEYWORDS,
};
pub use cloud::{Bounds, PointCloud};
pub use error::{Error, ErrorKind, Result};
pub use extract::{extract_node_records, locate_container, ROOT_ID};
pub use node::{build_nodes, NodeEntity};
pub use pipeline::{
    extract_all_points, extract_branch_points, extract_leaf_points, extract_points,
    extract_trunk_points, TreeModel,
};
pub use source::{parse_document, read_source};
pub use summary::{summarize, CategoryStats, CategorySummary};
