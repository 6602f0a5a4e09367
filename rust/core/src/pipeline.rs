// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Extraction entry points
//!
//! Every free function re-runs the whole pipeline (read, parse, extract,
//! build, classify, flatten). When more than one category is needed from the
//! same file, load a [`TreeModel`] once and query it instead.

use std::path::Path;

use crate::classify::{classify, Buckets, Category, ClassifyMode, Selection};
use crate::cloud::PointCloud;
use crate::error::Result;
use crate::extract::{extract_node_records, locate_container};
use crate::node::{build_nodes, NodeEntity};
use crate::source::{parse_document, read_source};
use crate::summary::{summarize, CategorySummary};

/// All node entities of one export, ready to be classified.
#[derive(Debug, Clone)]
pub struct TreeModel {
    nodes: Vec<NodeEntity>,
    mode: ClassifyMode,
}

impl TreeModel {
    /// Load and parse an export file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = read_source(path)?;
        let model = Self::from_xml(&text)?;
        tracing::debug!(
            path = %path.display(),
            nodes = model.nodes.len(),
            "loaded tree model"
        );
        Ok(model)
    }

    /// Parse export XML held in memory.
    pub fn from_xml(text: &str) -> Result<Self> {
        let doc = parse_document(text)?;
        let container = locate_container(doc.root_element())?;
        let records = extract_node_records(container)?;
        let nodes = build_nodes(&records)?;
        Ok(Self::from_nodes(nodes))
    }

    /// Wrap already-built entities.
    pub fn from_nodes(nodes: Vec<NodeEntity>) -> Self {
        Self {
            nodes,
            mode: ClassifyMode::default(),
        }
    }

    /// Use `mode` for subsequent classification.
    pub fn with_mode(mut self, mode: ClassifyMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn mode(&self) -> ClassifyMode {
        self.mode
    }

    /// Node entities in document order.
    pub fn nodes(&self) -> &[NodeEntity] {
        &self.nodes
    }

    /// Classify the nodes into trunk, branch and leaf buckets.
    pub fn buckets(&self) -> Buckets<'_> {
        classify(&self.nodes, self.mode)
    }

    /// Absolute points for a selection.
    pub fn points(&self, selection: Selection) -> PointCloud {
        self.buckets().select(selection)
    }

    /// Node and point statistics per category key.
    pub fn summary(&self) -> CategorySummary {
        summarize(&self.nodes)
    }
}

/// Run the full pipeline on `path` and return the selected points.
pub fn extract_points(
    path: impl AsRef<Path>,
    selection: Selection,
    mode: ClassifyMode,
) -> Result<PointCloud> {
    let model = TreeModel::from_path(path)?.with_mode(mode);
    let cloud = model.points(selection);
    tracing::debug!(%selection, points = cloud.len(), "extracted points");
    Ok(cloud)
}

/// Trunk, branch and leaf points, in that order.
pub fn extract_all_points(path: impl AsRef<Path>) -> Result<PointCloud> {
    extract_points(path, Selection::All, ClassifyMode::Independent)
}

/// Points of trunk-like nodes.
pub fn extract_trunk_points(path: impl AsRef<Path>) -> Result<PointCloud> {
    extract_points(path, Selection::Only(Category::Trunk), ClassifyMode::Independent)
}

/// Points of branch-like nodes.
pub fn extract_branch_points(path: impl AsRef<Path>) -> Result<PointCloud> {
    extract_points(path, Selection::Only(Category::Branch), ClassifyMode::Independent)
}

/// Points of leaf and frond nodes.
pub fn extract_leaf_points(path: impl AsRef<Path>) -> Result<PointCloud> {
    extract_points(path, Selection::Only(Category::Leaf), ClassifyMode::Independent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    const TREE: &str = r#"<Root>
        <Objects>
            <Object ID="0" Name="Tree"/>
            <Object Name="Trunk_01" ID="1" ParentID="0" AbsX="10" AbsY="0" AbsZ="0">
                <Points><X>1 2</X><Y>0 0</Y><Z>0 0</Z></Points>
            </Object>
            <Object Name="Leaf_01" ID="2" ParentID="1" AbsX="0" AbsY="0" AbsZ="1">
                <Points><X>5</X><Y>5</Y><Z>5</Z></Points>
            </Object>
        </Objects>
    </Root>"#;

    #[test]
    fn test_model_from_xml() {
        let model = TreeModel::from_xml(TREE).unwrap();
        assert_eq!(model.nodes().len(), 2);
        assert_eq!(model.mode(), ClassifyMode::Independent);

        let trunk = model.points(Selection::Only(Category::Trunk));
        assert_eq!(trunk.x, vec![11.0, 12.0]);

        let all = model.points(Selection::All);
        assert_eq!(all.x, vec![11.0, 12.0, 5.0]);
        assert_eq!(all.z, vec![0.0, 0.0, 6.0]);
        assert!(model.points(Selection::Only(Category::Branch)).is_empty());
    }

    #[test]
    fn test_model_summary() {
        let model = TreeModel::from_xml(TREE).unwrap();
        let summary = model.summary();
        assert_eq!(summary.get("trunk").unwrap().total_points, 2);
        assert_eq!(summary.get("leaf").unwrap().count, 1);
    }

    #[test]
    fn test_field_error_aborts_whole_model() {
        let xml = r#"<Root><Objects>
            <Object Name="Trunk_01" ID="1" ParentID="0" AbsX="0" AbsY="0" AbsZ="0"/>
            <Object Name="Leaf_01" ID="2" ParentID="1" AbsX="0" AbsY="0"/>
        </Objects></Root>"#;
        let err = TreeModel::from_xml(xml).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Field);
    }

    #[test]
    fn test_partial_points_block_keeps_extraction() {
        let xml = r#"<Root><Objects>
            <Object Name="Trunk_01" ID="1" ParentID="0" AbsX="0" AbsY="0" AbsZ="0">
                <Points><X>1 2</X><Y>3 4</Y></Points>
            </Object>
            <Object Name="Leaf_01" ID="2" ParentID="1" AbsX="0" AbsY="0" AbsZ="0">
                <Points><X>5</X><Y>6</Y><Z>7</Z></Points>
            </Object>
        </Objects></Root>"#;
        let model = TreeModel::from_xml(xml).unwrap();
        assert_eq!(model.nodes().len(), 2);
        assert!(model.nodes()[0].is_empty());
        assert!(model.points(Selection::Only(Category::Trunk)).is_empty());
        assert_eq!(model.points(Selection::All).x, vec![5.0]);
    }

    #[test]
    fn test_missing_file() {
        let err = extract_all_points("/nonexistent/tree.xml").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
    }
}
