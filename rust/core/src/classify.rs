// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Trunk / branch / leaf classification
//!
//! Node names look like `BigBranch_03` or `BatchedLeaf_12`. The part before
//! the first `_`, lower-cased, is the category key. A node belongs to a
//! category when any of the category's keywords occurs *inside* the key, so
//! `bigbranch` matches both `big` and `branch`.

use std::fmt;
use std::str::FromStr;

use crate::cloud::PointCloud;
use crate::node::NodeEntity;

/// Keywords identifying trunk-like parts.
pub const TRUNK_KEYWORDS: &[&str] = &["trunk", "cavity", "shell", "lump", "roots", "knot"];

/// Keywords identifying branch-like parts.
pub const BRANCH_KEYWORDS: &[&str] = &[
    "bifurcating",
    "branch",
    "big",
    "cap",
    "large",
    "twigs",
    "little",
];

/// Keywords identifying leaf-like parts.
pub const LEAF_KEYWORDS: &[&str] = &["batchedleaf", "frond", "leaf"];

/// Semantic category of a tree part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Category {
    Trunk,
    Branch,
    Leaf,
}

impl Category {
    /// All categories in output order.
    pub const ALL: [Category; 3] = [Category::Trunk, Category::Branch, Category::Leaf];

    /// Keyword set of this category.
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            Category::Trunk => TRUNK_KEYWORDS,
            Category::Branch => BRANCH_KEYWORDS,
            Category::Leaf => LEAF_KEYWORDS,
        }
    }

    /// Returns true if `key` (already lower-cased) contains one of the keywords.
    #[inline]
    pub fn matches_key(self, key: &str) -> bool {
        self.keywords().iter().any(|kw| key.contains(kw))
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Trunk => "trunk",
            Category::Branch => "branch",
            Category::Leaf => "leaf",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Which buckets an extraction returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    /// Trunk, then branch, then leaf.
    #[default]
    All,
    /// A single bucket.
    Only(Category),
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::All => f.write_str("all"),
            Selection::Only(category) => f.write_str(category.as_str()),
        }
    }
}

impl FromStr for Selection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Ok(Selection::All),
            "trunk" => Ok(Selection::Only(Category::Trunk)),
            "branch" => Ok(Selection::Only(Category::Branch)),
            "leaf" => Ok(Selection::Only(Category::Leaf)),
            other => Err(format!(
                "unknown selection '{other}' (expected all, trunk, branch or leaf)"
            )),
        }
    }
}

/// How overlapping keyword matches are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClassifyMode {
    /// Each bucket filters the nodes on its own. A node matching keywords of
    /// several categories lands in each of them.
    #[default]
    Independent,
    /// Trunk, branch, leaf in priority order; the first match wins.
    FirstMatch,
}

impl FromStr for ClassifyMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "independent" => Ok(ClassifyMode::Independent),
            "first-match" | "first_match" | "firstmatch" => Ok(ClassifyMode::FirstMatch),
            other => Err(format!(
                "unknown classify mode '{other}' (expected independent or first-match)"
            )),
        }
    }
}

/// Lower-cased name prefix before the first `_`.
pub fn category_key(name: &str) -> String {
    name.split('_').next().unwrap_or_default().to_lowercase()
}

/// Nodes grouped by category, each bucket in input order.
#[derive(Debug, Clone, Default)]
pub struct Buckets<'a> {
    pub trunk: Vec<&'a NodeEntity>,
    pub branch: Vec<&'a NodeEntity>,
    pub leaf: Vec<&'a NodeEntity>,
}

impl<'a> Buckets<'a> {
    /// Nodes of one category.
    pub fn get(&self, category: Category) -> &[&'a NodeEntity] {
        match category {
            Category::Trunk => &self.trunk,
            Category::Branch => &self.branch,
            Category::Leaf => &self.leaf,
        }
    }

    fn get_mut(&mut self, category: Category) -> &mut Vec<&'a NodeEntity> {
        match category {
            Category::Trunk => &mut self.trunk,
            Category::Branch => &mut self.branch,
            Category::Leaf => &mut self.leaf,
        }
    }

    /// Total point count of one bucket.
    pub fn point_count(&self, category: Category) -> usize {
        self.get(category).iter().map(|n| n.point_count()).sum()
    }

    /// Absolute points of one bucket.
    pub fn flatten(&self, category: Category) -> PointCloud {
        PointCloud::from_nodes(self.get(category).iter().copied())
    }

    /// Absolute points of all buckets: trunk, then branch, then leaf.
    ///
    /// Nodes present in several buckets contribute their points once per
    /// bucket.
    pub fn flatten_all(&self) -> PointCloud {
        PointCloud::from_nodes(
            Category::ALL
                .iter()
                .flat_map(|&c| self.get(c).iter().copied()),
        )
    }

    /// Absolute points for a selection.
    pub fn select(&self, selection: Selection) -> PointCloud {
        match selection {
            Selection::All => self.flatten_all(),
            Selection::Only(category) => self.flatten(category),
        }
    }
}

/// Partition `nodes` into trunk, branch and leaf buckets.
pub fn classify(nodes: &[NodeEntity], mode: ClassifyMode) -> Buckets<'_> {
    let mut buckets = Buckets::default();

    for node in nodes {
        let key = category_key(&node.name);
        for category in Category::ALL {
            if category.matches_key(&key) {
                buckets.get_mut(category).push(node);
                if mode == ClassifyMode::FirstMatch {
                    break;
                }
            }
        }
    }

    for category in Category::ALL {
        tracing::debug!(
            category = category.as_str(),
            nodes = buckets.get(category).len(),
            points = buckets.point_count(category),
            "classified"
        );
    }

    buckets
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(name: &str, points: usize) -> NodeEntity {
        let coords: Vec<f64> = (0..points).map(|i| i as f64).collect();
        NodeEntity {
            name: name.to_string(),
            id: 1.0,
            parent_id: 0.0,
            x: coords.clone(),
            y: coords.clone(),
            z: coords.clone(),
            abs_x: coords.clone(),
            abs_y: coords.clone(),
            abs_z: coords,
        }
    }

    fn names(bucket: &[&NodeEntity]) -> Vec<String> {
        bucket.iter().map(|n| n.name.clone()).collect()
    }

    #[test]
    fn test_category_key() {
        assert_eq!(category_key("BigBranch_03"), "bigbranch");
        assert_eq!(category_key("Frond"), "frond");
        assert_eq!(category_key("Leaf_Mesh_2"), "leaf");
        assert_eq!(category_key("_Trunk"), "");
        assert_eq!(category_key(""), "");
    }

    #[test]
    fn test_substring_match() {
        let nodes = vec![node("BigBranch_03", 1), node("TrunkCavity_01", 1)];
        let buckets = classify(&nodes, ClassifyMode::Independent);
        assert_eq!(names(&buckets.branch), vec!["BigBranch_03"]);
        assert_eq!(names(&buckets.trunk), vec!["TrunkCavity_01"]);
        assert!(buckets.leaf.is_empty());
    }

    #[test]
    fn test_case_insensitive() {
        let nodes = vec![node("TWIGS_1", 1), node("batchedLEAF_2", 1)];
        let buckets = classify(&nodes, ClassifyMode::Independent);
        assert_eq!(names(&buckets.branch), vec!["TWIGS_1"]);
        assert_eq!(names(&buckets.leaf), vec!["batchedLEAF_2"]);
    }

    #[test]
    fn test_only_prefix_is_matched() {
        // "leaf" after the separator does not count
        let nodes = vec![node("Mesh_Leaf", 1), node("", 1)];
        let buckets = classify(&nodes, ClassifyMode::Independent);
        assert!(buckets.trunk.is_empty());
        assert!(buckets.branch.is_empty());
        assert!(buckets.leaf.is_empty());
    }

    #[test]
    fn test_independent_allows_overlap() {
        // "branchleaf" matches both branch and leaf keywords
        let nodes = vec![node("BranchLeaf_1", 2)];
        let buckets = classify(&nodes, ClassifyMode::Independent);
        assert_eq!(buckets.branch.len(), 1);
        assert_eq!(buckets.leaf.len(), 1);
        assert_eq!(buckets.flatten_all().len(), 4);
    }

    #[test]
    fn test_first_match_is_exclusive() {
        let nodes = vec![node("BranchLeaf_1", 2), node("ShellCap_1", 3)];
        let buckets = classify(&nodes, ClassifyMode::FirstMatch);
        assert_eq!(names(&buckets.branch), vec!["BranchLeaf_1"]);
        assert_eq!(names(&buckets.trunk), vec!["ShellCap_1"]);
        assert!(buckets.leaf.is_empty());
        assert_eq!(buckets.flatten_all().len(), 5);
    }

    #[test]
    fn test_bucket_order_follows_input() {
        let nodes = vec![
            node("Branch_2", 1),
            node("Trunk_1", 1),
            node("Cap_1", 1),
            node("Little_1", 1),
        ];
        let buckets = classify(&nodes, ClassifyMode::Independent);
        assert_eq!(names(&buckets.branch), vec!["Branch_2", "Cap_1", "Little_1"]);
    }

    #[test]
    fn test_flatten_all_order() {
        let mut leaf = node("Leaf_1", 1);
        leaf.abs_x = vec![3.0];
        let mut trunk = node("Trunk_1", 1);
        trunk.abs_x = vec![1.0];
        let mut branch = node("Branch_1", 1);
        branch.abs_x = vec![2.0];

        let nodes = vec![leaf, trunk, branch];
        let buckets = classify(&nodes, ClassifyMode::Independent);
        assert_eq!(buckets.flatten_all().x, vec![1.0, 2.0, 3.0]);
        assert_eq!(buckets.select(Selection::Only(Category::Leaf)).x, vec![3.0]);
    }

    #[test]
    fn test_selection_parse() {
        assert_eq!("all".parse::<Selection>().unwrap(), Selection::All);
        assert_eq!(
            "Trunk".parse::<Selection>().unwrap(),
            Selection::Only(Category::Trunk)
        );
        assert!("roots".parse::<Selection>().is_err());
        assert_eq!(Selection::Only(Category::Leaf).to_string(), "leaf");
    }

    #[test]
    fn test_classify_mode_parse() {
        assert_eq!(
            "first-match".parse::<ClassifyMode>().unwrap(),
            ClassifyMode::FirstMatch
        );
        assert_eq!(
            "Independent".parse::<ClassifyMode>().unwrap(),
            ClassifyMode::Independent
        );
        assert!("exclusive".parse::<ClassifyMode>().is_err());
    }
}
