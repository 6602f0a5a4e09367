// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-key node statistics.
//!
//! Useful for discovering which name prefixes an exporter produced before
//! deciding whether the keyword sets cover them.

use rustc_hash::FxHashMap;

use crate::classify::{category_key, Category};
use crate::node::NodeEntity;

/// Statistics for one category key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CategoryStats {
    /// Number of nodes with this key.
    pub count: usize,
    /// Sum of their point counts.
    pub total_points: usize,
}

/// Statistics per category key, in order of first appearance.
#[derive(Debug, Clone, Default)]
pub struct CategorySummary {
    entries: Vec<(String, CategoryStats)>,
    index: FxHashMap<String, usize>,
}

impl CategorySummary {
    /// Record one node under `key`.
    pub fn add(&mut self, key: String, points: usize) {
        let slot = match self.index.get(&key) {
            Some(&slot) => slot,
            None => {
                let slot = self.entries.len();
                self.index.insert(key.clone(), slot);
                self.entries.push((key, CategoryStats::default()));
                slot
            }
        };
        let stats = &mut self.entries[slot].1;
        stats.count += 1;
        stats.total_points += points;
    }

    /// Statistics for `key`, if any node had it.
    pub fn get(&self, key: &str) -> Option<&CategoryStats> {
        self.index.get(key).map(|&slot| &self.entries[slot].1)
    }

    /// Iterate over `(key, stats)` in order of first appearance.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CategoryStats)> {
        self.entries.iter().map(|(k, s)| (k.as_str(), s))
    }

    /// Keys that no category's keywords match.
    pub fn unclassified(&self) -> impl Iterator<Item = &str> {
        self.iter()
            .map(|(key, _)| key)
            .filter(|key| !Category::ALL.iter().any(|c| c.matches_key(key)))
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Count nodes and points per category key in a single pass.
pub fn summarize(nodes: &[NodeEntity]) -> CategorySummary {
    let mut summary = CategorySummary::default();
    for node in nodes {
        summary.add(category_key(&node.name), node.point_count());
    }
    for (key, stats) in summary.iter() {
        tracing::debug!(
            key,
            count = stats.count,
            total_points = stats.total_points,
            "category key"
        );
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(name: &str, points: usize) -> NodeEntity {
        let coords = vec![0.0; points];
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

    #[test]
    fn test_summarize_counts_and_order() {
        let nodes = vec![
            node("Trunk_1", 10),
            node("Frond_1", 4),
            node("trunk_2", 5),
            node("Mesh_1", 0),
        ];
        let summary = summarize(&nodes);

        let keys: Vec<_> = summary.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["trunk", "frond", "mesh"]);
        assert_eq!(
            summary.get("trunk"),
            Some(&CategoryStats {
                count: 2,
                total_points: 15
            })
        );
        assert_eq!(summary.get("frond").unwrap().total_points, 4);
        assert!(summary.get("leaf").is_none());
        assert_eq!(summary.len(), 3);
    }

    #[test]
    fn test_unclassified_keys() {
        let nodes = vec![node("Trunk_1", 1), node("Mesh_1", 1), node("Collision_1", 1)];
        let summary = summarize(&nodes);
        let keys: Vec<_> = summary.unclassified().collect();
        assert_eq!(keys, vec!["mesh", "collision"]);
    }

    #[test]
    fn test_empty() {
        assert!(summarize(&[]).is_empty());
    }
}
