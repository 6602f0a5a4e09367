// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Flat point clouds and their bounds

use crate::node::NodeEntity;

/// Absolute coordinates stored as three parallel axis lists.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PointCloud {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: Vec<f64>,
}

impl PointCloud {
    pub fn new() -> Self {
        Self::default()
    }

    /// Concatenate the absolute coordinates of `nodes`, in iteration order.
    pub fn from_nodes<'a, I>(nodes: I) -> Self
    where
        I: IntoIterator<Item = &'a NodeEntity>,
    {
        let mut cloud = Self::new();
        for node in nodes {
            cloud.extend_from_node(node);
        }
        cloud
    }

    /// Append the absolute coordinates of one node.
    pub fn extend_from_node(&mut self, node: &NodeEntity) {
        self.x.extend_from_slice(&node.abs_x);
        self.y.extend_from_slice(&node.abs_y);
        self.z.extend_from_slice(&node.abs_z);
    }

    /// Number of points.
    #[inline]
    pub fn len(&self) -> usize {
        self.x.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Iterate over points as `(x, y, z)` triples.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64, f64)> + '_ {
        self.x
            .iter()
            .zip(&self.y)
            .zip(&self.z)
            .map(|((&x, &y), &z)| (x, y, z))
    }

    /// Split into the `(X, Y, Z)` axis lists.
    pub fn into_xyz(self) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
        (self.x, self.y, self.z)
    }

    /// Axis-aligned bounds, or `None` for an empty cloud.
    pub fn bounds(&self) -> Option<Bounds> {
        let mut points = self.points();
        let first = points.next()?;
        let mut bounds = Bounds::from_point(first);
        for (x, y, z) in points {
            bounds.expand(x, y, z);
        }
        Some(bounds)
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    pub min: [f64; 3],
    pub max: [f64; 3],
}

impl Bounds {
    fn from_point((x, y, z): (f64, f64, f64)) -> Self {
        Self {
            min: [x, y, z],
            max: [x, y, z],
        }
    }

    /// Expand bounds to include a point.
    #[inline]
    pub fn expand(&mut self, x: f64, y: f64, z: f64) {
        for (axis, v) in [x, y, z].into_iter().enumerate() {
            self.min[axis] = self.min[axis].min(v);
            self.max[axis] = self.max[axis].max(v);
        }
    }

    /// Size along each axis.
    pub fn extent(&self) -> [f64; 3] {
        [
            self.max[0] - self.min[0],
            self.max[1] - self.min[1],
            self.max[2] - self.min[2],
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn node(abs_x: Vec<f64>, abs_y: Vec<f64>, abs_z: Vec<f64>) -> NodeEntity {
        NodeEntity {
            name: "Trunk_1".into(),
            id: 1.0,
            parent_id: 0.0,
            x: abs_x.clone(),
            y: abs_y.clone(),
            z: abs_z.clone(),
            abs_x,
            abs_y,
            abs_z,
        }
    }

    #[test]
    fn test_from_nodes_concatenates() {
        let a = node(vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]);
        let b = node(vec![], vec![], vec![]);
        let c = node(vec![7.0], vec![8.0], vec![9.0]);

        let cloud = PointCloud::from_nodes([&a, &b, &c]);
        assert_eq!(cloud.len(), 3);
        let (x, y, z) = cloud.into_xyz();
        assert_eq!(x, vec![1.0, 2.0, 7.0]);
        assert_eq!(y, vec![3.0, 4.0, 8.0]);
        assert_eq!(z, vec![5.0, 6.0, 9.0]);
    }

    #[test]
    fn test_empty_bounds() {
        assert!(PointCloud::new().bounds().is_none());
    }

    #[test]
    fn test_bounds() {
        let a = node(vec![1.0, -2.0, 4.0], vec![0.0, 5.0, 1.0], vec![3.0, 3.0, -1.0]);
        let bounds = PointCloud::from_nodes([&a]).bounds().unwrap();
        assert_eq!(bounds.min, [-2.0, 0.0, -1.0]);
        assert_eq!(bounds.max, [4.0, 5.0, 3.0]);

        let extent = bounds.extent();
        assert_relative_eq!(extent[0], 6.0);
        assert_relative_eq!(extent[1], 5.0);
        assert_relative_eq!(extent[2], 4.0);
    }
}
