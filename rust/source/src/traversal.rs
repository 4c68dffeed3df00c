// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Depth-first walk over the node hierarchy.
//!
//! The walk starts below the top node and visits parents before children,
//! daughters in insertion order. Because daughters belong to volumes, a node
//! whose mother volume is placed several times is visited once per path.
//!
//! The walk has no depth limit. A closed geometry is acyclic (see
//! [`SourceGeometry::close_geometry`]), so it always terminates there.

use crate::geometry::SourceGeometry;
use crate::keys::NodeKey;

/// One step of the walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Visit {
    pub node: NodeKey,
    /// The node whose volume holds `node` on the current path.
    pub parent: NodeKey,
    /// 1 for daughters of the top node.
    pub depth: usize,
}

/// Iterator returned by [`SourceGeometry::walk`].
pub struct DepthFirst<'a> {
    geometry: &'a SourceGeometry,
    stack: Vec<Visit>,
}

impl<'a> DepthFirst<'a> {
    fn push_daughters(&mut self, parent: NodeKey, depth: usize) {
        let geometry = self.geometry;
        let daughters = geometry
            .node(parent)
            .and_then(|n| geometry.volume(n.volume))
            .map(|v| v.daughters.as_slice())
            .unwrap_or_default();
        // Reverse so the first daughter is popped first.
        for &node in daughters.iter().rev() {
            self.stack.push(Visit { node, parent, depth });
        }
    }
}

impl Iterator for DepthFirst<'_> {
    type Item = Visit;

    fn next(&mut self) -> Option<Visit> {
        let visit = self.stack.pop()?;
        self.push_daughters(visit.node, visit.depth + 1);
        Some(visit)
    }
}

impl SourceGeometry {
    /// Walks every node below the top node, depth first.
    pub fn walk(&self) -> DepthFirst<'_> {
        let mut iter = DepthFirst {
            geometry: self,
            stack: Vec::new(),
        };
        if let Some(top) = self.top_node() {
            iter.push_daughters(top, 1);
        }
        iter
    }
}

#[cfg(test)]
mod tests {
    use crate::geometry::SourceGeometry;
    use crate::material::MaterialData;
    use crate::shape::BoxShape;
    use crate::transform::Transform;

    #[test]
    fn walk_is_depth_first_in_insertion_order() {
        let mut geo = SourceGeometry::new("walk");
        let mat = geo.add_material(MaterialData::element("Fe", 26.0, 55.845, 7.87)).unwrap();
        let med = geo.add_medium("Fe", mat).unwrap();
        let shape = geo.add_shape(BoxShape::new("b", 1.0, 1.0, 1.0)).unwrap();
        let world = geo.add_volume("World", shape, med).unwrap();
        let a = geo.add_volume("A", shape, med).unwrap();
        let b = geo.add_volume("B", shape, med).unwrap();
        let leaf = geo.add_volume("Leaf", shape, med).unwrap();

        let na = geo.add_node(world, a, 1, Transform::identity()).unwrap();
        let nb = geo.add_node(world, b, 1, Transform::identity()).unwrap();
        let nleaf = geo.add_node(a, leaf, 1, Transform::identity()).unwrap();
        let top = geo.set_top_volume(world).unwrap();

        let visits: Vec<_> = geo.walk().map(|v| (v.node, v.parent, v.depth)).collect();
        assert_eq!(visits, vec![(na, top, 1), (nleaf, na, 2), (nb, top, 1)]);
    }

    #[test]
    fn shared_volume_daughters_are_visited_per_path() {
        let mut geo = SourceGeometry::new("walk");
        let mat = geo.add_material(MaterialData::element("Fe", 26.0, 55.845, 7.87)).unwrap();
        let med = geo.add_medium("Fe", mat).unwrap();
        let shape = geo.add_shape(BoxShape::new("b", 1.0, 1.0, 1.0)).unwrap();
        let world = geo.add_volume("World", shape, med).unwrap();
        let module = geo.add_volume("Module", shape, med).unwrap();
        let cell = geo.add_volume("Cell", shape, med).unwrap();

        geo.add_node(world, module, 1, Transform::identity()).unwrap();
        geo.add_node(world, module, 2, Transform::identity()).unwrap();
        let ncell = geo.add_node(module, cell, 1, Transform::identity()).unwrap();
        geo.set_top_volume(world).unwrap();

        let cell_visits = geo.walk().filter(|v| v.node == ncell).count();
        assert_eq!(cell_visits, 2);
        assert_eq!(geo.node_count(), 4);
    }

    #[test]
    fn deep_chain_is_walked_to_the_bottom() {
        let mut geo = SourceGeometry::new("chain");
        let mat = geo.add_material(MaterialData::element("Fe", 26.0, 55.845, 7.87)).unwrap();
        let med = geo.add_medium("Fe", mat).unwrap();
        let shape = geo.add_shape(BoxShape::new("b", 1.0, 1.0, 1.0)).unwrap();

        let world = geo.add_volume("Level_0", shape, med).unwrap();
        let mut mother = world;
        for level in 1..200 {
            let volume = geo.add_volume(format!("Level_{level}"), shape, med).unwrap();
            geo.add_node(mother, volume, 1, Transform::identity()).unwrap();
            mother = volume;
        }
        geo.set_top_volume(world).unwrap();
        geo.close_geometry().unwrap();

        let visits: Vec<_> = geo.walk().collect();
        assert_eq!(visits.len(), 199);
        assert_eq!(visits.last().unwrap().depth, 199);
        assert_eq!(visits.len() + 1, geo.node_count());
    }

    #[test]
    fn walk_without_top_is_empty() {
        let geo = SourceGeometry::new("empty");
        assert_eq!(geo.walk().count(), 0);
    }
}
