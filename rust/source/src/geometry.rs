// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The source geometry arena.
//!
//! [`SourceGeometry`] owns every node, volume, shape, medium, material and
//! element of a detector description. Materials and volumes also keep their
//! insertion order, because consumers rely on "the first material of the
//! list" and on stable iteration.
//!
//! Building a hierarchy:
//!
//! ```
//! use geobridge_source::{BoxShape, MaterialData, SourceGeometry, Transform};
//!
//! let mut geo = SourceGeometry::new("demo");
//! let air = geo.add_material(MaterialData::element("Air", 7.3, 14.6, 1.2e-3)).unwrap();
//! let med = geo.add_medium("Air", air).unwrap();
//! let world_box = geo.add_shape(BoxShape::new("world", 100.0, 100.0, 100.0)).unwrap();
//! let world = geo.add_volume("World", world_box, med).unwrap();
//! let cell_box = geo.add_shape(BoxShape::new("cell", 1.0, 1.0, 1.0)).unwrap();
//! let cell = geo.add_volume("Cell", cell_box, med).unwrap();
//! geo.add_node(world, cell, 1, Transform::translation(10.0, 0.0, 0.0)).unwrap();
//! geo.set_top_volume(world).unwrap();
//! geo.close_geometry().unwrap();
//!
//! assert_eq!(geo.node_count(), 2);
//! ```

use std::sync::Arc;

use rustc_hash::FxHashMap;
use slotmap::SlotMap;

use crate::element_table::ElementTable;
use crate::error::{Error, Result};
use crate::keys::*;
use crate::material::{Composition, ElementData, MaterialData};
use crate::shape::Shape;
use crate::transform::Transform;

/// One positioned instance of a volume.
#[derive(Debug, Clone)]
pub struct NodeData {
    /// The volume this node instantiates.
    pub volume: VolumeKey,
    /// The volume this node is placed in. `None` only for the top node.
    pub mother_volume: Option<VolumeKey>,
    pub transform: Transform,
    pub copy_number: i32,
}

/// A volume: a shape filled with a medium, owning its daughter nodes.
#[derive(Debug, Clone)]
pub struct VolumeData {
    pub name: String,
    pub shape: ShapeKey,
    /// `None` for assemblies and for bare volumes not yet given a medium.
    pub medium: Option<MediumKey>,
    pub assembly: bool,
    pub daughters: Vec<NodeKey>,
}

impl VolumeData {
    /// Assemblies group daughters and have no material of their own.
    pub fn is_assembly(&self) -> bool {
        self.assembly
    }
}

/// A tracking medium referencing a material.
#[derive(Debug, Clone)]
pub struct MediumData {
    pub name: String,
    pub material: MaterialKey,
}

/// Arena owning a complete source geometry.
#[derive(Debug)]
pub struct SourceGeometry {
    name: String,
    nodes: SlotMap<NodeKey, NodeData>,
    volumes: SlotMap<VolumeKey, VolumeData>,
    volume_order: Vec<VolumeKey>,
    shapes: SlotMap<ShapeKey, Arc<dyn Shape>>,
    media: SlotMap<MediumKey, MediumData>,
    materials: SlotMap<MaterialKey, MaterialData>,
    material_order: Vec<MaterialKey>,
    elements: SlotMap<ElementKey, ElementData>,
    element_table: ElementTable,
    top_node: Option<NodeKey>,
    closed: bool,
}

impl SourceGeometry {
    /// Creates an empty, open geometry using the standard element table.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nodes: SlotMap::with_key(),
            volumes: SlotMap::with_key(),
            volume_order: Vec::new(),
            shapes: SlotMap::with_key(),
            media: SlotMap::with_key(),
            materials: SlotMap::with_key(),
            material_order: Vec::new(),
            elements: SlotMap::with_key(),
            element_table: ElementTable::standard(),
            top_node: None,
            closed: false,
        }
    }

    /// Replaces the canonical element table.
    pub fn with_element_table(mut self, table: ElementTable) -> Self {
        self.element_table = table;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn ensure_open(&self, what: &'static str) -> Result<()> {
        if self.closed {
            return Err(Error::GeometryClosed(what));
        }
        Ok(())
    }

    // --- Elements and materials ---

    /// Adds a user-defined element.
    pub fn add_element(&mut self, element: ElementData) -> Result<ElementKey> {
        self.ensure_open("add element")?;
        Ok(self.elements.insert(element))
    }

    /// Adds a material, checking that every referenced element exists.
    pub fn add_material(&mut self, material: MaterialData) -> Result<MaterialKey> {
        self.ensure_open("add material")?;
        match &material.composition {
            Composition::Element {
                element: Some(ek), ..
            } => {
                if !self.elements.contains_key(*ek) {
                    return Err(Error::ElementNotFound(*ek));
                }
            }
            Composition::Element { element: None, .. } => {}
            Composition::Mixture(components) => {
                if components.is_empty() {
                    return Err(Error::EmptyMixture(material.name.clone()));
                }
                if let Some(c) = components
                    .iter()
                    .find(|c| !self.elements.contains_key(c.element))
                {
                    return Err(Error::ElementNotFound(c.element));
                }
            }
        }
        let key = self.materials.insert(material);
        self.material_order.push(key);
        Ok(key)
    }

    /// Adds a tracking medium for an existing material.
    pub fn add_medium(&mut self, name: impl Into<String>, material: MaterialKey) -> Result<MediumKey> {
        self.ensure_open("add medium")?;
        if !self.materials.contains_key(material) {
            return Err(Error::MaterialNotFound(material));
        }
        Ok(self.media.insert(MediumData {
            name: name.into(),
            material,
        }))
    }

    pub fn element(&self, key: ElementKey) -> Option<&ElementData> {
        self.elements.get(key)
    }

    pub fn material(&self, key: MaterialKey) -> Option<&MaterialData> {
        self.materials.get(key)
    }

    pub fn medium(&self, key: MediumKey) -> Option<&MediumData> {
        self.media.get(key)
    }

    /// Iterates materials in insertion order.
    pub fn materials(&self) -> impl Iterator<Item = (MaterialKey, &MaterialData)> + '_ {
        self.material_order
            .iter()
            .filter_map(|&k| self.materials.get(k).map(|m| (k, m)))
    }

    /// Returns the first material of the material list.
    pub fn first_material(&self) -> Option<MaterialKey> {
        self.material_order.first().copied()
    }

    pub fn material_count(&self) -> usize {
        self.material_order.len()
    }

    /// Effective atomic number of a material.
    ///
    /// For a mixture this is the mass-fraction weighted mean of the
    /// components' Z.
    pub fn material_z(&self, key: MaterialKey) -> Option<f64> {
        let material = self.materials.get(key)?;
        match &material.composition {
            Composition::Element { z, .. } => Some(*z),
            Composition::Mixture(components) => {
                let total: f64 = components.iter().map(|c| c.weight).sum();
                if total <= 0.0 {
                    return Some(0.0);
                }
                let weighted: f64 = components
                    .iter()
                    .filter_map(|c| self.elements.get(c.element).map(|e| e.z as f64 * c.weight))
                    .sum();
                Some(weighted / total)
            }
        }
    }

    pub fn element_table(&self) -> &ElementTable {
        &self.element_table
    }

    // --- Shapes and volumes ---

    /// Adds a shape.
    pub fn add_shape(&mut self, shape: impl Shape + 'static) -> Result<ShapeKey> {
        self.ensure_open("add shape")?;
        Ok(self.shapes.insert(Arc::new(shape)))
    }

    pub fn shape(&self, key: ShapeKey) -> Option<&Arc<dyn Shape>> {
        self.shapes.get(key)
    }

    /// Adds a volume filled with `medium`.
    pub fn add_volume(&mut self, name: impl Into<String>, shape: ShapeKey, medium: MediumKey) -> Result<VolumeKey> {
        if !self.media.contains_key(medium) {
            return Err(Error::MediumNotFound(medium));
        }
        self.insert_volume(name.into(), shape, Some(medium), false)
    }

    /// Adds an assembly: a grouping volume without a medium.
    pub fn add_assembly(&mut self, name: impl Into<String>, shape: ShapeKey) -> Result<VolumeKey> {
        self.insert_volume(name.into(), shape, None, true)
    }

    /// Adds a volume that is not an assembly but has no medium either.
    ///
    /// It can be placed like any other volume; converting it fails because
    /// it has no material.
    pub fn add_bare_volume(&mut self, name: impl Into<String>, shape: ShapeKey) -> Result<VolumeKey> {
        self.insert_volume(name.into(), shape, None, false)
    }

    fn insert_volume(
        &mut self,
        name: String,
        shape: ShapeKey,
        medium: Option<MediumKey>,
        assembly: bool,
    ) -> Result<VolumeKey> {
        self.ensure_open("add volume")?;
        if !self.shapes.contains_key(shape) {
            return Err(Error::ShapeNotFound(shape));
        }
        let key = self.volumes.insert(VolumeData {
            name,
            shape,
            medium,
            assembly,
            daughters: Vec::new(),
        });
        self.volume_order.push(key);
        Ok(key)
    }

    pub fn volume(&self, key: VolumeKey) -> Option<&VolumeData> {
        self.volumes.get(key)
    }

    /// Iterates volumes in insertion order.
    pub fn volumes(&self) -> impl Iterator<Item = (VolumeKey, &VolumeData)> + '_ {
        self.volume_order
            .iter()
            .filter_map(|&k| self.volumes.get(k).map(|v| (k, v)))
    }

    pub fn volume_count(&self) -> usize {
        self.volume_order.len()
    }

    /// Material of a volume's medium. `None` for assemblies and bare volumes.
    pub fn volume_material(&self, key: VolumeKey) -> Option<MaterialKey> {
        let medium = self.volumes.get(key)?.medium?;
        self.media.get(medium).map(|m| m.material)
    }

    // --- Nodes ---

    /// Places `volume` inside `mother` and returns the new node.
    pub fn add_node(
        &mut self,
        mother: VolumeKey,
        volume: VolumeKey,
        copy_number: i32,
        transform: Transform,
    ) -> Result<NodeKey> {
        self.ensure_open("add node")?;
        if !self.volumes.contains_key(volume) {
            return Err(Error::VolumeNotFound(volume));
        }
        if !self.volumes.contains_key(mother) {
            return Err(Error::VolumeNotFound(mother));
        }
        if mother == volume {
            return Err(Error::SelfPlacement(self.volumes[volume].name.clone()));
        }

        let key = self.nodes.insert(NodeData {
            volume,
            mother_volume: Some(mother),
            transform,
            copy_number,
        });
        self.volumes[mother].daughters.push(key);
        Ok(key)
    }

    /// Makes `volume` the top of the hierarchy, creating the top node.
    pub fn set_top_volume(&mut self, volume: VolumeKey) -> Result<NodeKey> {
        self.ensure_open("set top volume")?;
        if self.top_node.is_some() {
            return Err(Error::TopAlreadySet);
        }
        if !self.volumes.contains_key(volume) {
            return Err(Error::VolumeNotFound(volume));
        }
        let key = self.nodes.insert(NodeData {
            volume,
            mother_volume: None,
            transform: Transform::identity(),
            copy_number: 1,
        });
        self.top_node = Some(key);
        Ok(key)
    }

    pub fn node(&self, key: NodeKey) -> Option<&NodeData> {
        self.nodes.get(key)
    }

    /// Node name: `<volume name>_<copy number>`.
    pub fn node_name(&self, key: NodeKey) -> Option<String> {
        let node = self.nodes.get(key)?;
        let volume = self.volumes.get(node.volume)?;
        Some(format!("{}_{}", volume.name, node.copy_number))
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn top_node(&self) -> Option<NodeKey> {
        self.top_node
    }

    pub fn top_volume(&self) -> Option<VolumeKey> {
        self.top_node
            .and_then(|k| self.nodes.get(k))
            .map(|n| n.volume)
    }

    /// Rewrites a node's mother-volume reference.
    ///
    /// Allowed on a closed geometry: it does not change the daughter lists,
    /// only the back link stored on the node.
    pub fn set_mother_volume(&mut self, node: NodeKey, mother: Option<VolumeKey>) -> Result<()> {
        if let Some(m) = mother {
            if !self.volumes.contains_key(m) {
                return Err(Error::VolumeNotFound(m));
            }
        }
        let data = self.nodes.get_mut(node).ok_or(Error::NodeNotFound(node))?;
        data.mother_volume = mother;
        Ok(())
    }

    // --- Closing ---

    /// Freezes the hierarchy.
    ///
    /// Requires a top node, and the volumes reachable from it must form an
    /// acyclic graph: no volume may contain itself at any depth.
    pub fn close_geometry(&mut self) -> Result<()> {
        let top = self.top_volume().ok_or(Error::MissingTopNode)?;
        if let Some(volume) = self.find_cycle(top) {
            return Err(Error::CyclicHierarchy(self.volumes[volume].name.clone()));
        }
        self.closed = true;
        Ok(())
    }

    /// First volume found inside itself below `root`, if any.
    fn find_cycle(&self, root: VolumeKey) -> Option<VolumeKey> {
        // `false` while a volume is on the current path, `true` once done.
        let mut finished: FxHashMap<VolumeKey, bool> = FxHashMap::default();
        let mut stack: Vec<(VolumeKey, usize)> = vec![(root, 0)];
        finished.insert(root, false);

        while let Some(frame) = stack.last_mut() {
            let (volume, index) = *frame;
            let Some(&node) = self.volumes.get(volume).and_then(|v| v.daughters.get(index)) else {
                finished.insert(volume, true);
                stack.pop();
                continue;
            };
            frame.1 += 1;

            let Some(child) = self.nodes.get(node).map(|n| n.volume) else {
                continue;
            };
            match finished.get(&child) {
                Some(false) => return Some(child),
                Some(true) => {}
                None => {
                    finished.insert(child, false);
                    stack.push((child, 0));
                }
            }
        }
        None
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::{MixtureComponent, MaterialState};
    use crate::shape::BoxShape;
    use approx::assert_relative_eq;

    fn world_with_medium(geo: &mut SourceGeometry) -> (VolumeKey, MediumKey) {
        let air = geo
            .add_material(MaterialData::element("Air", 7.3, 14.6, 1.2e-3).with_state(MaterialState::Gas))
            .unwrap();
        let medium = geo.add_medium("Air", air).unwrap();
        let shape = geo.add_shape(BoxShape::new("world", 10.0, 10.0, 10.0)).unwrap();
        (geo.add_volume("World", shape, medium).unwrap(), medium)
    }

    #[test]
    fn add_node_links_mother_and_daughters() {
        let mut geo = SourceGeometry::new("test");
        let (world, medium) = world_with_medium(&mut geo);
        let shape = geo.add_shape(BoxShape::new("b", 1.0, 1.0, 1.0)).unwrap();
        let child = geo.add_volume("Child", shape, medium).unwrap();

        let n1 = geo.add_node(world, child, 1, Transform::identity()).unwrap();
        let n2 = geo.add_node(world, child, 2, Transform::translation(3.0, 0.0, 0.0)).unwrap();

        assert_eq!(geo.volume(world).unwrap().daughters, vec![n1, n2]);
        assert_eq!(geo.node(n2).unwrap().mother_volume, Some(world));
        assert_eq!(geo.node_name(n2).unwrap(), "Child_2");
    }

    #[test]
    fn close_requires_top_node() {
        let mut geo = SourceGeometry::new("test");
        assert!(matches!(geo.close_geometry(), Err(Error::MissingTopNode)));

        let (world, _) = world_with_medium(&mut geo);
        let top = geo.set_top_volume(world).unwrap();
        geo.close_geometry().unwrap();

        assert!(geo.is_closed());
        assert_eq!(geo.top_node(), Some(top));
        assert_eq!(geo.top_volume(), Some(world));
        assert!(geo.node(top).unwrap().mother_volume.is_none());
    }

    #[test]
    fn closed_geometry_rejects_structural_changes() {
        let mut geo = SourceGeometry::new("test");
        let (world, _) = world_with_medium(&mut geo);
        let top = geo.set_top_volume(world).unwrap();
        geo.close_geometry().unwrap();

        let err = geo.add_shape(BoxShape::new("late", 1.0, 1.0, 1.0)).unwrap_err();
        assert!(matches!(err, Error::GeometryClosed(_)));
        // The mother link can still be rewritten.
        geo.set_mother_volume(top, None).unwrap();
    }

    #[test]
    fn materials_keep_insertion_order() {
        let mut geo = SourceGeometry::new("test");
        let a = geo.add_material(MaterialData::element("A", 1.0, 1.0, 1.0)).unwrap();
        let b = geo.add_material(MaterialData::element("B", 2.0, 4.0, 1.0)).unwrap();
        let keys: Vec<_> = geo.materials().map(|(k, _)| k).collect();
        assert_eq!(keys, vec![a, b]);
        assert_eq!(geo.first_material(), Some(a));
    }

    #[test]
    fn mixture_requires_known_elements() {
        let mut geo = SourceGeometry::new("test");
        assert!(matches!(
            geo.add_material(MaterialData::mixture("Empty", 1.0, vec![])),
            Err(Error::EmptyMixture(_))
        ));

        let h = geo.add_element(ElementData::new("H", "Hydrogen", 1, 1.008)).unwrap();
        let o = geo.add_element(ElementData::new("O", "Oxygen", 8, 16.0)).unwrap();
        let water = geo
            .add_material(MaterialData::mixture(
                "Water",
                1.0,
                vec![
                    MixtureComponent { element: h, weight: 0.112 },
                    MixtureComponent { element: o, weight: 0.888 },
                ],
            ))
            .unwrap();
        assert_relative_eq!(geo.material_z(water).unwrap(), 0.112 + 8.0 * 0.888, epsilon = 1e-12);
    }

    #[test]
    fn assembly_has_no_material() {
        let mut geo = SourceGeometry::new("test");
        let (world, _) = world_with_medium(&mut geo);
        let shape = geo.add_shape(BoxShape::new("asm", 5.0, 5.0, 5.0)).unwrap();
        let asm = geo.add_assembly("Assembly", shape).unwrap();

        assert!(geo.volume(asm).unwrap().is_assembly());
        assert!(geo.volume_material(asm).is_none());
        assert!(geo.volume_material(world).is_some());
        assert_eq!(geo.volume_count(), 2);
    }

    #[test]
    fn bare_volume_is_not_an_assembly() {
        let mut geo = SourceGeometry::new("test");
        let (world, _) = world_with_medium(&mut geo);
        let shape = geo.add_shape(BoxShape::new("bare", 1.0, 1.0, 1.0)).unwrap();
        let bare = geo.add_bare_volume("Bare", shape).unwrap();

        assert!(!geo.volume(bare).unwrap().is_assembly());
        assert!(geo.volume_material(bare).is_none());
        assert_eq!(geo.material_count(), 1);

        let names: Vec<_> = geo.volumes().map(|(_, v)| v.name.as_str()).collect();
        assert_eq!(names, vec!["World", "Bare"]);
        let keys: Vec<_> = geo.volumes().map(|(k, _)| k).collect();
        assert_eq!(keys, vec![world, bare]);
    }

    #[test]
    fn volume_cannot_be_placed_inside_itself() {
        let mut geo = SourceGeometry::new("test");
        let (world, _) = world_with_medium(&mut geo);

        let err = geo.add_node(world, world, 2, Transform::identity()).unwrap_err();
        assert!(matches!(err, Error::SelfPlacement(ref name) if name == "World"));
        assert!(geo.volume(world).unwrap().daughters.is_empty());
        assert_eq!(geo.node_count(), 0);
    }

    #[test]
    fn close_rejects_cyclic_hierarchy() {
        let mut geo = SourceGeometry::new("test");
        let (world, medium) = world_with_medium(&mut geo);
        let shape = geo.add_shape(BoxShape::new("b", 1.0, 1.0, 1.0)).unwrap();
        let a = geo.add_volume("A", shape, medium).unwrap();
        let b = geo.add_volume("B", shape, medium).unwrap();
        geo.add_node(world, a, 1, Transform::identity()).unwrap();
        geo.add_node(a, b, 1, Transform::identity()).unwrap();
        geo.add_node(b, a, 2, Transform::identity()).unwrap();
        geo.set_top_volume(world).unwrap();

        let err = geo.close_geometry().unwrap_err();
        assert!(matches!(err, Error::CyclicHierarchy(ref name) if name == "A"));
        assert!(!geo.is_closed());
    }

    #[test]
    fn close_accepts_shared_volumes() {
        let mut geo = SourceGeometry::new("test");
        let (world, medium) = world_with_medium(&mut geo);
        let shape = geo.add_shape(BoxShape::new("b", 1.0, 1.0, 1.0)).unwrap();
        let a = geo.add_volume("A", shape, medium).unwrap();
        let b = geo.add_volume("B", shape, medium).unwrap();
        let cell = geo.add_volume("Cell", shape, medium).unwrap();
        geo.add_node(world, a, 1, Transform::identity()).unwrap();
        geo.add_node(world, b, 1, Transform::identity()).unwrap();
        geo.add_node(a, cell, 1, Transform::identity()).unwrap();
        geo.add_node(b, cell, 1, Transform::identity()).unwrap();
        geo.set_top_volume(world).unwrap();

        geo.close_geometry().unwrap();
        assert!(geo.is_closed());
    }
}
