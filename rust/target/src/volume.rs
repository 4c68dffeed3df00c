// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Logical volumes and their placements.
//!
//! A logical volume is placed by one or more placements. A placement lives
//! inside a mother *logical* volume and is appended to the mother's daughter
//! list when created, so every instance of the mother shares the same
//! daughters.

use nalgebra::{Rotation3, Vector3};

use crate::error::{Error, Result};
use crate::keys::*;
use crate::stores::TargetStores;

/// A solid filled with a material, holding its daughter placements.
#[derive(Debug, Clone, PartialEq)]
pub struct LogicalVolumeData {
    pub name: String,
    pub solid: SolidKey,
    pub material: MaterialKey,
    pub daughters: Vec<PlacementKey>,
}

/// A logical volume positioned inside a mother logical volume.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementData {
    pub name: String,
    pub logical: LogicalVolumeKey,
    /// `None` for the world placement.
    pub mother: Option<LogicalVolumeKey>,
    /// `None` means no rotation.
    pub rotation: Option<RotationKey>,
    /// Translation in internal length units.
    pub translation: Vector3<f64>,
    pub many: bool,
    pub copy_number: i32,
}

impl TargetStores {
    /// Creates a logical volume from an existing solid and material.
    pub fn add_logical_volume(
        &mut self,
        solid: SolidKey,
        material: MaterialKey,
        name: impl Into<String>,
    ) -> Result<LogicalVolumeKey> {
        if !self.solids.contains_key(solid) {
            return Err(Error::SolidNotFound(solid));
        }
        if !self.materials.contains_key(material) {
            return Err(Error::MaterialNotFound(material));
        }
        Ok(self.logical_volumes.insert(LogicalVolumeData {
            name: name.into(),
            solid,
            material,
            daughters: Vec::new(),
        }))
    }

    /// Places `logical` inside `mother` and registers it as a daughter.
    #[allow(clippy::too_many_arguments)]
    pub fn add_placement(
        &mut self,
        rotation: Option<RotationKey>,
        translation: Vector3<f64>,
        logical: LogicalVolumeKey,
        name: impl Into<String>,
        mother: Option<LogicalVolumeKey>,
        many: bool,
        copy_number: i32,
    ) -> Result<PlacementKey> {
        if let Some(r) = rotation {
            if !self.rotations.contains_key(r) {
                return Err(Error::RotationNotFound(r));
            }
        }
        if !self.logical_volumes.contains_key(logical) {
            return Err(Error::LogicalVolumeNotFound(logical));
        }
        if let Some(m) = mother {
            if !self.logical_volumes.contains_key(m) {
                return Err(Error::LogicalVolumeNotFound(m));
            }
        }

        let key = self.placements.insert(PlacementData {
            name: name.into(),
            logical,
            mother,
            rotation,
            translation,
            many,
            copy_number,
        });
        if let Some(m) = mother {
            self.logical_volumes[m].daughters.push(key);
        }
        Ok(key)
    }

    pub fn logical_volume(&self, key: LogicalVolumeKey) -> Option<&LogicalVolumeData> {
        self.logical_volumes.get(key)
    }

    pub fn placement(&self, key: PlacementKey) -> Option<&PlacementData> {
        self.placements.get(key)
    }

    /// Rotation of a placement, `None` if it has none.
    pub fn placement_rotation(&self, key: PlacementKey) -> Option<&Rotation3<f64>> {
        let rotation = self.placements.get(key)?.rotation?;
        self.rotations.get(rotation)
    }

    /// Daughter placements of a logical volume, in creation order.
    pub fn daughters(&self, key: LogicalVolumeKey) -> &[PlacementKey] {
        self.logical_volumes
            .get(key)
            .map(|lv| lv.daughters.as_slice())
            .unwrap_or_default()
    }

    /// Iterates all placements.
    pub fn placements(&self) -> impl Iterator<Item = (PlacementKey, &PlacementData)> + '_ {
        self.placements.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::MaterialState;
    use crate::solid::{Inside, Solid};
    use crate::units::*;
    use nalgebra::Point3;

    #[derive(Debug)]
    struct Point;

    impl Solid for Point {
        fn name(&self) -> &str {
            "point"
        }
        fn inside(&self, _p: &Point3<f64>) -> Inside {
            Inside::Outside
        }
        fn surface_normal(&self, _p: &Point3<f64>) -> Vector3<f64> {
            Vector3::x()
        }
        fn distance_to_in_along(&self, _p: &Point3<f64>, _v: &Vector3<f64>) -> f64 {
            INFINITY
        }
        fn distance_to_in(&self, _p: &Point3<f64>) -> f64 {
            0.0
        }
        fn distance_to_out_along(&self, _p: &Point3<f64>, _v: &Vector3<f64>) -> f64 {
            0.0
        }
        fn distance_to_out(&self, _p: &Point3<f64>) -> f64 {
            0.0
        }
        fn extent(&self) -> (Point3<f64>, Point3<f64>) {
            (Point3::origin(), Point3::origin())
        }
    }

    fn stores_with_volume() -> (TargetStores, LogicalVolumeKey) {
        let mut stores = TargetStores::new();
        let mat = stores.add_simple_material(
            "Air",
            7.0,
            14.0 * G_PER_MOLE,
            1.2e-3 * G_PER_CM3,
            MaterialState::Gas,
            STP_TEMPERATURE,
            STP_PRESSURE,
        );
        let solid = stores.add_solid(Box::new(Point));
        let lv = stores.add_logical_volume(solid, mat, "World").unwrap();
        (stores, lv)
    }

    #[test]
    fn placement_registers_as_daughter() {
        let (mut stores, world) = stores_with_volume();
        let top = stores
            .add_placement(None, Vector3::zeros(), world, "World", None, false, 0)
            .unwrap();
        let a = stores
            .add_placement(None, Vector3::new(10.0, 0.0, 0.0), world, "A", Some(world), false, 1)
            .unwrap();
        let b = stores
            .add_placement(None, Vector3::new(-10.0, 0.0, 0.0), world, "B", Some(world), false, 2)
            .unwrap();

        assert_eq!(stores.daughters(world), &[a, b]);
        assert!(stores.placement(top).unwrap().mother.is_none());
        assert!(stores.placement_rotation(a).is_none());
        assert_eq!(stores.placements().count(), 3);
    }

    #[test]
    fn placement_rejects_unknown_references() {
        let (mut stores, world) = stores_with_volume();
        let rot = stores.add_rotation(Rotation3::identity());
        stores.rotations.remove(rot);

        let err = stores
            .add_placement(Some(rot), Vector3::zeros(), world, "X", None, false, 0)
            .unwrap_err();
        assert!(matches!(err, Error::RotationNotFound(_)));
        assert!(stores.daughters(world).is_empty());
    }
}
