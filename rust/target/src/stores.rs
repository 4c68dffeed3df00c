// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Registries owning every target entity.
//!
//! [`TargetStores`] groups the isotope, element, material, rotation, solid,
//! logical-volume and placement registries. Entities reference each other
//! through keys, so the stores can be released registry by registry without
//! dangling pointers.

use nalgebra::Rotation3;
use rustc_hash::FxHashMap;
use slotmap::SlotMap;

use crate::element::{ElementData, IsotopeData};
use crate::keys::*;
use crate::material::MaterialData;
use crate::solid::Solid;
use crate::volume::{LogicalVolumeData, PlacementData};

/// One registry of [`TargetStores`], in teardown order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Registry {
    Materials,
    Elements,
    Isotopes,
    Rotations,
    Placements,
    LogicalVolumes,
    Solids,
}

impl Registry {
    /// Teardown order: materials, elements (with their isotopes), rotations,
    /// volumes, solids.
    pub const TEARDOWN_ORDER: [Registry; 7] = [
        Registry::Materials,
        Registry::Elements,
        Registry::Isotopes,
        Registry::Rotations,
        Registry::Placements,
        Registry::LogicalVolumes,
        Registry::Solids,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Registry::Materials => "materials",
            Registry::Elements => "elements",
            Registry::Isotopes => "isotopes",
            Registry::Rotations => "rotations",
            Registry::Placements => "placements",
            Registry::LogicalVolumes => "logical volumes",
            Registry::Solids => "solids",
        }
    }
}

/// Entries released by [`TargetStores::teardown`], in release order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeardownReport {
    pub released: Vec<(Registry, usize)>,
}

impl TeardownReport {
    /// Number of entries released from `registry`.
    pub fn count(&self, registry: Registry) -> usize {
        self.released
            .iter()
            .find(|(r, _)| *r == registry)
            .map(|(_, n)| *n)
            .unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.released.iter().map(|(_, n)| n).sum()
    }
}

/// The registries of a target geometry.
#[derive(Debug, Default)]
pub struct TargetStores {
    pub(crate) isotopes: SlotMap<IsotopeKey, IsotopeData>,
    pub(crate) elements: SlotMap<ElementKey, ElementData>,
    pub(crate) element_names: FxHashMap<String, ElementKey>,
    pub(crate) materials: SlotMap<MaterialKey, MaterialData>,
    pub(crate) rotations: SlotMap<RotationKey, Rotation3<f64>>,
    pub(crate) solids: SlotMap<SolidKey, Box<dyn Solid>>,
    pub(crate) logical_volumes: SlotMap<LogicalVolumeKey, LogicalVolumeData>,
    pub(crate) placements: SlotMap<PlacementKey, PlacementData>,
}

impl TargetStores {
    /// Creates empty registries.
    pub fn new() -> Self {
        Self::default()
    }

    // --- Rotations ---

    pub fn add_rotation(&mut self, rotation: Rotation3<f64>) -> RotationKey {
        self.rotations.insert(rotation)
    }

    pub fn rotation(&self, key: RotationKey) -> Option<&Rotation3<f64>> {
        self.rotations.get(key)
    }

    // --- Solids ---

    pub fn add_solid(&mut self, solid: Box<dyn Solid>) -> SolidKey {
        self.solids.insert(solid)
    }

    pub fn solid(&self, key: SolidKey) -> Option<&dyn Solid> {
        self.solids.get(key).map(|s| s.as_ref())
    }

    // --- Counts ---

    /// Number of live entries in `registry`.
    pub fn count(&self, registry: Registry) -> usize {
        match registry {
            Registry::Materials => self.materials.len(),
            Registry::Elements => self.elements.len(),
            Registry::Isotopes => self.isotopes.len(),
            Registry::Rotations => self.rotations.len(),
            Registry::Placements => self.placements.len(),
            Registry::LogicalVolumes => self.logical_volumes.len(),
            Registry::Solids => self.solids.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        Registry::TEARDOWN_ORDER.iter().all(|&r| self.count(r) == 0)
    }

    // --- Teardown ---

    /// Releases every registry in [`Registry::TEARDOWN_ORDER`].
    ///
    /// Calling it on empty or already released stores is a no-op that
    /// reports zero entries.
    pub fn teardown(&mut self) -> TeardownReport {
        let mut report = TeardownReport::default();
        for registry in Registry::TEARDOWN_ORDER {
            let released = self.release(registry);
            tracing::debug!(registry = registry.as_str(), released, "Registry released");
            report.released.push((registry, released));
        }
        report
    }

    /// Alias of [`TargetStores::teardown`] that discards the report.
    pub fn clear(&mut self) {
        self.teardown();
    }

    fn release(&mut self, registry: Registry) -> usize {
        let released = self.count(registry);
        match registry {
            Registry::Materials => self.materials.clear(),
            Registry::Elements => {
                self.elements.clear();
                self.element_names.clear();
            }
            Registry::Isotopes => self.isotopes.clear(),
            Registry::Rotations => self.rotations.clear(),
            Registry::Placements => self.placements.clear(),
            Registry::LogicalVolumes => self.logical_volumes.clear(),
            Registry::Solids => self.solids.clear(),
        }
        released
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::MaterialState;
    use crate::units::*;
    use nalgebra::{Point3, Vector3};

    #[derive(Debug)]
    struct Dummy;

    impl Solid for Dummy {
        fn name(&self) -> &str {
            "dummy"
        }
        fn inside(&self, _p: &Point3<f64>) -> crate::Inside {
            crate::Inside::Outside
        }
        fn surface_normal(&self, _p: &Point3<f64>) -> Vector3<f64> {
            Vector3::z()
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

    #[test]
    fn teardown_releases_in_fixed_order() {
        let mut stores = TargetStores::new();
        let mat = stores.add_simple_material(
            "Iron",
            26.0,
            55.845 * G_PER_MOLE,
            7.87 * G_PER_CM3,
            MaterialState::Solid,
            STP_TEMPERATURE,
            STP_PRESSURE,
        );
        let solid = stores.add_solid(Box::new(Dummy));
        let lv = stores.add_logical_volume(solid, mat, "World").unwrap();
        let rot = stores.add_rotation(Rotation3::identity());
        stores
            .add_placement(Some(rot), Vector3::zeros(), lv, "World", None, false, 0)
            .unwrap();

        let report = stores.teardown();
        let order: Vec<_> = report.released.iter().map(|(r, _)| *r).collect();
        assert_eq!(order, Registry::TEARDOWN_ORDER.to_vec());
        assert_eq!(report.count(Registry::Materials), 1);
        // The simple material created its backing element.
        assert_eq!(report.count(Registry::Elements), 1);
        assert_eq!(report.count(Registry::Rotations), 1);
        assert_eq!(report.count(Registry::Placements), 1);
        assert_eq!(report.count(Registry::LogicalVolumes), 1);
        assert_eq!(report.count(Registry::Solids), 1);
        assert!(stores.is_empty());
        assert!(stores.element_by_name("Iron").is_none());
    }

    #[test]
    fn teardown_tolerates_empty_stores() {
        let mut stores = TargetStores::new();
        assert_eq!(stores.teardown().total(), 0);
        stores.clear();
        assert_eq!(stores.teardown().total(), 0);
    }
}
