// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Solid and logical volume conversion.

use geobridge_source::{ShapeKey, SourceGeometry, VolumeKey};
use geobridge_target::{LogicalVolumeKey, Solid};

use super::GeometryConverter;
use crate::error::{Error, Result};

impl GeometryConverter {
    /// Build a solid for a source shape
    ///
    /// The solid is returned unregistered and is never cached: sharing happens
    /// one level up, through the volume cache.
    pub fn convert_solid(&self, source: &SourceGeometry, key: ShapeKey) -> Result<Box<dyn Solid>> {
        const OPERATION: &str = "convert solid";

        let shape = source.shape(key).ok_or_else(|| Error::MissingSourceEntity {
            operation: OPERATION,
            entity: format!("{key:?}"),
        })?;
        self.solid_factory
            .make_solid(shape, self.config.units.length)
            .ok_or_else(|| Error::UnresolvableSolid {
                operation: OPERATION,
                shape: shape.name().to_string(),
            })
    }

    /// Convert one volume into a logical volume, or return its cached
    /// counterpart
    ///
    /// Assemblies have no material of their own and are filled with the
    /// first material of the source list.
    pub fn convert_volume(&mut self, source: &SourceGeometry, key: VolumeKey) -> Result<LogicalVolumeKey> {
        const OPERATION: &str = "convert volume";

        if let Some(converted) = self.caches.volumes.get(key) {
            return Ok(converted);
        }
        let volume = source.volume(key).ok_or_else(|| Error::MissingSourceEntity {
            operation: OPERATION,
            entity: format!("{key:?}"),
        })?;

        let solid = self.convert_solid(source, volume.shape)?;

        let material = if volume.is_assembly() {
            source.first_material()
        } else {
            source.volume_material(key)
        };
        let material = material.ok_or_else(|| Error::UnresolvableMaterial {
            operation: OPERATION,
            volume: volume.name.clone(),
        })?;
        let material = self.convert_material(source, material)?;

        // Registered only now that the material resolved.
        let solid = self.stores.add_solid(solid);
        let logical = self.stores.add_logical_volume(solid, material, volume.name.clone())?;
        self.caches.volumes.insert(key, logical);
        Ok(logical)
    }
}
