// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Geometry Converter - translates a source geometry into target registries
//!
//! Every `convert_*` operation first consults the identity caches, so asking
//! twice for the same source entity returns the same target entity and
//! creates nothing new.

mod materials;
mod placements;
mod volumes;


pub use placements::target_rotation;

use geobridge_target::{TargetStores, TeardownReport};

use crate::cache::ConversionCaches;
use crate::config::ConversionConfig;
use crate::solid::{GenericSolidFactory, SolidFactory};

/// Converter state: the target registries, the identity caches and the
/// settings used to fill them.
#[derive(Debug)]
pub struct GeometryConverter {
    stores: TargetStores,
    caches: ConversionCaches,
    config: ConversionConfig,
    solid_factory: Box<dyn SolidFactory>,
}

impl GeometryConverter {
    /// Create a converter with the generic solid factory
    pub fn new(config: ConversionConfig) -> Self {
        Self {
            stores: TargetStores::new(),
            caches: ConversionCaches::new(),
            config,
            solid_factory: Box::new(GenericSolidFactory),
        }
    }

    /// Replace the solid factory
    pub fn with_solid_factory(mut self, factory: Box<dyn SolidFactory>) -> Self {
        self.solid_factory = factory;
        self
    }

    pub fn set_solid_factory(&mut self, factory: Box<dyn SolidFactory>) {
        self.solid_factory = factory;
    }

    pub fn set_config(&mut self, config: ConversionConfig) {
        self.config = config;
    }

    pub fn config(&self) -> &ConversionConfig {
        &self.config
    }

    pub fn stores(&self) -> &TargetStores {
        &self.stores
    }

    pub fn caches(&self) -> &ConversionCaches {
        &self.caches
    }

    /// Release every target registry and forget all cached identities.
    pub fn teardown(&mut self) -> TeardownReport {
        self.caches.clear();
        self.stores.teardown()
    }
}

impl Default for GeometryConverter {
    fn default() -> Self {
        Self::new(ConversionConfig::default())
    }
}
