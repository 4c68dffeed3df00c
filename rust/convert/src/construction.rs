// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Detector construction: drives a one-shot conversion of a closed source
//! geometry and hands the world placement to the navigator.
//!
//! ```
//! use geobridge::DetectorConstruction;
//! use geobridge_source::{BoxShape, MaterialData, SourceGeometry, Transform};
//!
//! let mut geo = SourceGeometry::new("demo");
//! let iron = geo.add_material(MaterialData::element("Iron", 26.0, 55.845, 7.87)).unwrap();
//! let medium = geo.add_medium("Iron", iron).unwrap();
//! let world_box = geo.add_shape(BoxShape::new("world", 50.0, 50.0, 50.0)).unwrap();
//! let world = geo.add_volume("World", world_box, medium).unwrap();
//! let cell_box = geo.add_shape(BoxShape::new("cell", 1.0, 1.0, 1.0)).unwrap();
//! let cell = geo.add_volume("Cell", cell_box, medium).unwrap();
//! geo.add_node(world, cell, 1, Transform::translation(5.0, 0.0, 0.0)).unwrap();
//! geo.set_top_volume(world).unwrap();
//! geo.close_geometry().unwrap();
//!
//! let mut construction = DetectorConstruction::with_geometry(geo).unwrap();
//! let top = construction.initialize(None).unwrap();
//! assert_eq!(construction.construct().unwrap(), top);
//! assert_eq!(construction.summary().placements, 2);
//! ```

use std::fmt;

use tracing::info;

use geobridge_source::{self as source, SourceGeometry};
use geobridge_target::{self as target, LogicalVolumeKey, PlacementKey, TargetStores, TeardownReport};

use crate::config::ConversionConfig;
use crate::converter::GeometryConverter;
use crate::error::{Error, Result};
use crate::solid::SolidFactory;
use crate::summary::ConstructionSummary;

/// Receives the world placement once construction succeeds.
pub trait Navigator {
    fn set_world_volume(&mut self, world: PlacementKey);
}

/// User code run after the geometry has been constructed.
pub trait PostConstruction {
    /// Called once, right after the first successful construction.
    fn initialize(&mut self, construction: &DetectorConstruction);

    /// Sets up sensitive detectors and fields.
    fn initialize_sd_and_field(&mut self) {}
}

/// Lifecycle of a [`DetectorConstruction`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConstructionState {
    #[default]
    Uninitialized,
    /// Conversion started. Staying here means it failed.
    Constructing,
    Constructed,
}

/// Owns the source geometry and the converter filling the target registries.
pub struct DetectorConstruction {
    geometry: Option<SourceGeometry>,
    converter: GeometryConverter,
    navigator: Option<Box<dyn Navigator>>,
    hook: Option<Box<dyn PostConstruction>>,
    state: ConstructionState,
    world: Option<PlacementKey>,
}

impl DetectorConstruction {
    /// Creates a construction without a source geometry.
    pub fn new() -> Self {
        Self {
            geometry: None,
            converter: GeometryConverter::default(),
            navigator: None,
            hook: None,
            state: ConstructionState::Uninitialized,
            world: None,
        }
    }

    /// Creates a construction for a closed geometry.
    pub fn with_geometry(geometry: SourceGeometry) -> Result<Self> {
        if !geometry.is_closed() {
            return Err(Error::GeometryNotClosed {
                operation: "create detector construction",
                geometry: geometry.name().to_string(),
            });
        }
        let mut construction = Self::new();
        construction.geometry = Some(geometry);
        Ok(construction)
    }

    pub fn with_config(mut self, config: ConversionConfig) -> Self {
        self.converter.set_config(config);
        self
    }

    pub fn with_solid_factory(mut self, factory: Box<dyn SolidFactory>) -> Self {
        self.converter.set_solid_factory(factory);
        self
    }

    pub fn with_navigator(mut self, navigator: Box<dyn Navigator>) -> Self {
        self.navigator = Some(navigator);
        self
    }

    /// Constructs the geometry on first use, then runs the post-construction
    /// hook. A supplied hook replaces the stored one.
    ///
    /// Later calls return the same world placement and do not run the hook
    /// again.
    pub fn initialize(&mut self, hook: Option<Box<dyn PostConstruction>>) -> Result<PlacementKey> {
        if let Some(hook) = hook {
            self.hook = Some(hook);
        }
        if let (ConstructionState::Constructed, Some(world)) = (self.state, self.world) {
            return Ok(world);
        }

        let world = self.construct()?;
        if let Some(mut hook) = self.hook.take() {
            hook.initialize(self);
            self.hook = Some(hook);
        }
        Ok(world)
    }

    /// Converts the source geometry and returns the world placement.
    ///
    /// Idempotent once it has succeeded. After a failure every further call
    /// reports [`Error::ConstructionFailed`].
    pub fn construct(&mut self) -> Result<PlacementKey> {
        const OPERATION: &str = "construct";

        match (self.state, self.world) {
            (ConstructionState::Constructed, Some(world)) => return Ok(world),
            (ConstructionState::Constructing, _) => return Err(Error::ConstructionFailed),
            _ => {}
        }

        let geometry = self
            .geometry
            .as_mut()
            .ok_or(Error::MissingGeometry { operation: OPERATION })?;
        if !geometry.is_closed() {
            return Err(Error::GeometryNotClosed {
                operation: OPERATION,
                geometry: geometry.name().to_string(),
            });
        }

        self.state = ConstructionState::Constructing;
        self.converter.convert_materials(geometry)?;
        let world = self.converter.convert_hierarchy(geometry)?;
        if let Some(navigator) = self.navigator.as_mut() {
            navigator.set_world_volume(world);
        }
        self.world = Some(world);
        self.state = ConstructionState::Constructed;

        info!(
            geometry = %geometry.name(),
            logical_volumes = self.converter.caches().volumes.len(),
            placements = self.converter.caches().placements.len(),
            "Geometry construction finished"
        );
        Ok(world)
    }

    /// Runs the hook's sensitive detector and field setup.
    pub fn construct_sd_and_field(&mut self) {
        info!("Constructing sensitive detectors and fields");
        if let Some(hook) = self.hook.as_mut() {
            hook.initialize_sd_and_field();
        }
        info!("Sensitive detectors and fields constructed");
    }

    pub fn state(&self) -> ConstructionState {
        self.state
    }

    /// World placement, once constructed.
    pub fn world(&self) -> Option<PlacementKey> {
        self.world
    }

    pub fn geometry(&self) -> Option<&SourceGeometry> {
        self.geometry.as_ref()
    }

    pub fn converter(&self) -> &GeometryConverter {
        &self.converter
    }

    pub fn stores(&self) -> &TargetStores {
        self.converter.stores()
    }

    // --- Reverse lookups ---

    pub fn placement_of(&self, node: source::NodeKey) -> Option<PlacementKey> {
        self.converter.caches().placements.get(node)
    }

    pub fn node_of(&self, placement: PlacementKey) -> Option<source::NodeKey> {
        self.converter.caches().placements.source_of(placement)
    }

    pub fn logical_volume_of(&self, volume: source::VolumeKey) -> Option<LogicalVolumeKey> {
        self.converter.caches().volumes.get(volume)
    }

    pub fn volume_of(&self, logical: LogicalVolumeKey) -> Option<source::VolumeKey> {
        self.converter.caches().volumes.source_of(logical)
    }

    pub fn material_of(&self, material: source::MaterialKey) -> Option<target::MaterialKey> {
        self.converter.caches().materials.get(material)
    }

    pub fn source_material_of(&self, material: target::MaterialKey) -> Option<source::MaterialKey> {
        self.converter.caches().materials.source_of(material)
    }

    pub fn element_of(&self, element: source::ElementKey) -> Option<target::ElementKey> {
        self.converter.caches().elements.get(element)
    }

    /// Registry counts of the converted geometry.
    pub fn summary(&self) -> ConstructionSummary {
        ConstructionSummary {
            geometry: self.geometry.as_ref().map(|g| g.name().to_string()),
            constructed: self.state == ConstructionState::Constructed,
            ..ConstructionSummary::from_stores(self.converter.stores())
        }
    }

    /// Releases the target registries.
    pub fn teardown(mut self) -> TeardownReport {
        self.release()
    }

    fn release(&mut self) -> TeardownReport {
        let report = self.converter.teardown();
        self.world = None;
        self.state = ConstructionState::Uninitialized;
        if report.total() > 0 {
            info!(released = report.total(), "Target geometry released");
        }
        report
    }
}

impl Default for DetectorConstruction {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for DetectorConstruction {
    fn drop(&mut self) {
        self.release();
    }
}

impl fmt::Debug for DetectorConstruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DetectorConstruction")
            .field("geometry", &self.geometry.as_ref().map(|g| g.name()))
            .field("state", &self.state)
            .field("world", &self.world)
            .field("has_navigator", &self.navigator.is_some())
            .field("has_hook", &self.hook.is_some())
            .finish_non_exhaustive()
    }
}
