// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Geobridge
//!
//! One-shot conversion of a source detector geometry into the registries of
//! a particle-transport engine.
//!
//! The source side (`geobridge-source`) stores daughters on volumes and
//! measures in centimeters; the target side (`geobridge-target`) places
//! logical volumes in mother logical volumes and measures in millimeters.
//! [`GeometryConverter`] walks the source once, converting materials,
//! solids, logical volumes and placements, and remembers every source to
//! target pairing in bidirectional identity caches. [`DetectorConstruction`]
//! wraps it in the construct, initialize and teardown lifecycle.
//!
//! All failures are fatal and returned as [`Error`]; the library never
//! hands out a partially converted geometry.

pub mod cache;
pub mod config;
pub mod construction;
pub mod converter;
pub mod error;
pub mod solid;
pub mod summary;

pub use cache::{ConversionCaches, IdentityMap};
pub use config::{ConversionConfig, UnitSystem, VacuumPolicy, CONFIG_ENV};
pub use construction::{ConstructionState, DetectorConstruction, Navigator, PostConstruction};
pub use converter::{target_rotation, GeometryConverter};
pub use error::{Error, Result};
pub use solid::{GenericSolid, GenericSolidFactory, SolidFactory};
pub use summary::ConstructionSummary;
