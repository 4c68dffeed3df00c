// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Geobridge Target Geometry
//!
//! The geometry model consumed by the transport engine: placements of
//! logical volumes, each combining a solid and a material built from
//! elements and isotopes.
//!
//! Entities live in explicit registries ([`TargetStores`]) instead of
//! process-wide tables. Whoever owns the stores owns the whole graph, and
//! [`TargetStores::teardown`] releases it in a fixed order.
//!
//! All quantities use the internal unit system of [`units`]
//! (millimeter, nanosecond, MeV, kelvin, mole).

pub mod element;
pub mod error;
pub mod keys;
pub mod material;
pub mod solid;
pub mod stores;
pub mod units;
pub mod volume;

pub use element::{ElementData, IsotopeData};
pub use error::{Error, Result};
pub use keys::{ElementKey, IsotopeKey, LogicalVolumeKey, MaterialKey, PlacementKey, RotationKey, SolidKey};
pub use material::{MaterialData, MaterialState};
pub use solid::{Inside, Solid};
pub use stores::{Registry, TargetStores, TeardownReport};
pub use volume::{LogicalVolumeData, PlacementData};
