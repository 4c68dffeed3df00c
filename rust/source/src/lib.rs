// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Geobridge Source Geometry
//!
//! Hierarchical detector description used as the input of the conversion
//! engine. Every entity (node, volume, shape, medium, material, element)
//! lives in a single [`SourceGeometry`] arena and is addressed by a
//! generational key, which doubles as the entity's identity.
//!
//! Daughter nodes belong to volumes, so a volume placed several times shares
//! its daughters between all of its instances. Once the hierarchy is built,
//! [`SourceGeometry::close_geometry`] freezes it.

pub mod element_table;
pub mod error;
pub mod geometry;
pub mod keys;
pub mod material;
pub mod shape;
pub mod transform;
pub mod traversal;

pub use element_table::{ElementTable, StandardElement};
pub use error::{Error, Result};
pub use geometry::{MediumData, NodeData, SourceGeometry, VolumeData};
pub use keys::{ElementKey, MaterialKey, MediumKey, NodeKey, ShapeKey, VolumeKey};
pub use material::{Composition, ElementData, Isotope, IsotopeFraction, MaterialData, MaterialState, MixtureComponent};
pub use shape::{Aabb, BoxShape, Shape, Sphere};
pub use transform::Transform;
pub use traversal::{DepthFirst, Visit};
