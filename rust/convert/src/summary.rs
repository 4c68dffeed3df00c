// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Serializable overview of a converted geometry.

use serde::{Deserialize, Serialize};

use geobridge_target::{Registry, TargetStores};

use crate::error::{Error, Result};

/// Registry counts of a target geometry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstructionSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geometry: Option<String>,
    pub constructed: bool,
    pub isotopes: usize,
    pub elements: usize,
    pub materials: usize,
    pub rotations: usize,
    pub solids: usize,
    pub logical_volumes: usize,
    pub placements: usize,
}

impl ConstructionSummary {
    /// Counts the live entries of every registry.
    pub fn from_stores(stores: &TargetStores) -> Self {
        Self {
            geometry: None,
            constructed: false,
            isotopes: stores.count(Registry::Isotopes),
            elements: stores.count(Registry::Elements),
            materials: stores.count(Registry::Materials),
            rotations: stores.count(Registry::Rotations),
            solids: stores.count(Registry::Solids),
            logical_volumes: stores.count(Registry::LogicalVolumes),
            placements: stores.count(Registry::Placements),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::Serialization(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::Serialization(e.to_string()))
    }
}
