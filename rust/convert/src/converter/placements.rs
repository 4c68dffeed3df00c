// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Node and hierarchy conversion.

use nalgebra::{Matrix3, Rotation3, Vector3};
use tracing::{debug, info};

use geobridge_source::{NodeKey, SourceGeometry, Transform, Visit};
use geobridge_target::PlacementKey;

use super::GeometryConverter;
use crate::error::{Error, Result};

/// Target rotation of a source transform, `None` when it does not rotate.
///
/// The source stores the row-major matrix mapping local to mother
/// coordinates; the target expects the inverse, which for a rotation is the
/// transpose.
pub fn target_rotation(transform: &Transform) -> Option<Rotation3<f64>> {
    if !transform.is_rotation() {
        return None;
    }
    let matrix = Matrix3::from_row_slice(&transform.rotation_matrix());
    Some(Rotation3::from_matrix_unchecked(matrix.transpose()))
}

impl GeometryConverter {
    /// Convert one node into a placement, or return its cached counterpart
    ///
    /// The mother is taken from the node's stored mother-volume link, except
    /// for the top node which has none.
    pub fn convert_node(&mut self, source: &SourceGeometry, key: NodeKey) -> Result<PlacementKey> {
        const OPERATION: &str = "convert node";

        if let Some(converted) = self.caches.placements.get(key) {
            return Ok(converted);
        }
        let (node, name) = source
            .node(key)
            .zip(source.node_name(key))
            .ok_or_else(|| Error::MissingSourceEntity {
                operation: OPERATION,
                entity: format!("{key:?}"),
            })?;

        if source.volume(node.volume).is_none() {
            return Err(Error::UnresolvableVolume {
                operation: OPERATION,
                node: name,
            });
        }
        let logical = self.convert_volume(source, node.volume)?;

        let mother = if source.top_node() == Some(key) {
            None
        } else {
            match node.mother_volume.filter(|&m| source.volume(m).is_some()) {
                Some(mother) => Some(self.convert_volume(source, mother)?),
                None => {
                    return Err(Error::UnresolvableMother {
                        operation: OPERATION,
                        node: name,
                    })
                }
            }
        };

        let rotation = target_rotation(&node.transform).map(|r| self.stores.add_rotation(r));
        let translation = Vector3::from(node.transform.translation_vector()) * self.config.units.length;

        let placement = self.stores.add_placement(
            rotation,
            translation,
            logical,
            name,
            mother,
            false,
            node.copy_number,
        )?;
        self.caches.placements.insert(key, placement);
        Ok(placement)
    }

    /// Convert the whole hierarchy and return the world placement
    ///
    /// The depth-first walk is authoritative for parentage: a node whose
    /// stored mother differs from the volume it was reached through is
    /// repaired before conversion.
    pub fn convert_hierarchy(&mut self, source: &mut SourceGeometry) -> Result<PlacementKey> {
        if !source.is_closed() {
            return Err(Error::GeometryNotClosed {
                operation: "convert hierarchy",
                geometry: source.name().to_string(),
            });
        }
        let top = source.top_node().ok_or(geobridge_source::Error::MissingTopNode)?;
        let world = self.convert_node(source, top)?;

        let visits: Vec<Visit> = source.walk().collect();
        for visit in visits {
            let reached_through = source.node(visit.parent).map(|n| n.volume);
            let stored = source.node(visit.node).and_then(|n| n.mother_volume);
            if stored != reached_through {
                let name = source.node_name(visit.node).unwrap_or_default();
                debug!(
                    node = %name,
                    depth = visit.depth,
                    "Repairing mother volume link"
                );
                source.set_mother_volume(visit.node, reached_through)?;
            }
            self.convert_node(source, visit.node)?;
        }

        let placements = self.caches.placements.len();
        let nodes = source.node_count();
        if placements != nodes {
            return Err(Error::TraversalMismatch { placements, nodes });
        }
        info!(physical_volumes = placements, "Physical volumes converted");
        Ok(world)
    }
}
