// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for geometry conversion.
//!
//! Every variant is fatal for the run: a partially converted geometry must
//! not be used for transport. Conversion failures name the operation that
//! raised them and the offending source entity.

/// Result type alias for conversion operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while converting a source geometry.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No source geometry was supplied.
    #[error("{operation}: cannot construct without a source geometry")]
    MissingGeometry { operation: &'static str },

    /// The source geometry is not closed.
    #[error("{operation}: source geometry '{geometry}' is not closed")]
    GeometryNotClosed {
        operation: &'static str,
        geometry: String,
    },

    /// The solid factory produced nothing for a shape.
    #[error("{operation}: cannot make solid from shape '{shape}'")]
    UnresolvableSolid { operation: &'static str, shape: String },

    /// A volume's material could not be resolved.
    #[error("{operation}: cannot make material for volume '{volume}'")]
    UnresolvableMaterial {
        operation: &'static str,
        volume: String,
    },

    /// A node's own volume could not be resolved.
    #[error("{operation}: no logical volume created for node '{node}'")]
    UnresolvableVolume { operation: &'static str, node: String },

    /// A non-top node's mother volume could not be resolved.
    #[error("{operation}: no mother logical volume created for node '{node}'")]
    UnresolvableMother { operation: &'static str, node: String },

    /// No canonical element exists for an atomic number.
    #[error("{operation}: no canonical element for Z={z} (element '{element}')")]
    UnknownElement {
        operation: &'static str,
        element: String,
        z: u32,
    },

    /// A key handed to the converter does not exist in the source geometry.
    #[error("{operation}: source entity not found: {entity}")]
    MissingSourceEntity {
        operation: &'static str,
        entity: String,
    },

    /// The hierarchy walk did not produce one placement per source node.
    #[error("hierarchy conversion produced {placements} placements for {nodes} source nodes")]
    TraversalMismatch { placements: usize, nodes: usize },

    /// An earlier construction attempt failed part way.
    #[error("construction previously failed, the converted geometry is incomplete")]
    ConstructionFailed,

    /// The configuration could not be loaded.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("source geometry error: {0}")]
    Source(#[from] geobridge_source::Error),

    #[error("target geometry error: {0}")]
    Target(#[from] geobridge_target::Error),
}
