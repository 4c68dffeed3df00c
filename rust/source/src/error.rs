// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for source geometry construction.

use crate::keys::*;

/// Result type alias for source geometry operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or closing a source geometry.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The geometry was closed; its structure can no longer change.
    #[error("geometry is closed, cannot {0}")]
    GeometryClosed(&'static str),

    /// `close_geometry` was called before a top volume was set.
    #[error("geometry has no top node")]
    MissingTopNode,

    /// The top volume was already set.
    #[error("top volume already set")]
    TopAlreadySet,

    /// A volume cannot be placed directly inside itself.
    #[error("volume '{0}' cannot be placed inside itself")]
    SelfPlacement(String),

    /// The volume graph below the top volume contains a cycle.
    #[error("volume '{0}' contains itself, the hierarchy is not a tree")]
    CyclicHierarchy(String),

    /// A mixture must have at least one component.
    #[error("mixture '{0}' has no components")]
    EmptyMixture(String),

    #[error("node not found: {0:?}")]
    NodeNotFound(NodeKey),

    #[error("volume not found: {0:?}")]
    VolumeNotFound(VolumeKey),

    #[error("shape not found: {0:?}")]
    ShapeNotFound(ShapeKey),

    #[error("medium not found: {0:?}")]
    MediumNotFound(MediumKey),

    #[error("material not found: {0:?}")]
    MaterialNotFound(MaterialKey),

    #[error("element not found: {0:?}")]
    ElementNotFound(ElementKey),
}
