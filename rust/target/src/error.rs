// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for target registry operations.

use crate::keys::*;

/// Result type alias for target registry operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while populating the target registries.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// More components were added to a material than it declared.
    #[error("material '{name}' declared {declared} components, cannot add more")]
    TooManyComponents { name: String, declared: usize },

    /// More isotopes were added to an element than it declared.
    #[error("element '{name}' declared {declared} isotopes, cannot add more")]
    TooManyIsotopes { name: String, declared: usize },

    #[error("isotope not found: {0:?}")]
    IsotopeNotFound(IsotopeKey),

    #[error("element not found: {0:?}")]
    ElementNotFound(ElementKey),

    #[error("material not found: {0:?}")]
    MaterialNotFound(MaterialKey),

    #[error("solid not found: {0:?}")]
    SolidNotFound(SolidKey),

    #[error("rotation not found: {0:?}")]
    RotationNotFound(RotationKey),

    #[error("logical volume not found: {0:?}")]
    LogicalVolumeNotFound(LogicalVolumeKey),
}
