// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Key types for the target registries.

use slotmap::new_key_type;

new_key_type! {
    /// Key for an isotope.
    pub struct IsotopeKey;

    /// Key for an element.
    pub struct ElementKey;

    /// Key for a material.
    pub struct MaterialKey;

    /// Key for a solid.
    pub struct SolidKey;

    /// Key for a rotation matrix shared by placements.
    pub struct RotationKey;

    /// Key for a logical volume (solid + material + daughters).
    pub struct LogicalVolumeKey;

    /// Key for a placement (positioned logical volume).
    pub struct PlacementKey;
}
