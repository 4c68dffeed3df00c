// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Key types for the source geometry arena.
//!
//! Keys are created by `slotmap::SlotMap` and identify an entity for as long
//! as the arena lives. Two materials with identical contents still have
//! distinct keys, which is what the conversion caches rely on.

use slotmap::new_key_type;

new_key_type! {
    /// Key for a node (one positioned instance of a volume).
    pub struct NodeKey;

    /// Key for a volume (shape plus medium, owner of daughter nodes).
    pub struct VolumeKey;

    /// Key for a shape.
    pub struct ShapeKey;

    /// Key for a tracking medium.
    pub struct MediumKey;

    /// Key for a material or mixture.
    pub struct MaterialKey;

    /// Key for a user-defined element.
    pub struct ElementKey;
}
