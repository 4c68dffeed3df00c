// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Identity caches linking source entities to their converted counterparts.
//!
//! Both sides are keyed by arena keys, never by value: two source materials
//! with identical contents are still two entries. The maps are append-only
//! while a geometry is being converted.

use rustc_hash::FxHashMap;
use slotmap::Key;

use geobridge_source as source;
use geobridge_target as target;

/// A bidirectional map from source identities to target identities.
///
/// Several source entities may share one target entity (elements are
/// deduplicated by name); the reverse direction then answers with the
/// first source entity recorded.
#[derive(Debug, Clone)]
pub struct IdentityMap<S: Key, T: Key> {
    forward: FxHashMap<S, T>,
    reverse: FxHashMap<T, S>,
}

impl<S: Key, T: Key> IdentityMap<S, T> {
    pub fn new() -> Self {
        Self {
            forward: FxHashMap::default(),
            reverse: FxHashMap::default(),
        }
    }

    /// Target mapped to `source`.
    pub fn get(&self, source: S) -> Option<T> {
        self.forward.get(&source).copied()
    }

    /// Source mapped to `target`.
    pub fn source_of(&self, target: T) -> Option<S> {
        self.reverse.get(&target).copied()
    }

    pub fn contains(&self, source: S) -> bool {
        self.forward.contains_key(&source)
    }

    /// Records `source -> target`. Existing entries are never overwritten;
    /// returns `false` if `source` was already mapped.
    pub fn insert(&mut self, source: S, target: T) -> bool {
        if self.forward.contains_key(&source) {
            return false;
        }
        self.forward.insert(source, target);
        self.reverse.entry(target).or_insert(source);
        true
    }

    pub fn len(&self) -> usize {
        self.forward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (S, T)> + '_ {
        self.forward.iter().map(|(s, t)| (*s, *t))
    }

    pub(crate) fn clear(&mut self) {
        self.forward.clear();
        self.reverse.clear();
    }
}

impl<S: Key, T: Key> Default for IdentityMap<S, T> {
    fn default() -> Self {
        Self::new()
    }
}

/// The four identity caches of a conversion.
#[derive(Debug, Clone, Default)]
pub struct ConversionCaches {
    pub materials: IdentityMap<source::MaterialKey, target::MaterialKey>,
    pub elements: IdentityMap<source::ElementKey, target::ElementKey>,
    pub volumes: IdentityMap<source::VolumeKey, target::LogicalVolumeKey>,
    pub placements: IdentityMap<source::NodeKey, target::PlacementKey>,
}

impl ConversionCaches {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn clear(&mut self) {
        self.materials.clear();
        self.elements.clear();
        self.volumes.clear();
        self.placements.clear();
    }
}
