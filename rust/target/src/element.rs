// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Isotopes and elements.
//!
//! Elements are registered under their name; [`TargetStores::element_by_name`]
//! is the single place where element deduplication happens.

use crate::error::{Error, Result};
use crate::keys::*;
use crate::stores::TargetStores;

/// A nuclide. `a` is the molar mass in internal units.
#[derive(Debug, Clone, PartialEq)]
pub struct IsotopeData {
    pub name: String,
    pub z: u32,
    pub n: u32,
    pub a: f64,
}

/// An element, either tabulated (natural composition) or built from
/// explicit isotopes.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementData {
    pub name: String,
    pub symbol: String,
    pub z: f64,
    /// Molar mass in internal units.
    pub a: f64,
    /// Isotopes with their relative abundances, normalized once all
    /// declared isotopes have been added.
    pub isotopes: Vec<(IsotopeKey, f64)>,
    pub declared_isotopes: usize,
}

impl ElementData {
    /// `true` once every declared isotope has been added.
    pub fn is_sealed(&self) -> bool {
        self.isotopes.len() == self.declared_isotopes
    }
}

impl TargetStores {
    pub fn add_isotope(&mut self, name: impl Into<String>, z: u32, n: u32, a: f64) -> IsotopeKey {
        self.isotopes.insert(IsotopeData {
            name: name.into(),
            z,
            n,
            a,
        })
    }

    pub fn isotope(&self, key: IsotopeKey) -> Option<&IsotopeData> {
        self.isotopes.get(key)
    }

    /// Registers a tabulated element.
    pub fn add_element(&mut self, name: impl Into<String>, symbol: impl Into<String>, z: f64, a: f64) -> ElementKey {
        self.insert_element(ElementData {
            name: name.into(),
            symbol: symbol.into(),
            z,
            a,
            isotopes: Vec::new(),
            declared_isotopes: 0,
        })
    }

    /// Registers an element that will be filled with `isotope_count`
    /// isotopes through [`TargetStores::add_isotope_to_element`].
    pub fn add_isotopic_element(
        &mut self,
        name: impl Into<String>,
        symbol: impl Into<String>,
        isotope_count: usize,
    ) -> ElementKey {
        self.insert_element(ElementData {
            name: name.into(),
            symbol: symbol.into(),
            z: 0.0,
            a: 0.0,
            isotopes: Vec::with_capacity(isotope_count),
            declared_isotopes: isotope_count,
        })
    }

    fn insert_element(&mut self, element: ElementData) -> ElementKey {
        let name = element.name.clone();
        let key = self.elements.insert(element);
        // First registration wins, matching lookups by name.
        self.element_names.entry(name).or_insert(key);
        key
    }

    /// Adds an isotope with its relative abundance to an isotopic element.
    ///
    /// When the last declared isotope is added, abundances are normalized and
    /// the element's Z and molar mass are derived from its isotopes.
    pub fn add_isotope_to_element(&mut self, element: ElementKey, isotope: IsotopeKey, abundance: f64) -> Result<()> {
        let iso = self
            .isotopes
            .get(isotope)
            .ok_or(Error::IsotopeNotFound(isotope))?
            .clone();
        let data = self
            .elements
            .get_mut(element)
            .ok_or(Error::ElementNotFound(element))?;
        if data.isotopes.len() >= data.declared_isotopes {
            return Err(Error::TooManyIsotopes {
                name: data.name.clone(),
                declared: data.declared_isotopes,
            });
        }
        if data.isotopes.is_empty() {
            data.z = iso.z as f64;
        }
        data.isotopes.push((isotope, abundance));

        if data.is_sealed() {
            let total: f64 = data.isotopes.iter().map(|(_, w)| w).sum();
            if total > 0.0 {
                for (_, w) in &mut data.isotopes {
                    *w /= total;
                }
            }
            let isotopes = &self.isotopes;
            data.a = data
                .isotopes
                .iter()
                .filter_map(|(k, w)| isotopes.get(*k).map(|i| i.a * w))
                .sum();
        }
        Ok(())
    }

    pub fn element(&self, key: ElementKey) -> Option<&ElementData> {
        self.elements.get(key)
    }

    /// Looks up a registered element by name.
    pub fn element_by_name(&self, name: &str) -> Option<ElementKey> {
        self.element_names.get(name).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::G_PER_MOLE;
    use approx::assert_relative_eq;

    #[test]
    fn elements_are_found_by_name() {
        let mut stores = TargetStores::new();
        let fe = stores.add_element("Iron", "Fe", 26.0, 55.845 * G_PER_MOLE);
        assert_eq!(stores.element_by_name("Iron"), Some(fe));
        assert!(stores.element_by_name("Fe").is_none());

        // A later element with the same name does not shadow the first.
        stores.add_element("Iron", "Fe", 26.0, 56.0 * G_PER_MOLE);
        assert_eq!(stores.element_by_name("Iron"), Some(fe));
    }

    #[test]
    fn isotopic_element_is_normalized_when_sealed() {
        let mut stores = TargetStores::new();
        let u235 = stores.add_isotope("U235", 92, 235, 235.01 * G_PER_MOLE);
        let u238 = stores.add_isotope("U238", 92, 238, 238.03 * G_PER_MOLE);
        let el = stores.add_isotopic_element("Enriched Uranium", "U", 2);

        stores.add_isotope_to_element(el, u235, 90.0).unwrap();
        assert!(!stores.element(el).unwrap().is_sealed());
        stores.add_isotope_to_element(el, u238, 10.0).unwrap();

        let data = stores.element(el).unwrap();
        assert!(data.is_sealed());
        assert_relative_eq!(data.z, 92.0);
        assert_relative_eq!(data.isotopes[0].1, 0.9);
        assert_relative_eq!(data.a, (0.9 * 235.01 + 0.1 * 238.03) * G_PER_MOLE, max_relative = 1e-12);

        let err = stores.add_isotope_to_element(el, u238, 1.0).unwrap_err();
        assert!(matches!(err, Error::TooManyIsotopes { declared: 2, .. }));
    }
}
