// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Elements, isotopes and materials of the source geometry.
//!
//! Quantities use the source unit system: densities in g/cm3, atomic masses
//! in g/mole, temperatures in kelvin and pressures in pascal.

use crate::keys::ElementKey;

/// Standard temperature in kelvin.
pub const STP_TEMPERATURE: f64 = 273.15;

/// Standard pressure in pascal.
pub const STP_PRESSURE: f64 = 101_325.0;

/// A nuclide: fixed Z and N with its atomic mass.
#[derive(Debug, Clone, PartialEq)]
pub struct Isotope {
    pub name: String,
    pub z: u32,
    pub n: u32,
    /// Atomic mass in g/mole.
    pub a: f64,
}

impl Isotope {
    pub fn new(name: impl Into<String>, z: u32, n: u32, a: f64) -> Self {
        Self {
            name: name.into(),
            z,
            n,
            a,
        }
    }
}

/// An isotope together with its relative abundance inside an element.
#[derive(Debug, Clone, PartialEq)]
pub struct IsotopeFraction {
    pub isotope: Isotope,
    pub abundance: f64,
}

/// A user-defined element.
///
/// `symbol` is the short name (`"U"`), `name` the display name used to
/// deduplicate elements downstream (`"Enriched Uranium"`).
#[derive(Debug, Clone, PartialEq)]
pub struct ElementData {
    pub symbol: String,
    pub name: String,
    pub z: u32,
    pub n: u32,
    /// Atomic mass in g/mole.
    pub a: f64,
    pub isotopes: Vec<IsotopeFraction>,
}

impl ElementData {
    /// Creates an element with natural composition (no explicit isotopes).
    pub fn new(symbol: impl Into<String>, name: impl Into<String>, z: u32, a: f64) -> Self {
        Self {
            symbol: symbol.into(),
            name: name.into(),
            z,
            n: a.round().max(0.0) as u32,
            a,
            isotopes: Vec::new(),
        }
    }

    /// Appends an isotope with the given relative abundance.
    ///
    /// The element's atomic mass is recomputed as the abundance-weighted
    /// mean of its isotopes.
    pub fn with_isotope(mut self, isotope: Isotope, abundance: f64) -> Self {
        self.isotopes.push(IsotopeFraction { isotope, abundance });
        let total: f64 = self.isotopes.iter().map(|f| f.abundance).sum();
        if total > 0.0 {
            self.a = self
                .isotopes
                .iter()
                .map(|f| f.isotope.a * f.abundance)
                .sum::<f64>()
                / total;
        }
        self
    }

    pub fn has_isotopes(&self) -> bool {
        !self.isotopes.is_empty()
    }

    /// Returns the relative abundance of the isotope at `index`.
    pub fn relative_abundance(&self, index: usize) -> Option<f64> {
        self.isotopes.get(index).map(|f| f.abundance)
    }
}

/// Physical state of a material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MaterialState {
    #[default]
    Undefined,
    Solid,
    Liquid,
    Gas,
}

/// One component of a mixture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MixtureComponent {
    pub element: ElementKey,
    /// Mass fraction of this component.
    pub weight: f64,
}

/// What a material is made of.
#[derive(Debug, Clone, PartialEq)]
pub enum Composition {
    /// A single element. `element` is set when the material references a
    /// user-defined element (possibly carrying isotopes).
    Element {
        z: f64,
        a: f64,
        element: Option<ElementKey>,
    },
    /// A mixture of elements by mass fraction.
    Mixture(Vec<MixtureComponent>),
}

/// A source material.
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialData {
    pub name: String,
    /// Density in g/cm3.
    pub density: f64,
    pub state: MaterialState,
    /// Temperature in kelvin.
    pub temperature: f64,
    /// Pressure in pascal.
    pub pressure: f64,
    pub composition: Composition,
}

impl MaterialData {
    /// Creates a single-element material at standard conditions.
    pub fn element(name: impl Into<String>, z: f64, a: f64, density: f64) -> Self {
        Self {
            name: name.into(),
            density,
            state: MaterialState::Undefined,
            temperature: STP_TEMPERATURE,
            pressure: STP_PRESSURE,
            composition: Composition::Element { z, a, element: None },
        }
    }

    /// Creates a mixture at standard conditions.
    pub fn mixture(name: impl Into<String>, density: f64, components: Vec<MixtureComponent>) -> Self {
        Self {
            name: name.into(),
            density,
            state: MaterialState::Undefined,
            temperature: STP_TEMPERATURE,
            pressure: STP_PRESSURE,
            composition: Composition::Mixture(components),
        }
    }

    /// Binds a single-element material to a user-defined element.
    pub fn with_element(mut self, key: ElementKey) -> Self {
        if let Composition::Element { element, .. } = &mut self.composition {
            *element = Some(key);
        }
        self
    }

    pub fn with_state(mut self, state: MaterialState) -> Self {
        self.state = state;
        self
    }

    pub fn with_conditions(mut self, temperature: f64, pressure: f64) -> Self {
        self.temperature = temperature;
        self.pressure = pressure;
        self
    }

    pub fn is_mixture(&self) -> bool {
        matches!(self.composition, Composition::Mixture(_))
    }

    /// Number of components: 1 for single-element materials.
    pub fn component_count(&self) -> usize {
        match &self.composition {
            Composition::Element { .. } => 1,
            Composition::Mixture(components) => components.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn isotopes_set_abundances_and_mean_mass() {
        let uranium = ElementData::new("U", "Enriched uranium", 92, 238.03)
            .with_isotope(Isotope::new("U235", 92, 143, 235.04), 0.2)
            .with_isotope(Isotope::new("U238", 92, 146, 238.05), 0.8);

        assert!(uranium.has_isotopes());
        assert_relative_eq!(uranium.relative_abundance(0).unwrap(), 0.2);
        assert_relative_eq!(uranium.relative_abundance(1).unwrap(), 0.8);
        assert!(uranium.relative_abundance(2).is_none());
        assert_relative_eq!(uranium.a, 0.2 * 235.04 + 0.8 * 238.05, epsilon = 1e-12);
    }

    #[test]
    fn natural_element_has_no_abundances() {
        let iron = ElementData::new("Fe", "Iron", 26, 55.845);
        assert!(!iron.has_isotopes());
        assert!(iron.relative_abundance(0).is_none());
        assert_eq!(iron.n, 56);
    }

    #[test]
    fn composition_kind() {
        let iron = MaterialData::element("Iron", 26.0, 55.845, 7.87);
        assert!(!iron.is_mixture());
        assert_eq!(iron.component_count(), 1);
        assert_relative_eq!(iron.temperature, STP_TEMPERATURE);

        let component = MixtureComponent { element: ElementKey::default(), weight: 1.0 };
        let gas = MaterialData::mixture("Gas", 1e-3, vec![component, component])
            .with_conditions(300.0, 2.0e5);
        assert!(gas.is_mixture());
        assert_eq!(gas.component_count(), 2);
        assert_relative_eq!(gas.temperature, 300.0);
        assert_relative_eq!(gas.pressure, 2.0e5);
    }
}
