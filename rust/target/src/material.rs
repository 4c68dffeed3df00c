// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Materials: density, conditions and element composition.

use crate::error::{Error, Result};
use crate::keys::*;
use crate::stores::TargetStores;

/// Physical state of a material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MaterialState {
    #[default]
    Undefined,
    Solid,
    Liquid,
    Gas,
}

/// A material in internal units.
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialData {
    pub name: String,
    pub density: f64,
    pub state: MaterialState,
    pub temperature: f64,
    pub pressure: f64,
    pub declared_components: usize,
    /// Elements with their mass fractions.
    pub components: Vec<(ElementKey, f64)>,
}

impl MaterialData {
    /// `true` once every declared component has been added.
    pub fn is_complete(&self) -> bool {
        self.components.len() == self.declared_components
    }

    /// Mass fraction of `element`, summed over repeated components.
    pub fn mass_fraction(&self, element: ElementKey) -> f64 {
        self.components
            .iter()
            .filter(|(k, _)| *k == element)
            .map(|(_, w)| w)
            .sum()
    }
}

impl TargetStores {
    /// Creates a single-element material from its Z and molar mass.
    ///
    /// A backing element named after the material is registered as well.
    #[allow(clippy::too_many_arguments)]
    pub fn add_simple_material(
        &mut self,
        name: impl Into<String>,
        z: f64,
        a: f64,
        density: f64,
        state: MaterialState,
        temperature: f64,
        pressure: f64,
    ) -> MaterialKey {
        let name = name.into();
        let element = self.add_element(name.clone(), " ", z, a);
        self.materials.insert(MaterialData {
            name,
            density,
            state,
            temperature,
            pressure,
            declared_components: 1,
            components: vec![(element, 1.0)],
        })
    }

    /// Creates an empty material expecting `component_count` components.
    pub fn add_material(
        &mut self,
        name: impl Into<String>,
        density: f64,
        component_count: usize,
        state: MaterialState,
        temperature: f64,
        pressure: f64,
    ) -> MaterialKey {
        self.materials.insert(MaterialData {
            name: name.into(),
            density,
            state,
            temperature,
            pressure,
            declared_components: component_count,
            components: Vec::with_capacity(component_count),
        })
    }

    /// Adds an element with its mass fraction to a material.
    pub fn add_element_to_material(&mut self, material: MaterialKey, element: ElementKey, fraction: f64) -> Result<()> {
        if !self.elements.contains_key(element) {
            return Err(Error::ElementNotFound(element));
        }
        let data = self
            .materials
            .get_mut(material)
            .ok_or(Error::MaterialNotFound(material))?;
        if data.components.len() >= data.declared_components {
            return Err(Error::TooManyComponents {
                name: data.name.clone(),
                declared: data.declared_components,
            });
        }
        data.components.push((element, fraction));
        Ok(())
    }

    pub fn material(&self, key: MaterialKey) -> Option<&MaterialData> {
        self.materials.get(key)
    }

    /// Iterates all registered materials.
    pub fn materials(&self) -> impl Iterator<Item = (MaterialKey, &MaterialData)> + '_ {
        self.materials.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::*;
    use approx::assert_relative_eq;

    #[test]
    fn simple_material_has_one_full_component() {
        let mut stores = TargetStores::new();
        let lead = stores.add_simple_material(
            "Lead",
            82.0,
            207.2 * G_PER_MOLE,
            11.35 * G_PER_CM3,
            MaterialState::Solid,
            STP_TEMPERATURE,
            STP_PRESSURE,
        );
        let data = stores.material(lead).unwrap();
        assert!(data.is_complete());
        let (element, fraction) = data.components[0];
        assert_relative_eq!(fraction, 1.0);
        assert_relative_eq!(stores.element(element).unwrap().z, 82.0);
    }

    #[test]
    fn mixture_rejects_extra_components() {
        let mut stores = TargetStores::new();
        let h = stores.add_element("Hydrogen", "H", 1.0, 1.008 * G_PER_MOLE);
        let o = stores.add_element("Oxygen", "O", 8.0, 15.999 * G_PER_MOLE);
        let water = stores.add_material("Water", G_PER_CM3, 2, MaterialState::Liquid, STP_TEMPERATURE, STP_PRESSURE);

        stores.add_element_to_material(water, h, 0.112).unwrap();
        stores.add_element_to_material(water, o, 0.888).unwrap();
        assert!(stores.material(water).unwrap().is_complete());
        assert_relative_eq!(stores.material(water).unwrap().mass_fraction(o), 0.888);

        let err = stores.add_element_to_material(water, h, 0.1).unwrap_err();
        assert!(matches!(err, Error::TooManyComponents { declared: 2, .. }));
    }
}
