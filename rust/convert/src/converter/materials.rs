// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Element and material conversion.

use tracing::{debug, info};

use geobridge_source::{self as source, Composition, SourceGeometry};
use geobridge_target::{self as target, MaterialState};

use super::GeometryConverter;
use crate::error::{Error, Result};

/// Map a source material state onto the target one.
pub(crate) fn target_state(state: source::MaterialState) -> MaterialState {
    match state {
        source::MaterialState::Undefined => MaterialState::Undefined,
        source::MaterialState::Solid => MaterialState::Solid,
        source::MaterialState::Liquid => MaterialState::Liquid,
        source::MaterialState::Gas => MaterialState::Gas,
    }
}

impl GeometryConverter {
    /// Convert every source material in list order
    ///
    /// Returns the number of converted materials.
    pub fn convert_materials(&mut self, source: &SourceGeometry) -> Result<usize> {
        for (key, _) in source.materials() {
            self.convert_material(source, key)?;
        }
        let count = self.caches.materials.len();
        info!(materials = count, "Materials converted");
        Ok(count)
    }

    /// Convert one material, or return its cached counterpart
    pub fn convert_material(
        &mut self,
        source: &SourceGeometry,
        key: source::MaterialKey,
    ) -> Result<target::MaterialKey> {
        const OPERATION: &str = "convert material";

        if let Some(converted) = self.caches.materials.get(key) {
            return Ok(converted);
        }
        let material = source.material(key).ok_or_else(|| Error::MissingSourceEntity {
            operation: OPERATION,
            entity: format!("{key:?}"),
        })?;

        let units = self.config.units;
        let vacuum = self.config.vacuum;
        let name = material.name.clone();
        let density = material.density * units.density;
        let z = source.material_z(key).unwrap_or(0.0);
        let state = target_state(material.state);
        let temperature = material.temperature * units.temperature;
        let pressure = material.pressure * units.pressure;

        let converted = if density < vacuum.density_threshold || z < 1.0 {
            debug!(material = %name, density, z, "Substituting vacuum for ill-defined material");
            self.stores.add_simple_material(
                name,
                vacuum.z,
                vacuum.a,
                vacuum.density,
                MaterialState::Gas,
                vacuum.temperature,
                vacuum.pressure,
            )
        } else {
            match &material.composition {
                Composition::Mixture(components) => {
                    // Elements first, so a failing component leaves no material shell.
                    let mut elements = Vec::with_capacity(components.len());
                    for component in components {
                        let element = self.convert_element(source, component.element)?;
                        elements.push((element, component.weight));
                    }
                    let shell =
                        self.stores
                            .add_material(name, density, elements.len(), state, temperature, pressure);
                    for (element, weight) in elements {
                        self.stores.add_element_to_material(shell, element, weight)?;
                    }
                    shell
                }
                Composition::Element {
                    element: Some(element),
                    ..
                } if source.element(*element).is_some_and(|e| e.has_isotopes()) => {
                    let element = self.convert_element(source, *element)?;
                    let shell = self
                        .stores
                        .add_material(name, density, 1, state, temperature, pressure);
                    self.stores.add_element_to_material(shell, element, 1.0)?;
                    shell
                }
                Composition::Element { z, a, .. } => self.stores.add_simple_material(
                    name,
                    *z,
                    *a * units.molar_mass,
                    density,
                    state,
                    temperature,
                    pressure,
                ),
            }
        };

        self.caches.materials.insert(key, converted);
        Ok(converted)
    }

    /// Convert one element
    ///
    /// An element already registered under the source element's display name
    /// is reused. Elements carrying isotopes are rebuilt from them; all others
    /// come from the canonical element table.
    pub fn convert_element(
        &mut self,
        source: &SourceGeometry,
        key: source::ElementKey,
    ) -> Result<target::ElementKey> {
        const OPERATION: &str = "convert element";

        let element = source.element(key).ok_or_else(|| Error::MissingSourceEntity {
            operation: OPERATION,
            entity: format!("{key:?}"),
        })?;
        if let Some(existing) = self.stores.element_by_name(&element.name) {
            self.caches.elements.insert(key, existing);
            return Ok(existing);
        }
        if let Some(converted) = self.caches.elements.get(key) {
            return Ok(converted);
        }

        let table = source.element_table();
        let molar_mass = self.config.units.molar_mass;
        let converted = if element.has_isotopes() {
            let first_z = element.isotopes[0].isotope.z;
            let symbol = table
                .element(first_z)
                .ok_or_else(|| Error::UnknownElement {
                    operation: OPERATION,
                    element: element.name.clone(),
                    z: first_z,
                })?
                .symbol
                .clone();

            let isotopes: Vec<_> = element
                .isotopes
                .iter()
                .map(|fraction| {
                    let iso = &fraction.isotope;
                    let key = self
                        .stores
                        .add_isotope(iso.name.clone(), iso.z, iso.n, iso.a * molar_mass);
                    (key, fraction.abundance)
                })
                .collect();

            let built = self
                .stores
                .add_isotopic_element(element.name.clone(), symbol, isotopes.len());
            for (isotope, abundance) in isotopes.iter().copied() {
                self.stores.add_isotope_to_element(built, isotope, abundance)?;
            }
            debug!(element = %element.name, isotopes = isotopes.len(), "Element built from isotopes");
            built
        } else {
            let canonical = table.element(element.z).ok_or_else(|| Error::UnknownElement {
                operation: OPERATION,
                element: element.name.clone(),
                z: element.z,
            })?;
            match self.stores.element_by_name(&canonical.name) {
                Some(existing) => existing,
                None => self.stores.add_element(
                    canonical.name.clone(),
                    canonical.symbol.clone(),
                    canonical.z as f64,
                    canonical.a * molar_mass,
                ),
            }
        };

        self.caches.elements.insert(key, converted);
        Ok(converted)
    }
}
