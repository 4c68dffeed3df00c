// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Conversion configuration.
//!
//! Defaults reproduce the standard setup: the source model measures lengths
//! in centimeters, densities in g/cm3, molar masses in g/mole, pressures in
//! pascal and temperatures in kelvin. Ill-defined materials become a fixed
//! near-vacuum hydrogen gas.

use std::path::Path;

use serde::{Deserialize, Serialize};

use geobridge_target::units;

use crate::error::{Error, Result};

/// Environment variable naming a JSON configuration file.
pub const CONFIG_ENV: &str = "GEOBRIDGE_CONFIG";

/// Value of one source unit expressed in target internal units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnitSystem {
    pub length: f64,
    pub density: f64,
    pub molar_mass: f64,
    pub pressure: f64,
    pub temperature: f64,
}

impl Default for UnitSystem {
    fn default() -> Self {
        Self {
            length: units::CM,
            density: units::G_PER_CM3,
            molar_mass: units::G_PER_MOLE,
            pressure: units::PASCAL,
            temperature: units::KELVIN,
        }
    }
}

/// The gas substituted for materials with a density below the threshold
/// or an atomic number below 1. Values are in target internal units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VacuumPolicy {
    pub density_threshold: f64,
    pub density: f64,
    pub z: f64,
    pub a: f64,
    pub temperature: f64,
    pub pressure: f64,
}

impl Default for VacuumPolicy {
    fn default() -> Self {
        Self {
            density_threshold: units::UNIVERSE_MEAN_DENSITY,
            density: units::UNIVERSE_MEAN_DENSITY,
            z: 1.0,
            a: 1.01 * units::G_PER_MOLE,
            temperature: units::STP_TEMPERATURE,
            pressure: 3.0e-18 * units::PASCAL,
        }
    }
}

/// Settings of a geometry conversion.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionConfig {
    pub units: UnitSystem,
    pub vacuum: VacuumPolicy,
}

impl ConversionConfig {
    /// Parses a JSON document. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads the JSON file at `path`.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("cannot read {}: {}", path.display(), e)))?;
        Self::from_json(&json)
    }

    /// Loads the file named by `GEOBRIDGE_CONFIG`, or the defaults if the
    /// variable is unset.
    pub fn from_env() -> Result<Self> {
        match std::env::var(CONFIG_ENV) {
            Ok(path) if !path.is_empty() => {
                tracing::debug!(path = %path, "Loading conversion configuration");
                Self::from_file(path)
            }
            _ => Ok(Self::default()),
        }
    }

    /// Checks that every unit scale is a positive, finite number and that
    /// the vacuum gas is physical.
    pub fn validate(&self) -> Result<()> {
        let scales = [
            ("units.length", self.units.length),
            ("units.density", self.units.density),
            ("units.molar_mass", self.units.molar_mass),
            ("units.pressure", self.units.pressure),
            ("units.temperature", self.units.temperature),
        ];
        for (name, value) in scales {
            if !(value.is_finite() && value > 0.0) {
                return Err(Error::Config(format!("{name} must be positive, got {value}")));
            }
        }
        let vacuum = [
            ("vacuum.density_threshold", self.vacuum.density_threshold),
            ("vacuum.density", self.vacuum.density),
            ("vacuum.z", self.vacuum.z),
            ("vacuum.a", self.vacuum.a),
            ("vacuum.temperature", self.vacuum.temperature),
            ("vacuum.pressure", self.vacuum.pressure),
        ];
        for (name, value) in vacuum {
            if !(value.is_finite() && value >= 0.0) {
                return Err(Error::Config(format!("{name} must be non-negative, got {value}")));
            }
        }
        if self.vacuum.density == 0.0 {
            return Err(Error::Config("vacuum.density must be positive".into()));
        }
        Ok(())
    }
}
