// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Internal unit system of the target model.
//!
//! Base units: millimeter, nanosecond, MeV, positron charge, kelvin, mole.
//! A quantity `q` expressed in unit `u` is stored as `q * u`.

pub const MM: f64 = 1.0;
pub const CM: f64 = 10.0 * MM;
pub const M: f64 = 1000.0 * MM;
pub const CM3: f64 = CM * CM * CM;

pub const NS: f64 = 1.0;
pub const S: f64 = 1.0e9 * NS;

pub const MEV: f64 = 1.0;
/// Elementary charge in coulomb.
pub const E_SI: f64 = 1.602_176_634e-19;
pub const EV: f64 = 1.0e-6 * MEV;
pub const JOULE: f64 = EV / E_SI;

pub const KG: f64 = JOULE * S * S / (M * M);
pub const GRAM: f64 = 1.0e-3 * KG;

pub const KELVIN: f64 = 1.0;
pub const MOLE: f64 = 1.0;

pub const G_PER_MOLE: f64 = GRAM / MOLE;
pub const G_PER_CM3: f64 = GRAM / CM3;

pub const NEWTON: f64 = JOULE / M;
pub const PASCAL: f64 = NEWTON / (M * M);
pub const ATMOSPHERE: f64 = 101_325.0 * PASCAL;

/// Mean density of the universe.
pub const UNIVERSE_MEAN_DENSITY: f64 = 1.0e-25 * G_PER_CM3;
pub const STP_TEMPERATURE: f64 = 273.15 * KELVIN;
pub const STP_PRESSURE: f64 = ATMOSPHERE;

/// Distance reported when a ray never reaches a solid.
pub const INFINITY: f64 = 9.0e99;

/// Half-width of the surface band used by [`crate::Solid::inside`].
pub const SURFACE_TOLERANCE: f64 = 1.0e-9 * MM;
