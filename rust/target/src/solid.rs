// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The solid interface used by navigation.
//!
//! Every query works in the solid's local frame, in internal length units.

use std::fmt::Debug;

use nalgebra::{Point3, Vector3};

/// Where a point lies relative to a solid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Inside {
    Inside,
    Surface,
    Outside,
}

/// Geometric queries navigation needs from a solid.
pub trait Solid: Debug {
    fn name(&self) -> &str;

    fn inside(&self, p: &Point3<f64>) -> Inside;

    /// Outward unit normal at (or near) a surface point.
    fn surface_normal(&self, p: &Point3<f64>) -> Vector3<f64>;

    /// Distance along unit `v` from an outside point to the solid, or
    /// [`crate::units::INFINITY`] if the ray misses.
    fn distance_to_in_along(&self, p: &Point3<f64>, v: &Vector3<f64>) -> f64;

    /// Isotropic safety distance from an outside point.
    fn distance_to_in(&self, p: &Point3<f64>) -> f64;

    /// Distance along unit `v` from an inside point to the surface.
    fn distance_to_out_along(&self, p: &Point3<f64>, v: &Vector3<f64>) -> f64;

    /// Isotropic safety distance from an inside point.
    fn distance_to_out(&self, p: &Point3<f64>) -> f64;

    /// Axis-aligned extent as `(min, max)`.
    fn extent(&self) -> (Point3<f64>, Point3<f64>);
}
