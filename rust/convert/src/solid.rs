// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Solid adapters wrapping source shapes.
//!
//! [`GenericSolid`] answers target queries by delegating to the source shape.
//! Points arrive in target length units and are scaled down to source units
//! before the call; distances are scaled back up. A source miss ([`BIG`])
//! becomes the target's [`INFINITY`].

use std::fmt::Debug;
use std::sync::Arc;

use nalgebra::{Point3, Vector3};

use geobridge_source::shape::BIG;
use geobridge_source::Shape;
use geobridge_target::units::{INFINITY, SURFACE_TOLERANCE};
use geobridge_target::{Inside, Solid};

/// Builds target solids from source shapes.
///
/// Returning `None` means the shape cannot be represented; the conversion
/// then fails for the volume using it.
pub trait SolidFactory: Debug {
    /// `length_scale` is the target value of one source length unit.
    fn make_solid(&self, shape: &Arc<dyn Shape>, length_scale: f64) -> Option<Box<dyn Solid>>;
}

/// Factory wrapping every shape into a [`GenericSolid`].
#[derive(Debug, Clone, Copy, Default)]
pub struct GenericSolidFactory;

impl SolidFactory for GenericSolidFactory {
    fn make_solid(&self, shape: &Arc<dyn Shape>, length_scale: f64) -> Option<Box<dyn Solid>> {
        Some(Box::new(GenericSolid::new(Arc::clone(shape), length_scale)))
    }
}

/// Target solid delegating to a shared source shape.
#[derive(Debug, Clone)]
pub struct GenericSolid {
    name: String,
    shape: Arc<dyn Shape>,
    scale: f64,
}

impl GenericSolid {
    pub fn new(shape: Arc<dyn Shape>, length_scale: f64) -> Self {
        Self {
            name: shape.name().to_string(),
            shape,
            scale: length_scale,
        }
    }

    /// The wrapped source shape.
    pub fn shape(&self) -> &Arc<dyn Shape> {
        &self.shape
    }

    pub fn length_scale(&self) -> f64 {
        self.scale
    }

    fn to_source(&self, p: &Point3<f64>) -> Point3<f64> {
        Point3::from(p.coords / self.scale)
    }

    fn to_target(&self, distance: f64) -> f64 {
        if distance >= BIG {
            INFINITY
        } else {
            distance * self.scale
        }
    }
}

impl Solid for GenericSolid {
    fn name(&self) -> &str {
        &self.name
    }

    fn inside(&self, p: &Point3<f64>) -> Inside {
        let local = self.to_source(p);
        let contained = self.shape.contains(&local);
        let safety = self.shape.safety(&local, contained) * self.scale;
        if safety <= 0.5 * SURFACE_TOLERANCE {
            Inside::Surface
        } else if contained {
            Inside::Inside
        } else {
            Inside::Outside
        }
    }

    fn surface_normal(&self, p: &Point3<f64>) -> Vector3<f64> {
        self.shape.compute_normal(&self.to_source(p))
    }

    fn distance_to_in_along(&self, p: &Point3<f64>, v: &Vector3<f64>) -> f64 {
        self.to_target(self.shape.distance_from_outside(&self.to_source(p), v))
    }

    fn distance_to_in(&self, p: &Point3<f64>) -> f64 {
        self.to_target(self.shape.safety(&self.to_source(p), false))
    }

    fn distance_to_out_along(&self, p: &Point3<f64>, v: &Vector3<f64>) -> f64 {
        self.to_target(self.shape.distance_from_inside(&self.to_source(p), v))
    }

    fn distance_to_out(&self, p: &Point3<f64>) -> f64 {
        self.to_target(self.shape.safety(&self.to_source(p), true))
    }

    fn extent(&self) -> (Point3<f64>, Point3<f64>) {
        let bbox = self.shape.bounding_box();
        (bbox.min * self.scale, bbox.max * self.scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use geobridge_source::BoxShape;
    use geobridge_target::units::CM;

    fn box_solid() -> Box<dyn Solid> {
        let shape: Arc<dyn Shape> = Arc::new(BoxShape::new("slab", 1.0, 2.0, 3.0));
        GenericSolidFactory.make_solid(&shape, CM).unwrap()
    }

    #[test]
    fn queries_are_scaled_to_target_units() {
        let solid = box_solid();
        assert_eq!(solid.name(), "slab");

        // 5 mm from the center is 0.5 cm, well inside the 1 cm half length.
        let p = Point3::new(5.0, 0.0, 0.0);
        assert_eq!(solid.inside(&p), Inside::Inside);
        assert_relative_eq!(solid.distance_to_out(&p), 5.0);
        assert_relative_eq!(solid.distance_to_out_along(&p, &Vector3::x()), 5.0);

        let outside = Point3::new(-50.0, 0.0, 0.0);
        assert_eq!(solid.inside(&outside), Inside::Outside);
        assert_relative_eq!(solid.distance_to_in(&outside), 40.0);
        assert_relative_eq!(solid.distance_to_in_along(&outside, &Vector3::x()), 40.0);
    }

    #[test]
    fn miss_maps_to_infinity() {
        let solid = box_solid();
        let outside = Point3::new(-50.0, 0.0, 0.0);
        assert_eq!(solid.distance_to_in_along(&outside, &Vector3::y()), INFINITY);
    }

    #[test]
    fn surface_band_and_extent() {
        let solid = box_solid();
        assert_eq!(solid.inside(&Point3::new(10.0, 0.0, 0.0)), Inside::Surface);
        assert_relative_eq!(solid.surface_normal(&Point3::new(10.0, 0.0, 0.0)), Vector3::x());

        let (min, max) = solid.extent();
        assert_relative_eq!(min, Point3::new(-10.0, -20.0, -30.0));
        assert_relative_eq!(max, Point3::new(10.0, 20.0, 30.0));
    }
}
