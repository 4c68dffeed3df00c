// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Shapes of the source geometry.
//!
//! A shape answers geometric queries in its own local frame, in centimeters.
//! Only a couple of reference primitives live here; any other shape can be
//! plugged in through the [`Shape`] trait.

use std::fmt::Debug;

use nalgebra::{Point3, Vector3};

/// Distance returned when a ray never reaches the shape.
pub const BIG: f64 = 1.0e30;

/// Axis-aligned bounding box in the shape's local frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Point3<f64>,
    pub max: Point3<f64>,
}

impl Aabb {
    pub fn new(min: Point3<f64>, max: Point3<f64>) -> Self {
        Self { min, max }
    }

    /// Half lengths along each axis.
    pub fn half_extents(&self) -> Vector3<f64> {
        (self.max - self.min) * 0.5
    }
}

/// Geometric capabilities of a source shape.
pub trait Shape: Debug {
    fn name(&self) -> &str;

    /// Returns `true` if `point` lies inside or on the surface.
    fn contains(&self, point: &Point3<f64>) -> bool;

    /// Distance from `point` to the closest surface. `inside` tells the
    /// shape on which side the point is known to be; the result may
    /// underestimate the exact distance.
    fn safety(&self, point: &Point3<f64>, inside: bool) -> f64;

    /// Distance from an inside `point` to the surface along unit `dir`.
    fn distance_from_inside(&self, point: &Point3<f64>, dir: &Vector3<f64>) -> f64;

    /// Distance from an outside `point` to the surface along unit `dir`, or
    /// [`BIG`] if the ray misses.
    fn distance_from_outside(&self, point: &Point3<f64>, dir: &Vector3<f64>) -> f64;

    /// Outward unit normal of the surface closest to `point`.
    fn compute_normal(&self, point: &Point3<f64>) -> Vector3<f64>;

    fn bounding_box(&self) -> Aabb;
}

/// Box centered on the origin, given by its half lengths.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxShape {
    name: String,
    half: Vector3<f64>,
}

impl BoxShape {
    pub fn new(name: impl Into<String>, dx: f64, dy: f64, dz: f64) -> Self {
        Self {
            name: name.into(),
            half: Vector3::new(dx, dy, dz),
        }
    }

    pub fn half_lengths(&self) -> Vector3<f64> {
        self.half
    }
}

impl Shape for BoxShape {
    fn name(&self) -> &str {
        &self.name
    }

    fn contains(&self, point: &Point3<f64>) -> bool {
        (0..3).all(|i| point[i].abs() <= self.half[i])
    }

    fn safety(&self, point: &Point3<f64>, inside: bool) -> f64 {
        let gaps = Vector3::from_fn(|i, _| self.half[i] - point[i].abs());
        if inside {
            gaps.min()
        } else {
            (-gaps).max()
        }
    }

    fn distance_from_inside(&self, point: &Point3<f64>, dir: &Vector3<f64>) -> f64 {
        let mut dist = BIG;
        for i in 0..3 {
            if dir[i] != 0.0 {
                let wall = self.half[i].copysign(dir[i]);
                dist = dist.min(((wall - point[i]) / dir[i]).max(0.0));
            }
        }
        dist
    }

    fn distance_from_outside(&self, point: &Point3<f64>, dir: &Vector3<f64>) -> f64 {
        let mut near = f64::NEG_INFINITY;
        let mut far = f64::INFINITY;
        for i in 0..3 {
            if dir[i] == 0.0 {
                if point[i].abs() > self.half[i] {
                    return BIG;
                }
                continue;
            }
            let t1 = (-self.half[i] - point[i]) / dir[i];
            let t2 = (self.half[i] - point[i]) / dir[i];
            near = near.max(t1.min(t2));
            far = far.min(t1.max(t2));
        }
        if far < near.max(0.0) {
            return BIG;
        }
        near.max(0.0)
    }

    fn compute_normal(&self, point: &Point3<f64>) -> Vector3<f64> {
        let mut axis = 0;
        let mut best = f64::INFINITY;
        for i in 0..3 {
            let gap = (self.half[i] - point[i].abs()).abs();
            if gap < best {
                best = gap;
                axis = i;
            }
        }
        let mut normal = Vector3::zeros();
        normal[axis] = 1.0_f64.copysign(point[axis]);
        normal
    }

    fn bounding_box(&self) -> Aabb {
        Aabb::new(Point3::from(-self.half), Point3::from(self.half))
    }
}

/// Solid sphere centered on the origin.
#[derive(Debug, Clone, PartialEq)]
pub struct Sphere {
    name: String,
    radius: f64,
}

impl Sphere {
    pub fn new(name: impl Into<String>, radius: f64) -> Self {
        Self {
            name: name.into(),
            radius,
        }
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }
}

impl Shape for Sphere {
    fn name(&self) -> &str {
        &self.name
    }

    fn contains(&self, point: &Point3<f64>) -> bool {
        point.coords.norm() <= self.radius
    }

    fn safety(&self, point: &Point3<f64>, _inside: bool) -> f64 {
        (self.radius - point.coords.norm()).abs()
    }

    fn distance_from_inside(&self, point: &Point3<f64>, dir: &Vector3<f64>) -> f64 {
        let b = point.coords.dot(dir);
        let c = point.coords.norm_squared() - self.radius * self.radius;
        let disc = (b * b - c).max(0.0);
        (-b + disc.sqrt()).max(0.0)
    }

    fn distance_from_outside(&self, point: &Point3<f64>, dir: &Vector3<f64>) -> f64 {
        let b = point.coords.dot(dir);
        let c = point.coords.norm_squared() - self.radius * self.radius;
        if c <= 0.0 {
            return 0.0;
        }
        let disc = b * b - c;
        if disc < 0.0 || b > 0.0 {
            return BIG;
        }
        -b - disc.sqrt()
    }

    fn compute_normal(&self, point: &Point3<f64>) -> Vector3<f64> {
        point.coords.try_normalize(f64::EPSILON).unwrap_or_else(Vector3::z)
    }

    fn bounding_box(&self) -> Aabb {
        let r = Vector3::repeat(self.radius);
        Aabb::new(Point3::from(-r), Point3::from(r))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn box_containment_and_safety() {
        let b = BoxShape::new("box", 1.0, 2.0, 3.0);
        assert_relative_eq!(b.half_lengths(), Vector3::new(1.0, 2.0, 3.0));
        assert!(b.contains(&Point3::new(0.5, -1.5, 2.9)));
        assert!(!b.contains(&Point3::new(1.5, 0.0, 0.0)));
        assert_relative_eq!(b.safety(&Point3::new(0.5, 0.0, 0.0), true), 0.5);
        assert_relative_eq!(b.safety(&Point3::new(4.0, 0.0, 0.0), false), 3.0);
    }

    #[test]
    fn box_ray_distances() {
        let b = BoxShape::new("box", 1.0, 1.0, 1.0);
        let origin = Point3::origin();
        assert_relative_eq!(b.distance_from_inside(&origin, &Vector3::x()), 1.0);

        let outside = Point3::new(-5.0, 0.0, 0.0);
        assert_relative_eq!(b.distance_from_outside(&outside, &Vector3::x()), 4.0);
        assert_eq!(b.distance_from_outside(&outside, &Vector3::y()), BIG);
        assert_eq!(b.distance_from_outside(&outside, &-Vector3::x()), BIG);
    }

    #[test]
    fn box_normal_points_to_nearest_face() {
        let b = BoxShape::new("box", 1.0, 1.0, 1.0);
        let n = b.compute_normal(&Point3::new(0.1, -0.99, 0.0));
        assert_relative_eq!(n, -Vector3::y());
    }

    #[test]
    fn sphere_ray_distances() {
        let s = Sphere::new("ball", 2.0);
        assert_relative_eq!(s.distance_from_inside(&Point3::origin(), &Vector3::z()), 2.0);
        let outside = Point3::new(0.0, 0.0, -10.0);
        assert_relative_eq!(s.distance_from_outside(&outside, &Vector3::z()), 8.0);
        assert_eq!(s.distance_from_outside(&outside, &Vector3::x()), BIG);
        assert_relative_eq!(s.safety(&Point3::new(3.0, 0.0, 0.0), false), 1.0);
    }

    #[test]
    fn bounding_boxes() {
        let s = Sphere::new("ball", 2.0);
        assert_relative_eq!(s.bounding_box().half_extents(), Vector3::repeat(2.0));
        let b = BoxShape::new("box", 1.0, 2.0, 3.0);
        assert_relative_eq!(b.bounding_box().max, Point3::new(1.0, 2.0, 3.0));
    }
}
