// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Placement matrices of source nodes.
//!
//! A transform is a translation in centimeters plus an optional rotation,
//! stored as a row-major 3x3 array.

use nalgebra::{Matrix3, Rotation3, Vector3};

/// Local-to-mother transform of a node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    translation: [f64; 3],
    rotation: Option<[f64; 9]>,
}

impl Transform {
    /// The identity transform.
    pub fn identity() -> Self {
        Self {
            translation: [0.0; 3],
            rotation: None,
        }
    }

    /// A pure translation.
    pub fn translation(dx: f64, dy: f64, dz: f64) -> Self {
        Self {
            translation: [dx, dy, dz],
            rotation: None,
        }
    }

    /// A rotation given as a row-major 3x3 matrix, followed by a translation.
    pub fn combi(rotation: [f64; 9], dx: f64, dy: f64, dz: f64) -> Self {
        Self {
            translation: [dx, dy, dz],
            rotation: Some(rotation),
        }
    }

    /// A rotation of `degrees` about the Z axis.
    pub fn rotation_z(degrees: f64) -> Self {
        let rot = Rotation3::from_axis_angle(&Vector3::z_axis(), degrees.to_radians());
        Self::combi(row_major(rot.matrix()), 0.0, 0.0, 0.0)
    }

    /// Replaces the translation, keeping the rotation.
    pub fn with_translation(mut self, dx: f64, dy: f64, dz: f64) -> Self {
        self.translation = [dx, dy, dz];
        self
    }

    /// Returns the translation vector.
    pub fn translation_vector(&self) -> [f64; 3] {
        self.translation
    }

    /// Returns the row-major rotation matrix, or identity if none is set.
    pub fn rotation_matrix(&self) -> [f64; 9] {
        self.rotation.unwrap_or(IDENTITY)
    }

    /// Returns `true` if the transform carries a non-identity rotation.
    pub fn is_rotation(&self) -> bool {
        self.rotation.is_some_and(|r| r != IDENTITY)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

const IDENTITY: [f64; 9] = [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0];

fn row_major(m: &Matrix3<f64>) -> [f64; 9] {
    let mut out = [0.0; 9];
    for r in 0..3 {
        for c in 0..3 {
            out[r * 3 + c] = m[(r, c)];
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn identity_has_no_rotation() {
        assert!(!Transform::identity().is_rotation());
        assert!(!Transform::translation(1.0, 2.0, 3.0).is_rotation());
        assert!(!Transform::combi(IDENTITY, 0.0, 0.0, 0.0).is_rotation());
    }

    #[test]
    fn rotation_z_is_row_major() {
        let t = Transform::rotation_z(90.0);
        assert!(t.is_rotation());
        let m = t.rotation_matrix();
        // Row 0 is (cos, -sin, 0)
        assert_relative_eq!(m[0], 0.0, epsilon = 1e-12);
        assert_relative_eq!(m[1], -1.0, epsilon = 1e-12);
        assert_relative_eq!(m[3], 1.0, epsilon = 1e-12);
        assert_relative_eq!(m[8], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn with_translation_keeps_rotation() {
        let t = Transform::rotation_z(30.0).with_translation(1.0, 0.0, -2.0);
        assert!(t.is_rotation());
        assert_eq!(t.translation_vector(), [1.0, 0.0, -2.0]);
    }
}
