use glam::{Mat4, Quat, Vec3};

use crate::math::{inverse_or_identity, nlerp_shortest, reciprocal_or_zero};

/// Rigid transform: position, rotation and scale (TRS).
///
/// Plain value type. Joints of a pose store their local transform in this
/// form; hierarchy resolution combines them parent-first with
/// [`Transform::combine`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    #[must_use]
    pub const fn new(position: Vec3, rotation: Quat, scale: Vec3) -> Self {
        Self {
            position,
            rotation,
            scale,
        }
    }

    #[must_use]
    pub const fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    #[must_use]
    pub const fn from_rotation(rotation: Quat) -> Self {
        Self {
            rotation,
            ..Self::IDENTITY
        }
    }

    // ========================================================================
    // Composition
    // ========================================================================

    /// Places `child` (expressed in `parent`'s space) into the space `parent`
    /// lives in.
    ///
    /// Scale multiplies component-wise, rotations compose parent-first, and
    /// the child's position is scaled, rotated and offset by the parent.
    #[must_use]
    pub fn combine(parent: &Self, child: &Self) -> Self {
        Self {
            position: parent.position + parent.rotation * (parent.scale * child.position),
            rotation: parent.rotation * child.rotation,
            scale: parent.scale * child.scale,
        }
    }

    /// Inverse transform.
    ///
    /// Zero scale components invert to zero; a zero-length rotation inverts
    /// to identity. `combine(&t.inverse(), &t)` is identity for any
    /// non-degenerate `t`.
    #[must_use]
    pub fn inverse(&self) -> Self {
        let rotation = inverse_or_identity(self.rotation);
        let scale = reciprocal_or_zero(self.scale);
        Self {
            position: rotation * (scale * -self.position),
            rotation,
            scale,
        }
    }

    /// Linear blend between two transforms.
    ///
    /// Position and scale lerp; rotation blends along the shorter arc.
    #[must_use]
    pub fn mix(from: &Self, to: &Self, t: f32) -> Self {
        Self {
            position: from.position.lerp(to.position, t),
            rotation: nlerp_shortest(from.rotation, to.rotation, t),
            scale: from.scale.lerp(to.scale, t),
        }
    }

    // ========================================================================
    // Matrix conversion
    // ========================================================================

    /// Column-major TRS matrix.
    #[inline]
    #[must_use]
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }

    /// Decomposes a TRS matrix.
    ///
    /// Shear cannot be represented and is lost.
    #[must_use]
    pub fn from_matrix(matrix: &Mat4) -> Self {
        let (scale, rotation, position) = matrix.to_scale_rotation_translation();
        Self {
            position,
            rotation,
            scale,
        }
    }

    // ========================================================================
    // Application
    // ========================================================================

    #[inline]
    #[must_use]
    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        self.rotation * (self.scale * point) + self.position
    }

    /// Like [`Self::transform_point`] but ignores the translation.
    #[inline]
    #[must_use]
    pub fn transform_vector(&self, vector: Vec3) -> Vec3 {
        self.rotation * (self.scale * vector)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl From<Transform> for Mat4 {
    fn from(t: Transform) -> Self {
        t.to_matrix()
    }
}
