//! Numeric helpers on top of `glam`.
//!
//! Every helper here resolves degenerate input (zero-length quaternions,
//! zero scale, singular matrices) to a well-defined fallback instead of
//! producing NaN.

use glam::{Mat4, Quat, Vec3, Vec4};

/// Threshold below which lengths, determinants and scale components are
/// treated as zero.
pub const EPSILON: f32 = 1e-6;

/// Normalizes `q`, falling back to identity for a zero-length quaternion.
#[inline]
#[must_use]
pub fn normalize_or_identity(q: Quat) -> Quat {
    let len_sq = q.length_squared();
    if len_sq <= EPSILON {
        return Quat::IDENTITY;
    }
    q * len_sq.sqrt().recip()
}

/// Inverse of a (possibly non-unit) quaternion; identity when degenerate.
#[inline]
#[must_use]
pub fn inverse_or_identity(q: Quat) -> Quat {
    let len_sq = q.length_squared();
    if len_sq <= EPSILON {
        return Quat::IDENTITY;
    }
    let recip = len_sq.recip();
    Quat::from_xyzw(-q.x * recip, -q.y * recip, -q.z * recip, q.w * recip)
}

/// Flips `b` onto the hemisphere of `a` so that blending the two follows the
/// shorter arc.
#[inline]
#[must_use]
pub fn neighborhood(a: Quat, b: Quat) -> Quat {
    if a.dot(b) < 0.0 { -b } else { b }
}

/// Normalized linear blend along the shorter arc.
///
/// The blend happens in 4D; a result that collapses to zero length resolves
/// to `a`.
#[must_use]
pub fn nlerp_shortest(a: Quat, b: Quat, t: f32) -> Quat {
    let b = neighborhood(a, b);
    let mixed = Vec4::from(a).lerp(Vec4::from(b), t);
    if mixed.length_squared() <= EPSILON {
        return a;
    }
    Quat::from_vec4(mixed.normalize())
}

/// Component-wise reciprocal; components with `|c| < EPSILON` map to zero.
#[inline]
#[must_use]
pub fn reciprocal_or_zero(v: Vec3) -> Vec3 {
    let recip = |c: f32| if c.abs() < EPSILON { 0.0 } else { c.recip() };
    Vec3::new(recip(v.x), recip(v.y), recip(v.z))
}

/// Matrix inverse that yields identity for singular input.
#[inline]
#[must_use]
pub fn inverse_matrix_or_identity(m: &Mat4) -> Mat4 {
    if m.determinant().abs() <= EPSILON {
        return Mat4::IDENTITY;
    }
    m.inverse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_quat_normalizes_to_identity() {
        let q = Quat::from_xyzw(0.0, 0.0, 0.0, 0.0);
        assert_eq!(normalize_or_identity(q), Quat::IDENTITY);
        assert_eq!(inverse_or_identity(q), Quat::IDENTITY);
    }

    #[test]
    fn neighborhood_flips_obtuse_pair() {
        let a = Quat::IDENTITY;
        let b = Quat::from_xyzw(0.0, 0.0, 0.0, -1.0);
        assert_eq!(neighborhood(a, b), Quat::IDENTITY);
        assert_eq!(neighborhood(a, a), a);
    }

    #[test]
    fn reciprocal_guards_zero_components() {
        let r = reciprocal_or_zero(Vec3::new(2.0, 0.0, -4.0));
        assert_eq!(r, Vec3::new(0.5, 0.0, -0.25));
    }

    #[test]
    fn singular_matrix_inverts_to_identity() {
        let m = Mat4::from_scale(Vec3::new(1.0, 0.0, 1.0));
        assert_eq!(inverse_matrix_or_identity(&m), Mat4::IDENTITY);
    }
}
