use glam::{Quat, Vec3, Vec4};
use sinew_core::math::{neighborhood, nlerp_shortest, normalize_or_identity};

/// Value kinds a [`KeyframeTrack`](crate::tracks::KeyframeTrack) can carry.
///
/// Each kind supplies its own blending rules; the track only handles time.
/// `Default` is the value returned when a track is too short to sample.
pub trait Interpolatable: Copy + Default + Sized {
    /// Number of `f32` components one value occupies in a raw channel.
    const COMPONENTS: usize;

    /// Tangent that contributes nothing to a cubic segment.
    ///
    /// Differs from `Default` for `Quat`, whose default is the identity
    /// rotation rather than the zero quaternion.
    const ZERO_TANGENT: Self;

    /// Builds a value from the first [`Self::COMPONENTS`] floats.
    ///
    /// # Panics
    ///
    /// Panics if `components` holds fewer than [`Self::COMPONENTS`] floats.
    fn from_components(components: &[f32]) -> Self;

    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self;

    /// Cubic Hermite interpolation between `p1` and `p2` with tangents `s1`
    /// (leaving `p1`) and `s2` (arriving at `p2`).
    fn hermite(t: f32, p1: Self, s1: Self, p2: Self, s2: Self) -> Self;

    /// Returns `b`, adjusted so that blending from `a` takes the short path.
    #[inline]
    fn neighborhood(_a: Self, b: Self) -> Self {
        b
    }
}

/// Hermite basis `[h1, h2, h3, h4]` weighting `p1`, `p2`, `s1`, `s2`.
#[inline]
#[must_use]
pub fn hermite_basis(t: f32) -> [f32; 4] {
    let t2 = t * t;
    let t3 = t2 * t;
    [
        2.0 * t3 - 3.0 * t2 + 1.0,
        -2.0 * t3 + 3.0 * t2,
        t3 - 2.0 * t2 + t,
        t3 - t2,
    ]
}

impl Interpolatable for f32 {
    const COMPONENTS: usize = 1;
    const ZERO_TANGENT: Self = 0.0;

    fn from_components(components: &[f32]) -> Self {
        components[0]
    }

    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self {
        start + (end - start) * t
    }

    fn hermite(t: f32, p1: Self, s1: Self, p2: Self, s2: Self) -> Self {
        let [h1, h2, h3, h4] = hermite_basis(t);
        p1 * h1 + p2 * h2 + s1 * h3 + s2 * h4
    }
}

impl Interpolatable for Vec3 {
    const COMPONENTS: usize = 3;
    const ZERO_TANGENT: Self = Vec3::ZERO;

    fn from_components(components: &[f32]) -> Self {
        Vec3::new(components[0], components[1], components[2])
    }

    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self {
        start.lerp(end, t)
    }

    fn hermite(t: f32, p1: Self, s1: Self, p2: Self, s2: Self) -> Self {
        let [h1, h2, h3, h4] = hermite_basis(t);
        p1 * h1 + p2 * h2 + s1 * h3 + s2 * h4
    }
}

impl Interpolatable for Quat {
    const COMPONENTS: usize = 4;
    const ZERO_TANGENT: Self = Quat::from_xyzw(0.0, 0.0, 0.0, 0.0);

    /// Components are in `x, y, z, w` order.
    fn from_components(components: &[f32]) -> Self {
        Quat::from_xyzw(components[0], components[1], components[2], components[3])
    }

    /// Normalized blend along the shorter arc; never the "long way around".
    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self {
        nlerp_shortest(start, end, t)
    }

    fn hermite(t: f32, p1: Self, s1: Self, p2: Self, s2: Self) -> Self {
        let p2 = Self::neighborhood(p1, p2);
        let [h1, h2, h3, h4] = hermite_basis(t);

        let result = Vec4::from(p1) * h1
            + Vec4::from(p2) * h2
            + Vec4::from(s1) * h3
            + Vec4::from(s2) * h4;

        normalize_or_identity(Quat::from_vec4(result))
    }

    fn neighborhood(a: Self, b: Self) -> Self {
        neighborhood(a, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_components_reads_leading_floats() {
        assert_eq!(Vec3::from_components(&[1.0, 2.0, 3.0, 9.0]), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(
            Quat::from_components(&[0.0, 0.0, 0.0, 1.0]),
            Quat::IDENTITY
        );
    }

    #[test]
    #[should_panic(expected = "index out of bounds")]
    fn from_components_panics_on_short_slice() {
        let _ = Vec3::from_components(&[1.0, 2.0]);
    }

    #[test]
    fn zero_tangents_are_additive_identity() {
        assert_eq!(Vec4::from(Quat::ZERO_TANGENT), Vec4::ZERO);
        assert_eq!(Vec3::ZERO_TANGENT, Vec3::ZERO);
        assert_eq!(f32::ZERO_TANGENT, 0.0);
    }
}
