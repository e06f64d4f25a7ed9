//! Transform Tests
//!
//! Tests for:
//! - Hierarchical composition and inversion
//! - Degenerate input (zero scale, zero-length rotation)
//! - Blending
//! - Matrix conversion and point/vector application

use std::f32::consts::FRAC_PI_2;

use glam::{Mat4, Quat, Vec3};

use sinew::Transform;

const EPSILON: f32 = 1e-5;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn vec3_approx(a: Vec3, b: Vec3) -> bool {
    (a - b).length() < EPSILON
}

fn quat_approx(a: Quat, b: Quat) -> bool {
    a.dot(b).abs() > 1.0 - EPSILON
}

fn transform_approx(a: &Transform, b: &Transform) -> bool {
    vec3_approx(a.position, b.position)
        && quat_approx(a.rotation, b.rotation)
        && vec3_approx(a.scale, b.scale)
}

fn sample_transform() -> Transform {
    Transform::new(
        Vec3::new(3.0, -2.0, 0.5),
        Quat::from_euler(glam::EulerRot::YXZ, 0.4, -1.1, 0.25),
        Vec3::new(2.0, 0.5, 1.5),
    )
}

// ============================================================================
// Defaults
// ============================================================================

#[test]
fn transform_default_is_identity() {
    let t = Transform::default();
    assert_eq!(t.position, Vec3::ZERO);
    assert_eq!(t.rotation, Quat::IDENTITY);
    assert_eq!(t.scale, Vec3::ONE);
    assert_eq!(t, Transform::IDENTITY);
}

// ============================================================================
// Composition
// ============================================================================

#[test]
fn combine_with_identity_is_noop() {
    let t = sample_transform();

    assert!(transform_approx(&Transform::combine(&Transform::IDENTITY, &t), &t));
    assert!(transform_approx(&Transform::combine(&t, &Transform::IDENTITY), &t));
}

#[test]
fn combine_rotates_child_offset() {
    let parent = Transform::from_rotation(Quat::from_rotation_z(FRAC_PI_2));
    let child = Transform::from_position(Vec3::X);

    let result = Transform::combine(&parent, &child);
    assert!(vec3_approx(result.position, Vec3::Y), "got {}", result.position);
}

#[test]
fn combine_matches_matrix_product_for_uniform_scale() {
    let parent = Transform::new(Vec3::new(1.0, 2.0, 3.0), Quat::from_rotation_x(0.7), Vec3::splat(2.0));
    let child = Transform::new(Vec3::new(-1.0, 0.5, 0.0), Quat::from_rotation_y(-0.3), Vec3::splat(0.5));

    let combined = Transform::combine(&parent, &child).to_matrix();
    let product = parent.to_matrix() * child.to_matrix();
    assert!(combined.abs_diff_eq(product, EPSILON));
}

// ============================================================================
// Inversion
// ============================================================================

#[test]
fn inverse_then_combine_is_identity() {
    let t = sample_transform();

    let result = Transform::combine(&t.inverse(), &t);
    assert!(
        transform_approx(&result, &Transform::IDENTITY),
        "Expected identity, got {result:?}"
    );
}

#[test]
fn inverse_undoes_point_transform() {
    let t = Transform::new(Vec3::new(4.0, 0.0, -1.0), Quat::from_rotation_y(1.2), Vec3::splat(3.0));
    let p = Vec3::new(0.3, -0.7, 2.0);

    let back = t.inverse().transform_point(t.transform_point(p));
    assert!(vec3_approx(back, p), "Expected {p}, got {back}");
}

#[test]
fn inverse_zero_scale_stays_finite() {
    let t = Transform::new(Vec3::new(1.0, 1.0, 1.0), Quat::IDENTITY, Vec3::new(0.0, 2.0, 1.0));

    let inv = t.inverse();
    assert_eq!(inv.scale, Vec3::new(0.0, 0.5, 1.0));
    assert!(inv.position.is_finite());
    assert!(approx_eq(inv.position.x, 0.0));
}

#[test]
fn inverse_zero_rotation_is_identity_rotation() {
    let t = Transform::new(Vec3::X, Quat::from_xyzw(0.0, 0.0, 0.0, 0.0), Vec3::ONE);

    let inv = t.inverse();
    assert_eq!(inv.rotation, Quat::IDENTITY);
    assert!(inv.position.is_finite());
}

// ============================================================================
// Blending
// ============================================================================

#[test]
fn mix_endpoints_and_midpoint() {
    let a = Transform::new(Vec3::ZERO, Quat::IDENTITY, Vec3::ONE);
    let b = Transform::new(Vec3::new(2.0, 0.0, 4.0), Quat::from_rotation_y(FRAC_PI_2), Vec3::splat(3.0));

    assert!(transform_approx(&Transform::mix(&a, &b, 0.0), &a));
    assert!(transform_approx(&Transform::mix(&a, &b, 1.0), &b));

    let mid = Transform::mix(&a, &b, 0.5);
    assert!(vec3_approx(mid.position, Vec3::new(1.0, 0.0, 2.0)));
    assert!(vec3_approx(mid.scale, Vec3::splat(2.0)));
    assert!(quat_approx(mid.rotation, Quat::from_rotation_y(FRAC_PI_2 / 2.0)));
}

#[test]
fn mix_rotation_takes_shorter_arc() {
    let a = Transform::IDENTITY;
    let b = Transform::from_rotation(Quat::from_rotation_y(FRAC_PI_2));
    let b_negated = Transform::from_rotation(-b.rotation);

    let direct = Transform::mix(&a, &b, 0.3);
    let flipped = Transform::mix(&a, &b_negated, 0.3);
    assert!(quat_approx(direct.rotation, flipped.rotation));
    assert!(approx_eq(flipped.rotation.length(), 1.0));
}

// ============================================================================
// Matrix Conversion / Application
// ============================================================================

#[test]
fn matrix_round_trip() {
    let t = sample_transform();

    let back = Transform::from_matrix(&t.to_matrix());
    assert!(transform_approx(&back, &t), "Expected {t:?}, got {back:?}");
}

#[test]
fn matrix_from_impl_matches_to_matrix() {
    let t = sample_transform();
    assert_eq!(Mat4::from(t), t.to_matrix());
}

#[test]
fn transform_point_matches_matrix() {
    let t = sample_transform();
    let p = Vec3::new(-1.0, 4.0, 0.25);

    assert!(vec3_approx(t.transform_point(p), t.to_matrix().transform_point3(p)));
    assert!(vec3_approx(t.transform_vector(p), t.to_matrix().transform_vector3(p)));
}

#[test]
fn transform_vector_ignores_translation() {
    let t = Transform::from_position(Vec3::new(5.0, 5.0, 5.0));
    assert_eq!(t.transform_vector(Vec3::X), Vec3::X);
    assert_eq!(t.transform_point(Vec3::X), Vec3::new(6.0, 5.0, 5.0));
}
