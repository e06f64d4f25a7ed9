//! Pose Hierarchy Tests
//!
//! Tests for:
//! - Global transform resolution (roots, chains, scaled parents)
//! - Parent array validation (bounds, self-parenting, cycles)
//! - Matrix palette generation
//! - Resizing and joint access

use std::f32::consts::FRAC_PI_2;

use glam::{Mat4, Quat, Vec3};

use sinew::{Pose, SinewError, Transform};

const EPSILON: f32 = 1e-5;

fn vec3_approx(a: Vec3, b: Vec3) -> bool {
    (a - b).length() < EPSILON
}

fn chain() -> Pose {
    let joints = vec![
        Transform::new(Vec3::X, Quat::from_rotation_z(FRAC_PI_2), Vec3::ONE),
        Transform::from_position(Vec3::X),
        Transform::from_position(Vec3::X),
    ];
    Pose::from_raw_parents(joints, &[-1, 0, 1]).unwrap()
}

// ============================================================================
// Global Transforms
// ============================================================================

#[test]
fn root_global_equals_local() {
    let pose = chain();

    let global = pose.global_transform(0).unwrap();
    assert_eq!(global, pose[0], "A root's global transform must be its local one");
}

#[test]
fn child_global_applies_parent_rotation() {
    let pose = chain();

    // Root at +X rotated 90° about Z: the child's +X offset becomes +Y
    let global = pose.global_transform(1).unwrap();
    assert!(vec3_approx(global.position, Vec3::new(1.0, 1.0, 0.0)), "got {}", global.position);

    let grandchild = pose.global_transform(2).unwrap();
    assert!(vec3_approx(grandchild.position, Vec3::new(1.0, 2.0, 0.0)));
}

#[test]
fn child_global_applies_parent_scale() {
    let joints = vec![
        Transform::new(Vec3::ZERO, Quat::IDENTITY, Vec3::splat(2.0)),
        Transform::from_position(Vec3::new(1.0, 0.5, 0.0)),
    ];
    let pose = Pose::from_raw_parents(joints, &[-1, 0]).unwrap();

    let global = pose.global_transform(1).unwrap();
    assert!(vec3_approx(global.position, Vec3::new(2.0, 1.0, 0.0)));
    assert!(vec3_approx(global.scale, Vec3::splat(2.0)));
}

#[test]
fn global_transform_out_of_bounds() {
    let pose = chain();

    assert_eq!(
        pose.global_transform(3),
        Err(SinewError::JointOutOfBounds { index: 3, len: 3 })
    );
}

#[test]
fn matrix_palette_matches_global_transforms() {
    let pose = chain();
    let palette = pose.matrix_palette();

    assert_eq!(palette.len(), pose.len());
    for (i, matrix) in palette.iter().enumerate() {
        let expected = pose.global_transform(i).unwrap().to_matrix();
        assert!(matrix.abs_diff_eq(expected, EPSILON), "Joint {i} differs");
    }
}

#[test]
fn matrix_palette_into_reuses_buffer() {
    let pose = Pose::with_len(2);
    let mut out = vec![Mat4::ZERO; 5];

    pose.matrix_palette_into(&mut out);

    assert_eq!(out, vec![Mat4::IDENTITY; 2]);
}

// ============================================================================
// Validation
// ============================================================================

#[test]
fn negative_parent_marks_root() {
    let pose = Pose::from_raw_parents(vec![Transform::IDENTITY; 3], &[-1, 0, -7]).unwrap();

    assert!(pose.is_root(0));
    assert_eq!(pose.parent(1), Some(0));
    assert!(pose.is_root(2));
}

#[test]
fn rejects_cycle() {
    let result = Pose::from_raw_parents(vec![Transform::IDENTITY; 3], &[-1, 2, 1]);
    assert!(matches!(result, Err(SinewError::HierarchyCycle { .. })));
}

#[test]
fn rejects_self_parent() {
    let result = Pose::from_raw_parents(vec![Transform::IDENTITY; 2], &[-1, 1]);
    assert_eq!(
        result,
        Err(SinewError::InvalidParent {
            joint: 1,
            parent: 1,
            len: 2,
        })
    );
}

#[test]
fn rejects_parent_out_of_range() {
    let result = Pose::from_raw_parents(vec![Transform::IDENTITY; 2], &[-1, 5]);
    assert!(matches!(result, Err(SinewError::InvalidParent { parent: 5, .. })));
}

#[test]
fn rejects_parent_length_mismatch() {
    let result = Pose::from_parts(vec![Transform::IDENTITY; 2], vec![None]);
    assert!(matches!(result, Err(SinewError::LengthMismatch { .. })));
}

#[test]
fn set_parent_rolls_back_cycle() {
    let mut pose = chain();

    let result = pose.set_parent(0, Some(2));

    assert!(matches!(result, Err(SinewError::HierarchyCycle { .. })));
    assert!(pose.is_root(0), "Rejected re-parenting must leave the pose untouched");
    assert!(pose.validate().is_ok());
}

#[test]
fn set_parent_accepts_valid_change() {
    let mut pose = chain();

    pose.set_parent(2, Some(0)).unwrap();

    assert_eq!(pose.parent(2), Some(0));
    let global = pose.global_transform(2).unwrap();
    assert!(vec3_approx(global.position, Vec3::new(1.0, 1.0, 0.0)));
}

// ============================================================================
// Joint Access
// ============================================================================

#[test]
fn set_local_transform_bounds() {
    let mut pose = Pose::with_len(1);

    pose.set_local_transform(0, Transform::from_position(Vec3::Y)).unwrap();
    assert_eq!(pose[0].position, Vec3::Y);

    assert!(matches!(
        pose.set_local_transform(1, Transform::IDENTITY),
        Err(SinewError::JointOutOfBounds { index: 1, len: 1 })
    ));
    assert!(pose.local_transform(1).is_none());
}

#[test]
fn resize_orphans_children_of_removed_joints() {
    let mut pose = chain();

    pose.resize(2);
    assert_eq!(pose.len(), 2);
    assert_eq!(pose.parent(1), Some(0));

    pose.set_parent(1, None).unwrap();
    pose.resize(4);
    assert_eq!(pose.len(), 4);
    assert!(pose.is_root(3));
    assert_eq!(pose[3], Transform::IDENTITY);

    let mut shrunk = Pose::from_raw_parents(vec![Transform::IDENTITY; 3], &[-1, 2, 0]).unwrap();
    shrunk.resize(2);
    assert!(shrunk.is_root(1), "Joint whose parent was removed becomes a root");
    assert!(shrunk.validate().is_ok());
}
