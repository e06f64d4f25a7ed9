//! CPU Skinning
//!
//! Pure functions over plain attribute slices. Nothing here owns buffers or
//! knows about uploads; [`SkinnedMesh`](crate::mesh::SkinnedMesh) wires the
//! results into its attribute buffers.
//!
//! Each vertex carries exactly four influences (`weights`, `joints`).
//! Unused slots are expected to carry zero weight; zero-weight slots are
//! skipped, so their joint indices are never read. Weights are not
//! renormalized.

use glam::{Mat4, UVec4, Vec3, Vec4};
use sinew_core::Transform;

/// Vertex streams consumed by skinning. All slices are index-parallel.
#[derive(Debug, Clone, Copy)]
pub struct SkinSource<'a> {
    pub positions: &'a [Vec3],
    pub normals: &'a [Vec3],
    pub weights: &'a [Vec4],
    pub joints: &'a [UVec4],
}

/// Combines a pose's global matrices with the inverse bind matrices:
/// `out[i] = pose_palette[i] · inverse_bind[i]`.
///
/// The output length is the shorter of the two inputs.
pub fn skin_matrices_into(pose_palette: &[Mat4], inverse_bind: &[Mat4], out: &mut Vec<Mat4>) {
    out.clear();
    out.extend(
        pose_palette
            .iter()
            .zip(inverse_bind)
            .map(|(pose, inverse_bind)| *pose * *inverse_bind),
    );
}

/// Iterates the usable influences of one vertex: non-zero weight and a
/// joint index inside a palette of `palette_len` entries.
fn influences(weights: Vec4, joints: UVec4, palette_len: usize) -> impl Iterator<Item = (usize, f32)> {
    weights
        .to_array()
        .into_iter()
        .zip(joints.to_array())
        .filter(move |&(w, j)| w != 0.0 && (j as usize) < palette_len)
        .map(|(w, j)| (j as usize, w))
}

/// Weighted sum of the skin matrices influencing one vertex.
#[must_use]
pub fn blend_skin_matrix(skin_palette: &[Mat4], weights: Vec4, joints: UVec4) -> Mat4 {
    influences(weights, joints, skin_palette.len())
        .fold(Mat4::ZERO, |acc, (joint, weight)| acc + skin_palette[joint] * weight)
}

fn prepare_outputs(source: &SkinSource<'_>, out_positions: &mut Vec<Vec3>, out_normals: &mut Vec<Vec3>) {
    out_positions.clear();
    out_positions.extend_from_slice(source.positions);
    out_normals.clear();
    out_normals.extend_from_slice(source.normals);
}

fn skinned_vertex_count(source: &SkinSource<'_>) -> usize {
    let count = source
        .positions
        .len()
        .min(source.weights.len())
        .min(source.joints.len());
    if count < source.positions.len() {
        log::debug!(
            "{} vertices have no influences and stay in bind position",
            source.positions.len() - count
        );
    }
    count
}

/// Linear blend skinning with a precomputed skin palette (see
/// [`skin_matrices_into`]).
///
/// Both outputs are overwritten. Vertices without influence data are copied
/// through unchanged. Normals use the blended matrix directly, with no
/// inverse-transpose correction.
pub fn skin_with_matrices(
    source: &SkinSource<'_>,
    skin_palette: &[Mat4],
    normalize_normals: bool,
    out_positions: &mut Vec<Vec3>,
    out_normals: &mut Vec<Vec3>,
) {
    prepare_outputs(source, out_positions, out_normals);

    for i in 0..skinned_vertex_count(source) {
        let skin = blend_skin_matrix(skin_palette, source.weights[i], source.joints[i]);
        out_positions[i] = skin.transform_point3(source.positions[i]);
        if let Some(&normal) = source.normals.get(i) {
            let n = skin.transform_vector3(normal);
            out_normals[i] = if normalize_normals { n.normalize_or_zero() } else { n };
        }
    }
}

/// Per-joint rigid skinning: each influencing joint's transform
/// (`pose_global ∘ inverse(bind_global)`) moves the vertex, and the moved
/// copies are blended by weight.
///
/// `pose_globals` and `bind_globals` are the global transforms of the
/// animated pose and the bind pose.
pub fn skin_with_transforms(
    source: &SkinSource<'_>,
    pose_globals: &[Transform],
    bind_globals: &[Transform],
    normalize_normals: bool,
    out_positions: &mut Vec<Vec3>,
    out_normals: &mut Vec<Vec3>,
) {
    prepare_outputs(source, out_positions, out_normals);

    let skin: Vec<Transform> = pose_globals
        .iter()
        .zip(bind_globals)
        .map(|(pose, bind)| Transform::combine(pose, &bind.inverse()))
        .collect();

    for i in 0..skinned_vertex_count(source) {
        let mut position = Vec3::ZERO;
        let mut normal = Vec3::ZERO;
        for (joint, weight) in influences(source.weights[i], source.joints[i], skin.len()) {
            position += skin[joint].transform_point(source.positions[i]) * weight;
            if let Some(&n) = source.normals.get(i) {
                normal += skin[joint].transform_vector(n) * weight;
            }
        }

        out_positions[i] = position;
        if i < out_normals.len() {
            out_normals[i] = if normalize_normals {
                normal.normalize_or_zero()
            } else {
                normal
            };
        }
    }
}
