use glam::{Mat4, UVec4, Vec2, Vec3, Vec4};
use sinew_animation::Pose;
use sinew_core::{Result, SinewError, Transform};

use crate::buffer::{MeshBuffers, VertexSink};
use crate::settings::{SkinningMethod, SkinningSettings};
use crate::skeleton::Skeleton;
use crate::skinning::{SkinSource, skin_with_matrices, skin_with_transforms};

/// A mesh deformed by a skeleton.
///
/// Source attributes are plain index-parallel vectors filled by the loader,
/// with joint indices already in skeleton-global numbering. The skinned
/// positions/normals are a cache rebuilt wholesale by every
/// [`SkinnedMesh::cpu_skin`] call.
#[derive(Debug)]
pub struct SkinnedMesh {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub tex_coords: Vec<Vec2>,
    pub weights: Vec<Vec4>,
    pub joints: Vec<UVec4>,
    pub indices: Vec<u32>,

    pub settings: SkinningSettings,

    // === CPU skinning cache ===
    skinned_positions: Vec<Vec3>,
    skinned_normals: Vec<Vec3>,
    pose_palette: Vec<Mat4>,
    skin_palette: Vec<Mat4>,

    buffers: MeshBuffers,
}

impl SkinnedMesh {
    #[must_use]
    pub fn new(positions: Vec<Vec3>, normals: Vec<Vec3>, weights: Vec<Vec4>, joints: Vec<UVec4>) -> Self {
        Self {
            positions,
            normals,
            tex_coords: Vec::new(),
            weights,
            joints,
            indices: Vec::new(),
            settings: SkinningSettings::default(),
            skinned_positions: Vec::new(),
            skinned_normals: Vec::new(),
            pose_palette: Vec::new(),
            skin_palette: Vec::new(),
            buffers: MeshBuffers::new(),
        }
    }

    #[must_use]
    pub fn with_tex_coords(mut self, tex_coords: Vec<Vec2>) -> Self {
        self.tex_coords = tex_coords;
        self
    }

    #[must_use]
    pub fn with_indices(mut self, indices: Vec<u32>) -> Self {
        self.indices = indices;
        self
    }

    #[must_use]
    pub fn with_settings(mut self, settings: SkinningSettings) -> Self {
        self.settings = settings;
        self
    }

    #[inline]
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    #[must_use]
    pub fn skinned_positions(&self) -> &[Vec3] {
        &self.skinned_positions
    }

    #[inline]
    #[must_use]
    pub fn skinned_normals(&self) -> &[Vec3] {
        &self.skinned_normals
    }

    /// Skin palette used by the last matrix-palette skinning pass.
    #[inline]
    #[must_use]
    pub fn skin_palette(&self) -> &[Mat4] {
        &self.skin_palette
    }

    #[inline]
    #[must_use]
    pub fn buffers(&self) -> &MeshBuffers {
        &self.buffers
    }

    /// Checks that the attribute streams are index-parallel and that every
    /// weighted influence names a joint below `joint_count`.
    pub fn validate(&self, joint_count: usize) -> Result<()> {
        let vertex_count = self.positions.len();
        let streams = [
            ("mesh normals", self.normals.len()),
            ("mesh weights", self.weights.len()),
            ("mesh joints", self.joints.len()),
        ];
        for (context, actual) in streams {
            if actual != vertex_count {
                return Err(SinewError::LengthMismatch {
                    context,
                    expected: vertex_count,
                    actual,
                });
            }
        }
        if !self.tex_coords.is_empty() && self.tex_coords.len() != vertex_count {
            return Err(SinewError::LengthMismatch {
                context: "mesh tex coords",
                expected: vertex_count,
                actual: self.tex_coords.len(),
            });
        }

        for (weights, joints) in self.weights.iter().zip(&self.joints) {
            for (w, j) in weights.to_array().into_iter().zip(joints.to_array()) {
                if w != 0.0 && j as usize >= joint_count {
                    return Err(SinewError::JointOutOfBounds {
                        index: j as usize,
                        len: joint_count,
                    });
                }
            }
        }

        if let Some(&index) = self.indices.iter().find(|&&i| i as usize >= vertex_count) {
            return Err(SinewError::VertexOutOfBounds {
                index: index as usize,
                len: vertex_count,
            });
        }

        Ok(())
    }

    /// Deforms the mesh by `pose` and writes the result into the position
    /// and normal buffers. A mesh with no vertices is left untouched.
    pub fn cpu_skin(&mut self, skeleton: &Skeleton, pose: &Pose) {
        if self.positions.is_empty() {
            return;
        }

        let source = SkinSource {
            positions: &self.positions,
            normals: &self.normals,
            weights: &self.weights,
            joints: &self.joints,
        };

        match self.settings.method {
            SkinningMethod::MatrixPalette => {
                skeleton.skin_palette_into(pose, &mut self.pose_palette, &mut self.skin_palette);
                skin_with_matrices(
                    &source,
                    &self.skin_palette,
                    self.settings.normalize_normals,
                    &mut self.skinned_positions,
                    &mut self.skinned_normals,
                );
            }
            SkinningMethod::TransformBlend => {
                let pose_globals = global_transforms(pose);
                let bind_globals = global_transforms(skeleton.bind_pose());
                skin_with_transforms(
                    &source,
                    &pose_globals,
                    &bind_globals,
                    self.settings.normalize_normals,
                    &mut self.skinned_positions,
                    &mut self.skinned_normals,
                );
            }
        }

        self.buffers.position.write(&self.skinned_positions);
        self.buffers.normal.write(&self.skinned_normals);
    }

    /// Writes the source attributes into their buffers, e.g. after the loader
    /// filled the mesh or for GPU skinning where the vertices stay in bind
    /// position.
    pub fn update_buffers(&mut self) {
        if !self.positions.is_empty() {
            self.buffers.position.write(&self.positions);
        }
        if !self.normals.is_empty() {
            self.buffers.normal.write(&self.normals);
        }
        if !self.tex_coords.is_empty() {
            self.buffers.tex_coord.write(&self.tex_coords);
        }
        if !self.weights.is_empty() {
            self.buffers.weights.write(&self.weights);
        }
        if !self.joints.is_empty() {
            self.buffers.joints.write(&self.joints);
        }
        if !self.indices.is_empty() {
            self.buffers.indices.write(&self.indices);
        }
    }

    /// Uploads every buffer that changed since the last flush.
    pub fn flush(&mut self, sink: &mut impl VertexSink) -> usize {
        self.buffers.flush(sink)
    }
}

impl Clone for SkinnedMesh {
    /// Copies the source attributes into a mesh with its own, freshly
    /// written buffers.
    fn clone(&self) -> Self {
        let mut mesh = Self::new(
            self.positions.clone(),
            self.normals.clone(),
            self.weights.clone(),
            self.joints.clone(),
        )
        .with_tex_coords(self.tex_coords.clone())
        .with_indices(self.indices.clone())
        .with_settings(self.settings);
        mesh.update_buffers();
        mesh
    }
}

fn global_transforms(pose: &Pose) -> Vec<Transform> {
    (0..pose.len())
        .map(|i| pose.global_transform(i).unwrap_or(Transform::IDENTITY))
        .collect()
}
