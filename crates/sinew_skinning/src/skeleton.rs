use glam::Mat4;
use rustc_hash::FxHashMap;
use sinew_animation::Pose;
use sinew_core::math::inverse_matrix_or_identity;
use sinew_core::{Result, SinewError, Transform};

/// Skeleton (armature / rig).
///
/// Bundles the rest pose (the hierarchy as authored), the bind pose (the
/// configuration the mesh was skinned against) and the per-joint inverse
/// bind matrices derived from it.
///
/// The inverse bind matrices are rebuilt whenever the bind pose changes;
/// there is no way to observe them out of sync.
#[derive(Debug, Clone)]
pub struct Skeleton {
    rest_pose: Pose,
    bind_pose: Pose,
    // Maps a vertex from mesh space into each joint's space at bind time
    inverse_bind_pose: Vec<Mat4>,
    joint_names: Vec<String>,
    name_lookup: FxHashMap<String, usize>,
}

impl Skeleton {
    pub fn new(rest_pose: Pose, bind_pose: Pose, joint_names: Vec<String>) -> Result<Self> {
        let count = rest_pose.len();
        if bind_pose.len() != count {
            return Err(SinewError::LengthMismatch {
                context: "skeleton bind pose",
                expected: count,
                actual: bind_pose.len(),
            });
        }
        if joint_names.len() != count {
            return Err(SinewError::LengthMismatch {
                context: "skeleton joint names",
                expected: count,
                actual: joint_names.len(),
            });
        }

        let mut name_lookup = FxHashMap::default();
        for (index, name) in joint_names.iter().enumerate() {
            // Duplicate names resolve to the first joint carrying them
            name_lookup.entry(name.clone()).or_insert(index);
        }

        let inverse_bind_pose = Self::compute_inverse_bind_pose(&bind_pose);

        Ok(Self {
            rest_pose,
            bind_pose,
            inverse_bind_pose,
            joint_names,
            name_lookup,
        })
    }

    /// Rebuilds the bind pose from a rest pose and a skin's inverse bind
    /// matrices.
    ///
    /// `joints[k]` is the skeleton joint that `inverse_bind_matrices[k]`
    /// belongs to. Joints not listed keep their rest-pose global transform.
    /// Every non-root joint is then expressed relative to its parent's bind
    /// transform.
    pub fn from_inverse_bind_matrices(
        rest_pose: Pose,
        joint_names: Vec<String>,
        joints: &[usize],
        inverse_bind_matrices: &[Mat4],
    ) -> Result<Self> {
        if joints.len() != inverse_bind_matrices.len() {
            return Err(SinewError::LengthMismatch {
                context: "skin inverse bind matrices",
                expected: joints.len(),
                actual: inverse_bind_matrices.len(),
            });
        }

        let count = rest_pose.len();
        let mut world_bind = (0..count)
            .map(|i| rest_pose.global_transform(i))
            .collect::<Result<Vec<_>>>()?;

        for (&joint, inverse_bind) in joints.iter().zip(inverse_bind_matrices) {
            let slot = world_bind
                .get_mut(joint)
                .ok_or(SinewError::JointOutOfBounds {
                    index: joint,
                    len: count,
                })?;
            *slot = Transform::from_matrix(&inverse_matrix_or_identity(inverse_bind));
        }

        let mut bind_pose = rest_pose.clone();
        for i in 0..count {
            if let Some(parent) = bind_pose.parent(i) {
                bind_pose[i] = Transform::combine(&world_bind[parent].inverse(), &world_bind[i]);
            } else {
                bind_pose[i] = world_bind[i];
            }
        }

        Self::new(rest_pose, bind_pose, joint_names)
    }

    fn compute_inverse_bind_pose(bind_pose: &Pose) -> Vec<Mat4> {
        bind_pose
            .matrix_palette()
            .iter()
            .map(inverse_matrix_or_identity)
            .collect()
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[inline]
    #[must_use]
    pub fn joint_count(&self) -> usize {
        self.rest_pose.len()
    }

    #[inline]
    #[must_use]
    pub fn rest_pose(&self) -> &Pose {
        &self.rest_pose
    }

    #[inline]
    #[must_use]
    pub fn bind_pose(&self) -> &Pose {
        &self.bind_pose
    }

    #[inline]
    #[must_use]
    pub fn inverse_bind_pose(&self) -> &[Mat4] {
        &self.inverse_bind_pose
    }

    #[inline]
    #[must_use]
    pub fn joint_names(&self) -> &[String] {
        &self.joint_names
    }

    #[must_use]
    pub fn joint_name(&self, index: usize) -> Option<&str> {
        self.joint_names.get(index).map(String::as_str)
    }

    #[must_use]
    pub fn joint_index(&self, name: &str) -> Option<usize> {
        self.name_lookup.get(name).copied()
    }

    /// Replaces the bind pose and rebuilds the inverse bind matrices.
    pub fn set_bind_pose(&mut self, bind_pose: Pose) -> Result<()> {
        if bind_pose.len() != self.joint_count() {
            return Err(SinewError::LengthMismatch {
                context: "skeleton bind pose",
                expected: self.joint_count(),
                actual: bind_pose.len(),
            });
        }
        self.inverse_bind_pose = Self::compute_inverse_bind_pose(&bind_pose);
        self.bind_pose = bind_pose;
        Ok(())
    }

    // ========================================================================
    // Skin palette
    // ========================================================================

    /// Per-joint skinning matrices (`pose_global · inverse_bind`) for upload
    /// to a GPU skinning stage.
    #[must_use]
    pub fn skin_palette(&self, pose: &Pose) -> Vec<Mat4> {
        let mut pose_palette = Vec::with_capacity(pose.len());
        let mut out = Vec::with_capacity(pose.len());
        self.skin_palette_into(pose, &mut pose_palette, &mut out);
        out
    }

    /// Allocation-reusing form of [`Self::skin_palette`]; `pose_palette` is
    /// scratch space for the pose's global matrices.
    pub fn skin_palette_into(&self, pose: &Pose, pose_palette: &mut Vec<Mat4>, out: &mut Vec<Mat4>) {
        if pose.len() != self.joint_count() {
            log::warn!(
                "Skinning a pose with {} joints against a skeleton with {}",
                pose.len(),
                self.joint_count()
            );
        }
        pose.matrix_palette_into(pose_palette);
        crate::skinning::skin_matrices_into(pose_palette, &self.inverse_bind_pose, out);
    }
}
