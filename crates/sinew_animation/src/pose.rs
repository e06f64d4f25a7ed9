//! Pose
//!
//! A flattened snapshot of a joint hierarchy: one local [`Transform`] per
//! joint plus an index-parallel parent array. Joints reference their parent
//! by index into the same arrays; there is no pointer graph.
//!
//! The parent array is validated whenever it is built or modified, so a pose
//! always describes a forest and hierarchy queries always terminate.

use glam::Mat4;
use sinew_core::{Result, SinewError, Transform};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Pose {
    joints: Vec<Transform>,
    parents: Vec<Option<usize>>,
}

impl Pose {
    /// Empty pose.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pose of `len` identity root joints.
    #[must_use]
    pub fn with_len(len: usize) -> Self {
        Self {
            joints: vec![Transform::IDENTITY; len],
            parents: vec![None; len],
        }
    }

    /// Builds a pose and validates its hierarchy.
    pub fn from_parts(joints: Vec<Transform>, parents: Vec<Option<usize>>) -> Result<Self> {
        if joints.len() != parents.len() {
            return Err(SinewError::LengthMismatch {
                context: "pose parents",
                expected: joints.len(),
                actual: parents.len(),
            });
        }
        let pose = Self { joints, parents };
        pose.validate()?;
        Ok(pose)
    }

    /// Builds a pose from loader-style parent indices, where any negative
    /// index marks a root.
    pub fn from_raw_parents(joints: Vec<Transform>, parents: &[i32]) -> Result<Self> {
        let parents = parents
            .iter()
            .map(|&p| usize::try_from(p).ok())
            .collect();
        Self::from_parts(joints, parents)
    }

    // ========================================================================
    // Size
    // ========================================================================

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.joints.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.joints.is_empty()
    }

    /// Grows or shrinks the pose. New joints are identity roots; shrinking
    /// turns joints whose parent was removed into roots.
    pub fn resize(&mut self, len: usize) {
        self.joints.resize(len, Transform::IDENTITY);
        self.parents.resize(len, None);
        for parent in &mut self.parents {
            if parent.is_some_and(|p| p >= len) {
                *parent = None;
            }
        }
    }

    // ========================================================================
    // Joint access
    // ========================================================================

    #[inline]
    #[must_use]
    pub fn joints(&self) -> &[Transform] {
        &self.joints
    }

    #[inline]
    #[must_use]
    pub fn parents(&self) -> &[Option<usize>] {
        &self.parents
    }

    #[inline]
    #[must_use]
    pub fn local_transform(&self, index: usize) -> Option<&Transform> {
        self.joints.get(index)
    }

    #[inline]
    pub fn local_transform_mut(&mut self, index: usize) -> Option<&mut Transform> {
        self.joints.get_mut(index)
    }

    pub fn set_local_transform(&mut self, index: usize, transform: Transform) -> Result<()> {
        let len = self.joints.len();
        let slot = self
            .joints
            .get_mut(index)
            .ok_or(SinewError::JointOutOfBounds { index, len })?;
        *slot = transform;
        Ok(())
    }

    #[inline]
    #[must_use]
    pub fn parent(&self, index: usize) -> Option<usize> {
        self.parents.get(index).copied().flatten()
    }

    #[inline]
    #[must_use]
    pub fn is_root(&self, index: usize) -> bool {
        self.parent(index).is_none()
    }

    /// Re-parents a joint. The change is rejected, leaving the pose
    /// untouched, if it would create a cycle.
    pub fn set_parent(&mut self, index: usize, parent: Option<usize>) -> Result<()> {
        let len = self.len();
        if index >= len {
            return Err(SinewError::JointOutOfBounds { index, len });
        }

        let previous = std::mem::replace(&mut self.parents[index], parent);
        if let Err(err) = self.validate() {
            self.parents[index] = previous;
            return Err(err);
        }
        Ok(())
    }

    // ========================================================================
    // Hierarchy resolution
    // ========================================================================

    /// Model-space transform of a joint: its local transform with every
    /// ancestor applied, nearest parent first.
    ///
    /// A root's global transform is its local transform. Cost is linear in
    /// the joint's depth; nothing is cached.
    pub fn global_transform(&self, index: usize) -> Result<Transform> {
        let len = self.len();
        let mut result = *self
            .joints
            .get(index)
            .ok_or(SinewError::JointOutOfBounds { index, len })?;

        let mut steps = 0;
        let mut parent = self.parents[index];
        while let Some(p) = parent {
            steps += 1;
            if steps > len {
                return Err(SinewError::HierarchyCycle { joint: index });
            }
            result = Transform::combine(&self.joints[p], &result);
            parent = self.parents[p];
        }

        Ok(result)
    }

    /// One model-space matrix per joint, for GPU skinning or debug drawing.
    #[must_use]
    pub fn matrix_palette(&self) -> Vec<Mat4> {
        let mut out = Vec::with_capacity(self.len());
        self.matrix_palette_into(&mut out);
        out
    }

    /// Writes the palette into `out`, resizing it to the joint count.
    pub fn matrix_palette_into(&self, out: &mut Vec<Mat4>) {
        out.clear();
        out.extend((0..self.len()).map(|i| {
            self.global_transform(i)
                .map_or(Mat4::IDENTITY, |t| t.to_matrix())
        }));
    }

    // ========================================================================
    // Validation
    // ========================================================================

    /// Checks that every parent index is in range, no joint is its own
    /// parent, and the parent links form a forest.
    pub fn validate(&self) -> Result<()> {
        let len = self.len();
        for (joint, parent) in self.parents.iter().enumerate() {
            if let Some(p) = *parent
                && (p >= len || p == joint)
            {
                return Err(SinewError::InvalidParent {
                    joint,
                    parent: p,
                    len,
                });
            }
        }

        // 0 = unvisited, 1 = on the current chain, 2 = known to reach a root
        let mut state = vec![0u8; len];
        let mut chain = Vec::new();
        for start in 0..len {
            let mut current = Some(start);
            while let Some(joint) = current {
                match state[joint] {
                    2 => break,
                    1 => return Err(SinewError::HierarchyCycle { joint }),
                    _ => {
                        state[joint] = 1;
                        chain.push(joint);
                        current = self.parents[joint];
                    }
                }
            }
            for joint in chain.drain(..) {
                state[joint] = 2;
            }
        }

        Ok(())
    }
}

impl std::ops::Index<usize> for Pose {
    type Output = Transform;

    fn index(&self, index: usize) -> &Self::Output {
        &self.joints[index]
    }
}

impl std::ops::IndexMut<usize> for Pose {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.joints[index]
    }
}
