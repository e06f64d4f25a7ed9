//! Skinning Settings
//!
//! ```rust,ignore
//! use sinew_skinning::{SkinningMethod, SkinningSettings};
//!
//! mesh.settings = SkinningSettings {
//!     method: SkinningMethod::TransformBlend,
//!     ..Default::default()
//! };
//! ```

/// How per-joint influences are combined for a vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SkinningMethod {
    /// Blend the four skin matrices by weight, then transform the vertex
    /// once. Matches what a GPU skinning stage does with the same palette.
    #[default]
    MatrixPalette,
    /// Transform the vertex by each joint's rigid transform and blend the
    /// four results by weight.
    TransformBlend,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SkinningSettings {
    pub method: SkinningMethod,
    /// Renormalize skinned normals. Off by default: normals are transformed
    /// by the blended matrix with no inverse-transpose correction, which is
    /// exact only for uniform scale.
    pub normalize_normals: bool,
}
