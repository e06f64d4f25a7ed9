//! Skeletons and skinning.
//!
//! - [`Skeleton`]: rest pose, bind pose and inverse bind matrices
//! - [`skinning`]: pure CPU skinning over attribute slices
//! - [`SkinnedMesh`]: vertex data, skinning cache and owned attribute buffers
//! - [`VertexSink`]: the upload seam towards a renderer

pub mod buffer;
pub mod mesh;
pub mod settings;
pub mod skeleton;
pub mod skinning;

pub use buffer::{AttributeBuffer, MeshBuffers, VertexAttribute, VertexSink};
pub use mesh::SkinnedMesh;
pub use settings::{SkinningMethod, SkinningSettings};
pub use skeleton::Skeleton;
pub use skinning::{SkinSource, blend_skin_matrix, skin_matrices_into, skin_with_matrices, skin_with_transforms};
