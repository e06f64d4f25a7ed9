use std::sync::atomic::{AtomicU64, Ordering};

use bytemuck::Pod;

// Global buffer ID generator
static NEXT_BUFFER_ID: AtomicU64 = AtomicU64::new(0);

/// Vertex attribute slot a buffer feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VertexAttribute {
    Position,
    Normal,
    TexCoord,
    Weights,
    Joints,
    Indices,
}

/// Receives attribute data for upload to whatever renderer sits downstream.
pub trait VertexSink {
    fn upload(&mut self, attribute: VertexAttribute, buffer: &AttributeBuffer);
}

/// CPU-side copy of one vertex attribute stream.
///
/// Owned by exactly one mesh and released with it. Every write bumps the
/// version; a sink only needs to re-upload when the version moved since the
/// last upload.
#[derive(Debug)]
pub struct AttributeBuffer {
    id: u64,
    label: String,
    version: u64,
    uploaded_version: Option<u64>,
    data: Vec<u8>,
}

impl AttributeBuffer {
    #[must_use]
    pub fn new(label: &str) -> Self {
        Self {
            id: NEXT_BUFFER_ID.fetch_add(1, Ordering::Relaxed),
            label: label.to_string(),
            version: 0,
            uploaded_version: None,
            data: Vec::new(),
        }
    }

    #[inline]
    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }

    #[inline]
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[inline]
    #[must_use]
    pub fn version(&self) -> u64 {
        self.version
    }

    #[inline]
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.data
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Replaces the contents, reusing the allocation.
    pub fn write<T: Pod>(&mut self, data: &[T]) {
        self.data.clear();
        self.data.extend_from_slice(bytemuck::cast_slice(data));
        self.version += 1;
    }

    /// Copies the contents back out as `T`s. Trailing bytes that do not form
    /// a whole `T` are ignored.
    #[must_use]
    pub fn read<T: Pod>(&self) -> Vec<T> {
        self.data
            .chunks_exact(std::mem::size_of::<T>())
            .map(bytemuck::pod_read_unaligned)
            .collect()
    }

    /// Whether the contents changed since the last [`Self::mark_uploaded`].
    #[must_use]
    pub fn needs_upload(&self) -> bool {
        self.version > 0 && self.uploaded_version != Some(self.version)
    }

    pub fn mark_uploaded(&mut self) {
        self.uploaded_version = Some(self.version);
    }
}

/// One [`AttributeBuffer`] per vertex stream of a mesh.
#[derive(Debug)]
pub struct MeshBuffers {
    pub position: AttributeBuffer,
    pub normal: AttributeBuffer,
    pub tex_coord: AttributeBuffer,
    pub weights: AttributeBuffer,
    pub joints: AttributeBuffer,
    pub indices: AttributeBuffer,
}

impl MeshBuffers {
    #[must_use]
    pub fn new() -> Self {
        Self {
            position: AttributeBuffer::new("SkinnedMesh_Position"),
            normal: AttributeBuffer::new("SkinnedMesh_Normal"),
            tex_coord: AttributeBuffer::new("SkinnedMesh_TexCoord"),
            weights: AttributeBuffer::new("SkinnedMesh_Weights"),
            joints: AttributeBuffer::new("SkinnedMesh_Joints"),
            indices: AttributeBuffer::new("SkinnedMesh_Indices"),
        }
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (VertexAttribute, &mut AttributeBuffer)> {
        [
            (VertexAttribute::Position, &mut self.position),
            (VertexAttribute::Normal, &mut self.normal),
            (VertexAttribute::TexCoord, &mut self.tex_coord),
            (VertexAttribute::Weights, &mut self.weights),
            (VertexAttribute::Joints, &mut self.joints),
            (VertexAttribute::Indices, &mut self.indices),
        ]
        .into_iter()
    }

    /// Hands every changed buffer to `sink`. Returns how many were uploaded.
    pub fn flush(&mut self, sink: &mut impl VertexSink) -> usize {
        let mut uploaded = 0;
        for (attribute, buffer) in self.iter_mut() {
            if buffer.needs_upload() {
                sink.upload(attribute, buffer);
                buffer.mark_uploaded();
                uploaded += 1;
            }
        }
        uploaded
    }
}

impl Default for MeshBuffers {
    fn default() -> Self {
        Self::new()
    }
}
