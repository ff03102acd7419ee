/// GPU-resident buffer receiving the per-frame visibility list

use crate::error::Result;

/// Buffer usage hint passed along with every upload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferUsage {
    /// Vertex buffer
    Vertex,
    /// Index buffer
    Index,
    /// Uniform/constant buffer
    Uniform,
    /// Storage buffer
    Storage,
}

/// Buffer the visibility list is uploaded into.
///
/// Implemented by backend-specific buffer types. The backend owns the
/// allocation; `replace_contents` may reallocate it to fit.
pub trait VisibilityBuffer: Send + Sync {
    /// Replace the whole contents of the buffer (clear, then set).
    ///
    /// # Arguments
    ///
    /// * `data` - New contents; the buffer is sized to exactly `data.len()` bytes
    /// * `usage` - Usage hint for the backing allocation
    fn replace_contents(&self, data: &[u8], usage: BufferUsage) -> Result<()>;
}
