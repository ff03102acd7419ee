/// Placed model instances and the records produced by visibility queries.

use glam::Vec3;
use slotmap::new_key_type;

// ===== SLOT MAP KEY =====

new_key_type! {
    /// Opaque, stable reference to an externally-owned renderable model.
    ///
    /// The spatial index stores handles but never owns or destroys the
    /// model they point to. Handles are issued by a model registry
    /// (see `render::ModelTable`).
    pub struct ModelHandle;
}

/// One placement of a model at a world position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelInstance {
    pub model: ModelHandle,
    pub position: Vec3,
}

impl ModelInstance {
    pub fn new(model: ModelHandle, position: Vec3) -> Self {
        Self { model, position }
    }
}

/// A visible instance as handed to the GPU: the model handle is resolved
/// to the registry's integer index at query time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InstanceRecord {
    pub model_index: i32,
    pub position: Vec3,
}

impl InstanceRecord {
    pub fn new(model_index: i32, position: Vec3) -> Self {
        Self { model_index, position }
    }
}
