/// Model registry: maps model handles to the small integers written
/// into the visibility buffer.

use slotmap::SlotMap;
use crate::error::{Error, Result};
use crate::utils::{IndexAllocator, MAX_WIRE_INDEX};
use crate::world::ModelHandle;

const SOURCE: &str = "galaxy3d::ModelTable";

/// Resolves a model handle to its wire index.
///
/// The index must be stable for as long as any instance of the model is
/// placed in a spatial index.
pub trait ModelRegistry {
    fn resolve_index(&self, model: ModelHandle) -> Option<i32>;
}

struct ModelEntry {
    name: String,
    index: i32,
}

/// Registry of named models.
///
/// Handles are slot map keys: once a model is unregistered its handle never
/// resolves again, even after its wire index is recycled for a new model.
pub struct ModelTable {
    models: SlotMap<ModelHandle, ModelEntry>,
    indices: IndexAllocator,
}

impl ModelTable {
    pub fn new() -> Self {
        Self {
            models: SlotMap::with_key(),
            indices: IndexAllocator::new(),
        }
    }

    /// Register a model and assign it the next free wire index.
    ///
    /// Names are labels only; registering the same name twice yields two models.
    pub fn register(&mut self, name: &str) -> Result<ModelHandle> {
        let Some(index) = self.indices.alloc() else {
            let error = Error::RegistryFull(format!(
                "cannot register '{}': all {} wire indices in use", name, MAX_WIRE_INDEX as i64 + 1
            ));
            crate::engine_error!(SOURCE, "{}", error);
            return Err(error);
        };

        let handle = self.models.insert(ModelEntry {
            name: name.to_string(),
            index,
        });
        crate::engine_trace!(SOURCE, "Registered model '{}' as index {}", name, index);
        Ok(handle)
    }

    /// Forget a model and recycle its index. Returns `false` for unknown handles.
    ///
    /// Instances of the model still placed in an index will make its
    /// queries fail; remove them first.
    pub fn unregister(&mut self, model: ModelHandle) -> bool {
        match self.models.remove(model) {
            Some(entry) => {
                self.indices.free(entry.index);
                crate::engine_trace!(SOURCE, "Unregistered model '{}' (index {})", entry.name, entry.index);
                true
            }
            None => false,
        }
    }

    pub fn name(&self, model: ModelHandle) -> Option<&str> {
        self.models.get(model).map(|entry| entry.name.as_str())
    }

    /// Wire index of a registered model
    pub fn index_of(&self, model: ModelHandle) -> Option<i32> {
        self.models.get(model).map(|entry| entry.index)
    }

    pub fn contains(&self, model: ModelHandle) -> bool {
        self.models.contains_key(model)
    }

    pub fn len(&self) -> usize {
        debug_assert_eq!(self.models.len(), self.indices.len());
        self.models.len()
    }

    /// Highest wire index ever assigned + 1: the minimum length of any
    /// GPU-side per-model array indexed by the visibility records
    pub fn index_high_water_mark(&self) -> i32 {
        self.indices.high_water_mark()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

impl Default for ModelTable {
    fn default() -> Self {
        Self::new()
    }
}

impl ModelRegistry for ModelTable {
    fn resolve_index(&self, model: ModelHandle) -> Option<i32> {
        self.index_of(model)
    }
}

#[cfg(test)]
#[path = "model_registry_tests.rs"]
mod tests;
