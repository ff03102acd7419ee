/// SharedSpatialIndex: a SpatialIndex behind one reader/writer lock.
///
/// Every operation takes the lock for its whole duration, so a query never
/// sees a split half done. Queries share the lock with each other; any
/// mutation stalls them. Prefer `StaticWorld` when mutation can be confined
/// to between frames.
///
/// `insert` releases the lock before applying `panic_on_rejection`, so a
/// rejected insertion never poisons it. A panic inside a `write` closure
/// does: every later operation then fails with `LockPoisoned`.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use glam::Vec3;
use crate::error::{Error, Result};
use crate::render::ModelRegistry;
use super::model_instance::{InstanceRecord, ModelHandle};
use super::spatial_index::{enforce_rejection_policy, SpatialIndex, SpatialIndexStats};

#[derive(Clone)]
pub struct SharedSpatialIndex {
    inner: Arc<RwLock<SpatialIndex>>,
}

impl SharedSpatialIndex {
    pub fn new(index: SpatialIndex) -> Self {
        Self {
            inner: Arc::new(RwLock::new(index)),
        }
    }

    pub fn insert(&self, model: ModelHandle, position: Vec3) -> Result<()> {
        let (result, panic_on_rejection) = {
            let mut index = self.write_lock()?;
            (index.place(model, position), index.panics_on_rejection())
        };
        enforce_rejection_policy(panic_on_rejection, result)
    }

    pub fn remove(&self, model: ModelHandle) -> Result<usize> {
        Ok(self.write_lock()?.remove(model))
    }

    pub fn remove_at(&self, model: ModelHandle, position: Vec3) -> Result<bool> {
        Ok(self.write_lock()?.remove_at(model, position))
    }

    pub fn clear(&self) -> Result<()> {
        self.write_lock()?.clear();
        Ok(())
    }

    pub fn query(&self, corners: &[Vec3], registry: &dyn ModelRegistry) -> Result<Vec<InstanceRecord>> {
        self.read_lock()?.query(corners, registry)
    }

    pub fn len(&self) -> Result<usize> {
        Ok(self.read_lock()?.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.read_lock()?.is_empty())
    }

    pub fn stats(&self) -> Result<SpatialIndexStats> {
        Ok(self.read_lock()?.stats())
    }

    /// Run `f` with shared access (several readers at once)
    pub fn read<R>(&self, f: impl FnOnce(&SpatialIndex) -> R) -> Result<R> {
        let index = self.read_lock()?;
        Ok(f(&index))
    }

    /// Run `f` with exclusive access, e.g. to batch a level load under one lock
    pub fn write<R>(&self, f: impl FnOnce(&mut SpatialIndex) -> R) -> Result<R> {
        let mut index = self.write_lock()?;
        Ok(f(&mut index))
    }

    fn read_lock(&self) -> Result<RwLockReadGuard<'_, SpatialIndex>> {
        self.inner.read().map_err(poisoned)
    }

    fn write_lock(&self) -> Result<RwLockWriteGuard<'_, SpatialIndex>> {
        self.inner.write().map_err(poisoned)
    }
}

fn poisoned<T>(_: PoisonError<T>) -> Error {
    let error = Error::LockPoisoned(
        "spatial index lock poisoned by a panic during a previous operation".to_string()
    );
    crate::engine_error!("galaxy3d::SpatialIndex", "{}", error);
    error
}

#[cfg(test)]
#[path = "shared_spatial_index_tests.rs"]
mod tests;
