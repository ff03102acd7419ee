/// StaticWorld: owner of the spatial index for a running level.
///
/// Two phases share one index without a lock on the frame path:
///
/// - **Load**: the owner fills the index through `index_mut()`.
/// - **Play**: the render loop reads it through `index()`. Other threads
///   never touch the index; they post edits to a `WorldEditQueue`, and the
///   frame loop calls `apply_pending_edits()` between two frames.
///
/// Since `apply_pending_edits` takes `&mut self`, the borrow checker
/// guarantees no `index()` borrow is alive while edits are applied.
///
/// # Example
///
/// ```no_run
/// use galaxy_3d_static_world::galaxy3d::world::{StaticWorld, SpatialIndexDesc};
/// use galaxy_3d_static_world::galaxy3d::render::ModelTable;
/// use galaxy_3d_static_world::glam::Vec3;
///
/// let mut models = ModelTable::new();
/// let rock = models.register("rock").unwrap();
///
/// let mut world = StaticWorld::new(SpatialIndexDesc::default());
/// world.index_mut().insert(rock, Vec3::new(10.0, 0.0, 5.0)).unwrap();
///
/// // From a streaming thread
/// let edits = world.edit_queue();
/// edits.insert(rock, Vec3::new(-3.0, 0.0, 5.0));
///
/// // Between two frames
/// let report = world.apply_pending_edits();
/// assert_eq!(report.applied, 1);
/// ```

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use glam::Vec3;
use super::model_instance::ModelHandle;
use super::spatial_index::{SpatialIndex, SpatialIndexDesc};

const SOURCE: &str = "galaxy3d::StaticWorld";

// ===== EDITS =====

/// A deferred mutation of the world
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WorldEdit {
    Insert { model: ModelHandle, position: Vec3 },
    /// Remove every placement of the model
    Remove { model: ModelHandle },
    RemoveAt { model: ModelHandle, position: Vec3 },
    Clear,
}

/// Outcome of one `apply_pending_edits` call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EditReport {
    /// Edits that went through (including no-op removals)
    pub applied: usize,
    /// Insertions refused by the index (already logged by it)
    pub rejected: usize,
}

/// Cloneable, thread-safe FIFO of pending world edits.
///
/// Pushing never blocks on the render path: the lock only guards the
/// edit list, never the index.
#[derive(Clone, Default)]
pub struct WorldEditQueue {
    edits: Arc<Mutex<Vec<WorldEdit>>>,
}

impl WorldEditQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, edit: WorldEdit) {
        self.lock().push(edit);
    }

    pub fn insert(&self, model: ModelHandle, position: Vec3) {
        self.push(WorldEdit::Insert { model, position });
    }

    pub fn remove(&self, model: ModelHandle) {
        self.push(WorldEdit::Remove { model });
    }

    pub fn remove_at(&self, model: ModelHandle, position: Vec3) {
        self.push(WorldEdit::RemoveAt { model, position });
    }

    pub fn clear(&self) {
        self.push(WorldEdit::Clear);
    }

    /// Number of edits waiting for the next drain
    pub fn pending(&self) -> usize {
        self.lock().len()
    }

    fn drain(&self) -> Vec<WorldEdit> {
        std::mem::take(&mut *self.lock())
    }

    // Poison is ignored: the edit list is valid whatever the panicking thread did
    fn lock(&self) -> MutexGuard<'_, Vec<WorldEdit>> {
        self.edits.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// ===== STATIC WORLD =====

pub struct StaticWorld {
    index: SpatialIndex,
    edits: WorldEditQueue,
}

impl StaticWorld {
    pub fn new(desc: SpatialIndexDesc) -> Self {
        Self::from_index(SpatialIndex::new(desc))
    }

    /// Wrap an index that was built elsewhere (e.g. during a load screen)
    pub fn from_index(index: SpatialIndex) -> Self {
        Self {
            index,
            edits: WorldEditQueue::new(),
        }
    }

    /// Read access for the frame path
    pub fn index(&self) -> &SpatialIndex {
        &self.index
    }

    /// Direct mutation, for the load phase
    pub fn index_mut(&mut self) -> &mut SpatialIndex {
        &mut self.index
    }

    /// A handle for posting edits from any thread
    pub fn edit_queue(&self) -> WorldEditQueue {
        self.edits.clone()
    }

    /// Apply every queued edit in submission order.
    ///
    /// Rejected insertions are counted and the drain goes on (unless the
    /// index is configured to panic on rejection).
    pub fn apply_pending_edits(&mut self) -> EditReport {
        let edits = self.edits.drain();
        let mut report = EditReport::default();

        for edit in edits {
            match edit {
                WorldEdit::Insert { model, position } => {
                    match self.index.insert(model, position) {
                        Ok(()) => report.applied += 1,
                        Err(_) => report.rejected += 1,
                    }
                }
                WorldEdit::Remove { model } => {
                    self.index.remove(model);
                    report.applied += 1;
                }
                WorldEdit::RemoveAt { model, position } => {
                    self.index.remove_at(model, position);
                    report.applied += 1;
                }
                WorldEdit::Clear => {
                    self.index.clear();
                    report.applied += 1;
                }
            }
        }

        if report.rejected > 0 {
            crate::engine_warn!(SOURCE, "Applied {} edit(s), {} rejected", report.applied, report.rejected);
        } else if report.applied > 0 {
            crate::engine_debug!(SOURCE, "Applied {} edit(s)", report.applied);
        }

        report
    }

    /// Take the index back out, e.g. to hand it to a `SharedSpatialIndex`.
    /// Edits still queued are dropped.
    pub fn into_index(self) -> SpatialIndex {
        let dropped = self.edits.pending();
        if dropped > 0 {
            crate::engine_warn!(SOURCE, "Dropping {} unapplied edit(s)", dropped);
        }
        self.index
    }
}

#[cfg(test)]
#[path = "static_world_tests.rs"]
mod tests;
