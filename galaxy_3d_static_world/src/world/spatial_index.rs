/// SpatialIndex: lazily-subdividing octree over static model instances.
///
/// The root region is fixed at construction and never grows. Each
/// instance is treated as a point: it lives in a leaf slot of the deepest
/// internal node on its octant path, and a slot is only subdivided when a
/// second instance lands in it.
///
/// Queries take the 8 corners of the viewer's visible region, reduce them
/// to one AABB and walk the tree, pruning every subtree whose region does
/// not overlap that AABB.
///
/// Insertion preconditions (position inside the root region, not on top
/// of an existing instance, separable within `max_depth` levels) are
/// reported through `Result`, logged at ERROR, counted in
/// `SpatialIndexStats::rejected_inserts`, and, when
/// `SpatialIndexDesc::panic_on_rejection` is set, turned into a panic.
/// A rejected insertion leaves the tree exactly as it was.

use glam::Vec3;
use rustc_hash::FxHashMap;
use crate::error::{Error, Result};
use crate::render::ModelRegistry;
use super::bounding_region::BoundingRegion;
use super::model_instance::{InstanceRecord, ModelHandle, ModelInstance};
use super::query_volume::QueryVolume;
use super::tree_node::{InsertFailure, InternalNode, TreeShape};

/// Half-extent of the default world cube, centered on the origin
pub const DEFAULT_WORLD_HALF_EXTENT: f32 = 1.0e8;

/// Default maximum depth of an internal node (root = 0)
pub const DEFAULT_MAX_DEPTH: u32 = 64;

const SOURCE: &str = "galaxy3d::SpatialIndex";

// ===== DESCRIPTOR =====

/// Descriptor for creating a SpatialIndex
#[derive(Debug, Clone, Copy)]
pub struct SpatialIndexDesc {
    /// Fixed root region; every inserted position must lie inside it
    pub region: BoundingRegion,
    /// Deepest level at which a split may create an internal node
    pub max_depth: u32,
    /// Panic on rejected insertions (development builds by default)
    pub panic_on_rejection: bool,
}

impl Default for SpatialIndexDesc {
    fn default() -> Self {
        Self {
            region: BoundingRegion::cube(Vec3::ZERO, DEFAULT_WORLD_HALF_EXTENT),
            max_depth: DEFAULT_MAX_DEPTH,
            panic_on_rejection: cfg!(debug_assertions),
        }
    }
}

// ===== STATS =====

/// Snapshot of the index shape, gathered by a full walk
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpatialIndexStats {
    /// Instances currently placed
    pub instance_count: usize,
    /// Leaf nodes reachable from the root (always equals `instance_count`)
    pub leaf_count: usize,
    /// Internal nodes including the root. Never shrinks on removal.
    pub internal_node_count: usize,
    /// Depth of the deepest leaf (0 when empty)
    pub deepest_leaf: u32,
    /// Insertions rejected since construction (survives `clear`)
    pub rejected_inserts: u64,
}

// ===== SPATIAL INDEX =====

pub struct SpatialIndex {
    root: InternalNode,
    count: usize,
    desc: SpatialIndexDesc,
    /// Reverse lookup: model → positions where it is placed.
    /// The tree is keyed by position, this makes removal by handle O(depth).
    locations: FxHashMap<ModelHandle, Vec<Vec3>>,
    rejected_inserts: u64,
}

impl SpatialIndex {
    pub fn new(desc: SpatialIndexDesc) -> Self {
        crate::engine_debug!(SOURCE,
            "Created index: center {}, half-extents {}, max depth {}",
            desc.region.center(), desc.region.half_extents(), desc.max_depth);

        Self {
            root: InternalNode::new(desc.region),
            count: 0,
            desc,
            locations: FxHashMap::default(),
            rejected_inserts: 0,
        }
    }

    /// Index over `region` with the default depth and rejection policy
    pub fn with_region(region: BoundingRegion) -> Self {
        Self::new(SpatialIndexDesc {
            region,
            ..SpatialIndexDesc::default()
        })
    }

    // ===== ACCESSORS =====

    /// Fixed root region
    pub fn region(&self) -> &BoundingRegion {
        &self.root.region
    }

    pub fn max_depth(&self) -> u32 {
        self.desc.max_depth
    }

    /// Number of placed instances
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Whether at least one instance of `model` is placed
    pub fn contains(&self, model: ModelHandle) -> bool {
        self.locations.contains_key(&model)
    }

    /// Positions at which `model` is placed, in insertion order
    /// until a removal reorders them
    pub fn positions_of(&self, model: ModelHandle) -> &[Vec3] {
        self.locations.get(&model).map(Vec::as_slice).unwrap_or(&[])
    }

    // ===== MUTATION =====

    /// Place an instance of `model` at `position`.
    ///
    /// # Errors
    ///
    /// - `OutOfBounds` if `position` is outside the root region (or NaN)
    /// - `DuplicatePosition` if an instance already sits at `position`
    /// - `DepthLimitExceeded` if separating it from its neighbour would
    ///   need a split deeper than `max_depth`
    pub fn insert(&mut self, model: ModelHandle, position: Vec3) -> Result<()> {
        let result = self.place(model, position);
        enforce_rejection_policy(self.desc.panic_on_rejection, result)
    }

    /// `insert` without the panic: rejections are still counted and logged
    pub(crate) fn place(&mut self, model: ModelHandle, position: Vec3) -> Result<()> {
        if !self.root.region.contains_point(position) {
            let region = self.root.region;
            return Err(self.reject(Error::OutOfBounds(format!(
                "{} lies outside the root region [{} .. {}]",
                position, region.min(), region.max()
            ))));
        }

        let instance = ModelInstance::new(model, position);
        match self.root.insert(instance, 0, self.desc.max_depth) {
            Ok(depth) => {
                self.count += 1;
                self.locations.entry(model).or_default().push(position);
                crate::engine_trace!(SOURCE, "Placed {:?} at {} (depth {})", model, position, depth);
                Ok(())
            }
            Err(InsertFailure::Duplicate(existing)) => {
                Err(self.reject(Error::DuplicatePosition(format!(
                    "{} is already occupied by an instance of {:?}",
                    position, existing
                ))))
            }
            Err(InsertFailure::DepthLimit(depth)) => {
                let max_depth = self.desc.max_depth;
                Err(self.reject(Error::DepthLimitExceeded(format!(
                    "separating {} from its neighbour needs depth {} (max {})",
                    position, depth, max_depth
                ))))
            }
        }
    }

    /// Remove every placement of `model`. Returns how many were removed.
    ///
    /// Removing an unknown handle is a no-op. Emptied internal nodes are
    /// kept as they are.
    pub fn remove(&mut self, model: ModelHandle) -> usize {
        let Some(positions) = self.locations.remove(&model) else {
            crate::engine_debug!(SOURCE, "Remove: {:?} is not placed", model);
            return 0;
        };

        let mut removed = 0;
        for position in &positions {
            if self.root.remove(model, *position) {
                removed += 1;
            }
        }
        debug_assert_eq!(removed, positions.len(), "location table out of sync with tree");

        self.count -= removed;
        crate::engine_trace!(SOURCE, "Removed {} instance(s) of {:?}", removed, model);
        removed
    }

    /// Remove the single placement of `model` at exactly `position`.
    ///
    /// Returns `false` (and changes nothing) if there is none.
    pub fn remove_at(&mut self, model: ModelHandle, position: Vec3) -> bool {
        let Some(positions) = self.locations.get_mut(&model) else {
            crate::engine_debug!(SOURCE, "Remove: {:?} is not placed", model);
            return false;
        };
        let Some(slot) = positions.iter().position(|p| *p == position) else {
            crate::engine_debug!(SOURCE, "Remove: {:?} is not placed at {}", model, position);
            return false;
        };

        if !self.root.remove(model, position) {
            debug_assert!(false, "location table out of sync with tree");
            return false;
        }

        positions.swap_remove(slot);
        if positions.is_empty() {
            self.locations.remove(&model);
        }
        self.count -= 1;
        true
    }

    /// Drop every instance and start over with a fresh root over the same region.
    ///
    /// Referenced models are untouched. The rejection counter is kept.
    pub fn clear(&mut self) {
        let dropped = self.count;
        self.root = InternalNode::new(self.desc.region);
        self.locations.clear();
        self.count = 0;
        crate::engine_info!(SOURCE, "Index cleared ({} instances dropped)", dropped);
    }

    // ===== QUERIES =====

    /// Visible instances for the 8 corners of a query volume, with model
    /// handles resolved through `registry`.
    ///
    /// Anything other than 8 finite corners yields an empty result.
    ///
    /// # Errors
    ///
    /// `UnresolvedModel` if `registry` has no index for a visible handle.
    pub fn query(&self, corners: &[Vec3], registry: &dyn ModelRegistry) -> Result<Vec<InstanceRecord>> {
        let mut records = Vec::new();
        self.query_into(corners, registry, &mut records)?;
        Ok(records)
    }

    /// Same as `query`, appending to `results` so the caller can reuse
    /// the allocation across frames. On error nothing is appended.
    pub fn query_into(
        &self,
        corners: &[Vec3],
        registry: &dyn ModelRegistry,
        results: &mut Vec<InstanceRecord>,
    ) -> Result<()> {
        let Some(volume) = QueryVolume::from_corners(corners) else {
            crate::engine_debug!(SOURCE, "Query ignored: expected 8 finite corners, got {}", corners.len());
            return Ok(());
        };

        let mut instances = Vec::new();
        self.query_region(volume.bounds(), &mut instances);

        let start = results.len();
        results.reserve(instances.len());
        for instance in instances {
            match registry.resolve_index(instance.model) {
                Some(model_index) => results.push(InstanceRecord::new(model_index, instance.position)),
                None => {
                    results.truncate(start);
                    let error = Error::UnresolvedModel(format!(
                        "{:?} (placed at {}) has no registry index", instance.model, instance.position
                    ));
                    crate::engine_error!(SOURCE, "Query failed: {}", error);
                    return Err(error);
                }
            }
        }
        Ok(())
    }

    /// Raw query: append every instance whose position lies inside `volume`.
    pub fn query_region(&self, volume: &BoundingRegion, results: &mut Vec<ModelInstance>) {
        if !self.root.region.overlaps(volume) {
            return;
        }
        if volume.contains_region(&self.root.region) {
            self.root.collect_all(results);
        } else {
            self.root.query(volume, results);
        }
    }

    /// Every placed instance, depth-first in octant order
    pub fn instances(&self) -> Vec<ModelInstance> {
        let mut results = Vec::with_capacity(self.count);
        self.root.collect_all(&mut results);
        results
    }

    pub fn stats(&self) -> SpatialIndexStats {
        let mut shape = TreeShape::default();
        self.root.shape(0, &mut shape);
        debug_assert_eq!(shape.leaves, self.count);

        SpatialIndexStats {
            instance_count: self.count,
            leaf_count: shape.leaves,
            internal_node_count: shape.internal_nodes,
            deepest_leaf: shape.deepest_leaf,
            rejected_inserts: self.rejected_inserts,
        }
    }

    // ===== INTERNAL =====

    pub(crate) fn panics_on_rejection(&self) -> bool {
        self.desc.panic_on_rejection
    }

    /// Count and log a rejected insertion
    fn reject(&mut self, error: Error) -> Error {
        self.rejected_inserts += 1;
        crate::engine_error!(SOURCE, "Rejected insertion: {}", error);
        error
    }
}

/// Turn a rejected insertion into a panic when `panic_on_rejection` is set
pub(crate) fn enforce_rejection_policy(panic_on_rejection: bool, result: Result<()>) -> Result<()> {
    if let Err(error) = &result {
        if panic_on_rejection {
            panic!("{}: rejected insertion: {}", SOURCE, error);
        }
    }
    result
}

impl Default for SpatialIndex {
    fn default() -> Self {
        Self::new(SpatialIndexDesc::default())
    }
}

#[cfg(test)]
#[path = "spatial_index_tests.rs"]
mod tests;
